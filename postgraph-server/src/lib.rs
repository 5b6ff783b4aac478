//! postgraph-server: users and posts over REST and GraphQL
//!
//! A thin backend over a relational store:
//! - `GET /` and `POST /` list and create posts
//! - `/graphql` answers `getPosts` / `getUsers` and serves GraphiQL
//!
//! The store is constructed by the caller and injected into the router;
//! see [`http::run_server`].

pub mod db;
pub mod graphql;
pub mod http;
pub mod models;

pub use db::{DbError, MemoryStore, PgStore, SharedStore, Store};
pub use http::{build_router, run_server, ServerConfig, ServerError};
