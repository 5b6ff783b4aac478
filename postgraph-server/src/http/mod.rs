//! HTTP server layer
//!
//! Axum server with:
//! - REST post feed at `/`
//! - GraphQL (plus GraphiQL) at `/graphql`
//! - CORS (localhost only by default)
//! - Request tracing and timeouts
//! - Graceful shutdown followed by store teardown
//! - JSON error responses

pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{build_router, run_server, AppState, ServerConfig, ServerError};
