//! GraphQL schema and resolvers for postgraph.
//!
//! Read-only API over users and posts. Both queries delegate straight to
//! the store with the relation eagerly included.
//!
//! ## Usage
//!
//! ```bash
//! # Start the server (GraphiQL at http://localhost:3000/graphql)
//! postgraph serve
//!
//! # Print the schema
//! postgraph schema
//! ```
//!
//! ## Schema
//!
//! - **Queries**: `getPosts`, `getUsers`

mod schema;
mod types;

pub use schema::{build_schema, AppSchema};
pub use types::*;
