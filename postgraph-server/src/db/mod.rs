//! Database layer - store trait, PostgreSQL and in-memory stores, repositories
//!
//! # Design Principles
//!
//! - One `Store` handle per process, shared as `Arc<dyn Store>`
//! - Relation includes use JOINs - no N+1 queries
//! - Rely on DB constraints (foreign key on posts.user_id) - no check-then-insert
//! - Every error is classified into a `DbError` kind at this boundary

pub mod error;
pub mod memory;
pub mod pg;
pub mod repos;
pub mod schema;
pub mod store;

pub use error::{ConstraintKind, DbError};
pub use memory::MemoryStore;
pub use pg::{PgStore, DEFAULT_MAX_CONNECTIONS};
pub use store::{PostInclude, SharedStore, Store, UserInclude};
