//! PostgreSQL repositories
//!
//! Each repository follows these patterns:
//! - Uses JOINs for relation includes (no N+1)
//! - Lets the foreign key reject orphan posts (no check-then-insert)
//! - Orders by `created_at, id` so listings are stable

pub mod posts;
pub mod users;

pub use posts::PostRepo;
pub use users::UserRepo;
