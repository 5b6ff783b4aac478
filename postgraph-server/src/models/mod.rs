//! Domain models with validation at construction
//!
//! Request input is validated when creating `NewPost` / `NewUser`.
//! Invalid input returns ValidationError, not panic.

pub mod post;
pub mod user;
pub mod validation;

pub use post::{NewPost, Post, PostText};
pub use user::{NewUser, RecordId, User, UserName};
pub use validation::ValidationError;
