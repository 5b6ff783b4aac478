//! Persistence client contract
//!
//! Handlers and resolvers only ever see `Arc<dyn Store>`. The process entry
//! point decides which implementation backs it (`PgStore` in production,
//! `MemoryStore` for tests and database-less local runs).

use std::sync::Arc;

use async_trait::async_trait;

use super::DbError;
use crate::models::{NewPost, NewUser, Post, User};

/// Relations to eager-load when listing posts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PostInclude {
    /// Attach the owning user to every post
    pub user: bool,
}

/// Relations to eager-load when listing users
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserInclude {
    /// Attach every user's posts
    pub posts: bool,
}

/// Shared store handle
pub type SharedStore = Arc<dyn Store>;

#[async_trait]
pub trait Store: Send + Sync {
    /// All posts in creation order.
    ///
    /// With `include.user` each post carries its owning user (without that
    /// user's posts).
    async fn find_posts(&self, include: PostInclude) -> Result<Vec<Post>, DbError>;

    /// All users in creation order.
    ///
    /// With `include.posts` each user carries exactly the posts whose
    /// `user_id` matches, in creation order, empty when there are none.
    async fn find_users(&self, include: UserInclude) -> Result<Vec<User>, DbError>;

    /// Insert a post with a generated id. A missing user is a foreign key
    /// constraint error.
    async fn create_post(&self, new: NewPost) -> Result<Post, DbError>;

    /// Insert a user. Only reachable from the CLI seeding command.
    async fn create_user(&self, new: NewUser) -> Result<User, DbError>;

    /// Cheap connectivity check.
    async fn ping(&self) -> Result<(), DbError>;

    /// Release underlying resources. Later calls fail with `Unavailable`.
    async fn close(&self);
}
