//! PostgreSQL-backed store

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use super::repos::{PostRepo, UserRepo};
use super::{schema, DbError, PostInclude, Store, UserInclude};
use crate::models::{NewPost, NewUser, Post, User};

/// Pool size used when the caller does not pick one
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Store over a sqlx connection pool
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool of at most `max_connections`, then make sure the tables
    /// exist.
    ///
    /// ```ignore
    /// let store = PgStore::connect("postgres://localhost/postgraph", DEFAULT_MAX_CONNECTIONS).await?;
    /// ```
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, DbError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        schema::bootstrap(&pool).await?;
        tracing::debug!(max_connections, "Connected to PostgreSQL");
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Store for PgStore {
    async fn find_posts(&self, include: PostInclude) -> Result<Vec<Post>, DbError> {
        let repo = PostRepo::new(&self.pool);
        if include.user {
            repo.list_with_user().await
        } else {
            repo.list().await
        }
    }

    async fn find_users(&self, include: UserInclude) -> Result<Vec<User>, DbError> {
        let repo = UserRepo::new(&self.pool);
        if include.posts {
            repo.list_with_posts().await
        } else {
            repo.list().await
        }
    }

    async fn create_post(&self, new: NewPost) -> Result<Post, DbError> {
        PostRepo::new(&self.pool).create(new).await
    }

    async fn create_user(&self, new: NewUser) -> Result<User, DbError> {
        UserRepo::new(&self.pool).create(new).await
    }

    async fn ping(&self) -> Result<(), DbError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        tracing::info!("Closing database pool");
        self.pool.close().await;
    }
}
