//! Post repository
//!
//! - list: optional JOIN on users for the `user` include
//! - create: single INSERT ... RETURNING, foreign key guards the owner

use sqlx::{FromRow, PgPool, Row};

use crate::db::DbError;
use crate::models::{NewPost, Post, RecordId, User};

/// Post row without relations
#[derive(Debug, Clone, FromRow)]
struct PostRow {
    id: String,
    text: String,
    user_id: String,
}

impl From<PostRow> for Post {
    fn from(r: PostRow) -> Self {
        Self {
            id: r.id,
            text: r.text,
            user_id: r.user_id,
            user: None,
        }
    }
}

/// Post repository
pub struct PostRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> PostRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every post in creation order.
    pub async fn list(&self) -> Result<Vec<Post>, DbError> {
        let rows: Vec<PostRow> = sqlx::query_as(
            r#"
            SELECT id, text, user_id
            FROM posts
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Post::from).collect())
    }

    /// List every post with its owning user attached.
    ///
    /// Single JOIN query (no N+1).
    pub async fn list_with_user(&self) -> Result<Vec<Post>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT
                p.id,
                p.text,
                p.user_id,
                u.name AS user_name
            FROM posts p
            JOIN users u ON u.id = p.user_id
            ORDER BY p.created_at ASC, p.id ASC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        let items = rows
            .into_iter()
            .map(|r| {
                let user_id: String = r.get("user_id");
                Post {
                    id: r.get("id"),
                    text: r.get("text"),
                    user: Some(Box::new(User {
                        id: user_id.clone(),
                        name: r.get("user_name"),
                        posts: None,
                    })),
                    user_id,
                }
            })
            .collect();

        Ok(items)
    }

    /// Create a post with a generated id.
    ///
    /// A `user_id` with no matching user fails on the foreign key and comes
    /// back as `DbError::Constraint { kind: ForeignKey, .. }`.
    pub async fn create(&self, new: NewPost) -> Result<Post, DbError> {
        let id = RecordId::generate();

        let row: PostRow = sqlx::query_as(
            r#"
            INSERT INTO posts (id, text, user_id)
            VALUES ($1, $2, $3)
            RETURNING id, text, user_id
            "#,
        )
        .bind(id.as_str())
        .bind(new.text.as_str())
        .bind(new.user_id.as_str())
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }
}
