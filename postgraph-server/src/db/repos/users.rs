//! User repository
//!
//! - list: optional LEFT JOIN on posts for the `posts` include
//! - create: INSERT ... RETURNING, used for out-of-band seeding

use sqlx::{FromRow, PgPool, Row};

use crate::db::DbError;
use crate::models::{NewUser, Post, RecordId, User};

/// User row without relations
#[derive(Debug, Clone, FromRow)]
struct UserRow {
    id: String,
    name: String,
}

impl From<UserRow> for User {
    fn from(r: UserRow) -> Self {
        Self {
            id: r.id,
            name: r.name,
            posts: None,
        }
    }
}

/// User repository
pub struct UserRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every user in creation order.
    pub async fn list(&self) -> Result<Vec<User>, DbError> {
        let rows: Vec<UserRow> = sqlx::query_as(
            r#"
            SELECT id, name
            FROM users
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    /// List every user with their posts attached.
    ///
    /// Single LEFT JOIN query; rows arrive grouped by user because of the
    /// ORDER BY, so folding them is a linear pass.
    pub async fn list_with_posts(&self) -> Result<Vec<User>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT
                u.id,
                u.name,
                p.id AS post_id,
                p.text AS post_text
            FROM users u
            LEFT JOIN posts p ON p.user_id = u.id
            ORDER BY u.created_at ASC, u.id ASC, p.created_at ASC, p.id ASC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        let mut users: Vec<User> = Vec::new();
        for r in rows {
            let id: String = r.get("id");

            let same_user = users.last().is_some_and(|u| u.id == id);
            if !same_user {
                users.push(User {
                    id: id.clone(),
                    name: r.get("name"),
                    posts: Some(Vec::new()),
                });
            }

            let post_id: Option<String> = r.get("post_id");
            if let (Some(post_id), Some(user)) = (post_id, users.last_mut()) {
                user.posts.get_or_insert_with(Vec::new).push(Post {
                    id: post_id,
                    text: r.get("post_text"),
                    user_id: id,
                    user: None,
                });
            }
        }

        Ok(users)
    }

    /// Create a user, generating an id when none is given.
    pub async fn create(&self, new: NewUser) -> Result<User, DbError> {
        let id = new.id.unwrap_or_else(RecordId::generate);

        let row: UserRow = sqlx::query_as(
            r#"
            INSERT INTO users (id, name)
            VALUES ($1, $2)
            RETURNING id, name
            "#,
        )
        .bind(id.as_str())
        .bind(new.name.as_str())
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }
}
