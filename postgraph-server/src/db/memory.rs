//! In-process store
//!
//! Mirrors the PostgreSQL store's observable behavior: creation order,
//! foreign key check on `create_post`, unique ids on `create_user`.
//! Used by tests and by `postgraph serve --in-memory`.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{ConstraintKind, DbError, PostInclude, Store, UserInclude};
use crate::models::{NewPost, NewUser, Post, RecordId, User};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    posts: Vec<Post>,
}

impl Tables {
    fn user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }
}

/// Store backed by in-memory vectors
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    closed: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_open(&self) -> Result<(), DbError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(DbError::Unavailable("store closed".to_owned()));
        }
        Ok(())
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn find_posts(&self, include: PostInclude) -> Result<Vec<Post>, DbError> {
        self.ensure_open()?;
        let tables = self.tables.read().await;

        let posts = tables
            .posts
            .iter()
            .map(|p| {
                let mut post = p.clone();
                if include.user {
                    post.user = tables.user(&p.user_id).cloned().map(Box::new);
                }
                post
            })
            .collect();

        Ok(posts)
    }

    async fn find_users(&self, include: UserInclude) -> Result<Vec<User>, DbError> {
        self.ensure_open()?;
        let tables = self.tables.read().await;

        let users = tables
            .users
            .iter()
            .map(|u| {
                let mut user = u.clone();
                if include.posts {
                    user.posts = Some(
                        tables
                            .posts
                            .iter()
                            .filter(|p| p.user_id == u.id)
                            .cloned()
                            .collect(),
                    );
                }
                user
            })
            .collect();

        Ok(users)
    }

    async fn create_post(&self, new: NewPost) -> Result<Post, DbError> {
        self.ensure_open()?;
        let mut tables = self.tables.write().await;

        if tables.user(new.user_id.as_str()).is_none() {
            return Err(DbError::unknown_user(new.user_id.as_str()));
        }

        let post = Post {
            id: RecordId::generate().into_string(),
            text: new.text.as_str().to_owned(),
            user_id: new.user_id.into_string(),
            user: None,
        };
        tables.posts.push(post.clone());
        Ok(post)
    }

    async fn create_user(&self, new: NewUser) -> Result<User, DbError> {
        self.ensure_open()?;
        let mut tables = self.tables.write().await;

        let id = new.id.unwrap_or_else(RecordId::generate);
        if tables.user(id.as_str()).is_some() {
            return Err(DbError::Constraint {
                kind: ConstraintKind::Unique,
                constraint: Some("users_pkey".to_owned()),
                message: format!("user '{}' already exists", id.as_str()),
            });
        }

        let user = User {
            id: id.into_string(),
            name: new.name.as_str().to_owned(),
            posts: None,
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn ping(&self) -> Result<(), DbError> {
        self.ensure_open()
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }
}
