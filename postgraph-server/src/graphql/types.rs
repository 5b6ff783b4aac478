//! GraphQL object types
//!
//! Every field is nullable so the published SDL reads `id: ID`,
//! `posts: [Post]` and so on.

use async_graphql::{SimpleObject, ID};

use crate::models;

/// A post and, when loaded, the user who wrote it
#[derive(SimpleObject, Clone)]
pub struct Post {
    pub id: Option<ID>,
    pub text: Option<String>,
    pub user_id: Option<String>,
    pub user: Option<Box<User>>,
}

impl From<models::Post> for Post {
    fn from(p: models::Post) -> Self {
        Self {
            id: Some(ID(p.id)),
            text: Some(p.text),
            user_id: Some(p.user_id),
            user: p.user.map(|u| Box::new(User::from(*u))),
        }
    }
}

/// A user and, when loaded, everything they posted
#[derive(SimpleObject, Clone)]
pub struct User {
    pub id: Option<ID>,
    pub name: Option<String>,
    pub posts: Option<Vec<Option<Post>>>,
}

impl From<models::User> for User {
    fn from(u: models::User) -> Self {
        Self {
            id: Some(ID(u.id)),
            name: Some(u.name),
            posts: u
                .posts
                .map(|posts| posts.into_iter().map(|p| Some(Post::from(p))).collect()),
        }
    }
}
