use async_graphql::{
    Context, EmptyMutation, EmptySubscription, ErrorExtensions, Object, Schema,
};

use crate::db::{DbError, PostInclude, SharedStore, UserInclude};

use super::types::*;

pub type AppSchema = Schema<QueryRoot, EmptyMutation, EmptySubscription>;

/// Build the schema with the store injected as context data.
pub fn build_schema(store: SharedStore) -> AppSchema {
    Schema::build(QueryRoot, EmptyMutation, EmptySubscription)
        .data(store)
        .finish()
}

fn get_store<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a SharedStore> {
    ctx.data::<SharedStore>()
}

/// Translate a store failure into a GraphQL error with `extensions.code`.
///
/// Constraint and not-found messages are safe to show; anything else is
/// logged and replaced with a generic message.
fn to_graphql_error(err: DbError) -> async_graphql::Error {
    let (code, message) = match &err {
        DbError::NotFound(_) => ("NOT_FOUND", err.to_string()),
        DbError::Constraint { .. } => ("CONSTRAINT_VIOLATION", err.to_string()),
        DbError::Unavailable(reason) => {
            tracing::error!("Database unavailable: {}", reason);
            ("UNAVAILABLE", "database unavailable".to_owned())
        }
        DbError::Sqlx(e) => {
            tracing::error!("Database error: {}", e);
            ("INTERNAL", "an internal error occurred".to_owned())
        }
    };

    async_graphql::Error::new(message).extend_with(|_, ext| ext.set("code", code))
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Every post, each with its owning user
    async fn get_posts(
        &self,
        ctx: &Context<'_>,
    ) -> async_graphql::Result<Option<Vec<Option<Post>>>> {
        let store = get_store(ctx)?;
        let posts = store
            .find_posts(PostInclude { user: true })
            .await
            .map_err(to_graphql_error)?;

        Ok(Some(posts.into_iter().map(|p| Some(Post::from(p))).collect()))
    }

    /// Every user, each with their posts
    async fn get_users(
        &self,
        ctx: &Context<'_>,
    ) -> async_graphql::Result<Option<Vec<Option<User>>>> {
        let store = get_store(ctx)?;
        let users = store
            .find_users(UserInclude { posts: true })
            .await
            .map_err(to_graphql_error)?;

        Ok(Some(users.into_iter().map(|u| Some(User::from(u))).collect()))
    }
}
