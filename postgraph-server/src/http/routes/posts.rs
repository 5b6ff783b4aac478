//! REST post feed
//!
//! - `GET /` lists every post (no relations)
//! - `POST /` creates a post for an existing user

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::{Deserialize, Serialize};

use crate::db::PostInclude;
use crate::http::error::ApiError;
use crate::http::extractors::ValidJson;
use crate::http::server::AppState;
use crate::models::{NewPost, Post};

/// Create post request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub text: String,
    pub user_id: String,
}

/// Post list response
#[derive(Serialize)]
pub struct PostListResponse {
    pub success: bool,
    pub posts: Vec<Post>,
}

/// Single post response
#[derive(Serialize)]
pub struct PostResponse {
    pub success: bool,
    pub post: Post,
}

/// GET / - list all posts
async fn list_posts(State(state): State<Arc<AppState>>) -> Result<Json<PostListResponse>, ApiError> {
    let posts = state.store.find_posts(PostInclude::default()).await?;

    Ok(Json(PostListResponse {
        success: true,
        posts,
    }))
}

/// POST / - create a post
async fn create_post(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<CreatePostRequest>,
) -> Result<(StatusCode, Json<PostResponse>), ApiError> {
    let new = NewPost::new(&req.text, &req.user_id)?;
    let post = state.store.create_post(new).await?;
    tracing::debug!(post_id = %post.id, user_id = %post.user_id, "Post created");

    Ok((
        StatusCode::CREATED,
        Json(PostResponse {
            success: true,
            post,
        }),
    ))
}

/// Post routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(list_posts).post(create_post))
}
