//! Axum server setup
//!
//! Server skeleton with:
//! - Localhost-only CORS by default
//! - Tracing and timeout middleware
//! - Graceful shutdown on SIGTERM/Ctrl+C, then store teardown

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderValue, StatusCode, Uri};
use axum::Router;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::error::ApiError;
use super::routes;
use crate::db::SharedStore;
use crate::graphql::{build_schema, AppSchema};

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 0.0.0.0:3000)
    pub bind_addr: SocketAddr,

    /// Allow permissive CORS (default: false = localhost only)
    ///
    /// WARNING: Setting this to true allows any origin.
    pub cors_permissive: bool,

    /// Serve GraphiQL on plain `GET /graphql` (default: true)
    pub graphiql: bool,

    /// Per-request timeout (default: 30s)
    pub request_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            cors_permissive: false,
            graphiql: true,
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Shared application state
pub struct AppState {
    pub store: SharedStore,
    pub schema: AppSchema,
    pub graphiql: bool,
}

/// Build the router over an already constructed store.
///
/// The same store handle backs the REST routes and the GraphQL resolvers.
pub fn build_router(store: SharedStore, config: &ServerConfig) -> Router {
    let state = AppState {
        schema: build_schema(store.clone()),
        store,
        graphiql: config.graphiql,
    };

    let cors = if config.cors_permissive {
        tracing::warn!("CORS: Permissive mode enabled - all origins allowed");
        CorsLayer::permissive()
    } else {
        // Localhost only
        CorsLayer::new()
            .allow_origin(localhost_origins(config.bind_addr.port()))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout,
        ))
        .layer(cors);

    Router::new()
        .merge(routes::posts::router())
        .merge(routes::graphql::router())
        .merge(routes::health::router())
        .fallback(fallback)
        .layer(middleware)
        .with_state(Arc::new(state))
}

fn localhost_origins(port: u16) -> Vec<HeaderValue> {
    ["localhost", "127.0.0.1"]
        .iter()
        .filter_map(|host| HeaderValue::from_str(&format!("http://{}:{}", host, port)).ok())
        .collect()
}

async fn fallback(uri: Uri) -> ApiError {
    ApiError::NotFound {
        message: format!("no route for {}", uri.path()),
    }
}

/// Run the HTTP server until a shutdown signal, then close the store.
///
/// # Example
///
/// ```ignore
/// let store: SharedStore = Arc::new(PgStore::connect(&database_url, 5).await?);
/// run_server(store, ServerConfig::default()).await?;
/// ```
pub async fn run_server(store: SharedStore, config: ServerConfig) -> Result<(), ServerError> {
    let app = build_router(store.clone(), &config);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);
    if config.graphiql {
        tracing::info!("GraphiQL: http://{}/graphql", config.bind_addr);
    }

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    store.close().await;
    served?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::db::{DbError, MemoryStore, PostInclude, Store, UserInclude};
    use crate::models::{NewPost, NewUser, Post, RecordId, User, UserName};

    /// Store whose reads take longer than any test timeout
    struct SlowStore;

    #[async_trait]
    impl Store for SlowStore {
        async fn find_posts(&self, _include: PostInclude) -> Result<Vec<Post>, DbError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(Vec::new())
        }

        async fn find_users(&self, _include: UserInclude) -> Result<Vec<User>, DbError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(Vec::new())
        }

        async fn create_post(&self, _new: NewPost) -> Result<Post, DbError> {
            Err(DbError::Unavailable("read-only".to_owned()))
        }

        async fn create_user(&self, _new: NewUser) -> Result<User, DbError> {
            Err(DbError::Unavailable("read-only".to_owned()))
        }

        async fn ping(&self) -> Result<(), DbError> {
            Ok(())
        }

        async fn close(&self) {}
    }

    fn with_origin(origin: &str) -> Request<Body> {
        Request::builder()
            .uri("/health")
            .header(header::ORIGIN, origin)
            .body(Body::empty())
            .unwrap()
    }

    async fn app_with_alice() -> (Router, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        store
            .create_user(NewUser {
                id: Some(RecordId::new("id", "u1").unwrap()),
                name: UserName::new("Alice").unwrap(),
            })
            .await
            .unwrap();
        let app = build_router(store.clone(), &ServerConfig::default());
        (app, store)
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap()
    }

    #[test]
    fn default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr.port(), 3000);
        assert!(!config.cors_permissive);
        assert!(config.graphiql);
    }

    #[test]
    fn localhost_origins_follow_port() {
        let origins = localhost_origins(3000);
        assert_eq!(origins.len(), 2);
        assert_eq!(origins[0], "http://localhost:3000");
        assert_eq!(origins[1], "http://127.0.0.1:3000");
    }

    #[tokio::test]
    async fn slow_requests_time_out_with_408() {
        let config = ServerConfig {
            request_timeout: Duration::from_millis(1),
            ..ServerConfig::default()
        };
        let app = build_router(Arc::new(SlowStore), &config);

        let (status, _) = send(
            &app,
            Request::builder().uri("/").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::REQUEST_TIMEOUT);

        let (status, _) = send(
            &app,
            Request::builder().uri("/health").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn cors_allows_only_localhost_by_default() {
        let (app, _store) = app_with_alice().await;

        let response = app.clone().oneshot(with_origin("http://evil.example")).await.unwrap();
        assert!(response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());

        let response = app.clone().oneshot(with_origin("http://localhost:3000")).await.unwrap();
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:3000"
        );
    }

    #[tokio::test]
    async fn permissive_cors_allows_any_origin() {
        let config = ServerConfig {
            cors_permissive: true,
            ..ServerConfig::default()
        };
        let app = build_router(Arc::new(MemoryStore::new()), &config);

        let response = app.oneshot(with_origin("http://evil.example")).await.unwrap();
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }

    #[tokio::test]
    async fn create_then_list_posts() {
        let (app, _store) = app_with_alice().await;

        let (status, body) = send(&app, post_json("/", r#"{"text": "hello", "userId": "u1"}"#)).await;
        assert_eq!(status, StatusCode::CREATED);
        let created: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(created["success"], true);
        assert_eq!(created["post"]["text"], "hello");
        assert_eq!(created["post"]["userId"], "u1");
        assert!(created["post"]["id"].as_str().is_some_and(|id| !id.is_empty()));

        let (status, body) = send(
            &app,
            Request::builder().uri("/").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let listed: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(listed["success"], true);
        assert_eq!(listed["posts"], json!([created["post"].clone()]));
        assert!(listed["posts"][0].get("user").is_none());
    }

    #[tokio::test]
    async fn unknown_user_is_rejected() {
        let (app, store) = app_with_alice().await;

        let (status, body) = send(&app, post_json("/", r#"{"text": "hi", "userId": "ghost"}"#)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "unknown_reference");

        let posts = store
            .find_posts(crate::db::PostInclude::default())
            .await
            .unwrap();
        assert!(posts.is_empty());
    }

    #[tokio::test]
    async fn malformed_bodies_are_400() {
        let (app, _store) = app_with_alice().await;

        for body in [
            r#"{"text": "missing user"}"#,
            r#"{"text": 42, "userId": "u1"}"#,
            "not json",
        ] {
            let (status, bytes) = send(&app, post_json("/", body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "body: {}", body);
            let json: Value = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(json["error"], "malformed_body");
        }

        let (status, bytes) = send(&app, post_json("/", r#"{"text": "x", "userId": ""}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["error"], "validation_error");
    }

    #[tokio::test]
    async fn graphql_post_executes_queries() {
        let (app, _store) = app_with_alice().await;
        send(&app, post_json("/", r#"{"text": "hello", "userId": "u1"}"#)).await;

        let (status, body) = send(
            &app,
            post_json("/graphql", r#"{"query": "{ getUsers { name posts { text userId } } }"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            body["data"]["getUsers"],
            json!([{ "name": "Alice", "posts": [{ "text": "hello", "userId": "u1" }] }])
        );
    }

    #[tokio::test]
    async fn graphql_errors_keep_status_200() {
        let (app, _store) = app_with_alice().await;

        let (status, body) = send(&app, post_json("/graphql", r#"{"query": "{ nope }"}"#)).await;
        assert_eq!(status, StatusCode::OK);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert!(body["errors"].as_array().is_some_and(|e| !e.is_empty()));
    }

    #[tokio::test]
    async fn graphql_get_serves_graphiql_or_executes() {
        let (app, _store) = app_with_alice().await;

        let (status, body) = send(
            &app,
            Request::builder().uri("/graphql").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let html = String::from_utf8(body).unwrap();
        assert!(html.to_lowercase().contains("graphiql"));

        let (status, body) = send(
            &app,
            Request::builder()
                .uri("/graphql?query=%7BgetUsers%7Bid%7D%7D")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["data"]["getUsers"], json!([{ "id": "u1" }]));
    }

    #[tokio::test]
    async fn graphiql_can_be_disabled() {
        let store = Arc::new(MemoryStore::new());
        let config = ServerConfig {
            graphiql: false,
            ..ServerConfig::default()
        };
        let app = build_router(store, &config);

        let (status, _) = send(
            &app,
            Request::builder().uri("/graphql").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn health_reflects_store() {
        let (app, store) = app_with_alice().await;

        let health = || Request::builder().uri("/health").body(Body::empty()).unwrap();
        let (status, _) = send(&app, health()).await;
        assert_eq!(status, StatusCode::OK);

        store.close().await;
        let (status, body) = send(&app, health()).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"], "unavailable");
    }

    #[tokio::test]
    async fn unknown_routes_are_json_404() {
        let (app, _store) = app_with_alice().await;

        let (status, body) = send(
            &app,
            Request::builder().uri("/nowhere").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"], "not_found");
    }
}
