//! GraphQL endpoint
//!
//! - `POST /graphql` executes a JSON GraphQL request
//! - `GET /graphql?query=...` executes a query-string request
//! - `GET /graphql` with no query string serves GraphiQL (when enabled)

use std::sync::Arc;

use async_graphql::http::{parse_query_string, GraphiQLSource};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::{RawQuery, State},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};

use crate::http::error::ApiError;
use crate::http::server::AppState;

/// Path the schema is mounted at
pub const GRAPHQL_PATH: &str = "/graphql";

/// POST /graphql
async fn graphql_post(State(state): State<Arc<AppState>>, req: GraphQLRequest) -> GraphQLResponse {
    state.schema.execute(req.into_inner()).await.into()
}

/// GET /graphql
async fn graphql_get(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> Result<Response, ApiError> {
    match query.filter(|q| !q.is_empty()) {
        Some(query) => {
            let request = parse_query_string(&query).map_err(|e| ApiError::MalformedBody {
                message: e.to_string(),
            })?;
            let response: GraphQLResponse = state.schema.execute(request).await.into();
            Ok(response.into_response())
        }
        None if state.graphiql => {
            Ok(Html(GraphiQLSource::build().endpoint(GRAPHQL_PATH).finish()).into_response())
        }
        None => Err(ApiError::NotFound {
            message: "GraphiQL is disabled".to_owned(),
        }),
    }
}

/// GraphQL routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(GRAPHQL_PATH, get(graphql_get).post(graphql_post))
}
