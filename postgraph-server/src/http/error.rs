//! API error types with IntoResponse
//!
//! Errors are converted to JSON responses with appropriate status codes:
//! `{"success": false, "error": <code>, "message": <text>}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::{ConstraintKind, DbError};
use crate::models::ValidationError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Field validation failed (400)
    Validation(ValidationError),

    /// Body is not JSON or does not match the request shape (400)
    MalformedBody { message: String },

    /// Resource or route not found (404)
    NotFound { message: String },

    /// Write names a record that does not exist (422)
    UnknownReference { message: String },

    /// Write collides with an existing record (409)
    Conflict { message: String },

    /// Write rejected by a NOT NULL / CHECK constraint (400)
    ConstraintViolation { message: String },

    /// Database unreachable (503, logged)
    Unavailable { reason: String },

    /// Internal error (500, logged)
    Internal { message: String },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::MalformedBody { .. } | Self::ConstraintViolation { .. } => {
                StatusCode::BAD_REQUEST
            }
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::UnknownReference { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::MalformedBody { .. } => "malformed_body",
            Self::NotFound { .. } => "not_found",
            Self::UnknownReference { .. } => "unknown_reference",
            Self::Conflict { .. } => "conflict",
            Self::ConstraintViolation { .. } => "constraint_violation",
            Self::Unavailable { .. } => "unavailable",
            Self::Internal { .. } => "internal_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        let message = match self {
            Self::Validation(e) => e.to_string(),
            Self::MalformedBody { message }
            | Self::NotFound { message }
            | Self::UnknownReference { message }
            | Self::Conflict { message }
            | Self::ConstraintViolation { message } => message,
            Self::Unavailable { reason } => {
                // Log the actual cause, return generic message
                tracing::error!("Database unavailable: {}", reason);
                "service temporarily unavailable".to_owned()
            }
            Self::Internal { message } => {
                tracing::error!("Internal error: {}", message);
                "an internal error occurred".to_owned()
            }
        };

        let body = Json(json!({
            "success": false,
            "error": code,
            "message": message
        }));

        (status, body).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound(message) => Self::NotFound { message },
            DbError::Constraint { kind, message, .. } => match kind {
                ConstraintKind::ForeignKey => Self::UnknownReference { message },
                ConstraintKind::Unique => Self::Conflict { message },
                ConstraintKind::NotNull | ConstraintKind::Check => {
                    Self::ConstraintViolation { message }
                }
            },
            DbError::Unavailable(reason) => Self::Unavailable { reason },
            DbError::Sqlx(e) => Self::Internal {
                message: format!("Database error: {}", e),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn validation_error_is_400() {
        let err = ApiError::Validation(ValidationError::Empty { field: "userId" });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "validation_error");
        assert_eq!(body["message"], "userId cannot be empty");
    }

    #[tokio::test]
    async fn foreign_key_is_422() {
        let err = ApiError::from(DbError::unknown_user("ghost"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body_json(response).await["error"], "unknown_reference");
    }

    #[test]
    fn constraint_kinds_map_to_distinct_statuses() {
        let constraint = |kind| DbError::Constraint {
            kind,
            constraint: None,
            message: "boom".into(),
        };

        assert_eq!(
            ApiError::from(constraint(ConstraintKind::Unique)).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::from(constraint(ConstraintKind::NotNull)).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(DbError::NotFound("row".into())).status(),
            StatusCode::NOT_FOUND
        );
    }

    #[tokio::test]
    async fn unavailable_hides_reason() {
        let err = ApiError::from(DbError::Unavailable("connection refused".into()));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let body = body_json(response).await;
        assert_eq!(body["error"], "unavailable");
        assert_eq!(body["message"], "service temporarily unavailable");
    }

    #[tokio::test]
    async fn internal_is_500_with_generic_message() {
        let err = ApiError::from(DbError::Sqlx(sqlx::Error::Protocol("bad".into())));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["message"], "an internal error occurred");
    }
}
