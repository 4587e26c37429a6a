//! API error types with IntoResponse
//!
//! Errors are converted to JSON responses with appropriate status codes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::repos::DbError;
use crate::models::ValidationError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed (400)
    Validation(ValidationError),

    /// Request body could not be read as JSON (400)
    Malformed { message: String },

    /// Resource not found (404)
    NotFound { resource: &'static str, id: String },

    /// Unique constraint hit (409)
    Conflict { message: &'static str },

    /// Database error (500, logged)
    Database(DbError),
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::Malformed { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable code, the `error` field of the body.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::Malformed { .. } => "invalid_request",
            Self::NotFound { .. } => "not_found",
            Self::Conflict { .. } => "conflict",
            Self::Database(_) => "internal_error",
        }
    }

    fn message(&self) -> String {
        match self {
            Self::Validation(e) => e.to_string(),
            Self::Malformed { message } => message.clone(),
            Self::NotFound { resource, id } => format!("{resource} '{id}' not found"),
            Self::Conflict { message } => (*message).to_owned(),
            Self::Database(_) => "an internal error occurred".to_owned(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Database(e) = &self {
            tracing::error!(error = %e, "request failed on the store");
        }

        let body = json!({ "error": self.code(), "message": self.message() });
        (self.status(), Json(body)).into_response()
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
            DbError::NotFound { resource, id } => Self::NotFound { resource, id },
            DbError::Conflict { constraint } => Self::Conflict {
                message: conflict_message(&constraint),
            },
            _ => Self::Database(e),
        }
    }
}

/// User-facing message for a violated unique constraint.
fn conflict_message(constraint: &str) -> &'static str {
    match constraint {
        "blog_slug_key" => "a blog with this slug already exists",
        "tag_name_key" => "a tag with this name already exists",
        "tag_slug_key" => "a tag with this slug already exists",
        _ => "resource already exists",
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
        let err = ApiError::Validation(ValidationError::Empty { field: "title" });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"], "validation_error");
        assert_eq!(body["message"], "title is required");
    }

    #[tokio::test]
    async fn not_found_is_404() {
        let err = ApiError::from(DbError::not_found("blog", "intro"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["message"], "blog 'intro' not found");
    }

    #[tokio::test]
    async fn conflict_is_409_with_friendly_message() {
        let err = ApiError::from(DbError::Conflict {
            constraint: "blog_slug_key".into(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let body = body_json(response).await;
        assert_eq!(body["message"], "a blog with this slug already exists");
    }

    #[tokio::test]
    async fn store_error_is_500_and_generic() {
        let err = ApiError::from(DbError::from(sqlx::Error::PoolTimedOut));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["message"], "an internal error occurred");
    }

    #[test]
    fn malformed_and_validation_share_400() {
        let malformed = ApiError::Malformed {
            message: "expected value".into(),
        };
        assert_eq!(malformed.status(), StatusCode::BAD_REQUEST);
        assert_eq!(malformed.code(), "invalid_request");
        assert_eq!(
            ApiError::from(ValidationError::Empty { field: "slug" }).code(),
            "validation_error"
        );
    }

    #[test]
    fn conflict_messages() {
        assert_eq!(conflict_message("tag_name_key"), "a tag with this name already exists");
        assert_eq!(conflict_message("tag_slug_key"), "a tag with this slug already exists");
        assert_eq!(conflict_message("something_else"), "resource already exists");
    }
}
