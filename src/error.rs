//! API error taxonomy and HTTP mapping
//!
//! Every resolver-level failure surfaces through [`ApiError`] with its status
//! code and optional structured detail. Store failures are logged and mapped
//! to a generic 500 body; their messages never reach the client.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// A single failed validation rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    #[schema(example = "password is too short")]
    pub message: String,
}

impl FieldError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Failure from a backing store (database or image storage)
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Resolver-level failures
#[derive(Debug, Error)]
pub enum ApiError {
    /// 422 - input failed validation; carries the full list of field errors
    #[error("invalid input")]
    InvalidInput(Vec<FieldError>),

    /// 401 - no credential, or credential failed verification
    #[error("not authenticated")]
    AuthenticationRequired,

    /// 401 - credential valid but acting identity check failed
    #[error("{0}")]
    Unauthorized(&'static str),

    /// 403 - acting user is not the creator of the target post
    #[error("not authorized to act on this post")]
    NotOwner,

    /// 404
    #[error("{0}")]
    NotFound(&'static str),

    /// 422 - e-mail already registered
    #[error("{0}")]
    AlreadyExists(&'static str),

    /// 500 - internal failure outside the store (hashing, signing)
    #[error("{0}")]
    Internal(String),

    /// 500 - store failure, detail logged only
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) | ApiError::AlreadyExists(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::AuthenticationRequired | ApiError::Unauthorized(_) => {
                StatusCode::UNAUTHORIZED
            }
            ApiError::NotOwner => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) | ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let (message, data) = match &self {
            ApiError::InvalidInput(errors) => (self.to_string(), Some(errors.clone())),
            ApiError::Store(e) => {
                tracing::error!(error = %e, "store failure");
                ("internal server error".to_string(), None)
            }
            ApiError::Internal(detail) => {
                tracing::error!(error = %detail, "internal failure");
                ("internal server error".to_string(), None)
            }
            _ => (self.to_string(), None),
        };

        let body = serde_json::json!({
            "message": message,
            "data": data,
        });
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::InvalidInput(vec![]).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::AuthenticationRequired.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::Unauthorized("wrong password").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ApiError::NotOwner.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            ApiError::NotFound("no post found").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::AlreadyExists("user already exists").status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_detail_not_in_response() {
        // Store/internal failures must map to a generic message
        let resp = ApiError::Internal("secret detail".into()).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
