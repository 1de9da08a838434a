//! Request-boundary error type for the gateway
//!
//! Every failure resolves at the handler that raised it and renders the
//! uniform `{"msg", "error"?}` envelope. Nothing is retried and nothing is
//! fatal to the process.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::repositories::UserStoreError;

/// Errors a request handler can surface to the client
#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing or empty required input
    #[error("{0}")]
    Validation(String),

    /// Bad credentials or a bad/missing token
    #[error("{0}")]
    Authentication(String),

    /// Uniqueness violation in the credential store
    #[error("{0}")]
    Conflict(String),

    /// The upstream catalog has nothing for the request
    #[error("{0}")]
    NotFound(String),

    /// Talking to the upstream catalog failed
    #[error("Error fetching data")]
    Upstream(#[from] CatalogError),

    /// Credential store or signing failure; details stay in the logs
    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    /// The single credential failure shape, shared by the unknown-user and
    /// wrong-password paths so neither leaks which one occurred.
    pub fn invalid_credentials() -> Self {
        ApiError::Authentication("Invalid credentials".to_string())
    }

    pub fn unauthorized() -> Self {
        ApiError::Authentication("Unauthorized".to_string())
    }
}

impl From<UserStoreError> for ApiError {
    fn from(err: UserStoreError) -> Self {
        match err {
            UserStoreError::Duplicate => {
                ApiError::Conflict("Username or email already exists".to_string())
            }
            other => {
                tracing::error!("Credential store failure: {}", other);
                ApiError::Internal
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, json!({"msg": msg})),
            ApiError::Authentication(msg) => (StatusCode::UNAUTHORIZED, json!({"msg": msg})),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, json!({"msg": msg})),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({"msg": msg})),
            ApiError::Upstream(cause) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({"msg": "Error fetching data", "error": cause.to_string()}),
            ),
            ApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({"msg": "Internal server error"}),
            ),
        };

        (status, Json(body)).into_response()
    }
}
