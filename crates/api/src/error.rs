//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use domain::{DomainError, RegistryError};
use event_store::EventStoreError;

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Resource not found.
    NotFound(String),
    /// Bad request from the client.
    BadRequest(String),
    /// Registry or domain logic error.
    Registry(RegistryError),
    /// Internal server error.
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Registry(err) => registry_error_to_response(err),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

fn registry_error_to_response(err: RegistryError) -> (StatusCode, String) {
    match &err {
        RegistryError::InvalidRecord(_)
        | RegistryError::InvalidSecondLevelDomain(_)
        | RegistryError::InvalidTopLevelDomain(_) => (StatusCode::BAD_REQUEST, err.to_string()),
        RegistryError::Domain(domain_err) => match domain_err {
            DomainError::AlreadyRegistered
            | DomainError::ServiceAlreadyExists { .. }
            | DomainError::GoogleSuiteServiceAlreadyExists => {
                (StatusCode::CONFLICT, err.to_string())
            }
            DomainError::NotRegistered => (StatusCode::NOT_FOUND, err.to_string()),
        },
        RegistryError::AggregateNotFound { .. } => (StatusCode::NOT_FOUND, err.to_string()),
        RegistryError::EventStore(EventStoreError::ConcurrencyConflict { .. }) => {
            (StatusCode::CONFLICT, err.to_string())
        }
        _ => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
    }
}

impl From<RegistryError> for ApiError {
    fn from(err: RegistryError) -> Self {
        ApiError::Registry(err)
    }
}
