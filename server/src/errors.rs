//! HTTP error type for the API handlers.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized(String),
    NotFound(String),
    Conflict(String),
    Unprocessable(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unprocessable(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, axum::Json(json!({ "error": message }))).into_response()
    }
}

impl From<searchcore::Error> for ApiError {
    fn from(err: searchcore::Error) -> Self {
        use searchcore::Error;
        let msg = err.to_string();
        match err {
            Error::UnsupportedQueryShape { .. } | Error::Syntax(_) | Error::InvalidDocumentId(_) => {
                ApiError::BadRequest(msg)
            }
            Error::DocumentNotFound(_) => ApiError::NotFound(msg),
            Error::DocumentExists(_) => ApiError::Conflict(msg),
            Error::UnreadableDocument(_) => ApiError::Unprocessable(msg),
            Error::Io(_) => {
                tracing::error!(error = %msg, "storage failure");
                ApiError::Internal(msg)
            }
        }
    }
}
