//! Typed API error for HTTP handlers.
//!
//! Converts engine and model errors into JSON responses: `{"error": "message"}`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use hbnb_core::ModelError;
use hbnb_storage::StorageError;

/// API error with HTTP status code and human-readable message.
///
/// `Internal` logs the real error server-side and returns a static message
/// to the client.
#[derive(Debug)]
pub enum ApiError {
    /// 400 Bad Request: body is not a JSON object, or a field is missing or mistyped.
    BadRequest(String),
    /// 404 Not Found: no live entity with the requested id.
    NotFound,
    /// 500 Internal Server Error: persistence failure or misuse of the engine.
    Internal(anyhow::Error),
}

impl ApiError {
    pub fn not_a_json() -> Self {
        Self::BadRequest("Not a JSON".to_owned())
    }

    pub fn missing(field: &str) -> Self {
        Self::BadRequest(format!("Missing {field}"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::NotFound => (StatusCode::NOT_FOUND, "Not found".to_owned()),
            Self::Internal(err) => {
                tracing::error!(error = ?err, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_owned())
            },
        };
        let body = serde_json::json!({"error": message});
        (status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err)
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Model(e) => e.into(),
            other => Self::Internal(other.into()),
        }
    }
}

impl From<ModelError> for ApiError {
    fn from(err: ModelError) -> Self {
        Self::BadRequest(err.to_string())
    }
}
