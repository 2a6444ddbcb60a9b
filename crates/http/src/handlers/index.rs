use std::sync::Arc;

use axum::extract::State;
use hbnb_storage::Storage;
use serde_json::{Value, json};

use super::{JsonResponse, ok};
use crate::AppState;
use crate::api_error::ApiError;
use crate::blocking::with_storage;

pub async fn status() -> JsonResponse {
    ok(json!({"status": "OK"}))
}

/// Number of live entities per resource.
pub async fn stats(State(state): State<Arc<AppState>>) -> JsonResponse {
    with_storage(&state, |storage| {
        let counts = storage.stats()?;
        ok(Value::Object(
            counts.into_iter().map(|(resource, n)| (resource.to_owned(), n.into())).collect(),
        ))
    })
    .await
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound
}
