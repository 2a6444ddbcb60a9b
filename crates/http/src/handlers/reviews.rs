use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use hbnb_core::EntityKind;
use serde_json::Value;

use super::{
    JsonResponse, build, commit, created, find, list_children, parse_object, remove, require, show,
    update,
};
use crate::AppState;
use crate::api_error::ApiError;
use crate::blocking::with_storage;

/// Reviews of the place `id`.
pub async fn list_reviews(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> JsonResponse {
    list_children(&state, EntityKind::Place, id, EntityKind::Review).await
}

pub async fn get_review(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> JsonResponse {
    show(&state, EntityKind::Review, id).await
}

/// Create a review of the place `id`. The author `user_id` must exist.
pub async fn create_review(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Bytes,
) -> JsonResponse {
    with_storage(&state, move |storage| {
        let place = find(storage, EntityKind::Place, &id)?;
        let mut map = parse_object(&body)?;
        require(&map, "user_id")?;
        let user_id = map.get("user_id").and_then(Value::as_str).ok_or(ApiError::NotFound)?;
        find(storage, EntityKind::User, user_id)?;
        require(&map, "text")?;
        map.insert("place_id".to_owned(), Value::String(place.id().to_owned()));
        let mut review = build(storage, EntityKind::Review, map)?;
        commit(storage, &mut review)?;
        created(&review)
    })
    .await
}

pub async fn update_review(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Bytes,
) -> JsonResponse {
    update(&state, EntityKind::Review, id, body).await
}

pub async fn delete_review(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> JsonResponse {
    remove(&state, EntityKind::Review, id).await
}
