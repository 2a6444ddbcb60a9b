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

/// Places in the city `id`.
pub async fn list_places(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> JsonResponse {
    list_children(&state, EntityKind::City, id, EntityKind::Place).await
}

pub async fn get_place(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> JsonResponse {
    show(&state, EntityKind::Place, id).await
}

/// Create a place in the city `id`. The owning `user_id` must exist.
pub async fn create_place(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Bytes,
) -> JsonResponse {
    with_storage(&state, move |storage| {
        let city = find(storage, EntityKind::City, &id)?;
        let mut map = parse_object(&body)?;
        require(&map, "user_id")?;
        let user_id = map.get("user_id").and_then(Value::as_str).ok_or(ApiError::NotFound)?;
        find(storage, EntityKind::User, user_id)?;
        require(&map, "name")?;
        map.insert("city_id".to_owned(), Value::String(city.id().to_owned()));
        let mut place = build(storage, EntityKind::Place, map)?;
        commit(storage, &mut place)?;
        created(&place)
    })
    .await
}

pub async fn update_place(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Bytes,
) -> JsonResponse {
    update(&state, EntityKind::Place, id, body).await
}

pub async fn delete_place(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> JsonResponse {
    remove(&state, EntityKind::Place, id).await
}
