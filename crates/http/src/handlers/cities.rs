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
use crate::blocking::with_storage;

/// Cities of the state `id`.
pub async fn list_cities(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> JsonResponse {
    list_children(&state, EntityKind::State, id, EntityKind::City).await
}

pub async fn get_city(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> JsonResponse {
    show(&state, EntityKind::City, id).await
}

/// Create a city in the state `id`.
pub async fn create_city(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Bytes,
) -> JsonResponse {
    with_storage(&state, move |storage| {
        let parent = find(storage, EntityKind::State, &id)?;
        let mut map = parse_object(&body)?;
        require(&map, "name")?;
        map.insert("state_id".to_owned(), Value::String(parent.id().to_owned()));
        let mut city = build(storage, EntityKind::City, map)?;
        commit(storage, &mut city)?;
        created(&city)
    })
    .await
}

pub async fn update_city(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Bytes,
) -> JsonResponse {
    update(&state, EntityKind::City, id, body).await
}

pub async fn delete_city(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> JsonResponse {
    remove(&state, EntityKind::City, id).await
}
