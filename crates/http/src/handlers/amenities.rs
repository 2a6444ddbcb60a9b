use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use hbnb_core::EntityKind;

use super::{JsonResponse, create_top_level, list_all, remove, show, update};
use crate::AppState;

pub async fn list_amenities(State(state): State<Arc<AppState>>) -> JsonResponse {
    list_all(&state, EntityKind::Amenity).await
}

pub async fn get_amenity(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> JsonResponse {
    show(&state, EntityKind::Amenity, id).await
}

pub async fn create_amenity(State(state): State<Arc<AppState>>, body: Bytes) -> JsonResponse {
    create_top_level(&state, EntityKind::Amenity, &["name"], body).await
}

pub async fn update_amenity(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Bytes,
) -> JsonResponse {
    update(&state, EntityKind::Amenity, id, body).await
}

pub async fn delete_amenity(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> JsonResponse {
    remove(&state, EntityKind::Amenity, id).await
}
