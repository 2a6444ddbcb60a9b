use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use hbnb_core::EntityKind;

use super::{JsonResponse, create_top_level, list_all, remove, show, update};
use crate::AppState;

pub async fn list_states(State(state): State<Arc<AppState>>) -> JsonResponse {
    list_all(&state, EntityKind::State).await
}

pub async fn get_state(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> JsonResponse {
    show(&state, EntityKind::State, id).await
}

pub async fn create_state(State(state): State<Arc<AppState>>, body: Bytes) -> JsonResponse {
    create_top_level(&state, EntityKind::State, &["name"], body).await
}

pub async fn update_state(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Bytes,
) -> JsonResponse {
    update(&state, EntityKind::State, id, body).await
}

pub async fn delete_state(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> JsonResponse {
    remove(&state, EntityKind::State, id).await
}
