use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use hbnb_core::EntityKind;

use super::{JsonResponse, create_top_level, list_all, remove, show, update};
use crate::AppState;

pub async fn list_users(State(state): State<Arc<AppState>>) -> JsonResponse {
    list_all(&state, EntityKind::User).await
}

pub async fn get_user(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> JsonResponse {
    show(&state, EntityKind::User, id).await
}

/// `email` and `password` are required; `email` cannot be changed afterwards.
pub async fn create_user(State(state): State<Arc<AppState>>, body: Bytes) -> JsonResponse {
    create_top_level(&state, EntityKind::User, &["email", "password"], body).await
}

pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Bytes,
) -> JsonResponse {
    update(&state, EntityKind::User, id, body).await
}

pub async fn delete_user(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> JsonResponse {
    remove(&state, EntityKind::User, id).await
}
