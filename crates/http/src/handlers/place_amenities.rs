//! Place ↔ Amenity links. Backed by the place's `amenity_ids` under the file
//! backend and by the `place_amenity` table under the relational one; the
//! handlers only see the storage contract.

use std::sync::Arc;

use axum::extract::{Path, State};
use hbnb_core::EntityKind;
use hbnb_storage::Storage;
use serde_json::{Map, Value};

use super::{JsonResponse, created, dict, dict_list, find, ok, save};
use crate::AppState;
use crate::api_error::ApiError;
use crate::blocking::with_storage;

pub async fn list_place_amenities(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> JsonResponse {
    with_storage(&state, move |storage| {
        let place = find(storage, EntityKind::Place, &id)?;
        dict_list(storage.place_amenities(place.id())?)
    })
    .await
}

/// 201 with the amenity when a link is created, 200 if it already existed.
pub async fn link_place_amenity(
    State(state): State<Arc<AppState>>,
    Path((id, amenity_id)): Path<(String, String)>,
) -> JsonResponse {
    with_storage(&state, move |storage| {
        let place = find(storage, EntityKind::Place, &id)?;
        let amenity = find(storage, EntityKind::Amenity, &amenity_id)?;
        if !storage.link_amenity(place.id(), amenity.id())? {
            return dict(&amenity);
        }
        save(storage)?;
        created(&amenity)
    })
    .await
}

/// 404 unless the amenity is currently linked to the place.
pub async fn unlink_place_amenity(
    State(state): State<Arc<AppState>>,
    Path((id, amenity_id)): Path<(String, String)>,
) -> JsonResponse {
    with_storage(&state, move |storage| {
        let place = find(storage, EntityKind::Place, &id)?;
        let amenity = find(storage, EntityKind::Amenity, &amenity_id)?;
        if !storage.unlink_amenity(place.id(), amenity.id())? {
            return Err(ApiError::NotFound);
        }
        save(storage)?;
        ok(Value::Object(Map::new()))
    })
    .await
}
