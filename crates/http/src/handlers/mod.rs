//! Route handlers, one module per resource, plus the CRUD steps they share.

pub(crate) mod amenities;
pub(crate) mod cities;
pub(crate) mod index;
pub(crate) mod place_amenities;
pub(crate) mod places;
pub(crate) mod reviews;
pub(crate) mod search;
pub(crate) mod states;
pub(crate) mod users;

use axum::Json;
use axum::body::Bytes;
use axum::http::StatusCode;
use hbnb_core::{Entity, EntityKind};
use hbnb_storage::{Storage, StorageBackend};
use serde_json::{Map, Value};

use crate::AppState;
use crate::api_error::ApiError;
use crate::blocking::with_storage;

pub(crate) type JsonResponse = Result<(StatusCode, Json<Value>), ApiError>;

/// Keys the server assigns; ignored in create and update bodies.
const IDENTITY_KEYS: [&str; 3] = ["id", "created_at", "updated_at"];

/// Parse a request body that must be a JSON object.
pub(crate) fn parse_object(body: &Bytes) -> Result<Map<String, Value>, ApiError> {
    match serde_json::from_slice(body) {
        Ok(Value::Object(map)) => Ok(map),
        _ => Err(ApiError::not_a_json()),
    }
}

pub(crate) fn require(map: &Map<String, Value>, field: &str) -> Result<(), ApiError> {
    if map.contains_key(field) { Ok(()) } else { Err(ApiError::missing(field)) }
}

pub(crate) fn find(storage: &StorageBackend, kind: EntityKind, id: &str) -> Result<Entity, ApiError> {
    storage.get(kind, id)?.ok_or(ApiError::NotFound)
}

pub(crate) fn ok(value: Value) -> JsonResponse {
    Ok((StatusCode::OK, Json(value)))
}

pub(crate) fn created(entity: &Entity) -> JsonResponse {
    Ok((StatusCode::CREATED, Json(Value::Object(entity.to_dict()))))
}

pub(crate) fn dict(entity: &Entity) -> JsonResponse {
    ok(Value::Object(entity.to_dict()))
}

pub(crate) fn dict_list(entities: impl IntoIterator<Item = Entity>) -> JsonResponse {
    ok(Value::Array(entities.into_iter().map(|e| Value::Object(e.to_dict())).collect()))
}

/// Register and save `entity`, discarding the unsaved session if the save fails.
pub(crate) fn commit(storage: &mut StorageBackend, entity: &mut Entity) -> Result<(), ApiError> {
    if let Err(e) = storage.persist(entity) {
        storage.close()?;
        return Err(e.into());
    }
    Ok(())
}

/// Save pending removals or link changes, discarding them if the save fails.
pub(crate) fn save(storage: &mut StorageBackend) -> Result<(), ApiError> {
    if let Err(e) = storage.save() {
        storage.close()?;
        return Err(e.into());
    }
    Ok(())
}

/// Build an entity of `kind` from a create body, ignoring identity keys.
pub(crate) fn build(
    storage: &StorageBackend,
    kind: EntityKind,
    mut map: Map<String, Value>,
) -> Result<Entity, ApiError> {
    for key in IDENTITY_KEYS {
        map.remove(key);
    }
    Ok(Entity::from_map(kind, &map, storage.kind())?)
}

pub(crate) async fn list_all(state: &AppState, kind: EntityKind) -> JsonResponse {
    with_storage(state, move |storage| dict_list(storage.all(Some(kind))?.into_values())).await
}

pub(crate) async fn show(state: &AppState, kind: EntityKind, id: String) -> JsonResponse {
    with_storage(state, move |storage| dict(&find(storage, kind, &id)?)).await
}

pub(crate) async fn create_top_level(
    state: &AppState,
    kind: EntityKind,
    required: &'static [&'static str],
    body: Bytes,
) -> JsonResponse {
    let map = parse_object(&body)?;
    for field in required {
        require(&map, field)?;
    }
    with_storage(state, move |storage| {
        let mut entity = build(storage, kind, map)?;
        commit(storage, &mut entity)?;
        created(&entity)
    })
    .await
}

/// Update every mutable attribute of `kind`/`id` from the body.
pub(crate) async fn update(state: &AppState, kind: EntityKind, id: String, body: Bytes) -> JsonResponse {
    with_storage(state, move |storage| {
        let mut entity = find(storage, kind, &id)?;
        let map = parse_object(&body)?;
        entity.apply_update(&map, storage.kind())?;
        commit(storage, &mut entity)?;
        dict(&entity)
    })
    .await
}

pub(crate) async fn remove(state: &AppState, kind: EntityKind, id: String) -> JsonResponse {
    with_storage(state, move |storage| {
        let entity = find(storage, kind, &id)?;
        storage.delete(Some(&entity))?;
        save(storage)?;
        ok(Value::Object(Map::new()))
    })
    .await
}

/// Children of `kind` under the `parent_kind`/`parent_id` resource.
pub(crate) async fn list_children(
    state: &AppState,
    parent_kind: EntityKind,
    parent_id: String,
    kind: EntityKind,
) -> JsonResponse {
    with_storage(state, move |storage| {
        let parent = find(storage, parent_kind, &parent_id)?;
        dict_list(storage.children(&parent, kind)?)
    })
    .await
}
