//! `POST /places_search`: places filtered by states, cities and amenities.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use hbnb_core::{Entity, EntityKind};
use hbnb_storage::{Storage, StorageBackend};
use serde_json::{Map, Value};

use super::{JsonResponse, dict_list, parse_object};
use crate::AppState;
use crate::api_error::ApiError;
use crate::blocking::with_storage;

/// Ids listed under `key`, or an empty list when absent.
fn id_list(map: &Map<String, Value>, key: &str) -> Result<Vec<String>, ApiError> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| item.as_str().map(ToOwned::to_owned))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| ApiError::BadRequest(format!("{key} must be a list of ids"))),
        Some(_) => Err(ApiError::BadRequest(format!("{key} must be a list of ids"))),
    }
}

/// Places of every listed state and city, or of all cities when both lists
/// are empty, keeping only places that offer every listed amenity.
fn search_places(
    storage: &StorageBackend,
    states: &[String],
    cities: &[String],
    amenities: &[String],
) -> Result<Vec<Entity>, ApiError> {
    let mut places: BTreeMap<String, Entity> = BTreeMap::new();
    if states.is_empty() && cities.is_empty() {
        places = storage.all(Some(EntityKind::Place))?;
    } else {
        let mut city_ids: Vec<String> = cities.to_vec();
        for state_id in states {
            if let Some(state) = storage.get(EntityKind::State, state_id)? {
                for city in storage.children(&state, EntityKind::City)? {
                    city_ids.push(city.id().to_owned());
                }
            }
        }
        for city_id in &city_ids {
            if let Some(city) = storage.get(EntityKind::City, city_id)? {
                for place in storage.children(&city, EntityKind::Place)? {
                    places.insert(place.key(), place);
                }
            }
        }
    }

    if amenities.is_empty() {
        return Ok(places.into_values().collect());
    }
    let mut matching = Vec::new();
    for place in places.into_values() {
        let offered = storage.place_amenities(place.id())?;
        if amenities.iter().all(|wanted| offered.iter().any(|a| a.id() == wanted)) {
            matching.push(place);
        }
    }
    Ok(matching)
}

pub async fn places_search(State(state): State<Arc<AppState>>, body: Bytes) -> JsonResponse {
    let map = parse_object(&body)?;
    let states = id_list(&map, "states")?;
    let cities = id_list(&map, "cities")?;
    let amenities = id_list(&map, "amenities")?;
    with_storage(&state, move |storage| {
        dict_list(search_places(storage, &states, &cities, &amenities)?)
    })
    .await
}
