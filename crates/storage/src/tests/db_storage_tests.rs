use hbnb_core::{EntityKind, StorageKind};
use serde_json::json;
use tempfile::TempDir;

use super::{build, create, create_db_storage, seed_place};
use crate::{DbStorage, HbnbEnv, Storage};

#[test]
fn test_use_before_reload_is_invalid_usage() {
    let dir = TempDir::new().unwrap();
    let mut storage = DbStorage::new(&dir.path().join("test.db"), HbnbEnv::Test).unwrap();

    assert!(storage.all(None).unwrap_err().is_invalid_usage());
    assert!(storage.get(EntityKind::State, "1").unwrap_err().is_invalid_usage());
    assert!(storage.count(None).unwrap_err().is_invalid_usage());
    let state = build(&storage, EntityKind::State, json!({"name": "Early"}));
    assert!(storage.new(state).unwrap_err().is_invalid_usage());
    assert!(storage.save().unwrap_err().is_invalid_usage());
}

#[test]
fn test_close_without_reload_is_safe() {
    let dir = TempDir::new().unwrap();
    let mut storage = DbStorage::new(&dir.path().join("test.db"), HbnbEnv::Test).unwrap();
    storage.close().unwrap();
    storage.close().unwrap();
}

#[test]
fn test_constraint_violation_rolls_back_and_keeps_pending() {
    let (mut storage, _dir) = create_db_storage();
    let state = build(&storage, EntityKind::State, json!({"name": "Florida"}));
    let orphan = build(&storage, EntityKind::City, json!({"name": "Nowhere"}));
    storage.new(state.clone()).unwrap();
    storage.new(orphan.clone()).unwrap();

    let err = storage.save().unwrap_err();
    assert!(err.is_constraint_violation(), "unexpected error: {err}");

    assert_eq!(storage.get(EntityKind::State, state.id()).unwrap(), Some(state.clone()));
    assert!(storage.get(EntityKind::City, orphan.id()).unwrap().is_some());

    storage.close().unwrap();
    assert!(storage.get(EntityKind::State, state.id()).unwrap().is_none());
    assert_eq!(storage.count(None).unwrap(), 0);
}

#[test]
fn test_update_through_new_keeps_children() {
    let (mut storage, _dir) = create_db_storage();
    let (mut state, city, _, _) = seed_place(&mut storage);

    let changes = json!({"name": "Golden State"});
    state.apply_update(changes.as_object().unwrap(), storage.kind()).unwrap();
    storage.persist(&mut state).unwrap();

    assert!(storage.get(EntityKind::City, city.id()).unwrap().is_some());
    assert_eq!(storage.count(None).unwrap(), 4);
}

#[test]
fn test_delete_cascades_to_children() {
    let (mut storage, _dir) = create_db_storage();
    let (state, _, user, place) = seed_place(&mut storage);
    let wifi = create(&mut storage, EntityKind::Amenity, json!({"name": "Wifi"}));
    create(
        &mut storage,
        EntityKind::Review,
        json!({"text": "Nice", "place_id": place.id(), "user_id": user.id()}),
    );
    storage.link_amenity(place.id(), wifi.id()).unwrap();
    storage.save().unwrap();

    storage.delete(Some(&state)).unwrap();
    storage.save().unwrap();

    assert_eq!(storage.count(Some(EntityKind::City)).unwrap(), 0);
    assert_eq!(storage.count(Some(EntityKind::Place)).unwrap(), 0);
    assert_eq!(storage.count(Some(EntityKind::Review)).unwrap(), 0);
    assert_eq!(storage.count(Some(EntityKind::User)).unwrap(), 1);
    assert_eq!(storage.count(Some(EntityKind::Amenity)).unwrap(), 1);
}

#[test]
fn test_unset_attributes_stay_null() {
    let (mut storage, _dir) = create_db_storage();
    let (_, _, _, place) = seed_place(&mut storage);

    let dict = place.to_dict();
    assert!(!dict.contains_key("description"));
    assert!(!dict.contains_key("number_rooms"));
    assert!(!dict.contains_key("amenity_ids"));
    assert!(place.as_place().unwrap().amenity_ids.is_none());
}

#[test]
fn test_link_requires_existing_amenity() {
    let (mut storage, _dir) = create_db_storage();
    let (_, _, _, place) = seed_place(&mut storage);
    assert!(!storage.link_amenity(place.id(), "ghost").unwrap());
    storage.save().unwrap();
    assert!(storage.place_amenities(place.id()).unwrap().is_empty());
}

#[test]
fn test_pending_links_are_visible_before_save() {
    let (mut storage, _dir) = create_db_storage();
    let (_, _, _, place) = seed_place(&mut storage);
    let wifi = create(&mut storage, EntityKind::Amenity, json!({"name": "Wifi"}));

    storage.link_amenity(place.id(), wifi.id()).unwrap();
    assert_eq!(storage.place_amenities(place.id()).unwrap().len(), 1);
    storage.close().unwrap();
    assert!(storage.place_amenities(place.id()).unwrap().is_empty());
}

#[test]
fn test_only_test_env_resets_schema() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("hbnb.db");

    let mut storage = DbStorage::new(&path, HbnbEnv::Dev).unwrap();
    storage.reload().unwrap();
    create(&mut storage, EntityKind::State, json!({"name": "Durable"}));
    drop(storage);

    let mut reopened = DbStorage::new(&path, HbnbEnv::Production).unwrap();
    reopened.reload().unwrap();
    assert_eq!(reopened.count(Some(EntityKind::State)).unwrap(), 1);
    drop(reopened);

    let mut reset = DbStorage::new(&path, HbnbEnv::Test).unwrap();
    reset.reload().unwrap();
    assert_eq!(reset.count(None).unwrap(), 0);
    assert_eq!(reset.kind(), StorageKind::Db);
}

#[test]
fn test_delete_linked_amenity_in_same_session() {
    let (mut storage, _dir) = create_db_storage();
    let (_, _, _, place) = seed_place(&mut storage);
    let wifi = create(&mut storage, EntityKind::Amenity, json!({"name": "Wifi"}));

    assert!(storage.link_amenity(place.id(), wifi.id()).unwrap());
    storage.delete(Some(&wifi)).unwrap();
    storage.save().unwrap();

    assert!(storage.get(EntityKind::Amenity, wifi.id()).unwrap().is_none());
    assert!(storage.get(EntityKind::Place, place.id()).unwrap().is_some());
    assert!(storage.place_amenities(place.id()).unwrap().is_empty());
    storage.save().unwrap();
}

#[test]
fn test_delete_parent_after_updating_child_in_same_session() {
    let (mut storage, _dir) = create_db_storage();
    let (state, mut city, user, place) = seed_place(&mut storage);

    let changes = json!({"name": "Oakland"});
    city.apply_update(changes.as_object().unwrap(), storage.kind()).unwrap();
    storage.new(city.clone()).unwrap();
    storage.delete(Some(&state)).unwrap();
    storage.save().unwrap();

    assert!(storage.get(EntityKind::State, state.id()).unwrap().is_none());
    assert!(storage.get(EntityKind::City, city.id()).unwrap().is_none());
    assert!(storage.get(EntityKind::Place, place.id()).unwrap().is_none());
    assert!(storage.get(EntityKind::User, user.id()).unwrap().is_some());
    assert_eq!(storage.count(None).unwrap(), 1);
}
