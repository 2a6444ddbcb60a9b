//! Behaviour both backends must share, run against each of them.

use hbnb_core::{EntityKind, StorageKind};
use serde_json::json;

use super::{build, create, for_each_backend, seed_place};
use crate::Storage;

#[test]
fn test_get_saved_state_by_id() {
    for_each_backend(|storage| {
        let state = create(storage, EntityKind::State, json!({"name": "Michigan"}));

        let found = storage.get(EntityKind::State, state.id()).unwrap().unwrap();
        assert_eq!(found.name(), Some("Michigan"));
        assert_eq!(found.id(), state.id());

        let missing = format!("{}x", state.id());
        assert!(storage.get(EntityKind::State, &missing).unwrap().is_none());
    });
}

#[test]
fn test_get_with_wrong_kind_is_not_found() {
    for_each_backend(|storage| {
        let state = create(storage, EntityKind::State, json!({"name": "Ohio"}));
        assert!(storage.get(EntityKind::City, state.id()).unwrap().is_none());
    });
}

#[test]
fn test_count_tracks_new_entities_of_mixed_kinds() {
    for_each_backend(|storage| {
        let total = storage.count(None).unwrap();
        let states = storage.count(Some(EntityKind::State)).unwrap();

        let additions =
            [(EntityKind::State, "Texas"), (EntityKind::Amenity, "Wifi"), (EntityKind::Amenity, "Pool")];
        for (kind, name) in additions {
            let entity = build(&*storage, kind, json!({"name": name}));
            storage.new(entity).unwrap();
        }

        assert_eq!(storage.count(None).unwrap(), total + 3);
        assert_eq!(storage.count(Some(EntityKind::State)).unwrap(), states + 1);
    });
}

#[test]
fn test_new_is_visible_before_save() {
    for_each_backend(|storage| {
        let state = build(&*storage, EntityKind::State, json!({"name": "Utah"}));
        storage.new(state.clone()).unwrap();
        assert!(storage.all(Some(EntityKind::State)).unwrap().contains_key(&state.key()));
        assert_eq!(storage.get(EntityKind::State, state.id()).unwrap(), Some(state));
    });
}

#[test]
fn test_count_matches_all_for_every_kind() {
    for_each_backend(|storage| {
        seed_place(storage);
        let amenity = build(&*storage, EntityKind::Amenity, json!({"name": "Sauna"}));
        storage.new(amenity).unwrap();

        assert_eq!(storage.count(None).unwrap(), storage.all(None).unwrap().len());
        for kind in EntityKind::ALL {
            let all = storage.all(Some(kind)).unwrap();
            assert_eq!(storage.count(Some(kind)).unwrap(), all.len());
            assert!(all.values().all(|entity| entity.kind() == kind));
            assert!(all.iter().all(|(key, entity)| *key == entity.key()));
        }
    });
}

#[test]
fn test_delete_absent_entity_is_noop() {
    for_each_backend(|storage| {
        create(storage, EntityKind::State, json!({"name": "Iowa"}));
        let before = storage.all(None).unwrap();

        storage.delete(None).unwrap();
        let stranger = build(&*storage, EntityKind::State, json!({"name": "Nowhere"}));
        storage.delete(Some(&stranger)).unwrap();
        storage.delete(Some(&stranger)).unwrap();

        assert_eq!(storage.all(None).unwrap(), before);
    });
}

#[test]
fn test_delete_then_save_removes_entity() {
    for_each_backend(|storage| {
        let state = create(storage, EntityKind::State, json!({"name": "Maine"}));
        storage.delete(Some(&state)).unwrap();
        assert!(storage.get(EntityKind::State, state.id()).unwrap().is_none());
        storage.save().unwrap();
        storage.reload().unwrap();
        assert!(storage.get(EntityKind::State, state.id()).unwrap().is_none());
    });
}

#[test]
fn test_save_then_reload_restores_entity() {
    for_each_backend(|storage| {
        let (_, city, _, place) = seed_place(storage);
        storage.reload().unwrap();

        let restored = storage.get(EntityKind::Place, place.id()).unwrap().unwrap();
        assert_eq!(restored, place);
        assert_eq!(restored.foreign_key(EntityKind::City), Some(city.id()));
    });
}

#[test]
fn test_persist_advances_updated_at_only() {
    for_each_backend(|storage| {
        let mut state = create(storage, EntityKind::State, json!({"name": "Idaho"}));
        let created_at = state.base().created_at();
        let updated_at = state.base().updated_at();

        let changes = json!({"name": "Gem State"});
        state.apply_update(changes.as_object().unwrap(), storage.kind()).unwrap();
        storage.persist(&mut state).unwrap();

        assert_eq!(state.base().created_at(), created_at);
        assert!(state.base().updated_at() > updated_at);
        assert_eq!(state.name(), Some("Gem State"));
    });
}

#[test]
fn test_save_touches_only_changed_entities() {
    for_each_backend(|storage| {
        let first = create(storage, EntityKind::Amenity, json!({"name": "Wifi"}));
        let second = create(storage, EntityKind::Amenity, json!({"name": "Oven"}));
        storage.persist(&mut second.clone()).unwrap();

        let stored = storage.get(EntityKind::Amenity, first.id()).unwrap().unwrap();
        assert_eq!(stored.base().updated_at(), first.base().updated_at());
    });
}

#[test]
fn test_children_follow_foreign_keys() {
    for_each_backend(|storage| {
        let (state, city, user, place) = seed_place(storage);
        create(storage, EntityKind::City, json!({"name": "Oakland", "state_id": state.id()}));
        create(
            storage,
            EntityKind::Review,
            json!({"text": "Great", "place_id": place.id(), "user_id": user.id()}),
        );

        let cities = storage.children(&state, EntityKind::City).unwrap();
        assert_eq!(cities.len(), 2);
        assert!(cities.iter().any(|c| c.id() == city.id()));
        assert_eq!(storage.children(&place, EntityKind::Review).unwrap().len(), 1);
        assert_eq!(storage.children(&user, EntityKind::Place).unwrap().len(), 1);
        assert!(storage.children(&city, EntityKind::Review).unwrap().is_empty());
    });
}

#[test]
fn test_link_and_unlink_amenities() {
    for_each_backend(|storage| {
        let (_, _, _, place) = seed_place(storage);
        let wifi = create(storage, EntityKind::Amenity, json!({"name": "Wifi"}));
        let pool = create(storage, EntityKind::Amenity, json!({"name": "Pool"}));

        assert!(storage.link_amenity(place.id(), wifi.id()).unwrap());
        assert!(storage.link_amenity(place.id(), pool.id()).unwrap());
        assert!(!storage.link_amenity(place.id(), wifi.id()).unwrap());
        storage.save().unwrap();
        storage.reload().unwrap();

        let linked: Vec<String> = storage
            .place_amenities(place.id())
            .unwrap()
            .iter()
            .map(|a| a.id().to_owned())
            .collect();
        assert_eq!(linked, vec![wifi.id().to_owned(), pool.id().to_owned()]);

        assert!(storage.unlink_amenity(place.id(), wifi.id()).unwrap());
        assert!(!storage.unlink_amenity(place.id(), wifi.id()).unwrap());
        storage.save().unwrap();
        let linked = storage.place_amenities(place.id()).unwrap();
        assert_eq!(linked.len(), 1);
        assert_eq!(linked[0].id(), pool.id());
    });
}

#[test]
fn test_link_to_unknown_place_is_refused() {
    for_each_backend(|storage| {
        let wifi = create(storage, EntityKind::Amenity, json!({"name": "Wifi"}));
        assert!(!storage.link_amenity("no-such-place", wifi.id()).unwrap());
        assert!(storage.place_amenities("no-such-place").unwrap().is_empty());
    });
}

#[test]
fn test_link_changes_touch_the_place() {
    for_each_backend(|storage| {
        let (_, _, _, place) = seed_place(storage);
        let wifi = create(storage, EntityKind::Amenity, json!({"name": "Wifi"}));

        assert!(storage.link_amenity(place.id(), wifi.id()).unwrap());
        storage.save().unwrap();
        let linked = storage.get(EntityKind::Place, place.id()).unwrap().unwrap();
        assert!(linked.base().updated_at() > place.base().updated_at());
        assert_eq!(linked.base().created_at(), place.base().created_at());

        assert!(storage.unlink_amenity(place.id(), wifi.id()).unwrap());
        storage.save().unwrap();
        let unlinked = storage.get(EntityKind::Place, place.id()).unwrap().unwrap();
        assert!(unlinked.base().updated_at() > linked.base().updated_at());

        let untouched = storage.get(EntityKind::Amenity, wifi.id()).unwrap().unwrap();
        assert_eq!(untouched.base().updated_at(), wifi.base().updated_at());
    });
}

#[test]
fn test_stats_count_every_resource() {
    for_each_backend(|storage| {
        seed_place(storage);
        let stats = storage.stats().unwrap();
        assert_eq!(stats.len(), 6);
        assert_eq!(stats["states"], 1);
        assert_eq!(stats["cities"], 1);
        assert_eq!(stats["users"], 1);
        assert_eq!(stats["places"], 1);
        assert_eq!(stats["amenities"], 0);
        assert_eq!(stats["reviews"], 0);
    });
}

#[test]
fn test_lookups_by_unknown_class_name() {
    for_each_backend(|storage| {
        let state = create(storage, EntityKind::State, json!({"name": "Vermont"}));
        assert!(storage.get_by_name("State", state.id()).unwrap().is_some());
        assert!(storage.get_by_name("Planet", state.id()).unwrap().is_none());
        assert_eq!(storage.count_by_name(Some("State")).unwrap(), 1);
        assert_eq!(storage.count_by_name(Some("Planet")).unwrap(), 0);
        assert_eq!(storage.count_by_name(None).unwrap(), storage.count(None).unwrap());
    });
}

#[test]
fn test_close_discards_unsaved_changes_and_is_idempotent() {
    for_each_backend(|storage| {
        let kept = create(storage, EntityKind::State, json!({"name": "Kept"}));
        let dropped = build(&*storage, EntityKind::State, json!({"name": "Dropped"}));
        storage.new(dropped.clone()).unwrap();

        storage.close().unwrap();
        storage.close().unwrap();

        assert!(storage.get(EntityKind::State, kept.id()).unwrap().is_some());
        assert!(storage.get(EntityKind::State, dropped.id()).unwrap().is_none());
    });
}

#[test]
fn test_backend_reports_its_kind() {
    let (file, _dir) = super::create_file_storage();
    assert_eq!(crate::StorageBackend::File(file).kind(), StorageKind::File);
    let (db, _dir) = super::create_db_storage();
    assert_eq!(crate::StorageBackend::Db(db).kind(), StorageKind::Db);
}
