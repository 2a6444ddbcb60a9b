//! Test utilities and module declarations for storage tests.

use hbnb_core::{Entity, EntityKind};
use serde_json::{Value, json};
use tempfile::TempDir;

use crate::{DbStorage, FileStorage, HbnbEnv, Storage, StorageBackend};

#[expect(clippy::unwrap_used, reason = "test code")]
pub fn create_file_storage() -> (FileStorage, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let mut storage = FileStorage::new(temp_dir.path().join("file.json"));
    storage.reload().unwrap();
    (storage, temp_dir)
}

#[expect(clippy::unwrap_used, reason = "test code")]
pub fn create_db_storage() -> (DbStorage, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let mut storage = DbStorage::new(&temp_dir.path().join("test.db"), HbnbEnv::Test).unwrap();
    storage.reload().unwrap();
    (storage, temp_dir)
}

/// Run `test` once against each backend.
pub fn for_each_backend(test: impl Fn(&mut StorageBackend)) {
    let (file, _file_dir) = create_file_storage();
    test(&mut StorageBackend::File(file));
    let (db, _db_dir) = create_db_storage();
    test(&mut StorageBackend::Db(db));
}

/// Build an entity of `kind` from JSON attributes, with the backend's defaults.
#[expect(clippy::unwrap_used, reason = "test code")]
pub fn build(storage: &impl Storage, kind: EntityKind, attrs: Value) -> Entity {
    let Value::Object(map) = attrs else { panic!("attributes must be an object") };
    Entity::from_map(kind, &map, storage.kind()).unwrap()
}

/// Register and save an entity built from `attrs`.
#[expect(clippy::unwrap_used, reason = "test code")]
pub fn create(storage: &mut impl Storage, kind: EntityKind, attrs: Value) -> Entity {
    let mut entity = build(&*storage, kind, attrs);
    storage.persist(&mut entity).unwrap();
    entity
}

/// A saved State → City, a User, and a Place in that city owned by that user.
pub fn seed_place(storage: &mut impl Storage) -> (Entity, Entity, Entity, Entity) {
    let state = create(storage, EntityKind::State, json!({"name": "California"}));
    let city = create(
        storage,
        EntityKind::City,
        json!({"name": "San Francisco", "state_id": state.id()}),
    );
    let user = create(
        storage,
        EntityKind::User,
        json!({"email": "host@hbnb.io", "password": "pwd"}),
    );
    let place = create(
        storage,
        EntityKind::Place,
        json!({"name": "Loft", "city_id": city.id(), "user_id": user.id()}),
    );
    (state, city, user, place)
}

mod contract_tests;
mod db_storage_tests;
