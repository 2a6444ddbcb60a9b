//! Backend selected at startup, with enum dispatch.

use std::collections::BTreeMap;

use hbnb_core::{Entity, EntityKind, StorageKind};

use crate::config::StorageConfig;
use crate::db_storage::DbStorage;
use crate::error::Result;
use crate::file_storage::FileStorage;
use crate::traits::{Index, Storage};

macro_rules! dispatch {
    ($self:expr, $method:ident ( $($arg:expr),* $(,)? )) => {
        match $self {
            StorageBackend::File(s) => <FileStorage as Storage>::$method(s, $($arg),*),
            StorageBackend::Db(s) => <DbStorage as Storage>::$method(s, $($arg),*),
        }
    };
}

#[derive(Debug)]
pub enum StorageBackend {
    File(FileStorage),
    Db(DbStorage),
}

impl StorageBackend {
    /// Build the backend `config` names. The caller still has to `reload`.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened.
    pub fn open(config: &StorageConfig) -> Result<Self> {
        tracing::info!(backend = %config.kind, env = %config.env, "Selecting storage backend");
        Ok(match config.kind {
            StorageKind::File => Self::File(FileStorage::new(&config.file_path)),
            StorageKind::Db => Self::Db(DbStorage::new(&config.db_path, config.env)?),
        })
    }
}

impl Storage for StorageBackend {
    fn kind(&self) -> StorageKind {
        dispatch!(self, kind())
    }

    fn all(&self, kind: Option<EntityKind>) -> Result<Index> {
        dispatch!(self, all(kind))
    }

    fn get(&self, kind: EntityKind, id: &str) -> Result<Option<Entity>> {
        dispatch!(self, get(kind, id))
    }

    fn new(&mut self, entity: Entity) -> Result<()> {
        dispatch!(self, new(entity))
    }

    fn save(&mut self) -> Result<()> {
        dispatch!(self, save())
    }

    fn delete(&mut self, entity: Option<&Entity>) -> Result<()> {
        dispatch!(self, delete(entity))
    }

    fn count(&self, kind: Option<EntityKind>) -> Result<usize> {
        dispatch!(self, count(kind))
    }

    fn reload(&mut self) -> Result<()> {
        dispatch!(self, reload())
    }

    fn close(&mut self) -> Result<()> {
        dispatch!(self, close())
    }

    fn place_amenities(&self, place_id: &str) -> Result<Vec<Entity>> {
        dispatch!(self, place_amenities(place_id))
    }

    fn link_amenity(&mut self, place_id: &str, amenity_id: &str) -> Result<bool> {
        dispatch!(self, link_amenity(place_id, amenity_id))
    }

    fn unlink_amenity(&mut self, place_id: &str, amenity_id: &str) -> Result<bool> {
        dispatch!(self, unlink_amenity(place_id, amenity_id))
    }

    fn stats(&self) -> Result<BTreeMap<&'static str, usize>> {
        dispatch!(self, stats())
    }
}
