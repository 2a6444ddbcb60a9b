//! JSON-file backend.
//!
//! Every live entity sits in an in-memory index; `save` rewrites the whole
//! document `{ "<Class>.<id>": <dict>, ... }` atomically through a temp file
//! in the same directory.

use std::collections::BTreeSet;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use hbnb_core::{Entity, EntityKind, StorageKind};
use serde_json::{Map, Value};
use tempfile::NamedTempFile;

use crate::error::Result;
use crate::traits::{Index, Storage};

/// In-memory index flushed to a single JSON document.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    objects: Index,
    /// Keys registered since the last successful save.
    dirty: BTreeSet<String>,
}

impl FileStorage {
    /// Backend bound to `path`. Nothing is read until [`Storage::reload`].
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), objects: Index::new(), dirty: BTreeSet::new() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_document(&self, objects: &Index) -> Result<()> {
        let document: Map<String, Value> = objects
            .iter()
            .map(|(key, entity)| (key.clone(), Value::Object(entity.to_dict())))
            .collect();

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let tmp = NamedTempFile::new_in(dir)?;
        {
            let mut writer = BufWriter::new(tmp.as_file());
            serde_json::to_writer(&mut writer, &document)?;
            writer.flush()?;
        }
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }

    fn read_document(&self) -> Index {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Index::new(),
            Err(e) => {
                tracing::warn!("Cannot read {}: {}", self.path.display(), e);
                return Index::new();
            },
        };
        if raw.trim().is_empty() {
            return Index::new();
        }
        let document: Map<String, Value> = match serde_json::from_str(&raw) {
            Ok(document) => document,
            Err(e) => {
                tracing::warn!("Malformed storage file {}: {}", self.path.display(), e);
                return Index::new();
            },
        };

        let mut objects = Index::new();
        for (key, value) in document {
            let Value::Object(dict) = value else {
                tracing::warn!("Skipping {}: entry is not an object", key);
                continue;
            };
            match Entity::from_dict(&dict, StorageKind::File) {
                Ok(entity) => {
                    objects.insert(entity.key(), entity);
                },
                Err(e) => tracing::warn!("Skipping {}: {}", key, e),
            }
        }
        objects
    }
}

impl Storage for FileStorage {
    fn kind(&self) -> StorageKind {
        StorageKind::File
    }

    fn all(&self, kind: Option<EntityKind>) -> Result<Index> {
        Ok(match kind {
            None => self.objects.clone(),
            Some(kind) => self
                .objects
                .iter()
                .filter(|(_, entity)| entity.kind() == kind)
                .map(|(key, entity)| (key.clone(), entity.clone()))
                .collect(),
        })
    }

    fn get(&self, kind: EntityKind, id: &str) -> Result<Option<Entity>> {
        Ok(self.objects.get(&kind.key(id)).cloned())
    }

    fn new(&mut self, entity: Entity) -> Result<()> {
        let key = entity.key();
        self.dirty.insert(key.clone());
        self.objects.insert(key, entity);
        Ok(())
    }

    fn save(&mut self) -> Result<()> {
        let mut staged = self.objects.clone();
        for key in &self.dirty {
            if let Some(entity) = staged.get_mut(key) {
                entity.base_mut().touch();
            }
        }
        self.write_document(&staged)?;
        tracing::debug!("Saved {} objects to {}", staged.len(), self.path.display());
        self.objects = staged;
        self.dirty.clear();
        Ok(())
    }

    fn delete(&mut self, entity: Option<&Entity>) -> Result<()> {
        if let Some(entity) = entity {
            let key = entity.key();
            self.objects.remove(&key);
            self.dirty.remove(&key);
        }
        Ok(())
    }

    fn count(&self, kind: Option<EntityKind>) -> Result<usize> {
        Ok(match kind {
            None => self.objects.len(),
            Some(kind) => self.objects.values().filter(|e| e.kind() == kind).count(),
        })
    }

    fn reload(&mut self) -> Result<()> {
        self.objects = self.read_document();
        self.dirty.clear();
        tracing::info!("Loaded {} objects from {}", self.objects.len(), self.path.display());
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.reload()
    }

    fn place_amenities(&self, place_id: &str) -> Result<Vec<Entity>> {
        let Some(place) = self.objects.get(&EntityKind::Place.key(place_id)).and_then(Entity::as_place)
        else {
            return Ok(Vec::new());
        };
        Ok(place
            .amenity_ids
            .iter()
            .flatten()
            .filter_map(|id| self.objects.get(&EntityKind::Amenity.key(id)).cloned())
            .collect())
    }

    fn link_amenity(&mut self, place_id: &str, amenity_id: &str) -> Result<bool> {
        let key = EntityKind::Place.key(place_id);
        let Some(place) = self.objects.get_mut(&key).and_then(Entity::as_place_mut) else {
            return Ok(false);
        };
        let ids = place.amenity_ids.get_or_insert_with(Vec::new);
        if ids.iter().any(|id| id == amenity_id) {
            return Ok(false);
        }
        ids.push(amenity_id.to_owned());
        self.dirty.insert(key);
        Ok(true)
    }

    fn unlink_amenity(&mut self, place_id: &str, amenity_id: &str) -> Result<bool> {
        let key = EntityKind::Place.key(place_id);
        let Some(place) = self.objects.get_mut(&key).and_then(Entity::as_place_mut) else {
            return Ok(false);
        };
        let Some(ids) = place.amenity_ids.as_mut() else {
            return Ok(false);
        };
        let before = ids.len();
        ids.retain(|id| id != amenity_id);
        if ids.len() == before {
            return Ok(false);
        }
        self.dirty.insert(key);
        Ok(true)
    }
}
