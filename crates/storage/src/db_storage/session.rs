//! Unit of work: changes registered since the last save.

use std::collections::BTreeMap;

use hbnb_core::{Entity, EntityKind};

/// A pending change to the `place_amenity` join table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LinkOp {
    Link { place_id: String, amenity_id: String },
    Unlink { place_id: String, amenity_id: String },
}

impl LinkOp {
    fn place_id(&self) -> &str {
        match self {
            Self::Link { place_id, .. } | Self::Unlink { place_id, .. } => place_id,
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct Session {
    /// Entities to upsert, by composite key.
    pub(crate) pending: BTreeMap<String, Entity>,
    /// Rows to delete, by composite key.
    pub(crate) deleted: BTreeMap<String, (EntityKind, String)>,
    /// Link changes, in registration order.
    pub(crate) links: Vec<LinkOp>,
}

impl Session {
    pub(crate) fn is_empty(&self) -> bool {
        self.pending.is_empty() && self.deleted.is_empty() && self.links.is_empty()
    }

    pub(crate) fn register(&mut self, entity: Entity) {
        let key = entity.key();
        self.deleted.remove(&key);
        self.pending.insert(key, entity);
    }

    pub(crate) fn remove(&mut self, entity: &Entity) {
        let key = entity.key();
        self.pending.remove(&key);
        self.deleted.insert(key, (entity.kind(), entity.id().to_owned()));
    }

    /// Replay this session's link changes for `place_id` over `ids`.
    pub(crate) fn apply_links(&self, place_id: &str, ids: &mut Vec<String>) {
        for op in self.links.iter().filter(|op| op.place_id() == place_id) {
            match op {
                LinkOp::Link { amenity_id, .. } => {
                    if !ids.contains(amenity_id) {
                        ids.push(amenity_id.clone());
                    }
                },
                LinkOp::Unlink { amenity_id, .. } => ids.retain(|id| id != amenity_id),
            }
        }
    }

    /// Overlay pending and deleted entities of `kind` onto rows read from the database.
    pub(crate) fn overlay(&self, kind: Option<EntityKind>, rows: &mut BTreeMap<String, Entity>) {
        for key in self.deleted.keys() {
            rows.remove(key);
        }
        for (key, entity) in &self.pending {
            if kind.is_none_or(|k| k == entity.kind()) {
                rows.insert(key.clone(), entity.clone());
            }
        }
    }
}
