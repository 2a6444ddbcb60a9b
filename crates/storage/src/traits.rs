//! The uniform object-access contract both backends implement.

use std::collections::BTreeMap;

use hbnb_core::{Entity, EntityKind, StorageKind};

use crate::error::Result;

/// Live entities keyed by composite key `"<Class>.<id>"`.
///
/// Ordered by key, so iteration is stable for a given call.
pub type Index = BTreeMap<String, Entity>;

/// Persistence engine contract.
///
/// Every operation is synchronous. Values handed out are copies: to change
/// a stored entity, mutate the copy and register it again with
/// [`Storage::new`], which replaces the instance stored under the same key.
pub trait Storage {
    /// Which backend this is. The only backend detail callers may branch on.
    fn kind(&self) -> StorageKind;

    /// Every live entity, or only those of `kind`.
    fn all(&self, kind: Option<EntityKind>) -> Result<Index>;

    /// The live entity of `kind` with `id`, or `None`.
    fn get(&self, kind: EntityKind, id: &str) -> Result<Option<Entity>>;

    /// Register `entity` in the live index. Visible to `all`/`get`/`count`
    /// immediately; durable after the next [`Storage::save`].
    fn new(&mut self, entity: Entity) -> Result<()>;

    /// Make every registered change durable, all or nothing.
    ///
    /// Entities registered since the last save get a fresh `updated_at`.
    fn save(&mut self) -> Result<()>;

    /// Remove `entity` from the live index. `None` or an unknown entity is a no-op.
    fn delete(&mut self, entity: Option<&Entity>) -> Result<()>;

    /// Number of live entities, or of those of `kind`.
    fn count(&self, kind: Option<EntityKind>) -> Result<usize>;

    /// (Re)populate the live index from the backing store.
    /// A missing or empty store yields an empty index.
    fn reload(&mut self) -> Result<()>;

    /// Release backend resources and discard unsaved changes. Idempotent.
    fn close(&mut self) -> Result<()>;

    /// Amenities linked to the place `place_id`, in link order.
    fn place_amenities(&self, place_id: &str) -> Result<Vec<Entity>>;

    /// Link an amenity to a place. Returns whether the link set changed.
    fn link_amenity(&mut self, place_id: &str, amenity_id: &str) -> Result<bool>;

    /// Unlink an amenity from a place. Returns whether the link set changed.
    fn unlink_amenity(&mut self, place_id: &str, amenity_id: &str) -> Result<bool>;

    /// Entities of `kind` whose foreign key points at `parent`.
    fn children(&self, parent: &Entity, kind: EntityKind) -> Result<Vec<Entity>> {
        Ok(self
            .all(Some(kind))?
            .into_values()
            .filter(|child| child.foreign_key(parent.kind()) == Some(parent.id()))
            .collect())
    }

    /// Register, save, and refresh the caller's copy with the stored state.
    fn persist(&mut self, entity: &mut Entity) -> Result<()> {
        self.new(entity.clone())?;
        self.save()?;
        if let Some(stored) = self.get(entity.kind(), entity.id())? {
            *entity = stored;
        }
        Ok(())
    }

    /// Count per resource name (`"states"`, `"users"`, ...).
    fn stats(&self) -> Result<BTreeMap<&'static str, usize>> {
        EntityKind::ALL
            .into_iter()
            .map(|kind| Ok((kind.resource(), self.count(Some(kind))?)))
            .collect()
    }

    /// [`Storage::get`] with a class name. An unregistered class is not found.
    fn get_by_name(&self, class: &str, id: &str) -> Result<Option<Entity>> {
        match class.parse::<EntityKind>() {
            Ok(kind) => self.get(kind, id),
            Err(_) => Ok(None),
        }
    }

    /// [`Storage::count`] with a class name. An unregistered class counts zero.
    fn count_by_name(&self, class: Option<&str>) -> Result<usize> {
        match class.map(str::parse::<EntityKind>) {
            None => self.count(None),
            Some(Ok(kind)) => self.count(Some(kind)),
            Some(Err(_)) => Ok(0),
        }
    }
}
