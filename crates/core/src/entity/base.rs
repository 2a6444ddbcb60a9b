//! Identity and timestamps shared by every entity.

use chrono::NaiveDateTime;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::ModelError;
use crate::timestamp::{format_timestamp, next_timestamp, now_timestamp, parse_timestamp};

/// `id`, `created_at` and `updated_at` of an entity.
///
/// `id` never changes after construction and `created_at <= updated_at`
/// always holds; `updated_at` only moves forward through [`BaseFields::touch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseFields {
    id: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

impl BaseFields {
    /// Fresh identity: UUID v4 and `created_at == updated_at == now`.
    #[must_use]
    pub fn new() -> Self {
        let now = now_timestamp();
        Self { id: Uuid::new_v4().to_string(), created_at: now, updated_at: now }
    }

    /// Identity from a persisted mapping, preserving the stored values.
    ///
    /// Missing keys are generated the same way [`BaseFields::new`] does; a
    /// missing `updated_at` copies `created_at`.
    ///
    /// # Errors
    /// Returns an error if a present key has the wrong type or an
    /// unparseable timestamp.
    pub fn from_map(class: &'static str, map: &Map<String, Value>) -> Result<Self, ModelError> {
        let id = match map.get("id") {
            Some(Value::String(id)) => id.clone(),
            Some(_) => {
                return Err(ModelError::InvalidAttribute {
                    class,
                    key: "id".to_owned(),
                    expected: "string",
                });
            },
            None => Uuid::new_v4().to_string(),
        };
        let created_at = match read_timestamp(class, map, "created_at")? {
            Some(ts) => ts,
            None => now_timestamp(),
        };
        let updated_at = read_timestamp(class, map, "updated_at")?.unwrap_or(created_at);
        Ok(Self { id, created_at, updated_at: updated_at.max(created_at) })
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub const fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    #[must_use]
    pub const fn updated_at(&self) -> NaiveDateTime {
        self.updated_at
    }

    /// Move `updated_at` to now, strictly past its previous value.
    pub fn touch(&mut self) {
        self.updated_at = next_timestamp(self.updated_at);
    }

    pub(crate) fn write_dict(&self, dict: &mut Map<String, Value>) {
        dict.insert("id".to_owned(), Value::String(self.id.clone()));
        dict.insert("created_at".to_owned(), Value::String(format_timestamp(&self.created_at)));
        dict.insert("updated_at".to_owned(), Value::String(format_timestamp(&self.updated_at)));
    }
}

impl Default for BaseFields {
    fn default() -> Self {
        Self::new()
    }
}

fn read_timestamp(
    class: &'static str,
    map: &Map<String, Value>,
    key: &str,
) -> Result<Option<NaiveDateTime>, ModelError> {
    match map.get(key) {
        Some(Value::String(s)) => parse_timestamp(s).map(Some),
        Some(Value::Null) | None => Ok(None),
        Some(_) => {
            Err(ModelError::InvalidAttribute { class, key: key.to_owned(), expected: "timestamp" })
        },
    }
}
