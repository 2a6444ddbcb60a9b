//! The six entity records.
//!
//! Each record is declared once through `entity_record!`, which derives the
//! field table, the backend-aware constructor, the mapping builder and the
//! dict writer from the same field list.

use serde_json::{Map, Value};

use super::attribute::{Attribute, FieldSpec};
use super::base::BaseFields;
use crate::constants::CLASS_KEY;
use crate::error::ModelError;
use crate::storage_kind::StorageKind;

/// Keys handled outside the declared field list.
const RESERVED_KEYS: [&str; 4] = ["id", "created_at", "updated_at", CLASS_KEY];

macro_rules! entity_record {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$fmeta:meta])* $field:ident : $ty:ty ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            pub base: BaseFields,
            $( $(#[$fmeta])* pub $field: $ty, )*
        }

        impl $name {
            /// Declared attributes, in dict order.
            pub const FIELDS: &'static [FieldSpec] = &[
                $( FieldSpec { name: stringify!($field), ty: <$ty as Attribute>::TYPE }, )*
            ];

            /// Fresh record with generated identity and backend defaults.
            #[must_use]
            pub fn new(storage: StorageKind) -> Self {
                Self {
                    base: BaseFields::new(),
                    $( $field: <$ty as Attribute>::unset(storage), )*
                }
            }

            /// Build from an attribute mapping, preserving any persisted
            /// `id`/`created_at`/`updated_at`.
            ///
            /// Unrecognised keys are ignored; recognised keys with the wrong
            /// JSON type are rejected.
            ///
            /// # Errors
            /// Returns `ModelError` on a type mismatch or bad timestamp.
            pub fn from_map(
                map: &Map<String, Value>,
                storage: StorageKind,
            ) -> Result<Self, ModelError> {
                let mut record = Self {
                    base: BaseFields::from_map(stringify!($name), map)?,
                    $( $field: <$ty as Attribute>::unset(storage), )*
                };
                record.assign(map, storage, &[])?;
                Ok(record)
            }

            fn assign(
                &mut self,
                map: &Map<String, Value>,
                storage: StorageKind,
                skip: &[&str],
            ) -> Result<(), ModelError> {
                for (key, value) in map {
                    if skip.contains(&key.as_str()) {
                        continue;
                    }
                    match key.as_str() {
                        $(
                            stringify!($field) => {
                                if !<$ty as Attribute>::exists_under(storage) {
                                    continue;
                                }
                                self.$field = <$ty as Attribute>::from_json(value).ok_or_else(
                                    || ModelError::InvalidAttribute {
                                        class: stringify!($name),
                                        key: key.clone(),
                                        expected: <$ty as Attribute>::TYPE.as_str(),
                                    },
                                )?;
                            },
                        )*
                        other if RESERVED_KEYS.contains(&other) => {},
                        other => {
                            tracing::debug!(class = stringify!($name), key = other, "ignoring unknown attribute");
                        },
                    }
                }
                Ok(())
            }

            fn write_fields(&self, dict: &mut Map<String, Value>) {
                $(
                    if let Some(value) = Attribute::to_json(&self.$field) {
                        dict.insert(stringify!($field).to_owned(), value);
                    }
                )*
            }
        }
    };
}

entity_record! {
    /// A person who owns places and writes reviews.
    User {
        email: Option<String>,
        password: Option<String>,
        first_name: Option<String>,
        last_name: Option<String>,
    }
}

entity_record! {
    /// Top-level region owning cities.
    State {
        name: Option<String>,
    }
}

entity_record! {
    /// A city inside one state.
    City {
        name: Option<String>,
        state_id: Option<String>,
    }
}

entity_record! {
    /// Something a place offers, shared between many places.
    Amenity {
        name: Option<String>,
    }
}

entity_record! {
    /// A rentable property.
    Place {
        city_id: Option<String>,
        user_id: Option<String>,
        name: Option<String>,
        description: Option<String>,
        number_rooms: Option<i64>,
        number_bathrooms: Option<i64>,
        max_guest: Option<i64>,
        price_by_night: Option<i64>,
        latitude: Option<f64>,
        longitude: Option<f64>,
        /// Linked amenity ids, in link order. File backend only; the
        /// relational backend keeps links in the `place_amenity` table.
        amenity_ids: Option<Vec<String>>,
    }
}

entity_record! {
    /// A user's review of a place.
    Review {
        place_id: Option<String>,
        user_id: Option<String>,
        text: Option<String>,
    }
}

/// Dispatch a record-level operation over every `Entity` variant.
macro_rules! each_record {
    ($entity:expr, $record:ident => $body:expr) => {
        match $entity {
            Entity::Amenity($record) => $body,
            Entity::City($record) => $body,
            Entity::Place($record) => $body,
            Entity::Review($record) => $body,
            Entity::State($record) => $body,
            Entity::User($record) => $body,
        }
    };
}

pub(super) use each_record;

use super::Entity;

impl Entity {
    pub(super) fn assign_fields(
        &mut self,
        map: &Map<String, Value>,
        storage: StorageKind,
        skip: &[&str],
    ) -> Result<(), ModelError> {
        each_record!(self, record => record.assign(map, storage, skip))
    }

    pub(super) fn write_fields(&self, dict: &mut Map<String, Value>) {
        each_record!(self, record => record.write_fields(dict));
    }
}
