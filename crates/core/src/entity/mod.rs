//! Entity model: a closed tagged variant over the six record types.

mod attribute;
mod base;
mod kind;
mod records;

use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

pub use attribute::{Attribute, FieldSpec, FieldType};
pub use base::BaseFields;
pub use kind::EntityKind;
pub use records::{Amenity, City, Place, Review, State, User};

use crate::constants::CLASS_KEY;
use crate::error::ModelError;
use crate::storage_kind::StorageKind;
use records::each_record;

/// Any live entity.
///
/// Serializes as its dict representation (see [`Entity::to_dict`]).
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Amenity(Amenity),
    City(City),
    Place(Place),
    Review(Review),
    State(State),
    User(User),
}

impl Entity {
    /// Fresh entity of `kind` with generated identity and backend defaults.
    #[must_use]
    pub fn new(kind: EntityKind, storage: StorageKind) -> Self {
        match kind {
            EntityKind::Amenity => Self::Amenity(Amenity::new(storage)),
            EntityKind::City => Self::City(City::new(storage)),
            EntityKind::Place => Self::Place(Place::new(storage)),
            EntityKind::Review => Self::Review(Review::new(storage)),
            EntityKind::State => Self::State(State::new(storage)),
            EntityKind::User => Self::User(User::new(storage)),
        }
    }

    /// Build an entity of `kind` from an attribute mapping.
    ///
    /// This is the registry of reconstruction paths: persisted
    /// `id`/`created_at`/`updated_at` are preserved, absent ones generated.
    ///
    /// # Errors
    /// Returns `ModelError` if a recognised attribute has the wrong type.
    pub fn from_map(
        kind: EntityKind,
        map: &Map<String, Value>,
        storage: StorageKind,
    ) -> Result<Self, ModelError> {
        Ok(match kind {
            EntityKind::Amenity => Self::Amenity(Amenity::from_map(map, storage)?),
            EntityKind::City => Self::City(City::from_map(map, storage)?),
            EntityKind::Place => Self::Place(Place::from_map(map, storage)?),
            EntityKind::Review => Self::Review(Review::from_map(map, storage)?),
            EntityKind::State => Self::State(State::from_map(map, storage)?),
            EntityKind::User => Self::User(User::from_map(map, storage)?),
        })
    }

    /// Rebuild an entity from its dict representation, dispatching on `__class__`.
    ///
    /// # Errors
    /// Returns `ModelError::MissingField` without a discriminator,
    /// `ModelError::UnknownClass` for an unregistered one.
    pub fn from_dict(map: &Map<String, Value>, storage: StorageKind) -> Result<Self, ModelError> {
        let class = map
            .get(CLASS_KEY)
            .and_then(Value::as_str)
            .ok_or(ModelError::MissingField(CLASS_KEY))?;
        Self::from_map(class.parse()?, map, storage)
    }

    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        match *self {
            Self::Amenity(_) => EntityKind::Amenity,
            Self::City(_) => EntityKind::City,
            Self::Place(_) => EntityKind::Place,
            Self::Review(_) => EntityKind::Review,
            Self::State(_) => EntityKind::State,
            Self::User(_) => EntityKind::User,
        }
    }

    #[must_use]
    pub fn base(&self) -> &BaseFields {
        each_record!(self, record => &record.base)
    }

    pub fn base_mut(&mut self) -> &mut BaseFields {
        each_record!(self, record => &mut record.base)
    }

    #[must_use]
    pub fn id(&self) -> &str {
        self.base().id()
    }

    /// Composite index key: `"<Class>.<id>"`.
    #[must_use]
    pub fn key(&self) -> String {
        self.kind().key(self.id())
    }

    /// Dict representation: every set attribute, the identity fields with
    /// timestamps as strings, and the `__class__` discriminator.
    #[must_use]
    pub fn to_dict(&self) -> Map<String, Value> {
        let mut dict = Map::new();
        self.base().write_dict(&mut dict);
        self.write_fields(&mut dict);
        dict.insert(CLASS_KEY.to_owned(), Value::String(self.kind().as_str().to_owned()));
        dict
    }

    /// Apply an update mapping to every mutable attribute.
    ///
    /// Identity fields, `__class__`, unknown keys and the kind's
    /// [immutable fields](EntityKind::immutable_fields) are left untouched.
    ///
    /// # Errors
    /// Returns `ModelError` if a recognised attribute has the wrong type;
    /// the entity is unchanged in that case.
    pub fn apply_update(
        &mut self,
        map: &Map<String, Value>,
        storage: StorageKind,
    ) -> Result<(), ModelError> {
        let mut updated = self.clone();
        updated.assign_fields(map, storage, self.kind().immutable_fields())?;
        *self = updated;
        Ok(())
    }

    /// Like [`Entity::apply_update`], but every declared attribute may change.
    /// Only identity fields and `__class__` are left untouched.
    ///
    /// # Errors
    /// Returns `ModelError` if a recognised attribute has the wrong type.
    pub fn set_attributes(
        &mut self,
        map: &Map<String, Value>,
        storage: StorageKind,
    ) -> Result<(), ModelError> {
        let mut updated = self.clone();
        updated.assign_fields(map, storage, &[])?;
        *self = updated;
        Ok(())
    }

    /// Value of the foreign key pointing at `parent`, if this kind has one.
    #[must_use]
    pub fn foreign_key(&self, parent: EntityKind) -> Option<&str> {
        let id = match (self, parent) {
            (Self::City(city), EntityKind::State) => &city.state_id,
            (Self::Place(place), EntityKind::City) => &place.city_id,
            (Self::Place(place), EntityKind::User) => &place.user_id,
            (Self::Review(review), EntityKind::Place) => &review.place_id,
            (Self::Review(review), EntityKind::User) => &review.user_id,
            _ => return None,
        };
        id.as_deref()
    }

    #[must_use]
    pub const fn as_place(&self) -> Option<&Place> {
        match *self {
            Self::Place(ref place) => Some(place),
            _ => None,
        }
    }

    pub fn as_place_mut(&mut self) -> Option<&mut Place> {
        match *self {
            Self::Place(ref mut place) => Some(place),
            _ => None,
        }
    }

    /// Display name, for kinds that carry one.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match *self {
            Self::Amenity(ref r) => r.name.as_deref(),
            Self::City(ref r) => r.name.as_deref(),
            Self::Place(ref r) => r.name.as_deref(),
            Self::State(ref r) => r.name.as_deref(),
            Self::Review(_) | Self::User(_) => None,
        }
    }
}

/// Declared attributes of `kind`.
#[must_use]
pub const fn fields_of(kind: EntityKind) -> &'static [FieldSpec] {
    match kind {
        EntityKind::Amenity => Amenity::FIELDS,
        EntityKind::City => City::FIELDS,
        EntityKind::Place => Place::FIELDS,
        EntityKind::Review => Review::FIELDS,
        EntityKind::State => State::FIELDS,
        EntityKind::User => User::FIELDS,
    }
}

impl Serialize for Entity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_dict().serialize(serializer)
    }
}

impl fmt::Display for Entity {
    /// `[<Class>] (<id>) <dict>`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dict = Value::Object(self.to_dict());
        write!(f, "[{}] ({}) {dict}", self.kind(), self.id())
    }
}

macro_rules! impl_from_record {
    ($($name:ident),*) => {
        $(
            impl From<$name> for Entity {
                fn from(record: $name) -> Self {
                    Self::$name(record)
                }
            }
        )*
    };
}

impl_from_record!(Amenity, City, Place, Review, State, User);
