//! Class discriminator for the six entity subtypes.

use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Concrete entity subtype, serialized as the `__class__` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    Amenity,
    City,
    Place,
    Review,
    State,
    User,
}

impl EntityKind {
    /// Every registered kind, parents before children.
    ///
    /// The relational backend inserts in this order and deletes in reverse,
    /// so foreign keys always point at rows that already exist.
    pub const ALL: [Self; 6] =
        [Self::State, Self::User, Self::City, Self::Amenity, Self::Place, Self::Review];

    /// Class name used in composite keys and the `__class__` field.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match *self {
            Self::Amenity => "Amenity",
            Self::City => "City",
            Self::Place => "Place",
            Self::Review => "Review",
            Self::State => "State",
            Self::User => "User",
        }
    }

    /// Relational table name.
    #[must_use]
    pub const fn table(&self) -> &'static str {
        match *self {
            Self::Amenity => "amenities",
            Self::City => "cities",
            Self::Place => "places",
            Self::Review => "reviews",
            Self::State => "states",
            Self::User => "users",
        }
    }

    /// Plural resource name used by the HTTP API and `stats`.
    #[must_use]
    pub const fn resource(&self) -> &'static str {
        self.table()
    }

    /// Name of the foreign-key attribute that children use to point at this kind.
    #[must_use]
    pub const fn foreign_key_name(&self) -> &'static str {
        match *self {
            Self::Amenity => "amenity_id",
            Self::City => "city_id",
            Self::Place => "place_id",
            Self::Review => "review_id",
            Self::State => "state_id",
            Self::User => "user_id",
        }
    }

    /// Attributes that an update request may not change after creation.
    #[must_use]
    pub const fn immutable_fields(&self) -> &'static [&'static str] {
        match *self {
            Self::City => &["state_id"],
            Self::Place => &["user_id", "city_id"],
            Self::Review => &["user_id", "place_id"],
            Self::User => &["email"],
            Self::Amenity | Self::State => &[],
        }
    }

    /// Composite index key: `"<Class>.<id>"`.
    #[must_use]
    pub fn key(&self, id: &str) -> String {
        format!("{}.{id}", self.as_str())
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Amenity" => Ok(Self::Amenity),
            "City" => Ok(Self::City),
            "Place" => Ok(Self::Place),
            "Review" => Ok(Self::Review),
            "State" => Ok(Self::State),
            "User" => Ok(Self::User),
            other => Err(ModelError::UnknownClass(other.to_owned())),
        }
    }
}
