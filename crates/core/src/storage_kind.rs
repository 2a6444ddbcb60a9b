//! Backend discriminator exposed to the rest of the system.

use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Which persistence backend is active for the process.
///
/// Entities consult this only where an attribute's default genuinely differs:
/// the file backend starts text fields as `""` and numbers as `0`, the
/// relational backend leaves them null. `Place::amenity_ids` exists only
/// under [`StorageKind::File`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StorageKind {
    /// Whole-index JSON document.
    #[default]
    File,
    /// Relational database with a `place_amenity` join table.
    Db,
}

impl StorageKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match *self {
            Self::File => "file",
            Self::Db => "db",
        }
    }

    #[must_use]
    pub const fn is_db(&self) -> bool {
        matches!(*self, Self::Db)
    }
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StorageKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "file" | "fs" => Ok(Self::File),
            "db" => Ok(Self::Db),
            other => Err(ModelError::UnknownStorage(other.to_owned())),
        }
    }
}
