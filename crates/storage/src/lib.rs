//! Storage engine for the HBNB catalog
//!
//! One object-access contract ([`Storage`]) over two structurally different
//! backends: [`FileStorage`] keeps every live object in memory and flushes
//! the whole index to one JSON document, [`DbStorage`] maps the same
//! operations onto SQLite tables with a `place_amenity` join table.
//! [`StorageBackend`] picks one of them at startup from [`StorageConfig`].

mod backend;
mod config;
mod db_storage;
mod error;
mod file_storage;
#[cfg(test)]
mod tests;
mod traits;

pub use backend::StorageBackend;
pub use config::{HbnbEnv, StorageConfig};
pub use db_storage::DbStorage;
pub use error::{Result, StorageError};
pub use file_storage::FileStorage;
pub use traits::{Index, Storage};
