//! Typed error enum for the storage layer.
//!
//! Not-found is never an error here: lookups return `Ok(None)`.

use hbnb_core::ModelError;
use rusqlite::ErrorCode;
use thiserror::Error;

/// Storage-layer error with variants covering every expected failure mode.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The engine was called in a way the contract does not allow.
    #[error("invalid usage: {0}")]
    InvalidUsage(String),

    /// SQL / constraint / transaction failure.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// No connection could be taken from the pool.
    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// Reading or writing the backing file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// An entity could not be built from stored attributes.
    #[error("model error: {0}")]
    Model(#[from] ModelError),

    /// Stored data could not be converted to or from its serialized form.
    #[error("data corruption: {context}")]
    DataCorruption {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl StorageError {
    /// Whether this is a contract violation rather than a runtime failure.
    #[must_use]
    pub const fn is_invalid_usage(&self) -> bool {
        matches!(self, Self::InvalidUsage(_))
    }

    /// Whether this is a NOT NULL / FOREIGN KEY / UNIQUE violation.
    #[must_use]
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            Self::Database(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation
        )
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::DataCorruption {
            context: "JSON serialization/deserialization".to_owned(),
            source: Box::new(err),
        }
    }
}

pub type Result<T> = std::result::Result<T, StorageError>;
