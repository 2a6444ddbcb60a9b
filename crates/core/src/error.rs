use std::result::Result as StdResult;

use thiserror::Error;

/// Errors raised while building or converting entities.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("unknown class: {0}")]
    UnknownClass(String),

    #[error("unknown storage type: {0}")]
    UnknownStorage(String),

    #[error("missing field: {0}")]
    MissingField(&'static str),

    #[error("invalid value for {class}.{key}: expected {expected}")]
    InvalidAttribute { class: &'static str, key: String, expected: &'static str },

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = StdResult<T, ModelError>;
