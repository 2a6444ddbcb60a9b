//! Core types for the HBNB catalog
//!
//! Entity records, the class discriminator and the dict conversion contract
//! shared by every storage backend.

mod constants;
mod entity;
mod env_config;
mod error;
mod storage_kind;
mod timestamp;

pub use constants::*;
pub use entity::*;
pub use env_config::env_parse_with_default;
pub use error::*;
pub use storage_kind::StorageKind;
pub use timestamp::{
    TIMESTAMP_FORMAT, format_timestamp, next_timestamp, now_timestamp, parse_timestamp,
};
