//! Shared constants for the HBNB crates.

/// Discriminator key carried by every serialized entity.
pub const CLASS_KEY: &str = "__class__";

/// Default location of the JSON document written by the file backend.
pub const DEFAULT_FILE_PATH: &str = "file.json";

/// Default location of the relational database.
pub const DEFAULT_DB_PATH: &str = "hbnb.db";

/// Default HTTP bind host.
pub const DEFAULT_API_HOST: &str = "0.0.0.0";

/// Default HTTP bind port.
pub const DEFAULT_API_PORT: u16 = 5000;

/// Relational backend connection pool size.
pub const DB_POOL_MAX_CONNECTIONS: u32 = 4;

/// Busy timeout applied to every relational connection, in milliseconds.
pub const DB_BUSY_TIMEOUT_MS: i32 = 5000;
