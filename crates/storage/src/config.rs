//! Environment-driven backend selection.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use hbnb_core::{DEFAULT_DB_PATH, DEFAULT_FILE_PATH, StorageKind, env_parse_with_default};

/// Environment tag. Only `test` allows the relational schema to be reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HbnbEnv {
    #[default]
    Dev,
    Test,
    Production,
}

impl HbnbEnv {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match *self {
            Self::Dev => "dev",
            Self::Test => "test",
            Self::Production => "production",
        }
    }

    /// Whether tables may be dropped and recreated on startup.
    #[must_use]
    pub const fn allows_reset(&self) -> bool {
        matches!(*self, Self::Test)
    }
}

impl fmt::Display for HbnbEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HbnbEnv {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dev" | "development" => Ok(Self::Dev),
            "test" => Ok(Self::Test),
            "prod" | "production" => Ok(Self::Production),
            other => Err(format!("unknown environment tag: {other}")),
        }
    }
}

/// Which backend to build and where it keeps its data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub kind: StorageKind,
    pub file_path: PathBuf,
    pub db_path: PathBuf,
    pub env: HbnbEnv,
}

impl StorageConfig {
    /// Read `HBNB_TYPE_STORAGE`, `HBNB_FILE_PATH`, `HBNB_DB_PATH` and `HBNB_ENV`.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            kind: env_parse_with_default("HBNB_TYPE_STORAGE", StorageKind::File),
            file_path: PathBuf::from(env_parse_with_default(
                "HBNB_FILE_PATH",
                DEFAULT_FILE_PATH.to_owned(),
            )),
            db_path: PathBuf::from(env_parse_with_default(
                "HBNB_DB_PATH",
                DEFAULT_DB_PATH.to_owned(),
            )),
            env: env_parse_with_default("HBNB_ENV", HbnbEnv::Dev),
        }
    }

    /// File backend writing to `path`.
    #[must_use]
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self { kind: StorageKind::File, file_path: path.into(), ..Self::default() }
    }

    /// Relational backend at `path` under `env`.
    #[must_use]
    pub fn db(path: impl Into<PathBuf>, env: HbnbEnv) -> Self {
        Self { kind: StorageKind::Db, db_path: path.into(), env, ..Self::default() }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            kind: StorageKind::File,
            file_path: PathBuf::from(DEFAULT_FILE_PATH),
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            env: HbnbEnv::Dev,
        }
    }
}
