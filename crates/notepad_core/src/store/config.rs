//! Store location and schema configuration.

use crate::db::schema::SCHEMA_VERSION;
use std::path::{Path, PathBuf};

/// File name used when the store is placed inside a directory.
pub const DATABASE_FILE_NAME: &str = "data.db";

/// Where the backing database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    /// Database file at an explicit path.
    File(PathBuf),
    /// Private in-memory database, discarded on close.
    Memory,
}

/// Construction parameters for `NoteStore`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub location: StoreLocation,
    /// Target schema version. Opening a file stored at a lower version
    /// recreates the table and discards its rows.
    pub schema_version: u32,
}

impl StoreConfig {
    /// `<dir>/data.db` at the crate's schema version.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::at_path(dir.as_ref().join(DATABASE_FILE_NAME))
    }

    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self {
            location: StoreLocation::File(path.into()),
            schema_version: SCHEMA_VERSION,
        }
    }

    pub fn in_memory() -> Self {
        Self {
            location: StoreLocation::Memory,
            schema_version: SCHEMA_VERSION,
        }
    }

    /// Versions start at 1; `0` makes `NoteStore::open` fail.
    pub fn with_schema_version(mut self, schema_version: u32) -> Self {
        self.schema_version = schema_version;
        self
    }
}
