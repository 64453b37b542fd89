//! SQLite-backed maintenance data store
//!
//! Holds the records the import pipeline targets: roles, locations,
//! spare parts, equipment and users. Lives at `.fixit/fixit.db` inside a
//! project. Unique keys are case-insensitive, matching the duplicate
//! detection the web importer performed with lowercased lookup maps.

mod queries;
mod schema;
mod types;

pub use types::*;

use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::Connection;
use thiserror::Error;

use crate::core::project::Project;

/// Store file location within a project
const STORE_FILE: &str = ".fixit/fixit.db";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    #[error("failed to create store directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// The maintenance data store backed by SQLite
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open or create the store for a project
    pub fn open(project: &Project) -> Result<Self, StoreError> {
        Self::open_path(&project.root().join(STORE_FILE))
    }

    /// Open or create a store at an explicit path
    pub fn open_path(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| StoreError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;

        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// In-memory store, used by unit tests
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }
}
