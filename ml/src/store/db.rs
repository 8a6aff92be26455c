//! SQLite connection and schema

use std::fs;
use std::path::Path;

use rusqlite::Connection;
use tracing::{debug, info};

use super::messages::StoreError;

/// Idempotent schema for both tables
const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS madlib (
    id INTEGER PRIMARY KEY,
    name TEXT,
    format TEXT
);
CREATE TABLE IF NOT EXISTS madlib_fields (
    id INTEGER PRIMARY KEY,
    field TEXT,
    value TEXT
);
CREATE INDEX IF NOT EXISTS madlib_name_idx ON madlib (name);
CREATE INDEX IF NOT EXISTS madlib_fields_field_idx ON madlib_fields (field);
";

/// Synchronous access to the madlib tables
///
/// Owned by exactly one `StoreManager` actor; every statement runs on that
/// actor, one at a time.
pub struct Db {
    pub(super) conn: Connection,
}

impl Db {
    /// Open (or create) a database file and ensure the schema exists
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Db::open: called");
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        Self::init(conn)
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> Result<Self, StoreError> {
        debug!("Db::open_in_memory: called");
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA)?;
        info!("madlib schema ready");
        Ok(Self { conn })
    }
}
