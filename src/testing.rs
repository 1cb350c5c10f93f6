//! Test utilities for database setup.
//!
//! Reuses the authoritative schema initialization so tests never carry their
//! own copy of the tables.

use rusqlite::Connection;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test environment with a migrated quiz.db in a temporary directory.
///
/// The directory (and database file) is removed when the value is dropped.
pub struct TestEnv {
    /// Temporary directory (kept alive for database file persistence)
    pub temp: TempDir,
    /// quiz.db connection with the full schema
    pub conn: Connection,
}

impl TestEnv {
    pub fn new() -> rusqlite::Result<Self> {
        let temp =
            TempDir::new().map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        let conn = Connection::open(temp.path().join("quiz.db"))?;
        crate::db::schema::run_migrations(&conn)?;

        Ok(Self { temp, conn })
    }

    /// Get the temporary directory path for creating test files.
    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    /// Path for a second, separately opened database in the same directory
    pub fn db_path(&self) -> PathBuf {
        self.path().join("pool.db")
    }
}
