/*!
 * Database connection management.
 *
 * This module handles SQLite database connection creation and schema
 * initialization. Each store owns exactly one connection; the connection
 * is closed explicitly through `close` or implicitly when dropped.
 */

use anyhow::{Context, Result};
use log::{debug, info};
use rusqlite::Connection;
use std::path::{Path, PathBuf};

use super::schema::SchemaKind;

/// Path label used for in-memory databases
const IN_MEMORY_PATH: &str = ":memory:";

/// Database connection wrapper owning a single SQLite handle
pub struct DatabaseConnection {
    /// Path to the database file
    db_path: PathBuf,
    /// Open connection
    connection: Connection,
}

impl DatabaseConnection {
    /// Open (or create) the database at the specified path and initialize
    /// the schema for the given store kind
    pub fn new<P: AsRef<Path>>(db_path: P, kind: SchemaKind) -> Result<Self> {
        let db_path = db_path.as_ref().to_path_buf();

        // Ensure parent directory exists
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create database directory: {:?}", parent))?;
            }
        }

        info!("Opening {} database at: {:?}", kind, db_path);

        let conn = Connection::open(&db_path)
            .with_context(|| format!("Failed to open database: {:?}", db_path))?;

        kind.initialize(&conn)?;

        Ok(Self {
            db_path,
            connection: conn,
        })
    }

    /// Create an in-memory database (for testing)
    pub fn new_in_memory(kind: SchemaKind) -> Result<Self> {
        debug!("Creating in-memory {} database", kind);

        let conn = Connection::open_in_memory().context("Failed to create in-memory database")?;

        kind.initialize(&conn)?;

        Ok(Self {
            db_path: PathBuf::from(IN_MEMORY_PATH),
            connection: conn,
        })
    }

    /// Get the database file path
    pub fn path(&self) -> &Path {
        &self.db_path
    }

    /// Execute a database operation with the connection
    pub fn execute<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        f(&self.connection)
    }

    /// Begin a transaction and execute operations within it
    ///
    /// The transaction is rolled back if the closure fails, so nothing
    /// already committed is touched by a failed write.
    pub fn transaction<F, T>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&rusqlite::Transaction) -> Result<T>,
    {
        let tx = self.connection.transaction()?;
        let result = f(&tx)?;
        tx.commit()?;

        Ok(result)
    }

    /// Count rows of a table, treating a missing table as empty
    pub fn count_rows(&self, table: &str) -> i64 {
        self.connection
            .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| row.get(0))
            .unwrap_or(0)
    }

    /// Get the on-disk size of the database, zero for in-memory databases
    pub fn file_size_bytes(&self) -> u64 {
        if self.db_path.to_string_lossy() == IN_MEMORY_PATH {
            return 0;
        }
        std::fs::metadata(&self.db_path).map(|m| m.len()).unwrap_or(0)
    }

    /// Close the connection, reporting any error SQLite raises on close
    pub fn close(self) -> Result<()> {
        let path = self.db_path;
        self.connection
            .close()
            .map_err(|(_, e)| e)
            .with_context(|| format!("Failed to close database: {:?}", path))?;
        debug!("Closed database at: {:?}", path);
        Ok(())
    }
}

/// Storage statistics reported at startup
#[derive(Debug, Clone, Default)]
pub struct DatabaseStats {
    /// Number of registered users
    pub user_count: i64,
    /// Number of stored translations
    pub translation_count: i64,
    /// Combined size of both database files in bytes
    pub file_size_bytes: u64,
}

impl std::fmt::Display for DatabaseStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Users: {}, Translations: {}, Size: {} KB",
            self.user_count,
            self.translation_count,
            self.file_size_bytes / 1024
        )
    }
}
