/*!
 * Database schema definitions and migrations.
 *
 * Credentials and translation history live in two separate database files.
 * Each file carries its own `schema_version` table so the two can evolve
 * independently.
 */

use anyhow::{Context, Result};
use log::{debug, info};
use rusqlite::Connection;
use std::fmt;

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// Which store a database file holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaKind {
    /// `users` table: username and password hash
    Users,
    /// `translations` table: per-user translation history
    Translations,
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaKind::Users => write!(f, "users"),
            SchemaKind::Translations => write!(f, "translations"),
        }
    }
}

impl SchemaKind {
    /// Initialize the schema for this store kind
    pub fn initialize(self, conn: &Connection) -> Result<()> {
        if self == SchemaKind::Translations {
            // users(username) is in another file; SQLite may default this on
            conn.pragma_update(None, "foreign_keys", false)
                .context("Failed to disable foreign key enforcement")?;
        }

        let current_version = get_schema_version(conn)?;

        if current_version == 0 {
            info!("Initializing {} schema v{}", self, SCHEMA_VERSION);
            create_version_table(conn)?;
            match self {
                SchemaKind::Users => create_users_table(conn)?,
                SchemaKind::Translations => create_translations_table(conn)?,
            }
            set_schema_version(conn, SCHEMA_VERSION)?;
        } else {
            debug!("{} schema is up to date (v{})", self, current_version);
        }

        Ok(())
    }
}

/// Get the current schema version from the database
fn get_schema_version(conn: &Connection) -> Result<i32> {
    let table_exists: bool = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='schema_version'",
            [],
            |row| row.get(0),
        )
        .context("Failed to check schema_version table existence")?;

    if !table_exists {
        return Ok(0);
    }

    let version: i32 = conn
        .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
            row.get(0)
        })
        .unwrap_or(0);

    Ok(version)
}

/// Set the schema version in the database
fn set_schema_version(conn: &Connection, version: i32) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO schema_version (id, version, updated_at) VALUES (1, ?1, datetime('now'))",
        [version],
    )?;
    Ok(())
}

fn create_version_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            version INTEGER NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn create_users_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            username TEXT PRIMARY KEY,
            password TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

// The users table lives in another file, so the reference below is
// documentation only. `initialize` turns foreign_keys off for this kind.
fn create_translations_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS translations (
            user_id TEXT,
            input_text TEXT,
            translated_text TEXT,
            input_lang TEXT,
            output_lang TEXT,
            translation_id INTEGER PRIMARY KEY AUTOINCREMENT,
            FOREIGN KEY(user_id) REFERENCES users(username)
        );

        CREATE INDEX IF NOT EXISTS idx_translations_user ON translations(user_id);
        "#,
    )?;
    Ok(())
}
