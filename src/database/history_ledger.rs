/*!
 * History ledger: append-only log of translations per user.
 */

use anyhow::Result;
use log::debug;
use rusqlite::params;
use std::path::Path;

use super::connection::DatabaseConnection;
use super::models::{NewTranslation, TranslationRecord};
use super::schema::SchemaKind;

/// Append-only store of translation exchanges
pub struct HistoryLedger {
    /// Database connection
    db: DatabaseConnection,
}

impl HistoryLedger {
    /// Create a ledger over an already-open connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Open the translations database at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(DatabaseConnection::new(path, SchemaKind::Translations)?))
    }

    /// Create a ledger with an in-memory database (for testing)
    pub fn new_in_memory() -> Result<Self> {
        Ok(Self::new(DatabaseConnection::new_in_memory(SchemaKind::Translations)?))
    }

    /// Append a translation and return its assigned identifier
    pub fn append(&mut self, entry: &NewTranslation) -> Result<i64> {
        let translation_id = self.db.transaction(|tx| {
            tx.execute(
                r#"
                INSERT INTO translations (user_id, input_text, translated_text, input_lang, output_lang)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
                params![
                    entry.user_id,
                    entry.input_text,
                    entry.translated_text,
                    entry.input_lang,
                    entry.output_lang,
                ],
            )?;
            Ok(tx.last_insert_rowid())
        })?;

        debug!(
            "Recorded translation #{} for '{}' ({} -> {})",
            translation_id, entry.user_id, entry.input_lang, entry.output_lang
        );
        Ok(translation_id)
    }

    /// List every translation of a user in insertion order
    pub fn list_for_user(&self, user_id: &str) -> Result<Vec<TranslationRecord>> {
        self.db.execute(|conn| {
            let mut stmt = conn.prepare(
                r#"
                SELECT translation_id, user_id, input_text, translated_text, input_lang, output_lang
                FROM translations
                WHERE user_id = ?1
                ORDER BY translation_id
                "#,
            )?;

            let rows = stmt.query_map([user_id], |row| {
                Ok(TranslationRecord {
                    translation_id: row.get(0)?,
                    user_id: row.get(1)?,
                    input_text: row.get(2)?,
                    translated_text: row.get(3)?,
                    input_lang: row.get(4)?,
                    output_lang: row.get(5)?,
                })
            })?;

            let records = rows.collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(records)
        })
    }

    /// Number of translations stored for a user
    pub fn count_for_user(&self, user_id: &str) -> Result<i64> {
        self.db.execute(|conn| {
            let count = conn.query_row(
                "SELECT COUNT(*) FROM translations WHERE user_id = ?1",
                [user_id],
                |row| row.get(0),
            )?;
            Ok(count)
        })
    }

    /// Number of translations across all users
    pub fn total_count(&self) -> i64 {
        self.db.count_rows("translations")
    }

    /// On-disk size of the translations database
    pub fn file_size_bytes(&self) -> u64 {
        self.db.file_size_bytes()
    }

    /// Release the underlying database handle
    pub fn close(self) -> Result<()> {
        self.db.close()
    }
}
