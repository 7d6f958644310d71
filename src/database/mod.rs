/*!
 * Database module for persistent storage of users and translation history.
 *
 * This module provides SQLite-based persistence for:
 * - Registered users and their password hashes
 * - The per-user translation history ledger
 */

pub mod schema;
pub mod connection;
pub mod models;
pub mod credential_store;
pub mod history_ledger;

// Re-export main types
pub use connection::{DatabaseConnection, DatabaseStats};
pub use credential_store::CredentialStore;
pub use history_ledger::HistoryLedger;
pub use models::{NewTranslation, TranslationRecord, UserRecord};
