/*!
 * Credential store: durable mapping from username to password hash.
 *
 * Passwords are stored as lowercase hex SHA-512 digests. Login checks
 * recompute the digest and look for an exact `(username, hash)` match, so
 * an unknown user and a wrong password look the same to the caller.
 */

use anyhow::Result;
use log::{debug, info};
use rusqlite::{params, ErrorCode, OptionalExtension};
use sha2::{Digest, Sha512};
use std::path::Path;

use super::connection::DatabaseConnection;
use super::models::UserRecord;
use super::schema::SchemaKind;
use crate::errors::StoreError;

/// Store for registered users
pub struct CredentialStore {
    /// Database connection
    db: DatabaseConnection,
}

impl CredentialStore {
    /// Create a store over an already-open connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Open the users database at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(DatabaseConnection::new(path, SchemaKind::Users)?))
    }

    /// Create a store with an in-memory database (for testing)
    pub fn new_in_memory() -> Result<Self> {
        Ok(Self::new(DatabaseConnection::new_in_memory(SchemaKind::Users)?))
    }

    /// Compute the hex SHA-512 digest of a password
    pub fn hash_password(password: &str) -> String {
        let mut hasher = Sha512::new();
        hasher.update(password.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Register a new user
    ///
    /// Fails with `StoreError::DuplicateUser` when the username is taken;
    /// the existing record is left as it was.
    pub fn register(&mut self, username: &str, password: &str) -> Result<(), StoreError> {
        let password_hash = Self::hash_password(password);

        let result = self.db.transaction(|tx| {
            tx.execute(
                "INSERT INTO users (username, password) VALUES (?1, ?2)",
                params![username, password_hash],
            )?;
            Ok(())
        });

        match result {
            Ok(()) => {
                info!("Registered user '{}'", username);
                Ok(())
            }
            Err(e) if is_constraint_violation(&e) => {
                debug!("Rejected duplicate registration for '{}'", username);
                Err(StoreError::DuplicateUser(username.to_string()))
            }
            Err(e) => Err(StoreError::Storage(e)),
        }
    }

    /// Check a credential pair
    pub fn authenticate(&self, username: &str, password: &str) -> Result<bool, StoreError> {
        let password_hash = Self::hash_password(password);

        let found = self.db.execute(|conn| {
            let row = conn
                .query_row(
                    "SELECT 1 FROM users WHERE username = ?1 AND password = ?2",
                    params![username, password_hash],
                    |_| Ok(()),
                )
                .optional()?;
            Ok(row.is_some())
        })?;

        Ok(found)
    }

    /// Look up a stored user record
    pub fn get_user(&self, username: &str) -> Result<Option<UserRecord>, StoreError> {
        let user = self.db.execute(|conn| {
            let user = conn
                .query_row(
                    "SELECT username, password FROM users WHERE username = ?1",
                    [username],
                    |row| {
                        Ok(UserRecord {
                            username: row.get(0)?,
                            password_hash: row.get(1)?,
                        })
                    },
                )
                .optional()?;
            Ok(user)
        })?;

        Ok(user)
    }

    /// Number of registered users
    pub fn user_count(&self) -> i64 {
        self.db.count_rows("users")
    }

    /// On-disk size of the users database
    pub fn file_size_bytes(&self) -> u64 {
        self.db.file_size_bytes()
    }

    /// Release the underlying database handle
    pub fn close(self) -> Result<()> {
        self.db.close()
    }
}

fn is_constraint_violation(error: &anyhow::Error) -> bool {
    matches!(
        error.downcast_ref::<rusqlite::Error>(),
        Some(rusqlite::Error::SqliteFailure(e, _)) if e.code == ErrorCode::ConstraintViolation
    )
}
