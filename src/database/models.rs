/*!
 * Database entity models.
 *
 * These structures map directly to database tables and provide
 * type-safe access to persisted data.
 */

use serde::{Deserialize, Serialize};
use std::fmt;

/// Registered user record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Unique username (primary key)
    pub username: String,
    /// Hex SHA-512 digest of the password
    pub password_hash: String,
}

/// Stored translation exchange
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationRecord {
    /// Auto-assigned, increasing identifier
    pub translation_id: i64,
    /// Username of the owner
    pub user_id: String,
    /// Text entered by the user
    pub input_text: String,
    /// Text returned by the provider
    pub translated_text: String,
    /// Source language code, as entered
    pub input_lang: String,
    /// Destination language code, as entered
    pub output_lang: String,
}

impl fmt::Display for TranslationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {}, Input: {}, Translated: {}, From: {}, To: {}",
            self.translation_id, self.input_text, self.translated_text, self.input_lang, self.output_lang
        )
    }
}

/// A translation waiting to be appended to the ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTranslation {
    pub user_id: String,
    pub input_text: String,
    pub translated_text: String,
    pub input_lang: String,
    pub output_lang: String,
}

impl NewTranslation {
    /// Create a new translation entry
    pub fn new(
        user_id: impl Into<String>,
        input_text: impl Into<String>,
        translated_text: impl Into<String>,
        input_lang: impl Into<String>,
        output_lang: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            input_text: input_text.into(),
            translated_text: translated_text.into(),
            input_lang: input_lang.into(),
            output_lang: output_lang.into(),
        }
    }

    /// Attach the identifier assigned by the database
    pub fn into_record(self, translation_id: i64) -> TranslationRecord {
        TranslationRecord {
            translation_id,
            user_id: self.user_id,
            input_text: self.input_text,
            translated_text: self.translated_text,
            input_lang: self.input_lang,
            output_lang: self.output_lang,
        }
    }
}
