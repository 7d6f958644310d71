/*!
 * Error types for the translog application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to a translation provider
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// The provider did not answer in time
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
}

impl ProviderError {
    /// Whether sending the same request again may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::ConnectionError(_) | Self::RateLimitExceeded(_) | Self::Timeout(_) => true,
            Self::ApiError { status_code, .. } => *status_code >= 500,
            Self::RequestFailed(_) | Self::ParseError(_) => false,
        }
    }
}

/// Errors raised by the credential store and history ledger
#[derive(Error, Debug)]
pub enum StoreError {
    /// A user with this name is already registered
    #[error("User '{0}' already exists")]
    DuplicateUser(String),

    /// The underlying database failed
    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

/// Errors surfaced to the operator by the session loop
#[derive(Error, Debug)]
pub enum AppError {
    /// Registration rejected because the username is taken
    #[error("User '{0}' already exists")]
    DuplicateUser(String),

    /// Login rejected. Deliberately says nothing about which half was wrong.
    #[error("Invalid username or password")]
    AuthFailure,

    /// Command requires a logged-in user
    #[error("You must be logged in to do that")]
    Unauthorized,

    /// Error from the translation provider
    #[error("Translation failed: {0}")]
    Provider(#[from] ProviderError),

    /// Error from the durable stores
    #[error("Storage error: {0}")]
    Storage(anyhow::Error),

    /// Terminal read or write failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<StoreError> for AppError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::DuplicateUser(username) => Self::DuplicateUser(username),
            StoreError::Storage(e) => Self::Storage(e),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Storage(error)
    }
}
