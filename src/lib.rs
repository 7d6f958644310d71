/*!
 * # translog - interactive translator with per-user history
 *
 * A Rust library behind a small terminal application: operators register,
 * log in, translate text through an external provider and review their
 * own translation history.
 *
 * ## Features
 *
 * - Username/password accounts with SHA-512 password hashes
 * - Translation through Google Translate, with timeout and retries
 * - Durable per-user translation history in SQLite
 * - Catalog of supported language codes with display names
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `app_controller`: Session loop and menu dispatch
 * - `database`: SQLite persistence:
 *   - `database::credential_store`: Registered users
 *   - `database::history_ledger`: Translation history
 * - `session`: Session state machine and console I/O
 * - `translation_service`: Provider wrapper with timeout and retry policy
 * - `providers`: Translation provider clients:
 *   - `providers::google`: Google Translate client
 *   - `providers::mock`: Scriptable provider for tests
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod database;
pub mod errors;
pub mod language_utils;
pub mod providers;
pub mod session;
pub mod translation_service;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use errors::{AppError, ProviderError, StoreError};
pub use language_utils::{get_language_name, supported_languages};
pub use translation_service::{RetryPolicy, TranslationService};
