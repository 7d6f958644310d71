use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

// Application configuration module
// This module handles loading and validating configuration settings.
// Every field has a default, so a missing or partial file is fine.

/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Database locations
    #[serde(default)]
    pub storage: StorageConfig,

    /// Translation provider settings
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation provider type
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    // @provider: Google Translate web endpoint
    #[default]
    Google,
    // @provider: Offline echo provider
    Mock,
}

impl ProviderKind {
    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Google => "google".to_string(),
            Self::Mock => "mock".to_string(),
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "google" => Ok(Self::Google),
            "mock" => Ok(Self::Mock),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Where the two stores live
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StorageConfig {
    /// Users database file
    #[serde(default = "default_users_db_path")]
    pub users_db_path: PathBuf,

    /// Translation history database file
    #[serde(default = "default_translations_db_path")]
    pub translations_db_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            users_db_path: default_users_db_path(),
            translations_db_path: default_translations_db_path(),
        }
    }
}

/// Provider configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ProviderConfig {
    // @field: Provider type identifier
    #[serde(rename = "type", default)]
    pub provider_type: ProviderKind,

    // @field: Service URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    // @field: Timeout seconds per attempt
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    // @field: Extra attempts for transient failures
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,

    // @field: Base backoff in milliseconds, doubled on each retry
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider_type: ProviderKind::default(),
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            retry_count: default_retry_count(),
            retry_backoff_ms: default_retry_backoff_ms(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

fn default_users_db_path() -> PathBuf {
    PathBuf::from("users.db")
}

fn default_translations_db_path() -> PathBuf {
    PathBuf::from("translations.db")
}

fn default_endpoint() -> String {
    "https://translate.googleapis.com".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_retry_count() -> u32 {
    2
}

fn default_retry_backoff_ms() -> u64 {
    500 // doubled on each retry
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {:?}", path))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.storage.users_db_path.as_os_str().is_empty() {
            return Err(anyhow!("Users database path must not be empty"));
        }
        if self.storage.translations_db_path.as_os_str().is_empty() {
            return Err(anyhow!("Translations database path must not be empty"));
        }

        if self.provider.timeout_secs == 0 {
            return Err(anyhow!("Provider timeout must be at least one second"));
        }

        if self.provider.provider_type == ProviderKind::Google {
            let endpoint = url::Url::parse(&self.provider.endpoint)
                .with_context(|| format!("Invalid provider endpoint: {}", self.provider.endpoint))?;
            if !matches!(endpoint.scheme(), "http" | "https") {
                return Err(anyhow!(
                    "Provider endpoint must use http or https: {}",
                    self.provider.endpoint
                ));
            }
        }

        Ok(())
    }
}
