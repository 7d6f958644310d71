/*!
 * Tests for application configuration functionality
 */

use std::path::PathBuf;

use translog::app_config::{Config, LogLevel, ProviderConfig, ProviderKind};

use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.storage.users_db_path, PathBuf::from("users.db"));
    assert_eq!(config.storage.translations_db_path, PathBuf::from("translations.db"));
    assert_eq!(config.provider.provider_type, ProviderKind::Google);
    assert_eq!(config.provider.endpoint, "https://translate.googleapis.com");
    assert_eq!(config.provider.timeout_secs, 10);
    assert_eq!(config.provider.retry_count, 2);
    assert_eq!(config.provider.retry_backoff_ms, 500);
    assert_eq!(config.log_level, LogLevel::Warn);
    assert!(config.validate().is_ok());
}

#[test]
fn test_fromFile_withPartialJson_shouldFillDefaults() {
    let dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(
        dir.path(),
        "conf.json",
        r#"{
            "storage": { "users_db_path": "/var/lib/translog/users.db" },
            "provider": { "type": "mock", "retry_count": 0 },
            "log_level": "debug"
        }"#,
    )
    .unwrap();

    let config = Config::from_file(&path).unwrap();

    assert_eq!(config.storage.users_db_path, PathBuf::from("/var/lib/translog/users.db"));
    assert_eq!(config.storage.translations_db_path, PathBuf::from("translations.db"));
    assert_eq!(config.provider.provider_type, ProviderKind::Mock);
    assert_eq!(config.provider.retry_count, 0);
    assert_eq!(config.provider.timeout_secs, 10);
    assert_eq!(config.log_level, LogLevel::Debug);
}

#[test]
fn test_fromFile_withEmptyObject_shouldEqualDefaults() {
    let dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(dir.path(), "conf.json", "{}").unwrap();

    let config = Config::from_file(&path).unwrap();

    assert_eq!(config.storage, Config::default().storage);
    assert_eq!(config.provider, ProviderConfig::default());
}

#[test]
fn test_fromFile_withMalformedJson_shouldFail() {
    let dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(dir.path(), "conf.json", "{ not json").unwrap();

    let error = Config::from_file(&path).unwrap_err();

    assert!(error.to_string().contains("Failed to parse config file"));
}

#[test]
fn test_fromFile_withUnknownProvider_shouldFail() {
    let dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(dir.path(), "conf.json", r#"{"provider": {"type": "deepl"}}"#).unwrap();

    assert!(Config::from_file(&path).is_err());
}

#[test]
fn test_fromFile_withMissingFile_shouldFail() {
    let dir = common::create_temp_dir().unwrap();
    assert!(Config::from_file(dir.path().join("absent.json")).is_err());
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    config.storage.users_db_path = PathBuf::new();
    assert!(config.validate().is_err());
    config.storage.users_db_path = PathBuf::from("users.db");

    config.storage.translations_db_path = PathBuf::new();
    assert!(config.validate().is_err());
    config.storage.translations_db_path = PathBuf::from("translations.db");

    config.provider.timeout_secs = 0;
    assert!(config.validate().is_err());
    config.provider.timeout_secs = 10;

    config.provider.endpoint = "not a url".to_string();
    assert!(config.validate().is_err());

    config.provider.endpoint = "ftp://translate.example.com".to_string();
    assert!(config.validate().is_err());

    // The mock provider never touches the endpoint
    config.provider.provider_type = ProviderKind::Mock;
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_serialization_shouldUseTypeKey() {
    let json = serde_json::to_value(Config::default()).unwrap();

    assert_eq!(json["provider"]["type"], "google");
    assert_eq!(json["log_level"], "warn");
}
