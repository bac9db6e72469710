//! Integration tests for configuration loading
//!
//! Requires the `crypto` feature for the `[encryption]` section.

#![cfg(feature = "crypto")]

use std::fs;
use std::time::Duration;

use cornerstone_common::config::{CommonConfig, ENV_ENCRYPTION_SEED, ENV_LATCH_TIMEOUT};
use cornerstone_common::CommonError;
use tempfile::TempDir;

const CONFIG: &str = r#"
[encryption]
key = "integration key"
seed = "integration-seed"

[format]
decimals = 2
date_pattern = "%d/%m/%Y"

[sync]
latch_timeout = "45s"
"#;

/// Validates loading a complete config file and using every section.
///
/// # Test Steps
/// 1. Write a TOML file into a temporary directory
/// 2. Load it and check each section
/// 3. Build the encryptor and formatter it describes
#[test]
fn test_load_file_and_use_sections() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("cornerstone.toml");
    fs::write(&path, CONFIG)?;

    let config = CommonConfig::load(&path)?;
    assert_eq!(config.sync.latch_timeout, Duration::from_secs(45));
    assert_eq!(config.format.decimals, 2);

    let encryptor = config.encryptor()?;
    let token = encryptor.encrypt_str("payload")?;
    assert_eq!(encryptor.decrypt_str(&token)?, "payload");

    assert_eq!(config.formatter()?.format_number(1_234_567), "1.23M");
    Ok(())
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = CommonConfig::load(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, CommonError::Io { .. }));
}

#[test]
fn test_invalid_file_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(&path, "[encryption]\nkey = \"k\"\nseed = \"tiny\"\n").unwrap();
    let err = CommonConfig::load(&path).unwrap_err();
    assert!(matches!(err, CommonError::Config { field: Some(ref f), .. } if f == "encryption.seed"));
}

#[test]
fn test_overrides_layer_on_file() {
    let config = CommonConfig::from_toml_str(CONFIG)
        .unwrap()
        .with_overrides_from(|name| match name {
            n if n == ENV_LATCH_TIMEOUT => Some("5s".to_string()),
            n if n == ENV_ENCRYPTION_SEED => Some("rotated-seed".to_string()),
            _ => None,
        })
        .unwrap();
    assert_eq!(config.sync.latch_timeout, Duration::from_secs(5));
    let encryption = config.encryption.as_ref().unwrap();
    assert_eq!(encryption.key, "integration key");
    assert_eq!(encryption.seed, "rotated-seed");
}

#[test]
fn test_saved_config_reloads() {
    let config = CommonConfig::from_toml_str(CONFIG).unwrap();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("saved.toml");
    fs::write(&path, config.to_toml_string().unwrap()).unwrap();

    let reloaded = CommonConfig::load(&path).unwrap();
    assert_eq!(reloaded.sync, config.sync);
    assert_eq!(reloaded.format, config.format);
    assert_eq!(reloaded.encryption, config.encryption);
}
