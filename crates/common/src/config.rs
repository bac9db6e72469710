//! Crate tunables loaded from TOML and environment variables
//!
//! Every section has defaults, so an empty file is a valid config.
//!
//! ```toml
//! [encryption]
//! key = "correct horse battery staple"
//! seed = "per-app-seed"
//!
//! [format]
//! decimals = 2
//! date_pattern = "%d/%m/%Y"
//!
//! [sync]
//! latch_timeout = "45s"
//! ```
//!
//! ## Environment Variables
//! - `CORNERSTONE_ENCRYPTION_KEY`: encryption key
//! - `CORNERSTONE_ENCRYPTION_SEED`: key derivation seed
//! - `CORNERSTONE_LATCH_TIMEOUT`: default latch timeout (`"30s"`, `"1500ms"`
//!   or bare milliseconds)
//! - `CORNERSTONE_FORMAT_DECIMALS`: decimal places for scaled numbers
//! - `CORNERSTONE_DATE_PATTERN`, `CORNERSTONE_TIME_PATTERN`,
//!   `CORNERSTONE_DATE_TIME_PATTERN`: `strftime` patterns

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

#[cfg(feature = "crypto")]
use crate::crypto::{EncryptionConfig, Encryptor};
use crate::error::{CommonError, CommonResult};
use crate::text::format::{FormatSettings, Formatter};
use crate::utils::duration_millis;

pub const ENV_ENCRYPTION_KEY: &str = "CORNERSTONE_ENCRYPTION_KEY";
pub const ENV_ENCRYPTION_SEED: &str = "CORNERSTONE_ENCRYPTION_SEED";
pub const ENV_LATCH_TIMEOUT: &str = "CORNERSTONE_LATCH_TIMEOUT";
pub const ENV_FORMAT_DECIMALS: &str = "CORNERSTONE_FORMAT_DECIMALS";
pub const ENV_DATE_PATTERN: &str = "CORNERSTONE_DATE_PATTERN";
pub const ENV_TIME_PATTERN: &str = "CORNERSTONE_TIME_PATTERN";
pub const ENV_DATE_TIME_PATTERN: &str = "CORNERSTONE_DATE_TIME_PATTERN";

const DEFAULT_LATCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Thread coordination settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncSettings {
    /// Used by callers that wait on a latch without their own timeout
    #[serde(with = "duration_millis")]
    pub latch_timeout: Duration,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self { latch_timeout: DEFAULT_LATCH_TIMEOUT }
    }
}

impl SyncSettings {
    pub fn validate(&self) -> CommonResult<()> {
        if self.latch_timeout.is_zero() {
            return Err(CommonError::config_field("sync.latch_timeout", "must be positive"));
        }
        Ok(())
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CommonConfig {
    /// Absent unless the application encrypts anything
    #[cfg(feature = "crypto")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encryption: Option<EncryptionConfig>,
    pub format: FormatSettings,
    pub sync: SyncSettings,
}

impl CommonConfig {
    /// Parse and validate a TOML document
    ///
    /// # Errors
    /// Returns `CommonError::Serialization` for malformed TOML and
    /// `CommonError::Config` for values that fail validation.
    pub fn from_toml_str(text: &str) -> CommonResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    ///
    /// # Errors
    /// Returns `CommonError::Io` if the file cannot be read, otherwise as
    /// [`from_toml_str`](Self::from_toml_str).
    pub fn load(path: impl AsRef<Path>) -> CommonResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            CommonError::io_op("read config", format!("{}: {e}", path.display()))
        })?;
        let config = Self::from_toml_str(&text)?;
        info!(path = %path.display(), "Configuration loaded from file");
        Ok(config)
    }

    /// Apply `CORNERSTONE_*` environment variables on top of this config
    ///
    /// # Errors
    /// Returns `CommonError::Config` when a variable holds an unparseable
    /// value or the result fails validation.
    pub fn with_env_overrides(self) -> CommonResult<Self> {
        self.with_overrides_from(|name| std::env::var(name).ok())
    }

    /// Same as [`with_env_overrides`](Self::with_env_overrides) with a
    /// custom variable source
    pub fn with_overrides_from<F>(mut self, lookup: F) -> CommonResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        #[cfg(feature = "crypto")]
        {
            let key = lookup(ENV_ENCRYPTION_KEY);
            let seed = lookup(ENV_ENCRYPTION_SEED);
            if key.is_some() || seed.is_some() {
                let encryption = self.encryption.get_or_insert_with(EncryptionConfig::default);
                if let Some(key) = key {
                    encryption.key = key;
                }
                if let Some(seed) = seed {
                    encryption.seed = seed;
                }
                tracing::debug!("Encryption settings overridden from environment");
            }
        }

        if let Some(value) = lookup(ENV_LATCH_TIMEOUT) {
            self.sync.latch_timeout = parse_timeout(&value).ok_or_else(|| {
                CommonError::config_field(
                    "sync.latch_timeout",
                    format!("invalid {ENV_LATCH_TIMEOUT} value '{value}'"),
                )
            })?;
        }
        if let Some(value) = lookup(ENV_FORMAT_DECIMALS) {
            self.format.decimals = value.trim().parse().map_err(|e| {
                CommonError::config_field(
                    "format.decimals",
                    format!("invalid {ENV_FORMAT_DECIMALS} value '{value}': {e}"),
                )
            })?;
        }
        for (name, target) in [
            (ENV_DATE_PATTERN, &mut self.format.date_pattern),
            (ENV_TIME_PATTERN, &mut self.format.time_pattern),
            (ENV_DATE_TIME_PATTERN, &mut self.format.date_time_pattern),
        ] {
            if let Some(value) = lookup(name) {
                *target = value;
            }
        }

        self.validate()?;
        Ok(self)
    }

    /// Check every section
    pub fn validate(&self) -> CommonResult<()> {
        #[cfg(feature = "crypto")]
        if let Some(encryption) = &self.encryption {
            encryption.validate()?;
        }
        self.format.validate()?;
        self.sync.validate()
    }

    pub fn to_toml_string(&self) -> CommonResult<String> {
        Ok(toml::to_string(self)?)
    }

    /// Encryptor for the `[encryption]` section
    ///
    /// # Errors
    /// Returns `CommonError::Config` when the section is missing or invalid.
    #[cfg(feature = "crypto")]
    pub fn encryptor(&self) -> CommonResult<Encryptor> {
        let encryption = self
            .encryption
            .as_ref()
            .ok_or_else(|| CommonError::config_field("encryption", "section is missing"))?;
        Encryptor::new(encryption)
    }

    pub fn formatter(&self) -> CommonResult<Formatter> {
        Formatter::new(self.format.clone())
    }
}

/// Bare digits are milliseconds; anything else goes through the duration parser.
fn parse_timeout(value: &str) -> Option<Duration> {
    let value = value.trim();
    match value.parse::<u64>() {
        Ok(millis) => Some(Duration::from_millis(millis)),
        Err(_) => crate::time::parse_duration(value).ok(),
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for config.
    use std::collections::HashMap;

    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = CommonConfig::from_toml_str("").unwrap();
        assert_eq!(config.sync.latch_timeout, Duration::from_secs(30));
        assert_eq!(config.format, FormatSettings::default());
        #[cfg(feature = "crypto")]
        assert!(config.encryption.is_none());
    }

    #[test]
    fn test_sections_parse() {
        let config = CommonConfig::from_toml_str(
            r#"
            [format]
            decimals = 2
            date_pattern = "%d/%m/%Y"

            [sync]
            latch_timeout = "1m 30s"
            "#,
        )
        .unwrap();
        assert_eq!(config.format.decimals, 2);
        assert_eq!(config.format.date_pattern, "%d/%m/%Y");
        assert_eq!(config.format.time_pattern, "%H:%M:%S");
        assert_eq!(config.sync.latch_timeout, Duration::from_secs(90));
    }

    #[test]
    fn test_zero_latch_timeout_rejected() {
        let err = CommonConfig::from_toml_str("[sync]\nlatch_timeout = 0\n").unwrap_err();
        assert!(err.to_string().contains("sync.latch_timeout"));
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let err = CommonConfig::from_toml_str("[format]\ndate_pattern = \"%Q\"\n").unwrap_err();
        assert!(err.to_string().contains("format.date_pattern"));
    }

    #[test]
    fn test_malformed_toml_rejected() {
        assert!(CommonConfig::from_toml_str("[sync\n").is_err());
    }

    #[test]
    fn test_overrides_apply() {
        let config = CommonConfig::default()
            .with_overrides_from(vars(&[
                (ENV_LATCH_TIMEOUT, "1500"),
                (ENV_FORMAT_DECIMALS, "3"),
                (ENV_TIME_PATTERN, "%H:%M"),
            ]))
            .unwrap();
        assert_eq!(config.sync.latch_timeout, Duration::from_millis(1500));
        assert_eq!(config.format.decimals, 3);
        assert_eq!(config.format.time_pattern, "%H:%M");
    }

    #[test]
    fn test_override_accepts_duration_text() {
        let config = CommonConfig::default()
            .with_overrides_from(vars(&[(ENV_LATCH_TIMEOUT, "2s")]))
            .unwrap();
        assert_eq!(config.sync.latch_timeout, Duration::from_secs(2));
    }

    #[test]
    fn test_bad_override_rejected() {
        let err = CommonConfig::default()
            .with_overrides_from(vars(&[(ENV_FORMAT_DECIMALS, "many")]))
            .unwrap_err();
        assert!(err.to_string().contains("format.decimals"));

        let err = CommonConfig::default()
            .with_overrides_from(vars(&[(ENV_LATCH_TIMEOUT, "soon")]))
            .unwrap_err();
        assert!(err.to_string().contains("sync.latch_timeout"));
    }

    #[test]
    fn test_no_overrides_is_identity() {
        let config = CommonConfig::default().with_overrides_from(vars(&[])).unwrap();
        assert_eq!(config.sync, SyncSettings::default());
        #[cfg(feature = "crypto")]
        assert!(config.encryption.is_none());
    }

    #[cfg(feature = "crypto")]
    #[test]
    fn test_encryption_overrides_create_section() {
        let config = CommonConfig::default()
            .with_overrides_from(vars(&[
                (ENV_ENCRYPTION_KEY, "from-env"),
                (ENV_ENCRYPTION_SEED, "env-seed-value"),
            ]))
            .unwrap();
        let encryption = config.encryption.as_ref().unwrap();
        assert_eq!(encryption.key, "from-env");
        assert_eq!(encryption.seed, "env-seed-value");
    }

    #[cfg(feature = "crypto")]
    #[test]
    fn test_partial_encryption_override_validated() {
        let err = CommonConfig::default()
            .with_overrides_from(vars(&[(ENV_ENCRYPTION_KEY, "only-key")]))
            .unwrap_err();
        assert!(err.to_string().contains("encryption.seed"));
    }

    #[cfg(feature = "crypto")]
    #[test]
    fn test_encryptor_requires_section() {
        assert!(CommonConfig::default().encryptor().is_err());
    }

    #[test]
    fn test_toml_round_trip_keeps_timeout() {
        let mut config = CommonConfig::default();
        config.sync.latch_timeout = Duration::from_millis(2500);
        let text = config.to_toml_string().unwrap();
        assert!(text.contains("latch_timeout = 2500"));
        let parsed = CommonConfig::from_toml_str(&text).unwrap();
        assert_eq!(parsed.sync.latch_timeout, Duration::from_millis(2500));
    }

    #[test]
    fn test_formatter_uses_settings() {
        let mut config = CommonConfig::default();
        config.format.decimals = 2;
        assert_eq!(config.formatter().unwrap().format_number(1_234_567), "1.23M");
    }
}
