//! # Configuration Management
//!
//! Centralized configuration for token signing.
//!
//! The engine itself has three knobs: the namespace tag, the long-term secret
//! and the payload format. This module loads them, together with logging
//! settings for the command-line tool, from TOML or the environment.
//!
//! ## Configuration Sources
//! - TOML files via `from_file()`
//! - Direct instantiation with defaults
//! - Environment overrides (`MILLER_TAG`, `MILLER_SECRET`, `MILLER_FORMAT`, `MILLER_LOG_LEVEL`)
//!
//! ## Example
//! ```toml
//! [signer]
//! tag = "password-reset"
//! secret = "q0mSd8Q2y6yD3m4kQ0f0M6a2b7u9hQp0c1v5x8z3n4s"
//! format = "json"
//!
//! [logging]
//! app_name = "miller"
//! log_level = "info"
//! log_to_console = true
//! log_to_file = false
//! json_format = false
//! ```
//!
//! ## Security Considerations
//! - Secrets are stored as unpadded URL-safe base64 and never printed by `Debug`
//! - Secrets shorter than 32 bytes are accepted but flagged during validation

use crate::core::key::{generate_key, SecretKey, KEY_SIZE};
use crate::core::serialization::SerializationFormat;
use crate::error::{constants, Result, TokenError};
use crate::signer::DEFAULT_TAG;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::Level;

/// Maximum namespace tag length in bytes
pub const MAX_TAG_LEN: usize = 256;

/// Prefix for validation entries that flag risky but usable settings
pub const WARNING_PREFIX: &str = "WARNING:";

/// Main configuration structure that contains all configurable settings
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct MillerConfig {
    /// Token signing configuration
    #[serde(default)]
    pub signer: SignerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl MillerConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)
            .map_err(|e| TokenError::Config(format!("Failed to open config file: {e}")))?;

        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|e| TokenError::Config(format!("Failed to read config file: {e}")))?;

        Self::from_toml(&contents)
    }

    /// Load configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str::<Self>(content)
            .map_err(|e| TokenError::Config(format!("Failed to parse TOML: {e}")))
    }

    /// Load configuration from environment variables on top of the defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Override fields with any `MILLER_*` environment variables that are set
    pub fn apply_env(&mut self) -> Result<()> {
        if let Ok(tag) = std::env::var("MILLER_TAG") {
            self.signer.tag = tag;
        }

        if let Ok(secret) = std::env::var("MILLER_SECRET") {
            self.signer.secret = Some(secret);
        }

        if let Ok(format) = std::env::var("MILLER_FORMAT") {
            self.signer.format = format.parse()?;
        }

        if let Ok(level) = std::env::var("MILLER_LOG_LEVEL") {
            self.logging.log_level = level
                .parse::<Level>()
                .map_err(|_| TokenError::Config(format!("Invalid log level: {level}")))?;
        }

        Ok(())
    }

    /// Load the file (if any), then the environment, then explicit overrides.
    ///
    /// Later sources win: overrides > environment > file > defaults.
    pub fn load_layered(path: Option<&Path>, overrides: &SignerOverrides) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env()?;
        config.apply_overrides(overrides);
        Ok(config)
    }

    /// Replace signer fields with any overrides that are set
    pub fn apply_overrides(&mut self, overrides: &SignerOverrides) {
        if let Some(tag) = &overrides.tag {
            self.signer.tag = tag.clone();
        }
        if let Some(secret) = &overrides.secret {
            self.signer.secret = Some(secret.clone());
        }
        if let Some(format) = overrides.format {
            self.signer.format = format;
        }
    }

    /// Apply overrides to the default configuration
    pub fn default_with_overrides<F>(mutator: F) -> Self
    where
        F: FnOnce(&mut Self),
    {
        let mut config = Self::default();
        mutator(&mut config);
        config
    }

    /// Generate example configuration file content with a freshly generated secret
    pub fn example_config() -> String {
        let config = Self::default_with_overrides(|c| {
            c.signer.secret = Some(generate_key().to_encoded());
        });
        toml::to_string_pretty(&config)
            .unwrap_or_else(|_| String::from("# Failed to generate example config"))
    }

    /// Save configuration to a file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| TokenError::Config(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content)
            .map_err(|e| TokenError::Config(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Validate the configuration for common issues and misconfigurations
    ///
    /// Returns a list of validation errors. Empty list means configuration is valid.
    /// Entries starting with [`WARNING_PREFIX`] do not prevent use.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        errors.extend(self.signer.validate());
        errors.extend(self.logging.validate());
        errors
    }

    /// Validate and return Result, ignoring warnings
    pub fn validate_strict(&self) -> Result<()> {
        let errors: Vec<String> = self
            .validate()
            .into_iter()
            .filter(|e| !e.starts_with(WARNING_PREFIX))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(TokenError::Config(format!(
                "Configuration validation failed:\n  - {}",
                errors.join("\n  - ")
            )))
        }
    }
}

/// Token signing configuration
#[derive(Clone, Deserialize, Serialize)]
pub struct SignerConfig {
    /// Namespace tag used for key derivation
    pub tag: String,

    /// Long-term secret, unpadded URL-safe base64
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,

    /// Payload serialization format
    #[serde(default)]
    pub format: SerializationFormat,
}

impl Default for SignerConfig {
    fn default() -> Self {
        Self {
            tag: String::from(DEFAULT_TAG),
            secret: None,
            format: SerializationFormat::default(),
        }
    }
}

impl fmt::Debug for SignerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignerConfig")
            .field("tag", &self.tag)
            .field("secret", &self.secret.as_ref().map(|_| "[REDACTED]"))
            .field("format", &self.format)
            .finish()
    }
}

impl SignerConfig {
    /// Decode the configured secret
    pub fn secret_key(&self) -> Result<SecretKey> {
        match self.secret.as_deref() {
            Some(text) => SecretKey::from_encoded(text),
            None => Err(TokenError::Config(constants::ERR_MISSING_SECRET.to_string())),
        }
    }

    /// Validate signer configuration
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        // Validate tag
        if self.tag.is_empty() {
            errors.push(constants::ERR_EMPTY_TAG.to_string());
        } else if self.tag.len() > MAX_TAG_LEN {
            errors.push(format!(
                "Namespace tag too long: {} bytes (maximum: {MAX_TAG_LEN})",
                self.tag.len()
            ));
        }

        // Validate secret
        match self.secret.as_deref() {
            None => errors.push(format!(
                "{} (set signer.secret or MILLER_SECRET)",
                constants::ERR_MISSING_SECRET
            )),
            Some(text) => match SecretKey::from_encoded(text) {
                Err(_) => errors.push(constants::ERR_INVALID_SECRET.to_string()),
                Ok(key) if key.is_empty() => errors.push("Secret cannot be empty".to_string()),
                Ok(key) if key.len() < KEY_SIZE => errors.push(format!(
                    "{WARNING_PREFIX} Secret is only {} bytes - at least {KEY_SIZE} recommended",
                    key.len()
                )),
                Ok(_) => {}
            },
        }

        errors
    }

    /// Fail unless the format can decode payloads of unknown shape.
    ///
    /// Tools that sign and verify free-form JSON values need this; a Bincode
    /// token can be signed from a value but never read back untyped.
    pub fn ensure_self_describing(&self) -> Result<()> {
        if self.format.is_self_describing() {
            Ok(())
        } else {
            Err(TokenError::Config(format!(
                "{} payloads cannot hold arbitrary JSON values (use json or messagepack)",
                self.format
            )))
        }
    }

    /// Validation errors that make the configuration unusable
    pub fn validate_required(&self) -> Vec<String> {
        self.validate()
            .into_iter()
            .filter(|e| !e.starts_with(WARNING_PREFIX))
            .collect()
    }
}

/// Signer settings given explicitly, e.g. on the command line
#[derive(Clone, Default)]
pub struct SignerOverrides {
    pub tag: Option<String>,
    pub secret: Option<String>,
    pub format: Option<SerializationFormat>,
}

impl fmt::Debug for SignerOverrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignerOverrides")
            .field("tag", &self.tag)
            .field("secret", &self.secret.as_ref().map(|_| "[REDACTED]"))
            .field("format", &self.format)
            .finish()
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Application name for logs
    pub app_name: String,

    /// Log level
    #[serde(with = "log_level_serde")]
    pub log_level: Level,

    /// Whether to log to console
    pub log_to_console: bool,

    /// Whether to log to file
    pub log_to_file: bool,

    /// Path to log file (if log_to_file is true)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file_path: Option<String>,

    /// Whether to use JSON formatting for logs
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            app_name: String::from("miller"),
            log_level: Level::INFO,
            log_to_console: true,
            log_to_file: false,
            log_file_path: None,
            json_format: false,
        }
    }
}

impl LoggingConfig {
    /// Validate logging configuration
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        // Validate app name
        if self.app_name.is_empty() {
            errors.push("Application name cannot be empty".to_string());
        } else if self.app_name.len() > 64 {
            errors.push(format!(
                "Application name too long: {} characters (maximum: 64)",
                self.app_name.len()
            ));
        }

        // Validate file logging configuration
        if self.log_to_file {
            if let Some(ref path) = self.log_file_path {
                if let Some(parent) = Path::new(path).parent() {
                    if !parent.as_os_str().is_empty() && !parent.exists() {
                        errors.push(format!(
                            "Log file directory does not exist: {}",
                            parent.display()
                        ));
                    }
                }
            } else {
                errors.push("log_file_path must be specified when log_to_file is true".to_string());
            }
        }

        // Validate at least one output is enabled
        if !self.log_to_console && !self.log_to_file {
            errors
                .push("At least one logging output (console or file) must be enabled".to_string());
        }

        errors
    }
}

/// Helper module for tracing::Level serialization/deserialization
mod log_level_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::str::FromStr;
    use tracing::Level;

    pub fn serialize<S>(level: &Level, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let level_str = match *level {
            Level::TRACE => "trace",
            Level::DEBUG => "debug",
            Level::INFO => "info",
            Level::WARN => "warn",
            Level::ERROR => "error",
        };
        level_str.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Level, D::Error>
    where
        D: Deserializer<'de>,
    {
        let level_str = String::deserialize(deserializer)?;
        Level::from_str(&level_str)
            .map_err(|_| serde::de::Error::custom(format!("Invalid log level: {level_str}")))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_signer_needs_secret() {
        let config = MillerConfig::default();
        let errors = config.validate();
        assert_eq!(errors.len(), 1, "{errors:?}");
        assert!(errors[0].contains(constants::ERR_MISSING_SECRET));
        assert!(config.validate_strict().is_err());
    }

    #[test]
    fn test_example_config_is_valid() {
        let config = MillerConfig::from_toml(&MillerConfig::example_config()).unwrap();
        assert!(config.validate().is_empty(), "{:?}", config.validate());
        assert_eq!(config.signer.secret_key().unwrap().len(), KEY_SIZE);
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = SignerConfig {
            secret: Some("c2VjcmV0".to_string()),
            ..SignerConfig::default()
        };
        let shown = format!("{config:?}");
        assert!(!shown.contains("c2VjcmV0"));
        assert!(shown.contains("REDACTED"));
    }
}
