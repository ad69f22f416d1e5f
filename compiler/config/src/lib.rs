#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Clientele Configuration
//!
//! This crate provides configuration management for generation runs.
//! It handles loading and saving configuration files that specify:
//! - The target language to emit
//! - Where generated modules are written
//! - Generated-client settings (type name, initial base URL, error hook)
//! - Logging configuration
//!
//! Configuration is stored in TOML format and can be loaded from files or
//! created with sensible defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading or saving configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),
    /// Failed to parse the TOML configuration file
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    /// Failed to serialize configuration to TOML format
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// Could not locate the user's configuration directory
    #[error("Could not find user config directory")]
    ConfigDirUnavailable,
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Target language identifier (`rust` or `typescript`)
    pub target: String,
    /// Where to write generated modules
    pub output_dir: PathBuf,
    /// Generated-client settings
    pub client: ClientConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Settings baked into the generated client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Name of the generated client type
    pub name: String,
    /// Initial base URL assigned at construction time
    pub base_url: String,
    /// Whether the generated client exposes an error-hook surface
    pub error_hook: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (debug, info, warn, error)
    pub level: String,
    /// Log file path (optional)
    pub file: Option<PathBuf>,
}

impl GeneratorConfig {
    /// Load configuration from a TOML file at `path`
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save this configuration as a pretty-printed TOML file at `path`
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Returns the default config file path:
    /// `{config_dir()}/clientele/config.toml`
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let config_dir =
            dirs::config_dir().ok_or(ConfigError::ConfigDirUnavailable)?.join("clientele");
        Ok(config_dir.join("config.toml"))
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            target: "rust".to_string(),
            output_dir: PathBuf::from("generated"),
            client: ClientConfig {
                name: "ApiClient".to_string(),
                base_url: String::new(),
                error_hook: true,
            },
            logging: LoggingConfig { level: "info".to_string(), file: None },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_from_file() {
        let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
        let toml_content = r#"
            target = "typescript"
            output_dir = "generated"

            [client]
            name = "RemoteCaller"
            base_url = "https://api.example.com/"
            error_hook = true

            [logging]
            level = "debug"
            file = "generation.log"
        "#;
        fs::write(&temp_file, toml_content)
            .expect("Failed to write TOML content to temporary file");

        let loaded = GeneratorConfig::from_file(&temp_file)
            .expect("Failed to load config from temporary file");
        assert_eq!(loaded.target, "typescript");
        assert_eq!(loaded.output_dir, PathBuf::from("generated"));
        assert_eq!(loaded.client.name, "RemoteCaller");
        assert_eq!(loaded.client.base_url, "https://api.example.com/");
        assert!(loaded.client.error_hook);
        assert_eq!(loaded.logging.level, "debug");
        assert_eq!(loaded.logging.file, Some(PathBuf::from("generation.log")));
    }

    #[test]
    fn test_from_file_rejects_invalid_toml() {
        let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
        fs::write(&temp_file, "target = [not toml").expect("Failed to write");

        let result = GeneratorConfig::from_file(&temp_file);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_save_round_trip() {
        let temp_file = NamedTempFile::new().expect("Failed to create temporary file");

        let mut config = GeneratorConfig::default();
        config.client.name = "RemoteCaller".to_string();
        config.save(temp_file.path()).expect("Failed to save config");

        let loaded = GeneratorConfig::from_file(temp_file.path()).expect("Failed to reload");
        assert_eq!(loaded.target, "rust");
        assert_eq!(loaded.client.name, "RemoteCaller");
    }

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.target, "rust");
        assert!(config.client.error_hook);
        assert_eq!(config.logging.level, "info");
    }
}
