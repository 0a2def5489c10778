//! Configuration loading

use crate::error::{MediboardError, MediboardResult};
use crate::types::{MediboardConfig, SessionSettings, StorageSettings};

use std::path::Path;

impl Default for MediboardConfig {
    fn default() -> Self {
        Self {
            session: SessionSettings { login_delay_ms: 500 },
            storage: StorageSettings {
                data_dir: "~/.mediboard".to_string(),
            },
        }
    }
}

impl MediboardConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> MediboardResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| MediboardError::Config {
            message: format!("Failed to read config file: {}", e),
            source: Some(Box::new(e)),
            context: crate::ErrorContext::new("config")
                .with_operation("read_file")
                .with_suggestion("Check if the config file exists and is readable"),
        })?;

        let config: MediboardConfig =
            toml::from_str(&content).map_err(|e| MediboardError::Config {
                message: format!("Failed to parse config: {}", e),
                source: Some(Box::new(e)),
                context: crate::ErrorContext::new("config")
                    .with_operation("parse_toml")
                    .with_suggestion("Check TOML syntax in config file"),
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> MediboardResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| MediboardError::Config {
            message: format!("Failed to serialize config: {}", e),
            source: Some(Box::new(e)),
            context: crate::ErrorContext::new("config").with_operation("serialize_toml"),
        })?;

        std::fs::write(path, content).map_err(|e| MediboardError::Config {
            message: format!("Failed to write config file: {}", e),
            source: Some(Box::new(e)),
            context: crate::ErrorContext::new("config")
                .with_operation("write_file")
                .with_suggestion("Check if the directory exists and is writable"),
        })?;

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> MediboardResult<()> {
        if self.storage.data_dir.is_empty() {
            return Err(MediboardError::Config {
                message: "storage.data_dir must not be empty".to_string(),
                source: None,
                context: crate::ErrorContext::new("config")
                    .with_operation("validate")
                    .with_suggestion("Set storage.data_dir to a writable directory"),
            });
        }

        Ok(())
    }
}
