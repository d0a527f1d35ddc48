//! Configuration management for the alt text tool.
//!
//! Configuration is loaded from the platform config directory with sensible
//! defaults. API keys are never read from or written to this file.

mod types;
mod validate;

pub use types::*;

use crate::error::ConfigError;
use crate::types::{Language, ProviderKind};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default language and provider
    pub generation: GenerationConfig,

    /// Accepted input formats
    pub processing: ProcessingConfig,

    /// Resource limits
    pub limits: LimitsConfig,

    /// Provider endpoints and models
    pub providers: ProvidersConfig,

    /// Spreadsheet export settings
    pub export: ExportConfig,

    /// Result table output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// - macOS: ~/Library/Application Support/com.alttext.alttext/config.toml
    /// - Linux: ~/.config/alttext/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\alttext\config\config.toml
    ///
    /// Falls back to ~/.alttext/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "alttext", "alttext")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .unwrap_or_else(|| {
                PathBuf::from(shellexpand::tilde("~/.alttext/config.toml").into_owned())
            })
    }

    /// Default target language. Falls back to English if the configured
    /// name is unknown (only possible for configs that skipped validation).
    pub fn default_language(&self) -> Language {
        Language::parse(&self.generation.language).unwrap_or_default()
    }

    /// Default provider, with the same fallback rule as the language.
    pub fn default_provider(&self) -> ProviderKind {
        ProviderKind::parse(&self.generation.provider).unwrap_or_default()
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}
