//! Configuration validation with range checks.

use crate::error::ConfigError;
use crate::output::OutputFormat;
use crate::types::{Language, ProviderKind};

use super::Config;

/// Excel's limit on worksheet name length.
const MAX_SHEET_NAME_LEN: usize = 31;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if Language::parse(&self.generation.language).is_none() {
            return Err(ConfigError::ValidationError(format!(
                "generation.language '{}' is not one of English, Spanish, French, German, Italian",
                self.generation.language
            )));
        }
        if ProviderKind::parse(&self.generation.provider).is_none() {
            return Err(ConfigError::ValidationError(format!(
                "generation.provider '{}' must be 'alttext-ai' or 'openai'",
                self.generation.provider
            )));
        }
        if self.processing.supported_formats.is_empty() {
            return Err(ConfigError::ValidationError(
                "processing.supported_formats must not be empty".into(),
            ));
        }
        if self.limits.max_file_size_mb == 0 {
            return Err(ConfigError::ValidationError(
                "limits.max_file_size_mb must be > 0".into(),
            ));
        }
        if self.limits.request_timeout_ms == Some(0) {
            return Err(ConfigError::ValidationError(
                "limits.request_timeout_ms must be > 0 when set".into(),
            ));
        }
        if self.providers.alttext_ai.endpoint.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "providers.alttext_ai.endpoint must not be empty".into(),
            ));
        }
        if self.providers.openai.endpoint.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "providers.openai.endpoint must not be empty".into(),
            ));
        }
        if self.providers.openai.model.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "providers.openai.model must not be empty".into(),
            ));
        }
        if self.providers.openai.max_tokens == 0 {
            return Err(ConfigError::ValidationError(
                "providers.openai.max_tokens must be > 0".into(),
            ));
        }
        if self.export.file_name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "export.file_name must not be empty".into(),
            ));
        }
        let sheet_len = self.export.sheet_name.chars().count();
        if sheet_len == 0 || sheet_len > MAX_SHEET_NAME_LEN {
            return Err(ConfigError::ValidationError(format!(
                "export.sheet_name must be 1-{MAX_SHEET_NAME_LEN} characters"
            )));
        }
        if OutputFormat::parse(&self.output.format).is_none() {
            return Err(ConfigError::ValidationError(format!(
                "output.format '{}' must be table, json or jsonl",
                self.output.format
            )));
        }
        Ok(())
    }
}
