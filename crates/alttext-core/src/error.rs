//! Error types for the alt text pipeline.
//!
//! Per-image errors ([`PipelineError`]) are never fatal to a run: the
//! orchestrator folds them into a `Failure` row using [`PipelineError::error_code`]
//! and [`PipelineError::error_detail`]. Configuration and export errors surface
//! to the caller.

use std::path::PathBuf;
use thiserror::Error;

/// Error code reported for network-level failures from either provider.
pub const TRANSPORT_ERROR_CODE: &str = "transport_error";

/// Error code reported when an image cannot be read or decoded.
pub const DECODE_ERROR_CODE: &str = "decode_error";

/// Top-level error type for alt text operations.
#[derive(Error, Debug)]
pub enum AltTextError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Pipeline processing errors
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// Spreadsheet export errors
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Per-image processing errors, organized by stage.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Image bytes are not a decodable JPEG, PNG, GIF or WEBP
    #[error("Decode error for {name}: {message}")]
    Decode { name: String, message: String },

    /// Image exceeds the configured size limit
    #[error("File too large: {name} ({size_mb}MB > {max_mb}MB)")]
    FileTooLarge {
        name: String,
        size_mb: u64,
        max_mb: u64,
    },

    /// Declared or detected format is not one of the supported rasters
    #[error("Unsupported format for {name}: {format}")]
    UnsupportedFormat { name: String, format: String },

    /// Structured failure reported by the provider (code + detail)
    #[error("Provider error {code}: {detail}")]
    Provider { code: String, detail: String },

    /// Network, auth or malformed-response failure
    #[error("{message}")]
    Transport { message: String },

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),
}

impl PipelineError {
    /// Build a transport error from any displayable cause.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Code shown to the user in a `Failure` row.
    pub fn error_code(&self) -> &str {
        match self {
            Self::Decode { .. }
            | Self::FileTooLarge { .. }
            | Self::UnsupportedFormat { .. }
            | Self::FileNotFound(_) => DECODE_ERROR_CODE,
            Self::Provider { code, .. } => code,
            Self::Transport { .. } => TRANSPORT_ERROR_CODE,
        }
    }

    /// Detail shown to the user in a `Failure` row.
    ///
    /// Provider and transport errors report their raw detail; local errors
    /// report their full message.
    pub fn error_detail(&self) -> String {
        match self {
            Self::Provider { detail, .. } => detail.clone(),
            Self::Transport { message } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Spreadsheet export errors.
#[derive(Error, Debug)]
pub enum ExportError {
    /// The workbook could not be serialized
    #[error("Spreadsheet serialization failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// The artifact could not be written to disk
    #[error("Failed to write export file: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for alt text results.
pub type Result<T> = std::result::Result<T, AltTextError>;

/// Convenience type alias for pipeline-specific results.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_keeps_code_and_detail() {
        let err = PipelineError::Provider {
            code: "bad_image".to_string(),
            detail: "corrupt".to_string(),
        };
        assert_eq!(err.error_code(), "bad_image");
        assert_eq!(err.error_detail(), "corrupt");
    }

    #[test]
    fn test_transport_error_code() {
        let err = PipelineError::transport("connection refused");
        assert_eq!(err.error_code(), TRANSPORT_ERROR_CODE);
        assert_eq!(err.error_detail(), "connection refused");
    }

    #[test]
    fn test_decode_family_shares_code() {
        let decode = PipelineError::Decode {
            name: "a.png".to_string(),
            message: "invalid header".to_string(),
        };
        let too_large = PipelineError::FileTooLarge {
            name: "b.png".to_string(),
            size_mb: 30,
            max_mb: 20,
        };
        assert_eq!(decode.error_code(), DECODE_ERROR_CODE);
        assert_eq!(too_large.error_code(), DECODE_ERROR_CODE);
        assert!(decode.error_detail().contains("a.png"));
        assert!(too_large.error_detail().contains("30MB > 20MB"));
    }
}
