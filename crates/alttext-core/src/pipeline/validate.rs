//! Cheap checks on an image asset before it is decoded.

use crate::config::LimitsConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::types::{ImageAsset, RasterFormat};

/// Validates assets before encoding.
pub struct Validator {
    limits: LimitsConfig,
}

impl Validator {
    /// Create a new validator with the given limits.
    pub fn new(limits: LimitsConfig) -> Self {
        Self { limits }
    }

    /// Check size and magic bytes, returning the format sniffed from content.
    pub fn validate(&self, asset: &ImageAsset) -> PipelineResult<RasterFormat> {
        if asset.size() > self.limits.max_file_size_bytes() {
            return Err(PipelineError::FileTooLarge {
                name: asset.name().to_string(),
                size_mb: asset.size() / (1024 * 1024),
                max_mb: self.limits.max_file_size_mb,
            });
        }

        let bytes = asset.bytes();
        if bytes.len() < 4 {
            return Err(PipelineError::Decode {
                name: asset.name().to_string(),
                message: "File too small to be a valid image".to_string(),
            });
        }

        sniff_format(bytes).ok_or_else(|| PipelineError::Decode {
            name: asset.name().to_string(),
            message: "Unrecognized image format (invalid magic bytes)".to_string(),
        })
    }
}

/// Identify a supported raster format from its leading bytes.
pub fn sniff_format(bytes: &[u8]) -> Option<RasterFormat> {
    match bytes {
        [0xFF, 0xD8, 0xFF, ..] => Some(RasterFormat::Jpeg),
        [0x89, b'P', b'N', b'G', ..] => Some(RasterFormat::Png),
        [b'G', b'I', b'F', b'8', ..] => Some(RasterFormat::Gif),
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => Some(RasterFormat::WebP),
        _ => None,
    }
}
