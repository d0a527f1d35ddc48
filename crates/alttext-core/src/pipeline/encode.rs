//! Image encoding: validate, decode-check, and base64 the original bytes.

use base64::Engine;
use std::io::Cursor;

use crate::config::LimitsConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::types::{ImageAsset, RasterFormat};

use super::validate::Validator;

/// Base64-encoded image ready to send to a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    /// Standard base64 of the original bytes
    pub data: String,
    /// Format detected from content
    pub format: RasterFormat,
}

/// Turns image assets into transport-safe base64.
pub struct ImageEncoder {
    validator: Validator,
}

impl ImageEncoder {
    pub fn new(limits: LimitsConfig) -> Self {
        Self {
            validator: Validator::new(limits),
        }
    }

    /// Encode an asset.
    ///
    /// The bytes must decode as JPEG, PNG, GIF or WEBP. The encoded payload is
    /// the original file, not a re-encoding of the decoded pixels, so decoding
    /// the base64 yields byte-identical input.
    pub fn encode(&self, asset: &ImageAsset) -> PipelineResult<EncodedImage> {
        let sniffed = self.validator.validate(asset)?;
        let format = Self::decode_check(asset)?.unwrap_or(sniffed);

        if format != asset.format() {
            tracing::debug!(
                image = asset.name(),
                declared = %asset.format(),
                detected = %format,
                "Declared format differs from content"
            );
        }

        Ok(EncodedImage {
            data: base64::engine::general_purpose::STANDARD.encode(asset.bytes()),
            format,
        })
    }

    /// Fully decode the image to prove it is readable, returning the format
    /// the decoder detected.
    fn decode_check(asset: &ImageAsset) -> PipelineResult<Option<RasterFormat>> {
        let reader = image::ImageReader::new(Cursor::new(asset.bytes()))
            .with_guessed_format()
            .map_err(|e| PipelineError::Decode {
                name: asset.name().to_string(),
                message: format!("Cannot detect image format: {e}"),
            })?;

        let detected = match reader.format() {
            Some(f) => Some(RasterFormat::from_image_format(f).ok_or_else(|| {
                PipelineError::UnsupportedFormat {
                    name: asset.name().to_string(),
                    format: format!("{f:?}").to_lowercase(),
                }
            })?),
            None => None,
        };

        reader.decode().map_err(|e| PipelineError::Decode {
            name: asset.name().to_string(),
            message: e.to_string(),
        })?;

        Ok(detected)
    }
}
