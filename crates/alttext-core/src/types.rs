//! Core data types for the alt text pipeline.
//!
//! These types describe what goes into a run (images, language, provider)
//! and what comes out of it (one [`GenerationResult`] per image).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::error::{PipelineError, PipelineResult};

/// Raster formats accepted for upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RasterFormat {
    Jpeg,
    Png,
    Gif,
    WebP,
}

impl RasterFormat {
    /// Resolve a format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "gif" => Some(Self::Gif),
            "webp" => Some(Self::WebP),
            _ => None,
        }
    }

    /// Resolve a format from the `image` crate's detected format.
    pub fn from_image_format(format: image::ImageFormat) -> Option<Self> {
        match format {
            image::ImageFormat::Jpeg => Some(Self::Jpeg),
            image::ImageFormat::Png => Some(Self::Png),
            image::ImageFormat::Gif => Some(Self::Gif),
            image::ImageFormat::WebP => Some(Self::WebP),
            _ => None,
        }
    }

    /// Short format tag ("jpeg", "png", ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Jpeg => "jpeg",
            Self::Png => "png",
            Self::Gif => "gif",
            Self::WebP => "webp",
        }
    }
}

impl fmt::Display for RasterFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An uploaded image: raw bytes, declared format and display name.
///
/// Fields are private so an asset cannot change after it has been loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAsset {
    name: String,
    format: RasterFormat,
    bytes: Vec<u8>,
}

impl ImageAsset {
    pub fn new(name: impl Into<String>, format: RasterFormat, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            format,
            bytes,
        }
    }

    /// Read an image from disk, taking the display name and declared format
    /// from the file name.
    pub async fn load(path: &Path) -> PipelineResult<Self> {
        let name = display_name(path);

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        let format = RasterFormat::from_extension(ext).ok_or_else(|| {
            PipelineError::UnsupportedFormat {
                name: name.clone(),
                format: if ext.is_empty() {
                    "unknown".to_string()
                } else {
                    ext.to_string()
                },
            }
        })?;

        let bytes = tokio::fs::read(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                PipelineError::FileNotFound(path.to_path_buf())
            } else {
                PipelineError::Decode {
                    name: name.clone(),
                    message: format!("Cannot read file: {e}"),
                }
            }
        })?;

        Ok(Self::new(name, format, bytes))
    }

    /// Display name (the file name).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Format declared at upload time.
    pub fn format(&self) -> RasterFormat {
        self.format
    }

    /// Raw image bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Size in bytes.
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// File name of `path`, or the whole path when it has none.
fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// One image submitted to a run.
///
/// An image that could not be read is still submitted so that it gets its
/// own `Failure` row instead of vanishing from the table.
#[derive(Debug)]
pub enum ImageSubmission {
    Loaded(ImageAsset),
    Unreadable { name: String, error: PipelineError },
}

impl ImageSubmission {
    /// Read `path`, keeping a load error as an `Unreadable` entry.
    pub async fn load(path: &Path) -> Self {
        match ImageAsset::load(path).await {
            Ok(asset) => Self::Loaded(asset),
            Err(error) => Self::Unreadable {
                name: display_name(path),
                error,
            },
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Loaded(asset) => asset.name(),
            Self::Unreadable { name, .. } => name,
        }
    }
}

impl From<ImageAsset> for ImageSubmission {
    fn from(asset: ImageAsset) -> Self {
        Self::Loaded(asset)
    }
}

/// Target languages for generated alt text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    English,
    Spanish,
    French,
    German,
    Italian,
}

impl Language {
    /// All supported languages in menu order.
    pub const ALL: [Language; 5] = [
        Language::English,
        Language::Spanish,
        Language::French,
        Language::German,
        Language::Italian,
    ];

    /// Human-readable name shown in selectors.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Spanish => "Spanish",
            Self::French => "French",
            Self::German => "German",
            Self::Italian => "Italian",
        }
    }

    /// ISO 639-1 code sent to providers.
    pub fn code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Spanish => "es",
            Self::French => "fr",
            Self::German => "de",
            Self::Italian => "it",
        }
    }

    /// Look up a language by its display name (case-insensitive).
    pub fn from_display_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|lang| lang.display_name().eq_ignore_ascii_case(name.trim()))
    }

    /// Parse either a display name ("Italian") or a code ("it").
    pub fn parse(s: &str) -> Option<Self> {
        Self::from_display_name(s).or_else(|| {
            Self::ALL
                .into_iter()
                .find(|lang| lang.code().eq_ignore_ascii_case(s.trim()))
        })
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// The two supported alt text providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProviderKind {
    #[default]
    AltTextAi,
    OpenAi,
}

impl ProviderKind {
    /// All providers in menu order.
    pub const ALL: [ProviderKind; 2] = [ProviderKind::AltTextAi, ProviderKind::OpenAi];

    /// Name shown to users.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::AltTextAi => "AltText.ai",
            Self::OpenAi => "OpenAI",
        }
    }

    /// Stable identifier used in config files and CLI flags.
    pub fn id(&self) -> &'static str {
        match self {
            Self::AltTextAi => "alttext-ai",
            Self::OpenAi => "openai",
        }
    }

    /// Parse an identifier or display name (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "alttext-ai" | "alttext.ai" | "alttextai" | "alttext_ai" => Some(Self::AltTextAi),
            "openai" | "open-ai" => Some(Self::OpenAi),
            _ => None,
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Build the HTML snippet for an image.
///
/// Neither field is escaped: a quote in the alt text produces malformed
/// HTML. Callers embedding the snippet in a page must escape it themselves.
pub fn html_snippet(image_name: &str, alt_text: &str) -> String {
    format!(r#"<img src="{image_name}" alt="{alt_text}">"#)
}

/// Outcome of generating alt text for one image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum GenerationResult {
    Success {
        image_name: String,
        alt_text: String,
        html_snippet: String,
    },
    Failure {
        image_name: String,
        error_code: String,
        error_detail: String,
    },
}

impl GenerationResult {
    /// A successful result; the HTML snippet is derived from name and text.
    pub fn success(image_name: impl Into<String>, alt_text: impl Into<String>) -> Self {
        let image_name = image_name.into();
        let alt_text = alt_text.into();
        Self::Success {
            html_snippet: html_snippet(&image_name, &alt_text),
            image_name,
            alt_text,
        }
    }

    pub fn failure(
        image_name: impl Into<String>,
        error_code: impl Into<String>,
        error_detail: impl Into<String>,
    ) -> Self {
        Self::Failure {
            image_name: image_name.into(),
            error_code: error_code.into(),
            error_detail: error_detail.into(),
        }
    }

    /// Fold a pipeline error into a `Failure`.
    pub fn from_error(image_name: impl Into<String>, error: &PipelineError) -> Self {
        Self::failure(image_name, error.error_code(), error.error_detail())
    }

    pub fn image_name(&self) -> &str {
        match self {
            Self::Success { image_name, .. } | Self::Failure { image_name, .. } => image_name,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The table row for a success, `None` for a failure.
    pub fn to_row(&self) -> Option<TableRow> {
        match self {
            Self::Success {
                image_name,
                alt_text,
                html_snippet,
            } => Some(TableRow {
                image_name: image_name.clone(),
                alt_text: alt_text.clone(),
                html_code: html_snippet.clone(),
            }),
            Self::Failure { .. } => None,
        }
    }
}

/// One row of the rendered result table (Image Name, Alt Text, HTML Code).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    pub image_name: String,
    pub alt_text: String,
    pub html_code: String,
}

impl TableRow {
    /// Cell values in column order.
    pub fn cells(&self) -> [&str; 3] {
        [&self.image_name, &self.alt_text, &self.html_code]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_codes() {
        assert_eq!(Language::English.code(), "en");
        assert_eq!(Language::Spanish.code(), "es");
        assert_eq!(Language::French.code(), "fr");
        assert_eq!(Language::German.code(), "de");
        assert_eq!(Language::Italian.code(), "it");
    }

    #[test]
    fn test_language_from_display_name() {
        assert_eq!(
            Language::from_display_name("Italian"),
            Some(Language::Italian)
        );
        assert_eq!(
            Language::from_display_name("italian"),
            Some(Language::Italian)
        );
        assert_eq!(Language::from_display_name("Klingon"), None);
    }

    #[test]
    fn test_language_parse_accepts_code() {
        assert_eq!(Language::parse("de"), Some(Language::German));
        assert_eq!(Language::parse("FR"), Some(Language::French));
        assert_eq!(Language::parse("Spanish"), Some(Language::Spanish));
        assert_eq!(Language::parse("pt"), None);
    }

    #[test]
    fn test_provider_parse() {
        assert_eq!(ProviderKind::parse("AltText.ai"), Some(ProviderKind::AltTextAi));
        assert_eq!(ProviderKind::parse("alttext-ai"), Some(ProviderKind::AltTextAi));
        assert_eq!(ProviderKind::parse("OpenAI"), Some(ProviderKind::OpenAi));
        assert_eq!(ProviderKind::parse("ollama"), None);
    }

    #[test]
    fn test_raster_format_from_extension() {
        assert_eq!(RasterFormat::from_extension("JPG"), Some(RasterFormat::Jpeg));
        assert_eq!(RasterFormat::from_extension("jpeg"), Some(RasterFormat::Jpeg));
        assert_eq!(RasterFormat::from_extension("webp"), Some(RasterFormat::WebP));
        assert_eq!(RasterFormat::from_extension("tiff"), None);
    }

    #[test]
    fn test_success_builds_html_snippet() {
        let result = GenerationResult::success("cat.png", "a cat");
        assert_eq!(
            result,
            GenerationResult::Success {
                image_name: "cat.png".to_string(),
                alt_text: "a cat".to_string(),
                html_snippet: r#"<img src="cat.png" alt="a cat">"#.to_string(),
            }
        );
    }

    #[test]
    fn test_html_snippet_is_not_escaped() {
        let snippet = html_snippet("a&b.png", r#"a "quoted" <cat>"#);
        assert_eq!(snippet, r#"<img src="a&b.png" alt="a "quoted" <cat>">"#);
    }

    #[test]
    fn test_failure_has_no_row() {
        let result = GenerationResult::failure("cat.png", "bad_image", "corrupt");
        assert_eq!(result.image_name(), "cat.png");
        assert!(!result.is_success());
        assert!(result.to_row().is_none());
    }

    #[test]
    fn test_result_serializes_with_status_tag() {
        let json = serde_json::to_string(&GenerationResult::success("a.png", "x")).unwrap();
        assert!(json.contains(r#""status":"success""#));
    }

    #[tokio::test]
    async fn test_load_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"hello").unwrap();

        let err = ImageAsset::load(&path).await.unwrap_err();
        assert!(matches!(err, PipelineError::UnsupportedFormat { .. }));
    }

    #[tokio::test]
    async fn test_load_reads_name_and_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.JPG");
        std::fs::write(&path, [0xFF, 0xD8, 0xFF, 0xE0]).unwrap();

        let asset = ImageAsset::load(&path).await.unwrap();
        assert_eq!(asset.name(), "photo.JPG");
        assert_eq!(asset.format(), RasterFormat::Jpeg);
        assert_eq!(asset.size(), 4);
    }

    #[tokio::test]
    async fn test_submission_keeps_unreadable_files() {
        let dir = tempfile::tempdir().unwrap();
        let bmp = dir.path().join("scan.bmp");
        std::fs::write(&bmp, b"BM").unwrap();

        let submission = ImageSubmission::load(&bmp).await;
        assert_eq!(submission.name(), "scan.bmp");
        let ImageSubmission::Unreadable { error, .. } = &submission else {
            panic!("expected an unreadable entry, got {submission:?}");
        };
        assert_eq!(error.error_code(), crate::error::DECODE_ERROR_CODE);

        let missing = ImageSubmission::load(&dir.path().join("gone.png")).await;
        assert_eq!(missing.name(), "gone.png");
        assert!(matches!(missing, ImageSubmission::Unreadable { .. }));
    }
}
