//! Alt Text Core - Embeddable alt text generation library.
//!
//! Takes a set of images, sends each one to an external alt text provider
//! (AltText.ai or an OpenAI completion model), and collects the answers into
//! a table that can be exported as an Excel workbook.
//!
//! # Architecture
//!
//! ```text
//! Image → Encode (base64) → Provider (AltText.ai | OpenAI) → ResultTable → .xlsx
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use alttext_core::{Config, ImageSubmission, Language, Orchestrator, ProviderKind, RunInput};
//! use secrecy::SecretString;
//!
//! #[tokio::main]
//! async fn main() -> alttext_core::Result<()> {
//!     let config = Config::load()?;
//!     let image = ImageSubmission::load("./cat.png".as_ref()).await;
//!
//!     let table = Orchestrator::new(&config)
//!         .run(RunInput {
//!             api_key: SecretString::from("my-key"),
//!             language: Language::Italian,
//!             provider: ProviderKind::AltTextAi,
//!             images: vec![image],
//!         })
//!         .await?;
//!
//!     table.export()?.write_to("alt_text_results.xlsx".as_ref())?;
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod output;
pub mod pipeline;
pub mod providers;
pub mod results;
pub mod types;

// Re-exports for convenient access
pub use config::Config;
pub use error::{AltTextError, ConfigError, ExportError, PipelineError, PipelineResult, Result};
pub use orchestrator::{Orchestrator, RunInput, RunObserver, SkipReason, TracingObserver};
pub use output::{OutputFormat, OutputWriter};
pub use pipeline::{DiscoveredFile, EncodedImage, FileDiscovery, ImageEncoder};
pub use providers::{AltTextProvider, GenerationRequest, ProviderFactory};
pub use results::{ExportArtifact, ResultTable, EXPORT_FILE_NAME, EXPORT_HEADER, XLSX_MIME_TYPE};
pub use types::{
    GenerationResult, ImageAsset, ImageSubmission, Language, ProviderKind, RasterFormat, TableRow,
};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
