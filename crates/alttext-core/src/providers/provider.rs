//! Provider trait, request type and factory.
//!
//! Every provider answers the same question (alt text for one image) behind
//! [`AltTextProvider`]. Call sites only see a [`ProviderKind`]; adding a
//! provider means a new variant plus a new impl here.

use crate::config::{LimitsConfig, ProvidersConfig};
use crate::error::PipelineError;
use crate::pipeline::EncodedImage;
use crate::types::{GenerationResult, Language, ProviderKind};
use async_trait::async_trait;
use secrecy::SecretString;

/// A request to generate alt text for one image.
///
/// The API key is borrowed from the run so it exists in exactly one place.
#[derive(Debug)]
pub struct GenerationRequest<'a> {
    /// Display name of the image (used in the HTML snippet)
    pub image_name: String,
    /// Encoded image payload
    pub image: EncodedImage,
    /// Target language
    pub language: Language,
    /// User-supplied API key
    pub api_key: &'a SecretString,
}

/// Trait that all alt text providers implement.
///
/// Uses `async_trait` because native async fn in trait is not object-safe
/// (we need `Box<dyn AltTextProvider>` for dynamic dispatch).
#[async_trait]
pub trait AltTextProvider: Send + Sync {
    /// Which provider this is.
    fn kind(&self) -> ProviderKind;

    /// Provider name for logging.
    fn name(&self) -> &str {
        self.kind().display_name()
    }

    /// Call the provider and return the alt text, or the error it reported.
    async fn describe(&self, request: &GenerationRequest<'_>) -> Result<String, PipelineError>;

    /// Call the provider and normalize the outcome into a [`GenerationResult`].
    ///
    /// Never fails: provider and transport errors become `Failure` rows.
    async fn generate_alt_text(&self, request: &GenerationRequest<'_>) -> GenerationResult {
        match self.describe(request).await {
            Ok(alt_text) => GenerationResult::success(&request.image_name, alt_text),
            Err(e) => {
                tracing::warn!(
                    provider = self.name(),
                    image = %request.image_name,
                    code = e.error_code(),
                    "Alt text generation failed: {e}"
                );
                GenerationResult::from_error(&request.image_name, &e)
            }
        }
    }
}

/// Build the HTTP client shared by one run's requests.
///
/// Without a configured timeout the client keeps reqwest's default, which
/// sets no overall deadline.
pub(crate) fn http_client(limits: &LimitsConfig) -> Result<reqwest::Client, PipelineError> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = limits.request_timeout() {
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .map_err(|e| PipelineError::transport(format!("Failed to build HTTP client: {e}")))
}

/// Factory that creates the provider for a [`ProviderKind`].
pub struct ProviderFactory;

impl ProviderFactory {
    /// Create a provider from its kind and the providers config section.
    pub fn create(
        kind: ProviderKind,
        config: &ProvidersConfig,
        limits: &LimitsConfig,
    ) -> Result<Box<dyn AltTextProvider>, PipelineError> {
        let client = http_client(limits)?;
        let provider: Box<dyn AltTextProvider> = match kind {
            ProviderKind::AltTextAi => Box::new(super::alttext_ai::AltTextAiProvider::new(
                client,
                &config.alttext_ai.endpoint,
            )),
            ProviderKind::OpenAi => Box::new(super::openai::OpenAiProvider::new(
                client,
                &config.openai.endpoint,
                &config.openai.model,
                config.openai.max_tokens,
            )),
        };
        tracing::debug!("Created {} provider", provider.name());
        Ok(provider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_creates_each_kind() {
        let config = ProvidersConfig::default();
        let limits = LimitsConfig::default();
        for kind in ProviderKind::ALL {
            let provider = ProviderFactory::create(kind, &config, &limits).unwrap();
            assert_eq!(provider.kind(), kind);
        }
    }

    #[test]
    fn test_factory_accepts_request_timeout() {
        let limits = LimitsConfig {
            request_timeout_ms: Some(5_000),
            ..LimitsConfig::default()
        };
        let provider =
            ProviderFactory::create(ProviderKind::OpenAi, &ProvidersConfig::default(), &limits)
                .unwrap();
        assert_eq!(provider.name(), "OpenAI");
    }
}
