//! Run orchestration: encode each image, dispatch it to the selected
//! provider, and collect the outcomes into a [`ResultTable`].
//!
//! Images are processed one after another in submission order. Each image
//! goes `Pending -> Dispatched -> Succeeded | Failed` (or straight to
//! `Failed` when it cannot be encoded); nothing is retried and one image's
//! failure never stops the rest of the run.

use secrecy::{ExposeSecret, SecretString};
use std::time::Instant;

use crate::config::Config;
use crate::error::PipelineError;
use crate::pipeline::ImageEncoder;
use crate::providers::{AltTextProvider, GenerationRequest, ProviderFactory};
use crate::results::ResultTable;
use crate::types::{GenerationResult, ImageSubmission, Language, ProviderKind};

/// Everything one run needs from the user.
#[derive(Debug)]
pub struct RunInput {
    /// API key for the selected provider
    pub api_key: SecretString,
    /// Target language
    pub language: Language,
    /// Selected provider
    pub provider: ProviderKind,
    /// Images in submission order, including ones that could not be read
    pub images: Vec<ImageSubmission>,
}

/// Why a run did not start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    MissingApiKey,
    NoImages,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::MissingApiKey => write!(f, "no API key provided"),
            SkipReason::NoImages => write!(f, "no images provided"),
        }
    }
}

/// Receives progress events for a single run.
///
/// Passed into [`Orchestrator::run_with_observer`] so each run reports to
/// whoever started it. All methods default to doing nothing.
pub trait RunObserver: Send + Sync {
    fn run_started(&self, _total: usize, _language: Language, _provider: ProviderKind) {}

    fn run_skipped(&self, _reason: SkipReason) {}

    fn image_dispatched(&self, _index: usize, _image_name: &str) {}

    fn image_finished(&self, _index: usize, _result: &GenerationResult) {}

    fn run_finished(&self, _table: &ResultTable) {}
}

/// Observer that reports run events through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl RunObserver for TracingObserver {
    fn run_started(&self, total: usize, language: Language, provider: ProviderKind) {
        tracing::info!("Generating alt text for {total} image(s) in {language} using {provider}");
    }

    fn run_skipped(&self, reason: SkipReason) {
        tracing::warn!("Nothing to do: {reason}");
    }

    fn image_dispatched(&self, index: usize, image_name: &str) {
        tracing::debug!(index, image = image_name, "Dispatched");
    }

    fn image_finished(&self, index: usize, result: &GenerationResult) {
        match result {
            GenerationResult::Success { image_name, .. } => {
                tracing::debug!(index, image = %image_name, "Succeeded");
            }
            GenerationResult::Failure {
                image_name,
                error_code,
                ..
            } => {
                tracing::warn!(index, image = %image_name, code = %error_code, "Failed");
            }
        }
    }

    fn run_finished(&self, table: &ResultTable) {
        tracing::info!(
            "Finished: {} succeeded, {} failed",
            table.success_count(),
            table.len() - table.success_count()
        );
    }
}

/// Drives one run at a time from input to [`ResultTable`].
pub struct Orchestrator {
    config: Config,
    encoder: ImageEncoder,
}

impl Orchestrator {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
            encoder: ImageEncoder::new(config.limits.clone()),
        }
    }

    /// Run with the default `tracing` observer.
    pub async fn run(&self, input: RunInput) -> Result<ResultTable, PipelineError> {
        self.run_with_observer(input, &TracingObserver).await
    }

    /// Run, reporting progress to `observer`.
    ///
    /// An empty API key or an empty image list is a no-op: no provider is
    /// contacted and the returned table is empty. The only error is failing
    /// to set up the HTTP client; per-image errors become `Failure` rows.
    pub async fn run_with_observer(
        &self,
        input: RunInput,
        observer: &dyn RunObserver,
    ) -> Result<ResultTable, PipelineError> {
        if input.api_key.expose_secret().is_empty() {
            observer.run_skipped(SkipReason::MissingApiKey);
            return Ok(ResultTable::new());
        }
        if input.images.is_empty() {
            observer.run_skipped(SkipReason::NoImages);
            return Ok(ResultTable::new());
        }

        let provider =
            ProviderFactory::create(input.provider, &self.config.providers, &self.config.limits)?;
        Ok(self.dispatch(provider.as_ref(), &input, observer).await)
    }

    /// Process every image sequentially against an already-built provider.
    async fn dispatch(
        &self,
        provider: &dyn AltTextProvider,
        input: &RunInput,
        observer: &dyn RunObserver,
    ) -> ResultTable {
        let start = Instant::now();
        observer.run_started(input.images.len(), input.language, input.provider);

        let mut table = ResultTable::new();
        for (index, submission) in input.images.iter().enumerate() {
            let image = match submission {
                ImageSubmission::Loaded(image) => image,
                ImageSubmission::Unreadable { name, error } => {
                    let result = GenerationResult::from_error(name.as_str(), error);
                    observer.image_finished(index, &result);
                    table.append(result);
                    continue;
                }
            };

            let result = match self.encoder.encode(image) {
                Ok(encoded) => {
                    let request = GenerationRequest {
                        image_name: image.name().to_string(),
                        image: encoded,
                        language: input.language,
                        api_key: &input.api_key,
                    };
                    observer.image_dispatched(index, image.name());
                    provider.generate_alt_text(&request).await
                }
                Err(e) => GenerationResult::from_error(image.name(), &e),
            };
            observer.image_finished(index, &result);
            table.append(result);
        }

        tracing::debug!(elapsed_ms = start.elapsed().as_millis() as u64, "Run complete");
        observer.run_finished(&table);
        table
    }
}
