//! The `alttext generate` command.

pub mod report;
pub mod types;

pub use types::{LanguageArg, OutputFormat, ProviderArg};

use std::path::PathBuf;
use std::time::Instant;

use alttext_core::{
    Config, FileDiscovery, ImageSubmission, Language, Orchestrator,
    OutputFormat as CoreOutputFormat, OutputWriter, ProviderKind, ResultTable, RunInput,
};
use clap::Args;
use secrecy::SecretString;

use report::{ProgressObserver, RunSummary};

/// Arguments for the `generate` command.
#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// Image files or directories to describe
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// API key for the selected provider
    #[arg(long, env = "ALTTEXT_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Language for the alt text (defaults to the configured language)
    #[arg(short, long, value_enum)]
    pub language: Option<LanguageArg>,

    /// Provider to send images to (defaults to the configured provider)
    #[arg(short, long, value_enum)]
    pub provider: Option<ProviderArg>,

    /// How to print the result table (defaults to the configured format)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Export successful rows to an Excel file, optionally at PATH
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    pub export: Option<Option<PathBuf>>,

    /// OpenAI completion model (overrides the configured model)
    #[arg(long)]
    pub openai_model: Option<String>,
}

/// Settings for one run after merging flags over the config file.
#[derive(Debug, Clone)]
pub(crate) struct RunSettings {
    pub config: Config,
    pub language: Language,
    pub provider: ProviderKind,
    pub format: CoreOutputFormat,
}

impl RunSettings {
    pub fn resolve(args: &GenerateArgs, config: &Config) -> Self {
        let mut config = config.clone();
        if let Some(model) = &args.openai_model {
            config.providers.openai.model = model.clone();
        }

        let language = args
            .language
            .map(Language::from)
            .unwrap_or_else(|| config.default_language());
        let provider = args
            .provider
            .map(ProviderKind::from)
            .unwrap_or_else(|| config.default_provider());
        let format = args
            .format
            .map(CoreOutputFormat::from)
            .or_else(|| CoreOutputFormat::parse(&config.output.format))
            .unwrap_or(CoreOutputFormat::Table);

        Self {
            config,
            language,
            provider,
            format,
        }
    }
}

/// Execute the generate command.
pub async fn execute(args: GenerateArgs, config: &Config) -> anyhow::Result<()> {
    let settings = RunSettings::resolve(&args, config);

    let discovery = FileDiscovery::new(settings.config.processing.clone());
    let files = discovery.discover_all(&args.inputs);
    if files.is_empty() {
        tracing::warn!("No supported image files found in the given inputs");
        return Ok(());
    }
    tracing::info!(
        "Found {} image(s) ({:.1} MB)",
        files.len(),
        FileDiscovery::total_size(&files) as f64 / 1_000_000.0
    );

    let paths: Vec<PathBuf> = files.into_iter().map(|f| f.path).collect();
    let images = load_images(&paths).await;

    let api_key = SecretString::from(args.api_key.clone().unwrap_or_default());
    let start = Instant::now();
    let table = run(&settings, api_key, images).await?;
    if table.is_empty() {
        return Ok(());
    }

    report::print_failures(&table);
    print_table(&table, settings.format, settings.config.output.pretty)?;
    report::print_summary(&RunSummary::from_table(&table, start.elapsed()));

    if let Some(target) = &args.export {
        let written = report::export_table(&table, &settings.config.export, target.as_deref())?;
        if let Some(path) = written {
            eprintln!("Exported results to {}", path.display());
        }
    }

    Ok(())
}

/// Read every path into memory. Unreadable files stay in the list so the
/// run reports them as failures.
pub(crate) async fn load_images(paths: &[PathBuf]) -> Vec<ImageSubmission> {
    let mut images = Vec::with_capacity(paths.len());
    for path in paths {
        let submission = ImageSubmission::load(path).await;
        if let ImageSubmission::Unreadable { error, .. } = &submission {
            tracing::debug!("Cannot read {}: {error}", path.display());
        }
        images.push(submission);
    }
    images
}

/// Run the orchestrator with a progress bar attached.
pub(crate) async fn run(
    settings: &RunSettings,
    api_key: SecretString,
    images: Vec<ImageSubmission>,
) -> anyhow::Result<ResultTable> {
    let orchestrator = Orchestrator::new(&settings.config);
    let observer = ProgressObserver::new();
    let input = RunInput {
        api_key,
        language: settings.language,
        provider: settings.provider,
        images,
    };
    Ok(orchestrator.run_with_observer(input, &observer).await?)
}

/// Print the rendered rows to stdout.
pub(crate) fn print_table(
    table: &ResultTable,
    format: CoreOutputFormat,
    pretty: bool,
) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut writer = OutputWriter::new(stdout.lock(), format, pretty);
    writer.write_rows(&table.render())?;
    writer.flush()?;
    Ok(())
}
