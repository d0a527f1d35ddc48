//! Logging initialization.
//!
//! Uses `tracing-subscriber` with an `EnvFilter`, writing to stderr so stdout
//! stays clean for the result table.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// How log lines are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Resolved logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub level: String,
    pub format: LogFormat,
}

impl LogSettings {
    /// Merge the config file's logging section with CLI overrides.
    ///
    /// `--verbose` forces at least debug; `--json-logs` forces JSON.
    pub fn resolve(config: &alttext_core::Config, verbose: bool, json_logs: bool) -> Self {
        let configured = config.logging.level.to_lowercase();
        let level = if verbose && configured != "trace" {
            "debug".to_string()
        } else {
            configured
        };
        let format = if json_logs || config.logging.format.eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        };
        Self { level, format }
    }
}

/// Install the global subscriber. `RUST_LOG` overrides the configured level.
pub fn init(settings: &LogSettings) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.level));

    match settings.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .with_ansi(true),
            )
            .init(),
    }
}

/// Initialize logging from the config file plus CLI overrides.
pub fn init_from_config(config: &alttext_core::Config, verbose: bool, json_logs: bool) {
    init(&LogSettings::resolve(config, verbose, json_logs));
}
