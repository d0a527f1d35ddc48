//! Run reporting: progress bar, failure messages, summary, and export.

use std::path::{Path, PathBuf};
use std::time::Duration;

use alttext_core::config::ExportConfig;
use alttext_core::{
    GenerationResult, Language, ProviderKind, ResultTable, RunObserver, SkipReason,
    TracingObserver,
};
use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

/// Drives an indicatif progress bar from run events.
///
/// Log lines are routed through `suspend` so they don't tear the bar.
pub struct ProgressObserver {
    bar: ProgressBar,
    log: TracingObserver,
}

impl ProgressObserver {
    /// Progress bar on stderr, hidden automatically when stderr isn't a TTY.
    pub fn new() -> Self {
        Self::with_bar(create_progress_bar())
    }

    pub fn with_bar(bar: ProgressBar) -> Self {
        Self {
            bar,
            log: TracingObserver,
        }
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl RunObserver for ProgressObserver {
    fn run_started(&self, total: usize, language: Language, provider: ProviderKind) {
        self.bar.set_length(total as u64);
        self.bar.set_message(format!("{language} via {provider}"));
        self.bar
            .suspend(|| self.log.run_started(total, language, provider));
    }

    fn run_skipped(&self, reason: SkipReason) {
        self.bar.finish_and_clear();
        self.log.run_skipped(reason);
    }

    fn image_dispatched(&self, index: usize, image_name: &str) {
        self.bar.set_message(image_name.to_string());
        self.bar
            .suspend(|| self.log.image_dispatched(index, image_name));
    }

    fn image_finished(&self, index: usize, result: &GenerationResult) {
        self.bar.inc(1);
        self.bar.suspend(|| self.log.image_finished(index, result));
    }

    fn run_finished(&self, table: &ResultTable) {
        self.bar.finish_and_clear();
        self.log.run_finished(table);
    }
}

fn create_progress_bar() -> ProgressBar {
    let pb = ProgressBar::new(0);
    let style = ProgressStyle::default_bar()
        .template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("##-");
    pb.set_style(style);
    pb.set_message("starting...");
    pb
}

/// The two lines reported for each failed image.
pub fn failure_lines(result: &GenerationResult) -> Option<[String; 2]> {
    match result {
        GenerationResult::Failure {
            image_name,
            error_code,
            error_detail,
        } => Some([
            format!("Error in generating alt text for {image_name}: {error_code}"),
            format!("Error details: {error_detail}"),
        ]),
        GenerationResult::Success { .. } => None,
    }
}

/// Print every failure to stderr, in submission order.
pub fn print_failures(table: &ResultTable) {
    let red = Style::new().for_stderr().red();
    let dim = Style::new().for_stderr().dim();

    for result in table.failures() {
        if let Some([headline, details]) = failure_lines(result) {
            eprintln!("{}", red.apply_to(headline));
            eprintln!("  {}", dim.apply_to(details));
        }
    }
}

/// Counts reported after a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub succeeded: usize,
    pub failed: usize,
    pub elapsed: Duration,
}

impl RunSummary {
    pub fn from_table(table: &ResultTable, elapsed: Duration) -> Self {
        let succeeded = table.success_count();
        Self {
            succeeded,
            failed: table.len() - succeeded,
            elapsed,
        }
    }

    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }

    /// Images per second over the whole run.
    pub fn rate(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.total() as f64 / secs
        } else {
            0.0
        }
    }
}

/// Print a formatted summary table to stderr.
pub fn print_summary(summary: &RunSummary) {
    eprintln!();
    eprintln!("  ====================================");
    eprintln!("               Summary");
    eprintln!("  ====================================");
    eprintln!("    Succeeded:    {:>8}", summary.succeeded);
    if summary.failed > 0 {
        eprintln!("    Failed:       {:>8}", summary.failed);
    }
    eprintln!("  ------------------------------------");
    eprintln!("    Total:        {:>8}", summary.total());
    eprintln!("    Duration:     {:>7.1}s", summary.elapsed.as_secs_f64());
    eprintln!("    Rate:         {:>7.1} img/sec", summary.rate());
    eprintln!("  ====================================");
}

/// Export successful rows to `target`, or to the configured file name.
///
/// Returns the written path, or `None` when there was nothing to export.
pub fn export_table(
    table: &ResultTable,
    config: &ExportConfig,
    target: Option<&Path>,
) -> anyhow::Result<Option<PathBuf>> {
    if table.success_count() == 0 {
        tracing::warn!("No successful results to export");
        return Ok(None);
    }

    let artifact = table.export_with(config)?;
    let path = match target {
        Some(path) if path.is_dir() => path.join(&artifact.file_name),
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(&artifact.file_name),
    };
    artifact.write_to(&path)?;
    Ok(Some(path))
}
