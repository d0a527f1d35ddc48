//! Guided alt text generation flow.
//!
//! Walks the user through: API key → language → provider → image path →
//! run → results → optional Excel export. Reuses the same helpers as the
//! `generate` command.

use std::path::PathBuf;
use std::time::Instant;

use alttext_core::{Config, FileDiscovery, Language, OutputFormat, ProviderKind};
use console::Style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Password, Select};
use secrecy::SecretString;

use crate::cli::generate::report::{self, RunSummary};
use crate::cli::generate::{self, RunSettings};

/// Environment variable checked before prompting for a key.
const API_KEY_ENV: &str = "ALTTEXT_API_KEY";

/// Walk the user through one generation run.
pub async fn guided_generate(config: &Config) -> anyhow::Result<()> {
    let theme = super::prompt_theme();
    let dim = Style::new().for_stderr().dim();
    let warn = Style::new().for_stderr().yellow();

    // ── Step 1: API key ────────────────────────────────────────────────────

    let Some(api_key) = prompt_api_key(&theme)? else {
        return Ok(());
    };
    if api_key.is_empty() {
        eprintln!("  {}", warn.apply_to("An API key is required to generate alt text."));
        return Ok(());
    }

    // ── Step 2: Language ───────────────────────────────────────────────────

    let default_language = config.default_language();
    let language_items: Vec<&str> = Language::ALL.iter().map(|l| l.display_name()).collect();
    let Some(language_choice) = Select::with_theme(&theme)
        .with_prompt("Language")
        .items(&language_items)
        .default(index_of(&Language::ALL, default_language))
        .interact_opt()?
    else {
        return Ok(());
    };
    let language = Language::ALL[language_choice];

    // ── Step 3: Provider ───────────────────────────────────────────────────

    let default_provider = config.default_provider();
    let provider_items: Vec<&str> = ProviderKind::ALL.iter().map(|p| p.display_name()).collect();
    let Some(provider_choice) = Select::with_theme(&theme)
        .with_prompt("Provider")
        .items(&provider_items)
        .default(index_of(&ProviderKind::ALL, default_provider))
        .interact_opt()?
    else {
        return Ok(());
    };
    let provider = ProviderKind::ALL[provider_choice];

    // ── Step 4: Images ─────────────────────────────────────────────────────
    // Re-prompts on both "path not found" and "no images found".

    let files = loop {
        let Some(raw_path) = super::handle_interrupt(
            Input::<String>::with_theme(&theme)
                .with_prompt("Path to image or folder")
                .interact_text(),
        )?
        else {
            return Ok(());
        };

        let path = PathBuf::from(shellexpand::tilde(&raw_path).into_owned());
        if !path.exists() {
            eprintln!(
                "  {}",
                warn.apply_to(format!("Path not found: {}", path.display()))
            );
            continue;
        }

        let found = FileDiscovery::new(config.processing.clone()).discover(&path);
        if found.is_empty() {
            eprintln!(
                "  {}",
                warn.apply_to("No supported images found at that path.")
            );
            continue;
        }
        break found;
    };

    eprintln!(
        "  {}",
        dim.apply_to(format!(
            "Found {} image(s) ({:.1} MB)",
            files.len(),
            FileDiscovery::total_size(&files) as f64 / 1_000_000.0
        ))
    );

    // ── Step 5: Run ────────────────────────────────────────────────────────

    let settings = RunSettings {
        config: config.clone(),
        language,
        provider,
        format: OutputFormat::Table,
    };
    let paths: Vec<PathBuf> = files.into_iter().map(|f| f.path).collect();
    let images = generate::load_images(&paths).await;

    let start = Instant::now();
    let table = generate::run(&settings, SecretString::from(api_key), images).await?;
    if table.is_empty() {
        return Ok(());
    }

    // ── Step 6: Results ────────────────────────────────────────────────────

    eprintln!();
    report::print_failures(&table);
    generate::print_table(&table, OutputFormat::Table, config.output.pretty)?;
    report::print_summary(&RunSummary::from_table(&table, start.elapsed()));
    eprintln!();

    // ── Step 7: Export ─────────────────────────────────────────────────────

    if table.success_count() > 0 {
        let export = Confirm::with_theme(&theme)
            .with_prompt("Export results to Excel?")
            .default(true)
            .interact_opt()?;

        if matches!(export, Some(true)) {
            if let Some(target) = prompt_export_path(&theme, &config.export.file_name)? {
                let written = report::export_table(&table, &config.export, Some(&target))?;
                if let Some(path) = written {
                    let green = Style::new().for_stderr().green();
                    eprintln!(
                        "  {} Exported to {}",
                        green.apply_to("✓"),
                        path.display()
                    );
                }
            }
        }
    }

    // ── Post-run menu ──────────────────────────────────────────────────────

    eprintln!();
    let post_items = &["Generate more alt text", "Back to main menu"];
    let post_choice = Select::with_theme(&theme)
        .with_prompt("What next?")
        .items(post_items)
        .default(0)
        .interact_opt()?;

    if matches!(post_choice, Some(0)) {
        Box::pin(guided_generate(config)).await?;
    }

    Ok(())
}

/// Use the key from the environment if set, otherwise prompt for it.
///
/// Returns `Ok(None)` if the user interrupts the prompt.
fn prompt_api_key(theme: &ColorfulTheme) -> anyhow::Result<Option<String>> {
    if let Ok(key) = std::env::var(API_KEY_ENV) {
        if !key.is_empty() {
            let dim = Style::new().for_stderr().dim();
            eprintln!(
                "  {}",
                dim.apply_to(format!("Using API key from {API_KEY_ENV}"))
            );
            return Ok(Some(key));
        }
    }

    super::handle_interrupt(
        Password::with_theme(theme)
            .with_prompt("API key")
            .allow_empty_password(true)
            .interact(),
    )
}

/// Prompt for the export path, defaulting to the configured file name.
fn prompt_export_path(theme: &ColorfulTheme, default: &str) -> anyhow::Result<Option<PathBuf>> {
    let Some(path) = super::handle_interrupt(
        Input::<String>::with_theme(theme)
            .with_prompt("Export file path")
            .default(format!("./{default}"))
            .interact_text(),
    )?
    else {
        return Ok(None);
    };
    Ok(Some(PathBuf::from(shellexpand::tilde(&path).into_owned())))
}

/// Position of `item` in a fixed menu list, or 0.
fn index_of<T: PartialEq>(items: &[T], item: T) -> usize {
    items.iter().position(|i| *i == item).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_of_defaults() {
        assert_eq!(index_of(&Language::ALL, Language::Italian), 4);
        assert_eq!(index_of(&ProviderKind::ALL, ProviderKind::OpenAi), 1);
        assert_eq!(index_of(&Language::ALL, Language::default()), 0);
    }
}
