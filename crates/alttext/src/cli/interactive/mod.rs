//! Interactive CLI mode, used when `alttext` runs with no subcommand on a TTY.
//!
//! A small menu in front of the same generation logic as `alttext generate`.

pub mod generate;

use alttext_core::Config;
use console::Style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Select;

/// Convert a dialoguer result into `Ok(Some(value))` on success, `Ok(None)` on
/// interrupt (Ctrl+C / terminal disconnect), and `Err` for other I/O failures.
///
/// Wraps `interact_text()` / `interact()` calls that lack an `_opt` variant.
fn handle_interrupt<T>(result: dialoguer::Result<T>) -> anyhow::Result<Option<T>> {
    match result {
        Ok(v) => Ok(Some(v)),
        Err(dialoguer::Error::IO(e)) if e.kind() == std::io::ErrorKind::Interrupted => Ok(None),
        Err(e) => Err(e.into()),
    }
}

const MENU_ITEMS: &[&str] = &["Generate alt text", "Show configuration", "Exit"];

/// Prompt theme: cyan accents and green answers, drawn on stderr.
fn prompt_theme() -> ColorfulTheme {
    let accent = Style::new().for_stderr().cyan();
    ColorfulTheme {
        prompt_prefix: accent.apply_to("?".to_string()),
        active_item_prefix: accent.apply_to("›".to_string()),
        active_item_style: accent,
        values_style: Style::new().for_stderr().green(),
        ..ColorfulTheme::default()
    }
}

/// One-line summary of what a run will use unless the user picks otherwise.
fn defaults_line(config: &Config) -> String {
    format!(
        "{} via {}, exporting to {}",
        config.default_language(),
        config.default_provider(),
        config.export.file_name
    )
}

fn print_banner(config: &Config) {
    let title = Style::new().for_stderr().cyan().bold();
    let dim = Style::new().for_stderr().dim();

    eprintln!();
    eprintln!(
        "  {} {}",
        title.apply_to("alttext"),
        dim.apply_to(format!("v{}", alttext_core::VERSION))
    );
    eprintln!("  {}", dim.apply_to(defaults_line(config)));
    eprintln!();
}

/// Entry point for interactive mode.
pub async fn run(config: &Config) -> anyhow::Result<()> {
    print_banner(config);

    let theme = prompt_theme();

    loop {
        let selection = Select::with_theme(&theme)
            .with_prompt("What would you like to do?")
            .items(MENU_ITEMS)
            .default(0)
            .interact_opt()?;

        match selection {
            Some(0) => generate::guided_generate(config).await?,
            Some(1) => show_config(config)?,
            _ => break, // Exit or Ctrl+C / Esc
        }
    }

    Ok(())
}

/// Settings summary with options to dump the TOML or the file path.
fn show_config(config: &Config) -> anyhow::Result<()> {
    let theme = prompt_theme();
    let dim = Style::new().for_stderr().dim();
    let cyan = Style::new().for_stderr().cyan();
    let label = Style::new().for_stderr().bold();

    loop {
        eprintln!();
        eprintln!("  {}", cyan.apply_to("Current configuration:"));
        eprintln!();

        let config_path = Config::default_path();
        let path_note = if config_path.exists() {
            "(exists)"
        } else {
            "(using defaults)"
        };

        eprintln!(
            "    {:<20} {} {}",
            label.apply_to("Config file:"),
            config_path.display(),
            dim.apply_to(path_note)
        );
        eprintln!(
            "    {:<20} {}",
            label.apply_to("Language:"),
            config.default_language()
        );
        eprintln!(
            "    {:<20} {}",
            label.apply_to("Provider:"),
            config.default_provider()
        );
        eprintln!(
            "    {:<20} {} ({} max tokens)",
            label.apply_to("OpenAI model:"),
            config.providers.openai.model,
            config.providers.openai.max_tokens
        );
        eprintln!(
            "    {:<20} {} MB",
            label.apply_to("Max file size:"),
            config.limits.max_file_size_mb
        );
        eprintln!(
            "    {:<20} {}",
            label.apply_to("Request timeout:"),
            match config.limits.request_timeout_ms {
                Some(ms) => format!("{ms} ms"),
                None => "none".to_string(),
            }
        );
        eprintln!(
            "    {:<20} {} (sheet \"{}\")",
            label.apply_to("Export file:"),
            config.export.file_name,
            config.export.sheet_name
        );
        eprintln!(
            "    {:<20} {}",
            label.apply_to("Log level:"),
            config.logging.level
        );
        eprintln!();

        let items = &["View full config (TOML)", "Show config file path", "Back"];

        let selection = Select::with_theme(&theme)
            .with_prompt("Configuration")
            .items(items)
            .default(0)
            .interact_opt()?;

        match selection {
            Some(0) => match config.to_toml() {
                Ok(toml) => {
                    eprintln!();
                    eprintln!("{}", dim.apply_to("─".repeat(50)));
                    eprintln!("{toml}");
                    eprintln!("{}", dim.apply_to("─".repeat(50)));
                    eprintln!();
                }
                Err(e) => {
                    let err = Style::new().for_stderr().red();
                    eprintln!("  {} Failed to serialize config: {e}", err.apply_to("✗"));
                    eprintln!();
                }
            },
            Some(1) => {
                eprintln!();
                eprintln!("  {}", Config::default_path().display());
                eprintln!();
            }
            _ => break,
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_defaults_line_reflects_config() {
        assert_eq!(
            defaults_line(&Config::default()),
            "English via AltText.ai, exporting to alt_text_results.xlsx"
        );

        let mut config = Config::default();
        config.generation.language = "it".to_string();
        config.generation.provider = "openai".to_string();
        assert!(defaults_line(&config).starts_with("Italian via OpenAI"));
    }

    #[test]
    fn test_handle_interrupt_maps_interrupted_to_none() {
        let interrupted: dialoguer::Result<String> = Err(dialoguer::Error::IO(io::Error::new(
            io::ErrorKind::Interrupted,
            "ctrl-c",
        )));
        assert!(handle_interrupt(interrupted).unwrap().is_none());

        let ok: dialoguer::Result<String> = Ok("x".to_string());
        assert_eq!(handle_interrupt(ok).unwrap().as_deref(), Some("x"));

        let broken: dialoguer::Result<String> = Err(dialoguer::Error::IO(io::Error::new(
            io::ErrorKind::BrokenPipe,
            "gone",
        )));
        assert!(handle_interrupt(broken).is_err());
    }
}
