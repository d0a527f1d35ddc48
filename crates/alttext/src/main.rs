//! Alt Text CLI - generate image alt text with AltText.ai or OpenAI.
//!
//! Sends each image to the selected provider, prints the resulting table of
//! alt text and `<img>` snippets, and optionally exports it to Excel.
//!
//! # Usage
//!
//! ```bash
//! # Generate Italian alt text for a folder of images
//! alttext generate ./images --language italian --api-key $KEY
//!
//! # Use OpenAI and export the table
//! alttext generate cat.png dog.jpg --provider openai --export
//!
//! # Guided mode
//! alttext
//!
//! # View configuration
//! alttext config show
//! ```

use clap::{CommandFactory, Parser, Subcommand};
use std::io::IsTerminal;

mod cli;
mod logging;

/// Alt Text - generate image alt text with AltText.ai or OpenAI.
#[derive(Parser, Debug)]
#[command(name = "alttext")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate alt text for images and optionally export it to Excel
    Generate(cli::generate::GenerateArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so config warnings go through eprintln.
    let config = match alttext_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `alttext config path`."
            );
            alttext_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("alttext v{}", alttext_core::VERSION);

    match cli.command {
        Some(Commands::Generate(args)) => cli::generate::execute(args, &config).await,
        Some(Commands::Config(args)) => cli::config::execute(args, &config),
        None if std::io::stdin().is_terminal() && std::io::stderr().is_terminal() => {
            cli::interactive::run(&config).await
        }
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    }
}
