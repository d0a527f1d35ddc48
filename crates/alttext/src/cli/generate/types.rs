//! CLI enum types for the generate command: language, provider, output format.

use alttext_core::{Language, OutputFormat as CoreOutputFormat, ProviderKind};
use clap::ValueEnum;

/// Target language for the generated alt text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LanguageArg {
    #[value(alias = "en")]
    English,
    #[value(alias = "es")]
    Spanish,
    #[value(alias = "fr")]
    French,
    #[value(alias = "de")]
    German,
    #[value(alias = "it")]
    Italian,
}

impl From<LanguageArg> for Language {
    fn from(arg: LanguageArg) -> Self {
        match arg {
            LanguageArg::English => Language::English,
            LanguageArg::Spanish => Language::Spanish,
            LanguageArg::French => Language::French,
            LanguageArg::German => Language::German,
            LanguageArg::Italian => Language::Italian,
        }
    }
}

/// Supported alt text providers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ProviderArg {
    /// AltText.ai image description API
    #[value(name = "alttext-ai", alias = "alttext")]
    AltTextAi,
    /// OpenAI completions API
    Openai,
}

impl From<ProviderArg> for ProviderKind {
    fn from(arg: ProviderArg) -> Self {
        match arg {
            ProviderArg::AltTextAi => ProviderKind::AltTextAi,
            ProviderArg::Openai => ProviderKind::OpenAi,
        }
    }
}

impl std::fmt::Display for ProviderArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", ProviderKind::from(*self).id())
    }
}

/// How the result table is printed to stdout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned text table
    Table,
    /// Single JSON array
    Json,
    /// One JSON object per line (newline-delimited)
    Jsonl,
}

impl From<OutputFormat> for CoreOutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Table => CoreOutputFormat::Table,
            OutputFormat::Json => CoreOutputFormat::Json,
            OutputFormat::Jsonl => CoreOutputFormat::JsonLines,
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Jsonl => write!(f, "jsonl"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_arg_accepts_codes() {
        let arg = LanguageArg::from_str("it", true).unwrap();
        assert_eq!(Language::from(arg), Language::Italian);
        let arg = LanguageArg::from_str("German", true).unwrap();
        assert_eq!(Language::from(arg), Language::German);
    }

    #[test]
    fn test_provider_arg_names_match_config_ids() {
        for arg in [ProviderArg::AltTextAi, ProviderArg::Openai] {
            let kind = ProviderKind::from(arg);
            assert_eq!(ProviderKind::parse(&arg.to_string()), Some(kind));
        }
        assert_eq!(
            ProviderArg::from_str("alttext-ai", false).unwrap(),
            ProviderArg::AltTextAi
        );
    }

    #[test]
    fn test_output_format_round_trips_through_core_parser() {
        for format in [OutputFormat::Table, OutputFormat::Json, OutputFormat::Jsonl] {
            assert_eq!(
                CoreOutputFormat::parse(&format.to_string()),
                Some(format.into())
            );
        }
    }
}
