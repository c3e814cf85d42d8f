//! Command line argument parsing for the tokenlens CLI using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::analysis::tokenizer::EngineKind;
use crate::config::SessionConfig;
use crate::error::{Result, TokenlensError};
use crate::io::ExportFormat;

/// tokenlens - tokenize mixed Chinese/English text, count and search tokens
#[derive(Parser, Debug, Clone)]
#[command(name = "tokenlens")]
#[command(about = "Tokenize mixed Chinese/English text, count token frequencies and search tokens")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct TokenlensArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Session configuration file (JSON)
    #[arg(long, env = "TOKENLENS_CONFIG", value_name = "CONFIG_FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Tokenizer engine (unicode_word, whitespace)
    #[arg(long, global = true)]
    pub engine: Option<EngineKind>,

    /// Search debounce interval in milliseconds
    #[arg(long, global = true)]
    pub debounce_ms: Option<u64>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl TokenlensArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1,
                n => n,
            }
        }
    }

    /// Load the config file, if any, and apply command line overrides.
    pub fn session_config(&self) -> Result<SessionConfig> {
        let mut config = match &self.config {
            Some(path) => SessionConfig::from_file(path)?,
            None => SessionConfig::default(),
        };
        if let Some(engine) = self.engine {
            config = config.engine(engine);
        }
        if let Some(debounce_ms) = self.debounce_ms {
            config = config.debounce_ms(debounce_ms);
        }
        config.validate()?;
        Ok(config)
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print the token sequence
    Tokenize(TokenizeArgs),

    /// Print the token frequency table
    Freq(FreqArgs),

    /// Find tokens containing a query
    Search(SearchArgs),

    /// Write tokens and frequencies to a CSV or JSON file
    Export(ExportArgs),
}

/// Where the text to tokenize comes from.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// File to import (.txt or .xlsx)
    #[arg(value_name = "INPUT", conflicts_with = "text")]
    pub input: Option<PathBuf>,

    /// Inline text instead of a file
    #[arg(short, long)]
    pub text: Option<String>,
}

/// Resolved text source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    File(PathBuf),
    Text(String),
}

impl InputArgs {
    /// Pick the input source, requiring exactly one.
    pub fn source(&self) -> Result<InputSource> {
        match (&self.input, &self.text) {
            (Some(path), None) => Ok(InputSource::File(path.clone())),
            (None, Some(text)) => Ok(InputSource::Text(text.clone())),
            (None, None) => Err(TokenlensError::other(
                "no input given, pass a file path or --text",
            )),
            (Some(_), Some(_)) => Err(TokenlensError::other(
                "pass either a file path or --text, not both",
            )),
        }
    }
}

/// Arguments for tokenizing
#[derive(Args, Debug, Clone)]
pub struct TokenizeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Include character offsets and token types
    #[arg(short, long)]
    pub detailed: bool,
}

/// Arguments for the frequency table
#[derive(Args, Debug, Clone)]
pub struct FreqArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Only show the N most frequent tokens
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,
}

/// Arguments for searching
#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// Query string
    #[arg(value_name = "QUERY")]
    pub query: String,

    #[command(flatten)]
    pub input: InputArgs,
}

/// Arguments for exporting
#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Export format (csv, json)
    #[arg(long = "as", value_name = "FORMAT", default_value = "csv")]
    pub export_format: ExportFormat,

    /// Destination file (default: tokenizer-result-<timestamp>.<ext>)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_with_inline_text() {
        let args =
            TokenlensArgs::try_parse_from(["tokenlens", "tokenize", "--text", "你好 world"])
                .unwrap();

        if let Command::Tokenize(tokenize_args) = args.command {
            assert_eq!(
                tokenize_args.input.source().unwrap(),
                InputSource::Text("你好 world".to_string())
            );
            assert!(!tokenize_args.detailed);
        } else {
            panic!("Expected Tokenize command");
        }
    }

    #[test]
    fn test_search_command() {
        let args =
            TokenlensArgs::try_parse_from(["tokenlens", "search", "cafe", "notes.txt"]).unwrap();

        if let Command::Search(search_args) = args.command {
            assert_eq!(search_args.query, "cafe");
            assert_eq!(
                search_args.input.source().unwrap(),
                InputSource::File(PathBuf::from("notes.txt"))
            );
        } else {
            panic!("Expected Search command");
        }
    }

    #[test]
    fn test_export_command() {
        let args = TokenlensArgs::try_parse_from([
            "tokenlens",
            "export",
            "notes.txt",
            "--as",
            "JSON",
            "-o",
            "out.json",
        ])
        .unwrap();

        if let Command::Export(export_args) = args.command {
            assert_eq!(export_args.export_format, ExportFormat::Json);
            assert_eq!(export_args.output, Some(PathBuf::from("out.json")));
        } else {
            panic!("Expected Export command");
        }
    }

    #[test]
    fn test_input_and_text_conflict() {
        let result = TokenlensArgs::try_parse_from([
            "tokenlens",
            "freq",
            "notes.txt",
            "--text",
            "hello",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_input() {
        let args = TokenlensArgs::try_parse_from(["tokenlens", "freq"]).unwrap();
        if let Command::Freq(freq_args) = args.command {
            assert!(freq_args.input.source().is_err());
        } else {
            panic!("Expected Freq command");
        }
    }

    #[test]
    fn test_global_options() {
        let args = TokenlensArgs::try_parse_from([
            "tokenlens",
            "-vv",
            "--format",
            "json",
            "--engine",
            "whitespace",
            "--debounce-ms",
            "50",
            "tokenize",
            "--text",
            "a b",
        ])
        .unwrap();

        assert_eq!(args.verbosity(), 2);
        assert_eq!(args.output_format, OutputFormat::Json);
        let config = args.session_config().unwrap();
        assert_eq!(config.engine, EngineKind::Whitespace);
        assert_eq!(config.debounce_ms, 50);
    }

    #[test]
    fn test_quiet_overrides_verbose() {
        let args =
            TokenlensArgs::try_parse_from(["tokenlens", "-q", "-vvv", "tokenize", "-t", "x"])
                .unwrap();
        assert_eq!(args.verbosity(), 0);
    }
}
