//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, TokenlensArgs};
use crate::error::Result;
use crate::session::{Notification, NotificationLevel};

/// Results that know how to print themselves for a terminal.
pub trait HumanOutput: Serialize {
    fn print_human(&self, verbosity: u8);
}

/// One token of the tokenize result.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenRow {
    pub position: usize,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_offset: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_offset: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
}

/// Result structure for the tokenize command.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenizeResult {
    pub engine: String,
    pub tokens: Vec<TokenRow>,
    pub total_tokens: usize,
    pub unique_tokens: usize,
    pub duration_us: u64,
}

/// One row of the frequency table.
#[derive(Debug, Serialize, Deserialize)]
pub struct FrequencyRow {
    pub token: String,
    pub freq: usize,
}

/// Result structure for the freq command.
#[derive(Debug, Serialize, Deserialize)]
pub struct FrequencyResult {
    pub total_tokens: usize,
    pub unique_tokens: usize,
    pub frequencies: Vec<FrequencyRow>,
}

/// One matched token.
#[derive(Debug, Serialize, Deserialize)]
pub struct MatchRow {
    pub index: usize,
    pub token: String,
}

/// Result structure for the search command.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResult {
    pub query: String,
    pub match_count: usize,
    pub total_tokens: usize,
    pub matches: Vec<MatchRow>,
}

/// Result structure for the export command.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExportResult {
    pub path: String,
    pub format: String,
    pub total_tokens: usize,
    pub unique_tokens: usize,
}

/// Output a result in the specified format.
pub fn output_result<T: HumanOutput>(message: &str, result: &T, args: &TokenlensArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 1 {
                println!("{message}");
                println!();
            }
            result.print_human(args.verbosity());
            Ok(())
        }
        OutputFormat::Json => output_json(result, args),
    }
}

fn output_json<T: Serialize>(result: &T, args: &TokenlensArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// Print session notifications to stderr.
///
/// Errors are always shown; info messages are hidden in quiet mode.
pub fn output_notifications(notifications: &[Notification], args: &TokenlensArgs) {
    for notification in notifications {
        match notification.level {
            NotificationLevel::Error => {
                eprintln!("[{}] {}", notification.source, notification.message)
            }
            NotificationLevel::Info if args.verbosity() > 0 => {
                eprintln!("[{}] {}", notification.source, notification.message)
            }
            NotificationLevel::Info => {}
        }
    }
}

impl HumanOutput for TokenizeResult {
    fn print_human(&self, verbosity: u8) {
        println!("Tokens ({}):", self.engine);
        println!("═══════════════");
        for row in &self.tokens {
            match (row.start_offset, row.end_offset, &row.token_type) {
                (Some(start), Some(end), Some(kind)) => {
                    println!("{:>5}  {}  [{start}..{end}) {kind}", row.position, row.text)
                }
                _ => println!("{:>5}  {}", row.position, row.text),
            }
        }
        println!();
        println!("Total tokens: {}", self.total_tokens);
        println!("Unique tokens: {}", self.unique_tokens);
        if verbosity > 0 {
            println!("Processing time: {}", format_duration_us(self.duration_us));
        }
    }
}

impl HumanOutput for FrequencyResult {
    fn print_human(&self, _verbosity: u8) {
        println!("Token Frequencies:");
        println!("══════════════════");
        let width = self
            .frequencies
            .iter()
            .map(|row| row.token.chars().count())
            .max()
            .unwrap_or(0);
        for row in &self.frequencies {
            let padding = width.saturating_sub(row.token.chars().count());
            println!("{}{}  {}", row.token, " ".repeat(padding), row.freq);
        }
        println!();
        println!("Total tokens: {}", self.total_tokens);
        println!("Unique tokens: {}", self.unique_tokens);
    }
}

impl HumanOutput for SearchResult {
    fn print_human(&self, _verbosity: u8) {
        println!("Search Results for '{}':", self.query);
        println!("═══════════════");
        for row in &self.matches {
            println!("{:>5}  {}", row.index, row.token);
        }
        println!();
        println!("Matched: {}/{}", self.match_count, self.total_tokens);
    }
}

impl HumanOutput for ExportResult {
    fn print_human(&self, _verbosity: u8) {
        println!(
            "Exported {} tokens ({} unique) as {} to {}",
            self.total_tokens, self.unique_tokens, self.format, self.path
        );
    }
}

/// Format a duration given in microseconds.
pub fn format_duration_us(us: u64) -> String {
    if us < 1_000 {
        format!("{us}µs")
    } else if us < 1_000_000 {
        format!("{:.2}ms", us as f64 / 1_000.0)
    } else {
        format!("{:.2}s", us as f64 / 1_000_000.0)
    }
}
