//! CSV and JSON export of token lists.
//!
//! Both formats carry token frequencies:
//!
//! ```csv
//! token,freq
//! hello,1
//! "value,with,comma",2
//! ```
//!
//! ```json
//! { "tokens": ["你", "好", "你"], "frequencies": { "你": 2, "好": 1 } }
//! ```
//!
//! Files are written to a temporary file in the destination directory and
//! then renamed over the destination, so readers never observe a partial
//! export.

use std::fmt;
use std::io::{self, Write};
use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, Local};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use log::debug;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::error::ExportError;
use crate::frequency::{FrequencyIndexer, FrequencyMap};

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    /// File extension for this format, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(format!("unknown export format: {other}")),
        }
    }
}

/// Suggested file name for an export started at `now`.
///
/// ```
/// use chrono::{Local, TimeZone};
/// use tokenlens::io::export::{ExportFormat, default_file_name};
///
/// let now = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
/// assert_eq!(
///     default_file_name(ExportFormat::Csv, now),
///     "tokenizer-result-20240309-140507.csv"
/// );
/// ```
pub fn default_file_name(format: ExportFormat, now: DateTime<Local>) -> String {
    format!(
        "tokenizer-result-{}.{}",
        now.format("%Y%m%d-%H%M%S"),
        format.extension()
    )
}

#[derive(Serialize)]
struct ExportDocument<'a> {
    tokens: Vec<&'a str>,
    frequencies: FrequencyMap,
}

/// Writes token lists with their frequencies.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenExportService;

impl TokenExportService {
    /// Create a new export service.
    pub fn new() -> Self {
        TokenExportService
    }

    /// Export `tokens` to `path` in `format`.
    pub fn export<S, P>(&self, tokens: &[S], path: P, format: ExportFormat) -> Result<(), ExportError>
    where
        S: AsRef<str>,
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let write_failed = |source: io::Error| ExportError::WriteFailed {
            path: path.to_path_buf(),
            source,
        };

        let data = self.render(tokens, format).map_err(write_failed)?;
        write_atomic(path, &data).map_err(write_failed)?;
        debug!(
            "[Exporter] wrote {} tokens as {} to {}",
            tokens.len(),
            format,
            path.display()
        );
        Ok(())
    }

    /// Render `tokens` in `format` without touching the filesystem.
    pub fn render<S: AsRef<str>>(&self, tokens: &[S], format: ExportFormat) -> io::Result<Vec<u8>> {
        match format {
            ExportFormat::Csv => render_csv(tokens),
            ExportFormat::Json => render_json(tokens),
        }
    }
}

/// Render the `token,freq` table, one row per distinct token in
/// first-occurrence order.
pub fn render_csv<S: AsRef<str>>(tokens: &[S]) -> io::Result<Vec<u8>> {
    let frequencies = FrequencyIndexer::index(tokens);
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(["token", "freq"])?;
    for (token, count) in frequencies.iter() {
        writer.write_record([token, count.to_string().as_str()])?;
    }
    writer.into_inner().map_err(|e| e.into_error())
}

/// Render the `{ tokens, frequencies }` document as pretty JSON.
pub fn render_json<S: AsRef<str>>(tokens: &[S]) -> io::Result<Vec<u8>> {
    let document = ExportDocument {
        tokens: tokens.iter().map(|t| t.as_ref()).collect(),
        frequencies: FrequencyIndexer::index(tokens),
    };
    Ok(serde_json::to_vec_pretty(&document)?)
}

fn write_atomic(path: &Path, data: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(data)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_csv_escapes_special_characters() {
        let tokens = ["hello", "value,with,comma", "value,with,comma", "value\"quote"];
        let csv = String::from_utf8(render_csv(&tokens).unwrap()).unwrap();

        assert_eq!(
            csv,
            "token,freq\nhello,1\n\"value,with,comma\",2\n\"value\"\"quote\",1\n"
        );
    }

    #[test]
    fn test_csv_quotes_newlines() {
        let csv = String::from_utf8(render_csv(&["a\nb", "c\rd"]).unwrap()).unwrap();
        assert_eq!(csv, "token,freq\n\"a\nb\",1\n\"c\rd\",1\n");
    }

    #[test]
    fn test_json_document_shape() {
        let tokens = ["你", "好", "world", "123", "你"];
        let value: serde_json::Value =
            serde_json::from_slice(&render_json(&tokens).unwrap()).unwrap();

        assert_eq!(value["tokens"], serde_json::json!(tokens));
        assert_eq!(
            value["frequencies"],
            serde_json::json!({"你": 2, "好": 1, "world": 1, "123": 1})
        );
    }

    #[test]
    fn test_export_writes_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tokens.json");

        TokenExportService::new()
            .export(&["a", "b", "a"], &path, ExportFormat::Json)
            .unwrap();

        let value: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(value["frequencies"]["a"], 2);
    }

    #[test]
    fn test_export_to_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("tokens.csv");

        let err = TokenExportService::new()
            .export(&["a"], &path, ExportFormat::Csv)
            .unwrap_err();
        assert!(matches!(err, ExportError::WriteFailed { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("CSV".parse::<ExportFormat>(), Ok(ExportFormat::Csv));
        assert_eq!("json".parse::<ExportFormat>(), Ok(ExportFormat::Json));
        assert!("xml".parse::<ExportFormat>().is_err());
    }
}
