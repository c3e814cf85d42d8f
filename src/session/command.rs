//! Menu-equivalent actions a host shell can send to a session.

use std::path::PathBuf;

use crate::io::ExportFormat;

/// One user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Import a file and make its text the new input.
    OpenFile(PathBuf),
    /// Export tokens and frequencies as CSV.
    ExportCsv(PathBuf),
    /// Export tokens and frequencies as JSON.
    ExportJson(PathBuf),
    /// Replace the input with the empty string.
    Clear,
}

impl Command {
    /// Build the export command for `format`.
    pub fn export(format: ExportFormat, path: PathBuf) -> Self {
        match format {
            ExportFormat::Csv => Command::ExportCsv(path),
            ExportFormat::Json => Command::ExportJson(path),
        }
    }
}
