//! Error types for the tokenlens library.
//!
//! Tokenization, frequency indexing and search are total functions and never
//! produce errors. Everything that can fail lives at the boundary: file
//! import, export, and contention on the session's busy flag. These are
//! represented by [`ImportError`], [`ExportError`] and the umbrella
//! [`TokenlensError`].
//!
//! # Examples
//!
//! ```
//! use tokenlens::error::{Result, TokenlensError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(TokenlensError::config("debounce must be positive"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while turning a file into input text.
#[derive(Error, Debug)]
pub enum ImportError {
    /// No importer accepts the file extension.
    #[error("unsupported file type: {}, please choose a .txt or .xlsx file", .path.display())]
    UnsupportedType { path: PathBuf },

    /// The file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file is not valid UTF-8 text.
    #[error("{} is not valid UTF-8 text", .path.display())]
    UnsupportedEncoding { path: PathBuf },

    /// The container format could not be parsed.
    #[error("failed to parse {}: {reason}", .path.display())]
    ParseFailed { path: PathBuf, reason: String },

    /// The workbook holds no sheets or only blank rows.
    #[error("workbook {} contains no data", .path.display())]
    EmptyWorkbook { path: PathBuf },

    /// A cell holds a value that cannot be rendered as text.
    #[error("unsupported cell in sheet '{sheet}' at row {row}, column {column}")]
    UnsupportedCell {
        sheet: String,
        row: usize,
        column: usize,
    },
}

/// Errors raised while writing tokens to disk.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Rendering or writing the destination file failed.
    #[error("failed to write {}: {source}", .path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Background operations that hold the session's busy flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Import,
    Export,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Import => write!(f, "import"),
            Operation::Export => write!(f, "export"),
        }
    }
}

/// The main error type for tokenlens operations.
#[derive(Error, Debug)]
pub enum TokenlensError {
    /// I/O errors outside of import/export (config files, CLI output).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// File import failed.
    #[error("Import error: {0}")]
    Import(#[from] ImportError),

    /// Export failed.
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// An import or export is already in flight.
    #[error("Busy: cannot start {requested} while an {current} is in progress")]
    Busy {
        requested: Operation,
        current: Operation,
    },

    /// Export was requested with no tokens.
    #[error("Nothing to export: the token list is empty")]
    NothingToExport,

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// No async runtime is available to run background work.
    #[error("Runtime error: {0}")]
    Runtime(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with TokenlensError.
pub type Result<T> = std::result::Result<T, TokenlensError>;

impl TokenlensError {
    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        TokenlensError::Config(msg.into())
    }

    /// Create a new runtime error.
    pub fn runtime<S: Into<String>>(msg: S) -> Self {
        TokenlensError::Runtime(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        TokenlensError::Other(msg.into())
    }

    /// Create a new busy error.
    pub fn busy(requested: Operation, current: Operation) -> Self {
        TokenlensError::Busy { requested, current }
    }

    /// Whether this error is a busy rejection.
    pub fn is_busy(&self) -> bool {
        matches!(self, TokenlensError::Busy { .. })
    }
}
