//! File import and export collaborators.
//!
//! The session hands work to these services on blocking worker threads;
//! they never touch session state themselves.

pub mod export;
pub mod import;

pub use export::{ExportFormat, TokenExportService, default_file_name};
#[cfg(feature = "xlsx")]
pub use import::ExcelFileImporter;
pub use import::{FileImportService, FileImporter, TextFileImporter};
