//! File importers for turning documents into session input text.
//!
//! This module provides a [`FileImporter`] trait and implementations for
//! plain text and Excel workbooks. [`FileImportService`] picks the first
//! importer that accepts a path's extension.
//!
//! # Example
//!
//! ```no_run
//! use tokenlens::io::import::FileImportService;
//!
//! let service = FileImportService::new();
//! let text = service.import_file("notes.txt").unwrap();
//! println!("{} bytes imported", text.len());
//! ```

use std::fs;
use std::path::Path;

use log::debug;

use crate::error::ImportError;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Lowercased extension of `path`, if any.
pub fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}

/// A trait for reading one file format into plain text.
pub trait FileImporter: Send + Sync {
    /// Lowercase extensions this importer accepts, without the dot.
    fn extensions(&self) -> &'static [&'static str];

    /// Read and convert the file at `path`.
    fn import(&self, path: &Path) -> Result<String, ImportError>;

    /// Whether this importer accepts `path`.
    fn can_handle(&self, path: &Path) -> bool {
        extension_of(path).is_some_and(|ext| self.extensions().contains(&ext.as_str()))
    }
}

/// Reads UTF-8 text files.
#[derive(Debug, Clone, Default)]
pub struct TextFileImporter;

impl TextFileImporter {
    /// Create a new text importer.
    pub fn new() -> Self {
        TextFileImporter
    }
}

impl FileImporter for TextFileImporter {
    fn extensions(&self) -> &'static [&'static str] {
        &["txt"]
    }

    fn import(&self, path: &Path) -> Result<String, ImportError> {
        let mut bytes = fs::read(path).map_err(|source| ImportError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        if bytes.starts_with(UTF8_BOM) {
            bytes.drain(..UTF8_BOM.len());
        }
        String::from_utf8(bytes).map_err(|_| ImportError::UnsupportedEncoding {
            path: path.to_path_buf(),
        })
    }
}

/// Reads `.xlsx` workbooks as tab-separated rows.
///
/// Every sheet is read in workbook order. Cells are trimmed and joined with
/// tabs; rows whose cells are all blank are skipped.
#[cfg(feature = "xlsx")]
#[derive(Debug, Clone, Default)]
pub struct ExcelFileImporter;

#[cfg(feature = "xlsx")]
impl ExcelFileImporter {
    /// Create a new workbook importer.
    pub fn new() -> Self {
        ExcelFileImporter
    }
}

#[cfg(feature = "xlsx")]
impl FileImporter for ExcelFileImporter {
    fn extensions(&self) -> &'static [&'static str] {
        &["xlsx"]
    }

    fn import(&self, path: &Path) -> Result<String, ImportError> {
        use calamine::{Data, Reader, open_workbook_auto};

        let parse_failed = |reason: String| ImportError::ParseFailed {
            path: path.to_path_buf(),
            reason,
        };

        let mut workbook = open_workbook_auto(path).map_err(|e| match e {
            calamine::Error::Io(source) => ImportError::ReadFailed {
                path: path.to_path_buf(),
                source,
            },
            other => parse_failed(other.to_string()),
        })?;

        let mut lines: Vec<String> = Vec::new();
        for sheet in workbook.sheet_names() {
            let range = workbook
                .worksheet_range(&sheet)
                .map_err(|e| parse_failed(e.to_string()))?;
            let (first_row, first_column) = range.start().unwrap_or((0, 0));

            for (row_index, row) in range.rows().enumerate() {
                let mut values = Vec::with_capacity(row.len());
                for (column_index, cell) in row.iter().enumerate() {
                    let value = match cell {
                        Data::Empty => String::new(),
                        Data::Error(_) => {
                            return Err(ImportError::UnsupportedCell {
                                sheet: sheet.clone(),
                                row: first_row as usize + row_index + 1,
                                column: first_column as usize + column_index + 1,
                            });
                        }
                        other => other.to_string().trim().to_string(),
                    };
                    values.push(value);
                }
                if values.iter().all(String::is_empty) {
                    continue;
                }
                lines.push(values.join("\t"));
            }
        }

        if lines.is_empty() {
            return Err(ImportError::EmptyWorkbook {
                path: path.to_path_buf(),
            });
        }
        Ok(lines.join("\n"))
    }
}

/// Chooses an importer by extension and runs it.
pub struct FileImportService {
    importers: Vec<Box<dyn FileImporter>>,
}

impl std::fmt::Debug for FileImportService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileImportService")
            .field("extensions", &self.supported_extensions())
            .finish()
    }
}

impl Default for FileImportService {
    fn default() -> Self {
        Self::new()
    }
}

impl FileImportService {
    /// Create a service with the built-in importers.
    pub fn new() -> Self {
        #[cfg_attr(not(feature = "xlsx"), allow(unused_mut))]
        let mut importers: Vec<Box<dyn FileImporter>> = vec![Box::new(TextFileImporter::new())];
        #[cfg(feature = "xlsx")]
        importers.push(Box::new(ExcelFileImporter::new()));
        FileImportService { importers }
    }

    /// Create a service with custom importers, tried in order.
    pub fn with_importers(importers: Vec<Box<dyn FileImporter>>) -> Self {
        FileImportService { importers }
    }

    /// Every extension some importer accepts.
    pub fn supported_extensions(&self) -> Vec<&'static str> {
        self.importers
            .iter()
            .flat_map(|importer| importer.extensions().iter().copied())
            .collect()
    }

    /// Whether some importer accepts `path`.
    pub fn can_import(&self, path: &Path) -> bool {
        self.importers.iter().any(|importer| importer.can_handle(path))
    }

    /// Import `path` with the first importer that accepts it.
    pub fn import_file<P: AsRef<Path>>(&self, path: P) -> Result<String, ImportError> {
        let path = path.as_ref();
        let importer = self
            .importers
            .iter()
            .find(|importer| importer.can_handle(path))
            .ok_or_else(|| ImportError::UnsupportedType {
                path: path.to_path_buf(),
            })?;
        debug!("[Importer] reading {}", path.display());
        importer.import(path)
    }
}
