//! Messages flowing between background work, the session and the user.

use std::path::PathBuf;

use uuid::Uuid;

use crate::error::{ExportError, ImportError};
use crate::io::ExportFormat;
use crate::search::MatchSet;
use crate::session::busy::BusyGuard;

/// Completion of background work, applied by the session on its own task.
#[derive(Debug)]
pub(crate) enum SessionEvent {
    SearchCompleted {
        generation: u64,
        query: String,
        matches: MatchSet,
    },
    SearchFailed {
        generation: u64,
        reason: String,
    },
    ImportCompleted {
        path: PathBuf,
        ignored: usize,
        result: Result<String, ImportError>,
        guard: BusyGuard,
    },
    ExportCompleted {
        path: PathBuf,
        format: ExportFormat,
        result: Result<(), ExportError>,
        guard: BusyGuard,
    },
}

/// What applying one event did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    /// Matches for the current query were applied.
    SearchApplied { query: String, match_count: usize },
    /// A result for a superseded query or token revision was dropped.
    SearchDiscarded { query: String },
    /// The matching worker failed; matches stay empty.
    SearchFailed,
    /// An import replaced the input text.
    Imported { path: PathBuf, ignored: usize },
    /// An import failed; state is unchanged.
    ImportFailed { path: PathBuf, message: String },
    /// An export was written.
    Exported { path: PathBuf, format: ExportFormat },
    /// An export failed.
    ExportFailed { path: PathBuf, message: String },
}

/// Severity of a user-visible notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Error,
}

/// A user-visible message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: Uuid,
    pub level: NotificationLevel,
    /// Subsystem that raised it, e.g. `Importer`.
    pub source: &'static str,
    pub message: String,
}

impl Notification {
    pub fn info<S: Into<String>>(source: &'static str, message: S) -> Self {
        Notification {
            id: Uuid::new_v4(),
            level: NotificationLevel::Info,
            source,
            message: message.into(),
        }
    }

    pub fn error<S: Into<String>>(source: &'static str, message: S) -> Self {
        Notification {
            id: Uuid::new_v4(),
            level: NotificationLevel::Error,
            source,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NotificationLevel::Error
    }
}
