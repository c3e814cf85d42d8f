//! The tokenization session.
//!
//! A [`TokenizationSession`] owns the input text and everything derived from
//! it: the token sequence, the frequency map and the search state. Text
//! changes recompute all derived state synchronously. Query changes are
//! debounced and matched on a worker; results come back as events that the
//! session applies on its own task, dropping any result whose query has been
//! superseded.
//!
//! # Examples
//!
//! ```
//! use tokenlens::config::SessionConfig;
//! use tokenlens::session::TokenizationSession;
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let mut session = TokenizationSession::new(SessionConfig::default()).unwrap();
//! session.set_input_text("你好，world 123！你好");
//! assert_eq!(session.total_token_count(), 6);
//! assert_eq!(session.unique_token_count(), 5);
//!
//! session.set_search_query("WORLD");
//! session.settle().await;
//! assert_eq!(session.match_count(), 1);
//! assert!(session.is_token_matched(2));
//! # });
//! ```

use std::collections::VecDeque;
use std::io;
use std::mem;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{debug, info, warn};
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::analysis::token::TokenSequence;
use crate::analysis::tokenizer::{EngineKind, TokenizerEngine};
use crate::config::SessionConfig;
use crate::error::{ExportError, ImportError, Operation, Result, TokenlensError};
use crate::frequency::{FrequencyIndexer, FrequencyMap};
use crate::io::{ExportFormat, FileImportService, TokenExportService};
use crate::search::{MatchSet, SearchMatcher, SearchState};
use crate::session::busy::{BusyFlag, BusyGuard};
use crate::session::command::Command;
use crate::session::debounce::Debouncer;
use crate::session::event::{EventOutcome, Notification, SessionEvent};

const BUSY_MESSAGE: &str = "Another task is in progress, please try again later.";

/// Notifications kept when the host does not drain them; the oldest go first.
pub const MAX_PENDING_NOTIFICATIONS: usize = 32;

/// Whether a debounced search recompute is outstanding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    SearchPending { query: String },
}

#[derive(Debug, Clone)]
struct PendingSearch {
    generation: u64,
    query: String,
}

/// Builder for [`TokenizationSession`].
pub struct SessionBuilder {
    config: SessionConfig,
    engine: Option<Arc<dyn TokenizerEngine>>,
    importer: Option<FileImportService>,
    runtime: Option<Handle>,
    initial_text: String,
}

impl SessionBuilder {
    /// Use a custom engine instead of the one named by the config.
    pub fn engine(mut self, engine: Arc<dyn TokenizerEngine>) -> Self {
        self.engine = Some(engine);
        self
    }

    /// Use a custom import service.
    pub fn importer(mut self, importer: FileImportService) -> Self {
        self.importer = Some(importer);
        self
    }

    /// Spawn background work onto `runtime` instead of the current one.
    pub fn runtime(mut self, runtime: Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    /// Text to tokenize on construction.
    pub fn initial_text<S: Into<String>>(mut self, text: S) -> Self {
        self.initial_text = text.into();
        self
    }

    /// Build the session.
    pub fn build(self) -> Result<TokenizationSession> {
        self.config.validate()?;
        let runtime = match self.runtime {
            Some(runtime) => runtime,
            None => Handle::try_current().map_err(|e| {
                TokenlensError::runtime(format!("a tokio runtime is required: {e}"))
            })?,
        };
        let (engine_kind, engine) = match self.engine {
            Some(engine) => (None, engine),
            None => (Some(self.config.engine), self.config.engine.build(&self.config)),
        };
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        let mut session = TokenizationSession {
            matcher: SearchMatcher::new()
                .with_parallel_threshold(self.config.parallel_search_threshold),
            debouncer: Debouncer::new(runtime.clone(), self.config.debounce()),
            config: self.config,
            engine_kind,
            engine,
            importer: Arc::new(self.importer.unwrap_or_default()),
            exporter: TokenExportService::new(),
            runtime,
            input_text: String::new(),
            tokens: Arc::new(TokenSequence::new()),
            folded: Arc::new(Vec::new()),
            frequencies: FrequencyMap::new(),
            search: SearchState::new(),
            processing_duration: Duration::ZERO,
            generation: 0,
            pending_search: None,
            busy: BusyFlag::new(),
            busy_status: None,
            events_tx,
            events_rx,
            notifications: VecDeque::with_capacity(MAX_PENDING_NOTIFICATIONS),
        };
        session.set_input_text(self.initial_text);
        Ok(session)
    }
}

/// Owns input text and all state derived from it.
pub struct TokenizationSession {
    config: SessionConfig,
    engine_kind: Option<EngineKind>,
    engine: Arc<dyn TokenizerEngine>,
    matcher: SearchMatcher,
    importer: Arc<FileImportService>,
    exporter: TokenExportService,
    runtime: Handle,

    input_text: String,
    tokens: Arc<TokenSequence>,
    folded: Arc<Vec<String>>,
    frequencies: FrequencyMap,
    search: SearchState,
    processing_duration: Duration,

    generation: u64,
    pending_search: Option<PendingSearch>,
    debouncer: Debouncer,

    busy: BusyFlag,
    busy_status: Option<String>,
    events_tx: UnboundedSender<SessionEvent>,
    events_rx: UnboundedReceiver<SessionEvent>,
    notifications: VecDeque<Notification>,
}

impl std::fmt::Debug for TokenizationSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenizationSession")
            .field("engine", &self.engine.name())
            .field("tokens", &self.tokens.len())
            .field("unique", &self.frequencies.len())
            .field("query", &self.search.normalized_query())
            .field("state", &self.state())
            .field("busy", &self.busy.current())
            .finish()
    }
}

impl TokenizationSession {
    /// Create a session on the current tokio runtime.
    pub fn new(config: SessionConfig) -> Result<Self> {
        Self::builder(config).build()
    }

    /// Start building a session.
    pub fn builder(config: SessionConfig) -> SessionBuilder {
        SessionBuilder {
            config,
            engine: None,
            importer: None,
            runtime: None,
            initial_text: String::new(),
        }
    }

    // =========================================================================
    // Text and search transitions
    // =========================================================================

    /// Replace the input text and recompute every derived value.
    ///
    /// Tokens, frequencies and matches for the current query are rebuilt
    /// before this returns. Any pending debounced search is cancelled since
    /// the synchronous recompute supersedes it.
    pub fn set_input_text<S: Into<String>>(&mut self, text: S) {
        let text = text.into();
        let started = Instant::now();
        let tokens = self.engine.tokenize(&text);
        let frequencies = FrequencyIndexer::index(tokens.texts());
        let folded = self.matcher.fold_tokens(tokens.as_slice());
        self.processing_duration = started.elapsed();

        debug!(
            "[Tokenizer] {} produced {} tokens ({} unique) in {:?}",
            self.engine.name(),
            tokens.len(),
            frequencies.len(),
            self.processing_duration
        );

        self.input_text = text;
        self.tokens = Arc::new(tokens);
        self.folded = Arc::new(folded);
        self.frequencies = frequencies;
        self.refresh_search();
    }

    /// Update the search query.
    ///
    /// A blank query clears the matches immediately. Otherwise the matches
    /// are cleared and a recompute is scheduled after the debounce interval,
    /// replacing any recompute scheduled earlier.
    pub fn set_search_query(&mut self, query: &str) {
        self.debouncer.cancel();
        self.pending_search = None;

        if !self.search.set_query(query) {
            return;
        }

        self.generation += 1;
        let generation = self.generation;
        let normalized = self.search.normalized_query().to_string();
        let folded_query = self.search.folded_query().to_string();
        let folded_tokens = Arc::clone(&self.folded);
        let matcher = self.matcher.clone();
        let events = self.events_tx.clone();

        self.pending_search = Some(PendingSearch {
            generation,
            query: normalized.clone(),
        });
        self.debouncer.schedule(async move {
            let matched = tokio::task::spawn_blocking(move || {
                matcher.find_folded(&folded_tokens, &folded_query)
            })
            .await;
            let event = match matched {
                Ok(matches) => SessionEvent::SearchCompleted {
                    generation,
                    query: normalized,
                    matches,
                },
                Err(e) => SessionEvent::SearchFailed {
                    generation,
                    reason: e.to_string(),
                },
            };
            let _ = events.send(event);
        });
    }

    /// Recompute matches for the current query against the current tokens.
    fn refresh_search(&mut self) {
        self.debouncer.cancel();
        self.pending_search = None;

        if !self.search.is_active() {
            self.search.clear_matches();
            return;
        }
        let matches = self
            .matcher
            .find_folded(&self.folded, self.search.folded_query());
        self.search.apply(matches);
    }

    /// Swap the tokenizer engine and re-tokenize the current text.
    pub fn select_engine(&mut self, kind: EngineKind) {
        if self.engine_kind == Some(kind) {
            return;
        }
        info!("[Tokenizer] switching engine to {kind}");
        self.engine = kind.build(&self.config);
        self.engine_kind = Some(kind);
        let text = mem::take(&mut self.input_text);
        self.set_input_text(text);
    }

    /// Clear the input text.
    pub fn clear(&mut self) {
        self.set_input_text(String::new());
        self.notify(Notification::info("Session", "Input cleared."));
    }

    // =========================================================================
    // Import and export
    // =========================================================================

    /// Import `path` in the background.
    ///
    /// Fails immediately if another import or export is in flight or the
    /// file type is not supported. On completion the file's text becomes the
    /// input text; on failure the current state is left untouched.
    pub fn start_import<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.begin_import(path.as_ref().to_path_buf(), 0)
    }

    /// Import the first of several dropped files, ignoring the rest.
    pub fn handle_drop(&mut self, paths: &[PathBuf]) -> Result<()> {
        let Some(first) = paths.first() else {
            let message = format!(
                "Only {} files are supported.",
                self.supported_extensions_label()
            );
            self.notify(Notification::error("Importer", message));
            return Err(TokenlensError::other("no files were dropped"));
        };
        self.begin_import(first.clone(), paths.len() - 1)
    }

    fn begin_import(&mut self, path: PathBuf, ignored: usize) -> Result<()> {
        let guard = self.acquire(Operation::Import, "Importer")?;

        if !self.importer.can_import(&path) {
            let message = format!(
                "Only {} files are supported.",
                self.supported_extensions_label()
            );
            self.notify(Notification::error("Importer", message));
            return Err(ImportError::UnsupportedType { path }.into());
        }

        self.busy_status = Some(format!("Importing {}…", display_name(&path)));
        info!("[Importer] starting import: {}", path.display());

        let importer = Arc::clone(&self.importer);
        let events = self.events_tx.clone();
        self.runtime.spawn(async move {
            let job_path = path.clone();
            let result = tokio::task::spawn_blocking(move || importer.import_file(&job_path))
                .await
                .unwrap_or_else(|e| {
                    Err(ImportError::ReadFailed {
                        path: path.clone(),
                        source: io::Error::other(e.to_string()),
                    })
                });
            let _ = events.send(SessionEvent::ImportCompleted {
                path,
                ignored,
                result,
                guard,
            });
        });
        Ok(())
    }

    /// Export the current tokens in the background.
    ///
    /// Fails immediately if there is nothing to export or another import or
    /// export is in flight. The export works on a snapshot of the tokens, so
    /// edits made meanwhile do not affect it.
    pub fn start_export<P: AsRef<Path>>(&mut self, path: P, format: ExportFormat) -> Result<()> {
        let path = path.as_ref().to_path_buf();
        if self.tokens.is_empty() {
            self.notify(Notification::info("Exporter", "There are no tokens to export."));
            return Err(TokenlensError::NothingToExport);
        }
        let guard = self.acquire(Operation::Export, "Exporter")?;

        self.busy_status = Some(format!("Exporting {}…", display_name(&path)));
        info!("[Exporter] starting {} export: {}", format, path.display());

        let tokens = Arc::clone(&self.tokens);
        let exporter = self.exporter;
        let events = self.events_tx.clone();
        self.runtime.spawn(async move {
            let job_path = path.clone();
            let result = tokio::task::spawn_blocking(move || {
                exporter.export(tokens.as_slice(), &job_path, format)
            })
            .await
            .unwrap_or_else(|e| {
                Err(ExportError::WriteFailed {
                    path: path.clone(),
                    source: io::Error::other(e.to_string()),
                })
            });
            let _ = events.send(SessionEvent::ExportCompleted {
                path,
                format,
                result,
                guard,
            });
        });
        Ok(())
    }

    /// Run a menu-equivalent command.
    pub fn dispatch(&mut self, command: Command) -> Result<()> {
        match command {
            Command::OpenFile(path) => self.start_import(path),
            Command::ExportCsv(path) => self.start_export(path, ExportFormat::Csv),
            Command::ExportJson(path) => self.start_export(path, ExportFormat::Json),
            Command::Clear => {
                self.clear();
                Ok(())
            }
        }
    }

    fn acquire(&mut self, operation: Operation, source: &'static str) -> Result<BusyGuard> {
        self.busy.try_acquire(operation).inspect_err(|e| {
            warn!("[{source}] rejected: {e}");
            self.notify(Notification::error(source, BUSY_MESSAGE));
        })
    }

    fn supported_extensions_label(&self) -> String {
        self.importer
            .supported_extensions()
            .iter()
            .map(|ext| format!(".{ext}"))
            .collect::<Vec<_>>()
            .join(" / ")
    }

    // =========================================================================
    // Event application
    // =========================================================================

    /// Apply every event that has already arrived, without waiting.
    pub fn apply_pending_events(&mut self) -> Vec<EventOutcome> {
        let mut outcomes = Vec::new();
        while let Ok(event) = self.events_rx.try_recv() {
            outcomes.push(self.apply_event(event));
        }
        outcomes
    }

    /// Wait for the next event and apply it.
    pub async fn process_next_event(&mut self) -> Option<EventOutcome> {
        let event = self.events_rx.recv().await?;
        Some(self.apply_event(event))
    }

    /// Whether a search recompute or an import/export is still outstanding.
    pub fn has_outstanding_work(&self) -> bool {
        self.pending_search.is_some() || self.busy.is_busy()
    }

    /// Apply events until no search is pending and nothing is in flight.
    pub async fn settle(&mut self) -> Vec<EventOutcome> {
        let mut outcomes = Vec::new();
        while self.has_outstanding_work() {
            match self.process_next_event().await {
                Some(outcome) => outcomes.push(outcome),
                None => break,
            }
        }
        outcomes
    }

    fn apply_event(&mut self, event: SessionEvent) -> EventOutcome {
        match event {
            SessionEvent::SearchCompleted {
                generation,
                query,
                matches,
            } => self.apply_search(generation, query, matches),
            SessionEvent::SearchFailed { generation, reason } => {
                if self.is_current_search(generation) {
                    self.pending_search = None;
                }
                warn!("[Search] matching failed: {reason}");
                EventOutcome::SearchFailed
            }
            SessionEvent::ImportCompleted {
                path,
                ignored,
                result,
                guard,
            } => {
                drop(guard);
                self.busy_status = None;
                self.apply_import(path, ignored, result)
            }
            SessionEvent::ExportCompleted {
                path,
                format,
                result,
                guard,
            } => {
                drop(guard);
                self.busy_status = None;
                self.apply_export(path, format, result)
            }
        }
    }

    fn is_current_search(&self, generation: u64) -> bool {
        self.pending_search
            .as_ref()
            .is_some_and(|pending| pending.generation == generation)
    }

    fn apply_search(&mut self, generation: u64, query: String, matches: MatchSet) -> EventOutcome {
        if !self.is_current_search(generation) || query != self.search.normalized_query() {
            debug!("[Search] discarding stale result for '{query}'");
            return EventOutcome::SearchDiscarded { query };
        }
        self.pending_search = None;
        let match_count = matches.len();
        self.search.apply(matches);
        debug!("[Search] '{query}' matched {match_count} tokens");
        EventOutcome::SearchApplied { query, match_count }
    }

    fn apply_import(
        &mut self,
        path: PathBuf,
        ignored: usize,
        result: std::result::Result<String, ImportError>,
    ) -> EventOutcome {
        let name = display_name(&path);
        match result {
            Ok(text) => {
                self.set_input_text(text);
                let message = if ignored > 0 {
                    format!("Imported {name}, ignored {ignored} other file(s).")
                } else {
                    format!("Imported {name}.")
                };
                info!("[Importer] import succeeded: {name}");
                self.notify(Notification::info("Importer", message));
                EventOutcome::Imported { path, ignored }
            }
            Err(e) => {
                let message = match &e {
                    ImportError::UnsupportedType { .. } => e.to_string(),
                    other => format!("Failed to import {name}: {other}"),
                };
                warn!("[Importer] {message}");
                self.notify(Notification::error("Importer", message.clone()));
                EventOutcome::ImportFailed { path, message }
            }
        }
    }

    fn apply_export(
        &mut self,
        path: PathBuf,
        format: ExportFormat,
        result: std::result::Result<(), ExportError>,
    ) -> EventOutcome {
        let name = display_name(&path);
        match result {
            Ok(()) => {
                info!("[Exporter] export succeeded: {name}");
                self.notify(Notification::info("Exporter", format!("Exported to {name}.")));
                EventOutcome::Exported { path, format }
            }
            Err(e) => {
                let message = format!("Failed to export {name}: {e}");
                warn!("[Exporter] {message}");
                self.notify(Notification::error("Exporter", message.clone()));
                EventOutcome::ExportFailed { path, message }
            }
        }
    }

    // =========================================================================
    // Notifications
    // =========================================================================

    fn notify(&mut self, notification: Notification) {
        if self.notifications.len() == MAX_PENDING_NOTIFICATIONS {
            self.notifications.pop_front();
        }
        self.notifications.push_back(notification);
    }

    /// The most recent notification, if any are queued.
    pub fn last_notification(&self) -> Option<&Notification> {
        self.notifications.back()
    }

    /// Remove and return all queued notifications, oldest first.
    ///
    /// Draining is the host's job. Undrained notifications are capped at
    /// [`MAX_PENDING_NOTIFICATIONS`], dropping the oldest.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain(..).collect()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Whether a debounced search recompute is outstanding.
    pub fn state(&self) -> SessionState {
        match &self.pending_search {
            Some(pending) => SessionState::SearchPending {
                query: pending.query.clone(),
            },
            None => SessionState::Idle,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    pub fn tokens(&self) -> &TokenSequence {
        &self.tokens
    }

    pub fn frequencies(&self) -> &FrequencyMap {
        &self.frequencies
    }

    pub fn total_token_count(&self) -> usize {
        self.tokens.len()
    }

    pub fn unique_token_count(&self) -> usize {
        self.frequencies.len()
    }

    /// The query as typed.
    pub fn search_query(&self) -> &str {
        self.search.raw_query()
    }

    pub fn normalized_query(&self) -> &str {
        self.search.normalized_query()
    }

    pub fn matches(&self) -> &MatchSet {
        self.search.matches()
    }

    pub fn match_count(&self) -> usize {
        self.search.match_count()
    }

    /// O(1); false for indices outside the current tokens.
    pub fn is_token_matched(&self, index: usize) -> bool {
        index < self.tokens.len() && self.search.is_matched(index)
    }

    pub fn is_busy(&self) -> bool {
        self.busy.is_busy()
    }

    /// Status line for the operation in flight, e.g. `Importing notes.txt…`.
    pub fn busy_status(&self) -> Option<&str> {
        self.busy_status.as_deref()
    }

    /// Time spent in the last tokenize + index pass.
    pub fn processing_duration(&self) -> Duration {
        self.processing_duration
    }

    /// The selected engine, or `None` for a custom engine.
    pub fn engine_kind(&self) -> Option<EngineKind> {
        self.engine_kind
    }

    pub fn engine_name(&self) -> &'static str {
        self.engine.name()
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> TokenizationSession {
        TokenizationSession::new(SessionConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_set_input_text_is_idempotent() {
        let mut session = session();
        session.set_input_text("hello world hello");
        let tokens = session.tokens().clone();
        let frequencies = session.frequencies().clone();

        session.set_input_text("hello world hello");
        assert_eq!(session.tokens(), &tokens);
        assert_eq!(session.frequencies(), &frequencies);
        assert_eq!(session.unique_token_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_query_clears_without_debounce() {
        let mut session = session();
        session.set_input_text("alpha beta");
        session.set_search_query("alp");
        session.settle().await;
        assert_eq!(session.match_count(), 1);

        session.set_search_query("   ");
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.match_count(), 0);
        assert!(!session.has_outstanding_work());
    }

    #[tokio::test(start_paused = true)]
    async fn test_late_result_for_superseded_query_is_discarded() {
        let mut session = session();
        session.set_input_text("a ab abc b");

        session.set_search_query("a");
        let stale_generation = session.generation;
        session.set_search_query("ab");

        // A result for "a" that was already computed when "ab" arrived.
        let stale = SearchMatcher::new().find(session.tokens().as_slice(), "a");
        session
            .events_tx
            .send(SessionEvent::SearchCompleted {
                generation: stale_generation,
                query: "a".to_string(),
                matches: stale,
            })
            .unwrap();

        let outcomes = session.apply_pending_events();
        assert_eq!(
            outcomes,
            vec![EventOutcome::SearchDiscarded {
                query: "a".to_string()
            }]
        );
        assert_eq!(session.match_count(), 0);
        assert_eq!(
            session.state(),
            SessionState::SearchPending {
                query: "ab".to_string()
            }
        );

        session.settle().await;
        assert_eq!(session.match_count(), 2);
        assert!(session.is_token_matched(1));
        assert!(session.is_token_matched(2));
        assert!(!session.is_token_matched(0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_same_generation_with_other_query_is_discarded() {
        let mut session = session();
        session.set_input_text("x y");
        session.set_search_query("x");
        let generation = session.generation;

        session
            .events_tx
            .send(SessionEvent::SearchCompleted {
                generation,
                query: "y".to_string(),
                matches: MatchSet::empty(2),
            })
            .unwrap();
        let outcomes = session.apply_pending_events();
        assert!(matches!(outcomes[0], EventOutcome::SearchDiscarded { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_text_change_recomputes_pending_search_immediately() {
        let mut session = session();
        session.set_input_text("one two");
        session.set_search_query("three");
        assert!(matches!(session.state(), SessionState::SearchPending { .. }));

        session.set_input_text("three threes threefold");
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.match_count(), 3);

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(session.apply_pending_events().is_empty());
        assert_eq!(session.match_count(), 3);
    }

    #[tokio::test]
    async fn test_select_engine_retokenizes() {
        let mut session = session();
        session.set_input_text("hello, world");
        assert_eq!(session.total_token_count(), 3);

        session.select_engine(EngineKind::Whitespace);
        assert_eq!(session.engine_kind(), Some(EngineKind::Whitespace));
        assert_eq!(session.tokens().surface_forms(), vec!["hello,", "world"]);
        assert_eq!(session.input_text(), "hello, world");
    }

    #[tokio::test]
    async fn test_clear_command() {
        let mut session = session();
        session.set_input_text("some text");
        session.dispatch(Command::Clear).unwrap();

        assert_eq!(session.input_text(), "");
        assert_eq!(session.total_token_count(), 0);
        assert_eq!(session.unique_token_count(), 0);
        let notification = session.last_notification().unwrap();
        assert!(!notification.is_error());
    }

    #[tokio::test]
    async fn test_undrained_notifications_are_capped() {
        let mut session = session();
        for _ in 0..MAX_PENDING_NOTIFICATIONS + 5 {
            session.clear();
        }
        session.set_input_text("x");
        let _ = session.start_import("slides.pptx");

        let notifications = session.take_notifications();
        assert_eq!(notifications.len(), MAX_PENDING_NOTIFICATIONS);
        assert!(notifications.last().unwrap().is_error());
        assert!(session.take_notifications().is_empty());
    }

    #[tokio::test]
    async fn test_export_with_no_tokens_is_rejected() {
        let mut session = session();
        let err = session
            .start_export("unused.csv", ExportFormat::Csv)
            .unwrap_err();
        assert!(matches!(err, TokenlensError::NothingToExport));
        assert!(!session.is_busy());
    }

    #[test]
    fn test_new_without_runtime_fails() {
        let err = TokenizationSession::new(SessionConfig::default()).unwrap_err();
        assert!(matches!(err, TokenlensError::Runtime(_)));
    }
}
