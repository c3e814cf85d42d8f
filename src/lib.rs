//! # tokenlens
//!
//! Interactive tokenization for mixed Chinese/English text.
//!
//! ## Features
//!
//! - Pluggable tokenizer engines behind one trait
//! - Token frequency counting in first-occurrence order
//! - Case- and diacritic-insensitive token search with debounced recompute
//! - Import from `.txt` and `.xlsx`, export to CSV and JSON
//!
//! ```
//! use tokenlens::prelude::*;
//!
//! let engine = UnicodeWordEngine::new();
//! let tokens = engine.tokenize("你好，world 123！");
//! assert_eq!(tokens.surface_forms(), vec!["你好", "，", "world", "123", "！"]);
//!
//! let frequencies = FrequencyIndexer::index(tokens.texts());
//! assert_eq!(frequencies.len(), 5);
//!
//! let matches = SearchMatcher::new().find(tokens.as_slice(), "WORLD");
//! assert!(matches.contains(2));
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod frequency;
pub mod io;
pub mod search;
pub mod session;

pub mod prelude {
    pub use crate::analysis::token::{Token, TokenSequence, TokenType};
    pub use crate::analysis::tokenizer::{
        CjkSegmentation, EngineKind, TokenizerEngine, UnicodeWordEngine, WhitespaceEngine,
    };
    pub use crate::config::SessionConfig;
    pub use crate::error::{Result, TokenlensError};
    pub use crate::frequency::{FrequencyIndexer, FrequencyMap};
    pub use crate::io::{ExportFormat, FileImportService, TokenExportService};
    pub use crate::search::{MatchSet, SearchMatcher};
    pub use crate::session::{Command, EventOutcome, Notification, TokenizationSession};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
