//! Tokenizer engines.
//!
//! An engine turns raw text into an ordered [`TokenSequence`]. Engines are
//! interchangeable implementations of one trait, selected at construction
//! time through [`EngineKind`].
//!
//! # Available Engines
//!
//! - [`unicode_word::UnicodeWordEngine`] - Unicode word boundaries (UAX #29), the default
//! - [`whitespace::WhitespaceEngine`] - Splits on whitespace only
//!
//! # Examples
//!
//! ```
//! use tokenlens::analysis::tokenizer::TokenizerEngine;
//! use tokenlens::analysis::tokenizer::unicode_word::UnicodeWordEngine;
//!
//! let engine = UnicodeWordEngine::new();
//! let tokens = engine.tokenize("你好，world 123！");
//! assert_eq!(tokens.surface_forms(), vec!["你好", "，", "world", "123", "！"]);
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::token::TokenSequence;
use crate::config::SessionConfig;

/// Trait for engines that segment text into tokens.
///
/// Tokenization is total: any input, including empty or malformed text,
/// yields a (possibly empty) sequence. Implementations must be pure, since
/// the session calls them on every edit.
pub trait TokenizerEngine: Send + Sync {
    /// Segment `text` into an ordered sequence of non-empty, trimmed tokens.
    fn tokenize(&self, text: &str) -> TokenSequence;

    /// Get the name of this engine (for logging and configuration).
    fn name(&self) -> &'static str;
}

/// How runs of adjacent CJK ideographs are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CjkSegmentation {
    /// A run of adjacent ideographs becomes one token.
    Run,
    /// Each ideograph becomes its own token.
    Character,
}

/// The engines a session can be built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineKind {
    UnicodeWord,
    Whitespace,
}

impl EngineKind {
    /// All selectable engines.
    pub const ALL: [EngineKind; 2] = [EngineKind::UnicodeWord, EngineKind::Whitespace];

    /// Build the engine described by this kind.
    pub fn build(self, config: &SessionConfig) -> Arc<dyn TokenizerEngine> {
        match self {
            EngineKind::UnicodeWord => {
                Arc::new(unicode_word::UnicodeWordEngine::new().with_cjk(config.cjk))
            }
            EngineKind::Whitespace => Arc::new(whitespace::WhitespaceEngine::new()),
        }
    }

    /// Human-readable name.
    pub fn display_name(self) -> &'static str {
        match self {
            EngineKind::UnicodeWord => "Unicode word segmenter",
            EngineKind::Whitespace => "Whitespace splitter",
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineKind::UnicodeWord => write!(f, "unicode_word"),
            EngineKind::Whitespace => write!(f, "whitespace"),
        }
    }
}

impl FromStr for EngineKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unicode_word" | "unicode" => Ok(EngineKind::UnicodeWord),
            "whitespace" => Ok(EngineKind::Whitespace),
            other => Err(format!("unknown engine: {other}")),
        }
    }
}

pub mod unicode_word;
pub mod whitespace;

pub use unicode_word::UnicodeWordEngine;
pub use whitespace::WhitespaceEngine;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_kind_build() {
        let config = SessionConfig::default();
        assert_eq!(EngineKind::UnicodeWord.build(&config).name(), "unicode_word");
        assert_eq!(EngineKind::Whitespace.build(&config).name(), "whitespace");
    }

    #[test]
    fn test_engine_kind_parse() {
        assert_eq!("unicode_word".parse::<EngineKind>(), Ok(EngineKind::UnicodeWord));
        assert_eq!("whitespace".parse::<EngineKind>(), Ok(EngineKind::Whitespace));
        assert!("jieba".parse::<EngineKind>().is_err());
        assert_eq!(EngineKind::Whitespace.to_string(), "whitespace");
    }
}
