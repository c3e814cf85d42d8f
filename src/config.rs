//! Configuration for tokenization sessions.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::analysis::tokenizer::{CjkSegmentation, EngineKind};
use crate::error::{Result, TokenlensError};

/// Default debounce interval for search recomputation, in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 200;

/// Token count above which search matching fans out over rayon.
pub const DEFAULT_PARALLEL_SEARCH_THRESHOLD: usize = 10_000;

/// Configuration for a [`TokenizationSession`](crate::session::TokenizationSession).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Delay between the last query edit and the search recompute.
    pub debounce_ms: u64,
    /// Tokenizer engine used for new sessions.
    pub engine: EngineKind,
    /// How runs of CJK ideographs are segmented by the unicode word engine.
    pub cjk: CjkSegmentation,
    /// Token count above which matching runs in parallel.
    pub parallel_search_threshold: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            engine: EngineKind::UnicodeWord,
            cjk: CjkSegmentation::Run,
            parallel_search_threshold: DEFAULT_PARALLEL_SEARCH_THRESHOLD,
        }
    }
}

impl SessionConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from a JSON file. Missing keys take their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config: SessionConfig = serde_json::from_str(&content).map_err(|e| {
            TokenlensError::config(format!("invalid config file {}: {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Set the debounce interval in milliseconds.
    pub fn debounce_ms(mut self, debounce_ms: u64) -> Self {
        self.debounce_ms = debounce_ms;
        self
    }

    /// Set the tokenizer engine.
    pub fn engine(mut self, engine: EngineKind) -> Self {
        self.engine = engine;
        self
    }

    /// Set the CJK segmentation mode.
    pub fn cjk(mut self, cjk: CjkSegmentation) -> Self {
        self.cjk = cjk;
        self
    }

    /// Set the parallel search threshold.
    pub fn parallel_search_threshold(mut self, threshold: usize) -> Self {
        self.parallel_search_threshold = threshold;
        self
    }

    /// The debounce interval as a [`Duration`].
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Reject values that would make the session misbehave.
    pub fn validate(&self) -> Result<()> {
        if self.parallel_search_threshold == 0 {
            return Err(TokenlensError::config(
                "parallel_search_threshold must be greater than zero",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_session_config_default() {
        let config = SessionConfig::default();
        assert_eq!(config.debounce_ms, 200);
        assert_eq!(config.debounce(), Duration::from_millis(200));
        assert_eq!(config.engine, EngineKind::UnicodeWord);
        assert_eq!(config.cjk, CjkSegmentation::Run);
        assert_eq!(config.parallel_search_threshold, 10_000);
    }

    #[test]
    fn test_builder_setters() {
        let config = SessionConfig::new()
            .debounce_ms(50)
            .engine(EngineKind::Whitespace)
            .cjk(CjkSegmentation::Character);
        assert_eq!(config.debounce(), Duration::from_millis(50));
        assert_eq!(config.engine, EngineKind::Whitespace);
        assert_eq!(config.cjk, CjkSegmentation::Character);
    }

    #[test]
    fn test_from_file_fills_missing_keys() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"debounce_ms": 75, "engine": "whitespace"}}"#).unwrap();

        let config = SessionConfig::from_file(file.path()).unwrap();
        assert_eq!(config.debounce_ms, 75);
        assert_eq!(config.engine, EngineKind::Whitespace);
        assert_eq!(config.cjk, CjkSegmentation::Run);
    }

    #[test]
    fn test_from_file_rejects_zero_threshold() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"parallel_search_threshold": 0}}"#).unwrap();

        let err = SessionConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, TokenlensError::Config(_)));
    }
}
