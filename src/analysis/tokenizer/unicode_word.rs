//! Unicode word engine implementation.
//!
//! This module provides the default engine. It splits text using Unicode
//! word boundary rules (UAX #29), drops whitespace segments and keeps
//! punctuation as standalone tokens.
//!
//! UAX #29 places a boundary between every pair of CJK ideographs. By
//! default adjacent ideographs are merged back into one token, so Chinese
//! phrases between punctuation survive as a unit; see [`CjkSegmentation`].
//!
//! # Examples
//!
//! ```
//! use tokenlens::analysis::tokenizer::{CjkSegmentation, TokenizerEngine};
//! use tokenlens::analysis::tokenizer::unicode_word::UnicodeWordEngine;
//!
//! let engine = UnicodeWordEngine::new();
//! let tokens = engine.tokenize("Hello, world!");
//! assert_eq!(tokens.surface_forms(), vec!["Hello", ",", "world", "!"]);
//!
//! let engine = UnicodeWordEngine::new().with_cjk(CjkSegmentation::Character);
//! assert_eq!(engine.tokenize("你好").surface_forms(), vec!["你", "好"]);
//! ```

use unicode_segmentation::UnicodeSegmentation;

use crate::analysis::token::{Token, TokenSequence, is_cjk_ideograph, is_invisible};
use crate::analysis::tokenizer::{CjkSegmentation, TokenizerEngine};

/// An engine that splits text on Unicode word boundaries.
///
/// # Features
///
/// - Proper handling of international text (CJK, accented Latin, etc.)
/// - Whitespace is dropped, punctuation is kept as its own token
/// - Token type detection for different character scripts
#[derive(Clone, Debug)]
pub struct UnicodeWordEngine {
    cjk: CjkSegmentation,
}

impl Default for UnicodeWordEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl UnicodeWordEngine {
    /// Create a new engine that merges ideograph runs.
    pub fn new() -> Self {
        UnicodeWordEngine {
            cjk: CjkSegmentation::Run,
        }
    }

    /// Set the CJK segmentation mode.
    pub fn with_cjk(mut self, cjk: CjkSegmentation) -> Self {
        self.cjk = cjk;
        self
    }

    fn is_ideograph_segment(segment: &str) -> bool {
        segment.chars().all(is_cjk_ideograph)
    }
}

impl TokenizerEngine for UnicodeWordEngine {
    fn tokenize(&self, text: &str) -> TokenSequence {
        let mut tokens: Vec<Token> = Vec::new();
        // Whether the last pushed token is an ideograph run that may still grow.
        let mut open_run = false;

        for (start, segment) in text.split_word_bound_indices() {
            if segment.chars().all(is_invisible) {
                open_run = false;
                continue;
            }

            let end = start + segment.len();
            let ideographs = Self::is_ideograph_segment(segment);

            if ideographs && open_run && self.cjk == CjkSegmentation::Run {
                if let Some(last) = tokens.last_mut() {
                    if last.end_offset == start {
                        last.text.push_str(segment);
                        last.end_offset = end;
                        continue;
                    }
                }
            }

            let position = tokens.len();
            tokens.push(Token::with_offsets(segment, position, start, end));
            open_run = ideographs;
        }

        TokenSequence::from_tokens(tokens)
    }

    fn name(&self) -> &'static str {
        "unicode_word"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::TokenType;

    #[test]
    fn test_empty_input_produces_no_tokens() {
        let engine = UnicodeWordEngine::new();
        assert!(engine.tokenize("").is_empty());
        assert!(engine.tokenize("   \n\t ").is_empty());
    }

    #[test]
    fn test_mixed_language_tokenization() {
        let engine = UnicodeWordEngine::new();
        let tokens = engine.tokenize("你好，world 123！");

        assert_eq!(tokens.surface_forms(), vec!["你好", "，", "world", "123", "！"]);
        assert_eq!(tokens[0].token_type, TokenType::Cjk);
        assert_eq!(tokens[1].token_type, TokenType::Punctuation);
        assert_eq!(tokens[2].token_type, TokenType::Alphanum);
        assert_eq!(tokens[3].token_type, TokenType::Num);
    }

    #[test]
    fn test_offsets_point_into_source() {
        let text = "你好，world";
        let engine = UnicodeWordEngine::new();
        for token in engine.tokenize(text).iter() {
            assert_eq!(&text[token.start_offset..token.end_offset], token.text);
        }
    }

    #[test]
    fn test_character_mode_splits_ideographs() {
        let engine = UnicodeWordEngine::new().with_cjk(CjkSegmentation::Character);
        let tokens = engine.tokenize("我爱北京");
        assert_eq!(tokens.surface_forms(), vec!["我", "爱", "北", "京"]);
    }

    #[test]
    fn test_whitespace_breaks_ideograph_runs() {
        let engine = UnicodeWordEngine::new();
        let tokens = engine.tokenize("你好 世界");
        assert_eq!(tokens.surface_forms(), vec!["你好", "世界"]);
    }

    #[test]
    fn test_invisible_segments_are_dropped() {
        let engine = UnicodeWordEngine::new();
        assert_eq!(engine.tokenize("\u{FEFF}hello").surface_forms(), vec!["hello"]);
        assert_eq!(engine.tokenize("a\u{200B}b").surface_forms(), vec!["a", "b"]);
        assert_eq!(engine.tokenize("x\0y\u{0301}").surface_forms().len(), 2);
        assert!(engine.tokenize("\u{200B}\u{FEFF}\u{0301}").is_empty());

        let tokens = engine.tokenize("\u{FEFF}hello");
        assert_eq!(tokens[0].start_offset, 3);
    }

    #[test]
    fn test_long_english_paragraph_token_counts() {
        let phrase = "Rust tokenization reliability benchmark";
        let input = vec![phrase; 12].join(" ");
        let tokens = UnicodeWordEngine::new().tokenize(&input);

        assert_eq!(tokens.len(), 4 * 12);
        let unique: std::collections::HashSet<&str> = tokens.texts().collect();
        assert_eq!(unique.len(), 4);
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let engine = UnicodeWordEngine::new();
        let text = "Café résumé, naïve 東京タワー!";
        assert_eq!(engine.tokenize(text), engine.tokenize(text));
    }

    #[test]
    fn test_tokenizer_name() {
        assert_eq!(UnicodeWordEngine::new().name(), "unicode_word");
    }
}
