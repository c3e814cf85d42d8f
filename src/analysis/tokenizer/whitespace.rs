//! Whitespace engine implementation.

use super::TokenizerEngine;

use crate::analysis::token::{Token, TokenSequence};

/// An engine that splits text on Unicode whitespace.
///
/// Punctuation stays attached to the neighbouring word.
#[derive(Clone, Debug, Default)]
pub struct WhitespaceEngine;

impl WhitespaceEngine {
    /// Create a new whitespace engine.
    pub fn new() -> Self {
        WhitespaceEngine
    }
}

impl TokenizerEngine for WhitespaceEngine {
    fn tokenize(&self, text: &str) -> TokenSequence {
        let mut tokens = Vec::new();
        let mut start: Option<usize> = None;

        for (offset, c) in text.char_indices() {
            match (c.is_whitespace(), start) {
                (true, Some(s)) => {
                    tokens.push(Token::with_offsets(&text[s..offset], tokens.len(), s, offset));
                    start = None;
                }
                (false, None) => start = Some(offset),
                _ => {}
            }
        }
        if let Some(s) = start {
            tokens.push(Token::with_offsets(&text[s..], tokens.len(), s, text.len()));
        }

        TokenSequence::from_tokens(tokens)
    }

    fn name(&self) -> &'static str {
        "whitespace"
    }
}
