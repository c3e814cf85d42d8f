//! Token types produced by tokenizer engines.
//!
//! # Core Types
//!
//! - [`Token`] - A single segmented unit with its surface text, position and offsets
//! - [`TokenType`] - Classification of token content (alphanumeric, CJK, etc.)
//! - [`TokenSequence`] - The ordered output of one tokenization
//!
//! # Examples
//!
//! ```
//! use tokenlens::analysis::token::{Token, TokenSequence};
//!
//! let sequence = TokenSequence::from_tokens(vec![
//!     Token::with_offsets("hello", 0, 0, 5),
//!     Token::with_offsets("  ", 1, 5, 7),
//!     Token::with_offsets("world", 2, 7, 12),
//! ]);
//!
//! // Blank tokens are dropped and positions are renumbered.
//! assert_eq!(sequence.len(), 2);
//! assert_eq!(sequence[1].text, "world");
//! assert_eq!(sequence[1].position, 1);
//! ```

use std::ops::Index;

use serde::{Deserialize, Serialize};
use unicode_properties::{GeneralCategory, GeneralCategoryGroup, UnicodeGeneralCategory};

/// A token is one segmented unit of the input text.
///
/// Tokens have no identity beyond their `position`; two tokens with the same
/// surface text at different positions are distinct occurrences.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// The surface text of the token
    pub text: String,

    /// The position of the token in its sequence (0-based)
    pub position: usize,

    /// The byte offset where this token starts in the original text
    pub start_offset: usize,

    /// The byte offset where this token ends in the original text
    pub end_offset: usize,

    /// Content classification
    pub token_type: TokenType,
}

/// Token type classification for different kinds of tokens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenType {
    /// Alphanumeric text (English, Latin scripts)
    Alphanum,
    /// Numeric values
    Num,
    /// CJK (Chinese, Japanese, Korean) ideographs
    Cjk,
    /// Katakana characters (Japanese)
    Katakana,
    /// Hiragana characters (Japanese)
    Hiragana,
    /// Hangul characters (Korean)
    Hangul,
    /// Punctuation marks, ASCII or full-width
    Punctuation,
    /// Other/unknown token types
    Other,
}

impl TokenType {
    /// Classify a piece of text by its characters.
    pub fn detect(word: &str) -> TokenType {
        if word.is_empty() {
            return TokenType::Other;
        }

        if word.chars().all(|c| c.is_numeric()) {
            return TokenType::Num;
        }

        if word.chars().all(|c| matches!(c, '\u{3040}'..='\u{309F}')) {
            return TokenType::Hiragana;
        }

        if word.chars().all(|c| matches!(c, '\u{30A0}'..='\u{30FF}')) {
            return TokenType::Katakana;
        }

        if word
            .chars()
            .any(|c| matches!(c, '\u{AC00}'..='\u{D7AF}' | '\u{1100}'..='\u{11FF}'))
        {
            return TokenType::Hangul;
        }

        if word.chars().any(is_cjk_ideograph) {
            return TokenType::Cjk;
        }

        if word.chars().all(|c| c.is_alphanumeric() || c == '-' || c == '_') {
            return TokenType::Alphanum;
        }

        if word.chars().all(|c| !c.is_alphanumeric() && !c.is_whitespace()) {
            return TokenType::Punctuation;
        }

        TokenType::Other
    }
}

/// Whether `c` is a CJK unified ideograph.
pub fn is_cjk_ideograph(c: char) -> bool {
    matches!(c,
        '\u{4E00}'..='\u{9FFF}' |  // CJK Unified Ideographs
        '\u{3400}'..='\u{4DBF}' |  // CJK Extension A
        '\u{F900}'..='\u{FAFF}' |  // CJK Compatibility Ideographs
        '\u{20000}'..='\u{2A6DF}' | // CJK Extension B
        '\u{2A700}'..='\u{2B73F}' | // CJK Extension C
        '\u{2B740}'..='\u{2B81F}' | // CJK Extension D
        '\u{2B820}'..='\u{2CEAF}'   // CJK Extension E
    )
}

/// Whether `c` renders as nothing on its own: whitespace, control
/// characters (Cc) and format characters (Cf) such as a BOM or a
/// zero-width space.
pub fn is_invisible(c: char) -> bool {
    c.is_whitespace()
        || matches!(
            c.general_category(),
            GeneralCategory::Control | GeneralCategory::Format
        )
}

/// Whether `text` has nothing visible left to show: empty, or only
/// combining marks with no base character.
fn is_blank(text: &str) -> bool {
    text.chars()
        .all(|c| c.general_category_group() == GeneralCategoryGroup::Mark)
}

impl Token {
    /// Create a new token with the given text and position.
    pub fn new<S: Into<String>>(text: S, position: usize) -> Self {
        let text = text.into();
        let token_type = TokenType::detect(&text);
        Token {
            end_offset: text.len(),
            text,
            position,
            start_offset: 0,
            token_type,
        }
    }

    /// Create a new token with text, position, and byte offsets.
    pub fn with_offsets<S: Into<String>>(
        text: S,
        position: usize,
        start_offset: usize,
        end_offset: usize,
    ) -> Self {
        let text = text.into();
        let token_type = TokenType::detect(&text);
        Token {
            text,
            position,
            start_offset,
            end_offset,
            token_type,
        }
    }

    /// Override the detected token type.
    pub fn with_token_type(mut self, token_type: TokenType) -> Self {
        self.token_type = token_type;
        self
    }

    /// Get the length of the token text in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the token is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The token's surface text.
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

/// The ordered output of one tokenization.
///
/// Every token in a sequence is non-empty and trimmed, and its `position`
/// equals its index. Engines may emit whatever they like; the sequence
/// enforces the invariant on construction.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenSequence {
    tokens: Vec<Token>,
}

impl TokenSequence {
    /// Create an empty sequence.
    pub fn new() -> Self {
        TokenSequence { tokens: Vec::new() }
    }

    /// Build a sequence from raw engine output.
    ///
    /// Surface forms are trimmed of invisible characters (offsets follow
    /// the trim), tokens with nothing visible left are dropped and positions
    /// are renumbered from zero.
    pub fn from_tokens<I: IntoIterator<Item = Token>>(tokens: I) -> Self {
        let tokens = tokens
            .into_iter()
            .filter_map(|mut token| {
                let leading =
                    token.text.len() - token.text.trim_start_matches(is_invisible).len();
                let trimmed = token.text.trim_matches(is_invisible);
                if is_blank(trimmed) {
                    return None;
                }
                if trimmed.len() != token.text.len() {
                    let trimmed = trimmed.to_string();
                    token.start_offset += leading;
                    token.end_offset = token.start_offset + trimmed.len();
                    token.token_type = TokenType::detect(&trimmed);
                    token.text = trimmed;
                }
                Some(token)
            })
            .enumerate()
            .map(|(position, mut token)| {
                token.position = position;
                token
            })
            .collect();

        TokenSequence { tokens }
    }

    /// Build a sequence from plain strings, with offsets left at zero.
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_tokens(
            texts
                .into_iter()
                .enumerate()
                .map(|(position, text)| Token::new(text, position)),
        )
    }

    /// Number of tokens, duplicates included.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Get the token at `index`.
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// Iterate over tokens in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// Iterate over surface forms in order.
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.tokens.iter().map(|t| t.text.as_str())
    }

    /// Collect the surface forms into a vector.
    pub fn surface_forms(&self) -> Vec<&str> {
        self.texts().collect()
    }

    /// Borrow the tokens as a slice.
    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }
}

impl Index<usize> for TokenSequence {
    type Output = Token;

    fn index(&self, index: usize) -> &Token {
        &self.tokens[index]
    }
}

impl<'a> IntoIterator for &'a TokenSequence {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
