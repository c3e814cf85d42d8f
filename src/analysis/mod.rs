//! Text analysis module for tokenlens.
//!
//! This module provides tokenization: the [`token`] data model and the
//! pluggable [`tokenizer`] engines.

pub mod token;
pub mod tokenizer;

// Re-export commonly used types
pub use token::*;
pub use tokenizer::*;
