//! Token search for tokenlens.
//!
//! Search is case- and diacritic-insensitive substring containment of the
//! query in each token's surface text, one match per token index.

pub mod fold;
pub mod matcher;
pub mod state;

pub use fold::fold;
pub use matcher::{MatchSet, SearchMatcher, normalize_query};
pub use state::SearchState;
