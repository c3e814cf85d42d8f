//! Search state held by a session.

use crate::search::fold::fold;
use crate::search::matcher::{MatchSet, normalize_query};

/// The current query and the matches last applied for it.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    raw_query: String,
    normalized_query: String,
    folded_query: String,
    matches: MatchSet,
}

impl SearchState {
    /// Create an inactive search state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the query and drop the matches of the previous one.
    ///
    /// Returns whether the new query is active (non-blank after trimming).
    pub fn set_query(&mut self, raw_query: &str) -> bool {
        self.raw_query = raw_query.to_string();
        self.normalized_query = normalize_query(raw_query).to_string();
        self.folded_query = fold(&self.normalized_query);
        self.matches = MatchSet::default();
        self.is_active()
    }

    /// Replace the matches.
    pub fn apply(&mut self, matches: MatchSet) {
        self.matches = matches;
    }

    /// Drop the matches, keeping the query.
    pub fn clear_matches(&mut self) {
        self.matches = MatchSet::default();
    }

    /// The query as typed.
    pub fn raw_query(&self) -> &str {
        &self.raw_query
    }

    /// The trimmed query.
    pub fn normalized_query(&self) -> &str {
        &self.normalized_query
    }

    /// The folded query used for matching.
    pub fn folded_query(&self) -> &str {
        &self.folded_query
    }

    /// Whether the query is non-blank.
    pub fn is_active(&self) -> bool {
        !self.normalized_query.is_empty()
    }

    /// The matches last applied.
    pub fn matches(&self) -> &MatchSet {
        &self.matches
    }

    /// Number of matched tokens.
    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    /// Whether the token at `index` is matched.
    pub fn is_matched(&self, index: usize) -> bool {
        self.matches.contains(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::matcher::SearchMatcher;

    #[test]
    fn test_set_query_normalizes() {
        let mut state = SearchState::new();
        assert!(state.set_query("  Café "));
        assert_eq!(state.raw_query(), "  Café ");
        assert_eq!(state.normalized_query(), "Café");
        assert_eq!(state.folded_query(), "cafe");

        assert!(!state.set_query(" \t"));
        assert!(!state.is_active());
    }

    #[test]
    fn test_set_query_drops_previous_matches() {
        let mut state = SearchState::new();
        state.set_query("a");
        state.apply(SearchMatcher::new().find(&["a", "b"], "a"));
        assert_eq!(state.match_count(), 1);
        assert!(state.is_matched(0));

        state.set_query("b");
        assert_eq!(state.match_count(), 0);
        assert!(!state.is_matched(0));
    }
}
