//! Substring matching over token sequences.

use bit_vec::BitVec;
use rayon::prelude::*;

use crate::config::DEFAULT_PARALLEL_SEARCH_THRESHOLD;
use crate::search::fold::fold;

/// Trim a raw query. An empty result means search is inactive.
pub fn normalize_query(query: &str) -> &str {
    query.trim()
}

/// The set of token indices matched by a query.
///
/// Backed by a bit set sized to the token sequence, so membership checks
/// are O(1) and indices past the end are simply not members.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSet {
    bits: BitVec,
    count: usize,
}

impl MatchSet {
    /// A set with no members over `len` tokens.
    pub fn empty(len: usize) -> Self {
        MatchSet {
            bits: BitVec::from_elem(len, false),
            count: 0,
        }
    }

    fn from_hits(hits: &[bool]) -> Self {
        MatchSet {
            bits: BitVec::from_fn(hits.len(), |i| hits[i]),
            count: hits.iter().filter(|hit| **hit).count(),
        }
    }

    /// Whether the token at `index` matched.
    pub fn contains(&self, index: usize) -> bool {
        self.bits.get(index).unwrap_or(false)
    }

    /// Number of matched tokens.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Whether nothing matched.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Length of the token sequence this set was computed over.
    pub fn universe(&self) -> usize {
        self.bits.len()
    }

    /// Matched indices in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits
            .iter()
            .enumerate()
            .filter_map(|(index, hit)| hit.then_some(index))
    }
}

/// Finds tokens containing a query, ignoring case and diacritics.
///
/// # Examples
///
/// ```
/// use tokenlens::search::matcher::SearchMatcher;
///
/// let tokens = ["Café", "cafeteria", "tea", "CAFE"];
/// let matches = SearchMatcher::new().find(&tokens, "  cafe ");
///
/// assert_eq!(matches.len(), 3);
/// assert_eq!(matches.iter().collect::<Vec<_>>(), vec![0, 1, 3]);
/// assert!(!matches.contains(2));
/// ```
#[derive(Debug, Clone)]
pub struct SearchMatcher {
    parallel_threshold: usize,
}

impl Default for SearchMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchMatcher {
    /// Create a matcher with the default parallel threshold.
    pub fn new() -> Self {
        SearchMatcher {
            parallel_threshold: DEFAULT_PARALLEL_SEARCH_THRESHOLD,
        }
    }

    /// Token count at or above which matching runs on the rayon pool.
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold.max(1);
        self
    }

    /// Match raw tokens against a raw query.
    pub fn find<S>(&self, tokens: &[S], query: &str) -> MatchSet
    where
        S: AsRef<str> + Sync,
    {
        let query = normalize_query(query);
        if query.is_empty() {
            return MatchSet::empty(tokens.len());
        }
        let needle = fold(query);
        self.scan(tokens.len(), |i| fold(tokens[i].as_ref()).contains(&needle))
    }

    /// Match already-folded tokens against an already-folded query.
    pub fn find_folded(&self, folded_tokens: &[String], folded_query: &str) -> MatchSet {
        if folded_query.is_empty() {
            return MatchSet::empty(folded_tokens.len());
        }
        self.scan(folded_tokens.len(), |i| {
            folded_tokens[i].contains(folded_query)
        })
    }

    /// Fold every token, in parallel for large sequences.
    pub fn fold_tokens<S>(&self, tokens: &[S]) -> Vec<String>
    where
        S: AsRef<str> + Sync,
    {
        if tokens.len() >= self.parallel_threshold {
            tokens.par_iter().map(|t| fold(t.as_ref())).collect()
        } else {
            tokens.iter().map(|t| fold(t.as_ref())).collect()
        }
    }

    fn scan<F>(&self, len: usize, predicate: F) -> MatchSet
    where
        F: Fn(usize) -> bool + Sync + Send,
    {
        let hits: Vec<bool> = if len >= self.parallel_threshold {
            (0..len).into_par_iter().map(&predicate).collect()
        } else {
            (0..len).map(&predicate).collect()
        };
        MatchSet::from_hits(&hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_query_is_inactive() {
        let matcher = SearchMatcher::new();
        let matches = matcher.find(&["a", "b"], "   ");
        assert!(matches.is_empty());
        assert_eq!(matches.len(), 0);
        assert_eq!(matches.universe(), 2);
    }

    #[test]
    fn test_case_and_diacritic_insensitive() {
        let tokens = ["RÉSUMÉ", "resume", "Resumed", "presume", "sum"];
        let matches = SearchMatcher::new().find(&tokens, "Résumé");
        assert_eq!(matches.iter().collect::<Vec<_>>(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_case_folding_beyond_lowercase() {
        let matcher = SearchMatcher::new();
        assert_eq!(matcher.find(&["ΟΔΟΣ"], "οδος").len(), 1);
        assert_eq!(matcher.find(&["οδος"], "ΟΔΟΣ").len(), 1);

        let tokens = ["Straße", "STRASSE", "strasse", "street"];
        let matches = matcher.find(&tokens, "strasse");
        assert_eq!(matches.iter().collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(matcher.find(&tokens, "straße").len(), 3);
    }

    #[test]
    fn test_one_match_per_token() {
        let tokens = ["banana", "bandana"];
        let matches = SearchMatcher::new().find(&tokens, "an");
        assert_eq!(matches.len(), 2);
    }

    #[test]
    fn test_cjk_substring() {
        let tokens = ["你好", "，", "世界", "你"];
        let matches = SearchMatcher::new().find(&tokens, "你");
        assert_eq!(matches.iter().collect::<Vec<_>>(), vec![0, 3]);
    }

    #[test]
    fn test_out_of_bounds_is_not_matched() {
        let matches = SearchMatcher::new().find(&["x"], "x");
        assert!(matches.contains(0));
        assert!(!matches.contains(1));
        assert!(!matches.contains(usize::MAX));
    }

    #[test]
    fn test_parallel_and_sequential_agree() {
        let tokens: Vec<String> = (0..500)
            .map(|i| if i % 7 == 0 { format!("Éclair{i}") } else { format!("tok{i}") })
            .collect();

        let sequential = SearchMatcher::new().find(&tokens, "eclair");
        let parallel = SearchMatcher::new()
            .with_parallel_threshold(1)
            .find(&tokens, "eclair");

        assert_eq!(sequential, parallel);
        assert_eq!(sequential.len(), (0..500).filter(|i| i % 7 == 0).count());
    }

    #[test]
    fn test_find_folded_matches_find() {
        let matcher = SearchMatcher::new();
        let tokens = ["Ångström", "strom", "STROM", "x"];
        let folded = matcher.fold_tokens(&tokens);
        assert_eq!(
            matcher.find_folded(&folded, &fold("ström")),
            matcher.find(&tokens, "ström")
        );
    }
}
