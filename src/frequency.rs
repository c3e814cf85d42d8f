//! Token frequency indexing.
//!
//! [`FrequencyIndexer`] counts occurrences of each distinct surface form by
//! exact, case-sensitive equality. The resulting [`FrequencyMap`] remembers
//! the order in which forms first appeared, which is the row order used by
//! CSV export and the key order used by JSON export.
//!
//! # Examples
//!
//! ```
//! use tokenlens::frequency::FrequencyIndexer;
//!
//! let map = FrequencyIndexer::index(["你", "好", "world", "你"]);
//! assert_eq!(map.get("你"), 2);
//! assert_eq!(map.len(), 3);
//! assert_eq!(map.total(), 4);
//! ```

use ahash::AHashMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Computes token frequencies.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrequencyIndexer;

impl FrequencyIndexer {
    /// Count every distinct surface form in `tokens`.
    pub fn index<I, S>(tokens: I) -> FrequencyMap
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut map = FrequencyMap::default();
        for token in tokens {
            map.add(token.as_ref());
        }
        map
    }
}

/// Mapping from surface form to occurrence count.
///
/// `total()` equals the length of the indexed sequence and `len()` equals
/// the number of distinct forms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyMap {
    counts: AHashMap<String, usize>,
    order: Vec<String>,
    total: usize,
}

impl FrequencyMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    fn add(&mut self, token: &str) {
        self.total += 1;
        if let Some(count) = self.counts.get_mut(token) {
            *count += 1;
            return;
        }
        self.counts.insert(token.to_string(), 1);
        self.order.push(token.to_string());
    }

    /// Occurrences of `token`, zero when absent.
    pub fn get(&self, token: &str) -> usize {
        self.counts.get(token).copied().unwrap_or(0)
    }

    /// Whether `token` occurs at least once.
    pub fn contains(&self, token: &str) -> bool {
        self.counts.contains_key(token)
    }

    /// Number of distinct surface forms (the unique token count).
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Iterate `(form, count)` in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.order
            .iter()
            .map(move |form| (form.as_str(), self.counts[form.as_str()]))
    }

    /// The `n` most frequent forms, ties broken by first occurrence.
    pub fn top(&self, n: usize) -> Vec<(&str, usize)> {
        let mut entries: Vec<(&str, usize)> = self.iter().collect();
        // Stable sort keeps first-occurrence order among equal counts.
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries.truncate(n);
        entries
    }
}

impl Serialize for FrequencyMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (form, count) in self.iter() {
            map.serialize_entry(form, &count)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        let map = FrequencyIndexer::index(Vec::<String>::new());
        assert!(map.is_empty());
        assert_eq!(map.len(), 0);
        assert_eq!(map.total(), 0);
    }

    #[test]
    fn test_counts_are_case_sensitive() {
        let map = FrequencyIndexer::index(["Rust", "rust", "Rust"]);
        assert_eq!(map.get("Rust"), 2);
        assert_eq!(map.get("rust"), 1);
        assert_eq!(map.get("RUST"), 0);
        assert!(!map.contains("RUST"));
    }

    #[test]
    fn test_count_invariant() {
        let tokens = ["a", "b", "a", "c", "b", "a", "，", "，"];
        let map = FrequencyIndexer::index(tokens);

        let sum: usize = map.iter().map(|(_, count)| count).sum();
        assert_eq!(sum, tokens.len());
        assert_eq!(map.total(), tokens.len());
        assert_eq!(map.len(), 4);
    }

    #[test]
    fn test_first_occurrence_order() {
        let map = FrequencyIndexer::index(["b", "a", "b", "c", "a"]);
        let forms: Vec<&str> = map.iter().map(|(form, _)| form).collect();
        assert_eq!(forms, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_top_breaks_ties_by_first_occurrence() {
        let map = FrequencyIndexer::index(["x", "y", "z", "y", "z", "w"]);
        assert_eq!(map.top(3), vec![("y", 2), ("z", 2), ("x", 1)]);
        assert_eq!(map.top(10).len(), 4);
    }

    #[test]
    fn test_serializes_in_first_occurrence_order() {
        let map = FrequencyIndexer::index(["你", "好", "你"]);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"你":2,"好":1}"#);
    }
}
