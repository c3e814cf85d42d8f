//! Case and diacritic folding for search.
//!
//! Folding strips combining marks after canonical decomposition, applies
//! full Unicode case folding, then recomposes what is left. Case folding
//! (not lowercasing) is what makes `ß` equal `ss` and both Greek sigmas
//! equal `σ`. Two strings match
//! case- and diacritic-insensitively when their folds are equal, and one
//! contains the other insensitively when the fold of one contains the fold
//! of the other.

use caseless::default_case_fold_str;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Fold `text` for case- and diacritic-insensitive comparison.
///
/// ```
/// use tokenlens::search::fold::fold;
///
/// assert_eq!(fold("Café"), "cafe");
/// assert_eq!(fold("NAÏVE"), "naive");
/// assert_eq!(fold("Straße"), "strasse");
/// assert_eq!(fold("你好"), "你好");
/// ```
pub fn fold(text: &str) -> String {
    let stripped: String = text.nfd().filter(|c| !is_combining_mark(*c)).collect();
    // Some folds expand to a base letter plus a mark (U+0130 -> i + U+0307).
    default_case_fold_str(&stripped)
        .chars()
        .filter(|c| !is_combining_mark(*c))
        .nfc()
        .collect()
}
