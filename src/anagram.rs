//! Anagram equivalence on text with diacritics
//!
//! Two strings are anagram-equivalent when their letters match after
//! decomposing diacritics away, dropping everything but ASCII alphanumerics,
//! and lowercasing: `"Noël"` ≡ `"Léon"`, but `"cat"` ≢ `"car"`.

use unicode_normalization::UnicodeNormalization;

/// Canonical form used for the comparison: NFKD-decomposed, ASCII
/// alphanumerics only, lowercased, letters sorted.
pub fn normalized_sorted(s: &str) -> String {
    let mut letters: Vec<char> = s
        .nfkd()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect();
    letters.sort_unstable();
    letters.into_iter().collect()
}

/// Symmetric: `are_anagrams(a, b) == are_anagrams(b, a)` for all pairs.
pub fn are_anagrams(a: &str, b: &str) -> bool {
    normalized_sorted(a) == normalized_sorted(b)
}
