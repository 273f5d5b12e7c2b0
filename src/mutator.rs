//! Dictionary word mutations.
//!
//! A word expands into its common password variants:
//! - The word itself, lowercased, uppercased and capitalized
//! - A single leet-speak rewrite
//! - Two-digit and plain numeric suffixes from 0 to 99

use std::collections::BTreeSet;

/// Upper bound on the suffix numbers appended to a word.
const SUFFIX_LIMIT: u32 = 100;

/// Leet substitution for a single character, matched case-insensitively.
#[inline]
fn leet(c: char) -> char {
    match c {
        'a' | 'A' => '4',
        'e' | 'E' => '3',
        'i' | 'I' => '1',
        'o' | 'O' => '0',
        's' | 'S' => '5',
        't' | 'T' => '7',
        other => other,
    }
}

/// Uppercases the first character and leaves the rest untouched.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Expands a word into its deduplicated set of variants.
///
/// Pure and deterministic; the returned set iterates in sorted order.
pub fn mutate(word: &str) -> BTreeSet<String> {
    let mut variants = BTreeSet::new();

    variants.insert(word.to_string());
    variants.insert(word.to_lowercase());
    variants.insert(word.to_uppercase());
    variants.insert(capitalize(word));
    variants.insert(word.chars().map(leet).collect());

    // both forms for every n, so "word0" and "word00" are distinct entries
    for n in 0..SUFFIX_LIMIT {
        variants.insert(format!("{word}{n:02}"));
        variants.insert(format!("{word}{n}"));
    }

    variants
}
