//! Damerau-Levenshtein distance implementation
//!
//! Extends Levenshtein with transposition of adjacent characters as a single
//! edit, which is how most keyboard typos look ("saerch" for "search").
//!
//! This is the restricted variant, also called optimal string alignment: no
//! substring is edited again once it has been transposed, so "CA" -> "ABC"
//! costs 3. The distance is always computed in full; there is no cutoff.

use super::EditDistance;
use smallvec::{smallvec, SmallVec};

type Chars = SmallVec<[char; 64]>;
type Row = SmallVec<[usize; 64]>;

/// Damerau-Levenshtein (optimal string alignment) distance calculator
///
/// # Complexity
/// - Time: O(m*n)
/// - Space: O(n), three rows of the DP table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DamerauLevenshtein;

impl DamerauLevenshtein {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl EditDistance for DamerauLevenshtein {
    fn distance(&self, a: &str, b: &str) -> Option<usize> {
        Some(damerau_levenshtein(a, b))
    }

    fn name(&self) -> &'static str {
        "damerau_levenshtein"
    }
}

/// Full restricted Damerau-Levenshtein distance between `a` and `b`.
///
/// Insertions, deletions, substitutions and adjacent transpositions each cost 1.
///
/// # Example
/// ```
/// use typo_pairs::algorithms::damerau::damerau_levenshtein;
///
/// assert_eq!(damerau_levenshtein("search", "saerch"), 1);
/// assert_eq!(damerau_levenshtein("CA", "ABC"), 3);
/// ```
#[must_use]
pub fn damerau_levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let source: Chars = a.chars().collect();
    let target: Chars = b.chars().collect();

    let (m, n) = (source.len(), target.len());
    if m == 0 || n == 0 {
        return m.max(n);
    }

    // Rows i - 2, i - 1 and i of the table
    let mut two_back: Row = smallvec![0; n + 1];
    let mut back: Row = (0..=n).collect();
    let mut row: Row = smallvec![0; n + 1];

    for i in 1..=m {
        let sc = source[i - 1];
        row[0] = i;

        for j in 1..=n {
            let tc = target[j - 1];
            let substitution = back[j - 1] + usize::from(sc != tc);
            let mut best = substitution.min(back[j] + 1).min(row[j - 1] + 1);

            if i > 1 && j > 1 && sc == target[j - 2] && source[i - 2] == tc {
                best = best.min(two_back[j - 2] + 1);
            }
            row[j] = best;
        }

        std::mem::swap(&mut two_back, &mut back);
        std::mem::swap(&mut back, &mut row);
    }

    back[n]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::levenshtein::levenshtein;

    #[test]
    fn test_damerau_basic() {
        assert_eq!(damerau_levenshtein("", ""), 0);
        assert_eq!(damerau_levenshtein("abc", "abc"), 0);
        assert_eq!(damerau_levenshtein("abc", ""), 3);
        assert_eq!(damerau_levenshtein("", "abc"), 3);
        assert_eq!(damerau_levenshtein("kitten", "sitting"), 3);
    }

    #[test]
    fn test_transposition_vs_levenshtein() {
        assert_eq!(damerau_levenshtein("ab", "ba"), 1);
        assert_eq!(levenshtein("ab", "ba"), 2);
        assert_eq!(damerau_levenshtein("query", "qeury"), 1);
        assert_eq!(levenshtein("query", "qeury"), 2);
        assert_eq!(damerau_levenshtein("abcd", "badc"), 2);
    }

    #[test]
    fn test_restricted_transpositions() {
        // A transposed pair is never edited again
        assert_eq!(damerau_levenshtein("CA", "ABC"), 3);
        assert_eq!(damerau_levenshtein("00210000", "001020000"), 3);
    }

    #[test]
    fn test_unicode_and_case() {
        assert_eq!(damerau_levenshtein("日本語", "日語本"), 1);
        assert_eq!(damerau_levenshtein("Apple", "apple"), 1);
    }

    #[test]
    fn test_long_strings_use_linear_memory() {
        let a = "ab".repeat(5_250);
        let mut b: Vec<char> = a.chars().collect();
        b.swap(5_000, 5_001);
        b.push('c');
        let b: String = b.into_iter().collect();
        assert!(a.chars().count() > 10_000 && b.chars().count() > 10_000);
        assert_eq!(damerau_levenshtein(&a, &b), 2);
    }

    #[test]
    fn test_struct_never_cuts_off() {
        let dl = DamerauLevenshtein::new();
        assert_eq!(dl.distance("abcdef", "ghijkl"), Some(6));
        assert_eq!(dl.distance("blah121", "blaxxxh11"), Some(4));
        assert_eq!(dl.name(), "damerau_levenshtein");
    }
}
