//! Levenshtein (edit) distance implementation
//!
//! Optimized with:
//! - Myers bit-parallel algorithm when the shorter string fits in 64 chars
//! - Single-row DP fallback for longer patterns
//! - Early termination once the distance is known to exceed a cutoff
//! - Unicode-aware character handling (distances count `char`s, not bytes)

use super::EditDistance;
use ahash::AHashMap;
use smallvec::SmallVec;

/// Maximum pattern length for Myers bit-parallel algorithm (64 bits per block)
const MYERS_BLOCK_SIZE: usize = 64;

type Chars = SmallVec<[char; 64]>;

/// Returns `Some(distance)` if `distance <= max_distance` (or there is no cap).
#[inline]
fn within(distance: usize, max_distance: Option<usize>) -> Option<usize> {
    match max_distance {
        Some(max_d) if distance > max_d => None,
        _ => Some(distance),
    }
}

// ============================================================================
// Myers Bit-Parallel Algorithm
// ============================================================================

/// Myers bit-parallel Levenshtein distance for patterns up to 64 characters,
/// optionally capped at `max_distance`.
///
/// Runs in O(n) word operations. After each text column the score can drop by
/// at most one per remaining column, which gives the early-exit test.
///
/// Based on: Myers, G. (1999). "A fast bit-vector algorithm for approximate string matching"
fn myers_64(pattern: &[char], text: &[char], max_distance: Option<usize>) -> Option<usize> {
    let m = pattern.len();
    let n = text.len();
    debug_assert!(m > 0 && m <= MYERS_BLOCK_SIZE);

    // Peq[c] has bit i set if pattern[i] == c
    let mut peq: AHashMap<char, u64> = AHashMap::with_capacity(m.min(26));
    for (i, &c) in pattern.iter().enumerate() {
        *peq.entry(c).or_insert(0) |= 1u64 << i;
    }

    let mut vp: u64 = !0u64;
    let mut vn: u64 = 0u64;
    let mut score = m;
    let last = 1u64 << (m - 1);

    for (j, &tc) in text.iter().enumerate() {
        let eq = peq.get(&tc).copied().unwrap_or(0);

        let xv = eq | vn;
        let xh = (((eq & vp).wrapping_add(vp)) ^ vp) | eq;

        let hp = vn | !(xh | vp);
        let hn = vp & xh;

        if hp & last != 0 {
            score += 1;
        } else if hn & last != 0 {
            score -= 1;
        }

        if let Some(max_d) = max_distance {
            if score > max_d.saturating_add(n - j - 1) {
                return None;
            }
        }

        // First row is 0,1,2,... so the carry into bit 0 is always +1
        let hp = (hp << 1) | 1;
        let hn = hn << 1;

        vp = hn | !(xv | hp);
        vn = hp & xv;
    }

    within(score, max_distance)
}

// ============================================================================
// Single-row DP fallback
// ============================================================================

/// Classic DP over one row, optionally capped at `max_distance`.
///
/// `target` should be the shorter of the two slices.
fn dp_distance(target: &[char], source: &[char], max_distance: Option<usize>) -> Option<usize> {
    let width = target.len();
    let mut row: SmallVec<[usize; 64]> = (0..=width).collect();

    for (i, &sc) in source.iter().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        let mut row_min = row[0];

        for j in 0..width {
            let cost = usize::from(sc != target[j]);
            let cell = (diagonal + cost).min(row[j + 1] + 1).min(row[j] + 1);
            diagonal = row[j + 1];
            row[j + 1] = cell;
            row_min = row_min.min(cell);
        }

        if let Some(max_d) = max_distance {
            if row_min > max_d {
                return None;
            }
        }
    }

    within(row[width], max_distance)
}

// ============================================================================
// Public API
// ============================================================================

/// Levenshtein distance calculator with an optional cutoff.
///
/// # Complexity
/// - Time: O(⌈m/64⌉n) for patterns up to 64 chars, O(m*n) otherwise
/// - Space: O(min(m,n))
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Levenshtein {
    /// Distance above which computation stops early
    pub max_distance: Option<usize>,
}

impl Levenshtein {
    #[must_use]
    pub fn new() -> Self {
        Self { max_distance: None }
    }

    #[must_use]
    pub fn with_max_distance(max_distance: usize) -> Self {
        Self {
            max_distance: Some(max_distance),
        }
    }
}

impl EditDistance for Levenshtein {
    fn distance(&self, a: &str, b: &str) -> Option<usize> {
        levenshtein_distance_bounded(a, b, self.max_distance)
    }

    fn name(&self) -> &'static str {
        "levenshtein"
    }
}

/// Compute Levenshtein distance with an optional cutoff.
///
/// Returns `None` if the distance exceeds `max_distance`, `Some(distance)`
/// otherwise. With a cutoff the exact value is only computed when it is at
/// most the cutoff.
///
/// # Example
/// ```
/// use typo_pairs::algorithms::levenshtein::levenshtein_distance_bounded;
///
/// assert_eq!(levenshtein_distance_bounded("kitten", "sitting", None), Some(3));
/// assert_eq!(levenshtein_distance_bounded("abc", "abd", Some(2)), Some(1));
/// assert_eq!(levenshtein_distance_bounded("abcdef", "ghijkl", Some(3)), None);
/// ```
#[must_use]
pub fn levenshtein_distance_bounded(a: &str, b: &str, max_distance: Option<usize>) -> Option<usize> {
    if a == b {
        return Some(0);
    }

    let a_chars: Chars = a.chars().collect();
    let b_chars: Chars = b.chars().collect();

    // Shorter string is the pattern
    let (pattern, text) = if a_chars.len() <= b_chars.len() {
        (&a_chars[..], &b_chars[..])
    } else {
        (&b_chars[..], &a_chars[..])
    };

    if pattern.is_empty() {
        return within(text.len(), max_distance);
    }
    if let Some(max_d) = max_distance {
        if text.len() - pattern.len() > max_d {
            return None;
        }
    }

    if pattern.len() <= MYERS_BLOCK_SIZE {
        myers_64(pattern, text, max_distance)
    } else {
        dp_distance(pattern, text, max_distance)
    }
}

/// Convenience function for the exact, uncapped distance
#[inline]
#[must_use]
pub fn levenshtein(a: &str, b: &str) -> usize {
    // Without a cutoff the result is always Some
    levenshtein_distance_bounded(a, b, None).unwrap_or_default()
}
