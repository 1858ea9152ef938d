//! Edit-distance algorithms used to judge whether two values are a typo pair
//!
//! Each algorithm is a standalone pure function taking its cutoff explicitly,
//! plus a small struct implementing [`EditDistance`] so the evaluator can hold
//! a configured metric and name it in logs.

pub mod damerau;
pub mod levenshtein;

pub use damerau::*;
pub use levenshtein::*;

/// Trait for edit-distance metrics that may stop early at a cutoff.
///
/// Implementations return `None` when the distance is known to exceed their
/// configured cutoff, and `Some(distance)` otherwise. Metrics without a cutoff
/// always return `Some`.
pub trait EditDistance: Send + Sync {
    fn distance(&self, a: &str, b: &str) -> Option<usize>;

    /// Name of the metric for logging
    fn name(&self) -> &'static str;
}
