//! Typo-pair decision for two comparison values
//!
//! A pair qualifies when either enabled metric reports a distance *equal* to
//! its threshold. Distances below the threshold do not qualify, and a
//! threshold of zero disables its metric, so identical values never qualify.

use crate::algorithms::{DamerauLevenshtein, EditDistance, Levenshtein};
use crate::config::Thresholds;

/// Which metric made a pair qualify
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchedMetric {
    Levenshtein,
    DamerauLevenshtein,
}

/// Holds the enabled metrics for one set of thresholds
#[derive(Debug, Clone, Copy)]
pub struct MetricEvaluator {
    levenshtein: Option<(Levenshtein, usize)>,
    damerau: Option<(DamerauLevenshtein, usize)>,
}

impl MetricEvaluator {
    pub fn new(thresholds: &Thresholds) -> Self {
        Self {
            // The threshold doubles as the cutoff: anything above it cannot match
            levenshtein: (thresholds.levenshtein > 0).then(|| {
                (
                    Levenshtein::with_max_distance(thresholds.levenshtein),
                    thresholds.levenshtein,
                )
            }),
            damerau: (thresholds.damerau > 0)
                .then(|| (DamerauLevenshtein::new(), thresholds.damerau)),
        }
    }

    /// Returns the first metric (Levenshtein, then Damerau-Levenshtein) whose
    /// distance equals its threshold, if any.
    pub fn verdict(&self, a: &str, b: &str) -> Option<MatchedMetric> {
        if let Some((metric, threshold)) = &self.levenshtein {
            if exact_match(metric, a, b, *threshold) {
                return Some(MatchedMetric::Levenshtein);
            }
        }
        if let Some((metric, threshold)) = &self.damerau {
            if exact_match(metric, a, b, *threshold) {
                return Some(MatchedMetric::DamerauLevenshtein);
            }
        }
        None
    }

    #[inline]
    pub fn is_typo_pair(&self, a: &str, b: &str) -> bool {
        self.verdict(a, b).is_some()
    }

    /// True when no metric is enabled
    pub fn is_disabled(&self) -> bool {
        self.levenshtein.is_none() && self.damerau.is_none()
    }
}

#[inline]
fn exact_match<M: EditDistance>(metric: &M, a: &str, b: &str, threshold: usize) -> bool {
    matches!(metric.distance(a, b), Some(d) if d == threshold)
}

/// One-shot form of [`MetricEvaluator::is_typo_pair`]
pub fn evaluate(a: &str, b: &str, levenshtein_threshold: usize, damerau_threshold: usize) -> bool {
    MetricEvaluator::new(&Thresholds::new(levenshtein_threshold, damerau_threshold))
        .is_typo_pair(a, b)
}
