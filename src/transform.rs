//! Transform driver: partition, scan each partition, flatten
//!
//! Output order is partition order (first-seen key), then scan order inside
//! each partition. The parallel path produces exactly the same sequence as the
//! sequential one.

use rayon::prelude::*;
use tracing::debug;

use crate::config::TypoConfig;
use crate::error::Result;
use crate::metric::MetricEvaluator;
use crate::partition::{partition, Entry, Partition};
use crate::record::Record;
use crate::scan::scan;

/// Minimum number of partitions before scans are spread over the rayon pool.
///
/// Below this the per-partition work is usually a handful of comparisons and
/// thread coordination costs more than it saves.
pub const PARALLEL_THRESHOLD: usize = 100;

fn scan_all<'a>(
    partitions: &[Partition<'a>],
    config: &TypoConfig,
    evaluator: &MetricEvaluator,
    parallel: bool,
) -> Result<Vec<Entry<'a>>> {
    let per_partition: Vec<Result<Vec<Entry<'a>>>> = if parallel {
        partitions
            .par_iter()
            .map(|p| scan(p, config, evaluator))
            .collect()
    } else {
        partitions
            .iter()
            .map(|p| scan(p, config, evaluator))
            .collect()
    };

    // Joined in partition order so the reported error is the same one the
    // sequential path would hit first
    let mut out = Vec::new();
    for result in per_partition {
        out.extend(result?);
    }
    Ok(out)
}

fn run<'a>(records: &'a [Record], config: &TypoConfig) -> Result<Vec<Entry<'a>>> {
    let partitions = partition(records, config.partition_field())?;
    let evaluator = MetricEvaluator::new(&config.thresholds());

    debug!(
        records = records.len(),
        partitions = partitions.len(),
        window_seconds = config.window_seconds(),
        levenshtein = config.thresholds().levenshtein,
        damerau = config.thresholds().damerau,
        "scanning for typo pairs"
    );
    if evaluator.is_disabled() {
        debug!("both distance thresholds are 0; no pair can qualify");
    }

    let parallel = partitions.len() >= PARALLEL_THRESHOLD;
    let entries = scan_all(&partitions, config, &evaluator, parallel)?;

    debug!(emitted = entries.len(), "typo pair scan complete");
    Ok(entries)
}

/// Indices into `records` of every emitted record, in output order.
///
/// An index appears twice when its record pairs with both neighbours.
///
/// # Errors
///
/// `MissingField` or `InvalidTimestamp` for the first offending record; no
/// partial output is returned.
pub fn select(records: &[Record], config: &TypoConfig) -> Result<Vec<usize>> {
    Ok(run(records, config)?.into_iter().map(|(i, _)| i).collect())
}

/// Qualifying records, cloned, in output order.
///
/// # Example
///
/// ```rust
/// use typo_pairs::{transform, Record, TypoConfig};
///
/// let records: Vec<Record> = vec![
///     [("user", "u1"), ("_time", "0"), ("search", "helo")].into_iter().collect(),
///     [("user", "u1"), ("_time", "3"), ("search", "hello")].into_iter().collect(),
/// ];
/// let config = TypoConfig::builder()
///     .compare_field("search")
///     .partition_field("user")
///     .window_seconds(5)
///     .levenshtein_threshold(1)
///     .build()
///     .unwrap();
///
/// let out = transform(&records, &config).unwrap();
/// assert_eq!(out, records);
/// ```
pub fn transform(records: &[Record], config: &TypoConfig) -> Result<Vec<Record>> {
    Ok(run(records, config)?
        .into_iter()
        .map(|(_, record)| record.clone())
        .collect())
}

/// Lazy form of [`transform`] yielding borrowed records.
///
/// All validation happens before the iterator is returned, so iteration
/// itself cannot fail.
pub fn transform_iter<'a>(records: &'a [Record], config: &TypoConfig) -> Result<TypoPairs<'a>> {
    Ok(TypoPairs {
        inner: run(records, config)?.into_iter(),
    })
}

/// Iterator over the records of a completed scan
#[derive(Debug)]
pub struct TypoPairs<'a> {
    inner: std::vec::IntoIter<Entry<'a>>,
}

impl<'a> Iterator for TypoPairs<'a> {
    type Item = &'a Record;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, record)| record)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for TypoPairs<'_> {}

impl std::iter::FusedIterator for TypoPairs<'_> {}

impl TypoConfig {
    /// Run [`transform`] with this configuration
    pub fn find_typo_pairs(&self, records: &[Record]) -> Result<Vec<Record>> {
        transform(records, self)
    }
}
