//! Temporal window scan over one partition
//!
//! Records are ordered by timestamp and each record is compared only with its
//! immediate successor. A record that qualifies with both neighbours is
//! emitted twice.

use tracing::trace;

use crate::config::TypoConfig;
use crate::error::{Result, TypoError};
use crate::metric::MetricEvaluator;
use crate::partition::{Entry, Partition};

/// A validated entry ready for comparison
struct Timed<'a> {
    time: i64,
    value: &'a str,
    entry: Entry<'a>,
}

/// Parse an integer timestamp. Surrounding whitespace and a leading sign are accepted.
pub fn parse_timestamp(value: &str) -> Option<i64> {
    value.trim().parse::<i64>().ok()
}

/// Scan one partition and return the qualifying records as `(earlier, later)`
/// pairs, flattened.
///
/// # Errors
///
/// Every record is validated before any comparison: `MissingField` if the
/// time or compare field is absent, `InvalidTimestamp` if the time field is
/// not an integer.
pub fn scan<'a>(
    partition: &Partition<'a>,
    config: &TypoConfig,
    evaluator: &MetricEvaluator,
) -> Result<Vec<Entry<'a>>> {
    let time_field = config.time_field();
    let compare_field = config.compare_field();

    let mut timed = partition
        .entries
        .iter()
        .map(|&(index, record)| -> Result<Timed<'a>> {
            let raw = record.require_field(time_field, index)?;
            let time = parse_timestamp(raw).ok_or_else(|| TypoError::InvalidTimestamp {
                field: time_field.to_string(),
                value: raw.to_string(),
                record_index: index,
            })?;
            let value = record.require_field(compare_field, index)?;
            Ok(Timed {
                time,
                value,
                entry: (index, record),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    // Stable: equal timestamps keep arrival order
    timed.sort_by_key(|t| t.time);

    let window = i128::from(config.window_seconds());
    let mut out = Vec::new();

    for pair in timed.windows(2) {
        let (earlier, later) = (&pair[0], &pair[1]);
        let gap = i128::from(later.time) - i128::from(earlier.time);
        if gap > window {
            continue;
        }
        if let Some(metric) = evaluator.verdict(earlier.value, later.value) {
            trace!(
                partition = partition.key,
                earlier = earlier.entry.0,
                later = later.entry.0,
                ?metric,
                "typo pair"
            );
            out.push(earlier.entry);
            out.push(later.entry);
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partition::partition;
    use crate::record::Record;

    fn rec(time: &str, search: &str) -> Record {
        [("user", "u"), ("_time", time), ("search", search)]
            .into_iter()
            .collect()
    }

    fn config(window: i64, lev: i64, dam: i64) -> TypoConfig {
        TypoConfig::builder()
            .compare_field("search")
            .partition_field("user")
            .window_seconds(window)
            .levenshtein_threshold(lev)
            .damerau_threshold(dam)
            .build()
            .unwrap()
    }

    fn run(records: &[Record], config: &TypoConfig) -> Result<Vec<usize>> {
        let parts = partition(records, config.partition_field())?;
        let evaluator = MetricEvaluator::new(&config.thresholds());
        let mut indices = Vec::new();
        for part in &parts {
            indices.extend(scan(part, config, &evaluator)?.into_iter().map(|(i, _)| i));
        }
        Ok(indices)
    }

    #[test]
    fn test_sorts_before_pairing() {
        let records = vec![rec("10", "helo"), rec("0", "hello"), rec("100", "x")];
        assert_eq!(run(&records, &config(20, 1, 0)).unwrap(), vec![1, 0]);
    }

    #[test]
    fn test_window_boundary() {
        let records = vec![rec("0", "hello"), rec("5", "helo")];
        assert_eq!(run(&records, &config(5, 1, 0)).unwrap(), vec![0, 1]);
        assert!(run(&records, &config(4, 1, 0)).unwrap().is_empty());
    }

    #[test]
    fn test_zero_window_compares_equal_timestamps() {
        let records = vec![rec("7", "hello"), rec("7", "helo"), rec("8", "hell")];
        assert_eq!(run(&records, &config(0, 1, 0)).unwrap(), vec![0, 1]);
    }

    #[test]
    fn test_large_gap_does_not_stop_scan() {
        let records = vec![
            rec("0", "cat"),
            rec("1", "cut"),
            rec("1000", "dog"),
            rec("1001", "dig"),
        ];
        assert_eq!(run(&records, &config(5, 1, 0)).unwrap(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_only_adjacent_records_compared() {
        // "abc" and "abd" are both in window but separated by "zzzzzz"
        let records = vec![rec("0", "abc"), rec("1", "zzzzzz"), rec("2", "abd")];
        assert!(run(&records, &config(10, 1, 0)).unwrap().is_empty());
    }

    #[test]
    fn test_middle_record_emitted_twice() {
        let records = vec![rec("0", "abc"), rec("1", "abd"), rec("2", "abe")];
        assert_eq!(
            run(&records, &config(10, 1, 0)).unwrap(),
            vec![0, 1, 1, 2]
        );
    }

    #[test]
    fn test_ties_keep_arrival_order() {
        let records = vec![rec("3", "abd"), rec("3", "abc"), rec("1", "zzz")];
        assert_eq!(run(&records, &config(10, 1, 0)).unwrap(), vec![0, 1]);
    }

    #[test]
    fn test_single_record_never_emitted() {
        let records = vec![rec("0", "abc")];
        assert!(run(&records, &config(10, 1, 1)).unwrap().is_empty());
    }

    #[test]
    fn test_negative_and_padded_timestamps() {
        let records = vec![rec(" -3 ", "abc"), rec("+1", "abd")];
        assert_eq!(run(&records, &config(4, 1, 0)).unwrap(), vec![0, 1]);
    }

    #[test]
    fn test_extreme_timestamps_do_not_overflow() {
        let records = vec![
            rec(&i64::MIN.to_string(), "abc"),
            rec(&i64::MAX.to_string(), "abd"),
        ];
        assert!(run(&records, &config(i64::MAX, 1, 0)).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_timestamp() {
        let records = vec![rec("0", "abc"), rec("1.5", "abd")];
        assert_eq!(
            run(&records, &config(10, 1, 0)),
            Err(TypoError::InvalidTimestamp {
                field: "_time".into(),
                value: "1.5".into(),
                record_index: 1
            })
        );
    }

    #[test]
    fn test_missing_compare_field() {
        let mut record = Record::new();
        record.set_field("user", "u");
        record.set_field("_time", "4");
        let records = vec![rec("0", "abc"), record];
        assert_eq!(
            run(&records, &config(10, 1, 0)),
            Err(TypoError::MissingField {
                field: "search".into(),
                record_index: 1
            })
        );
    }

    #[test]
    fn test_single_record_missing_time_field_fails() {
        let mut record = Record::new();
        record.set_field("user", "u");
        record.set_field("search", "abc");
        let records = vec![record];
        assert!(matches!(
            run(&records, &config(10, 1, 0)),
            Err(TypoError::MissingField { ref field, .. }) if field == "_time"
        ));
    }

    #[test]
    fn test_parse_timestamp() {
        assert_eq!(parse_timestamp("42"), Some(42));
        assert_eq!(parse_timestamp(" 42\n"), Some(42));
        assert_eq!(parse_timestamp("-1"), Some(-1));
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("4e2"), None);
        assert_eq!(parse_timestamp("99999999999999999999"), None);
    }
}
