//! Grouping of records by partition key
//!
//! Partitions come out in first-seen key order and keep arrival order inside
//! each bucket, so the transform output is deterministic for a given input.

use indexmap::IndexMap;

use crate::error::Result;
use crate::record::Record;

/// An input record tagged with its position in the input batch
pub type Entry<'a> = (usize, &'a Record);

/// All records sharing one partition key, in arrival order
#[derive(Debug, Clone, PartialEq)]
pub struct Partition<'a> {
    pub key: &'a str,
    pub entries: Vec<Entry<'a>>,
}

impl<'a> Partition<'a> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Group `records` by the value of `key_field`.
///
/// # Errors
///
/// Returns `TypoError::MissingField` for the first record lacking `key_field`.
pub fn partition<'a>(records: &'a [Record], key_field: &str) -> Result<Vec<Partition<'a>>> {
    let mut buckets: IndexMap<&'a str, Vec<Entry<'a>>> = IndexMap::new();

    for (index, record) in records.iter().enumerate() {
        let key = record.require_field(key_field, index)?;
        buckets.entry(key).or_default().push((index, record));
    }

    Ok(buckets
        .into_iter()
        .map(|(key, entries)| Partition { key, entries })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TypoError;

    fn rec(user: &str, time: &str) -> Record {
        [("user", user), ("_time", time)].into_iter().collect()
    }

    #[test]
    fn test_partition_empty() {
        let records: Vec<Record> = vec![];
        assert!(partition(&records, "user").unwrap().is_empty());
    }

    #[test]
    fn test_partition_first_seen_order() {
        let records = vec![
            rec("b", "5"),
            rec("a", "1"),
            rec("b", "2"),
            rec("c", "0"),
            rec("a", "0"),
        ];
        let parts = partition(&records, "user").unwrap();
        let keys: Vec<&str> = parts.iter().map(|p| p.key).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);

        // Arrival order, not time order
        let b_indices: Vec<usize> = parts[0].entries.iter().map(|(i, _)| *i).collect();
        assert_eq!(b_indices, vec![0, 2]);
        let a_indices: Vec<usize> = parts[1].entries.iter().map(|(i, _)| *i).collect();
        assert_eq!(a_indices, vec![1, 4]);
        assert_eq!(parts[2].len(), 1);
    }

    #[test]
    fn test_partition_keys_are_exact() {
        let records = vec![rec("User1", "0"), rec("user1", "1"), rec("user1 ", "2")];
        assert_eq!(partition(&records, "user").unwrap().len(), 3);
    }

    #[test]
    fn test_identical_records_keep_distinct_indices() {
        let records = vec![rec("a", "1"), rec("a", "1")];
        let parts = partition(&records, "user").unwrap();
        assert_eq!(parts[0].entries[0].0, 0);
        assert_eq!(parts[0].entries[1].0, 1);
    }

    #[test]
    fn test_partition_missing_key() {
        let mut missing = Record::new();
        missing.set_field("_time", "3");
        let records = vec![rec("a", "1"), missing];
        assert_eq!(
            partition(&records, "user"),
            Err(TypoError::MissingField {
                field: "user".into(),
                record_index: 1
            })
        );
    }
}
