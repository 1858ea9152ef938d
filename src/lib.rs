//! typo-pairs - detect re-issued, slightly corrected inputs in event streams
//!
//! Given a batch of timestamped records, finds pairs of records that belong to
//! the same entity (e.g. the same user), happen within a time window of each
//! other, and whose comparison field (e.g. a search string) differs by an
//! exact Levenshtein or Damerau-Levenshtein distance.
//!
//! # Pipeline
//!
//! ```text
//! records → partition by key → sort each partition by time
//!         → compare adjacent pairs inside the window → flatten qualifying pairs
//! ```
//!
//! # Example
//!
//! ```rust
//! use typo_pairs::{Record, TypoConfig};
//!
//! let records: Vec<Record> = vec![
//!     [("user", "user2"), ("time", "2"), ("search", "blah22")].into_iter().collect(),
//!     [("user", "user2"), ("time", "4"), ("search", "blah32")].into_iter().collect(),
//!     [("user", "user3"), ("time", "20"), ("search", "blah3")].into_iter().collect(),
//! ];
//!
//! let config = TypoConfig::from_options([
//!     ("compfield", "search"),
//!     ("partitionby", "user"),
//!     ("timefield", "time"),
//!     ("windowtime", "5"),
//!     ("levdist", "1"),
//! ])?;
//!
//! let pairs = config.find_typo_pairs(&records)?;
//! assert_eq!(pairs, records[..2].to_vec());
//! # Ok::<(), typo_pairs::TypoError>(())
//! ```

pub mod algorithms;
pub mod config;
pub mod error;
pub mod metric;
pub mod partition;
pub mod record;
pub mod scan;
pub mod transform;

pub use algorithms::EditDistance;
pub use config::{Thresholds, TypoConfig, TypoConfigBuilder, DEFAULT_TIME_FIELD};
pub use error::{Result, TypoError};
pub use metric::{evaluate, MatchedMetric, MetricEvaluator};
pub use partition::{partition, Partition};
pub use record::Record;
pub use scan::{parse_timestamp, scan};
pub use transform::{select, transform, transform_iter, TypoPairs, PARALLEL_THRESHOLD};
