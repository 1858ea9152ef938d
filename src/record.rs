//! Records flowing through the transform
//!
//! A record is an ordered mapping from field name to string value. Field order
//! is kept exactly as supplied so emitted records can be written back out
//! unchanged.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TypoError};

/// A single event, e.g. one search issued by one user
///
/// # Example
///
/// ```rust
/// use typo_pairs::Record;
///
/// let mut record = Record::new();
/// record.set_field("user", "user1");
/// record.set_field("_time", "0");
/// record.set_field("search", "blah121");
/// assert_eq!(record.get_field("search"), Some("blah121"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    /// Field name -> value mapping, in arrival order
    pub fields: IndexMap<String, String>,
}

impl Record {
    /// Create a new empty record
    pub fn new() -> Self {
        Self {
            fields: IndexMap::new(),
        }
    }

    /// Set a field value. Replacing an existing field keeps its position.
    pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Get a field value
    pub fn get_field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Get a field value, or report it missing for the record at `record_index`
    pub(crate) fn require_field(&self, name: &str, record_index: usize) -> Result<&str> {
        self.get_field(name).ok_or_else(|| TypoError::MissingField {
            field: name.to_string(),
            record_index,
        })
    }

    /// Iterate over `(name, value)` pairs in field order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}
