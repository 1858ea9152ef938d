use thiserror::Error;

/// Errors that abort a typo-pair transform.
///
/// None of these are recoverable inside the engine: the transform emits no
/// records when one is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypoError {
    /// A configured field is absent from a record
    #[error("record {record_index} has no field '{field}'")]
    MissingField { field: String, record_index: usize },

    /// The time field does not hold an integer
    #[error("record {record_index} has non-integer timestamp in field '{field}': '{value}'")]
    InvalidTimestamp {
        field: String,
        value: String,
        record_index: usize,
    },

    /// Rejected before any record is processed
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

pub type Result<T> = std::result::Result<T, TypoError>;
