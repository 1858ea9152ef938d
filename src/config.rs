//! Transform configuration
//!
//! `TypoConfig` names the three fields the engine reads and carries the window
//! and the two distance thresholds. It is immutable once built and can be
//! created three ways:
//! - `TypoConfig::builder()` for Rust callers
//! - `TypoConfig::from_options()` for hosts passing `key=value` option strings
//!   (`compfield`, `partitionby`, `windowtime`, `timefield`, `levdist`, `damdist`)
//! - serde deserialization, using the same option names and defaults

use serde::{Deserialize, Serialize};

use crate::error::{Result, TypoError};

/// Time field used when none is configured
pub const DEFAULT_TIME_FIELD: &str = "_time";

/// Edit-distance thresholds. Zero disables a metric.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    /// A pair qualifies if its Levenshtein distance equals this exactly
    pub levenshtein: usize,
    /// A pair qualifies if its Damerau-Levenshtein distance equals this exactly
    pub damerau: usize,
}

impl Thresholds {
    pub fn new(levenshtein: usize, damerau: usize) -> Self {
        Self {
            levenshtein,
            damerau,
        }
    }

    /// True when neither metric is enabled, so no pair can ever qualify
    pub fn is_disabled(&self) -> bool {
        self.levenshtein == 0 && self.damerau == 0
    }
}

/// Configuration for one transform call
///
/// # Example
///
/// ```rust
/// use typo_pairs::TypoConfig;
///
/// let config = TypoConfig::builder()
///     .compare_field("search")
///     .partition_field("user")
///     .window_seconds(5)
///     .levenshtein_threshold(2)
///     .build()
///     .unwrap();
/// assert_eq!(config.time_field(), "_time");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TypoOptions", into = "TypoOptions")]
pub struct TypoConfig {
    compare_field: String,
    time_field: String,
    partition_field: String,
    window_seconds: u64,
    thresholds: Thresholds,
}

impl TypoConfig {
    pub fn builder() -> TypoConfigBuilder {
        TypoConfigBuilder::new()
    }

    /// Build a configuration from host option strings.
    ///
    /// Keys are the host command's option names. Integer values may carry
    /// surrounding whitespace; negative values and unknown keys are rejected.
    ///
    /// ```rust
    /// use typo_pairs::TypoConfig;
    ///
    /// let config = TypoConfig::from_options([
    ///     ("compfield", "search"),
    ///     ("partitionby", "user"),
    ///     ("windowtime", "5"),
    ///     ("levdist", "2"),
    ///     ("damdist", "1"),
    ///     ("timefield", "time"),
    /// ])
    /// .unwrap();
    /// assert_eq!(config.thresholds().damerau, 1);
    /// ```
    pub fn from_options<I, K, V>(options: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut builder = TypoConfigBuilder::new();
        for (key, value) in options {
            let key = key.as_ref();
            let value = value.as_ref();
            builder = match key {
                "compfield" => builder.compare_field(value),
                "timefield" => builder.time_field(value),
                "partitionby" => builder.partition_field(value),
                "windowtime" => builder.window_seconds(parse_option_int(key, value)?),
                "levdist" => builder.levenshtein_threshold(parse_option_int(key, value)?),
                "damdist" => builder.damerau_threshold(parse_option_int(key, value)?),
                _ => {
                    return Err(TypoError::InvalidConfiguration(format!(
                        "unknown option '{}'. Valid: compfield, timefield, partitionby, windowtime, levdist, damdist",
                        key
                    )))
                }
            };
        }
        builder.build()
    }

    /// Field whose values are compared for edit distance
    pub fn compare_field(&self) -> &str {
        &self.compare_field
    }

    /// Field holding the integer event time, in seconds
    pub fn time_field(&self) -> &str {
        &self.time_field
    }

    /// Field whose value groups records into independent partitions
    pub fn partition_field(&self) -> &str {
        &self.partition_field
    }

    /// Maximum gap between adjacent records for them to be compared
    pub fn window_seconds(&self) -> u64 {
        self.window_seconds
    }

    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }
}

fn parse_option_int(key: &str, value: &str) -> Result<i64> {
    value.trim().parse::<i64>().map_err(|_| {
        TypoError::InvalidConfiguration(format!("{} must be an integer, got '{}'", key, value))
    })
}

fn non_negative(name: &str, value: i64) -> Result<u64> {
    u64::try_from(value).map_err(|_| {
        TypoError::InvalidConfiguration(format!("{} must be non-negative, got {}", name, value))
    })
}

fn non_empty(name: &str, value: Option<String>) -> Result<String> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        Some(_) => Err(TypoError::InvalidConfiguration(format!(
            "{} must not be empty",
            name
        ))),
        None => Err(TypoError::InvalidConfiguration(format!("{} is required", name))),
    }
}

fn to_threshold(name: &str, value: Option<i64>) -> Result<usize> {
    let value = non_negative(name, value.unwrap_or(0))?;
    usize::try_from(value).map_err(|_| {
        TypoError::InvalidConfiguration(format!("{} is too large: {}", name, value))
    })
}

/// Builder for [`TypoConfig`]
///
/// Integer setters take `i64` so that negative values coming from a host are
/// reported by `build()` rather than wrapping.
#[derive(Debug, Clone, Default)]
pub struct TypoConfigBuilder {
    compare_field: Option<String>,
    time_field: Option<String>,
    partition_field: Option<String>,
    window_seconds: Option<i64>,
    levenshtein_threshold: Option<i64>,
    damerau_threshold: Option<i64>,
}

impl TypoConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn compare_field(mut self, name: impl Into<String>) -> Self {
        self.compare_field = Some(name.into());
        self
    }

    /// Defaults to [`DEFAULT_TIME_FIELD`]
    pub fn time_field(mut self, name: impl Into<String>) -> Self {
        self.time_field = Some(name.into());
        self
    }

    pub fn partition_field(mut self, name: impl Into<String>) -> Self {
        self.partition_field = Some(name.into());
        self
    }

    pub fn window_seconds(mut self, seconds: i64) -> Self {
        self.window_seconds = Some(seconds);
        self
    }

    /// Defaults to 0 (disabled)
    pub fn levenshtein_threshold(mut self, distance: i64) -> Self {
        self.levenshtein_threshold = Some(distance);
        self
    }

    /// Defaults to 0 (disabled)
    pub fn damerau_threshold(mut self, distance: i64) -> Self {
        self.damerau_threshold = Some(distance);
        self
    }

    /// Validate and build the configuration
    pub fn build(self) -> Result<TypoConfig> {
        let window_seconds = match self.window_seconds {
            Some(seconds) => non_negative("windowtime", seconds)?,
            None => {
                return Err(TypoError::InvalidConfiguration(
                    "windowtime is required".to_string(),
                ))
            }
        };

        Ok(TypoConfig {
            compare_field: non_empty("compfield", self.compare_field)?,
            time_field: non_empty(
                "timefield",
                Some(self.time_field.unwrap_or_else(|| DEFAULT_TIME_FIELD.to_string())),
            )?,
            partition_field: non_empty("partitionby", self.partition_field)?,
            window_seconds,
            thresholds: Thresholds {
                levenshtein: to_threshold("levdist", self.levenshtein_threshold)?,
                damerau: to_threshold("damdist", self.damerau_threshold)?,
            },
        })
    }
}

/// Serialized form of [`TypoConfig`], keyed by the host option names
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TypoOptions {
    compfield: String,
    #[serde(default = "default_time_field")]
    timefield: String,
    partitionby: String,
    windowtime: i64,
    #[serde(default)]
    levdist: i64,
    #[serde(default)]
    damdist: i64,
}

fn default_time_field() -> String {
    DEFAULT_TIME_FIELD.to_string()
}

impl TryFrom<TypoOptions> for TypoConfig {
    type Error = TypoError;

    fn try_from(options: TypoOptions) -> Result<Self> {
        TypoConfigBuilder::new()
            .compare_field(options.compfield)
            .time_field(options.timefield)
            .partition_field(options.partitionby)
            .window_seconds(options.windowtime)
            .levenshtein_threshold(options.levdist)
            .damerau_threshold(options.damdist)
            .build()
    }
}

impl From<TypoConfig> for TypoOptions {
    fn from(config: TypoConfig) -> Self {
        // Values were validated non-negative; saturate anything past i64
        let clamp = |v: u64| i64::try_from(v).unwrap_or(i64::MAX);
        TypoOptions {
            compfield: config.compare_field,
            timefield: config.time_field,
            partitionby: config.partition_field,
            windowtime: clamp(config.window_seconds),
            levdist: clamp(config.thresholds.levenshtein as u64),
            damdist: clamp(config.thresholds.damerau as u64),
        }
    }
}
