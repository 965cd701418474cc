//! Aggregation of multiple per-document sort values into one ordering key.

use std::fmt;

use crate::error::{AzimuthError, Result};

/// Aggregation function applied when a document (or its reference points)
/// yields more than one sort value.
///
/// `Sum` is a recognized name so that wire input mentioning it parses far
/// enough to be rejected with a precise message; the geo-distance sort never
/// accepts it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortMode {
    /// Smallest value wins.
    Min,
    /// Largest value wins.
    Max,
    /// Arithmetic mean over all values.
    Avg,
    /// Sum of all values; invalid for geo-distance sorting.
    Sum,
}

impl SortMode {
    /// Canonical lower-case name.
    pub fn name(&self) -> &'static str {
        match self {
            SortMode::Min => "min",
            SortMode::Max => "max",
            SortMode::Avg => "avg",
            SortMode::Sum => "sum",
        }
    }

    /// Resolve a mode name, case-insensitively.
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "min" => Ok(SortMode::Min),
            "max" => Ok(SortMode::Max),
            "avg" => Ok(SortMode::Avg),
            "sum" => Ok(SortMode::Sum),
            _ => Err(AzimuthError::unsupported_value(format!(
                "unknown sort mode [{name}]"
            ))),
        }
    }

    /// Aggregate a multiset of values; `None` when the multiset is empty.
    /// Order-independent.
    pub fn apply(&self, values: &[f64]) -> Option<f64> {
        if values.is_empty() {
            return None;
        }
        Some(match self {
            SortMode::Min => values.iter().copied().fold(f64::INFINITY, f64::min),
            SortMode::Max => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            SortMode::Avg => values.iter().sum::<f64>() / values.len() as f64,
            SortMode::Sum => values.iter().sum(),
        })
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
