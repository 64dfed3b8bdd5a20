//! Construction errors

use thiserror::Error;

/// Errors raised while building a table or its hash function.
///
/// Lookups and removals never fail; a missing key is reported through
/// `Option` or `bool`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("bucket count must be at least 1")]
    ZeroBuckets,

    #[error("bucket count {requested} exceeds the hash range of {max}")]
    TooManyBuckets { requested: usize, max: u64 },

    #[error("Failed to allocate {buckets} buckets")]
    Allocation { buckets: usize },

    #[error("empty draw range {low}..={high}")]
    EmptyRange { low: u64, high: u64 },

    #[error("hash coefficient {name} = {value} is outside {min}..{max}")]
    CoefficientOutOfRange {
        name: &'static str,
        value: u64,
        min: u64,
        max: u64,
    },

    #[error("Failed to draw random coefficients: {0}")]
    Entropy(String),
}
