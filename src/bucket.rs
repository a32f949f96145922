//! Buckets represent quantized value ranges and a count of observations
//! within that range.

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// A bucket covers the half-open range `[lower, upper)` and carries the count
/// of observations that fell into that range.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Bucket {
    pub(crate) lower: f64,
    pub(crate) upper: f64,
    pub(crate) count: u64,
}

impl Bucket {
    /// Returns the number of observations within the bucket's range.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Returns the inclusive lower boundary for the bucket.
    pub fn lower(&self) -> f64 {
        self.lower
    }

    /// Returns the exclusive upper boundary for the bucket.
    pub fn upper(&self) -> f64 {
        self.upper
    }
}
