#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

use crate::Error;

pub(crate) const DEFAULT_LOG_LOW: f64 = 1.0;
pub(crate) const DEFAULT_LOG_BUCKETS: u8 = 8;

/// The immutable bucketing parameters for a histogram.
///
/// A config maps any sample value to either a bucket index or an outlier
/// classification, and maps bucket indices back to their boundary values. It
/// holds no counters; it is pure math shared by the histogram, its iterators,
/// and the renderer.
///
/// Two scales are supported:
/// * `log` - bucket `i` covers `[low * 2^i, low * 2^(i+1))`, so each bucket
///   spans one power of two. The caller's `low` is snapped down to the
///   nearest power-of-two boundary at construction.
/// * `linear` - bucket `i` covers `[low + i * width, low + (i+1) * width)`,
///   with `(high - low)` an exact multiple of `width`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Config {
    low: f64,
    high: f64,
    scale: Scale,
    total_buckets: usize,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
enum Scale {
    Log,
    Linear { width: f64 },
}

impl Config {
    /// Construct a log-scale config with `log_buckets` power-of-two buckets
    /// starting at the boundary at or below `low`.
    ///
    /// The effective range is `[low', low' * 2^log_buckets)` where `low'` is
    /// the snapped boundary, not the caller's raw value.
    pub fn log(low: f64, log_buckets: u8) -> Result<Self, Error> {
        if !low.is_finite() || low <= 0.0 {
            return Err(Error::InvalidLow);
        }

        if log_buckets == 0 {
            return Err(Error::InvalidLogBuckets);
        }

        // snap low to the power-of-two boundary at or below it, then derive
        // high so that the range covers exactly log_buckets buckets
        let low = 2_f64.powi(low.log2().floor() as i32);
        let high = low * 2_f64.powi(log_buckets as i32);

        Ok(Self {
            low,
            high,
            scale: Scale::Log,
            total_buckets: log_buckets as usize,
        })
    }

    /// Construct a linear-scale config with uniform buckets of `width`
    /// spanning `[low, high)`.
    pub fn linear(low: f64, high: f64, width: f64) -> Result<Self, Error> {
        if !low.is_finite() || !high.is_finite() || high <= low {
            return Err(Error::InvalidRange);
        }

        if !width.is_finite() || width <= 0.0 || width > high - low {
            return Err(Error::InvalidWidth);
        }

        if (high - low) % width != 0.0 {
            return Err(Error::IndivisibleRange);
        }

        let total_buckets = ((high - low) / width).round() as usize;

        Ok(Self {
            low,
            high,
            scale: Scale::Linear { width },
            total_buckets,
        })
    }

    /// Returns the bucket index covering the provided value.
    ///
    /// Callers are expected to have classified outliers first; values below
    /// `low` map to index zero on the log scale, and a linear-scale lookup
    /// that finds no covering bucket reports `Error::Unreachable` since that
    /// indicates a logic bug rather than bad input.
    pub(crate) fn value_to_index(&self, value: f64) -> Result<usize, Error> {
        match self.scale {
            Scale::Log => {
                let ratio = (value / self.low).max(1.0);
                // log2 of a value within one ulp of a boundary can round up
                // to the boundary's integer; clamp so values just below high
                // stay in the top bucket instead of indexing past it
                Ok((ratio.log2().floor() as usize).min(self.total_buckets - 1))
            }
            Scale::Linear { width } => {
                for index in 0..self.total_buckets {
                    if value < self.low + (index as f64 + 1.0) * width {
                        return Ok(index);
                    }
                }

                Err(Error::Unreachable)
            }
        }
    }

    /// Returns the inclusive lower boundary value for a bucket index.
    pub(crate) fn index_to_lower_bound(&self, index: usize) -> f64 {
        match self.scale {
            Scale::Log => self.low * 2_f64.powi(index as i32),
            Scale::Linear { width } => self.low + index as f64 * width,
        }
    }

    /// Returns the exclusive upper boundary value for a bucket index.
    pub(crate) fn index_to_upper_bound(&self, index: usize) -> f64 {
        self.index_to_lower_bound(index + 1)
    }

    /// The lowest bucketed value. Samples below this are low outliers.
    pub fn low(&self) -> f64 {
        self.low
    }

    /// The end of the bucketed range. Samples at or above this are high
    /// outliers.
    pub fn high(&self) -> f64 {
        self.high
    }

    /// The number of buckets for this config.
    pub fn total_buckets(&self) -> usize {
        self.total_buckets
    }

    /// The number of power-of-two buckets, or `None` for the linear scale.
    pub fn log_buckets(&self) -> Option<u8> {
        match self.scale {
            Scale::Log => Some(self.total_buckets as u8),
            Scale::Linear { .. } => None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            low: DEFAULT_LOG_LOW,
            high: DEFAULT_LOG_LOW * 2_f64.powi(DEFAULT_LOG_BUCKETS as i32),
            scale: Scale::Log,
            total_buckets: DEFAULT_LOG_BUCKETS as usize,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_defaults() {
        let config = Config::default();
        assert_eq!(config.low(), 1.0);
        assert_eq!(config.high(), 256.0);
        assert_eq!(config.total_buckets(), 8);
        assert_eq!(config.log_buckets(), Some(8));
    }

    #[test]
    // a non-power-of-two low is snapped down to a bucket boundary
    fn log_low_snapping() {
        let config = Config::log(10.0, 8).unwrap();
        assert_eq!(config.low(), 8.0);
        assert_eq!(config.high(), 2048.0);

        let config = Config::log(0.3, 4).unwrap();
        assert_eq!(config.low(), 0.25);
        assert_eq!(config.high(), 4.0);
    }

    #[test]
    fn log_validation() {
        assert_eq!(Config::log(0.0, 8), Err(Error::InvalidLow));
        assert_eq!(Config::log(-1.0, 8), Err(Error::InvalidLow));
        assert_eq!(Config::log(f64::NAN, 8), Err(Error::InvalidLow));
        assert_eq!(Config::log(1.0, 0), Err(Error::InvalidLogBuckets));
    }

    #[test]
    fn linear_validation() {
        assert_eq!(Config::linear(10.0, 10.0, 1.0), Err(Error::InvalidRange));
        assert_eq!(Config::linear(10.0, 5.0, 1.0), Err(Error::InvalidRange));
        assert_eq!(Config::linear(0.0, 100.0, 0.0), Err(Error::InvalidWidth));
        assert_eq!(Config::linear(0.0, 100.0, -5.0), Err(Error::InvalidWidth));
        assert_eq!(Config::linear(0.0, 10.0, 20.0), Err(Error::InvalidWidth));
        assert_eq!(
            Config::linear(0.0, 100.0, 7.0),
            Err(Error::IndivisibleRange)
        );

        let config = Config::linear(0.0, 100.0, 10.0).unwrap();
        assert_eq!(config.total_buckets(), 10);
        assert_eq!(config.log_buckets(), None);
    }

    #[test]
    // values on a power-of-two boundary must land exactly in that bucket
    fn log_value_to_index() {
        let config = Config::log(1.0, 8).unwrap();
        assert_eq!(config.value_to_index(1.0), Ok(0));
        assert_eq!(config.value_to_index(1.5), Ok(0));
        assert_eq!(config.value_to_index(2.0), Ok(1));
        assert_eq!(config.value_to_index(8.0), Ok(3));
        assert_eq!(config.value_to_index(255.0), Ok(7));

        // values at or below low map to the first bucket
        assert_eq!(config.value_to_index(0.5), Ok(0));
    }

    #[test]
    // log2 rounding within one ulp of high must not escape the top bucket
    fn log_value_to_index_top_boundary() {
        let config = Config::log(1.0, 8).unwrap();
        let just_below_high = f64::from_bits(256.0_f64.to_bits() - 1);

        assert_eq!(config.value_to_index(just_below_high), Ok(7));

        let config = Config::log(8.0, 4).unwrap();
        let just_below_high = f64::from_bits(128.0_f64.to_bits() - 1);

        assert_eq!(config.value_to_index(just_below_high), Ok(3));
    }

    #[test]
    fn linear_value_to_index() {
        let config = Config::linear(0.0, 100.0, 10.0).unwrap();
        assert_eq!(config.value_to_index(0.0), Ok(0));
        assert_eq!(config.value_to_index(9.999), Ok(0));
        assert_eq!(config.value_to_index(10.0), Ok(1));
        assert_eq!(config.value_to_index(55.0), Ok(5));
        assert_eq!(config.value_to_index(99.9), Ok(9));

        // out-of-range lookups are a logic bug, not a normal error path
        assert_eq!(config.value_to_index(100.0), Err(Error::Unreachable));
    }

    #[test]
    fn bounds() {
        let config = Config::log(1.0, 8).unwrap();
        assert_eq!(config.index_to_lower_bound(0), 1.0);
        assert_eq!(config.index_to_lower_bound(3), 8.0);
        assert_eq!(config.index_to_upper_bound(7), 256.0);

        let config = Config::linear(50.0, 100.0, 5.0).unwrap();
        assert_eq!(config.index_to_lower_bound(0), 50.0);
        assert_eq!(config.index_to_lower_bound(5), 75.0);
        assert_eq!(config.index_to_upper_bound(9), 100.0);
    }
}
