#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

use crate::{Bucket, Builder, Config, Error};

/// A streaming statistics accumulator with a compact histogram.
///
/// Samples are folded into running moments (count, sum, sum of squares, min,
/// max) and a fixed set of bucket counters, so memory stays proportional to
/// the bucket count no matter how many samples are observed. Samples outside
/// the bucketed range still contribute to the moments but are tracked only in
/// the two outlier counters.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Histogram {
    pub(crate) config: Config,
    pub(crate) buckets: Box<[u64]>,
    count: u64,
    sum: f64,
    sum2: f64,
    min: f64,
    max: f64,
    outliers_low: u64,
    outliers_high: u64,
}

impl Histogram {
    /// Construct a histogram with the default log scale: low of 1 and eight
    /// power-of-two buckets covering `[1, 256)`.
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    /// Create a builder for configuring the bucket scale.
    pub fn builder() -> Builder {
        Builder::new()
    }

    /// Creates a new histogram using a provided [`crate::Config`].
    pub fn with_config(config: &Config) -> Self {
        let buckets: Box<[u64]> = vec![0; config.total_buckets()].into();

        Self {
            config: *config,
            buckets,
            count: 0,
            sum: 0.0,
            sum2: 0.0,
            min: f64::NAN,
            max: f64::NAN,
            outliers_low: 0,
            outliers_high: 0,
        }
    }

    /// Fold a sample into the accumulator.
    ///
    /// The moments are updated first, then the sample is classified: outliers
    /// adjust the outlier counters, everything else increments its bucket.
    /// NaN samples are ignored before any state is touched; folding one in
    /// would poison every moment.
    pub fn add(&mut self, value: f64) -> Result<(), Error> {
        if value.is_nan() {
            return Ok(());
        }

        if self.count == 0 {
            self.min = value;
            self.max = value;
        } else {
            self.max = self.max.max(value);
            self.min = self.min.min(value);
        }

        self.count = self.count.wrapping_add(1);
        self.sum += value;
        self.sum2 += value * value;

        if !self.outlier(value, false) {
            let index = self.config.value_to_index(value)?;
            self.buckets[index] = self.buckets[index].wrapping_add(1);
        }

        Ok(())
    }

    /// Remove a previously added sample from the accumulator.
    ///
    /// The min and max become undefined after any removal; they are not
    /// recomputed from the remaining population. Removing a value that was
    /// never added, or removing more samples than were added, is a caller
    /// error: the counters wrap rather than being guarded. Removing NaN is
    /// ignored, mirroring `add`.
    pub fn remove(&mut self, value: f64) -> Result<(), Error> {
        if value.is_nan() {
            return Ok(());
        }

        self.count = self.count.wrapping_sub(1);
        self.sum -= value;
        self.sum2 -= value * value;
        self.min = f64::NAN;
        self.max = f64::NAN;

        if !self.outlier(value, true) {
            let index = self.config.value_to_index(value)?;
            self.buckets[index] = self.buckets[index].wrapping_sub(1);
        }

        Ok(())
    }

    // Classify a sample against the bucketed range, adjusting the matching
    // outlier counter as a side effect. Must be called exactly once per
    // add or remove.
    fn outlier(&mut self, value: f64, removing: bool) -> bool {
        if value < self.config.low() {
            self.outliers_low = if removing {
                self.outliers_low.wrapping_sub(1)
            } else {
                self.outliers_low.wrapping_add(1)
            };
            true
        } else if value >= self.config.high() {
            self.outliers_high = if removing {
                self.outliers_high.wrapping_sub(1)
            } else {
                self.outliers_high.wrapping_add(1)
            };
            true
        } else {
            false
        }
    }

    /// Reset all counters and moments while keeping the configuration.
    pub fn clear(&mut self) {
        for bucket in self.buckets.iter_mut() {
            *bucket = 0;
        }
        self.count = 0;
        self.sum = 0.0;
        self.sum2 = 0.0;
        self.min = f64::NAN;
        self.max = f64::NAN;
        self.outliers_low = 0;
        self.outliers_high = 0;
    }

    /// The number of samples currently included.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// The running sum of all included samples, outliers included.
    pub fn sum(&self) -> f64 {
        self.sum
    }

    /// The running sum of squares of all included samples.
    pub fn sum2(&self) -> f64 {
        self.sum2
    }

    /// The smallest sample seen, or `None` before the first sample and after
    /// any removal.
    pub fn min(&self) -> Option<f64> {
        if self.min.is_nan() {
            None
        } else {
            Some(self.min)
        }
    }

    /// The largest sample seen, or `None` before the first sample and after
    /// any removal.
    pub fn max(&self) -> Option<f64> {
        if self.max.is_nan() {
            None
        } else {
            Some(self.max)
        }
    }

    /// The arithmetic mean of the included samples.
    ///
    /// Always computed from the running sum, so it stays current across
    /// removals. NaN when the accumulator is empty, following standard float
    /// semantics rather than raising an error.
    pub fn mean(&self) -> f64 {
        self.sum / self.count as f64
    }

    /// The unbiased sample standard deviation, or NaN when fewer than two
    /// samples are included.
    pub fn std_dev(&self) -> f64 {
        if self.count <= 1 {
            return f64::NAN;
        }

        let n = self.count as f64;
        ((self.sum2 - self.sum * self.sum / n) / (n - 1.0)).sqrt()
    }

    /// The number of samples below the bucketed range.
    pub fn outliers_low(&self) -> u64 {
        self.outliers_low
    }

    /// The number of samples at or above the bucketed range.
    pub fn outliers_high(&self) -> u64 {
        self.outliers_high
    }

    /// The number of power-of-two buckets, or `None` for the linear scale.
    pub fn log_buckets(&self) -> Option<u8> {
        self.config.log_buckets()
    }

    /// Get a reference to the raw bucket counters.
    pub fn as_slice(&self) -> &[u64] {
        &self.buckets
    }

    /// Iterate over every bucket in ascending index order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            index: 0,
            histogram: self,
        }
    }

    /// Iterate over the buckets with a nonzero count, in ascending index
    /// order.
    pub fn nonzero(&self) -> Nonzero<'_> {
        Nonzero { inner: self.iter() }
    }

    /// Returns the bucket configuration of the histogram.
    pub fn config(&self) -> Config {
        self.config
    }
}

impl Default for Histogram {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a Histogram {
    type Item = Bucket;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator across the histogram buckets.
pub struct Iter<'a> {
    index: usize,
    histogram: &'a Histogram,
}

impl<'a> Iterator for Iter<'a> {
    type Item = Bucket;

    fn next(&mut self) -> Option<<Self as std::iter::Iterator>::Item> {
        if self.index >= self.histogram.buckets.len() {
            return None;
        }

        let bucket = Bucket {
            lower: self.histogram.config.index_to_lower_bound(self.index),
            upper: self.histogram.config.index_to_upper_bound(self.index),
            count: self.histogram.buckets[self.index],
        };

        self.index += 1;

        Some(bucket)
    }
}

/// An iterator across the histogram buckets that skips empty buckets.
pub struct Nonzero<'a> {
    inner: Iter<'a>,
}

impl<'a> Iterator for Nonzero<'a> {
    type Item = Bucket;

    fn next(&mut self) -> Option<<Self as std::iter::Iterator>::Item> {
        self.inner.find(|bucket| bucket.count != 0)
    }
}
