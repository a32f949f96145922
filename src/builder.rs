use crate::config::{DEFAULT_LOG_BUCKETS, DEFAULT_LOG_LOW};
use crate::{Config, Error, Histogram};

/// A builder that constructs a histogram from the recognized options.
///
/// Supplying all of `low`, `high`, and `width` selects the linear scale.
/// Omitting any of them selects the log scale, where `low` defaults to 1 and
/// `log_buckets` defaults to 8.
pub struct Builder {
    low: Option<f64>,
    high: Option<f64>,
    width: Option<f64>,
    log_buckets: u8,
}

impl Builder {
    pub fn new() -> Self {
        Self {
            low: None,
            high: None,
            width: None,
            log_buckets: DEFAULT_LOG_BUCKETS,
        }
    }

    /// Set the lowest bucketed value. Used by both scales; on the log scale
    /// it is snapped down to a power-of-two boundary.
    pub fn low(mut self, low: f64) -> Self {
        self.low = Some(low);
        self
    }

    /// Set the end of the bucketed range (linear scale).
    pub fn high(mut self, high: f64) -> Self {
        self.high = Some(high);
        self
    }

    /// Set the bucket width (linear scale).
    pub fn width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    /// Set the number of power-of-two buckets (log scale).
    pub fn log_buckets(mut self, log_buckets: u8) -> Self {
        self.log_buckets = log_buckets;
        self
    }

    /// Consume the builder and produce a histogram.
    pub fn build(self) -> Result<Histogram, Error> {
        let config = match (self.low, self.high, self.width) {
            (Some(low), Some(high), Some(width)) => Config::linear(low, high, width)?,
            (low, _, _) => Config::log(low.unwrap_or(DEFAULT_LOG_LOW), self.log_buckets)?,
        };

        Ok(Histogram::with_config(&config))
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selects_linear_when_all_options_set() {
        let histogram = Builder::new()
            .low(0.0)
            .high(100.0)
            .width(10.0)
            .build()
            .unwrap();
        assert_eq!(histogram.config().log_buckets(), None);
        assert_eq!(histogram.config().total_buckets(), 10);
    }

    #[test]
    // any missing linear option falls back to the log scale
    fn selects_log_otherwise() {
        let histogram = Builder::new().build().unwrap();
        assert_eq!(histogram.config().log_buckets(), Some(8));
        assert_eq!(histogram.config().low(), 1.0);

        let histogram = Builder::new().low(4.0).high(100.0).build().unwrap();
        assert_eq!(histogram.config().log_buckets(), Some(8));
        assert_eq!(histogram.config().low(), 4.0);

        let histogram = Builder::new().log_buckets(4).build().unwrap();
        assert_eq!(histogram.config().total_buckets(), 4);
        assert_eq!(histogram.config().high(), 16.0);
    }

    #[test]
    fn validation_errors_propagate() {
        assert_eq!(
            Builder::new().low(10.0).high(10.0).width(1.0).build().err(),
            Some(Error::InvalidRange)
        );
        assert_eq!(
            Builder::new().low(0.0).high(100.0).width(7.0).build().err(),
            Some(Error::IndivisibleRange)
        );
    }
}
