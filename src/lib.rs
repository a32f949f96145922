//! A streaming statistics accumulator with a compact histogram.
//!
//! Samples are folded into running moments and a fixed number of bucket
//! counters as they arrive, so memory use stays proportional to the bucket
//! count no matter how many samples the stream produces. Individual samples
//! are never retained.
//!
//! Buckets follow one of two scales: a binary-logarithmic scale where each
//! bucket spans a power of two, or a linear scale with uniform bucket widths.
//! Samples outside the bucketed range are tracked in a pair of outlier
//! counters and still contribute to the moments.
//!
//! ```
//! use streamhist::Histogram;
//!
//! let mut histogram = Histogram::new();
//!
//! for value in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
//!     histogram.add(value).unwrap();
//! }
//!
//! assert_eq!(histogram.count(), 8);
//! assert_eq!(histogram.mean(), 5.0);
//! assert_eq!(histogram.min(), Some(2.0));
//! assert_eq!(histogram.max(), Some(9.0));
//! ```
//!
//! Histograms render as an ASCII bar chart via [`Histogram::render`] or the
//! `Display` implementation.

mod bucket;
mod builder;
mod config;
mod errors;
mod histogram;
mod render;

pub use bucket::Bucket;
pub use builder::Builder;
pub use config::Config;
pub use errors::Error;
pub use histogram::{Histogram, Iter, Nonzero};
