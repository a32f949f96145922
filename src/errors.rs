use thiserror::Error;

/// Errors returned for histogram construction and operations.
#[non_exhaustive]
#[derive(Error, Debug, PartialEq)]
pub enum Error {
    #[error("histogram high must be greater than low")]
    InvalidRange,
    #[error("bucket width must be positive and no larger than the range")]
    InvalidWidth,
    #[error("histogram range must be a multiple of the bucket width")]
    IndivisibleRange,
    #[error("log scale low must be a positive finite value")]
    InvalidLow,
    #[error("log scale must have at least one bucket")]
    InvalidLogBuckets,
    #[error("rendering requires at least 80 columns")]
    InvalidColumns,
    #[error("unreachable code encountered")]
    Unreachable,
}
