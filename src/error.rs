use alloc::string::String;

use thiserror::Error;

/// Errors raised by input validation.
///
/// Every variant is a configuration or input problem detected before any
/// output is produced. Numeric degeneracy inside a window (no valid samples,
/// NaN or infinite inputs) is never an error: it surfaces as NaN in the output.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The input series is empty
    #[error("empty data: the input series contains no values")]
    EmptyData,

    /// A length, period or window size parameter is zero
    #[error("invalid {name}: {length}, must be greater than zero")]
    InvalidLength {
        /// Name of the offending parameter
        name: &'static str,
        /// The value that was provided
        length: usize,
    },

    /// A percentile outside `[0, 100]` or not finite
    #[error("invalid percentile {0}: must be within [0, 100]")]
    InvalidPercentile(f64),

    /// No valid values remain once NaN and infinite values are removed
    #[error("no valid values remain after removing NaN and infinite entries")]
    EmptyAfterSanitization,

    /// The requested order statistic does not exist in the sample
    #[error("k = {k} is out of bounds, valid range is [0, {}]", .len.saturating_sub(1))]
    KOutOfBounds {
        /// Requested rank
        k: usize,
        /// Number of valid values in the sample
        len: usize,
    },

    /// Two arrays that must line up have different lengths
    #[error("mismatched lengths: expected {expected}, got {actual}")]
    MismatchedLengths {
        /// Expected length
        expected: usize,
        /// Length that was provided
        actual: usize,
    },

    /// Chunk size of zero
    #[error("invalid chunk size {0}: must be greater than zero")]
    InvalidChunkSize(usize),

    /// Overlap that leaves no forward progress between chunks
    #[error("invalid overlap {overlap}: must be smaller than chunk size {chunk_size}")]
    InvalidOverlap {
        /// Requested overlap
        overlap: usize,
        /// Configured chunk size
        chunk_size: usize,
    },

    /// Moving average name that does not map to a known kind
    #[error("unknown moving average type '{0}', expected one of sma, ema, wma, hma")]
    InvalidMovingAverageType(String),
}

/// Result alias used across the crate
pub type Result<T> = core::result::Result<T, Error>;
