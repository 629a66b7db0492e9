//! Moving averages built on the window processor.
//!
//! SMA and WMA are stateless window reductions. EMA is a recursion seeded from
//! the first window, and Hull composes three WMAs, so both depend on every
//! earlier sample and can only run as one sequential pass.

use alloc::{string::ToString, vec::Vec};
use core::{fmt, str::FromStr};

use num_traits::Float;

use crate::{Error, Result, validation::validate_length};

mod ema;
pub use ema::{Ema, ema};

mod hull;
pub use hull::hull;

mod sma;
pub use sma::sma;

mod wma;
pub use wma::wma;

/// The supported moving averages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MovingAverageKind {
    /// Simple moving average
    Sma,
    /// Exponential moving average
    Ema,
    /// Linearly weighted moving average
    Wma,
    /// Hull moving average
    Hull,
}

impl MovingAverageKind {
    /// Short lowercase name of the average
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Sma => "sma",
            Self::Ema => "ema",
            Self::Wma => "wma",
            Self::Hull => "hma",
        }
    }

    /// Returns true if an output depends on every earlier sample
    pub const fn is_recursive(&self) -> bool {
        matches!(self, Self::Ema | Self::Hull)
    }
}

impl fmt::Display for MovingAverageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MovingAverageKind {
    type Err = Error;

    /// Parses `sma`, `ema`, `wma`, `hma` or `hull`, ignoring case
    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim();
        [
            ("sma", Self::Sma),
            ("ema", Self::Ema),
            ("wma", Self::Wma),
            ("hma", Self::Hull),
            ("hull", Self::Hull),
        ]
        .into_iter()
        .find(|(alias, _)| alias.eq_ignore_ascii_case(name))
        .map(|(_, kind)| kind)
        .ok_or_else(|| {
            log::debug!("rejecting unknown moving average {s:?}");
            Error::InvalidMovingAverageType(s.to_string())
        })
    }
}

/// Computes a moving average selected at runtime
///
/// # Arguments
///
/// * `series` - The input series
/// * `kind` - Which average to compute
/// * `length` - The smoothing length, must be positive
///
/// # Returns
///
/// * `Result<Vec<T>>` - Same length as the input
///
/// # Examples
///
/// ```
/// # use ta_rolling::{MovingAverageKind, moving_average};
/// let kind: MovingAverageKind = "EMA".parse().unwrap();
/// let out = moving_average(&[1.0, 2.0, 3.0, 4.0, 5.0], kind, 3).unwrap();
/// assert_eq!(&out[2..], &[2.0, 3.0, 4.0]);
/// ```
pub fn moving_average<T: Float + Default>(
    series: &[T],
    kind: MovingAverageKind,
    length: usize,
) -> Result<Vec<T>> {
    validate_length("length", length)?;
    match kind {
        MovingAverageKind::Sma => sma(series, length),
        MovingAverageKind::Ema => ema(series, length),
        MovingAverageKind::Wma => wma(series, length),
        MovingAverageKind::Hull => hull(series, length),
    }
}

/// A moving average with a fixed kind and length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovingAverage {
    kind: MovingAverageKind,
    length: usize,
}

impl MovingAverage {
    /// Creates a new moving average
    ///
    /// # Arguments
    ///
    /// * `kind` - Which average to compute
    /// * `length` - The smoothing length, must be positive
    ///
    /// # Returns
    ///
    /// * `Result<Self>` - The average, or `InvalidLength` if the length is zero
    pub fn new(kind: MovingAverageKind, length: usize) -> Result<Self> {
        validate_length("length", length)?;
        Ok(Self { kind, length })
    }

    /// Which average is computed
    pub const fn kind(&self) -> MovingAverageKind {
        self.kind
    }

    /// The smoothing length
    pub const fn length(&self) -> usize {
        self.length
    }

    /// Computes the average over a series
    pub fn compute<T: Float + Default>(&self, series: &[T]) -> Result<Vec<T>> {
        moving_average(series, self.kind, self.length)
    }
}
