use alloc::vec::Vec;

use num_traits::Float;

use crate::{Result, helper::linear_weighted_mean, processor::process, validation::validate};

/// Linearly weighted moving average
///
/// Weights count recency among the valid samples of the window: with `k`
/// valid samples the newest weighs `k` and the oldest weighs 1, so a missing
/// observation does not leave a hole in the weighting.
///
/// # Arguments
///
/// * `series` - The input series
/// * `length` - The window length, must be positive
///
/// # Returns
///
/// * `Result<Vec<T>>` - Same length as the input, NaN for the first `length - 1` values
///
/// # Examples
///
/// ```
/// # use ta_rolling::wma;
/// # use assert_approx_eq::assert_approx_eq;
/// let out = wma(&[1.0_f64, 2.0, 3.0, 4.0], 3).unwrap();
/// assert_approx_eq!(out[2], 14.0 / 6.0);
/// assert_approx_eq!(out[3], 20.0 / 6.0);
/// ```
pub fn wma<T: Float + Default>(series: &[T], length: usize) -> Result<Vec<T>> {
    validate(series, length)?;
    process(series, length, |window, _| linear_weighted_mean(window))
}
