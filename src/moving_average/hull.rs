use alloc::vec::Vec;

use num_traits::Float;

use crate::{
    Result,
    validation::{is_valid, validate},
};

use super::wma;

/// Hull moving average
///
/// `HMA(n) = WMA(2·WMA(n/2) - WMA(n), floor(sqrt(n)))`, both inner lengths at
/// least 1. The difference series is NaN wherever either inner average is
/// undefined, so the first value appears at index `n - 1`. The outer average
/// runs over the defined differences only, so the first `floor(sqrt(n)) - 1`
/// values average a partial outer window.
///
/// # Arguments
///
/// * `series` - The input series
/// * `length` - The smoothing length, must be positive
///
/// # Returns
///
/// * `Result<Vec<T>>` - Same length as the input, all NaN if `length` exceeds the series
///
/// # Examples
///
/// ```
/// # use ta_rolling::hull;
/// # use assert_approx_eq::assert_approx_eq;
/// let series: Vec<f64> = (0..10).map(f64::from).collect();
/// let out = hull(&series, 4).unwrap();
/// assert!(out[..3].iter().all(|v| v.is_nan()));
/// // the Hull average tracks a straight line without lag
/// assert_approx_eq!(out[9], 9.0);
/// ```
pub fn hull<T: Float + Default>(series: &[T], length: usize) -> Result<Vec<T>> {
    validate(series, length)?;
    if length > series.len() {
        return Ok(vec![T::nan(); series.len()]);
    }

    let half = wma(series, (length / 2).max(1))?;
    let full = wma(series, length)?;
    let two = T::one() + T::one();
    let diff: Vec<T> = half
        .iter()
        .zip(&full)
        .map(|(&h, &f)| {
            if is_valid(h) && is_valid(f) {
                two * h - f
            } else {
                T::nan()
            }
        })
        .collect();

    wma(&diff, length.isqrt().max(1))
}
