use alloc::vec::Vec;

use num_traits::Float;

use crate::{Result, helper::mean, processor::process, validation::validate};

/// Simple moving average
///
/// Mean of the valid samples of each window, NaN for a window without any.
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
/// # use ta_rolling::sma;
/// let out = sma(&[1.0_f64, 2.0, 3.0, 4.0, 5.0], 3).unwrap();
/// assert!(out[0].is_nan() && out[1].is_nan());
/// assert_eq!(&out[2..], &[2.0, 3.0, 4.0]);
/// ```
pub fn sma<T: Float + Default>(series: &[T], length: usize) -> Result<Vec<T>> {
    validate(series, length)?;
    process(series, length, |window, _| mean(window))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::all)]
mod tests {
    use super::*;
    use crate::Error;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_sma_scenario() {
        let out = sma(&[1.0, 2.0, 3.0, 4.0, 5.0], 3).unwrap();
        assert!(out[0].is_nan() && out[1].is_nan());
        assert_eq!(&out[2..], &[2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_length_one_is_identity() {
        let series = [3.5, -1.0, 8.25, 0.0];
        assert_eq!(sma(&series, 1).unwrap(), series);
    }

    #[test]
    fn test_averages_valid_samples_only() {
        let out = sma(&[1.0, f64::NAN, 3.0, f64::INFINITY, f64::NAN], 2).unwrap();
        assert!(out[0].is_nan());
        assert_eq!(out[1], 1.0);
        assert_eq!(out[2], 3.0);
        assert_eq!(out[3], 3.0);
        assert!(out[4].is_nan());
    }

    #[test]
    fn test_large_offsets() {
        let series = [1e9 + 0.1, 1e9 + 0.2, 1e9 + 0.3, 1e9 + 0.4];
        let out = sma(&series, 2).unwrap();
        assert_approx_eq!(out[3], 1e9 + 0.35, 1e-6);
    }

    #[test]
    fn test_invalid_input() {
        assert_eq!(sma::<f64>(&[], 3), Err(Error::EmptyData));
        assert_eq!(
            sma(&[1.0], 0),
            Err(Error::InvalidLength {
                name: "length",
                length: 0
            })
        );
    }
}
