//! Input sanitization and fail-fast validation shared by every operator.
//!
//! A sample is *valid* when it is finite. NaN marks a missing observation and
//! infinities are treated as corrupt input: both are excluded from reductions
//! and never reach an output as a numeric result.

use alloc::vec::Vec;

use num_traits::Float;

use crate::{Error, Result};

/// Returns `true` if the value can take part in a reduction
///
/// # Arguments
///
/// * `value` - The sample to check
///
/// # Returns
///
/// * `bool` - True if the sample is neither NaN nor infinite
#[inline]
pub fn is_valid<T: Float>(value: T) -> bool {
    value.is_finite()
}

/// Returns a copy of the series holding only its valid values, in order
///
/// # Arguments
///
/// * `series` - The input series
///
/// # Returns
///
/// * `Vec<T>` - The valid values
///
/// # Examples
///
/// ```
/// # use ta_rolling::sanitize;
/// let clean = sanitize(&[1.0, f64::NAN, 2.0, f64::INFINITY, 3.0]);
/// assert_eq!(clean, vec![1.0, 2.0, 3.0]);
/// ```
pub fn sanitize<T: Float>(series: &[T]) -> Vec<T> {
    let mut out = Vec::with_capacity(series.len());
    sanitize_into(series, &mut out);
    out
}

/// Replaces the contents of `out` with the valid values of `window`
///
/// Lets windowed operators reuse one scratch buffer across windows.
///
/// # Arguments
///
/// * `window` - The raw window
/// * `out` - Scratch buffer receiving the valid values
#[inline]
pub fn sanitize_into<T: Float>(window: &[T], out: &mut Vec<T>) {
    out.clear();
    out.extend(window.iter().copied().filter(|&v| is_valid(v)));
}

/// Counts the valid values of a series
///
/// # Arguments
///
/// * `series` - The input series
///
/// # Returns
///
/// * `usize` - Number of finite values
pub fn count_valid<T: Float>(series: &[T]) -> usize {
    series.iter().filter(|&&v| is_valid(v)).count()
}

/// Validates a series against a required length parameter
///
/// # Arguments
///
/// * `series` - The input series
/// * `min_length` - The length parameter of the operation, must be positive
///
/// # Returns
///
/// * `Result<()>` - `EmptyData` for an empty series, `InvalidLength` for a zero length
pub fn validate<T>(series: &[T], min_length: usize) -> Result<()> {
    validate_named(series, "length", min_length)
}

/// Same as [`validate`] with the parameter name reported in the error
#[inline]
pub fn validate_named<T>(series: &[T], name: &'static str, length: usize) -> Result<()> {
    if series.is_empty() {
        log::debug!("rejecting empty series");
        return Err(Error::EmptyData);
    }
    validate_length(name, length)
}

/// Validates a named length parameter
///
/// # Arguments
///
/// * `name` - The parameter name reported in the error
/// * `length` - The value to check
///
/// # Returns
///
/// * `Result<()>` - `InvalidLength` if the value is zero
#[inline]
pub fn validate_length(name: &'static str, length: usize) -> Result<()> {
    if length == 0 {
        log::debug!("rejecting {name} of zero");
        return Err(Error::InvalidLength { name, length });
    }
    Ok(())
}

/// Ensures two arrays line up index for index
///
/// # Arguments
///
/// * `expected` - The reference array
/// * `actual` - The array that must match it
///
/// # Returns
///
/// * `Result<()>` - `MismatchedLengths` if the lengths differ
#[inline]
pub fn ensure_same_length<A, B>(expected: &[A], actual: &[B]) -> Result<()> {
    if expected.len() != actual.len() {
        return Err(Error::MismatchedLengths {
            expected: expected.len(),
            actual: actual.len(),
        });
    }
    Ok(())
}

/// Converts a NaN-padded output into explicit optional values
///
/// Invalid entries become `None`, everything else `Some`.
///
/// # Arguments
///
/// * `series` - The output series
///
/// # Returns
///
/// * `Vec<Option<T>>` - The same series with absent values made explicit
///
/// # Examples
///
/// ```
/// # use ta_rolling::{sma, to_options};
/// let out = sma(&[1.0, 2.0, 3.0], 2).unwrap();
/// assert_eq!(to_options(&out), vec![None, Some(1.5), Some(2.5)]);
/// ```
pub fn to_options<T: Float>(series: &[T]) -> Vec<Option<T>> {
    series
        .iter()
        .map(|&v| if is_valid(v) { Some(v) } else { None })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::all)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_drops_nan_and_infinities() {
        let input = [f64::NAN, 1.0, f64::NEG_INFINITY, 2.5, f64::INFINITY, -3.0];
        assert_eq!(sanitize(&input), vec![1.0, 2.5, -3.0]);
        assert_eq!(count_valid(&input), 3);
    }

    #[test]
    fn test_sanitize_all_invalid_is_empty() {
        let input = [f64::NAN, f64::INFINITY];
        assert!(sanitize(&input).is_empty());
    }

    #[test]
    fn test_sanitize_into_reuses_buffer() {
        let mut buf = vec![9.0, 9.0, 9.0, 9.0];
        sanitize_into(&[1.0, f64::NAN], &mut buf);
        assert_eq!(buf, vec![1.0]);
    }

    #[test]
    fn test_validate() {
        let empty: [f64; 0] = [];
        assert_eq!(validate(&empty, 3), Err(Error::EmptyData));
        assert_eq!(
            validate(&[1.0], 0),
            Err(Error::InvalidLength {
                name: "length",
                length: 0
            })
        );
        assert!(validate(&[1.0], 5).is_ok());
    }

    #[test]
    fn test_ensure_same_length() {
        assert!(ensure_same_length(&[1.0, 2.0], &[3.0, 4.0]).is_ok());
        assert_eq!(
            ensure_same_length(&[1.0, 2.0], &[3.0]),
            Err(Error::MismatchedLengths {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn test_to_options() {
        let out = to_options(&[f64::NAN, 1.0, f64::INFINITY]);
        assert_eq!(out, vec![None, Some(1.0), None]);
    }
}
