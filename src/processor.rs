//! Generic sliding-window iteration.
//!
//! For a window size `W` over a series of length `N` the processor produces
//! exactly `N` outputs. Index `i` is NaN while `i < W - 1` and otherwise holds
//! the reducer's result for the window `series[i + 1 - W ..= i]`.

use alloc::vec::Vec;

use num_traits::Float;

use crate::{
    Result,
    validation::{sanitize_into, validate_named},
};

/// Applies a reducer to the valid values of every complete window
///
/// The reducer receives the window with NaN and infinite samples removed
/// (possibly empty) together with the right-edge index of the window. It owns
/// the policy for windows with too few valid samples, usually returning NaN.
///
/// # Arguments
///
/// * `series` - The input series
/// * `window_size` - The window size, must be positive
/// * `reducer` - Maps `(valid_values, index)` to the output at `index`
///
/// # Returns
///
/// * `Result<Vec<T>>` - A series of the same length as the input
///
/// # Examples
///
/// ```
/// # use ta_rolling::process;
/// let sums = process(&[1.0, 2.0, f64::NAN, 4.0], 2, |w, _| w.iter().sum()).unwrap();
/// assert!(sums[0].is_nan());
/// assert_eq!(&sums[1..], &[3.0, 2.0, 4.0]);
/// ```
pub fn process<T, F>(series: &[T], window_size: usize, mut reducer: F) -> Result<Vec<T>>
where
    T: Float,
    F: FnMut(&[T], usize) -> T,
{
    let mut scratch = Vec::with_capacity(window_size.min(series.len()));
    process_raw(series, window_size, |window, i| {
        sanitize_into(window, &mut scratch);
        reducer(&scratch, i)
    })
}

/// Applies a reducer to the raw contents of every complete window
///
/// Unlike [`process`] the window is handed over unsanitized, for reducers
/// that need positional information inside the window.
///
/// # Arguments
///
/// * `series` - The input series
/// * `window_size` - The window size, must be positive
/// * `reducer` - Maps `(window, index)` to the output at `index`
///
/// # Returns
///
/// * `Result<Vec<T>>` - A series of the same length as the input
pub fn process_raw<T, F>(series: &[T], window_size: usize, mut reducer: F) -> Result<Vec<T>>
where
    T: Float,
    F: FnMut(&[T], usize) -> T,
{
    validate_named(series, "window size", window_size)?;

    let mut out = vec![T::nan(); series.len()];
    for (i, window) in windows(series, window_size) {
        out[i] = reducer(window, i);
    }
    Ok(out)
}

/// Returns an iterator over the complete windows of a series
///
/// Yields `(right_edge_index, window)` for every `i >= window_size - 1`.
/// Yields nothing when the window is larger than the series or zero.
///
/// # Arguments
///
/// * `series` - The input series
/// * `window_size` - The window size
///
/// # Returns
///
/// * `impl Iterator<Item = (usize, &[T])>` - The complete windows, oldest first
pub fn windows<T>(series: &[T], window_size: usize) -> impl Iterator<Item = (usize, &[T])> {
    let offset = window_size.saturating_sub(1);
    let len = if window_size == 0 { 0 } else { series.len() };
    series[..len]
        .windows(window_size.max(1))
        .enumerate()
        .map(move |(start, window)| (start + offset, window))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::all)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_pads_warmup_with_nan() {
        let out = process(&[1.0, 2.0, 3.0, 4.0], 3, |w, _| w.iter().copied().sum()).unwrap();
        assert_eq!(out.len(), 4);
        assert!(out[0].is_nan());
        assert!(out[1].is_nan());
        assert_eq!(out[2], 6.0);
        assert_eq!(out[3], 9.0);
    }

    #[test]
    fn test_reducer_sees_right_edge_index() {
        let out = process(&[0.0; 5], 2, |_, i| i as f64).unwrap();
        assert_eq!(&out[1..], &[1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_reducer_receives_sanitized_window() {
        let input = [1.0, f64::NAN, f64::INFINITY, 4.0];
        let out = process(&input, 3, |w, _| w.len() as f64).unwrap();
        assert_eq!(&out[2..], &[1.0, 1.0]);
    }

    #[test]
    fn test_empty_valid_window_is_reducer_policy() {
        let input = [f64::NAN, f64::NAN, 1.0];
        let out = process(&input, 2, |w, _| {
            if w.is_empty() { f64::NAN } else { w[0] }
        })
        .unwrap();
        assert!(out[1].is_nan());
        assert_eq!(out[2], 1.0);
    }

    #[test]
    fn test_window_larger_than_series() {
        let out = process(&[1.0, 2.0], 5, |_, _| 0.0).unwrap();
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_invalid_window_size() {
        assert_eq!(
            process(&[1.0, 2.0], 0, |_, _| 0.0),
            Err(Error::InvalidLength {
                name: "window size",
                length: 0
            })
        );
    }

    #[test]
    fn test_empty_series() {
        let empty: [f64; 0] = [];
        assert_eq!(process(&empty, 2, |_, _| 0.0), Err(Error::EmptyData));
    }

    #[test]
    fn test_raw_window_keeps_positions() {
        let input = [1.0, f64::NAN, 3.0];
        let out = process_raw(&input, 3, |w, _| if w[1].is_nan() { 1.0 } else { 0.0 }).unwrap();
        assert_eq!(out[2], 1.0);
    }

    #[test]
    fn test_windows_iterator() {
        let data = [1, 2, 3, 4];
        let collected: Vec<_> = windows(&data, 3).collect();
        assert_eq!(collected, vec![(2, &data[0..3]), (3, &data[1..4])]);
        assert_eq!(windows(&data, 0).count(), 0);
        assert_eq!(windows(&data, 5).count(), 0);
    }
}
