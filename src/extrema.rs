//! Rolling minimum and maximum in O(n).
//!
//! Each window extremum comes from a monotonic deque of `(value, position)`
//! entries: expired entries leave from the front, dominated entries leave from
//! the back, and the front is always the extremum of the current window. Every
//! sample is pushed and popped at most once.
//!
//! NaN and infinite samples are never pushed but still occupy their position,
//! so a window of `W` positions stays a window of `W` positions. A window that
//! holds no valid sample yields NaN.

use alloc::vec::Vec;

use num_traits::Float;

use crate::{
    Result,
    utils::{Max, Min, MonotonicQueue, OrderPolicy},
    validation::{is_valid, validate_length, validate_named},
};

/// Streaming extremum over the last `period` samples
#[derive(Debug, Clone)]
pub struct RollingExtremum<T, O>(MonotonicQueue<T, O>);

/// # Rolling Maximum
///
/// Tracks the highest value over the last `period` samples with constant
/// amortized cost per update. The building block for highest-high lookbacks
/// such as Donchian channels, Aroon or Williams %R.
pub type Maximum<T> = RollingExtremum<T, Max>;

/// # Rolling Minimum
///
/// Tracks the lowest value over the last `period` samples with constant
/// amortized cost per update. The building block for lowest-low lookbacks
/// such as Donchian channels, stochastics or trailing stops.
pub type Minimum<T> = RollingExtremum<T, Min>;

impl<T, O> RollingExtremum<T, O>
where
    T: Float + Default,
    O: OrderPolicy<T>,
{
    /// Creates a new tracker with the specified period
    ///
    /// # Arguments
    ///
    /// * `period` - The size of the rolling window
    ///
    /// # Returns
    ///
    /// * `Result<Self>` - The tracker, or `InvalidLength` if the period is zero
    pub fn new(period: usize) -> Result<Self> {
        validate_length("period", period)?;
        Ok(Self(MonotonicQueue::new(period)))
    }

    /// Pushes a new value into the rolling window
    ///
    /// # Arguments
    ///
    /// * `value` - The new sample, NaN and infinities take a slot but are ignored
    ///
    /// # Returns
    ///
    /// * `Option<T>` - The extremum once a full window has been seen
    ///
    /// # Examples
    ///
    /// ```
    /// # use ta_rolling::Maximum;
    /// let mut max = Maximum::new(3).unwrap();
    /// let out: Vec<_> = [5.0, 3.0, 8.0, 2.0, 9.0, 1.0]
    ///     .iter()
    ///     .map(|&v| max.next(v))
    ///     .collect();
    /// assert_eq!(out, [None, None, Some(8.0), Some(8.0), Some(9.0), Some(9.0)]);
    /// ```
    pub fn next(&mut self, value: T) -> Option<T> {
        if is_valid(value) {
            self.0.push(value);
        } else {
            self.0.skip();
        }
        self.get()
    }

    /// Returns the extremum of the current window
    ///
    /// # Returns
    ///
    /// * `Option<T>` - `None` until the window is full or if it holds no valid value
    pub fn get(&self) -> Option<T> {
        if self.0.is_ready() {
            self.0.front()
        } else {
            None
        }
    }

    /// Returns true once a full window has been seen
    pub const fn is_ready(&self) -> bool {
        self.0.is_ready()
    }

    /// Returns the period of the window
    pub const fn period(&self) -> usize {
        self.0.period()
    }

    /// Resets the rolling window
    pub fn reset(&mut self) {
        self.0.reset();
    }
}

pub(crate) fn rolling_extremum<T, O>(series: &[T], window_size: usize) -> Result<Vec<T>>
where
    T: Float + Default,
    O: OrderPolicy<T>,
{
    validate_named(series, "window size", window_size)?;
    if window_size > series.len() {
        return Ok(vec![T::nan(); series.len()]);
    }

    let mut tracker = RollingExtremum::<T, O>::new(window_size)?;
    Ok(series
        .iter()
        .map(|&v| tracker.next(v).unwrap_or_else(T::nan))
        .collect())
}

/// Returns the rolling maximum of a series
///
/// # Arguments
///
/// * `series` - The input series
/// * `window_size` - The size of the rolling window
///
/// # Returns
///
/// * `Result<Vec<T>>` - Same length as the input, NaN for the first `window_size - 1` values
///
/// # Examples
///
/// ```
/// # use ta_rolling::rolling_max;
/// let out = rolling_max(&[5.0_f64, 3.0, 8.0, 2.0, 9.0, 1.0], 3).unwrap();
/// assert!(out[0].is_nan() && out[1].is_nan());
/// assert_eq!(&out[2..], &[8.0, 8.0, 9.0, 9.0]);
/// ```
pub fn rolling_max<T: Float + Default>(series: &[T], window_size: usize) -> Result<Vec<T>> {
    rolling_extremum::<T, Max>(series, window_size)
}

/// Returns the rolling minimum of a series
///
/// # Arguments
///
/// * `series` - The input series
/// * `window_size` - The size of the rolling window
///
/// # Returns
///
/// * `Result<Vec<T>>` - Same length as the input, NaN for the first `window_size - 1` values
pub fn rolling_min<T: Float + Default>(series: &[T], window_size: usize) -> Result<Vec<T>> {
    rolling_extremum::<T, Min>(series, window_size)
}

/// Returns the rolling range (maximum minus minimum) of a series
///
/// # Arguments
///
/// * `series` - The input series
/// * `window_size` - The size of the rolling window
///
/// # Returns
///
/// * `Result<Vec<T>>` - Same length as the input, NaN where either extremum is undefined
pub fn rolling_range<T: Float + Default>(series: &[T], window_size: usize) -> Result<Vec<T>> {
    let max = rolling_max(series, window_size)?;
    let min = rolling_min(series, window_size)?;
    Ok(max.into_iter().zip(min).map(|(hi, lo)| hi - lo).collect())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::all)]
mod tests {
    use super::*;
    use crate::Error;

    fn brute_force(series: &[f64], w: usize, pick_max: bool) -> Vec<f64> {
        (0..series.len())
            .map(|i| {
                if i + 1 < w {
                    return f64::NAN;
                }
                series[i + 1 - w..=i]
                    .iter()
                    .copied()
                    .filter(|v| v.is_finite())
                    .reduce(|a, b| if pick_max { a.max(b) } else { a.min(b) })
                    .unwrap_or(f64::NAN)
            })
            .collect()
    }

    fn same(a: &[f64], b: &[f64]) -> bool {
        a.len() == b.len()
            && a.iter()
                .zip(b)
                .all(|(x, y)| (x.is_nan() && y.is_nan()) || x == y)
    }

    #[test]
    fn test_rolling_max_scenario() {
        let out = rolling_max(&[5.0, 3.0, 8.0, 2.0, 9.0, 1.0], 3).unwrap();
        assert!(same(&out, &[f64::NAN, f64::NAN, 8.0, 8.0, 9.0, 9.0]));
    }

    #[test]
    fn test_rolling_min_scenario() {
        let out = rolling_min(&[5.0, 3.0, 8.0, 2.0, 9.0, 1.0], 3).unwrap();
        assert!(same(&out, &[f64::NAN, f64::NAN, 3.0, 2.0, 2.0, 1.0]));
    }

    #[test]
    fn test_matches_brute_force_on_clustered_extrema() {
        let series = [
            4.0, 4.0, 4.0, 1.0, 7.0, 7.0, 2.0, 9.0, 9.0, 9.0, 0.5, 3.0, 3.0, 8.0, 1.0,
        ];
        for w in 1..=series.len() {
            assert!(same(&rolling_max(&series, w).unwrap(), &brute_force(&series, w, true)));
            assert!(same(&rolling_min(&series, w).unwrap(), &brute_force(&series, w, false)));
        }
    }

    #[test]
    fn test_invalid_samples_keep_their_slot() {
        let series = [9.0, f64::NAN, f64::INFINITY, 1.0, f64::NAN, f64::NAN, f64::NAN];
        let out = rolling_max(&series, 3).unwrap();
        assert!(same(&out, &brute_force(&series, 3, true)));
        assert_eq!(out[2], 9.0);
        assert_eq!(out[3], 1.0);
        assert!(out[6].is_nan());
    }

    #[test]
    fn test_rolling_range() {
        let out = rolling_range(&[1.0, 5.0, 2.0, 8.0], 2).unwrap();
        assert!(same(&out, &[f64::NAN, 4.0, 3.0, 6.0]));
    }

    #[test]
    fn test_window_larger_than_series_is_all_nan() {
        let out = rolling_min(&[1.0, 2.0], 10).unwrap();
        assert!(out.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_degenerate_configuration_fails_fast() {
        let empty: [f64; 0] = [];
        assert_eq!(rolling_max(&empty, 3), Err(Error::EmptyData));
        assert!(matches!(
            rolling_min(&[1.0], 0),
            Err(Error::InvalidLength { length: 0, .. })
        ));
        assert!(Maximum::<f64>::new(0).is_err());
    }

    #[test]
    fn test_streaming_reset() {
        let mut min = Minimum::new(2).unwrap();
        assert_eq!(min.next(3.0), None);
        assert_eq!(min.next(1.0), Some(1.0));
        assert!(min.is_ready());
        min.reset();
        assert!(!min.is_ready());
        assert_eq!(min.get(), None);
        assert_eq!(min.period(), 2);
    }
}
