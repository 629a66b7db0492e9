//! Order statistics by partition-based selection.
//!
//! Every query copies the valid values of the caller's slice into an owned
//! working buffer and runs quickselect on it, so the caller's data is never
//! reordered. Selection uses a median-of-three pivot and a three-way
//! partition, which keeps sorted, reverse-sorted and duplicate-heavy inputs
//! close to linear time. The worst case remains quadratic.

use alloc::vec::Vec;

use num_traits::Float;

use crate::{
    Error, Result,
    processor::process_raw,
    validation::{sanitize, sanitize_into},
};

/// Orders `values[lo]`, `values[mid]`, `values[hi]` and returns `mid`
#[inline]
fn median_of_three<T: Float>(values: &mut [T], lo: usize, hi: usize) -> usize {
    let mid = lo + (hi - lo) / 2;
    if values[mid] < values[lo] {
        values.swap(lo, mid);
    }
    if values[hi] < values[lo] {
        values.swap(lo, hi);
    }
    if values[hi] < values[mid] {
        values.swap(mid, hi);
    }
    mid
}

/// Partitions `values[lo..=hi]` around a median-of-three pivot
///
/// Afterwards `values[lo..lt]` < pivot, `values[lt..=gt]` == pivot and
/// `values[gt + 1..=hi]` > pivot.
fn partition<T: Float>(values: &mut [T], lo: usize, hi: usize) -> (usize, usize) {
    let pivot = values[median_of_three(values, lo, hi)];
    let (mut lt, mut i, mut gt) = (lo, lo, hi);
    while i <= gt {
        if values[i] < pivot {
            values.swap(lt, i);
            lt += 1;
            i += 1;
        } else if values[i] > pivot {
            values.swap(i, gt);
            // the pivot value still sits at or before gt, so gt > 0
            gt -= 1;
        } else {
            i += 1;
        }
    }
    (lt, gt)
}

/// Returns the `k`-th smallest value, reordering `values` in place
///
/// `values` must be non-empty, free of NaN, and `k < values.len()`.
pub(crate) fn select_in_place<T: Float>(values: &mut [T], k: usize) -> T {
    let (mut lo, mut hi) = (0, values.len() - 1);
    while lo < hi {
        let (lt, gt) = partition(values, lo, hi);
        if k < lt {
            hi = lt - 1;
        } else if k > gt {
            lo = gt + 1;
        } else {
            return values[k];
        }
    }
    values[k]
}

/// Returns the median of non-empty, NaN-free `values`, reordering them in place
pub(crate) fn median_in_place<T: Float>(values: &mut [T]) -> T {
    let n = values.len();
    let mid = n / 2;
    let upper = select_in_place(values, mid);
    if n % 2 == 1 {
        return upper;
    }
    // the lower half now holds the `mid` smallest values
    let lower = select_in_place(&mut values[..mid], mid - 1);
    (lower + upper) / (T::one() + T::one())
}

/// Rank addressed by a percentile in a sample of `n` values
#[inline]
fn percentile_rank(p: f64, n: usize) -> usize {
    // truncation is floor for non-negative ranks
    (p * (n - 1) as f64 / 100.0) as usize
}

pub(crate) fn check_percentile(p: f64) -> Result<()> {
    if !p.is_finite() || !(0.0..=100.0).contains(&p) {
        log::debug!("rejecting percentile {p}");
        return Err(Error::InvalidPercentile(p));
    }
    Ok(())
}

/// Copies the valid values of `array` into a working buffer
fn working_copy<T: Float>(array: &[T]) -> Result<Vec<T>> {
    let work = sanitize(array);
    if work.is_empty() {
        return Err(Error::EmptyAfterSanitization);
    }
    Ok(work)
}

fn check_rank(k: usize, len: usize) -> Result<()> {
    if k >= len {
        return Err(Error::KOutOfBounds { k, len });
    }
    Ok(())
}

/// Returns the `k`-th smallest valid value (0-based)
///
/// # Arguments
///
/// * `array` - The sample, NaN and infinite values are ignored
/// * `k` - The rank, within `[0, n - 1]` for `n` valid values
///
/// # Returns
///
/// * `Result<T>` - The value, `EmptyAfterSanitization` or `KOutOfBounds`
///
/// # Examples
///
/// ```
/// # use ta_rolling::kth_smallest;
/// assert_eq!(kth_smallest(&[5.0, 3.0, 8.0, 2.0, 9.0, 1.0], 2).unwrap(), 3.0);
/// ```
pub fn kth_smallest<T: Float>(array: &[T], k: usize) -> Result<T> {
    let mut work = working_copy(array)?;
    check_rank(k, work.len())?;
    Ok(select_in_place(&mut work, k))
}

/// Returns the `k`-th largest valid value (0-based)
///
/// # Arguments
///
/// * `array` - The sample, NaN and infinite values are ignored
/// * `k` - The rank from the top, within `[0, n - 1]` for `n` valid values
///
/// # Returns
///
/// * `Result<T>` - The value, `EmptyAfterSanitization` or `KOutOfBounds`
pub fn kth_largest<T: Float>(array: &[T], k: usize) -> Result<T> {
    let mut work = working_copy(array)?;
    check_rank(k, work.len())?;
    let rank = work.len() - 1 - k;
    Ok(select_in_place(&mut work, rank))
}

/// Returns the median of the valid values
///
/// Odd samples return the middle value, even samples the mean of the two
/// middle values.
///
/// # Arguments
///
/// * `array` - The sample, NaN and infinite values are ignored
///
/// # Returns
///
/// * `Result<T>` - The median, or `EmptyAfterSanitization`
///
/// # Examples
///
/// ```
/// # use ta_rolling::median;
/// assert_eq!(median(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap(), 3.0);
/// assert_eq!(median(&[1.0, 2.0, 3.0, 4.0]).unwrap(), 2.5);
/// ```
pub fn median<T: Float>(array: &[T]) -> Result<T> {
    let mut work = working_copy(array)?;
    Ok(median_in_place(&mut work))
}

/// Returns the `p`-th percentile of the valid values
///
/// Nearest-rank below: the value of rank `floor(p / 100 * (n - 1))`, no
/// interpolation.
///
/// # Arguments
///
/// * `array` - The sample, NaN and infinite values are ignored
/// * `p` - The percentile, within `[0, 100]`
///
/// # Returns
///
/// * `Result<T>` - The value, `InvalidPercentile` or `EmptyAfterSanitization`
pub fn percentile<T: Float>(array: &[T], p: f64) -> Result<T> {
    check_percentile(p)?;
    let mut work = working_copy(array)?;
    let rank = percentile_rank(p, work.len());
    Ok(select_in_place(&mut work, rank))
}

/// Runs an order statistic over every window of a series
///
/// `pick` receives a scratch buffer holding the window's valid values and
/// returns `None` when the window cannot produce a value.
fn rolling_select<T, F>(series: &[T], window_size: usize, mut pick: F) -> Result<Vec<T>>
where
    T: Float,
    F: FnMut(&mut [T]) -> Option<T>,
{
    let mut scratch = Vec::with_capacity(window_size.min(series.len()));
    process_raw(series, window_size, |window, _| {
        sanitize_into(window, &mut scratch);
        pick(&mut scratch).unwrap_or_else(T::nan)
    })
}

/// Returns the rolling median of a series
///
/// # Arguments
///
/// * `series` - The input series
/// * `window_size` - The size of the rolling window
///
/// # Returns
///
/// * `Result<Vec<T>>` - Same length as the input, NaN for warm-up and windows without valid values
pub fn rolling_median<T: Float>(series: &[T], window_size: usize) -> Result<Vec<T>> {
    rolling_select(series, window_size, |values| {
        (!values.is_empty()).then(|| median_in_place(values))
    })
}

/// Returns the rolling `p`-th percentile of a series
///
/// # Arguments
///
/// * `series` - The input series
/// * `window_size` - The size of the rolling window
/// * `p` - The percentile, within `[0, 100]`
///
/// # Returns
///
/// * `Result<Vec<T>>` - Same length as the input, NaN for warm-up and windows without valid values
pub fn rolling_percentile<T: Float>(series: &[T], window_size: usize, p: f64) -> Result<Vec<T>> {
    check_percentile(p)?;
    rolling_select(series, window_size, |values| {
        (!values.is_empty()).then(|| select_in_place(values, percentile_rank(p, values.len())))
    })
}

/// Returns the rolling `k`-th smallest value of a series
///
/// # Arguments
///
/// * `series` - The input series
/// * `window_size` - The size of the rolling window
/// * `k` - The rank, within `[0, window_size - 1]`
///
/// # Returns
///
/// * `Result<Vec<T>>` - Same length as the input, NaN where a window has `k` or fewer valid values
pub fn rolling_kth_smallest<T: Float>(series: &[T], window_size: usize, k: usize) -> Result<Vec<T>> {
    if window_size > 0 {
        check_rank(k, window_size)?;
    }
    rolling_select(series, window_size, |values| {
        (k < values.len()).then(|| select_in_place(values, k))
    })
}
