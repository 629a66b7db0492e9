use num_traits::Float;

use crate::Kbn;

/// Returns the arithmetic mean of a slice of valid values
///
/// Summation is compensated so long windows of large prices keep their
/// precision.
///
/// # Arguments
///
/// * `values` - The values to average, all finite
///
/// # Returns
///
/// * `T` - The mean, or NaN if the slice is empty
#[inline]
pub fn mean<T: Float + Default>(values: &[T]) -> T {
    let Some(n) = T::from(values.len()).filter(|n| !n.is_zero()) else {
        return T::nan();
    };
    let mut sum = Kbn::<T>::default();
    for &v in values {
        sum += v;
    }
    sum.total() / n
}

/// Returns the linearly weighted mean of a slice of valid values
///
/// The oldest value weighs 1, the newest weighs `values.len()`.
///
/// # Arguments
///
/// * `values` - The values to average, oldest first, all finite
///
/// # Returns
///
/// * `T` - The weighted mean, or NaN if the slice is empty
#[inline]
pub fn linear_weighted_mean<T: Float + Default>(values: &[T]) -> T {
    let mut weighted = Kbn::<T>::default();
    let mut weight = T::zero();
    let mut norm = T::zero();
    for &v in values {
        weight = weight + T::one();
        norm = norm + weight;
        weighted += v * weight;
    }
    if norm.is_zero() {
        T::nan()
    } else {
        weighted.total() / norm
    }
}
