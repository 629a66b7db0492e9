use ahash::RandomState;
use hashbrown::HashMap;
use num_traits::Float;
use ordered_float::{OrderedFloat, PrimitiveFloat};

use alloc::collections::BinaryHeap;
use core::cmp::Reverse;

use crate::{Result, utils::RingBuffer, validation::validate_length};

/// Streaming median over the last `period` samples
///
/// Two heaps split the valid samples of the window: a max-heap holding the
/// lower half and a min-heap holding the upper half, with the lower half never
/// smaller than the upper half and at most one larger. Samples leaving the
/// window are deleted lazily: they are counted in a pending map and discarded
/// only once they surface at the top of a heap. Each update costs O(log n)
/// amortized, reading the median is O(1).
///
/// NaN and infinite samples occupy a slot of the window but are left out of
/// both heaps, so the median is taken over the valid samples only.
#[derive(Debug, Clone)]
pub struct RollingMedian<T> {
    /// Window contents in arrival order, to know which sample leaves
    window: RingBuffer<T>,
    /// Max heap for the lower half of the valid samples
    lower: BinaryHeap<OrderedFloat<T>>,
    /// Min heap for the upper half of the valid samples
    upper: BinaryHeap<Reverse<OrderedFloat<T>>>,
    /// Values that left the window but are still stored in a heap
    pending: HashMap<OrderedFloat<T>, usize, RandomState>,
    /// Live samples in the lower heap
    lower_len: usize,
    /// Live samples in the upper heap
    upper_len: usize,
}

impl<T> RollingMedian<T>
where
    T: Float + PrimitiveFloat + Default,
{
    /// Creates a new `RollingMedian` for the specified window size
    ///
    /// # Arguments
    ///
    /// * `period` - The size of the sliding window
    ///
    /// # Returns
    ///
    /// * `Result<Self>` - The tracker, or `InvalidLength` if the period is zero
    pub fn new(period: usize) -> Result<Self> {
        validate_length("period", period)?;
        Ok(Self {
            window: RingBuffer::new(period),
            lower: BinaryHeap::with_capacity(period),
            upper: BinaryHeap::with_capacity(period),
            pending: HashMap::with_capacity_and_hasher(period, RandomState::default()),
            lower_len: 0,
            upper_len: 0,
        })
    }

    /// Returns the period of the window
    pub fn period(&self) -> usize {
        self.window.capacity()
    }

    /// Returns true once a full window has been seen
    pub fn is_ready(&self) -> bool {
        self.window.is_full()
    }

    /// Pushes a new sample into the window
    ///
    /// # Arguments
    ///
    /// * `value` - The new sample
    ///
    /// # Returns
    ///
    /// * `Option<T>` - The median once a full window has been seen and it holds a valid sample
    ///
    /// # Examples
    ///
    /// ```
    /// # use ta_rolling::RollingMedian;
    /// let mut median = RollingMedian::new(3).unwrap();
    /// let out: Vec<_> = [1.0, 3.0, 2.0, 8.0, 4.0].iter().map(|&v| median.next(v)).collect();
    /// assert_eq!(out, [None, None, Some(2.0), Some(3.0), Some(4.0)]);
    /// ```
    pub fn next(&mut self, value: T) -> Option<T> {
        let evicted = self.window.push(value);
        if let Some(evicted) = evicted.filter(|v| Float::is_finite(*v)) {
            self.remove(OrderedFloat(evicted));
        }
        if Float::is_finite(value) {
            self.insert(OrderedFloat(value));
        }
        self.get()
    }

    /// Returns the median of the valid samples in the window
    ///
    /// # Returns
    ///
    /// * `Option<T>` - `None` until the window is full or if it holds no valid sample
    pub fn get(&self) -> Option<T> {
        if !self.is_ready() {
            return None;
        }
        let lower = self.lower.peek()?.0;
        if self.lower_len > self.upper_len {
            return Some(lower);
        }
        let upper = self.upper.peek()?.0.0;
        Some((lower + upper) / (T::one() + T::one()))
    }

    /// Resets the tracker to its initial state
    pub fn reset(&mut self) {
        self.window.reset();
        self.lower.clear();
        self.upper.clear();
        self.pending.clear();
        self.lower_len = 0;
        self.upper_len = 0;
    }

    fn insert(&mut self, value: OrderedFloat<T>) {
        match self.lower.peek() {
            Some(&top) if value > top => {
                self.upper.push(Reverse(value));
                self.upper_len += 1;
            }
            _ => {
                self.lower.push(value);
                self.lower_len += 1;
            }
        }
        self.rebalance();
    }

    fn remove(&mut self, value: OrderedFloat<T>) {
        *self.pending.entry(value).or_insert(0) += 1;

        let in_lower = self.lower.peek().is_some_and(|&top| value <= top);
        if in_lower {
            self.lower_len -= 1;
            if self.lower.peek() == Some(&value) {
                self.prune_lower();
            }
        } else {
            self.upper_len -= 1;
            if self.upper.peek().map(|r| r.0) == Some(value) {
                self.prune_upper();
            }
        }
        self.rebalance();
    }

    /// Restores `upper_len <= lower_len <= upper_len + 1`
    fn rebalance(&mut self) {
        if self.lower_len > self.upper_len + 1 {
            if let Some(top) = self.lower.pop() {
                self.upper.push(Reverse(top));
                self.lower_len -= 1;
                self.upper_len += 1;
                self.prune_lower();
            }
        } else if self.lower_len < self.upper_len {
            if let Some(Reverse(top)) = self.upper.pop() {
                self.lower.push(top);
                self.upper_len -= 1;
                self.lower_len += 1;
                self.prune_upper();
            }
        }
    }

    /// Takes one pending deletion for `value`, returning true if there was one
    fn take_pending(&mut self, value: OrderedFloat<T>) -> bool {
        match self.pending.get_mut(&value) {
            Some(count) => {
                *count -= 1;
                if *count == 0 {
                    self.pending.remove(&value);
                }
                true
            }
            None => false,
        }
    }

    fn prune_lower(&mut self) {
        while let Some(&top) = self.lower.peek() {
            if !self.take_pending(top) {
                break;
            }
            self.lower.pop();
        }
    }

    fn prune_upper(&mut self) {
        while let Some(&Reverse(top)) = self.upper.peek() {
            if !self.take_pending(top) {
                break;
            }
            self.upper.pop();
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::all)]
mod tests {
    use super::*;
    use crate::rolling_median;
    use alloc::vec::Vec;

    fn stream(values: &[f64], period: usize) -> Vec<f64> {
        let mut median = RollingMedian::new(period).unwrap();
        values
            .iter()
            .map(|&v| median.next(v).unwrap_or(f64::NAN))
            .collect()
    }

    fn same(a: &[f64], b: &[f64]) -> bool {
        a.len() == b.len()
            && a.iter()
                .zip(b)
                .all(|(x, y)| (x.is_nan() && y.is_nan()) || x == y)
    }

    #[test]
    fn test_odd_window() {
        let out = stream(&[5.0, 1.0, 4.0, 2.0, 3.0, 9.0], 3);
        assert!(same(&out, &[f64::NAN, f64::NAN, 4.0, 2.0, 3.0, 3.0]));
    }

    #[test]
    fn test_even_window() {
        let out = stream(&[1.0, 2.0, 3.0, 4.0, 10.0], 4);
        assert!(same(&out, &[f64::NAN, f64::NAN, f64::NAN, 2.5, 3.5]));
    }

    #[test]
    fn test_matches_windowed_quickselect_with_duplicates() {
        let values = [
            3.0, 3.0, 1.0, 3.0, 7.0, 7.0, 2.0, 2.0, 2.0, 9.0, 3.0, 0.0, 3.0, 5.0, 5.0, 1.0,
        ];
        for period in 1..=8 {
            assert!(same(
                &stream(&values, period),
                &rolling_median(&values, period).unwrap()
            ));
        }
    }

    #[test]
    fn test_invalid_samples_are_skipped() {
        let values = [1.0, f64::NAN, 3.0, f64::INFINITY, f64::NAN, f64::NAN, 6.0];
        let out = stream(&values, 3);
        assert!(same(&out, &rolling_median(&values, 3).unwrap()));
        assert!(out[5].is_nan());
        assert_eq!(out[6], 6.0);
    }

    #[test]
    fn test_reset() {
        let mut median = RollingMedian::new(2).unwrap();
        median.next(1.0);
        median.next(5.0);
        assert_eq!(median.get(), Some(3.0));
        median.reset();
        assert!(!median.is_ready());
        assert_eq!(median.next(7.0), None);
        assert_eq!(median.next(9.0), Some(8.0));
        assert_eq!(median.period(), 2);
        assert!(RollingMedian::<f64>::new(0).is_err());
    }
}
