use core::marker::PhantomData;

use super::Deque;

/// Ordering policy of a monotonic queue
///
/// Decides when a newly pushed value makes an older entry irrelevant: the
/// older entry leaves the window first, so it can never again be the extremum
/// once a value at least as extreme has arrived.
pub trait OrderPolicy<T> {
    /// Short name of the tracked extremum
    const NAME: &'static str;

    /// Returns true if `new` dominates `existing`
    fn dominates(new: &T, existing: &T) -> bool;
}

/// Policy keeping the minimum at the front, strictly increasing back to front
#[derive(Debug, Clone)]
pub struct Min;

/// Policy keeping the maximum at the front, strictly decreasing front to back
#[derive(Debug, Clone)]
pub struct Max;

impl<T: PartialOrd> OrderPolicy<T> for Min {
    const NAME: &'static str = "min";

    #[inline]
    fn dominates(new: &T, existing: &T) -> bool {
        new <= existing
    }
}

impl<T: PartialOrd> OrderPolicy<T> for Max {
    const NAME: &'static str = "max";

    #[inline]
    fn dominates(new: &T, existing: &T) -> bool {
        new >= existing
    }
}

// Pair of (value, position)
type Entry<T> = (T, usize);

/// Sliding-window extremum tracker
///
/// Positions count every sample offered to the queue, including skipped ones,
/// so a window always spans the last `period` positions regardless of how
/// many of them held a usable value.
///
/// # Type Parameters
///
/// * `T` - The type of the elements in the queue
/// * `O` - The order policy for the queue
#[derive(Debug, Clone)]
pub struct MonotonicQueue<T, O> {
    deque: Deque<Entry<T>>,
    period: usize,
    position: usize,
    _order: PhantomData<O>,
}

impl<T, O> MonotonicQueue<T, O>
where
    T: PartialOrd + Copy + Default,
    O: OrderPolicy<T>,
{
    /// Creates a new `MonotonicQueue` for windows of `period` positions
    ///
    /// # Arguments
    ///
    /// * `period` - The window size, must be positive
    ///
    /// # Returns
    ///
    /// * `Self` - The `MonotonicQueue` instance
    #[inline]
    pub fn new(period: usize) -> Self {
        Self {
            deque: Deque::new(period),
            period,
            position: 0,
            _order: PhantomData,
        }
    }

    #[inline]
    pub const fn period(&self) -> usize {
        self.period
    }

    /// Returns true once a full window of positions has been offered
    #[inline]
    pub const fn is_ready(&self) -> bool {
        self.position >= self.period
    }

    /// Evicts front entries that fall outside the window ending at the current position
    #[inline]
    fn evict_expired(&mut self) {
        while let Some(&(_, pos)) = self.deque.front() {
            if pos + self.period <= self.position {
                self.deque.pop_front();
            } else {
                break;
            }
        }
    }

    /// Evicts back entries dominated by `value`
    #[inline]
    fn evict_dominated(&mut self, value: &T) {
        while let Some((existing, _)) = self.deque.back() {
            if O::dominates(value, existing) {
                self.deque.pop_back();
            } else {
                break;
            }
        }
    }

    /// Offers a value at the next position
    ///
    /// # Arguments
    ///
    /// * `value` - The value to push into the queue
    #[inline]
    pub fn push(&mut self, value: T) {
        self.evict_expired();
        self.evict_dominated(&value);
        self.deque.push_back((value, self.position));
        self.position += 1;
    }

    /// Advances one position without offering a value
    ///
    /// Used for samples that must not take part in the extremum.
    #[inline]
    pub fn skip(&mut self) {
        self.evict_expired();
        self.position += 1;
    }

    /// Returns the extremum of the current window
    ///
    /// # Returns
    ///
    /// * `Option<T>` - The extremum, or `None` if the window holds no values
    #[inline]
    pub fn front(&self) -> Option<T> {
        self.deque.front().map(|&(value, _)| value)
    }

    /// Resets the queue to its initial state
    ///
    /// # Returns
    ///
    /// * `&mut Self` - The queue object
    #[inline]
    pub fn reset(&mut self) -> &mut Self {
        self.deque.clear();
        self.position = 0;
        self
    }

    #[cfg(test)]
    fn values(&self) -> alloc::vec::Vec<T> {
        self.deque.iter().map(|&(v, _)| v).collect()
    }
}
