use alloc::vec::Vec;

use num_traits::Float;

use crate::{
    Result,
    helper::mean,
    utils::RingBuffer,
    validation::{is_valid, validate, validate_length},
};

/// # Exponential Moving Average
///
/// Streaming EMA with smoothing factor `α = 2 / (length + 1)`.
///
/// The recursion is seeded with the mean of the valid samples of the first
/// full window, at index `length - 1`. After that every valid sample updates
/// the state as `α·value + (1 - α)·previous`.
///
/// Missing data never resets the recursion:
///
/// - an invalid sample yields `None` and leaves the state untouched, so the
///   next valid sample resumes from the last valid EMA
/// - a state that is not finite (overflow) is dropped, and the next valid
///   sample re-seeds from the mean of the valid samples in its trailing window
#[derive(Debug, Clone)]
pub struct Ema<T> {
    alpha: T,
    window: RingBuffer<T>,
    scratch: Vec<T>,
    state: Option<T>,
}

impl<T: Float + Default> Ema<T> {
    /// Creates a new EMA for the specified length
    ///
    /// # Arguments
    ///
    /// * `length` - The smoothing length, must be positive
    ///
    /// # Returns
    ///
    /// * `Result<Self>` - The smoother, or `InvalidLength` if the length is zero
    pub fn new(length: usize) -> Result<Self> {
        validate_length("length", length)?;
        let n = T::from(length + 1).unwrap_or_else(T::infinity);
        Ok(Self {
            alpha: (T::one() + T::one()) / n,
            window: RingBuffer::new(length),
            scratch: Vec::with_capacity(length),
            state: None,
        })
    }

    /// Returns the smoothing length
    pub fn length(&self) -> usize {
        self.window.capacity()
    }

    /// Returns the smoothing factor
    pub const fn alpha(&self) -> T {
        self.alpha
    }

    /// Feeds the next sample
    ///
    /// # Arguments
    ///
    /// * `value` - The new sample
    ///
    /// # Returns
    ///
    /// * `Option<T>` - The EMA at this sample, `None` before the seed or for an invalid sample
    ///
    /// # Examples
    ///
    /// ```
    /// # use ta_rolling::Ema;
    /// let mut ema = Ema::new(3).unwrap();
    /// let out: Vec<_> = [1.0, 2.0, 3.0, 4.0, 5.0].iter().map(|&v| ema.next(v)).collect();
    /// assert_eq!(out, [None, None, Some(2.0), Some(3.0), Some(4.0)]);
    /// ```
    pub fn next(&mut self, value: T) -> Option<T> {
        self.window.push(value);
        if !is_valid(value) {
            return None;
        }

        let next = match self.state {
            Some(prev) => value * self.alpha + prev * (T::one() - self.alpha),
            None if self.window.is_full() => self.seed(),
            None => return None,
        };
        self.state = Some(next).filter(|v| is_valid(*v));
        self.state
    }

    /// Returns the last valid EMA
    pub const fn get(&self) -> Option<T> {
        self.state
    }

    /// Returns true once the recursion has been seeded
    pub const fn is_ready(&self) -> bool {
        self.state.is_some()
    }

    /// Resets the smoother to its initial state
    pub fn reset(&mut self) {
        self.window.reset();
        self.state = None;
    }

    fn seed(&mut self) -> T {
        self.scratch.clear();
        self.scratch
            .extend(self.window.iter().copied().filter(|v| is_valid(*v)));
        let seed = mean(&self.scratch);
        log::debug!(
            "seeding EMA({}) from {} valid samples",
            self.length(),
            self.scratch.len()
        );
        seed
    }
}

/// Exponential moving average of a series
///
/// # Arguments
///
/// * `series` - The input series
/// * `length` - The smoothing length, must be positive
///
/// # Returns
///
/// * `Result<Vec<T>>` - Same length as the input. NaN before the seed at
///   `length - 1`, wherever the input is invalid, and everywhere if the
///   series is shorter than `length`
///
/// # Examples
///
/// ```
/// # use ta_rolling::ema;
/// let out = ema(&[1.0_f64, 2.0, 3.0, 4.0, 5.0], 3).unwrap();
/// assert!(out[0].is_nan() && out[1].is_nan());
/// assert_eq!(&out[2..], &[2.0, 3.0, 4.0]);
/// ```
pub fn ema<T: Float + Default>(series: &[T], length: usize) -> Result<Vec<T>> {
    validate(series, length)?;
    if length > series.len() {
        return Ok(vec![T::nan(); series.len()]);
    }
    let mut smoother = Ema::new(length)?;
    Ok(series
        .iter()
        .map(|&v| smoother.next(v).unwrap_or_else(T::nan))
        .collect())
}
