use alloc::vec::Vec;

use num_traits::Float;

use crate::{
    ChunkConfig, MovingAverage, Result, RollingExtremum,
    extrema::rolling_extremum,
    order_statistics::{check_percentile, rolling_percentile},
    utils::OrderPolicy,
    validation::validate_length,
};

/// A series-to-series computation with a fixed configuration
///
/// Every implementation returns one output per input sample, NaN where no
/// value is available.
pub trait Indicator<T> {
    /// Short name of the computation
    fn name(&self) -> &'static str;

    /// Number of leading outputs that are always NaN
    fn lookback(&self) -> usize;

    /// Returns true if an output depends on every earlier sample, not only
    /// on the last `lookback + 1` samples
    ///
    /// Such computations cannot be split into independent chunks.
    fn is_recursive(&self) -> bool {
        false
    }

    /// Computes the output series
    ///
    /// # Arguments
    ///
    /// * `series` - The input series
    ///
    /// # Returns
    ///
    /// * `Result<Vec<T>>` - Same length as the input
    fn calculate(&self, series: &[T]) -> Result<Vec<T>>;
}

impl<T: Float + Default> Indicator<T> for MovingAverage {
    fn name(&self) -> &'static str {
        self.kind().name()
    }

    fn lookback(&self) -> usize {
        self.length() - 1
    }

    fn is_recursive(&self) -> bool {
        self.kind().is_recursive()
    }

    fn calculate(&self, series: &[T]) -> Result<Vec<T>> {
        self.compute(series)
    }
}

impl<T, O> Indicator<T> for RollingExtremum<T, O>
where
    T: Float + Default,
    O: OrderPolicy<T>,
{
    fn name(&self) -> &'static str {
        O::NAME
    }

    fn lookback(&self) -> usize {
        self.period() - 1
    }

    /// Runs a fresh tracker over the series, the state of `self` is untouched
    fn calculate(&self, series: &[T]) -> Result<Vec<T>> {
        rolling_extremum::<T, O>(series, self.period())
    }
}

/// Rolling percentile over a fixed window
///
/// # Examples
///
/// ```
/// # use ta_rolling::{Indicator, RollingQuantile};
/// let median = RollingQuantile::median(3).unwrap();
/// let out = median.calculate(&[5.0, 1.0, 4.0, 2.0, 3.0]).unwrap();
/// assert_eq!(&out[2..], &[4.0, 2.0, 3.0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RollingQuantile {
    window_size: usize,
    percentile: f64,
}

impl RollingQuantile {
    /// Creates a rolling percentile
    ///
    /// # Arguments
    ///
    /// * `window_size` - The size of the rolling window, must be positive
    /// * `percentile` - The percentile, within `[0, 100]`
    ///
    /// # Returns
    ///
    /// * `Result<Self>` - `InvalidLength` or `InvalidPercentile` on bad parameters
    pub fn new(window_size: usize, percentile: f64) -> Result<Self> {
        validate_length("window size", window_size)?;
        check_percentile(percentile)?;
        Ok(Self {
            window_size,
            percentile,
        })
    }

    /// Creates a rolling median, the lower of the two middle values for an even count
    pub fn median(window_size: usize) -> Result<Self> {
        Self::new(window_size, 50.0)
    }

    /// The size of the rolling window
    pub const fn window_size(&self) -> usize {
        self.window_size
    }

    /// The percentile, within `[0, 100]`
    pub const fn percentile(&self) -> f64 {
        self.percentile
    }
}

impl<T: Float> Indicator<T> for RollingQuantile {
    fn name(&self) -> &'static str {
        "quantile"
    }

    fn lookback(&self) -> usize {
        self.window_size - 1
    }

    fn calculate(&self, series: &[T]) -> Result<Vec<T>> {
        rolling_percentile(series, self.window_size, self.percentile)
    }
}

/// Runs an indicator chunk by chunk over long series
///
/// The overlap is raised to the indicator's lookback so that the chunked output
/// equals the direct one. Recursive indicators and series that fit in one
/// chunk are computed in a single pass.
///
/// # Examples
///
/// ```
/// # use ta_rolling::{ChunkConfig, Chunked, Indicator, Maximum};
/// let max = Maximum::<f64>::new(3).unwrap();
/// let chunked = Chunked::new(max.clone(), ChunkConfig::new(4, 0)).unwrap();
/// let series = [5.0, 3.0, 8.0, 2.0, 9.0, 1.0, 4.0, 7.0, 6.0];
/// let out = chunked.calculate(&series).unwrap();
/// assert_eq!(&out[2..], &max.calculate(&series).unwrap()[2..]);
/// ```
#[derive(Debug, Clone)]
pub struct Chunked<I> {
    inner: I,
    config: ChunkConfig,
}

impl<I> Chunked<I> {
    /// Wraps an indicator
    ///
    /// # Arguments
    ///
    /// * `inner` - The indicator to run per chunk
    /// * `config` - The requested chunk plan
    ///
    /// # Returns
    ///
    /// * `Result<Self>` - `InvalidChunkSize` or `InvalidOverlap` for an invalid plan
    pub fn new(inner: I, config: ChunkConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { inner, config })
    }

    /// The wrapped indicator
    pub const fn inner(&self) -> &I {
        &self.inner
    }

    /// The requested chunk plan
    pub const fn config(&self) -> ChunkConfig {
        self.config
    }

    /// The chunk plan actually used, with the overlap covering the lookback
    ///
    /// # Returns
    ///
    /// * `Result<ChunkConfig>` - `InvalidOverlap` if the lookback does not fit in a chunk
    pub fn effective_config<T>(&self) -> Result<ChunkConfig>
    where
        I: Indicator<T>,
    {
        let config = self
            .config
            .overlap(self.config.overlap.max(self.inner.lookback()));
        config.validate()?;
        Ok(config)
    }

    /// Computes the output with chunks processed in parallel
    #[cfg(feature = "rayon")]
    pub fn calculate_parallel<T>(&self, series: &[T]) -> Result<Vec<T>>
    where
        T: Copy + Send + Sync,
        I: Indicator<T> + Sync,
    {
        if self.inner.is_recursive() {
            return self.inner.calculate(series);
        }
        if series.len() <= self.config.chunk_size {
            return self.inner.calculate(series);
        }
        self.effective_config::<T>()?
            .process_parallel(series, |chunk| self.inner.calculate(chunk))
    }
}

impl<T: Copy, I: Indicator<T>> Indicator<T> for Chunked<I> {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn lookback(&self) -> usize {
        self.inner.lookback()
    }

    fn is_recursive(&self) -> bool {
        self.inner.is_recursive()
    }

    fn calculate(&self, series: &[T]) -> Result<Vec<T>> {
        if self.inner.is_recursive() {
            log::debug!("running recursive {} in a single pass", self.inner.name());
            return self.inner.calculate(series);
        }
        if series.len() <= self.config.chunk_size {
            return self.inner.calculate(series);
        }
        self.effective_config::<T>()?
            .process(series, |chunk| self.inner.calculate(chunk))
    }
}
