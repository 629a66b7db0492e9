//! Overlapping chunked processing of long series.
//!
//! A series longer than the chunk size is cut into chunks of `chunk_size`
//! samples advancing by `stride = chunk_size - overlap`, so consecutive chunks
//! share `overlap` samples. Every chunk is handed to the processor on its own.
//! When merging, the first chunk contributes all of its outputs and every later
//! chunk drops its first `overlap` outputs, which only served as warm-up.
//!
//! The merged output equals the unchunked output of a windowed operator of
//! size `W` as long as `W - 1 <= overlap`. This is not checked.

use alloc::vec::Vec;

use crate::{Error, Result, validation::ensure_same_length};

/// Chunking parameters
///
/// # Examples
///
/// ```
/// # use ta_rolling::{ChunkConfig, rolling_max};
/// let config = ChunkConfig::default().chunk_size(4).overlap(2);
/// let series = [5.0, 3.0, 8.0, 2.0, 9.0, 1.0, 4.0, 7.0, 6.0];
/// let chunked = config.process(&series, |chunk| rolling_max(chunk, 3)).unwrap();
/// let direct = rolling_max(&series, 3).unwrap();
/// assert_eq!(&chunked[2..], &direct[2..]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkConfig {
    /// Number of samples per chunk
    pub chunk_size: usize,
    /// Number of samples shared by consecutive chunks
    pub overlap: usize,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            chunk_size: 10_000,
            overlap: 512,
        }
    }
}

impl ChunkConfig {
    /// Creates a new configuration
    pub const fn new(chunk_size: usize, overlap: usize) -> Self {
        Self {
            chunk_size,
            overlap,
        }
    }

    /// Sets the number of samples per chunk
    pub const fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Sets the number of samples shared by consecutive chunks
    pub const fn overlap(mut self, overlap: usize) -> Self {
        self.overlap = overlap;
        self
    }

    /// Checks that the configuration describes a valid chunk plan
    ///
    /// # Returns
    ///
    /// * `Result<()>` - `InvalidChunkSize` for a zero chunk size,
    ///   `InvalidOverlap` if the overlap is not smaller than the chunk size
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            log::debug!("rejecting chunk size of zero");
            return Err(Error::InvalidChunkSize(self.chunk_size));
        }
        if self.overlap >= self.chunk_size {
            log::debug!(
                "rejecting overlap {} for chunk size {}",
                self.overlap,
                self.chunk_size
            );
            return Err(Error::InvalidOverlap {
                overlap: self.overlap,
                chunk_size: self.chunk_size,
            });
        }
        Ok(())
    }

    /// Distance between the starts of consecutive chunks
    pub const fn stride(&self) -> usize {
        self.chunk_size.saturating_sub(self.overlap)
    }

    /// Splits a series into chunks, see [`create_chunks`]
    pub fn chunks<'a, T>(&self, series: &'a [T]) -> Result<Chunks<'a, T>> {
        self.validate()?;
        let chunks = Chunks {
            series,
            chunk_size: self.chunk_size,
            stride: self.stride(),
            next_start: Some(0),
            index: 0,
        };
        log::debug!(
            "splitting {} samples into {} chunks of {} (overlap {})",
            series.len(),
            chunks.len(),
            self.chunk_size,
            self.overlap
        );
        Ok(chunks)
    }

    /// Runs a processor chunk by chunk, see [`process_chunks_with_overlap`]
    pub fn process<T, F>(&self, series: &[T], mut processor: F) -> Result<Vec<T>>
    where
        T: Copy,
        F: FnMut(&[T]) -> Result<Vec<T>>,
    {
        let mut out = Vec::with_capacity(series.len());
        for chunk in self.chunks(series)? {
            log::trace!(
                "processing chunk {} covering [{}, {})",
                chunk.index,
                chunk.start,
                chunk.end()
            );
            let local = processor(chunk.data)?;
            self.merge(&chunk, &local, &mut out)?;
        }
        Ok(out)
    }

    /// Runs a processor on every chunk in parallel and merges the results
    ///
    /// The processor must not carry state from one chunk to the next.
    #[cfg(feature = "rayon")]
    pub fn process_parallel<T, F>(&self, series: &[T], processor: F) -> Result<Vec<T>>
    where
        T: Copy + Send + Sync,
        F: Fn(&[T]) -> Result<Vec<T>> + Send + Sync,
    {
        use rayon::prelude::*;

        let chunks: Vec<_> = self.chunks(series)?.collect();
        let results = chunks
            .par_iter()
            .map(|chunk| {
                log::trace!("processing chunk {} in parallel", chunk.index);
                processor(chunk.data)
            })
            .collect::<Result<Vec<_>>>()?;

        let mut out = Vec::with_capacity(series.len());
        for (chunk, local) in chunks.iter().zip(&results) {
            self.merge(chunk, local, &mut out)?;
        }
        Ok(out)
    }

    fn merge<T: Copy>(&self, chunk: &Chunk<'_, T>, local: &[T], out: &mut Vec<T>) -> Result<()> {
        ensure_same_length(chunk.data, local)?;
        // a later chunk is never shorter than the overlap
        let skip = if chunk.index == 0 { 0 } else { self.overlap };
        out.extend_from_slice(&local[skip..]);
        Ok(())
    }
}

/// A contiguous piece of a series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Chunk<'a, T> {
    /// Position of the chunk in the plan
    pub index: usize,
    /// Index of the first sample in the full series
    pub start: usize,
    /// The samples covered by the chunk
    pub data: &'a [T],
}

impl<T> Chunk<'_, T> {
    /// Index one past the last sample in the full series
    pub const fn end(&self) -> usize {
        self.start + self.data.len()
    }

    /// Number of samples in the chunk
    pub const fn len(&self) -> usize {
        self.data.len()
    }
}

/// Lazy iterator over the chunks of a series
#[derive(Debug, Clone)]
pub struct Chunks<'a, T> {
    series: &'a [T],
    chunk_size: usize,
    stride: usize,
    next_start: Option<usize>,
    index: usize,
}

impl<'a, T> Iterator for Chunks<'a, T> {
    type Item = Chunk<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.next_start?;
        let n = self.series.len();
        let end = (start + self.chunk_size).min(n);
        self.next_start = (end < n).then_some(start + self.stride);

        let chunk = Chunk {
            index: self.index,
            start,
            data: &self.series[start..end],
        };
        self.index += 1;
        Some(chunk)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = match self.next_start {
            None => 0,
            Some(start) => {
                let rest = self.series.len() - start;
                if rest <= self.chunk_size {
                    1
                } else {
                    1 + (rest - self.chunk_size).div_ceil(self.stride)
                }
            }
        };
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for Chunks<'_, T> {}

/// Splits a series into overlapping chunks
///
/// A series no longer than `chunk_size` is a single chunk. Otherwise chunks
/// start every `chunk_size - overlap` samples until the end of the series is
/// covered, and the final chunk may be shorter.
///
/// # Arguments
///
/// * `series` - The input series
/// * `chunk_size` - Number of samples per chunk, must be positive
/// * `overlap` - Number of samples shared by consecutive chunks, must be smaller than `chunk_size`
///
/// # Returns
///
/// * `Result<Chunks<'_, T>>` - The chunk iterator, or an error for an invalid plan
///
/// # Examples
///
/// ```
/// # use ta_rolling::create_chunks;
/// let series: Vec<f64> = (0..10).map(f64::from).collect();
/// let bounds: Vec<_> = create_chunks(&series, 4, 1)
///     .unwrap()
///     .map(|c| (c.start, c.end()))
///     .collect();
/// assert_eq!(bounds, [(0, 4), (3, 7), (6, 10)]);
/// ```
pub fn create_chunks<T>(series: &[T], chunk_size: usize, overlap: usize) -> Result<Chunks<'_, T>> {
    ChunkConfig::new(chunk_size, overlap).chunks(series)
}

/// Runs a processor over overlapping chunks and merges the outputs
///
/// Output index `c * stride + j` comes from local index `j` of chunk `c`. The
/// first chunk contributes every output, later chunks skip their first
/// `overlap` outputs.
///
/// # Arguments
///
/// * `series` - The input series
/// * `processor` - Maps a chunk to an output of the same length
/// * `chunk_size` - Number of samples per chunk, must be positive
/// * `overlap` - Number of samples shared by consecutive chunks, must be smaller than `chunk_size`
///
/// # Returns
///
/// * `Result<Vec<T>>` - Same length as the input, or the first error raised
///   by the configuration or the processor. `MismatchedLengths` if the
///   processor changes the length of a chunk.
pub fn process_chunks_with_overlap<T, F>(
    series: &[T],
    processor: F,
    chunk_size: usize,
    overlap: usize,
) -> Result<Vec<T>>
where
    T: Copy,
    F: FnMut(&[T]) -> Result<Vec<T>>,
{
    ChunkConfig::new(chunk_size, overlap).process(series, processor)
}

/// Parallel version of [`process_chunks_with_overlap`] for stateless processors
///
/// # Arguments
///
/// * `series` - The input series
/// * `processor` - Maps a chunk to an output of the same length
/// * `chunk_size` - Number of samples per chunk, must be positive
/// * `overlap` - Number of samples shared by consecutive chunks, must be smaller than `chunk_size`
///
/// # Returns
///
/// * `Result<Vec<T>>` - Same output as the sequential version
#[cfg(feature = "rayon")]
pub fn process_chunks_parallel<T, F>(
    series: &[T],
    processor: F,
    chunk_size: usize,
    overlap: usize,
) -> Result<Vec<T>>
where
    T: Copy + Send + Sync,
    F: Fn(&[T]) -> Result<Vec<T>> + Send + Sync,
{
    ChunkConfig::new(chunk_size, overlap).process_parallel(series, processor)
}
