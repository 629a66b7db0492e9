#![doc = include_str!("../README.md")]
#![no_std]
#![deny(
    unsafe_code,
    unused_imports,
    unused_variables,
    unused_must_use,
    missing_docs,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::dbg_macro,
    clippy::todo,
    clippy::unimplemented
)]
#![allow(clippy::len_without_is_empty)]

#[macro_use]
extern crate alloc;

pub(crate) type Kbn<T> = compensated_summation::KahanBabuskaNeumaier<T>;

mod utils;
pub(crate) use utils::helper;
pub use utils::{Max, Min, OrderPolicy};

mod error;
pub use error::{Error, Result};

mod validation;
pub use validation::{
    count_valid, ensure_same_length, is_valid, sanitize, sanitize_into, to_options, validate,
    validate_length, validate_named,
};

mod processor;
pub use processor::{process, process_raw, windows};

mod extrema;
pub use extrema::{Maximum, Minimum, RollingExtremum, rolling_max, rolling_min, rolling_range};

mod order_statistics;
pub use order_statistics::{
    kth_largest, kth_smallest, median, percentile, rolling_kth_smallest, rolling_median,
    rolling_percentile,
};

mod rolling;
pub use rolling::RollingMedian;

mod chunking;
#[cfg(feature = "rayon")]
pub use chunking::process_chunks_parallel;
pub use chunking::{Chunk, ChunkConfig, Chunks, create_chunks, process_chunks_with_overlap};

mod moving_average;
pub use moving_average::{
    Ema, MovingAverage, MovingAverageKind, ema, hull, moving_average, sma, wma,
};

mod indicator;
pub use indicator::{Chunked, Indicator, RollingQuantile};
