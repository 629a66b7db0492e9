//! Property-based tests using proptest.
//!
//! Every fast path is checked against a brute-force reference on random
//! series, including series with gaps (NaN) and duplicated values.

use proptest::prelude::*;

use ta_rolling::{
    Chunked, ChunkConfig, Indicator, Maximum, RollingMedian, ema, kth_largest, kth_smallest, median,
    percentile, process_chunks_with_overlap, rolling_max, rolling_median, rolling_min, sma, wma,
};

// ==================== Test Data Generators ====================

/// Random prices, all valid
fn arb_price_series(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(1.0..1000.0_f64, min_len..=max_len)
}

/// Small integer prices, so duplicates and clustered extrema are frequent
fn arb_clustered_series(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec((0..8_i32).prop_map(f64::from), min_len..=max_len)
}

/// Prices with roughly one sample in six missing
fn arb_gappy_series(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(
        prop_oneof![5 => (0..20_i32).prop_map(f64::from), 1 => Just(f64::NAN)],
        min_len..=max_len,
    )
}

// ==================== Reference Implementations ====================

fn sorted_valid(values: &[f64]) -> Vec<f64> {
    let mut v: Vec<f64> = values.iter().copied().filter(|x| x.is_finite()).collect();
    v.sort_by(f64::total_cmp);
    v
}

fn brute_force_window<F>(series: &[f64], window: usize, reduce: F) -> Vec<f64>
where
    F: Fn(&[f64]) -> f64,
{
    (0..series.len())
        .map(|i| {
            if i + 1 < window {
                f64::NAN
            } else {
                let valid = sorted_valid(&series[i + 1 - window..=i]);
                if valid.is_empty() { f64::NAN } else { reduce(&valid) }
            }
        })
        .collect()
}

fn same(a: &[f64], b: &[f64]) -> bool {
    a.len() == b.len()
        && a.iter()
            .zip(b)
            .all(|(x, y)| (x.is_nan() && y.is_nan()) || (x - y).abs() <= 1e-9 * y.abs().max(1.0))
}

// ==================== Rolling Extrema ====================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Rolling max equals the brute-force maximum of every window
    #[test]
    fn prop_rolling_max_matches_brute_force(data in arb_clustered_series(1, 80), window in 1usize..=12) {
        let expected = brute_force_window(&data, window, |v| v[v.len() - 1]);
        prop_assert!(same(&rolling_max(&data, window).unwrap(), &expected));
    }

    /// Rolling min equals the brute-force minimum of every window
    #[test]
    fn prop_rolling_min_matches_brute_force(data in arb_gappy_series(1, 80), window in 1usize..=12) {
        let expected = brute_force_window(&data, window, |v| v[0]);
        prop_assert!(same(&rolling_min(&data, window).unwrap(), &expected));
    }
}

// ==================== Order Statistics ====================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// kth_smallest agrees with sorting for every rank
    #[test]
    fn prop_kth_smallest_matches_sort(data in arb_clustered_series(1, 60)) {
        let sorted = sorted_valid(&data);
        for k in 0..sorted.len() {
            prop_assert_eq!(kth_smallest(&data, k).unwrap(), sorted[k]);
            prop_assert_eq!(kth_largest(&data, k).unwrap(), sorted[sorted.len() - 1 - k]);
        }
    }

    /// The caller's array is never reordered
    #[test]
    fn prop_selection_leaves_input_untouched(data in arb_price_series(1, 60)) {
        let before = data.clone();
        let _ = median(&data).unwrap();
        let _ = percentile(&data, 90.0).unwrap();
        prop_assert_eq!(data, before);
    }

    /// median follows the textbook definition for odd and even counts
    #[test]
    fn prop_median_definition(data in arb_gappy_series(1, 60)) {
        let sorted = sorted_valid(&data);
        prop_assume!(!sorted.is_empty());
        let n = sorted.len();
        let expected = if n % 2 == 1 {
            sorted[n / 2]
        } else {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        };
        prop_assert_eq!(median(&data).unwrap(), expected);
    }

    /// The streaming two-heap median agrees with windowed quickselect
    #[test]
    fn prop_streaming_median_matches_batch(data in arb_gappy_series(1, 80), window in 1usize..=9) {
        let mut tracker = RollingMedian::new(window).unwrap();
        let streamed: Vec<f64> = data
            .iter()
            .map(|&v| tracker.next(v).unwrap_or(f64::NAN))
            .collect();
        prop_assert!(same(&streamed, &rolling_median(&data, window).unwrap()));
    }
}

// ==================== Moving Averages ====================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// SMA with length 1 is the identity on valid samples
    #[test]
    fn prop_sma_length_one_is_identity(data in arb_price_series(1, 100)) {
        prop_assert_eq!(sma(&data, 1).unwrap(), data);
    }

    /// The EMA seed is the SMA of the first window
    #[test]
    fn prop_ema_seed_is_sma(data in arb_price_series(1, 100), length in 1usize..=20) {
        prop_assume!(data.len() >= length);
        let ema_out = ema(&data, length).unwrap();
        let sma_out = sma(&data, length).unwrap();
        prop_assert!(ema_out[..length - 1].iter().all(|v| v.is_nan()));
        prop_assert!(same(&ema_out[length - 1..length], &sma_out[length - 1..length]));
    }

    /// A weighted average stays within the range of its window
    #[test]
    fn prop_wma_is_bounded(data in arb_price_series(1, 100), length in 1usize..=10) {
        let out = wma(&data, length).unwrap();
        let lo = rolling_min(&data, length).unwrap();
        let hi = rolling_max(&data, length).unwrap();
        for i in length - 1..data.len() {
            prop_assert!(out[i] >= lo[i] - 1e-9 && out[i] <= hi[i] + 1e-9);
        }
    }
}

// ==================== Chunking ====================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// Chunked output equals unchunked output when the overlap covers the window
    #[test]
    fn prop_chunked_equals_unchunked(
        data in arb_gappy_series(1, 300),
        window in 1usize..=8,
        chunk_size in 9usize..=64,
        extra in 0usize..=4,
    ) {
        let overlap = (window - 1 + extra).min(chunk_size - 1);
        let direct = rolling_max(&data, window).unwrap();
        let chunked =
            process_chunks_with_overlap(&data, |c| rolling_max(c, window), chunk_size, overlap).unwrap();
        prop_assert!(same(&chunked, &direct));

        let direct = sma(&data, window).unwrap();
        let chunked =
            process_chunks_with_overlap(&data, |c| sma(c, window), chunk_size, overlap).unwrap();
        prop_assert!(same(&chunked, &direct));
    }

    /// The chunked adapter raises the overlap to the lookback on its own
    #[test]
    fn prop_chunked_adapter_equals_direct(
        data in arb_clustered_series(1, 300),
        window in 1usize..=8,
        chunk_size in 9usize..=64,
    ) {
        let max = Maximum::new(window).unwrap();
        let chunked = Chunked::new(max.clone(), ChunkConfig::new(chunk_size, 0)).unwrap();
        prop_assert!(same(&chunked.calculate(&data).unwrap(), &max.calculate(&data).unwrap()));
    }
}
