//! Trailing accumulator for windowed sums and means.
//!
//! The reference library computes every windowed sum with the same serial
//! scheme: add the newest term into the accumulator, snapshot the
//! accumulator, subtract the trailing term, then emit the snapshot (divided
//! by the period for a mean). The snapshot-before-subtract ordering is not
//! interchangeable with subtract-before-add in floating point, and the
//! specified outputs depend on it, so both functions here follow it
//! verbatim.

use crate::error::Result;
use crate::traits::{validate_indicator_input, validate_output_len, SeriesElement};

/// Writes the windowed sum of `data` over `period` into `output`.
///
/// The first `period - 1` slots are filled with NaN. `output` must hold at
/// least `data.len()` elements.
///
/// # Errors
///
/// Returns an error if `data` is empty, `period` is zero, `data` is shorter
/// than `period`, or `output` is shorter than `data`.
pub fn running_sum_into<T: SeriesElement>(
    data: &[T],
    period: usize,
    output: &mut [T],
) -> Result<()> {
    validate_indicator_input(data, period, "running_sum")?;
    validate_output_len(output.len(), data.len(), "running_sum")?;

    let lookback = period - 1;
    crate::utils::fill_nan_prefix(output, lookback);

    let mut period_total = T::zero();
    for &value in &data[..lookback] {
        period_total = period_total + value;
    }

    let mut trailing = 0;
    for today in lookback..data.len() {
        period_total = period_total + data[today];
        let temp = period_total;
        period_total = period_total - data[trailing];
        trailing += 1;
        output[today] = temp;
    }

    Ok(())
}

/// Writes the windowed mean of `data` over `period` into `output`.
///
/// Identical accumulation to [`running_sum_into`] with the snapshot divided
/// by the period. This is the simple moving average kernel.
///
/// # Errors
///
/// Returns an error if `data` is empty, `period` is zero, `data` is shorter
/// than `period`, or `output` is shorter than `data`.
pub fn windowed_mean_into<T: SeriesElement>(
    data: &[T],
    period: usize,
    output: &mut [T],
) -> Result<()> {
    validate_indicator_input(data, period, "windowed_mean")?;
    validate_output_len(output.len(), data.len(), "windowed_mean")?;

    let period_t = T::from_usize(period)?;
    let lookback = period - 1;
    crate::utils::fill_nan_prefix(output, lookback);

    let mut period_total = T::zero();
    for &value in &data[..lookback] {
        period_total = period_total + value;
    }

    let mut trailing = 0;
    for today in lookback..data.len() {
        period_total = period_total + data[today];
        let temp = period_total;
        period_total = period_total - data[trailing];
        trailing += 1;
        output[today] = temp / period_t;
    }

    Ok(())
}
