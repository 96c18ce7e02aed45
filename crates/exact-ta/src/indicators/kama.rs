//! Kaufman Adaptive Moving Average (KAMA).
//!
//! An EMA whose smoothing constant adapts to the efficiency ratio: the
//! magnitude of the net price change over the period divided by the sum of
//! the bar-to-bar absolute changes. A trending market drives the ratio
//! toward 1 (fast smoothing); a choppy one drives it toward 0 (slow).
//!
//! # Formula
//!
//! ```text
//! er     = |close[i] - close[i-period]| / sum(|1-bar changes|)
//! sc     = (er * (2/3 - 2/31) + 2/31)^2
//! KAMA[i] = KAMA[i-1] + sc * (close[i] - KAMA[i-1])
//! ```
//!
//! The ratio degenerates to 1 when the denominator does not exceed the net
//! change, or when its magnitude is below the reference zero guard.
//!
//! # Lookback
//!
//! `period` (one more than the simple moving averages).

use crate::error::Result;
use crate::traits::{validate_output_len, validate_period_range, SeriesElement, ValidatedInput};

/// Returns the number of leading NaN values in KAMA output.
#[inline]
#[must_use]
pub const fn kama_lookback(period: usize) -> usize {
    period
}

/// Returns the minimum input length that produces at least one KAMA value.
#[inline]
#[must_use]
pub const fn kama_min_len(period: usize) -> usize {
    period + 1
}

/// Computes the Kaufman Adaptive Moving Average into a caller-supplied buffer.
///
/// # Errors
///
/// - `Error::InvalidPeriod` if `period` is outside `2..=100_000`
/// - `Error::EmptyInput` if `data` is empty
/// - `Error::InsufficientData` if `data.len() < kama_min_len(period)`
/// - `Error::BufferTooSmall` if `output.len() < data.len()`
#[allow(clippy::too_many_lines)]
pub fn kama_into<T: SeriesElement>(data: &[T], period: usize, output: &mut [T]) -> Result<()> {
    validate_period_range(period, 2, 100_000)?;
    data.validate_not_empty()?;
    data.validate_min_length(kama_min_len(period), "kama")?;
    validate_output_len(output.len(), data.len(), "kama")?;

    let n = data.len();
    let lookback = kama_lookback(period);
    crate::utils::fill_nan_prefix(output, lookback);

    // Fastest (period 2) and slowest (period 30) EMA constants.
    let const_max = T::two() / (T::from_usize(30)? + T::one());
    let const_diff = T::two() / (T::two() + T::one()) - const_max;

    let mut sum_roc1 = T::zero();
    let mut today = 0;
    let mut trailing_idx = 0;
    for _ in 0..period {
        let temp = data[today] - data[today + 1];
        sum_roc1 = sum_roc1 + temp.abs();
        today += 1;
    }

    let mut prev_kama = data[today - 1];

    let temp_real = data[today];
    let temp_real2 = data[trailing_idx];
    let mut period_roc = temp_real - temp_real2;
    trailing_idx += 1;
    let mut trailing_value = temp_real2;

    let mut er = if sum_roc1 <= period_roc || sum_roc1.is_ta_zero() {
        T::one()
    } else {
        (period_roc / sum_roc1).abs()
    };

    let mut sc = (er * const_diff) + const_max;
    sc = sc * sc;
    prev_kama = ((data[today] - prev_kama) * sc) + prev_kama;
    today += 1;

    output[lookback] = prev_kama;

    while today < n {
        let temp_real = data[today];
        let temp_real2 = data[trailing_idx];
        period_roc = temp_real - temp_real2;
        trailing_idx += 1;

        sum_roc1 = sum_roc1 - (trailing_value - temp_real2).abs();
        sum_roc1 = sum_roc1 + (temp_real - data[today - 1]).abs();
        trailing_value = temp_real2;

        er = if sum_roc1 <= period_roc || sum_roc1.is_ta_zero() {
            T::one()
        } else {
            (period_roc / sum_roc1).abs()
        };

        sc = (er * const_diff) + const_max;
        sc = sc * sc;

        prev_kama = ((temp_real - prev_kama) * sc) + prev_kama;
        output[today] = prev_kama;
        today += 1;
    }

    Ok(())
}

/// Computes the Kaufman Adaptive Moving Average.
///
/// # Errors
///
/// See [`kama_into`].
pub fn kama<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<T>> {
    let mut output = vec![T::zero(); data.len()];
    kama_into(data, period, &mut output)?;
    Ok(output)
}
