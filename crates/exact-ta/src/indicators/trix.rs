//! TRIX: 1-bar rate of change of a triple-smoothed EMA.
//!
//! Three chained EMAs over the valid tail of the previous stage, then a
//! one-bar percentage change with a degenerate-denominator guard.

use crate::error::Result;
use crate::indicators::ema::{ema_into, ema_lookback};
use crate::traits::{
    validate_output_len, validate_period_range, SeriesElement, ValidatedInput,
};

/// Returns the number of leading NaN values in TRIX output.
#[inline]
#[must_use]
pub const fn trix_lookback(period: usize) -> usize {
    3 * period.saturating_sub(1) + 1
}

/// Returns the minimum input length that produces at least one output.
#[inline]
#[must_use]
pub const fn trix_min_len(period: usize) -> usize {
    trix_lookback(period) + 1
}

fn roc1<T: SeriesElement>(series: &[T], offset: usize, output: &mut [T]) {
    for i in 1..series.len() {
        let prev = series[i - 1];
        output[offset + i] = if prev.abs() < T::ta_epsilon() {
            T::zero()
        } else {
            (series[i] - prev) / prev * T::hundred()
        };
    }
}

/// Computes TRIX into a caller-supplied buffer.
///
/// # Errors
///
/// - `Error::EmptyInput` if `data` is empty
/// - `Error::InvalidPeriod` if `period` is outside `1..=100_000`
/// - `Error::InsufficientData` if `data.len() < trix_min_len(period)`
/// - `Error::BufferTooSmall` if `output.len() < data.len()`
pub fn trix_into<T: SeriesElement>(data: &[T], period: usize, output: &mut [T]) -> Result<()> {
    validate_period_range(period, 1, 100_000)?;
    data.validate_not_empty()?;
    data.validate_min_length(trix_min_len(period), "trix")?;
    validate_output_len(output.len(), data.len(), "trix")?;

    crate::utils::fill_nan_prefix(output, trix_lookback(period));

    if period == 1 {
        // 3x EMA(1) is the input itself
        roc1(data, 0, output);
        return Ok(());
    }

    let lb = ema_lookback(period);
    let mut ema1 = vec![T::zero(); data.len()];
    ema_into(data, period, &mut ema1)?;
    let ema1_valid = &ema1[lb..];

    let mut ema2 = vec![T::zero(); ema1_valid.len()];
    ema_into(ema1_valid, period, &mut ema2)?;
    let ema2_valid = ema2[lb..].to_vec();

    let mut ema3 = vec![T::zero(); ema2_valid.len()];
    ema_into(&ema2_valid, period, &mut ema3)?;
    let ema3_valid = &ema3[lb..];

    roc1(ema3_valid, 3 * lb, output);
    Ok(())
}

/// Computes TRIX, allocating the output.
///
/// # Errors
///
/// See [`trix_into`].
pub fn trix<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<T>> {
    let mut output = vec![T::zero(); data.len()];
    trix_into(data, period, &mut output)?;
    Ok(output)
}
