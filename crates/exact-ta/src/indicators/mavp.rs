//! Moving Average with Variable Period (MAVP).
//!
//! Each output element is the moving average whose period is taken from a
//! parallel `periods` series, truncated to an integer and clamped to
//! `[min_period, max_period]`. The first `ma_lookback(max_period)` slots
//! are NaN regardless of the per-element periods.

use crate::error::Result;
use crate::indicators::ma::{ma, ma_lookback, MaType};
use crate::traits::{
    validate_output_len, validate_period_range, validate_same_length, SeriesElement,
    ValidatedInput,
};

/// Returns the number of leading NaN values in MAVP output.
#[inline]
#[must_use]
pub const fn mavp_lookback(max_period: usize, ma_type: MaType) -> usize {
    ma_lookback(max_period, ma_type)
}

/// Returns the minimum input length that produces at least one output.
#[inline]
#[must_use]
pub const fn mavp_min_len(max_period: usize, ma_type: MaType) -> usize {
    mavp_lookback(max_period, ma_type) + 1
}

fn clamp_period<T: SeriesElement>(value: T, min_period: usize, max_period: usize) -> usize {
    // Truncate toward zero, then apply the lower bound before the upper
    // bound so min > max resolves to max.
    let truncated = value.trunc().to_i64().unwrap_or(0);
    let raised = if truncated < min_period as i64 {
        min_period as i64
    } else {
        truncated
    };
    let capped = if raised > max_period as i64 {
        max_period as i64
    } else {
        raised
    };
    usize::try_from(capped).unwrap_or(min_period)
}

/// Computes the variable-period moving average into a caller-supplied
/// buffer.
///
/// # Errors
///
/// - `Error::EmptyInput` if `data` is empty
/// - `Error::InvalidInput` if `periods.len() != data.len()`
/// - `Error::InvalidPeriod` if either period bound is outside
///   `2..=100_000`
/// - `Error::InsufficientData` if `data` is shorter than
///   `mavp_min_len(max_period, ma_type)`
/// - `Error::BufferTooSmall` if `output.len() < data.len()`
pub fn mavp_into<T: SeriesElement>(
    data: &[T],
    periods: &[T],
    min_period: usize,
    max_period: usize,
    ma_type: MaType,
    output: &mut [T],
) -> Result<()> {
    data.validate_not_empty()?;
    validate_same_length(
        &[data.len(), periods.len()],
        "data and periods must have the same length",
    )?;
    validate_period_range(min_period, 2, 100_000)?;
    validate_period_range(max_period, 2, 100_000)?;
    let lookback = mavp_lookback(max_period, ma_type);
    data.validate_min_length(lookback + 1, "mavp")?;
    validate_output_len(output.len(), data.len(), "mavp")?;

    crate::utils::fill_nan_prefix(output, lookback);

    let clamped: Vec<usize> = periods
        .iter()
        .map(|&p| clamp_period(p, min_period, max_period))
        .collect();

    // Compute each distinct period once and scatter its values.
    let mut distinct: Vec<usize> = clamped[lookback..].to_vec();
    distinct.sort_unstable();
    distinct.dedup();

    for period in distinct {
        let series = ma(data, period, ma_type)?;
        for i in lookback..data.len() {
            if clamped[i] == period {
                output[i] = series[i];
            }
        }
    }

    Ok(())
}

/// Computes the variable-period moving average.
///
/// # Errors
///
/// See [`mavp_into`].
pub fn mavp<T: SeriesElement>(
    data: &[T],
    periods: &[T],
    min_period: usize,
    max_period: usize,
    ma_type: MaType,
) -> Result<Vec<T>> {
    let mut output = vec![T::zero(); data.len()];
    mavp_into(data, periods, min_period, max_period, ma_type, &mut output)?;
    Ok(output)
}
