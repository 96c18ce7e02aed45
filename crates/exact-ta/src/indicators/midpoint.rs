//! MidPoint over period (MIDPOINT).
//!
//! `(highest + lowest) / 2` over the window, rescanned per bar.

use crate::error::Result;
use crate::traits::{
    validate_output_len, validate_period_range, SeriesElement, ValidatedInput,
};

/// Returns the number of leading NaN values in MIDPOINT output.
#[inline]
#[must_use]
pub const fn midpoint_lookback(period: usize) -> usize {
    period.saturating_sub(1)
}

/// Returns the minimum input length that produces at least one output.
#[inline]
#[must_use]
pub const fn midpoint_min_len(period: usize) -> usize {
    period
}

/// Computes the window midpoint into a caller-supplied buffer.
///
/// # Errors
///
/// - `Error::EmptyInput` if `data` is empty
/// - `Error::InvalidPeriod` if `period` is outside `2..=100_000`
/// - `Error::InsufficientData` if `data.len() < period`
/// - `Error::BufferTooSmall` if `output.len() < data.len()`
pub fn midpoint_into<T: SeriesElement>(
    data: &[T],
    period: usize,
    output: &mut [T],
) -> Result<()> {
    validate_period_range(period, 2, 100_000)?;
    data.validate_not_empty()?;
    data.validate_min_length(midpoint_min_len(period), "midpoint")?;
    validate_output_len(output.len(), data.len(), "midpoint")?;

    crate::utils::fill_nan_prefix(output, midpoint_lookback(period));

    let half = T::from_f64(0.5)?;
    let mut trailing = 0;
    for today in midpoint_lookback(period)..data.len() {
        let mut lowest = data[trailing];
        let mut highest = lowest;
        for &value in &data[trailing + 1..=today] {
            if value < lowest {
                lowest = value;
            } else if value > highest {
                highest = value;
            }
        }
        output[today] = (highest + lowest) * half;
        trailing += 1;
    }
    Ok(())
}

/// Computes the window midpoint.
///
/// # Errors
///
/// See [`midpoint_into`].
pub fn midpoint<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<T>> {
    let mut output = vec![T::zero(); data.len()];
    midpoint_into(data, period, &mut output)?;
    Ok(output)
}
