//! Triangular Moving Average (TRIMA).
//!
//! An SMA of an SMA. The two sub-periods split the requested period so the
//! combined weighting is triangular: an even period uses `p1 = period/2`
//! and `p2 = p1 + 1`; an odd period uses `p1 = p2 = (period+1)/2`. The
//! combined lookback `(p1-1) + (p2-1)` always equals `period - 1`.
//!
//! # Lookback
//!
//! `period - 1`.

use crate::error::Result;
use crate::kernels::running_sum::windowed_mean_into;
use crate::traits::{validate_output_len, validate_period_range, SeriesElement, ValidatedInput};

/// Returns the number of leading NaN values in TRIMA output.
#[inline]
#[must_use]
pub const fn trima_lookback(period: usize) -> usize {
    period.saturating_sub(1)
}

/// Returns the minimum input length that produces at least one TRIMA value.
#[inline]
#[must_use]
pub const fn trima_min_len(period: usize) -> usize {
    period
}

const fn split_periods(period: usize) -> (usize, usize) {
    if period % 2 == 0 {
        let p1 = period / 2;
        (p1, p1 + 1)
    } else {
        let p = (period + 1) / 2;
        (p, p)
    }
}

/// Computes the Triangular Moving Average into a caller-supplied buffer.
///
/// # Errors
///
/// - `Error::InvalidPeriod` if `period` is outside `2..=100_000`
/// - `Error::EmptyInput` if `data` is empty
/// - `Error::InsufficientData` if `data.len() < trima_min_len(period)`
/// - `Error::BufferTooSmall` if `output.len() < data.len()`
pub fn trima_into<T: SeriesElement>(data: &[T], period: usize, output: &mut [T]) -> Result<()> {
    validate_period_range(period, 2, 100_000)?;
    data.validate_not_empty()?;
    data.validate_min_length(trima_min_len(period), "trima")?;
    validate_output_len(output.len(), data.len(), "trima")?;

    let (p1, p2) = split_periods(period);
    let p1_lb = p1 - 1;
    let p2_lb = p2 - 1;
    let lookback = trima_lookback(period);
    crate::utils::fill_nan_prefix(output, lookback);

    let mut first = vec![T::zero(); data.len()];
    windowed_mean_into(data, p1, &mut first)?;
    let first_valid = &first[p1_lb..];

    let mut second = vec![T::zero(); first_valid.len()];
    windowed_mean_into(first_valid, p2, &mut second)?;

    output[p1_lb + p2_lb..data.len()].copy_from_slice(&second[p2_lb..]);

    Ok(())
}

/// Computes the Triangular Moving Average.
///
/// # Errors
///
/// See [`trima_into`].
pub fn trima<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<T>> {
    let mut output = vec![T::zero(); data.len()];
    trima_into(data, period, &mut output)?;
    Ok(output)
}
