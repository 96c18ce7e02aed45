//! Triple Exponential Moving Average (TEMA).
//!
//! `3*EMA - 3*EMA(EMA) + EMA(EMA(EMA))`, each inner EMA running over the
//! valid tail of the previous one.
//!
//! # Lookback
//!
//! `3 * (period - 1)`.

use crate::error::Result;
use crate::indicators::ema::{ema_into, ema_lookback};
use crate::traits::{validate_output_len, validate_period_range, SeriesElement, ValidatedInput};

/// Returns the number of leading NaN values in TEMA output.
#[inline]
#[must_use]
pub const fn tema_lookback(period: usize) -> usize {
    3 * period.saturating_sub(1)
}

/// Returns the minimum input length that produces at least one TEMA value.
#[inline]
#[must_use]
pub const fn tema_min_len(period: usize) -> usize {
    tema_lookback(period) + 1
}

/// Computes the Triple Exponential Moving Average into a caller-supplied buffer.
///
/// # Errors
///
/// - `Error::InvalidPeriod` if `period` is outside `2..=100_000`
/// - `Error::EmptyInput` if `data` is empty
/// - `Error::InsufficientData` if `data.len() < tema_min_len(period)`
/// - `Error::BufferTooSmall` if `output.len() < data.len()`
pub fn tema_into<T: SeriesElement>(data: &[T], period: usize, output: &mut [T]) -> Result<()> {
    validate_period_range(period, 2, 100_000)?;
    data.validate_not_empty()?;
    data.validate_min_length(tema_min_len(period), "tema")?;
    validate_output_len(output.len(), data.len(), "tema")?;

    let lb = ema_lookback(period);
    let lookback = tema_lookback(period);
    crate::utils::fill_nan_prefix(output, lookback);

    let mut ema1 = vec![T::zero(); data.len()];
    ema_into(data, period, &mut ema1)?;
    let ema1_valid = &ema1[lb..];

    let mut ema2 = vec![T::zero(); ema1_valid.len()];
    ema_into(ema1_valid, period, &mut ema2)?;
    let ema2_valid = &ema2[lb..];

    let mut ema3 = vec![T::zero(); ema2_valid.len()];
    ema_into(ema2_valid, period, &mut ema3)?;

    let three = T::from_usize(3)?;
    for (offset, &e3) in ema3[lb..].iter().enumerate() {
        let e1 = ema1_valid[2 * lb + offset];
        let e2 = ema2_valid[lb + offset];
        output[lookback + offset] = three * e1 - three * e2 + e3;
    }

    Ok(())
}

/// Computes the Triple Exponential Moving Average.
///
/// # Errors
///
/// See [`tema_into`].
pub fn tema<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<T>> {
    let mut output = vec![T::zero(); data.len()];
    tema_into(data, period, &mut output)?;
    Ok(output)
}
