//! Double Exponential Moving Average (DEMA).
//!
//! `2*EMA(data) - EMA(EMA(data))`, with the inner EMA computed over the
//! valid tail of the outer one so the seeds line up with the reference.
//!
//! # Lookback
//!
//! `2 * (period - 1)`.

use crate::error::Result;
use crate::indicators::ema::{ema_into, ema_lookback};
use crate::traits::{validate_output_len, validate_period_range, SeriesElement, ValidatedInput};

/// Returns the number of leading NaN values in DEMA output.
#[inline]
#[must_use]
pub const fn dema_lookback(period: usize) -> usize {
    2 * period.saturating_sub(1)
}

/// Returns the minimum input length that produces at least one DEMA value.
#[inline]
#[must_use]
pub const fn dema_min_len(period: usize) -> usize {
    dema_lookback(period) + 1
}

/// Computes the Double Exponential Moving Average into a caller-supplied buffer.
///
/// # Errors
///
/// - `Error::InvalidPeriod` if `period` is outside `2..=100_000`
/// - `Error::EmptyInput` if `data` is empty
/// - `Error::InsufficientData` if `data.len() < dema_min_len(period)`
/// - `Error::BufferTooSmall` if `output.len() < data.len()`
pub fn dema_into<T: SeriesElement>(data: &[T], period: usize, output: &mut [T]) -> Result<()> {
    validate_period_range(period, 2, 100_000)?;
    data.validate_not_empty()?;
    data.validate_min_length(dema_min_len(period), "dema")?;
    validate_output_len(output.len(), data.len(), "dema")?;

    let lb = ema_lookback(period);
    let lookback = dema_lookback(period);
    crate::utils::fill_nan_prefix(output, lookback);

    let mut ema1 = vec![T::zero(); data.len()];
    ema_into(data, period, &mut ema1)?;
    let ema1_valid = &ema1[lb..];

    let mut ema2 = vec![T::zero(); ema1_valid.len()];
    ema_into(ema1_valid, period, &mut ema2)?;

    for (offset, &e2) in ema2[lb..].iter().enumerate() {
        let e1 = ema1_valid[lb + offset];
        output[lookback + offset] = T::two() * e1 - e2;
    }

    Ok(())
}

/// Computes the Double Exponential Moving Average.
///
/// # Errors
///
/// See [`dema_into`].
pub fn dema<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<T>> {
    let mut output = vec![T::zero(); data.len()];
    dema_into(data, period, &mut output)?;
    Ok(output)
}
