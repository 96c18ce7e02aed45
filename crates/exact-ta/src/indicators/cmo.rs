//! Chande Momentum Oscillator (CMO).
//!
//! Shares the Wilder gain/loss engine with RSI but maps the averages to
//! `100 * (gain - loss) / (gain + loss)`, giving a -100..100 scale.

use crate::error::Result;
use crate::settings::{Compatibility, Settings, UnstableFn};
use crate::traits::{
    validate_output_len, validate_period_range, SeriesElement, ValidatedInput,
};

/// Returns the number of leading NaN values in CMO output.
#[inline]
#[must_use]
pub const fn cmo_lookback(period: usize) -> usize {
    period
}

/// Returns the minimum input length that produces at least one CMO value.
#[inline]
#[must_use]
pub const fn cmo_min_len(period: usize) -> usize {
    period + 1
}

fn cmo_value<T: SeriesElement>(gain: T, loss: T) -> T {
    let denom = gain + loss;
    if denom.abs() >= T::ta_epsilon() {
        T::hundred() * ((gain - loss) / denom)
    } else {
        T::zero()
    }
}

/// Computes CMO into a caller-supplied buffer.
///
/// # Errors
///
/// - `Error::EmptyInput` if `data` is empty
/// - `Error::InvalidPeriod` if `period` is outside `2..=100_000`
/// - `Error::InsufficientData` if `data.len() < cmo_min_len(period)`
/// - `Error::BufferTooSmall` if `output.len() < data.len()`
pub fn cmo_into<T: SeriesElement>(data: &[T], period: usize, output: &mut [T]) -> Result<()> {
    validate_period_range(period, 2, 100_000)?;
    data.validate_not_empty()?;
    data.validate_min_length(cmo_min_len(period), "cmo")?;
    validate_output_len(output.len(), data.len(), "cmo")?;

    crate::utils::fill_nan_prefix(output, cmo_lookback(period));

    let period_t = T::from_usize(period).unwrap_or_else(|_| T::one());
    let mut prev_value = data[0];
    let mut prev_gain = T::zero();
    let mut prev_loss = T::zero();

    for &value in &data[1..=period] {
        let diff = value - prev_value;
        prev_value = value;
        if diff < T::zero() {
            prev_loss = prev_loss - diff;
        } else {
            prev_gain = prev_gain + diff;
        }
    }

    prev_loss = prev_loss / period_t;
    prev_gain = prev_gain / period_t;
    output[period] = cmo_value(prev_gain, prev_loss);

    let decay = period_t - T::one();
    for i in (period + 1)..data.len() {
        let value = data[i];
        let diff = value - prev_value;
        prev_value = value;

        prev_loss = prev_loss * decay;
        prev_gain = prev_gain * decay;
        if diff < T::zero() {
            prev_loss = prev_loss - diff;
        } else {
            prev_gain = prev_gain + diff;
        }
        prev_loss = prev_loss / period_t;
        prev_gain = prev_gain / period_t;
        output[i] = cmo_value(prev_gain, prev_loss);
    }

    Ok(())
}

/// Computes CMO, allocating the output.
///
/// # Errors
///
/// See [`cmo_into`].
pub fn cmo<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<T>> {
    let mut output = vec![T::zero(); data.len()];
    cmo_into(data, period, &mut output)?;
    Ok(output)
}

fn metastock_first_value<T: SeriesElement>(data: &[T], period: usize, output: &mut [T]) {
    if data.len() < period {
        return;
    }
    let period_t = T::from_usize(period).unwrap_or_else(|_| T::one());
    let mut prev_value = data[0];
    let mut prev_gain = T::zero();
    let mut prev_loss = T::zero();
    for &value in &data[..period] {
        let diff = value - prev_value;
        prev_value = value;
        if diff < T::zero() {
            prev_loss = prev_loss - diff;
        } else {
            prev_gain = prev_gain + diff;
        }
    }
    output[period - 1] = cmo_value(prev_gain / period_t, prev_loss / period_t);
}

/// Computes CMO under the given settings.
///
/// Metastock compatibility emits one extra value at `period - 1`; the
/// configured unstable period is then masked off the front.
///
/// # Errors
///
/// See [`cmo_into`].
pub fn cmo_with_settings<T: SeriesElement>(
    data: &[T],
    period: usize,
    settings: &Settings,
) -> Result<Vec<T>> {
    let mut output = cmo(data, period)?;
    if settings.compatibility == Compatibility::Metastock {
        metastock_first_value(data, period, &mut output);
    }
    settings.mask_unstable(UnstableFn::Cmo, &mut output);
    Ok(output)
}
