//! Average Directional Movement Index (ADX, ADXR).
//!
//! ADX is Wilder-smoothed DX, seeded with a plain average of the first
//! `period` DX values. ADXR averages ADX with its value `period - 1`
//! bars earlier.

use crate::error::Result;
use crate::indicators::dx::{validate_dmi, DmState};
use crate::settings::{Settings, UnstableFn};
use crate::traits::{validate_output_len, SeriesElement};
use crate::utils::fill_nan_prefix;

/// Returns the number of leading NaN values in ADX output.
#[inline]
#[must_use]
pub const fn adx_lookback(period: usize) -> usize {
    (2 * period) - 1
}

/// Returns the number of leading NaN values in ADXR output.
#[inline]
#[must_use]
pub const fn adxr_lookback(period: usize) -> usize {
    (3 * period) - 2
}

/// Computes ADX into a caller-supplied buffer.
///
/// A bar whose DX denominator vanished contributes nothing to the
/// smoothing; the previous ADX carries through unchanged.
///
/// # Errors
///
/// - `Error::EmptyInput` if the inputs are empty
/// - `Error::InvalidInput` if the input lengths differ
/// - `Error::InvalidPeriod` if `period` is outside `2..=100_000`
/// - `Error::InsufficientData` if the inputs are shorter than
///   `2 * period`
/// - `Error::BufferTooSmall` if `output.len() < close.len()`
pub fn adx_into<T: SeriesElement>(
    high: &[T],
    low: &[T],
    close: &[T],
    period: usize,
    output: &mut [T],
) -> Result<()> {
    let lookback = adx_lookback(period);
    validate_dmi(high, low, close, period, lookback + 1, "adx")?;
    validate_output_len(output.len(), close.len(), "adx")?;

    let period_t = T::from_usize(period)?;
    let decay = period_t - T::one();

    fill_nan_prefix(output, lookback);
    let (mut state, mut today) = DmState::prime(high, low, close, period);

    let mut sum_dx = T::zero();
    for _ in 0..period {
        today += 1;
        state.step(high, low, close, today);
        if let Some(dx) = state.dx() {
            sum_dx = sum_dx + dx;
        }
    }

    let mut prev_adx = sum_dx / period_t;
    output[lookback] = prev_adx;

    for today in (lookback + 1)..close.len() {
        state.step(high, low, close, today);
        if let Some(dx) = state.dx() {
            prev_adx = ((prev_adx * decay) + dx) / period_t;
        }
        output[today] = prev_adx;
    }
    Ok(())
}

/// Computes ADX.
///
/// # Errors
///
/// See [`adx_into`].
pub fn adx<T: SeriesElement>(
    high: &[T],
    low: &[T],
    close: &[T],
    period: usize,
) -> Result<Vec<T>> {
    let mut output = vec![T::zero(); close.len()];
    adx_into(high, low, close, period, &mut output)?;
    Ok(output)
}

/// Computes ADX and applies the configured unstable period.
///
/// # Errors
///
/// See [`adx_into`].
pub fn adx_with_settings<T: SeriesElement>(
    high: &[T],
    low: &[T],
    close: &[T],
    period: usize,
    settings: &Settings,
) -> Result<Vec<T>> {
    let mut output = adx(high, low, close, period)?;
    settings.mask_unstable(UnstableFn::Adx, &mut output);
    Ok(output)
}

/// Computes ADXR into a caller-supplied buffer.
///
/// # Errors
///
/// - `Error::EmptyInput` if the inputs are empty
/// - `Error::InvalidInput` if the input lengths differ
/// - `Error::InvalidPeriod` if `period` is outside `2..=100_000`
/// - `Error::InsufficientData` if the inputs are shorter than
///   `3 * period - 1`
/// - `Error::BufferTooSmall` if `output.len() < close.len()`
pub fn adxr_into<T: SeriesElement>(
    high: &[T],
    low: &[T],
    close: &[T],
    period: usize,
    output: &mut [T],
) -> Result<()> {
    let start = adxr_lookback(period);
    validate_dmi(high, low, close, period, start + 1, "adxr")?;
    validate_output_len(output.len(), close.len(), "adxr")?;

    let adx_series = adx(high, low, close, period)?;
    let shift = period - 1;

    fill_nan_prefix(output, start);
    for i in start..close.len() {
        output[i] = (adx_series[i] + adx_series[i - shift]) / T::two();
    }
    Ok(())
}

/// Computes ADXR.
///
/// # Errors
///
/// See [`adxr_into`].
pub fn adxr<T: SeriesElement>(
    high: &[T],
    low: &[T],
    close: &[T],
    period: usize,
) -> Result<Vec<T>> {
    let mut output = vec![T::zero(); close.len()];
    adxr_into(high, low, close, period, &mut output)?;
    Ok(output)
}

/// Computes ADXR and applies the configured unstable period.
///
/// # Errors
///
/// See [`adxr_into`].
pub fn adxr_with_settings<T: SeriesElement>(
    high: &[T],
    low: &[T],
    close: &[T],
    period: usize,
    settings: &Settings,
) -> Result<Vec<T>> {
    let mut output = adxr(high, low, close, period)?;
    settings.mask_unstable(UnstableFn::Adxr, &mut output);
    Ok(output)
}
