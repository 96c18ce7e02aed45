//! Directional movement (PLUS_DM, MINUS_DM).
//!
//! Wilder's smoothed directional movement. A bar contributes to plus-DM
//! only when its upward range expansion exceeds the downward one, and
//! symmetrically for minus-DM. Period 1 emits the raw per-bar deltas.

use crate::error::Result;
use crate::kernels::dmi::dm_deltas;
use crate::settings::{Settings, UnstableFn};
use crate::traits::{
    validate_output_len, validate_period_range, validate_same_length, SeriesElement,
    ValidatedInput,
};
use crate::utils::fill_nan_prefix;

/// Returns the number of leading NaN values in PLUS_DM and MINUS_DM output.
#[inline]
#[must_use]
pub const fn dm_lookback(period: usize) -> usize {
    if period > 1 {
        period - 1
    } else {
        1
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum DmSide {
    Plus,
    Minus,
}

fn dm_kernel<T: SeriesElement>(
    high: &[T],
    low: &[T],
    period: usize,
    side: DmSide,
    output: &mut [T],
) {
    let n = high.len();
    let lookback = dm_lookback(period);

    let pick = |diff_p: T, diff_m: T| match side {
        DmSide::Plus => {
            if diff_p > T::zero() && diff_p > diff_m {
                Some(diff_p)
            } else {
                None
            }
        }
        DmSide::Minus => {
            if diff_m > T::zero() && diff_p < diff_m {
                Some(diff_m)
            } else {
                None
            }
        }
    };

    if period == 1 {
        let mut prev_high = high[0];
        let mut prev_low = low[0];
        for today in 1..n {
            let (diff_p, diff_m) = dm_deltas(high[today], low[today], prev_high, prev_low);
            prev_high = high[today];
            prev_low = low[today];
            output[today] = pick(diff_p, diff_m).unwrap_or_else(T::zero);
        }
        return;
    }

    let period_t = T::from_usize(period).unwrap_or_else(|_| T::one());
    let mut prev_dm = T::zero();
    let mut prev_high = high[0];
    let mut prev_low = low[0];
    let mut today = 0;

    for _ in 0..(period - 1) {
        today += 1;
        let (diff_p, diff_m) = dm_deltas(high[today], low[today], prev_high, prev_low);
        prev_high = high[today];
        prev_low = low[today];
        if let Some(dm) = pick(diff_p, diff_m) {
            prev_dm = prev_dm + dm;
        }
    }
    output[lookback] = prev_dm;

    for today in (lookback + 1)..n {
        let (diff_p, diff_m) = dm_deltas(high[today], low[today], prev_high, prev_low);
        prev_high = high[today];
        prev_low = low[today];

        prev_dm = prev_dm - prev_dm / period_t;
        if let Some(dm) = pick(diff_p, diff_m) {
            prev_dm = prev_dm + dm;
        }
        output[today] = prev_dm;
    }
}

fn dm_into<T: SeriesElement>(
    high: &[T],
    low: &[T],
    period: usize,
    side: DmSide,
    indicator: &'static str,
    output: &mut [T],
) -> Result<()> {
    validate_period_range(period, 1, 100_000)?;
    high.validate_not_empty()?;
    validate_same_length(&[high.len(), low.len()], indicator)?;
    high.validate_min_length(dm_lookback(period) + 1, indicator)?;
    validate_output_len(output.len(), high.len(), indicator)?;

    fill_nan_prefix(output, dm_lookback(period));
    dm_kernel(high, low, period, side, output);
    Ok(())
}

/// Computes PLUS_DM into a caller-supplied buffer.
///
/// # Errors
///
/// - `Error::EmptyInput` if the inputs are empty
/// - `Error::InvalidInput` if the input lengths differ
/// - `Error::InvalidPeriod` if `period` is outside `1..=100_000`
/// - `Error::InsufficientData` if the inputs are shorter than the
///   minimum length
/// - `Error::BufferTooSmall` if `output.len() < high.len()`
pub fn plus_dm_into<T: SeriesElement>(
    high: &[T],
    low: &[T],
    period: usize,
    output: &mut [T],
) -> Result<()> {
    dm_into(high, low, period, DmSide::Plus, "plus_dm", output)
}

/// Computes PLUS_DM.
///
/// # Errors
///
/// See [`plus_dm_into`].
pub fn plus_dm<T: SeriesElement>(high: &[T], low: &[T], period: usize) -> Result<Vec<T>> {
    let mut output = vec![T::zero(); high.len()];
    plus_dm_into(high, low, period, &mut output)?;
    Ok(output)
}

/// Computes PLUS_DM and applies the configured unstable period.
///
/// # Errors
///
/// See [`plus_dm_into`].
pub fn plus_dm_with_settings<T: SeriesElement>(
    high: &[T],
    low: &[T],
    period: usize,
    settings: &Settings,
) -> Result<Vec<T>> {
    let mut output = plus_dm(high, low, period)?;
    settings.mask_unstable(UnstableFn::PlusDm, &mut output);
    Ok(output)
}

/// Computes MINUS_DM into a caller-supplied buffer.
///
/// # Errors
///
/// See [`plus_dm_into`].
pub fn minus_dm_into<T: SeriesElement>(
    high: &[T],
    low: &[T],
    period: usize,
    output: &mut [T],
) -> Result<()> {
    dm_into(high, low, period, DmSide::Minus, "minus_dm", output)
}

/// Computes MINUS_DM.
///
/// # Errors
///
/// See [`plus_dm_into`].
pub fn minus_dm<T: SeriesElement>(high: &[T], low: &[T], period: usize) -> Result<Vec<T>> {
    let mut output = vec![T::zero(); high.len()];
    minus_dm_into(high, low, period, &mut output)?;
    Ok(output)
}

/// Computes MINUS_DM and applies the configured unstable period.
///
/// # Errors
///
/// See [`plus_dm_into`].
pub fn minus_dm_with_settings<T: SeriesElement>(
    high: &[T],
    low: &[T],
    period: usize,
    settings: &Settings,
) -> Result<Vec<T>> {
    let mut output = minus_dm(high, low, period)?;
    settings.mask_unstable(UnstableFn::MinusDm, &mut output);
    Ok(output)
}
