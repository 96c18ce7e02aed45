//! True range family (TRANGE, ATR, NATR).
//!
//! TRANGE is the per-bar true range against the previous close. ATR
//! smooths it with Wilder's recurrence seeded by a plain average; NATR
//! normalizes ATR by the close and scales to percent.

use crate::error::Result;
use crate::kernels::dmi::true_range_bar;
use crate::settings::{Settings, UnstableFn};
use crate::traits::{
    validate_output_len, validate_period_range, validate_same_length, SeriesElement,
    ValidatedInput,
};
use crate::utils::fill_nan_prefix;

/// Returns the number of leading NaN values in TRANGE output.
#[inline]
#[must_use]
pub const fn trange_lookback() -> usize {
    1
}

/// Returns the number of leading NaN values in ATR and NATR output.
#[inline]
#[must_use]
pub const fn atr_lookback(period: usize) -> usize {
    period
}

/// Computes the true range into a caller-supplied buffer.
///
/// # Errors
///
/// - `Error::EmptyInput` if the inputs are empty
/// - `Error::InvalidInput` if the input lengths differ
/// - `Error::InsufficientData` if the inputs hold fewer than 2 bars
/// - `Error::BufferTooSmall` if `output.len() < close.len()`
pub fn trange_into<T: SeriesElement>(
    high: &[T],
    low: &[T],
    close: &[T],
    output: &mut [T],
) -> Result<()> {
    high.validate_not_empty()?;
    validate_same_length(&[high.len(), low.len(), close.len()], "trange")?;
    high.validate_min_length(2, "trange")?;
    validate_output_len(output.len(), close.len(), "trange")?;

    fill_nan_prefix(output, trange_lookback());
    for i in 1..close.len() {
        output[i] = true_range_bar(high[i], low[i], close[i - 1]);
    }
    Ok(())
}

/// Computes the true range.
///
/// # Errors
///
/// See [`trange_into`].
pub fn trange<T: SeriesElement>(high: &[T], low: &[T], close: &[T]) -> Result<Vec<T>> {
    let mut output = vec![T::zero(); close.len()];
    trange_into(high, low, close, &mut output)?;
    Ok(output)
}

fn validate_atr<T: SeriesElement>(
    high: &[T],
    low: &[T],
    close: &[T],
    period: usize,
    indicator: &'static str,
) -> Result<()> {
    validate_period_range(period, 1, 100_000)?;
    high.validate_not_empty()?;
    validate_same_length(&[high.len(), low.len(), close.len()], indicator)?;
    high.validate_min_length(period + 1, indicator)?;
    Ok(())
}

/// Wilder-smoothed true range, with an optional per-bar normalization.
fn atr_kernel<T: SeriesElement>(
    high: &[T],
    low: &[T],
    close: &[T],
    period: usize,
    normalize: bool,
    output: &mut [T],
) {
    let period_t = T::from_usize(period).unwrap_or_else(|_| T::one());

    let mut tr_sum = T::zero();
    for i in 1..=period {
        tr_sum = tr_sum + true_range_bar(high[i], low[i], close[i - 1]);
    }

    let write = |atr: T, bar_close: T| {
        if normalize {
            if bar_close.is_ta_zero() {
                T::zero()
            } else {
                atr / bar_close * T::hundred()
            }
        } else {
            atr
        }
    };

    let mut atr = tr_sum / period_t;
    output[period] = write(atr, close[period]);

    let decay = period_t - T::one();
    for i in (period + 1)..close.len() {
        let tr = true_range_bar(high[i], low[i], close[i - 1]);
        atr = ((atr * decay) + tr) / period_t;
        output[i] = write(atr, close[i]);
    }
}

/// Computes ATR into a caller-supplied buffer.
///
/// # Errors
///
/// - `Error::EmptyInput` if the inputs are empty
/// - `Error::InvalidInput` if the input lengths differ
/// - `Error::InvalidPeriod` if `period` is outside `1..=100_000`
/// - `Error::InsufficientData` if the inputs are shorter than
///   `period + 1`
/// - `Error::BufferTooSmall` if `output.len() < close.len()`
pub fn atr_into<T: SeriesElement>(
    high: &[T],
    low: &[T],
    close: &[T],
    period: usize,
    output: &mut [T],
) -> Result<()> {
    validate_atr(high, low, close, period, "atr")?;
    validate_output_len(output.len(), close.len(), "atr")?;

    fill_nan_prefix(output, atr_lookback(period));
    atr_kernel(high, low, close, period, false, output);
    Ok(())
}

/// Computes ATR.
///
/// # Errors
///
/// See [`atr_into`].
pub fn atr<T: SeriesElement>(
    high: &[T],
    low: &[T],
    close: &[T],
    period: usize,
) -> Result<Vec<T>> {
    let mut output = vec![T::zero(); close.len()];
    atr_into(high, low, close, period, &mut output)?;
    Ok(output)
}

/// Computes ATR and applies the configured unstable period.
///
/// # Errors
///
/// See [`atr_into`].
pub fn atr_with_settings<T: SeriesElement>(
    high: &[T],
    low: &[T],
    close: &[T],
    period: usize,
    settings: &Settings,
) -> Result<Vec<T>> {
    let mut output = atr(high, low, close, period)?;
    settings.mask_unstable(UnstableFn::Atr, &mut output);
    Ok(output)
}

/// Computes NATR into a caller-supplied buffer.
///
/// `100 * ATR / close`; a close below the degenerate threshold yields 0.
///
/// # Errors
///
/// See [`atr_into`].
pub fn natr_into<T: SeriesElement>(
    high: &[T],
    low: &[T],
    close: &[T],
    period: usize,
    output: &mut [T],
) -> Result<()> {
    validate_atr(high, low, close, period, "natr")?;
    validate_output_len(output.len(), close.len(), "natr")?;

    fill_nan_prefix(output, atr_lookback(period));
    atr_kernel(high, low, close, period, true, output);
    Ok(())
}

/// Computes NATR.
///
/// # Errors
///
/// See [`atr_into`].
pub fn natr<T: SeriesElement>(
    high: &[T],
    low: &[T],
    close: &[T],
    period: usize,
) -> Result<Vec<T>> {
    let mut output = vec![T::zero(); close.len()];
    natr_into(high, low, close, period, &mut output)?;
    Ok(output)
}

/// Computes NATR and applies the configured unstable period.
///
/// # Errors
///
/// See [`atr_into`].
pub fn natr_with_settings<T: SeriesElement>(
    high: &[T],
    low: &[T],
    close: &[T],
    period: usize,
    settings: &Settings,
) -> Result<Vec<T>> {
    let mut output = natr(high, low, close, period)?;
    settings.mask_unstable(UnstableFn::Natr, &mut output);
    Ok(output)
}
