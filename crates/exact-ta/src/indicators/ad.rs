//! Chaikin Accumulation/Distribution (AD, ADOSC).
//!
//! The A/D line accumulates volume weighted by where the close sits in
//! the bar's range. ADOSC takes the spread of a fast and a slow EMA of
//! that line, both seeded from the first A/D value.

use crate::error::Result;
use crate::traits::{
    validate_output_len, validate_period_range, validate_same_length, SeriesElement,
    ValidatedInput,
};
use crate::utils::fill_nan_prefix;

/// Returns the number of leading NaN values in ADOSC output.
#[inline]
#[must_use]
pub const fn adosc_lookback(fast_period: usize, slow_period: usize) -> usize {
    let slowest = if fast_period < slow_period {
        slow_period
    } else {
        fast_period
    };
    slowest - 1
}

/// One bar's money-flow contribution. Zero when the bar has no range.
#[inline]
fn ad_step<T: SeriesElement>(high: T, low: T, close: T, volume: T) -> T {
    let range = high - low;
    if range > T::zero() {
        (((close - low) - (high - close)) / range) * volume
    } else {
        T::zero()
    }
}

/// Computes the A/D line into a caller-supplied buffer.
///
/// # Errors
///
/// - `Error::EmptyInput` if the inputs are empty
/// - `Error::InvalidInput` if the input lengths differ
/// - `Error::BufferTooSmall` if `output.len() < close.len()`
pub fn ad_into<T: SeriesElement>(
    high: &[T],
    low: &[T],
    close: &[T],
    volume: &[T],
    output: &mut [T],
) -> Result<()> {
    high.validate_not_empty()?;
    validate_same_length(&[high.len(), low.len(), close.len(), volume.len()], "ad")?;
    validate_output_len(output.len(), close.len(), "ad")?;

    let mut ad = T::zero();
    for i in 0..close.len() {
        ad = ad + ad_step(high[i], low[i], close[i], volume[i]);
        output[i] = ad;
    }
    Ok(())
}

/// Computes the A/D line.
///
/// # Errors
///
/// See [`ad_into`].
pub fn ad<T: SeriesElement>(
    high: &[T],
    low: &[T],
    close: &[T],
    volume: &[T],
) -> Result<Vec<T>> {
    let mut output = vec![T::zero(); close.len()];
    ad_into(high, low, close, volume, &mut output)?;
    Ok(output)
}

/// Computes the Chaikin A/D oscillator into a caller-supplied buffer.
///
/// Both EMAs run over the cumulative A/D line, seeded with its first
/// value; the fast and slow periods are used as given without swapping.
///
/// # Errors
///
/// - `Error::EmptyInput` if the inputs are empty
/// - `Error::InvalidInput` if the input lengths differ
/// - `Error::InvalidPeriod` if either period is outside `2..=100_000`
/// - `Error::InsufficientData` if the inputs are shorter than the
///   slowest period
/// - `Error::BufferTooSmall` if `output.len() < close.len()`
pub fn adosc_into<T: SeriesElement>(
    high: &[T],
    low: &[T],
    close: &[T],
    volume: &[T],
    fast_period: usize,
    slow_period: usize,
    output: &mut [T],
) -> Result<()> {
    validate_period_range(fast_period, 2, 100_000)?;
    validate_period_range(slow_period, 2, 100_000)?;
    high.validate_not_empty()?;
    validate_same_length(
        &[high.len(), low.len(), close.len(), volume.len()],
        "adosc",
    )?;
    let lookback = adosc_lookback(fast_period, slow_period);
    high.validate_min_length(lookback + 1, "adosc")?;
    validate_output_len(output.len(), close.len(), "adosc")?;

    let fast_k = T::two() / (T::from_usize(fast_period)? + T::one());
    let slow_k = T::two() / (T::from_usize(slow_period)? + T::one());
    let one_minus_fast = T::one() - fast_k;
    let one_minus_slow = T::one() - slow_k;

    fill_nan_prefix(output, lookback);

    let mut ad = ad_step(high[0], low[0], close[0], volume[0]);
    let mut fast_ema = ad;
    let mut slow_ema = ad;

    for today in 1..=lookback {
        ad = ad + ad_step(high[today], low[today], close[today], volume[today]);
        fast_ema = (fast_k * ad) + (one_minus_fast * fast_ema);
        slow_ema = (slow_k * ad) + (one_minus_slow * slow_ema);
        if today == lookback {
            output[today] = fast_ema - slow_ema;
        }
    }

    for today in (lookback + 1)..close.len() {
        ad = ad + ad_step(high[today], low[today], close[today], volume[today]);
        fast_ema = (fast_k * ad) + (one_minus_fast * fast_ema);
        slow_ema = (slow_k * ad) + (one_minus_slow * slow_ema);
        output[today] = fast_ema - slow_ema;
    }
    Ok(())
}

/// Computes the Chaikin A/D oscillator.
///
/// # Errors
///
/// See [`adosc_into`].
pub fn adosc<T: SeriesElement>(
    high: &[T],
    low: &[T],
    close: &[T],
    volume: &[T],
    fast_period: usize,
    slow_period: usize,
) -> Result<Vec<T>> {
    let mut output = vec![T::zero(); close.len()];
    adosc_into(high, low, close, volume, fast_period, slow_period, &mut output)?;
    Ok(output)
}

/// Computes ADOSC with the conventional 3/10 periods.
///
/// # Errors
///
/// See [`adosc_into`].
pub fn adosc_default<T: SeriesElement>(
    high: &[T],
    low: &[T],
    close: &[T],
    volume: &[T],
) -> Result<Vec<T>> {
    adosc(high, low, close, volume, 3, 10)
}
