//! Stochastic oscillator (STOCH, STOCHF).
//!
//! Raw %K measures where the close sits inside the rolling high/low
//! range. STOCH smooths %K twice (slow %K and slow %D) with selectable
//! moving-average types; STOCHF smooths it once (fast %D).

use crate::error::Result;
use crate::indicators::ma::{ma, ma_lookback, MaType};
use crate::kernels::rolling_extrema::{rolling_max_into, rolling_min_into};
use crate::traits::{
    validate_output_len, validate_period, validate_same_length, SeriesElement, ValidatedInput,
};
use crate::utils::fill_nan_prefix;

/// Slow stochastic output.
#[derive(Debug, Clone, PartialEq)]
pub struct StochOutput<T> {
    /// Slow %K: raw %K smoothed over `slowk_period`.
    pub slowk: Vec<T>,
    /// Slow %D: slow %K smoothed over `slowd_period`.
    pub slowd: Vec<T>,
}

/// Fast stochastic output.
#[derive(Debug, Clone, PartialEq)]
pub struct StochfOutput<T> {
    /// Raw %K over `fastk_period`.
    pub fastk: Vec<T>,
    /// Fast %D: raw %K smoothed over `fastd_period`.
    pub fastd: Vec<T>,
}

/// Returns the number of leading NaN values in STOCH output.
#[inline]
#[must_use]
pub const fn stoch_lookback(
    fastk_period: usize,
    slowk_period: usize,
    slowk_ma_type: MaType,
    slowd_period: usize,
    slowd_ma_type: MaType,
) -> usize {
    (fastk_period - 1)
        + ma_lookback(slowk_period, slowk_ma_type)
        + ma_lookback(slowd_period, slowd_ma_type)
}

/// Returns the number of leading NaN values in STOCHF output.
#[inline]
#[must_use]
pub const fn stochf_lookback(
    fastk_period: usize,
    fastd_period: usize,
    fastd_ma_type: MaType,
) -> usize {
    (fastk_period - 1) + ma_lookback(fastd_period, fastd_ma_type)
}

/// Raw %K: 100 * (close - lowest_low) / (highest_high - lowest_low).
///
/// Bars where either extremum is still NaN are skipped; a degenerate
/// range (|high - low| below epsilon) produces 0 rather than a division
/// blow-up.
pub(crate) fn stoch_k_kernel<T: SeriesElement>(
    close: &[T],
    highest: &[T],
    lowest: &[T],
    output: &mut [T],
) {
    for i in 0..close.len() {
        if highest[i].is_nan() || lowest[i].is_nan() {
            continue;
        }
        let denom = highest[i] - lowest[i];
        output[i] = if denom.abs() < T::ta_epsilon() {
            T::zero()
        } else {
            T::hundred() * (close[i] - lowest[i]) / denom
        };
    }
}

fn validate_stoch_inputs<T: SeriesElement>(
    high: &[T],
    low: &[T],
    close: &[T],
    fastk_period: usize,
    min_len: usize,
    indicator: &'static str,
) -> Result<()> {
    validate_period(fastk_period)?;
    high.validate_not_empty()?;
    validate_same_length(&[high.len(), low.len(), close.len()], indicator)?;
    high.validate_min_length(min_len, indicator)?;
    Ok(())
}

/// Computes the slow stochastic oscillator into caller-supplied buffers.
///
/// Raw %K over `fastk_period` is smoothed by a `slowk_ma_type` average
/// of `slowk_period` to form slow %K, which is smoothed again by a
/// `slowd_ma_type` average of `slowd_period` to form slow %D.
///
/// # Errors
///
/// - `Error::EmptyInput` if the inputs are empty
/// - `Error::InvalidInput` if the input lengths differ
/// - `Error::InvalidPeriod` if any period is zero
/// - `Error::InsufficientData` if the inputs are shorter than the
///   combined minimum length
/// - `Error::BufferTooSmall` if either output is shorter than the input
#[allow(clippy::too_many_arguments)]
pub fn stoch_into<T: SeriesElement>(
    high: &[T],
    low: &[T],
    close: &[T],
    fastk_period: usize,
    slowk_period: usize,
    slowk_ma_type: MaType,
    slowd_period: usize,
    slowd_ma_type: MaType,
    slowk: &mut [T],
    slowd: &mut [T],
) -> Result<()> {
    let lookback = stoch_lookback(
        fastk_period,
        slowk_period,
        slowk_ma_type,
        slowd_period,
        slowd_ma_type,
    );
    validate_stoch_inputs(high, low, close, fastk_period, lookback + 1, "stoch")?;
    validate_period(slowk_period)?;
    validate_period(slowd_period)?;
    validate_output_len(slowk.len(), close.len(), "stoch")?;
    validate_output_len(slowd.len(), close.len(), "stoch")?;

    let len = close.len();
    let fastk_lookback = fastk_period - 1;

    let mut highest = vec![T::zero(); len];
    let mut lowest = vec![T::zero(); len];
    rolling_max_into(high, fastk_period, &mut highest)?;
    rolling_min_into(low, fastk_period, &mut lowest)?;

    let mut fastk = vec![T::nan(); len];
    stoch_k_kernel(close, &highest, &lowest, &mut fastk);

    let slowk_full = ma(&fastk[fastk_lookback..], slowk_period, slowk_ma_type)?;
    let slowk_lookback = ma_lookback(slowk_period, slowk_ma_type);
    let slowk_valid = &slowk_full[slowk_lookback..];

    let slowd_full = ma(slowk_valid, slowd_period, slowd_ma_type)?;
    let slowd_lookback = ma_lookback(slowd_period, slowd_ma_type);
    let slowd_valid = &slowd_full[slowd_lookback..];

    fill_nan_prefix(slowk, lookback);
    fill_nan_prefix(slowd, lookback);
    slowk[lookback..len].copy_from_slice(&slowk_valid[slowd_lookback..]);
    slowd[lookback..len].copy_from_slice(slowd_valid);
    Ok(())
}

/// Computes the slow stochastic oscillator.
///
/// # Errors
///
/// See [`stoch_into`].
#[allow(clippy::too_many_arguments)]
pub fn stoch<T: SeriesElement>(
    high: &[T],
    low: &[T],
    close: &[T],
    fastk_period: usize,
    slowk_period: usize,
    slowk_ma_type: MaType,
    slowd_period: usize,
    slowd_ma_type: MaType,
) -> Result<StochOutput<T>> {
    let mut slowk = vec![T::zero(); close.len()];
    let mut slowd = vec![T::zero(); close.len()];
    stoch_into(
        high,
        low,
        close,
        fastk_period,
        slowk_period,
        slowk_ma_type,
        slowd_period,
        slowd_ma_type,
        &mut slowk,
        &mut slowd,
    )?;
    Ok(StochOutput { slowk, slowd })
}

/// Computes the slow stochastic with the conventional 5/3/3 SMA setup.
///
/// # Errors
///
/// See [`stoch_into`].
pub fn stoch_default<T: SeriesElement>(
    high: &[T],
    low: &[T],
    close: &[T],
) -> Result<StochOutput<T>> {
    stoch(high, low, close, 5, 3, MaType::Sma, 3, MaType::Sma)
}

/// Computes the fast stochastic oscillator into caller-supplied buffers.
///
/// # Errors
///
/// See [`stoch_into`].
#[allow(clippy::too_many_arguments)]
pub fn stochf_into<T: SeriesElement>(
    high: &[T],
    low: &[T],
    close: &[T],
    fastk_period: usize,
    fastd_period: usize,
    fastd_ma_type: MaType,
    fastk: &mut [T],
    fastd: &mut [T],
) -> Result<()> {
    let lookback = stochf_lookback(fastk_period, fastd_period, fastd_ma_type);
    validate_stoch_inputs(high, low, close, fastk_period, lookback + 1, "stochf")?;
    validate_period(fastd_period)?;
    validate_output_len(fastk.len(), close.len(), "stochf")?;
    validate_output_len(fastd.len(), close.len(), "stochf")?;

    let len = close.len();
    let fastk_lookback = fastk_period - 1;

    let mut highest = vec![T::zero(); len];
    let mut lowest = vec![T::zero(); len];
    rolling_max_into(high, fastk_period, &mut highest)?;
    rolling_min_into(low, fastk_period, &mut lowest)?;

    let mut raw_k = vec![T::nan(); len];
    stoch_k_kernel(close, &highest, &lowest, &mut raw_k);

    let fastd_full = ma(&raw_k[fastk_lookback..], fastd_period, fastd_ma_type)?;
    let fastd_lookback = ma_lookback(fastd_period, fastd_ma_type);
    let fastd_valid = &fastd_full[fastd_lookback..];

    fill_nan_prefix(fastk, lookback);
    fill_nan_prefix(fastd, lookback);
    fastk[lookback..len].copy_from_slice(&raw_k[lookback..]);
    fastd[lookback..len].copy_from_slice(fastd_valid);
    Ok(())
}

/// Computes the fast stochastic oscillator.
///
/// # Errors
///
/// See [`stoch_into`].
pub fn stochf<T: SeriesElement>(
    high: &[T],
    low: &[T],
    close: &[T],
    fastk_period: usize,
    fastd_period: usize,
    fastd_ma_type: MaType,
) -> Result<StochfOutput<T>> {
    let mut fastk = vec![T::zero(); close.len()];
    let mut fastd = vec![T::zero(); close.len()];
    stochf_into(
        high,
        low,
        close,
        fastk_period,
        fastd_period,
        fastd_ma_type,
        &mut fastk,
        &mut fastd,
    )?;
    Ok(StochfOutput { fastk, fastd })
}

/// Computes the fast stochastic with the conventional 5/3 SMA setup.
///
/// # Errors
///
/// See [`stoch_into`].
pub fn stochf_default<T: SeriesElement>(
    high: &[T],
    low: &[T],
    close: &[T],
) -> Result<StochfOutput<T>> {
    stochf(high, low, close, 5, 3, MaType::Sma)
}
