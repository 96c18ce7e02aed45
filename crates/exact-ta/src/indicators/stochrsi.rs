//! Stochastic RSI (STOCHRSI).
//!
//! Applies the fast stochastic oscillator to an RSI series instead of
//! price, producing an 0..100 reading of where RSI sits inside its own
//! recent range.

use crate::error::Result;
use crate::indicators::ma::{ma, ma_lookback, MaType};
use crate::indicators::rsi::{rsi, rsi_lookback};
use crate::indicators::stochastic::stoch_k_kernel;
use crate::kernels::rolling_extrema::{rolling_max_into, rolling_min_into};
use crate::traits::{validate_output_len, validate_period, SeriesElement, ValidatedInput};
use crate::utils::fill_nan_prefix;

/// Stochastic RSI output.
#[derive(Debug, Clone, PartialEq)]
pub struct StochRsiOutput<T> {
    /// Raw %K of the RSI series over `fastk_period`.
    pub fastk: Vec<T>,
    /// %K smoothed over `fastd_period`.
    pub fastd: Vec<T>,
}

/// Returns the number of leading NaN values in STOCHRSI output.
#[inline]
#[must_use]
pub const fn stochrsi_lookback(
    timeperiod: usize,
    fastk_period: usize,
    fastd_period: usize,
    fastd_ma_type: MaType,
) -> usize {
    rsi_lookback(timeperiod) + (fastk_period - 1) + ma_lookback(fastd_period, fastd_ma_type)
}

/// Computes the stochastic RSI into caller-supplied buffers.
///
/// RSI over `timeperiod` feeds a fast stochastic with `fastk_period`
/// and a `fastd_ma_type` smoothing of `fastd_period`.
///
/// # Errors
///
/// - `Error::EmptyInput` if `data` is empty
/// - `Error::InvalidPeriod` if `timeperiod` is outside `2..=100_000` or
///   either stochastic period is zero
/// - `Error::InsufficientData` if `data` is shorter than the combined
///   minimum length
/// - `Error::BufferTooSmall` if either output is shorter than `data`
pub fn stochrsi_into<T: SeriesElement>(
    data: &[T],
    timeperiod: usize,
    fastk_period: usize,
    fastd_period: usize,
    fastd_ma_type: MaType,
    fastk: &mut [T],
    fastd: &mut [T],
) -> Result<()> {
    validate_period(fastk_period)?;
    validate_period(fastd_period)?;
    let lookback = stochrsi_lookback(timeperiod, fastk_period, fastd_period, fastd_ma_type);
    data.validate_not_empty()?;
    data.validate_min_length(lookback + 1, "stochrsi")?;
    validate_output_len(fastk.len(), data.len(), "stochrsi")?;
    validate_output_len(fastd.len(), data.len(), "stochrsi")?;

    let len = data.len();
    let rsi_full = rsi(data, timeperiod)?;
    let rsi_valid = &rsi_full[rsi_lookback(timeperiod)..];

    let fastk_lookback = fastk_period - 1;
    let mut highest = vec![T::zero(); rsi_valid.len()];
    let mut lowest = vec![T::zero(); rsi_valid.len()];
    rolling_max_into(rsi_valid, fastk_period, &mut highest)?;
    rolling_min_into(rsi_valid, fastk_period, &mut lowest)?;

    let mut raw_k = vec![T::nan(); rsi_valid.len()];
    stoch_k_kernel(rsi_valid, &highest, &lowest, &mut raw_k);

    let fastd_full = ma(&raw_k[fastk_lookback..], fastd_period, fastd_ma_type)?;
    let fastd_lookback = ma_lookback(fastd_period, fastd_ma_type);
    let fastd_valid = &fastd_full[fastd_lookback..];

    fill_nan_prefix(fastk, lookback);
    fill_nan_prefix(fastd, lookback);
    fastk[lookback..len].copy_from_slice(&raw_k[fastk_lookback + fastd_lookback..]);
    fastd[lookback..len].copy_from_slice(fastd_valid);
    Ok(())
}

/// Computes the stochastic RSI.
///
/// # Errors
///
/// See [`stochrsi_into`].
pub fn stochrsi<T: SeriesElement>(
    data: &[T],
    timeperiod: usize,
    fastk_period: usize,
    fastd_period: usize,
    fastd_ma_type: MaType,
) -> Result<StochRsiOutput<T>> {
    let mut fastk = vec![T::zero(); data.len()];
    let mut fastd = vec![T::zero(); data.len()];
    stochrsi_into(
        data,
        timeperiod,
        fastk_period,
        fastd_period,
        fastd_ma_type,
        &mut fastk,
        &mut fastd,
    )?;
    Ok(StochRsiOutput { fastk, fastd })
}

/// Computes the stochastic RSI with the conventional 14/5/3 SMA setup.
///
/// # Errors
///
/// See [`stochrsi_into`].
pub fn stochrsi_default<T: SeriesElement>(data: &[T]) -> Result<StochRsiOutput<T>> {
    stochrsi(data, 14, 5, 3, MaType::Sma)
}
