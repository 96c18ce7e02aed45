//! Exponential Moving Average (EMA).
//!
//! Recursively weighted average with smoothing constant `k = 2/(period+1)`.
//! The classic seed is the SMA of the first `period` values; the Metastock
//! seed starts from the first data point and runs the recurrence through
//! the warm-up span, emitting its first output at the same index.
//!
//! # Formula
//!
//! ```text
//! EMA[i] = (data[i] - EMA[i-1]) * k + EMA[i-1],  k = 2 / (period + 1)
//! ```
//!
//! # Lookback
//!
//! `period - 1` under both seeding conventions.

use crate::error::Result;
use crate::settings::{Compatibility, Settings, UnstableFn};
use crate::traits::{validate_output_len, validate_period_range, SeriesElement, ValidatedInput};

/// Returns the number of leading NaN values in EMA output.
#[inline]
#[must_use]
pub const fn ema_lookback(period: usize) -> usize {
    period.saturating_sub(1)
}

/// Returns the minimum input length that produces at least one EMA value.
#[inline]
#[must_use]
pub const fn ema_min_len(period: usize) -> usize {
    period
}

fn validate<T: SeriesElement>(data: &[T], period: usize, output_len: usize) -> Result<()> {
    validate_period_range(period, 2, 100_000)?;
    data.validate_not_empty()?;
    data.validate_min_length(ema_min_len(period), "ema")?;
    validate_output_len(output_len, data.len(), "ema")?;
    Ok(())
}

/// Computes the EMA with the classic SMA seed into a caller-supplied buffer.
///
/// # Errors
///
/// - `Error::InvalidPeriod` if `period` is outside `2..=100_000`
/// - `Error::EmptyInput` if `data` is empty
/// - `Error::InsufficientData` if `data.len() < ema_min_len(period)`
/// - `Error::BufferTooSmall` if `output.len() < data.len()`
pub fn ema_into<T: SeriesElement>(data: &[T], period: usize, output: &mut [T]) -> Result<()> {
    validate(data, period, output.len())?;

    let period_t = T::from_usize(period)?;
    let k = T::two() / (period_t + T::one());

    let lookback = ema_lookback(period);
    crate::utils::fill_nan_prefix(output, lookback);

    let mut seed = T::zero();
    for &value in &data[..period] {
        seed = seed + value;
    }
    let mut prev = seed / period_t;
    output[lookback] = prev;

    for i in period..data.len() {
        prev = ((data[i] - prev) * k) + prev;
        output[i] = prev;
    }
    Ok(())
}

/// Computes the EMA with the Metastock seed into a caller-supplied buffer.
///
/// The recurrence starts from `data[0]` and is iterated through the warm-up
/// span; the first emitted output index is unchanged.
///
/// # Errors
///
/// Same conditions as [`ema_into`].
pub fn ema_metastock_into<T: SeriesElement>(
    data: &[T],
    period: usize,
    output: &mut [T],
) -> Result<()> {
    validate(data, period, output.len())?;

    let period_t = T::from_usize(period)?;
    let k = T::two() / (period_t + T::one());

    let lookback = ema_lookback(period);
    crate::utils::fill_nan_prefix(output, lookback);

    let mut prev = data[0];
    for &value in &data[1..=lookback] {
        prev = ((value - prev) * k) + prev;
    }
    output[lookback] = prev;

    for i in period..data.len() {
        prev = ((data[i] - prev) * k) + prev;
        output[i] = prev;
    }
    Ok(())
}

/// Computes the EMA with the classic SMA seed.
///
/// # Errors
///
/// See [`ema_into`].
pub fn ema<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<T>> {
    let mut output = vec![T::zero(); data.len()];
    ema_into(data, period, &mut output)?;
    Ok(output)
}

/// Computes the EMA honoring a [`Settings`] value: the Metastock seed when
/// configured, and the unstable-period mask for `UnstableFn::Ema`.
///
/// # Errors
///
/// See [`ema_into`].
pub fn ema_with_settings<T: SeriesElement>(
    data: &[T],
    period: usize,
    settings: &Settings,
) -> Result<Vec<T>> {
    let mut output = vec![T::zero(); data.len()];
    match settings.compatibility {
        Compatibility::Classic => ema_into(data, period, &mut output)?,
        Compatibility::Metastock => ema_metastock_into(data, period, &mut output)?,
    }
    settings.mask_unstable(UnstableFn::Ema, &mut output);
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::utils::{approx_eq, count_nan_prefix, EPSILON};

    #[test]
    fn test_ema_reference_values() {
        let data = vec![1.0_f64, 2.0, 3.0, 4.0, 5.0];
        let result = ema(&data, 3).unwrap();
        assert_eq!(count_nan_prefix(&result), 2);
        // Seed = SMA(1,2,3) = 2; k = 0.5
        assert!(approx_eq(result[2], 2.0, EPSILON));
        assert!(approx_eq(result[3], 3.0, EPSILON));
        assert!(approx_eq(result[4], 4.0, EPSILON));
    }

    #[test]
    fn test_ema_constant_series() {
        let data = vec![5.0_f64; 8];
        let result = ema(&data, 4).unwrap();
        for &v in &result[3..] {
            assert!(approx_eq(v, 5.0, EPSILON));
        }
    }

    #[test]
    fn test_ema_lookback_matches_nan_prefix() {
        let data: Vec<f64> = (1..=30).map(f64::from).collect();
        for period in [2, 5, 14, 30] {
            let result = ema(&data, period).unwrap();
            assert_eq!(count_nan_prefix(&result), ema_lookback(period));
        }
    }

    #[test]
    fn test_ema_metastock_seed_differs() {
        let data = vec![10.0_f64, 2.0, 8.0, 4.0, 6.0, 5.0];
        let classic = ema(&data, 3).unwrap();
        let mut metastock = vec![0.0; data.len()];
        ema_metastock_into(&data, 3, &mut metastock).unwrap();

        // Same lookback, different seed
        assert_eq!(count_nan_prefix(&metastock), 2);
        assert!(!approx_eq(classic[2], metastock[2], EPSILON));

        // Metastock seed: prev = 10, then two recurrence steps
        let k = 0.5;
        let mut prev = 10.0;
        prev = (2.0 - prev) * k + prev;
        prev = (8.0 - prev) * k + prev;
        assert!(approx_eq(metastock[2], prev, EPSILON));
    }

    #[test]
    fn test_ema_with_settings_classic_matches_plain() {
        let data = vec![3.0_f64, 1.0, 4.0, 1.0, 5.0, 9.0];
        let plain = ema(&data, 3).unwrap();
        let settings = Settings::new();
        let with = ema_with_settings(&data, 3, &settings).unwrap();
        for i in 0..data.len() {
            assert!(approx_eq(plain[i], with[i], EPSILON));
        }
    }

    #[test]
    fn test_ema_with_settings_unstable_mask() {
        let data: Vec<f64> = (1..=10).map(f64::from).collect();
        let mut settings = Settings::new();
        settings.unstable.set(UnstableFn::Ema, 3);
        let result = ema_with_settings(&data, 3, &settings).unwrap();
        assert_eq!(count_nan_prefix(&result), 2 + 3);
        assert!(!result[5].is_nan());
    }

    #[test]
    fn test_ema_validation() {
        let data = vec![1.0_f64, 2.0, 3.0];
        assert!(matches!(
            ema(&data, 1).unwrap_err(),
            Error::InvalidPeriod { .. }
        ));
        assert!(matches!(
            ema(&data[..2], 3).unwrap_err(),
            Error::InsufficientData { .. }
        ));
        let empty: Vec<f64> = vec![];
        assert!(matches!(ema(&empty, 3).unwrap_err(), Error::EmptyInput));
    }

    #[test]
    fn test_ema_into_buffer_too_small() {
        let data = vec![1.0_f64, 2.0, 3.0, 4.0];
        let mut output = vec![0.0; 3];
        assert!(matches!(
            ema_into(&data, 3, &mut output),
            Err(Error::BufferTooSmall { .. })
        ));
    }
}
