//! Relative Strength Index (RSI).
//!
//! Wilder's RSI: average gain over average loss, smoothed with Wilder's
//! recursion and scaled to 0..100. When the combined average move is
//! smaller than the degenerate-denominator threshold the output is 0.

use crate::error::Result;
use crate::settings::{Compatibility, Settings, UnstableFn};
use crate::traits::{
    validate_output_len, validate_period_range, SeriesElement, ValidatedInput,
};

/// Returns the number of leading NaN values in RSI output.
#[inline]
#[must_use]
pub const fn rsi_lookback(period: usize) -> usize {
    period
}

/// Returns the minimum input length that produces at least one RSI value.
#[inline]
#[must_use]
pub const fn rsi_min_len(period: usize) -> usize {
    period + 1
}

fn validate<T: SeriesElement>(data: &[T], period: usize, output_len: usize) -> Result<()> {
    validate_period_range(period, 2, 100_000)?;
    data.validate_not_empty()?;
    data.validate_min_length(rsi_min_len(period), "rsi")?;
    validate_output_len(output_len, data.len(), "rsi")
}

fn rsi_kernel<T: SeriesElement>(data: &[T], period: usize, output: &mut [T]) {
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

    let denom = prev_gain + prev_loss;
    output[period] = if denom.abs() >= T::ta_epsilon() {
        T::hundred() * (prev_gain / denom)
    } else {
        T::zero()
    };

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

        let denom = prev_gain + prev_loss;
        output[i] = if denom.abs() >= T::ta_epsilon() {
            T::hundred() * (prev_gain / denom)
        } else {
            T::zero()
        };
    }
}

/// Computes RSI into a caller-supplied buffer.
///
/// # Errors
///
/// - `Error::EmptyInput` if `data` is empty
/// - `Error::InvalidPeriod` if `period` is outside `2..=100_000`
/// - `Error::InsufficientData` if `data.len() < rsi_min_len(period)`
/// - `Error::BufferTooSmall` if `output.len() < data.len()`
pub fn rsi_into<T: SeriesElement>(data: &[T], period: usize, output: &mut [T]) -> Result<()> {
    validate(data, period, output.len())?;
    crate::utils::fill_nan_prefix(output, rsi_lookback(period));
    rsi_kernel(data, period, output);
    Ok(())
}

/// Computes RSI, allocating the output.
///
/// # Errors
///
/// See [`rsi_into`].
pub fn rsi<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<T>> {
    let mut output = vec![T::zero(); data.len()];
    rsi_into(data, period, &mut output)?;
    Ok(output)
}

/// Writes the extra warm-up value Metastock emits one bar early.
///
/// The averages are seeded from the first `period` bars where the first
/// diff compares `data[0]` against itself.
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
    let avg_loss = prev_loss / period_t;
    let avg_gain = prev_gain / period_t;
    let denom = avg_gain + avg_loss;
    output[period - 1] = if denom.abs() >= T::ta_epsilon() {
        T::hundred() * (avg_gain / denom)
    } else {
        T::zero()
    };
}

/// Computes RSI under the given settings.
///
/// Metastock compatibility emits one extra value at `period - 1`, seeded
/// from the first `period` bars. The configured unstable period is then
/// masked off the front of the output.
///
/// # Errors
///
/// See [`rsi_into`].
pub fn rsi_with_settings<T: SeriesElement>(
    data: &[T],
    period: usize,
    settings: &Settings,
) -> Result<Vec<T>> {
    let mut output = rsi(data, period)?;
    if settings.compatibility == Compatibility::Metastock {
        metastock_first_value(data, period, &mut output);
    }
    settings.mask_unstable(UnstableFn::Rsi, &mut output);
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::utils::{approx_eq, count_nan_prefix, EPSILON};

    fn test_data() -> Vec<f64> {
        vec![
            44.34, 44.09, 44.15, 43.61, 44.33, 44.83, 45.10, 45.42, 45.84, 46.08, 45.89, 46.03,
            45.61, 46.28, 46.28, 46.00, 46.03, 46.41, 46.22, 45.64, 46.21, 46.25, 45.71, 46.45,
            45.78, 45.35, 44.03, 44.18, 44.22, 44.57, 43.42, 42.66, 43.13,
        ]
    }

    #[test]
    fn test_rsi_lookback() {
        assert_eq!(rsi_lookback(14), 14);
        assert_eq!(rsi_min_len(14), 15);
    }

    #[test]
    fn test_rsi_nan_prefix_and_range() {
        let data = test_data();
        let result = rsi(&data, 14).unwrap();
        assert_eq!(result.len(), data.len());
        assert_eq!(count_nan_prefix(&result), 14);
        for i in 14..data.len() {
            assert!(result[i] >= 0.0 && result[i] <= 100.0);
        }
    }

    #[test]
    fn test_rsi_wilder_reference_value() {
        // Wilder's worked example: first RSI over 14 bars of this series
        let data = test_data();
        let result = rsi(&data, 14).unwrap();
        assert!(approx_eq(result[14], 70.464_135_021_097_05, 1e-9));
    }

    #[test]
    fn test_rsi_all_gains_is_100() {
        let data: Vec<f64> = (0..20).map(|i| 100.0 + f64::from(i)).collect();
        let result = rsi(&data, 14).unwrap();
        for i in 14..data.len() {
            assert!(approx_eq(result[i], 100.0, EPSILON));
        }
    }

    #[test]
    fn test_rsi_constant_series_is_zero() {
        // No gains and no losses: degenerate denominator maps to 0
        let data = vec![50.0; 20];
        let result = rsi(&data, 14).unwrap();
        for i in 14..data.len() {
            assert!(approx_eq(result[i], 0.0, EPSILON));
        }
    }

    #[test]
    fn test_rsi_invalid_period() {
        let data = test_data();
        assert!(matches!(
            rsi(&data, 1).unwrap_err(),
            Error::InvalidPeriod { .. }
        ));
    }

    #[test]
    fn test_rsi_insufficient_data() {
        let data = vec![1.0; 14];
        assert!(matches!(
            rsi(&data, 14).unwrap_err(),
            Error::InsufficientData { .. }
        ));
    }

    #[test]
    fn test_rsi_metastock_adds_one_early_value() {
        let data = test_data();
        let settings = Settings {
            compatibility: Compatibility::Metastock,
            ..Settings::default()
        };
        let classic = rsi(&data, 14).unwrap();
        let metastock = rsi_with_settings(&data, 14, &settings).unwrap();
        assert!(classic[13].is_nan());
        assert!(metastock[13].is_finite());
        for i in 14..data.len() {
            assert!(approx_eq(metastock[i], classic[i], EPSILON));
        }
    }

    #[test]
    fn test_rsi_unstable_period_masks_front() {
        let data = test_data();
        let mut settings = Settings::default();
        settings.unstable.set(UnstableFn::Rsi, 5);
        let result = rsi_with_settings(&data, 14, &settings).unwrap();
        assert_eq!(count_nan_prefix(&result), 19);
    }
}
