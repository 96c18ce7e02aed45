//! Weighted Moving Average (WMA).
//!
//! Linearly weighted mean where the newest bar carries weight `period` and
//! the oldest carries weight 1. Computed incrementally with the reference
//! `period_sub`/`period_sum` scheme rather than re-weighting the window
//! each step; the update order inside the loop is load-bearing.
//!
//! # Formula
//!
//! ```text
//! WMA[i] = (1*data[i-p+1] + 2*data[i-p+2] + ... + p*data[i]) / (p*(p+1)/2)
//! ```
//!
//! # Lookback
//!
//! `period - 1`.

use crate::error::Result;
use crate::traits::{validate_output_len, validate_period_range, SeriesElement, ValidatedInput};

/// Returns the number of leading NaN values in WMA output.
#[inline]
#[must_use]
pub const fn wma_lookback(period: usize) -> usize {
    period.saturating_sub(1)
}

/// Returns the minimum input length that produces at least one WMA value.
#[inline]
#[must_use]
pub const fn wma_min_len(period: usize) -> usize {
    period
}

/// Computes the Weighted Moving Average into a caller-supplied buffer.
///
/// # Errors
///
/// - `Error::InvalidPeriod` if `period` is outside `2..=100_000`
/// - `Error::EmptyInput` if `data` is empty
/// - `Error::InsufficientData` if `data.len() < wma_min_len(period)`
/// - `Error::BufferTooSmall` if `output.len() < data.len()`
pub fn wma_into<T: SeriesElement>(data: &[T], period: usize, output: &mut [T]) -> Result<()> {
    validate_period_range(period, 2, 100_000)?;
    data.validate_not_empty()?;
    data.validate_min_length(wma_min_len(period), "wma")?;
    validate_output_len(output.len(), data.len(), "wma")?;

    let period_t = T::from_usize(period)?;
    let divider = (period_t * (period_t + T::one())) / T::two();

    let lookback = wma_lookback(period);
    crate::utils::fill_nan_prefix(output, lookback);

    // Prime the running weighted sum over all but the last warm-up bar.
    let mut period_sum = T::zero();
    let mut period_sub = T::zero();
    let mut weight = T::one();
    let mut in_idx = 0;
    while in_idx < lookback {
        let temp = data[in_idx];
        in_idx += 1;
        period_sub = period_sub + temp;
        period_sum = period_sum + temp * weight;
        weight = weight + T::one();
    }

    let mut trailing_idx = 0;
    let mut trailing_value = T::zero();
    while in_idx < data.len() {
        let temp = data[in_idx];
        in_idx += 1;

        period_sub = period_sub + temp;
        period_sub = period_sub - trailing_value;
        period_sum = period_sum + temp * period_t;

        trailing_value = data[trailing_idx];
        trailing_idx += 1;

        output[in_idx - 1] = period_sum / divider;
        period_sum = period_sum - period_sub;
    }

    Ok(())
}

/// Computes the Weighted Moving Average.
///
/// # Errors
///
/// See [`wma_into`].
pub fn wma<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<T>> {
    let mut output = vec![T::zero(); data.len()];
    wma_into(data, period, &mut output)?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::utils::{approx_eq, count_nan_prefix, EPSILON};

    #[test]
    fn test_wma_reference_values() {
        let data = vec![1.0_f64, 2.0, 3.0, 4.0, 5.0];
        let result = wma(&data, 3).unwrap();
        assert_eq!(count_nan_prefix(&result), 2);
        // (1*1 + 2*2 + 3*3) / 6
        assert!(approx_eq(result[2], 14.0 / 6.0, EPSILON));
        // (1*2 + 2*3 + 3*4) / 6
        assert!(approx_eq(result[3], 20.0 / 6.0, EPSILON));
        // (1*3 + 2*4 + 3*5) / 6
        assert!(approx_eq(result[4], 26.0 / 6.0, EPSILON));
    }

    #[test]
    fn test_wma_matches_naive_weighting() {
        let data = vec![3.5_f64, 1.25, 4.75, 2.0, 5.5, 9.25, 0.5, 6.0];
        let period = 4;
        let result = wma(&data, period).unwrap();
        let divider = (period * (period + 1)) as f64 / 2.0;
        for today in (period - 1)..data.len() {
            let mut acc = 0.0;
            for (w, i) in ((today + 1 - period)..=today).enumerate() {
                acc += data[i] * (w + 1) as f64;
            }
            assert!(approx_eq(result[today], acc / divider, EPSILON));
        }
    }

    #[test]
    fn test_wma_constant_series() {
        let data = vec![2.5_f64; 6];
        let result = wma(&data, 4).unwrap();
        for &v in &result[3..] {
            assert!(approx_eq(v, 2.5, EPSILON));
        }
    }

    #[test]
    fn test_wma_lookback_matches_nan_prefix() {
        let data: Vec<f64> = (1..=15).map(f64::from).collect();
        for period in [2, 5, 15] {
            let result = wma(&data, period).unwrap();
            assert_eq!(count_nan_prefix(&result), wma_lookback(period));
        }
    }

    #[test]
    fn test_wma_validation() {
        let data = vec![1.0_f64, 2.0];
        assert!(matches!(
            wma(&data, 1).unwrap_err(),
            Error::InvalidPeriod { .. }
        ));
        assert!(matches!(
            wma(&data, 3).unwrap_err(),
            Error::InsufficientData { .. }
        ));
    }
}
