//! Simple Moving Average (SMA).
//!
//! The arithmetic mean over a rolling window, computed with the reference
//! trailing-accumulator order (add newest, snapshot, subtract oldest,
//! divide the snapshot).
//!
//! # Formula
//!
//! ```text
//! SMA[i] = (data[i-period+1] + ... + data[i]) / period
//! ```
//!
//! # Lookback
//!
//! `period - 1`. The first `period - 1` output values are NaN.

use crate::error::Result;
use crate::kernels::running_sum::windowed_mean_into;
use crate::traits::{validate_output_len, validate_period_range, SeriesElement, ValidatedInput};

/// Returns the number of leading NaN values in SMA output.
#[inline]
#[must_use]
pub const fn sma_lookback(period: usize) -> usize {
    period.saturating_sub(1)
}

/// Returns the minimum input length that produces at least one SMA value.
#[inline]
#[must_use]
pub const fn sma_min_len(period: usize) -> usize {
    period
}

/// Computes the Simple Moving Average into a caller-supplied buffer.
///
/// The accepted period range is `2..=100_000`.
///
/// # Errors
///
/// - `Error::InvalidPeriod` if `period` is outside the accepted range
/// - `Error::EmptyInput` if `data` is empty
/// - `Error::InsufficientData` if `data.len() < sma_min_len(period)`
/// - `Error::BufferTooSmall` if `output.len() < data.len()`
pub fn sma_into<T: SeriesElement>(data: &[T], period: usize, output: &mut [T]) -> Result<()> {
    validate_period_range(period, 2, 100_000)?;
    data.validate_not_empty()?;
    data.validate_min_length(sma_min_len(period), "sma")?;
    validate_output_len(output.len(), data.len(), "sma")?;

    windowed_mean_into(data, period, output)
}

/// Computes the Simple Moving Average.
///
/// # Errors
///
/// See [`sma_into`].
///
/// # Example
///
/// ```
/// use exact_ta::indicators::sma;
///
/// let data = vec![1.0_f64, 2.0, 3.0, 4.0, 5.0];
/// let result = sma(&data, 3).unwrap();
/// assert!(result[0].is_nan());
/// assert!(result[1].is_nan());
/// assert!((result[2] - 2.0).abs() < 1e-10);
/// assert!((result[3] - 3.0).abs() < 1e-10);
/// assert!((result[4] - 4.0).abs() < 1e-10);
/// ```
pub fn sma<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<T>> {
    let mut output = vec![T::zero(); data.len()];
    sma_into(data, period, &mut output)?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::utils::{approx_eq, count_nan_prefix, EPSILON};

    #[test]
    fn test_sma_reference_values() {
        let data = vec![1.0_f64, 2.0, 3.0, 4.0, 5.0];
        let result = sma(&data, 3).unwrap();
        assert_eq!(result.len(), 5);
        assert!(result[0].is_nan());
        assert!(result[1].is_nan());
        assert!(approx_eq(result[2], 2.0, EPSILON));
        assert!(approx_eq(result[3], 3.0, EPSILON));
        assert!(approx_eq(result[4], 4.0, EPSILON));
    }

    #[test]
    fn test_sma_lookback_matches_nan_prefix() {
        let data: Vec<f64> = (1..=20).map(f64::from).collect();
        for period in [2, 5, 10, 20] {
            let result = sma(&data, period).unwrap();
            assert_eq!(count_nan_prefix(&result), sma_lookback(period));
        }
    }

    #[test]
    fn test_sma_full_window() {
        let data = vec![2.0_f64, 4.0, 6.0];
        let result = sma(&data, 3).unwrap();
        assert_eq!(count_nan_prefix(&result), 2);
        assert!(approx_eq(result[2], 4.0, EPSILON));
    }

    #[test]
    fn test_sma_constant_series() {
        let data = vec![7.5_f64; 10];
        let result = sma(&data, 4).unwrap();
        for &v in &result[3..] {
            assert!(approx_eq(v, 7.5, EPSILON));
        }
    }

    #[test]
    fn test_sma_rejects_period_one() {
        let data = vec![1.0_f64, 2.0, 3.0];
        assert!(matches!(
            sma(&data, 1),
            Err(Error::InvalidPeriod { period: 1, .. })
        ));
    }

    #[test]
    fn test_sma_rejects_period_zero() {
        let data = vec![1.0_f64, 2.0, 3.0];
        assert!(matches!(sma(&data, 0), Err(Error::InvalidPeriod { .. })));
    }

    #[test]
    fn test_sma_empty_input() {
        let data: Vec<f64> = vec![];
        assert!(matches!(sma(&data, 3), Err(Error::EmptyInput)));
    }

    #[test]
    fn test_sma_insufficient_data() {
        let data = vec![1.0_f64, 2.0];
        assert!(matches!(
            sma(&data, 3),
            Err(Error::InsufficientData { .. })
        ));
    }

    #[test]
    fn test_sma_into_buffer_too_small() {
        let data = vec![1.0_f64, 2.0, 3.0, 4.0];
        let mut output = vec![0.0; 2];
        assert!(matches!(
            sma_into(&data, 3, &mut output),
            Err(Error::BufferTooSmall { .. })
        ));
    }

    #[test]
    fn test_sma_into_matches_allocating() {
        let data = vec![3.0_f64, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0];
        let expected = sma(&data, 4).unwrap();
        let mut output = vec![0.0; data.len()];
        sma_into(&data, 4, &mut output).unwrap();
        for i in 0..data.len() {
            assert!(approx_eq(output[i], expected[i], EPSILON));
        }
    }

    #[test]
    fn test_sma_f32() {
        let data = vec![1.0_f32, 2.0, 3.0, 4.0];
        let result = sma(&data, 2).unwrap();
        assert!(result[0].is_nan());
        assert!(approx_eq(result[1], 1.5, 1e-5));
        assert!(approx_eq(result[3], 3.5, 1e-5));
    }
}
