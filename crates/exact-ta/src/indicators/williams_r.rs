//! Williams' %R (WILLR).
//!
//! Measures where the close sits inside the rolling high/low range,
//! scaled to -100..0. The mirror image of raw stochastic %K.

use crate::error::Result;
use crate::kernels::rolling_extrema::{rolling_max_into, rolling_min_into};
use crate::traits::{
    validate_output_len, validate_period_range, validate_same_length, SeriesElement,
    ValidatedInput,
};
use crate::utils::fill_nan_prefix;

/// Returns the number of leading NaN values in WILLR output.
#[inline]
#[must_use]
pub const fn willr_lookback(period: usize) -> usize {
    period - 1
}

/// Computes Williams' %R into a caller-supplied buffer.
///
/// Bars whose rolling range has collapsed below the degenerate
/// threshold produce 0 rather than a division blow-up.
///
/// # Errors
///
/// - `Error::EmptyInput` if the inputs are empty
/// - `Error::InvalidInput` if the input lengths differ
/// - `Error::InvalidPeriod` if `period` is outside `2..=100_000`
/// - `Error::InsufficientData` if the inputs are shorter than `period`
/// - `Error::BufferTooSmall` if `output.len() < close.len()`
pub fn willr_into<T: SeriesElement>(
    high: &[T],
    low: &[T],
    close: &[T],
    period: usize,
    output: &mut [T],
) -> Result<()> {
    validate_period_range(period, 2, 100_000)?;
    high.validate_not_empty()?;
    validate_same_length(&[high.len(), low.len(), close.len()], "willr")?;
    high.validate_min_length(period, "willr")?;
    validate_output_len(output.len(), close.len(), "willr")?;

    let len = close.len();
    let mut highest = vec![T::zero(); len];
    let mut lowest = vec![T::zero(); len];
    rolling_max_into(high, period, &mut highest)?;
    rolling_min_into(low, period, &mut lowest)?;

    fill_nan_prefix(output, willr_lookback(period));
    for i in willr_lookback(period)..len {
        let range = highest[i] - lowest[i];
        output[i] = if range.abs() < T::ta_epsilon() {
            T::zero()
        } else {
            -T::hundred() * (highest[i] - close[i]) / range
        };
    }
    Ok(())
}

/// Computes Williams' %R.
///
/// # Errors
///
/// See [`willr_into`].
pub fn willr<T: SeriesElement>(
    high: &[T],
    low: &[T],
    close: &[T],
    period: usize,
) -> Result<Vec<T>> {
    let mut output = vec![T::zero(); close.len()];
    willr_into(high, low, close, period, &mut output)?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{approx_eq, count_nan_prefix, EPSILON};

    fn test_bars() -> (Vec<f64>, Vec<f64>, Vec<f64>) {
        let high = vec![
            127.01, 127.62, 126.59, 127.35, 128.17, 128.43, 127.37, 126.42, 126.90, 126.85,
            125.65, 125.72, 127.16, 127.72, 127.69, 128.22, 128.27, 128.09,
        ];
        let low = vec![
            125.36, 126.16, 124.93, 126.09, 126.82, 126.48, 126.03, 124.83, 126.39, 125.72,
            124.56, 124.57, 125.07, 126.86, 126.63, 126.80, 126.71, 126.80,
        ];
        let close = vec![
            126.00, 126.60, 125.10, 127.29, 128.01, 127.11, 126.20, 125.54, 126.62, 126.00,
            125.39, 125.20, 127.05, 127.29, 127.18, 128.01, 127.11, 127.73,
        ];
        (high, low, close)
    }

    #[test]
    fn test_willr_nan_prefix() {
        let (high, low, close) = test_bars();
        let result = willr(&high, &low, &close, 14).unwrap();
        assert_eq!(count_nan_prefix(&result), 13);
    }

    #[test]
    fn test_willr_known_value() {
        let (high, low, close) = test_bars();
        let result = willr(&high, &low, &close, 14).unwrap();
        // 14-bar range at bar 13: high 128.43, low 124.56.
        let expected = -100.0 * (128.43 - close[13]) / (128.43 - 124.56);
        assert!(approx_eq(result[13], expected, EPSILON));
    }

    #[test]
    fn test_willr_bounded() {
        let (high, low, close) = test_bars();
        let result = willr(&high, &low, &close, 14).unwrap();
        for i in 13..close.len() {
            assert!(result[i] <= 0.0 && result[i] >= -100.0);
        }
    }

    #[test]
    fn test_willr_flat_range_is_zero() {
        let data = vec![50.0; 20];
        let result = willr(&data, &data, &data, 14).unwrap();
        for i in 13..20 {
            assert!(approx_eq(result[i], 0.0, EPSILON));
        }
    }

    #[test]
    fn test_willr_close_at_high() {
        let high = vec![10.0, 11.0, 12.0, 13.0, 14.0];
        let low = vec![9.0, 10.0, 11.0, 12.0, 13.0];
        let close = vec![10.0, 11.0, 12.0, 13.0, 14.0];
        let result = willr(&high, &low, &close, 5).unwrap();
        assert!(approx_eq(result[4], 0.0, EPSILON));
    }

    #[test]
    fn test_willr_invalid_period() {
        let (high, low, close) = test_bars();
        assert!(willr(&high, &low, &close, 1).is_err());
    }

    #[test]
    fn test_willr_length_mismatch() {
        let (high, low, mut close) = test_bars();
        close.pop();
        assert!(willr(&high, &low, &close, 14).is_err());
    }
}
