//! Commodity Channel Index (CCI).
//!
//! Distance of the typical price from its moving average, scaled by
//! 0.015 times the mean absolute deviation.

use crate::error::Result;
use crate::indicators::statistics::avgdev;
use crate::indicators::sma::sma;
use crate::traits::{
    validate_output_len, validate_period_range, validate_same_length, SeriesElement,
    ValidatedInput,
};
use crate::utils::fill_nan_prefix;

/// Returns the number of leading NaN values in CCI output.
#[inline]
#[must_use]
pub const fn cci_lookback(period: usize) -> usize {
    period - 1
}

/// Computes CCI into a caller-supplied buffer.
///
/// The typical price is `(high + low + close) / 3`. When the scaled
/// deviation falls below the degenerate threshold the output is 0.
///
/// # Errors
///
/// - `Error::EmptyInput` if the inputs are empty
/// - `Error::InvalidInput` if the input lengths differ
/// - `Error::InvalidPeriod` if `period` is outside `2..=100_000`
/// - `Error::InsufficientData` if the inputs are shorter than `period`
/// - `Error::BufferTooSmall` if `output.len() < close.len()`
pub fn cci_into<T: SeriesElement>(
    high: &[T],
    low: &[T],
    close: &[T],
    period: usize,
    output: &mut [T],
) -> Result<()> {
    validate_period_range(period, 2, 100_000)?;
    high.validate_not_empty()?;
    validate_same_length(&[high.len(), low.len(), close.len()], "cci")?;
    high.validate_min_length(period, "cci")?;
    validate_output_len(output.len(), close.len(), "cci")?;

    let three = T::from_usize(3)?;
    let typical: Vec<T> = (0..close.len())
        .map(|i| (high[i] + low[i] + close[i]) / three)
        .collect();

    let mean = sma(&typical, period)?;
    let dev = avgdev(&typical, period)?;
    let scale = T::from_f64(0.015)?;

    fill_nan_prefix(output, cci_lookback(period));
    for i in cci_lookback(period)..close.len() {
        let denom = scale * dev[i];
        output[i] = if denom.abs() < T::ta_epsilon() {
            T::zero()
        } else {
            (typical[i] - mean[i]) / denom
        };
    }
    Ok(())
}

/// Computes CCI.
///
/// # Errors
///
/// See [`cci_into`].
pub fn cci<T: SeriesElement>(
    high: &[T],
    low: &[T],
    close: &[T],
    period: usize,
) -> Result<Vec<T>> {
    let mut output = vec![T::zero(); close.len()];
    cci_into(high, low, close, period, &mut output)?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{approx_eq, count_nan_prefix, EPSILON};

    fn test_bars() -> (Vec<f64>, Vec<f64>, Vec<f64>) {
        let high = vec![
            24.20, 24.07, 24.04, 23.87, 23.67, 23.59, 23.80, 23.80, 24.30, 24.15, 24.05, 24.06,
            23.88, 25.14, 25.20, 25.07, 25.22, 25.37, 25.36, 25.26,
        ];
        let low = vec![
            23.85, 23.72, 23.64, 23.37, 23.46, 23.18, 23.40, 23.57, 24.05, 23.77, 23.60, 23.84,
            23.64, 23.94, 24.74, 24.77, 24.90, 24.93, 24.96, 24.93,
        ];
        let close = vec![
            23.89, 23.95, 23.67, 23.78, 23.50, 23.32, 23.75, 23.79, 24.14, 23.81, 23.78, 23.86,
            23.70, 25.10, 25.00, 25.06, 25.03, 25.18, 25.35, 25.00,
        ];
        (high, low, close)
    }

    #[test]
    fn test_cci_nan_prefix() {
        let (high, low, close) = test_bars();
        let result = cci(&high, &low, &close, 14).unwrap();
        assert_eq!(count_nan_prefix(&result), 13);
    }

    #[test]
    fn test_cci_known_value() {
        let (high, low, close) = test_bars();
        let result = cci(&high, &low, &close, 14).unwrap();
        let typical: Vec<f64> = (0..14).map(|i| (high[i] + low[i] + close[i]) / 3.0).collect();
        let mean = typical.iter().sum::<f64>() / 14.0;
        let dev = typical.iter().map(|t| (t - mean).abs()).sum::<f64>() / 14.0;
        let expected = (typical[13] - mean) / (0.015 * dev);
        assert!(approx_eq(result[13], expected, 1e-9));
    }

    #[test]
    fn test_cci_flat_input_is_zero() {
        let data = vec![42.0; 20];
        let result = cci(&data, &data, &data, 14).unwrap();
        for i in 13..20 {
            assert!(approx_eq(result[i], 0.0, EPSILON));
        }
    }

    #[test]
    fn test_cci_invalid_period() {
        let (high, low, close) = test_bars();
        assert!(cci(&high, &low, &close, 1).is_err());
    }

    #[test]
    fn test_cci_length_mismatch() {
        let (high, mut low, close) = test_bars();
        low.pop();
        assert!(cci(&high, &low, &close, 14).is_err());
    }
}
