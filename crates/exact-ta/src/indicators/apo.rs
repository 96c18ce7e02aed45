//! Price oscillators (APO, PPO).
//!
//! Both subtract a slow moving average from a fast one; PPO expresses the
//! difference as a percentage of the slow average with a degenerate
//! denominator mapping to 0. Fast and slow periods swap when given out of
//! order.

use crate::error::Result;
use crate::indicators::ma::{ma, ma_lookback, MaType};
use crate::traits::{
    validate_output_len, validate_period_range, SeriesElement, ValidatedInput,
};

/// Returns the number of leading NaN values in APO/PPO output.
#[inline]
#[must_use]
pub const fn apo_lookback(fast_period: usize, slow_period: usize, ma_type: MaType) -> usize {
    let slow = if slow_period < fast_period {
        fast_period
    } else {
        slow_period
    };
    ma_lookback(slow, ma_type)
}

/// Returns the minimum input length that produces at least one output.
#[inline]
#[must_use]
pub const fn apo_min_len(fast_period: usize, slow_period: usize, ma_type: MaType) -> usize {
    apo_lookback(fast_period, slow_period, ma_type) + 1
}

fn oscillator_mas<T: SeriesElement>(
    data: &[T],
    fast_period: usize,
    slow_period: usize,
    ma_type: MaType,
    indicator: &'static str,
    output_len: usize,
) -> Result<(Vec<T>, Vec<T>)> {
    validate_period_range(fast_period, 2, 100_000)?;
    validate_period_range(slow_period, 2, 100_000)?;
    data.validate_not_empty()?;

    let (fp, sp) = if slow_period < fast_period {
        (slow_period, fast_period)
    } else {
        (fast_period, slow_period)
    };
    data.validate_min_length(ma_lookback(sp, ma_type) + 1, indicator)?;
    validate_output_len(output_len, data.len(), indicator)?;

    let fast_ma = ma(data, fp, ma_type)?;
    let slow_ma = ma(data, sp, ma_type)?;
    Ok((fast_ma, slow_ma))
}

/// Computes the absolute price oscillator into a caller-supplied buffer.
///
/// # Errors
///
/// - `Error::EmptyInput` if `data` is empty
/// - `Error::InvalidPeriod` if either period is outside `2..=100_000`
/// - `Error::InsufficientData` if `data` is shorter than the slow MA's
///   minimum length
/// - `Error::BufferTooSmall` if `output.len() < data.len()`
pub fn apo_into<T: SeriesElement>(
    data: &[T],
    fast_period: usize,
    slow_period: usize,
    ma_type: MaType,
    output: &mut [T],
) -> Result<()> {
    let (fast_ma, slow_ma) =
        oscillator_mas(data, fast_period, slow_period, ma_type, "apo", output.len())?;
    for i in 0..data.len() {
        output[i] = fast_ma[i] - slow_ma[i];
    }
    Ok(())
}

/// Computes the absolute price oscillator.
///
/// # Errors
///
/// See [`apo_into`].
pub fn apo<T: SeriesElement>(
    data: &[T],
    fast_period: usize,
    slow_period: usize,
    ma_type: MaType,
) -> Result<Vec<T>> {
    let mut output = vec![T::zero(); data.len()];
    apo_into(data, fast_period, slow_period, ma_type, &mut output)?;
    Ok(output)
}

/// Computes the percentage price oscillator into a caller-supplied
/// buffer.
///
/// # Errors
///
/// See [`apo_into`].
pub fn ppo_into<T: SeriesElement>(
    data: &[T],
    fast_period: usize,
    slow_period: usize,
    ma_type: MaType,
    output: &mut [T],
) -> Result<()> {
    let (fast_ma, slow_ma) =
        oscillator_mas(data, fast_period, slow_period, ma_type, "ppo", output.len())?;
    for i in 0..data.len() {
        let slow = slow_ma[i];
        if slow.is_nan() {
            output[i] = T::nan();
        } else if slow.abs() < T::ta_epsilon() {
            output[i] = T::zero();
        } else {
            output[i] = (fast_ma[i] - slow) / slow * T::hundred();
        }
    }
    Ok(())
}

/// Computes the percentage price oscillator.
///
/// # Errors
///
/// See [`apo_into`].
pub fn ppo<T: SeriesElement>(
    data: &[T],
    fast_period: usize,
    slow_period: usize,
    ma_type: MaType,
) -> Result<Vec<T>> {
    let mut output = vec![T::zero(); data.len()];
    ppo_into(data, fast_period, slow_period, ma_type, &mut output)?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::sma::sma;
    use crate::utils::{approx_eq, count_nan_prefix, EPSILON};

    fn test_data() -> Vec<f64> {
        (0..50)
            .map(|i| 100.0 + 8.0 * (f64::from(u32::try_from(i).unwrap()) * 0.2).sin())
            .collect()
    }

    #[test]
    fn test_apo_lookback() {
        assert_eq!(apo_lookback(12, 26, MaType::Sma), 25);
        assert_eq!(apo_lookback(26, 12, MaType::Sma), 25);
        assert_eq!(apo_lookback(12, 26, MaType::Ema), 25);
    }

    #[test]
    fn test_apo_is_ma_difference() {
        let data = test_data();
        let result = apo(&data, 5, 10, MaType::Sma).unwrap();
        let fast = sma(&data, 5).unwrap();
        let slow = sma(&data, 10).unwrap();
        assert_eq!(count_nan_prefix(&result), 9);
        for i in 9..data.len() {
            assert!(approx_eq(result[i], fast[i] - slow[i], EPSILON));
        }
    }

    #[test]
    fn test_apo_swaps_periods() {
        let data = test_data();
        let a = apo(&data, 5, 10, MaType::Sma).unwrap();
        let b = apo(&data, 10, 5, MaType::Sma).unwrap();
        for i in 9..data.len() {
            assert!(approx_eq(a[i], b[i], EPSILON));
        }
    }

    #[test]
    fn test_ppo_is_percentage() {
        let data = test_data();
        let a = apo(&data, 5, 10, MaType::Sma).unwrap();
        let p = ppo(&data, 5, 10, MaType::Sma).unwrap();
        let slow = sma(&data, 10).unwrap();
        for i in 9..data.len() {
            assert!(approx_eq(p[i], a[i] / slow[i] * 100.0, 1e-9));
        }
    }

    #[test]
    fn test_ppo_zero_slow_ma() {
        let data = vec![1.0, -1.0, 1.0, -1.0, 1.0, -1.0, 1.0, -1.0];
        let result = ppo(&data, 2, 2, MaType::Sma).unwrap();
        // SMA(2) of alternating +-1 is exactly 0
        for i in 1..data.len() {
            assert!(approx_eq(result[i], 0.0, EPSILON));
        }
    }

    #[test]
    fn test_apo_invalid_period() {
        assert!(apo(&test_data(), 1, 10, MaType::Sma).is_err());
    }
}
