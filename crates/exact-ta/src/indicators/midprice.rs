//! Midpoint price over period (MIDPRICE).
//!
//! `(highest high + lowest low) / 2` over the window.

use crate::error::Result;
use crate::traits::{
    validate_output_len, validate_period_range, validate_same_length, SeriesElement,
    ValidatedInput,
};

/// Returns the number of leading NaN values in MIDPRICE output.
#[inline]
#[must_use]
pub const fn midprice_lookback(period: usize) -> usize {
    period.saturating_sub(1)
}

/// Returns the minimum input length that produces at least one output.
#[inline]
#[must_use]
pub const fn midprice_min_len(period: usize) -> usize {
    period
}

/// Computes the midpoint price into a caller-supplied buffer.
///
/// # Errors
///
/// - `Error::EmptyInput` if `high` is empty
/// - `Error::InvalidInput` if `high` and `low` lengths differ
/// - `Error::InvalidPeriod` if `period` is outside `2..=100_000`
/// - `Error::InsufficientData` if the series are shorter than `period`
/// - `Error::BufferTooSmall` if `output.len() < high.len()`
pub fn midprice_into<T: SeriesElement>(
    high: &[T],
    low: &[T],
    period: usize,
    output: &mut [T],
) -> Result<()> {
    high.validate_not_empty()?;
    validate_same_length(
        &[high.len(), low.len()],
        "high and low must have the same length",
    )?;
    validate_period_range(period, 2, 100_000)?;
    high.validate_min_length(midprice_min_len(period), "midprice")?;
    validate_output_len(output.len(), high.len(), "midprice")?;

    crate::utils::fill_nan_prefix(output, midprice_lookback(period));

    let half = T::from_f64(0.5)?;
    let mut trailing = 0;
    for today in midprice_lookback(period)..high.len() {
        let mut lowest = low[trailing];
        let mut highest = high[trailing];
        for i in trailing + 1..=today {
            if low[i] < lowest {
                lowest = low[i];
            }
            if high[i] > highest {
                highest = high[i];
            }
        }
        output[today] = (highest + lowest) * half;
        trailing += 1;
    }
    Ok(())
}

/// Computes the midpoint price.
///
/// # Errors
///
/// See [`midprice_into`].
pub fn midprice<T: SeriesElement>(high: &[T], low: &[T], period: usize) -> Result<Vec<T>> {
    let mut output = vec![T::zero(); high.len()];
    midprice_into(high, low, period, &mut output)?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{approx_eq, count_nan_prefix, EPSILON};

    #[test]
    fn test_midprice_basic() {
        let high = vec![10.0, 12.0, 11.0, 15.0];
        let low = vec![8.0, 9.0, 7.0, 12.0];
        let result = midprice(&high, &low, 3).unwrap();
        assert_eq!(count_nan_prefix(&result), 2);
        assert!(approx_eq(result[2], (12.0 + 7.0) / 2.0, EPSILON));
        assert!(approx_eq(result[3], (15.0 + 7.0) / 2.0, EPSILON));
    }

    #[test]
    fn test_midprice_length_mismatch() {
        assert!(midprice(&[1.0, 2.0, 3.0], &[1.0, 2.0], 2).is_err());
    }

    #[test]
    fn test_midprice_invalid_period() {
        assert!(midprice(&[1.0, 2.0], &[1.0, 2.0], 1).is_err());
    }
}
