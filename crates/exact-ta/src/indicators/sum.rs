//! Windowed summation (SUM).

use crate::error::Result;
use crate::kernels::running_sum_into;
use crate::traits::{
    validate_output_len, validate_period_range, SeriesElement, ValidatedInput,
};

/// Returns the number of leading NaN values in SUM output.
#[inline]
#[must_use]
pub const fn sum_lookback(period: usize) -> usize {
    period.saturating_sub(1)
}

/// Returns the minimum input length that produces at least one output.
#[inline]
#[must_use]
pub const fn sum_min_len(period: usize) -> usize {
    period
}

/// Computes the windowed sum into a caller-supplied buffer.
///
/// # Errors
///
/// - `Error::EmptyInput` if `data` is empty
/// - `Error::InvalidPeriod` if `period` is outside `2..=100_000`
/// - `Error::InsufficientData` if `data.len() < period`
/// - `Error::BufferTooSmall` if `output.len() < data.len()`
pub fn sum_into<T: SeriesElement>(data: &[T], period: usize, output: &mut [T]) -> Result<()> {
    validate_period_range(period, 2, 100_000)?;
    data.validate_not_empty()?;
    data.validate_min_length(sum_min_len(period), "sum")?;
    validate_output_len(output.len(), data.len(), "sum")?;
    running_sum_into(data, period, output);
    Ok(())
}

/// Computes the windowed sum, allocating the output.
///
/// # Errors
///
/// See [`sum_into`].
pub fn sum<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<T>> {
    let mut output = vec![T::zero(); data.len()];
    sum_into(data, period, &mut output)?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{approx_eq, count_nan_prefix, EPSILON};

    #[test]
    fn test_sum_basic() {
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let result = sum(&data, 3).unwrap();
        assert_eq!(count_nan_prefix(&result), 2);
        assert!(approx_eq(result[2], 6.0, EPSILON));
        assert!(approx_eq(result[3], 9.0, EPSILON));
        assert!(approx_eq(result[4], 12.0, EPSILON));
    }

    #[test]
    fn test_sum_invalid_period() {
        assert!(sum(&[1.0, 2.0], 1).is_err());
    }

    #[test]
    fn test_sum_insufficient_data() {
        assert!(sum(&[1.0], 2).is_err());
    }
}
