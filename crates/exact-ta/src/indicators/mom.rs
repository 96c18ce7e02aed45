//! Momentum (MOM).
//!
//! The raw difference `data[i] - data[i - period]`.

use crate::error::Result;
use crate::traits::{
    validate_output_len, validate_period_range, SeriesElement, ValidatedInput,
};

/// Returns the number of leading NaN values in MOM output.
#[inline]
#[must_use]
pub const fn mom_lookback(period: usize) -> usize {
    period
}

/// Returns the minimum input length that produces at least one output.
#[inline]
#[must_use]
pub const fn mom_min_len(period: usize) -> usize {
    period + 1
}

/// Computes momentum into a caller-supplied buffer.
///
/// # Errors
///
/// - `Error::EmptyInput` if `data` is empty
/// - `Error::InvalidPeriod` if `period` is outside `1..=100_000`
/// - `Error::InsufficientData` if `data.len() < mom_min_len(period)`
/// - `Error::BufferTooSmall` if `output.len() < data.len()`
pub fn mom_into<T: SeriesElement>(data: &[T], period: usize, output: &mut [T]) -> Result<()> {
    validate_period_range(period, 1, 100_000)?;
    data.validate_not_empty()?;
    data.validate_min_length(mom_min_len(period), "mom")?;
    validate_output_len(output.len(), data.len(), "mom")?;

    crate::utils::fill_nan_prefix(output, mom_lookback(period));
    for i in period..data.len() {
        output[i] = data[i] - data[i - period];
    }
    Ok(())
}

/// Computes momentum, allocating the output.
///
/// # Errors
///
/// See [`mom_into`].
pub fn mom<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<T>> {
    let mut output = vec![T::zero(); data.len()];
    mom_into(data, period, &mut output)?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{approx_eq, count_nan_prefix, EPSILON};

    #[test]
    fn test_mom_basic() {
        let data = vec![1.0, 3.0, 2.0, 5.0, 4.0];
        let result = mom(&data, 2).unwrap();
        assert_eq!(count_nan_prefix(&result), 2);
        assert!(approx_eq(result[2], 1.0, EPSILON));
        assert!(approx_eq(result[3], 2.0, EPSILON));
        assert!(approx_eq(result[4], 2.0, EPSILON));
    }

    #[test]
    fn test_mom_period_one() {
        let data: Vec<f64> = vec![1.0, 2.0, 4.0];
        let result = mom(&data, 1).unwrap();
        assert!(result[0].is_nan());
        assert!(approx_eq(result[1], 1.0, EPSILON));
        assert!(approx_eq(result[2], 2.0, EPSILON));
    }

    #[test]
    fn test_mom_invalid_period() {
        assert!(mom(&[1.0, 2.0], 0).is_err());
    }

    #[test]
    fn test_mom_insufficient_data() {
        assert!(mom(&[1.0, 2.0], 2).is_err());
    }
}
