//! Windowed extremum indicators (MAX, MIN, MAXINDEX, MININDEX, MINMAX,
//! MINMAXINDEX).
//!
//! Value outputs carry the usual NaN prefix; index outputs are `i32`
//! slices prefilled with 0 and hold absolute input indices.

use crate::error::{Error, Result};
use crate::kernels::{
    rolling_extrema_lookback, rolling_max_into, rolling_min_into, WindowMax, WindowMin,
};
use crate::traits::{
    validate_output_len, validate_period_range, SeriesElement, ValidatedInput,
};

/// MINMAX output pair.
#[derive(Debug, Clone, PartialEq)]
pub struct MinMaxOutput<T> {
    /// Lowest value over the window.
    pub min: Vec<T>,
    /// Highest value over the window.
    pub max: Vec<T>,
}

/// MINMAXINDEX output pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinMaxIndexOutput {
    /// Absolute index of the lowest value.
    pub min_idx: Vec<i32>,
    /// Absolute index of the highest value.
    pub max_idx: Vec<i32>,
}

/// Returns the number of undefined leading slots for this family.
#[inline]
#[must_use]
pub const fn minmax_lookback(period: usize) -> usize {
    rolling_extrema_lookback(period)
}

fn validate<T: SeriesElement>(
    data: &[T],
    period: usize,
    indicator: &'static str,
    output_len: usize,
) -> Result<()> {
    validate_period_range(period, 2, 100_000)?;
    data.validate_not_empty()?;
    data.validate_min_length(period, indicator)?;
    validate_output_len(output_len, data.len(), indicator)
}

/// Computes the highest value over the window into a caller-supplied
/// buffer.
///
/// # Errors
///
/// - `Error::EmptyInput` if `data` is empty
/// - `Error::InvalidPeriod` if `period` is outside `2..=100_000`
/// - `Error::InsufficientData` if `data.len() < period`
/// - `Error::BufferTooSmall` if `output.len() < data.len()`
pub fn max_into<T: SeriesElement>(data: &[T], period: usize, output: &mut [T]) -> Result<()> {
    validate(data, period, "max", output.len())?;
    rolling_max_into(data, period, output);
    Ok(())
}

/// Computes the highest value over the window.
///
/// # Errors
///
/// See [`max_into`].
pub fn max<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<T>> {
    let mut output = vec![T::zero(); data.len()];
    max_into(data, period, &mut output)?;
    Ok(output)
}

/// Computes the lowest value over the window into a caller-supplied
/// buffer.
///
/// # Errors
///
/// See [`max_into`].
pub fn min_into<T: SeriesElement>(data: &[T], period: usize, output: &mut [T]) -> Result<()> {
    validate(data, period, "min", output.len())?;
    rolling_min_into(data, period, output);
    Ok(())
}

/// Computes the lowest value over the window.
///
/// # Errors
///
/// See [`max_into`].
pub fn min<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<T>> {
    let mut output = vec![T::zero(); data.len()];
    min_into(data, period, &mut output)?;
    Ok(output)
}

fn to_i32(idx: usize) -> Result<i32> {
    i32::try_from(idx).map_err(|_| Error::NumericConversion {
        context: "window index to i32",
    })
}

/// Computes the absolute index of the highest value over the window into
/// a caller-supplied buffer.
///
/// # Errors
///
/// See [`max_into`]; additionally `Error::NumericConversion` if an index
/// does not fit in `i32`.
pub fn maxindex_into<T: SeriesElement>(
    data: &[T],
    period: usize,
    output: &mut [i32],
) -> Result<()> {
    validate(data, period, "maxindex", output.len())?;
    output[..data.len()].fill(0);

    let lookback = minmax_lookback(period);
    let mut tracker = WindowMax::new();
    for today in lookback..data.len() {
        let trailing = today - lookback;
        let idx = tracker.update(data, trailing, today);
        output[today] = to_i32(idx)?;
    }
    Ok(())
}

/// Computes the absolute index of the highest value over the window.
///
/// # Errors
///
/// See [`maxindex_into`].
pub fn maxindex<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<i32>> {
    let mut output = vec![0_i32; data.len()];
    maxindex_into(data, period, &mut output)?;
    Ok(output)
}

/// Computes the absolute index of the lowest value over the window into a
/// caller-supplied buffer.
///
/// # Errors
///
/// See [`maxindex_into`].
pub fn minindex_into<T: SeriesElement>(
    data: &[T],
    period: usize,
    output: &mut [i32],
) -> Result<()> {
    validate(data, period, "minindex", output.len())?;
    output[..data.len()].fill(0);

    let lookback = minmax_lookback(period);
    let mut tracker = WindowMin::new();
    for today in lookback..data.len() {
        let trailing = today - lookback;
        let idx = tracker.update(data, trailing, today);
        output[today] = to_i32(idx)?;
    }
    Ok(())
}

/// Computes the absolute index of the lowest value over the window.
///
/// # Errors
///
/// See [`maxindex_into`].
pub fn minindex<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<i32>> {
    let mut output = vec![0_i32; data.len()];
    minindex_into(data, period, &mut output)?;
    Ok(output)
}

/// Computes the lowest and highest values over the window.
///
/// # Errors
///
/// See [`max_into`].
pub fn minmax<T: SeriesElement>(data: &[T], period: usize) -> Result<MinMaxOutput<T>> {
    Ok(MinMaxOutput {
        min: min(data, period)?,
        max: max(data, period)?,
    })
}

/// Computes the absolute indices of the lowest and highest values over
/// the window.
///
/// # Errors
///
/// See [`maxindex_into`].
pub fn minmaxindex<T: SeriesElement>(data: &[T], period: usize) -> Result<MinMaxIndexOutput> {
    Ok(MinMaxIndexOutput {
        min_idx: minindex(data, period)?,
        max_idx: maxindex(data, period)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::count_nan_prefix;

    #[test]
    fn test_max_min_basic() {
        let data = vec![3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0];
        let hi = max(&data, 3).unwrap();
        let lo = min(&data, 3).unwrap();
        assert_eq!(count_nan_prefix(&hi), 2);
        assert_eq!(hi[2], 4.0);
        assert_eq!(hi[5], 9.0);
        assert_eq!(lo[2], 1.0);
        assert_eq!(lo[6], 2.0);
    }

    #[test]
    fn test_maxindex_absolute_indices() {
        let data = vec![3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0];
        let result = maxindex(&data, 3).unwrap();
        assert_eq!(result[0], 0);
        assert_eq!(result[1], 0);
        assert_eq!(result[2], 2);
        assert_eq!(result[3], 2);
        assert_eq!(result[4], 4);
        assert_eq!(result[5], 5);
        assert_eq!(result[6], 5);
    }

    #[test]
    fn test_minindex_tie_keeps_older_after_rescan() {
        // When the tracked minimum falls out of the window, the rescan
        // keeps the oldest of equal values still inside it
        let data = vec![1.0, 2.0, 2.0, 2.0, 5.0];
        let result = minindex(&data, 3).unwrap();
        assert_eq!(result[2], 0);
        assert_eq!(result[3], 1);
        assert_eq!(result[4], 2);
    }

    #[test]
    fn test_maxindex_incremental_tie_takes_newest() {
        // The first window rescans (older tie survives); a later bar that
        // ties the tracked maximum takes over
        let data = vec![4.0, 5.0, 3.0, 5.0];
        let result = maxindex(&data, 3).unwrap();
        assert_eq!(result[2], 1);
        assert_eq!(result[3], 3);
    }

    #[test]
    fn test_minmax_matches_components() {
        let data = vec![3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0];
        let pair = minmax(&data, 3).unwrap();
        assert_eq!(pair.min, min(&data, 3).unwrap());
        assert_eq!(pair.max, max(&data, 3).unwrap());
    }

    #[test]
    fn test_minmaxindex_matches_components() {
        let data = vec![3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0];
        let pair = minmaxindex(&data, 3).unwrap();
        assert_eq!(pair.min_idx, minindex(&data, 3).unwrap());
        assert_eq!(pair.max_idx, maxindex(&data, 3).unwrap());
    }

    #[test]
    fn test_minmax_invalid_period() {
        assert!(max(&[1.0, 2.0], 1).is_err());
        assert!(minindex(&[1.0, 2.0], 0).is_err());
    }
}
