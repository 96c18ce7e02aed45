//! Rate of change family (ROC, ROCP, ROCR, ROCR100).
//!
//! All four compare `data[i]` against `data[i - period]` and emit 0 when
//! the old value is exactly zero.

use crate::error::Result;
use crate::traits::{
    validate_output_len, validate_period_range, SeriesElement, ValidatedInput,
};

/// Returns the number of leading NaN values in ROC-family output.
#[inline]
#[must_use]
pub const fn roc_lookback(period: usize) -> usize {
    period
}

/// Returns the minimum input length that produces at least one output.
#[inline]
#[must_use]
pub const fn roc_min_len(period: usize) -> usize {
    period + 1
}

fn roc_family_into<T: SeriesElement>(
    data: &[T],
    period: usize,
    indicator: &'static str,
    output: &mut [T],
    ratio: impl Fn(T, T) -> T,
) -> Result<()> {
    validate_period_range(period, 1, 100_000)?;
    data.validate_not_empty()?;
    data.validate_min_length(roc_min_len(period), indicator)?;
    validate_output_len(output.len(), data.len(), indicator)?;

    crate::utils::fill_nan_prefix(output, roc_lookback(period));
    for i in period..data.len() {
        let old = data[i - period];
        output[i] = if old == T::zero() {
            T::zero()
        } else {
            ratio(data[i], old)
        };
    }
    Ok(())
}

/// Computes ROC (`(price - prev) / prev * 100`) into a caller-supplied
/// buffer.
///
/// # Errors
///
/// - `Error::EmptyInput` if `data` is empty
/// - `Error::InvalidPeriod` if `period` is outside `1..=100_000`
/// - `Error::InsufficientData` if `data.len() < roc_min_len(period)`
/// - `Error::BufferTooSmall` if `output.len() < data.len()`
pub fn roc_into<T: SeriesElement>(data: &[T], period: usize, output: &mut [T]) -> Result<()> {
    roc_family_into(data, period, "roc", output, |new, old| {
        (new - old) / old * T::hundred()
    })
}

/// Computes ROC, allocating the output.
///
/// # Errors
///
/// See [`roc_into`].
pub fn roc<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<T>> {
    let mut output = vec![T::zero(); data.len()];
    roc_into(data, period, &mut output)?;
    Ok(output)
}

/// Computes ROCP (`(price - prev) / prev`) into a caller-supplied buffer.
///
/// # Errors
///
/// See [`roc_into`].
pub fn rocp_into<T: SeriesElement>(data: &[T], period: usize, output: &mut [T]) -> Result<()> {
    roc_family_into(data, period, "rocp", output, |new, old| (new - old) / old)
}

/// Computes ROCP, allocating the output.
///
/// # Errors
///
/// See [`roc_into`].
pub fn rocp<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<T>> {
    let mut output = vec![T::zero(); data.len()];
    rocp_into(data, period, &mut output)?;
    Ok(output)
}

/// Computes ROCR (`price / prev`) into a caller-supplied buffer.
///
/// # Errors
///
/// See [`roc_into`].
pub fn rocr_into<T: SeriesElement>(data: &[T], period: usize, output: &mut [T]) -> Result<()> {
    roc_family_into(data, period, "rocr", output, |new, old| new / old)
}

/// Computes ROCR, allocating the output.
///
/// # Errors
///
/// See [`roc_into`].
pub fn rocr<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<T>> {
    let mut output = vec![T::zero(); data.len()];
    rocr_into(data, period, &mut output)?;
    Ok(output)
}

/// Computes ROCR100 (`price / prev * 100`) into a caller-supplied buffer.
///
/// # Errors
///
/// See [`roc_into`].
pub fn rocr100_into<T: SeriesElement>(data: &[T], period: usize, output: &mut [T]) -> Result<()> {
    roc_family_into(data, period, "rocr100", output, |new, old| {
        new / old * T::hundred()
    })
}

/// Computes ROCR100, allocating the output.
///
/// # Errors
///
/// See [`roc_into`].
pub fn rocr100<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<T>> {
    let mut output = vec![T::zero(); data.len()];
    rocr100_into(data, period, &mut output)?;
    Ok(output)
}
