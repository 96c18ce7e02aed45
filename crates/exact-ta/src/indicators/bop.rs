//! Balance Of Power (BOP).
//!
//! Per-bar ratio of the close-to-open move against the bar's range.
//! No lookback; every bar produces a value.

use crate::error::Result;
use crate::traits::{
    validate_output_len, validate_same_length, SeriesElement, ValidatedInput,
};

/// Computes BOP into a caller-supplied buffer.
///
/// Bars with an exactly zero range produce 0.
///
/// # Errors
///
/// - `Error::EmptyInput` if the inputs are empty
/// - `Error::InvalidInput` if the input lengths differ
/// - `Error::BufferTooSmall` if `output.len() < close.len()`
pub fn bop_into<T: SeriesElement>(
    open: &[T],
    high: &[T],
    low: &[T],
    close: &[T],
    output: &mut [T],
) -> Result<()> {
    open.validate_not_empty()?;
    validate_same_length(&[open.len(), high.len(), low.len(), close.len()], "bop")?;
    validate_output_len(output.len(), close.len(), "bop")?;

    for i in 0..close.len() {
        let range = high[i] - low[i];
        output[i] = if range != T::zero() {
            (close[i] - open[i]) / range
        } else {
            T::zero()
        };
    }
    Ok(())
}

/// Computes BOP.
///
/// # Errors
///
/// See [`bop_into`].
pub fn bop<T: SeriesElement>(
    open: &[T],
    high: &[T],
    low: &[T],
    close: &[T],
) -> Result<Vec<T>> {
    let mut output = vec![T::zero(); close.len()];
    bop_into(open, high, low, close, &mut output)?;
    Ok(output)
}
