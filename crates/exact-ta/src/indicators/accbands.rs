//! Acceleration Bands (ACCBANDS).
//!
//! Transforms each bar with a `4(h-l)/(h+l)` width factor, then runs an
//! SMA over the transformed highs, the closes and the transformed lows. A
//! degenerate `h+l` leaves the bar untransformed.

use crate::error::Result;
use crate::indicators::sma::{sma_into, sma_lookback};
use crate::traits::{
    validate_output_len, validate_period_range, validate_same_length, SeriesElement,
    ValidatedInput,
};

/// Acceleration Bands output.
#[derive(Debug, Clone, PartialEq)]
pub struct AccbandsOutput<T> {
    /// SMA of the widened highs.
    pub upper: Vec<T>,
    /// SMA of the closes.
    pub middle: Vec<T>,
    /// SMA of the narrowed lows.
    pub lower: Vec<T>,
}

/// Returns the number of leading NaN values in ACCBANDS output.
#[inline]
#[must_use]
pub const fn accbands_lookback(period: usize) -> usize {
    sma_lookback(period)
}

/// Computes acceleration bands into caller-supplied buffers.
///
/// # Errors
///
/// - `Error::EmptyInput` if `high` is empty
/// - `Error::InvalidInput` if the series lengths differ
/// - `Error::InvalidPeriod` if `period` is outside `2..=100_000`
/// - `Error::InsufficientData` if the series are shorter than `period`
/// - `Error::BufferTooSmall` if any output is shorter than the input
pub fn accbands_into<T: SeriesElement>(
    high: &[T],
    low: &[T],
    close: &[T],
    period: usize,
    upper: &mut [T],
    middle: &mut [T],
    lower: &mut [T],
) -> Result<()> {
    high.validate_not_empty()?;
    validate_same_length(
        &[high.len(), low.len(), close.len()],
        "price series must have the same length",
    )?;
    validate_period_range(period, 2, 100_000)?;
    high.validate_min_length(period, "accbands")?;
    validate_output_len(upper.len(), high.len(), "accbands")?;
    validate_output_len(middle.len(), high.len(), "accbands")?;
    validate_output_len(lower.len(), high.len(), "accbands")?;

    let four = T::from_f64(4.0)?;
    let mut t_high = vec![T::zero(); high.len()];
    let mut t_low = vec![T::zero(); high.len()];
    for i in 0..high.len() {
        let span = high[i] + low[i];
        if span.abs() >= T::ta_epsilon() {
            let t = four * (high[i] - low[i]) / span;
            t_high[i] = high[i] * (T::one() + t);
            t_low[i] = low[i] * (T::one() - t);
        } else {
            t_high[i] = high[i];
            t_low[i] = low[i];
        }
    }

    sma_into(&t_high, period, upper)?;
    sma_into(close, period, middle)?;
    sma_into(&t_low, period, lower)?;
    Ok(())
}

/// Computes acceleration bands.
///
/// # Errors
///
/// See [`accbands_into`].
pub fn accbands<T: SeriesElement>(
    high: &[T],
    low: &[T],
    close: &[T],
    period: usize,
) -> Result<AccbandsOutput<T>> {
    let mut upper = vec![T::zero(); high.len()];
    let mut middle = vec![T::zero(); high.len()];
    let mut lower = vec![T::zero(); high.len()];
    accbands_into(high, low, close, period, &mut upper, &mut middle, &mut lower)?;
    Ok(AccbandsOutput {
        upper,
        middle,
        lower,
    })
}
