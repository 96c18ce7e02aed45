//! Intraday Momentum Index (IMI).
//!
//! RSI-style ratio built from intraday close-versus-open gains over a
//! rolling window, rescanned per bar.

use crate::error::Result;
use crate::traits::{
    validate_output_len, validate_period_range, validate_same_length, SeriesElement,
    ValidatedInput,
};
use crate::utils::fill_nan_prefix;

/// Returns the number of leading NaN values in IMI output.
#[inline]
#[must_use]
pub const fn imi_lookback(period: usize) -> usize {
    period - 1
}

/// Computes IMI into a caller-supplied buffer.
///
/// Each window sums close-over-open gains and open-over-close losses;
/// a bar where close equals open counts as a loss of zero. A window of
/// all-flat bars divides zero by zero and yields NaN.
///
/// # Errors
///
/// - `Error::EmptyInput` if the inputs are empty
/// - `Error::InvalidInput` if the input lengths differ
/// - `Error::InvalidPeriod` if `period` is outside `2..=100_000`
/// - `Error::InsufficientData` if the inputs are shorter than `period`
/// - `Error::BufferTooSmall` if `output.len() < close.len()`
pub fn imi_into<T: SeriesElement>(
    open: &[T],
    close: &[T],
    period: usize,
    output: &mut [T],
) -> Result<()> {
    validate_period_range(period, 2, 100_000)?;
    open.validate_not_empty()?;
    validate_same_length(&[open.len(), close.len()], "imi")?;
    open.validate_min_length(period, "imi")?;
    validate_output_len(output.len(), close.len(), "imi")?;

    let lookback = imi_lookback(period);
    fill_nan_prefix(output, lookback);
    for today in lookback..close.len() {
        let mut up_sum = T::zero();
        let mut down_sum = T::zero();
        for i in (today - lookback)..=today {
            if close[i] > open[i] {
                up_sum = up_sum + (close[i] - open[i]);
            } else {
                down_sum = down_sum + (open[i] - close[i]);
            }
        }
        output[today] = T::hundred() * (up_sum / (up_sum + down_sum));
    }
    Ok(())
}

/// Computes IMI.
///
/// # Errors
///
/// See [`imi_into`].
pub fn imi<T: SeriesElement>(open: &[T], close: &[T], period: usize) -> Result<Vec<T>> {
    let mut output = vec![T::zero(); close.len()];
    imi_into(open, close, period, &mut output)?;
    Ok(output)
}
