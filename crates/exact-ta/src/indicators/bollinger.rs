//! Bollinger Bands (BBANDS).
//!
//! Middle band is a moving average of selectable type; the upper and
//! lower bands offset it by multiples of the rolling standard deviation.

use crate::error::Result;
use crate::indicators::ma::{ma, ma_lookback, MaType};
use crate::indicators::statistics::{stddev, stddev_lookback};
use crate::traits::{
    validate_output_len, validate_period_range, SeriesElement, ValidatedInput,
};

/// Bollinger Bands output.
#[derive(Debug, Clone, PartialEq)]
pub struct BollingerOutput<T> {
    /// Middle band plus `nbdev_up` standard deviations.
    pub upper: Vec<T>,
    /// The moving average itself.
    pub middle: Vec<T>,
    /// Middle band minus `nbdev_down` standard deviations.
    pub lower: Vec<T>,
}

/// Returns the number of leading NaN values in BBANDS output.
#[inline]
#[must_use]
pub const fn bbands_lookback(period: usize, ma_type: MaType) -> usize {
    let ma_lb = ma_lookback(period, ma_type);
    let sd_lb = stddev_lookback(period);
    if ma_lb > sd_lb {
        ma_lb
    } else {
        sd_lb
    }
}

/// Computes Bollinger Bands into caller-supplied buffers.
///
/// # Errors
///
/// - `Error::EmptyInput` if `data` is empty
/// - `Error::InvalidPeriod` if `period` is outside `2..=100_000`
/// - `Error::InvalidParameter` if either deviation multiplier is not
///   finite
/// - `Error::InsufficientData` if `data` is shorter than the combined
///   minimum length
/// - `Error::BufferTooSmall` if any output is shorter than `data`
pub fn bbands_into<T: SeriesElement>(
    data: &[T],
    period: usize,
    nbdev_up: T,
    nbdev_down: T,
    ma_type: MaType,
    upper: &mut [T],
    middle: &mut [T],
    lower: &mut [T],
) -> Result<()> {
    validate_period_range(period, 2, 100_000)?;
    data.validate_not_empty()?;
    data.validate_min_length(bbands_lookback(period, ma_type) + 1, "bbands")?;
    validate_output_len(upper.len(), data.len(), "bbands")?;
    validate_output_len(middle.len(), data.len(), "bbands")?;
    validate_output_len(lower.len(), data.len(), "bbands")?;

    let mid = ma(data, period, ma_type)?;
    let sd = stddev(data, period, T::one())?;

    for i in 0..data.len() {
        middle[i] = mid[i];
        upper[i] = mid[i] + nbdev_up * sd[i];
        lower[i] = mid[i] - nbdev_down * sd[i];
    }
    Ok(())
}

/// Computes Bollinger Bands.
///
/// # Errors
///
/// See [`bbands_into`].
pub fn bbands<T: SeriesElement>(
    data: &[T],
    period: usize,
    nbdev_up: T,
    nbdev_down: T,
    ma_type: MaType,
) -> Result<BollingerOutput<T>> {
    let mut upper = vec![T::zero(); data.len()];
    let mut middle = vec![T::zero(); data.len()];
    let mut lower = vec![T::zero(); data.len()];
    bbands_into(
        data,
        period,
        nbdev_up,
        nbdev_down,
        ma_type,
        &mut upper,
        &mut middle,
        &mut lower,
    )?;
    Ok(BollingerOutput {
        upper,
        middle,
        lower,
    })
}
