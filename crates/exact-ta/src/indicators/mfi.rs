//! Money Flow Index (MFI).
//!
//! Volume-weighted RSI analogue built from the typical price. Money
//! flow on up and down bars is accumulated over a circular window of
//! `period` slots.

use crate::error::Result;
use crate::traits::{
    validate_output_len, validate_period_range, validate_same_length, SeriesElement,
    ValidatedInput,
};
use crate::utils::fill_nan_prefix;

/// Returns the number of leading NaN values in MFI output.
#[inline]
#[must_use]
pub const fn mfi_lookback(period: usize) -> usize {
    period
}

/// Returns the minimum input length that produces at least one MFI value.
#[inline]
#[must_use]
pub const fn mfi_min_len(period: usize) -> usize {
    period + 1
}

fn typical_price<T: SeriesElement>(high: T, low: T, close: T, three: T) -> T {
    (high + low + close) / three
}

/// Computes MFI into a caller-supplied buffer.
///
/// When the total money flow in the window drops below 1.0 the output
/// is 0 rather than a ratio of vanishing sums.
///
/// # Errors
///
/// - `Error::EmptyInput` if the inputs are empty
/// - `Error::InvalidInput` if the input lengths differ
/// - `Error::InvalidPeriod` if `period` is outside `2..=100_000`
/// - `Error::InsufficientData` if the inputs are shorter than
///   `mfi_min_len(period)`
/// - `Error::BufferTooSmall` if `output.len() < close.len()`
pub fn mfi_into<T: SeriesElement>(
    high: &[T],
    low: &[T],
    close: &[T],
    volume: &[T],
    period: usize,
    output: &mut [T],
) -> Result<()> {
    validate_period_range(period, 2, 100_000)?;
    high.validate_not_empty()?;
    validate_same_length(
        &[high.len(), low.len(), close.len(), volume.len()],
        "mfi",
    )?;
    high.validate_min_length(mfi_min_len(period), "mfi")?;
    validate_output_len(output.len(), close.len(), "mfi")?;

    let three = T::from_usize(3)?;
    let mut pos_buf = vec![T::zero(); period];
    let mut neg_buf = vec![T::zero(); period];
    let mut pos_sum = T::zero();
    let mut neg_sum = T::zero();
    let mut buf_idx = 0;

    let mut prev_typ = typical_price(high[0], low[0], close[0], three);
    for day in 1..=period {
        let typ = typical_price(high[day], low[day], close[day], three);
        let diff = typ - prev_typ;
        prev_typ = typ;
        let flow = typ * volume[day];
        if diff < T::zero() {
            neg_buf[buf_idx] = flow;
            pos_buf[buf_idx] = T::zero();
            neg_sum = neg_sum + flow;
        } else if diff > T::zero() {
            pos_buf[buf_idx] = flow;
            neg_buf[buf_idx] = T::zero();
            pos_sum = pos_sum + flow;
        } else {
            pos_buf[buf_idx] = T::zero();
            neg_buf[buf_idx] = T::zero();
        }
        buf_idx += 1;
        if buf_idx == period {
            buf_idx = 0;
        }
    }

    fill_nan_prefix(output, mfi_lookback(period));
    let total = pos_sum + neg_sum;
    output[period] = if total < T::one() {
        T::zero()
    } else {
        T::hundred() * (pos_sum / total)
    };

    for day in (period + 1)..close.len() {
        pos_sum = pos_sum - pos_buf[buf_idx];
        neg_sum = neg_sum - neg_buf[buf_idx];

        let typ = typical_price(high[day], low[day], close[day], three);
        let diff = typ - prev_typ;
        prev_typ = typ;
        let flow = typ * volume[day];
        if diff < T::zero() {
            neg_buf[buf_idx] = flow;
            pos_buf[buf_idx] = T::zero();
            neg_sum = neg_sum + flow;
        } else if diff > T::zero() {
            pos_buf[buf_idx] = flow;
            neg_buf[buf_idx] = T::zero();
            pos_sum = pos_sum + flow;
        } else {
            pos_buf[buf_idx] = T::zero();
            neg_buf[buf_idx] = T::zero();
        }
        buf_idx += 1;
        if buf_idx == period {
            buf_idx = 0;
        }

        let total = pos_sum + neg_sum;
        output[day] = if total < T::one() {
            T::zero()
        } else {
            T::hundred() * (pos_sum / total)
        };
    }
    Ok(())
}

/// Computes MFI.
///
/// # Errors
///
/// See [`mfi_into`].
pub fn mfi<T: SeriesElement>(
    high: &[T],
    low: &[T],
    close: &[T],
    volume: &[T],
    period: usize,
) -> Result<Vec<T>> {
    let mut output = vec![T::zero(); close.len()];
    mfi_into(high, low, close, volume, period, &mut output)?;
    Ok(output)
}
