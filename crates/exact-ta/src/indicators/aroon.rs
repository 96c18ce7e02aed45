//! Aroon (AROON, AROONOSC).
//!
//! Measures how recently the highest high and lowest low occurred
//! inside a window of `period + 1` bars. Ties go to the most recent
//! bar in both the rescan and incremental paths.

use crate::error::Result;
use crate::traits::{
    validate_output_len, validate_period_range, validate_same_length, SeriesElement,
    ValidatedInput,
};
use crate::utils::fill_nan_prefix;

/// Aroon output.
#[derive(Debug, Clone, PartialEq)]
pub struct AroonOutput<T> {
    /// Bars since the highest high, scaled to 0..100.
    pub up: Vec<T>,
    /// Bars since the lowest low, scaled to 0..100.
    pub down: Vec<T>,
}

/// Returns the number of leading NaN values in AROON output.
#[inline]
#[must_use]
pub const fn aroon_lookback(period: usize) -> usize {
    period
}

fn aroon_kernel<T: SeriesElement>(
    high: &[T],
    low: &[T],
    period: usize,
    mut on_bar: impl FnMut(usize, usize, usize),
) {
    let mut trailing = 0;
    let mut highest_idx: Option<usize> = None;
    let mut lowest_idx: Option<usize> = None;
    let mut highest = T::zero();
    let mut lowest = T::zero();

    for today in period..high.len() {
        let needs_low_rescan = match lowest_idx {
            Some(idx) => idx < trailing,
            None => true,
        };
        if needs_low_rescan {
            let mut idx = trailing;
            let mut best = low[idx];
            for i in (trailing + 1)..=today {
                if low[i] <= best {
                    idx = i;
                    best = low[i];
                }
            }
            lowest_idx = Some(idx);
            lowest = best;
        } else if low[today] <= lowest {
            lowest_idx = Some(today);
            lowest = low[today];
        }

        let needs_high_rescan = match highest_idx {
            Some(idx) => idx < trailing,
            None => true,
        };
        if needs_high_rescan {
            let mut idx = trailing;
            let mut best = high[idx];
            for i in (trailing + 1)..=today {
                if high[i] >= best {
                    idx = i;
                    best = high[i];
                }
            }
            highest_idx = Some(idx);
            highest = best;
        } else if high[today] >= highest {
            highest_idx = Some(today);
            highest = high[today];
        }

        // Both are Some after the scans above.
        if let (Some(hi), Some(lo)) = (highest_idx, lowest_idx) {
            on_bar(today, hi, lo);
        }
        trailing += 1;
    }
}

fn validate_aroon<T: SeriesElement>(
    high: &[T],
    low: &[T],
    period: usize,
    indicator: &'static str,
) -> Result<()> {
    validate_period_range(period, 2, 100_000)?;
    high.validate_not_empty()?;
    validate_same_length(&[high.len(), low.len()], indicator)?;
    high.validate_min_length(period + 1, indicator)?;
    Ok(())
}

/// Computes AROON into caller-supplied buffers.
///
/// # Errors
///
/// - `Error::EmptyInput` if the inputs are empty
/// - `Error::InvalidInput` if the input lengths differ
/// - `Error::InvalidPeriod` if `period` is outside `2..=100_000`
/// - `Error::InsufficientData` if the inputs are shorter than
///   `period + 1`
/// - `Error::BufferTooSmall` if either output is shorter than the input
pub fn aroon_into<T: SeriesElement>(
    high: &[T],
    low: &[T],
    period: usize,
    up: &mut [T],
    down: &mut [T],
) -> Result<()> {
    validate_aroon(high, low, period, "aroon")?;
    validate_output_len(up.len(), high.len(), "aroon")?;
    validate_output_len(down.len(), high.len(), "aroon")?;

    let factor = T::hundred() / T::from_usize(period)?;
    let period_t = T::from_usize(period)?;

    fill_nan_prefix(up, aroon_lookback(period));
    fill_nan_prefix(down, aroon_lookback(period));
    aroon_kernel(high, low, period, |today, hi, lo| {
        let since_high = T::from_usize(today - hi).unwrap_or_else(|_| T::zero());
        let since_low = T::from_usize(today - lo).unwrap_or_else(|_| T::zero());
        up[today] = factor * (period_t - since_high);
        down[today] = factor * (period_t - since_low);
    });
    Ok(())
}

/// Computes AROON.
///
/// # Errors
///
/// See [`aroon_into`].
pub fn aroon<T: SeriesElement>(high: &[T], low: &[T], period: usize) -> Result<AroonOutput<T>> {
    let mut up = vec![T::zero(); high.len()];
    let mut down = vec![T::zero(); high.len()];
    aroon_into(high, low, period, &mut up, &mut down)?;
    Ok(AroonOutput { up, down })
}

/// Computes the Aroon Oscillator (AROONOSC) into a caller-supplied buffer.
///
/// Aroon up minus Aroon down, folded into a single -100..100 series.
///
/// # Errors
///
/// See [`aroon_into`].
pub fn aroonosc_into<T: SeriesElement>(
    high: &[T],
    low: &[T],
    period: usize,
    output: &mut [T],
) -> Result<()> {
    validate_aroon(high, low, period, "aroonosc")?;
    validate_output_len(output.len(), high.len(), "aroonosc")?;

    let factor = T::hundred() / T::from_usize(period)?;

    fill_nan_prefix(output, aroon_lookback(period));
    aroon_kernel(high, low, period, |today, hi, lo| {
        // up - down collapses to the index gap between the extrema.
        let gap = hi as i64 - lo as i64;
        output[today] = factor * T::from_i32(gap as i32).unwrap_or_else(|_| T::zero());
    });
    Ok(())
}

/// Computes the Aroon Oscillator.
///
/// # Errors
///
/// See [`aroon_into`].
pub fn aroonosc<T: SeriesElement>(high: &[T], low: &[T], period: usize) -> Result<Vec<T>> {
    let mut output = vec![T::zero(); high.len()];
    aroonosc_into(high, low, period, &mut output)?;
    Ok(output)
}
