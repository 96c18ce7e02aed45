//! Directional Movement Index (DX).
//!
//! Spread between the plus and minus directional indicators, scaled to
//! 0..100. Built on the same Wilder-smoothed DM and true-range sums as
//! ADX; a vanished denominator repeats the previous output.

use crate::error::Result;
use crate::kernels::dmi::{dm_deltas, true_range_bar, wilder_smooth};
use crate::settings::{Settings, UnstableFn};
use crate::traits::{
    validate_output_len, validate_period_range, validate_same_length, SeriesElement,
    ValidatedInput,
};
use crate::utils::fill_nan_prefix;

/// Returns the number of leading NaN values in DX output.
#[inline]
#[must_use]
pub const fn dx_lookback(period: usize) -> usize {
    period
}

/// Running Wilder sums of directional movement and true range.
pub(crate) struct DmState<T> {
    pub minus_dm: T,
    pub plus_dm: T,
    pub tr: T,
    prev_high: T,
    prev_low: T,
    prev_close: T,
    period_t: T,
}

impl<T: SeriesElement> DmState<T> {
    /// Primes the sums over the first `period - 1` bars.
    pub fn prime(high: &[T], low: &[T], close: &[T], period: usize) -> (Self, usize) {
        let mut state = Self {
            minus_dm: T::zero(),
            plus_dm: T::zero(),
            tr: T::zero(),
            prev_high: high[0],
            prev_low: low[0],
            prev_close: close[0],
            period_t: T::from_usize(period).unwrap_or_else(|_| T::one()),
        };

        let mut today = 0;
        for _ in 0..(period - 1) {
            today += 1;
            let (diff_p, diff_m) =
                dm_deltas(high[today], low[today], state.prev_high, state.prev_low);
            state.prev_high = high[today];
            state.prev_low = low[today];

            if diff_m > T::zero() && diff_p < diff_m {
                state.minus_dm = state.minus_dm + diff_m;
            } else if diff_p > T::zero() && diff_p > diff_m {
                state.plus_dm = state.plus_dm + diff_p;
            }
            state.tr = state.tr + true_range_bar(high[today], low[today], state.prev_close);
            state.prev_close = close[today];
        }
        (state, today)
    }

    /// One smoothed step over the bar at `today`.
    pub fn step(&mut self, high: &[T], low: &[T], close: &[T], today: usize) {
        let (diff_p, diff_m) = dm_deltas(high[today], low[today], self.prev_high, self.prev_low);
        self.prev_high = high[today];
        self.prev_low = low[today];

        self.minus_dm = self.minus_dm - self.minus_dm / self.period_t;
        self.plus_dm = self.plus_dm - self.plus_dm / self.period_t;
        if diff_m > T::zero() && diff_p < diff_m {
            self.minus_dm = self.minus_dm + diff_m;
        } else if diff_p > T::zero() && diff_p > diff_m {
            self.plus_dm = self.plus_dm + diff_p;
        }

        let tr = true_range_bar(high[today], low[today], self.prev_close);
        self.tr = wilder_smooth(self.tr, tr, self.period_t);
        self.prev_close = close[today];
    }

    /// DX of the current sums, or `None` when a denominator vanished.
    pub fn dx(&self) -> Option<T> {
        if self.tr.is_ta_zero() {
            return None;
        }
        let minus_di = T::hundred() * (self.minus_dm / self.tr);
        let plus_di = T::hundred() * (self.plus_dm / self.tr);
        let sum = minus_di + plus_di;
        if sum.is_ta_zero() {
            return None;
        }
        Some(T::hundred() * ((minus_di - plus_di).abs() / sum))
    }
}

pub(crate) fn validate_dmi<T: SeriesElement>(
    high: &[T],
    low: &[T],
    close: &[T],
    period: usize,
    min_len: usize,
    indicator: &'static str,
) -> Result<()> {
    validate_period_range(period, 2, 100_000)?;
    high.validate_not_empty()?;
    validate_same_length(&[high.len(), low.len(), close.len()], indicator)?;
    high.validate_min_length(min_len, indicator)?;
    Ok(())
}

/// Computes DX into a caller-supplied buffer.
///
/// # Errors
///
/// - `Error::EmptyInput` if the inputs are empty
/// - `Error::InvalidInput` if the input lengths differ
/// - `Error::InvalidPeriod` if `period` is outside `2..=100_000`
/// - `Error::InsufficientData` if the inputs are shorter than
///   `period + 1`
/// - `Error::BufferTooSmall` if `output.len() < close.len()`
pub fn dx_into<T: SeriesElement>(
    high: &[T],
    low: &[T],
    close: &[T],
    period: usize,
    output: &mut [T],
) -> Result<()> {
    let lookback = dx_lookback(period);
    validate_dmi(high, low, close, period, lookback + 1, "dx")?;
    validate_output_len(output.len(), close.len(), "dx")?;

    fill_nan_prefix(output, lookback);
    let (mut state, mut today) = DmState::prime(high, low, close, period);

    today += 1;
    state.step(high, low, close, today);
    output[lookback] = state.dx().unwrap_or_else(T::zero);

    for today in (lookback + 1)..close.len() {
        state.step(high, low, close, today);
        output[today] = state.dx().unwrap_or(output[today - 1]);
    }
    Ok(())
}

/// Computes DX.
///
/// # Errors
///
/// See [`dx_into`].
pub fn dx<T: SeriesElement>(
    high: &[T],
    low: &[T],
    close: &[T],
    period: usize,
) -> Result<Vec<T>> {
    let mut output = vec![T::zero(); close.len()];
    dx_into(high, low, close, period, &mut output)?;
    Ok(output)
}

/// Computes DX and applies the configured unstable period.
///
/// # Errors
///
/// See [`dx_into`].
pub fn dx_with_settings<T: SeriesElement>(
    high: &[T],
    low: &[T],
    close: &[T],
    period: usize,
    settings: &Settings,
) -> Result<Vec<T>> {
    let mut output = dx(high, low, close, period)?;
    settings.mask_unstable(UnstableFn::Dx, &mut output);
    Ok(output)
}
