//! T3 Moving Average.
//!
//! Six chained EMAs combined with volume-factor coefficients. Each EMA in
//! the chain is seeded with a mean over its own warm-up span, so the warm-up
//! consumes `6 * (period - 1)` bars before the first output.
//!
//! # Formula
//!
//! ```text
//! c1 = -v^3
//! c2 = 3*(v^2 - c1)
//! c3 = -6*v^2 - 3*(v - c1)
//! c4 = 1 + 3*v - c1 + 3*v^2
//! T3 = c1*e6 + c2*e5 + c3*e4 + c4*e3
//! ```
//!
//! # Lookback
//!
//! `6 * (period - 1)`.

use crate::error::{Error, Result};
use crate::traits::{validate_output_len, validate_period_range, SeriesElement, ValidatedInput};

/// Default volume factor.
pub const T3_DEFAULT_VFACTOR: f64 = 0.7;

/// Returns the number of leading NaN values in T3 output.
#[inline]
#[must_use]
pub const fn t3_lookback(period: usize) -> usize {
    6 * period.saturating_sub(1)
}

/// Returns the minimum input length that produces at least one T3 value.
#[inline]
#[must_use]
pub const fn t3_min_len(period: usize) -> usize {
    t3_lookback(period) + 1
}

/// Computes the T3 Moving Average into a caller-supplied buffer.
///
/// `vfactor` must lie in `[0, 1]`.
///
/// # Errors
///
/// - `Error::InvalidPeriod` if `period` is outside `2..=100_000`
/// - `Error::InvalidParameter` if `vfactor` is outside `[0, 1]`
/// - `Error::EmptyInput` if `data` is empty
/// - `Error::InsufficientData` if `data.len() < t3_min_len(period)`
/// - `Error::BufferTooSmall` if `output.len() < data.len()`
#[allow(clippy::too_many_lines)]
pub fn t3_into<T: SeriesElement>(
    data: &[T],
    period: usize,
    vfactor: T,
    output: &mut [T],
) -> Result<()> {
    validate_period_range(period, 2, 100_000)?;
    if !vfactor.is_finite() || vfactor < T::zero() || vfactor > T::one() {
        return Err(Error::InvalidParameter {
            name: "vfactor",
            reason: "must lie in [0, 1]",
        });
    }
    data.validate_not_empty()?;
    data.validate_min_length(t3_min_len(period), "t3")?;
    validate_output_len(output.len(), data.len(), "t3")?;

    let n = data.len();
    let lookback = t3_lookback(period);
    crate::utils::fill_nan_prefix(output, lookback);

    let period_t = T::from_usize(period)?;
    let k = T::two() / (period_t + T::one());
    let one_minus_k = T::one() - k;

    let mut today = 0;

    // e1 seeds with the SMA of the first period values; each later stage
    // seeds with the mean of its own first period outputs.
    let mut temp = data[today];
    today += 1;
    for _ in 0..period - 1 {
        temp = temp + data[today];
        today += 1;
    }
    let mut e1 = temp / period_t;

    let mut temp = e1;
    for _ in 0..period - 1 {
        e1 = (k * data[today]) + (one_minus_k * e1);
        today += 1;
        temp = temp + e1;
    }
    let mut e2 = temp / period_t;

    let mut temp = e2;
    for _ in 0..period - 1 {
        e1 = (k * data[today]) + (one_minus_k * e1);
        today += 1;
        e2 = (k * e1) + (one_minus_k * e2);
        temp = temp + e2;
    }
    let mut e3 = temp / period_t;

    let mut temp = e3;
    for _ in 0..period - 1 {
        e1 = (k * data[today]) + (one_minus_k * e1);
        today += 1;
        e2 = (k * e1) + (one_minus_k * e2);
        e3 = (k * e2) + (one_minus_k * e3);
        temp = temp + e3;
    }
    let mut e4 = temp / period_t;

    let mut temp = e4;
    for _ in 0..period - 1 {
        e1 = (k * data[today]) + (one_minus_k * e1);
        today += 1;
        e2 = (k * e1) + (one_minus_k * e2);
        e3 = (k * e2) + (one_minus_k * e3);
        e4 = (k * e3) + (one_minus_k * e4);
        temp = temp + e4;
    }
    let mut e5 = temp / period_t;

    let mut temp = e5;
    for _ in 0..period - 1 {
        e1 = (k * data[today]) + (one_minus_k * e1);
        today += 1;
        e2 = (k * e1) + (one_minus_k * e2);
        e3 = (k * e2) + (one_minus_k * e3);
        e4 = (k * e3) + (one_minus_k * e4);
        e5 = (k * e4) + (one_minus_k * e5);
        temp = temp + e5;
    }
    let mut e6 = temp / period_t;

    let three = T::from_usize(3)?;
    let six = T::from_usize(6)?;
    let v_sq = vfactor * vfactor;
    let c1 = -(v_sq * vfactor);
    let c2 = three * (v_sq - c1);
    let c3 = (-six * v_sq) - three * (vfactor - c1);
    let c4 = T::one() + three * vfactor - c1 + three * v_sq;

    output[lookback] = c1 * e6 + c2 * e5 + c3 * e4 + c4 * e3;

    let mut idx = lookback + 1;
    while idx < n {
        let x = data[idx];
        e1 = (k * x) + (one_minus_k * e1);
        e2 = (k * e1) + (one_minus_k * e2);
        e3 = (k * e2) + (one_minus_k * e3);
        e4 = (k * e3) + (one_minus_k * e4);
        e5 = (k * e4) + (one_minus_k * e5);
        e6 = (k * e5) + (one_minus_k * e6);
        output[idx] = c1 * e6 + c2 * e5 + c3 * e4 + c4 * e3;
        idx += 1;
    }

    Ok(())
}

/// Computes the T3 Moving Average.
///
/// # Errors
///
/// See [`t3_into`].
pub fn t3<T: SeriesElement>(data: &[T], period: usize, vfactor: T) -> Result<Vec<T>> {
    let mut output = vec![T::zero(); data.len()];
    t3_into(data, period, vfactor, &mut output)?;
    Ok(output)
}
