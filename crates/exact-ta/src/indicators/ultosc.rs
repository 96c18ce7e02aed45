//! Ultimate Oscillator (ULTOSC).
//!
//! Weighted blend of buying pressure over three windows. The shortest
//! window carries weight 4, the middle 2, the longest 1, and the
//! result is scaled to 0..100.

use crate::error::Result;
use crate::traits::{
    validate_output_len, validate_period, validate_same_length, SeriesElement, ValidatedInput,
};
use crate::utils::fill_nan_prefix;

/// Returns the number of leading NaN values in ULTOSC output.
///
/// Periods are sorted internally, so only the largest one matters.
#[inline]
#[must_use]
pub const fn ultosc_lookback(period1: usize, period2: usize, period3: usize) -> usize {
    let mut max = period1;
    if period2 > max {
        max = period2;
    }
    if period3 > max {
        max = period3;
    }
    if max == 1 {
        0
    } else {
        max
    }
}

/// Buying pressure and true range for one bar.
fn pressure_terms<T: SeriesElement>(high: &[T], low: &[T], close: &[T], day: usize) -> (T, T) {
    let prev_close = if day > 0 { close[day - 1] } else { T::zero() };
    let true_low = if low[day] < prev_close {
        low[day]
    } else {
        prev_close
    };
    let close_minus_true_low = close[day] - true_low;

    let mut true_range = high[day] - low[day];
    let tmp = (prev_close - high[day]).abs();
    if tmp > true_range {
        true_range = tmp;
    }
    let tmp = (prev_close - low[day]).abs();
    if tmp > true_range {
        true_range = tmp;
    }
    (close_minus_true_low, true_range)
}

/// Computes the Ultimate Oscillator into a caller-supplied buffer.
///
/// The three periods are sorted ascending before use, matching the
/// reference convention. A window whose true-range sum has collapsed
/// below the degenerate threshold contributes nothing to the blend.
///
/// # Errors
///
/// - `Error::EmptyInput` if the inputs are empty
/// - `Error::InvalidInput` if the input lengths differ
/// - `Error::InvalidPeriod` if any period is zero
/// - `Error::InsufficientData` if the inputs are shorter than the
///   minimum length
/// - `Error::BufferTooSmall` if `output.len() < close.len()`
pub fn ultosc_into<T: SeriesElement>(
    high: &[T],
    low: &[T],
    close: &[T],
    period1: usize,
    period2: usize,
    period3: usize,
    output: &mut [T],
) -> Result<()> {
    validate_period(period1)?;
    validate_period(period2)?;
    validate_period(period3)?;
    high.validate_not_empty()?;
    validate_same_length(&[high.len(), low.len(), close.len()], "ultosc")?;
    let lookback = ultosc_lookback(period1, period2, period3);
    high.validate_min_length(lookback + 1, "ultosc")?;
    validate_output_len(output.len(), close.len(), "ultosc")?;

    let mut periods = [period1, period2, period3];
    periods.sort_unstable();
    let [p1, p2, p3] = periods;

    let n = close.len();
    let start = if p3 == 1 { 0 } else { p3 };
    fill_nan_prefix(output, start);

    let mut a = [T::zero(); 3];
    let mut b = [T::zero(); 3];
    for (slot, &p) in periods.iter().enumerate() {
        for day in (start + 1 - p)..start {
            let (cm, tr) = pressure_terms(high, low, close, day);
            a[slot] = a[slot] + cm;
            b[slot] = b[slot] + tr;
        }
    }

    let four = T::two() + T::two();
    let seven = T::from_usize(7)?;
    let mut trailing = [start + 1 - p1, start + 1 - p2, start + 1 - p3];

    for today in start..n {
        let (cm, tr) = pressure_terms(high, low, close, today);
        for slot in 0..3 {
            a[slot] = a[slot] + cm;
            b[slot] = b[slot] + tr;
        }

        let mut blended = T::zero();
        if b[0].abs() >= T::ta_epsilon() {
            blended = blended + four * (a[0] / b[0]);
        }
        if b[1].abs() >= T::ta_epsilon() {
            blended = blended + T::two() * (a[1] / b[1]);
        }
        if b[2].abs() >= T::ta_epsilon() {
            blended = blended + a[2] / b[2];
        }
        output[today] = T::hundred() * (blended / seven);

        for slot in 0..3 {
            let (cm, tr) = pressure_terms(high, low, close, trailing[slot]);
            a[slot] = a[slot] - cm;
            b[slot] = b[slot] - tr;
            trailing[slot] += 1;
        }
    }
    Ok(())
}

/// Computes the Ultimate Oscillator.
///
/// # Errors
///
/// See [`ultosc_into`].
pub fn ultosc<T: SeriesElement>(
    high: &[T],
    low: &[T],
    close: &[T],
    period1: usize,
    period2: usize,
    period3: usize,
) -> Result<Vec<T>> {
    let mut output = vec![T::zero(); close.len()];
    ultosc_into(high, low, close, period1, period2, period3, &mut output)?;
    Ok(output)
}

/// Computes the Ultimate Oscillator with the conventional 7/14/28 periods.
///
/// # Errors
///
/// See [`ultosc_into`].
pub fn ultosc_default<T: SeriesElement>(high: &[T], low: &[T], close: &[T]) -> Result<Vec<T>> {
    ultosc(high, low, close, 7, 14, 28)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{approx_eq, count_nan_prefix, EPSILON};

    fn test_bars() -> (Vec<f64>, Vec<f64>, Vec<f64>) {
        let base: Vec<f64> = (0..40)
            .map(|i| 100.0 + (f64::from(i) * 0.7).sin() * 5.0)
            .collect();
        let high: Vec<f64> = base.iter().map(|c| c + 1.0).collect();
        let low: Vec<f64> = base.iter().map(|c| c - 1.0).collect();
        (high, low, base)
    }

    #[test]
    fn test_ultosc_nan_prefix() {
        let (high, low, close) = test_bars();
        let result = ultosc(&high, &low, &close, 3, 6, 12).unwrap();
        assert_eq!(count_nan_prefix(&result), 12);
    }

    #[test]
    fn test_ultosc_bounded() {
        let (high, low, close) = test_bars();
        let result = ultosc(&high, &low, &close, 3, 6, 12).unwrap();
        for i in 12..close.len() {
            assert!(result[i] >= 0.0 && result[i] <= 100.0);
        }
    }

    #[test]
    fn test_ultosc_period_order_irrelevant() {
        let (high, low, close) = test_bars();
        let sorted = ultosc(&high, &low, &close, 3, 6, 12).unwrap();
        let shuffled = ultosc(&high, &low, &close, 12, 3, 6).unwrap();
        for i in 12..close.len() {
            assert!(approx_eq(sorted[i], shuffled[i], EPSILON));
        }
    }

    #[test]
    fn test_ultosc_manual_single_bar() {
        // Equal periods reduce the blend to a single pressure ratio.
        let (high, low, close) = test_bars();
        let result = ultosc(&high, &low, &close, 1, 1, 1).unwrap();
        for today in 1..close.len() {
            let prev = close[today - 1];
            let true_low = low[today].min(prev);
            let cm = close[today] - true_low;
            let tr = (high[today] - low[today])
                .max((prev - high[today]).abs())
                .max((prev - low[today]).abs());
            let expected = 100.0 * (7.0 * (cm / tr) / 7.0);
            assert!(approx_eq(result[today], expected, 1e-9));
        }
    }

    #[test]
    fn test_ultosc_all_periods_one_has_no_lookback() {
        let (high, low, close) = test_bars();
        let result = ultosc(&high, &low, &close, 1, 1, 1).unwrap();
        assert_eq!(count_nan_prefix(&result), 0);
    }

    #[test]
    fn test_ultosc_zero_period() {
        let (high, low, close) = test_bars();
        assert!(ultosc(&high, &low, &close, 0, 14, 28).is_err());
    }

    #[test]
    fn test_ultosc_insufficient_data() {
        let high = vec![1.0; 10];
        let low = vec![0.0; 10];
        let close = vec![0.5; 10];
        assert!(ultosc_default(&high, &low, &close).is_err());
    }
}
