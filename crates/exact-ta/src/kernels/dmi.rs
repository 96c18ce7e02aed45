//! Directional-movement primitives.
//!
//! True range, the plus/minus directional-movement deltas, and Wilder's
//! smoothing recurrence. The whole DM family (ATR, ±DM, DX, ADX, ADXR) is
//! built from these three pieces, and each reproduces the reference
//! comparison cascade exactly.

use crate::traits::SeriesElement;

/// True range of a single bar against the previous close.
///
/// `max(high - low, |prev_close - high|, |prev_close - low|)`, evaluated
/// with the reference's comparison cascade.
#[inline]
#[must_use]
pub fn true_range_bar<T: SeriesElement>(high: T, low: T, prev_close: T) -> T {
    let mut greatest = high - low;
    let val2 = (prev_close - high).abs();
    if val2 > greatest {
        greatest = val2;
    }
    let val3 = (prev_close - low).abs();
    if val3 > greatest {
        greatest = val3;
    }
    greatest
}

/// Directional-movement deltas of a bar against the previous bar.
///
/// Returns `(diff_p, diff_m)` where `diff_p = high - prev_high` and
/// `diff_m = prev_low - low`. A bar contributes `diff_p` to plus-DM only
/// when `diff_p > 0 && diff_p > diff_m` (and symmetrically for minus-DM);
/// that gating is left to the callers because DX and ±DM apply it at
/// different points of their loops.
#[inline]
#[must_use]
pub fn dm_deltas<T: SeriesElement>(high: T, low: T, prev_high: T, prev_low: T) -> (T, T) {
    (high - prev_high, prev_low - low)
}

/// One step of Wilder's smoothing.
///
/// `acc - acc/period + term`. The reference never rewrites this as
/// `acc*(period-1)/period + term`; the two differ in floating point.
#[inline]
#[must_use]
pub fn wilder_smooth<T: SeriesElement>(acc: T, term: T, period: T) -> T {
    acc - acc / period + term
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{approx_eq, EPSILON};

    #[test]
    fn test_true_range_high_low_dominates() {
        // prev close inside the bar: range is just high - low
        assert!(approx_eq(true_range_bar(10.0_f64, 8.0, 9.0), 2.0, EPSILON));
    }

    #[test]
    fn test_true_range_gap_up() {
        // prev close far below the bar
        assert!(approx_eq(true_range_bar(10.0_f64, 8.0, 5.0), 5.0, EPSILON));
    }

    #[test]
    fn test_true_range_gap_down() {
        // prev close far above the bar
        assert!(approx_eq(true_range_bar(10.0_f64, 8.0, 13.0), 5.0, EPSILON));
    }

    #[test]
    fn test_dm_deltas() {
        let (diff_p, diff_m) = dm_deltas(11.0_f64, 9.0, 10.0, 9.5);
        assert!(approx_eq(diff_p, 1.0, EPSILON));
        assert!(approx_eq(diff_m, 0.5, EPSILON));
    }

    #[test]
    fn test_wilder_smooth() {
        let acc = 14.0_f64;
        let next = wilder_smooth(acc, 2.0, 14.0);
        assert!(approx_eq(next, 14.0 - 1.0 + 2.0, EPSILON));
    }

    #[test]
    fn test_wilder_smooth_operation_order() {
        // acc - acc/p + term, not acc*(p-1)/p + term: for values where the
        // two disagree in the last bit, the reference order must be kept.
        let acc = 0.1_f64;
        let period = 3.0_f64;
        let term = 0.7_f64;
        let reference = acc - acc / period + term;
        assert_eq!(wilder_smooth(acc, term, period).to_bits(), reference.to_bits());
    }
}
