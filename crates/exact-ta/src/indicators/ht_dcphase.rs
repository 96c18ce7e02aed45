//! Hilbert Transform - Dominant Cycle Phase (HT_DCPHASE).
//!
//! Measures where the current bar sits inside the dominant cycle, in
//! degrees. The smoothed dominant period drives a discrete Fourier sum
//! over the most recent smoothed prices, and the resulting angle is
//! corrected for the one-bar lag of the price smoother.
//!
//! # Lookback
//!
//! Fixed at 63 bars.

use crate::error::Result;
use crate::indicators::ht_core::{c, HtState, PriceSmoother};
use crate::traits::{validate_output_len, SeriesElement, ValidatedInput};

const DCPHASE_LOOKBACK: usize = 63;
const SMOOTH_PRICE_LEN: usize = 50;

/// Returns the number of leading NaN values in HT_DCPHASE output.
#[inline]
#[must_use]
pub const fn ht_dcphase_lookback() -> usize {
    DCPHASE_LOOKBACK
}

/// Returns the minimum input length that produces at least one output.
#[inline]
#[must_use]
pub const fn ht_dcphase_min_len() -> usize {
    DCPHASE_LOOKBACK + 1
}

/// Computes the dominant cycle phase into a caller-supplied buffer.
///
/// # Errors
///
/// - `Error::EmptyInput` if `data` is empty
/// - `Error::InsufficientData` if `data.len() < ht_dcphase_min_len()`
/// - `Error::BufferTooSmall` if `output.len() < data.len()`
pub fn ht_dcphase_into<T: SeriesElement>(data: &[T], output: &mut [T]) -> Result<()> {
    data.validate_not_empty()?;
    data.validate_min_length(ht_dcphase_min_len(), "ht_dcphase")?;
    validate_output_len(output.len(), data.len(), "ht_dcphase")?;

    crate::utils::fill_nan_prefix(output, DCPHASE_LOOKBACK);

    let rad2deg = c::<T>(180.0 / std::f64::consts::PI);
    let two_pi = c::<T>(2.0 * std::f64::consts::PI);

    let mut smooth_price = [T::zero(); SMOOTH_PRICE_LEN];
    let mut smooth_price_idx = 0_usize;

    let (mut smoother, mut today) = PriceSmoother::prime(data);
    for _ in 0..34 {
        smoother.update(data, &mut today);
    }

    let mut state = HtState::new();
    let mut smooth_period = T::zero();
    let mut dc_phase = T::zero();

    while today < data.len() {
        let bar_idx = today;
        let smoothed = smoother.update(data, &mut today);
        smooth_price[smooth_price_idx] = smoothed;
        state.advance(smoothed, bar_idx % 2 == 0);

        smooth_period = c::<T>(0.33) * state.period() + c::<T>(0.67) * smooth_period;

        // DFT over the last dc_period smoothed prices, newest first.
        let dc_period_int = (smooth_period + c::<T>(0.5)).to_usize().unwrap_or(0);
        let mut real_part = T::zero();
        let mut imag_part = T::zero();
        let mut idx = smooth_price_idx;
        for i in 0..dc_period_int {
            let ang = T::from_usize(i)? * two_pi / T::from_usize(dc_period_int)?;
            real_part = real_part + ang.sin() * smooth_price[idx];
            imag_part = imag_part + ang.cos() * smooth_price[idx];
            idx = if idx == 0 { SMOOTH_PRICE_LEN - 1 } else { idx - 1 };
        }

        let abs_im = imag_part.abs();
        if abs_im > T::zero() {
            dc_phase = (real_part / imag_part).atan() * rad2deg;
        } else if abs_im <= c::<T>(0.01) {
            if real_part < T::zero() {
                dc_phase = dc_phase - c::<T>(90.0);
            } else if real_part > T::zero() {
                dc_phase = dc_phase + c::<T>(90.0);
            }
        }
        dc_phase = dc_phase + c::<T>(90.0);

        // One bar of lag from the price smoother.
        dc_phase = dc_phase + c::<T>(360.0) / smooth_period;
        if imag_part < T::zero() {
            dc_phase = dc_phase + c::<T>(180.0);
        }
        if dc_phase > c::<T>(315.0) {
            dc_phase = dc_phase - c::<T>(360.0);
        }

        if bar_idx >= DCPHASE_LOOKBACK {
            output[bar_idx] = dc_phase;
        }

        smooth_price_idx += 1;
        if smooth_price_idx == SMOOTH_PRICE_LEN {
            smooth_price_idx = 0;
        }
    }

    Ok(())
}

/// Computes the dominant cycle phase.
///
/// # Errors
///
/// See [`ht_dcphase_into`].
pub fn ht_dcphase<T: SeriesElement>(data: &[T]) -> Result<Vec<T>> {
    let mut output = vec![T::zero(); data.len()];
    ht_dcphase_into(data, &mut output)?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::utils::{approx_eq, count_nan_prefix, EPSILON};

    fn cycle_data(n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| 100.0 + 10.0 * (f64::from(u32::try_from(i).unwrap()) * 0.25).sin())
            .collect()
    }

    #[test]
    fn test_ht_dcphase_lookback() {
        assert_eq!(ht_dcphase_lookback(), 63);
        assert_eq!(ht_dcphase_min_len(), 64);
    }

    #[test]
    fn test_ht_dcphase_nan_prefix() {
        let data = cycle_data(120);
        let result = ht_dcphase(&data).unwrap();
        assert_eq!(result.len(), data.len());
        assert_eq!(count_nan_prefix(&result), 63);
        for i in 63..data.len() {
            assert!(result[i].is_finite());
        }
    }

    #[test]
    fn test_ht_dcphase_output_range() {
        // Phase is wrapped to stay at or below 315 degrees
        let data = cycle_data(200);
        let result = ht_dcphase(&data).unwrap();
        for i in 63..data.len() {
            assert!(result[i] <= 315.0 + EPSILON);
        }
    }

    #[test]
    fn test_ht_dcphase_minimum_length() {
        let data = cycle_data(64);
        let result = ht_dcphase(&data).unwrap();
        assert_eq!(count_nan_prefix(&result), 63);
        assert!(result[63].is_finite());
    }

    #[test]
    fn test_ht_dcphase_insufficient_data() {
        let data = cycle_data(63);
        assert!(matches!(
            ht_dcphase(&data).unwrap_err(),
            Error::InsufficientData { .. }
        ));
    }

    #[test]
    fn test_ht_dcphase_into_matches_allocating() {
        let data = cycle_data(100);
        let expected = ht_dcphase(&data).unwrap();
        let mut output = vec![0.0; data.len()];
        ht_dcphase_into(&data, &mut output).unwrap();
        for i in 63..data.len() {
            assert!(approx_eq(output[i], expected[i], EPSILON));
        }
    }
}
