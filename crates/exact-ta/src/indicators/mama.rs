//! MESA Adaptive Moving Average (MAMA).
//!
//! MAMA follows price with a smoothing factor driven by the rate of change
//! of the Hilbert phase: the faster the phase advances, the closer alpha
//! gets to `fast_limit`. FAMA is the same recursion at half alpha.
//!
//! # Lookback
//!
//! Fixed at 32 bars regardless of the limit parameters.

use crate::error::{Error, Result};
use crate::indicators::ht_core::{c, HtState, PriceSmoother, HT_LOOKBACK};
use crate::traits::{validate_output_len, SeriesElement, ValidatedInput};

/// Default fast limit.
pub const MAMA_DEFAULT_FAST_LIMIT: f64 = 0.5;
/// Default slow limit.
pub const MAMA_DEFAULT_SLOW_LIMIT: f64 = 0.05;

/// MAMA output: the adaptive average and its follower.
#[derive(Debug, Clone, PartialEq)]
pub struct MamaOutput<T> {
    /// MESA adaptive moving average.
    pub mama: Vec<T>,
    /// Following adaptive moving average.
    pub fama: Vec<T>,
}

/// Returns the number of leading NaN values in MAMA output.
#[inline]
#[must_use]
pub const fn mama_lookback() -> usize {
    HT_LOOKBACK
}

/// Returns the minimum input length that produces at least one output.
#[inline]
#[must_use]
pub const fn mama_min_len() -> usize {
    HT_LOOKBACK + 1
}

fn validate_limit<T: SeriesElement>(value: T, name: &'static str) -> Result<()> {
    if !value.is_finite() || value < c::<T>(0.01) || value > c::<T>(0.99) {
        return Err(Error::InvalidParameter {
            name,
            reason: "must be in [0.01, 0.99]",
        });
    }
    Ok(())
}

/// Computes MAMA and FAMA into caller-supplied buffers.
///
/// # Errors
///
/// - `Error::EmptyInput` if `data` is empty
/// - `Error::InvalidParameter` if either limit is outside `[0.01, 0.99]`
/// - `Error::InsufficientData` if `data.len() < mama_min_len()`
/// - `Error::BufferTooSmall` if either output is shorter than `data`
pub fn mama_into<T: SeriesElement>(
    data: &[T],
    fast_limit: T,
    slow_limit: T,
    mama_out: &mut [T],
    fama_out: &mut [T],
) -> Result<()> {
    data.validate_not_empty()?;
    validate_limit(fast_limit, "fast_limit")?;
    validate_limit(slow_limit, "slow_limit")?;
    data.validate_min_length(mama_min_len(), "mama")?;
    validate_output_len(mama_out.len(), data.len(), "mama")?;
    validate_output_len(fama_out.len(), data.len(), "mama")?;

    crate::utils::fill_nan_prefix(mama_out, HT_LOOKBACK);
    crate::utils::fill_nan_prefix(fama_out, HT_LOOKBACK);

    let (mut smoother, mut today) = PriceSmoother::prime(data);
    for _ in 0..9 {
        smoother.update(data, &mut today);
    }

    let rad2deg = c::<T>(180.0 / std::f64::consts::PI);
    let mut state = HtState::new();
    let mut previous_phase = T::zero();
    let mut mama = T::zero();
    let mut fama = T::zero();

    while today < data.len() {
        let bar_idx = today;
        let today_value = data[bar_idx];
        let smoothed = smoother.update(data, &mut today);
        let bar = state.advance(smoothed, bar_idx % 2 == 0);

        let phase = if bar.i1_prev3 == T::zero() {
            T::zero()
        } else {
            (bar.q1 / bar.i1_prev3).atan() * rad2deg
        };
        let mut delta_phase = previous_phase - phase;
        previous_phase = phase;
        if delta_phase < T::one() {
            delta_phase = T::one();
        }
        let mut alpha = fast_limit / delta_phase;
        if alpha < slow_limit {
            alpha = slow_limit;
        }
        mama = alpha * today_value + (T::one() - alpha) * mama;
        let half_alpha = alpha * c::<T>(0.5);
        fama = half_alpha * mama + (T::one() - half_alpha) * fama;

        if bar_idx >= HT_LOOKBACK {
            mama_out[bar_idx] = mama;
            fama_out[bar_idx] = fama;
        }
    }

    Ok(())
}

/// Computes MAMA and FAMA with the given limits.
///
/// # Errors
///
/// See [`mama_into`].
pub fn mama<T: SeriesElement>(data: &[T], fast_limit: T, slow_limit: T) -> Result<MamaOutput<T>> {
    let mut mama_out = vec![T::zero(); data.len()];
    let mut fama_out = vec![T::zero(); data.len()];
    mama_into(data, fast_limit, slow_limit, &mut mama_out, &mut fama_out)?;
    Ok(MamaOutput {
        mama: mama_out,
        fama: fama_out,
    })
}

/// Computes MAMA and FAMA with the default limits (0.5, 0.05).
///
/// # Errors
///
/// See [`mama_into`].
pub fn mama_default<T: SeriesElement>(data: &[T]) -> Result<MamaOutput<T>> {
    mama(
        data,
        c::<T>(MAMA_DEFAULT_FAST_LIMIT),
        c::<T>(MAMA_DEFAULT_SLOW_LIMIT),
    )
}
