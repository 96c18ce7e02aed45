//! Hilbert Transform - Phasor Components (HT_PHASOR).
//!
//! Emits the in-phase and quadrature components of the dominant cycle. The
//! quadrature is the Q1 output of the filter chain; the in-phase value is
//! the detrender delayed three bars of the same parity.
//!
//! # Lookback
//!
//! Fixed at 32 bars.

use crate::error::Result;
use crate::indicators::ht_core::{HtState, PriceSmoother, HT_LOOKBACK};
use crate::traits::{validate_output_len, SeriesElement, ValidatedInput};

/// Phasor output: in-phase and quadrature series.
#[derive(Debug, Clone, PartialEq)]
pub struct HtPhasorOutput<T> {
    /// In-phase component.
    pub inphase: Vec<T>,
    /// Quadrature component.
    pub quadrature: Vec<T>,
}

/// Returns the number of leading NaN values in HT_PHASOR output.
#[inline]
#[must_use]
pub const fn ht_phasor_lookback() -> usize {
    HT_LOOKBACK
}

/// Returns the minimum input length that produces at least one output.
#[inline]
#[must_use]
pub const fn ht_phasor_min_len() -> usize {
    HT_LOOKBACK + 1
}

/// Computes the phasor components into caller-supplied buffers.
///
/// # Errors
///
/// - `Error::EmptyInput` if `data` is empty
/// - `Error::InsufficientData` if `data.len() < ht_phasor_min_len()`
/// - `Error::BufferTooSmall` if either output is shorter than `data`
pub fn ht_phasor_into<T: SeriesElement>(
    data: &[T],
    inphase: &mut [T],
    quadrature: &mut [T],
) -> Result<()> {
    data.validate_not_empty()?;
    data.validate_min_length(ht_phasor_min_len(), "ht_phasor")?;
    validate_output_len(inphase.len(), data.len(), "ht_phasor")?;
    validate_output_len(quadrature.len(), data.len(), "ht_phasor")?;

    crate::utils::fill_nan_prefix(inphase, HT_LOOKBACK);
    crate::utils::fill_nan_prefix(quadrature, HT_LOOKBACK);

    let (mut smoother, mut today) = PriceSmoother::prime(data);
    for _ in 0..9 {
        smoother.update(data, &mut today);
    }

    let mut state = HtState::new();
    while today < data.len() {
        let bar_idx = today;
        let smoothed = smoother.update(data, &mut today);
        let bar = state.advance(smoothed, bar_idx % 2 == 0);
        if bar_idx >= HT_LOOKBACK {
            quadrature[bar_idx] = bar.q1;
            inphase[bar_idx] = bar.i1_prev3;
        }
    }

    Ok(())
}

/// Computes the phasor components.
///
/// # Errors
///
/// See [`ht_phasor_into`].
pub fn ht_phasor<T: SeriesElement>(data: &[T]) -> Result<HtPhasorOutput<T>> {
    let mut inphase = vec![T::zero(); data.len()];
    let mut quadrature = vec![T::zero(); data.len()];
    ht_phasor_into(data, &mut inphase, &mut quadrature)?;
    Ok(HtPhasorOutput {
        inphase,
        quadrature,
    })
}
