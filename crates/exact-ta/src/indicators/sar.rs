//! Parabolic SAR (SAR).
//!
//! Wilder's stop-and-reverse trailing stop. The initial direction comes
//! from the minus-DM gate on the first bar transition; the acceleration
//! factor grows on every new extreme and resets on reversal. The SAR is
//! never allowed inside the range of the previous two bars.

use crate::error::Result;
use crate::traits::{
    validate_factor, validate_output_len, validate_same_length, SeriesElement, ValidatedInput,
};
use crate::utils::fill_nan_prefix;

/// Returns the number of leading NaN values in SAR output.
#[inline]
#[must_use]
pub const fn sar_lookback() -> usize {
    1
}

/// Returns the minimum input length that produces at least one SAR value.
#[inline]
#[must_use]
pub const fn sar_min_len() -> usize {
    2
}

/// Computes SAR into a caller-supplied buffer.
///
/// An `acceleration` above `maximum` is clamped down to it before use.
///
/// # Errors
///
/// - `Error::EmptyInput` if the inputs are empty
/// - `Error::InvalidInput` if the input lengths differ
/// - `Error::InvalidParameter` if `acceleration` or `maximum` is
///   negative or not finite
/// - `Error::InsufficientData` if the inputs hold fewer than 2 bars
/// - `Error::BufferTooSmall` if `output.len() < high.len()`
pub fn sar_into<T: SeriesElement>(
    high: &[T],
    low: &[T],
    acceleration: T,
    maximum: T,
    output: &mut [T],
) -> Result<()> {
    validate_factor(acceleration, "acceleration")?;
    validate_factor(maximum, "maximum")?;
    high.validate_not_empty()?;
    validate_same_length(&[high.len(), low.len()], "sar")?;
    high.validate_min_length(sar_min_len(), "sar")?;
    validate_output_len(output.len(), high.len(), "sar")?;

    let acceleration = if acceleration > maximum {
        maximum
    } else {
        acceleration
    };
    let mut af = acceleration;

    // Initial direction from the minus-DM gate on the first transition.
    let up_move = high[1] - high[0];
    let down_move = low[0] - low[1];
    let mut is_long = !(down_move > T::zero() && down_move > up_move);

    let mut ep;
    let mut sar;
    if is_long {
        ep = high[1];
        sar = low[0];
    } else {
        ep = low[1];
        sar = high[0];
    }

    let mut new_low = low[1];
    let mut new_high = high[1];

    fill_nan_prefix(output, sar_lookback());
    for idx in 1..high.len() {
        let prev_low = new_low;
        let prev_high = new_high;
        new_low = low[idx];
        new_high = high[idx];

        if is_long {
            if new_low <= sar {
                is_long = false;
                sar = ep;
                if sar < prev_high {
                    sar = prev_high;
                }
                if sar < new_high {
                    sar = new_high;
                }
                output[idx] = sar;

                af = acceleration;
                ep = new_low;

                sar = sar + af * (ep - sar);
                if sar < prev_high {
                    sar = prev_high;
                }
                if sar < new_high {
                    sar = new_high;
                }
            } else {
                output[idx] = sar;

                if new_high > ep {
                    ep = new_high;
                    af = af + acceleration;
                    if af > maximum {
                        af = maximum;
                    }
                }

                sar = sar + af * (ep - sar);
                if sar > prev_low {
                    sar = prev_low;
                }
                if sar > new_low {
                    sar = new_low;
                }
            }
        } else if new_high >= sar {
            is_long = true;
            sar = ep;
            if sar > prev_low {
                sar = prev_low;
            }
            if sar > new_low {
                sar = new_low;
            }
            output[idx] = sar;

            af = acceleration;
            ep = new_high;

            sar = sar + af * (ep - sar);
            if sar > prev_low {
                sar = prev_low;
            }
            if sar > new_low {
                sar = new_low;
            }
        } else {
            output[idx] = sar;

            if new_low < ep {
                ep = new_low;
                af = af + acceleration;
                if af > maximum {
                    af = maximum;
                }
            }

            sar = sar + af * (ep - sar);
            if sar < prev_high {
                sar = prev_high;
            }
            if sar < new_high {
                sar = new_high;
            }
        }
    }
    Ok(())
}

/// Computes SAR.
///
/// # Errors
///
/// See [`sar_into`].
pub fn sar<T: SeriesElement>(
    high: &[T],
    low: &[T],
    acceleration: T,
    maximum: T,
) -> Result<Vec<T>> {
    let mut output = vec![T::zero(); high.len()];
    sar_into(high, low, acceleration, maximum, &mut output)?;
    Ok(output)
}

/// Computes SAR with the conventional 0.02/0.2 acceleration.
///
/// # Errors
///
/// See [`sar_into`].
pub fn sar_default<T: SeriesElement>(high: &[T], low: &[T]) -> Result<Vec<T>> {
    sar(high, low, T::from_f64(0.02)?, T::from_f64(0.2)?)
}
