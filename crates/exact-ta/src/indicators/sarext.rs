//! Extended Parabolic SAR (SAREXT).
//!
//! SAR with independent long/short acceleration schedules, a caller
//! chosen starting stop, and an optional offset applied on reversal.
//! Output follows the reference sign convention: the stop is emitted
//! negative while the state machine is short.

use crate::error::{Error, Result};
use crate::traits::{
    validate_factor, validate_output_len, validate_same_length, SeriesElement, ValidatedInput,
};
use crate::utils::fill_nan_prefix;

/// SAREXT parameters.
///
/// `start_value` of zero lets the first bar transition pick the initial
/// direction and stop; a positive value forces a long start at that
/// stop, a negative value a short start at its absolute value.
#[derive(Debug, Clone, Copy)]
pub struct SarExtParams<T> {
    /// Starting stop, sign-encoded as described above.
    pub start_value: T,
    /// Fraction of the stop added (short) or subtracted (long) on reversal.
    pub offset_on_reverse: T,
    /// Acceleration factor a long stretch starts from.
    pub af_init_long: T,
    /// Acceleration added per new high while long.
    pub af_long: T,
    /// Ceiling for the long acceleration factor.
    pub af_max_long: T,
    /// Acceleration factor a short stretch starts from.
    pub af_init_short: T,
    /// Acceleration added per new low while short.
    pub af_short: T,
    /// Ceiling for the short acceleration factor.
    pub af_max_short: T,
}

impl<T: SeriesElement> Default for SarExtParams<T> {
    fn default() -> Self {
        let step = T::from_f64(0.02).unwrap_or_else(|_| T::zero());
        let max = T::from_f64(0.20).unwrap_or_else(|_| T::zero());
        Self {
            start_value: T::zero(),
            offset_on_reverse: T::zero(),
            af_init_long: step,
            af_long: step,
            af_max_long: max,
            af_init_short: step,
            af_short: step,
            af_max_short: max,
        }
    }
}

/// Returns the number of leading NaN values in SAREXT output.
#[inline]
#[must_use]
pub const fn sarext_lookback() -> usize {
    1
}

/// Returns the minimum input length that produces at least one value.
#[inline]
#[must_use]
pub const fn sarext_min_len() -> usize {
    2
}

fn validate_params<T: SeriesElement>(params: &SarExtParams<T>) -> Result<()> {
    if !params.start_value.is_finite() {
        return Err(Error::InvalidParameter {
            name: "start_value",
            reason: "must be finite",
        });
    }
    validate_factor(params.offset_on_reverse, "offset_on_reverse")?;
    validate_factor(params.af_init_long, "af_init_long")?;
    validate_factor(params.af_long, "af_long")?;
    validate_factor(params.af_max_long, "af_max_long")?;
    validate_factor(params.af_init_short, "af_init_short")?;
    validate_factor(params.af_short, "af_short")?;
    validate_factor(params.af_max_short, "af_max_short")?;
    Ok(())
}

/// Computes SAREXT into a caller-supplied buffer.
///
/// Acceleration inits and steps above their ceiling are clamped down
/// before use.
///
/// # Errors
///
/// - `Error::EmptyInput` if the inputs are empty
/// - `Error::InvalidInput` if the input lengths differ
/// - `Error::InvalidParameter` if `start_value` is not finite or any
///   other parameter is negative or not finite
/// - `Error::InsufficientData` if the inputs hold fewer than 2 bars
/// - `Error::BufferTooSmall` if `output.len() < high.len()`
pub fn sarext_into<T: SeriesElement>(
    high: &[T],
    low: &[T],
    params: SarExtParams<T>,
    output: &mut [T],
) -> Result<()> {
    validate_params(&params)?;
    high.validate_not_empty()?;
    validate_same_length(&[high.len(), low.len()], "sarext")?;
    high.validate_min_length(sarext_min_len(), "sarext")?;
    validate_output_len(output.len(), high.len(), "sarext")?;

    let af_init_long = params.af_init_long.min(params.af_max_long);
    let af_init_short = params.af_init_short.min(params.af_max_short);
    let af_step_long = params.af_long.min(params.af_max_long);
    let af_step_short = params.af_short.min(params.af_max_short);
    let offset = params.offset_on_reverse;

    let mut af_long = af_init_long;
    let mut af_short = af_init_short;

    let mut is_long;
    if params.start_value == T::zero() {
        let up_move = high[1] - high[0];
        let down_move = low[0] - low[1];
        is_long = !(down_move > T::zero() && down_move > up_move);
    } else {
        is_long = params.start_value > T::zero();
    }

    let mut ep;
    let mut sar;
    if params.start_value == T::zero() {
        if is_long {
            ep = high[1];
            sar = low[0];
        } else {
            ep = low[1];
            sar = high[0];
        }
    } else if is_long {
        ep = high[1];
        sar = params.start_value;
    } else {
        ep = low[1];
        sar = params.start_value.abs();
    }

    let mut new_low = low[1];
    let mut new_high = high[1];

    fill_nan_prefix(output, sarext_lookback());
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
                if offset != T::zero() {
                    sar = sar + sar * offset;
                }
                output[idx] = -sar;

                af_short = af_init_short;
                ep = new_low;

                sar = sar + af_short * (ep - sar);
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
                    af_long = af_long + af_step_long;
                    if af_long > params.af_max_long {
                        af_long = params.af_max_long;
                    }
                }

                sar = sar + af_long * (ep - sar);
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
            if offset != T::zero() {
                sar = sar - sar * offset;
            }
            output[idx] = sar;

            af_long = af_init_long;
            ep = new_high;

            sar = sar + af_long * (ep - sar);
            if sar > prev_low {
                sar = prev_low;
            }
            if sar > new_low {
                sar = new_low;
            }
        } else {
            output[idx] = -sar;

            if new_low < ep {
                ep = new_low;
                af_short = af_short + af_step_short;
                if af_short > params.af_max_short {
                    af_short = params.af_max_short;
                }
            }

            sar = sar + af_short * (ep - sar);
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

/// Computes SAREXT.
///
/// # Errors
///
/// See [`sarext_into`].
pub fn sarext<T: SeriesElement>(
    high: &[T],
    low: &[T],
    params: SarExtParams<T>,
) -> Result<Vec<T>> {
    let mut output = vec![T::zero(); high.len()];
    sarext_into(high, low, params, &mut output)?;
    Ok(output)
}

/// Computes SAREXT with the default 0.02/0.2 schedules on both sides.
///
/// # Errors
///
/// See [`sarext_into`].
pub fn sarext_default<T: SeriesElement>(high: &[T], low: &[T]) -> Result<Vec<T>> {
    sarext(high, low, SarExtParams::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::sar::sar_default;
    use crate::utils::{approx_eq, count_nan_prefix, EPSILON};

    fn trend_bars() -> (Vec<f64>, Vec<f64>) {
        let high: Vec<f64> = (0..12).map(|i| 10.0 + f64::from(i) * 0.5).collect();
        let low: Vec<f64> = high.iter().map(|h| h - 1.0).collect();
        (high, low)
    }

    fn falling_bars() -> (Vec<f64>, Vec<f64>) {
        let high: Vec<f64> = (0..12).map(|i| 20.0 - f64::from(i) * 0.5).collect();
        let low: Vec<f64> = high.iter().map(|h| h - 1.0).collect();
        (high, low)
    }

    #[test]
    fn test_sarext_nan_prefix() {
        let (high, low) = trend_bars();
        let result = sarext_default(&high, &low).unwrap();
        assert_eq!(count_nan_prefix(&result), 1);
    }

    #[test]
    fn test_sarext_defaults_match_sar_in_uptrend() {
        let (high, low) = trend_bars();
        let ext = sarext_default(&high, &low).unwrap();
        let plain = sar_default(&high, &low).unwrap();
        for i in 1..high.len() {
            assert!(approx_eq(ext[i], plain[i], EPSILON));
        }
    }

    #[test]
    fn test_sarext_short_values_negative() {
        let (high, low) = falling_bars();
        let result = sarext_default(&high, &low).unwrap();
        let plain = sar_default(&high, &low).unwrap();
        for i in 1..high.len() {
            assert!(result[i] < 0.0);
            assert!(approx_eq(result[i], -plain[i], EPSILON));
        }
    }

    #[test]
    fn test_sarext_positive_start_value_forces_long() {
        let (high, low) = falling_bars();
        let params = SarExtParams {
            start_value: 18.0,
            ..SarExtParams::default()
        };
        let result = sarext(&high, &low, params).unwrap();
        // First bar holds the forced long stop; the falling market then
        // breaks it and the machine flips short.
        assert!(approx_eq(result[1], 18.0, EPSILON));
        assert!(result[2] < 0.0);
    }

    #[test]
    fn test_sarext_negative_start_value_forces_short() {
        let (high, low) = trend_bars();
        let params = SarExtParams {
            start_value: -30.0,
            ..SarExtParams::default()
        };
        let result = sarext(&high, &low, params).unwrap();
        // Stop far above a rising market: stays short at first.
        assert!(approx_eq(result[1], -30.0, EPSILON));
    }

    #[test]
    fn test_sarext_offset_on_reverse() {
        let high = vec![10.0, 10.5, 11.0, 11.5, 12.0, 8.0, 7.5];
        let low = vec![9.5, 10.0, 10.5, 11.0, 11.5, 7.0, 6.5];
        let plain = sarext_default(&high, &low).unwrap();
        let params = SarExtParams {
            offset_on_reverse: 0.1,
            ..SarExtParams::default()
        };
        let offset = sarext(&high, &low, params).unwrap();
        // The reversal bar lands 10% further from the market.
        assert!(approx_eq(offset[5], plain[5] * 1.1, 1e-9));
    }

    #[test]
    fn test_sarext_asymmetric_schedules_differ() {
        let (high, low) = falling_bars();
        let params = SarExtParams {
            af_init_short: 0.04,
            af_short: 0.04,
            af_max_short: 0.4,
            ..SarExtParams::default()
        };
        let fast = sarext(&high, &low, params).unwrap();
        let slow = sarext_default(&high, &low).unwrap();
        let mut differs = false;
        for i in 2..high.len() {
            if !approx_eq(fast[i], slow[i], 1e-12) {
                differs = true;
            }
        }
        assert!(differs);
    }

    #[test]
    fn test_sarext_init_clamped_to_max() {
        let (high, low) = trend_bars();
        let params = SarExtParams {
            af_init_long: 0.5,
            af_long: 0.5,
            af_max_long: 0.2,
            ..SarExtParams::default()
        };
        let clamped = sarext(&high, &low, params).unwrap();
        let direct = sarext(
            &high,
            &low,
            SarExtParams {
                af_init_long: 0.2,
                af_long: 0.2,
                af_max_long: 0.2,
                ..SarExtParams::default()
            },
        )
        .unwrap();
        for i in 1..high.len() {
            assert!(approx_eq(clamped[i], direct[i], EPSILON));
        }
    }

    #[test]
    fn test_sarext_negative_offset_rejected() {
        let (high, low) = trend_bars();
        let params = SarExtParams {
            offset_on_reverse: -0.1,
            ..SarExtParams::default()
        };
        assert!(sarext(&high, &low, params).is_err());
    }

    #[test]
    fn test_sarext_insufficient_data() {
        let high = vec![1.0];
        let low = vec![0.5];
        assert!(sarext_default(&high, &low).is_err());
    }
}
