//! Moving Average Convergence/Divergence (MACD, MACDEXT, MACDFIX).
//!
//! The classic MACD subtracts a slow EMA from a fast EMA and smooths the
//! difference with a signal EMA. Both component EMAs are seeded with an
//! SMA ending at the slow lookback index rather than at the start of the
//! series, and the signal EMA is seeded from the first `signal_period`
//! MACD values. MACDFIX pins the pair to 12/26 with the fixed Metastock
//! smoothing constants 0.15 and 0.075. MACDEXT runs each stage through
//! the MA dispatcher instead.

use crate::error::Result;
use crate::indicators::ma::{ma, ma_lookback, MaType};
use crate::traits::{
    validate_output_len, validate_period_range, SeriesElement, ValidatedInput,
};

/// MACD output: line, signal and histogram.
#[derive(Debug, Clone, PartialEq)]
pub struct MacdOutput<T> {
    /// Fast MA minus slow MA.
    pub macd: Vec<T>,
    /// Smoothed MACD line.
    pub signal: Vec<T>,
    /// MACD minus signal.
    pub histogram: Vec<T>,
}

const fn signal_lookback(signal_period: usize) -> usize {
    if signal_period > 1 {
        signal_period - 1
    } else {
        0
    }
}

/// Returns the number of leading NaN values in MACD output.
#[inline]
#[must_use]
pub const fn macd_lookback(fast_period: usize, slow_period: usize, signal_period: usize) -> usize {
    let slow = if slow_period < fast_period {
        fast_period
    } else {
        slow_period
    };
    (slow - 1) + signal_lookback(signal_period)
}

/// Returns the minimum input length that produces at least one output.
#[inline]
#[must_use]
pub const fn macd_min_len(fast_period: usize, slow_period: usize, signal_period: usize) -> usize {
    macd_lookback(fast_period, slow_period, signal_period) + 1
}

/// Returns the number of leading NaN values in MACDFIX output.
#[inline]
#[must_use]
pub const fn macdfix_lookback(signal_period: usize) -> usize {
    25 + signal_lookback(signal_period)
}

/// EMA over `data[start_idx..]`, seeded with an SMA of the `period`
/// values ending at `start_idx`. Writes `data.len() - start_idx` values.
fn ema_seeded_at<T: SeriesElement>(
    data: &[T],
    start_idx: usize,
    period: usize,
    k: T,
    out: &mut [T],
) {
    let base = start_idx + 1 - period;
    let mut sum = T::zero();
    for &value in &data[base..=start_idx] {
        sum = sum + value;
    }
    let mut prev = sum / T::from_usize(period).unwrap_or_else(|_| T::one());
    out[0] = prev;

    for (slot, &value) in out[1..].iter_mut().zip(&data[start_idx + 1..]) {
        prev = (value - prev) * k + prev;
        *slot = prev;
    }
}

#[allow(clippy::too_many_arguments)]
fn macd_kernel<T: SeriesElement>(
    data: &[T],
    fast_period: usize,
    slow_period: usize,
    k_fast: T,
    k_slow: T,
    signal_period: usize,
    out_macd: &mut [T],
    out_signal: &mut [T],
    out_hist: &mut [T],
) {
    let n = data.len();
    let lookback_signal = signal_lookback(signal_period);
    let ema_start = slow_period - 1;
    let buf_len = n - ema_start;

    let mut fast_buf = vec![T::zero(); buf_len];
    let mut slow_buf = vec![T::zero(); buf_len];
    ema_seeded_at(data, ema_start, fast_period, k_fast, &mut fast_buf);
    ema_seeded_at(data, ema_start, slow_period, k_slow, &mut slow_buf);

    if signal_period == 1 {
        for t in 0..buf_len {
            let idx = ema_start + t;
            let macd_val = fast_buf[t] - slow_buf[t];
            out_macd[idx] = macd_val;
            out_signal[idx] = macd_val;
            out_hist[idx] = T::zero();
        }
        return;
    }

    let k_sig = T::two() / (T::from_usize(signal_period).unwrap_or_else(|_| T::one()) + T::one());

    // Signal seed: SMA of the first signal_period MACD values.
    let mut sum = T::zero();
    for t in 0..signal_period {
        sum = sum + (fast_buf[t] - slow_buf[t]);
    }
    let mut prev_sig = sum / T::from_usize(signal_period).unwrap_or_else(|_| T::one());

    for t in lookback_signal..buf_len {
        let idx = ema_start + t;
        let macd_val = fast_buf[t] - slow_buf[t];
        if t > lookback_signal {
            prev_sig = (macd_val - prev_sig) * k_sig + prev_sig;
        }
        out_macd[idx] = macd_val;
        out_signal[idx] = prev_sig;
        out_hist[idx] = macd_val - prev_sig;
    }
}

fn validate_outputs<T: SeriesElement>(
    data: &[T],
    lookback: usize,
    indicator: &'static str,
    out_macd: &mut [T],
    out_signal: &mut [T],
    out_hist: &mut [T],
) -> Result<()> {
    data.validate_min_length(lookback + 1, indicator)?;
    validate_output_len(out_macd.len(), data.len(), indicator)?;
    validate_output_len(out_signal.len(), data.len(), indicator)?;
    validate_output_len(out_hist.len(), data.len(), indicator)?;
    crate::utils::fill_nan_prefix(out_macd, lookback);
    crate::utils::fill_nan_prefix(out_signal, lookback);
    crate::utils::fill_nan_prefix(out_hist, lookback);
    Ok(())
}

/// Computes MACD into caller-supplied buffers.
///
/// The fast and slow periods are swapped when `slow_period <
/// fast_period`.
///
/// # Errors
///
/// - `Error::EmptyInput` if `data` is empty
/// - `Error::InvalidPeriod` if `fast_period` or `slow_period` is outside
///   `2..=100_000`, or `signal_period` is outside `1..=100_000`
/// - `Error::InsufficientData` if `data` is shorter than the total
///   lookback plus one
/// - `Error::BufferTooSmall` if any output is shorter than `data`
pub fn macd_into<T: SeriesElement>(
    data: &[T],
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
    out_macd: &mut [T],
    out_signal: &mut [T],
    out_hist: &mut [T],
) -> Result<()> {
    validate_period_range(fast_period, 2, 100_000)?;
    validate_period_range(slow_period, 2, 100_000)?;
    validate_period_range(signal_period, 1, 100_000)?;
    data.validate_not_empty()?;

    let (fast, slow) = if slow_period < fast_period {
        (slow_period, fast_period)
    } else {
        (fast_period, slow_period)
    };
    let lookback = macd_lookback(fast, slow, signal_period);
    validate_outputs(data, lookback, "macd", out_macd, out_signal, out_hist)?;

    let k_fast = T::two() / (T::from_usize(fast)? + T::one());
    let k_slow = T::two() / (T::from_usize(slow)? + T::one());
    macd_kernel(
        data,
        fast,
        slow,
        k_fast,
        k_slow,
        signal_period,
        out_macd,
        out_signal,
        out_hist,
    );
    Ok(())
}

/// Computes MACD with the given periods.
///
/// # Errors
///
/// See [`macd_into`].
pub fn macd<T: SeriesElement>(
    data: &[T],
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
) -> Result<MacdOutput<T>> {
    let mut out_macd = vec![T::zero(); data.len()];
    let mut out_signal = vec![T::zero(); data.len()];
    let mut out_hist = vec![T::zero(); data.len()];
    macd_into(
        data,
        fast_period,
        slow_period,
        signal_period,
        &mut out_macd,
        &mut out_signal,
        &mut out_hist,
    )?;
    Ok(MacdOutput {
        macd: out_macd,
        signal: out_signal,
        histogram: out_hist,
    })
}

/// Computes MACD with the fixed 12/26 pair and Metastock smoothing
/// constants (0.15 and 0.075).
///
/// # Errors
///
/// See [`macd_into`].
pub fn macdfix<T: SeriesElement>(data: &[T], signal_period: usize) -> Result<MacdOutput<T>> {
    validate_period_range(signal_period, 1, 100_000)?;
    data.validate_not_empty()?;

    let lookback = macdfix_lookback(signal_period);
    let mut out_macd = vec![T::zero(); data.len()];
    let mut out_signal = vec![T::zero(); data.len()];
    let mut out_hist = vec![T::zero(); data.len()];
    validate_outputs(
        data,
        lookback,
        "macdfix",
        &mut out_macd,
        &mut out_signal,
        &mut out_hist,
    )?;

    macd_kernel(
        data,
        12,
        26,
        T::from_f64(0.15)?,
        T::from_f64(0.075)?,
        signal_period,
        &mut out_macd,
        &mut out_signal,
        &mut out_hist,
    );
    Ok(MacdOutput {
        macd: out_macd,
        signal: out_signal,
        histogram: out_hist,
    })
}

/// Computes MACD with a selectable MA type per stage.
///
/// The fast and slow stages swap both period and type when
/// `slow_period < fast_period`.
///
/// # Errors
///
/// See [`macd_into`]; additionally any error from the underlying MA
/// computations.
#[allow(clippy::too_many_arguments)]
pub fn macdext<T: SeriesElement>(
    data: &[T],
    fast_period: usize,
    fast_type: MaType,
    slow_period: usize,
    slow_type: MaType,
    signal_period: usize,
    signal_type: MaType,
) -> Result<MacdOutput<T>> {
    validate_period_range(fast_period, 2, 100_000)?;
    validate_period_range(slow_period, 2, 100_000)?;
    validate_period_range(signal_period, 1, 100_000)?;
    data.validate_not_empty()?;

    let (fp, fmt, sp, smt) = if slow_period < fast_period {
        (slow_period, slow_type, fast_period, fast_type)
    } else {
        (fast_period, fast_type, slow_period, slow_type)
    };

    let lookback_largest = ma_lookback(fp, fmt).max(ma_lookback(sp, smt));
    let lookback_signal = ma_lookback(signal_period, signal_type);
    let lookback = lookback_largest + lookback_signal;

    let mut out_macd = vec![T::zero(); data.len()];
    let mut out_signal = vec![T::zero(); data.len()];
    let mut out_hist = vec![T::zero(); data.len()];
    validate_outputs(
        data,
        lookback,
        "macdext",
        &mut out_macd,
        &mut out_signal,
        &mut out_hist,
    )?;

    let fast_ma = ma(data, fp, fmt)?;
    let slow_ma = ma(data, sp, smt)?;
    let macd_line: Vec<T> = fast_ma
        .iter()
        .zip(&slow_ma)
        .map(|(&f, &s)| f - s)
        .collect();

    let macd_valid = &macd_line[lookback_largest..];
    let sig_full = ma(macd_valid, signal_period, signal_type)?;
    let signal_valid = &sig_full[lookback_signal..];

    for (offset, &sig) in signal_valid.iter().enumerate() {
        let idx = lookback + offset;
        out_macd[idx] = macd_line[idx];
        out_signal[idx] = sig;
        out_hist[idx] = macd_line[idx] - sig;
    }

    Ok(MacdOutput {
        macd: out_macd,
        signal: out_signal,
        histogram: out_hist,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{approx_eq, count_nan_prefix, EPSILON};

    fn test_data() -> Vec<f64> {
        (0..80)
            .map(|i| 100.0 + 10.0 * (f64::from(u32::try_from(i).unwrap()) * 0.15).sin())
            .collect()
    }

    #[test]
    fn test_macd_lookback() {
        assert_eq!(macd_lookback(12, 26, 9), 33);
        assert_eq!(macd_lookback(26, 12, 9), 33);
        assert_eq!(macd_lookback(12, 26, 1), 25);
        assert_eq!(macdfix_lookback(9), 33);
    }

    #[test]
    fn test_macd_nan_prefix_and_histogram() {
        let data = test_data();
        let result = macd(&data, 12, 26, 9).unwrap();
        assert_eq!(count_nan_prefix(&result.macd), 33);
        assert_eq!(count_nan_prefix(&result.signal), 33);
        assert_eq!(count_nan_prefix(&result.histogram), 33);
        for i in 33..data.len() {
            assert!(approx_eq(
                result.histogram[i],
                result.macd[i] - result.signal[i],
                EPSILON
            ));
        }
    }

    #[test]
    fn test_macd_swaps_fast_slow() {
        let data = test_data();
        let a = macd(&data, 12, 26, 9).unwrap();
        let b = macd(&data, 26, 12, 9).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_macd_signal_period_one() {
        let data = test_data();
        let result = macd(&data, 12, 26, 1).unwrap();
        for i in 25..data.len() {
            assert!(approx_eq(result.signal[i], result.macd[i], EPSILON));
            assert!(approx_eq(result.histogram[i], 0.0, EPSILON));
        }
    }

    #[test]
    fn test_macd_constant_series_is_zero() {
        let data = vec![100.0; 60];
        let result = macd(&data, 12, 26, 9).unwrap();
        for i in 33..data.len() {
            assert!(approx_eq(result.macd[i], 0.0, EPSILON));
            assert!(approx_eq(result.signal[i], 0.0, EPSILON));
        }
    }

    #[test]
    fn test_macdfix_uses_fixed_constants() {
        // MACDFIX differs from MACD(12, 26) because the smoothing
        // constants are 0.15/0.075 instead of 2/13 and 2/27
        let data = test_data();
        let fix = macdfix(&data, 9).unwrap();
        let classic = macd(&data, 12, 26, 9).unwrap();
        assert_eq!(count_nan_prefix(&fix.macd), 33);
        let mut differs = false;
        for i in 33..data.len() {
            if (fix.macd[i] - classic.macd[i]).abs() > EPSILON {
                differs = true;
            }
        }
        assert!(differs);
    }

    #[test]
    fn test_macdext_sma_stages() {
        let data = test_data();
        let result = macdext(
            &data,
            12,
            MaType::Sma,
            26,
            MaType::Sma,
            9,
            MaType::Sma,
        )
        .unwrap();
        assert_eq!(count_nan_prefix(&result.macd), 33);
        for i in 33..data.len() {
            assert!(result.macd[i].is_finite());
            assert!(approx_eq(
                result.histogram[i],
                result.macd[i] - result.signal[i],
                EPSILON
            ));
        }
    }

    #[test]
    fn test_macd_insufficient_data() {
        let data = vec![1.0; 33];
        assert!(macd(&data, 12, 26, 9).is_err());
    }

    #[test]
    fn test_macd_invalid_periods() {
        let data = test_data();
        assert!(macd(&data, 1, 26, 9).is_err());
        assert!(macd(&data, 12, 26, 0).is_err());
    }
}
