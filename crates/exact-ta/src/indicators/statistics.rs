//! Rolling statistics (STDDEV, VAR, AVGDEV, BETA, CORREL,
//! LINEARREG_INTERCEPT).
//!
//! VAR and STDDEV run on windowed sum and sum-of-squares; a negative
//! variance from cancellation clamps to 0 in STDDEV. BETA regresses
//! one-bar percentage returns of two series. CORREL is Pearson's r over
//! the raw values. AVGDEV rescans each window.

use crate::error::Result;
use crate::traits::{
    validate_factor, validate_output_len, validate_period_range, validate_same_length,
    SeriesElement, ValidatedInput,
};

/// Returns the number of leading NaN values in VAR/STDDEV/AVGDEV/CORREL
/// and LINEARREG_INTERCEPT output.
#[inline]
#[must_use]
pub const fn stddev_lookback(period: usize) -> usize {
    period.saturating_sub(1)
}

/// Returns the number of leading NaN values in BETA output.
#[inline]
#[must_use]
pub const fn beta_lookback(period: usize) -> usize {
    period
}

fn var_kernel<T: SeriesElement>(data: &[T], period: usize, output: &mut [T]) {
    let period_t = T::from_usize(period).unwrap_or_else(|_| T::one());
    let lookback = period - 1;
    let mut sum1 = T::zero();
    let mut sum2 = T::zero();

    for &value in &data[..lookback] {
        sum1 = sum1 + value;
        sum2 = sum2 + value * value;
    }

    let mut trailing = 0;
    for i in lookback..data.len() {
        let value = data[i];
        sum1 = sum1 + value;
        sum2 = sum2 + value * value;

        let mean1 = sum1 / period_t;
        let mean2 = sum2 / period_t;

        let old = data[trailing];
        sum1 = sum1 - old;
        sum2 = sum2 - old * old;
        trailing += 1;

        output[i] = mean2 - mean1 * mean1;
    }
}

/// Computes the rolling variance into a caller-supplied buffer.
///
/// # Errors
///
/// - `Error::EmptyInput` if `data` is empty
/// - `Error::InvalidPeriod` if `period` is outside `1..=100_000`
/// - `Error::InsufficientData` if `data.len() < period`
/// - `Error::BufferTooSmall` if `output.len() < data.len()`
pub fn var_into<T: SeriesElement>(data: &[T], period: usize, output: &mut [T]) -> Result<()> {
    validate_period_range(period, 1, 100_000)?;
    data.validate_not_empty()?;
    data.validate_min_length(period, "var")?;
    validate_output_len(output.len(), data.len(), "var")?;
    crate::utils::fill_nan_prefix(output, stddev_lookback(period));
    var_kernel(data, period, output);
    Ok(())
}

/// Computes the rolling variance.
///
/// # Errors
///
/// See [`var_into`].
pub fn var<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<T>> {
    let mut output = vec![T::zero(); data.len()];
    var_into(data, period, &mut output)?;
    Ok(output)
}

/// Computes the rolling standard deviation scaled by `nbdev` into a
/// caller-supplied buffer. Negative variance clamps to 0.
///
/// # Errors
///
/// - `Error::EmptyInput` if `data` is empty
/// - `Error::InvalidPeriod` if `period` is outside `2..=100_000`
/// - `Error::InvalidParameter` if `nbdev` is not finite
/// - `Error::InsufficientData` if `data.len() < period`
/// - `Error::BufferTooSmall` if `output.len() < data.len()`
pub fn stddev_into<T: SeriesElement>(
    data: &[T],
    period: usize,
    nbdev: T,
    output: &mut [T],
) -> Result<()> {
    validate_period_range(period, 2, 100_000)?;
    validate_factor(nbdev.abs(), "nbdev")?;
    data.validate_not_empty()?;
    data.validate_min_length(period, "stddev")?;
    validate_output_len(output.len(), data.len(), "stddev")?;

    crate::utils::fill_nan_prefix(output, stddev_lookback(period));
    var_kernel(data, period, output);
    for slot in output[stddev_lookback(period)..data.len()].iter_mut() {
        *slot = if *slot > T::zero() {
            slot.sqrt() * nbdev
        } else {
            T::zero()
        };
    }
    Ok(())
}

/// Computes the rolling standard deviation.
///
/// # Errors
///
/// See [`stddev_into`].
pub fn stddev<T: SeriesElement>(data: &[T], period: usize, nbdev: T) -> Result<Vec<T>> {
    let mut output = vec![T::zero(); data.len()];
    stddev_into(data, period, nbdev, &mut output)?;
    Ok(output)
}

/// Computes the rolling mean absolute deviation into a caller-supplied
/// buffer.
///
/// # Errors
///
/// - `Error::EmptyInput` if `data` is empty
/// - `Error::InvalidPeriod` if `period` is outside `2..=100_000`
/// - `Error::InsufficientData` if `data.len() < period`
/// - `Error::BufferTooSmall` if `output.len() < data.len()`
pub fn avgdev_into<T: SeriesElement>(data: &[T], period: usize, output: &mut [T]) -> Result<()> {
    validate_period_range(period, 2, 100_000)?;
    data.validate_not_empty()?;
    data.validate_min_length(period, "avgdev")?;
    validate_output_len(output.len(), data.len(), "avgdev")?;

    crate::utils::fill_nan_prefix(output, stddev_lookback(period));
    let period_t = T::from_usize(period).unwrap_or_else(|_| T::one());
    for today in (period - 1)..data.len() {
        let mut sum = T::zero();
        for i in 0..period {
            sum = sum + data[today - i];
        }
        let mean = sum / period_t;
        let mut dev = T::zero();
        for i in 0..period {
            dev = dev + (data[today - i] - mean).abs();
        }
        output[today] = dev / period_t;
    }
    Ok(())
}

/// Computes the rolling mean absolute deviation.
///
/// # Errors
///
/// See [`avgdev_into`].
pub fn avgdev<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<T>> {
    let mut output = vec![T::zero(); data.len()];
    avgdev_into(data, period, &mut output)?;
    Ok(output)
}

fn pct_return<T: SeriesElement>(value: T, last: T) -> T {
    if last.abs() >= T::ta_epsilon() {
        (value - last) / last
    } else {
        T::zero()
    }
}

/// Computes rolling beta of `data` against `benchmark` into a
/// caller-supplied buffer.
///
/// Both series are converted to one-bar percentage returns; a previous
/// value below the degenerate threshold yields a 0 return.
///
/// # Errors
///
/// - `Error::EmptyInput` if `data` is empty
/// - `Error::InvalidInput` if the series lengths differ
/// - `Error::InvalidPeriod` if `period` is outside `1..=100_000`
/// - `Error::InsufficientData` if `data.len() < period + 1`
/// - `Error::BufferTooSmall` if `output.len() < data.len()`
pub fn beta_into<T: SeriesElement>(
    data: &[T],
    benchmark: &[T],
    period: usize,
    output: &mut [T],
) -> Result<()> {
    data.validate_not_empty()?;
    validate_same_length(
        &[data.len(), benchmark.len()],
        "data and benchmark must have the same length",
    )?;
    validate_period_range(period, 1, 100_000)?;
    data.validate_min_length(period + 1, "beta")?;
    validate_output_len(output.len(), data.len(), "beta")?;

    crate::utils::fill_nan_prefix(output, beta_lookback(period));

    let n_f = T::from_usize(period).unwrap_or_else(|_| T::one());
    let mut s_xx = T::zero();
    let mut s_xy = T::zero();
    let mut s_x = T::zero();
    let mut s_y = T::zero();

    let mut last_x = data[0];
    let mut last_y = benchmark[0];
    let mut trailing_last_x = last_x;
    let mut trailing_last_y = last_y;

    for i in 1..period {
        let x = pct_return(data[i], last_x);
        last_x = data[i];
        let y = pct_return(benchmark[i], last_y);
        last_y = benchmark[i];
        s_xx = s_xx + x * x;
        s_xy = s_xy + x * y;
        s_x = s_x + x;
        s_y = s_y + y;
    }

    let mut trailing_idx = 1;
    for i in period..data.len() {
        let x = pct_return(data[i], last_x);
        last_x = data[i];
        let y = pct_return(benchmark[i], last_y);
        last_y = benchmark[i];
        s_xx = s_xx + x * x;
        s_xy = s_xy + x * y;
        s_x = s_x + x;
        s_y = s_y + y;

        let x_t = pct_return(data[trailing_idx], trailing_last_x);
        trailing_last_x = data[trailing_idx];
        let y_t = pct_return(benchmark[trailing_idx], trailing_last_y);
        trailing_last_y = benchmark[trailing_idx];
        trailing_idx += 1;

        let denom = n_f * s_xx - s_x * s_x;
        output[i] = if denom.abs() >= T::ta_epsilon() {
            (n_f * s_xy - s_x * s_y) / denom
        } else {
            T::zero()
        };

        s_xx = s_xx - x_t * x_t;
        s_xy = s_xy - x_t * y_t;
        s_x = s_x - x_t;
        s_y = s_y - y_t;
    }
    Ok(())
}

/// Computes rolling beta.
///
/// # Errors
///
/// See [`beta_into`].
pub fn beta<T: SeriesElement>(data: &[T], benchmark: &[T], period: usize) -> Result<Vec<T>> {
    let mut output = vec![T::zero(); data.len()];
    beta_into(data, benchmark, period, &mut output)?;
    Ok(output)
}

/// Computes rolling Pearson correlation into a caller-supplied buffer.
///
/// A non-positive covariance denominator maps to 0.
///
/// # Errors
///
/// - `Error::EmptyInput` if `data` is empty
/// - `Error::InvalidInput` if the series lengths differ
/// - `Error::InvalidPeriod` if `period` is outside `1..=100_000`
/// - `Error::InsufficientData` if `data.len() < period`
/// - `Error::BufferTooSmall` if `output.len() < data.len()`
pub fn correl_into<T: SeriesElement>(
    data: &[T],
    other: &[T],
    period: usize,
    output: &mut [T],
) -> Result<()> {
    data.validate_not_empty()?;
    validate_same_length(
        &[data.len(), other.len()],
        "series must have the same length",
    )?;
    validate_period_range(period, 1, 100_000)?;
    data.validate_min_length(period, "correl")?;
    validate_output_len(output.len(), data.len(), "correl")?;

    crate::utils::fill_nan_prefix(output, stddev_lookback(period));

    let n_f = T::from_usize(period).unwrap_or_else(|_| T::one());
    let mut sum_xy = T::zero();
    let mut sum_x = T::zero();
    let mut sum_y = T::zero();
    let mut sum_x2 = T::zero();
    let mut sum_y2 = T::zero();
    for i in 0..period {
        let x = data[i];
        let y = other[i];
        sum_x = sum_x + x;
        sum_y = sum_y + y;
        sum_xy = sum_xy + x * y;
        sum_x2 = sum_x2 + x * x;
        sum_y2 = sum_y2 + y * y;
    }

    let correl_at = |sum_x: T, sum_y: T, sum_xy: T, sum_x2: T, sum_y2: T| {
        let temp = (sum_x2 - sum_x * sum_x / n_f) * (sum_y2 - sum_y * sum_y / n_f);
        if temp > T::ta_epsilon() {
            (sum_xy - sum_x * sum_y / n_f) / temp.sqrt()
        } else {
            T::zero()
        }
    };

    let mut trailing_idx = 0;
    let mut trailing_x = data[trailing_idx];
    let mut trailing_y = other[trailing_idx];
    trailing_idx += 1;
    output[period - 1] = correl_at(sum_x, sum_y, sum_xy, sum_x2, sum_y2);

    for today in period..data.len() {
        sum_x = sum_x - trailing_x;
        sum_x2 = sum_x2 - trailing_x * trailing_x;
        sum_xy = sum_xy - trailing_x * trailing_y;
        sum_y = sum_y - trailing_y;
        sum_y2 = sum_y2 - trailing_y * trailing_y;

        let x = data[today];
        let y = other[today];
        sum_x = sum_x + x;
        sum_x2 = sum_x2 + x * x;
        sum_y = sum_y + y;
        sum_y2 = sum_y2 + y * y;
        sum_xy = sum_xy + x * y;

        trailing_x = data[trailing_idx];
        trailing_y = other[trailing_idx];
        trailing_idx += 1;

        output[today] = correl_at(sum_x, sum_y, sum_xy, sum_x2, sum_y2);
    }
    Ok(())
}

/// Computes rolling Pearson correlation.
///
/// # Errors
///
/// See [`correl_into`].
pub fn correl<T: SeriesElement>(data: &[T], other: &[T], period: usize) -> Result<Vec<T>> {
    let mut output = vec![T::zero(); data.len()];
    correl_into(data, other, period, &mut output)?;
    Ok(output)
}

/// Computes the rolling linear regression intercept into a
/// caller-supplied buffer.
///
/// The regression runs over x coordinates `0..period` with the most
/// recent bar at x = 0.
///
/// # Errors
///
/// - `Error::EmptyInput` if `data` is empty
/// - `Error::InvalidPeriod` if `period` is outside `2..=100_000`
/// - `Error::InsufficientData` if `data.len() < period`
/// - `Error::BufferTooSmall` if `output.len() < data.len()`
pub fn linearreg_intercept_into<T: SeriesElement>(
    data: &[T],
    period: usize,
    output: &mut [T],
) -> Result<()> {
    validate_period_range(period, 2, 100_000)?;
    data.validate_not_empty()?;
    data.validate_min_length(period, "linearreg_intercept")?;
    validate_output_len(output.len(), data.len(), "linearreg_intercept")?;

    crate::utils::fill_nan_prefix(output, stddev_lookback(period));

    let period_t = T::from_usize(period).unwrap_or_else(|_| T::one());
    let sum_x = period_t * (period_t - T::one()) * T::from_f64(0.5)?;
    let sum_xsqr = period_t * (period_t - T::one()) * (T::two() * period_t - T::one())
        / T::from_f64(6.0)?;
    let divisor = sum_x * sum_x - period_t * sum_xsqr;

    for today in (period - 1)..data.len() {
        let mut sum_xy = T::zero();
        let mut sum_y = T::zero();
        for i in (0..period).rev() {
            let value = data[today - i];
            sum_y = sum_y + value;
            sum_xy = sum_xy + T::from_usize(i)? * value;
        }
        let m = (period_t * sum_xy - sum_x * sum_y) / divisor;
        output[today] = (sum_y - m * sum_x) / period_t;
    }
    Ok(())
}

/// Computes the rolling linear regression intercept.
///
/// # Errors
///
/// See [`linearreg_intercept_into`].
pub fn linearreg_intercept<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<T>> {
    let mut output = vec![T::zero(); data.len()];
    linearreg_intercept_into(data, period, &mut output)?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{approx_eq, count_nan_prefix, EPSILON};

    #[test]
    fn test_var_basic() {
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let result = var(&data, 3).unwrap();
        assert_eq!(count_nan_prefix(&result), 2);
        // Population variance of {1,2,3} is 2/3
        assert!(approx_eq(result[2], 2.0 / 3.0, EPSILON));
        assert!(approx_eq(result[3], 2.0 / 3.0, EPSILON));
    }

    #[test]
    fn test_stddev_is_sqrt_var() {
        let data: Vec<f64> = vec![2.0, 4.0, 6.0, 9.0, 5.0, 3.0];
        let s = stddev(&data, 4, 1.0).unwrap();
        let v = var(&data, 4).unwrap();
        for i in 3..data.len() {
            assert!(approx_eq(s[i], v[i].sqrt(), EPSILON));
        }
    }

    #[test]
    fn test_stddev_nbdev_scales() {
        let data = vec![2.0, 4.0, 6.0, 9.0, 5.0, 3.0];
        let s1 = stddev(&data, 4, 1.0).unwrap();
        let s2 = stddev(&data, 4, 2.0).unwrap();
        for i in 3..data.len() {
            assert!(approx_eq(s2[i], s1[i] * 2.0, EPSILON));
        }
    }

    #[test]
    fn test_stddev_constant_series_is_zero() {
        // Cancellation can drive the raw variance slightly negative
        let data = vec![10.123_456_789; 10];
        let result = stddev(&data, 5, 1.0).unwrap();
        for i in 4..data.len() {
            assert!(approx_eq(result[i], 0.0, EPSILON));
        }
    }

    #[test]
    fn test_avgdev_basic() {
        let data = vec![1.0, 2.0, 3.0, 4.0, 7.0];
        let result = avgdev(&data, 4).unwrap();
        assert_eq!(count_nan_prefix(&result), 3);
        // Window {1,2,3,4}: mean 2.5, deviations 1.5+0.5+0.5+1.5 = 4
        assert!(approx_eq(result[3], 1.0, EPSILON));
        // Window {2,3,4,7}: mean 4, deviations 2+1+0+3 = 6
        assert!(approx_eq(result[4], 1.5, EPSILON));
    }

    #[test]
    fn test_beta_identical_series_is_one() {
        let data: Vec<f64> = (0..30)
            .map(|i| 100.0 + 5.0 * (f64::from(u32::try_from(i).unwrap()) * 0.7).sin())
            .collect();
        let result = beta(&data, &data, 5).unwrap();
        assert_eq!(count_nan_prefix(&result), 5);
        for i in 5..data.len() {
            assert!(approx_eq(result[i], 1.0, 1e-9));
        }
    }

    #[test]
    fn test_beta_scaled_series() {
        // Returns of 2x the price series are identical, so beta is 1
        let data: Vec<f64> = (0..20)
            .map(|i| 50.0 + 3.0 * (f64::from(u32::try_from(i).unwrap()) * 0.9).cos())
            .collect();
        let doubled: Vec<f64> = data.iter().map(|&x| x * 2.0).collect();
        let result = beta(&doubled, &data, 5).unwrap();
        for i in 5..data.len() {
            assert!(approx_eq(result[i], 1.0, 1e-9));
        }
    }

    #[test]
    fn test_correl_perfect_positive() {
        let x: Vec<f64> = (0..20).map(f64::from).collect();
        let y: Vec<f64> = x.iter().map(|&v| 3.0 * v + 7.0).collect();
        let result = correl(&x, &y, 10).unwrap();
        assert_eq!(count_nan_prefix(&result), 9);
        for i in 9..x.len() {
            assert!(approx_eq(result[i], 1.0, 1e-9));
        }
    }

    #[test]
    fn test_correl_perfect_negative() {
        let x: Vec<f64> = (0..20).map(f64::from).collect();
        let y: Vec<f64> = x.iter().map(|&v| -2.0 * v + 100.0).collect();
        let result = correl(&x, &y, 10).unwrap();
        for i in 9..x.len() {
            assert!(approx_eq(result[i], -1.0, 1e-9));
        }
    }

    #[test]
    fn test_correl_constant_series_is_zero() {
        let x = vec![5.0; 15];
        let y: Vec<f64> = (0..15).map(f64::from).collect();
        let result = correl(&x, &y, 10).unwrap();
        for i in 9..x.len() {
            assert!(approx_eq(result[i], 0.0, EPSILON));
        }
    }

    #[test]
    fn test_linearreg_intercept_on_line() {
        // For data[t] = 2t + 3 the regression over x = i (newest at 0,
        // increasing into the past) has slope -2, intercept = newest value
        let data: Vec<f64> = (0..20).map(|i| 2.0 * f64::from(i) + 3.0).collect();
        let result = linearreg_intercept(&data, 5).unwrap();
        assert_eq!(count_nan_prefix(&result), 4);
        for i in 4..data.len() {
            assert!(approx_eq(result[i], data[i], 1e-9));
        }
    }

    #[test]
    fn test_length_mismatch() {
        let x = vec![1.0; 10];
        let y = vec![1.0; 9];
        assert!(beta(&x, &y, 3).is_err());
        assert!(correl(&x, &y, 3).is_err());
    }
}
