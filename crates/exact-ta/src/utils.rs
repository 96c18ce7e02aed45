//! Utility functions and numeric policy constants for exact-ta.
//!
//! This module provides shared utility functions used throughout the library
//! and exposed for user convenience, along with the zero-guard and sentinel
//! constants the reference library bakes into its kernels.
//!
//! # Floating-Point Comparison
//!
//! Due to the nature of floating-point arithmetic, exact equality comparison
//! is often inappropriate. This module provides tolerance-based comparison
//! functions for use in testing and validation.
//!
//! # Example
//!
//! ```
//! use exact_ta::utils::{approx_eq, EPSILON};
//!
//! let a = 1.0 / 3.0;
//! let b = 0.333333333333333;
//! assert!(approx_eq(a, b, EPSILON));
//! ```

use crate::traits::SeriesElement;

/// Zero-guard threshold used by the reference kernels.
///
/// A denominator whose magnitude is strictly below this value is treated as
/// zero rather than divided by.
pub const TA_EPSILON: f64 = 1e-14;

/// Sentinel "very large" bound used by the parabolic SAR extreme-point
/// clamps. Matches the reference library's `TA_REAL_MAX`.
pub const TA_REAL_MAX: f64 = 3e37;

/// Standard epsilon for high-precision floating-point comparisons.
///
/// This tolerance (1e-10) is appropriate for most indicator calculations
/// where accumulated floating-point error is minimal.
pub const EPSILON: f64 = 1e-10;

/// Looser epsilon for comparisons involving accumulated floating-point operations.
///
/// Use this tolerance (1e-6) when comparing results that involve many
/// accumulated operations or when absolute precision is less critical.
pub const LOOSE_EPSILON: f64 = 1e-6;

/// Approximate equality check for floating-point values.
///
/// Returns `true` if `a` and `b` are within `tolerance` of each other,
/// or if both are NaN (for testing convenience).
///
/// # Example
///
/// ```
/// use exact_ta::utils::{approx_eq, EPSILON};
///
/// assert!(approx_eq(1.0, 1.0 + 1e-11, EPSILON));
/// assert!(!approx_eq(1.0, 2.0, EPSILON));
///
/// // NaN handling (both NaN considered equal for testing)
/// assert!(approx_eq(f64::NAN, f64::NAN, EPSILON));
/// assert!(!approx_eq(f64::NAN, 1.0, EPSILON));
/// ```
#[inline]
#[must_use]
pub fn approx_eq<T: SeriesElement>(a: T, b: T, tolerance: T) -> bool {
    if a.is_nan() && b.is_nan() {
        return true;
    }
    if a.is_nan() || b.is_nan() {
        return false;
    }
    (a - b).abs() < tolerance
}

/// Relative approximate equality check for floating-point values.
///
/// Returns `true` if the relative difference between `a` and `b` is less than
/// `rel_tolerance`, or if both are NaN.
///
/// This is more appropriate than absolute tolerance when comparing values
/// of varying magnitudes.
///
/// # Example
///
/// ```
/// use exact_ta::utils::approx_eq_relative;
///
/// assert!(approx_eq_relative(1e10, 1e10 + 1.0, 1e-9));
/// assert!(approx_eq_relative(1e-10, 1.000000001e-10, 1e-8));
/// ```
#[inline]
#[must_use]
pub fn approx_eq_relative<T: SeriesElement>(a: T, b: T, rel_tolerance: T) -> bool {
    if a.is_nan() && b.is_nan() {
        return true;
    }
    if a.is_nan() || b.is_nan() {
        return false;
    }

    let diff = (a - b).abs();
    let max_abs = a.abs().max(b.abs());

    if max_abs == T::zero() {
        return diff == T::zero();
    }

    diff / max_abs < rel_tolerance
}

/// Count the number of NaN values in a slice.
///
/// # Example
///
/// ```
/// use exact_ta::utils::count_nans;
///
/// let data = vec![f64::NAN, 1.0, f64::NAN, 2.0];
/// assert_eq!(count_nans(&data), 2);
/// ```
#[inline]
#[must_use]
pub fn count_nans<T: SeriesElement>(data: &[T]) -> usize {
    data.iter().filter(|x| x.is_nan()).count()
}

/// Count the number of NaN values at the beginning of a slice.
///
/// This is useful for verifying the lookback period of indicator outputs.
///
/// # Example
///
/// ```
/// use exact_ta::utils::count_nan_prefix;
///
/// let data = vec![f64::NAN, f64::NAN, 1.0, 2.0, f64::NAN];
/// assert_eq!(count_nan_prefix(&data), 2);
/// ```
#[inline]
#[must_use]
pub fn count_nan_prefix<T: SeriesElement>(data: &[T]) -> usize {
    data.iter().take_while(|x| x.is_nan()).count()
}

/// Fill the first `lookback` slots of an output buffer with NaN.
///
/// Float-valued indicators prefix their output with exactly `lookback` NaN
/// slots so the output aligns element-for-element with the input.
#[inline]
pub fn fill_nan_prefix<T: SeriesElement>(output: &mut [T], lookback: usize) {
    let end = lookback.min(output.len());
    for slot in &mut output[..end] {
        *slot = T::nan();
    }
}
