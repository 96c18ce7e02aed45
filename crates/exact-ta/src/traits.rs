//! Core traits for exact-ta numeric operations.
//!
//! This module defines the traits used throughout the exact-ta library
//! for generic numeric operations on data series.
//!
//! # Overview
//!
//! The primary trait is [`SeriesElement`], which provides a common interface
//! for numeric operations on time series data, abstracting over `f32` and `f64`
//! types. The module also provides validation utilities through [`ValidatedInput`]
//! and standalone validation functions. Reference parity holds for `f64`; `f32`
//! is supported on a best-effort basis.
//!
//! # Example
//!
//! ```
//! use exact_ta::traits::{SeriesElement, ValidatedInput, validate_indicator_input};
//!
//! fn compute_weighted_sum<T: SeriesElement>(data: &[T], period: usize) -> exact_ta::error::Result<T> {
//!     validate_indicator_input(data, period, "weighted_sum")?;
//!
//!     let period_t = T::from_usize(period)?;
//!     let sum: T = data.iter().take(period).fold(T::zero(), |acc, &x| acc + x);
//!     Ok(sum / period_t)
//! }
//!
//! let data = vec![1.0_f64, 2.0, 3.0, 4.0, 5.0];
//! let result = compute_weighted_sum(&data, 3).unwrap();
//! assert!((result - 2.0).abs() < 1e-10);
//! ```

use num_traits::{Float, NumCast};

use crate::error::{Error, Result};

/// A trait for types that can be used as elements in a data series.
///
/// This trait provides a common interface for numeric operations on series data,
/// abstracting over `f32` and `f64` types. It extends `num_traits::Float` with
/// additional methods specific to time series operations.
///
/// # Type Bounds
///
/// The trait requires:
/// - `Float`: Standard floating-point operations (NaN handling, infinity, arithmetic)
/// - `NumCast`: Safe conversion between numeric types
/// - `Copy`: Values can be copied (required for efficient iteration)
/// - `Default`: A default value exists (typically zero)
pub trait SeriesElement: Float + NumCast + Copy + Default + Send + Sync + 'static {
    /// Creates a series element from a `usize` value.
    ///
    /// This is commonly used for converting period parameters to the series element type.
    ///
    /// # Errors
    ///
    /// Returns `Error::NumericConversion` if the value cannot be represented in this type.
    #[inline]
    fn from_usize(value: usize) -> Result<Self> {
        <Self as NumCast>::from(value).ok_or(Error::NumericConversion {
            context: "usize to series element",
        })
    }

    /// Creates a series element from an `i32` value.
    ///
    /// # Errors
    ///
    /// Returns `Error::NumericConversion` if the value cannot be represented in this type.
    #[inline]
    fn from_i32(value: i32) -> Result<Self> {
        <Self as NumCast>::from(value).ok_or(Error::NumericConversion {
            context: "i32 to series element",
        })
    }

    /// Creates a series element from an `f64` value.
    ///
    /// # Errors
    ///
    /// Returns `Error::NumericConversion` if the value cannot be represented in this type.
    #[inline]
    fn from_f64(value: f64) -> Result<Self> {
        <Self as NumCast>::from(value).ok_or(Error::NumericConversion {
            context: "f64 to series element",
        })
    }

    /// Returns the constant 2 as this type.
    ///
    /// This is commonly used in EMA calculations: `alpha = 2 / (period + 1)`.
    #[inline]
    #[must_use]
    fn two() -> Self {
        // Safe unwrap: 2 is always representable in Float types
        <Self as NumCast>::from(2).unwrap()
    }

    /// Returns the constant 100 as this type.
    ///
    /// This is commonly used for percentage scaling in indicators like RSI and Stochastic.
    #[inline]
    #[must_use]
    fn hundred() -> Self {
        // Safe unwrap: 100 is always representable in Float types
        <Self as NumCast>::from(100).unwrap()
    }

    /// Returns the constant 50 as this type.
    ///
    /// This is commonly used as a neutral/midpoint value (e.g., RSI=50 is neutral).
    #[inline]
    #[must_use]
    fn fifty() -> Self {
        // Safe unwrap: 50 is always representable in Float types
        <Self as NumCast>::from(50).unwrap()
    }

    /// Returns the reference zero-guard threshold as this type.
    ///
    /// Magnitudes strictly below this value are treated as zero wherever the
    /// reference library guards a division.
    #[inline]
    #[must_use]
    fn ta_epsilon() -> Self {
        // Safe unwrap: 1e-14 is representable in both f32 and f64
        <Self as NumCast>::from(crate::utils::TA_EPSILON).unwrap()
    }

    /// Returns `true` if the magnitude of `self` is below the reference
    /// zero-guard threshold.
    #[inline]
    #[must_use]
    fn is_ta_zero(self) -> bool {
        self > -Self::ta_epsilon() && self < Self::ta_epsilon()
    }
}

// Blanket implementation for all types that satisfy the bounds
impl<T: Float + NumCast + Copy + Default + Send + Sync + 'static> SeriesElement for T {}

/// Trait for validating input data before indicator computation.
///
/// This trait provides validation methods to check that input data meets
/// the requirements of an indicator before computation begins.
pub trait ValidatedInput {
    /// The element type of the series.
    type Element: SeriesElement;

    /// Returns the length of the series.
    fn len(&self) -> usize;

    /// Returns true if the series is empty.
    #[inline]
    #[must_use]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Validates that the series has at least `min_length` elements.
    ///
    /// # Errors
    ///
    /// Returns `Error::InsufficientData` if the series is shorter than `min_length`.
    #[inline]
    fn validate_min_length(&self, min_length: usize, indicator: &'static str) -> Result<()> {
        if self.len() < min_length {
            Err(Error::InsufficientData {
                indicator,
                required: min_length,
                actual: self.len(),
            })
        } else {
            Ok(())
        }
    }

    /// Validates that the series is not empty.
    ///
    /// # Errors
    ///
    /// Returns `Error::EmptyInput` if the series is empty.
    #[inline]
    fn validate_not_empty(&self) -> Result<()> {
        if self.is_empty() {
            Err(Error::EmptyInput)
        } else {
            Ok(())
        }
    }
}

// Implementation for slices
impl<T: SeriesElement> ValidatedInput for [T] {
    type Element = T;

    #[inline]
    fn len(&self) -> usize {
        self.len()
    }
}

// Implementation for Vec
impl<T: SeriesElement> ValidatedInput for Vec<T> {
    type Element = T;

    #[inline]
    fn len(&self) -> usize {
        self.len()
    }
}

/// Validates that a period is valid for indicator computation.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` if the period is zero.
#[inline]
pub const fn validate_period(period: usize) -> Result<()> {
    if period == 0 {
        Err(Error::InvalidPeriod {
            period,
            reason: "period must be at least 1",
        })
    } else {
        Ok(())
    }
}

/// Validates that a period lies in an inclusive range.
///
/// Most indicators accept `2..=100_000`; ROC-style indicators accept a
/// period of 1.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` if the period is outside `[min, max]`.
#[inline]
pub const fn validate_period_range(period: usize, min: usize, max: usize) -> Result<()> {
    if period < min {
        Err(Error::InvalidPeriod {
            period,
            reason: "period below the accepted minimum",
        })
    } else if period > max {
        Err(Error::InvalidPeriod {
            period,
            reason: "period above the accepted maximum",
        })
    } else {
        Ok(())
    }
}

/// Validates that a real-valued parameter is finite and non-negative.
///
/// # Errors
///
/// Returns `Error::InvalidParameter` if the value is NaN, infinite, or negative.
#[inline]
pub fn validate_factor<T: SeriesElement>(value: T, name: &'static str) -> Result<()> {
    if !value.is_finite() || value < T::zero() {
        Err(Error::InvalidParameter {
            name,
            reason: "must be a non-negative finite value",
        })
    } else {
        Ok(())
    }
}

/// Validates that input data is suitable for indicator computation.
///
/// This function performs the following checks:
/// 1. The period is valid (non-zero)
/// 2. The data is not empty
/// 3. The data has at least `period` elements
///
/// # Errors
///
/// Returns an appropriate error if any validation fails:
/// - `Error::InvalidPeriod` if the period is zero
/// - `Error::EmptyInput` if the data is empty
/// - `Error::InsufficientData` if data length is less than the period
#[inline]
pub fn validate_indicator_input<T: SeriesElement>(
    data: &[T],
    period: usize,
    indicator: &'static str,
) -> Result<()> {
    validate_period(period)?;
    data.validate_not_empty()?;
    data.validate_min_length(period, indicator)?;
    Ok(())
}

/// Validates that a caller-supplied output buffer can hold one element per
/// input element.
///
/// # Errors
///
/// Returns `Error::BufferTooSmall` if the buffer is shorter than the input.
#[inline]
pub fn validate_output_len(
    output_len: usize,
    input_len: usize,
    indicator: &'static str,
) -> Result<()> {
    if output_len < input_len {
        Err(Error::BufferTooSmall {
            indicator,
            required: input_len,
            actual: output_len,
        })
    } else {
        Ok(())
    }
}

/// Validates that every series in a group has the same length.
///
/// # Errors
///
/// Returns `Error::InvalidInput` if any two lengths differ.
#[inline]
pub fn validate_same_length(lengths: &[usize], reason: &'static str) -> Result<()> {
    if let Some(&first) = lengths.first() {
        for &len in &lengths[1..] {
            if len != first {
                return Err(Error::InvalidInput { reason });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_element_from_usize() {
        let val: f64 = SeriesElement::from_usize(42).unwrap();
        assert!((val - 42.0).abs() < 1e-10);

        let val_f32: f32 = SeriesElement::from_usize(100).unwrap();
        assert!((val_f32 - 100.0).abs() < 1e-5);
    }

    #[test]
    fn test_series_element_from_i32() {
        let val: f64 = SeriesElement::from_i32(-5).unwrap();
        assert!((val - (-5.0)).abs() < 1e-10);
    }

    #[test]
    fn test_series_element_from_f64() {
        let val: f64 = SeriesElement::from_f64(std::f64::consts::PI).unwrap();
        assert!((val - std::f64::consts::PI).abs() < 1e-10);
    }

    #[test]
    fn test_series_element_constants() {
        let two: f64 = SeriesElement::two();
        assert!((two - 2.0).abs() < 1e-10);

        let hundred: f64 = SeriesElement::hundred();
        assert!((hundred - 100.0).abs() < 1e-10);

        let fifty: f64 = SeriesElement::fifty();
        assert!((fifty - 50.0).abs() < 1e-10);
    }

    #[test]
    fn test_is_ta_zero() {
        assert!(0.0_f64.is_ta_zero());
        assert!(1e-15_f64.is_ta_zero());
        assert!((-1e-15_f64).is_ta_zero());
        assert!(!1e-13_f64.is_ta_zero());
        assert!(!(-1e-13_f64).is_ta_zero());
        assert!(!1.0_f64.is_ta_zero());
    }

    #[test]
    fn test_validated_input_len() {
        let data: Vec<f64> = vec![1.0, 2.0, 3.0];
        assert_eq!(ValidatedInput::len(&data), 3);

        let slice: &[f64] = &[1.0, 2.0, 3.0, 4.0];
        assert_eq!(ValidatedInput::len(slice), 4);
    }

    #[test]
    fn test_validate_min_length_failure() {
        let data: Vec<f64> = vec![1.0, 2.0, 3.0];
        let result = data.validate_min_length(5, "test");
        match result {
            Err(Error::InsufficientData {
                indicator,
                required,
                actual,
            }) => {
                assert_eq!(indicator, "test");
                assert_eq!(required, 5);
                assert_eq!(actual, 3);
            }
            _ => panic!("Expected InsufficientData error"),
        }
    }

    #[test]
    fn test_validate_not_empty() {
        let data: Vec<f64> = vec![1.0];
        assert!(data.validate_not_empty().is_ok());

        let empty: Vec<f64> = vec![];
        assert!(matches!(empty.validate_not_empty(), Err(Error::EmptyInput)));
    }

    #[test]
    fn test_validate_period() {
        assert!(validate_period(1).is_ok());
        assert!(validate_period(100).is_ok());
        assert!(matches!(
            validate_period(0),
            Err(Error::InvalidPeriod { period: 0, .. })
        ));
    }

    #[test]
    fn test_validate_period_range() {
        assert!(validate_period_range(2, 2, 100_000).is_ok());
        assert!(validate_period_range(100_000, 2, 100_000).is_ok());
        assert!(matches!(
            validate_period_range(1, 2, 100_000),
            Err(Error::InvalidPeriod { period: 1, .. })
        ));
        assert!(matches!(
            validate_period_range(100_001, 2, 100_000),
            Err(Error::InvalidPeriod { .. })
        ));
    }

    #[test]
    fn test_validate_factor() {
        assert!(validate_factor(0.0_f64, "f").is_ok());
        assert!(validate_factor(2.5_f64, "f").is_ok());
        assert!(validate_factor(f64::NAN, "f").is_err());
        assert!(validate_factor(f64::INFINITY, "f").is_err());
        assert!(validate_factor(-0.1_f64, "f").is_err());
    }

    #[test]
    fn test_validate_indicator_input_success() {
        let data: Vec<f64> = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        assert!(validate_indicator_input(&data, 3, "test").is_ok());
        assert!(validate_indicator_input(&data, 5, "test").is_ok());
    }

    #[test]
    fn test_validate_indicator_input_empty() {
        let data: Vec<f64> = vec![];
        let result = validate_indicator_input(&data, 3, "test");
        assert!(matches!(result, Err(Error::EmptyInput)));
    }

    #[test]
    fn test_validate_indicator_input_insufficient() {
        let data: Vec<f64> = vec![1.0, 2.0];
        let result = validate_indicator_input(&data, 5, "test");
        assert!(matches!(result, Err(Error::InsufficientData { .. })));
    }

    #[test]
    fn test_validate_output_len() {
        assert!(validate_output_len(10, 10, "test").is_ok());
        assert!(validate_output_len(11, 10, "test").is_ok());
        match validate_output_len(9, 10, "test") {
            Err(Error::BufferTooSmall {
                indicator,
                required,
                actual,
            }) => {
                assert_eq!(indicator, "test");
                assert_eq!(required, 10);
                assert_eq!(actual, 9);
            }
            _ => panic!("Expected BufferTooSmall error"),
        }
    }

    #[test]
    fn test_validate_same_length() {
        assert!(validate_same_length(&[3, 3, 3], "lengths differ").is_ok());
        assert!(validate_same_length(&[], "lengths differ").is_ok());
        assert!(matches!(
            validate_same_length(&[3, 4, 3], "lengths differ"),
            Err(Error::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_series_element_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<f64>();
        assert_send_sync::<f32>();
    }
}
