//! Error types for exact-ta.
//!
//! This module defines the error types used throughout the exact-ta library
//! for handling various failure conditions.

use thiserror::Error;

/// The main error type for exact-ta operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The input data series is empty.
    ///
    /// This is a special case of insufficient data where no data was provided.
    #[error("empty input: no data provided")]
    EmptyInput,

    /// The period parameter is invalid.
    ///
    /// This error is returned when the period is outside the inclusive range
    /// accepted by the indicator.
    #[error("invalid period {period}: {reason}")]
    InvalidPeriod {
        /// The invalid period value that was provided.
        period: usize,
        /// Description of why the period is invalid.
        reason: &'static str,
    },

    /// A non-period parameter (factor, deviation multiplier, limit) is invalid.
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// Description of why the value is invalid.
        reason: &'static str,
    },

    /// The input series disagree in some way the indicator cannot accept,
    /// for example OHLC slices of different lengths.
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// Description of the disagreement.
        reason: &'static str,
    },

    /// The input data series is too short for the requested operation.
    ///
    /// This error is returned when the input data has fewer elements than
    /// required by the indicator's lookback window.
    #[error("{indicator}: insufficient data: required {required} elements, got {actual}")]
    InsufficientData {
        /// Name of the indicator that was requested.
        indicator: &'static str,
        /// The number of data points required.
        required: usize,
        /// The number of data points provided.
        actual: usize,
    },

    /// A caller-supplied output buffer is shorter than the input series.
    ///
    /// The `_into` functions write exactly one output element per input
    /// element and never reallocate.
    #[error("{indicator}: output buffer too small: required {required} elements, got {actual}")]
    BufferTooSmall {
        /// Name of the indicator that was requested.
        indicator: &'static str,
        /// The number of output slots required.
        required: usize,
        /// The number of output slots provided.
        actual: usize,
    },

    /// Failed to convert a numeric value to the target type.
    ///
    /// This error occurs when using `NumCast::from()` to convert values
    /// (e.g., converting a `usize` period to a generic `Float` type) and
    /// the conversion fails.
    #[error("numeric conversion failed: {context}")]
    NumericConversion {
        /// Description of the conversion that failed.
        context: &'static str,
    },
}

/// Convenience type alias for Results using the exact-ta Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_data_error() {
        let err = Error::InsufficientData {
            indicator: "sma",
            required: 20,
            actual: 10,
        };
        assert_eq!(
            err.to_string(),
            "sma: insufficient data: required 20 elements, got 10"
        );
    }

    #[test]
    fn test_buffer_too_small_error() {
        let err = Error::BufferTooSmall {
            indicator: "ema",
            required: 100,
            actual: 50,
        };
        assert_eq!(
            err.to_string(),
            "ema: output buffer too small: required 100 elements, got 50"
        );
    }

    #[test]
    fn test_numeric_conversion_error() {
        let err = Error::NumericConversion {
            context: "converting period to float",
        };
        assert_eq!(
            err.to_string(),
            "numeric conversion failed: converting period to float"
        );
    }

    #[test]
    fn test_empty_input_error() {
        let err = Error::EmptyInput;
        assert_eq!(err.to_string(), "empty input: no data provided");
    }

    #[test]
    fn test_invalid_period_error() {
        let err = Error::InvalidPeriod {
            period: 1,
            reason: "period must be at least 2",
        };
        assert_eq!(err.to_string(), "invalid period 1: period must be at least 2");
    }

    #[test]
    fn test_invalid_parameter_error() {
        let err = Error::InvalidParameter {
            name: "acceleration",
            reason: "must be a non-negative finite value",
        };
        assert_eq!(
            err.to_string(),
            "invalid parameter acceleration: must be a non-negative finite value"
        );
    }

    #[test]
    fn test_invalid_input_error() {
        let err = Error::InvalidInput {
            reason: "high and low must have the same length",
        };
        assert_eq!(
            err.to_string(),
            "invalid input: high and low must have the same length"
        );
    }

    #[test]
    fn test_error_equality() {
        let err1 = Error::InsufficientData {
            indicator: "rsi",
            required: 20,
            actual: 10,
        };
        let err2 = Error::InsufficientData {
            indicator: "rsi",
            required: 20,
            actual: 10,
        };
        let err3 = Error::InsufficientData {
            indicator: "rsi",
            required: 30,
            actual: 10,
        };

        assert_eq!(err1, err2);
        assert_ne!(err1, err3);
    }

    #[test]
    fn test_error_clone() {
        let err = Error::InvalidPeriod {
            period: 0,
            reason: "period must be at least 1",
        };
        let err_clone = err.clone();
        assert_eq!(err, err_clone);
    }

    #[test]
    fn test_result_type_alias() {
        fn test_fn(succeed: bool) -> Result<i32> {
            if succeed {
                Ok(42)
            } else {
                Err(Error::EmptyInput)
            }
        }

        assert_eq!(test_fn(true).unwrap(), 42);
        assert!(test_fn(false).is_err());
    }

    #[test]
    fn test_error_is_std_error() {
        fn accepts_std_error<E: std::error::Error>(_: E) {}
        let err = Error::EmptyInput;
        accepts_std_error(err);
    }
}
