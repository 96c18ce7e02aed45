//! Input validation tests across the public API.
//!
//! Verifies the uniform validation ladder: empty input, bad parameters,
//! insufficient data, short output buffers, and mismatched series lengths
//! each map to the expected error variant regardless of indicator.

#![allow(clippy::cast_precision_loss)]

use exact_ta::error::Error;
use exact_ta::indicators::candlestick::{cdl_dark_cloud_cover, cdl_doji, cdl_doji_into, cdl_engulfing};
use exact_ta::indicators::{
    atr, bbands, bop, cci, ma, obv, rsi, sar, sma, sma_into, willr, MaType,
};

#[test]
fn empty_input_is_rejected_everywhere() {
    let empty: Vec<f64> = vec![];
    assert_eq!(sma(&empty, 3).unwrap_err(), Error::EmptyInput);
    assert_eq!(rsi(&empty, 3).unwrap_err(), Error::EmptyInput);
    assert_eq!(obv(&empty, &empty).unwrap_err(), Error::EmptyInput);
    assert_eq!(
        willr(&empty, &empty, &empty, 3).unwrap_err(),
        Error::EmptyInput
    );
    assert_eq!(
        bop(&empty, &empty, &empty, &empty).unwrap_err(),
        Error::EmptyInput
    );
    assert_eq!(
        cdl_doji(&empty, &empty, &empty, &empty).unwrap_err(),
        Error::EmptyInput
    );
}

#[test]
fn out_of_range_periods_are_rejected() {
    let data: Vec<f64> = (1..=20).map(f64::from).collect();
    for period in [0, 1, 100_001] {
        assert!(matches!(
            sma(&data, period).unwrap_err(),
            Error::InvalidPeriod { .. }
        ));
        assert!(matches!(
            rsi(&data, period).unwrap_err(),
            Error::InvalidPeriod { .. }
        ));
        assert!(matches!(
            cci(&data, &data, &data, period).unwrap_err(),
            Error::InvalidPeriod { .. }
        ));
    }
    // ATR follows the reference in accepting period 1.
    for period in [0, 100_001] {
        assert!(matches!(
            atr(&data, &data, &data, period).unwrap_err(),
            Error::InvalidPeriod { .. }
        ));
    }
    assert!(atr(&data, &data, &data, 1).is_ok());
}

#[test]
fn ma_dispatcher_accepts_period_one_as_copy() {
    let data = vec![3.0_f64, 1.0, 4.0, 1.0, 5.0];
    let result = ma(&data, 1, MaType::Sma).unwrap();
    assert_eq!(result, data);
    assert!(matches!(
        ma(&data, 0, MaType::Sma).unwrap_err(),
        Error::InvalidPeriod { .. }
    ));
}

#[test]
fn insufficient_data_reports_required_length() {
    let data = vec![1.0_f64, 2.0, 3.0];
    assert_eq!(
        sma(&data, 5).unwrap_err(),
        Error::InsufficientData {
            indicator: "sma",
            required: 5,
            actual: 3,
        }
    );
    assert!(matches!(
        willr(&data[..2], &data[..2], &data[..2], 3).unwrap_err(),
        Error::InsufficientData { .. }
    ));
}

#[test]
fn short_output_buffers_are_rejected() {
    let data = vec![1.0_f64, 2.0, 3.0, 4.0, 5.0];
    let mut short = vec![0.0_f64; 2];
    assert!(matches!(
        sma_into(&data, 3, &mut short).unwrap_err(),
        Error::BufferTooSmall { .. }
    ));

    let bars = vec![1.0_f64; 12];
    let mut short = vec![0i32; 3];
    assert!(matches!(
        cdl_doji_into(&bars, &bars, &bars, &bars, &mut short).unwrap_err(),
        Error::BufferTooSmall { .. }
    ));
}

#[test]
fn mismatched_series_lengths_are_rejected() {
    let a = vec![1.0_f64, 2.0, 3.0, 4.0, 5.0];
    let b = vec![1.0_f64, 2.0, 3.0, 4.0];
    assert!(matches!(
        willr(&a, &b, &a, 3).unwrap_err(),
        Error::InvalidInput { .. }
    ));
    assert!(matches!(
        obv(&a, &b).unwrap_err(),
        Error::InvalidInput { .. }
    ));
    assert!(matches!(
        cdl_engulfing(&a, &a, &b, &a).unwrap_err(),
        Error::InvalidInput { .. }
    ));
}

#[test]
fn bad_factors_are_rejected() {
    let bars: Vec<f64> = (1..=20).map(f64::from).collect();
    assert!(matches!(
        sar(&bars, &bars, -0.02, 0.2).unwrap_err(),
        Error::InvalidParameter { .. }
    ));
    assert!(matches!(
        sar(&bars, &bars, 0.02, f64::NAN).unwrap_err(),
        Error::InvalidParameter { .. }
    ));
    assert!(matches!(
        cdl_dark_cloud_cover(&bars, &bars, &bars, &bars, -0.5).unwrap_err(),
        Error::InvalidParameter { .. }
    ));
    assert!(matches!(
        bbands(&bars, 5, f64::NAN, 2.0, MaType::Sma).unwrap_err(),
        Error::InvalidParameter { .. }
    ));
}

#[test]
fn failed_calls_do_not_partially_write() {
    let data = vec![1.0_f64, 2.0, 3.0];
    let mut output = vec![7.0_f64; 3];
    assert!(sma_into(&data, 5, &mut output).is_err());
    assert_eq!(output, vec![7.0; 3]);
}
