//! Integration tests for the compatibility settings surface.
//!
//! The `_with_settings` variants must collapse to the plain functions under
//! default settings, apply the Metastock seeding differences, and extend the
//! NaN prefix by the configured unstable period.

mod common;

use common::approx_eq;
use exact_ta::indicators::{
    atr, atr_with_settings, ema, ema_lookback, ema_with_settings, rsi, rsi_lookback,
    rsi_with_settings,
};
use exact_ta::settings::{Compatibility, Settings, UnstableFn};
use exact_ta::utils::count_nan_prefix;

fn walk() -> Vec<f64> {
    let mut price = 100.0_f64;
    (0..64)
        .map(|i| {
            price += f64::from(i % 7) - 3.0;
            price
        })
        .collect()
}

#[test]
fn default_settings_match_plain_functions() {
    let data = walk();
    let settings = Settings::new();

    let plain = ema(&data, 5).unwrap();
    let with = ema_with_settings(&data, 5, &settings).unwrap();
    for (a, b) in plain.iter().zip(with.iter()) {
        assert!(approx_eq(*a, *b, 1e-12));
    }

    let plain = rsi(&data, 5).unwrap();
    let with = rsi_with_settings(&data, 5, &settings).unwrap();
    for (a, b) in plain.iter().zip(with.iter()) {
        assert!(approx_eq(*a, *b, 1e-12));
    }

    let plain = atr(&data, &data, &data, 5).unwrap();
    let with = atr_with_settings(&data, &data, &data, 5, &settings).unwrap();
    for (a, b) in plain.iter().zip(with.iter()) {
        assert!(approx_eq(*a, *b, 1e-12));
    }
}

#[test]
fn metastock_ema_changes_seed_not_alignment() {
    let data = walk();
    let mut settings = Settings::new();
    settings.compatibility = Compatibility::Metastock;

    let classic = ema(&data, 5).unwrap();
    let metastock = ema_with_settings(&data, 5, &settings).unwrap();
    assert_eq!(count_nan_prefix(&metastock), ema_lookback(5));
    assert!(!approx_eq(classic[4], metastock[4], 1e-12));
}

#[test]
fn metastock_rsi_emits_one_extra_warmup_value() {
    let data = walk();
    let mut settings = Settings::new();
    settings.compatibility = Compatibility::Metastock;

    let classic = rsi(&data, 5).unwrap();
    let metastock = rsi_with_settings(&data, 5, &settings).unwrap();
    assert_eq!(count_nan_prefix(&classic), rsi_lookback(5));
    assert_eq!(count_nan_prefix(&metastock), rsi_lookback(5) - 1);
    // Bars past the warm-up are unaffected.
    for i in rsi_lookback(5)..data.len() {
        assert!(approx_eq(classic[i], metastock[i], 1e-12));
    }
}

#[test]
fn unstable_period_extends_nan_prefix() {
    let data = walk();
    let mut settings = Settings::new();
    settings.unstable.set(UnstableFn::Ema, 3);

    let masked = ema_with_settings(&data, 5, &settings).unwrap();
    assert_eq!(count_nan_prefix(&masked), ema_lookback(5) + 3);

    // The surviving values are untouched.
    let plain = ema(&data, 5).unwrap();
    for i in ema_lookback(5) + 3..data.len() {
        assert!(approx_eq(plain[i], masked[i], 1e-12));
    }
}
