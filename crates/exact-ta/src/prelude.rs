//! Commonly used types and traits for convenient importing.
//!
//! The prelude re-exports the error and result types, the core traits, the
//! run [`Settings`](crate::settings::Settings), and the most frequently used
//! indicator functions with their output structs.
//!
//! # Usage
//!
//! ```
//! use exact_ta::prelude::*;
//!
//! let prices = vec![1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
//!
//! let sma_result = sma(&prices, 3).unwrap();
//! let ema_result = ema(&prices, 3).unwrap();
//! let rsi_result = rsi(&prices, 5).unwrap();
//! ```
//!
//! Less common functions (candlestick recognizers, statistics, price
//! transforms) stay under [`crate::indicators`] to keep the glob import
//! manageable.

// Error types
pub use crate::error::{Error, Result};

// Traits
pub use crate::traits::{SeriesElement, ValidatedInput};

// Run settings
pub use crate::settings::{Compatibility, Settings, UnstableFn, UnstablePeriod};

// Indicator functions (simple API)
pub use crate::indicators::{
    adx, aroon, atr, bbands, cci, ema, kama, ma, macd, mfi, mom, obv, roc, rsi, sar_default,
    sma, stoch_default, stochf_default, stochrsi_default, trange, ultosc_default, willr, wma,
};

// Indicator functions (_into API for pre-allocated buffers)
pub use crate::indicators::{
    adx_into, aroon_into, atr_into, bbands_into, cci_into, ema_into, kama_into, ma_into,
    macd_into, mfi_into, mom_into, obv_into, roc_into, rsi_into, sma_into, trange_into,
    willr_into, wma_into,
};

// Multi-output types
pub use crate::indicators::{
    AroonOutput, BollingerOutput, MacdOutput, MamaOutput, StochOutput, StochRsiOutput,
    StochfOutput,
};

// Moving-average dispatch
pub use crate::indicators::MaType;

// Lookback functions
pub use crate::indicators::{
    adx_lookback, aroon_lookback, atr_lookback, bbands_lookback, cci_lookback, ema_lookback,
    kama_lookback, ma_lookback, macd_lookback, mfi_lookback, mom_lookback, roc_lookback,
    rsi_lookback, sma_lookback, stoch_lookback, trange_lookback, willr_lookback, wma_lookback,
};
