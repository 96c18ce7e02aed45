//! Technical analysis indicators.
//!
//! Every indicator follows the same surface:
//!
//! - a `xxx_lookback()` const fn giving the number of leading NaN (or zero,
//!   for pattern recognizers) outputs,
//! - an allocating `xxx(...) -> Result<Vec<_>>`,
//! - a buffer-reusing `xxx_into(..., output) -> Result<()>`,
//! - for functions with conventional parameters, a `xxx_default(...)`.
//!
//! Functions whose warm-up depends on run state additionally take a
//! [`Settings`](crate::settings::Settings) through a `xxx_with_settings`
//! variant, covering compatibility mode and unstable periods.
//!
//! Outputs are aligned with the input: index `i` of the output describes
//! bar `i` of the input, with the warm-up prefix filled with NaN.
//!
//! # Example
//!
//! ```
//! use exact_ta::indicators::sma;
//!
//! let data = vec![1.0_f64, 2.0, 3.0, 4.0, 5.0];
//! let result = sma(&data, 3).unwrap();
//! assert!(result[1].is_nan());
//! assert!((result[2] - 2.0).abs() < 1e-10);
//! ```

pub mod accbands;
pub mod ad;
pub mod adx;
pub mod apo;
pub mod aroon;
pub mod atr;
pub mod bollinger;
pub mod bop;
pub mod candlestick;
pub mod cci;
pub mod cmo;
pub mod dema;
pub mod dm;
pub mod dx;
pub mod ema;
pub(crate) mod ht_core;
pub mod ht_dcphase;
pub mod ht_phasor;
pub mod imi;
pub mod kama;
pub mod ma;
pub mod macd;
pub mod mama;
pub mod mavp;
pub mod mfi;
pub mod midpoint;
pub mod midprice;
pub mod minmax;
pub mod mom;
pub mod obv;
pub mod price_transform;
pub mod roc;
pub mod rsi;
pub mod sar;
pub mod sarext;
pub mod sma;
pub mod statistics;
pub mod stochastic;
pub mod stochrsi;
pub mod sum;
pub mod t3;
pub mod tema;
pub mod trima;
pub mod trix;
pub mod ultosc;
pub mod williams_r;
pub mod wma;

pub use accbands::{accbands, accbands_into, accbands_lookback, AccbandsOutput};
pub use ad::{ad, ad_into, adosc, adosc_default, adosc_into, adosc_lookback};
pub use adx::{
    adx, adx_into, adx_lookback, adx_with_settings, adxr, adxr_into, adxr_lookback,
    adxr_with_settings,
};
pub use apo::{apo, apo_into, apo_lookback, apo_min_len, ppo, ppo_into};
pub use aroon::{aroon, aroon_into, aroon_lookback, aroonosc, aroonosc_into, AroonOutput};
pub use atr::{
    atr, atr_into, atr_lookback, atr_with_settings, natr, natr_into, natr_with_settings, trange,
    trange_into, trange_lookback,
};
pub use bollinger::{bbands, bbands_into, bbands_lookback, BollingerOutput};
pub use bop::{bop, bop_into};
pub use cci::{cci, cci_into, cci_lookback};
pub use cmo::{cmo, cmo_into, cmo_lookback, cmo_min_len, cmo_with_settings};
pub use dema::{dema, dema_into, dema_lookback, dema_min_len};
pub use dm::{
    dm_lookback, minus_dm, minus_dm_into, minus_dm_with_settings, plus_dm, plus_dm_into,
    plus_dm_with_settings,
};
pub use dx::{dx, dx_into, dx_lookback, dx_with_settings};
pub use ema::{ema, ema_into, ema_lookback, ema_metastock_into, ema_min_len, ema_with_settings};
pub use ht_dcphase::{ht_dcphase, ht_dcphase_into, ht_dcphase_lookback, ht_dcphase_min_len};
pub use ht_phasor::{
    ht_phasor, ht_phasor_into, ht_phasor_lookback, ht_phasor_min_len, HtPhasorOutput,
};
pub use imi::{imi, imi_into, imi_lookback};
pub use kama::{kama, kama_into, kama_lookback, kama_min_len};
pub use ma::{ma, ma_into, ma_lookback, ma_min_len, MaType};
pub use macd::{
    macd, macd_into, macd_lookback, macd_min_len, macdext, macdfix, macdfix_lookback, MacdOutput,
};
pub use mama::{mama, mama_default, mama_into, mama_lookback, mama_min_len, MamaOutput};
pub use mavp::{mavp, mavp_into, mavp_lookback, mavp_min_len};
pub use mfi::{mfi, mfi_into, mfi_lookback, mfi_min_len};
pub use midpoint::{midpoint, midpoint_into, midpoint_lookback, midpoint_min_len};
pub use midprice::{midprice, midprice_into, midprice_lookback, midprice_min_len};
pub use minmax::{
    max, max_into, maxindex, maxindex_into, min, min_into, minindex, minindex_into, minmax,
    minmax_lookback, minmaxindex, MinMaxIndexOutput, MinMaxOutput,
};
pub use mom::{mom, mom_into, mom_lookback, mom_min_len};
pub use obv::{obv, obv_into};
pub use price_transform::{
    avgprice, avgprice_into, medprice, medprice_into, typprice, typprice_into, wclprice,
    wclprice_into,
};
pub use roc::{
    roc, roc_into, roc_lookback, roc_min_len, rocp, rocp_into, rocr, rocr100, rocr100_into,
    rocr_into,
};
pub use rsi::{rsi, rsi_into, rsi_lookback, rsi_min_len, rsi_with_settings};
pub use sar::{sar, sar_default, sar_into, sar_lookback, sar_min_len};
pub use sarext::{
    sarext, sarext_default, sarext_into, sarext_lookback, sarext_min_len, SarExtParams,
};
pub use sma::{sma, sma_into, sma_lookback, sma_min_len};
pub use statistics::{
    avgdev, avgdev_into, beta, beta_into, beta_lookback, correl, correl_into,
    linearreg_intercept, linearreg_intercept_into, stddev, stddev_into, stddev_lookback, var,
    var_into,
};
pub use stochastic::{
    stoch, stoch_default, stoch_into, stoch_lookback, stochf, stochf_default, stochf_into,
    stochf_lookback, StochOutput, StochfOutput,
};
pub use stochrsi::{
    stochrsi, stochrsi_default, stochrsi_into, stochrsi_lookback, StochRsiOutput,
};
pub use sum::{sum, sum_into, sum_lookback, sum_min_len};
pub use t3::{t3, t3_into, t3_lookback, t3_min_len};
pub use tema::{tema, tema_into, tema_lookback, tema_min_len};
pub use trima::{trima, trima_into, trima_lookback, trima_min_len};
pub use trix::{trix, trix_into, trix_lookback, trix_min_len};
pub use ultosc::{ultosc, ultosc_default, ultosc_into, ultosc_lookback};
pub use williams_r::{willr, willr_into, willr_lookback};
pub use wma::{wma, wma_into, wma_lookback, wma_min_len};
