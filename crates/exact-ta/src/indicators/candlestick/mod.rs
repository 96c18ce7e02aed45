//! Candlestick pattern recognizers.
//!
//! Recognizers emit `i32` signals per bar: `100` (or `200` for a
//! confirmed hikkake) for a bullish pattern, `-100`/`-200` for a
//! bearish one, and `0` when no pattern completes at that bar. Bars
//! inside the lookback window are always `0`.
//!
//! Candle measurements (real body, shadows, gaps) compare against
//! rolling averages keyed by [`CandleSetting`], so "long" and "short"
//! are judged relative to recent bars rather than fixed thresholds.
//!
//! # Example
//!
//! ```
//! use exact_ta::indicators::candlestick::cdl_doji;
//!
//! let open = vec![100.0_f64; 12];
//! let high = vec![106.0; 12];
//! let low = vec![99.0; 12];
//! let mut close = vec![105.0; 12];
//! close[11] = 100.2;
//!
//! let signal = cdl_doji(&open, &high, &low, &close).unwrap();
//! assert_eq!(signal[11], 100);
//! ```

pub mod core;
pub mod single;
pub mod three_candle;
pub mod two_candle;

pub use self::core::{CandleSetting, Candles, RangeType};
pub use single::{
    cdl_closing_marubozu, cdl_closing_marubozu_into, cdl_closing_marubozu_lookback, cdl_doji,
    cdl_doji_into, cdl_doji_lookback, cdl_dragonfly_doji, cdl_dragonfly_doji_into,
    cdl_dragonfly_doji_lookback, cdl_gravestone_doji, cdl_gravestone_doji_into,
    cdl_gravestone_doji_lookback, cdl_hammer, cdl_hammer_into, cdl_hammer_lookback,
    cdl_inverted_hammer, cdl_inverted_hammer_into, cdl_inverted_hammer_lookback,
    cdl_rickshaw_man, cdl_rickshaw_man_into, cdl_rickshaw_man_lookback, cdl_short_line,
    cdl_short_line_into, cdl_short_line_lookback, cdl_spinning_top, cdl_spinning_top_into,
    cdl_spinning_top_lookback,
};
pub use three_candle::{
    cdl_3black_crows, cdl_3black_crows_into, cdl_3black_crows_lookback, cdl_3white_soldiers,
    cdl_3white_soldiers_into, cdl_3white_soldiers_lookback, cdl_evening_star,
    cdl_evening_star_default, cdl_evening_star_into, cdl_evening_star_lookback, cdl_tristar,
    cdl_tristar_into, cdl_tristar_lookback,
};
pub use two_candle::{
    cdl_dark_cloud_cover, cdl_dark_cloud_cover_default, cdl_dark_cloud_cover_into,
    cdl_dark_cloud_cover_lookback, cdl_doji_star, cdl_doji_star_into, cdl_doji_star_lookback,
    cdl_engulfing, cdl_engulfing_into, cdl_engulfing_lookback, cdl_harami, cdl_harami_into,
    cdl_harami_lookback, cdl_hikkake, cdl_hikkake_into, cdl_hikkake_lookback, cdl_matching_low,
    cdl_matching_low_into, cdl_matching_low_lookback, cdl_piercing, cdl_piercing_into,
    cdl_piercing_lookback,
};
