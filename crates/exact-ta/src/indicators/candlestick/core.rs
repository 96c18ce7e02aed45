//! Shared machinery for candlestick pattern recognition.
//!
//! Every recognizer measures candles against rolling averages of a small
//! set of named settings (body length, shadow length, nearness, ...).
//! Each setting carries a range type, an averaging period, and a factor;
//! the table below reproduces the reference defaults.

use crate::error::Result;
use crate::traits::{validate_same_length, SeriesElement, ValidatedInput};
use num_traits::NumCast;

/// Helper to convert f64 to T (infallible for valid float values).
#[inline]
fn f64_to_t<T: SeriesElement>(val: f64) -> T {
    <T as NumCast>::from(val).unwrap_or_else(T::nan)
}

/// Helper to convert usize to T (infallible for small values).
#[inline]
fn usize_to_t<T: SeriesElement>(val: usize) -> T {
    <T as NumCast>::from(val).unwrap_or_else(T::nan)
}

/// What a candle setting measures its threshold against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeType {
    /// Absolute open/close distance.
    RealBody,
    /// Full high/low range.
    HighLow,
    /// Sum of the upper and lower shadows.
    Shadows,
}

/// Named sensitivity settings used by the pattern recognizers.
///
/// | setting           | range type | avg period | factor |
/// |-------------------|------------|------------|--------|
/// | `BodyLong`        | real body  | 10         | 1.0    |
/// | `BodyVeryLong`    | real body  | 10         | 3.0    |
/// | `BodyShort`       | real body  | 10         | 1.0    |
/// | `BodyDoji`        | high/low   | 10         | 0.1    |
/// | `ShadowLong`      | real body  | 0          | 1.0    |
/// | `ShadowVeryLong`  | real body  | 0          | 2.0    |
/// | `ShadowShort`     | shadows    | 10         | 1.0    |
/// | `ShadowVeryShort` | high/low   | 10         | 0.1    |
/// | `Near`            | high/low   | 5          | 0.2    |
/// | `Far`             | high/low   | 5          | 0.6    |
/// | `Equal`           | high/low   | 5          | 0.05   |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandleSetting {
    /// Body long enough to count as a "long" candle.
    BodyLong,
    /// Body long enough to count as a "very long" candle.
    BodyVeryLong,
    /// Body short enough to count as a "short" candle.
    BodyShort,
    /// Body small enough to count as a doji.
    BodyDoji,
    /// Shadow long relative to the body.
    ShadowLong,
    /// Shadow very long relative to the body.
    ShadowVeryLong,
    /// Shadow short relative to the average shadow.
    ShadowShort,
    /// Shadow short enough to count as absent.
    ShadowVeryShort,
    /// Two prices close to each other.
    Near,
    /// Two prices clearly apart.
    Far,
    /// Two prices effectively equal.
    Equal,
}

impl CandleSetting {
    /// The range each threshold is expressed as a fraction of.
    #[must_use]
    pub const fn range_type(self) -> RangeType {
        match self {
            Self::BodyLong
            | Self::BodyVeryLong
            | Self::BodyShort
            | Self::ShadowLong
            | Self::ShadowVeryLong => RangeType::RealBody,
            Self::BodyDoji | Self::ShadowVeryShort | Self::Near | Self::Far | Self::Equal => {
                RangeType::HighLow
            }
            Self::ShadowShort => RangeType::Shadows,
        }
    }

    /// Number of preceding candles averaged; 0 means the current candle
    /// alone supplies the range.
    #[must_use]
    pub const fn avg_period(self) -> usize {
        match self {
            Self::BodyLong
            | Self::BodyVeryLong
            | Self::BodyShort
            | Self::BodyDoji
            | Self::ShadowShort
            | Self::ShadowVeryShort => 10,
            Self::ShadowLong | Self::ShadowVeryLong => 0,
            Self::Near | Self::Far | Self::Equal => 5,
        }
    }

    /// Multiplier applied to the averaged range.
    #[must_use]
    pub const fn factor(self) -> f64 {
        match self {
            Self::BodyLong | Self::BodyShort | Self::ShadowLong | Self::ShadowShort => 1.0,
            Self::BodyVeryLong => 3.0,
            Self::ShadowVeryLong => 2.0,
            Self::BodyDoji | Self::ShadowVeryShort => 0.1,
            Self::Near => 0.2,
            Self::Far => 0.6,
            Self::Equal => 0.05,
        }
    }
}

/// Borrowed OHLC series with the candle measurements the recognizers need.
#[derive(Debug, Clone, Copy)]
pub struct Candles<'a, T> {
    /// Open prices.
    pub open: &'a [T],
    /// High prices.
    pub high: &'a [T],
    /// Low prices.
    pub low: &'a [T],
    /// Close prices.
    pub close: &'a [T],
}

impl<'a, T: SeriesElement> Candles<'a, T> {
    /// Bundles four equal-length OHLC slices.
    ///
    /// # Errors
    ///
    /// - `Error::EmptyInput` if the inputs are empty
    /// - `Error::InvalidInput` if the input lengths differ
    pub fn new(
        open: &'a [T],
        high: &'a [T],
        low: &'a [T],
        close: &'a [T],
        reason: &'static str,
    ) -> Result<Self> {
        open.validate_not_empty()?;
        validate_same_length(&[open.len(), high.len(), low.len(), close.len()], reason)?;
        Ok(Self {
            open,
            high,
            low,
            close,
        })
    }

    /// Number of bars in the series.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.close.len()
    }

    /// True when the series has no bars.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.close.is_empty()
    }

    /// Absolute open/close distance.
    #[inline]
    #[must_use]
    pub fn real_body(&self, idx: usize) -> T {
        (self.close[idx] - self.open[idx]).abs()
    }

    /// Wick above the body.
    #[inline]
    #[must_use]
    pub fn upper_shadow(&self, idx: usize) -> T {
        self.high[idx] - self.open[idx].max(self.close[idx])
    }

    /// Wick below the body.
    #[inline]
    #[must_use]
    pub fn lower_shadow(&self, idx: usize) -> T {
        self.open[idx].min(self.close[idx]) - self.low[idx]
    }

    /// Full high/low range.
    #[inline]
    #[must_use]
    pub fn high_low_range(&self, idx: usize) -> T {
        self.high[idx] - self.low[idx]
    }

    /// +1 for a white candle (close at or above open), -1 for a black one.
    #[inline]
    #[must_use]
    pub fn color(&self, idx: usize) -> i32 {
        if self.close[idx] >= self.open[idx] {
            1
        } else {
            -1
        }
    }

    /// Higher of open and close.
    #[inline]
    #[must_use]
    pub fn body_top(&self, idx: usize) -> T {
        self.open[idx].max(self.close[idx])
    }

    /// Lower of open and close.
    #[inline]
    #[must_use]
    pub fn body_bottom(&self, idx: usize) -> T {
        self.open[idx].min(self.close[idx])
    }

    /// The candle's range under a setting's range type.
    #[inline]
    #[must_use]
    pub fn range(&self, setting: CandleSetting, idx: usize) -> T {
        match setting.range_type() {
            RangeType::RealBody => self.real_body(idx),
            RangeType::HighLow => self.high_low_range(idx),
            RangeType::Shadows => self.upper_shadow(idx) + self.lower_shadow(idx),
        }
    }

    /// Threshold a setting resolves to at `idx`, given the running total of
    /// its ranges over the preceding `avg_period` candles.
    ///
    /// A zero averaging period falls back to the candle's own range. Shadow
    /// totals cover two wicks per candle, so that range is halved.
    #[must_use]
    pub fn average(&self, setting: CandleSetting, period_total: T, idx: usize) -> T {
        let period = setting.avg_period();
        let mut range = if period == 0 {
            self.range(setting, idx)
        } else {
            period_total / usize_to_t(period)
        };
        if setting.range_type() == RangeType::Shadows {
            range = range / T::two();
        }
        f64_to_t::<T>(setting.factor()) * range
    }

    /// True when the body at `idx2` sits entirely above the body at `idx1`.
    #[inline]
    #[must_use]
    pub fn real_body_gap_up(&self, idx2: usize, idx1: usize) -> bool {
        self.body_bottom(idx2) > self.body_top(idx1)
    }

    /// True when the body at `idx2` sits entirely below the body at `idx1`.
    #[inline]
    #[must_use]
    pub fn real_body_gap_down(&self, idx2: usize, idx1: usize) -> bool {
        self.body_top(idx2) < self.body_bottom(idx1)
    }

    /// True when the whole candle at `idx2` gaps above the candle at `idx1`.
    #[inline]
    #[must_use]
    pub fn candle_gap_up(&self, idx2: usize, idx1: usize) -> bool {
        self.low[idx2] > self.high[idx1]
    }

    /// True when the whole candle at `idx2` gaps below the candle at `idx1`.
    #[inline]
    #[must_use]
    pub fn candle_gap_down(&self, idx2: usize, idx1: usize) -> bool {
        self.high[idx2] < self.low[idx1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{approx_eq, EPSILON};

    fn candles_from(
        open: &'static [f64],
        high: &'static [f64],
        low: &'static [f64],
        close: &'static [f64],
    ) -> Candles<'static, f64> {
        Candles::new(open, high, low, close, "test").unwrap()
    }

    #[test]
    fn test_candle_measurements() {
        let c = candles_from(&[100.0, 105.0], &[110.0, 110.0], &[95.0, 95.0], &[105.0, 100.0]);
        // White candle: open 100, high 110, low 95, close 105.
        assert!(approx_eq(c.real_body(0), 5.0, EPSILON));
        assert!(approx_eq(c.upper_shadow(0), 5.0, EPSILON));
        assert!(approx_eq(c.lower_shadow(0), 5.0, EPSILON));
        assert!(approx_eq(c.high_low_range(0), 15.0, EPSILON));
        assert_eq!(c.color(0), 1);
        // Black candle: open 105, close 100.
        assert_eq!(c.color(1), -1);
        assert!(approx_eq(c.body_top(1), 105.0, EPSILON));
        assert!(approx_eq(c.body_bottom(1), 100.0, EPSILON));
    }

    #[test]
    fn test_flat_candle_is_white() {
        let c = candles_from(&[100.0], &[100.0], &[100.0], &[100.0]);
        assert_eq!(c.color(0), 1);
    }

    #[test]
    fn test_range_dispatch() {
        let c = candles_from(&[100.0], &[110.0], &[95.0], &[105.0]);
        assert!(approx_eq(c.range(CandleSetting::BodyLong, 0), 5.0, EPSILON));
        assert!(approx_eq(c.range(CandleSetting::BodyDoji, 0), 15.0, EPSILON));
        assert!(approx_eq(c.range(CandleSetting::ShadowShort, 0), 10.0, EPSILON));
    }

    #[test]
    fn test_average_with_period() {
        let c = candles_from(&[100.0], &[110.0], &[95.0], &[105.0]);
        // BodyDoji: high/low range, period 10, factor 0.1.
        let avg = c.average(CandleSetting::BodyDoji, 150.0, 0);
        assert!(approx_eq(avg, 0.1 * 15.0, EPSILON));
    }

    #[test]
    fn test_average_zero_period_uses_current_candle() {
        let c = candles_from(&[100.0], &[110.0], &[95.0], &[105.0]);
        // ShadowVeryLong: real body, period 0, factor 2.0.
        let avg = c.average(CandleSetting::ShadowVeryLong, 0.0, 0);
        assert!(approx_eq(avg, 2.0 * 5.0, EPSILON));
    }

    #[test]
    fn test_average_halves_shadow_range() {
        let c = candles_from(&[100.0], &[110.0], &[95.0], &[105.0]);
        // ShadowShort: shadows, period 10, factor 1.0, total split across two wicks.
        let avg = c.average(CandleSetting::ShadowShort, 40.0, 0);
        assert!(approx_eq(avg, 40.0 / 10.0 / 2.0, EPSILON));
    }

    #[test]
    fn test_gap_predicates() {
        let c = candles_from(
            &[100.0, 108.0],
            &[106.0, 112.0],
            &[99.0, 107.0],
            &[105.0, 111.0],
        );
        assert!(c.real_body_gap_up(1, 0));
        assert!(!c.real_body_gap_down(1, 0));
        assert!(c.candle_gap_up(1, 0));
        assert!(!c.candle_gap_down(1, 0));
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let open = [100.0, 101.0];
        let rest = [100.0];
        assert!(Candles::new(&open[..], &rest[..], &rest[..], &rest[..], "test").is_err());
    }
}
