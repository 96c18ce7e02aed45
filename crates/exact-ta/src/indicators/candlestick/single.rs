//! Single-candle pattern recognizers.
//!
//! Each recognizer emits one i32 per input bar: +100 for a bullish match,
//! -100 for a bearish match, 0 otherwise. The first `lookback` bars are
//! always 0 because the rolling setting averages are still priming.

use super::core::CandleSetting::{
    BodyDoji, BodyLong, BodyShort, Near, ShadowLong, ShadowShort, ShadowVeryShort,
};
use super::core::Candles;
use crate::error::Result;
use crate::traits::{validate_output_len, SeriesElement};

/// Returns the number of leading zero bars in DOJI output.
#[inline]
#[must_use]
pub const fn cdl_doji_lookback() -> usize {
    10 // avg period of BodyDoji
}

/// Detects doji candles (body negligible against the recent range) into a
/// caller-supplied buffer.
///
/// # Errors
///
/// - `Error::EmptyInput` if the inputs are empty
/// - `Error::InvalidInput` if the input lengths differ
/// - `Error::BufferTooSmall` if `output.len() < close.len()`
pub fn cdl_doji_into<T: SeriesElement>(
    open: &[T],
    high: &[T],
    low: &[T],
    close: &[T],
    output: &mut [i32],
) -> Result<()> {
    let c = Candles::new(open, high, low, close, "cdl_doji")?;
    validate_output_len(output.len(), c.len(), "cdl_doji")?;
    let len = c.len();
    output[..len].fill(0);
    let lookback = cdl_doji_lookback();
    if len <= lookback {
        return Ok(());
    }

    let mut body_doji_total = T::zero();
    for i in 0..lookback {
        body_doji_total = body_doji_total + c.range(BodyDoji, i);
    }

    let mut trailing = 0;
    for i in lookback..len {
        if c.real_body(i) <= c.average(BodyDoji, body_doji_total, i) {
            output[i] = 100;
        }
        body_doji_total = body_doji_total
            + (c.range(BodyDoji, i) - c.range(BodyDoji, trailing));
        trailing += 1;
    }
    Ok(())
}

/// Detects doji candles.
///
/// # Errors
///
/// See [`cdl_doji_into`].
pub fn cdl_doji<T: SeriesElement>(
    open: &[T],
    high: &[T],
    low: &[T],
    close: &[T],
) -> Result<Vec<i32>> {
    let mut output = vec![0i32; close.len()];
    cdl_doji_into(open, high, low, close, &mut output)?;
    Ok(output)
}

/// Returns the number of leading zero bars in DRAGONFLY DOJI output.
#[inline]
#[must_use]
pub const fn cdl_dragonfly_doji_lookback() -> usize {
    10 // max of BodyDoji and ShadowVeryShort avg periods
}

/// Detects dragonfly doji candles (doji body at the top of a long lower
/// shadow) into a caller-supplied buffer.
///
/// # Errors
///
/// See [`cdl_doji_into`].
pub fn cdl_dragonfly_doji_into<T: SeriesElement>(
    open: &[T],
    high: &[T],
    low: &[T],
    close: &[T],
    output: &mut [i32],
) -> Result<()> {
    let c = Candles::new(open, high, low, close, "cdl_dragonfly_doji")?;
    validate_output_len(output.len(), c.len(), "cdl_dragonfly_doji")?;
    let len = c.len();
    output[..len].fill(0);
    let lookback = cdl_dragonfly_doji_lookback();
    if len <= lookback {
        return Ok(());
    }

    let mut body_doji_total = T::zero();
    let mut shadow_vs_total = T::zero();
    for i in 0..lookback {
        body_doji_total = body_doji_total + c.range(BodyDoji, i);
        shadow_vs_total = shadow_vs_total + c.range(ShadowVeryShort, i);
    }

    let mut trailing = 0;
    for i in lookback..len {
        if c.real_body(i) <= c.average(BodyDoji, body_doji_total, i)
            && c.upper_shadow(i) < c.average(ShadowVeryShort, shadow_vs_total, i)
            && c.lower_shadow(i) > c.average(ShadowVeryShort, shadow_vs_total, i)
        {
            output[i] = 100;
        }
        body_doji_total = body_doji_total
            + (c.range(BodyDoji, i) - c.range(BodyDoji, trailing));
        shadow_vs_total = shadow_vs_total
            + (c.range(ShadowVeryShort, i) - c.range(ShadowVeryShort, trailing));
        trailing += 1;
    }
    Ok(())
}

/// Detects dragonfly doji candles.
///
/// # Errors
///
/// See [`cdl_doji_into`].
pub fn cdl_dragonfly_doji<T: SeriesElement>(
    open: &[T],
    high: &[T],
    low: &[T],
    close: &[T],
) -> Result<Vec<i32>> {
    let mut output = vec![0i32; close.len()];
    cdl_dragonfly_doji_into(open, high, low, close, &mut output)?;
    Ok(output)
}

/// Returns the number of leading zero bars in GRAVESTONE DOJI output.
#[inline]
#[must_use]
pub const fn cdl_gravestone_doji_lookback() -> usize {
    10 // max of BodyDoji and ShadowVeryShort avg periods
}

/// Detects gravestone doji candles (doji body at the bottom of a long upper
/// shadow) into a caller-supplied buffer.
///
/// # Errors
///
/// See [`cdl_doji_into`].
pub fn cdl_gravestone_doji_into<T: SeriesElement>(
    open: &[T],
    high: &[T],
    low: &[T],
    close: &[T],
    output: &mut [i32],
) -> Result<()> {
    let c = Candles::new(open, high, low, close, "cdl_gravestone_doji")?;
    validate_output_len(output.len(), c.len(), "cdl_gravestone_doji")?;
    let len = c.len();
    output[..len].fill(0);
    let lookback = cdl_gravestone_doji_lookback();
    if len <= lookback {
        return Ok(());
    }

    let mut body_doji_total = T::zero();
    let mut shadow_vs_total = T::zero();
    for i in 0..lookback {
        body_doji_total = body_doji_total + c.range(BodyDoji, i);
        shadow_vs_total = shadow_vs_total + c.range(ShadowVeryShort, i);
    }

    let mut trailing = 0;
    for i in lookback..len {
        if c.real_body(i) <= c.average(BodyDoji, body_doji_total, i)
            && c.lower_shadow(i) < c.average(ShadowVeryShort, shadow_vs_total, i)
            && c.upper_shadow(i) > c.average(ShadowVeryShort, shadow_vs_total, i)
        {
            output[i] = 100;
        }
        body_doji_total = body_doji_total
            + (c.range(BodyDoji, i) - c.range(BodyDoji, trailing));
        shadow_vs_total = shadow_vs_total
            + (c.range(ShadowVeryShort, i) - c.range(ShadowVeryShort, trailing));
        trailing += 1;
    }
    Ok(())
}

/// Detects gravestone doji candles.
///
/// # Errors
///
/// See [`cdl_doji_into`].
pub fn cdl_gravestone_doji<T: SeriesElement>(
    open: &[T],
    high: &[T],
    low: &[T],
    close: &[T],
) -> Result<Vec<i32>> {
    let mut output = vec![0i32; close.len()];
    cdl_gravestone_doji_into(open, high, low, close, &mut output)?;
    Ok(output)
}

/// Returns the number of leading zero bars in RICKSHAW MAN output.
#[inline]
#[must_use]
pub const fn cdl_rickshaw_man_lookback() -> usize {
    10 // max of BodyDoji, ShadowLong, and Near avg periods
}

/// Detects rickshaw man candles (doji with two long shadows and the body
/// near the middle of the range) into a caller-supplied buffer.
///
/// # Errors
///
/// See [`cdl_doji_into`].
pub fn cdl_rickshaw_man_into<T: SeriesElement>(
    open: &[T],
    high: &[T],
    low: &[T],
    close: &[T],
    output: &mut [i32],
) -> Result<()> {
    let c = Candles::new(open, high, low, close, "cdl_rickshaw_man")?;
    validate_output_len(output.len(), c.len(), "cdl_rickshaw_man")?;
    let len = c.len();
    output[..len].fill(0);
    let lookback = cdl_rickshaw_man_lookback();
    if len <= lookback {
        return Ok(());
    }

    let mut body_doji_total = T::zero();
    let mut near_total = T::zero();
    for i in 0..lookback {
        body_doji_total = body_doji_total + c.range(BodyDoji, i);
        near_total = near_total + c.range(Near, i);
    }

    let mut trailing = 0;
    for i in lookback..len {
        // ShadowLong averages over period 0, so no running total is kept.
        let shadow_long_avg = c.average(ShadowLong, T::zero(), i);
        let near_avg = c.average(Near, near_total, i);
        let midpoint = c.low[i] + c.high_low_range(i) / T::two();

        if c.real_body(i) <= c.average(BodyDoji, body_doji_total, i)
            && c.lower_shadow(i) > shadow_long_avg
            && c.upper_shadow(i) > shadow_long_avg
            && c.body_bottom(i) <= midpoint + near_avg
            && c.body_top(i) >= midpoint - near_avg
        {
            output[i] = 100;
        }
        body_doji_total = body_doji_total
            + (c.range(BodyDoji, i) - c.range(BodyDoji, trailing));
        near_total = near_total + (c.range(Near, i) - c.range(Near, trailing));
        trailing += 1;
    }
    Ok(())
}

/// Detects rickshaw man candles.
///
/// # Errors
///
/// See [`cdl_doji_into`].
pub fn cdl_rickshaw_man<T: SeriesElement>(
    open: &[T],
    high: &[T],
    low: &[T],
    close: &[T],
) -> Result<Vec<i32>> {
    let mut output = vec![0i32; close.len()];
    cdl_rickshaw_man_into(open, high, low, close, &mut output)?;
    Ok(output)
}

/// Returns the number of leading zero bars in SPINNING TOP output.
#[inline]
#[must_use]
pub const fn cdl_spinning_top_lookback() -> usize {
    10 // avg period of BodyShort
}

/// Detects spinning tops (short body with both shadows longer than the
/// body) into a caller-supplied buffer. Signals carry the candle color.
///
/// # Errors
///
/// See [`cdl_doji_into`].
pub fn cdl_spinning_top_into<T: SeriesElement>(
    open: &[T],
    high: &[T],
    low: &[T],
    close: &[T],
    output: &mut [i32],
) -> Result<()> {
    let c = Candles::new(open, high, low, close, "cdl_spinning_top")?;
    validate_output_len(output.len(), c.len(), "cdl_spinning_top")?;
    let len = c.len();
    output[..len].fill(0);
    let lookback = cdl_spinning_top_lookback();
    if len <= lookback {
        return Ok(());
    }

    let mut body_total = T::zero();
    for i in 0..lookback {
        body_total = body_total + c.range(BodyShort, i);
    }

    let mut trailing = 0;
    for i in lookback..len {
        let rb = c.real_body(i);
        if rb < c.average(BodyShort, body_total, i)
            && c.upper_shadow(i) > rb
            && c.lower_shadow(i) > rb
        {
            output[i] = c.color(i) * 100;
        }
        body_total = body_total + (c.range(BodyShort, i) - c.range(BodyShort, trailing));
        trailing += 1;
    }
    Ok(())
}

/// Detects spinning tops.
///
/// # Errors
///
/// See [`cdl_doji_into`].
pub fn cdl_spinning_top<T: SeriesElement>(
    open: &[T],
    high: &[T],
    low: &[T],
    close: &[T],
) -> Result<Vec<i32>> {
    let mut output = vec![0i32; close.len()];
    cdl_spinning_top_into(open, high, low, close, &mut output)?;
    Ok(output)
}

/// Returns the number of leading zero bars in SHORT LINE output.
#[inline]
#[must_use]
pub const fn cdl_short_line_lookback() -> usize {
    10 // max of BodyShort and ShadowShort avg periods
}

/// Detects short line candles (short body and short shadows) into a
/// caller-supplied buffer. Signals carry the candle color.
///
/// # Errors
///
/// See [`cdl_doji_into`].
pub fn cdl_short_line_into<T: SeriesElement>(
    open: &[T],
    high: &[T],
    low: &[T],
    close: &[T],
    output: &mut [i32],
) -> Result<()> {
    let c = Candles::new(open, high, low, close, "cdl_short_line")?;
    validate_output_len(output.len(), c.len(), "cdl_short_line")?;
    let len = c.len();
    output[..len].fill(0);
    let lookback = cdl_short_line_lookback();
    if len <= lookback {
        return Ok(());
    }

    let mut body_total = T::zero();
    let mut shadow_total = T::zero();
    for i in 0..lookback {
        body_total = body_total + c.range(BodyShort, i);
        shadow_total = shadow_total + c.range(ShadowShort, i);
    }

    let mut trailing = 0;
    for i in lookback..len {
        if c.real_body(i) < c.average(BodyShort, body_total, i)
            && c.upper_shadow(i) < c.average(ShadowShort, shadow_total, i)
            && c.lower_shadow(i) < c.average(ShadowShort, shadow_total, i)
        {
            output[i] = c.color(i) * 100;
        }
        body_total = body_total + (c.range(BodyShort, i) - c.range(BodyShort, trailing));
        shadow_total = shadow_total + (c.range(ShadowShort, i) - c.range(ShadowShort, trailing));
        trailing += 1;
    }
    Ok(())
}

/// Detects short line candles.
///
/// # Errors
///
/// See [`cdl_doji_into`].
pub fn cdl_short_line<T: SeriesElement>(
    open: &[T],
    high: &[T],
    low: &[T],
    close: &[T],
) -> Result<Vec<i32>> {
    let mut output = vec![0i32; close.len()];
    cdl_short_line_into(open, high, low, close, &mut output)?;
    Ok(output)
}

/// Returns the number of leading zero bars in CLOSING MARUBOZU output.
#[inline]
#[must_use]
pub const fn cdl_closing_marubozu_lookback() -> usize {
    10 // max of BodyLong and ShadowVeryShort avg periods
}

/// Detects closing marubozu candles (long body closing at its extreme) into
/// a caller-supplied buffer. Signals carry the candle color.
///
/// # Errors
///
/// See [`cdl_doji_into`].
pub fn cdl_closing_marubozu_into<T: SeriesElement>(
    open: &[T],
    high: &[T],
    low: &[T],
    close: &[T],
    output: &mut [i32],
) -> Result<()> {
    let c = Candles::new(open, high, low, close, "cdl_closing_marubozu")?;
    validate_output_len(output.len(), c.len(), "cdl_closing_marubozu")?;
    let len = c.len();
    output[..len].fill(0);
    let lookback = cdl_closing_marubozu_lookback();
    if len <= lookback {
        return Ok(());
    }

    let mut body_long_total = T::zero();
    let mut shadow_vs_total = T::zero();
    for i in 0..lookback {
        body_long_total = body_long_total + c.range(BodyLong, i);
        shadow_vs_total = shadow_vs_total + c.range(ShadowVeryShort, i);
    }

    let mut trailing = 0;
    for i in lookback..len {
        let color = c.color(i);
        let shadow_vs_avg = c.average(ShadowVeryShort, shadow_vs_total, i);
        if c.real_body(i) > c.average(BodyLong, body_long_total, i)
            && ((color == 1 && c.upper_shadow(i) < shadow_vs_avg)
                || (color == -1 && c.lower_shadow(i) < shadow_vs_avg))
        {
            output[i] = color * 100;
        }
        body_long_total = body_long_total
            + (c.range(BodyLong, i) - c.range(BodyLong, trailing));
        shadow_vs_total = shadow_vs_total
            + (c.range(ShadowVeryShort, i) - c.range(ShadowVeryShort, trailing));
        trailing += 1;
    }
    Ok(())
}

/// Detects closing marubozu candles.
///
/// # Errors
///
/// See [`cdl_doji_into`].
pub fn cdl_closing_marubozu<T: SeriesElement>(
    open: &[T],
    high: &[T],
    low: &[T],
    close: &[T],
) -> Result<Vec<i32>> {
    let mut output = vec![0i32; close.len()];
    cdl_closing_marubozu_into(open, high, low, close, &mut output)?;
    Ok(output)
}

/// Returns the number of leading zero bars in HAMMER output.
#[inline]
#[must_use]
pub const fn cdl_hammer_lookback() -> usize {
    11 // max setting avg period plus one bar for the Near reference
}

/// Detects hammers (short body, long lower shadow, body near the prior
/// bar's low) into a caller-supplied buffer.
///
/// # Errors
///
/// See [`cdl_doji_into`].
pub fn cdl_hammer_into<T: SeriesElement>(
    open: &[T],
    high: &[T],
    low: &[T],
    close: &[T],
    output: &mut [i32],
) -> Result<()> {
    let c = Candles::new(open, high, low, close, "cdl_hammer")?;
    validate_output_len(output.len(), c.len(), "cdl_hammer")?;
    let len = c.len();
    output[..len].fill(0);
    let start = cdl_hammer_lookback();
    if len <= start {
        return Ok(());
    }

    let mut body_total = T::zero();
    let mut shadow_vs_total = T::zero();
    let mut near_total = T::zero();
    let mut body_trailing = start - BodyShort.avg_period();
    let mut shadow_vs_trailing = start - ShadowVeryShort.avg_period();
    let mut near_trailing = start - 1 - Near.avg_period();

    for i in body_trailing..start {
        body_total = body_total + c.range(BodyShort, i);
    }
    for i in shadow_vs_trailing..start {
        shadow_vs_total = shadow_vs_total + c.range(ShadowVeryShort, i);
    }
    for i in near_trailing..start - 1 {
        near_total = near_total + c.range(Near, i);
    }

    for i in start..len {
        if c.real_body(i) < c.average(BodyShort, body_total, i)
            && c.lower_shadow(i) > c.average(ShadowLong, T::zero(), i)
            && c.upper_shadow(i) < c.average(ShadowVeryShort, shadow_vs_total, i)
            && c.body_bottom(i) <= c.low[i - 1] + c.average(Near, near_total, i - 1)
        {
            output[i] = 100;
        }
        body_total = body_total + (c.range(BodyShort, i) - c.range(BodyShort, body_trailing));
        shadow_vs_total = shadow_vs_total
            + (c.range(ShadowVeryShort, i) - c.range(ShadowVeryShort, shadow_vs_trailing));
        near_total = near_total + (c.range(Near, i - 1) - c.range(Near, near_trailing));
        body_trailing += 1;
        shadow_vs_trailing += 1;
        near_trailing += 1;
    }
    Ok(())
}

/// Detects hammers.
///
/// # Errors
///
/// See [`cdl_doji_into`].
pub fn cdl_hammer<T: SeriesElement>(
    open: &[T],
    high: &[T],
    low: &[T],
    close: &[T],
) -> Result<Vec<i32>> {
    let mut output = vec![0i32; close.len()];
    cdl_hammer_into(open, high, low, close, &mut output)?;
    Ok(output)
}

/// Returns the number of leading zero bars in INVERTED HAMMER output.
#[inline]
#[must_use]
pub const fn cdl_inverted_hammer_lookback() -> usize {
    11 // max setting avg period plus one bar for the gap
}

/// Detects inverted hammers (short body gapping down, long upper shadow)
/// into a caller-supplied buffer.
///
/// # Errors
///
/// See [`cdl_doji_into`].
pub fn cdl_inverted_hammer_into<T: SeriesElement>(
    open: &[T],
    high: &[T],
    low: &[T],
    close: &[T],
    output: &mut [i32],
) -> Result<()> {
    let c = Candles::new(open, high, low, close, "cdl_inverted_hammer")?;
    validate_output_len(output.len(), c.len(), "cdl_inverted_hammer")?;
    let len = c.len();
    output[..len].fill(0);
    let start = cdl_inverted_hammer_lookback();
    if len <= start {
        return Ok(());
    }

    let mut body_total = T::zero();
    let mut shadow_vs_total = T::zero();
    let mut body_trailing = start - BodyShort.avg_period();
    let mut shadow_vs_trailing = start - ShadowVeryShort.avg_period();

    for i in body_trailing..start {
        body_total = body_total + c.range(BodyShort, i);
    }
    for i in shadow_vs_trailing..start {
        shadow_vs_total = shadow_vs_total + c.range(ShadowVeryShort, i);
    }

    for i in start..len {
        if c.real_body(i) < c.average(BodyShort, body_total, i)
            && c.upper_shadow(i) > c.average(ShadowLong, T::zero(), i)
            && c.lower_shadow(i) < c.average(ShadowVeryShort, shadow_vs_total, i)
            && c.real_body_gap_down(i, i - 1)
        {
            output[i] = 100;
        }
        body_total = body_total + (c.range(BodyShort, i) - c.range(BodyShort, body_trailing));
        shadow_vs_total = shadow_vs_total
            + (c.range(ShadowVeryShort, i) - c.range(ShadowVeryShort, shadow_vs_trailing));
        body_trailing += 1;
        shadow_vs_trailing += 1;
    }
    Ok(())
}

/// Detects inverted hammers.
///
/// # Errors
///
/// See [`cdl_doji_into`].
pub fn cdl_inverted_hammer<T: SeriesElement>(
    open: &[T],
    high: &[T],
    low: &[T],
    close: &[T],
) -> Result<Vec<i32>> {
    let mut output = vec![0i32; close.len()];
    cdl_inverted_hammer_into(open, high, low, close, &mut output)?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Ten priming bars of open 100, high 106, low 99, close 105 give
    // setting averages of: body long/short 5.0, doji 0.7, very-short
    // shadow 0.7, short shadow 1.0, near 1.4.
    fn uniform_bars(n: usize) -> (Vec<f64>, Vec<f64>, Vec<f64>, Vec<f64>) {
        (
            vec![100.0; n],
            vec![106.0; n],
            vec![99.0; n],
            vec![105.0; n],
        )
    }

    fn set_bar(
        bars: &mut (Vec<f64>, Vec<f64>, Vec<f64>, Vec<f64>),
        i: usize,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
    ) {
        bars.0[i] = open;
        bars.1[i] = high;
        bars.2[i] = low;
        bars.3[i] = close;
    }

    #[test]
    fn test_doji_detected() {
        let mut bars = uniform_bars(11);
        set_bar(&mut bars, 10, 100.0, 106.0, 99.0, 100.5);
        let result = cdl_doji(&bars.0, &bars.1, &bars.2, &bars.3).unwrap();
        assert_eq!(result.len(), 11);
        assert!(result[..10].iter().all(|&v| v == 0));
        assert_eq!(result[10], 100);
    }

    #[test]
    fn test_doji_rejects_real_body() {
        let mut bars = uniform_bars(11);
        set_bar(&mut bars, 10, 100.0, 106.0, 99.0, 103.0);
        let result = cdl_doji(&bars.0, &bars.1, &bars.2, &bars.3).unwrap();
        assert_eq!(result[10], 0);
    }

    #[test]
    fn test_doji_short_input_all_zero() {
        let bars = uniform_bars(5);
        let result = cdl_doji(&bars.0, &bars.1, &bars.2, &bars.3).unwrap();
        assert!(result.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_dragonfly_doji_detected() {
        let mut bars = uniform_bars(11);
        set_bar(&mut bars, 10, 100.0, 100.2, 95.0, 100.1);
        let result = cdl_dragonfly_doji(&bars.0, &bars.1, &bars.2, &bars.3).unwrap();
        assert_eq!(result[10], 100);
        // Same candle is no gravestone.
        let result = cdl_gravestone_doji(&bars.0, &bars.1, &bars.2, &bars.3).unwrap();
        assert_eq!(result[10], 0);
    }

    #[test]
    fn test_gravestone_doji_detected() {
        let mut bars = uniform_bars(11);
        set_bar(&mut bars, 10, 100.1, 105.0, 99.9, 100.0);
        let result = cdl_gravestone_doji(&bars.0, &bars.1, &bars.2, &bars.3).unwrap();
        assert_eq!(result[10], 100);
        let result = cdl_dragonfly_doji(&bars.0, &bars.1, &bars.2, &bars.3).unwrap();
        assert_eq!(result[10], 0);
    }

    #[test]
    fn test_rickshaw_man_detected() {
        let mut bars = uniform_bars(11);
        set_bar(&mut bars, 10, 99.9, 105.0, 95.0, 100.1);
        let result = cdl_rickshaw_man(&bars.0, &bars.1, &bars.2, &bars.3).unwrap();
        assert_eq!(result[10], 100);
    }

    #[test]
    fn test_rickshaw_man_rejects_off_center_body() {
        // Doji with both long shadows but the body pinned near the high.
        let mut bars = uniform_bars(11);
        set_bar(&mut bars, 10, 104.5, 105.4, 95.0, 104.7);
        let result = cdl_rickshaw_man(&bars.0, &bars.1, &bars.2, &bars.3).unwrap();
        assert_eq!(result[10], 0);
    }

    #[test]
    fn test_spinning_top_carries_color() {
        let mut bars = uniform_bars(11);
        set_bar(&mut bars, 10, 100.0, 105.0, 97.0, 102.0);
        let result = cdl_spinning_top(&bars.0, &bars.1, &bars.2, &bars.3).unwrap();
        assert_eq!(result[10], 100);
        set_bar(&mut bars, 10, 102.0, 105.0, 97.0, 100.0);
        let result = cdl_spinning_top(&bars.0, &bars.1, &bars.2, &bars.3).unwrap();
        assert_eq!(result[10], -100);
    }

    #[test]
    fn test_short_line_detected() {
        let mut bars = uniform_bars(11);
        set_bar(&mut bars, 10, 100.0, 102.5, 99.6, 102.0);
        let result = cdl_short_line(&bars.0, &bars.1, &bars.2, &bars.3).unwrap();
        assert_eq!(result[10], 100);
    }

    #[test]
    fn test_short_line_rejects_long_shadow() {
        let mut bars = uniform_bars(11);
        set_bar(&mut bars, 10, 100.0, 104.5, 99.6, 102.0);
        let result = cdl_short_line(&bars.0, &bars.1, &bars.2, &bars.3).unwrap();
        assert_eq!(result[10], 0);
    }

    #[test]
    fn test_closing_marubozu_white() {
        let mut bars = uniform_bars(11);
        set_bar(&mut bars, 10, 100.0, 108.05, 99.0, 108.0);
        let result = cdl_closing_marubozu(&bars.0, &bars.1, &bars.2, &bars.3).unwrap();
        assert_eq!(result[10], 100);
    }

    #[test]
    fn test_closing_marubozu_black() {
        let mut bars = uniform_bars(11);
        set_bar(&mut bars, 10, 108.0, 109.0, 99.95, 100.0);
        let result = cdl_closing_marubozu(&bars.0, &bars.1, &bars.2, &bars.3).unwrap();
        assert_eq!(result[10], -100);
    }

    #[test]
    fn test_hammer_detected() {
        let mut bars = uniform_bars(12);
        set_bar(&mut bars, 11, 100.0, 101.2, 95.0, 101.0);
        let result = cdl_hammer(&bars.0, &bars.1, &bars.2, &bars.3).unwrap();
        assert!(result[..11].iter().all(|&v| v == 0));
        assert_eq!(result[11], 100);
    }

    #[test]
    fn test_hammer_rejects_body_far_above_prior_low() {
        // Same shape shifted up, away from the prior bar's low.
        let mut bars = uniform_bars(12);
        set_bar(&mut bars, 11, 104.0, 105.2, 99.0, 105.0);
        let result = cdl_hammer(&bars.0, &bars.1, &bars.2, &bars.3).unwrap();
        assert_eq!(result[11], 0);
    }

    #[test]
    fn test_inverted_hammer_detected() {
        let mut bars = uniform_bars(12);
        set_bar(&mut bars, 11, 96.0, 99.0, 95.8, 96.5);
        let result = cdl_inverted_hammer(&bars.0, &bars.1, &bars.2, &bars.3).unwrap();
        assert_eq!(result[11], 100);
    }

    #[test]
    fn test_inverted_hammer_requires_gap_down() {
        // No body gap below the prior candle's body.
        let mut bars = uniform_bars(12);
        set_bar(&mut bars, 11, 101.0, 104.0, 100.8, 101.5);
        let result = cdl_inverted_hammer(&bars.0, &bars.1, &bars.2, &bars.3).unwrap();
        assert_eq!(result[11], 0);
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let bars = uniform_bars(11);
        assert!(cdl_doji(&bars.0[..10], &bars.1, &bars.2, &bars.3).is_err());
    }
}
