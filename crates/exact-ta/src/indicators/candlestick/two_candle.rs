//! Two-candle pattern recognizers.
//!
//! Hikkake lives here as well: it reads three bars of highs and lows but
//! its signal is the two-bar inside-bar/breakout pair, plus a delayed
//! confirmation that can lift an earlier signal to +-200.

use super::core::CandleSetting::{BodyDoji, BodyLong, BodyShort, Equal};
use super::core::Candles;
use crate::error::Result;
use crate::traits::{validate_factor, validate_output_len, SeriesElement};

/// Returns the number of leading zero bars in ENGULFING output.
#[inline]
#[must_use]
pub const fn cdl_engulfing_lookback() -> usize {
    2
}

/// Detects engulfing patterns (body strictly engulfs the prior, opposite
/// colored body) into a caller-supplied buffer.
///
/// # Errors
///
/// - `Error::EmptyInput` if the inputs are empty
/// - `Error::InvalidInput` if the input lengths differ
/// - `Error::BufferTooSmall` if `output.len() < close.len()`
pub fn cdl_engulfing_into<T: SeriesElement>(
    open: &[T],
    high: &[T],
    low: &[T],
    close: &[T],
    output: &mut [i32],
) -> Result<()> {
    let c = Candles::new(open, high, low, close, "cdl_engulfing")?;
    validate_output_len(output.len(), c.len(), "cdl_engulfing")?;
    let len = c.len();
    output[..len].fill(0);
    let lookback = cdl_engulfing_lookback();
    if len <= lookback {
        return Ok(());
    }

    for i in lookback..len {
        let color = c.color(i);
        let prior = c.color(i - 1);
        let bullish = color == 1
            && prior == -1
            && c.close[i] > c.open[i - 1]
            && c.open[i] < c.close[i - 1];
        let bearish = color == -1
            && prior == 1
            && c.open[i] > c.close[i - 1]
            && c.close[i] < c.open[i - 1];
        if bullish || bearish {
            output[i] = color * 100;
        }
    }
    Ok(())
}

/// Detects engulfing patterns.
///
/// # Errors
///
/// See [`cdl_engulfing_into`].
pub fn cdl_engulfing<T: SeriesElement>(
    open: &[T],
    high: &[T],
    low: &[T],
    close: &[T],
) -> Result<Vec<i32>> {
    let mut output = vec![0i32; close.len()];
    cdl_engulfing_into(open, high, low, close, &mut output)?;
    Ok(output)
}

/// Returns the number of leading zero bars in HARAMI output.
#[inline]
#[must_use]
pub const fn cdl_harami_lookback() -> usize {
    11 // max of BodyShort and BodyLong avg periods, plus the long candle
}

/// Detects harami patterns (short body strictly inside the prior long
/// body) into a caller-supplied buffer. Signals oppose the prior color.
///
/// # Errors
///
/// See [`cdl_engulfing_into`].
pub fn cdl_harami_into<T: SeriesElement>(
    open: &[T],
    high: &[T],
    low: &[T],
    close: &[T],
    output: &mut [i32],
) -> Result<()> {
    let c = Candles::new(open, high, low, close, "cdl_harami")?;
    validate_output_len(output.len(), c.len(), "cdl_harami")?;
    let len = c.len();
    output[..len].fill(0);
    let start = cdl_harami_lookback();
    if len <= start {
        return Ok(());
    }

    let mut body_long_total = T::zero();
    let mut body_short_total = T::zero();
    let mut body_long_trailing = start - 1 - BodyLong.avg_period();
    let mut body_short_trailing = start - BodyShort.avg_period();

    for i in body_long_trailing..start - 1 {
        body_long_total = body_long_total + c.range(BodyLong, i);
    }
    for i in body_short_trailing..start {
        body_short_total = body_short_total + c.range(BodyShort, i);
    }

    for i in start..len {
        if c.real_body(i - 1) > c.average(BodyLong, body_long_total, i - 1)
            && c.real_body(i) <= c.average(BodyShort, body_short_total, i)
            && c.body_top(i) < c.body_top(i - 1)
            && c.body_bottom(i) > c.body_bottom(i - 1)
        {
            output[i] = -c.color(i - 1) * 100;
        }
        body_long_total = body_long_total
            + (c.range(BodyLong, i - 1) - c.range(BodyLong, body_long_trailing));
        body_short_total = body_short_total
            + (c.range(BodyShort, i) - c.range(BodyShort, body_short_trailing));
        body_long_trailing += 1;
        body_short_trailing += 1;
    }
    Ok(())
}

/// Detects harami patterns.
///
/// # Errors
///
/// See [`cdl_engulfing_into`].
pub fn cdl_harami<T: SeriesElement>(
    open: &[T],
    high: &[T],
    low: &[T],
    close: &[T],
) -> Result<Vec<i32>> {
    let mut output = vec![0i32; close.len()];
    cdl_harami_into(open, high, low, close, &mut output)?;
    Ok(output)
}

/// Returns the number of leading zero bars in PIERCING output.
#[inline]
#[must_use]
pub const fn cdl_piercing_lookback() -> usize {
    11 // BodyLong avg period plus the black candle
}

/// Detects piercing patterns (white candle opening below the prior black
/// candle's low and closing above its body midpoint) into a
/// caller-supplied buffer.
///
/// # Errors
///
/// See [`cdl_engulfing_into`].
pub fn cdl_piercing_into<T: SeriesElement>(
    open: &[T],
    high: &[T],
    low: &[T],
    close: &[T],
    output: &mut [i32],
) -> Result<()> {
    let c = Candles::new(open, high, low, close, "cdl_piercing")?;
    validate_output_len(output.len(), c.len(), "cdl_piercing")?;
    let len = c.len();
    output[..len].fill(0);
    let start = cdl_piercing_lookback();
    if len <= start {
        return Ok(());
    }

    // Separate BodyLong totals for the black candle (at i-1) and the
    // white candle (at i).
    let mut prior_total = T::zero();
    let mut current_total = T::zero();
    let mut trailing = start - BodyLong.avg_period();
    for i in trailing..start {
        prior_total = prior_total + c.range(BodyLong, i - 1);
        current_total = current_total + c.range(BodyLong, i);
    }

    for i in start..len {
        let prior_body = c.real_body(i - 1);
        if c.color(i - 1) == -1
            && prior_body > c.average(BodyLong, prior_total, i - 1)
            && c.color(i) == 1
            && c.real_body(i) > c.average(BodyLong, current_total, i)
            && c.open[i] < c.low[i - 1]
            && c.close[i] < c.open[i - 1]
            && c.close[i] > c.close[i - 1] + prior_body / T::two()
        {
            output[i] = 100;
        }
        prior_total = prior_total
            + (c.range(BodyLong, i - 1) - c.range(BodyLong, trailing - 1));
        current_total = current_total + (c.range(BodyLong, i) - c.range(BodyLong, trailing));
        trailing += 1;
    }
    Ok(())
}

/// Detects piercing patterns.
///
/// # Errors
///
/// See [`cdl_engulfing_into`].
pub fn cdl_piercing<T: SeriesElement>(
    open: &[T],
    high: &[T],
    low: &[T],
    close: &[T],
) -> Result<Vec<i32>> {
    let mut output = vec![0i32; close.len()];
    cdl_piercing_into(open, high, low, close, &mut output)?;
    Ok(output)
}

/// Returns the number of leading zero bars in DARK CLOUD COVER output.
#[inline]
#[must_use]
pub const fn cdl_dark_cloud_cover_lookback() -> usize {
    11 // BodyLong avg period plus the white candle
}

/// Detects dark cloud cover (black candle opening above the prior white
/// candle's high and closing deep into its body) into a caller-supplied
/// buffer.
///
/// `penetration` sets how far the close must sink into the prior body,
/// as a fraction of that body.
///
/// # Errors
///
/// - `Error::InvalidParameter` if `penetration` is negative or not finite
/// - otherwise see [`cdl_engulfing_into`]
pub fn cdl_dark_cloud_cover_into<T: SeriesElement>(
    open: &[T],
    high: &[T],
    low: &[T],
    close: &[T],
    penetration: T,
    output: &mut [i32],
) -> Result<()> {
    validate_factor(penetration, "penetration")?;
    let c = Candles::new(open, high, low, close, "cdl_dark_cloud_cover")?;
    validate_output_len(output.len(), c.len(), "cdl_dark_cloud_cover")?;
    let len = c.len();
    output[..len].fill(0);
    let start = cdl_dark_cloud_cover_lookback();
    if len <= start {
        return Ok(());
    }

    let mut body_long_total = T::zero();
    let mut trailing = start - BodyLong.avg_period();
    for i in trailing..start {
        body_long_total = body_long_total + c.range(BodyLong, i - 1);
    }

    for i in start..len {
        let prior_body = c.real_body(i - 1);
        if c.color(i - 1) == 1
            && prior_body > c.average(BodyLong, body_long_total, i - 1)
            && c.color(i) == -1
            && c.open[i] > c.high[i - 1]
            && c.close[i] > c.open[i - 1]
            && c.close[i] < c.close[i - 1] - prior_body * penetration
        {
            output[i] = -100;
        }
        body_long_total = body_long_total
            + (c.range(BodyLong, i - 1) - c.range(BodyLong, trailing - 1));
        trailing += 1;
    }
    Ok(())
}

/// Detects dark cloud cover with an explicit penetration fraction.
///
/// # Errors
///
/// See [`cdl_dark_cloud_cover_into`].
pub fn cdl_dark_cloud_cover<T: SeriesElement>(
    open: &[T],
    high: &[T],
    low: &[T],
    close: &[T],
    penetration: T,
) -> Result<Vec<i32>> {
    let mut output = vec![0i32; close.len()];
    cdl_dark_cloud_cover_into(open, high, low, close, penetration, &mut output)?;
    Ok(output)
}

/// Detects dark cloud cover with the conventional penetration of 0.5.
///
/// # Errors
///
/// See [`cdl_dark_cloud_cover_into`].
pub fn cdl_dark_cloud_cover_default<T: SeriesElement>(
    open: &[T],
    high: &[T],
    low: &[T],
    close: &[T],
) -> Result<Vec<i32>> {
    cdl_dark_cloud_cover(open, high, low, close, T::one() / T::two())
}

/// Returns the number of leading zero bars in DOJI STAR output.
#[inline]
#[must_use]
pub const fn cdl_doji_star_lookback() -> usize {
    11 // max of BodyDoji and BodyLong avg periods, plus the long candle
}

/// Detects doji stars (doji gapping away from a prior long body) into a
/// caller-supplied buffer. Signals oppose the prior color.
///
/// # Errors
///
/// See [`cdl_engulfing_into`].
pub fn cdl_doji_star_into<T: SeriesElement>(
    open: &[T],
    high: &[T],
    low: &[T],
    close: &[T],
    output: &mut [i32],
) -> Result<()> {
    let c = Candles::new(open, high, low, close, "cdl_doji_star")?;
    validate_output_len(output.len(), c.len(), "cdl_doji_star")?;
    let len = c.len();
    output[..len].fill(0);
    let start = cdl_doji_star_lookback();
    if len <= start {
        return Ok(());
    }

    let mut body_long_total = T::zero();
    let mut body_doji_total = T::zero();
    let mut body_long_trailing = start - 1 - BodyLong.avg_period();
    let mut body_doji_trailing = start - BodyDoji.avg_period();

    for i in body_long_trailing..start - 1 {
        body_long_total = body_long_total + c.range(BodyLong, i);
    }
    for i in body_doji_trailing..start {
        body_doji_total = body_doji_total + c.range(BodyDoji, i);
    }

    for i in start..len {
        if c.real_body(i - 1) > c.average(BodyLong, body_long_total, i - 1)
            && c.real_body(i) <= c.average(BodyDoji, body_doji_total, i)
            && ((c.color(i - 1) == 1 && c.real_body_gap_up(i, i - 1))
                || (c.color(i - 1) == -1 && c.real_body_gap_down(i, i - 1)))
        {
            output[i] = -c.color(i - 1) * 100;
        }
        body_long_total = body_long_total
            + (c.range(BodyLong, i - 1) - c.range(BodyLong, body_long_trailing));
        body_doji_total = body_doji_total
            + (c.range(BodyDoji, i) - c.range(BodyDoji, body_doji_trailing));
        body_long_trailing += 1;
        body_doji_trailing += 1;
    }
    Ok(())
}

/// Detects doji stars.
///
/// # Errors
///
/// See [`cdl_engulfing_into`].
pub fn cdl_doji_star<T: SeriesElement>(
    open: &[T],
    high: &[T],
    low: &[T],
    close: &[T],
) -> Result<Vec<i32>> {
    let mut output = vec![0i32; close.len()];
    cdl_doji_star_into(open, high, low, close, &mut output)?;
    Ok(output)
}

/// Returns the number of leading zero bars in MATCHING LOW output.
#[inline]
#[must_use]
pub const fn cdl_matching_low_lookback() -> usize {
    6 // Equal avg period plus the first black candle
}

/// Detects matching lows (two black candles closing at effectively the
/// same price) into a caller-supplied buffer.
///
/// # Errors
///
/// See [`cdl_engulfing_into`].
pub fn cdl_matching_low_into<T: SeriesElement>(
    open: &[T],
    high: &[T],
    low: &[T],
    close: &[T],
    output: &mut [i32],
) -> Result<()> {
    let c = Candles::new(open, high, low, close, "cdl_matching_low")?;
    validate_output_len(output.len(), c.len(), "cdl_matching_low")?;
    let len = c.len();
    output[..len].fill(0);
    let start = cdl_matching_low_lookback();
    if len <= start {
        return Ok(());
    }

    let mut equal_total = T::zero();
    let mut trailing = start - Equal.avg_period();
    for i in trailing..start {
        equal_total = equal_total + c.range(Equal, i - 1);
    }

    for i in start..len {
        let tolerance = c.average(Equal, equal_total, i - 1);
        if c.color(i - 1) == -1
            && c.color(i) == -1
            && c.close[i] <= c.close[i - 1] + tolerance
            && c.close[i] >= c.close[i - 1] - tolerance
        {
            output[i] = 100;
        }
        equal_total = equal_total + (c.range(Equal, i - 1) - c.range(Equal, trailing - 1));
        trailing += 1;
    }
    Ok(())
}

/// Detects matching lows.
///
/// # Errors
///
/// See [`cdl_engulfing_into`].
pub fn cdl_matching_low<T: SeriesElement>(
    open: &[T],
    high: &[T],
    low: &[T],
    close: &[T],
) -> Result<Vec<i32>> {
    let mut output = vec![0i32; close.len()];
    cdl_matching_low_into(open, high, low, close, &mut output)?;
    Ok(output)
}

/// Returns the number of leading zero bars in HIKKAKE output.
#[inline]
#[must_use]
pub const fn cdl_hikkake_lookback() -> usize {
    5
}

/// Detects hikkake patterns into a caller-supplied buffer.
///
/// An inside bar followed by a fake breakout emits +-100. If price then
/// closes back through the inside bar's extreme within three bars, the
/// confirmation bar emits +-200.
///
/// # Errors
///
/// See [`cdl_engulfing_into`].
pub fn cdl_hikkake_into<T: SeriesElement>(
    open: &[T],
    high: &[T],
    low: &[T],
    close: &[T],
    output: &mut [i32],
) -> Result<()> {
    let c = Candles::new(open, high, low, close, "cdl_hikkake")?;
    validate_output_len(output.len(), c.len(), "cdl_hikkake")?;
    let len = c.len();
    output[..len].fill(0);
    let start = cdl_hikkake_lookback();
    if len <= start {
        return Ok(());
    }

    let mut pattern_idx = 0usize;
    let mut pattern_result = 0i32;

    // Walk the warm-up bars so a pattern straddling the lookback edge is
    // already armed when output begins.
    for i in start - 3..start {
        if c.high[i - 1] < c.high[i - 2]
            && c.low[i - 1] > c.low[i - 2]
            && ((c.high[i] < c.high[i - 1] && c.low[i] < c.low[i - 1])
                || (c.high[i] > c.high[i - 1] && c.low[i] > c.low[i - 1]))
        {
            pattern_result = if c.high[i] < c.high[i - 1] { 100 } else { -100 };
            pattern_idx = i;
        } else if pattern_idx != 0
            && i <= pattern_idx + 3
            && ((pattern_result > 0 && c.close[i] > c.high[pattern_idx - 1])
                || (pattern_result < 0 && c.close[i] < c.low[pattern_idx - 1]))
        {
            pattern_idx = 0;
        }
    }

    for i in start..len {
        if c.high[i - 1] < c.high[i - 2]
            && c.low[i - 1] > c.low[i - 2]
            && ((c.high[i] < c.high[i - 1] && c.low[i] < c.low[i - 1])
                || (c.high[i] > c.high[i - 1] && c.low[i] > c.low[i - 1]))
        {
            pattern_result = if c.high[i] < c.high[i - 1] { 100 } else { -100 };
            pattern_idx = i;
            output[i] = pattern_result;
        } else if pattern_idx != 0
            && i <= pattern_idx + 3
            && ((pattern_result > 0 && c.close[i] > c.high[pattern_idx - 1])
                || (pattern_result < 0 && c.close[i] < c.low[pattern_idx - 1]))
        {
            output[i] = pattern_result + if pattern_result > 0 { 100 } else { -100 };
            pattern_idx = 0;
        }
    }
    Ok(())
}

/// Detects hikkake patterns.
///
/// # Errors
///
/// See [`cdl_engulfing_into`].
pub fn cdl_hikkake<T: SeriesElement>(
    open: &[T],
    high: &[T],
    low: &[T],
    close: &[T],
) -> Result<Vec<i32>> {
    let mut output = vec![0i32; close.len()];
    cdl_hikkake_into(open, high, low, close, &mut output)?;
    Ok(output)
}
