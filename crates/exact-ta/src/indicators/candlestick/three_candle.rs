//! Three-candle pattern recognizers.

use super::core::CandleSetting::{BodyDoji, BodyLong, BodyShort, Far, Near, ShadowVeryShort};
use super::core::Candles;
use crate::error::Result;
use crate::traits::{validate_factor, validate_output_len, SeriesElement};

/// Returns the number of leading zero bars in 3 WHITE SOLDIERS output.
#[inline]
#[must_use]
pub const fn cdl_3white_soldiers_lookback() -> usize {
    12 // max setting avg period plus two bars of pattern context
}

/// Detects three advancing white soldiers into a caller-supplied buffer.
///
/// Three rising white candles with negligible upper shadows, each opening
/// inside the prior body and closing higher, with bodies that do not
/// shrink markedly.
///
/// # Errors
///
/// - `Error::EmptyInput` if the inputs are empty
/// - `Error::InvalidInput` if the input lengths differ
/// - `Error::BufferTooSmall` if `output.len() < close.len()`
pub fn cdl_3white_soldiers_into<T: SeriesElement>(
    open: &[T],
    high: &[T],
    low: &[T],
    close: &[T],
    output: &mut [i32],
) -> Result<()> {
    let c = Candles::new(open, high, low, close, "cdl_3white_soldiers")?;
    validate_output_len(output.len(), c.len(), "cdl_3white_soldiers")?;
    let len = c.len();
    output[..len].fill(0);
    let start = cdl_3white_soldiers_lookback();
    if len <= start {
        return Ok(());
    }

    // Shadow, nearness, and body-growth checks each run at their own bar
    // offset, so every offset keeps its own running total.
    let mut shadow_total_2 = T::zero();
    let mut shadow_total_1 = T::zero();
    let mut shadow_total_0 = T::zero();
    let mut near_total_2 = T::zero();
    let mut near_total_1 = T::zero();
    let mut far_total_2 = T::zero();
    let mut far_total_1 = T::zero();
    let mut body_short_total = T::zero();

    let mut shadow_trailing = start - ShadowVeryShort.avg_period();
    let mut near_trailing = start - Near.avg_period();
    let mut far_trailing = start - Far.avg_period();
    let mut body_short_trailing = start - BodyShort.avg_period();

    for i in shadow_trailing..start {
        shadow_total_2 = shadow_total_2 + c.range(ShadowVeryShort, i - 2);
        shadow_total_1 = shadow_total_1 + c.range(ShadowVeryShort, i - 1);
        shadow_total_0 = shadow_total_0 + c.range(ShadowVeryShort, i);
    }
    for i in near_trailing..start {
        near_total_2 = near_total_2 + c.range(Near, i - 2);
        near_total_1 = near_total_1 + c.range(Near, i - 1);
    }
    for i in far_trailing..start {
        far_total_2 = far_total_2 + c.range(Far, i - 2);
        far_total_1 = far_total_1 + c.range(Far, i - 1);
    }
    for i in body_short_trailing..start {
        body_short_total = body_short_total + c.range(BodyShort, i);
    }

    for i in start..len {
        if c.color(i - 2) == 1
            && c.upper_shadow(i - 2) < c.average(ShadowVeryShort, shadow_total_2, i - 2)
            && c.color(i - 1) == 1
            && c.upper_shadow(i - 1) < c.average(ShadowVeryShort, shadow_total_1, i - 1)
            && c.color(i) == 1
            && c.upper_shadow(i) < c.average(ShadowVeryShort, shadow_total_0, i)
            && c.close[i] > c.close[i - 1]
            && c.close[i - 1] > c.close[i - 2]
            && c.open[i - 1] > c.open[i - 2]
            && c.open[i - 1] <= c.close[i - 2] + c.average(Near, near_total_2, i - 2)
            && c.open[i] > c.open[i - 1]
            && c.open[i] <= c.close[i - 1] + c.average(Near, near_total_1, i - 1)
            && c.real_body(i - 1)
                > c.real_body(i - 2) - c.average(Far, far_total_2, i - 2)
            && c.real_body(i) > c.real_body(i - 1) - c.average(Far, far_total_1, i - 1)
            && c.real_body(i) > c.average(BodyShort, body_short_total, i)
        {
            output[i] = 100;
        }
        shadow_total_2 = shadow_total_2
            + (c.range(ShadowVeryShort, i - 2) - c.range(ShadowVeryShort, shadow_trailing - 2));
        shadow_total_1 = shadow_total_1
            + (c.range(ShadowVeryShort, i - 1) - c.range(ShadowVeryShort, shadow_trailing - 1));
        shadow_total_0 = shadow_total_0
            + (c.range(ShadowVeryShort, i) - c.range(ShadowVeryShort, shadow_trailing));
        far_total_2 = far_total_2 + (c.range(Far, i - 2) - c.range(Far, far_trailing - 2));
        far_total_1 = far_total_1 + (c.range(Far, i - 1) - c.range(Far, far_trailing - 1));
        near_total_2 = near_total_2 + (c.range(Near, i - 2) - c.range(Near, near_trailing - 2));
        near_total_1 = near_total_1 + (c.range(Near, i - 1) - c.range(Near, near_trailing - 1));
        body_short_total = body_short_total
            + (c.range(BodyShort, i) - c.range(BodyShort, body_short_trailing));
        shadow_trailing += 1;
        near_trailing += 1;
        far_trailing += 1;
        body_short_trailing += 1;
    }
    Ok(())
}

/// Detects three advancing white soldiers.
///
/// # Errors
///
/// See [`cdl_3white_soldiers_into`].
pub fn cdl_3white_soldiers<T: SeriesElement>(
    open: &[T],
    high: &[T],
    low: &[T],
    close: &[T],
) -> Result<Vec<i32>> {
    let mut output = vec![0i32; close.len()];
    cdl_3white_soldiers_into(open, high, low, close, &mut output)?;
    Ok(output)
}

/// Returns the number of leading zero bars in 3 BLACK CROWS output.
#[inline]
#[must_use]
pub const fn cdl_3black_crows_lookback() -> usize {
    13 // ShadowVeryShort avg period plus three bars of pattern context
}

/// Detects three black crows into a caller-supplied buffer.
///
/// After a white candle, three declining black candles with negligible
/// lower shadows, each opening inside the prior body.
///
/// # Errors
///
/// See [`cdl_3white_soldiers_into`].
pub fn cdl_3black_crows_into<T: SeriesElement>(
    open: &[T],
    high: &[T],
    low: &[T],
    close: &[T],
    output: &mut [i32],
) -> Result<()> {
    let c = Candles::new(open, high, low, close, "cdl_3black_crows")?;
    validate_output_len(output.len(), c.len(), "cdl_3black_crows")?;
    let len = c.len();
    output[..len].fill(0);
    let start = cdl_3black_crows_lookback();
    if len <= start {
        return Ok(());
    }

    let mut shadow_total_2 = T::zero();
    let mut shadow_total_1 = T::zero();
    let mut shadow_total_0 = T::zero();
    let mut shadow_trailing = start - ShadowVeryShort.avg_period();

    for i in shadow_trailing..start {
        shadow_total_2 = shadow_total_2 + c.range(ShadowVeryShort, i - 2);
        shadow_total_1 = shadow_total_1 + c.range(ShadowVeryShort, i - 1);
        shadow_total_0 = shadow_total_0 + c.range(ShadowVeryShort, i);
    }

    for i in start..len {
        if c.color(i - 3) == 1
            && c.color(i - 2) == -1
            && c.lower_shadow(i - 2) < c.average(ShadowVeryShort, shadow_total_2, i - 2)
            && c.color(i - 1) == -1
            && c.lower_shadow(i - 1) < c.average(ShadowVeryShort, shadow_total_1, i - 1)
            && c.color(i) == -1
            && c.lower_shadow(i) < c.average(ShadowVeryShort, shadow_total_0, i)
            && c.open[i - 1] < c.open[i - 2]
            && c.open[i - 1] > c.close[i - 2]
            && c.open[i] < c.open[i - 1]
            && c.open[i] > c.close[i - 1]
            && c.high[i - 3] > c.close[i - 2]
            && c.close[i - 2] > c.close[i - 1]
            && c.close[i - 1] > c.close[i]
        {
            output[i] = -100;
        }
        shadow_total_2 = shadow_total_2
            + (c.range(ShadowVeryShort, i - 2) - c.range(ShadowVeryShort, shadow_trailing - 2));
        shadow_total_1 = shadow_total_1
            + (c.range(ShadowVeryShort, i - 1) - c.range(ShadowVeryShort, shadow_trailing - 1));
        shadow_total_0 = shadow_total_0
            + (c.range(ShadowVeryShort, i) - c.range(ShadowVeryShort, shadow_trailing));
        shadow_trailing += 1;
    }
    Ok(())
}

/// Detects three black crows.
///
/// # Errors
///
/// See [`cdl_3white_soldiers_into`].
pub fn cdl_3black_crows<T: SeriesElement>(
    open: &[T],
    high: &[T],
    low: &[T],
    close: &[T],
) -> Result<Vec<i32>> {
    let mut output = vec![0i32; close.len()];
    cdl_3black_crows_into(open, high, low, close, &mut output)?;
    Ok(output)
}

/// Returns the number of leading zero bars in EVENING STAR output.
#[inline]
#[must_use]
pub const fn cdl_evening_star_lookback() -> usize {
    12 // max of BodyShort and BodyLong avg periods, plus two pattern bars
}

/// Detects evening stars into a caller-supplied buffer.
///
/// A long white candle, a short body gapping above it, then a black
/// candle closing at least `penetration` of the first body back down.
///
/// # Errors
///
/// - `Error::InvalidParameter` if `penetration` is negative or not finite
/// - otherwise see [`cdl_3white_soldiers_into`]
pub fn cdl_evening_star_into<T: SeriesElement>(
    open: &[T],
    high: &[T],
    low: &[T],
    close: &[T],
    penetration: T,
    output: &mut [i32],
) -> Result<()> {
    validate_factor(penetration, "penetration")?;
    let c = Candles::new(open, high, low, close, "cdl_evening_star")?;
    validate_output_len(output.len(), c.len(), "cdl_evening_star")?;
    let len = c.len();
    output[..len].fill(0);
    let start = cdl_evening_star_lookback();
    if len <= start {
        return Ok(());
    }

    let mut body_long_total = T::zero();
    let mut body_short_total = T::zero();
    let mut body_short_total_2 = T::zero();
    let mut body_long_trailing = start - 2 - BodyLong.avg_period();
    let mut body_short_trailing = start - 1 - BodyShort.avg_period();

    for i in body_long_trailing..start - 2 {
        body_long_total = body_long_total + c.range(BodyLong, i);
    }
    for i in body_short_trailing..start - 1 {
        body_short_total = body_short_total + c.range(BodyShort, i);
        body_short_total_2 = body_short_total_2 + c.range(BodyShort, i + 1);
    }

    for i in start..len {
        if c.real_body(i - 2) > c.average(BodyLong, body_long_total, i - 2)
            && c.color(i - 2) == 1
            && c.real_body(i - 1) <= c.average(BodyShort, body_short_total, i - 1)
            && c.real_body_gap_up(i - 1, i - 2)
            && c.real_body(i) > c.average(BodyShort, body_short_total_2, i)
            && c.color(i) == -1
            && c.close[i] < c.close[i - 2] - c.real_body(i - 2) * penetration
        {
            output[i] = -100;
        }
        body_long_total = body_long_total
            + (c.range(BodyLong, i - 2) - c.range(BodyLong, body_long_trailing));
        body_short_total = body_short_total
            + (c.range(BodyShort, i - 1) - c.range(BodyShort, body_short_trailing));
        body_short_total_2 = body_short_total_2
            + (c.range(BodyShort, i) - c.range(BodyShort, body_short_trailing + 1));
        body_long_trailing += 1;
        body_short_trailing += 1;
    }
    Ok(())
}

/// Detects evening stars with an explicit penetration fraction.
///
/// # Errors
///
/// See [`cdl_evening_star_into`].
pub fn cdl_evening_star<T: SeriesElement>(
    open: &[T],
    high: &[T],
    low: &[T],
    close: &[T],
    penetration: T,
) -> Result<Vec<i32>> {
    let mut output = vec![0i32; close.len()];
    cdl_evening_star_into(open, high, low, close, penetration, &mut output)?;
    Ok(output)
}

/// Detects evening stars with the conventional penetration of 0.3.
///
/// # Errors
///
/// See [`cdl_evening_star_into`].
pub fn cdl_evening_star_default<T: SeriesElement>(
    open: &[T],
    high: &[T],
    low: &[T],
    close: &[T],
) -> Result<Vec<i32>> {
    cdl_evening_star(open, high, low, close, T::from_f64(0.3)?)
}

/// Returns the number of leading zero bars in TRISTAR output.
#[inline]
#[must_use]
pub const fn cdl_tristar_lookback() -> usize {
    12 // BodyDoji avg period plus two pattern bars
}

/// Detects tristar patterns (three dojis with the middle one gapping away
/// from its neighbors) into a caller-supplied buffer.
///
/// # Errors
///
/// See [`cdl_3white_soldiers_into`].
pub fn cdl_tristar_into<T: SeriesElement>(
    open: &[T],
    high: &[T],
    low: &[T],
    close: &[T],
    output: &mut [i32],
) -> Result<()> {
    let c = Candles::new(open, high, low, close, "cdl_tristar")?;
    validate_output_len(output.len(), c.len(), "cdl_tristar")?;
    let len = c.len();
    output[..len].fill(0);
    let start = cdl_tristar_lookback();
    if len <= start {
        return Ok(());
    }

    let mut body_total = T::zero();
    let mut body_trailing = start - 2 - BodyDoji.avg_period();
    for i in body_trailing..start - 2 {
        body_total = body_total + c.range(BodyDoji, i);
    }

    for i in start..len {
        // All three bodies measure against the average as of the first doji.
        let doji_avg = c.average(BodyDoji, body_total, i - 2);
        if c.real_body(i - 2) <= doji_avg
            && c.real_body(i - 1) <= doji_avg
            && c.real_body(i) <= doji_avg
        {
            if c.real_body_gap_up(i - 1, i - 2) && c.body_top(i) < c.body_top(i - 1) {
                output[i] = -100;
            }
            if c.real_body_gap_down(i - 1, i - 2) && c.body_bottom(i) > c.body_bottom(i - 1) {
                output[i] = 100;
            }
        }
        body_total = body_total
            + (c.range(BodyDoji, i - 2) - c.range(BodyDoji, body_trailing));
        body_trailing += 1;
    }
    Ok(())
}

/// Detects tristar patterns.
///
/// # Errors
///
/// See [`cdl_3white_soldiers_into`].
pub fn cdl_tristar<T: SeriesElement>(
    open: &[T],
    high: &[T],
    low: &[T],
    close: &[T],
) -> Result<Vec<i32>> {
    let mut output = vec![0i32; close.len()];
    cdl_tristar_into(open, high, low, close, &mut output)?;
    Ok(output)
}
