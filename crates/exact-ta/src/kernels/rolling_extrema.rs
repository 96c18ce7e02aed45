//! Windowed extremum tracking with the reference lazy-rescan scheme.
//!
//! The reference library tracks the highest (or lowest) value in a sliding
//! window by remembering the index of the current extremum. When that index
//! falls behind the trailing edge of the window, the whole window is
//! rescanned from the trailing edge; otherwise a single comparison against
//! the newest value suffices. On the incremental path ties go to the NEWER
//! index (`>=` for max, `<=` for min); inside a rescan the comparison is
//! strict and an older tie survives.
//!
//! A monotonic deque would compute the same values asymptotically faster,
//! but the tie-breaking and rescan order are observable through the index
//! outputs (MAXINDEX, MININDEX, AROON), so the rescan scheme is kept
//! verbatim.

use crate::error::Result;
use crate::traits::{validate_indicator_input, validate_output_len, SeriesElement};

/// Serial tracker for the windowed maximum.
///
/// Feed indices in order with [`WindowMax::update`]; the tracker keeps the
/// index and the value of the current maximum.
#[derive(Debug, Clone, Copy)]
pub struct WindowMax<T: SeriesElement> {
    idx: Option<usize>,
    value: T,
}

impl<T: SeriesElement> Default for WindowMax<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: SeriesElement> WindowMax<T> {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self {
            idx: None,
            value: T::zero(),
        }
    }

    /// Advances the tracker to the window `[trailing, today]` and returns
    /// the index of the maximum.
    ///
    /// `today` must advance by one per call and `trailing` must never
    /// exceed `today`.
    pub fn update(&mut self, data: &[T], trailing: usize, today: usize) -> usize {
        let newest = data[today];
        match self.idx {
            Some(idx) if idx >= trailing => {
                if newest >= self.value {
                    self.idx = Some(today);
                    self.value = newest;
                }
            }
            _ => {
                // Extremum fell out of the window: rescan from the
                // trailing edge. The rescan compares strictly, so an
                // in-window tie keeps the older index; only the
                // incremental path above prefers the newest bar.
                let mut highest_idx = trailing;
                let mut highest = data[trailing];
                for i in (trailing + 1)..=today {
                    let tmp = data[i];
                    if tmp > highest {
                        highest = tmp;
                        highest_idx = i;
                    }
                }
                self.idx = Some(highest_idx);
                self.value = highest;
            }
        }
        // update() stored an index on every path
        self.idx.unwrap_or(today)
    }

    /// Value at the current maximum index.
    #[must_use]
    pub fn value(&self) -> T {
        self.value
    }
}

/// Serial tracker for the windowed minimum. See [`WindowMax`].
#[derive(Debug, Clone, Copy)]
pub struct WindowMin<T: SeriesElement> {
    idx: Option<usize>,
    value: T,
}

impl<T: SeriesElement> Default for WindowMin<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: SeriesElement> WindowMin<T> {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self {
            idx: None,
            value: T::zero(),
        }
    }

    /// Advances the tracker to the window `[trailing, today]` and returns
    /// the index of the minimum.
    pub fn update(&mut self, data: &[T], trailing: usize, today: usize) -> usize {
        let newest = data[today];
        match self.idx {
            Some(idx) if idx >= trailing => {
                if newest <= self.value {
                    self.idx = Some(today);
                    self.value = newest;
                }
            }
            _ => {
                let mut lowest_idx = trailing;
                let mut lowest = data[trailing];
                for i in (trailing + 1)..=today {
                    let tmp = data[i];
                    if tmp < lowest {
                        lowest = tmp;
                        lowest_idx = i;
                    }
                }
                self.idx = Some(lowest_idx);
                self.value = lowest;
            }
        }
        self.idx.unwrap_or(today)
    }

    /// Value at the current minimum index.
    #[must_use]
    pub fn value(&self) -> T {
        self.value
    }
}

/// Output of [`rolling_extrema`]: per-index windowed max and min.
#[derive(Debug, Clone, PartialEq)]
pub struct RollingExtremaOutput<T> {
    /// Windowed maximum series.
    pub max: Vec<T>,
    /// Windowed minimum series.
    pub min: Vec<T>,
}

/// Returns the number of leading NaN values in rolling extrema output.
#[inline]
#[must_use]
pub const fn rolling_extrema_lookback(period: usize) -> usize {
    period.saturating_sub(1)
}

/// Returns the minimum input length for one output value.
#[inline]
#[must_use]
pub const fn rolling_extrema_min_len(period: usize) -> usize {
    period
}

/// Writes the windowed maximum of `data` over `period` into `output`.
///
/// # Errors
///
/// Returns an error if validation of the input or output buffer fails.
pub fn rolling_max_into<T: SeriesElement>(
    data: &[T],
    period: usize,
    output: &mut [T],
) -> Result<()> {
    validate_indicator_input(data, period, "rolling_max")?;
    validate_output_len(output.len(), data.len(), "rolling_max")?;

    let lookback = period - 1;
    crate::utils::fill_nan_prefix(output, lookback);

    let mut tracker = WindowMax::new();
    let mut trailing = 0;
    for today in lookback..data.len() {
        tracker.update(data, trailing, today);
        output[today] = tracker.value();
        trailing += 1;
    }
    Ok(())
}

/// Writes the windowed minimum of `data` over `period` into `output`.
///
/// # Errors
///
/// Returns an error if validation of the input or output buffer fails.
pub fn rolling_min_into<T: SeriesElement>(
    data: &[T],
    period: usize,
    output: &mut [T],
) -> Result<()> {
    validate_indicator_input(data, period, "rolling_min")?;
    validate_output_len(output.len(), data.len(), "rolling_min")?;

    let lookback = period - 1;
    crate::utils::fill_nan_prefix(output, lookback);

    let mut tracker = WindowMin::new();
    let mut trailing = 0;
    for today in lookback..data.len() {
        tracker.update(data, trailing, today);
        output[today] = tracker.value();
        trailing += 1;
    }
    Ok(())
}

/// Allocating wrapper around [`rolling_max_into`].
///
/// # Errors
///
/// Returns an error if validation fails.
pub fn rolling_max<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<T>> {
    let mut output = vec![T::zero(); data.len()];
    rolling_max_into(data, period, &mut output)?;
    Ok(output)
}

/// Allocating wrapper around [`rolling_min_into`].
///
/// # Errors
///
/// Returns an error if validation fails.
pub fn rolling_min<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<T>> {
    let mut output = vec![T::zero(); data.len()];
    rolling_min_into(data, period, &mut output)?;
    Ok(output)
}

/// Computes windowed max and min in a single pass.
///
/// # Errors
///
/// Returns an error if validation of the input or output buffers fails.
pub fn rolling_extrema_into<T: SeriesElement>(
    data: &[T],
    period: usize,
    max_out: &mut [T],
    min_out: &mut [T],
) -> Result<()> {
    validate_indicator_input(data, period, "rolling_extrema")?;
    validate_output_len(max_out.len(), data.len(), "rolling_extrema")?;
    validate_output_len(min_out.len(), data.len(), "rolling_extrema")?;

    let lookback = period - 1;
    crate::utils::fill_nan_prefix(max_out, lookback);
    crate::utils::fill_nan_prefix(min_out, lookback);

    let mut max_tracker = WindowMax::new();
    let mut min_tracker = WindowMin::new();
    let mut trailing = 0;
    for today in lookback..data.len() {
        max_tracker.update(data, trailing, today);
        min_tracker.update(data, trailing, today);
        max_out[today] = max_tracker.value();
        min_out[today] = min_tracker.value();
        trailing += 1;
    }
    Ok(())
}

/// Allocating wrapper around [`rolling_extrema_into`].
///
/// # Errors
///
/// Returns an error if validation fails.
pub fn rolling_extrema<T: SeriesElement>(
    data: &[T],
    period: usize,
) -> Result<RollingExtremaOutput<T>> {
    let mut max = vec![T::zero(); data.len()];
    let mut min = vec![T::zero(); data.len()];
    rolling_extrema_into(data, period, &mut max, &mut min)?;
    Ok(RollingExtremaOutput { max, min })
}
