//! Shared computational kernels.
//!
//! This module collects the low-level loops that several indicators share.
//! Each kernel reproduces the reference library's operation order exactly,
//! because the indicators built on top of them are specified bit-for-bit
//! against the reference output.
//!
//! # Kernels
//!
//! - [`running_sum`]: trailing accumulator for windowed sums and means
//! - [`rolling_extrema`]: lazy-rescan windowed maximum/minimum with
//!   newest-wins tie-breaking
//! - [`dmi`]: true range, directional-movement deltas, Wilder smoothing

pub mod dmi;
pub mod rolling_extrema;
pub mod running_sum;

pub use dmi::{dm_deltas, true_range_bar, wilder_smooth};
pub use rolling_extrema::{
    rolling_extrema, rolling_extrema_into, rolling_extrema_lookback, rolling_extrema_min_len,
    rolling_max, rolling_max_into, rolling_min, rolling_min_into, RollingExtremaOutput, WindowMax,
    WindowMin,
};
pub use running_sum::{running_sum_into, windowed_mean_into};
