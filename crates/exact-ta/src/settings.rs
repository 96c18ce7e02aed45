//! Compatibility settings carried as an explicit value.
//!
//! The reference C library keeps two pieces of process-wide state: a
//! compatibility mode (classic vs. Metastock seeding for a handful of
//! functions) and a per-function "unstable period" that suppresses the
//! leading outputs of recursively seeded indicators. Global state does not
//! compose, so here both live in a plain [`Settings`] value the caller
//! passes to the functions that honor it.
//!
//! The unstable period is applied exactly the way the reference applies it:
//! as a post-computation mask that turns the first `n` finite outputs
//! (counted from the first non-NaN index) into NaN. Only the functions in
//! the reference allow-list carry an unstable period at all; [`UnstableFn`]
//! enumerates that list.
//!
//! # Example
//!
//! ```
//! use exact_ta::settings::{Settings, UnstableFn};
//!
//! let mut settings = Settings::default();
//! settings.unstable.set(UnstableFn::Ema, 5);
//! assert_eq!(settings.unstable.get(UnstableFn::Ema), 5);
//! assert_eq!(settings.unstable.get(UnstableFn::Rsi), 0);
//! ```

use crate::traits::SeriesElement;

/// Seeding convention for the functions where the reference library
/// diverges between its classic mode and Metastock emulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compatibility {
    /// Classic seeding: EMA seeds with an SMA of the first `period` values;
    /// RSI and CMO emit their first output at index `period`.
    #[default]
    Classic,
    /// Metastock seeding: EMA seeds with the first data point; RSI and CMO
    /// emit one extra leading output at index `period - 1`, computed with a
    /// zero-initialized first difference.
    Metastock,
}

/// The functions for which the reference library accepts an unstable
/// period. Requests for any other function are rejected at the type level
/// by this enum simply not naming them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum UnstableFn {
    Adx,
    Adxr,
    Atr,
    Cmo,
    Dx,
    Ema,
    HtDcPeriod,
    HtDcPhase,
    HtPhasor,
    HtSine,
    HtTrendline,
    HtTrendmode,
    Imi,
    Kama,
    Mama,
    Mfi,
    MinusDi,
    MinusDm,
    Natr,
    PlusDi,
    PlusDm,
    Rsi,
    StochRsi,
    T3,
}

impl UnstableFn {
    /// Every member of the allow-list, in reference order.
    pub const ALL: [Self; 24] = [
        Self::Adx,
        Self::Adxr,
        Self::Atr,
        Self::Cmo,
        Self::Dx,
        Self::Ema,
        Self::HtDcPeriod,
        Self::HtDcPhase,
        Self::HtPhasor,
        Self::HtSine,
        Self::HtTrendline,
        Self::HtTrendmode,
        Self::Imi,
        Self::Kama,
        Self::Mama,
        Self::Mfi,
        Self::MinusDi,
        Self::MinusDm,
        Self::Natr,
        Self::PlusDi,
        Self::PlusDm,
        Self::Rsi,
        Self::StochRsi,
        Self::T3,
    ];

    #[inline]
    const fn index(self) -> usize {
        self as usize
    }
}

/// Per-function unstable-period table.
///
/// All entries default to zero (no extra suppression).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnstablePeriod {
    periods: [usize; 24],
}

impl Default for UnstablePeriod {
    fn default() -> Self {
        Self { periods: [0; 24] }
    }
}

impl UnstablePeriod {
    /// Creates a table with every entry zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the unstable period configured for `func`.
    #[inline]
    #[must_use]
    pub const fn get(&self, func: UnstableFn) -> usize {
        self.periods[func.index()]
    }

    /// Sets the unstable period for `func`.
    #[inline]
    pub fn set(&mut self, func: UnstableFn, period: usize) {
        self.periods[func.index()] = period;
    }

    /// Sets the same unstable period for every function in the allow-list.
    pub fn set_all(&mut self, period: usize) {
        self.periods = [period; 24];
    }
}

/// Caller-supplied settings for the compatibility-aware function variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Settings {
    /// Seeding convention.
    pub compatibility: Compatibility,
    /// Per-function unstable periods.
    pub unstable: UnstablePeriod,
}

impl Settings {
    /// Creates settings with classic compatibility and no unstable periods.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies the unstable period configured for `func` to a finished
    /// output buffer. See [`apply_unstable_period`].
    pub fn mask_unstable<T: SeriesElement>(&self, func: UnstableFn, output: &mut [T]) {
        apply_unstable_period(output, self.unstable.get(func));
    }
}

/// Turns the first `n` finite outputs of a finished buffer into NaN.
///
/// Counting starts at the first non-NaN slot, so the mask extends the
/// natural lookback prefix rather than overlapping it. Masking more
/// outputs than exist leaves the buffer all-NaN.
pub fn apply_unstable_period<T: SeriesElement>(output: &mut [T], n: usize) {
    if n == 0 {
        return;
    }
    let first = crate::utils::count_nan_prefix(output);
    let end = (first + n).min(output.len());
    for slot in &mut output[first..end] {
        *slot = T::nan();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::count_nan_prefix;

    #[test]
    fn test_compatibility_default_is_classic() {
        assert_eq!(Compatibility::default(), Compatibility::Classic);
    }

    #[test]
    fn test_unstable_period_defaults_to_zero() {
        let table = UnstablePeriod::new();
        for func in UnstableFn::ALL {
            assert_eq!(table.get(func), 0);
        }
    }

    #[test]
    fn test_unstable_period_set_get() {
        let mut table = UnstablePeriod::new();
        table.set(UnstableFn::Adx, 7);
        table.set(UnstableFn::T3, 3);
        assert_eq!(table.get(UnstableFn::Adx), 7);
        assert_eq!(table.get(UnstableFn::T3), 3);
        assert_eq!(table.get(UnstableFn::Ema), 0);
    }

    #[test]
    fn test_unstable_period_set_all() {
        let mut table = UnstablePeriod::new();
        table.set_all(4);
        for func in UnstableFn::ALL {
            assert_eq!(table.get(func), 4);
        }
    }

    #[test]
    fn test_allow_list_indices_are_dense() {
        for (i, func) in UnstableFn::ALL.iter().enumerate() {
            assert_eq!(func.index(), i);
        }
    }

    #[test]
    fn test_apply_unstable_period_extends_prefix() {
        let nan = f64::NAN;
        let mut out = vec![nan, nan, 1.0, 2.0, 3.0, 4.0];
        apply_unstable_period(&mut out, 2);
        assert_eq!(count_nan_prefix(&out), 4);
        assert!((out[4] - 3.0).abs() < 1e-10);
        assert!((out[5] - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_apply_unstable_period_zero_is_noop() {
        let mut out = vec![f64::NAN, 1.0, 2.0];
        apply_unstable_period(&mut out, 0);
        assert_eq!(count_nan_prefix(&out), 1);
    }

    #[test]
    fn test_apply_unstable_period_saturates() {
        let mut out = vec![f64::NAN, 1.0, 2.0];
        apply_unstable_period(&mut out, 10);
        assert_eq!(count_nan_prefix(&out), 3);
    }

    #[test]
    fn test_settings_mask_unstable() {
        let mut settings = Settings::new();
        settings.unstable.set(UnstableFn::Rsi, 1);

        let mut out = vec![f64::NAN, 50.0, 60.0];
        settings.mask_unstable(UnstableFn::Rsi, &mut out);
        assert_eq!(count_nan_prefix(&out), 2);
        assert!((out[2] - 60.0).abs() < 1e-10);

        // Other functions are untouched
        let mut other = vec![f64::NAN, 50.0, 60.0];
        settings.mask_unstable(UnstableFn::Ema, &mut other);
        assert_eq!(count_nan_prefix(&other), 1);
    }
}
