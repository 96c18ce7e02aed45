//! Moving average dispatcher (MA).
//!
//! Computes a moving average of a selectable type. Unlike the individual
//! indicator functions, the dispatcher accepts a period of 1, which copies
//! the input unchanged for every type except [`MaType::Mama`].

use crate::error::Result;
use crate::indicators::{
    dema::{dema_into, dema_lookback},
    ema::{ema_into, ema_lookback},
    kama::{kama_into, kama_lookback},
    mama::{mama_default, mama_lookback},
    sma::{sma_into, sma_lookback},
    t3::{t3_into, t3_lookback, T3_DEFAULT_VFACTOR},
    tema::{tema_into, tema_lookback},
    trima::{trima_into, trima_lookback},
    wma::{wma_into, wma_lookback},
};
use crate::traits::{
    validate_output_len, validate_period_range, SeriesElement, ValidatedInput,
};

/// Moving average type selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MaType {
    /// Simple moving average.
    #[default]
    Sma,
    /// Exponential moving average.
    Ema,
    /// Weighted moving average.
    Wma,
    /// Double exponential moving average.
    Dema,
    /// Triple exponential moving average.
    Tema,
    /// Triangular moving average.
    Trima,
    /// Kaufman adaptive moving average.
    Kama,
    /// MESA adaptive moving average. Ignores the period and uses the
    /// default limits.
    Mama,
    /// Tillson T3 with the default volume factor.
    T3,
}

/// Returns the number of leading NaN values for the given configuration.
#[inline]
#[must_use]
pub const fn ma_lookback(period: usize, ma_type: MaType) -> usize {
    if matches!(ma_type, MaType::Mama) {
        return mama_lookback();
    }
    if period <= 1 {
        return 0;
    }
    match ma_type {
        MaType::Sma => sma_lookback(period),
        MaType::Ema => ema_lookback(period),
        MaType::Wma => wma_lookback(period),
        MaType::Dema => dema_lookback(period),
        MaType::Tema => tema_lookback(period),
        MaType::Trima => trima_lookback(period),
        MaType::Kama => kama_lookback(period),
        MaType::T3 => t3_lookback(period),
        MaType::Mama => mama_lookback(),
    }
}

/// Returns the minimum input length that produces at least one output.
#[inline]
#[must_use]
pub const fn ma_min_len(period: usize, ma_type: MaType) -> usize {
    ma_lookback(period, ma_type) + 1
}

/// Computes a moving average of the selected type into a caller-supplied
/// buffer.
///
/// # Errors
///
/// - `Error::EmptyInput` if `data` is empty
/// - `Error::InvalidPeriod` if `period` is outside `1..=100_000`
/// - `Error::InsufficientData` if `data` is shorter than the type's
///   minimum length
/// - `Error::BufferTooSmall` if `output.len() < data.len()`
pub fn ma_into<T: SeriesElement>(
    data: &[T],
    period: usize,
    ma_type: MaType,
    output: &mut [T],
) -> Result<()> {
    validate_period_range(period, 1, 100_000)?;
    data.validate_not_empty()?;

    match ma_type {
        MaType::Mama => {
            validate_output_len(output.len(), data.len(), "ma")?;
            let result = mama_default(data)?;
            output[..data.len()].copy_from_slice(&result.mama);
            Ok(())
        }
        _ if period == 1 => {
            validate_output_len(output.len(), data.len(), "ma")?;
            output[..data.len()].copy_from_slice(data);
            Ok(())
        }
        MaType::Sma => sma_into(data, period, output),
        MaType::Ema => ema_into(data, period, output),
        MaType::Wma => wma_into(data, period, output),
        MaType::Dema => dema_into(data, period, output),
        MaType::Tema => tema_into(data, period, output),
        MaType::Trima => trima_into(data, period, output),
        MaType::Kama => kama_into(data, period, output),
        MaType::T3 => t3_into(data, period, T::from_f64(T3_DEFAULT_VFACTOR)?, output),
    }
}

/// Computes a moving average of the selected type.
///
/// # Errors
///
/// See [`ma_into`].
pub fn ma<T: SeriesElement>(data: &[T], period: usize, ma_type: MaType) -> Result<Vec<T>> {
    let mut output = vec![T::zero(); data.len()];
    ma_into(data, period, ma_type, &mut output)?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{dema::dema, ema::ema, sma::sma, wma::wma};
    use crate::utils::{approx_eq, count_nan_prefix, EPSILON};

    fn test_data() -> Vec<f64> {
        (0..60)
            .map(|i| 100.0 + 5.0 * (f64::from(u32::try_from(i).unwrap()) * 0.2).sin())
            .collect()
    }

    #[test]
    fn test_ma_lookback_table() {
        assert_eq!(ma_lookback(10, MaType::Sma), 9);
        assert_eq!(ma_lookback(10, MaType::Ema), 9);
        assert_eq!(ma_lookback(10, MaType::Wma), 9);
        assert_eq!(ma_lookback(10, MaType::Trima), 9);
        assert_eq!(ma_lookback(10, MaType::Dema), 18);
        assert_eq!(ma_lookback(10, MaType::Tema), 27);
        assert_eq!(ma_lookback(10, MaType::Kama), 10);
        assert_eq!(ma_lookback(10, MaType::T3), 54);
        assert_eq!(ma_lookback(10, MaType::Mama), 32);
        assert_eq!(ma_lookback(2, MaType::Mama), 32);
    }

    #[test]
    fn test_ma_period_one_copies_input() {
        let data = test_data();
        for ma_type in [MaType::Sma, MaType::Ema, MaType::Wma, MaType::T3] {
            let result = ma(&data, 1, ma_type).unwrap();
            assert_eq!(result, data);
            assert_eq!(ma_lookback(1, ma_type), 0);
        }
    }

    #[test]
    fn test_ma_dispatches_to_named_functions() {
        let data = test_data();
        assert_eq!(ma(&data, 5, MaType::Sma).unwrap(), sma(&data, 5).unwrap());
        assert_eq!(ma(&data, 5, MaType::Ema).unwrap(), ema(&data, 5).unwrap());
        assert_eq!(ma(&data, 5, MaType::Wma).unwrap(), wma(&data, 5).unwrap());
        assert_eq!(ma(&data, 5, MaType::Dema).unwrap(), dema(&data, 5).unwrap());
    }

    #[test]
    fn test_ma_mama_ignores_period() {
        let data = test_data();
        let a = ma(&data, 5, MaType::Mama).unwrap();
        let b = ma(&data, 30, MaType::Mama).unwrap();
        assert_eq!(count_nan_prefix(&a), 32);
        for i in 32..data.len() {
            assert!(approx_eq(a[i], b[i], EPSILON));
        }
    }

    #[test]
    fn test_ma_invalid_period() {
        let data = test_data();
        assert!(ma(&data, 0, MaType::Sma).is_err());
        assert!(ma(&data, 100_001, MaType::Sma).is_err());
    }

    #[test]
    fn test_ma_default_type_is_sma() {
        assert_eq!(MaType::default(), MaType::Sma);
    }
}
