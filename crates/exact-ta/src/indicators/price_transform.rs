//! Bar price transforms (AVGPRICE, MEDPRICE, TYPPRICE, WCLPRICE).
//!
//! Pointwise combinations of the bar's open/high/low/close. No lookback;
//! every output slot is defined.

use crate::error::Result;
use crate::traits::{
    validate_output_len, validate_same_length, SeriesElement, ValidatedInput,
};

/// Computes the average price `(open + high + low + close) / 4` into a
/// caller-supplied buffer.
///
/// # Errors
///
/// - `Error::EmptyInput` if `open` is empty
/// - `Error::InvalidInput` if the series lengths differ
/// - `Error::BufferTooSmall` if `output.len() < open.len()`
pub fn avgprice_into<T: SeriesElement>(
    open: &[T],
    high: &[T],
    low: &[T],
    close: &[T],
    output: &mut [T],
) -> Result<()> {
    open.validate_not_empty()?;
    validate_same_length(
        &[open.len(), high.len(), low.len(), close.len()],
        "price series must have the same length",
    )?;
    validate_output_len(output.len(), open.len(), "avgprice")?;

    let quarter = T::from_f64(0.25)?;
    for i in 0..open.len() {
        output[i] = (open[i] + high[i] + low[i] + close[i]) * quarter;
    }
    Ok(())
}

/// Computes the average price.
///
/// # Errors
///
/// See [`avgprice_into`].
pub fn avgprice<T: SeriesElement>(
    open: &[T],
    high: &[T],
    low: &[T],
    close: &[T],
) -> Result<Vec<T>> {
    let mut output = vec![T::zero(); open.len()];
    avgprice_into(open, high, low, close, &mut output)?;
    Ok(output)
}

/// Computes the median price `(high + low) / 2` into a caller-supplied
/// buffer.
///
/// # Errors
///
/// See [`avgprice_into`].
pub fn medprice_into<T: SeriesElement>(high: &[T], low: &[T], output: &mut [T]) -> Result<()> {
    high.validate_not_empty()?;
    validate_same_length(
        &[high.len(), low.len()],
        "high and low must have the same length",
    )?;
    validate_output_len(output.len(), high.len(), "medprice")?;

    let half = T::from_f64(0.5)?;
    for i in 0..high.len() {
        output[i] = (high[i] + low[i]) * half;
    }
    Ok(())
}

/// Computes the median price.
///
/// # Errors
///
/// See [`avgprice_into`].
pub fn medprice<T: SeriesElement>(high: &[T], low: &[T]) -> Result<Vec<T>> {
    let mut output = vec![T::zero(); high.len()];
    medprice_into(high, low, &mut output)?;
    Ok(output)
}

/// Computes the typical price `(high + low + close) / 3` into a
/// caller-supplied buffer.
///
/// # Errors
///
/// See [`avgprice_into`].
pub fn typprice_into<T: SeriesElement>(
    high: &[T],
    low: &[T],
    close: &[T],
    output: &mut [T],
) -> Result<()> {
    high.validate_not_empty()?;
    validate_same_length(
        &[high.len(), low.len(), close.len()],
        "price series must have the same length",
    )?;
    validate_output_len(output.len(), high.len(), "typprice")?;

    let three = T::from_f64(3.0)?;
    for i in 0..high.len() {
        output[i] = (high[i] + low[i] + close[i]) / three;
    }
    Ok(())
}

/// Computes the typical price.
///
/// # Errors
///
/// See [`avgprice_into`].
pub fn typprice<T: SeriesElement>(high: &[T], low: &[T], close: &[T]) -> Result<Vec<T>> {
    let mut output = vec![T::zero(); high.len()];
    typprice_into(high, low, close, &mut output)?;
    Ok(output)
}

/// Computes the weighted close price `(high + low + 2 close) / 4` into a
/// caller-supplied buffer.
///
/// # Errors
///
/// See [`avgprice_into`].
pub fn wclprice_into<T: SeriesElement>(
    high: &[T],
    low: &[T],
    close: &[T],
    output: &mut [T],
) -> Result<()> {
    high.validate_not_empty()?;
    validate_same_length(
        &[high.len(), low.len(), close.len()],
        "price series must have the same length",
    )?;
    validate_output_len(output.len(), high.len(), "wclprice")?;

    let quarter = T::from_f64(0.25)?;
    for i in 0..high.len() {
        output[i] = (high[i] + low[i] + T::two() * close[i]) * quarter;
    }
    Ok(())
}

/// Computes the weighted close price.
///
/// # Errors
///
/// See [`avgprice_into`].
pub fn wclprice<T: SeriesElement>(high: &[T], low: &[T], close: &[T]) -> Result<Vec<T>> {
    let mut output = vec![T::zero(); high.len()];
    wclprice_into(high, low, close, &mut output)?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{approx_eq, EPSILON};

    #[test]
    fn test_avgprice() {
        let result = avgprice(&[10.0], &[12.0], &[8.0], &[11.0]).unwrap();
        assert!(approx_eq(result[0], 10.25, EPSILON));
    }

    #[test]
    fn test_medprice() {
        let result = medprice(&[12.0, 14.0], &[8.0, 10.0]).unwrap();
        assert!(approx_eq(result[0], 10.0, EPSILON));
        assert!(approx_eq(result[1], 12.0, EPSILON));
    }

    #[test]
    fn test_typprice() {
        let result = typprice(&[12.0], &[8.0], &[10.0]).unwrap();
        assert!(approx_eq(result[0], 10.0, EPSILON));
    }

    #[test]
    fn test_wclprice() {
        let result = wclprice(&[12.0], &[8.0], &[10.0]).unwrap();
        assert!(approx_eq(result[0], 10.0, EPSILON));
    }

    #[test]
    fn test_no_lookback() {
        let result = typprice(&[1.0_f64, 2.0], &[1.0, 2.0], &[1.0, 2.0]).unwrap();
        assert!(result[0].is_finite());
    }

    #[test]
    fn test_length_mismatch() {
        assert!(medprice(&[1.0, 2.0], &[1.0]).is_err());
    }
}
