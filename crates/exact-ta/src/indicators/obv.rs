//! On Balance Volume (OBV).
//!
//! Cumulative volume signed by the direction of the price change. The
//! running total starts at the first bar's volume and every bar emits a
//! value; there is no lookback.

use crate::error::Result;
use crate::traits::{
    validate_output_len, validate_same_length, SeriesElement, ValidatedInput,
};

/// Computes OBV into a caller-supplied buffer.
///
/// # Errors
///
/// - `Error::EmptyInput` if the inputs are empty
/// - `Error::InvalidInput` if the input lengths differ
/// - `Error::BufferTooSmall` if `output.len() < data.len()`
pub fn obv_into<T: SeriesElement>(data: &[T], volume: &[T], output: &mut [T]) -> Result<()> {
    data.validate_not_empty()?;
    validate_same_length(&[data.len(), volume.len()], "obv")?;
    validate_output_len(output.len(), data.len(), "obv")?;

    let mut obv = volume[0];
    let mut prev = data[0];
    for i in 0..data.len() {
        let value = data[i];
        if value > prev {
            obv = obv + volume[i];
        } else if value < prev {
            obv = obv - volume[i];
        }
        output[i] = obv;
        prev = value;
    }
    Ok(())
}

/// Computes OBV.
///
/// # Errors
///
/// See [`obv_into`].
pub fn obv<T: SeriesElement>(data: &[T], volume: &[T]) -> Result<Vec<T>> {
    let mut output = vec![T::zero(); data.len()];
    obv_into(data, volume, &mut output)?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{approx_eq, EPSILON};

    #[test]
    fn test_obv_starts_at_first_volume() {
        let data = vec![10.0, 10.5, 10.2];
        let volume = vec![1000.0, 500.0, 300.0];
        let result = obv(&data, &volume).unwrap();
        assert!(approx_eq(result[0], 1000.0, EPSILON));
    }

    #[test]
    fn test_obv_signed_accumulation() {
        let data = vec![10.0, 10.5, 10.2, 10.2, 10.9];
        let volume = vec![1000.0, 500.0, 300.0, 200.0, 400.0];
        let result = obv(&data, &volume).unwrap();
        assert!(approx_eq(result[1], 1500.0, EPSILON));
        assert!(approx_eq(result[2], 1200.0, EPSILON));
        // Unchanged price leaves the total alone.
        assert!(approx_eq(result[3], 1200.0, EPSILON));
        assert!(approx_eq(result[4], 1600.0, EPSILON));
    }

    #[test]
    fn test_obv_no_lookback() {
        let data: Vec<f64> = vec![1.0];
        let volume = vec![42.0];
        let result = obv(&data, &volume).unwrap();
        assert_eq!(result.len(), 1);
        assert!(!result[0].is_nan());
    }

    #[test]
    fn test_obv_length_mismatch() {
        let data = vec![1.0, 2.0];
        let volume = vec![1.0];
        assert!(obv(&data, &volume).is_err());
    }
}
