// Copyright 2026 QM Playground Contributors
// SPDX-License-Identifier: Apache-2.0

//! Input validation for playground requests.
//!
//! Two kinds of checks live here: resource limits (skipped when
//! `validation.strict` is off) and structural checks on wire matrices and
//! vectors (always enforced, since the kernels cannot run without them).

use ndarray::{Array1, Array2};
use num_complex::Complex64;

use crate::config::{ResourceLimits, ValidationConfig};
use crate::error::{Result, ValidationError};

fn check_limit(resource: &str, requested: usize, limit: u32) -> Result<()> {
    if requested as u64 > limit as u64 {
        return Err(ValidationError::ResourceLimit {
            resource: resource.into(),
            limit: limit as u64,
            requested: requested as u64,
        }
        .into());
    }
    Ok(())
}

/// Limits that apply to this configuration, if any.
fn active_limits(config: &ValidationConfig) -> Option<&ResourceLimits> {
    config.strict.then_some(&config.limits)
}

/// Validate spatial grid sizing for spectrum and evolution requests.
pub fn validate_grid_request(
    n_points: usize,
    n_levels: Option<usize>,
    config: &ValidationConfig,
) -> Result<()> {
    if let Some(limits) = active_limits(config) {
        check_limit("nPoints", n_points, limits.max_grid_points)?;
        if let Some(levels) = n_levels {
            check_limit("nLevels", levels, limits.max_levels)?;
        }
    }
    Ok(())
}

/// Validate the number of samples on a time grid.
pub fn validate_time_samples(field: &str, n: usize, config: &ValidationConfig) -> Result<()> {
    if n == 0 {
        return Err(ValidationError::field(field, "must be at least 1").into());
    }
    if let Some(limits) = active_limits(config) {
        check_limit(field, n, limits.max_time_steps)?;
    }
    Ok(())
}

/// Validate the dimension of a generated or supplied matrix.
pub fn validate_matrix_dim(field: &str, n: usize, config: &ValidationConfig) -> Result<()> {
    if n == 0 {
        return Err(ValidationError::field(field, "dimension must be at least 1").into());
    }
    if let Some(limits) = active_limits(config) {
        check_limit(field, n, limits.max_matrix_dim)?;
    }
    Ok(())
}

/// Validate the length of an input or output array.
pub fn validate_len(field: &str, len: usize, config: &ValidationConfig) -> Result<()> {
    if let Some(limits) = active_limits(config) {
        check_limit(field, len, limits.max_array_len)?;
    }
    Ok(())
}

/// Validate a scalar input array such as `alphaArray` or `EArray`.
pub fn validate_array(field: &str, values: &[f64], config: &ValidationConfig) -> Result<()> {
    validate_len(field, values.len(), config)?;
    check_finite(field, values.iter().copied())
}

/// Reject NaN and infinite scalars.
pub fn validate_scalar(field: &str, value: f64) -> Result<()> {
    if value.is_nan() {
        return Err(ValidationError::field(field, "is NaN").into());
    }
    if value.is_infinite() {
        return Err(ValidationError::field(field, "is infinite").into());
    }
    Ok(())
}

fn check_finite(field: &str, values: impl Iterator<Item = f64>) -> Result<()> {
    for (i, val) in values.enumerate() {
        if val.is_nan() {
            return Err(ValidationError::field(field, format!("contains NaN at index {}", i)).into());
        }
        if val.is_infinite() {
            return Err(
                ValidationError::field(field, format!("contains Inf at index {}", i)).into(),
            );
        }
    }
    Ok(())
}

/// Assemble a complex matrix from a real part and an optional imaginary part.
///
/// Rows must all have the same length and `imag`, when present, must match
/// `real` exactly in shape.
pub fn complex_matrix(
    field: &str,
    real: &[Vec<f64>],
    imag: Option<&[Vec<f64>]>,
) -> Result<Array2<Complex64>> {
    let rows = real.len();
    if rows == 0 {
        return Err(ValidationError::shape(field, "must not be empty").into());
    }
    let cols = real[0].len();
    if let Some(i) = real.iter().position(|row| row.len() != cols) {
        return Err(ValidationError::shape(
            field,
            format!("row {} has {} entries, expected {}", i, real[i].len(), cols),
        )
        .into());
    }
    check_finite(field, real.iter().flatten().copied())?;

    let imag_field = format!("{}_imag", field);
    if let Some(im) = imag {
        if im.len() != rows || im.iter().any(|row| row.len() != cols) {
            return Err(ValidationError::shape(
                &imag_field,
                format!("must match the {} x {} real part", rows, cols),
            )
            .into());
        }
        check_finite(&imag_field, im.iter().flatten().copied())?;
    }

    Ok(Array2::from_shape_fn((rows, cols), |(i, j)| {
        let im = imag.map_or(0.0, |m| m[i][j]);
        Complex64::new(real[i][j], im)
    }))
}

/// Like [`complex_matrix`], additionally requiring a square shape.
pub fn square_matrix(
    field: &str,
    real: &[Vec<f64>],
    imag: Option<&[Vec<f64>]>,
    config: &ValidationConfig,
) -> Result<Array2<Complex64>> {
    let m = complex_matrix(field, real, imag)?;
    if m.nrows() != m.ncols() {
        return Err(ValidationError::shape(
            field,
            format!("must be square, got {} x {}", m.nrows(), m.ncols()),
        )
        .into());
    }
    validate_matrix_dim(field, m.nrows(), config)?;
    Ok(m)
}

/// Assemble a complex vector from a real part and an optional imaginary part.
pub fn complex_vector(field: &str, real: &[f64], imag: Option<&[f64]>) -> Result<Array1<Complex64>> {
    check_finite(field, real.iter().copied())?;
    if let Some(im) = imag {
        let imag_field = format!("{}_imag", field);
        if im.len() != real.len() {
            return Err(ValidationError::shape(
                &imag_field,
                format!("has {} entries, expected {}", im.len(), real.len()),
            )
            .into());
        }
        check_finite(&imag_field, im.iter().copied())?;
    }
    Ok(Array1::from_shape_fn(real.len(), |i| {
        Complex64::new(real[i], imag.map_or(0.0, |v| v[i]))
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn lenient() -> ValidationConfig {
        ValidationConfig {
            strict: false,
            ..ValidationConfig::default()
        }
    }

    #[test]
    fn test_validate_grid_request() {
        let config = ValidationConfig::default();

        assert!(validate_grid_request(500, Some(10), &config).is_ok());

        // Exceeds max grid points
        let err = validate_grid_request(1_000_000, Some(10), &config).unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::ResourceLimit { .. })
        ));

        // Exceeds max levels
        assert!(validate_grid_request(500, Some(10_000), &config).is_err());

        // Limits are off in lenient mode
        assert!(validate_grid_request(1_000_000, Some(10_000), &lenient()).is_ok());
    }

    #[test]
    fn test_validate_time_samples() {
        let config = ValidationConfig::default();
        assert!(validate_time_samples("nSteps", 1, &config).is_ok());
        assert!(validate_time_samples("nSteps", 0, &config).is_err());
        assert!(validate_time_samples("nSteps", 0, &lenient()).is_err());
        assert!(validate_time_samples("nSteps", 50_000, &config).is_err());
    }

    #[test]
    fn test_validate_array() {
        let config = ValidationConfig::default();
        assert!(validate_array("EArray", &[1.0, 2.0], &config).is_ok());
        assert!(validate_array("EArray", &[1.0, f64::NAN], &config).is_err());
        assert!(validate_array("EArray", &[f64::INFINITY], &lenient()).is_err());
    }

    #[test]
    fn test_complex_matrix_shapes() {
        let real = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        let imag = vec![vec![0.0, -1.0], vec![1.0, 0.0]];
        let m = complex_matrix("H", &real, Some(imag.as_slice())).unwrap();
        assert_eq!(m[[0, 1]], Complex64::new(0.0, -1.0));

        // Ragged
        let ragged = vec![vec![1.0, 0.0], vec![0.0]];
        assert!(complex_matrix("H", &ragged, None).is_err());

        // Imaginary part of the wrong shape
        let short = vec![vec![0.0, 0.0]];
        assert!(complex_matrix("H", &real, Some(short.as_slice())).is_err());

        // Empty
        assert!(complex_matrix("H", &[], None).is_err());
    }

    #[test]
    fn test_square_matrix() {
        let config = ValidationConfig::default();
        let rect = vec![vec![1.0, 0.0, 0.0], vec![0.0, 1.0, 0.0]];
        let err = square_matrix("H", &rect, None, &config).unwrap_err();
        assert!(matches!(err, Error::Validation(ValidationError::Shape { .. })));

        let square = vec![vec![2.0]];
        assert_eq!(square_matrix("H", &square, None, &config).unwrap()[[0, 0]].re, 2.0);
    }

    #[test]
    fn test_complex_vector() {
        let v = complex_vector("psi0", &[1.0, 0.0], Some(&[0.0, 1.0][..])).unwrap();
        assert_eq!(v[1], Complex64::new(0.0, 1.0));
        assert_eq!(complex_vector("psi0", &[0.5], None).unwrap()[0].im, 0.0);
        assert!(complex_vector("psi0", &[1.0, 0.0], Some(&[0.0][..])).is_err());
    }
}
