// Copyright 2026 QM Playground Contributors
// SPDX-License-Identifier: Apache-2.0

//! Symmetry operators: rotations, parity, time reversal.

use ndarray::{Array1, Array2};
use num_complex::Complex64;

use crate::error::{Result, ValidationError};
use crate::numerics::eigh;

/// Entry-wise tolerance for `H == conj(H)`.
const REALITY_RTOL: f64 = 1e-5;
const REALITY_ATOL: f64 = 1e-8;

/// Rotation by `angle` in an `n`-level space.
///
/// About `z` this is `diag(e^{i·angle·k})`; other axes are not modelled and
/// yield the identity.
pub fn rotation_operator(angle: f64, axis: &str, n: usize) -> Array2<Complex64> {
    match axis {
        "z" => Array2::from_diag(&Array1::from_shape_fn(n, |k| {
            Complex64::from_polar(1.0, angle * k as f64)
        })),
        _ => Array2::from_diag_elem(n, Complex64::new(1.0, 0.0)),
    }
}

/// Real parts of the eigenvalues of a diagonal rotation.
pub fn rotation_eigenvalues(r: &Array2<Complex64>) -> Vec<f64> {
    r.diag().iter().map(|z| z.re).collect()
}

/// `n x n` reflection `P[i, n-1-i] = 1`.
pub fn parity_operator(n: usize) -> Array2<f64> {
    let mut p = Array2::zeros((n, n));
    for i in 0..n {
        p[[i, n - 1 - i]] = 1.0;
    }
    p
}

/// Parity operator with its eigenvalues in ascending order.
pub fn parity_spectrum(n: usize) -> Result<(Array2<f64>, Vec<f64>)> {
    let p = parity_operator(n);
    let eig = eigh(&p.mapv(|x| Complex64::new(x, 0.0)))?;
    // eigenvalues of a reflection are exactly ±1
    let values = eig.values.iter().map(|v| v.signum()).collect();
    Ok((p, values))
}

/// Outcome of applying antiunitary time reversal `Θψ = ψ*`.
#[derive(Debug, Clone)]
pub struct TimeReversal {
    pub psi_reversed: Array1<Complex64>,
    /// Whether `H` equals its complex conjugate within tolerance.
    pub invariant: bool,
}

/// Time-reverse `psi` and test whether `h` commutes with complex conjugation.
pub fn time_reversal(h: &Array2<Complex64>, psi: &Array1<Complex64>) -> Result<TimeReversal> {
    if h.nrows() != h.ncols() {
        return Err(ValidationError::shape(
            "H",
            format!("must be square, got {} x {}", h.nrows(), h.ncols()),
        )
        .into());
    }
    if psi.len() != h.nrows() {
        return Err(ValidationError::shape(
            "psi",
            format!("length {} does not match H dimension {}", psi.len(), h.nrows()),
        )
        .into());
    }

    let invariant = h.iter().all(|z| {
        let diff = (z - z.conj()).norm();
        diff <= REALITY_ATOL + REALITY_RTOL * z.norm()
    });

    Ok(TimeReversal {
        psi_reversed: psi.mapv(|z| z.conj()),
        invariant,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_rotation_about_z() {
        let r = rotation_operator(PI / 2.0, "z", 3);
        assert_abs_diff_eq!((r[[1, 1]] - Complex64::new(0.0, 1.0)).norm(), 0.0, epsilon = 1e-15);
        assert_abs_diff_eq!((r[[2, 2]] - Complex64::new(-1.0, 0.0)).norm(), 0.0, epsilon = 1e-15);
        let ev = rotation_eigenvalues(&r);
        assert_abs_diff_eq!(ev[0], 1.0);
        assert_abs_diff_eq!(ev[2], -1.0, epsilon = 1e-15);
    }

    #[test]
    fn test_rotation_other_axis_is_identity() {
        let r = rotation_operator(1.234, "x", 4);
        assert_eq!(r, Array2::from_diag_elem(4, Complex64::new(1.0, 0.0)));
        assert_eq!(rotation_eigenvalues(&r), vec![1.0; 4]);
    }

    #[test]
    fn test_parity_eigenvalues() {
        let (p, ev) = parity_spectrum(4).unwrap();
        assert_eq!(p[[0, 3]], 1.0);
        assert_eq!(p[[3, 0]], 1.0);
        assert_eq!(ev, vec![-1.0, -1.0, 1.0, 1.0]);

        let (_, odd) = parity_spectrum(5).unwrap();
        assert_eq!(odd, vec![-1.0, -1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_parity_squares_to_identity() {
        let p = parity_operator(6);
        assert_eq!(p.dot(&p), Array2::<f64>::eye(6));
    }

    #[test]
    fn test_time_reversal_real_hamiltonian() {
        let h = Array2::from_diag_elem(2, Complex64::new(1.0, 0.0));
        let psi = Array1::from(vec![Complex64::new(0.6, 0.8), Complex64::new(0.0, 0.0)]);
        let out = time_reversal(&h, &psi).unwrap();
        assert!(out.invariant);
        assert_eq!(out.psi_reversed[0], Complex64::new(0.6, -0.8));
    }

    #[test]
    fn test_time_reversal_complex_hamiltonian() {
        let mut h = Array2::zeros((2, 2));
        h[[0, 1]] = Complex64::new(0.0, -1.0);
        h[[1, 0]] = Complex64::new(0.0, 1.0);
        let psi = Array1::from(vec![Complex64::new(1.0, 0.0); 2]);
        assert!(!time_reversal(&h, &psi).unwrap().invariant);
    }
}
