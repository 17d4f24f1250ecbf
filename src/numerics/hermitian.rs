// Copyright 2026 QM Playground Contributors
// SPDX-License-Identifier: Apache-2.0

//! Dense Hermitian eigen-decomposition backed by `nalgebra::SymmetricEigen`.
//!
//! nalgebra returns eigenpairs in an unspecified order; they are sorted
//! ascending here and copied back into `ndarray` storage.

use nalgebra::{DMatrix, SymmetricEigen};
use ndarray::{Array1, Array2};
use num_complex::Complex64;

use crate::error::NumericalError;

/// Implicit QR iteration cap passed to nalgebra.
const MAX_ITERATIONS: usize = 10_000;

/// Eigen-decomposition `A = V diag(λ) V†` of a Hermitian matrix.
#[derive(Debug, Clone)]
pub struct HermitianEigen {
    /// Eigenvalues in ascending order.
    pub values: Array1<f64>,
    /// Unitary matrix whose k-th column is the eigenvector of `values[k]`.
    pub vectors: Array2<Complex64>,
}

/// Diagonalize a Hermitian matrix.
///
/// Only the upper triangle is trusted for the Hermitian structure: the lower
/// triangle is replaced by the conjugate of the upper one before solving.
///
/// # Errors
/// [`NumericalError::Dimension`] for a non-square input and
/// [`NumericalError::NonConvergence`] if the QR iteration does not converge.
pub fn eigh(matrix: &Array2<Complex64>) -> Result<HermitianEigen, NumericalError> {
    let n = matrix.nrows();
    if n != matrix.ncols() {
        return Err(NumericalError::Dimension(format!(
            "eigh requires a square matrix, got {} x {}",
            n,
            matrix.ncols()
        )));
    }
    if n == 0 {
        return Ok(HermitianEigen {
            values: Array1::zeros(0),
            vectors: Array2::zeros((0, 0)),
        });
    }

    let hermitian = DMatrix::from_fn(n, n, |i, j| {
        if i == j {
            Complex64::new(matrix[[i, i]].re, 0.0)
        } else if i < j {
            matrix[[i, j]]
        } else {
            matrix[[j, i]].conj()
        }
    });

    let eig = SymmetricEigen::try_new(hermitian, f64::EPSILON, MAX_ITERATIONS).ok_or(
        NumericalError::NonConvergence {
            routine: "Hermitian eigensolver",
            iterations: MAX_ITERATIONS,
        },
    )?;

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&i, &j| eig.eigenvalues[i].total_cmp(&eig.eigenvalues[j]));

    let values = order.iter().map(|&i| eig.eigenvalues[i]).collect();
    let vectors = Array2::from_shape_fn((n, n), |(row, k)| eig.eigenvectors[(row, order[k])]);

    Ok(HermitianEigen { values, vectors })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numerics::dagger;
    use approx::assert_abs_diff_eq;

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    fn reconstruct(eig: &HermitianEigen) -> Array2<Complex64> {
        let lambda = Array2::from_diag(&eig.values.mapv(|x| c(x, 0.0)));
        eig.vectors.dot(&lambda).dot(&dagger(&eig.vectors))
    }

    #[test]
    fn test_pauli_y_eigenvalues() {
        let mut sy = Array2::zeros((2, 2));
        sy[[0, 1]] = c(0.0, -1.0);
        sy[[1, 0]] = c(0.0, 1.0);
        let eig = eigh(&sy).unwrap();
        assert_abs_diff_eq!(eig.values[0], -1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(eig.values[1], 1.0, epsilon = 1e-12);

        // σy v = -v for the first column
        let v0 = eig.vectors.column(0).to_owned();
        let sv = sy.dot(&v0);
        for i in 0..2 {
            assert_abs_diff_eq!((sv[i] + v0[i]).norm(), 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_reconstruction_and_unitarity() {
        let mut a = Array2::zeros((4, 4));
        let entries = [
            (0, 0, c(2.0, 0.0)),
            (1, 1, c(-1.0, 0.0)),
            (2, 2, c(0.5, 0.0)),
            (3, 3, c(3.0, 0.0)),
            (0, 1, c(0.3, 0.4)),
            (0, 3, c(-1.0, 0.2)),
            (1, 2, c(0.0, 0.9)),
            (2, 3, c(0.7, -0.1)),
        ];
        for &(i, j, z) in &entries {
            a[[i, j]] = z;
            a[[j, i]] = z.conj();
        }

        let eig = eigh(&a).unwrap();
        let rebuilt = reconstruct(&eig);
        for ((i, j), z) in rebuilt.indexed_iter() {
            assert_abs_diff_eq!((z - a[[i, j]]).norm(), 0.0, epsilon = 1e-10);
        }

        let vv = dagger(&eig.vectors).dot(&eig.vectors);
        for ((i, j), z) in vv.indexed_iter() {
            let expected = if i == j { 1.0 } else { 0.0 };
            assert_abs_diff_eq!((z - c(expected, 0.0)).norm(), 0.0, epsilon = 1e-10);
        }

        for k in 1..4 {
            assert!(eig.values[k] >= eig.values[k - 1]);
        }
    }

    #[test]
    fn test_diagonal_input_is_sorted() {
        let a = Array2::from_diag(&Array1::from(vec![c(3.0, 0.0), c(-2.0, 0.0), c(1.0, 0.0)]));
        let eig = eigh(&a).unwrap();
        for (got, want) in eig.values.iter().zip([-2.0, 1.0, 3.0]) {
            assert_abs_diff_eq!(*got, want, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_empty_and_scalar() {
        let empty = Array2::<Complex64>::zeros((0, 0));
        assert_eq!(eigh(&empty).unwrap().values.len(), 0);

        let one = Array2::from_elem((1, 1), c(7.0, 0.0));
        assert_abs_diff_eq!(eigh(&one).unwrap().values[0], 7.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rejects_non_square() {
        let a = Array2::<Complex64>::zeros((2, 3));
        assert!(eigh(&a).is_err());
    }
}
