// Copyright 2026 QM Playground Contributors
// SPDX-License-Identifier: Apache-2.0

//! Matrix exponential via scaling-and-squaring with Padé(13) approximation.
//!
//! Ref: Higham (2005), "The Scaling and Squaring Method for the Matrix
//! Exponential Revisited", SIAM J. Matrix Anal. Appl. 26(4), 1179.

use ndarray::{s, Array2};
use num_complex::Complex64;

use crate::error::NumericalError;

/// Largest 1-norm for which Padé(13) is accurate without scaling
/// (Higham Table 10.2).
const THETA_13: f64 = 5.37;

/// Padé(13,13) coefficients, Higham (2005) eq. (10.33).
const PADE_COEFFS: [f64; 14] = [
    1.0,
    0.5,
    0.12,
    1.833_333_333_333_333_4e-2,
    1.992_753_623_188_405_8e-3,
    1.630_434_782_608_696e-4,
    1.035_196_687_401_6e-5,
    5.175_983_437_008_01e-7,
    2.043_151_356_652_5e-8,
    6.306_022_705_717_593e-10,
    1.483_770_048_404_14e-11,
    2.529_153_491_597_966e-13,
    2.810_170_546_219_962_4e-15,
    1.544_049_750_670_309e-17,
];

/// Unitary time-evolution operator `U(t) = exp(-iHt)`.
///
/// `h` need not be Hermitian; for a Hermitian `h` the result is unitary.
pub fn propagator(h: &Array2<Complex64>, t: f64) -> Result<Array2<Complex64>, NumericalError> {
    let a = h * Complex64::new(0.0, -t);
    matrix_exp(&a)
}

/// Compute the matrix exponential exp(A).
///
/// # Errors
/// Returns [`NumericalError::Dimension`] if `a` is not square and
/// [`NumericalError::Singular`] if the Padé denominator cannot be inverted.
pub fn matrix_exp(a: &Array2<Complex64>) -> Result<Array2<Complex64>, NumericalError> {
    let n = a.nrows();
    if n != a.ncols() {
        return Err(NumericalError::Dimension(format!(
            "matrix_exp requires a square matrix, got {} x {}",
            n,
            a.ncols()
        )));
    }

    if n == 0 {
        return Ok(Array2::zeros((0, 0)));
    }
    if n == 1 {
        return Ok(Array2::from_elem((1, 1), a[[0, 0]].exp()));
    }

    // Choose s such that ||A/2^s||_1 < theta_13
    let norm = matrix_1_norm(a);
    if !norm.is_finite() {
        return Err(NumericalError::Dimension(
            "matrix_exp input contains non-finite entries".into(),
        ));
    }
    let s = if norm > THETA_13 {
        (norm / THETA_13).log2().ceil() as i32
    } else {
        0
    };

    let a_scaled = a * c(2f64.powi(-s));
    let result = pade13(&a_scaled)?;

    // exp(A) = (exp(A/2^s))^(2^s)
    Ok(square_repeatedly(result, s as u32))
}

/// Padé(13,13) approximant of exp(A).
fn pade13(a: &Array2<Complex64>) -> Result<Array2<Complex64>, NumericalError> {
    let n = a.nrows();
    let eye = Array2::from_diag_elem(n, c(1.0));

    let a2 = a.dot(a);
    let a4 = a2.dot(&a2);
    let a6 = a2.dot(&a4);

    // U = A [A6 (b13 A6 + b11 A4 + b9 A2) + b7 A6 + b5 A4 + b3 A2 + b1 I]
    let w1 = &a6 * c(PADE_COEFFS[13]) + &a4 * c(PADE_COEFFS[11]) + &a2 * c(PADE_COEFFS[9]);
    let w2 = w1.dot(&a6)
        + &a6 * c(PADE_COEFFS[7])
        + &a4 * c(PADE_COEFFS[5])
        + &a2 * c(PADE_COEFFS[3])
        + &eye * c(PADE_COEFFS[1]);
    let u = a.dot(&w2);

    // V = A6 (b12 A6 + b10 A4 + b8 A2) + b6 A6 + b4 A4 + b2 A2 + b0 I
    let v1 = &a6 * c(PADE_COEFFS[12]) + &a4 * c(PADE_COEFFS[10]) + &a2 * c(PADE_COEFFS[8]);
    let v = v1.dot(&a6)
        + &a6 * c(PADE_COEFFS[6])
        + &a4 * c(PADE_COEFFS[4])
        + &a2 * c(PADE_COEFFS[2])
        + &eye * c(PADE_COEFFS[0]);

    // exp(A) ≈ (V - U)^{-1} (V + U)
    let numerator = &v + &u;
    let denominator = &v - &u;
    solve_linear(denominator, numerator)
}

#[inline]
fn c(x: f64) -> Complex64 {
    Complex64::new(x, 0.0)
}

/// Solve A X = B by Gaussian elimination with partial pivoting.
fn solve_linear(
    a: Array2<Complex64>,
    b: Array2<Complex64>,
) -> Result<Array2<Complex64>, NumericalError> {
    let n = a.nrows();
    let m = b.ncols();

    let mut aug = Array2::zeros((n, n + m));
    aug.slice_mut(s![.., ..n]).assign(&a);
    aug.slice_mut(s![.., n..]).assign(&b);

    for col in 0..n {
        let mut max_val = 0.0;
        let mut max_row = col;
        for row in col..n {
            let val = aug[[row, col]].norm();
            if val > max_val {
                max_val = val;
                max_row = row;
            }
        }

        if max_row != col {
            for j in 0..(n + m) {
                aug.swap([col, j], [max_row, j]);
            }
        }

        let pivot = aug[[col, col]];
        if pivot.norm() < 1e-15 {
            return Err(NumericalError::Singular("matrix_exp"));
        }

        for row in (col + 1)..n {
            let factor = aug[[row, col]] / pivot;
            for j in col..(n + m) {
                let val = aug[[col, j]];
                aug[[row, j]] -= factor * val;
            }
        }
    }

    let mut x = Array2::<Complex64>::zeros((n, m));
    for col in (0..n).rev() {
        let pivot = aug[[col, col]];
        for j in 0..m {
            let mut sum = aug[[col, n + j]];
            for k in (col + 1)..n {
                sum -= aug[[col, k]] * x[[k, j]];
            }
            x[[col, j]] = sum / pivot;
        }
    }
    Ok(x)
}

/// M^(2^s)
fn square_repeatedly(mut m: Array2<Complex64>, s: u32) -> Array2<Complex64> {
    for _ in 0..s {
        m = m.dot(&m);
    }
    m
}

/// Max column sum of absolute values.
fn matrix_1_norm(a: &Array2<Complex64>) -> f64 {
    a.columns()
        .into_iter()
        .map(|col| col.iter().map(|z| z.norm()).sum::<f64>())
        .fold(0.0, f64::max)
}
