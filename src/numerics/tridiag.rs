// Copyright 2026 QM Playground Contributors
// SPDX-License-Identifier: Apache-2.0

//! Lowest eigenpairs of a real symmetric tridiagonal matrix.
//!
//! Eigenvalues come from Sturm-sequence bisection: the number of negative
//! pivots in the LDLᵀ factorization of `T - λI` equals the number of
//! eigenvalues below `λ`. Each eigenvector is then recovered by inverse
//! iteration on `T - λI`, re-orthogonalized against earlier vectors of the
//! same cluster.

use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::NumericalError;

/// Floor for LDLᵀ pivots so the recurrence never divides by zero.
const PIVOT_GUARD: f64 = 1e-300;

/// Bisection steps; 2⁻²⁰⁰ of the Gershgorin width is far below f64 resolution.
const MAX_BISECTION_STEPS: usize = 200;

const INVERSE_ITERATIONS: usize = 3;

/// Relative gap under which two eigenvalues are treated as one cluster.
const CLUSTER_GAP: f64 = 1e-10;

/// Eigenpairs of a symmetric tridiagonal matrix, ascending by eigenvalue.
#[derive(Debug, Clone)]
pub struct TridiagEigen {
    /// Eigenvalues, non-decreasing.
    pub values: Array1<f64>,
    /// Unit-norm eigenvectors, one per row.
    pub vectors: Array2<f64>,
}

/// Count eigenvalues of the tridiagonal matrix strictly below `lambda`.
///
/// - `diagonal`: main diagonal d[0..n]
/// - `off_diag`: sub/super-diagonal e[0..n-1]
pub fn sturm_count(diagonal: &[f64], off_diag: &[f64], lambda: f64) -> usize {
    let n = diagonal.len();
    if n == 0 {
        return 0;
    }

    let mut count = 0;
    let mut q = diagonal[0] - lambda;
    if q < 0.0 {
        count += 1;
    }
    for i in 1..n {
        let q_safe = if q.abs() < PIVOT_GUARD {
            PIVOT_GUARD.copysign(q)
        } else {
            q
        };
        q = (diagonal[i] - lambda) - off_diag[i - 1] * off_diag[i - 1] / q_safe;
        if q < 0.0 {
            count += 1;
        }
    }
    count
}

/// Gershgorin interval enclosing the whole spectrum.
fn gershgorin_bounds(diagonal: &[f64], off_diag: &[f64]) -> (f64, f64) {
    let n = diagonal.len();
    let mut lo = f64::MAX;
    let mut hi = f64::MIN;
    for i in 0..n {
        let e_left = if i > 0 { off_diag[i - 1].abs() } else { 0.0 };
        let e_right = if i + 1 < n { off_diag[i].abs() } else { 0.0 };
        lo = lo.min(diagonal[i] - e_left - e_right);
        hi = hi.max(diagonal[i] + e_left + e_right);
    }
    let pad = 1e-12 * (hi - lo).abs().max(1.0);
    (lo - pad, hi + pad)
}

/// k-th smallest eigenvalue (0-based) by bisection on the Sturm count.
pub fn kth_eigenvalue(diagonal: &[f64], off_diag: &[f64], k: usize) -> f64 {
    let (mut a, mut b) = gershgorin_bounds(diagonal, off_diag);
    for _ in 0..MAX_BISECTION_STEPS {
        let mid = 0.5 * (a + b);
        if (b - a) < 2.0 * f64::EPSILON * mid.abs().max(1.0) {
            break;
        }
        if sturm_count(diagonal, off_diag, mid) <= k {
            a = mid;
        } else {
            b = mid;
        }
    }
    0.5 * (a + b)
}

/// Lowest `n_levels` eigenpairs of the symmetric tridiagonal matrix.
///
/// # Errors
/// [`NumericalError::Dimension`] for inconsistent diagonals or
/// `n_levels > n`; [`NumericalError::NonConvergence`] if inverse iteration
/// produces a degenerate vector.
pub fn lowest_eigenpairs(
    diagonal: &[f64],
    off_diag: &[f64],
    n_levels: usize,
) -> Result<TridiagEigen, NumericalError> {
    let n = diagonal.len();
    if n == 0 || off_diag.len() + 1 != n {
        return Err(NumericalError::Dimension(format!(
            "tridiagonal matrix with {} diagonal and {} off-diagonal entries",
            n,
            off_diag.len()
        )));
    }
    if n_levels > n {
        return Err(NumericalError::Dimension(format!(
            "requested {} eigenpairs of a {} x {} matrix",
            n_levels, n, n
        )));
    }

    let scale = diagonal
        .iter()
        .chain(off_diag.iter())
        .fold(0.0f64, |m, v| m.max(v.abs()))
        .max(f64::MIN_POSITIVE);

    let mut values = Array1::<f64>::zeros(n_levels);
    let mut vectors = Array2::zeros((n_levels, n));
    let mut rng = StdRng::seed_from_u64(0x5eed_u64);
    let mut cluster_start = 0;

    for k in 0..n_levels {
        let lambda = kth_eigenvalue(diagonal, off_diag, k);
        if k > 0 && (lambda - values[k - 1]).abs() > CLUSTER_GAP * scale {
            cluster_start = k;
        }
        values[k] = lambda;

        // Nudge the shift off the exact eigenvalue so the factorization stays finite.
        let shift = lambda + 1e3 * f64::EPSILON * scale;
        let mut x: Vec<f64> = (0..n).map(|_| rng.gen_range(-1.0..1.0)).collect();
        normalize(&mut x);

        for _ in 0..INVERSE_ITERATIONS {
            x = solve_shifted(diagonal, off_diag, shift, &x);
            for prev in cluster_start..k {
                let row = vectors.row(prev);
                let overlap: f64 = row.iter().zip(&x).map(|(a, b)| a * b).sum();
                for (xi, ri) in x.iter_mut().zip(row.iter()) {
                    *xi -= overlap * ri;
                }
            }
            if !normalize(&mut x) {
                return Err(NumericalError::NonConvergence {
                    routine: "tridiagonal inverse iteration",
                    iterations: INVERSE_ITERATIONS,
                });
            }
        }

        fix_sign(&mut x);
        vectors.row_mut(k).assign(&Array1::from(x));
    }

    Ok(TridiagEigen { values, vectors })
}

/// Solve (T - shift·I) y = b with the Thomas algorithm.
fn solve_shifted(diagonal: &[f64], off_diag: &[f64], shift: f64, b: &[f64]) -> Vec<f64> {
    let n = diagonal.len();
    let mut c_prime = vec![0.0; n];
    let mut d_prime = vec![0.0; n];

    let guard = |p: f64| {
        if p.abs() < PIVOT_GUARD {
            PIVOT_GUARD.copysign(p)
        } else {
            p
        }
    };

    let mut pivot = guard(diagonal[0] - shift);
    if n > 1 {
        c_prime[0] = off_diag[0] / pivot;
    }
    d_prime[0] = b[0] / pivot;
    for i in 1..n {
        pivot = guard(diagonal[i] - shift - off_diag[i - 1] * c_prime[i - 1]);
        if i + 1 < n {
            c_prime[i] = off_diag[i] / pivot;
        }
        d_prime[i] = (b[i] - off_diag[i - 1] * d_prime[i - 1]) / pivot;
    }

    let mut y = d_prime;
    for i in (0..n.saturating_sub(1)).rev() {
        y[i] -= c_prime[i] * y[i + 1];
    }

    // Rescale if the near-singular solve overflowed towards infinity.
    let max = y.iter().fold(0.0f64, |m, v| m.max(v.abs()));
    if max.is_finite() && max > 1e150 {
        y.iter_mut().for_each(|v| *v /= max);
    }
    y
}

/// Scale to unit 2-norm; false if the vector is zero or non-finite.
fn normalize(x: &mut [f64]) -> bool {
    let norm = x.iter().map(|v| v * v).sum::<f64>().sqrt();
    if !norm.is_finite() || norm == 0.0 {
        return false;
    }
    x.iter_mut().for_each(|v| *v /= norm);
    true
}

/// Make the largest-magnitude component positive.
fn fix_sign(x: &mut [f64]) {
    let mut best = 0.0f64;
    let mut sign = 1.0;
    for &v in x.iter() {
        if v.abs() > best {
            best = v.abs();
            sign = v.signum();
        }
    }
    if sign < 0.0 {
        x.iter_mut().for_each(|v| *v = -*v);
    }
}
