// Copyright 2026 QM Playground Contributors
// SPDX-License-Identifier: Apache-2.0

//! Finite-dimensional observables and measurement statistics.
//!
//! An observable is diagonalized as `A = V diag(λ) V†`; measuring it in state
//! `ψ` yields outcome `λ_k` with probability `|v_k† ψ|²`.

use ndarray::{Array1, Array2};
use num_complex::Complex64;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

use crate::error::{Result, ValidationError};
use crate::numerics::{eigh, norm_sqr};

/// Relative tolerance for deciding that a basis change preserved the norm.
const NORM_TOLERANCE: f64 = 1e-9;

/// Observable families the lab can build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObservableKind {
    /// `diag(0, 1, ..., N-1)`
    Position,
    /// `-i (D - Dᵀ)` with super-diagonal `1..N-1`
    Momentum,
    /// `(M + M†)/2` for a complex Gaussian `M`
    RandomHermitian,
    /// Fallback for unrecognized names
    Identity,
}

impl ObservableKind {
    /// Unrecognized names fall back to [`ObservableKind::Identity`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "position" => ObservableKind::Position,
            "momentum" => ObservableKind::Momentum,
            "random_hermitian" => ObservableKind::RandomHermitian,
            _ => ObservableKind::Identity,
        }
    }
}

/// Preset states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateKind {
    /// `e_0`
    Basis,
    /// Uniform amplitude `1/sqrt(N)`
    Superposition,
    /// Normalized complex Gaussian
    Random,
    /// Zero vector, for unrecognized names
    Zero,
}

impl StateKind {
    /// Unrecognized names fall back to [`StateKind::Zero`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "basis" => StateKind::Basis,
            "superposition" => StateKind::Superposition,
            "random" => StateKind::Random,
            _ => StateKind::Zero,
        }
    }
}

/// Random source for the random kinds: seeded when reproducibility is asked for.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}

fn complex_gaussian<R: Rng + ?Sized>(rng: &mut R) -> Complex64 {
    Complex64::new(rng.sample(StandardNormal), rng.sample(StandardNormal))
}

/// Build an `n x n` observable.
pub fn generate_operator<R: Rng + ?Sized>(
    kind: ObservableKind,
    n: usize,
    rng: &mut R,
) -> Array2<Complex64> {
    match kind {
        ObservableKind::Position => {
            Array2::from_diag(&Array1::from_shape_fn(n, |i| Complex64::new(i as f64, 0.0)))
        }
        ObservableKind::Momentum => {
            let mut p = Array2::zeros((n, n));
            for i in 0..n.saturating_sub(1) {
                let d = (i + 1) as f64;
                // -i (D - Dᵀ): upper entry -i·d, lower entry +i·d
                p[[i, i + 1]] = Complex64::new(0.0, -d);
                p[[i + 1, i]] = Complex64::new(0.0, d);
            }
            p
        }
        ObservableKind::RandomHermitian => {
            let m = Array2::from_shape_fn((n, n), |_| complex_gaussian(rng));
            Array2::from_shape_fn((n, n), |(i, j)| (m[[i, j]] + m[[j, i]].conj()) * 0.5)
        }
        ObservableKind::Identity => Array2::from_diag_elem(n, Complex64::new(1.0, 0.0)),
    }
}

/// Build a length-`n` state.
pub fn generate_state<R: Rng + ?Sized>(
    kind: StateKind,
    n: usize,
    rng: &mut R,
) -> Array1<Complex64> {
    match kind {
        StateKind::Basis => {
            let mut psi = Array1::zeros(n);
            if n > 0 {
                psi[0] = Complex64::new(1.0, 0.0);
            }
            psi
        }
        StateKind::Superposition => {
            Array1::from_elem(n, Complex64::new(1.0 / (n as f64).sqrt(), 0.0))
        }
        StateKind::Random => {
            let psi = Array1::from_shape_fn(n, |_| complex_gaussian(rng));
            let norm = norm_sqr(&psi).sqrt();
            if norm > 0.0 {
                psi.mapv(|z| z / norm)
            } else {
                psi
            }
        }
        StateKind::Zero => Array1::zeros(n),
    }
}

/// Eigen-decomposition of an observable plus outcome probabilities.
#[derive(Debug, Clone)]
pub struct ObservableAnalysis {
    /// Ascending eigenvalues.
    pub eigenvalues: Array1<f64>,
    /// Eigenvectors as columns.
    pub eigenvectors: Array2<Complex64>,
    /// `|v_k† ψ|²` for each eigenvector.
    pub probabilities: Array1<f64>,
}

/// Diagonalize `a` and compute measurement probabilities for `psi`.
pub fn observable_analysis(a: &Array2<Complex64>, psi: &Array1<Complex64>) -> Result<ObservableAnalysis> {
    if psi.len() != a.nrows() {
        return Err(ValidationError::shape(
            "state",
            format!("length {} does not match operator dimension {}", psi.len(), a.nrows()),
        )
        .into());
    }
    let eig = eigh(a)?;
    let probabilities = eig
        .vectors
        .columns()
        .into_iter()
        .map(|v| {
            v.iter()
                .zip(psi.iter())
                .map(|(vi, pi)| vi.conj() * pi)
                .sum::<Complex64>()
                .norm_sqr()
        })
        .collect();

    Ok(ObservableAnalysis {
        eigenvalues: eig.values,
        eigenvectors: eig.vectors,
        probabilities,
    })
}

/// Result of re-expressing a state through `U`.
#[derive(Debug, Clone)]
pub struct BasisChange {
    pub new_state: Array1<Complex64>,
    /// Whether `‖Uψ‖ == ‖ψ‖`, i.e. total probability is unchanged.
    pub probabilities_invariant: bool,
}

/// Apply `u` to `psi`.
pub fn basis_change(psi: &Array1<Complex64>, u: &Array2<Complex64>) -> Result<BasisChange> {
    if u.ncols() != psi.len() {
        return Err(ValidationError::shape(
            "U",
            format!(
                "matrix is {} x {} but the state has {} components",
                u.nrows(),
                u.ncols(),
                psi.len()
            ),
        )
        .into());
    }
    let new_state = u.dot(psi);
    let before = norm_sqr(psi);
    let after = norm_sqr(&new_state);
    let probabilities_invariant = (after - before).abs() <= NORM_TOLERANCE * before.max(1.0);

    Ok(BasisChange {
        new_state,
        probabilities_invariant,
    })
}
