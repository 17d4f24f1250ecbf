// Copyright 2026 QM Playground Contributors
// SPDX-License-Identifier: Apache-2.0

//! Closed-form variational energy scans.
//!
//! Each scan evaluates a trial energy `E(p)` over a caller-supplied array of
//! parameters and reports the first index at which the energy is minimal.

use crate::error::{Result, ValidationError};

/// Reference helium ground-state energy (Hartree).
pub const HELIUM_REFERENCE_ENERGY: f64 = -2.9037;

/// Energies of a parameter scan.
#[derive(Debug, Clone, PartialEq)]
pub struct Scan {
    pub energies: Vec<f64>,
    /// First index of the smallest energy.
    pub min_index: usize,
}

fn argmin_first(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v < values[best] {
            best = i;
        }
    }
    best
}

fn non_empty(field: &str, values: &[f64]) -> std::result::Result<(), ValidationError> {
    if values.is_empty() {
        return Err(ValidationError::field(field, "must contain at least one value"));
    }
    if let Some(i) = values.iter().position(|v| !v.is_finite()) {
        return Err(ValidationError::field(
            field,
            format!("non-finite value at index {}", i),
        ));
    }
    Ok(())
}

/// Gaussian trial function in a harmonic well: `E(α) = α/2 + ω²/(2α)`.
///
/// The exact ground energy `ω/2` is reached at `α = ω`.
pub fn oscillator(alphas: &[f64], omega: f64) -> Result<Scan> {
    non_empty("alphaArray", alphas)?;
    if let Some(i) = alphas.iter().position(|&a| a <= 0.0) {
        return Err(ValidationError::field(
            "alphaArray",
            format!("trial width must be positive, got {} at index {}", alphas[i], i),
        )
        .into());
    }
    let energies: Vec<f64> = alphas
        .iter()
        .map(|&a| 0.5 * a + 0.5 * omega * omega / a)
        .collect();
    let min_index = argmin_first(&energies);
    Ok(Scan {
        energies,
        min_index,
    })
}

/// Exact harmonic-oscillator ground energy `ω/2`.
pub fn oscillator_exact_ground(omega: f64) -> f64 {
    0.5 * omega
}

/// Screened-charge helium trial: `E(Z) = -2Z² + (5/8)Z`.
pub fn helium(charges: &[f64]) -> Result<Scan> {
    non_empty("ZArray", charges)?;
    let energies: Vec<f64> = charges
        .iter()
        .map(|&z| -2.0 * z * z + 0.625 * z)
        .collect();
    let min_index = argmin_first(&energies);
    Ok(Scan {
        energies,
        min_index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_oscillator_minimum_at_omega() {
        let scan = oscillator(&[0.5, 1.0, 1.5, 2.0], 1.0).unwrap();
        assert_eq!(scan.min_index, 1);
        assert_eq!(scan.energies[1], 1.0);
        assert_abs_diff_eq!(scan.energies[0], 1.25);
        assert_eq!(oscillator_exact_ground(1.0), 0.5);
    }

    #[test]
    fn test_oscillator_ties_pick_first() {
        // E(0.5) == E(2.0) for ω = 1
        let scan = oscillator(&[2.0, 0.5], 1.0).unwrap();
        assert_eq!(scan.min_index, 0);
    }

    #[test]
    fn test_oscillator_rejects_bad_input() {
        assert!(oscillator(&[], 1.0).is_err());
        assert!(oscillator(&[1.0, 0.0], 1.0).is_err());
        assert!(oscillator(&[-1.0], 1.0).is_err());
    }

    #[test]
    fn test_helium_energies() {
        let scan = helium(&[1.0, 1.6875, 2.0]).unwrap();
        assert_abs_diff_eq!(scan.energies[0], -1.375);
        assert_abs_diff_eq!(scan.energies[2], -6.75);
        assert_eq!(scan.min_index, 2);
        assert!(helium(&[]).is_err());
    }
}
