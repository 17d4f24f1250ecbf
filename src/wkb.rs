// Copyright 2026 QM Playground Contributors
// SPDX-License-Identifier: Apache-2.0

//! WKB transmission through a rectangular barrier.

use serde::{Deserialize, Serialize};

const DEFAULT_HEIGHT: f64 = 5.0;
const DEFAULT_WIDTH: f64 = 1.0;

/// Barrier parameters; missing fields take the defaults (height 5, width 1).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BarrierParams {
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub width: Option<f64>,
}

impl BarrierParams {
    pub fn height(&self) -> f64 {
        self.height.unwrap_or(DEFAULT_HEIGHT)
    }

    pub fn width(&self) -> f64 {
        self.width.unwrap_or(DEFAULT_WIDTH)
    }
}

/// `T(E) = exp(-2 κ a)` with `κ = sqrt(2(V0 - E))` below the barrier top,
/// and exactly 1 at or above it.
pub fn transmission(barrier: &BarrierParams, energy: f64) -> f64 {
    let v0 = barrier.height();
    if energy < v0 {
        let kappa = (2.0 * (v0 - energy)).sqrt();
        (-2.0 * kappa * barrier.width()).exp()
    } else {
        1.0
    }
}

/// Transmission for each energy.
pub fn tunneling(barrier: &BarrierParams, energies: &[f64]) -> Vec<f64> {
    energies.iter().map(|&e| transmission(barrier, e)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_at_barrier_top_is_one() {
        let b = BarrierParams::default();
        assert_eq!(transmission(&b, 5.0), 1.0);
        assert_eq!(transmission(&b, 7.5), 1.0);
    }

    #[test]
    fn test_below_barrier() {
        let b = BarrierParams {
            height: Some(3.0),
            width: Some(0.5),
        };
        // κ = sqrt(2·2) = 2, T = exp(-2)
        assert_abs_diff_eq!(transmission(&b, 1.0), (-2.0f64).exp(), epsilon = 1e-15);
    }

    #[test]
    fn test_monotone_in_energy() {
        let t = tunneling(&BarrierParams::default(), &[0.0, 1.0, 2.0, 3.0, 4.0, 4.9]);
        for w in t.windows(2) {
            assert!(w[1] > w[0]);
        }
    }

    #[test]
    fn test_params_from_partial_json() {
        let b: BarrierParams = serde_json::from_str(r#"{"width": 2.0, "shape": "flat"}"#).unwrap();
        assert_eq!(b.height(), 5.0);
        assert_eq!(b.width(), 2.0);
    }
}
