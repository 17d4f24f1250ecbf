// Copyright 2026 QM Playground Contributors
// SPDX-License-Identifier: Apache-2.0

//! Model potentials sampled on a grid.

use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Raw potential parameters as they arrive on the wire.
///
/// Every field is optional; each [`Potential`] variant substitutes its own
/// default for a missing value. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PotentialParams {
    #[serde(default)]
    pub omega: Option<f64>,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
}

/// A 1-D potential with its resolved parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Potential {
    /// `V = ½ ω² x²`
    Harmonic { omega: f64 },
    /// Zero inside `|x| < width/2`, `height` outside.
    SquareWell { width: f64, height: f64 },
    /// `height` inside `|x| < width/2`, zero outside.
    Barrier { width: f64, height: f64 },
    /// Zero everywhere; the fallback for unrecognized names.
    Free,
}

impl Potential {
    pub const DEFAULT_OMEGA: f64 = 1.0;
    pub const DEFAULT_WELL_WIDTH: f64 = 2.0;
    pub const DEFAULT_WELL_HEIGHT: f64 = 100.0;
    pub const DEFAULT_BARRIER_WIDTH: f64 = 1.0;
    pub const DEFAULT_BARRIER_HEIGHT: f64 = 5.0;

    /// Resolve a potential from its name and parameters.
    ///
    /// Unrecognized names select [`Potential::Free`].
    pub fn from_request(kind: &str, params: &PotentialParams) -> Self {
        match kind {
            "harmonic" => Potential::Harmonic {
                omega: params.omega.unwrap_or(Self::DEFAULT_OMEGA),
            },
            "square_well" => Potential::SquareWell {
                width: params.width.unwrap_or(Self::DEFAULT_WELL_WIDTH),
                height: params.height.unwrap_or(Self::DEFAULT_WELL_HEIGHT),
            },
            "barrier" => Potential::Barrier {
                width: params.width.unwrap_or(Self::DEFAULT_BARRIER_WIDTH),
                height: params.height.unwrap_or(Self::DEFAULT_BARRIER_HEIGHT),
            },
            _ => Potential::Free,
        }
    }

    /// Potential energy at position `x`.
    pub fn value(&self, x: f64) -> f64 {
        match *self {
            Potential::Harmonic { omega } => 0.5 * omega * omega * x * x,
            Potential::SquareWell { width, height } => {
                if x.abs() < width / 2.0 {
                    0.0
                } else {
                    height
                }
            }
            Potential::Barrier { width, height } => {
                if x.abs() < width / 2.0 {
                    height
                } else {
                    0.0
                }
            }
            Potential::Free => 0.0,
        }
    }

    /// Sample the potential at every grid point.
    pub fn sample(&self, x: &Array1<f64>) -> Array1<f64> {
        x.mapv(|xi| self.value(xi))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_per_variant() {
        let none = PotentialParams::default();
        assert_eq!(
            Potential::from_request("harmonic", &none),
            Potential::Harmonic { omega: 1.0 }
        );
        assert_eq!(
            Potential::from_request("square_well", &none),
            Potential::SquareWell {
                width: 2.0,
                height: 100.0
            }
        );
        assert_eq!(
            Potential::from_request("barrier", &none),
            Potential::Barrier {
                width: 1.0,
                height: 5.0
            }
        );
    }

    #[test]
    fn test_unknown_kind_is_free() {
        let params = PotentialParams {
            omega: Some(3.0),
            ..Default::default()
        };
        let v = Potential::from_request("unknown_string", &params);
        assert_eq!(v, Potential::Free);
        let x = Array1::linspace(-5.0, 5.0, 11);
        assert!(v.sample(&x).iter().all(|&vi| vi == 0.0));
    }

    #[test]
    fn test_values() {
        let ho = Potential::Harmonic { omega: 2.0 };
        assert_eq!(ho.value(1.5), 0.5 * 4.0 * 2.25);

        let well = Potential::SquareWell {
            width: 2.0,
            height: 100.0,
        };
        assert_eq!(well.value(0.5), 0.0);
        assert_eq!(well.value(1.0), 100.0);
        assert_eq!(well.value(-3.0), 100.0);

        let barrier = Potential::Barrier {
            width: 1.0,
            height: 5.0,
        };
        assert_eq!(barrier.value(0.2), 5.0);
        assert_eq!(barrier.value(0.5), 0.0);
    }

    #[test]
    fn test_params_ignore_unknown_keys() {
        let params: PotentialParams =
            serde_json::from_str(r#"{"omega": 2.5, "mass": 7.0}"#).unwrap();
        assert_eq!(params.omega, Some(2.5));
        assert_eq!(params.width, None);
    }
}
