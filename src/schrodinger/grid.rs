// Copyright 2026 QM Playground Contributors
// SPDX-License-Identifier: Apache-2.0

//! Uniform 1-D spatial grid.

use ndarray::Array1;

use crate::error::ValidationError;
use crate::numerics::linspace;

/// `n` evenly spaced points over `[x_min, x_max]`.
#[derive(Debug, Clone)]
pub struct Grid {
    points: Array1<f64>,
    dx: f64,
}

impl Grid {
    /// Build a grid, rejecting fewer than two points or an empty interval.
    pub fn new(x_min: f64, x_max: f64, n_points: usize) -> Result<Self, ValidationError> {
        if !x_min.is_finite() || !x_max.is_finite() {
            return Err(ValidationError::field("xMin", "grid bounds must be finite"));
        }
        if n_points < 2 {
            return Err(ValidationError::field(
                "nPoints",
                format!("must be at least 2, got {}", n_points),
            ));
        }
        if x_min >= x_max {
            return Err(ValidationError::field(
                "xMax",
                format!("must exceed xMin ({} >= {})", x_min, x_max),
            ));
        }

        let dx = (x_max - x_min) / (n_points - 1) as f64;
        if !dx.is_finite() {
            return Err(ValidationError::field(
                "xMax",
                format!("grid spacing overflows for [{}, {}]", x_min, x_max),
            ));
        }
        Ok(Self {
            points: linspace(x_min, x_max, n_points),
            dx,
        })
    }

    pub fn points(&self) -> &Array1<f64> {
        &self.points
    }

    pub fn dx(&self) -> f64 {
        self.dx
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
