// Copyright 2026 QM Playground Contributors
// SPDX-License-Identifier: Apache-2.0

//! Conversions between ndarray values and their JSON wire layout.
//!
//! Complex data is always sent as two parallel arrays of identical shape, one
//! for the real part and one for the imaginary part.

use ndarray::{Array1, Array2};
use num_complex::Complex64;

use crate::error::{Error, Result};

/// Row-major nested vectors of a real matrix.
pub fn rows(m: &Array2<f64>) -> Vec<Vec<f64>> {
    m.rows().into_iter().map(|r| r.to_vec()).collect()
}

/// `(real, imag)` parts of a complex matrix, row-major.
pub fn split_matrix(m: &Array2<Complex64>) -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
    (rows(&m.mapv(|z| z.re)), rows(&m.mapv(|z| z.im)))
}

/// `(real, imag)` parts of a complex vector.
pub fn split_vector(v: &Array1<Complex64>) -> (Vec<f64>, Vec<f64>) {
    (
        v.iter().map(|z| z.re).collect(),
        v.iter().map(|z| z.im).collect(),
    )
}

/// Run a CPU-bound computation off the async reactor.
pub async fn run_blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| Error::Server(format!("computation task failed: {}", e)))?
}
