// Copyright 2026 QM Playground Contributors
// SPDX-License-Identifier: Apache-2.0

//! Quantum Mechanics Playground
//!
//! Stateless quantum-mechanics simulations served as JSON over HTTP. Units
//! are fixed at ħ = m = 1.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │          REST server (axum, tower-http)      │
//! ├─────────────────────────────────────────────┤
//! │       validation (limits, wire shapes)       │
//! ├────────────┬────────────┬───────────────────┤
//! │ schrodinger│  dynamics  │ operators, spin,  │
//! │ (grid)     │  exp(-iHt) │ symmetry, ...     │
//! ├────────────┴────────────┴───────────────────┤
//! │  numerics: expm, tridiagonal + Hermitian eig │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration management
//! - [`server`]: REST server and per-domain routes
//! - [`schrodinger`]: Grid Hamiltonians, spectra and stationary evolution
//! - [`dynamics`]: Schrödinger, Heisenberg and Ehrenfest pictures
//! - [`operators`]: Observables, measurement probabilities, basis changes
//! - [`spin`], [`symmetry`], [`variational`], [`wkb`]: Closed-form evaluators
//! - [`numerics`]: Dense linear-algebra kernels
//! - [`validation`]: Input validation utilities
//! - [`error`]: Error types

pub mod config;
pub mod dynamics;
pub mod error;
pub mod numerics;
pub mod operators;
pub mod schrodinger;
pub mod server;
pub mod spin;
pub mod symmetry;
pub mod validation;
pub mod variational;
pub mod wkb;

pub use config::Config;
pub use error::{Error, Result};

#[cfg(test)]
pub mod test_utils;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
