// Copyright 2026 QM Playground Contributors
// SPDX-License-Identifier: Apache-2.0

//! Grid spectrum engine for the 1-D Schrödinger equation.
//!
//! - [`Grid`]: uniform spatial grid
//! - [`Potential`]: harmonic, square well, barrier, or free
//! - [`solve_spectrum`]: lowest bound states of the tridiagonal Hamiltonian
//! - [`density_frames`]: eigenbasis time evolution of `|ψ(x, t)|²`

pub mod evolution;
pub mod grid;
pub mod potential;
pub mod spectrum;

pub use evolution::{density_frames, InitialState, EVOLUTION_BASIS_SIZE};
pub use grid::Grid;
pub use potential::{Potential, PotentialParams};
pub use spectrum::{solve_spectrum, Spectrum};
