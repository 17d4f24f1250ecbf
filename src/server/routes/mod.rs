// Copyright 2026 QM Playground Contributors
// SPDX-License-Identifier: Apache-2.0

//! Per-domain routers, nested under `/api/<domain>` by [`super::build_router`].

pub mod dynamics;
pub mod operators;
pub mod schrodinger;
pub mod spin;
pub mod symmetry;
pub mod variational;
pub mod wkb;
