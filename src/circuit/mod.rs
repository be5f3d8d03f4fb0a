// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Parameterized single-mode circuits.
//!
//! The ansatz is declarative: [`Ansatz`] is an ordered list of [`Gate`]
//! descriptors whose arguments point into a [`ParameterSet`], and a single
//! interpreter, [`FockSimulator`], turns it into matrices. Changing the
//! layer structure never touches simulation code.

pub mod ansatz;
pub mod gates;
pub mod params;
pub mod simulate;

pub use ansatz::Ansatz;
pub use gates::Gate;
pub use params::{ParamKind, ParamRef, ParamRole, ParameterSet};
pub use simulate::{FockSimulator, GateDerivative};
