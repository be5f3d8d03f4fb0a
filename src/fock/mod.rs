// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Truncated Fock-space primitives for a single bosonic mode.
//!
//! A mode truncated to `D` levels is represented by `D × D` complex matrices
//! in the number basis `|0⟩, |1⟩, …, |D−1⟩`. Gates are generated by
//! exponentiating truncated anti-Hermitian generators, so every gate is
//! exactly unitary on the truncated space (the same convention QuTiP uses
//! for `displace(N, α)` and `squeeze(N, z)`).
//!
//! - [`FockOperators`]: cached ladder and number operators
//! - [`expm`]: matrix exponential via scaling-and-squaring + Padé(13)
//!
//! # References
//!
//! - Higham (2005), "The Scaling and Squaring Method for the Matrix
//!   Exponential Revisited", SIAM J. Matrix Anal. Appl. 26(4), 1179.
//! - Killoran et al. (2019), "Strawberry Fields: A Software Platform for
//!   Photonic Quantum Computing", Quantum 3, 129.

pub mod expm;
pub mod operators;

pub use expm::expm;
pub use operators::FockOperators;
