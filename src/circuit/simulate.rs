// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Truncated Fock-space simulation of an [`Ansatz`].
//!
//! The simulator interprets gate descriptors against a [`ParameterSet`]. It
//! owns no mutable state: every method is a pure function of its arguments.

use ndarray::{s, Array1, Array2};
use num_complex::Complex64;

use super::ansatz::Ansatz;
use super::gates::Gate;
use super::params::{ParamRef, ParameterSet};
use crate::fock::expm;
use crate::fock::operators::{diag, FockOperators};

/// Derivative of a gate `G` with respect to one of its parameters.
///
/// Every gate in the ansatz has a derivative of one of these three shapes,
/// which lets the adjoint gradient avoid differentiating a matrix
/// exponential.
#[derive(Debug, Clone)]
pub enum GateDerivative {
    /// `∂G = X · G` for a dense generator `X`.
    LeftGenerator(Array2<Complex64>),
    /// `∂G = diag(x) · G`.
    LeftDiagonal(Array1<Complex64>),
    /// `∂G = i·c·(n̂G − Gn̂)`.
    ///
    /// Phase arguments enter as `G(φ) = R(cφ) G(0) R(cφ)†` with
    /// `R(θ) = exp(iθ n̂)`, which holds exactly on the truncated space.
    NumberCommutator(f64),
}

/// Single-mode simulator on a Fock space truncated to `cutoff` levels.
#[derive(Debug, Clone)]
pub struct FockSimulator {
    ops: FockOperators,
}

impl FockSimulator {
    pub fn new(cutoff: usize) -> Self {
        Self {
            ops: FockOperators::new(cutoff),
        }
    }

    /// Truncation dimension D.
    pub fn cutoff(&self) -> usize {
        self.ops.cutoff()
    }

    pub fn operators(&self) -> &FockOperators {
        &self.ops
    }

    /// Dense `D × D` matrix of one gate.
    pub fn gate_unitary(&self, gate: &Gate, params: &ParameterSet) -> Array2<Complex64> {
        match *gate {
            Gate::Rotation { theta } => diag(&self.ops.diagonal_phase(params.get(theta), |n| n)),
            Gate::Kerr { kappa } => diag(&self.ops.diagonal_phase(params.get(kappa), |n| n * n)),
            Gate::Squeeze { r, phi } => {
                let generator = self.ops.squeeze_generator(params.get(phi));
                expm(&generator.mapv(|z| z * params.get(r)))
            }
            Gate::Displacement { r, phi } => {
                let generator = self.ops.displacement_generator(params.get(phi));
                expm(&generator.mapv(|z| z * params.get(r)))
            }
        }
    }

    /// Derivatives of `gate` with respect to each parameter it reads.
    pub fn gate_derivatives(
        &self,
        gate: &Gate,
        params: &ParameterSet,
    ) -> Vec<(ParamRef, GateDerivative)> {
        let i = Complex64::new(0.0, 1.0);
        match *gate {
            Gate::Rotation { theta } => vec![(
                theta,
                GateDerivative::LeftDiagonal(self.ops.number().mapv(|n| i * n)),
            )],
            Gate::Kerr { kappa } => vec![(
                kappa,
                GateDerivative::LeftDiagonal(self.ops.number().mapv(|n| i * n * n)),
            )],
            Gate::Squeeze { r, phi } => vec![
                (
                    r,
                    GateDerivative::LeftGenerator(self.ops.squeeze_generator(params.get(phi))),
                ),
                (phi, GateDerivative::NumberCommutator(0.5)),
            ],
            Gate::Displacement { r, phi } => vec![
                (
                    r,
                    GateDerivative::LeftGenerator(
                        self.ops.displacement_generator(params.get(phi)),
                    ),
                ),
                (phi, GateDerivative::NumberCommutator(1.0)),
            ],
        }
    }

    /// One unitary per gate, in application order.
    pub fn propagators(&self, ansatz: &Ansatz, params: &ParameterSet) -> Vec<Array2<Complex64>> {
        ansatz
            .gates()
            .iter()
            .map(|gate| self.gate_unitary(gate, params))
            .collect()
    }

    /// Full circuit unitary `U = G_n · … · G_1` (identity for an empty ansatz).
    pub fn circuit_unitary(&self, ansatz: &Ansatz, params: &ParameterSet) -> Array2<Complex64> {
        self.propagators(ansatz, params)
            .iter()
            .fold(Array2::eye(self.cutoff()), |acc, g| g.dot(&acc))
    }

    /// Input batch of the first `batch` number states, one per column
    /// (`D × batch`).
    ///
    /// # Panics
    /// Panics if `batch > D`.
    pub fn basis_inputs(&self, batch: usize) -> Array2<Complex64> {
        assert!(
            batch <= self.cutoff(),
            "batch size {batch} exceeds cutoff {}",
            self.cutoff()
        );
        Array2::<Complex64>::eye(self.cutoff())
            .slice(s![.., ..batch])
            .to_owned()
    }

    /// Apply the ansatz to every column of `inputs` (`D × batch`).
    pub fn evolve(
        &self,
        ansatz: &Ansatz,
        params: &ParameterSet,
        inputs: &Array2<Complex64>,
    ) -> Array2<Complex64> {
        ansatz
            .gates()
            .iter()
            .fold(inputs.to_owned(), |states, gate| {
                self.gate_unitary(gate, params).dot(&states)
            })
    }
}
