// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Ladder, number and generator matrices on a truncated Fock space.

use ndarray::{Array1, Array2};
use num_complex::Complex64;

/// Conjugate transpose.
pub fn dagger(m: &Array2<Complex64>) -> Array2<Complex64> {
    m.t().mapv(|z| z.conj())
}

/// Truncated annihilation operator: `a|n⟩ = √n |n−1⟩`.
pub fn annihilation(cutoff: usize) -> Array2<Complex64> {
    let mut a = Array2::zeros((cutoff, cutoff));
    for n in 1..cutoff {
        a[[n - 1, n]] = Complex64::new((n as f64).sqrt(), 0.0);
    }
    a
}

/// Operators of one mode truncated to `cutoff` levels, built once per
/// simulator and reused by every gate.
#[derive(Debug, Clone)]
pub struct FockOperators {
    cutoff: usize,
    a: Array2<Complex64>,
    a_dag: Array2<Complex64>,
    a_sq: Array2<Complex64>,
    a_dag_sq: Array2<Complex64>,
    number: Array1<f64>,
}

impl FockOperators {
    /// Build the operator cache for a mode with `cutoff` levels.
    pub fn new(cutoff: usize) -> Self {
        let a = annihilation(cutoff);
        let a_dag = dagger(&a);
        let a_sq = a.dot(&a);
        let a_dag_sq = a_dag.dot(&a_dag);
        let number = Array1::from_iter((0..cutoff).map(|n| n as f64));
        Self {
            cutoff,
            a,
            a_dag,
            a_sq,
            a_dag_sq,
            number,
        }
    }

    /// Truncation dimension D.
    pub fn cutoff(&self) -> usize {
        self.cutoff
    }

    /// Annihilation operator `a`.
    pub fn annihilation(&self) -> &Array2<Complex64> {
        &self.a
    }

    /// Creation operator `a†`.
    pub fn creation(&self) -> &Array2<Complex64> {
        &self.a_dag
    }

    /// Diagonal of the number operator `n̂ = a†a`: `[0, 1, …, D−1]`.
    pub fn number(&self) -> &Array1<f64> {
        &self.number
    }

    /// `exp(i·θ·f(n))` as a diagonal, for the phase-type gates.
    pub fn diagonal_phase(&self, theta: f64, f: impl Fn(f64) -> f64) -> Array1<Complex64> {
        self.number.mapv(|n| Complex64::from_polar(1.0, theta * f(n)))
    }

    /// Displacement generator `e^{iφ} a† − e^{-iφ} a` (unit magnitude).
    ///
    /// `D(r, φ) = exp(r · G)` with `G` this matrix.
    pub fn displacement_generator(&self, phi: f64) -> Array2<Complex64> {
        let up = Complex64::from_polar(1.0, phi);
        let down = Complex64::from_polar(1.0, -phi);
        self.a_dag.mapv(|z| z * up) - self.a.mapv(|z| z * down)
    }

    /// Squeezing generator `½(e^{-iφ} a² − e^{iφ} a†²)` (unit magnitude).
    ///
    /// `S(r, φ) = exp(r · G)` with `G` this matrix.
    pub fn squeeze_generator(&self, phi: f64) -> Array2<Complex64> {
        let down = Complex64::from_polar(0.5, -phi);
        let up = Complex64::from_polar(0.5, phi);
        self.a_sq.mapv(|z| z * down) - self.a_dag_sq.mapv(|z| z * up)
    }
}

/// Promote a diagonal to a dense matrix.
pub fn diag(values: &Array1<Complex64>) -> Array2<Complex64> {
    Array2::from_diag(values)
}
