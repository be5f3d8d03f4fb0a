// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Shared test utilities for synthesis tests.

use ndarray::Array2;
use num_complex::Complex64;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::circuit::ParameterSet;
use crate::synthesis::types::SynthesisConfig;

/// Assert element-wise closeness of two complex matrices.
pub fn assert_matrix_close(a: &Array2<Complex64>, b: &Array2<Complex64>, tol: f64) {
    assert_eq!(a.shape(), b.shape(), "shape mismatch");
    for ((i, j), val) in a.indexed_iter() {
        let diff = (val - b[[i, j]]).norm();
        assert!(
            diff < tol,
            "Mismatch at ({}, {}): {:?} vs {:?} (diff={})",
            i,
            j,
            val,
            b[[i, j]],
            diff
        );
    }
}

/// Seeded random parameters with moderate spread, large enough that every
/// gate is far from the identity.
pub fn random_parameters(depth: usize, seed: u64) -> ParameterSet {
    let mut rng = StdRng::seed_from_u64(seed);
    ParameterSet::random(depth, 0.1, 0.5, &mut rng).expect("valid standard deviations")
}

/// Small, fast configuration for loop-level tests.
pub fn small_config() -> SynthesisConfig {
    SynthesisConfig {
        cutoff: 6,
        gate_cutoff: 2,
        depth: 4,
        iterations: 50,
        learning_rate: 0.025,
        active_sd: 0.001,
        passive_sd: 0.1,
        log_interval: 10,
        seed: 1234,
    }
}

/// Diagonal unitary `diag(e^{iφ_k})`.
pub fn phase_unitary(phases: &[f64]) -> Array2<Complex64> {
    let mut u = Array2::zeros((phases.len(), phases.len()));
    for (k, &phi) in phases.iter().enumerate() {
        u[[k, k]] = Complex64::from_polar(1.0, phi);
    }
    u
}
