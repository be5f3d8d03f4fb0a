// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Overlap-based synthesis cost.
//!
//! For input `|i⟩` with output `|ψ_i⟩` and target column `|t_i⟩`:
//!
//!   overlap_i = Re ⟨t_i | ψ_i⟩,   cost = Σ_i |overlap_i − 1|
//!
//! The cost is linear in the deviation and uses only the real part, so it
//! penalizes phase and magnitude errors of every column at once. It is not
//! the squared-magnitude gate fidelity and is not meant to be.

use ndarray::Array2;
use num_complex::Complex64;

/// Real overlaps `Re⟨t_i|ψ_i⟩` between matching columns.
///
/// `outputs` and `target_columns` are both `D × d`.
///
/// # Panics
/// Panics if the shapes differ.
pub fn overlaps(outputs: &Array2<Complex64>, target_columns: &Array2<Complex64>) -> Vec<f64> {
    assert_eq!(
        outputs.shape(),
        target_columns.shape(),
        "output batch and target columns must have the same shape"
    );
    outputs
        .columns()
        .into_iter()
        .zip(target_columns.columns())
        .map(|(psi, t)| {
            psi.iter()
                .zip(t.iter())
                .map(|(p, t)| t.conj() * p)
                .sum::<Complex64>()
                .re
        })
        .collect()
}

/// `Σ |overlap_i − 1|`.
pub fn cost(overlaps: &[f64]) -> f64 {
    overlaps.iter().map(|o| (o - 1.0).abs()).sum()
}

/// Arithmetic mean of the overlaps (0 for an empty batch).
pub fn mean_overlap(overlaps: &[f64]) -> f64 {
    if overlaps.is_empty() {
        return 0.0;
    }
    overlaps.iter().sum::<f64>() / overlaps.len() as f64
}

/// `∂cost/∂overlap_i = sign(overlap_i − 1)`, zero at exactly 1.
pub fn cost_signs(overlaps: &[f64]) -> Vec<f64> {
    overlaps
        .iter()
        .map(|&o| {
            let dev = o - 1.0;
            if dev > 0.0 {
                1.0
            } else if dev < 0.0 {
                -1.0
            } else {
                0.0
            }
        })
        .collect()
}
