// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Target unitaries on the `d`-level subspace.

use ndarray::{s, Array2};
use num_complex::Complex64;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::validation::validate_unitary;

/// Tolerance for accepting a user-supplied matrix as unitary.
pub const UNITARITY_TOLERANCE: f64 = 1e-8;

/// Where the target unitary comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TargetConfig {
    /// Haar-random unitary; `seed` falls back to the synthesis seed.
    HaarRandom {
        #[serde(default)]
        seed: Option<u64>,
    },
    /// Discrete Fourier transform on the subspace.
    Fourier,
    /// Identity on the subspace.
    Identity,
    /// Explicit matrix, row-major real and imaginary parts.
    Matrix {
        real: Vec<Vec<f64>>,
        #[serde(default)]
        imag: Vec<Vec<f64>>,
    },
}

impl Default for TargetConfig {
    fn default() -> Self {
        TargetConfig::HaarRandom { seed: None }
    }
}

impl TargetConfig {
    /// Build the `d × d` target block.
    pub fn build(&self, d: usize, default_seed: u64) -> Result<Array2<Complex64>> {
        let block = match self {
            TargetConfig::HaarRandom { seed } => {
                let mut rng = StdRng::seed_from_u64(seed.unwrap_or(default_seed));
                haar_random_unitary(d, &mut rng)
            }
            TargetConfig::Fourier => fourier_unitary(d),
            TargetConfig::Identity => Array2::eye(d),
            TargetConfig::Matrix { real, imag } => matrix_from_parts(real, imag, d)?,
        };
        validate_unitary(&block, UNITARITY_TOLERANCE)?;
        Ok(block)
    }
}

/// Haar-distributed `d × d` unitary.
///
/// Orthonormalizes the columns of a complex Ginibre matrix with modified
/// Gram–Schmidt, which is QR with a positive real diagonal in R, the phase
/// convention that makes the result Haar distributed (Mezzadri 2007).
pub fn haar_random_unitary<R: Rng + ?Sized>(d: usize, rng: &mut R) -> Array2<Complex64> {
    let scale = std::f64::consts::FRAC_1_SQRT_2;
    let mut q = Array2::from_shape_simple_fn((d, d), || {
        let re: f64 = StandardNormal.sample(&mut *rng);
        let im: f64 = StandardNormal.sample(&mut *rng);
        Complex64::new(re * scale, im * scale)
    });

    for j in 0..d {
        for k in 0..j {
            let projection: Complex64 = (0..d).map(|a| q[[a, k]].conj() * q[[a, j]]).sum();
            for a in 0..d {
                let component = q[[a, k]];
                q[[a, j]] -= projection * component;
            }
        }
        let norm = (0..d).map(|a| q[[a, j]].norm_sqr()).sum::<f64>().sqrt();
        for a in 0..d {
            q[[a, j]] /= norm;
        }
    }
    q
}

/// DFT matrix `F[j, k] = ω^{jk}/√d`, `ω = e^{2πi/d}`.
pub fn fourier_unitary(d: usize) -> Array2<Complex64> {
    let norm = 1.0 / (d as f64).sqrt();
    Array2::from_shape_fn((d, d), |(j, k)| {
        let angle = 2.0 * std::f64::consts::PI * (j * k) as f64 / d as f64;
        Complex64::from_polar(norm, angle)
    })
}

/// `D × D` identity with `block` in the leading corner.
///
/// # Panics
/// Panics if the block is larger than `cutoff`.
pub fn embed_target(block: &Array2<Complex64>, cutoff: usize) -> Array2<Complex64> {
    let d = block.nrows();
    assert!(d <= cutoff, "target block {d} larger than cutoff {cutoff}");
    let mut full = Array2::eye(cutoff);
    full.slice_mut(s![..d, ..d]).assign(block);
    full
}

/// First `d` columns of the embedded target (`D × d`).
pub fn target_columns(block: &Array2<Complex64>, cutoff: usize) -> Array2<Complex64> {
    let d = block.ncols();
    embed_target(block, cutoff).slice(s![.., ..d]).to_owned()
}

fn matrix_from_parts(real: &[Vec<f64>], imag: &[Vec<f64>], d: usize) -> Result<Array2<Complex64>> {
    let shape_error = |message: String| ValidationError::Field {
        field: "target".into(),
        message,
    };

    if real.len() != d || real.iter().any(|row| row.len() != d) {
        return Err(shape_error(format!("real part must be {d} × {d}")).into());
    }
    if !imag.is_empty() && (imag.len() != d || imag.iter().any(|row| row.len() != d)) {
        return Err(shape_error(format!("imag part must be empty or {d} × {d}")).into());
    }

    Ok(Array2::from_shape_fn((d, d), |(i, j)| {
        let im = imag.get(i).map_or(0.0, |row| row[j]);
        Complex64::new(real[i][j], im)
    }))
}
