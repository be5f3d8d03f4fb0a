// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Synthesis configuration and result types.

use ndarray::Array2;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::circuit::ParameterSet;

/// Configuration for a unitary synthesis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesisConfig {
    /// Fock-space truncation dimension D.
    #[serde(default = "default_cutoff")]
    pub cutoff: usize,

    /// Dimension d of the subspace the target acts on (d ≤ D).
    #[serde(default = "default_gate_cutoff")]
    pub gate_cutoff: usize,

    /// Number of ansatz layers.
    #[serde(default = "default_depth")]
    pub depth: usize,

    /// Number of optimizer steps.
    #[serde(default = "default_iterations")]
    pub iterations: usize,

    /// Adam learning rate.
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,

    /// Initialization spread of squeezing, displacement and Kerr magnitudes.
    #[serde(default = "default_active_sd")]
    pub active_sd: f64,

    /// Initialization spread of rotation and phase parameters.
    #[serde(default = "default_passive_sd")]
    pub passive_sd: f64,

    /// Emit a progress line every this many iterations (0 disables).
    #[serde(default = "default_log_interval")]
    pub log_interval: usize,

    /// Seed for parameter initialization and random targets.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            cutoff: default_cutoff(),
            gate_cutoff: default_gate_cutoff(),
            depth: default_depth(),
            iterations: default_iterations(),
            learning_rate: default_learning_rate(),
            active_sd: default_active_sd(),
            passive_sd: default_passive_sd(),
            log_interval: default_log_interval(),
            seed: default_seed(),
        }
    }
}

impl SynthesisConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> crate::error::Result<()> {
        crate::validation::validate_synthesis_fields(self)
    }
}

fn default_cutoff() -> usize {
    10
}

fn default_gate_cutoff() -> usize {
    4
}

fn default_depth() -> usize {
    25
}

fn default_iterations() -> usize {
    1000
}

fn default_learning_rate() -> f64 {
    0.025
}

fn default_active_sd() -> f64 {
    0.001
}

fn default_passive_sd() -> f64 {
    0.1
}

fn default_log_interval() -> usize {
    100
}

fn default_seed() -> u64 {
    42
}

/// Cost and overlaps recorded for one optimizer step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IterationRecord {
    /// Zero-based step index.
    pub iteration: usize,
    /// `Σ |overlap_i − 1|`.
    pub cost: f64,
    /// Mean of the real overlaps.
    pub mean_overlap: f64,
    /// Real overlap per input basis state.
    pub overlaps: Vec<f64>,
}

/// Result of a synthesis run.
#[derive(Debug, Clone)]
pub struct SynthesisResult {
    /// Parameters after the final optimizer step.
    pub parameters: ParameterSet,
    /// One record per iteration.
    pub history: Vec<IterationRecord>,
    /// Output batch of the final iteration (`D × d`, one column per input).
    pub outputs: Array2<Complex64>,
    /// Target restricted to the subspace (`d × d`).
    pub target: Array2<Complex64>,
    /// Learned action on the subspace (`d × d`).
    pub learned: Array2<Complex64>,
    /// Entanglement-based process fidelity between target and learned.
    pub process_fidelity: f64,
    /// Mean probability leaving the subspace.
    pub leakage: f64,
    /// Number of iterations executed.
    pub iterations: usize,
}

impl SynthesisResult {
    /// Cost per iteration.
    pub fn cost_history(&self) -> Vec<f64> {
        self.history.iter().map(|r| r.cost).collect()
    }

    /// Mean overlap per iteration.
    pub fn mean_overlap_history(&self) -> Vec<f64> {
        self.history.iter().map(|r| r.mean_overlap).collect()
    }

    /// Record of the last iteration.
    pub fn final_record(&self) -> Option<&IterationRecord> {
        self.history.last()
    }
}
