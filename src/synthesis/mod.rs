// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Gradient-based synthesis of a target unitary on the lowest Fock levels.
//!
//! The layered ansatz from [`crate::circuit`] is applied to the number
//! states `|0⟩…|d−1⟩`. The cost
//!
//!   cost = Σ_i |Re⟨t_i|ψ_i⟩ − 1|
//!
//! compares each output with the matching target column and is minimized
//! with Adam. After the last step the leading `d × d` block of the output
//! batch is scored against the target with the entanglement-based process
//! fidelity.
//!
//! # Example
//!
//! ```no_run
//! use qubit_os_gate_synth::synthesis::{SynthesisConfig, TargetConfig, UnitarySynthesizer};
//!
//! let config = SynthesisConfig::default();
//! let target = TargetConfig::default().build(config.gate_cutoff, config.seed)?;
//! let result = UnitarySynthesizer::new(config)?.optimize(&target)?;
//! println!("process fidelity {:.4}", result.process_fidelity);
//! # Ok::<(), qubit_os_gate_synth::Error>(())
//! ```

pub mod adam;
pub mod cost;
pub mod fidelity;
pub mod gradient;
pub mod optimize;
pub mod target;
pub mod types;

pub use adam::{Adam, Optimizer};
pub use fidelity::{learned_unitary, process_fidelity, subspace_leakage};
pub use gradient::{cost_and_gradient, evaluate_cost, CostEvaluation};
pub use optimize::{RunState, SynthesisRun, UnitarySynthesizer};
pub use target::{embed_target, haar_random_unitary, TargetConfig};
pub use types::{IterationRecord, SynthesisConfig, SynthesisResult};
