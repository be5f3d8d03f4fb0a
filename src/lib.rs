// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! QubitOS Gate Synthesis
//!
//! Learns a circuit of continuous-variable gates that implements a target
//! unitary on the lowest `d` Fock levels of a single bosonic mode.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │        CLI (qubit-os-synth)              │
//! ├──────────────────┬──────────────────────┤
//! │   Config (YAML)  │   Report (JSON)      │
//! ├──────────────────┴──────────────────────┤
//! │         UnitarySynthesizer               │
//! │   cost · adjoint gradient · Adam         │
//! ├────────────────┬────────────────────────┤
//! │ Layer ansatz   │  Fock simulator        │
//! │ R·S·R·D·K      │  (truncated, expm)     │
//! └────────────────┴────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`circuit`]: Gate descriptors, layered ansatz and simulator
//! - [`fock`]: Truncated ladder operators and matrix exponential
//! - [`synthesis`]: Cost, gradient, optimizer and fidelity
//! - [`report`]: JSON report and console summary
//! - [`config`]: Configuration management
//! - [`validation`]: Input validation utilities
//! - [`error`]: Error types

pub mod circuit;
pub mod config;
pub mod error;
pub mod fock;
pub mod report;
pub mod synthesis;
pub mod validation;

pub use config::Config;
pub use error::{Error, Result};

#[cfg(test)]
pub mod test_utils;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
