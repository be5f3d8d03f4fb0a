// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Layered single-mode ansatz.
//!
//! Each layer is `R(θ₁) → S(r, φ) → R(θ₂) → D(r, φ) → K(κ)`. With enough
//! layers this gate set generates any unitary on the truncated space
//! (Lloyd & Braunstein 1999; Arrazola et al. 2019, Quantum Sci. Technol. 4,
//! 024004).

use super::gates::Gate;
use super::params::{ParamKind, ParamRef};

/// Gates per layer.
pub const GATES_PER_LAYER: usize = 5;

/// The five gates of layer `layer`.
pub fn layer(layer: usize) -> [Gate; GATES_PER_LAYER] {
    let p = |kind| ParamRef::new(kind, layer);
    [
        Gate::Rotation {
            theta: p(ParamKind::Rotation1),
        },
        Gate::Squeeze {
            r: p(ParamKind::SqueezeR),
            phi: p(ParamKind::SqueezePhi),
        },
        Gate::Rotation {
            theta: p(ParamKind::Rotation2),
        },
        Gate::Displacement {
            r: p(ParamKind::DisplacementR),
            phi: p(ParamKind::DisplacementPhi),
        },
        Gate::Kerr {
            kappa: p(ParamKind::Kerr),
        },
    ]
}

/// A fixed-depth stack of layers, flattened into the order gates act.
#[derive(Debug, Clone)]
pub struct Ansatz {
    depth: usize,
    gates: Vec<Gate>,
}

impl Ansatz {
    pub fn new(depth: usize) -> Self {
        let gates = (0..depth).flat_map(layer).collect();
        Self { depth, gates }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Gates in application order (first element acts first).
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Number of scalar parameters the ansatz reads.
    pub fn num_parameters(&self) -> usize {
        self.depth * ParamKind::ALL.len()
    }
}
