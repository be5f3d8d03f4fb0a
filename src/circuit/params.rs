// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Trainable parameters of the layered ansatz.

use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

/// Whether a parameter changes the energy of the mode.
///
/// Active parameters (squeezing, displacement, Kerr) pump photons into the
/// mode and start close to zero so the state stays inside the truncation.
/// Passive parameters are phases and start with a wider spread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamRole {
    Active,
    Passive,
}

/// One of the seven per-layer parameter arrays, in layer order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKind {
    Rotation1,
    SqueezeR,
    SqueezePhi,
    Rotation2,
    DisplacementR,
    DisplacementPhi,
    Kerr,
}

impl ParamKind {
    /// All kinds in storage order.
    pub const ALL: [ParamKind; 7] = [
        ParamKind::Rotation1,
        ParamKind::SqueezeR,
        ParamKind::SqueezePhi,
        ParamKind::Rotation2,
        ParamKind::DisplacementR,
        ParamKind::DisplacementPhi,
        ParamKind::Kerr,
    ];

    /// Row of this kind in a [`ParameterSet`].
    pub fn index(self) -> usize {
        match self {
            ParamKind::Rotation1 => 0,
            ParamKind::SqueezeR => 1,
            ParamKind::SqueezePhi => 2,
            ParamKind::Rotation2 => 3,
            ParamKind::DisplacementR => 4,
            ParamKind::DisplacementPhi => 5,
            ParamKind::Kerr => 6,
        }
    }

    pub fn role(self) -> ParamRole {
        match self {
            ParamKind::SqueezeR | ParamKind::DisplacementR | ParamKind::Kerr => ParamRole::Active,
            ParamKind::Rotation1
            | ParamKind::SqueezePhi
            | ParamKind::Rotation2
            | ParamKind::DisplacementPhi => ParamRole::Passive,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ParamKind::Rotation1 => "r1",
            ParamKind::SqueezeR => "sq_r",
            ParamKind::SqueezePhi => "sq_phi",
            ParamKind::Rotation2 => "r2",
            ParamKind::DisplacementR => "d_r",
            ParamKind::DisplacementPhi => "d_phi",
            ParamKind::Kerr => "kappa",
        }
    }
}

impl std::fmt::Display for ParamKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Reference to one scalar parameter: a kind and a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParamRef {
    pub kind: ParamKind,
    pub layer: usize,
}

impl ParamRef {
    pub fn new(kind: ParamKind, layer: usize) -> Self {
        Self { kind, layer }
    }
}

/// All trainable parameters: one array of length `depth` per [`ParamKind`].
///
/// Stored flat, kind-major, so optimizers and gradients can work on a plain
/// `&[f64]` with the same layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSet {
    depth: usize,
    values: Vec<f64>,
}

impl ParameterSet {
    /// All parameters zero: every gate is the identity.
    pub fn zeros(depth: usize) -> Self {
        Self {
            depth,
            values: vec![0.0; ParamKind::ALL.len() * depth],
        }
    }

    /// Independent zero-mean normal draws, `active_sd` for energy-changing
    /// parameters and `passive_sd` for phases.
    ///
    /// Standard deviations must be finite and non-negative.
    pub fn random<R: Rng + ?Sized>(
        depth: usize,
        active_sd: f64,
        passive_sd: f64,
        rng: &mut R,
    ) -> Result<Self, String> {
        for (name, sd) in [("active", active_sd), ("passive", passive_sd)] {
            if !(sd.is_finite() && sd >= 0.0) {
                return Err(format!(
                    "{name} standard deviation must be finite and >= 0, got {sd}"
                ));
            }
        }
        let active = Normal::new(0.0, active_sd)
            .map_err(|e| format!("invalid active standard deviation {active_sd}: {e}"))?;
        let passive = Normal::new(0.0, passive_sd)
            .map_err(|e| format!("invalid passive standard deviation {passive_sd}: {e}"))?;

        let mut params = Self::zeros(depth);
        for kind in ParamKind::ALL {
            let dist = match kind.role() {
                ParamRole::Active => &active,
                ParamRole::Passive => &passive,
            };
            for value in params.kind_values_mut(kind) {
                *value = dist.sample(rng);
            }
        }
        Ok(params)
    }

    /// Build from explicit values in flat kind-major layout.
    pub fn from_flat(depth: usize, values: Vec<f64>) -> Result<Self, String> {
        let expected = ParamKind::ALL.len() * depth;
        if values.len() != expected {
            return Err(format!(
                "expected {expected} parameters for depth {depth}, got {}",
                values.len()
            ));
        }
        Ok(Self { depth, values })
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Flat index of a parameter.
    pub fn offset(&self, p: ParamRef) -> usize {
        debug_assert!(p.layer < self.depth, "layer {} out of range", p.layer);
        p.kind.index() * self.depth + p.layer
    }

    pub fn get(&self, p: ParamRef) -> f64 {
        self.values[self.offset(p)]
    }

    pub fn set(&mut self, p: ParamRef, value: f64) {
        let offset = self.offset(p);
        self.values[offset] = value;
    }

    /// The per-layer array of one kind.
    pub fn kind_values(&self, kind: ParamKind) -> &[f64] {
        let start = kind.index() * self.depth;
        &self.values[start..start + self.depth]
    }

    pub fn kind_values_mut(&mut self, kind: ParamKind) -> &mut [f64] {
        let start = kind.index() * self.depth;
        &mut self.values[start..start + self.depth]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.values
    }

    /// True if every value is finite.
    pub fn is_finite(&self) -> bool {
        self.values.iter().all(|v| v.is_finite())
    }
}
