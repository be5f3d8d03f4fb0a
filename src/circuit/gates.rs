// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Typed gate descriptors for a single-mode circuit.

use super::params::ParamRef;

/// A single-mode gate whose scalar arguments are references into a
/// [`ParameterSet`](super::params::ParameterSet).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// Phase rotation `R(θ) = exp(iθ n̂)`.
    Rotation { theta: ParamRef },
    /// Squeezing `S(r, φ) = exp(r/2 (e^{-iφ} a² − e^{iφ} a†²))`.
    Squeeze { r: ParamRef, phi: ParamRef },
    /// Displacement `D(r, φ) = exp(r (e^{iφ} a† − e^{-iφ} a))`.
    Displacement { r: ParamRef, phi: ParamRef },
    /// Kerr interaction `K(κ) = exp(iκ n̂²)`.
    Kerr { kappa: ParamRef },
}

impl Gate {
    /// Parameters this gate reads, in argument order.
    pub fn params(&self) -> Vec<ParamRef> {
        match *self {
            Gate::Rotation { theta } => vec![theta],
            Gate::Squeeze { r, phi } | Gate::Displacement { r, phi } => vec![r, phi],
            Gate::Kerr { kappa } => vec![kappa],
        }
    }

    /// Diagonal in the Fock basis.
    pub fn is_diagonal(&self) -> bool {
        matches!(self, Gate::Rotation { .. } | Gate::Kerr { .. })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Gate::Rotation { .. } => "R",
            Gate::Squeeze { .. } => "S",
            Gate::Displacement { .. } => "D",
            Gate::Kerr { .. } => "K",
        }
    }
}

impl std::fmt::Display for Gate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let args: Vec<String> = self
            .params()
            .iter()
            .map(|p| format!("{}[{}]", p.kind, p.layer))
            .collect();
        write!(f, "{}({})", self.name(), args.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::params::ParamKind;

    #[test]
    fn test_gate_params_order() {
        let gate = Gate::Squeeze {
            r: ParamRef::new(ParamKind::SqueezeR, 1),
            phi: ParamRef::new(ParamKind::SqueezePhi, 1),
        };
        let params = gate.params();
        assert_eq!(params[0].kind, ParamKind::SqueezeR);
        assert_eq!(params[1].kind, ParamKind::SqueezePhi);
        assert!(!gate.is_diagonal());
    }

    #[test]
    fn test_gate_display() {
        let gate = Gate::Kerr {
            kappa: ParamRef::new(ParamKind::Kerr, 3),
        };
        assert_eq!(gate.to_string(), "K(kappa[3])");
        assert!(gate.is_diagonal());
    }
}
