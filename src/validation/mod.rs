// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Input validation for synthesis requests.

use ndarray::Array2;
use num_complex::Complex64;

use crate::config::ResourceLimits;
use crate::error::{Result, ValidationError};
use crate::synthesis::SynthesisConfig;

/// Check that `m` is square and `‖M†M − I‖_max ≤ tol`.
pub fn validate_unitary(m: &Array2<Complex64>, tol: f64) -> Result<()> {
    let (rows, cols) = m.dim();
    if rows != cols {
        return Err(ValidationError::PhysicsConstraint(format!(
            "unitary must be square, got {rows} × {cols}"
        ))
        .into());
    }

    if let Some((idx, _)) = m.indexed_iter().find(|(_, z)| !(z.re.is_finite() && z.im.is_finite())) {
        return Err(ValidationError::PhysicsConstraint(format!(
            "matrix contains a non-finite entry at {idx:?}"
        ))
        .into());
    }

    let gram = m.t().mapv(|z| z.conj()).dot(m);
    let deviation = gram
        .indexed_iter()
        .map(|((i, j), z)| {
            let expected = if i == j { 1.0 } else { 0.0 };
            (z - Complex64::new(expected, 0.0)).norm()
        })
        .fold(0.0, f64::max);

    if deviation > tol {
        return Err(ValidationError::PhysicsConstraint(format!(
            "matrix is not unitary: max |U†U − I| = {deviation:.3e} exceeds {tol:.1e}"
        ))
        .into());
    }

    Ok(())
}

/// Validate synthesis parameters against resource limits.
pub fn validate_synthesis_config(config: &SynthesisConfig, limits: &ResourceLimits) -> Result<()> {
    validate_synthesis_fields(config)?;

    for (resource, limit, requested) in [
        ("cutoff", limits.max_cutoff, config.cutoff),
        ("depth", limits.max_depth, config.depth),
        ("iterations", limits.max_iterations, config.iterations),
    ] {
        if requested > limit {
            return Err(ValidationError::ResourceLimit {
                resource: resource.into(),
                limit: limit as u64,
                requested: requested as u64,
            }
            .into());
        }
    }

    Ok(())
}

/// Field checks on a synthesis config that hold regardless of limits.
pub fn validate_synthesis_fields(config: &SynthesisConfig) -> Result<()> {
    if config.cutoff == 0 {
        return Err(ValidationError::Field {
            field: "cutoff".into(),
            message: "must be greater than 0".into(),
        }
        .into());
    }

    if config.gate_cutoff == 0 {
        return Err(ValidationError::Field {
            field: "gate_cutoff".into(),
            message: "must be greater than 0".into(),
        }
        .into());
    }

    if config.gate_cutoff > config.cutoff {
        return Err(ValidationError::Field {
            field: "gate_cutoff".into(),
            message: format!("{} exceeds cutoff {}", config.gate_cutoff, config.cutoff),
        }
        .into());
    }

    if config.iterations == 0 {
        return Err(ValidationError::Field {
            field: "iterations".into(),
            message: "must be greater than 0".into(),
        }
        .into());
    }

    if !(config.learning_rate.is_finite() && config.learning_rate > 0.0) {
        return Err(ValidationError::Field {
            field: "learning_rate".into(),
            message: format!("must be positive and finite, got {}", config.learning_rate),
        }
        .into());
    }

    for (field, sd) in [
        ("active_sd", config.active_sd),
        ("passive_sd", config.passive_sd),
    ] {
        if !(sd.is_finite() && sd >= 0.0) {
            return Err(ValidationError::Field {
                field: field.into(),
                message: format!("must be finite and non-negative, got {sd}"),
            }
            .into());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::synthesis::target::fourier_unitary;

    #[test]
    fn test_validate_unitary() {
        assert!(validate_unitary(&Array2::eye(3), 1e-12).is_ok());
        assert!(validate_unitary(&fourier_unitary(4), 1e-12).is_ok());

        // Scaled identity
        let scaled = Array2::<Complex64>::eye(2).mapv(|z| z * 1.1);
        assert!(validate_unitary(&scaled, 1e-8).is_err());

        // Non-square
        let rect = Array2::<Complex64>::zeros((2, 3));
        let err = validate_unitary(&rect, 1e-8).unwrap_err();
        assert!(err.to_string().contains("square"));

        // NaN entry
        let mut nan = Array2::<Complex64>::eye(2);
        nan[[1, 0]] = Complex64::new(f64::NAN, 0.0);
        assert!(matches!(
            validate_unitary(&nan, 1e-8),
            Err(Error::Validation(ValidationError::PhysicsConstraint(_)))
        ));
    }

    #[test]
    fn test_validate_synthesis_config() {
        let limits = ResourceLimits::default();

        // Defaults are valid, depth 0 too
        assert!(validate_synthesis_config(&SynthesisConfig::default(), &limits).is_ok());
        let shallow = SynthesisConfig {
            depth: 0,
            ..Default::default()
        };
        assert!(validate_synthesis_config(&shallow, &limits).is_ok());

        // gate_cutoff > cutoff
        let wide = SynthesisConfig {
            gate_cutoff: 11,
            ..Default::default()
        };
        assert!(matches!(
            validate_synthesis_config(&wide, &limits),
            Err(Error::Validation(ValidationError::Field { .. }))
        ));

        // Negative spread
        let noisy = SynthesisConfig {
            passive_sd: -1.0,
            ..Default::default()
        };
        assert!(validate_synthesis_config(&noisy, &limits).is_err());
    }

    #[test]
    fn test_validate_synthesis_fields() {
        let empty = SynthesisConfig {
            cutoff: 0,
            gate_cutoff: 0,
            ..Default::default()
        };
        match validate_synthesis_fields(&empty) {
            Err(Error::Validation(ValidationError::Field { field, .. })) => {
                assert_eq!(field, "cutoff")
            }
            other => panic!("expected a cutoff field error, got {other:?}"),
        }

        // Field checks ignore resource limits
        let huge = SynthesisConfig {
            cutoff: 1000,
            ..Default::default()
        };
        assert!(validate_synthesis_fields(&huge).is_ok());
        assert!(validate_synthesis_config(&huge, &ResourceLimits::default()).is_err());
    }

    #[test]
    fn test_resource_limits() {
        let limits = ResourceLimits {
            max_cutoff: 8,
            max_depth: 10,
            max_iterations: 100,
        };
        let config = SynthesisConfig {
            cutoff: 16,
            gate_cutoff: 2,
            ..Default::default()
        };
        let err = validate_synthesis_config(&config, &limits).unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::ResourceLimit {
                limit: 8,
                requested: 16,
                ..
            })
        ));

        let config = SynthesisConfig {
            cutoff: 8,
            gate_cutoff: 2,
            depth: 10,
            iterations: 101,
            ..Default::default()
        };
        assert!(validate_synthesis_config(&config, &limits).is_err());
    }
}
