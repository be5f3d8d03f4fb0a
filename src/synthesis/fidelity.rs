// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Post-optimization diagnostics on the `d`-level subspace.

use ndarray::linalg::kron;
use ndarray::{s, Array1, Array2};
use num_complex::Complex64;

/// Leading `d × d` block of an output batch: the learned gate restricted to
/// the target subspace.
pub fn learned_unitary(outputs: &Array2<Complex64>, d: usize) -> Array2<Complex64> {
    outputs.slice(s![..d, ..d]).to_owned()
}

/// Entanglement-based process fidelity `|⟨(I⊗T)Φ | (I⊗L)Φ⟩|²`.
///
/// `Φ = Σ_j |j⟩|j⟩ / √d` is the maximally entangled state on two copies of
/// the subspace. Equals `|Tr(T†L)|² / d²`; 1 iff `L = T` up to a global
/// phase when both are unitary.
///
/// # Panics
/// Panics if the matrices are not square of the same size.
pub fn process_fidelity(target: &Array2<Complex64>, learned: &Array2<Complex64>) -> f64 {
    assert_eq!(target.shape(), learned.shape(), "shape mismatch");
    assert_eq!(target.nrows(), target.ncols(), "matrices must be square");

    let d = target.nrows();
    if d == 0 {
        return 0.0;
    }
    let phi = maximally_entangled(d);
    let eye = Array2::<Complex64>::eye(d);
    let target_state = kron(&eye, target).dot(&phi);
    let learned_state = kron(&eye, learned).dot(&phi);

    target_state
        .iter()
        .zip(learned_state.iter())
        .map(|(t, l)| t.conj() * l)
        .sum::<Complex64>()
        .norm_sqr()
}

/// Mean probability outside the first `d` levels across the batch columns.
pub fn subspace_leakage(outputs: &Array2<Complex64>, d: usize) -> f64 {
    let batch = outputs.ncols();
    if batch == 0 {
        return 0.0;
    }
    let outside: f64 = outputs
        .slice(s![d.., ..])
        .iter()
        .map(|z| z.norm_sqr())
        .sum();
    outside / batch as f64
}

fn maximally_entangled(d: usize) -> Array1<Complex64> {
    let amp = Complex64::new(1.0 / (d as f64).sqrt(), 0.0);
    let mut phi = Array1::zeros(d * d);
    for j in 0..d {
        phi[j * d + j] = amp;
    }
    phi
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fock::operators::dagger;
    use crate::synthesis::target::{embed_target, fourier_unitary, haar_random_unitary};
    use crate::test_utils::phase_unitary;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_identical_unitaries_have_unit_fidelity() {
        let u = haar_random_unitary(4, &mut StdRng::seed_from_u64(3));
        assert_relative_eq!(process_fidelity(&u, &u), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_global_phase_is_ignored() {
        let u = fourier_unitary(3);
        let shifted = u.mapv(|z| z * Complex64::from_polar(1.0, 0.7));
        assert_relative_eq!(process_fidelity(&u, &shifted), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_matches_trace_formula() {
        let mut rng = StdRng::seed_from_u64(11);
        let t = haar_random_unitary(3, &mut rng);
        let l = haar_random_unitary(3, &mut rng);
        let trace: Complex64 = dagger(&t).dot(&l).diag().sum();
        let expected = trace.norm_sqr() / 9.0;
        assert_relative_eq!(process_fidelity(&t, &l), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_orthogonal_phases() {
        // diag(1, −1) against the identity: Tr = 0
        let z = phase_unitary(&[0.0, std::f64::consts::PI]);
        let eye = Array2::<Complex64>::eye(2);
        assert!(process_fidelity(&eye, &z) < 1e-24);
    }

    #[test]
    fn test_learned_unitary_and_leakage() {
        let block = fourier_unitary(2);
        let full = embed_target(&block, 5);
        let outputs = full.slice(s![.., ..2]).to_owned();
        assert_eq!(learned_unitary(&outputs, 2), block);
        assert_eq!(subspace_leakage(&outputs, 2), 0.0);
    }

    #[test]
    fn test_leakage_counts_population_outside() {
        let mut outputs = Array2::<Complex64>::zeros((4, 2));
        outputs[[0, 0]] = Complex64::new(1.0, 0.0);
        outputs[[1, 1]] = Complex64::new(0.6, 0.0);
        outputs[[3, 1]] = Complex64::new(0.0, 0.8);
        assert_relative_eq!(subspace_leakage(&outputs, 2), 0.32, epsilon = 1e-12);
    }
}
