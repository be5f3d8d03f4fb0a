// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Matrix exponential for truncated gate generators.
//!
//! Scaling-and-squaring with a diagonal Padé(13) approximant (Higham 2005,
//! Algorithm 2.3). Gate generators in this crate are anti-Hermitian and
//! small (D ≲ 40), so no balancing or lower-order approximants are used.

use ndarray::Array2;
use num_complex::Complex64;

/// θ₁₃ from Higham (2005), Table 2.3: the largest 1-norm for which the
/// unscaled Padé(13) approximant is accurate to double precision.
const THETA_13: f64 = 5.371_920_351_148_152;

/// Coefficients b₀…b₁₃ of the Padé(13) numerator polynomial.
const B: [f64; 14] = [
    64_764_752_532_480_000.0,
    32_382_376_266_240_000.0,
    7_771_770_303_897_600.0,
    1_187_353_796_428_800.0,
    129_060_195_264_000.0,
    10_559_470_521_600.0,
    670_442_572_800.0,
    33_522_128_640.0,
    1_323_241_920.0,
    40_840_800.0,
    960_960.0,
    16_380.0,
    182.0,
    1.0,
];

/// Compute `exp(A)` for a square complex matrix.
///
/// If the Padé denominator turns out singular (never the case for the
/// anti-Hermitian generators used here) the result is filled with NaN so
/// the failure surfaces as a non-finite cost instead of a wrong gate.
///
/// # Panics
/// Panics if `a` is not square.
pub fn expm(a: &Array2<Complex64>) -> Array2<Complex64> {
    let n = a.nrows();
    assert_eq!(n, a.ncols(), "expm requires a square matrix");

    match n {
        0 => return Array2::zeros((0, 0)),
        1 => return Array2::from_elem((1, 1), a[[0, 0]].exp()),
        _ => {}
    }

    let norm = one_norm(a);
    if !norm.is_finite() {
        return Array2::from_elem((n, n), Complex64::new(f64::NAN, f64::NAN));
    }
    let squarings = if norm > THETA_13 {
        (norm / THETA_13).log2().ceil() as i32
    } else {
        0
    };

    let scaled = a.mapv(|z| z * 2f64.powi(-squarings));
    let mut result = pade13(&scaled);
    for _ in 0..squarings {
        result = result.dot(&result);
    }
    result
}

/// Padé(13) approximant r₁₃(A) = q(A)⁻¹ p(A) with p(A) = V + U, q(A) = V − U.
fn pade13(a: &Array2<Complex64>) -> Array2<Complex64> {
    let n = a.nrows();
    let eye = Array2::<Complex64>::eye(n);
    let a2 = a.dot(a);
    let a4 = a2.dot(&a2);
    let a6 = a4.dot(&a2);

    let poly = |c6: f64, c4: f64, c2: f64, c0: f64| -> Array2<Complex64> {
        a6.mapv(|z| z * c6) + a4.mapv(|z| z * c4) + a2.mapv(|z| z * c2) + eye.mapv(|z| z * c0)
    };

    let u_inner = a6.dot(&poly(B[13], B[11], B[9], 0.0)) + poly(B[7], B[5], B[3], B[1]);
    let u = a.dot(&u_inner);
    let v = a6.dot(&poly(B[12], B[10], B[8], 0.0)) + poly(B[6], B[4], B[2], B[0]);

    lu_solve(&v - &u, &v + &u)
        .unwrap_or_else(|| Array2::from_elem((n, n), Complex64::new(f64::NAN, f64::NAN)))
}

/// Solve `lhs · X = rhs` by LU factorization with partial pivoting.
///
/// Returns `None` when a pivot vanishes.
fn lu_solve(mut lhs: Array2<Complex64>, mut rhs: Array2<Complex64>) -> Option<Array2<Complex64>> {
    let n = lhs.nrows();
    let m = rhs.ncols();

    for k in 0..n {
        let pivot_row = (k..n)
            .max_by(|&i, &j| lhs[[i, k]].norm().total_cmp(&lhs[[j, k]].norm()))
            .unwrap_or(k);
        if lhs[[pivot_row, k]].norm() < f64::EPSILON * 1e-3 {
            return None;
        }
        if pivot_row != k {
            for j in 0..n {
                lhs.swap([k, j], [pivot_row, j]);
            }
            for j in 0..m {
                rhs.swap([k, j], [pivot_row, j]);
            }
        }

        let pivot = lhs[[k, k]];
        for i in (k + 1)..n {
            let factor = lhs[[i, k]] / pivot;
            if factor == Complex64::new(0.0, 0.0) {
                continue;
            }
            for j in k..n {
                let upper = lhs[[k, j]];
                lhs[[i, j]] -= factor * upper;
            }
            for j in 0..m {
                let upper = rhs[[k, j]];
                rhs[[i, j]] -= factor * upper;
            }
        }
    }

    for k in (0..n).rev() {
        let pivot = lhs[[k, k]];
        for j in 0..m {
            let mut acc = rhs[[k, j]];
            for l in (k + 1)..n {
                acc -= lhs[[k, l]] * rhs[[l, j]];
            }
            rhs[[k, j]] = acc / pivot;
        }
    }
    Some(rhs)
}

/// Maximum absolute column sum.
fn one_norm(a: &Array2<Complex64>) -> f64 {
    a.columns()
        .into_iter()
        .map(|col| col.iter().map(|z| z.norm()).sum::<f64>())
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fock::operators::dagger;
    use crate::test_utils::assert_matrix_close;
    use approx::assert_relative_eq;

    #[test]
    fn test_expm_of_zero_is_identity() {
        let zero = Array2::<Complex64>::zeros((5, 5));
        assert_matrix_close(&expm(&zero), &Array2::eye(5), 1e-14);
    }

    #[test]
    fn test_expm_diagonal_phases() {
        let mut a = Array2::<Complex64>::zeros((3, 3));
        for k in 0..3 {
            a[[k, k]] = Complex64::new(0.0, 0.7 * k as f64);
        }
        let u = expm(&a);
        for k in 0..3 {
            let expected = Complex64::from_polar(1.0, 0.7 * k as f64);
            assert!((u[[k, k]] - expected).norm() < 1e-13);
        }
        assert!(u[[0, 2]].norm() < 1e-14);
    }

    #[test]
    fn test_expm_matches_rotation_formula() {
        // exp(θ(|0⟩⟨1| − |1⟩⟨0|)) is a real rotation by θ
        let theta = 0.9;
        let mut a = Array2::<Complex64>::zeros((2, 2));
        a[[0, 1]] = Complex64::new(theta, 0.0);
        a[[1, 0]] = Complex64::new(-theta, 0.0);
        let u = expm(&a);
        assert_relative_eq!(u[[0, 0]].re, theta.cos(), epsilon = 1e-13);
        assert_relative_eq!(u[[0, 1]].re, theta.sin(), epsilon = 1e-13);
        assert_relative_eq!(u[[1, 0]].re, -theta.sin(), epsilon = 1e-13);
    }

    #[test]
    fn test_expm_scalar_case() {
        let a = Array2::from_elem((1, 1), Complex64::new(0.5, -1.5));
        let u = expm(&a);
        assert!((u[[0, 0]] - Complex64::new(0.5, -1.5).exp()).norm() < 1e-14);
    }

    #[test]
    fn test_expm_large_anti_hermitian_stays_unitary() {
        // Norm well above θ₁₃ forces several squarings
        let n = 8;
        let mut a = Array2::<Complex64>::zeros((n, n));
        for k in 0..n - 1 {
            let w = 3.0 * ((k + 1) as f64).sqrt();
            a[[k, k + 1]] = Complex64::new(w, 0.0);
            a[[k + 1, k]] = Complex64::new(-w, 0.0);
        }
        let u = expm(&a);
        let product = dagger(&u).dot(&u);
        assert_matrix_close(&product, &Array2::eye(n), 1e-10);
    }

    #[test]
    fn test_expm_real_growth() {
        let mut a = Array2::<Complex64>::zeros((2, 2));
        a[[0, 0]] = Complex64::new(20.0, 0.0);
        a[[1, 1]] = Complex64::new(-20.0, 0.0);
        let u = expm(&a);
        assert_relative_eq!(u[[0, 0]].re, 20f64.exp(), max_relative = 1e-10);
        assert_relative_eq!(u[[1, 1]].re, (-20f64).exp(), max_relative = 1e-8);
    }

    #[test]
    fn test_lu_solve_singular_returns_none() {
        let lhs = Array2::<Complex64>::zeros((2, 2));
        let rhs = Array2::<Complex64>::eye(2);
        assert!(lu_solve(lhs, rhs).is_none());
    }

    #[test]
    fn test_expm_infinite_input_is_nan() {
        let mut a = Array2::<Complex64>::zeros((3, 3));
        a[[0, 1]] = Complex64::new(f64::INFINITY, 0.0);
        let u = expm(&a);
        assert!(u.iter().all(|z| z.re.is_nan()));
    }
}
