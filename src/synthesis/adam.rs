// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! First-order optimizers over the flat parameter vector.

/// Optimizer trait for parameter updates.
pub trait Optimizer {
    /// Update `params` in place using `gradients` of the cost.
    fn step(&mut self, params: &mut [f64], gradients: &[f64]);

    /// Reset optimizer state.
    fn reset(&mut self);

    /// Current learning rate.
    fn learning_rate(&self) -> f64;

    /// Set learning rate.
    fn set_learning_rate(&mut self, lr: f64);
}

/// Adam with bias-corrected moment estimates (Kingma & Ba 2015).
///
/// Moment buffers are sized on the first step, so one instance can be
/// created before the parameter count is known.
#[derive(Debug, Clone)]
pub struct Adam {
    lr: f64,
    beta1: f64,
    beta2: f64,
    epsilon: f64,
    m: Vec<f64>,
    v: Vec<f64>,
    t: u32,
}

impl Adam {
    /// Adam with β₁ = 0.9, β₂ = 0.999, ε = 1e-7.
    pub fn new(lr: f64) -> Self {
        Self {
            lr,
            beta1: 0.9,
            beta2: 0.999,
            epsilon: 1e-7,
            m: Vec::new(),
            v: Vec::new(),
            t: 0,
        }
    }

    pub fn with_betas(mut self, beta1: f64, beta2: f64) -> Self {
        self.beta1 = beta1;
        self.beta2 = beta2;
        self
    }

    pub fn with_epsilon(mut self, eps: f64) -> Self {
        self.epsilon = eps;
        self
    }

    /// Steps taken since creation or the last reset.
    pub fn timestep(&self) -> u32 {
        self.t
    }
}

impl Default for Adam {
    fn default() -> Self {
        Self::new(0.025)
    }
}

impl Optimizer for Adam {
    fn step(&mut self, params: &mut [f64], gradients: &[f64]) {
        debug_assert_eq!(params.len(), gradients.len());
        if self.m.len() != params.len() {
            self.m = vec![0.0; params.len()];
            self.v = vec![0.0; params.len()];
            self.t = 0;
        }

        self.t = self.t.saturating_add(1);
        let bias1 = 1.0 - self.beta1.powi(self.t as i32);
        let bias2 = 1.0 - self.beta2.powi(self.t as i32);

        for (i, (p, &g)) in params.iter_mut().zip(gradients).enumerate() {
            self.m[i] = self.beta1 * self.m[i] + (1.0 - self.beta1) * g;
            self.v[i] = self.beta2 * self.v[i] + (1.0 - self.beta2) * g * g;

            let m_hat = self.m[i] / bias1;
            let v_hat = self.v[i] / bias2;
            *p -= self.lr * m_hat / (v_hat.sqrt() + self.epsilon);
        }
    }

    fn reset(&mut self) {
        self.m.fill(0.0);
        self.v.fill(0.0);
        self.t = 0;
    }

    fn learning_rate(&self) -> f64 {
        self.lr
    }

    fn set_learning_rate(&mut self, lr: f64) {
        self.lr = lr;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_first_step_moves_by_learning_rate() {
        // Bias correction makes the first step ≈ lr · sign(g)
        let mut adam = Adam::new(0.1);
        let mut params = vec![1.0, -2.0, 0.5];
        adam.step(&mut params, &[3.0, -0.01, 0.0]);
        assert_relative_eq!(params[0], 0.9, epsilon = 1e-6);
        assert_relative_eq!(params[1], -1.9, epsilon = 1e-4);
        assert_eq!(params[2], 0.5);
        assert_eq!(adam.timestep(), 1);
    }

    #[test]
    fn test_minimizes_quadratic() {
        let mut adam = Adam::new(0.05);
        let mut x = vec![3.0, -4.0];
        for _ in 0..2000 {
            let grad: Vec<f64> = x.iter().map(|v| 2.0 * v).collect();
            adam.step(&mut x, &grad);
        }
        assert!(x.iter().all(|v| v.abs() < 0.05), "did not converge: {x:?}");
    }

    #[test]
    fn test_reset_clears_state() {
        let mut adam = Adam::new(0.01);
        let mut x = vec![1.0];
        adam.step(&mut x, &[1.0]);
        adam.step(&mut x, &[1.0]);
        adam.reset();
        assert_eq!(adam.timestep(), 0);

        let mut fresh = Adam::new(0.01);
        let mut a = vec![0.0];
        let mut b = vec![0.0];
        adam.step(&mut a, &[0.7]);
        fresh.step(&mut b, &[0.7]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_learning_rate_accessors() {
        let mut adam = Adam::default().with_betas(0.8, 0.99).with_epsilon(1e-8);
        assert_eq!(adam.learning_rate(), 0.025);
        adam.set_learning_rate(0.5);
        assert_eq!(adam.learning_rate(), 0.5);
    }
}
