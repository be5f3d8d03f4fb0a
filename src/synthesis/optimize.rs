// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Unitary synthesis loop.
//!
//! A run is an explicit [`SynthesisRun`] value owned by the caller, so
//! several runs can share one [`UnitarySynthesizer`] and be stepped, paused
//! and inspected independently.

use ndarray::Array2;
use num_complex::Complex64;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use super::adam::{Adam, Optimizer};
use super::fidelity::{learned_unitary, process_fidelity, subspace_leakage};
use super::gradient::{cost_and_gradient, evaluate_cost, CostEvaluation};
use super::target::{target_columns, UNITARITY_TOLERANCE};
use super::types::{IterationRecord, SynthesisConfig, SynthesisResult};
use crate::circuit::{Ansatz, FockSimulator, ParameterSet};
use crate::error::{Error, Result, ValidationError};
use crate::validation::validate_unitary;

/// Mean population outside the target subspace above which a run warns
/// that the truncation is too tight.
pub const LEAKAGE_WARN_THRESHOLD: f64 = 0.01;

/// Lifecycle of a [`SynthesisRun`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Done,
}

/// State of one optimization run.
#[derive(Debug, Clone)]
pub struct SynthesisRun<O: Optimizer> {
    target: Array2<Complex64>,
    target_columns: Array2<Complex64>,
    params: ParameterSet,
    optimizer: O,
    history: Vec<IterationRecord>,
    last_outputs: Option<Array2<Complex64>>,
    state: RunState,
}

impl<O: Optimizer> SynthesisRun<O> {
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Current parameters.
    pub fn parameters(&self) -> &ParameterSet {
        &self.params
    }

    pub fn history(&self) -> &[IterationRecord] {
        &self.history
    }

    /// Steps completed so far.
    pub fn iteration(&self) -> usize {
        self.history.len()
    }

    pub fn optimizer(&self) -> &O {
        &self.optimizer
    }

    /// Target block on the subspace (`d × d`).
    pub fn target(&self) -> &Array2<Complex64> {
        &self.target
    }
}

/// Synthesizes a target unitary with the layered Fock-space ansatz.
#[derive(Debug, Clone)]
pub struct UnitarySynthesizer {
    config: SynthesisConfig,
    simulator: FockSimulator,
    ansatz: Ansatz,
}

impl UnitarySynthesizer {
    /// Create a synthesizer for the given configuration.
    pub fn new(config: SynthesisConfig) -> Result<Self> {
        config.validate()?;
        let simulator = FockSimulator::new(config.cutoff);
        let ansatz = Ansatz::new(config.depth);
        debug!(
            cutoff = config.cutoff,
            gate_cutoff = config.gate_cutoff,
            depth = config.depth,
            parameters = ansatz.num_parameters(),
            "synthesizer created"
        );
        Ok(Self {
            config,
            simulator,
            ansatz,
        })
    }

    pub fn config(&self) -> &SynthesisConfig {
        &self.config
    }

    pub fn simulator(&self) -> &FockSimulator {
        &self.simulator
    }

    pub fn ansatz(&self) -> &Ansatz {
        &self.ansatz
    }

    /// Draw initial parameters with the configured standard deviations.
    pub fn initial_parameters<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<ParameterSet> {
        ParameterSet::random(
            self.config.depth,
            self.config.active_sd,
            self.config.passive_sd,
            rng,
        )
        .map_err(Error::Config)
    }

    /// Start a run with Adam at the configured learning rate.
    pub fn start(
        &self,
        target: &Array2<Complex64>,
        params: ParameterSet,
    ) -> Result<SynthesisRun<Adam>> {
        self.start_with(target, params, Adam::new(self.config.learning_rate))
    }

    /// Start a run with a caller-supplied optimizer.
    ///
    /// `target` is the `d × d` block acting on the lowest `gate_cutoff`
    /// levels; it must be unitary.
    pub fn start_with<O: Optimizer>(
        &self,
        target: &Array2<Complex64>,
        params: ParameterSet,
        optimizer: O,
    ) -> Result<SynthesisRun<O>> {
        self.check_target(target)?;
        self.check_depth(&params)?;

        Ok(SynthesisRun {
            target: target.clone(),
            target_columns: target_columns(target, self.config.cutoff),
            params,
            optimizer,
            history: Vec::with_capacity(self.config.iterations),
            last_outputs: None,
            state: RunState::Running,
        })
    }

    /// Perform one optimizer step.
    ///
    /// Evaluates cost and gradient at the current parameters, records them,
    /// then updates the parameters. A finished run is left untouched.
    pub fn step<O: Optimizer>(&self, run: &mut SynthesisRun<O>) -> Result<RunState> {
        if run.state == RunState::Done {
            return Ok(RunState::Done);
        }
        let iteration = run.history.len();

        let (evaluation, gradient) = cost_and_gradient(
            &self.simulator,
            &self.ansatz,
            &run.params,
            &run.target_columns,
        );
        if !evaluation.cost.is_finite() {
            return Err(Error::Numerical(format!(
                "cost is {} at iteration {iteration}",
                evaluation.cost
            )));
        }
        if let Some(idx) = gradient.iter().position(|g| !g.is_finite()) {
            return Err(Error::Numerical(format!(
                "gradient component {idx} is {} at iteration {iteration}",
                gradient[idx]
            )));
        }

        if self.config.log_interval > 0 && iteration % self.config.log_interval == 0 {
            info!(
                iteration,
                cost = evaluation.cost,
                mean_overlap = evaluation.mean_overlap,
                "synthesis progress"
            );
        }

        run.optimizer.step(run.params.as_mut_slice(), &gradient);
        if !run.params.is_finite() {
            return Err(Error::Numerical(format!(
                "optimizer produced non-finite parameters at iteration {iteration}"
            )));
        }

        run.history.push(IterationRecord {
            iteration,
            cost: evaluation.cost,
            mean_overlap: evaluation.mean_overlap,
            overlaps: evaluation.overlaps,
        });
        run.last_outputs = Some(evaluation.outputs);

        if run.history.len() >= self.config.iterations {
            run.state = RunState::Done;
        }
        Ok(run.state)
    }

    /// Compute the final diagnostics of a completed run.
    pub fn finish<O: Optimizer>(&self, run: SynthesisRun<O>) -> Result<SynthesisResult> {
        if run.state != RunState::Done {
            return Err(Error::Config(format!(
                "run stopped after {} of {} iterations",
                run.history.len(),
                self.config.iterations
            )));
        }
        let outputs = run
            .last_outputs
            .ok_or_else(|| Error::Config("run finished without evaluating the ansatz".into()))?;

        let d = self.config.gate_cutoff;
        let learned = learned_unitary(&outputs, d);
        let fidelity = process_fidelity(&run.target, &learned);
        let leakage = subspace_leakage(&outputs, d);

        if leakage > LEAKAGE_WARN_THRESHOLD {
            warn!(
                leakage,
                cutoff = self.config.cutoff,
                "population leaves the target subspace; consider a larger cutoff"
            );
        }
        info!(
            iterations = run.history.len(),
            process_fidelity = fidelity,
            leakage,
            "synthesis complete"
        );

        Ok(SynthesisResult {
            iterations: run.history.len(),
            parameters: run.params,
            history: run.history,
            outputs,
            target: run.target,
            learned,
            process_fidelity: fidelity,
            leakage,
        })
    }

    /// Run a full synthesis from seeded random parameters with Adam.
    pub fn optimize(&self, target: &Array2<Complex64>) -> Result<SynthesisResult> {
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let params = self.initial_parameters(&mut rng)?;
        let mut run = self.start(target, params)?;
        while self.step(&mut run)? == RunState::Running {}
        self.finish(run)
    }

    /// Evaluate the cost of `params` against a `d × d` target without
    /// updating anything.
    pub fn evaluate(
        &self,
        params: &ParameterSet,
        target: &Array2<Complex64>,
    ) -> Result<CostEvaluation> {
        self.check_target(target)?;
        self.check_depth(params)?;
        let columns = target_columns(target, self.config.cutoff);
        Ok(evaluate_cost(
            &self.simulator,
            &self.ansatz,
            params,
            &columns,
        ))
    }

    /// The target must be a unitary `gate_cutoff × gate_cutoff` block.
    fn check_target(&self, target: &Array2<Complex64>) -> Result<()> {
        let d = self.config.gate_cutoff;
        if target.nrows() != d || target.ncols() != d {
            return Err(ValidationError::Field {
                field: "target".into(),
                message: format!(
                    "expected a {d} × {d} block, got {} × {}",
                    target.nrows(),
                    target.ncols()
                ),
            }
            .into());
        }
        validate_unitary(target, UNITARITY_TOLERANCE)
    }

    fn check_depth(&self, params: &ParameterSet) -> Result<()> {
        if params.depth() != self.config.depth {
            return Err(Error::Config(format!(
                "parameters have depth {}, ansatz has depth {}",
                params.depth(),
                self.config.depth
            )));
        }
        Ok(())
    }
}
