//! Online tabular value iteration over random-walk rollouts.
//!
//! Each rollout starts at some state and walks uniformly at random until it
//! reaches the target. Every step applies the one-step update
//!
//! ```text
//! Q[s][n] = R[n] + γ · max_{m ∈ next(n)} Q[n][m]
//! ```
//!
//! where `n` is the randomly chosen next state and `R` is the reward view.
//! Training repeats rollouts from random open cells and tracks how much each
//! one moved the table.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use super::config::LearnerConfig;
use super::environment::MazeEnvironment;
use super::error::{LearnError, Operation};
use super::metrics::TrainingReport;
use super::quality::QualityTable;
use crate::types::Coord;

/// Trains a [`QualityTable`] against a [`MazeEnvironment`].
///
/// The learner owns its random source; the table and environment are passed
/// in explicitly so each caller controls their lifetime.
#[derive(Debug)]
pub struct PolicyLearner {
    config: LearnerConfig,
    rng: StdRng,
}

impl PolicyLearner {
    /// Creates a learner with the given configuration and RNG seed.
    ///
    /// # Errors
    ///
    /// Returns [`LearnError::InvalidConfig`] if the configuration is invalid.
    pub fn new(config: LearnerConfig, seed: u64) -> Result<Self, LearnError> {
        config.validate()?;
        Ok(Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    pub fn config(&self) -> &LearnerConfig {
        &self.config
    }

    /// Zero-initialized table sized for `env`'s grid.
    pub fn allocate_table(env: &MazeEnvironment) -> Result<QualityTable, LearnError> {
        QualityTable::new(env.width(), env.height())
    }

    /// Runs one training episode from `start` and returns the number of steps.
    ///
    /// # Errors
    ///
    /// * [`LearnError::OutOfBounds`] if `start` is outside the grid or table.
    /// * [`LearnError::Configuration`] if the walk enters a state with no
    ///   exit or exceeds `max_rollout_steps`.
    pub fn run_rollout(
        &mut self,
        table: &mut QualityTable,
        env: &mut MazeEnvironment,
        start: Coord,
    ) -> Result<usize, LearnError> {
        if !env.grid().contains(start) || !table.contains(start) {
            return Err(LearnError::OutOfBounds { state: start });
        }

        let rewards = env.reward_view();
        let discount = self.config.discount;
        env.reset(start, None);

        let mut steps = 0;
        while !env.is_at_target() {
            let state = env.state();
            if steps >= self.config.max_rollout_steps {
                return Err(LearnError::budget_exhausted(
                    Operation::Rollout,
                    state,
                    steps,
                ));
            }

            let next = env
                .valid_next_states(state)
                .choose(&mut self.rng)
                .copied()
                .ok_or_else(|| LearnError::dead_end(Operation::Rollout, state))?;

            let onward = env.valid_next_states(next);
            let max_future = table
                .max_over(next, &onward)
                .ok_or_else(|| LearnError::dead_end(Operation::Rollout, next))?;
            let reward = rewards
                .get(next)
                .ok_or(LearnError::OutOfBounds { state: next })?;

            table.set(state, next, reward + discount * max_future)?;
            env.advance(next);
            steps += 1;
        }

        Ok(steps)
    }

    /// Trains until the stopping rule in [`LearnerConfig::should_continue`]
    /// is satisfied.
    ///
    /// Each epoch snapshots the table, runs one rollout from a uniformly
    /// random open-set cell, and measures the total absolute change.
    ///
    /// # Errors
    ///
    /// Propagates any rollout error, and returns
    /// [`LearnError::InvalidConfig`] when the open set is empty.
    pub fn train(
        &mut self,
        table: &mut QualityTable,
        env: &mut MazeEnvironment,
    ) -> Result<TrainingReport, LearnError> {
        let mut epoch = 0;
        let mut change = 0.0;
        let mut change_history = Vec::new();
        let mut total_steps = 0;

        while self.config.should_continue(epoch, change) {
            let snapshot = table.clone();
            let start = env
                .open_set()
                .choose(&mut self.rng)
                .copied()
                .ok_or_else(|| {
                    LearnError::InvalidConfig("maze has no open cell to start training from".into())
                })?;

            let steps = self.run_rollout(table, env, start)?;
            change = table.total_abs_diff(&snapshot);
            debug!(epoch, %start, steps, change, "training epoch");

            change_history.push(change);
            total_steps += steps;
            epoch += 1;
        }

        let converged = epoch >= self.config.min_epochs && change <= self.config.min_delta;
        if converged {
            info!(epochs = epoch, final_change = change, "training converged");
        } else {
            warn!(
                epochs = epoch,
                final_change = change,
                max_epochs = ?self.config.max_epochs,
                "training stopped by epoch cap before converging"
            );
        }

        Ok(TrainingReport {
            epochs: epoch,
            final_change: change,
            change_history,
            total_steps,
            converged,
        })
    }

    /// Runs one rollout from every open-set cell, returning total steps.
    pub fn train_all_starts(
        &mut self,
        table: &mut QualityTable,
        env: &mut MazeEnvironment,
    ) -> Result<usize, LearnError> {
        let starts = env.open_set().to_vec();
        let mut total = 0;
        for start in starts {
            total += self.run_rollout(table, env, start)?;
        }
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rl::StrandReason;

    fn env(text: &str) -> MazeEnvironment {
        MazeEnvironment::new(text.parse().unwrap())
    }

    fn learner(seed: u64) -> PolicyLearner {
        PolicyLearner::new(LearnerConfig::default(), seed).unwrap()
    }

    #[test]
    fn invalid_config_rejected() {
        let cfg = LearnerConfig {
            discount: 1.5,
            ..LearnerConfig::default()
        };
        assert!(matches!(
            PolicyLearner::new(cfg, 0),
            Err(LearnError::InvalidConfig(_))
        ));
    }

    #[test]
    fn allocate_table_matches_grid() {
        let e = env("...\n...");
        let q = PolicyLearner::allocate_table(&e).unwrap();
        assert_eq!((q.width(), q.height()), (3, 2));
        assert_eq!(q.len(), 36);
    }

    #[test]
    fn rollout_ends_at_target_and_records_path() {
        let mut e = env("...\n...\n...");
        let mut q = PolicyLearner::allocate_table(&e).unwrap();
        let steps = learner(1).run_rollout(&mut q, &mut e, Coord::origin()).unwrap();
        assert_eq!(e.state(), e.target());
        assert_eq!(e.path().len(), steps + 1);
        assert_eq!(e.path()[0], Coord::origin());
    }

    #[test]
    fn rollout_entering_target_writes_target_reward() {
        // Single corridor: (0,0) -> (1,0) target, so the only move is into the target.
        let mut e = env("..");
        let mut q = PolicyLearner::allocate_table(&e).unwrap();
        learner(0).run_rollout(&mut q, &mut e, Coord::origin()).unwrap();
        // Q[target][*] is never written, so the future term is zero.
        assert_eq!(q.get(Coord::origin(), Coord::new(1, 0)), 1.0);
    }

    #[test]
    fn rollout_from_target_is_a_no_op() {
        let mut e = env("..\n..");
        let mut q = PolicyLearner::allocate_table(&e).unwrap();
        let target = e.target();
        let steps = learner(0).run_rollout(&mut q, &mut e, target).unwrap();
        assert_eq!(steps, 0);
        assert!(q.total_abs_diff(&PolicyLearner::allocate_table(&e).unwrap()) == 0.0);
    }

    #[test]
    fn rollout_from_enclosed_state_is_configuration_error() {
        let mut e = env(".#.\n##.\n...");
        let mut q = PolicyLearner::allocate_table(&e).unwrap();
        let err = learner(0)
            .run_rollout(&mut q, &mut e, Coord::origin())
            .unwrap_err();
        assert_eq!(
            err,
            LearnError::Configuration {
                operation: Operation::Rollout,
                state: Coord::origin(),
                reason: StrandReason::DeadEnd,
            }
        );
    }

    #[test]
    fn rollout_in_sealed_pocket_exhausts_budget() {
        let mut e = env("..#\n###\n...");
        let mut q = PolicyLearner::allocate_table(&e).unwrap();
        let cfg = LearnerConfig {
            max_rollout_steps: 50,
            ..LearnerConfig::default()
        };
        let err = PolicyLearner::new(cfg, 3)
            .unwrap()
            .run_rollout(&mut q, &mut e, Coord::origin())
            .unwrap_err();
        assert!(matches!(
            err,
            LearnError::Configuration {
                operation: Operation::Rollout,
                reason: StrandReason::StepBudgetExhausted { steps: 50 },
                ..
            }
        ));
    }

    #[test]
    fn rollout_out_of_bounds_start() {
        let mut e = env("..\n..");
        let mut q = PolicyLearner::allocate_table(&e).unwrap();
        let err = learner(0)
            .run_rollout(&mut q, &mut e, Coord::new(4, 0))
            .unwrap_err();
        assert_eq!(
            err,
            LearnError::OutOfBounds {
                state: Coord::new(4, 0)
            }
        );
    }

    #[test]
    fn train_runs_at_least_min_epochs() {
        let mut e = env("...\n...\n...");
        let mut q = PolicyLearner::allocate_table(&e).unwrap();
        let report = learner(9).train(&mut q, &mut e).unwrap();
        assert!(report.epochs >= 42);
        assert_eq!(report.change_history.len(), report.epochs);
        assert!(report.final_change <= 0.001);
        assert!(report.converged);
    }

    #[test]
    fn train_respects_epoch_cap() {
        let mut e = env("...\n...\n...");
        let mut q = PolicyLearner::allocate_table(&e).unwrap();
        let cfg = LearnerConfig {
            min_epochs: 1_000,
            max_epochs: Some(5),
            ..LearnerConfig::default()
        };
        let report = PolicyLearner::new(cfg, 2)
            .unwrap()
            .train(&mut q, &mut e)
            .unwrap();
        assert_eq!(report.epochs, 5);
        assert!(!report.converged);
    }

    #[test]
    fn train_without_open_cells_fails() {
        let mut e = env("#.");
        let mut q = PolicyLearner::allocate_table(&e).unwrap();
        match learner(0).train(&mut q, &mut e) {
            Err(LearnError::InvalidConfig(msg)) => assert!(msg.contains("no open cell")),
            other => panic!("expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn train_propagates_stranded_rollout() {
        let mut e = env("..#\n###\n...");
        let mut q = PolicyLearner::allocate_table(&e).unwrap();
        let cfg = LearnerConfig {
            max_rollout_steps: 200,
            ..LearnerConfig::default()
        };
        let mut l = PolicyLearner::new(cfg, 4).unwrap();
        // Two of the four open-set cells are sealed off, so some epoch strands.
        let err = l.train(&mut q, &mut e).unwrap_err();
        assert!(matches!(err, LearnError::Configuration { .. }));
    }

    #[test]
    fn train_all_starts_visits_every_open_cell() {
        let mut e = env("...\n.#.\n...");
        let mut q = PolicyLearner::allocate_table(&e).unwrap();
        let steps = learner(5).train_all_starts(&mut q, &mut e).unwrap();
        assert!(steps >= e.open_set().len());
        assert!(q.get(Coord::new(2, 1), Coord::new(2, 2)) > 0.0
            || q.get(Coord::new(1, 2), Coord::new(2, 2)) > 0.0);
    }

    #[test]
    fn same_seed_same_table() {
        let grid = "....\n.#..\n...#\n#...";
        let mut e1 = env(grid);
        let mut e2 = env(grid);
        let mut q1 = PolicyLearner::allocate_table(&e1).unwrap();
        let mut q2 = PolicyLearner::allocate_table(&e2).unwrap();
        learner(77).train(&mut q1, &mut e1).unwrap();
        learner(77).train(&mut q2, &mut e2).unwrap();
        assert_eq!(q1, q2);
    }
}
