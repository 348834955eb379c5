//! Configuration for tabular policy learning.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::error::LearnError;

/// Training hyper-parameters and safety budgets.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LearnerConfig {
    /// Weight of future reward against immediate reward, in `(0, 1)`.
    pub discount: f64,
    /// Training runs at least this many epochs.
    pub min_epochs: usize,
    /// Training continues while the last epoch changed the table by more than this.
    pub min_delta: f64,
    /// Step budget for a single rollout before it counts as stranded.
    pub max_rollout_steps: usize,
    /// Hard cap on epochs. `None` trains until the stopping rule is met.
    pub max_epochs: Option<usize>,
}

impl LearnerConfig {
    /// Checks that the configuration can drive a training run.
    pub fn validate(&self) -> Result<(), LearnError> {
        if !(self.discount > 0.0 && self.discount < 1.0) {
            return Err(LearnError::InvalidConfig(format!(
                "discount must be in (0, 1), got {}",
                self.discount
            )));
        }
        if self.min_delta.is_nan() || self.min_delta < 0.0 {
            return Err(LearnError::InvalidConfig(format!(
                "min_delta must be non-negative, got {}",
                self.min_delta
            )));
        }
        if self.max_rollout_steps == 0 {
            return Err(LearnError::InvalidConfig(
                "max_rollout_steps must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Stopping rule: keep training while too few epochs have run OR the
    /// table is still moving. An epoch cap, when set, overrides both.
    pub fn should_continue(&self, epoch: usize, last_change: f64) -> bool {
        if self.max_epochs.is_some_and(|cap| epoch >= cap) {
            return false;
        }
        epoch < self.min_epochs || last_change > self.min_delta
    }
}

impl Default for LearnerConfig {
    fn default() -> Self {
        Self {
            discount: 0.5,
            min_epochs: 42,
            min_delta: 0.001,
            max_rollout_steps: 100_000,
            max_epochs: None,
        }
    }
}
