//! Summary of a training run.

use std::fmt;

/// Outcome of [`PolicyLearner::train`](super::PolicyLearner::train).
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingReport {
    /// Number of epochs (rollouts) performed.
    pub epochs: usize,
    /// Total absolute table change of the last epoch.
    pub final_change: f64,
    /// Table change per epoch, in order.
    pub change_history: Vec<f64>,
    /// Environment steps taken across all rollouts.
    pub total_steps: usize,
    /// Whether the run met both the epoch floor and the change threshold.
    pub converged: bool,
}

impl TrainingReport {
    /// Mean rollout length in steps.
    pub fn mean_rollout_steps(&self) -> f64 {
        if self.epochs == 0 {
            0.0
        } else {
            self.total_steps as f64 / self.epochs as f64
        }
    }

    /// First epoch whose change was at or below `threshold`.
    pub fn first_epoch_within(&self, threshold: f64) -> Option<usize> {
        self.change_history.iter().position(|c| *c <= threshold)
    }
}

impl fmt::Display for TrainingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Training Report ({} epochs) ===", self.epochs)?;
        writeln!(f, "  Converged:            {}", self.converged)?;
        writeln!(f, "  Final table change:   {:.6}", self.final_change)?;
        writeln!(f, "  Total steps:          {}", self.total_steps)?;
        writeln!(
            f,
            "  Mean rollout steps:   {:.1}",
            self.mean_rollout_steps()
        )
    }
}
