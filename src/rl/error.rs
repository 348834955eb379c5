use std::fmt;

use thiserror::Error;

use crate::types::Coord;

/// Operation that was running when a [`LearnError`] was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Rollout,
    Solve,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Rollout => write!(f, "rollout"),
            Operation::Solve => write!(f, "solve"),
        }
    }
}

/// Why a traversal could not reach the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrandReason {
    /// The state has no open orthogonal neighbour.
    DeadEnd,
    /// The traversal used its whole step budget without reaching the target.
    StepBudgetExhausted { steps: usize },
}

impl fmt::Display for StrandReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrandReason::DeadEnd => write!(f, "has no valid next state"),
            StrandReason::StepBudgetExhausted { steps } => {
                write!(f, "did not reach the target within {} steps", steps)
            }
        }
    }
}

/// Errors raised by training and policy queries. None of them are retryable.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LearnError {
    #[error("Configuration error during {operation}: state {state} {reason}")]
    Configuration {
        operation: Operation,
        state: Coord,
        reason: StrandReason,
    },

    #[error("No viable move from state {state}")]
    NoViableMove { state: Coord },

    #[error("State {state} is outside the maze")]
    OutOfBounds { state: Coord },

    #[error("Quality table for a {width}x{height} grid does not fit in memory")]
    TableTooLarge { width: usize, height: usize },

    #[error("Invalid learner configuration: {0}")]
    InvalidConfig(String),
}

impl LearnError {
    pub(crate) fn dead_end(operation: Operation, state: Coord) -> Self {
        LearnError::Configuration {
            operation,
            state,
            reason: StrandReason::DeadEnd,
        }
    }

    pub(crate) fn budget_exhausted(operation: Operation, state: Coord, steps: usize) -> Self {
        LearnError::Configuration {
            operation,
            state,
            reason: StrandReason::StepBudgetExhausted { steps },
        }
    }
}
