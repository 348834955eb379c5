//! Tabular policy learning on maze grids.
//!
//! [`MazeEnvironment`] wraps a grid with a fixed target; [`PolicyLearner`]
//! fills a [`QualityTable`] by random-walk rollouts; [`solve`] and
//! [`policy_map`] read the greedy policy back out of a trained table.

pub mod config;
pub mod environment;
pub mod error;
pub mod learner;
pub mod metrics;
pub mod policy;
pub mod quality;
pub mod reward;


pub use config::LearnerConfig;
pub use environment::MazeEnvironment;
pub use error::{LearnError, Operation, StrandReason};
pub use learner::PolicyLearner;
pub use metrics::TrainingReport;
pub use policy::{policy_map, solve, solve_all, Path, PolicyMap};
pub use quality::QualityTable;
pub use reward::{RewardView, Rewards};
