//! qmaze - randomized grid mazes and a tabular navigation policy learner.
//!
//! A [`MazeGenerator`] carves a wall/open [`Grid`]. A [`MazeEnvironment`]
//! wraps the grid with a bottom-right target, and a [`PolicyLearner`] trains
//! a [`QualityTable`] by online value iteration over random walks. The
//! trained table routes any open cell to the target via [`solve`] or a
//! per-cell [`policy_map`].

pub mod maze;
pub mod rl;
pub mod types;

pub use maze::{Cell, GeneratorConfig, Grid, GridError, MazeGenerator};
pub use rl::{
    policy_map, solve, solve_all, LearnError, LearnerConfig, MazeEnvironment, PolicyLearner,
    PolicyMap, QualityTable, Rewards, TrainingReport,
};
pub use types::{Coord, Direction};
