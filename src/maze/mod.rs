//! Maze grids and their randomized generation.

mod config;
mod error;
mod generator;
mod grid;

pub use config::GeneratorConfig;
pub use error::GridError;
pub use generator::MazeGenerator;
pub use grid::{Cell, Grid, OPEN_TAG, WALL_TAG};
