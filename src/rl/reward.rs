//! Per-cell reward signal derived from the grid and the target.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::maze::{Cell, Grid};
use crate::types::Coord;

/// Reward granted for entering each kind of cell.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rewards {
    /// Reward for entering the target.
    pub target: f64,
    /// Reward for entering any other open cell.
    pub open: f64,
    /// Penalty value carried by wall cells.
    pub wall: f64,
}

impl Default for Rewards {
    fn default() -> Self {
        Self {
            target: 1.0,
            open: 0.0,
            wall: -1.0,
        }
    }
}

/// Grid-shaped reward table.
///
/// Recomputed from a grid and target on demand; holds no reference back to
/// either.
#[derive(Debug, Clone, PartialEq)]
pub struct RewardView {
    width: usize,
    height: usize,
    values: Vec<f64>,
}

impl RewardView {
    /// Builds the view: walls carry the wall penalty, open cells the open
    /// reward, and the target cell is overridden with the target reward.
    pub fn compute(grid: &Grid, target: Coord, rewards: &Rewards) -> Self {
        let mut values: Vec<f64> = grid
            .iter()
            .map(|(_, cell)| match cell {
                Cell::Wall => rewards.wall,
                Cell::Open => rewards.open,
            })
            .collect();
        if let Some(i) = grid.index_of(target) {
            values[i] = rewards.target;
        }
        Self {
            width: grid.width(),
            height: grid.height(),
            values,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Reward for entering `coord`, or `None` when out of bounds.
    pub fn get(&self, coord: Coord) -> Option<f64> {
        (coord.x < self.width && coord.y < self.height)
            .then(|| self.values[coord.y * self.width + coord.x])
    }

    /// Row-major rows of rewards.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.values.chunks(self.width.max(1))
    }
}
