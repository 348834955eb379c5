//! Maze navigation environment.
//!
//! Wraps an immutable [`Grid`] and tracks the agent's state and the path it
//! has walked. The target is the bottom-right cell; the agent starts at the
//! top-left.
//!
//! # Lifecycle
//!
//! 1. Call [`MazeEnvironment::new`] with a generated or parsed grid.
//! 2. Call [`MazeEnvironment::reset`] to place the agent at a start state.
//! 3. Query [`MazeEnvironment::valid_moves`] and call
//!    [`MazeEnvironment::advance`] with one of them, until the target is
//!    reached or no move is left.

use std::collections::VecDeque;
use std::fmt;

use super::reward::{RewardView, Rewards};
use crate::maze::Grid;
use crate::types::Coord;

/// Grid world with a single fixed target.
#[derive(Debug, Clone)]
pub struct MazeEnvironment {
    grid: Grid,
    target: Coord,
    open_set: Vec<Coord>,
    state: Coord,
    path: Vec<Coord>,
    rewards: Rewards,
}

impl MazeEnvironment {
    /// Creates an environment with the default reward scheme.
    pub fn new(grid: Grid) -> Self {
        Self::with_rewards(grid, Rewards::default())
    }

    /// Creates an environment with a custom reward scheme.
    pub fn with_rewards(grid: Grid, rewards: Rewards) -> Self {
        let target = Coord::new(
            grid.width().saturating_sub(1),
            grid.height().saturating_sub(1),
        );
        let open_set = grid
            .open_cells()
            .into_iter()
            .filter(|c| *c != target)
            .collect();
        let state = Coord::origin();
        Self {
            grid,
            target,
            open_set,
            state,
            path: vec![state],
            rewards,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn target(&self) -> Coord {
        self.target
    }

    /// Open cells other than the target, in row-major order (new grids) with
    /// any restored target appended after a [`reset`](Self::reset).
    pub fn open_set(&self) -> &[Coord] {
        &self.open_set
    }

    /// Current agent state.
    pub fn state(&self) -> Coord {
        self.state
    }

    /// States visited since the last reset, starting with the initial state.
    pub fn path(&self) -> &[Coord] {
        &self.path
    }

    pub fn rewards(&self) -> &Rewards {
        &self.rewards
    }

    pub fn is_at_target(&self) -> bool {
        self.state == self.target
    }

    /// Open, in-bounds orthogonal neighbours of `state`, in
    /// `left, right, up, down` order.
    ///
    /// An empty result means `state` is sealed in by walls and the grid
    /// edge; callers must not [`advance`](Self::advance) from it.
    pub fn valid_next_states(&self, state: Coord) -> Vec<Coord> {
        state
            .neighbours()
            .filter(|n| self.grid.is_open(*n))
            .collect()
    }

    /// [`valid_next_states`](Self::valid_next_states) for the current state.
    pub fn valid_moves(&self) -> Vec<Coord> {
        self.valid_next_states(self.state)
    }

    /// Moves the agent to `next` and records it on the path.
    ///
    /// `next` is not checked for adjacency; it should come from
    /// [`valid_next_states`](Self::valid_next_states).
    pub fn advance(&mut self, next: Coord) -> Coord {
        self.state = next;
        self.path.push(next);
        self.state
    }

    /// Starts a fresh history at `initial`, optionally moving the target.
    ///
    /// When a new target is given, the old target rejoins the open set (if it
    /// is an open cell) and the new target leaves it.
    pub fn reset(&mut self, initial: Coord, target: Option<Coord>) {
        self.state = initial;
        self.path.clear();
        self.path.push(initial);

        if let Some(new_target) = target {
            let old = std::mem::replace(&mut self.target, new_target);
            if old != new_target && self.grid.is_open(old) && !self.open_set.contains(&old) {
                self.open_set.push(old);
            }
            self.open_set.retain(|c| *c != new_target);
        }
    }

    /// Reward table for the current grid and target.
    pub fn reward_view(&self) -> RewardView {
        RewardView::compute(&self.grid, self.target, &self.rewards)
    }

    /// Open-set cells with no open route to the target.
    ///
    /// Generated mazes make no connectivity guarantee; drivers can use this to
    /// reject a maze before training on it.
    ///
    /// A walled target is reachable from nowhere, since moves only enter open
    /// cells.
    pub fn unreachable_open_cells(&self) -> Vec<Coord> {
        if !self.grid.is_open(self.target) {
            return self.open_set.clone();
        }

        let mut seen = vec![false; self.grid.len()];
        let mut queue = VecDeque::new();
        if let Some(i) = self.grid.index_of(self.target) {
            seen[i] = true;
            queue.push_back(self.target);
        }
        while let Some(cell) = queue.pop_front() {
            for n in self.valid_next_states(cell) {
                if let Some(i) = self.grid.index_of(n) {
                    if !seen[i] {
                        seen[i] = true;
                        queue.push_back(n);
                    }
                }
            }
        }

        self.open_set
            .iter()
            .copied()
            .filter(|c| self.grid.index_of(*c).is_some_and(|i| !seen[i]))
            .collect()
    }

    /// Returns true if every open-set cell can reach the target.
    pub fn is_fully_connected(&self) -> bool {
        self.unreachable_open_cells().is_empty()
    }
}

impl fmt::Display for MazeEnvironment {
    /// Renders walls as `#`, open cells as `.`, the path as `o` and the
    /// target as `*` when it is not on the path.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height() {
            for x in 0..self.width() {
                let c = Coord::new(x, y);
                let glyph = if self.path.contains(&c) {
                    'o'
                } else if c == self.target {
                    '*'
                } else {
                    self.grid.get(c).map(|cell| cell.glyph()).unwrap_or(' ')
                };
                write!(f, "{}", glyph)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
