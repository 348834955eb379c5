//! Greedy policy queries over a trained [`QualityTable`].

use std::fmt;

use super::environment::MazeEnvironment;
use super::error::{LearnError, Operation};
use super::quality::QualityTable;
use crate::maze::Cell;
use crate::types::{Coord, Direction};

/// Ordered states visited by a solve, from start to target.
pub type Path = Vec<Coord>;

/// Follows the greedy policy from `start` until the target is reached.
///
/// The environment is reset to `start` and its path is returned. A greedy
/// path that takes as many steps as the grid has cells must have revisited a
/// state, so it is reported as stranded instead of looping forever.
///
/// # Errors
///
/// * [`LearnError::OutOfBounds`] if `start` is outside the grid.
/// * [`LearnError::Configuration`] on a dead end or a policy cycle.
pub fn solve(
    table: &QualityTable,
    env: &mut MazeEnvironment,
    start: Coord,
) -> Result<Path, LearnError> {
    if !env.grid().contains(start) {
        return Err(LearnError::OutOfBounds { state: start });
    }

    env.reset(start, None);
    let budget = env.grid().len();
    let mut steps = 0;
    while !env.is_at_target() {
        let state = env.state();
        if steps >= budget {
            return Err(LearnError::budget_exhausted(Operation::Solve, state, steps));
        }
        let moves = env.valid_moves();
        if moves.is_empty() {
            return Err(LearnError::dead_end(Operation::Solve, state));
        }
        let next = table.best_next_state(state, &moves)?;
        env.advance(next);
        steps += 1;
    }

    Ok(env.path().to_vec())
}

/// Solves from every open-set cell, in open-set order.
pub fn solve_all(table: &QualityTable, env: &mut MazeEnvironment) -> Result<Vec<Path>, LearnError> {
    let starts = env.open_set().to_vec();
    starts
        .into_iter()
        .map(|start| solve(table, env, start))
        .collect()
}

/// Best direction for every open cell of the maze.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyMap {
    width: usize,
    height: usize,
    directions: Vec<Option<Direction>>,
}

impl PolicyMap {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Direction chosen at `coord`; `None` for walls and out-of-bounds cells.
    pub fn get(&self, coord: Coord) -> Option<Direction> {
        if coord.x >= self.width || coord.y >= self.height {
            return None;
        }
        self.directions[coord.y * self.width + coord.x]
    }

    /// `(coord, direction)` for every open cell in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, Direction)> + '_ {
        let width = self.width.max(1);
        self.directions
            .iter()
            .enumerate()
            .filter_map(move |(i, d)| d.map(|d| (Coord::new(i % width, i / width), d)))
    }
}

impl fmt::Display for PolicyMap {
    /// Navigation map: one arrow per open cell, `x` for remain, `▢` for walls.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.directions.chunks(self.width.max(1)) {
            for d in row {
                let glyph = d.map(|d| d.glyph()).unwrap_or('▢');
                write!(f, "{} ", glyph)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Computes the greedy direction for every non-wall cell, target included.
///
/// # Errors
///
/// Returns [`LearnError::NoViableMove`] for an open cell sealed in by walls.
pub fn policy_map(table: &QualityTable, env: &MazeEnvironment) -> Result<PolicyMap, LearnError> {
    let grid = env.grid();
    let mut directions = Vec::with_capacity(grid.len());
    for (coord, cell) in grid.iter() {
        let direction = match cell {
            Cell::Wall => None,
            Cell::Open => {
                let moves = env.valid_next_states(coord);
                let best = table.best_next_state(coord, &moves)?;
                Some(Direction::between(coord, best))
            }
        };
        directions.push(direction);
    }

    Ok(PolicyMap {
        width: grid.width(),
        height: grid.height(),
        directions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rl::StrandReason;

    fn env(text: &str) -> MazeEnvironment {
        MazeEnvironment::new(text.parse().unwrap())
    }

    /// Table that points every state along a fixed route.
    fn route_table(env: &MazeEnvironment, route: &[Coord]) -> QualityTable {
        let mut q = QualityTable::new(env.width(), env.height()).unwrap();
        for pair in route.windows(2) {
            q.set(pair[0], pair[1], 1.0).unwrap();
        }
        q
    }

    #[test]
    fn solve_follows_greedy_choices() {
        let mut e = env("..\n..");
        let route = [Coord::new(0, 0), Coord::new(0, 1), Coord::new(1, 1)];
        let q = route_table(&e, &route);
        assert_eq!(solve(&q, &mut e, Coord::origin()).unwrap(), route.to_vec());
        assert_eq!(e.path(), &route);
    }

    #[test]
    fn solve_from_target_is_single_state() {
        let mut e = env("..\n..");
        let q = QualityTable::new(2, 2).unwrap();
        let target = e.target();
        assert_eq!(solve(&q, &mut e, target).unwrap(), vec![target]);
    }

    #[test]
    fn solve_dead_end_is_configuration_error() {
        let mut e = env(".#.\n##.\n...");
        let q = QualityTable::new(3, 3).unwrap();
        let err = solve(&q, &mut e, Coord::origin()).unwrap_err();
        assert_eq!(err, LearnError::dead_end(Operation::Solve, Coord::origin()));
    }

    #[test]
    fn solve_untrained_table_cycles_into_budget() {
        // All-zero table: (0,0) picks right, (1,0) picks left, forever.
        let mut e = env("..\n..");
        let q = QualityTable::new(2, 2).unwrap();
        let err = solve(&q, &mut e, Coord::origin()).unwrap_err();
        assert!(matches!(
            err,
            LearnError::Configuration {
                operation: Operation::Solve,
                reason: StrandReason::StepBudgetExhausted { steps: 4 },
                ..
            }
        ));
    }

    #[test]
    fn solve_out_of_bounds_start() {
        let mut e = env("..");
        let q = QualityTable::new(2, 1).unwrap();
        assert_eq!(
            solve(&q, &mut e, Coord::new(0, 1)).unwrap_err(),
            LearnError::OutOfBounds {
                state: Coord::new(0, 1)
            }
        );
    }

    #[test]
    fn policy_map_translates_best_moves() {
        let e = env("..\n.#");
        // target is the wall at (1,1); open cells are (0,0), (1,0), (0,1)
        let mut q = QualityTable::new(2, 2).unwrap();
        q.set(Coord::new(0, 0), Coord::new(0, 1), 1.0).unwrap();
        let map = policy_map(&q, &e).unwrap();
        assert_eq!(map.get(Coord::new(0, 0)), Some(Direction::Down));
        assert_eq!(map.get(Coord::new(1, 0)), Some(Direction::Left));
        assert_eq!(map.get(Coord::new(0, 1)), Some(Direction::Up));
        assert_eq!(map.get(Coord::new(1, 1)), None);
        assert_eq!(map.iter().count(), 3);
    }

    #[test]
    fn policy_map_sealed_cell_is_no_viable_move() {
        let e = env(".#\n#.");
        let q = QualityTable::new(2, 2).unwrap();
        assert_eq!(
            policy_map(&q, &e).unwrap_err(),
            LearnError::NoViableMove {
                state: Coord::origin()
            }
        );
    }

    #[test]
    fn policy_map_display() {
        let e = env("..\n.#");
        let mut q = QualityTable::new(2, 2).unwrap();
        q.set(Coord::new(0, 0), Coord::new(1, 0), 1.0).unwrap();
        let map = policy_map(&q, &e).unwrap();
        assert_eq!(map.to_string(), "► ◄ \n▲ ▢ \n");
    }
}
