//! Core value types shared by the maze and the learner.
//!
//! A [`Coord`] is both a grid cell and an agent state. `x` is the column and
//! `y` the row, so "left"/"right" move along `x` and "up"/"down" along `y`.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A cell coordinate on the grid, also used as the agent's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    /// Creates a new coordinate.
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Top-left corner (0, 0).
    pub fn origin() -> Self {
        Self { x: 0, y: 0 }
    }

    /// Manhattan distance to another coordinate.
    pub fn manhattan(&self, other: &Coord) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Orthogonal neighbours in `left, right, up, down` order.
    ///
    /// Neighbours that would fall below zero are omitted; the upper bound is
    /// left to the caller since it depends on the grid.
    pub fn neighbours(&self) -> impl Iterator<Item = Coord> {
        let origin = *self;
        Direction::MOVES
            .into_iter()
            .filter_map(move |dir| origin.step(dir))
    }

    /// Moves one cell in `dir`, or `None` when that would underflow.
    pub fn step(&self, dir: Direction) -> Option<Coord> {
        match dir {
            Direction::Left => self.x.checked_sub(1).map(|x| Coord::new(x, self.y)),
            Direction::Right => Some(Coord::new(self.x + 1, self.y)),
            Direction::Up => self.y.checked_sub(1).map(|y| Coord::new(self.x, y)),
            Direction::Down => Some(Coord::new(self.x, self.y + 1)),
            Direction::Remain => Some(*self),
        }
    }
}

impl From<(usize, usize)> for Coord {
    fn from((x, y): (usize, usize)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Direction of travel between two adjacent states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
    Remain,
}

impl Direction {
    /// The four real moves, in the order neighbours are enumerated.
    pub const MOVES: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Direction that takes `from` to `to`.
    ///
    /// Anything other than a single orthogonal step (including `from == to`)
    /// maps to [`Direction::Remain`].
    pub fn between(from: Coord, to: Coord) -> Self {
        let dx = to.x as isize - from.x as isize;
        let dy = to.y as isize - from.y as isize;
        match (dx, dy) {
            (-1, 0) => Direction::Left,
            (1, 0) => Direction::Right,
            (0, -1) => Direction::Up,
            (0, 1) => Direction::Down,
            _ => Direction::Remain,
        }
    }

    /// Arrow glyph used by the navigation map.
    pub fn glyph(&self) -> char {
        match self {
            Direction::Left => '◄',
            Direction::Right => '►',
            Direction::Up => '▲',
            Direction::Down => '▼',
            Direction::Remain => 'x',
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Left => write!(f, "left"),
            Direction::Right => write!(f, "right"),
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
            Direction::Remain => write!(f, "remain"),
        }
    }
}
