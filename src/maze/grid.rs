//! The tagged cell grid shared by the generator and the environment.
//!
//! Internally each cell is a [`Cell`] variant. At the boundary with external
//! collaborators the grid is exchanged as a row-major 2D array of numeric
//! tags where a negative value is a wall and zero is open
//! (see [`Grid::from_tags`] / [`Grid::to_tags`]).

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::error::GridError;
use crate::types::Coord;

/// Numeric tag for a wall cell on the external boundary.
pub const WALL_TAG: f64 = -1.0;
/// Numeric tag for an open cell on the external boundary.
pub const OPEN_TAG: f64 = 0.0;

/// Contents of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Cell {
    Wall,
    Open,
}

impl Cell {
    /// Decodes a boundary tag: negative is a wall, zero is open.
    pub fn from_tag(tag: f64) -> Option<Self> {
        if tag < 0.0 {
            Some(Cell::Wall)
        } else if tag == 0.0 {
            Some(Cell::Open)
        } else {
            None
        }
    }

    /// Encodes this cell as a boundary tag.
    pub fn tag(&self) -> f64 {
        match self {
            Cell::Wall => WALL_TAG,
            Cell::Open => OPEN_TAG,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Cell::Open)
    }

    /// Text glyph used by [`Grid`]'s `Display` and `FromStr`.
    pub fn glyph(&self) -> char {
        match self {
            Cell::Wall => '#',
            Cell::Open => '.',
        }
    }
}

/// A fixed-size rectangular grid of cells, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a `width × height` grid with every cell set to `fill`.
    pub fn new(width: usize, height: usize, fill: Cell) -> Self {
        Self {
            width,
            height,
            cells: vec![fill; width * height],
        }
    }

    /// Creates a grid with no walls at all.
    pub fn open(width: usize, height: usize) -> Self {
        Self::new(width, height, Cell::Open)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns true if `coord` lies inside the grid.
    pub fn contains(&self, coord: Coord) -> bool {
        coord.x < self.width && coord.y < self.height
    }

    /// Row-major index of an in-bounds coordinate.
    pub fn index_of(&self, coord: Coord) -> Option<usize> {
        self.contains(coord)
            .then(|| coord.y * self.width + coord.x)
    }

    /// Returns the cell at `coord`, or `None` when out of bounds.
    pub fn get(&self, coord: Coord) -> Option<Cell> {
        self.index_of(coord).map(|i| self.cells[i])
    }

    /// Returns true if `coord` is in bounds and open.
    pub fn is_open(&self, coord: Coord) -> bool {
        self.get(coord).is_some_and(|c| c.is_open())
    }

    /// Sets a cell. Out-of-bounds writes are ignored.
    pub(crate) fn set(&mut self, coord: Coord, cell: Cell) {
        if let Some(i) = self.index_of(coord) {
            self.cells[i] = cell;
        }
    }

    /// Iterates over every coordinate in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> {
        let width = self.width;
        (0..self.height).flat_map(move |y| (0..width).map(move |x| Coord::new(x, y)))
    }

    /// Iterates over `(coord, cell)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, Cell)> + '_ {
        self.coords().zip(self.cells.iter().copied())
    }

    /// All open coordinates in row-major order.
    pub fn open_cells(&self) -> Vec<Coord> {
        self.iter()
            .filter(|(_, cell)| cell.is_open())
            .map(|(coord, _)| coord)
            .collect()
    }

    /// Returns true if every cell on the outer ring is a wall.
    pub fn has_wall_border(&self) -> bool {
        self.iter().all(|(c, cell)| {
            let on_border =
                c.x == 0 || c.y == 0 || c.x + 1 == self.width || c.y + 1 == self.height;
            !on_border || cell == Cell::Wall
        })
    }

    /// Copy of this grid with the outer one-cell ring removed.
    ///
    /// Grids narrower than three cells in either direction have no interior
    /// and yield an empty grid.
    pub fn interior(&self) -> Grid {
        let width = self.width.saturating_sub(2);
        let height = self.height.saturating_sub(2);
        let mut cells = Vec::with_capacity(width * height);
        for y in 0..height {
            let start = (y + 1) * self.width + 1;
            cells.extend_from_slice(&self.cells[start..start + width]);
        }
        Grid {
            width,
            height,
            cells,
        }
    }

    /// Builds a grid from row-major boundary tags (`tags[y][x]`).
    pub fn from_tags<R: AsRef<[f64]>>(tags: &[R]) -> Result<Self, GridError> {
        let height = tags.len();
        let width = tags.first().map(|r| r.as_ref().len()).unwrap_or(0);
        if width == 0 || height == 0 {
            return Err(GridError::Empty);
        }

        let mut cells = Vec::with_capacity(width * height);
        for (y, row) in tags.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(GridError::RaggedRow {
                    row: y,
                    expected: width,
                    found: row.len(),
                });
            }
            for (x, &tag) in row.iter().enumerate() {
                let cell = Cell::from_tag(tag).ok_or(GridError::InvalidTag { x, y, tag })?;
                cells.push(cell);
            }
        }

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Encodes the grid as row-major boundary tags (`tags[y][x]`).
    pub fn to_tags(&self) -> Vec<Vec<f64>> {
        self.cells
            .chunks(self.width.max(1))
            .map(|row| row.iter().map(Cell::tag).collect())
            .collect()
    }
}

impl FromStr for Grid {
    type Err = GridError;

    /// Parses `#` (wall) and `.` (open) rows; blank lines and surrounding
    /// whitespace are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let height = rows.len();
        let width = rows.first().map(|r| r.chars().count()).unwrap_or(0);
        if width == 0 {
            return Err(GridError::Empty);
        }

        let mut cells = Vec::with_capacity(width * height);
        for (y, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(GridError::RaggedRow {
                    row: y,
                    expected: width,
                    found,
                });
            }
            for (x, glyph) in row.chars().enumerate() {
                let cell = match glyph {
                    '#' => Cell::Wall,
                    '.' => Cell::Open,
                    _ => return Err(GridError::UnknownGlyph { x, y, glyph }),
                };
                cells.push(cell);
            }
        }

        Ok(Self {
            width,
            height,
            cells,
        })
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width.max(1)) {
            for cell in row {
                write!(f, "{}", cell.glyph())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
