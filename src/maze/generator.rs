//! Randomized wall-carving maze generator.
//!
//! Generation works on a padded grid whose dimensions are always odd and
//! whose outer ring is wall:
//!
//! 1. Start with every interior cell open and the border tagged wall.
//! 2. For each of `walk_count` seeds, pick a random even-aligned cell and
//!    mark it wall.
//! 3. From the seed, walk up to `walk_length` steps. Each step picks a random
//!    orthogonal neighbour two cells away that is still open, walls it and
//!    the midpoint in between, and continues from there. The walk ends early
//!    when no such neighbour exists.
//!
//! The result is a set of sparse wall segments. The carving does not verify
//! connectivity: multiple routes may exist between two cells and some open
//! pockets may be sealed off entirely.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::config::GeneratorConfig;
use super::grid::{Cell, Grid};
use crate::types::Coord;

/// Produces wall/open grids by randomized carving.
#[derive(Debug, Clone, Default)]
pub struct MazeGenerator {
    config: GeneratorConfig,
}

impl MazeGenerator {
    /// Creates a generator with the given carving ratios.
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Padded (bordered) dimension for a requested size.
    ///
    /// Always odd and at least `requested + 2`, so stripping the border
    /// leaves an odd interior.
    pub fn padded_dimension(requested: usize) -> usize {
        if requested % 2 == 0 {
            requested + 3
        } else {
            requested + 2
        }
    }

    /// Generates a maze of roughly `width × height` cells.
    ///
    /// The returned grid is the interior of the carved grid, so each side is
    /// `requested` when odd and `requested + 1` when even.
    pub fn generate<R: Rng + ?Sized>(&self, width: usize, height: usize, rng: &mut R) -> Grid {
        self.carve(width, height, rng).interior()
    }

    /// Same as [`generate`](Self::generate) with a seeded [`StdRng`].
    pub fn generate_seeded(&self, width: usize, height: usize, seed: u64) -> Grid {
        let mut rng = StdRng::seed_from_u64(seed);
        self.generate(width, height, &mut rng)
    }

    /// Runs the carving on the padded grid and returns it with its border.
    pub fn carve<R: Rng + ?Sized>(&self, width: usize, height: usize, rng: &mut R) -> Grid {
        let width = Self::padded_dimension(width);
        let height = Self::padded_dimension(height);
        let walk_length = self.config.walk_length(width, height);
        let walk_count = self.config.walk_count(width, height);

        let mut grid = Grid::open(width, height);
        for x in 0..width {
            grid.set(Coord::new(x, 0), Cell::Wall);
            grid.set(Coord::new(x, height - 1), Cell::Wall);
        }
        for y in 0..height {
            grid.set(Coord::new(0, y), Cell::Wall);
            grid.set(Coord::new(width - 1, y), Cell::Wall);
        }

        for _ in 0..walk_count {
            let mut current = Coord::new(
                rng.gen_range(0..=width / 2) * 2,
                rng.gen_range(0..=height / 2) * 2,
            );
            grid.set(current, Cell::Wall);

            for _ in 0..walk_length {
                let candidates = carving_candidates(&grid, current);
                let Some(&next) = candidates.choose(rng) else {
                    break;
                };
                grid.set(next, Cell::Wall);
                grid.set(
                    Coord::new((current.x + next.x) / 2, (current.y + next.y) / 2),
                    Cell::Wall,
                );
                current = next;
            }
        }

        debug!(
            width,
            height,
            walk_count,
            walk_length,
            open = grid.open_cells().len(),
            "carved maze"
        );
        grid
    }
}

/// Open cells two steps away from `from`, in left, right, up, down order.
fn carving_candidates(grid: &Grid, from: Coord) -> Vec<Coord> {
    let (w, h) = (grid.width(), grid.height());
    let mut out = Vec::with_capacity(4);
    if from.x > 1 {
        out.push(Coord::new(from.x - 2, from.y));
    }
    if from.x + 2 < w {
        out.push(Coord::new(from.x + 2, from.y));
    }
    if from.y > 1 {
        out.push(Coord::new(from.x, from.y - 2));
    }
    if from.y + 2 < h {
        out.push(Coord::new(from.x, from.y + 2));
    }
    out.retain(|c| grid.is_open(*c));
    out
}
