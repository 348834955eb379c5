//! State-transition quality table.
//!
//! One scalar per ordered `(state, next_state)` pair over the whole grid,
//! stored densely. For a `w × h` grid that is `(w·h)²` entries, so the table
//! is meant for small grids: a 101 × 101 maze already needs ~800 MB.

use super::error::LearnError;
use crate::types::Coord;

/// Learned desirability of moving from one state into another.
#[derive(Debug, Clone, PartialEq)]
pub struct QualityTable {
    width: usize,
    height: usize,
    values: Vec<f64>,
}

impl QualityTable {
    /// Zero-initialized table for a `width × height` grid.
    ///
    /// # Errors
    ///
    /// Returns [`LearnError::TableTooLarge`] when the entry count overflows
    /// `usize`.
    pub fn new(width: usize, height: usize) -> Result<Self, LearnError> {
        let entries = width
            .checked_mul(height)
            .and_then(|states| states.checked_mul(states))
            .ok_or(LearnError::TableTooLarge { width, height })?;
        Ok(Self {
            width,
            height,
            values: vec![0.0; entries],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn contains(&self, coord: Coord) -> bool {
        coord.x < self.width && coord.y < self.height
    }

    fn index(&self, state: Coord, next: Coord) -> Option<usize> {
        if !self.contains(state) || !self.contains(next) {
            return None;
        }
        let states = self.width * self.height;
        let from = state.y * self.width + state.x;
        let to = next.y * self.width + next.x;
        Some(from * states + to)
    }

    /// Stored quality for `state → next`. Out-of-bounds pairs read as `0.0`.
    pub fn get(&self, state: Coord, next: Coord) -> f64 {
        self.index(state, next)
            .map(|i| self.values[i])
            .unwrap_or(0.0)
    }

    /// Stores the quality for `state → next`.
    pub fn set(&mut self, state: Coord, next: Coord, value: f64) -> Result<(), LearnError> {
        let i = self
            .index(state, next)
            .ok_or(LearnError::OutOfBounds {
                state: if self.contains(state) { next } else { state },
            })?;
        self.values[i] = value;
        Ok(())
    }

    /// Highest stored quality for `state → n` over `candidates`, or `None`
    /// when `candidates` is empty.
    pub fn max_over(&self, state: Coord, candidates: &[Coord]) -> Option<f64> {
        candidates
            .iter()
            .map(|n| self.get(state, *n))
            .reduce(f64::max)
    }

    /// Candidate with the strictly greatest quality from `state`.
    ///
    /// Ties go to the earliest candidate in iteration order.
    pub fn best_next_state(&self, state: Coord, candidates: &[Coord]) -> Result<Coord, LearnError> {
        let (&first, rest) = candidates
            .split_first()
            .ok_or(LearnError::NoViableMove { state })?;
        let mut best = first;
        let mut best_value = self.get(state, first);
        for &candidate in rest {
            let value = self.get(state, candidate);
            if value > best_value {
                best = candidate;
                best_value = value;
            }
        }
        Ok(best)
    }

    /// Sum of absolute element-wise differences against `other`.
    pub fn total_abs_diff(&self, other: &QualityTable) -> f64 {
        debug_assert_eq!(self.values.len(), other.values.len());
        self.values
            .iter()
            .zip(&other.values)
            .map(|(a, b)| (a - b).abs())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_table_is_zeroed_and_sized() {
        let q = QualityTable::new(3, 2).unwrap();
        assert_eq!(q.len(), 36);
        assert_eq!(q.get(Coord::new(2, 1), Coord::new(0, 0)), 0.0);
    }

    #[test]
    fn oversized_grid_is_rejected() {
        let err = QualityTable::new(usize::MAX / 2, 3).unwrap_err();
        assert_eq!(
            err,
            LearnError::TableTooLarge {
                width: usize::MAX / 2,
                height: 3
            }
        );
        assert!(QualityTable::new(1 << 20, 1 << 20).is_err());
    }

    #[test]
    fn empty_grid_has_empty_table() {
        assert!(QualityTable::new(0, 7).unwrap().is_empty());
    }

    #[test]
    fn set_then_get_is_directional() {
        let mut q = QualityTable::new(3, 3).unwrap();
        let a = Coord::new(0, 0);
        let b = Coord::new(1, 0);
        q.set(a, b, 0.25).unwrap();
        assert_eq!(q.get(a, b), 0.25);
        assert_eq!(q.get(b, a), 0.0);
    }

    #[test]
    fn set_out_of_bounds_fails() {
        let mut q = QualityTable::new(2, 2).unwrap();
        let err = q.set(Coord::new(0, 0), Coord::new(2, 0), 1.0).unwrap_err();
        assert_eq!(
            err,
            LearnError::OutOfBounds {
                state: Coord::new(2, 0)
            }
        );
    }

    #[test]
    fn best_next_state_prefers_first_maximum() {
        let mut q = QualityTable::new(3, 3).unwrap();
        let s = Coord::new(1, 1);
        let a = Coord::new(0, 1);
        let b = Coord::new(2, 1);
        let c = Coord::new(1, 0);
        q.set(s, a, 0.3).unwrap();
        q.set(s, b, 0.9).unwrap();
        q.set(s, c, 0.9).unwrap();
        assert_eq!(q.best_next_state(s, &[a, b, c]).unwrap(), b);
    }

    #[test]
    fn best_next_state_all_zero_picks_first() {
        let q = QualityTable::new(3, 3).unwrap();
        let cands = [Coord::new(2, 1), Coord::new(1, 2)];
        assert_eq!(
            q.best_next_state(Coord::new(1, 1), &cands).unwrap(),
            Coord::new(2, 1)
        );
    }

    #[test]
    fn best_next_state_handles_negative_values() {
        let mut q = QualityTable::new(2, 2).unwrap();
        let s = Coord::new(0, 0);
        q.set(s, Coord::new(1, 0), -0.5).unwrap();
        q.set(s, Coord::new(0, 1), -0.1).unwrap();
        assert_eq!(
            q.best_next_state(s, &[Coord::new(1, 0), Coord::new(0, 1)])
                .unwrap(),
            Coord::new(0, 1)
        );
    }

    #[test]
    fn best_next_state_empty_is_no_viable_move() {
        let q = QualityTable::new(2, 2).unwrap();
        let s = Coord::new(1, 1);
        assert_eq!(
            q.best_next_state(s, &[]).unwrap_err(),
            LearnError::NoViableMove { state: s }
        );
    }

    #[test]
    fn max_over_empty_is_none() {
        let q = QualityTable::new(2, 2).unwrap();
        assert_eq!(q.max_over(Coord::origin(), &[]), None);
    }

    #[test]
    fn total_abs_diff_sums_element_wise() {
        let mut a = QualityTable::new(2, 2).unwrap();
        let b = a.clone();
        a.set(Coord::new(0, 0), Coord::new(1, 0), 0.5).unwrap();
        a.set(Coord::new(1, 1), Coord::new(0, 1), -0.25).unwrap();
        assert_eq!(a.total_abs_diff(&b), 0.75);
        assert_eq!(b.total_abs_diff(&a), 0.75);
        assert_eq!(a.total_abs_diff(&a), 0.0);
    }
}
