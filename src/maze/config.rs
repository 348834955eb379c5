//! Configuration for maze generation.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Controls how much wall the randomized carving lays down.
///
/// Both ratios are in `[0, 1]` and are scaled by the (padded) maze
/// dimensions when generation starts.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeneratorConfig {
    /// Scales the length of each carving walk: `complexity × 5 × (w + h)` steps.
    pub complexity: f64,
    /// Scales the number of walk seeds: `density × (w / 2) × (h / 2)` walks.
    pub density: f64,
}

impl GeneratorConfig {
    /// Steps per carving walk for a padded `width × height` grid.
    pub fn walk_length(&self, width: usize, height: usize) -> usize {
        (self.complexity.clamp(0.0, 1.0) * (5 * (width + height)) as f64) as usize
    }

    /// Number of carving walks for a padded `width × height` grid.
    pub fn walk_count(&self, width: usize, height: usize) -> usize {
        (self.density.clamp(0.0, 1.0) * ((height / 2) * (width / 2)) as f64) as usize
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            complexity: 0.75,
            density: 0.75,
        }
    }
}
