use thiserror::Error;

/// Errors raised when building a [`Grid`](super::Grid) from external data.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GridError {
    #[error("Grid must have at least one row and one column")]
    Empty,

    #[error("Row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Invalid cell tag {tag} at ({x}, {y}): expected a negative wall tag or zero")]
    InvalidTag { x: usize, y: usize, tag: f64 },

    #[error("Unknown glyph {glyph:?} at ({x}, {y})")]
    UnknownGlyph { x: usize, y: usize, glyph: char },
}
