//! Error kinds of maze generation and movement queries

/// Errors surfaced by the maze core
///
/// Walking into a wall, off the grid, or back into an already rewarded cell
/// are ordinary outcomes and never produce an error.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    /// Grid cannot host a start/end pair, or the graph has too few dead ends
    #[error("invalid maze configuration {rows}x{cols}: {reason}")]
    InvalidConfiguration {
        rows: usize,
        cols: usize,
        reason: String,
    },

    /// Bounded start/end sampling did not find a qualifying pair
    #[error("start/end selection gave up after {attempts} attempts")]
    SelectionExhausted { attempts: usize },

    /// Query on a cell that is not part of the wall lattice
    #[error("cell ({row}, {col}) is outside the maze")]
    OutOfBoundsQuery { row: usize, col: usize },
}
