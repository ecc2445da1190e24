use thiserror::Error;

use crate::grid::Point;

/// Reasons a maze is rejected before any search runs
#[derive(Error, Debug)]
pub enum MazeError {
    #[error("maze is empty")]
    Empty,

    #[error("maze must have exactly one start point, found {found}")]
    StartCount { found: usize },

    #[error("maze must have exactly one goal, found {found}")]
    GoalCount { found: usize },

    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("{what} {point} lies outside the maze")]
    OutOfBounds { what: &'static str, point: Point },

    #[error("{what} {point} is a wall")]
    OnWall { what: &'static str, point: Point },

    #[error("start and goal coincide at {point}")]
    StartIsGoal { point: Point },

    #[error("failed to read maze: {0}")]
    Io(#[from] std::io::Error),
}

/// Invariant violations inside the search machinery.
///
/// An unreachable goal is not an error, see [`crate::find::SearchState::NoPath`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    #[error("cannot remove from an empty frontier")]
    FrontierEmpty,
}
