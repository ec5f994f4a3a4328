use std::fmt;

use sightline_core::Cell;

/// Reasons a search produces no path at all.
///
/// Running out of budget is not an error: the search then returns its best
/// partial path instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathError {
    /// The start cell is outside the grid or not walkable.
    InvalidStart { cell: Cell },
    /// The goal is outside the grid, or unwalkable with no walkable cell
    /// found nearby within the search budget.
    UnreachableGoal { cell: Cell },
    /// The open set was popped while empty.
    EmptyQueue,
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidStart { cell } => {
                write!(f, "start {cell} is out of bounds or not walkable")
            }
            Self::UnreachableGoal { cell } => {
                write!(f, "goal {cell} has no reachable walkable cell")
            }
            Self::EmptyQueue => write!(f, "extract from an empty priority queue"),
        }
    }
}

impl std::error::Error for PathError {}
