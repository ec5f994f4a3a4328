use std::fmt;

/// Errors raised while building, decoding or framing an occupancy grid.
#[derive(Debug, Clone, PartialEq)]
pub enum GridError {
    /// The grid would have zero rows or zero columns.
    Empty,
    /// Row `row` has `found` cells where `expected` were required.
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// `rows × cols` does not fit the `i32` cell coordinates.
    TooLarge { rows: usize, cols: usize },
    /// A flat cell buffer does not match `rows * cols`.
    SizeMismatch { expected: usize, found: usize },
    /// An RLE token could not be parsed as a run length.
    InvalidRun { row: usize, token: String },
    /// Decoded runs of row `row` add up to `found` cells instead of `expected`.
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A map character other than `.` or `#` was found.
    InvalidChar { ch: char, row: usize, col: usize },
    /// Cell size must be finite and strictly positive.
    InvalidCellSize(f32),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "grid: zero rows or columns"),
            Self::Ragged {
                row,
                expected,
                found,
            } => write!(f, "grid: row {row} has {found} cells, expected {expected}"),
            Self::TooLarge { rows, cols } => {
                write!(f, "grid: {rows}x{cols} exceeds the addressable size")
            }
            Self::SizeMismatch { expected, found } => {
                write!(f, "grid: buffer holds {found} cells, expected {expected}")
            }
            Self::InvalidRun { row, token } => {
                write!(f, "grid: row {row}: invalid run length \u{201c}{token}\u{201d}")
            }
            Self::RowLength {
                row,
                expected,
                found,
            } => write!(f, "grid: row {row} decodes to {found} cells, expected {expected}"),
            Self::InvalidChar { ch, row, col } => {
                write!(f, "grid: invalid character \u{201c}{ch}\u{201d} at ({row}, {col})")
            }
            Self::InvalidCellSize(s) => write!(f, "grid: invalid cell size {s}"),
        }
    }
}

impl std::error::Error for GridError {}
