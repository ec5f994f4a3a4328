//! A boolean occupancy grid for map representation.
//!
//! [`OccupancyGrid`] stores one `bool` per cell in row-major order, where
//! `true` means the cell is traversable. The grid owns plain data, so a
//! shared reference can be handed to several searches running on different
//! threads.

use std::fmt;
use std::str::FromStr;

use crate::error::GridError;
use crate::geom::{Bounds, Cell};

/// Character used for walkable cells in the text form.
pub const WALKABLE_CHAR: char = '.';
/// Character used for blocked cells in the text form.
pub const BLOCKED_CHAR: char = '#';

/// A rectangular, non-empty matrix of walkable/blocked cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyGrid {
    cells: Vec<bool>,
    bounds: Bounds,
}

impl OccupancyGrid {
    /// Bounds of a `rows × cols` grid, if such a grid can exist: both
    /// dimensions non-zero, each fitting in an `i32` and the cell count in a
    /// `usize`.
    pub fn checked_bounds(rows: usize, cols: usize) -> Result<Bounds, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::Empty);
        }
        let too_large = || GridError::TooLarge { rows, cols };
        let r = i32::try_from(rows).map_err(|_| too_large())?;
        let c = i32::try_from(cols).map_err(|_| too_large())?;
        rows.checked_mul(cols).ok_or_else(too_large)?;
        Ok(Bounds::new(r, c))
    }

    /// Create a `rows × cols` grid with every cell set to `walkable`.
    pub fn new(rows: usize, cols: usize, walkable: bool) -> Result<Self, GridError> {
        let bounds = Self::checked_bounds(rows, cols)?;
        Ok(Self {
            cells: vec![walkable; bounds.len()],
            bounds,
        })
    }

    /// Create a fully walkable `rows × cols` grid.
    pub fn open(rows: usize, cols: usize) -> Result<Self, GridError> {
        Self::new(rows, cols, true)
    }

    /// Build a grid from nested rows. All rows must have the same length.
    pub fn from_rows<R: AsRef<[bool]>>(rows: &[R]) -> Result<Self, GridError> {
        let Some(first) = rows.first() else {
            return Err(GridError::Empty);
        };
        let cols = first.as_ref().len();
        let bounds = Self::checked_bounds(rows.len(), cols)?;
        let mut cells = Vec::with_capacity(bounds.len());
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(GridError::Ragged {
                    row: i,
                    expected: cols,
                    found: row.len(),
                });
            }
            cells.extend_from_slice(row);
        }
        Ok(Self { cells, bounds })
    }

    /// Build a grid from a flat row-major buffer.
    pub fn from_vec(rows: usize, cols: usize, cells: Vec<bool>) -> Result<Self, GridError> {
        let bounds = Self::checked_bounds(rows, cols)?;
        if cells.len() != bounds.len() {
            return Err(GridError::SizeMismatch {
                expected: bounds.len(),
                found: cells.len(),
            });
        }
        Ok(Self { cells, bounds })
    }

    /// Build a grid by evaluating `f` at every cell.
    pub fn from_fn(
        rows: usize,
        cols: usize,
        mut f: impl FnMut(Cell) -> bool,
    ) -> Result<Self, GridError> {
        let mut grid = Self::new(rows, cols, false)?;
        for c in grid.bounds.iter() {
            if f(c) {
                grid.set(c, true);
            }
        }
        Ok(grid)
    }

    /// Returns the bounds of this grid.
    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.bounds.rows as usize
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.bounds.cols as usize
    }

    /// Whether the grid contains the given cell.
    #[inline]
    pub fn contains(&self, c: Cell) -> bool {
        self.bounds.contains(c)
    }

    /// Get the occupancy at a cell, or `None` if out of bounds.
    #[inline]
    pub fn get(&self, c: Cell) -> Option<bool> {
        self.bounds.index(c).map(|i| self.cells[i])
    }

    /// Whether `c` is in bounds and walkable.
    #[inline]
    pub fn is_walkable(&self, c: Cell) -> bool {
        self.get(c).unwrap_or(false)
    }

    /// Set the occupancy at a cell. Does nothing if out of bounds.
    pub fn set(&mut self, c: Cell, walkable: bool) {
        if let Some(i) = self.bounds.index(c) {
            self.cells[i] = walkable;
        }
    }

    /// Mark every cell of row `row` (when in range) with `walkable`.
    pub fn fill_row(&mut self, row: i32, walkable: bool) {
        for col in 0..self.bounds.cols {
            self.set(Cell::new(row, col), walkable);
        }
    }

    /// Mark every cell of column `col` (when in range) with `walkable`.
    pub fn fill_col(&mut self, col: i32, walkable: bool) {
        for row in 0..self.bounds.rows {
            self.set(Cell::new(row, col), walkable);
        }
    }

    /// A slice over row `row`, or `None` if out of range.
    pub fn row(&self, row: usize) -> Option<&[bool]> {
        if row >= self.rows() {
            return None;
        }
        let w = self.cols();
        Some(&self.cells[row * w..(row + 1) * w])
    }

    /// Iterate over the rows as slices.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[bool]> {
        self.cells.chunks(self.cols())
    }

    /// Iterate over `(Cell, walkable)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Cell, bool)> + '_ {
        self.bounds.iter().zip(self.cells.iter().copied())
    }

    /// Number of walkable cells.
    pub fn count_walkable(&self) -> usize {
        self.cells.iter().filter(|&&w| w).count()
    }
}

impl FromStr for OccupancyGrid {
    type Err = GridError;

    /// Parse the text form: one line per row, `.` walkable, `#` blocked.
    /// Blank lines and surrounding whitespace are ignored.
    fn from_str(s: &str) -> Result<Self, GridError> {
        let mut rows: Vec<Vec<bool>> = Vec::new();
        for line in s.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let r = rows.len();
            let row = line
                .chars()
                .enumerate()
                .map(|(col, ch)| match ch {
                    WALKABLE_CHAR => Ok(true),
                    BLOCKED_CHAR => Ok(false),
                    _ => Err(GridError::InvalidChar { ch, row: r, col }),
                })
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(row);
        }
        Self::from_rows(&rows)
    }
}

impl fmt::Display for OccupancyGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.iter_rows() {
            for &w in row {
                let ch = if w { WALKABLE_CHAR } else { BLOCKED_CHAR };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
