//! Mapping between world coordinates and grid cells.

use crate::error::GridError;
use crate::geom::{Bounds, Cell};

/// Direction of the world Y axis relative to grid rows.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AxisMode {
    /// Rows grow with world Y.
    #[default]
    YDown,
    /// Rows grow as world Y decreases (origin is the top-left corner).
    YUp,
}

/// Places a grid in world space: `origin` is the corner of cell `(0, 0)`
/// and every cell is a `cell_size × cell_size` square.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldFrame {
    pub origin: (f32, f32),
    pub cell_size: f32,
    pub axis: AxisMode,
}

impl WorldFrame {
    /// Create a frame. `cell_size` must be finite and positive.
    pub fn new(origin: (f32, f32), cell_size: f32, axis: AxisMode) -> Result<Self, GridError> {
        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(GridError::InvalidCellSize(cell_size));
        }
        Ok(Self {
            origin,
            cell_size,
            axis,
        })
    }

    /// The cell containing world point `(x, y)`. May lie outside any grid.
    pub fn to_cell(&self, x: f32, y: f32) -> Cell {
        let (ox, oy) = self.origin;
        let col = ((x - ox) / self.cell_size).floor() as i32;
        let row = match self.axis {
            AxisMode::YDown => ((y - oy) / self.cell_size).floor() as i32,
            AxisMode::YUp => ((oy - y) / self.cell_size).floor() as i32,
        };
        Cell::new(row, col)
    }

    /// Like [`to_cell`](Self::to_cell), clamped into `bounds`.
    pub fn to_cell_clamped(&self, x: f32, y: f32, bounds: Bounds) -> Cell {
        bounds.clamp(self.to_cell(x, y))
    }

    /// World coordinates of the centre of `c`.
    pub fn to_world(&self, c: Cell) -> (f32, f32) {
        let (ox, oy) = self.origin;
        let half = self.cell_size / 2.0;
        let x = ox + c.col as f32 * self.cell_size + half;
        let y = match self.axis {
            AxisMode::YDown => oy + c.row as f32 * self.cell_size + half,
            AxisMode::YUp => oy - c.row as f32 * self.cell_size - half,
        };
        (x, y)
    }
}
