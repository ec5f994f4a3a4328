//! Map-grid documents: an occupancy grid plus its placement in the world.
//!
//! [`MapGridDoc`] mirrors the JSON layout produced by the map exporter
//! (`mapName`, `cornerA`, `nRows`, `matrix`, ...). [`MapGrid`] is the
//! validated form, and [`CompressedMapGrid`] stores rows run-length encoded.

use crate::codec::{decode_row, encode_row};
use crate::error::GridError;
use crate::frame::{AxisMode, WorldFrame};
use crate::grid::OccupancyGrid;

/// A corner on the horizontal world plane.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Corner {
    pub x: f32,
    pub z: f32,
}

/// Raw map-grid document. `matrix` holds one integer per cell, non-zero
/// meaning walkable.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct MapGridDoc {
    pub id: u16,
    #[cfg_attr(feature = "serde", serde(rename = "mapName"))]
    pub name: String,
    pub corner_a: Corner,
    pub corner_b: Corner,
    pub n_rows: usize,
    pub n_cols: usize,
    pub cell_size: f32,
    pub matrix: Vec<Vec<u8>>,
}

/// A validated map grid.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "MapGridDoc", into = "MapGridDoc")
)]
pub struct MapGrid {
    pub id: u16,
    pub name: String,
    pub corner_a: Corner,
    pub corner_b: Corner,
    pub cell_size: f32,
    pub grid: OccupancyGrid,
}

impl MapGrid {
    /// World frame anchored at `corner_a`.
    pub fn frame(&self, axis: AxisMode) -> Result<WorldFrame, GridError> {
        WorldFrame::new((self.corner_a.x, self.corner_a.z), self.cell_size, axis)
    }

    /// Run-length encode every row.
    pub fn compress(&self) -> CompressedMapGrid {
        CompressedMapGrid {
            id: self.id,
            name: self.name.clone(),
            corner_a: self.corner_a,
            corner_b: self.corner_b,
            n_rows: self.grid.rows(),
            n_cols: self.grid.cols(),
            cell_size: self.cell_size,
            grid_compressed: self.grid.iter_rows().map(encode_row).collect(),
        }
    }
}

impl TryFrom<MapGridDoc> for MapGrid {
    type Error = GridError;

    fn try_from(doc: MapGridDoc) -> Result<Self, GridError> {
        if doc.matrix.len() != doc.n_rows {
            return Err(GridError::SizeMismatch {
                expected: doc.n_rows,
                found: doc.matrix.len(),
            });
        }
        OccupancyGrid::checked_bounds(doc.n_rows, doc.n_cols)?;
        if let Some((row, values)) = doc
            .matrix
            .iter()
            .enumerate()
            .find(|(_, values)| values.len() != doc.n_cols)
        {
            return Err(GridError::Ragged {
                row,
                expected: doc.n_cols,
                found: values.len(),
            });
        }
        let cells = doc.matrix.iter().flatten().map(|&v| v != 0).collect();
        Ok(Self {
            id: doc.id,
            name: doc.name,
            corner_a: doc.corner_a,
            corner_b: doc.corner_b,
            cell_size: doc.cell_size,
            grid: OccupancyGrid::from_vec(doc.n_rows, doc.n_cols, cells)?,
        })
    }
}

impl From<MapGrid> for MapGridDoc {
    fn from(map: MapGrid) -> Self {
        Self {
            id: map.id,
            name: map.name,
            corner_a: map.corner_a,
            corner_b: map.corner_b,
            n_rows: map.grid.rows(),
            n_cols: map.grid.cols(),
            cell_size: map.cell_size,
            matrix: map
                .grid
                .iter_rows()
                .map(|r| r.iter().map(|&w| u8::from(w)).collect())
                .collect(),
        }
    }
}

/// A map grid whose rows are run-length encoded (see [`crate::codec`]).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CompressedMapGrid {
    pub id: u16,
    pub name: String,
    pub corner_a: Corner,
    pub corner_b: Corner,
    pub n_rows: usize,
    pub n_cols: usize,
    pub cell_size: f32,
    pub grid_compressed: Vec<String>,
}

impl CompressedMapGrid {
    /// Decode every row back into a [`MapGrid`].
    pub fn decompress(&self) -> Result<MapGrid, GridError> {
        if self.grid_compressed.len() != self.n_rows {
            return Err(GridError::SizeMismatch {
                expected: self.n_rows,
                found: self.grid_compressed.len(),
            });
        }
        OccupancyGrid::checked_bounds(self.n_rows, self.n_cols)?;
        let mut cells = Vec::new();
        for (row, encoded) in self.grid_compressed.iter().enumerate() {
            cells.extend(decode_row(encoded, self.n_cols, row)?);
        }
        Ok(MapGrid {
            id: self.id,
            name: self.name.clone(),
            corner_a: self.corner_a,
            corner_b: self.corner_b,
            cell_size: self.cell_size,
            grid: OccupancyGrid::from_vec(self.n_rows, self.n_cols, cells)?,
        })
    }
}
