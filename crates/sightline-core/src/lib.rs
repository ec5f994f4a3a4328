//! **sightline-core**: grid geometry and occupancy maps.
//!
//! This crate provides the foundational types used by the *sightline*
//! path search: cell coordinates, grid bounds, the boolean occupancy grid,
//! world-space framing and the map-grid documents maps are loaded from.

pub mod codec;
pub mod error;
pub mod frame;
pub mod geom;
pub mod grid;
pub mod map;

pub use error::GridError;
pub use frame::{AxisMode, WorldFrame};
pub use geom::{Bounds, BoundsIter, Cell};
pub use grid::OccupancyGrid;
pub use map::{CompressedMapGrid, Corner, MapGrid, MapGridDoc};
