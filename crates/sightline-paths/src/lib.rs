//! Any-angle path search on occupancy grids.
//!
//! The centrepiece is [`ThetaStar`], a budgeted Theta* search over an
//! 8-connected grid whose paths are sequences of straight line-of-sight
//! segments. Around it sit the pieces it is built from:
//!
//! - [`MinHeap`], a binary min-heap used as the open set
//! - [`Registry`], an arena of search nodes with index parent links
//! - [`has_line_of_sight`] and the [`Line`] rasterizer
//! - [`find_nearest_walkable`], used to substitute unwalkable goals
//!
//! Grids are read through the [`Walkable`] trait, implemented for
//! [`OccupancyGrid`](sightline_core::OccupancyGrid).
//!
//! # Example
//!
//! ```
//! use sightline_core::{Cell, OccupancyGrid};
//! use sightline_paths::find_path;
//!
//! let grid: OccupancyGrid = "
//!     .....
//!     ..#..
//!     .....
//! "
//! .parse()
//! .unwrap();
//! let path = find_path(&grid, Cell::new(0, 0), Cell::new(2, 4));
//! assert_eq!(path.first(), Some(&Cell::new(0, 0)));
//! assert_eq!(path.last(), Some(&Cell::new(2, 4)));
//! ```

mod config;
mod distance;
mod error;
mod heap;
mod los;
mod nearest;
mod neighbors;
mod registry;
mod theta;
mod traits;

pub use config::SearchConfig;
pub use distance::{euclidean, manhattan};
pub use error::PathError;
pub use heap::MinHeap;
pub use los::{Line, has_line_of_sight};
pub use nearest::{
    DEFAULT_NEAREST_BUDGET, closest_walkable_position, find_nearest_walkable,
    find_nearest_walkable_within,
};
pub use neighbors::{DIRECTIONS, Neighbors, is_valid_move, step_cost};
pub use registry::{NodeId, OpenEntry, Registry, SearchNode};
pub use theta::{PathOutcome, Termination, ThetaStar, find_path, try_find_path};
pub use traits::Walkable;
