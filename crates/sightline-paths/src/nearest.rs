//! Nearest-walkable-cell search.
//!
//! A uniform-cost expansion (no heuristic) outward from a target cell over
//! all in-bounds 8-neighbors, walkable or not, without the corner rule. The
//! first walkable cell to be popped is the closest one by octile cost.

use log::debug;
use sightline_core::{Cell, WorldFrame};

use crate::heap::MinHeap;
use crate::neighbors::{DIRECTIONS, step_cost};
use crate::registry::{OpenEntry, Registry};
use crate::traits::Walkable;

/// Default pop budget of the nearest-walkable search.
pub const DEFAULT_NEAREST_BUDGET: usize = 1000;

/// Closest walkable cell to `target` within [`DEFAULT_NEAREST_BUDGET`] pops.
pub fn find_nearest_walkable<W: Walkable + ?Sized>(grid: &W, target: Cell) -> Option<Cell> {
    find_nearest_walkable_within(grid, target, DEFAULT_NEAREST_BUDGET)
}

/// Closest walkable cell to `target`, giving up after `budget` pops.
///
/// Returns `target` itself when it is walkable, and `None` when `target`
/// lies outside the grid or nothing walkable turns up in time.
pub fn find_nearest_walkable_within<W: Walkable + ?Sized>(
    grid: &W,
    target: Cell,
    budget: usize,
) -> Option<Cell> {
    let bounds = grid.bounds();
    if !bounds.contains(target) {
        debug!("nearest: target {target} outside {bounds}");
        return None;
    }

    let mut reg = Registry::new();
    let mut open: MinHeap<OpenEntry> = MinHeap::new();
    let root = reg.insert_root(target, 0.0);
    open.insert(reg.entry(root));

    let mut explored = 0;
    while explored < budget {
        let Ok(current) = open.extract_min() else {
            break;
        };
        if reg.is_stale(&current) {
            continue;
        }
        explored += 1;

        if grid.walkable(current.cell) {
            debug!(
                "nearest: {} is walkable, {explored} nodes explored from {target}",
                current.cell
            );
            return Some(current.cell);
        }
        reg.close(current.id);

        let g = reg.node(current.id).g;
        for d in DIRECTIONS {
            let n = current.cell + d;
            if !bounds.contains(n) {
                continue;
            }
            let ni = reg.get_or_insert(n);
            if reg.relax(ni, g + step_cost(d), 0.0, current.id) {
                open.insert(reg.entry(ni));
            }
        }
    }

    debug!("nearest: nothing walkable near {target} after {explored} nodes");
    None
}

/// Snap a world position onto walkable ground.
///
/// Returns `pos` unchanged if it lies on a walkable cell, otherwise the
/// centre of the nearest walkable cell (searching from the cell under `pos`
/// clamped into the grid), or `None` if there is none within `budget`.
pub fn closest_walkable_position<W: Walkable + ?Sized>(
    grid: &W,
    frame: &WorldFrame,
    pos: (f32, f32),
    budget: usize,
) -> Option<(f32, f32)> {
    let cell = frame.to_cell(pos.0, pos.1);
    if grid.passable(cell) {
        return Some(pos);
    }
    let from = grid.bounds().clamp(cell);
    find_nearest_walkable_within(grid, from, budget).map(|c| frame.to_world(c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sightline_core::{AxisMode, OccupancyGrid};

    #[test]
    fn walkable_target_is_its_own_answer() {
        let g = OccupancyGrid::open(3, 3).unwrap();
        assert_eq!(find_nearest_walkable(&g, Cell::new(1, 1)), Some(Cell::new(1, 1)));
    }

    #[test]
    fn blocked_corner_moves_to_orthogonal_neighbor() {
        let mut g = OccupancyGrid::open(5, 5).unwrap();
        g.set(Cell::new(4, 4), false);
        // (3, 4) and (4, 3) tie at cost 1; row-major order picks (3, 4).
        assert_eq!(find_nearest_walkable(&g, Cell::new(4, 4)), Some(Cell::new(3, 4)));
    }

    #[test]
    fn blocked_block_searches_outwards() {
        let g = OccupancyGrid::from_fn(7, 7, |c| {
            !(1..=5).contains(&c.row) || !(1..=5).contains(&c.col)
        })
        .unwrap();
        let found = find_nearest_walkable(&g, Cell::new(3, 3)).unwrap();
        assert_eq!(found, Cell::new(0, 3));
        assert!(g.is_walkable(found));
    }

    #[test]
    fn budget_exhaustion_gives_up() {
        let g = OccupancyGrid::from_fn(7, 7, |c| {
            !(1..=5).contains(&c.row) || !(1..=5).contains(&c.col)
        })
        .unwrap();
        assert_eq!(find_nearest_walkable_within(&g, Cell::new(3, 3), 1), None);
        assert_eq!(find_nearest_walkable_within(&g, Cell::new(3, 3), 0), None);
    }

    #[test]
    fn nothing_walkable() {
        let g = OccupancyGrid::new(4, 4, false).unwrap();
        assert_eq!(find_nearest_walkable(&g, Cell::new(2, 2)), None);
    }

    #[test]
    fn out_of_bounds_target() {
        let g = OccupancyGrid::open(4, 4).unwrap();
        assert_eq!(find_nearest_walkable(&g, Cell::new(4, 0)), None);
        assert_eq!(find_nearest_walkable(&g, Cell::new(-1, -1)), None);
    }

    #[test]
    fn world_position_snapping() {
        let mut g = OccupancyGrid::open(5, 5).unwrap();
        g.set(Cell::new(2, 2), false);
        let frame = WorldFrame::new((0.0, 0.0), 1.0, AxisMode::YDown).unwrap();
        assert_eq!(
            closest_walkable_position(&g, &frame, (0.2, 0.7), 100),
            Some((0.2, 0.7))
        );
        // Cell (2, 2) is blocked; (1, 2) wins the tie and its centre is returned.
        assert_eq!(
            closest_walkable_position(&g, &frame, (2.5, 2.5), 100),
            Some((2.5, 1.5))
        );
    }

    #[test]
    fn world_position_outside_grid_is_clamped() {
        let g = OccupancyGrid::open(3, 3).unwrap();
        let frame = WorldFrame::new((0.0, 0.0), 1.0, AxisMode::YDown).unwrap();
        assert_eq!(
            closest_walkable_position(&g, &frame, (10.0, -4.0), 100),
            Some((2.5, 0.5))
        );
    }
}
