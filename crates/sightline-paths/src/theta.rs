//! Theta* any-angle search on 8-connected grids.
//!
//! Theta* runs like A*, except that when a neighbor can see the parent of
//! the node being expanded, the neighbor is attached to that parent
//! directly. Paths therefore consist of straight line-of-sight segments
//! rather than 45° staircases.
//!
//! The search is bounded: once more than [`SearchConfig::node_budget`]
//! nodes were expanded, popping a node whose straight-line distance to the
//! goal exceeds the distance cap ends it. If the goal was not reached, the
//! path to the node seen closest to the goal is returned instead.

use log::{debug, trace};
use sightline_core::{Bounds, Cell, WorldFrame};

use crate::config::SearchConfig;
use crate::distance::{euclidean, manhattan};
use crate::error::PathError;
use crate::heap::MinHeap;
use crate::los::has_line_of_sight;
use crate::nearest::{closest_walkable_position, find_nearest_walkable_within};
use crate::neighbors::{Neighbors, step_cost};
use crate::registry::{NodeId, OpenEntry, Registry};
use crate::traits::Walkable;

/// Why a search stopped.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Termination {
    /// The goal was popped from the open set.
    Reached,
    /// The open set ran dry without reaching the goal.
    Exhausted,
    /// The node budget and distance cap were both exceeded.
    Cutoff,
}

/// Result of a search that passed start/goal validation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathOutcome {
    /// Cells from `start` to the terminal node, both inclusive.
    pub cells: Vec<Cell>,
    /// Start actually searched from (differs from the request only when
    /// start relocation is enabled).
    pub start: Cell,
    /// Goal actually searched for, after nearest-walkable substitution.
    pub goal: Cell,
    /// Goal as requested by the caller.
    pub requested_goal: Cell,
    pub termination: Termination,
    /// Nodes popped and expanded, stale heap entries excluded.
    pub nodes_expanded: usize,
    /// Sum of the Euclidean lengths of the path's segments.
    pub cost: f64,
}

impl PathOutcome {
    /// Whether the path ends at [`goal`](Self::goal).
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.termination == Termination::Reached
    }

    /// Last cell of the path.
    #[inline]
    pub fn terminal(&self) -> Option<Cell> {
        self.cells.last().copied()
    }
}

/// Theta* path search with a fixed configuration.
///
/// A `ThetaStar` holds no per-search state: every call builds its own open
/// set and node registry, so one value may serve concurrent searches.
#[derive(Clone, Debug, Default)]
pub struct ThetaStar {
    config: SearchConfig,
}

impl ThetaStar {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Path from `start` towards `goal`, or an empty vector when start or
    /// goal validation fails.
    pub fn find_path<W: Walkable + ?Sized>(&self, grid: &W, start: Cell, goal: Cell) -> Vec<Cell> {
        match self.search(grid, start, goal) {
            Ok(outcome) => outcome.cells,
            Err(e) => {
                debug!("theta: no path: {e}");
                Vec::new()
            }
        }
    }

    /// Run the search and report how it ended.
    pub fn search<W: Walkable + ?Sized>(
        &self,
        grid: &W,
        start: Cell,
        goal: Cell,
    ) -> Result<PathOutcome, PathError> {
        trace!("theta: search {start} -> {goal}");
        let requested_goal = goal;
        let start = self.resolve_start(grid, start)?;
        let goal = self.resolve_goal(grid, goal)?;

        let cap = self.distance_cap(grid.bounds(), start, goal);
        let budget = self.config.node_budget;

        let mut reg = Registry::new();
        let mut open: MinHeap<OpenEntry> = MinHeap::new();
        let root = reg.insert_root(start, euclidean(start, goal));
        open.insert(reg.entry(root));

        let mut closest = root;
        let mut closest_h = reg.node(root).h;
        let mut expanded = 0usize;
        let mut termination = Termination::Exhausted;
        let mut nbuf = Neighbors::new();

        while !open.is_empty() {
            let current = open.extract_min()?;
            if reg.is_stale(&current) {
                continue;
            }
            reg.close(current.id);
            expanded += 1;

            if current.cell == goal {
                debug!("theta: reached {goal} after {expanded} nodes");
                termination = Termination::Reached;
                closest = current.id;
                break;
            }

            let node = reg.node(current.id);
            let (cur_g, cur_h) = (node.g, node.h);
            if cur_h < closest_h {
                closest = current.id;
                closest_h = cur_h;
            }

            if cur_h > cap && expanded > budget {
                debug!(
                    "theta: cutoff at {} ({cur_h:.2} > cap {cap}) after {expanded} nodes",
                    current.cell
                );
                termination = Termination::Cutoff;
                break;
            }

            // Shortcut source: the parent of `current`, which is closed and
            // thus has a final cost.
            let grandparent = node.parent.map(|p| {
                let pn = reg.node(p);
                (p, pn.cell, pn.g)
            });

            for &n in nbuf.moves(grid, current.cell) {
                if reg.lookup(n).is_some_and(|id| reg.node(id).closed) {
                    continue;
                }
                let (g, via) = match grandparent {
                    Some((p, pc, pg)) if has_line_of_sight(grid, pc, n) => {
                        (pg + euclidean(pc, n), p)
                    }
                    _ => (cur_g + step_cost(n - current.cell), current.id),
                };
                let ni = reg.get_or_insert(n);
                if reg.relax(ni, g, euclidean(n, goal), via) {
                    open.insert(reg.entry(ni));
                }
            }
        }

        if termination != Termination::Reached {
            debug!(
                "theta: {goal} not reached ({termination:?}) after {expanded} nodes, \
                 returning path to {}",
                reg.node(closest).cell
            );
        }
        Ok(self.outcome(&reg, closest, start, goal, requested_goal, termination, expanded))
    }

    /// The distance cap of a search: `distance_factor × Manhattan(start,
    /// goal)`, clamped to `rows * cols / area_divisor`.
    pub fn distance_cap(&self, bounds: Bounds, start: Cell, goal: Cell) -> f64 {
        let by_distance = i64::from(self.config.distance_factor) * i64::from(manhattan(start, goal));
        let by_area = bounds.len() as i64 / i64::from(self.config.area_divisor.max(1));
        by_distance.min(by_area) as f64
    }

    /// Snap a world position onto walkable ground using this search's
    /// nearest-walkable budget.
    pub fn closest_walkable_position<W: Walkable + ?Sized>(
        &self,
        grid: &W,
        frame: &WorldFrame,
        pos: (f32, f32),
    ) -> Option<(f32, f32)> {
        closest_walkable_position(grid, frame, pos, self.config.nearest_budget)
    }

    fn resolve_start<W: Walkable + ?Sized>(&self, grid: &W, start: Cell) -> Result<Cell, PathError> {
        if !grid.bounds().contains(start) {
            debug!("theta: start {start} outside {}", grid.bounds());
            return Err(PathError::InvalidStart { cell: start });
        }
        if grid.walkable(start) {
            return Ok(start);
        }
        if self.config.relocate_start {
            if let Some(c) = find_nearest_walkable_within(grid, start, self.config.nearest_budget) {
                debug!("theta: start {start} not walkable, using {c}");
                return Ok(c);
            }
        }
        debug!("theta: start {start} not walkable");
        Err(PathError::InvalidStart { cell: start })
    }

    fn resolve_goal<W: Walkable + ?Sized>(&self, grid: &W, goal: Cell) -> Result<Cell, PathError> {
        if !grid.bounds().contains(goal) {
            debug!("theta: goal {goal} outside {}", grid.bounds());
            return Err(PathError::UnreachableGoal { cell: goal });
        }
        if grid.walkable(goal) {
            return Ok(goal);
        }
        match find_nearest_walkable_within(grid, goal, self.config.nearest_budget) {
            Some(c) => {
                debug!("theta: goal {goal} not walkable, using {c}");
                Ok(c)
            }
            None => Err(PathError::UnreachableGoal { cell: goal }),
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn outcome(
        &self,
        reg: &Registry,
        terminal: NodeId,
        start: Cell,
        goal: Cell,
        requested_goal: Cell,
        termination: Termination,
        nodes_expanded: usize,
    ) -> PathOutcome {
        let cells = reg.reconstruct(terminal);
        trace!("theta: path of {} cells", cells.len());
        PathOutcome {
            cells,
            start,
            goal,
            requested_goal,
            termination,
            nodes_expanded,
            cost: reg.cost(terminal),
        }
    }
}

/// Theta* path with the default configuration. Empty when the start is
/// invalid or the goal has no reachable walkable substitute.
pub fn find_path<W: Walkable + ?Sized>(grid: &W, start: Cell, goal: Cell) -> Vec<Cell> {
    ThetaStar::default().find_path(grid, start, goal)
}

/// Like [`find_path`], but reports failures and search statistics.
pub fn try_find_path<W: Walkable + ?Sized>(
    grid: &W,
    start: Cell,
    goal: Cell,
) -> Result<PathOutcome, PathError> {
    ThetaStar::default().search(grid, start, goal)
}
