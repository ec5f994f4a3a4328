use std::f64::consts::SQRT_2;

use sightline_core::Cell;

use crate::traits::Walkable;

/// The eight unit steps: four cardinal moves, then four diagonals.
pub const DIRECTIONS: [Cell; 8] = [
    Cell::new(-1, 0),
    Cell::new(1, 0),
    Cell::new(0, -1),
    Cell::new(0, 1),
    Cell::new(-1, -1),
    Cell::new(-1, 1),
    Cell::new(1, -1),
    Cell::new(1, 1),
];

/// Whether the unit step `d` is diagonal.
#[inline]
pub fn is_diagonal(d: Cell) -> bool {
    d.row != 0 && d.col != 0
}

/// Cost of a single unit step: `1` cardinal, `√2` diagonal.
#[inline]
pub fn step_cost(d: Cell) -> f64 {
    if is_diagonal(d) { SQRT_2 } else { 1.0 }
}

/// Whether moving from `from` by unit step `d` keeps clear of corners.
///
/// Cardinal steps are always allowed. A diagonal step needs at least one of
/// the two orthogonal cells it passes between to be walkable; both must be
/// inside the grid.
pub fn corner_clear<W: Walkable + ?Sized>(grid: &W, from: Cell, d: Cell) -> bool {
    if !is_diagonal(d) {
        return true;
    }
    let a = from.shift(d.row, 0);
    let b = from.shift(0, d.col);
    let bounds = grid.bounds();
    if !bounds.contains(a) || !bounds.contains(b) {
        return false;
    }
    grid.walkable(a) || grid.walkable(b)
}

/// Whether `from → to` is a legal single move: adjacent, `to` passable and
/// no corner cut.
pub fn is_valid_move<W: Walkable + ?Sized>(grid: &W, from: Cell, to: Cell) -> bool {
    from.is_adjacent(to) && grid.passable(to) && corner_clear(grid, from, to - from)
}

/// Cached neighbor computation helper.
///
/// Enumerates the 8-connected neighbors of a cell into a reusable buffer.
pub struct Neighbors {
    buf: Vec<Cell>,
}

impl Default for Neighbors {
    fn default() -> Self {
        Self::new()
    }
}

impl Neighbors {
    /// Create a new `Neighbors` helper.
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(8),
        }
    }

    /// Return the 8 neighbors of `c` for which `keep` returns `true`.
    pub fn all(&mut self, c: Cell, keep: impl Fn(Cell) -> bool) -> &[Cell] {
        self.buf.clear();
        for d in DIRECTIONS {
            let n = c + d;
            if keep(n) {
                self.buf.push(n);
            }
        }
        &self.buf
    }

    /// Return the neighbors of `c` reachable with one legal move.
    pub fn moves<W: Walkable + ?Sized>(&mut self, grid: &W, c: Cell) -> &[Cell] {
        self.all(c, |n| is_valid_move(grid, c, n))
    }
}
