//! Line of sight by integer Bresenham rasterization.

use sightline_core::Cell;

use crate::traits::Walkable;

/// Iterator over the cells of the Bresenham segment `from → to`, both
/// endpoints included.
///
/// The error terms are kept in `i64`, so any pair of `i32` cells is
/// accepted.
#[derive(Clone, Debug)]
pub struct Line {
    cur: Cell,
    end: Cell,
    drow: i64,
    dcol: i64,
    step: Cell,
    err: i64,
    done: bool,
}

impl Line {
    pub fn new(from: Cell, to: Cell) -> Self {
        let drow = i64::from(from.row.abs_diff(to.row));
        let dcol = i64::from(from.col.abs_diff(to.col));
        let step = Cell::new(
            if from.row < to.row { 1 } else { -1 },
            if from.col < to.col { 1 } else { -1 },
        );
        Self {
            cur: from,
            end: to,
            drow,
            dcol,
            step,
            err: drow - dcol,
            done: false,
        }
    }
}

impl Iterator for Line {
    type Item = Cell;

    fn next(&mut self) -> Option<Cell> {
        if self.done {
            return None;
        }
        let c = self.cur;
        if c == self.end {
            self.done = true;
            return Some(c);
        }
        let e2 = 2 * self.err;
        if e2 > -self.dcol {
            self.err -= self.dcol;
            self.cur.row += self.step.row;
        }
        if e2 < self.drow {
            self.err += self.drow;
            self.cur.col += self.step.col;
        }
        Some(c)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        let rest = self
            .end
            .row
            .abs_diff(self.cur.row)
            .max(self.end.col.abs_diff(self.cur.col)) as usize;
        (rest + 1, Some(rest + 1))
    }
}

impl ExactSizeIterator for Line {}

/// Whether every cell of the segment `from → to`, endpoints included, is
/// inside the grid and walkable.
pub fn has_line_of_sight<W: Walkable + ?Sized>(grid: &W, from: Cell, to: Cell) -> bool {
    if !grid.passable(from) || !grid.passable(to) {
        return false;
    }
    Line::new(from, to).all(|c| grid.passable(c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sightline_core::OccupancyGrid;

    fn line(a: (i32, i32), b: (i32, i32)) -> Vec<(i32, i32)> {
        Line::new(a.into(), b.into()).map(Into::into).collect()
    }

    #[test]
    fn single_cell() {
        assert_eq!(line((2, 2), (2, 2)), vec![(2, 2)]);
    }

    #[test]
    fn straight_and_diagonal() {
        assert_eq!(line((0, 0), (0, 3)), vec![(0, 0), (0, 1), (0, 2), (0, 3)]);
        assert_eq!(line((3, 1), (1, 1)), vec![(3, 1), (2, 1), (1, 1)]);
        assert_eq!(line((0, 0), (2, 2)), vec![(0, 0), (1, 1), (2, 2)]);
        assert_eq!(line((2, 0), (0, 2)), vec![(2, 0), (1, 1), (0, 2)]);
    }

    #[test]
    fn shallow_line() {
        assert_eq!(line((0, 0), (1, 4)), vec![(0, 0), (0, 1), (0, 2), (1, 3), (1, 4)]);
    }

    #[test]
    fn length_matches_size_hint() {
        for (a, b) in [((0, 0), (5, 2)), ((4, 7), (0, 0)), ((1, 1), (1, -6))] {
            let l = Line::new(a.into(), b.into());
            let n = l.len();
            let cells: Vec<Cell> = l.collect();
            assert_eq!(cells.len(), n);
            assert_eq!(cells.first(), Some(&Cell::from(a)));
            assert_eq!(cells.last(), Some(&Cell::from(b)));
            for w in cells.windows(2) {
                assert!(w[0].is_adjacent(w[1]));
            }
        }
    }

    #[test]
    fn open_grid_sees_everything() {
        let g = OccupancyGrid::open(6, 6).unwrap();
        assert!(has_line_of_sight(&g, Cell::new(0, 0), Cell::new(5, 3)));
        assert!(has_line_of_sight(&g, Cell::new(5, 5), Cell::new(0, 1)));
    }

    #[test]
    fn wall_blocks_sight() {
        let g: OccupancyGrid = "
            .....
            ..#..
            .....
        "
        .parse()
        .unwrap();
        assert!(!has_line_of_sight(&g, Cell::new(1, 0), Cell::new(1, 4)));
        assert!(has_line_of_sight(&g, Cell::new(0, 0), Cell::new(0, 4)));
    }

    #[test]
    fn endpoints_are_checked() {
        let g: OccupancyGrid = "
            ...
            ..#
        "
        .parse()
        .unwrap();
        assert!(!has_line_of_sight(&g, Cell::new(0, 0), Cell::new(1, 2)));
        assert!(!has_line_of_sight(&g, Cell::new(1, 2), Cell::new(0, 0)));
        assert!(!has_line_of_sight(&g, Cell::new(0, 0), Cell::new(0, 3)));
        assert!(!has_line_of_sight(&g, Cell::new(-1, 0), Cell::new(0, 0)));
    }

    #[test]
    fn extreme_coordinates_are_not_visible() {
        let g = OccupancyGrid::open(3, 3).unwrap();
        let origin = Cell::new(0, 0);
        assert!(!has_line_of_sight(&g, Cell::new(i32::MIN, 0), origin));
        assert!(!has_line_of_sight(&g, origin, Cell::new(i32::MAX, i32::MIN)));
        assert!(!has_line_of_sight(
            &g,
            Cell::new(i32::MIN, i32::MIN),
            Cell::new(i32::MAX, i32::MAX)
        ));
    }

    #[test]
    fn line_spans_full_i32_range() {
        let mut l = Line::new(Cell::new(i32::MIN, 0), Cell::new(i32::MAX, 0));
        assert_eq!(l.next(), Some(Cell::new(i32::MIN, 0)));
        assert_eq!(l.next(), Some(Cell::new(i32::MIN + 1, 0)));
        let top = Cell::new(i32::MAX, i32::MAX);
        let mut diag = Line::new(top, top.shift(-2, -2));
        assert_eq!(diag.len(), 3);
        assert_eq!(diag.nth(2), Some(Cell::new(i32::MAX - 2, i32::MAX - 2)));
    }
}
