use sightline_core::{Bounds, Cell, OccupancyGrid};

/// Read-only occupancy interface consumed by every search in this crate.
pub trait Walkable {
    /// The rectangle of addressable cells.
    fn bounds(&self) -> Bounds;

    /// Whether `c` can be stood on. Only called for in-bounds cells.
    fn walkable(&self, c: Cell) -> bool;

    /// Whether `c` is in bounds and walkable.
    #[inline]
    fn passable(&self, c: Cell) -> bool {
        self.bounds().contains(c) && self.walkable(c)
    }
}

impl Walkable for OccupancyGrid {
    #[inline]
    fn bounds(&self) -> Bounds {
        OccupancyGrid::bounds(self)
    }

    #[inline]
    fn walkable(&self, c: Cell) -> bool {
        self.is_walkable(c)
    }
}

impl<W: Walkable + ?Sized> Walkable for &W {
    #[inline]
    fn bounds(&self) -> Bounds {
        (**self).bounds()
    }

    #[inline]
    fn walkable(&self, c: Cell) -> bool {
        (**self).walkable(c)
    }
}
