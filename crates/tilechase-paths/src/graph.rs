use tilechase_core::{Point, Range, TileSource};

use crate::traits::{Pather, WeightedPather};

/// Neighbor offsets in enumeration order: right, left, up, down.
const DIRS: [Point; 4] = [
    Point::new(1, 0),
    Point::new(-1, 0),
    Point::new(0, 1),
    Point::new(0, -1),
];

/// 4-connected walkability graph over a tile grid.
///
/// A cell is walkable when it lies inside the source's bounds and holds tile
/// data. The graph borrows the source and has no state of its own, so any
/// number of searches may share one grid.
#[derive(Debug)]
pub struct GridGraph<'a, T: TileSource + ?Sized> {
    source: &'a T,
}

impl<T: TileSource + ?Sized> Clone for GridGraph<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: TileSource + ?Sized> Copy for GridGraph<'_, T> {}

impl<'a, T: TileSource + ?Sized> GridGraph<'a, T> {
    /// Wrap a tile source.
    pub fn new(source: &'a T) -> Self {
        Self { source }
    }

    /// The underlying tile source.
    pub fn source(&self) -> &'a T {
        self.source
    }

    /// Bounds of the underlying grid.
    pub fn bounds(&self) -> Range {
        self.source.bounds()
    }

    /// Whether `p` is inside the grid and holds tile data.
    #[inline]
    pub fn is_walkable(&self, p: Point) -> bool {
        self.source.bounds().contains(p) && self.source.tile_at(p).is_some()
    }

    /// Walkable cardinal neighbors of `p`, in the order right, left, up, down.
    pub fn neighbors(&self, p: Point) -> impl Iterator<Item = Point> + '_ {
        DIRS.into_iter()
            .map(move |d| p + d)
            .filter(move |&n| self.is_walkable(n))
    }

    /// Every walkable cell of the grid, row-major.
    pub fn walkable_cells(&self) -> impl Iterator<Item = Point> + '_ {
        self.bounds().iter().filter(move |&p| self.is_walkable(p))
    }
}

impl<T: TileSource + ?Sized> Pather for GridGraph<'_, T> {
    fn passable(&self, p: Point) -> bool {
        self.is_walkable(p)
    }

    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        buf.extend(GridGraph::neighbors(self, p));
    }
}

impl<T: TileSource + ?Sized> WeightedPather for GridGraph<'_, T> {
    fn cost(&self, _from: Point, _to: Point) -> i32 {
        1
    }
}
