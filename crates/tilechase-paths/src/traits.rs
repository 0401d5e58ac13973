use tilechase_core::Point;

/// Minimal pathfinding interface: walkability and neighbor enumeration.
pub trait Pather {
    /// Whether `p` may be occupied. Searches never record a cell for which
    /// this returns `false`.
    fn passable(&self, p: Point) -> bool;

    /// Append neighbors of `p` into `buf`. The caller clears `buf` before calling.
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>);
}

/// Pather with weighted (positive-cost) edges.
pub trait WeightedPather: Pather {
    /// Cost of moving from `from` to adjacent `to`. Must be > 0.
    fn cost(&self, from: Point, to: Point) -> i32;
}
