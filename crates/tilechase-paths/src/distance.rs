use tilechase_core::Point;

/// Manhattan (L1) distance between two points.
///
/// This is the hop count of a shortest 4-connected path on an open grid.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}
