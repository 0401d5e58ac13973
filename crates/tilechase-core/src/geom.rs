//! Grid cells and the rectangle a grid covers.
//!
//! Cells are addressed by [`Point`]. A [`Range`] bounds a grid as a half-open
//! rectangle, which may start at negative coordinates.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Add;

/// Integer coordinate of one grid cell.
///
/// Points are graph node identities: they hash and compare by coordinate, and
/// order row-major (`y` first, then `x`) so equal-cost search ties resolve the
/// same way on every run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Offsets a cell; used to step to neighbors.
impl Add for Point {
    type Output = Self;

    #[inline]
    fn add(self, d: Self) -> Self {
        Self::new(self.x + d.x, self.y + d.y)
    }
}

/// Cells covered by a grid: `min` inclusive, `max` exclusive.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    pub min: Point,
    pub max: Point,
}

impl Range {
    /// Range spanned by two corners given in any order.
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            min: Point::new(x0.min(x1), y0.min(y1)),
            max: Point::new(x0.max(x1), y0.max(y1)),
        }
    }

    /// Number of columns, the row stride of grid storage.
    #[inline]
    pub fn width(self) -> i32 {
        self.max.x - self.min.x
    }

    /// Number of cells covered.
    pub fn len(self) -> usize {
        if self.is_empty() {
            0
        } else {
            self.width() as usize * (self.max.y - self.min.y) as usize
        }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    #[inline]
    pub fn contains(self, p: Point) -> bool {
        (self.min.x..self.max.x).contains(&p.x) && (self.min.y..self.max.y).contains(&p.y)
    }

    /// Cells of the range, row-major.
    pub fn iter(self) -> RangeIter {
        RangeIter {
            range: self,
            next: self.min,
        }
    }
}

impl IntoIterator for Range {
    type Item = Point;
    type IntoIter = RangeIter;

    fn into_iter(self) -> RangeIter {
        self.iter()
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}-{})", self.min, self.max)
    }
}

/// Row-major walk over a [`Range`].
#[derive(Clone, Debug)]
pub struct RangeIter {
    range: Range,
    next: Point,
}

impl RangeIter {
    fn remaining(&self) -> usize {
        if self.range.is_empty() || self.next.y >= self.range.max.y {
            return 0;
        }
        let rows_below = (self.range.max.y - self.next.y - 1) as usize;
        (self.range.max.x - self.next.x) as usize + rows_below * self.range.width() as usize
    }
}

impl Iterator for RangeIter {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.remaining() == 0 {
            return None;
        }
        let p = self.next;
        self.next.x += 1;
        if self.next.x == self.range.max.x {
            self.next = Point::new(self.range.min.x, self.next.y + 1);
        }
        Some(p)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}

impl ExactSizeIterator for RangeIter {}
