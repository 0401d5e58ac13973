//! Conversion between world positions and grid cells.

use glam::Vec2;

use crate::geom::Point;

/// Maps continuous world positions onto grid cells and back.
pub trait CellMapper {
    /// The cell containing world position `pos`.
    fn world_to_cell(&self, pos: Vec2) -> Point;

    /// World-space centre of cell `p`.
    fn cell_center(&self, p: Point) -> Vec2;
}

impl<T: CellMapper + ?Sized> CellMapper for &T {
    fn world_to_cell(&self, pos: Vec2) -> Point {
        (**self).world_to_cell(pos)
    }

    fn cell_center(&self, p: Point) -> Vec2 {
        (**self).cell_center(p)
    }
}

/// An axis-aligned rectangular cell layout.
///
/// Cell `(0, 0)` covers `[origin, origin + cell_size)`. Cells extend in both
/// directions, so negative coordinates are valid.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellLayout {
    pub origin: Vec2,
    pub cell_size: Vec2,
}

impl Default for CellLayout {
    fn default() -> Self {
        Self {
            origin: Vec2::ZERO,
            cell_size: Vec2::ONE,
        }
    }
}

impl CellLayout {
    /// Square cells of side `size` anchored at the world origin.
    pub fn square(size: f32) -> Self {
        Self {
            origin: Vec2::ZERO,
            cell_size: Vec2::splat(size),
        }
    }

    /// Set the world origin (builder).
    pub fn with_origin(mut self, origin: Vec2) -> Self {
        self.origin = origin;
        self
    }
}

impl CellMapper for CellLayout {
    fn world_to_cell(&self, pos: Vec2) -> Point {
        let local = (pos - self.origin) / self.cell_size;
        Point::new(local.x.floor() as i32, local.y.floor() as i32)
    }

    fn cell_center(&self, p: Point) -> Vec2 {
        self.origin + (Vec2::new(p.x as f32, p.y as f32) + Vec2::splat(0.5)) * self.cell_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_layout_centres() {
        let l = CellLayout::default();
        assert_eq!(l.cell_center(Point::new(0, 0)), Vec2::new(0.5, 0.5));
        assert_eq!(l.cell_center(Point::new(3, -2)), Vec2::new(3.5, -1.5));
    }

    #[test]
    fn world_to_cell_floors() {
        let l = CellLayout::default();
        assert_eq!(l.world_to_cell(Vec2::new(0.99, 0.0)), Point::new(0, 0));
        assert_eq!(l.world_to_cell(Vec2::new(1.0, 2.5)), Point::new(1, 2));
        assert_eq!(l.world_to_cell(Vec2::new(-0.1, -1.0)), Point::new(-1, -1));
    }

    #[test]
    fn scaled_and_offset_layout() {
        let l = CellLayout::square(2.0).with_origin(Vec2::new(10.0, 0.0));
        assert_eq!(l.cell_center(Point::new(1, 1)), Vec2::new(13.0, 3.0));
        assert_eq!(l.world_to_cell(Vec2::new(13.0, 3.0)), Point::new(1, 1));
        assert_eq!(l.world_to_cell(Vec2::new(9.0, 0.0)), Point::new(-1, 0));
    }

    #[test]
    fn centre_maps_back_to_cell() {
        let l = CellLayout::square(0.75).with_origin(Vec2::new(-3.0, 4.0));
        for x in -4..4 {
            for y in -4..4 {
                let p = Point::new(x, y);
                assert_eq!(l.world_to_cell(l.cell_center(p)), p);
            }
        }
    }
}
