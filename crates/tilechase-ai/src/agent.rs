//! Agents moved by the chase logic.

use tilechase_core::{CellMapper, Point, Vec2};

/// A moving entity: a world position plus a move speed.
///
/// The host owns agents; controllers only borrow them mutably for the
/// duration of a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Agent {
    pub position: Vec2,
    /// World units per second.
    pub move_speed: f32,
}

impl Agent {
    /// Create an agent at `position`.
    pub const fn new(position: Vec2, move_speed: f32) -> Self {
        Self {
            position,
            move_speed,
        }
    }

    /// Create an agent standing on the centre of `cell`.
    pub fn at_cell<M: CellMapper + ?Sized>(mapper: &M, cell: Point, move_speed: f32) -> Self {
        Self::new(mapper.cell_center(cell), move_speed)
    }

    /// The cell the agent currently stands in.
    pub fn cell<M: CellMapper + ?Sized>(&self, mapper: &M) -> Point {
        mapper.world_to_cell(self.position)
    }
}
