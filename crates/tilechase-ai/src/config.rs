//! Chase tuning.

use tilechase_core::{CellMapper, Point};
use tilechase_paths::ARRIVE_EPSILON;

use crate::agent::Agent;

/// Tuning for a [`ChaseController`](crate::ChaseController) and the chasers
/// it drives.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ChaseConfig {
    /// Speed given to chasers spawned with [`spawn_at`](Self::spawn_at), in
    /// world units per second. Ticks move a chaser by its own
    /// [`Agent::move_speed`], so changing this later does not affect agents
    /// already spawned.
    pub move_speed: f32,
    /// Distance under which a waypoint counts as reached.
    pub arrive_epsilon: f32,
}

impl Default for ChaseConfig {
    fn default() -> Self {
        Self {
            move_speed: 2.0,
            arrive_epsilon: ARRIVE_EPSILON,
        }
    }
}

impl ChaseConfig {
    /// Set the move speed (builder).
    pub fn with_move_speed(mut self, move_speed: f32) -> Self {
        self.move_speed = move_speed;
        self
    }

    /// Spawn a chaser on the centre of `cell`.
    pub fn spawn_at<M: CellMapper + ?Sized>(&self, mapper: &M, cell: Point) -> Agent {
        Agent::at_cell(mapper, cell, self.move_speed)
    }
}
