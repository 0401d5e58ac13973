//! Incremental movement along a cell path.

use std::collections::VecDeque;

use tilechase_core::{CellMapper, Point, Vec2};

/// Distance (world units) under which a waypoint counts as reached.
pub const ARRIVE_EPSILON: f32 = 0.01;

/// Move `current` toward `target` by at most `max_delta`, never overshooting.
///
/// A non-positive `max_delta` leaves `current` unchanged.
pub fn move_towards(current: Vec2, target: Vec2, max_delta: f32) -> Vec2 {
    if max_delta <= 0.0 {
        return current;
    }
    let delta = target - current;
    let dist = delta.length();
    if dist <= max_delta {
        return target;
    }
    current + delta / dist * max_delta
}

/// Walks an agent along a path of cells, one waypoint at a time.
///
/// The follower owns its path exclusively. Each [`advance`](Self::advance)
/// moves toward the centre of the first cell and drops that cell once the
/// agent is within the arrival epsilon of it.
#[derive(Debug, Clone)]
pub struct PathFollower {
    path: VecDeque<Point>,
    epsilon: f32,
}

impl Default for PathFollower {
    fn default() -> Self {
        Self::new()
    }
}

impl PathFollower {
    /// An idle follower using [`ARRIVE_EPSILON`].
    pub fn new() -> Self {
        Self::with_epsilon(ARRIVE_EPSILON)
    }

    /// An idle follower with a custom arrival epsilon.
    pub fn with_epsilon(epsilon: f32) -> Self {
        Self {
            path: VecDeque::new(),
            epsilon,
        }
    }

    /// Replace the current path wholesale.
    pub fn set_path(&mut self, path: impl IntoIterator<Item = Point>) {
        self.path.clear();
        self.path.extend(path);
    }

    /// Drop the current path.
    pub fn clear(&mut self) {
        self.path.clear();
    }

    /// Remaining waypoints, next one first.
    pub fn path(&self) -> &VecDeque<Point> {
        &self.path
    }

    /// The waypoint currently being approached.
    pub fn next_waypoint(&self) -> Option<Point> {
        self.path.front().copied()
    }

    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }

    /// Advance `position` along the path by `move_speed × elapsed` and
    /// return the new position.
    ///
    /// With an empty path the position is returned unchanged.
    pub fn advance<M: CellMapper + ?Sized>(
        &mut self,
        mapper: &M,
        position: Vec2,
        elapsed: f32,
        move_speed: f32,
    ) -> Vec2 {
        let Some(next) = self.path.front().copied() else {
            return position;
        };
        let target = mapper.cell_center(next);
        let moved = move_towards(position, target, move_speed * elapsed);
        if moved.distance(target) < self.epsilon {
            self.path.pop_front();
            log::trace!("reached waypoint {next}, {} left", self.path.len());
        }
        moved
    }
}
