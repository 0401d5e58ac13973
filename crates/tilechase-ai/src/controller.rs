//! Per-tick chase orchestration.

use std::collections::VecDeque;

use tilechase_core::{CellMapper, Point, TileSource, Vec2};
use tilechase_paths::{GridGraph, PathFollower, ShortestPathFinder};

use crate::agent::Agent;
use crate::config::ChaseConfig;

/// What a [`ChaseController::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChaseStatus {
    /// No target was given; nothing happened.
    Idle,
    /// The target cell is not reachable from the chaser's cell (or the
    /// chaser already shares the target's cell). The chaser did not move.
    NoPath,
    /// The chaser moved; `remaining` waypoints are left on the current path.
    Moving { remaining: usize },
}

/// Drives one chaser toward a target across a tile grid.
///
/// Every tick the full path is recomputed from the chaser's current cell to
/// the target's current cell and replaces whatever path was being followed,
/// so the chaser reacts to target movement immediately. The grid is only
/// read; the controller exclusively owns its path and search caches.
#[derive(Debug, Default)]
pub struct ChaseController {
    config: ChaseConfig,
    finder: ShortestPathFinder,
    follower: PathFollower,
}

impl ChaseController {
    /// Create a controller with the given tuning.
    pub fn new(config: ChaseConfig) -> Self {
        Self {
            config,
            finder: ShortestPathFinder::new(),
            follower: PathFollower::with_epsilon(config.arrive_epsilon),
        }
    }

    pub fn config(&self) -> &ChaseConfig {
        &self.config
    }

    /// Waypoints still to visit, next one first.
    pub fn path(&self) -> &VecDeque<Point> {
        self.follower.path()
    }

    /// Forget the current path.
    pub fn clear(&mut self) {
        self.follower.clear();
    }

    /// Run one chase step of `elapsed` seconds.
    ///
    /// `target` is the world position being chased; `None` makes the tick a
    /// no-op. On return `chaser.position` holds the moved position.
    pub fn tick<T, M>(
        &mut self,
        graph: &GridGraph<'_, T>,
        mapper: &M,
        chaser: &mut Agent,
        target: Option<Vec2>,
        elapsed: f32,
    ) -> ChaseStatus
    where
        T: TileSource + ?Sized,
        M: CellMapper + ?Sized,
    {
        let Some(target) = target else {
            return ChaseStatus::Idle;
        };

        let start = mapper.world_to_cell(chaser.position);
        let goal = mapper.world_to_cell(target);
        let path = self.finder.find_path(graph, start, goal);

        // The chaser already occupies the first cell; following it would
        // only pull the chaser back to that cell's centre every tick.
        self.follower.set_path(path.into_iter().skip(1));
        if self.follower.is_empty() {
            log::debug!("chaser at {start} has no path to {goal}");
            return ChaseStatus::NoPath;
        }

        let (pos, speed) = (chaser.position, chaser.move_speed);
        chaser.position = self.follower.advance(mapper, pos, elapsed, speed);
        log::trace!(
            "chaser {start} -> {goal}: now at {}, {} waypoints left",
            chaser.position,
            self.follower.len()
        );
        ChaseStatus::Moving {
            remaining: self.follower.len(),
        }
    }
}
