//! Headless chase simulation shared by the demo binaries.
//!
//! A target wanders between random floor cells while a chaser, driven by a
//! [`ChaseController`], re-plans toward it every tick. The host loop here is
//! what an engine's per-frame scheduler would otherwise provide.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tilechase_ai::{Agent, ChaseConfig, ChaseController, ChaseStatus};
use tilechase_core::{CellLayout, CellMapper, Point, TileMap, TileMapError};
use tilechase_paths::{GridGraph, PathFollower, ShortestPathFinder};

/// Map used when no map file is given.
pub const DEFAULT_MAP: &str = include_str!("../maps/arena.txt");

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Simulation settings, loadable from JSON. Missing fields take defaults.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Number of ticks to simulate at most.
    pub ticks: u32,
    /// Seconds per tick.
    pub dt: f32,
    /// Seed for the target's random walk.
    pub seed: u64,
    /// Target speed in world units per second. Zero keeps it still.
    pub target_speed: f32,
    pub layout: CellLayout,
    pub chase: ChaseConfig,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            ticks: 3600,
            dt: 1.0 / 60.0,
            seed: 42,
            target_speed: 1.5,
            layout: CellLayout::default(),
            chase: ChaseConfig::default(),
        }
    }
}

impl DemoConfig {
    /// Parse a JSON config.
    pub fn from_json(s: &str) -> Result<Self, DemoError> {
        Ok(serde_json::from_str(s)?)
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors raised while setting up a simulation.
#[derive(Debug)]
pub enum DemoError {
    /// The map text could not be parsed.
    Map(TileMapError),
    /// The map lacks the spawn marker for the chaser (`C`) or target (`P`).
    MissingMarker(char),
    /// The config file could not be parsed.
    Config(serde_json::Error),
}

impl fmt::Display for DemoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Map(e) => write!(f, "{e}"),
            Self::MissingMarker(ch) => write!(f, "map has no \u{201c}{ch}\u{201d} spawn marker"),
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl std::error::Error for DemoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Map(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::MissingMarker(_) => None,
        }
    }
}

impl From<TileMapError> for DemoError {
    fn from(e: TileMapError) -> Self {
        Self::Map(e)
    }
}

impl From<serde_json::Error> for DemoError {
    fn from(e: serde_json::Error) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Simulation
// ---------------------------------------------------------------------------

/// How a [`Simulation::run`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The chaser entered the target's cell after this many ticks.
    Caught { ticks: u32 },
    /// The tick budget ran out.
    Escaped,
}

/// A chaser, a wandering target and the map they share.
pub struct Simulation {
    config: DemoConfig,
    map: TileMap,
    floor: Vec<Point>,
    controller: ChaseController,
    chaser: Agent,
    target: Agent,
    wander: PathFollower,
    wander_finder: ShortestPathFinder,
    rng: StdRng,
    tick: u32,
}

impl Simulation {
    /// Build a simulation from ASCII map text.
    pub fn new(map_text: &str, config: DemoConfig) -> Result<Self, DemoError> {
        let parsed = TileMap::from_ascii(map_text)?;
        let chaser_cell = parsed.chaser.ok_or(DemoError::MissingMarker('C'))?;
        let target_cell = parsed.target.ok_or(DemoError::MissingMarker('P'))?;
        let layout = config.layout;
        let floor = GridGraph::new(&parsed.map).walkable_cells().collect();

        log::info!(
            "map {} with {} floor cells, chaser at {chaser_cell}, target at {target_cell}",
            parsed.map.bounds(),
            parsed.map.tile_count()
        );

        Ok(Self {
            chaser: config.chase.spawn_at(&layout, chaser_cell),
            target: Agent::at_cell(&layout, target_cell, config.target_speed),
            controller: ChaseController::new(config.chase),
            wander: PathFollower::new(),
            wander_finder: ShortestPathFinder::new(),
            rng: StdRng::seed_from_u64(config.seed),
            map: parsed.map,
            floor,
            config,
            tick: 0,
        })
    }

    pub fn chaser(&self) -> &Agent {
        &self.chaser
    }

    pub fn target(&self) -> &Agent {
        &self.target
    }

    pub fn ticks(&self) -> u32 {
        self.tick
    }

    /// Whether chaser and target share a cell.
    pub fn caught(&self) -> bool {
        let layout = &self.config.layout;
        self.chaser.cell(layout) == self.target.cell(layout)
    }

    /// Advance the world by one tick: move the target, then the chaser.
    pub fn step(&mut self) -> ChaseStatus {
        let graph = GridGraph::new(&self.map);
        let layout = &self.config.layout;
        let dt = self.config.dt;

        if self.target.move_speed > 0.0 {
            if self.wander.is_empty() && !self.floor.is_empty() {
                let dest = self.floor[self.rng.random_range(0..self.floor.len())];
                let from = self.target.cell(layout);
                let path = self.wander_finder.find_path(&graph, from, dest);
                log::debug!("target wanders {from} -> {dest} ({} cells)", path.len());
                self.wander.set_path(path.into_iter().skip(1));
            }
            let (pos, speed) = (self.target.position, self.target.move_speed);
            self.target.position = self.wander.advance(layout, pos, dt, speed);
        }

        self.tick += 1;
        self.controller.tick(
            &graph,
            layout,
            &mut self.chaser,
            Some(self.target.position),
            dt,
        )
    }

    /// Step until the chaser catches the target or the tick budget runs out.
    pub fn run(&mut self) -> Outcome {
        while self.tick < self.config.ticks {
            if self.caught() {
                return Outcome::Caught { ticks: self.tick };
            }
            let status = self.step();
            if self.tick % 60 == 0 {
                log::info!(
                    "tick {}: chaser {} target {} ({status:?})",
                    self.tick,
                    self.config.layout.world_to_cell(self.chaser.position),
                    self.config.layout.world_to_cell(self.target.position),
                );
            }
        }
        if self.caught() {
            Outcome::Caught { ticks: self.tick }
        } else {
            Outcome::Escaped
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CORRIDOR: &str = "\
#########
#C.....P#
#########";

    #[test]
    fn default_map_parses() {
        let config = DemoConfig::default();
        let sim = Simulation::new(DEFAULT_MAP, config).unwrap();
        assert!(!sim.caught());
        assert_eq!(sim.chaser().move_speed, 2.0);
    }

    #[test]
    fn static_target_is_caught() {
        let config = DemoConfig {
            target_speed: 0.0,
            ..DemoConfig::default()
        };
        let mut sim = Simulation::new(CORRIDOR, config).unwrap();
        match sim.run() {
            // 5.5 cells to cross at 2 units/s and 60 ticks/s.
            Outcome::Caught { ticks } => assert!(ticks <= 200, "took {ticks} ticks"),
            Outcome::Escaped => panic!("static target escaped"),
        }
        let layout = config.layout;
        let target_cell = sim.target().cell(&layout);
        assert_eq!(target_cell, Point::new(7, 1));
        assert_eq!(sim.target().position, layout.cell_center(target_cell));
    }

    #[test]
    fn default_map_static_target_is_caught() {
        let config = DemoConfig {
            target_speed: 0.0,
            ..DemoConfig::default()
        };
        let mut sim = Simulation::new(DEFAULT_MAP, config).unwrap();
        assert!(matches!(sim.run(), Outcome::Caught { .. }));
    }

    #[test]
    fn wandering_target_stays_on_floor() {
        let config = DemoConfig::default();
        let mut sim = Simulation::new(DEFAULT_MAP, config).unwrap();
        let graph_map = TileMap::from_ascii(DEFAULT_MAP).unwrap().map;
        let graph = GridGraph::new(&graph_map);
        for _ in 0..300 {
            sim.step();
            let layout = CellLayout::default();
            assert!(graph.is_walkable(sim.target().cell(&layout)));
            assert!(graph.is_walkable(sim.chaser().cell(&layout)));
        }
        assert_eq!(sim.ticks(), 300);
    }

    #[test]
    fn missing_markers_are_reported() {
        let err = Simulation::new("#..P#", DemoConfig::default()).err();
        assert!(matches!(err, Some(DemoError::MissingMarker('C'))));
        let err = Simulation::new("#C..#", DemoConfig::default()).err();
        assert!(matches!(err, Some(DemoError::MissingMarker('P'))));
        let err = Simulation::new("#C.?P#", DemoConfig::default()).err();
        assert!(matches!(err, Some(DemoError::Map(_))));
    }

    #[test]
    fn config_from_partial_json() {
        let json = r#"{"ticks": 10, "chase": {"move_speed": 4.0}}"#;
        let c = DemoConfig::from_json(json).unwrap();
        assert_eq!(c.ticks, 10);
        assert_eq!(c.chase.move_speed, 4.0);
        assert_eq!(c.dt, DemoConfig::default().dt);
        assert!(DemoConfig::from_json("{").is_err());
    }
}
