//! Chasing agents for tile grids: a per-tick controller that re-plans a
//! shortest path to its target and walks the chaser along it.

pub mod agent;
pub mod config;
pub mod controller;

pub use agent::Agent;
pub use config::ChaseConfig;
pub use controller::{ChaseController, ChaseStatus};
