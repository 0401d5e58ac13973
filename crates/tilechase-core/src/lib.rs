//! **tilechase-core**: core types for grid chasing.
//!
//! This crate provides the foundational types used across the *tilechase*
//! workspace: geometry primitives, tile storage with the [`TileSource`]
//! walkability view, and the [`CellMapper`] world/cell conversion.

pub mod geom;
pub mod layout;
pub mod tilemap;

pub use geom::{Point, Range};
pub use layout::{CellLayout, CellMapper};
pub use tilemap::{AsciiMap, Tile, TileMap, TileMapError, TileSource};

pub use glam::Vec2;
