//! Grid pathfinding and path following for chasing agents.
//!
//! - **Walkability graph** over a tile grid ([`GridGraph`])
//! - **Shortest paths** by single-source uniform-cost search
//!   ([`ShortestPathFinder::find_path`])
//! - **Path following** toward cell centres ([`PathFollower::advance`])
//!
//! [`ShortestPathFinder`] owns and reuses its search caches, so repeated
//! queries (one per tick is the expected rate) do not reallocate after
//! warm-up.
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | walkability and neighbor enumeration |
//! | [`WeightedPather`] : [`Pather`] | [`ShortestPathFinder`] |

mod distance;
mod finder;
mod follower;
mod graph;
mod traits;

pub use distance::manhattan;
pub use finder::ShortestPathFinder;
pub use follower::{ARRIVE_EPSILON, PathFollower, move_towards};
pub use graph::GridGraph;
pub use traits::{Pather, WeightedPather};
