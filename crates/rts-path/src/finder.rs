//! The pathfinder contract.
//!
//! The simulation only ever calls routing through [`PathFinder`], so games
//! can plug in a navmesh, a flow field, or the bundled
//! [`GridPathFinder`][crate::GridPathFinder] without touching steering.

use rts_core::Vec2;

use crate::{Path, PathResult};

/// Pluggable route search.
///
/// Implementations must be `Send + Sync` so one finder can be shared by all
/// agents, including when they are ticked on Rayon worker threads.
pub trait PathFinder: Send + Sync {
    /// Compute a route from `start` to `goal`.
    ///
    /// On success the returned path's cursor is on its first waypoint.
    /// `Err(PathError::Unreachable { .. })` means "no path"; callers keep
    /// whatever route they already had.
    fn find_path(&self, start: Vec2, goal: Vec2) -> PathResult<Path>;
}

impl<F: PathFinder + ?Sized> PathFinder for &F {
    fn find_path(&self, start: Vec2, goal: Vec2) -> PathResult<Path> {
        (**self).find_path(start, goal)
    }
}
