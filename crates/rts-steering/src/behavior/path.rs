use rts_core::Vec2;
use rts_path::{Path, PathMode};

use crate::Boid;

use super::{Seek, TargetBehavior};

/// Shared cursor logic: advance at most one waypoint per call, then steer at
/// whatever the cursor points to.  A finished follow route brakes the host.
fn steer_along<D: TargetBehavior>(
    delegate:  &D,
    tolerance: f32,
    host:      &dyn Boid,
    path:      &mut Path,
    mode:      PathMode,
) -> Vec2 {
    let Some(target) = path.current_target() else {
        return Vec2::ZERO;
    };
    if host.position().distance(target) <= tolerance && !path.advance(mode) {
        // Follow mode on the final waypoint: cancel the velocity so the host
        // stops here instead of coasting on at constant speed.
        return -host.velocity();
    }
    match path.current_target() {
        Some(next) => delegate.steer(host, next),
        None => Vec2::ZERO,
    }
}

/// Walk a path once, from the cursor to the last waypoint.
///
/// Once the host is within `arrival_tolerance` of the last waypoint the
/// behavior returns a braking force (minus the host velocity), which brings
/// the host to rest after one `compute`.  It keeps no completion flag;
/// callers compare the host position with [`Path::last_node`] or use
/// [`PathFollowing::is_complete`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathFollowing<D = Seek> {
    pub delegate:          D,
    pub arrival_tolerance: f32,
}

impl<D: TargetBehavior> PathFollowing<D> {
    pub fn new(delegate: D, arrival_tolerance: f32) -> Self {
        Self { delegate, arrival_tolerance }
    }

    pub fn steer(&self, host: &dyn Boid, path: &mut Path) -> Vec2 {
        steer_along(&self.delegate, self.arrival_tolerance, host, path, PathMode::Follow)
    }

    /// `true` when the path is empty or the host is on its last waypoint.
    pub fn is_complete(&self, host: &dyn Boid, path: &Path) -> bool {
        match path.last_node() {
            None => true,
            Some(last) => {
                path.is_on_last() && host.position().distance(last) <= self.arrival_tolerance
            }
        }
    }
}

/// Walk a path forever, wrapping from the last waypoint back to the first.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathPatrolling<D = Seek> {
    pub delegate:          D,
    pub arrival_tolerance: f32,
}

impl<D: TargetBehavior> PathPatrolling<D> {
    pub fn new(delegate: D, arrival_tolerance: f32) -> Self {
        Self { delegate, arrival_tolerance }
    }

    pub fn steer(&self, host: &dyn Boid, path: &mut Path) -> Vec2 {
        steer_along(&self.delegate, self.arrival_tolerance, host, path, PathMode::Patrol)
    }
}
