use rts_core::{Vec2, VecExt};

use crate::Boid;

use super::TargetBehavior;

/// Head straight for a point at full speed.
///
/// ```text
/// desired = normalize(target - position) * max_speed
/// force   = normalize(desired - velocity)
/// ```
///
/// `slowing_radius` is carried for arrival-style callers but does not damp
/// the force: the computer renormalizes velocity to `max_speed` on every
/// compute pass, so agents always arrive at full speed.  Callers that need
/// to stop watch the distance to their target and change state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Seek {
    pub slowing_radius: f32,
}

impl Seek {
    pub fn new(slowing_radius: f32) -> Self {
        Self { slowing_radius }
    }
}

impl Default for Seek {
    fn default() -> Self {
        Self { slowing_radius: 20.0 }
    }
}

impl TargetBehavior for Seek {
    fn steer(&self, host: &dyn Boid, target: Vec2) -> Vec2 {
        let desired = (target - host.position()).with_magnitude(host.max_speed());
        (desired - host.velocity()).normalize_or_zero()
    }
}

/// Mirror of [`Seek`]: run directly away from a point.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Flee;

impl TargetBehavior for Flee {
    fn steer(&self, host: &dyn Boid, target: Vec2) -> Vec2 {
        let desired = (host.position() - target).with_magnitude(host.max_speed());
        (desired - host.velocity()).normalize_or_zero()
    }
}
