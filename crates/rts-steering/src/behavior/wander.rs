use rts_core::{AgentRng, Vec2, VecExt, wrap_degrees};

use crate::Boid;

use super::{Seek, TargetBehavior};

/// Jitter state that must survive between ticks.
///
/// Lives in the steering computer next to the accumulator but is not
/// cleared by `reset()`: wandering is smooth only because each tick nudges
/// the previous angle instead of drawing a fresh one.
#[derive(Clone, Debug)]
pub struct WanderState {
    /// Offset of the wander point around the circle, relative to the travel
    /// direction (degrees).
    pub angle: f32,
    rng: AgentRng,
}

impl WanderState {
    pub fn new(rng: AgentRng) -> Self {
        Self { angle: 0.0, rng }
    }
}

/// Random but continuous roaming.
///
/// A circle of `circle_radius` is projected `circle_distance` ahead of the
/// agent; the target is the point on that circle at the current wander
/// angle.  Each call first perturbs the angle by at most
/// ±`angle_change_deg / 2`, then seeks toward the point at the new angle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Wander {
    pub circle_distance:  f32,
    pub circle_radius:    f32,
    pub angle_change_deg: f32,
    pub seek:             Seek,
}

impl Wander {
    pub fn steer(&self, host: &dyn Boid, state: &mut WanderState) -> Vec2 {
        let forward = match host.velocity().try_normalize() {
            Some(dir) => dir,
            // At rest: fall back on the sprite heading (travel angle + 180°).
            None => Vec2::from_heading_deg(host.heading() - 180.0),
        };
        let forward_deg = Vec2::ZERO.heading_deg_to(forward).unwrap_or(0.0);

        state.angle = wrap_degrees(state.angle + state.rng.spread(self.angle_change_deg * 0.5));

        let center = host.position() + forward * self.circle_distance;
        let target = center + Vec2::from_heading_deg(forward_deg + state.angle) * self.circle_radius;

        self.seek.steer(host, target)
    }
}
