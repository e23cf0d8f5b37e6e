//! Per-agent force accumulator.
//!
//! One `SteeringComputer` belongs to one agent.  Behavior calls add forces
//! into the accumulator; [`SteeringComputer::compute`] turns the sum into the
//! agent's new velocity and heading, then clears it.  The computer never
//! touches position: integration is the physics step's job.

use tracing::warn;

use rts_core::{AgentRng, Vec2, VecExt, wrap_degrees};
use rts_path::Path;

use crate::behavior::{
    CollisionAvoidance, CollisionReaction, Evasion, Flee, PathFollowing, PathPatrolling,
    Pursuit, Seek, TargetBehavior, Wander, WanderState,
};
use crate::{Boid, Contact, Sensor, Steerable, SteeringConfig};

/// Cosine of the cone around straight-back inside which a force that cannot
/// stop the agent is turned into a sideways push (about 8°).
const REVERSE_CONE_COS: f32 = 0.99;

#[derive(Clone, Debug)]
pub struct SteeringComputer {
    steering: Vec2,
    config:   SteeringConfig,
    wander:   WanderState,
}

impl SteeringComputer {
    /// `rng` drives wander jitter; seed it per agent for reproducible runs.
    pub fn new(config: SteeringConfig, rng: AgentRng) -> Self {
        Self { steering: Vec2::ZERO, config, wander: WanderState::new(rng) }
    }

    pub fn config(&self) -> &SteeringConfig {
        &self.config
    }

    /// Force summed since the last `reset` / `compute`.
    pub fn accumulated(&self) -> Vec2 {
        self.steering
    }

    pub fn wander_state(&self) -> &WanderState {
        &self.wander
    }

    /// Zero the accumulator.  Wander state is kept.
    pub fn reset(&mut self) {
        self.steering = Vec2::ZERO;
    }

    /// Add an arbitrary force.
    pub fn add_force(&mut self, force: Vec2) {
        self.steering += force;
    }

    // ── Behaviors ─────────────────────────────────────────────────────────────

    fn seek_behavior(&self) -> Seek {
        Seek::new(self.config.slowing_radius)
    }

    pub fn seek(&mut self, host: &dyn Boid, target: Vec2) {
        self.steering += self.seek_behavior().steer(host, target);
    }

    /// Seek with an explicit slowing radius.  See [`Seek`] for why the radius
    /// leaves the force unchanged.
    pub fn seek_with_radius(&mut self, host: &dyn Boid, target: Vec2, slowing_radius: f32) {
        self.steering += Seek::new(slowing_radius).steer(host, target);
    }

    pub fn flee(&mut self, host: &dyn Boid, target: Vec2) {
        self.steering += Flee.steer(host, target);
    }

    pub fn wander(&mut self, host: &dyn Boid) {
        let behavior = Wander {
            circle_distance:  self.config.wander_circle_distance,
            circle_radius:    self.config.wander_circle_radius,
            angle_change_deg: self.config.wander_angle_change_deg,
            seek:             self.seek_behavior(),
        };
        self.steering += behavior.steer(host, &mut self.wander);
    }

    pub fn pursue(&mut self, host: &dyn Boid, target: &dyn Boid) {
        let behavior = Pursuit::new(self.seek_behavior(), self.config.max_lookahead_secs);
        self.steering += behavior.steer(host, target);
    }

    pub fn evade(&mut self, host: &dyn Boid, target: &dyn Boid) {
        let behavior = Evasion::new(Flee, self.config.max_lookahead_secs);
        self.steering += behavior.steer(host, target);
    }

    /// Follow `path` once.  Adds nothing for an empty path and brakes the
    /// host once it has reached the last waypoint.
    pub fn follow_path(&mut self, host: &dyn Boid, path: &mut Path) {
        let behavior = PathFollowing::new(self.seek_behavior(), self.config.arrival_tolerance);
        self.steering += behavior.steer(host, path);
    }

    /// Patrol `path`, looping back to its first waypoint.
    pub fn patrol_path(&mut self, host: &dyn Boid, path: &mut Path) {
        let behavior = PathPatrolling::new(self.seek_behavior(), self.config.arrival_tolerance);
        self.steering += behavior.steer(host, path);
    }

    pub fn react_to_collision(&mut self, contact: &Contact) {
        self.steering += CollisionReaction.steer(contact);
    }

    pub fn avoid_collision(&mut self, host: &dyn Boid, sensor: &dyn Sensor) {
        let behavior =
            CollisionAvoidance::new(self.config.avoidance_strength, self.config.avoidance_min_gap);
        self.steering += behavior.steer(host, sensor);
    }

    // ── Integration ───────────────────────────────────────────────────────────

    /// Apply the accumulated force to `host` and clear the accumulator.
    ///
    /// ```text
    /// velocity = normalize(velocity + steering) * max_speed
    /// heading  = atan2(velocity) + 180     (only when velocity != 0)
    /// ```
    ///
    /// The result always has magnitude `max_speed` (or zero): agents travel at
    /// constant speed and only their direction is steered.  The +180° offset
    /// matches sprites that are drawn facing left.
    ///
    /// A force pointing (nearly) straight back that is too weak to stop the
    /// agent gains a sideways component of equal length, so the agent turns
    /// around instead of running on forever.  It turns toward the side the
    /// force already leans to, or left on an exact tie.  A force that cancels
    /// the velocity outright still stops the agent.
    pub fn compute(&mut self, host: &mut dyn Steerable) {
        let steering = turn_reversal(host.velocity(), self.steering);
        let mut velocity = (host.velocity() + steering).with_magnitude(host.max_speed());
        if !velocity.is_finite() {
            warn!(steering = ?self.steering, "non-finite steering result, stopping agent");
            velocity = Vec2::ZERO;
        }
        host.set_velocity(velocity);

        let position = host.position();
        if let Some(angle) = position.heading_deg_to(position + velocity) {
            host.set_heading(wrap_degrees(180.0 + angle));
        }

        self.steering = Vec2::ZERO;
    }
}

fn turn_reversal(velocity: Vec2, force: Vec2) -> Vec2 {
    let (Some(forward), Some(push)) = (velocity.try_normalize(), force.try_normalize()) else {
        return force;
    };
    if push.dot(forward) > -REVERSE_CONE_COS || (velocity + force).dot(forward) <= 0.0 {
        return force;
    }
    let side = if forward.perp_dot(push) < 0.0 { -forward.perp() } else { forward.perp() };
    force + side * force.length()
}
