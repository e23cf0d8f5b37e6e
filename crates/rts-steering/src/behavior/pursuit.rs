use rts_core::Vec2;

use crate::Boid;

use super::{Flee, Seek, TargetBehavior};

/// Where `target` will be when the host could reach its current position.
///
/// Lookahead is distance / host speed, capped at `max_lookahead_secs`; a
/// host that cannot move predicts nothing.
fn predict(host: &dyn Boid, target: &dyn Boid, max_lookahead_secs: f32) -> Vec2 {
    let speed = host.max_speed();
    let lookahead = if speed > 0.0 {
        (host.position().distance(target.position()) / speed).min(max_lookahead_secs)
    } else {
        0.0
    };
    target.position() + target.velocity() * lookahead.max(0.0)
}

/// Chase a moving agent by steering at its predicted position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pursuit<D = Seek> {
    pub delegate:           D,
    pub max_lookahead_secs: f32,
}

impl<D: TargetBehavior> Pursuit<D> {
    pub fn new(delegate: D, max_lookahead_secs: f32) -> Self {
        Self { delegate, max_lookahead_secs }
    }

    pub fn steer(&self, host: &dyn Boid, target: &dyn Boid) -> Vec2 {
        self.delegate.steer(host, predict(host, target, self.max_lookahead_secs))
    }
}

/// Run from a moving agent's predicted position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Evasion<D = Flee> {
    pub delegate:           D,
    pub max_lookahead_secs: f32,
}

impl<D: TargetBehavior> Evasion<D> {
    pub fn new(delegate: D, max_lookahead_secs: f32) -> Self {
        Self { delegate, max_lookahead_secs }
    }

    pub fn steer(&self, host: &dyn Boid, target: &dyn Boid) -> Vec2 {
        self.delegate.steer(host, predict(host, target, self.max_lookahead_secs))
    }
}
