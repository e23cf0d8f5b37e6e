use rts_core::{Vec2, VecExt};

use crate::{Boid, Contact, Sensor};

/// Push straight out of an overlap.
///
/// The force is the unit contact normal whenever the bodies actually
/// overlap, and zero otherwise.  Depth does not scale it: the computer
/// renormalizes the summed force anyway, so only direction matters.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CollisionReaction;

impl CollisionReaction {
    pub fn steer(&self, contact: &Contact) -> Vec2 {
        if contact.is_overlapping() {
            contact.normal.normalize_or_zero()
        } else {
            Vec2::ZERO
        }
    }
}

/// Steer away from whatever the sensor reports ahead.
///
/// Each detection contributes a repulsion along `host - detection` weighted
/// by `strength / gap`, where `gap` is the edge-to-edge distance clamped to
/// at least `min_gap`.  Detections the host is closing on (velocity pointing
/// at them) get up to double weight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CollisionAvoidance {
    pub strength: f32,
    pub min_gap:  f32,
}

impl Default for CollisionAvoidance {
    fn default() -> Self {
        Self { strength: 10.0, min_gap: 1.0 }
    }
}

impl CollisionAvoidance {
    pub fn new(strength: f32, min_gap: f32) -> Self {
        Self { strength, min_gap }
    }

    pub fn steer(&self, host: &dyn Boid, sensor: &dyn Sensor) -> Vec2 {
        let position = host.position();
        let facing = host
            .velocity()
            .try_normalize()
            .unwrap_or_else(|| Vec2::from_heading_deg(host.heading() - 180.0));
        let min_gap = self.min_gap.max(f32::EPSILON);

        let mut force = Vec2::ZERO;
        for detection in sensor.query_nearby(position, facing, &sensor.shape()) {
            let offset = position - detection.position;
            let Some(away) = offset.try_normalize() else {
                continue;
            };
            let gap = (offset.length() - detection.radius - host.radius()).max(min_gap);
            let closing = facing.dot(-away).max(0.0);
            force += away * (self.strength / gap) * (1.0 + closing);
        }
        force
    }
}
