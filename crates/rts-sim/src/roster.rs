//! Read-only view of every vehicle, frozen at the start of a tick.
//!
//! Target acquisition never looks at live vehicles: it scans the snapshot
//! taken before anyone moved, so the outcome does not depend on the order
//! vehicles are updated in.

use rts_core::{AgentId, ArmyId, Vec2};
use rts_steering::{Boid, Detection, DetectionKind};

use crate::VehicleKind;

/// Kinematic state of one vehicle at the start of the tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AgentSnapshot {
    pub id:        AgentId,
    pub army:      ArmyId,
    pub kind:      VehicleKind,
    pub position:  Vec2,
    pub velocity:  Vec2,
    pub max_speed: f32,
    pub heading:   f32,
    pub radius:    f32,
}

impl AgentSnapshot {
    pub fn detection(&self) -> Detection {
        Detection {
            kind:     DetectionKind::Agent(self.id),
            position: self.position,
            velocity: self.velocity,
            radius:   self.radius,
        }
    }
}

impl Boid for AgentSnapshot {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn velocity(&self) -> Vec2 {
        self.velocity
    }

    fn max_speed(&self) -> f32 {
        self.max_speed
    }

    fn heading(&self) -> f32 {
        self.heading
    }

    fn radius(&self) -> f32 {
        self.radius
    }
}

/// Opposing-agent listing used for target acquisition.
pub trait Roster {
    /// Every agent that does not belong to `army`.
    fn enemies_of(&self, army: ArmyId) -> impl Iterator<Item = &AgentSnapshot>;
}

impl Roster for [AgentSnapshot] {
    fn enemies_of(&self, army: ArmyId) -> impl Iterator<Item = &AgentSnapshot> {
        self.iter().filter(move |a| a.army != army)
    }
}

/// Nearest enemy of `army` strictly closer than `scope` to `position`.
///
/// Ties go to the agent listed first.
pub fn closest_enemy<'a, R: Roster + ?Sized>(
    roster:   &'a R,
    army:     ArmyId,
    position: Vec2,
    scope:    f32,
) -> Option<&'a AgentSnapshot> {
    let mut best: Option<(&AgentSnapshot, f32)> = None;
    for enemy in roster.enemies_of(army) {
        let distance = position.distance(enemy.position);
        if distance >= scope {
            continue;
        }
        if best.is_none_or(|(_, d)| distance < d) {
            best = Some((enemy, distance));
        }
    }
    best.map(|(enemy, _)| enemy)
}
