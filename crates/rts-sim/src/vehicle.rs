//! Vehicles: the steerable host plus the brain that drives it.

use tracing::{debug, warn};

use rts_brain::StackFsm;
use rts_core::{AgentId, AgentRng, ArmyId, Vec2};
use rts_path::{Path, PathFinder, PathResult};
use rts_steering::{Body, SteeringComputer, SteeringConfig};

use crate::roster::closest_enemy;
use crate::{AgentSnapshot, TickContext, states};

/// The per-vehicle brain.
pub type Brain = StackFsm<Vehicle, TickContext>;

/// Vehicle archetypes and their fixed tunables.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum VehicleKind {
    /// Unarmed worker: drives to a destination, then roams.
    Builder,
    /// Combat unit: patrols a loop and chases enemies that come into scope.
    Tank,
}

impl VehicleKind {
    pub fn max_speed(self) -> f32 {
        match self {
            VehicleKind::Builder => 60.0,
            VehicleKind::Tank => 50.0,
        }
    }

    /// Enemy detection distance.  Builders never look for enemies.
    pub fn scope(self) -> f32 {
        match self {
            VehicleKind::Builder => 0.0,
            VehicleKind::Tank => 200.0,
        }
    }

    /// Distance to the last waypoint at which a route counts as done.
    pub fn arrival_distance(self) -> f32 {
        20.0
    }

    pub fn body_radius(self) -> f32 {
        10.0
    }

    /// Where a freshly built Builder is sent.
    pub fn default_destination(self) -> Option<Vec2> {
        match self {
            VehicleKind::Builder => Some(Vec2::new(800.0, 200.0)),
            VehicleKind::Tank => None,
        }
    }

    /// Default patrol loop, starting at the vehicle's own position.
    pub fn default_patrol(self, origin: Vec2) -> Option<Path> {
        match self {
            VehicleKind::Builder => None,
            VehicleKind::Tank => Some(Path::new(vec![
                origin,
                Vec2::new(600.0, 470.0),
                Vec2::new(830.0, 200.0),
                Vec2::new(400.0, 200.0),
            ])),
        }
    }
}

/// Everything a state may read or steer.
///
/// The brain is kept next to this struct (in [`Unit`]) rather than inside
/// it, so a state can borrow the vehicle mutably while the brain runs it.
#[derive(Clone, Debug)]
pub struct Vehicle {
    pub id:       AgentId,
    pub army:     ArmyId,
    pub kind:     VehicleKind,
    pub body:     Body,
    pub steering: SteeringComputer,
    pub path:     Option<Path>,
    pub scope:    f32,
}

impl Vehicle {
    pub fn new(
        id:       AgentId,
        army:     ArmyId,
        kind:     VehicleKind,
        position: Vec2,
        config:   SteeringConfig,
        seed:     u64,
    ) -> Self {
        Self {
            id,
            army,
            kind,
            body: Body::new(position, kind.max_speed()).with_radius(kind.body_radius()),
            steering: SteeringComputer::new(config, AgentRng::new(seed, id)),
            path: None,
            scope: kind.scope(),
        }
    }

    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    /// Ask `finder` for a route from here to `destination`.
    ///
    /// The current path is replaced only when a route is found; on failure
    /// it is left exactly as it was and the error is returned.
    pub fn change_path<P: PathFinder + ?Sized>(&mut self, destination: Vec2, finder: &P) -> PathResult<()> {
        match finder.find_path(self.body.position, destination) {
            Ok(path) => {
                debug!(agent = %self.id, waypoints = path.len(), %destination, "path replaced");
                self.path = Some(path);
                Ok(())
            }
            Err(e) => {
                warn!(agent = %self.id, %destination, error = %e, "no route; keeping current path");
                Err(e)
            }
        }
    }

    /// `true` when there is a path and the vehicle is still farther than the
    /// arrival distance from its last waypoint.
    pub fn is_travelling(&self) -> bool {
        self.path
            .as_ref()
            .and_then(Path::last_node)
            .is_some_and(|last| self.body.position.distance(last) > self.kind.arrival_distance())
    }

    pub fn closest_enemy<'a>(&self, ctx: &'a TickContext) -> Option<&'a AgentSnapshot> {
        closest_enemy(ctx, self.army, self.body.position, self.scope)
    }

    /// Feed last tick's physics contacts into the steering computer.
    pub fn react_to_contacts(&mut self, ctx: &TickContext) {
        for contact in ctx.contacts_for(self.id) {
            self.steering.react_to_collision(contact);
        }
    }

    pub fn snapshot(&self) -> AgentSnapshot {
        AgentSnapshot {
            id:        self.id,
            army:      self.army,
            kind:      self.kind,
            position:  self.body.position,
            velocity:  self.body.velocity,
            max_speed: self.body.max_speed,
            heading:   self.body.heading,
            radius:    self.body.radius,
        }
    }
}

/// A vehicle together with its brain.
pub struct Unit {
    pub vehicle: Vehicle,
    pub brain:   Brain,
}

impl Unit {
    /// Wrap `vehicle` with the brain its kind starts with.
    pub fn new(vehicle: Vehicle) -> Self {
        let initial = match vehicle.kind {
            VehicleKind::Builder => states::path_following(),
            VehicleKind::Tank => states::patrolling(),
        };
        Self { vehicle, brain: Brain::new(initial) }
    }

    pub fn id(&self) -> AgentId {
        self.vehicle.id
    }

    pub fn state_label(&self) -> &str {
        self.brain.active_label().unwrap_or("<none>")
    }
}

impl std::fmt::Debug for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Unit")
            .field("vehicle", &self.vehicle)
            .field("brain", &self.brain)
            .finish()
    }
}
