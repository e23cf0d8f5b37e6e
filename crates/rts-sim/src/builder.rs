//! Fluent builder for constructing a [`Sim`].

use tracing::{info, warn};

use rts_core::{AgentId, ArmyId, ObstacleId, SimConfig, Vec2};
use rts_path::{Path, PathFinder};
use rts_steering::{DetectionShape, SteeringConfig};

use crate::{Obstacle, Sim, SimError, SimResult, Unit, Vehicle, VehicleKind};

/// Description of one vehicle to spawn.
#[derive(Clone, Debug, PartialEq)]
pub struct VehicleSpec {
    pub kind:     VehicleKind,
    pub army:     ArmyId,
    pub position: Vec2,
    /// Builder route target.  `None` uses the kind's default destination.
    pub destination: Option<Vec2>,
    /// Tank patrol loop.  `None` uses the kind's default loop.
    pub patrol: Option<Vec<Vec2>>,
}

impl VehicleSpec {
    pub fn builder(army: ArmyId, position: Vec2) -> Self {
        Self { kind: VehicleKind::Builder, army, position, destination: None, patrol: None }
    }

    pub fn tank(army: ArmyId, position: Vec2) -> Self {
        Self { kind: VehicleKind::Tank, army, position, destination: None, patrol: None }
    }

    pub fn with_destination(mut self, destination: Vec2) -> Self {
        self.destination = Some(destination);
        self
    }

    pub fn with_patrol(mut self, waypoints: Vec<Vec2>) -> Self {
        self.patrol = Some(waypoints);
        self
    }
}

/// Fluent builder for [`Sim<P>`].
///
/// # Optional inputs (have defaults)
///
/// | Method                  | Default                              |
/// |-------------------------|--------------------------------------|
/// | `.vehicle(s)`           | none                                 |
/// | `.obstacle(p, r)`       | none                                 |
/// | `.steering(c)`          | `SteeringConfig::default()`          |
/// | `.detection_shape(s)`   | 100 units, 120° cone                 |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, GridPathFinder::new(grid))
///     .vehicle(VehicleSpec::builder(ArmyId(0), Vec2::new(40.0, 40.0)))
///     .vehicle(VehicleSpec::tank(ArmyId(1), Vec2::new(500.0, 300.0)))
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<P: PathFinder> {
    config:          SimConfig,
    finder:          P,
    vehicles:        Vec<VehicleSpec>,
    obstacles:       Vec<(Vec2, f32)>,
    steering:        SteeringConfig,
    detection_shape: DetectionShape,
}

impl<P: PathFinder> SimBuilder<P> {
    pub fn new(config: SimConfig, finder: P) -> Self {
        Self {
            config,
            finder,
            vehicles:        Vec::new(),
            obstacles:       Vec::new(),
            steering:        SteeringConfig::default(),
            detection_shape: DetectionShape::default(),
        }
    }

    pub fn vehicle(mut self, spec: VehicleSpec) -> Self {
        self.vehicles.push(spec);
        self
    }

    pub fn vehicles(mut self, specs: impl IntoIterator<Item = VehicleSpec>) -> Self {
        self.vehicles.extend(specs);
        self
    }

    /// Static round obstacle seen by every radar.
    pub fn obstacle(mut self, position: Vec2, radius: f32) -> Self {
        self.obstacles.push((position, radius));
        self
    }

    pub fn steering(mut self, config: SteeringConfig) -> Self {
        self.steering = config;
        self
    }

    pub fn detection_shape(mut self, shape: DetectionShape) -> Self {
        self.detection_shape = shape;
        self
    }

    /// Validate the config, spawn vehicles with ids `0..n` in the order they
    /// were added, route Builders, and return a ready-to-run [`Sim`].
    ///
    /// A Builder whose destination is unreachable starts without a path; its
    /// first tick drops it into `wander`.
    pub fn build(self) -> SimResult<Sim<P>> {
        self.config.validate()?;

        let mut units = Vec::with_capacity(self.vehicles.len());
        for (i, spec) in self.vehicles.into_iter().enumerate() {
            let id = AgentId::try_from(i)
                .map_err(|_| SimError::Config("too many vehicles".into()))?;
            let mut vehicle =
                Vehicle::new(id, spec.army, spec.kind, spec.position, self.steering, self.config.seed);

            match spec.kind {
                VehicleKind::Builder => {
                    if let Some(dest) = spec.destination.or(spec.kind.default_destination()) {
                        // Failure is already logged; the Builder simply wanders.
                        let _ = vehicle.change_path(dest, &self.finder);
                    }
                }
                VehicleKind::Tank => {
                    vehicle.path = match spec.patrol {
                        Some(waypoints) => Some(Path::new(waypoints)),
                        None => spec.kind.default_patrol(spec.position),
                    };
                }
            }
            units.push(Unit::new(vehicle));
        }

        let obstacles: Vec<Obstacle> = self
            .obstacles
            .into_iter()
            .enumerate()
            .map(|(i, (position, radius))| Obstacle { id: ObstacleId(i as u32), position, radius })
            .collect();

        if units.is_empty() {
            warn!("simulation built with no vehicles");
        }
        info!(vehicles = units.len(), obstacles = obstacles.len(), "simulation built");

        let next_id = units.len() as u32;
        Sim::from_parts(
            self.config,
            units,
            self.finder,
            obstacles,
            self.steering,
            self.detection_shape,
            next_id,
        )
    }
}
