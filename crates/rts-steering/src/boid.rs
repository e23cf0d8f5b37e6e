//! The agent capability interface consumed by every behavior.

use rts_core::Vec2;

/// Read-only view of a steerable entity.
///
/// Behaviors take `&dyn Boid` so the same code steers vehicles, radar
/// snapshots of other agents, or test doubles.
pub trait Boid {
    /// World position (owned by the physics step).
    fn position(&self) -> Vec2;

    /// Current velocity in world units per second.
    fn velocity(&self) -> Vec2;

    /// Speed cap.  After a compute pass `|velocity| <= max_speed`.
    fn max_speed(&self) -> f32;

    /// Sprite orientation in degrees (travel angle + 180, see
    /// [`SteeringComputer::compute`][crate::SteeringComputer::compute]).
    fn heading(&self) -> f32;

    /// Collision radius.  Zero for point-like agents.
    fn radius(&self) -> f32 {
        0.0
    }
}

/// A [`Boid`] whose motion the steering computer may write.
pub trait Steerable: Boid {
    fn set_velocity(&mut self, velocity: Vec2);
    fn set_heading(&mut self, degrees: f32);
}

/// Plain kinematic state of one agent.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Body {
    pub position:  Vec2,
    pub velocity:  Vec2,
    pub max_speed: f32,
    pub heading:   f32,
    pub radius:    f32,
}

impl Body {
    /// A body at rest, facing the default sprite direction (0°).
    pub fn new(position: Vec2, max_speed: f32) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            max_speed,
            heading: 0.0,
            radius: 10.0,
        }
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Advance the position by one physics step.
    #[inline]
    pub fn integrate(&mut self, dt: f32) {
        self.position += self.velocity * dt;
    }
}

impl Boid for Body {
    #[inline]
    fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    fn velocity(&self) -> Vec2 {
        self.velocity
    }

    #[inline]
    fn max_speed(&self) -> f32 {
        self.max_speed
    }

    #[inline]
    fn heading(&self) -> f32 {
        self.heading
    }

    #[inline]
    fn radius(&self) -> f32 {
        self.radius
    }
}

impl Steerable for Body {
    #[inline]
    fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    #[inline]
    fn set_heading(&mut self, degrees: f32) {
        self.heading = degrees;
    }
}
