//! The steering behavior library.
//!
//! Every behavior is a small `Copy` value holding its parameters.  Calling it
//! reads the host through [`Boid`] and returns a force; summing and scaling
//! forces is the caller's business (usually the
//! [`SteeringComputer`][crate::SteeringComputer]).
//!
//! | Behavior                | Input                     | Composes          |
//! |-------------------------|---------------------------|-------------------|
//! | [`Seek`]                | target point              | —                 |
//! | [`Flee`]                | target point              | —                 |
//! | [`Wander`]              | persistent [`WanderState`]| `Seek`            |
//! | [`Pursuit`]             | target agent              | `Seek` (default)  |
//! | [`Evasion`]             | target agent              | `Flee` (default)  |
//! | [`PathFollowing`]       | `&mut Path`               | `Seek` (default)  |
//! | [`PathPatrolling`]      | `&mut Path`               | `Seek` (default)  |
//! | [`CollisionReaction`]   | [`Contact`]               | —                 |
//! | [`CollisionAvoidance`]  | `&dyn Sensor`             | —                 |
//!
//! [`Contact`]: crate::Contact

mod collision;
mod path;
mod pursuit;
mod seek;
mod wander;

use rts_core::Vec2;

use crate::Boid;

pub use collision::{CollisionAvoidance, CollisionReaction};
pub use path::{PathFollowing, PathPatrolling};
pub use pursuit::{Evasion, Pursuit};
pub use seek::{Flee, Seek};
pub use wander::{Wander, WanderState};

/// A behavior driven by a single target point.
///
/// Composing behaviors hold one of these as their delegate and call it with
/// a transformed target (a predicted position, a waypoint, …).
pub trait TargetBehavior {
    fn steer(&self, host: &dyn Boid, target: Vec2) -> Vec2;
}

impl<T: TargetBehavior + ?Sized> TargetBehavior for &T {
    fn steer(&self, host: &dyn Boid, target: Vec2) -> Vec2 {
        (**self).steer(host, target)
    }
}
