//! `rts-steering` — force-based locomotion for autonomous agents.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                        |
//! |---------------|-----------------------------------------------------------------|
//! | [`boid`]      | `Boid` / `Steerable` capability traits, `Body`                  |
//! | [`behavior`]  | Seek, Flee, Wander, Pursuit, Evasion, path following/patrolling, collision reaction/avoidance |
//! | [`computer`]  | `SteeringComputer` — per-agent force accumulator + integrator   |
//! | [`contact`]   | `Contact` — overlap reported by the physics step                |
//! | [`sensor`]    | `Sensor` trait, `Radar` (R-tree snapshot), `RadarView`          |
//! | [`config`]    | `SteeringConfig` tunables                                       |
//!
//! # Per-tick protocol
//!
//! ```text
//! computer.reset();                       // zero the accumulator
//! computer.follow_path(&body, &mut path); // any number of behavior calls,
//! computer.react_to_collision(&contact);  // each adds into the accumulator
//! computer.compute(&mut body);            // integrate → velocity + heading
//! ```
//!
//! Behaviors never keep a reference to their host; they read it through the
//! [`Boid`] trait for the duration of one call.

pub mod behavior;
pub mod boid;
pub mod computer;
pub mod config;
pub mod contact;
pub mod sensor;


pub use behavior::{
    CollisionAvoidance, CollisionReaction, Evasion, Flee, PathFollowing, PathPatrolling,
    Pursuit, Seek, TargetBehavior, Wander, WanderState,
};
pub use boid::{Body, Boid, Steerable};
pub use computer::SteeringComputer;
pub use config::SteeringConfig;
pub use contact::Contact;
pub use sensor::{Detection, DetectionKind, DetectionShape, Radar, RadarView, Sensor};
