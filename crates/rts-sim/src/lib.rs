//! `rts-sim` — vehicles, their decision states, and the tick loop.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Snapshot  — freeze every vehicle into an AgentSnapshot; rebuild the
//!                 radar (R-tree) from snapshots + static obstacles; hand
//!                 over contacts pushed since the last tick.
//!   ② Think     — for each vehicle in ascending AgentId order:
//!                   steering.reset()
//!                   brain.tick(vehicle, ctx)   // states call behaviors
//!                   steering.compute(body)     // velocity + heading
//!                 (parallel with the `parallel` feature).
//!   ③ Physics   — position += velocity * dt.
//! ```
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`vehicle`]  | `VehicleKind`, `Vehicle` (steerable host), `Unit`, `Brain` |
//! | [`states`]   | Builder and Tank states                                    |
//! | [`roster`]   | `AgentSnapshot`, `Roster`, `closest_enemy`                 |
//! | [`context`]  | `TickContext`, `Obstacle`                                  |
//! | [`sim`]      | `Sim` tick loop                                            |
//! | [`builder`]  | `SimBuilder`, `VehicleSpec`                                |
//! | [`observer`] | `SimObserver`, `NoopObserver`                              |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the think phase on Rayon's thread pool.           |
//! | `fx-hash`  | FxHash for the per-tick contact index.                 |

pub mod builder;
pub mod context;
pub mod error;
pub mod observer;
pub mod roster;
pub mod sim;
pub mod states;
pub mod vehicle;

#[cfg(test)]
mod tests;

pub use builder::{SimBuilder, VehicleSpec};
pub use context::{Obstacle, TickContext};
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use roster::{AgentSnapshot, Roster, closest_enemy};
pub use sim::Sim;
pub use states::VehicleState;
pub use vehicle::{Brain, Unit, Vehicle, VehicleKind};
