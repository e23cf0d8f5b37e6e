//! `rts-core` — shared vocabulary of the `rts` agent framework.
//!
//! Every other `rts-*` crate builds on the types here; this crate depends on
//! none of them.  External dependencies are `glam` for the vector, `rand`
//! for seeded streams and `thiserror`, with `serde` behind a feature.
//!
//! # Modules
//!
//! | Module    | Contents                                                  |
//! |-----------|-----------------------------------------------------------|
//! | [`geo`]   | `Vec2` (glam), `VecExt` heading/magnitude helpers, `wrap_degrees` |
//! | [`ids`]   | `AgentId`, `ArmyId`, `ObstacleId`                         |
//! | [`time`]  | `Tick`, `SimClock`, `SimConfig`                           |
//! | [`rng`]   | `AgentRng` (wander jitter), `SimRng` (scenario set-up)    |
//! | [`error`] | `CoreError`, `CoreResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                          |
//! |---------|-----------------------------------------------------------------|
//! | `serde` | `Serialize`/`Deserialize` on ids, `Tick`, `SimClock`, `SimConfig` and `Vec2`. |

pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::{Vec2, VecExt, wrap_degrees};
pub use ids::{AgentId, ArmyId, ObstacleId};
pub use rng::{AgentRng, SimRng};
pub use time::{SimClock, SimConfig, Tick};
