//! `rts-path` — waypoint paths and the pathfinder contract.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`path`]    | `Path` (waypoints + cursor), `PathMode`                     |
//! | [`finder`]  | `PathFinder` trait                                          |
//! | [`grid`]    | `TileGrid`, `GridPathFinder` (8-connected A*)               |
//! | [`loader`]  | `load_path_csv`, `load_path_reader`                         |
//! | [`error`]   | `PathError`, `PathResult<T>`                                |
//!
//! # Ownership model
//!
//! A pathfinder produces a fresh [`Path`] per request.  The requesting agent
//! owns it exclusively and only ever moves its cursor; a re-route replaces
//! the whole value.  An empty path is a valid, inert value: followers treat
//! it as "nothing to follow".

pub mod error;
pub mod finder;
pub mod grid;
pub mod loader;
pub mod path;


pub use error::{PathError, PathResult};
pub use finder::PathFinder;
pub use grid::{GridPathFinder, TileGrid};
pub use loader::{load_path_csv, load_path_reader};
pub use path::{Path, PathMode};
