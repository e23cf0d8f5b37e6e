//! Path-subsystem error type.

use thiserror::Error;

use rts_core::Vec2;

/// Errors produced by `rts-path`.
#[derive(Debug, Error)]
pub enum PathError {
    #[error("no path from {from} to {to}")]
    Unreachable { from: Vec2, to: Vec2 },

    #[error("point {0} lies outside the tile grid")]
    OutOfBounds(Vec2),

    #[error("waypoint parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type PathResult<T> = Result<T, PathError>;
