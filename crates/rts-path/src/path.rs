//! The `Path` value — an immutable waypoint list with a movable cursor.

use rts_core::Vec2;

/// How a consumer treats the end of a path.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathMode {
    /// The cursor stops on the last waypoint.
    Follow,
    /// The cursor wraps back to the first waypoint after the last one.
    Patrol,
}

/// An ordered sequence of waypoints plus the index of the waypoint the
/// follower is currently steering toward.
///
/// The waypoint list never changes after construction; only the cursor
/// moves.  The cursor is always a valid index for a non-empty path.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    waypoints: Vec<Vec2>,
    cursor:    usize,
}

impl Path {
    /// Build a path with the cursor on the first waypoint.
    pub fn new(waypoints: Vec<Vec2>) -> Self {
        Self { waypoints, cursor: 0 }
    }

    /// A path with no waypoints.
    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    #[inline]
    pub fn waypoints(&self) -> &[Vec2] {
        &self.waypoints
    }

    /// Index of the current target waypoint.
    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Terminal waypoint, or `None` for an empty path.
    #[inline]
    pub fn last_node(&self) -> Option<Vec2> {
        self.waypoints.last().copied()
    }

    /// Waypoint the follower is currently steering toward, or `None` for an
    /// empty path.
    #[inline]
    pub fn current_target(&self) -> Option<Vec2> {
        self.waypoints.get(self.cursor).copied()
    }

    /// `true` when the cursor sits on the terminal waypoint.
    #[inline]
    pub fn is_on_last(&self) -> bool {
        !self.waypoints.is_empty() && self.cursor + 1 == self.waypoints.len()
    }

    /// Move the cursor to the next waypoint.
    ///
    /// Returns `false` when nothing moved: the path is empty, or `mode` is
    /// [`PathMode::Follow`] and the cursor is already on the last waypoint.
    /// In [`PathMode::Patrol`] the cursor wraps to waypoint 0 instead.
    pub fn advance(&mut self, mode: PathMode) -> bool {
        if self.waypoints.is_empty() {
            return false;
        }
        if self.is_on_last() {
            return match mode {
                PathMode::Follow => false,
                PathMode::Patrol => {
                    self.cursor = 0;
                    // A single-waypoint loop wraps onto itself.
                    self.waypoints.len() > 1
                }
            };
        }
        self.cursor += 1;
        true
    }

    /// Put the cursor back on the first waypoint.
    #[inline]
    pub fn rewind(&mut self) {
        self.cursor = 0;
    }
}

impl From<Vec<Vec2>> for Path {
    fn from(waypoints: Vec<Vec2>) -> Self {
        Path::new(waypoints)
    }
}
