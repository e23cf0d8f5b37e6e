//! Collision contacts surfaced by the physics step.

use rts_core::Vec2;

/// One overlap between the agent's body and something else.
///
/// `normal` points from the other body toward this agent (the direction
/// that separates them); `overlap` is the penetration depth.  A contact with
/// `overlap <= 0` is touching at most and produces no reaction.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Contact {
    pub normal:  Vec2,
    pub overlap: f32,
}

impl Contact {
    pub fn new(normal: Vec2, overlap: f32) -> Self {
        Self { normal, overlap }
    }

    /// Contact between two circles, seen from the circle at `this`.
    ///
    /// Returns `None` when the circles do not overlap.  Coincident centres
    /// get an arbitrary but fixed separating normal (+x).
    pub fn between_circles(this: Vec2, this_radius: f32, other: Vec2, other_radius: f32) -> Option<Self> {
        let offset = this - other;
        let overlap = this_radius + other_radius - offset.length();
        if overlap <= 0.0 {
            return None;
        }
        let normal = offset.try_normalize().unwrap_or(Vec2::X);
        Some(Self { normal, overlap })
    }

    #[inline]
    pub fn is_overlapping(&self) -> bool {
        self.overlap > 0.0
    }
}
