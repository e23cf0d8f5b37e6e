//! 2-D vector primitive and angle helpers.
//!
//! The vector type is `glam::Vec2` (single precision).  Game-world units are
//! pixels, so `f32` is plenty; anything that needs more precision belongs to
//! the engine, not to steering.
//!
//! Angles exposed to the rest of the framework are in **degrees**, measured
//! with `atan2(dy, dx)` (screen coordinates: +y points down, so positive
//! angles turn clockwise on screen).

pub use glam::Vec2;

/// Extra vector operations the steering layer relies on.
///
/// Every operation is total: degenerate (zero-length) inputs produce a zero
/// vector or `None`, never `NaN`.
pub trait VecExt: Sized {
    /// Rescale to length `magnitude`, keeping the direction.
    ///
    /// The zero vector stays zero (there is no direction to keep).
    fn with_magnitude(self, magnitude: f32) -> Self;

    /// Angle in degrees of the segment `self → other`.
    ///
    /// Returns `None` when the two points coincide; `atan2(0, 0)` would give
    /// an arbitrary angle.
    fn heading_deg_to(self, other: Self) -> Option<f32>;

    /// Unit vector pointing along `degrees`.
    fn from_heading_deg(degrees: f32) -> Self;
}

impl VecExt for Vec2 {
    #[inline]
    fn with_magnitude(self, magnitude: f32) -> Vec2 {
        self.normalize_or_zero() * magnitude
    }

    #[inline]
    fn heading_deg_to(self, other: Vec2) -> Option<f32> {
        let delta = other - self;
        if delta.length_squared() <= f32::EPSILON * f32::EPSILON {
            return None;
        }
        Some(delta.y.atan2(delta.x).to_degrees())
    }

    #[inline]
    fn from_heading_deg(degrees: f32) -> Vec2 {
        let radians = degrees.to_radians();
        Vec2::new(radians.cos(), radians.sin())
    }
}

/// Map any finite angle into `[0, 360)`.
#[inline]
pub fn wrap_degrees(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}
