//! Steering tunables.

/// Every knob the behavior library reads.
///
/// Distances are world units (pixels), angles degrees, times game seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SteeringConfig {
    /// Distance at which a path waypoint counts as reached.
    pub arrival_tolerance: f32,

    /// Slowing radius handed to `Seek` by the computer's convenience calls.
    pub slowing_radius: f32,

    /// How far ahead of the agent the wander circle sits.
    pub wander_circle_distance: f32,

    /// Radius of the wander circle.
    pub wander_circle_radius: f32,

    /// Maximum change of the wander angle per tick (full width, degrees).
    pub wander_angle_change_deg: f32,

    /// Upper bound on pursuit/evasion prediction.
    pub max_lookahead_secs: f32,

    /// Numerator of the inverse-distance avoidance weight.
    pub avoidance_strength: f32,

    /// Smallest gap used in the avoidance weight; keeps overlapping bodies
    /// from producing unbounded forces.
    pub avoidance_min_gap: f32,
}

impl Default for SteeringConfig {
    fn default() -> Self {
        Self {
            arrival_tolerance:       20.0,
            slowing_radius:          20.0,
            wander_circle_distance:  30.0,
            wander_circle_radius:    15.0,
            wander_angle_change_deg: 30.0,
            max_lookahead_secs:      2.0,
            avoidance_strength:      10.0,
            avoidance_min_gap:       1.0,
        }
    }
}
