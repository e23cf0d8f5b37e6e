//! Sensing: what an agent can see around itself.
//!
//! [`Sensor`] is the seam between steering and the world.  The stock
//! implementation is [`Radar`], an R-tree snapshot of every agent and
//! obstacle taken once per tick.  Each agent queries it through a
//! [`RadarView`] that hides the agent from its own radar.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use rts_core::{AgentId, ObstacleId, Vec2};

/// What a detection refers to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DetectionKind {
    Obstacle(ObstacleId),
    Agent(AgentId),
}

/// One thing the sensor picked up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Detection {
    pub kind:     DetectionKind,
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius:   f32,
}

impl Detection {
    /// Agent id of the detection, if it is an agent.
    pub fn agent(&self) -> Option<AgentId> {
        match self.kind {
            DetectionKind::Agent(id) => Some(id),
            DetectionKind::Obstacle(_) => None,
        }
    }
}

/// Detection cone: `range` world units, `fov_deg` full opening angle.
///
/// `fov_deg >= 360` is an omnidirectional sensor.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DetectionShape {
    pub range:   f32,
    pub fov_deg: f32,
}

impl Default for DetectionShape {
    fn default() -> Self {
        Self { range: 100.0, fov_deg: 120.0 }
    }
}

impl DetectionShape {
    pub fn new(range: f32, fov_deg: f32) -> Self {
        Self { range, fov_deg }
    }

    pub fn omni(range: f32) -> Self {
        Self { range, fov_deg: 360.0 }
    }

    /// Whether a point at `offset` from the origin falls inside the cone
    /// opened along `facing`.  Edge distance (`offset` minus `radius`) is
    /// compared with the range so large bodies are seen by their rim.
    pub fn contains(&self, offset: Vec2, radius: f32, facing: Vec2) -> bool {
        let distance = offset.length();
        if distance - radius > self.range {
            return false;
        }
        if self.fov_deg >= 360.0 {
            return true;
        }
        let (Some(dir), Some(facing)) = (offset.try_normalize(), facing.try_normalize()) else {
            // Coincident or no facing: treat as visible.
            return true;
        };
        dir.dot(facing) >= (self.fov_deg * 0.5).to_radians().cos()
    }
}

/// Anything that can answer "what is near this point".
pub trait Sensor: Send + Sync {
    /// The cone this sensor is tuned to.
    fn shape(&self) -> DetectionShape;

    /// Detections inside `shape` opened from `origin` along `facing`,
    /// closest first.
    fn query_nearby(&self, origin: Vec2, facing: Vec2, shape: &DetectionShape) -> Vec<Detection>;
}

// ── R-tree entry ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
struct RadarEntry {
    point:     [f32; 2],
    detection: Detection,
}

impl RTreeObject for RadarEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for RadarEntry {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── Radar ─────────────────────────────────────────────────────────────────────

/// Frozen snapshot of every body in the world, indexed by centre point.
///
/// Rebuilt once per tick from the pre-tick snapshot, so every agent senses
/// the same world regardless of update order.
pub struct Radar {
    index:      RTree<RadarEntry>,
    max_radius: f32,
    shape:      DetectionShape,
}

impl Radar {
    /// Bulk-load a radar from `detections` with default shape `shape`.
    pub fn new(detections: impl IntoIterator<Item = Detection>, shape: DetectionShape) -> Self {
        let mut max_radius = 0.0_f32;
        let entries: Vec<RadarEntry> = detections
            .into_iter()
            .map(|detection| {
                max_radius = max_radius.max(detection.radius);
                RadarEntry { point: detection.position.to_array(), detection }
            })
            .collect();
        Self { index: RTree::bulk_load(entries), max_radius, shape }
    }

    pub fn empty(shape: DetectionShape) -> Self {
        Self::new(std::iter::empty(), shape)
    }

    pub fn len(&self) -> usize {
        self.index.size()
    }

    pub fn is_empty(&self) -> bool {
        self.index.size() == 0
    }

    /// Query with an optional agent excluded.
    pub fn query(
        &self,
        origin:  Vec2,
        facing:  Vec2,
        shape:   &DetectionShape,
        exclude: Option<AgentId>,
    ) -> Vec<Detection> {
        // Search radius covers centres up to `range + largest radius` away;
        // the cone test then works on edge distance.
        let reach = shape.range.max(0.0) + self.max_radius;
        let mut found: Vec<(f32, Detection)> = self
            .index
            .locate_within_distance(origin.to_array(), reach * reach)
            .filter(|entry| exclude.is_none() || entry.detection.agent() != exclude)
            .filter(|entry| {
                shape.contains(entry.detection.position - origin, entry.detection.radius, facing)
            })
            .map(|entry| (entry.detection.position.distance_squared(origin), entry.detection))
            .collect();
        found.sort_by(|a, b| a.0.total_cmp(&b.0));
        found.into_iter().map(|(_, detection)| detection).collect()
    }

    /// A sensor for `agent` that never reports the agent itself.
    pub fn view_for(&self, agent: AgentId) -> RadarView<'_> {
        RadarView { radar: self, exclude: Some(agent) }
    }
}

impl Sensor for Radar {
    fn shape(&self) -> DetectionShape {
        self.shape
    }

    fn query_nearby(&self, origin: Vec2, facing: Vec2, shape: &DetectionShape) -> Vec<Detection> {
        self.query(origin, facing, shape, None)
    }
}

/// Borrowed radar filtered for one agent.
#[derive(Clone, Copy)]
pub struct RadarView<'a> {
    radar:   &'a Radar,
    exclude: Option<AgentId>,
}

impl Sensor for RadarView<'_> {
    fn shape(&self) -> DetectionShape {
        self.radar.shape
    }

    fn query_nearby(&self, origin: Vec2, facing: Vec2, shape: &DetectionShape) -> Vec<Detection> {
        self.radar.query(origin, facing, shape, self.exclude)
    }
}
