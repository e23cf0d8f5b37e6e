//! Everything a vehicle may sense during one tick.

use rts_core::{AgentId, ArmyId, ObstacleId, Tick, Vec2};
use rts_steering::{Contact, Detection, DetectionKind, Radar, RadarView};

use crate::{AgentSnapshot, Roster};

#[cfg(not(feature = "fx-hash"))]
pub(crate) type ContactMap = std::collections::HashMap<AgentId, Vec<Contact>>;
#[cfg(feature = "fx-hash")]
pub(crate) type ContactMap = rustc_hash::FxHashMap<AgentId, Vec<Contact>>;

/// A static round obstacle (rock, building, wreck) known to the radar.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Obstacle {
    pub id:       ObstacleId,
    pub position: Vec2,
    pub radius:   f32,
}

impl Obstacle {
    pub fn detection(&self) -> Detection {
        Detection {
            kind:     DetectionKind::Obstacle(self.id),
            position: self.position,
            velocity: Vec2::ZERO,
            radius:   self.radius,
        }
    }
}

/// Read-only world handed to every state for one tick.
///
/// Built once per tick from the pre-tick snapshot and shared by all
/// vehicles (and all worker threads with the `parallel` feature).  Nothing
/// in here survives into the next tick.
pub struct TickContext {
    pub tick:   Tick,
    pub dt:     f32,
    /// Every vehicle, ascending id.
    pub agents: Vec<AgentSnapshot>,
    pub radar:  Radar,
    pub(crate) contacts: ContactMap,
}

impl TickContext {
    pub fn new(tick: Tick, dt: f32, agents: Vec<AgentSnapshot>, radar: Radar) -> Self {
        Self { tick, dt, agents, radar, contacts: ContactMap::default() }
    }

    /// Contacts the physics step reported for `agent` last tick.
    pub fn contacts_for(&self, agent: AgentId) -> &[Contact] {
        self.contacts.get(&agent).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn add_contact(&mut self, agent: AgentId, contact: Contact) {
        self.contacts.entry(agent).or_default().push(contact);
    }

    /// Radar as seen by `agent` (the agent itself filtered out).
    pub fn sensor_for(&self, agent: AgentId) -> RadarView<'_> {
        self.radar.view_for(agent)
    }

    pub fn agent(&self, id: AgentId) -> Option<&AgentSnapshot> {
        self.agents
            .binary_search_by_key(&id, |a| a.id)
            .ok()
            .map(|i| &self.agents[i])
    }
}

impl Roster for TickContext {
    fn enemies_of(&self, army: ArmyId) -> impl Iterator<Item = &AgentSnapshot> {
        self.agents.as_slice().enemies_of(army)
    }
}
