//! The `Sim` struct and its tick loop.

use std::sync::Arc;

use tracing::{debug, warn};

use rts_core::{AgentId, SimClock, SimConfig, Tick, Vec2};
use rts_path::PathFinder;
use rts_steering::{Contact, DetectionShape, Radar, SteeringConfig};

use crate::context::ContactMap;
use crate::{Obstacle, SimError, SimObserver, SimResult, TickContext, Unit, Vehicle};

// ── Per-unit outcome of the think/steer phase ─────────────────────────────────

struct StateChange {
    agent: AgentId,
    from:  String,
    to:    String,
}

struct StepOutcome {
    steered: bool,
    change:  Option<StateChange>,
}

/// Run one vehicle's brain and steering computer for this tick.
///
/// Strict per-vehicle order: `reset` → brain → `compute`.  Touches nothing
/// but `unit`, so it is safe to run for different vehicles in parallel.
fn step_unit(unit: &mut Unit, ctx: &TickContext) -> StepOutcome {
    let before = unit.brain.active().cloned();
    unit.vehicle.steering.reset();

    let steered = match unit.brain.tick(&mut unit.vehicle, ctx) {
        Ok(()) => {
            let vehicle = &mut unit.vehicle;
            vehicle.steering.compute(&mut vehicle.body);
            true
        }
        Err(e) => {
            warn!(agent = %unit.vehicle.id, error = %e, "brain not ticked; steering skipped");
            false
        }
    };

    let after = unit.brain.active();
    let changed = match (&before, after) {
        (Some(a), Some(b)) => !Arc::ptr_eq(a, b),
        (None, None) => false,
        _ => true,
    };
    let change = changed.then(|| StateChange {
        agent: unit.vehicle.id,
        from:  before.as_ref().map_or("<none>", |s| s.label()).to_owned(),
        to:    unit.state_label().to_owned(),
    });

    StepOutcome { steered, change }
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// Each tick:
///
/// 1. **Snapshot** every vehicle and rebuild the radar from the snapshot
///    plus the static obstacles.  Hand over the contacts reported since the
///    previous tick.
/// 2. **Think/steer** (optionally parallel with the `parallel` feature):
///    for each vehicle in ascending id order, `reset` → `brain.tick` →
///    `compute`.
/// 3. **Physics**: `position += velocity * dt` for every vehicle.  This
///    stands in for the engine's physics step.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<P: PathFinder> {
    pub config: SimConfig,

    pub clock: SimClock,

    /// Vehicles sorted by ascending `AgentId`.
    pub units: Vec<Unit>,

    pub finder: P,

    pub obstacles: Vec<Obstacle>,

    pub steering_config: SteeringConfig,

    pub detection_shape: DetectionShape,

    /// Contacts pushed since the last tick; consumed by the next one.
    pub(crate) pending_contacts: ContactMap,

    next_id: u32,

    #[cfg(feature = "parallel")]
    pool: Option<rayon::ThreadPool>,
}

impl<P: PathFinder> Sim<P> {
    pub(crate) fn from_parts(
        config:          SimConfig,
        units:           Vec<Unit>,
        finder:          P,
        obstacles:       Vec<Obstacle>,
        steering_config: SteeringConfig,
        detection_shape: DetectionShape,
        next_id:         u32,
    ) -> SimResult<Self> {
        #[cfg(feature = "parallel")]
        let pool = match config.num_threads {
            None => None,
            Some(n) => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .map_err(|e| SimError::Config(e.to_string()))?,
            ),
        };

        Ok(Self {
            clock: config.make_clock(),
            config,
            units,
            finder,
            obstacles,
            steering_config,
            detection_shape,
            pending_contacts: ContactMap::default(),
            next_id,
            #[cfg(feature = "parallel")]
            pool,
        })
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Run the simulation from the current tick to `config.end_tick()`.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        while self.clock.current_tick < self.config.end_tick() {
            self.step(observer)?;
        }
        observer.on_sim_end(self.clock.current_tick);
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(observer)?;
        }
        Ok(())
    }

    pub fn vehicle(&self, agent: AgentId) -> Option<&Vehicle> {
        self.unit(agent).map(|u| &u.vehicle)
    }

    pub fn unit(&self, agent: AgentId) -> Option<&Unit> {
        let i = self.position_of(agent)?;
        Some(&self.units[i])
    }

    pub fn unit_mut(&mut self, agent: AgentId) -> Option<&mut Unit> {
        let i = self.position_of(agent)?;
        Some(&mut self.units[i])
    }

    /// Add a unit built elsewhere.  Its id must not be in use.
    pub fn add_unit(&mut self, unit: Unit) -> SimResult<AgentId> {
        let id = unit.id();
        match self.units.binary_search_by_key(&id, Unit::id) {
            Ok(_) => Err(SimError::Config(format!("{id} already exists"))),
            Err(i) => {
                self.next_id = self.next_id.max(id.0.saturating_add(1));
                self.units.insert(i, unit);
                Ok(id)
            }
        }
    }

    /// Next unused agent id.
    pub fn allocate_id(&mut self) -> AgentId {
        let id = AgentId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Remove a vehicle.  Its brain and path are dropped without any unwind.
    pub fn remove_vehicle(&mut self, agent: AgentId) -> SimResult<Unit> {
        let i = self.position_of(agent).ok_or(SimError::AgentNotFound(agent))?;
        self.pending_contacts.remove(&agent);
        debug!(%agent, "vehicle removed");
        Ok(self.units.remove(i))
    }

    /// Re-route `agent` to `destination`.
    ///
    /// An unreachable destination leaves the current path untouched and is
    /// reported as `SimError::Path`.
    pub fn change_path(&mut self, agent: AgentId, destination: Vec2) -> SimResult<()> {
        let i = self.position_of(agent).ok_or(SimError::AgentNotFound(agent))?;
        self.units[i].vehicle.change_path(destination, &self.finder)?;
        Ok(())
    }

    /// Report a physics contact for `agent`, consumed on the next tick.
    pub fn push_contact(&mut self, agent: AgentId, contact: Contact) {
        self.pending_contacts.entry(agent).or_default().push(contact);
    }

    /// Circle-overlap pass over vehicles and obstacles; every overlap is
    /// pushed as a contact for the next tick.  Returns the number pushed.
    ///
    /// A minimal stand-in for an engine's collision detection.
    pub fn detect_overlaps(&mut self) -> usize {
        let mut found: Vec<(AgentId, Contact)> = Vec::new();
        for (i, a) in self.units.iter().enumerate() {
            let (pa, ra) = (a.vehicle.body.position, a.vehicle.body.radius);
            for b in &self.units[i + 1..] {
                let (pb, rb) = (b.vehicle.body.position, b.vehicle.body.radius);
                if let Some(c) = Contact::between_circles(pa, ra, pb, rb) {
                    found.push((a.id(), c));
                    found.push((b.id(), Contact::new(-c.normal, c.overlap)));
                }
            }
            for o in &self.obstacles {
                if let Some(c) = Contact::between_circles(pa, ra, o.position, o.radius) {
                    found.push((a.id(), c));
                }
            }
        }
        let count = found.len();
        for (agent, contact) in found {
            self.push_contact(agent, contact);
        }
        count
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);

        let ctx = self.build_context(now);
        let outcomes = self.think_and_steer(&ctx);

        let dt = self.clock.tick_secs;
        for unit in &mut self.units {
            unit.vehicle.body.integrate(dt);
        }

        let mut steered = 0;
        for outcome in outcomes {
            steered += usize::from(outcome.steered);
            if let Some(c) = outcome.change {
                debug!(tick = %now, agent = %c.agent, from = %c.from, to = %c.to, "state change");
                observer.on_state_change(now, c.agent, &c.from, &c.to);
            }
        }

        observer.on_tick_end(now, steered);
        let interval = self.config.snapshot_interval_ticks;
        if interval > 0 && now.0.is_multiple_of(interval) {
            observer.on_snapshot(now, &self.units);
        }

        self.clock.advance();
        Ok(())
    }

    /// Freeze the world for this tick.
    fn build_context(&mut self, now: Tick) -> TickContext {
        let agents: Vec<_> = self.units.iter().map(|u| u.vehicle.snapshot()).collect();
        let detections = agents
            .iter()
            .map(|a| a.detection())
            .chain(self.obstacles.iter().map(Obstacle::detection));
        let radar = Radar::new(detections, self.detection_shape);

        let mut ctx = TickContext::new(now, self.clock.tick_secs, agents, radar);
        ctx.contacts = std::mem::take(&mut self.pending_contacts);
        ctx
    }

    fn think_and_steer(&mut self, ctx: &TickContext) -> Vec<StepOutcome> {
        #[cfg(not(feature = "parallel"))]
        {
            self.units.iter_mut().map(|unit| step_unit(unit, ctx)).collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            let units = &mut self.units;
            let run = move || -> Vec<StepOutcome> {
                units.par_iter_mut().map(|unit| step_unit(unit, ctx)).collect()
            };
            match &self.pool {
                Some(pool) => pool.install(run),
                None => run(),
            }
        }
    }

    fn position_of(&self, agent: AgentId) -> Option<usize> {
        self.units.binary_search_by_key(&agent, Unit::id).ok()
    }
}
