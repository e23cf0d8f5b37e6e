//! skirmish — headless run of the rts agent framework.
//!
//! Two armies on a small walled tile map: Builders route to a destination
//! with the grid pathfinder and roam once they arrive; Tanks patrol a loop
//! and break off to chase any enemy that comes within scope.
//!
//! ```text
//! skirmish [config.json] [patrol.csv]
//! ```
//!
//! Without a config file the built-in scenario below is used.  A waypoint
//! CSV (header `x,y`) replaces every Tank's patrol loop.  Log verbosity
//! follows `RUST_LOG` (default `info`); the final state of every vehicle is
//! printed to stdout as JSON.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use rts_core::{AgentId, ArmyId, SimConfig, SimRng, Tick, Vec2};
use rts_path::{GridPathFinder, TileGrid, load_path_csv};
use rts_sim::{SimBuilder, SimObserver, Unit, VehicleKind, VehicleSpec};
use rts_steering::SteeringConfig;

// ── Scenario config ───────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
enum KindName {
    Builder,
    Tank,
}

impl From<KindName> for VehicleKind {
    fn from(kind: KindName) -> Self {
        match kind {
            KindName::Builder => VehicleKind::Builder,
            KindName::Tank => VehicleKind::Tank,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
struct VehicleEntry {
    kind:        KindName,
    army:        u16,
    position:    Vec2,
    #[serde(default)]
    destination: Option<Vec2>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
struct ScenarioConfig {
    sim:       SimConfig,
    steering:  SteeringConfig,
    tile_size: f32,
    /// Max random offset applied to each spawn point, per axis.
    spawn_jitter: f32,
    /// ASCII tile map, `#` = blocked.
    map:       Vec<String>,
    vehicles:  Vec<VehicleEntry>,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        let map = [
            "..............................",
            "..............................",
            "..........#...................",
            "..........#...................",
            "..........#.........###.......",
            "..........#...................",
            "..........#...................",
            "..............................",
            "..............................",
            "..................#...........",
            "..................#...........",
            "..................#...........",
            "..............................",
            "......####....................",
            "..............................",
            "..............................",
            "..............................",
            "..............................",
        ];
        let entry = |kind, army, x, y| VehicleEntry {
            kind,
            army,
            position: Vec2::new(x, y),
            destination: None,
        };
        Self {
            sim: SimConfig { total_ticks: 60 * 60, snapshot_interval_ticks: 600, seed: 42, ..SimConfig::default() },
            steering: SteeringConfig::default(),
            tile_size: 32.0,
            spawn_jitter: 8.0,
            map: map.iter().map(|row| (*row).to_owned()).collect(),
            vehicles: vec![
                entry(KindName::Builder, 0, 48.0, 48.0),
                entry(KindName::Builder, 0, 80.0, 400.0),
                entry(KindName::Tank, 0, 120.0, 240.0),
                entry(KindName::Builder, 1, 900.0, 520.0),
                entry(KindName::Tank, 1, 700.0, 400.0),
            ],
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<ScenarioConfig> {
    let Some(path) = path else {
        info!("no config file given; using built-in scenario");
        return Ok(ScenarioConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config: ScenarioConfig = serde_json::from_str(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    info!(path = %path.display(), "config loaded");
    Ok(config)
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct UnitReport {
    id:       u32,
    army:     u16,
    kind:     String,
    states:   Vec<String>,
    position: Vec2,
    heading:  f32,
    has_path: bool,
}

impl UnitReport {
    fn from_unit(unit: &Unit) -> Self {
        let v = &unit.vehicle;
        Self {
            id:       v.id.0,
            army:     v.army.0,
            kind:     format!("{:?}", v.kind),
            states:   unit.brain.labels().into_iter().map(str::to_owned).collect(),
            position: v.position(),
            heading:  v.body.heading,
            has_path: v.path.is_some(),
        }
    }
}

#[derive(Default)]
struct SkirmishObserver {
    state_changes: usize,
    snapshots:     usize,
}

impl SimObserver for SkirmishObserver {
    fn on_state_change(&mut self, tick: Tick, agent: AgentId, from: &str, to: &str) {
        self.state_changes += 1;
        info!(%tick, %agent, from, to, "state change");
    }

    fn on_snapshot(&mut self, tick: Tick, units: &[Unit]) {
        self.snapshots += 1;
        for unit in units {
            debug!(
                %tick,
                agent = %unit.id(),
                state = unit.state_label(),
                x = unit.vehicle.position().x,
                y = unit.vehicle.position().y,
                "snapshot"
            );
        }
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        info!(%final_tick, changes = self.state_changes, snapshots = self.snapshots, "simulation finished");
    }
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args_os().skip(1).map(PathBuf::from);
    let config_path = args.next();
    let patrol_path = args.next();

    let config = load_config(config_path.as_ref())?;
    if config.map.is_empty() {
        bail!("scenario map is empty");
    }

    let patrol = match &patrol_path {
        Some(path) => {
            let loop_path = load_path_csv(path)
                .with_context(|| format!("loading patrol {}", path.display()))?;
            info!(waypoints = loop_path.len(), "patrol loop loaded");
            Some(loop_path.waypoints().to_vec())
        }
        None => None,
    };

    let rows: Vec<&str> = config.map.iter().map(String::as_str).collect();
    let grid = TileGrid::from_ascii(&rows, config.tile_size);
    let walls: Vec<Vec2> = grid.blocked_centers().collect();
    let wall_radius = config.tile_size * 0.5;

    let mut spawn_rng = SimRng::new(config.sim.seed).child(1);
    let jitter = config.spawn_jitter;
    let specs: Vec<VehicleSpec> = config.vehicles.iter().map(|entry| {
        let kind = VehicleKind::from(entry.kind);
        let position = spawn_rng.scatter(entry.position, jitter);
        let mut spec = match kind {
            VehicleKind::Builder => VehicleSpec::builder(ArmyId(entry.army), position),
            VehicleKind::Tank => VehicleSpec::tank(ArmyId(entry.army), position),
        };
        spec.destination = entry.destination;
        if kind == VehicleKind::Tank {
            spec.patrol = patrol.clone();
        }
        spec
    }).collect();

    let mut builder = SimBuilder::new(config.sim.clone(), GridPathFinder::new(grid))
        .steering(config.steering)
        .vehicles(specs);
    for wall in walls {
        builder = builder.obstacle(wall, wall_radius);
    }
    let mut sim = builder.build()?;

    let mut observer = SkirmishObserver::default();
    let started = Instant::now();
    let end = sim.config.end_tick();
    while sim.clock.current_tick < end {
        sim.run_ticks(1, &mut observer)?;
        sim.detect_overlaps();
    }
    observer.on_sim_end(sim.clock.current_tick);
    info!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        game_secs = sim.clock.elapsed_secs(),
        "run complete"
    );

    let report: Vec<UnitReport> = sim.units.iter().map(UnitReport::from_unit).collect();
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
