//! Integration tests for rts-sim.

use rts_core::{AgentId, ArmyId, SimConfig, Tick, Vec2};
use rts_path::{Path, PathError, PathFinder, PathResult};
use rts_steering::{Contact, DetectionShape, Radar, SteeringConfig};

use crate::{
    AgentSnapshot, NoopObserver, Sim, SimBuilder, SimError, SimObserver, TickContext, Unit,
    Vehicle, VehicleKind, VehicleSpec, closest_enemy,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Straight-line routes; anything east of `max_x` is unreachable.
struct LineFinder {
    max_x: f32,
}

impl PathFinder for LineFinder {
    fn find_path(&self, start: Vec2, goal: Vec2) -> PathResult<Path> {
        if goal.x > self.max_x {
            return Err(PathError::Unreachable { from: start, to: goal });
        }
        Ok(Path::new(vec![start, goal]))
    }
}

fn finder() -> LineFinder {
    LineFinder { max_x: 1_000.0 }
}

fn test_config() -> SimConfig {
    SimConfig {
        tick_secs:               0.1,
        total_ticks:             100,
        seed:                    7,
        num_threads:             Some(1),
        snapshot_interval_ticks: 10,
    }
}

const UNREACHABLE: Vec2 = Vec2::new(5_000.0, 0.0);

#[derive(Default)]
struct Recorder {
    ticks:     usize,
    steered:   usize,
    snapshots: Vec<u64>,
    changes:   Vec<(AgentId, String, String)>,
    ended:     Option<Tick>,
}

impl SimObserver for Recorder {
    fn on_tick_end(&mut self, _tick: Tick, steered: usize) {
        self.ticks += 1;
        self.steered += steered;
    }

    fn on_state_change(&mut self, _tick: Tick, agent: AgentId, from: &str, to: &str) {
        self.changes.push((agent, from.to_owned(), to.to_owned()));
    }

    fn on_snapshot(&mut self, tick: Tick, _units: &[Unit]) {
        self.snapshots.push(tick.0);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.ended = Some(final_tick);
    }
}

fn labels(sim: &Sim<LineFinder>, agent: AgentId) -> Vec<String> {
    sim.unit(agent)
        .map(|u| u.brain.labels().into_iter().map(str::to_owned).collect())
        .unwrap_or_default()
}

fn snapshot(id: u32, army: u16, position: Vec2) -> AgentSnapshot {
    AgentSnapshot {
        id: AgentId(id),
        army: ArmyId(army),
        kind: VehicleKind::Tank,
        position,
        velocity: Vec2::ZERO,
        max_speed: 50.0,
        heading: 0.0,
        radius: 10.0,
    }
}

/// Drop a wandering enemy Builder (no route) at `at`.
fn spawn_enemy(sim: &mut Sim<LineFinder>, at: Vec2) -> AgentId {
    let id = sim.allocate_id();
    let vehicle = Vehicle::new(id, ArmyId(1), VehicleKind::Builder, at, SteeringConfig::default(), 7);
    sim.add_unit(Unit::new(vehicle)).unwrap()
}

// ── Roster ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod roster {
    use super::*;

    #[test]
    fn closest_enemy_ignores_own_army() {
        let agents = vec![
            snapshot(0, 0, Vec2::ZERO),
            snapshot(1, 0, Vec2::new(10.0, 0.0)),
            snapshot(2, 1, Vec2::new(150.0, 0.0)),
            snapshot(3, 1, Vec2::new(0.0, 90.0)),
        ];
        let found = closest_enemy(agents.as_slice(), ArmyId(0), Vec2::ZERO, 200.0);
        assert_eq!(found.map(|a| a.id), Some(AgentId(3)));
    }

    #[test]
    fn scope_is_strict() {
        let agents = vec![snapshot(5, 1, Vec2::new(200.0, 0.0))];
        assert!(closest_enemy(agents.as_slice(), ArmyId(0), Vec2::ZERO, 200.0).is_none());
        assert!(closest_enemy(agents.as_slice(), ArmyId(0), Vec2::ZERO, 200.5).is_some());
    }

    #[test]
    fn builders_have_no_scope() {
        let agents = vec![snapshot(1, 1, Vec2::new(1.0, 0.0))];
        let scope = VehicleKind::Builder.scope();
        assert!(closest_enemy(agents.as_slice(), ArmyId(0), Vec2::ZERO, scope).is_none());
    }

    #[test]
    fn context_lookups() {
        let agents = vec![snapshot(0, 0, Vec2::ZERO), snapshot(4, 1, Vec2::new(30.0, 0.0))];
        let radar = Radar::new(agents.iter().map(AgentSnapshot::detection), DetectionShape::default());
        let mut ctx = TickContext::new(Tick(3), 0.1, agents, radar);
        ctx.add_contact(AgentId(4), Contact::new(Vec2::X, 1.0));

        assert_eq!(ctx.agent(AgentId(4)).map(|a| a.position), Some(Vec2::new(30.0, 0.0)));
        assert!(ctx.agent(AgentId(2)).is_none());
        assert_eq!(ctx.contacts_for(AgentId(4)).len(), 1);
        assert!(ctx.contacts_for(AgentId(0)).is_empty());
    }
}

// ── Vehicle ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod vehicle {
    use super::*;

    fn builder_at_origin() -> Vehicle {
        Vehicle::new(AgentId(0), ArmyId(0), VehicleKind::Builder, Vec2::ZERO, SteeringConfig::default(), 1)
    }

    #[test]
    fn kind_tunables() {
        let b = builder_at_origin();
        assert_eq!(b.body.max_speed, 60.0);
        assert_eq!(b.body.radius, 10.0);
        assert_eq!(VehicleKind::Tank.max_speed(), 50.0);
        assert_eq!(VehicleKind::Tank.scope(), 200.0);
        let patrol = VehicleKind::Tank.default_patrol(Vec2::new(5.0, 5.0)).unwrap();
        assert_eq!(patrol.waypoints()[0], Vec2::new(5.0, 5.0));
        assert_eq!(patrol.len(), 4);
    }

    #[test]
    fn change_path_replaces_on_success() {
        let mut b = builder_at_origin();
        b.change_path(Vec2::new(100.0, 0.0), &finder()).unwrap();
        assert_eq!(b.path.as_ref().and_then(Path::last_node), Some(Vec2::new(100.0, 0.0)));
    }

    #[test]
    fn change_path_keeps_old_path_on_failure() {
        let mut b = builder_at_origin();
        b.change_path(Vec2::new(100.0, 0.0), &finder()).unwrap();
        let before = b.path.clone();
        let err = b.change_path(UNREACHABLE, &finder()).unwrap_err();
        assert!(matches!(err, PathError::Unreachable { .. }));
        assert_eq!(b.path, before);
    }

    #[test]
    fn travelling_needs_a_far_last_node() {
        let mut b = builder_at_origin();
        assert!(!b.is_travelling());
        b.path = Some(Path::new(vec![Vec2::ZERO, Vec2::new(15.0, 0.0)]));
        assert!(!b.is_travelling());
        b.path = Some(Path::new(vec![Vec2::ZERO, Vec2::new(25.0, 0.0)]));
        assert!(b.is_travelling());
        b.path = Some(Path::empty());
        assert!(!b.is_travelling());
    }

    #[test]
    fn initial_states_per_kind() {
        let builder = Unit::new(builder_at_origin());
        assert_eq!(builder.state_label(), "path following");
        let tank = Unit::new(Vehicle::new(
            AgentId(1), ArmyId(0), VehicleKind::Tank, Vec2::ZERO, SteeringConfig::default(), 1,
        ));
        assert_eq!(tank.state_label(), "patrolling");
        assert_eq!(tank.brain.depth(), 1);
    }
}

// ── Builder behavior ──────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_states {
    use super::*;

    fn routed_builder(dest: Vec2) -> Sim<LineFinder> {
        SimBuilder::new(test_config(), finder())
            .vehicle(VehicleSpec::builder(ArmyId(0), Vec2::ZERO).with_destination(dest))
            .build()
            .unwrap()
    }

    #[test]
    fn drives_to_destination_then_wanders() {
        let mut sim = routed_builder(Vec2::new(100.0, 0.0));
        let mut obs = Recorder::default();

        sim.run_ticks(1, &mut obs).unwrap();
        assert_eq!(labels(&sim, AgentId(0)), vec!["path following"]);
        let v = sim.vehicle(AgentId(0)).unwrap();
        assert!((v.body.velocity - Vec2::new(60.0, 0.0)).length() < 1e-3);
        assert!((v.body.heading - 180.0).abs() < 1e-3);

        sim.run_ticks(30, &mut obs).unwrap();
        let v = sim.vehicle(AgentId(0)).unwrap();
        assert_eq!(labels(&sim, AgentId(0)), vec!["wander"]);
        assert!(v.path.is_none());
        assert_eq!(
            obs.changes,
            vec![(AgentId(0), "path following".to_owned(), "wander".to_owned())],
        );
    }

    #[test]
    fn unreachable_destination_starts_in_wander() {
        let mut sim = routed_builder(UNREACHABLE);
        assert!(sim.vehicle(AgentId(0)).unwrap().path.is_none());
        sim.run_ticks(1, &mut NoopObserver).unwrap();
        assert_eq!(labels(&sim, AgentId(0)), vec!["wander"]);
    }

    #[test]
    fn new_route_resumes_path_following() {
        let mut sim = routed_builder(UNREACHABLE);
        sim.run_ticks(3, &mut NoopObserver).unwrap();
        sim.change_path(AgentId(0), Vec2::new(300.0, 300.0)).unwrap();
        sim.run_ticks(1, &mut NoopObserver).unwrap();
        assert_eq!(labels(&sim, AgentId(0)), vec!["path following"]);
    }

    #[test]
    fn failed_reroute_keeps_route() {
        let mut sim = routed_builder(Vec2::new(400.0, 0.0));
        let err = sim.change_path(AgentId(0), UNREACHABLE).unwrap_err();
        assert!(matches!(err, SimError::Path(PathError::Unreachable { .. })));
        let last = sim.vehicle(AgentId(0)).and_then(|v| v.path.as_ref()).and_then(Path::last_node);
        assert_eq!(last, Some(Vec2::new(400.0, 0.0)));
        sim.run_ticks(1, &mut NoopObserver).unwrap();
        assert_eq!(labels(&sim, AgentId(0)), vec!["path following"]);
    }

    #[test]
    fn contact_is_consumed_next_tick() {
        let mut sim = routed_builder(Vec2::new(500.0, 0.0));
        sim.run_ticks(1, &mut NoopObserver).unwrap();
        sim.push_contact(AgentId(0), Contact::new(Vec2::Y, 5.0));
        sim.run_ticks(1, &mut NoopObserver).unwrap();
        let v = sim.vehicle(AgentId(0)).unwrap();
        assert!(v.body.velocity.y > 0.0);
        assert!((v.body.velocity.length() - 60.0).abs() < 1e-3);
        assert!(sim.pending_contacts.is_empty());
    }
}

// ── Tank behavior ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod tank_states {
    use super::*;

    const TANK: AgentId = AgentId(0);

    fn patrolling_tank() -> Sim<LineFinder> {
        SimBuilder::new(test_config(), finder())
            .vehicle(
                VehicleSpec::tank(ArmyId(0), Vec2::new(100.0, 100.0))
                    .with_patrol(vec![Vec2::new(100.0, 100.0), Vec2::new(300.0, 100.0)]),
            )
            // Far-away enemy that never comes into scope.
            .vehicle(VehicleSpec::builder(ArmyId(1), Vec2::new(2_000.0, 2_000.0)).with_destination(UNREACHABLE))
            .build()
            .unwrap()
    }

    #[test]
    fn two_point_patrol_keeps_looping() {
        let config = SimConfig { tick_secs: 1.0 / 60.0, total_ticks: 6_000, ..test_config() };
        let mut sim = SimBuilder::new(config, finder())
            .vehicle(
                VehicleSpec::tank(ArmyId(0), Vec2::new(100.0, 100.0))
                    .with_patrol(vec![Vec2::new(100.0, 100.0), Vec2::new(300.0, 100.0)]),
            )
            .build()
            .unwrap();

        let cursor = |sim: &Sim<LineFinder>| sim.vehicle(TANK).and_then(|v| v.path.as_ref()).map(Path::cursor);
        let mut last = cursor(&sim);
        let mut wraps = 0;
        for _ in 0..6_000 {
            sim.run_ticks(1, &mut NoopObserver).unwrap();
            let now = cursor(&sim);
            if now != last && now == Some(0) {
                wraps += 1;
            }
            last = now;
            let here = sim.vehicle(TANK).unwrap().position();
            assert!(here.distance(Vec2::new(200.0, 100.0)) < 700.0, "tank ran off to {here}");
            if wraps == 3 {
                break;
            }
        }
        assert_eq!(wraps, 3);
        assert_eq!(labels(&sim, TANK), vec!["patrolling"]);
    }

    #[test]
    fn no_enemy_in_scope_keeps_patrolling() {
        let mut sim = patrolling_tank();
        sim.run_ticks(5, &mut NoopObserver).unwrap();
        assert_eq!(labels(&sim, TANK), vec!["patrolling"]);

        let here = sim.vehicle(TANK).unwrap().position();
        spawn_enemy(&mut sim, here + Vec2::new(250.0, 0.0));
        sim.run_ticks(1, &mut NoopObserver).unwrap();
        assert_eq!(labels(&sim, TANK), vec!["patrolling"]);
    }

    #[test]
    fn enemy_interrupts_patrol_which_then_resumes() {
        let mut sim = patrolling_tank();
        sim.run_ticks(3, &mut NoopObserver).unwrap();
        let cursor = sim.vehicle(TANK).and_then(|v| v.path.as_ref()).map(Path::cursor);

        let here = sim.vehicle(TANK).unwrap().position();
        let enemy = spawn_enemy(&mut sim, here + Vec2::new(50.0, 0.0));

        sim.run_ticks(1, &mut NoopObserver).unwrap();
        assert_eq!(labels(&sim, TANK), vec!["patrolling", "pursuing"]);

        sim.run_ticks(1, &mut NoopObserver).unwrap();
        assert_eq!(labels(&sim, TANK), vec!["patrolling", "pursuing"]);

        sim.remove_vehicle(enemy).unwrap();
        sim.run_ticks(1, &mut NoopObserver).unwrap();
        assert_eq!(labels(&sim, TANK), vec!["patrolling"]);
        let resumed = sim.vehicle(TANK).and_then(|v| v.path.as_ref()).map(Path::cursor);
        assert_eq!(resumed, cursor);
    }

    #[test]
    fn pursuit_steers_toward_enemy() {
        let mut sim = patrolling_tank();
        sim.run_ticks(1, &mut NoopObserver).unwrap();
        let here = sim.vehicle(TANK).unwrap().position();
        spawn_enemy(&mut sim, here + Vec2::new(0.0, 100.0));
        // Tick 1 pushes `pursuing`, ticks 2..=6 steer.
        sim.run_ticks(6, &mut NoopObserver).unwrap();
        let v = sim.vehicle(TANK).unwrap();
        assert!(v.body.velocity.y > 0.0);
    }

    #[test]
    fn tank_without_path_wanders_then_pursues() {
        let mut sim = patrolling_tank();
        sim.unit_mut(TANK).unwrap().vehicle.path = None;
        sim.run_ticks(1, &mut NoopObserver).unwrap();
        assert_eq!(labels(&sim, TANK), vec!["wander"]);

        let here = sim.vehicle(TANK).unwrap().position();
        let enemy = spawn_enemy(&mut sim, here + Vec2::new(50.0, 0.0));
        sim.run_ticks(1, &mut NoopObserver).unwrap();
        assert_eq!(labels(&sim, TANK), vec!["wander", "pursuing"]);

        sim.remove_vehicle(enemy).unwrap();
        sim.run_ticks(1, &mut NoopObserver).unwrap();
        assert_eq!(labels(&sim, TANK), vec!["wander"]);
    }

    #[test]
    fn pursuing_alone_falls_back_to_wander() {
        let mut sim = patrolling_tank();
        let unit = sim.unit_mut(TANK).unwrap();
        unit.brain.pop_state();
        unit.brain.push_state(crate::states::pursuing());
        sim.run_ticks(1, &mut NoopObserver).unwrap();
        assert_eq!(labels(&sim, TANK), vec!["wander"]);
    }
}

// ── Sim loop ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod sim_loop {
    use super::*;

    fn wanderers(seed: u64) -> Sim<LineFinder> {
        let config = SimConfig { seed, ..test_config() };
        SimBuilder::new(config, finder())
            .vehicles((0..3).map(|i| {
                VehicleSpec::builder(ArmyId(0), Vec2::new(i as f32 * 40.0, 0.0)).with_destination(UNREACHABLE)
            }))
            .obstacle(Vec2::new(60.0, 60.0), 15.0)
            .build()
            .unwrap()
    }

    fn positions(sim: &Sim<LineFinder>) -> Vec<Vec2> {
        sim.units.iter().map(|u| u.vehicle.position()).collect()
    }

    #[test]
    fn same_seed_same_run() {
        let mut a = wanderers(11);
        let mut b = wanderers(11);
        a.run_ticks(50, &mut NoopObserver).unwrap();
        b.run_ticks(50, &mut NoopObserver).unwrap();
        assert_eq!(positions(&a), positions(&b));
    }

    #[test]
    fn speed_is_capped_every_tick() {
        let mut sim = wanderers(3);
        for _ in 0..40 {
            sim.run_ticks(1, &mut NoopObserver).unwrap();
            for u in &sim.units {
                assert!(u.vehicle.body.velocity.length() <= u.vehicle.body.max_speed + 1e-3);
                assert!(u.vehicle.position().is_finite());
            }
        }
    }

    #[test]
    fn run_reaches_end_tick_and_reports() {
        let mut sim = wanderers(1);
        let mut obs = Recorder::default();
        sim.run(&mut obs).unwrap();
        assert_eq!(obs.ticks, 100);
        assert_eq!(obs.steered, 300);
        assert_eq!(obs.ended, Some(Tick(100)));
        assert_eq!(obs.snapshots, vec![0, 10, 20, 30, 40, 50, 60, 70, 80, 90]);
        assert_eq!(sim.clock.current_tick, Tick(100));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = SimConfig { tick_secs: 0.0, ..test_config() };
        let result = SimBuilder::new(config, finder()).build();
        assert!(matches!(result, Err(SimError::Core(_))));
    }

    #[test]
    fn ids_are_sequential_and_removal_is_checked() {
        let mut sim = wanderers(1);
        let ids: Vec<AgentId> = sim.units.iter().map(Unit::id).collect();
        assert_eq!(ids, vec![AgentId(0), AgentId(1), AgentId(2)]);
        assert_eq!(sim.allocate_id(), AgentId(3));

        sim.remove_vehicle(AgentId(1)).unwrap();
        assert!(sim.vehicle(AgentId(1)).is_none());
        assert!(matches!(sim.remove_vehicle(AgentId(1)), Err(SimError::AgentNotFound(_))));
        assert!(matches!(
            sim.change_path(AgentId(1), Vec2::ZERO),
            Err(SimError::AgentNotFound(_))
        ));
    }

    #[test]
    fn duplicate_unit_is_rejected() {
        let mut sim = wanderers(1);
        let dup = Vehicle::new(AgentId(2), ArmyId(0), VehicleKind::Builder, Vec2::ZERO, SteeringConfig::default(), 1);
        assert!(matches!(sim.add_unit(Unit::new(dup)), Err(SimError::Config(_))));
    }

    #[test]
    fn overlap_detection_pushes_both_sides() {
        let mut sim = SimBuilder::new(test_config(), finder())
            .vehicle(VehicleSpec::builder(ArmyId(0), Vec2::ZERO).with_destination(UNREACHABLE))
            .vehicle(VehicleSpec::builder(ArmyId(0), Vec2::new(15.0, 0.0)).with_destination(UNREACHABLE))
            .obstacle(Vec2::new(500.0, 500.0), 5.0)
            .build()
            .unwrap();
        assert_eq!(sim.detect_overlaps(), 2);
        let left = &sim.pending_contacts[&AgentId(0)];
        let right = &sim.pending_contacts[&AgentId(1)];
        assert!((left[0].normal - Vec2::new(-1.0, 0.0)).length() < 1e-5);
        assert!((right[0].normal - Vec2::new(1.0, 0.0)).length() < 1e-5);
    }
}
