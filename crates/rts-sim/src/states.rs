//! Decision states for Builders and Tanks.
//!
//! | Label            | Kind    | Runs                               | Leaves when                         |
//! |------------------|---------|------------------------------------|-------------------------------------|
//! | `path following` | Builder | follow path + react to contacts    | arrived or no path → `wander`       |
//! | `wander`         | Builder | wander + avoid + react             | a path is assigned → `path following` |
//! | `patrolling`     | Tank    | patrol path                        | enemy → push `pursuing`; no path → `wander` |
//! | `wander`         | Tank    | wander                             | enemy → push `pursuing`             |
//! | `pursuing`       | Tank    | pursue closest enemy               | no enemy → pop (resumes beneath)    |
//!
//! Every state is a single shared allocation, so `Arc::ptr_eq` identifies it
//! across all vehicles.  The two `wander` states share a label but are
//! distinct states.

use std::sync::LazyLock;

use rts_brain::{FnState, StateRef};

use crate::{Brain, TickContext, Vehicle};

pub type VehicleState = StateRef<Vehicle, TickContext>;

static PATH_FOLLOWING: LazyLock<VehicleState> =
    LazyLock::new(|| FnState::shared("path following", run_path_following));
static BUILDER_WANDER: LazyLock<VehicleState> =
    LazyLock::new(|| FnState::shared("wander", run_builder_wander));
static PATROLLING: LazyLock<VehicleState> =
    LazyLock::new(|| FnState::shared("patrolling", run_patrolling));
static TANK_WANDER: LazyLock<VehicleState> =
    LazyLock::new(|| FnState::shared("wander", run_tank_wander));
static PURSUING: LazyLock<VehicleState> =
    LazyLock::new(|| FnState::shared("pursuing", run_pursuing));

pub fn path_following() -> VehicleState {
    PATH_FOLLOWING.clone()
}

pub fn builder_wander() -> VehicleState {
    BUILDER_WANDER.clone()
}

pub fn patrolling() -> VehicleState {
    PATROLLING.clone()
}

pub fn tank_wander() -> VehicleState {
    TANK_WANDER.clone()
}

pub fn pursuing() -> VehicleState {
    PURSUING.clone()
}

// ── Builder ───────────────────────────────────────────────────────────────────

fn run_path_following(v: &mut Vehicle, ctx: &TickContext, brain: &mut Brain) {
    if v.is_travelling() {
        if let Some(path) = v.path.as_mut() {
            v.steering.follow_path(&v.body, path);
        }
        v.react_to_contacts(ctx);
    } else {
        v.path = None;
        brain.pop_state();
        brain.push_state(builder_wander());
    }
}

fn run_builder_wander(v: &mut Vehicle, ctx: &TickContext, brain: &mut Brain) {
    if v.path.is_none() {
        v.steering.wander(&v.body);
        v.steering.avoid_collision(&v.body, &ctx.sensor_for(v.id));
        v.react_to_contacts(ctx);
    } else {
        brain.pop_state();
        brain.push_state(path_following());
    }
}

// ── Tank ──────────────────────────────────────────────────────────────────────

fn run_patrolling(v: &mut Vehicle, ctx: &TickContext, brain: &mut Brain) {
    if v.closest_enemy(ctx).is_some() {
        // Patrol stays beneath and resumes at the same waypoint.
        brain.push_state(pursuing());
    } else if let Some(path) = v.path.as_mut() {
        v.steering.patrol_path(&v.body, path);
    } else {
        brain.pop_state();
        brain.push_state(tank_wander());
    }
}

fn run_tank_wander(v: &mut Vehicle, ctx: &TickContext, brain: &mut Brain) {
    if v.closest_enemy(ctx).is_some() {
        brain.push_state(pursuing());
    } else {
        v.steering.wander(&v.body);
    }
}

fn run_pursuing(v: &mut Vehicle, ctx: &TickContext, brain: &mut Brain) {
    match v.closest_enemy(ctx) {
        Some(enemy) => v.steering.pursue(&v.body, enemy),
        None => {
            brain.pop_state();
            if brain.is_empty() {
                brain.push_state(tank_wander());
            }
        }
    }
}
