//! Hooks for watching a running simulation.

use rts_core::{AgentId, Tick};

use crate::Unit;

/// Callbacks from the [`Sim`][crate::Sim] tick loop.
///
/// Every hook defaults to doing nothing; override only the ones you need.
///
/// # Example: count pursuits
///
/// ```rust,ignore
/// struct Pursuits(usize);
///
/// impl SimObserver for Pursuits {
///     fn on_state_change(&mut self, _tick: Tick, _agent: AgentId, _from: &str, to: &str) {
///         if to == "pursuing" {
///             self.0 += 1;
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Before the tick's snapshot is taken.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// After physics.  `steered` counts vehicles whose brain ran this tick.
    fn on_tick_end(&mut self, _tick: Tick, _steered: usize) {}

    /// A vehicle's active state differs from the one it entered the tick
    /// with.  Reported after physics, in ascending agent order.  An empty
    /// brain is labelled `"<none>"`.
    fn on_state_change(&mut self, _tick: Tick, _agent: AgentId, _from: &str, _to: &str) {}

    /// Every `snapshot_interval_ticks` ticks, with every vehicle after
    /// physics.
    fn on_snapshot(&mut self, _tick: Tick, _units: &[Unit]) {}

    /// Once, when [`Sim::run`][crate::Sim::run] reaches the end tick.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// Ignores every hook.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
