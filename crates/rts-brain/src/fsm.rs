//! `StackFsm` — the per-agent state stack.

use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::{BrainError, BrainResult, StateRef};

/// LIFO stack of states; the top entry is the active one.
///
/// Built with an initial state so it starts non-empty.  `push_state`
/// suspends the active state beneath the new one; `pop_state` drops the
/// active state and resumes the one beneath exactly as it was.  There is no
/// replace operation: a switch is `pop_state` followed by `push_state`.
pub struct StackFsm<H, C> {
    stack: Vec<StateRef<H, C>>,
}

impl<H, C> StackFsm<H, C> {
    pub fn new(initial: StateRef<H, C>) -> Self {
        Self { stack: vec![initial] }
    }

    pub fn push_state(&mut self, state: StateRef<H, C>) {
        trace!(
            from = self.active_label().unwrap_or("<none>"),
            to = state.label(),
            depth = self.stack.len() + 1,
            "push state"
        );
        self.stack.push(state);
    }

    /// Remove and return the active state.  `None` on an empty stack.
    pub fn pop_state(&mut self) -> Option<StateRef<H, C>> {
        let popped = self.stack.pop()?;
        trace!(
            popped = popped.label(),
            resumed = self.active_label().unwrap_or("<none>"),
            depth = self.stack.len(),
            "pop state"
        );
        Some(popped)
    }

    pub fn active(&self) -> Option<&StateRef<H, C>> {
        self.stack.last()
    }

    pub fn active_label(&self) -> Option<&str> {
        self.stack.last().map(|s| s.label())
    }

    /// Labels from bottom to top.
    pub fn labels(&self) -> Vec<&str> {
        self.stack.iter().map(|s| s.label()).collect()
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// `true` if `state` (this very allocation) is on top.
    pub fn is_active(&self, state: &StateRef<H, C>) -> bool {
        self.stack.last().is_some_and(|top| Arc::ptr_eq(top, state))
    }

    /// `true` if `state` is anywhere on the stack.
    pub fn contains(&self, state: &StateRef<H, C>) -> bool {
        self.stack.iter().any(|s| Arc::ptr_eq(s, state))
    }

    /// Run the active state once.
    ///
    /// The state receives the stack itself and may reshape it freely; the
    /// handle being run is cloned first so popping it mid-run is safe.
    pub fn tick(&mut self, host: &mut H, ctx: &C) -> BrainResult<()> {
        let active = self.stack.last().cloned().ok_or(BrainError::EmptyStack)?;
        active.run(host, ctx, self);
        Ok(())
    }
}

impl<H, C> fmt::Debug for StackFsm<H, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.labels()).finish()
    }
}
