//! The `State` trait and the fn-pointer convenience implementation.

use std::fmt;
use std::sync::Arc;

use crate::StackFsm;

/// Shared handle to a state.  Identity is the allocation, not the label.
pub type StateRef<H, C> = Arc<dyn State<H, C>>;

/// One behavior mode of an agent.
///
/// `H` is the agent the state drives, `C` the read-only world it senses.
/// `run` is called once per tick while the state sits on top of the stack;
/// it may steer the host and may push or pop any number of states on
/// `brain` (including itself).
///
/// States hold no per-agent data of their own: everything mutable lives in
/// the host.  One `Arc` of a state can therefore be shared by every agent of
/// a kind, and agents can be ticked on different threads.
pub trait State<H, C>: Send + Sync {
    /// Human-readable name for logs and diagnostics.  Not unique.
    fn label(&self) -> &str;

    fn run(&self, host: &mut H, ctx: &C, brain: &mut StackFsm<H, C>);
}

/// A state backed by a plain function.
pub struct FnState<H, C> {
    label: &'static str,
    run:   fn(&mut H, &C, &mut StackFsm<H, C>),
}

impl<H, C> FnState<H, C> {
    pub const fn new(label: &'static str, run: fn(&mut H, &C, &mut StackFsm<H, C>)) -> Self {
        Self { label, run }
    }
}

impl<H: 'static, C: 'static> FnState<H, C> {
    /// Wrap into a shareable [`StateRef`].
    pub fn shared(label: &'static str, run: fn(&mut H, &C, &mut StackFsm<H, C>)) -> StateRef<H, C> {
        Arc::new(Self::new(label, run))
    }
}

impl<H, C> State<H, C> for FnState<H, C> {
    fn label(&self) -> &str {
        self.label
    }

    fn run(&self, host: &mut H, ctx: &C, brain: &mut StackFsm<H, C>) {
        (self.run)(host, ctx, brain)
    }
}

impl<H, C> fmt::Debug for FnState<H, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnState").field("label", &self.label).finish()
    }
}
