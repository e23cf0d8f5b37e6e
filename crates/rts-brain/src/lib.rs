//! `rts-brain` — stack-based hierarchical state machines.
//!
//! # Crate layout
//!
//! | Module     | Contents                                              |
//! |------------|-------------------------------------------------------|
//! | [`state`]  | `State` trait, `StateRef`, `FnState`                  |
//! | [`fsm`]    | `StackFsm` — push / pop / tick                        |
//! | [`error`]  | `BrainError`, `BrainResult<T>`                        |
//!
//! # Why a stack
//!
//! An agent that is interrupted (a patrolling tank spotting an enemy)
//! pushes the interrupting state on top of the current one.  When the
//! interruption is over it pops, and the suspended state resumes with all
//! of its progress intact, because that progress lives in the host (the
//! patrol path cursor), not in the stack.

pub mod error;
pub mod fsm;
pub mod state;

#[cfg(test)]
mod tests;

pub use error::{BrainError, BrainResult};
pub use fsm::StackFsm;
pub use state::{FnState, State, StateRef};
