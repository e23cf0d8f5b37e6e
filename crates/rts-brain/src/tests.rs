//! Unit tests for rts-brain.

use std::sync::Arc;

use crate::{BrainError, FnState, StackFsm, State, StateRef};

// ── Fixtures ──────────────────────────────────────────────────────────────────

/// Host that records which states ran.
#[derive(Default)]
struct Recorder {
    ran: Vec<String>,
}

/// Read-only world: does an "enemy" exist this tick?
struct World {
    enemy: bool,
}

type Brain = StackFsm<Recorder, World>;

fn idle(host: &mut Recorder, _: &World, _: &mut Brain) {
    host.ran.push("idle".into());
}

fn noop(_: &mut Recorder, _: &World, _: &mut Brain) {}

/// State with its own label, used to check identity by allocation.
struct Named(&'static str);

impl State<Recorder, World> for Named {
    fn label(&self) -> &str {
        self.0
    }

    fn run(&self, host: &mut Recorder, _: &World, _: &mut Brain) {
        host.ran.push(self.0.to_owned());
    }
}

fn named(label: &'static str) -> StateRef<Recorder, World> {
    Arc::new(Named(label))
}

// ── Stack laws ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod stack {
    use super::*;

    #[test]
    fn starts_with_initial_state() {
        let initial = FnState::shared("idle", idle);
        let brain = Brain::new(initial.clone());
        assert_eq!(brain.depth(), 1);
        assert!(brain.is_active(&initial));
        assert_eq!(brain.active_label(), Some("idle"));
    }

    #[test]
    fn push_push_pop_is_lifo() {
        let a = named("a");
        let b = named("b");
        let mut brain = Brain::new(FnState::shared("idle", idle));
        brain.push_state(a.clone());
        brain.push_state(b.clone());
        let popped = brain.pop_state().unwrap();
        assert!(Arc::ptr_eq(&popped, &b));
        assert!(brain.is_active(&a));
        assert_eq!(brain.labels(), vec!["idle", "a"]);
    }

    #[test]
    fn identity_is_by_allocation_not_label() {
        let first = named("twin");
        let second = named("twin");
        let mut brain = Brain::new(first.clone());
        assert!(brain.is_active(&first));
        assert!(!brain.is_active(&second));
        brain.push_state(second.clone());
        assert!(brain.is_active(&second));
        assert!(!brain.is_active(&first));
        assert!(brain.contains(&first));
    }

    #[test]
    fn pop_on_empty_returns_none() {
        let mut brain = Brain::new(FnState::shared("idle", idle));
        assert!(brain.pop_state().is_some());
        assert!(brain.pop_state().is_none());
        assert!(brain.is_empty());
        assert_eq!(brain.active_label(), None);
    }

    #[test]
    fn debug_lists_labels() {
        let mut brain = Brain::new(FnState::shared("idle", noop));
        brain.push_state(named("busy"));
        assert_eq!(format!("{brain:?}"), r#"["idle", "busy"]"#);
    }
}

// ── Ticking ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tick {
    use super::*;

    fn alert(host: &mut Recorder, world: &World, brain: &mut Brain) {
        host.ran.push("alert".into());
        if !world.enemy {
            brain.pop_state();
        }
    }

    fn watch(host: &mut Recorder, world: &World, brain: &mut Brain) {
        host.ran.push("watch".into());
        if world.enemy {
            brain.push_state(FnState::shared("alert", alert));
        }
    }

    #[test]
    fn only_the_top_state_runs() {
        let mut brain = Brain::new(FnState::shared("idle", idle));
        brain.push_state(named("top"));
        let mut host = Recorder::default();
        brain.tick(&mut host, &World { enemy: false }).unwrap();
        assert_eq!(host.ran, vec!["top"]);
    }

    #[test]
    fn interrupt_then_resume() {
        let mut brain = Brain::new(FnState::shared("watch", watch));
        let mut host = Recorder::default();

        brain.tick(&mut host, &World { enemy: false }).unwrap();
        assert_eq!(brain.active_label(), Some("watch"));

        brain.tick(&mut host, &World { enemy: true }).unwrap();
        assert_eq!(brain.labels(), vec!["watch", "alert"]);

        brain.tick(&mut host, &World { enemy: true }).unwrap();
        assert_eq!(brain.active_label(), Some("alert"));

        brain.tick(&mut host, &World { enemy: false }).unwrap();
        assert_eq!(brain.labels(), vec!["watch"]);

        assert_eq!(host.ran, vec!["watch", "watch", "alert", "alert"]);
    }

    #[test]
    fn state_may_pop_itself_and_push_replacement() {
        fn switch(host: &mut Recorder, _: &World, brain: &mut Brain) {
            host.ran.push("switch".into());
            brain.pop_state();
            brain.push_state(FnState::shared("idle", idle));
        }
        let mut brain = Brain::new(FnState::shared("switch", switch));
        let mut host = Recorder::default();
        let world = World { enemy: false };
        brain.tick(&mut host, &world).unwrap();
        brain.tick(&mut host, &world).unwrap();
        assert_eq!(brain.depth(), 1);
        assert_eq!(host.ran, vec!["switch", "idle"]);
    }

    #[test]
    fn ticking_an_emptied_brain_is_an_error() {
        fn vanish(_: &mut Recorder, _: &World, brain: &mut Brain) {
            brain.pop_state();
        }
        let mut brain = Brain::new(FnState::shared("vanish", vanish));
        let mut host = Recorder::default();
        let world = World { enemy: false };
        assert_eq!(brain.tick(&mut host, &world), Ok(()));
        assert_eq!(brain.tick(&mut host, &world), Err(BrainError::EmptyStack));
    }

    #[test]
    fn shared_state_serves_many_brains() {
        let shared = FnState::shared("idle", idle);
        let mut brains: Vec<Brain> = (0..3).map(|_| Brain::new(shared.clone())).collect();
        let mut host = Recorder::default();
        for brain in &mut brains {
            brain.tick(&mut host, &World { enemy: false }).unwrap();
            assert!(brain.is_active(&shared));
        }
        assert_eq!(host.ran.len(), 3);
        assert_eq!(Arc::strong_count(&shared), 4);
    }
}
