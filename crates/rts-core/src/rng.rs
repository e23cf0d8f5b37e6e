//! Seeded randomness for wander jitter and scenario set-up.
//!
//! Every agent draws from its own `SmallRng`, seeded from the run seed and
//! the agent id:
//!
//!   seed = global_seed XOR (agent_id * GOLDEN_GAMMA)
//!
//! `GOLDEN_GAMMA` is the 64-bit fractional part of the golden ratio, so
//! neighbouring ids land far apart in seed space.  Because no stream is
//! shared, one agent's wander angle never depends on how many draws other
//! agents made earlier in the tick, or on which thread ran them.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::{AgentId, Vec2};

const GOLDEN_GAMMA: u64 = 0x9e37_79b9_7f4a_7c15;

// ── AgentRng ──────────────────────────────────────────────────────────────────

/// One agent's random stream.
///
/// Owned by that agent's steering computer and moved with it onto whatever
/// worker thread ticks the agent.
#[derive(Clone, Debug)]
pub struct AgentRng(SmallRng);

impl AgentRng {
    pub fn new(global_seed: u64, agent: AgentId) -> Self {
        let seed = global_seed ^ u64::from(agent.0).wrapping_mul(GOLDEN_GAMMA);
        AgentRng(SmallRng::seed_from_u64(seed))
    }

    /// Uniform draw in `[-half, half]`.  Zero, negative or non-finite
    /// widths draw nothing and return `0.0`.
    pub fn spread(&mut self, half: f32) -> f32 {
        if half.is_finite() && half > 0.0 {
            self.0.gen_range(-half..=half)
        } else {
            0.0
        }
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Run-level stream for scenario set-up (spawn scatter and the like).
///
/// Single-threaded only; never touched from inside a tick.
#[derive(Clone, Debug)]
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Independent stream for one set-up concern, derived deterministically
    /// from this one.
    pub fn child(&mut self, stream: u64) -> SimRng {
        let seed = self.0.r#gen::<u64>() ^ stream.wrapping_mul(GOLDEN_GAMMA);
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// `point` moved by up to `jitter` along each axis.
    pub fn scatter(&mut self, point: Vec2, jitter: f32) -> Vec2 {
        if !(jitter.is_finite() && jitter > 0.0) {
            return point;
        }
        point + Vec2::new(
            self.0.gen_range(-jitter..=jitter),
            self.0.gen_range(-jitter..=jitter),
        )
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }
}
