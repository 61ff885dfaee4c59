//! Seedable RNG wrappers for snake workers and the board.
//!
//! # Seeding strategy
//!
//! Each snake worker owns an independent `SmallRng` seeded by:
//!
//!   seed = race_seed XOR (agent_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive agent IDs uniformly across the seed space, so
//! workers never share RNG state and never contend on it.
//!
//! The board owns a single [`BoardRng`] that lives inside its mutex; every
//! free-cell draw and spawn roll happens under that lock.
//!
//! Seeding makes a single-threaded sequence of calls reproducible (tests rely
//! on it).  A multi-threaded race is still non-deterministic because worker
//! interleaving decides the order in which board draws happen.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::{AgentId, Direction};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── AgentRng ──────────────────────────────────────────────────────────────────

/// Per-snake RNG, owned by that snake's worker thread.
pub struct AgentRng(SmallRng);

impl AgentRng {
    /// Seed deterministically from the race seed and an agent ID.
    pub fn new(race_seed: u64, agent: AgentId) -> Self {
        let seed = race_seed ^ u64::from(agent.0).wrapping_mul(MIXING_CONSTANT);
        AgentRng(SmallRng::seed_from_u64(seed))
    }

    /// Seed from OS entropy.
    pub fn from_entropy() -> Self {
        AgentRng(SmallRng::from_entropy())
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// A heading drawn uniformly from [`Direction::ALL`].
    #[inline]
    pub fn direction(&mut self) -> Direction {
        Direction::ALL[self.0.gen_range(0..Direction::ALL.len())]
    }
}

// ── BoardRng ──────────────────────────────────────────────────────────────────

/// RNG for board-level draws: free-cell sampling and spawn rolls.
///
/// Not `Sync` on purpose; the board keeps it inside its locked state.
pub struct BoardRng(SmallRng);

impl BoardRng {
    pub fn new(seed: u64) -> Self {
        BoardRng(SmallRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        BoardRng(SmallRng::from_entropy())
    }

    /// Uniform index in `0..len`.  `len` must be non-zero.
    #[inline]
    pub fn index(&mut self, len: usize) -> usize {
        self.0.gen_range(0..len)
    }

    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }
}
