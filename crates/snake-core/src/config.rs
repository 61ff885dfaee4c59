//! Engine configuration.
//!
//! Plain structs with public fields and `Default` impls carrying the stock
//! game constants.  Applications either use the defaults, tweak individual
//! fields, or (with the `serde` feature) load them from a file.  Each struct
//! has a `validate()` that the consuming constructor calls.

use std::time::Duration;

use crate::{CoreError, CoreResult};

// ── BoardConfig ───────────────────────────────────────────────────────────────

/// Board dimensions, initial feature counts, and spawn odds.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardConfig {
    pub width:  i32,
    pub height: i32,

    /// Mice placed at construction.  Default: 6.
    pub initial_mice: usize,

    /// Obstacles placed at construction.  Default: 4.
    pub initial_obstacles: usize,

    /// Turbo pads placed at construction.  Default: 3.
    pub initial_turbo_pads: usize,

    /// Symmetric teleport pairs placed at construction.  Default: 2.
    pub teleport_pairs: usize,

    /// Probability that eating a mouse also spawns a turbo pad.  Default: 0.2.
    pub turbo_spawn_chance: f64,

    /// Board RNG seed.  `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl BoardConfig {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height, ..Self::default() }
    }

    /// Total grid cells (0 if either dimension is non-positive).
    pub fn cell_count(&self) -> usize {
        let w = usize::try_from(self.width).unwrap_or(0);
        let h = usize::try_from(self.height).unwrap_or(0);
        w.saturating_mul(h)
    }

    /// Checks everything except the dimensions, which the board reports with
    /// its own dedicated error.
    pub fn validate(&self) -> CoreResult<()> {
        if !(0.0..=1.0).contains(&self.turbo_spawn_chance) {
            return Err(CoreError::InvalidConfig(format!(
                "turbo_spawn_chance must be within [0, 1], got {}",
                self.turbo_spawn_chance
            )));
        }
        Ok(())
    }
}

impl Default for BoardConfig {
    /// The stock 35 × 28 arena.
    fn default() -> Self {
        Self {
            width:              35,
            height:             28,
            initial_mice:       6,
            initial_obstacles:  4,
            initial_turbo_pads: 3,
            teleport_pairs:     2,
            turbo_spawn_chance: 0.2,
            seed:               None,
        }
    }
}

// ── RunnerConfig ──────────────────────────────────────────────────────────────

/// Timing and steering parameters for one snake worker.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunnerConfig {
    /// Sleep between steps at normal speed.  Default: 80 ms.
    pub base_sleep_ms: u64,

    /// Sleep between steps while boosted.  Default: 40 ms.
    pub turbo_sleep_ms: u64,

    /// Boosted steps granted by one turbo pad.  Default: 100.
    pub turbo_ticks: u32,

    /// Chance of a random turn before each normal-speed step.  Default: 0.10.
    pub turn_chance: f64,

    /// Chance of a random turn before each boosted step.  Default: 0.05.
    pub boosted_turn_chance: f64,
}

impl RunnerConfig {
    #[inline]
    pub fn base_sleep(&self) -> Duration {
        Duration::from_millis(self.base_sleep_ms)
    }

    #[inline]
    pub fn turbo_sleep(&self) -> Duration {
        Duration::from_millis(self.turbo_sleep_ms)
    }

    pub fn validate(&self) -> CoreResult<()> {
        for (name, p) in [
            ("turn_chance", self.turn_chance),
            ("boosted_turn_chance", self.boosted_turn_chance),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(CoreError::InvalidConfig(format!(
                    "{name} must be within [0, 1], got {p}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            base_sleep_ms:       80,
            turbo_sleep_ms:      40,
            turbo_ticks:         100,
            turn_chance:         0.10,
            boosted_turn_chance: 0.05,
        }
    }
}

// ── ClockConfig ───────────────────────────────────────────────────────────────

/// Frame clock settings.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClockConfig {
    /// Interval between frame callbacks.  Default: 60 ms.
    pub period_ms: u64,
}

impl ClockConfig {
    #[inline]
    pub fn period(&self) -> Duration {
        Duration::from_millis(self.period_ms)
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self { period_ms: 60 }
    }
}
