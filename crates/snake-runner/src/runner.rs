//! One snake's worker loop.

use std::sync::Arc;
use std::time::Duration;

use snake_board::{Board, MoveResult, Snake};
use snake_core::{AgentId, AgentRng, RunnerConfig};
use tracing::{error, info, trace};

use crate::{CancelToken, RunnerResult};

/// Longest single wait on the pause gate before cancellation is rechecked.
pub const PAUSE_POLL: Duration = Duration::from_millis(20);

/// What one [`SnakeRunner::tick`] did and how long the caller should sleep
/// before the next one.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StepOutcome {
    pub result: MoveResult,
    pub sleep:  Duration,
}

/// Per-worker step counts, returned when a runner exits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunnerSummary {
    pub agent: AgentId,
    pub steps: u64,
    counts:    [u64; MoveResult::ALL.len()],
}

impl RunnerSummary {
    pub fn new(agent: AgentId) -> Self {
        Self { agent, steps: 0, counts: [0; MoveResult::ALL.len()] }
    }

    /// Steps that ended in `result`.
    pub fn count(&self, result: MoveResult) -> u64 {
        self.counts[slot(result)]
    }

    fn record(&mut self, result: MoveResult) {
        self.steps += 1;
        self.counts[slot(result)] += 1;
    }
}

fn slot(result: MoveResult) -> usize {
    match result {
        MoveResult::Moved       => 0,
        MoveResult::AteMouse    => 1,
        MoveResult::HitObstacle => 2,
        MoveResult::Teleported  => 3,
        MoveResult::AteTurbo    => 4,
    }
}

/// Drives one snake: random steering, one board step, reaction, sleep.
///
/// [`tick`](Self::tick) runs one iteration without sleeping so tests can
/// drive a runner on the calling thread; [`run`](Self::run) is the full loop
/// a worker thread executes.
pub struct SnakeRunner {
    snake:       Arc<Snake>,
    board:       Arc<Board>,
    config:      RunnerConfig,
    rng:         AgentRng,
    cancel:      CancelToken,
    boost_ticks: u32,
    summary:     RunnerSummary,
}

impl SnakeRunner {
    pub fn new(
        snake:  Arc<Snake>,
        board:  Arc<Board>,
        config: RunnerConfig,
        rng:    AgentRng,
        cancel: CancelToken,
    ) -> Self {
        let summary = RunnerSummary::new(snake.id());
        Self { snake, board, config, rng, cancel, boost_ticks: 0, summary }
    }

    /// Like [`new`](Self::new) with the RNG derived from `seed` and the
    /// snake's id.
    pub fn seeded(
        snake:  Arc<Snake>,
        board:  Arc<Board>,
        config: RunnerConfig,
        seed:   u64,
        cancel: CancelToken,
    ) -> Self {
        let rng = AgentRng::new(seed, snake.id());
        Self::new(snake, board, config, rng, cancel)
    }

    pub fn id(&self) -> AgentId {
        self.snake.id()
    }

    pub fn snake(&self) -> &Arc<Snake> {
        &self.snake
    }

    /// Boosted steps left, counting the one about to happen.
    pub fn boost_ticks(&self) -> u32 {
        self.boost_ticks
    }

    pub fn summary(&self) -> &RunnerSummary {
        &self.summary
    }

    /// One loop iteration minus the pause wait and the sleep.
    pub fn tick(&mut self) -> RunnerResult<StepOutcome> {
        let boosted = self.boost_ticks > 0;
        let p = if boosted { self.config.boosted_turn_chance } else { self.config.turn_chance };
        if self.rng.gen_bool(p) {
            self.random_turn();
        }

        let result = self.board.step(&self.snake)?;
        match result {
            MoveResult::HitObstacle => self.random_turn(),
            MoveResult::AteTurbo    => self.boost_ticks = self.config.turbo_ticks,
            _ => {}
        }

        let sleep = if self.boost_ticks > 0 {
            self.config.turbo_sleep()
        } else {
            self.config.base_sleep()
        };
        self.boost_ticks = self.boost_ticks.saturating_sub(1);
        self.summary.record(result);

        trace!(agent = %self.id(), ?result, boost = self.boost_ticks, "tick");
        Ok(StepOutcome { result, sleep })
    }

    /// Loop until cancelled.  A board contract violation ends the loop with
    /// that error.
    pub fn run(mut self) -> RunnerResult<RunnerSummary> {
        let agent = self.id();
        info!(%agent, "runner started");

        while !self.cancel.is_cancelled() {
            if self.wait_while_paused() {
                break;
            }
            let outcome = match self.tick() {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!(%agent, error = %e, "runner aborted");
                    return Err(e);
                }
            };
            if self.cancel.sleep(outcome.sleep) {
                break;
            }
        }

        info!(%agent, steps = self.summary.steps, "runner stopped");
        Ok(self.summary)
    }

    /// Block on the pause gate in [`PAUSE_POLL`] slices.  Returns `true` if
    /// cancelled while waiting.
    fn wait_while_paused(&self) -> bool {
        while self.board.gate().wait_timeout(PAUSE_POLL) {
            if self.cancel.is_cancelled() {
                return true;
            }
        }
        self.cancel.is_cancelled()
    }

    fn random_turn(&mut self) {
        let dir = self.rng.direction();
        self.snake.turn(dir);
    }
}
