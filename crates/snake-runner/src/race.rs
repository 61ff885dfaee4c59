//! A board, its workers and a frame clock under one pause authority.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use snake_board::Board;
use snake_core::{AgentId, AgentRng, RunnerConfig};
use tracing::{debug, info};

use crate::{GameClock, RunnerPool, RunnerResult, RunnerSummary};

/// Where a race is in its lifecycle.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum RacePhase {
    /// Workers may be spawned but have never been released.
    NotStarted,
    Running,
    Paused,
    /// `shutdown` has run; nothing moves again.
    Finished,
}

/// Standings read from the board at one instant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RaceStats {
    /// Live roster index, id and body length of the longest live snake.
    /// The earliest in roster order wins ties.
    pub longest: Option<(usize, AgentId, usize)>,
    /// The first snake retired from the race, if any.
    pub first_retired: Option<AgentId>,
    pub live:    usize,
    pub retired: usize,
}

impl RaceStats {
    pub fn collect(board: &Board) -> Self {
        let live = board.live_agents();
        let retired = board.retired_agents();

        let mut longest: Option<(usize, AgentId, usize)> = None;
        for (i, snake) in live.iter().enumerate() {
            let len = snake.len();
            if longest.is_none_or(|(_, _, best)| len > best) {
                longest = Some((i, snake.id(), len));
            }
        }

        Self {
            longest,
            first_retired: retired.first().map(|s| s.id()),
            live:          live.len(),
            retired:       retired.len(),
        }
    }
}

impl fmt::Display for RaceStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.longest {
            Some((i, id, len)) => write!(f, "longest: #{i} {id} ({len} cells)")?,
            None               => write!(f, "longest: none")?,
        }
        match self.first_retired {
            Some(id) => write!(f, ", first retired: {id}")?,
            None     => write!(f, ", first retired: none")?,
        }
        write!(f, ", live {}, retired {}", self.live, self.retired)
    }
}

/// Owns the worker pool and the frame clock of one board and flips the
/// clock state and the board's pause gate together.
///
/// A new race is paused: the gate is closed before any worker exists, and
/// [`spawn_all`](Self::spawn_all) starts the clock in `Paused`.
pub struct Race {
    board:  Arc<Board>,
    config: RunnerConfig,
    seed:   Option<u64>,
    pool:   RunnerPool,
    clock:  GameClock,
    phase:  Mutex<RacePhase>,
}

impl Race {
    pub fn new(board: Arc<Board>, config: RunnerConfig, clock: GameClock) -> RunnerResult<Self> {
        config.validate()?;
        board.set_paused(true);
        Ok(Self {
            board,
            config,
            seed:  None,
            pool:  RunnerPool::new(),
            clock,
            phase: Mutex::new(RacePhase::NotStarted),
        })
    }

    /// Seed every worker RNG from `seed` and its snake's id.  Unseeded races
    /// draw worker RNGs from OS entropy.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn board(&self) -> &Arc<Board> {
        &self.board
    }

    pub fn clock(&self) -> &GameClock {
        &self.clock
    }

    pub fn phase(&self) -> RacePhase {
        *self.phase.lock()
    }

    pub fn workers(&self) -> usize {
        self.pool.len()
    }

    /// One worker per live snake, then start the clock.  Workers wait behind
    /// the gate until [`start`](Self::start).  Returns the workers spawned,
    /// which is 0 if workers already exist or the race has finished.
    pub fn spawn_all(&mut self) -> RunnerResult<usize> {
        if !self.pool.is_empty() || self.phase() == RacePhase::Finished {
            debug!(workers = self.pool.len(), "workers already spawned");
            return Ok(0);
        }
        let live = self.board.live_agents();
        for snake in &live {
            let rng = match self.seed {
                Some(seed) => AgentRng::new(seed, snake.id()),
                None       => AgentRng::from_entropy(),
            };
            self.pool.spawn(Arc::clone(snake), Arc::clone(&self.board), self.config.clone(), rng)?;
        }
        self.clock.start()?;
        info!(workers = live.len(), "race ready");
        Ok(live.len())
    }

    /// Release the workers.  Same as [`resume`](Self::resume).
    pub fn start(&self) -> RacePhase {
        self.resume()
    }

    /// Clock to `Running`, then open the gate.  No effect once finished.
    pub fn resume(&self) -> RacePhase {
        let mut phase = self.phase.lock();
        if *phase == RacePhase::Finished {
            return *phase;
        }
        self.board.set_paused(false);
        self.clock.resume();
        *phase = RacePhase::Running;
        info!("race running");
        *phase
    }

    /// Clock to `Paused`, then close the gate, and report the standings.
    pub fn pause(&self) -> RaceStats {
        let mut phase = self.phase.lock();
        if *phase == RacePhase::Running {
            self.clock.pause();
            self.board.set_paused(true);
            *phase = RacePhase::Paused;
            info!("race paused");
        }
        RaceStats::collect(&self.board)
    }

    /// Start, pause or resume depending on the current phase.
    pub fn toggle(&self) -> RacePhase {
        match self.phase() {
            RacePhase::Running => {
                self.pause();
                RacePhase::Paused
            }
            RacePhase::NotStarted | RacePhase::Paused => self.resume(),
            RacePhase::Finished => RacePhase::Finished,
        }
    }

    pub fn stats(&self) -> RaceStats {
        RaceStats::collect(&self.board)
    }

    /// Cancel and join every worker, then stop the clock.  Returns each
    /// worker's summary, or the first worker failure.
    pub fn shutdown(&mut self) -> RunnerResult<Vec<RunnerSummary>> {
        *self.phase.lock() = RacePhase::Finished;
        self.pool.cancel_token().cancel();
        self.board.set_paused(false);
        let joined = self.pool.shutdown();
        self.clock.stop();
        info!("race finished");
        joined
    }
}
