//! One named OS thread per snake.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use snake_board::{Board, Snake};
use snake_core::{AgentId, AgentRng, RunnerConfig};
use tracing::{debug, warn};

use crate::{CancelToken, RunnerError, RunnerResult, RunnerSummary, SnakeRunner};

/// Owns the worker threads of a race and the token that stops them.
///
/// Dropping the pool cancels and joins any workers still running.
#[derive(Default)]
pub struct RunnerPool {
    cancel:  CancelToken,
    handles: Vec<(AgentId, JoinHandle<RunnerResult<RunnerSummary>>)>,
}

impl RunnerPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// The token every worker spawned by this pool observes.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Start a worker thread named `snake-<id>` running a [`SnakeRunner`].
    pub fn spawn(
        &mut self,
        snake:  Arc<Snake>,
        board:  Arc<Board>,
        config: RunnerConfig,
        rng:    AgentRng,
    ) -> RunnerResult<()> {
        let id = snake.id();
        let runner = SnakeRunner::new(snake, board, config, rng, self.cancel.clone());
        let handle = thread::Builder::new()
            .name(format!("snake-{}", id.0))
            .spawn(move || runner.run())
            .map_err(RunnerError::Spawn)?;
        debug!(agent = %id, "worker spawned");
        self.handles.push((id, handle));
        Ok(())
    }

    /// Cancel every worker and join them all.
    ///
    /// Every thread is joined even if an earlier one failed; the first
    /// failure is returned.
    pub fn shutdown(&mut self) -> RunnerResult<Vec<RunnerSummary>> {
        self.cancel.cancel();
        let mut summaries = Vec::with_capacity(self.handles.len());
        let mut first_err = None;
        for (id, handle) in self.handles.drain(..) {
            let outcome = match handle.join() {
                Ok(outcome) => outcome,
                Err(_) => {
                    warn!(agent = %id, "worker panicked");
                    Err(RunnerError::WorkerPanicked(id))
                }
            };
            match outcome {
                Ok(summary) => summaries.push(summary),
                Err(e) => {
                    first_err.get_or_insert(e);
                }
            }
        }
        match first_err {
            Some(e) => Err(e),
            None    => Ok(summaries),
        }
    }
}

impl Drop for RunnerPool {
    fn drop(&mut self) {
        if !self.handles.is_empty() {
            let _ = self.shutdown();
        }
    }
}
