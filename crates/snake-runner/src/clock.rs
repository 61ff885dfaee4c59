//! Fixed-rate frame clock with a pause state.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use snake_core::ClockConfig;
use tracing::{info, warn};

use crate::{CancelToken, FrameObserver, RunnerError, RunnerResult};

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[repr(u8)]
pub enum ClockState {
    Stopped = 0,
    Paused  = 1,
    Running = 2,
}

impl ClockState {
    fn from_u8(v: u8) -> Self {
        match v {
            1 => ClockState::Paused,
            2 => ClockState::Running,
            _ => ClockState::Stopped,
        }
    }
}

struct Ticker {
    stop:   CancelToken,
    handle: JoinHandle<()>,
}

/// Calls a [`FrameObserver`] every `period` on its own thread.
///
/// ```text
///   Stopped ──start──▶ Paused ◀──pause/resume──▶ Running
///      ▲                  │                         │
///      └──────── stop ────┴─────────────────────────┘
/// ```
///
/// Frames fire in both `Paused` and `Running`; the state is only a flag for
/// whoever reads it.  The clock does not touch any board: a caller driving
/// both must keep the clock state and the board's pause gate in step
/// ([`Race`][crate::Race] does).
pub struct GameClock {
    period:   Duration,
    state:    Arc<AtomicU8>,
    observer: Arc<dyn FrameObserver>,
    ticker:   Mutex<Option<Ticker>>,
}

impl GameClock {
    pub fn new(period: Duration, observer: impl FrameObserver) -> RunnerResult<Self> {
        if period.is_zero() {
            return Err(RunnerError::InvalidPeriod);
        }
        Ok(Self {
            period,
            state:    Arc::new(AtomicU8::new(ClockState::Stopped as u8)),
            observer: Arc::new(observer),
            ticker:   Mutex::new(None),
        })
    }

    pub fn from_config(config: &ClockConfig, observer: impl FrameObserver) -> RunnerResult<Self> {
        Self::new(config.period(), observer)
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn state(&self) -> ClockState {
        ClockState::from_u8(self.state.load(Ordering::Acquire))
    }

    pub fn is_running(&self) -> bool {
        self.state() == ClockState::Running
    }

    /// `Stopped → Paused` and start the frame thread.  Returns `Ok(false)`
    /// if the clock was not stopped.
    pub fn start(&self) -> RunnerResult<bool> {
        let mut ticker = self.ticker.lock();
        if self.transition(ClockState::Stopped, ClockState::Paused).is_err() {
            return Ok(false);
        }

        let stop = CancelToken::new();
        let period = self.period;
        let observer = Arc::clone(&self.observer);
        let token = stop.clone();
        let spawned = thread::Builder::new()
            .name("frame-clock".into())
            .spawn(move || tick_loop(period, observer.as_ref(), &token));
        let handle = match spawned {
            Ok(handle) => handle,
            Err(e) => {
                self.state.store(ClockState::Stopped as u8, Ordering::Release);
                return Err(RunnerError::Spawn(e));
            }
        };

        *ticker = Some(Ticker { stop, handle });
        info!(period_ms = self.period.as_millis() as u64, "clock started");
        Ok(true)
    }

    /// `Running → Paused`.  Returns whether the state changed.
    pub fn pause(&self) -> bool {
        self.transition(ClockState::Running, ClockState::Paused).is_ok()
    }

    /// `Paused → Running`.  Returns whether the state changed.
    pub fn resume(&self) -> bool {
        self.transition(ClockState::Paused, ClockState::Running).is_ok()
    }

    /// Any state → `Stopped`; halts the frame thread and waits for it unless
    /// called from inside a frame callback.
    pub fn stop(&self) {
        let taken = {
            let mut ticker = self.ticker.lock();
            self.state.store(ClockState::Stopped as u8, Ordering::Release);
            ticker.take()
        };
        let Some(Ticker { stop, handle }) = taken else {
            return;
        };
        stop.cancel();
        if handle.thread().id() != thread::current().id() && handle.join().is_err() {
            warn!("frame observer panicked");
        }
        info!("clock stopped");
    }

    fn transition(&self, from: ClockState, to: ClockState) -> Result<u8, u8> {
        self.state
            .compare_exchange(from as u8, to as u8, Ordering::AcqRel, Ordering::Acquire)
    }
}

impl Drop for GameClock {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for GameClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameClock")
            .field("period", &self.period)
            .field("state", &self.state())
            .finish()
    }
}

/// Fire frames at `period` intervals measured from the first one.  A frame
/// that overruns pushes the schedule back instead of firing a burst.
fn tick_loop(period: Duration, observer: &dyn FrameObserver, stop: &CancelToken) {
    let mut deadline = Instant::now();
    let mut frame = 0u64;
    loop {
        observer.on_frame(frame);
        frame += 1;
        deadline += period;
        let now = Instant::now();
        if deadline < now {
            deadline = now;
        }
        if stop.sleep_until(deadline) {
            break;
        }
    }
}
