//! Pause gate shared by all snake workers.

use std::time::Duration;

use parking_lot::{Condvar, Mutex};

/// A boolean pause flag plus the condition variable workers wait on.
///
/// Deliberately separate from the board's state mutex: a worker blocked here
/// holds no board lock, and `set_paused(false)` never needs one.
pub struct PauseGate {
    paused:  Mutex<bool>,
    resumed: Condvar,
}

impl PauseGate {
    pub fn new(paused: bool) -> Self {
        Self {
            paused:  Mutex::new(paused),
            resumed: Condvar::new(),
        }
    }

    pub fn is_paused(&self) -> bool {
        *self.paused.lock()
    }

    /// Set the flag.  Clearing it wakes every waiting worker.
    pub fn set_paused(&self, paused: bool) {
        let mut flag = self.paused.lock();
        *flag = paused;
        if !paused {
            self.resumed.notify_all();
        }
    }

    /// Block until the gate is open.
    pub fn wait_if_paused(&self) {
        let mut flag = self.paused.lock();
        while *flag {
            self.resumed.wait(&mut flag);
        }
    }

    /// Block until the gate is open or `timeout` elapses.  Returns `true` if
    /// the gate is still closed, letting the caller check for cancellation
    /// between slices.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let mut flag = self.paused.lock();
        if *flag {
            self.resumed.wait_for(&mut flag, timeout);
        }
        *flag
    }
}

impl Default for PauseGate {
    fn default() -> Self {
        Self::new(false)
    }
}
