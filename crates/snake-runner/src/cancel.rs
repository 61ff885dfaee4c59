//! Cooperative cancellation shared by a set of worker threads.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

#[derive(Default)]
struct Inner {
    cancelled: Mutex<bool>,
    signal:    Condvar,
}

/// A cancellation flag that also wakes anyone sleeping on it.
///
/// Cloning is cheap and every clone observes the same flag.  Cancellation is
/// one-way; there is no reset.
#[derive(Clone, Default)]
pub struct CancelToken {
    inner: Arc<Inner>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        let mut flag = self.inner.cancelled.lock();
        *flag = true;
        self.inner.signal.notify_all();
    }

    pub fn is_cancelled(&self) -> bool {
        *self.inner.cancelled.lock()
    }

    /// Sleep for `dur` or until cancelled.  Returns `true` if cancelled.
    pub fn sleep(&self, dur: Duration) -> bool {
        self.sleep_until(Instant::now() + dur)
    }

    /// Sleep until `deadline` or until cancelled.  Returns `true` if
    /// cancelled.
    pub fn sleep_until(&self, deadline: Instant) -> bool {
        let mut flag = self.inner.cancelled.lock();
        while !*flag {
            if self.inner.signal.wait_until(&mut flag, deadline).timed_out() {
                break;
            }
        }
        *flag
    }
}

impl std::fmt::Debug for CancelToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CancelToken")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}
