//! Completion signal between interrupt context and a waiting command.

use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// One-shot flag a command thread waits on and an interrupt handler sets.
///
/// Re-initialized before each use so a stale signal from an earlier command
/// never satisfies a new wait.
#[derive(Debug, Default)]
pub struct Completion {
    done: Mutex<bool>,
    signal: Condvar,
}

impl Completion {
    /// Create an unsignalled completion.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, bool> {
        self.done.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Clear any earlier signal.
    pub fn reinit(&self) {
        *self.lock() = false;
    }

    /// Signal every waiter.
    pub fn complete(&self) {
        *self.lock() = true;
        self.signal.notify_all();
    }

    /// Whether the completion has been signalled.
    pub fn is_done(&self) -> bool {
        *self.lock()
    }

    /// Block until signalled or `timeout` elapses; returns `true` if signalled.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let guard = self.lock();
        let (guard, _) = self
            .signal
            .wait_timeout_while(guard, timeout, |done| !*done)
            .unwrap_or_else(PoisonError::into_inner);
        *guard
    }
}
