//! Cooperative pacing between commands.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Shared cancellation flag for a run.
///
/// Once set, no further continuation fires; geometry already applied stays
/// applied. A fresh reset re-arms the token.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    pub(crate) fn rearm(&self) {
        self.cancelled.store(false, Ordering::SeqCst);
    }
}

/// Inserts the bounded delay between a command's completion and its
/// continuation.
///
/// The delay shapes on-screen animation only — all geometry and paint for
/// the command has finished before the pacer runs, so eliding the delay
/// cannot change any outcome.
#[derive(Debug, Clone)]
pub struct Pacer {
    delay: Duration,
}

impl Pacer {
    /// A pacer with the given delay per command.
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// A pacer with no delay, for headless replay.
    pub fn immediate() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Fire `continuation` with `value` after the configured delay, unless
    /// the run was cancelled — a cancelled continuation is dropped, never
    /// deferred.
    pub fn pace<T>(&self, cancel: &CancelToken, value: T, continuation: impl FnOnce(T)) {
        if cancel.is_cancelled() {
            return;
        }
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
            // The stop control may run on another thread; look again after
            // the delay.
            if cancel.is_cancelled() {
                return;
            }
        }
        continuation(value);
    }
}
