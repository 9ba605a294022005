//! Cancellable single-shot timers.
//!
//! The debouncer needs exactly two operations: run something after a delay,
//! and call it off if it has not started yet. [`Scheduler`] names that pair so
//! the debouncer does not depend on a particular runtime.

use futures_util::future::BoxFuture;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Schedules one-off delayed tasks.
pub trait Scheduler: Send + Sync {
    /// Opaque handle identifying a scheduled task.
    type Handle: Send;

    /// Runs `task` once `delay` has elapsed.
    fn schedule(&self, delay: Duration, task: BoxFuture<'static, ()>) -> Self::Handle;

    /// Prevents a scheduled task from starting.
    ///
    /// A task that has already started keeps running to completion.
    fn cancel(&self, handle: Self::Handle);
}

/// Handle returned by [`TokioScheduler`].
#[derive(Debug)]
pub struct TokioTimer {
    task: tokio::task::JoinHandle<()>,
    fired: Arc<AtomicBool>,
}

impl TokioTimer {
    /// Whether the delay elapsed and the task started.
    #[must_use]
    pub fn has_fired(&self) -> bool {
        self.fired.load(Ordering::SeqCst)
    }
}

/// [`Scheduler`] backed by `tokio::spawn` and `tokio::time::sleep`.
///
/// Must be used from within a tokio runtime.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioScheduler;

impl Scheduler for TokioScheduler {
    type Handle = TokioTimer;

    fn schedule(&self, delay: Duration, task: BoxFuture<'static, ()>) -> TokioTimer {
        let fired = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&fired);

        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            flag.store(true, Ordering::SeqCst);
            task.await;
        });

        TokioTimer { task, fired }
    }

    fn cancel(&self, handle: TokioTimer) {
        if handle.has_fired() {
            tracing::trace!("timer already fired, letting it finish");
            return;
        }
        handle.task.abort();
    }
}
