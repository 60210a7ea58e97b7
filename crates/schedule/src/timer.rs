//! Abstract deferred-callback facility and its tokio implementation.
//!
//! The controller never sleeps or spawns directly; it schedules one-shot
//! firings through a [`TimerDriver`] so it can be exercised in tests with
//! a simulated clock.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use futures::future::BoxFuture;

/// The body of a scheduled firing.
pub type TimerFiring = BoxFuture<'static, ()>;

/// Opaque handle to an installed one-shot timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

impl TimerHandle {
    /// Build a handle from a raw id. For [`TimerDriver`] implementations.
    pub fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// The raw id backing this handle.
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// One-shot deferred-callback facility.
///
/// Installation and cancellation are infallible by contract; `cancel` is
/// idempotent and a no-op for handles that already fired.
pub trait TimerDriver: Send + Sync {
    /// The ambient clock.
    fn now(&self) -> DateTime<Utc>;

    /// Install `firing` to run once after `delay`. Zero or negative delays
    /// are treated as zero: the firing still runs, immediately.
    fn after(&self, delay: chrono::Duration, firing: TimerFiring) -> TimerHandle;

    /// Cancel an installed firing. Prevents any not-yet-started firing from
    /// running; cannot interrupt one already executing.
    fn cancel(&self, handle: TimerHandle);
}

/// Tokio-backed [`TimerDriver`]: one spawned task per firing.
///
/// A firing claims its own table entry just before executing, so a
/// cancellation racing a due firing either aborts it before it starts or
/// does nothing. A firing never runs twice.
pub struct TokioTimers {
    next_id: AtomicU64,
    tasks: Arc<Mutex<HashMap<u64, tokio::task::AbortHandle>>>,
}

impl TokioTimers {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(0),
            tasks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Number of installed firings that have neither run nor been cancelled.
    pub fn pending(&self) -> usize {
        self.tasks.lock().expect("timer table lock poisoned").len()
    }
}

impl Default for TokioTimers {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerDriver for TokioTimers {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn after(&self, delay: chrono::Duration, firing: TimerFiring) -> TimerHandle {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        // Negative delays (clock drift between plan build and install)
        // collapse to zero: the firing runs immediately, never skipped.
        let sleep = delay.to_std().unwrap_or(std::time::Duration::ZERO);

        let tasks = Arc::clone(&self.tasks);
        // The table lock is held across spawn + insert. A zero-delay task
        // can reach its claim before this function returns; blocking the
        // claim on the same lock guarantees the entry is in the table by
        // the time the claim is evaluated, so the firing is never lost.
        let mut table = self.tasks.lock().expect("timer table lock poisoned");
        let task = tokio::spawn(async move {
            tokio::time::sleep(sleep).await;
            // Claim the entry before running: a cancel that arrives from
            // here on is a no-op instead of an interruption.
            let claimed = tasks
                .lock()
                .expect("timer table lock poisoned")
                .remove(&id)
                .is_some();
            if claimed {
                firing.await;
            }
        });
        table.insert(id, task.abort_handle());
        TimerHandle(id)
    }

    fn cancel(&self, handle: TimerHandle) {
        let removed = self
            .tasks
            .lock()
            .expect("timer table lock poisoned")
            .remove(&handle.0);
        if let Some(task) = removed {
            task.abort();
        }
    }
}
