//! Deferred-execution abstraction
//!
//! Provides a trait-based clock and timer so `delay` and `throttle` can run
//! on tokio in production and on a manually advanced clock in tests.

use crate::error::{ErrorCode, Result, UnderbarError};
use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};
use tokio::runtime::Handle;
use tokio::task::AbortHandle;
use tracing::debug;

/// A unit of deferred work
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Clock and timer capability
pub trait Scheduler: Send + Sync {
    /// Current time on this scheduler's clock
    fn now(&self) -> Instant;

    /// Run `task` once, no earlier than `delay` from now
    ///
    /// Implementations must not run the task before `schedule` returns, and
    /// must run it only if [`TaskHandle::try_fire`] succeeds.
    fn schedule(&self, delay: Duration, task: Task) -> TaskHandle;
}

const PENDING: u8 = 0;
const FIRED: u8 = 1;
const CANCELLED: u8 = 2;

struct TaskInner {
    state: AtomicU8,
    abort: Mutex<Option<AbortHandle>>,
}

/// Handle to a scheduled task
///
/// A task moves from pending to either fired or cancelled, exactly once.
/// Clones share the same task.
#[derive(Clone)]
pub struct TaskHandle {
    inner: Arc<TaskInner>,
}

impl TaskHandle {
    /// Create a handle for a task that has not run yet
    pub fn new() -> Self {
        Self {
            inner: Arc::new(TaskInner {
                state: AtomicU8::new(PENDING),
                abort: Mutex::new(None),
            }),
        }
    }

    fn transition(&self, to: u8) -> bool {
        self.inner
            .state
            .compare_exchange(PENDING, to, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Cancel the task if it has not fired; returns whether it was cancelled
    pub fn cancel(&self) -> bool {
        if !self.transition(CANCELLED) {
            return false;
        }
        let abort = self
            .inner
            .abort
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(abort) = abort {
            abort.abort();
        }
        debug!("Cancelled scheduled task");
        true
    }

    /// Claim the right to run the task; succeeds at most once and never
    /// after cancellation
    pub fn try_fire(&self) -> bool {
        self.transition(FIRED)
    }

    pub fn is_pending(&self) -> bool {
        self.inner.state.load(Ordering::Acquire) == PENDING
    }

    pub fn has_fired(&self) -> bool {
        self.inner.state.load(Ordering::Acquire) == FIRED
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.state.load(Ordering::Acquire) == CANCELLED
    }

    fn set_abort(&self, abort: AbortHandle) {
        *self
            .inner
            .abort
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(abort);
    }
}

impl Default for TaskHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TaskHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self.inner.state.load(Ordering::Acquire) {
            PENDING => "pending",
            FIRED => "fired",
            _ => "cancelled",
        };
        f.debug_struct("TaskHandle").field("state", &state).finish()
    }
}

/// Scheduler backed by a tokio runtime
///
/// Uses tokio's clock, so `tokio::time::pause` and `advance` control it in
/// tests.
#[derive(Clone, Debug)]
pub struct TokioScheduler {
    handle: Handle,
}

impl TokioScheduler {
    /// Create a scheduler spawning onto the given runtime
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Create a scheduler for the runtime the caller is running in
    pub fn current() -> Result<Self> {
        Handle::try_current().map(Self::new).map_err(|e| {
            UnderbarError::scheduler_with_code(
                ErrorCode::SCHEDULER_NO_RUNTIME,
                "no tokio runtime is running on this thread",
            )
            .with_source(e)
        })
    }
}

impl Scheduler for TokioScheduler {
    fn now(&self) -> Instant {
        let _guard = self.handle.enter();
        tokio::time::Instant::now().into_std()
    }

    fn schedule(&self, delay: Duration, task: Task) -> TaskHandle {
        let handle = TaskHandle::new();
        let ticket = handle.clone();
        let join = self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            if ticket.try_fire() {
                task();
            }
        });
        handle.set_abort(join.abort_handle());
        handle
    }
}
