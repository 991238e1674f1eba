//! Rate limiting with leading and trailing edges
//!
//! A throttled function runs at most once per `wait` window. The first call
//! of a window fires immediately (leading edge). Calls made while the window
//! is open replace a single pending argument set, which fires once when the
//! window closes (trailing edge) and opens the next window. A window that
//! closes with nothing pending leaves the wrapper idle, so the next call
//! fires immediately again.

use crate::abstractions::scheduler::{Scheduler, TaskHandle};
use crate::config::ThrottleOptions;
use crate::error::Result;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::{Duration, Instant};
use tracing::{debug, trace};

struct ThrottleState<A> {
    window_start: Option<Instant>,
    pending: Option<A>,
    trailing: Option<TaskHandle>,
    generation: u64,
}

impl<A> Default for ThrottleState<A> {
    fn default() -> Self {
        Self {
            window_start: None,
            pending: None,
            trailing: None,
            generation: 0,
        }
    }
}

struct ThrottleInner<F, A> {
    func: F,
    options: ThrottleOptions,
    scheduler: Arc<dyn Scheduler>,
    state: Mutex<ThrottleState<A>>,
}

impl<F, A> ThrottleInner<F, A> {
    fn lock(&self) -> MutexGuard<'_, ThrottleState<A>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run the trailing call scheduled as `generation`
    ///
    /// A task that was superseded by `cancel` and a later schedule does
    /// nothing.
    fn fire_trailing<R>(&self, generation: u64)
    where
        F: Fn(A) -> R,
    {
        let args = {
            let mut state = self.lock();
            if state.trailing.is_none() || state.generation != generation {
                trace!(generation, "Throttle skipped stale trailing task");
                return;
            }
            state.trailing = None;
            let args = state.pending.take();
            if args.is_some() {
                state.window_start = Some(self.scheduler.now());
            }
            args
        };
        if let Some(args) = args {
            debug!("Throttle firing trailing call");
            (self.func)(args);
        }
    }
}

/// A rate-limited function
///
/// Dropping the wrapper cancels any pending trailing call.
pub struct Throttle<F, A> {
    inner: Arc<ThrottleInner<F, A>>,
}

/// Throttle `func` to one call per `wait`, firing on both edges
pub fn throttle<F, A, R>(scheduler: Arc<dyn Scheduler>, func: F, wait: Duration) -> Throttle<F, A>
where
    F: Fn(A) -> R + Send + Sync + 'static,
    A: Send + 'static,
{
    Throttle::from_parts(scheduler, func, ThrottleOptions::new(wait))
}

/// Throttle `func` with explicit edge options
///
/// Fails with an invalid-argument error when both edges are disabled.
pub fn throttle_with<F, A, R>(
    scheduler: Arc<dyn Scheduler>,
    func: F,
    options: ThrottleOptions,
) -> Result<Throttle<F, A>>
where
    F: Fn(A) -> R + Send + Sync + 'static,
    A: Send + 'static,
{
    options.validate()?;
    Ok(Throttle::from_parts(scheduler, func, options))
}

impl<F, A, R> Throttle<F, A>
where
    F: Fn(A) -> R + Send + Sync + 'static,
    A: Send + 'static,
{
    fn from_parts(scheduler: Arc<dyn Scheduler>, func: F, options: ThrottleOptions) -> Self {
        Self {
            inner: Arc::new(ThrottleInner {
                func,
                options,
                scheduler,
                state: Mutex::new(ThrottleState::default()),
            }),
        }
    }

    /// Call through the throttle
    ///
    /// Returns the result when the call fires immediately on the leading
    /// edge, and `None` when it is coalesced into the trailing call or
    /// dropped.
    pub fn call(&self, args: A) -> Option<R> {
        let inner = &self.inner;
        let wait = inner.options.wait;
        let now = inner.scheduler.now();
        let mut state = inner.lock();

        let window_open = state.trailing.is_some()
            || state
                .window_start
                .is_some_and(|start| now.saturating_duration_since(start) < wait);

        if !window_open {
            state.window_start = Some(now);
            if inner.options.leading {
                drop(state);
                debug!("Throttle firing leading call");
                return Some((inner.func)(args));
            }
        }

        if !inner.options.trailing {
            trace!("Throttle dropped call inside window");
            return None;
        }

        state.pending = Some(args);
        if state.trailing.is_none() {
            let elapsed = state
                .window_start
                .map_or(Duration::ZERO, |start| now.saturating_duration_since(start));
            let remaining = wait.saturating_sub(elapsed);
            state.generation += 1;
            let generation = state.generation;
            let weak: Weak<ThrottleInner<F, A>> = Arc::downgrade(inner);
            let handle = inner.scheduler.schedule(
                remaining,
                Box::new(move || {
                    if let Some(inner) = weak.upgrade() {
                        inner.fire_trailing::<R>(generation);
                    }
                }),
            );
            debug!(
                remaining_ms = remaining.as_millis() as u64,
                "Throttle scheduled trailing call"
            );
            state.trailing = Some(handle);
        } else {
            trace!("Throttle replaced pending arguments");
        }
        None
    }
}

impl<F, A> Throttle<F, A> {
    /// Drop any pending trailing call and reset the window
    pub fn cancel(&self) {
        let mut state = self.inner.lock();
        if let Some(handle) = state.trailing.take() {
            handle.cancel();
        }
        state.pending = None;
        state.window_start = None;
    }

    /// Whether a trailing call is scheduled
    pub fn has_pending(&self) -> bool {
        self.inner.lock().trailing.is_some()
    }

    pub fn options(&self) -> &ThrottleOptions {
        &self.inner.options
    }
}

impl<F, A> Drop for Throttle<F, A> {
    fn drop(&mut self) {
        let mut state = self.inner.lock();
        if let Some(handle) = state.trailing.take() {
            handle.cancel();
        }
    }
}

impl<F, A> fmt::Debug for Throttle<F, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Throttle")
            .field("options", &self.inner.options)
            .field("pending", &self.has_pending())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abstractions::scheduler::Task;
    use crate::testing::{CallLog, ManualScheduler};

    type Recorded = Throttle<Box<dyn Fn(u32) -> u32 + Send + Sync>, u32>;

    fn setup(options: ThrottleOptions) -> (Arc<ManualScheduler>, CallLog<u32>, Recorded) {
        let scheduler = Arc::new(ManualScheduler::new());
        let log = CallLog::new();
        let recorder = log.clone();
        let throttled = throttle_with(
            scheduler.clone(),
            Box::new(move |n: u32| {
                recorder.record(n);
                n * 10
            }) as Box<dyn Fn(u32) -> u32 + Send + Sync>,
            options,
        )
        .unwrap();
        (scheduler, log, throttled)
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_leading_then_trailing_with_latest_arguments() {
        let (scheduler, log, throttled) = setup(ThrottleOptions::new(ms(100)));

        assert_eq!(throttled.call(1), Some(10));
        for n in 2..=5 {
            scheduler.advance(ms(2));
            assert_eq!(throttled.call(n), None);
        }
        assert_eq!(log.calls(), vec![1]);

        scheduler.advance(ms(91));
        assert_eq!(log.calls(), vec![1]);
        scheduler.advance(ms(1));
        assert_eq!(log.calls(), vec![1, 5]);
        assert!(!throttled.has_pending());
    }

    #[test]
    fn test_idle_window_returns_to_leading() {
        let (scheduler, log, throttled) = setup(ThrottleOptions::new(ms(50)));

        assert_eq!(throttled.call(1), Some(10));
        scheduler.advance(ms(60));
        assert_eq!(throttled.call(2), Some(20));
        assert_eq!(log.calls(), vec![1, 2]);
    }

    #[test]
    fn test_trailing_call_opens_new_window() {
        let (scheduler, log, throttled) = setup(ThrottleOptions::new(ms(100)));

        throttled.call(1);
        throttled.call(2);
        scheduler.advance(ms(100));
        assert_eq!(log.calls(), vec![1, 2]);

        // inside the window opened by the trailing call
        scheduler.advance(ms(10));
        assert_eq!(throttled.call(3), None);
        scheduler.advance(ms(90));
        assert_eq!(log.calls(), vec![1, 2, 3]);
    }

    #[test]
    fn test_trailing_only() {
        let options = ThrottleOptions::new(ms(100)).with_leading(false);
        let (scheduler, log, throttled) = setup(options);

        assert_eq!(throttled.call(1), None);
        assert_eq!(throttled.call(2), None);
        scheduler.advance(ms(100));
        assert_eq!(log.calls(), vec![2]);
    }

    #[test]
    fn test_leading_only_drops_window_calls() {
        let options = ThrottleOptions::new(ms(100)).with_trailing(false);
        let (scheduler, log, throttled) = setup(options);

        assert_eq!(throttled.call(1), Some(10));
        assert_eq!(throttled.call(2), None);
        scheduler.advance(ms(200));
        assert_eq!(log.calls(), vec![1]);
        assert_eq!(scheduler.pending_tasks(), 0);
    }

    #[test]
    fn test_cancel_and_drop_discard_trailing_call() {
        let (scheduler, log, throttled) = setup(ThrottleOptions::new(ms(100)));
        throttled.call(1);
        throttled.call(2);
        throttled.cancel();
        scheduler.advance(ms(100));
        assert_eq!(log.calls(), vec![1]);

        assert_eq!(throttled.call(3), Some(30));
        throttled.call(4);
        drop(throttled);
        scheduler.advance(ms(100));
        assert_eq!(log.calls(), vec![1, 3]);
    }

    /// Holds scheduled tasks so a test can run them in any interleaving
    #[derive(Default)]
    struct HeldScheduler {
        tasks: Mutex<Vec<(TaskHandle, Task)>>,
    }

    impl HeldScheduler {
        fn take(&self, index: usize) -> (TaskHandle, Task) {
            self.tasks.lock().unwrap().remove(index)
        }
    }

    impl Scheduler for HeldScheduler {
        fn now(&self) -> Instant {
            Instant::now()
        }

        fn schedule(&self, _delay: Duration, task: Task) -> TaskHandle {
            let handle = TaskHandle::new();
            self.tasks.lock().unwrap().push((handle.clone(), task));
            handle
        }
    }

    #[test]
    fn test_superseded_trailing_task_does_nothing() {
        let scheduler = Arc::new(HeldScheduler::default());
        let log = CallLog::new();
        let recorder = log.clone();
        let throttled = throttle(
            scheduler.clone(),
            move |n: u32| recorder.record(n),
            Duration::from_secs(60),
        );

        throttled.call(1);
        throttled.call(2);
        // the first trailing task has claimed its run but not yet taken the lock
        let (stale_handle, stale_task) = scheduler.take(0);
        assert!(stale_handle.try_fire());

        throttled.cancel();
        throttled.call(3);
        throttled.call(4);
        stale_task();

        assert_eq!(log.calls(), vec![1, 3]);
        assert!(throttled.has_pending());

        let (handle, task) = scheduler.take(0);
        assert!(handle.try_fire());
        task();
        assert_eq!(log.calls(), vec![1, 3, 4]);
        assert!(!throttled.has_pending());
    }

    #[test]
    fn test_both_edges_disabled_rejected() {
        let scheduler: Arc<dyn Scheduler> = Arc::new(ManualScheduler::new());
        let options = ThrottleOptions::new(ms(10))
            .with_leading(false)
            .with_trailing(false);
        assert!(throttle_with(scheduler, |n: u32| n, options).is_err());
    }
}
