//! Manually driven scheduler for deterministic timing tests

use crate::abstractions::scheduler::{Scheduler, Task, TaskHandle};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

struct Scheduled {
    due: Duration,
    seq: u64,
    task: Task,
    handle: TaskHandle,
}

#[derive(Default)]
struct ManualState {
    elapsed: Duration,
    next_seq: u64,
    queue: Vec<Scheduled>,
}

/// Scheduler with a virtual clock that only moves when told to
///
/// Tasks become due `delay` after the virtual time at which they were
/// scheduled. [`ManualScheduler::advance`] runs due tasks in due order, ties
/// in scheduling order, and tasks scheduled while advancing run in the same
/// pass if they fall due before the target time.
pub struct ManualScheduler {
    origin: Instant,
    state: Mutex<ManualState>,
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            state: Mutex::new(ManualState::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ManualState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Virtual time since the scheduler was created
    pub fn elapsed(&self) -> Duration {
        self.lock().elapsed
    }

    /// Number of scheduled tasks that have not fired or been cancelled
    pub fn pending_tasks(&self) -> usize {
        self.lock()
            .queue
            .iter()
            .filter(|scheduled| scheduled.handle.is_pending())
            .count()
    }

    /// Move the clock forward by `by`, running every task that falls due
    ///
    /// Returns the number of tasks that ran. Cancelled tasks are discarded
    /// without running.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.lock().elapsed + by;
        let mut ran = 0;
        while let Some(scheduled) = self.pop_due(target) {
            if scheduled.handle.try_fire() {
                (scheduled.task)();
                ran += 1;
            }
        }
        ran
    }

    fn pop_due(&self, target: Duration) -> Option<Scheduled> {
        let mut state = self.lock();
        let next = state
            .queue
            .iter()
            .enumerate()
            .filter(|(_, scheduled)| scheduled.due <= target)
            .min_by_key(|(_, scheduled)| (scheduled.due, scheduled.seq))
            .map(|(index, _)| index);
        match next {
            Some(index) => {
                let scheduled = state.queue.swap_remove(index);
                state.elapsed = state.elapsed.max(scheduled.due);
                Some(scheduled)
            }
            None => {
                state.elapsed = target;
                None
            }
        }
    }
}

impl Scheduler for ManualScheduler {
    fn now(&self) -> Instant {
        self.origin + self.lock().elapsed
    }

    fn schedule(&self, delay: Duration, task: Task) -> TaskHandle {
        let handle = TaskHandle::new();
        let mut state = self.lock();
        let due = state.elapsed + delay;
        let seq = state.next_seq;
        state.next_seq += 1;
        state.queue.push(Scheduled {
            due,
            seq,
            task,
            handle: handle.clone(),
        });
        handle
    }
}
