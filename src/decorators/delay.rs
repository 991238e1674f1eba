//! Deferred invocation

use crate::abstractions::scheduler::{Scheduler, TaskHandle};
use std::time::Duration;
use tracing::debug;

/// Schedule `func(args)` to run once, no earlier than `wait` from now
///
/// Returns immediately. Cancelling the returned handle before the call
/// fires prevents it.
pub fn delay<S, F, A>(scheduler: &S, func: F, wait: Duration, args: A) -> TaskHandle
where
    S: Scheduler + ?Sized,
    F: FnOnce(A) + Send + 'static,
    A: Send + 'static,
{
    debug!(wait_ms = wait.as_millis() as u64, "Scheduling delayed call");
    scheduler.schedule(
        wait,
        Box::new(move || {
            debug!("Running delayed call");
            func(args)
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{CallLog, ManualScheduler};

    #[test]
    fn test_runs_after_wait_with_arguments() {
        let scheduler = ManualScheduler::new();
        let log = CallLog::new();
        let recorder = log.clone();
        let handle = delay(
            &scheduler,
            move |(a, b): (i32, &'static str)| recorder.record((a, b)),
            Duration::from_millis(100),
            (1, "x"),
        );

        scheduler.advance(Duration::from_millis(99));
        assert_eq!(log.count(), 0);
        assert!(handle.is_pending());

        scheduler.advance(Duration::from_millis(1));
        assert_eq!(log.calls(), vec![(1, "x")]);
        assert!(handle.has_fired());
    }

    #[test]
    fn test_cancel_before_firing() {
        let scheduler = ManualScheduler::new();
        let log = CallLog::new();
        let recorder = log.clone();
        let handle = delay(
            &scheduler,
            move |n: u32| recorder.record(n),
            Duration::from_millis(10),
            7,
        );

        assert!(handle.cancel());
        scheduler.advance(Duration::from_secs(1));
        assert_eq!(log.count(), 0);
    }

    #[test]
    fn test_zero_wait_still_defers() {
        let scheduler = ManualScheduler::new();
        let log = CallLog::new();
        let recorder = log.clone();
        delay(&scheduler, move |n: u32| recorder.record(n), Duration::ZERO, 3);

        assert_eq!(log.count(), 0);
        scheduler.advance(Duration::ZERO);
        assert_eq!(log.calls(), vec![3]);
    }
}
