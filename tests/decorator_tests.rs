//! Integration tests for once, memoize and delay

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;
use underbar::testing::{CallLog, ManualScheduler};
use underbar::{delay, memoize, once, TokioScheduler};

#[test]
fn test_once_returns_first_result_to_every_caller() {
    let calls = AtomicUsize::new(0);
    let init = once(|name: &str| {
        calls.fetch_add(1, Ordering::SeqCst);
        format!("hello {}", name)
    });

    let results: Vec<String> = ["moe", "larry", "curly"]
        .iter()
        .map(|name| init.call(*name))
        .collect();
    assert_eq!(results, vec!["hello moe"; 3]);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(init.get().map(String::as_str), Some("hello moe"));
}

#[test]
fn test_once_under_contention_runs_exactly_once() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let init = Arc::new(once(move |n: usize| {
        counter.fetch_add(1, Ordering::SeqCst);
        thread::sleep(Duration::from_millis(20));
        n
    }));
    let barrier = Arc::new(Barrier::new(8));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let init = Arc::clone(&init);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                init.call(i)
            })
        })
        .collect();
    let results: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(results.iter().all(|r| *r == results[0]));
}

#[test]
fn test_memoize_identical_arguments_call_once() {
    let calls = AtomicUsize::new(0);
    let fib = memoize(|n: u64| {
        calls.fetch_add(1, Ordering::SeqCst);
        (1..=n).product::<u64>()
    });

    assert_eq!(fib.call(10), 3_628_800);
    assert_eq!(fib.call(10), 3_628_800);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    assert_eq!(fib.call(5), 120);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_memoize_multiple_arguments_as_tuple() {
    let calls = AtomicUsize::new(0);
    let add = memoize(|(a, b): (i32, i32)| {
        calls.fetch_add(1, Ordering::SeqCst);
        a + b
    });

    assert_eq!(add.call((1, 2)), 3);
    assert_eq!(add.call((2, 1)), 3);
    assert_eq!(add.call((1, 2)), 3);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(add.len(), 2);
}

#[test]
fn test_memoize_concurrent_same_key_computes_once() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let slow_square = Arc::new(memoize(move |n: u32| {
        counter.fetch_add(1, Ordering::SeqCst);
        thread::sleep(Duration::from_millis(20));
        n * n
    }));
    let barrier = Arc::new(Barrier::new(6));

    let handles: Vec<_> = (0..6)
        .map(|_| {
            let slow_square = Arc::clone(&slow_square);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                slow_square.call(9)
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 81);
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_delay_with_manual_clock() {
    let scheduler = ManualScheduler::new();
    let log = CallLog::new();
    let recorder = log.clone();
    delay(
        &scheduler,
        move |msg: String| recorder.record(msg),
        Duration::from_millis(100),
        "later".to_string(),
    );

    scheduler.advance(Duration::from_millis(50));
    assert_eq!(log.count(), 0);
    scheduler.advance(Duration::from_millis(50));
    assert_eq!(log.calls(), vec!["later".to_string()]);

    scheduler.advance(Duration::from_secs(10));
    assert_eq!(log.count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_delay_on_tokio_runtime() {
    let scheduler = TokioScheduler::current().unwrap();
    let log = CallLog::new();
    let recorder = log.clone();
    let start = tokio::time::Instant::now();
    let fired_at = Arc::new(std::sync::Mutex::new(None));
    let fired = Arc::clone(&fired_at);

    let handle = delay(
        &scheduler,
        move |n: u32| {
            recorder.record(n);
            *fired.lock().unwrap() = Some(tokio::time::Instant::now());
        },
        Duration::from_millis(250),
        7,
    );
    assert!(handle.is_pending());

    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(log.calls(), vec![7]);
    let elapsed = fired_at.lock().unwrap().unwrap() - start;
    assert!(elapsed >= Duration::from_millis(250));
}
