// tests/debounce_tests.rs
mod common;

use common::setup_tracing;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use storefront::Debouncer;
use tokio::time::sleep;

fn recording_debouncer(window: Duration) -> (Debouncer<u32>, Arc<Mutex<Vec<u32>>>) {
  let seen = Arc::new(Mutex::new(Vec::new()));
  let sink = Arc::clone(&seen);
  let debouncer = Debouncer::new(window, move |value: u32| {
    let sink = Arc::clone(&sink);
    async move {
      sink.lock().push(value);
    }
  });
  (debouncer, seen)
}

#[tokio::test(start_paused = true)]
async fn burst_of_calls_runs_action_once_with_last_value() {
  setup_tracing();
  let (debouncer, seen) = recording_debouncer(Duration::from_millis(500));

  for value in 1..=10 {
    debouncer.call(value);
    sleep(Duration::from_millis(50)).await;
  }
  assert!(debouncer.is_pending());
  assert!(seen.lock().is_empty());

  sleep(Duration::from_millis(600)).await;
  assert_eq!(*seen.lock(), vec![10]);
  assert!(!debouncer.is_pending());
}

#[tokio::test(start_paused = true)]
async fn calls_separated_by_the_window_each_run() {
  let (debouncer, seen) = recording_debouncer(Duration::from_millis(500));

  debouncer.call(1);
  sleep(Duration::from_millis(700)).await;
  debouncer.call(2);
  sleep(Duration::from_millis(700)).await;

  assert_eq!(*seen.lock(), vec![1, 2]);
}

#[tokio::test(start_paused = true)]
async fn each_call_restarts_the_window() {
  let (debouncer, seen) = recording_debouncer(Duration::from_millis(500));

  debouncer.call(1);
  sleep(Duration::from_millis(400)).await;
  debouncer.call(2);
  sleep(Duration::from_millis(400)).await;
  assert!(seen.lock().is_empty(), "800ms after the first call, 400ms after the last");

  sleep(Duration::from_millis(200)).await;
  assert_eq!(*seen.lock(), vec![2]);
}

#[tokio::test(start_paused = true)]
async fn cancel_drops_the_pending_value() {
  let (debouncer, seen) = recording_debouncer(Duration::from_millis(500));

  debouncer.call(5);
  assert_eq!(debouncer.cancel(), Some(5));
  assert_eq!(debouncer.cancel(), None);

  sleep(Duration::from_secs(2)).await;
  assert!(seen.lock().is_empty());
}

#[tokio::test(start_paused = true)]
async fn flush_runs_immediately_and_only_once() {
  let (debouncer, seen) = recording_debouncer(Duration::from_millis(500));

  debouncer.call(3);
  assert!(debouncer.flush().await);
  assert_eq!(*seen.lock(), vec![3]);

  sleep(Duration::from_secs(1)).await;
  assert_eq!(*seen.lock(), vec![3]);
  assert!(!debouncer.flush().await);
}

#[tokio::test(start_paused = true)]
async fn superseding_never_aborts_a_dispatched_action() {
  let finished = Arc::new(Mutex::new(Vec::new()));
  let sink = Arc::clone(&finished);
  let debouncer = Debouncer::new(Duration::from_millis(100), move |value: u32| {
    let sink = Arc::clone(&sink);
    async move {
      // Slower than the window.
      sleep(Duration::from_millis(300)).await;
      sink.lock().push(value);
    }
  });

  debouncer.call(1);
  sleep(Duration::from_millis(150)).await; // 1 dispatched, still running
  debouncer.call(2);
  sleep(Duration::from_secs(1)).await;

  assert_eq!(*finished.lock(), vec![1, 2]);
}
