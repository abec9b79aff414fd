// storefront/src/debounce.rs

//! Trailing-edge debouncing of an async action.
//!
//! Each [`Debouncer::call`] restarts the quiet window with the latest value.
//! When the window elapses with no further call, the action runs once with
//! that value. Superseding a call only cancels the *timer*; an action that
//! has already been dispatched is never aborted.

use parking_lot::Mutex;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Quiet window used for cart quantity updates.
pub const DEFAULT_QUIET_WINDOW: Duration = Duration::from_millis(500);

type Action<T> = Arc<dyn Fn(T) -> Pin<Box<dyn Future<Output = ()> + Send>> + Send + Sync>;

struct Slot<T> {
  /// Bumped on every call, flush and cancel; a timer only fires if its
  /// generation is still current.
  generation: u64,
  value: Option<T>,
  timer: Option<JoinHandle<()>>,
}

pub struct Debouncer<T: Send + 'static> {
  window: Duration,
  action: Action<T>,
  slot: Arc<Mutex<Slot<T>>>,
}

impl<T: Send + 'static> Debouncer<T> {
  pub fn new<F, Fut>(window: Duration, action: F) -> Self
  where
    F: Fn(T) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
  {
    let action: Action<T> =
      Arc::new(move |value: T| -> Pin<Box<dyn Future<Output = ()> + Send>> { Box::pin(action(value)) });
    Debouncer {
      window,
      action,
      slot: Arc::new(Mutex::new(Slot { generation: 0, value: None, timer: None })),
    }
  }

  pub fn window(&self) -> Duration {
    self.window
  }

  /// Schedules the action with `value`, replacing any pending value.
  ///
  /// Must be called from within a tokio runtime.
  pub fn call(&self, value: T) {
    let mut slot = self.slot.lock();
    if let Some(timer) = slot.timer.take() {
      timer.abort();
    }
    slot.generation += 1;
    slot.value = Some(value);

    let generation = slot.generation;
    let window = self.window;
    let shared = Arc::clone(&self.slot);
    let action = Arc::clone(&self.action);
    slot.timer = Some(tokio::spawn(async move {
      tokio::time::sleep(window).await;
      let value = {
        let mut slot = shared.lock();
        if slot.generation != generation {
          return;
        }
        // From here on the action counts as dispatched.
        slot.timer = None;
        slot.value.take()
      };
      if let Some(value) = value {
        action(value).await;
      }
    }));
  }

  pub fn is_pending(&self) -> bool {
    self.slot.lock().value.is_some()
  }

  /// Drops the pending value, if any, without running the action.
  pub fn cancel(&self) -> Option<T> {
    let mut slot = self.slot.lock();
    slot.generation += 1;
    if let Some(timer) = slot.timer.take() {
      timer.abort();
    }
    slot.value.take()
  }

  /// Runs the pending action now instead of waiting out the window.
  /// Returns whether anything was pending.
  pub async fn flush(&self) -> bool {
    match self.cancel() {
      Some(value) => {
        (self.action)(value).await;
        true
      }
      None => false,
    }
  }
}

impl<T: Send + 'static> std::fmt::Debug for Debouncer<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Debouncer")
      .field("window", &self.window)
      .field("pending", &self.is_pending())
      .finish()
  }
}
