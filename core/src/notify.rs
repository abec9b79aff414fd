// storefront/src/notify.rs

//! Transient user notifications ("toasts").

use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
  Success,
  Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
  pub level: NoticeLevel,
  pub message: String,
}

pub trait Notifier: Send + Sync {
  fn notify(&self, notice: Notice);

  fn success(&self, message: &str) {
    self.notify(Notice { level: NoticeLevel::Success, message: message.to_string() });
  }

  fn error(&self, message: &str) {
    self.notify(Notice { level: NoticeLevel::Error, message: message.to_string() });
  }
}

/// Emits notices as tracing events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
  fn notify(&self, notice: Notice) {
    match notice.level {
      NoticeLevel::Success => tracing::info!(target: "storefront::notice", text = %notice.message, "notice"),
      NoticeLevel::Error => tracing::warn!(target: "storefront::notice", text = %notice.message, "notice"),
    }
  }
}

/// Keeps every notice in memory, for front-ends that drain them and for tests.
#[derive(Debug, Clone, Default)]
pub struct CollectingNotifier {
  notices: Arc<Mutex<Vec<Notice>>>,
}

impl CollectingNotifier {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn notices(&self) -> Vec<Notice> {
    self.notices.lock().clone()
  }

  pub fn last(&self) -> Option<Notice> {
    self.notices.lock().last().cloned()
  }

  pub fn drain(&self) -> Vec<Notice> {
    std::mem::take(&mut *self.notices.lock())
  }

  pub fn errors(&self) -> Vec<String> {
    self
      .notices
      .lock()
      .iter()
      .filter(|n| n.level == NoticeLevel::Error)
      .map(|n| n.message.clone())
      .collect()
  }
}

impl Notifier for CollectingNotifier {
  fn notify(&self, notice: Notice) {
    tracing::debug!(level = ?notice.level, message = %notice.message, "collected notice");
    self.notices.lock().push(notice);
  }
}
