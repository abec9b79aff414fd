// storefront/src/cart/mod.rs

//! Cart state on the client: per-line controllers, derived totals, and the
//! service tying them to the API and the query cache.

pub mod controller;
pub mod service;
pub mod summary;

pub use controller::{CartItemController, CounterBounds, ItemPhase, LoadingFlag, ServiceItemController};
pub use service::{add_button_label, AddToCart, CartService};
pub use summary::{CartSummary, CategoryLine, Total, PRICING_APPROVAL_NOTICE};

use crate::api::CartApi;
use crate::cache::QueryCache;
use crate::debounce::DEFAULT_QUIET_WINDOW;
use crate::notify::Notifier;
use std::sync::Arc;
use std::time::Duration;

/// Everything a cart view shares between its lines.
#[derive(Clone)]
pub struct CartContext {
  pub api: Arc<dyn CartApi>,
  pub cache: QueryCache,
  pub notifier: Arc<dyn Notifier>,
  pub loading: LoadingFlag,
  /// Quiet window before a quantity change is sent.
  pub quiet_window: Duration,
}

impl CartContext {
  pub fn new(api: Arc<dyn CartApi>, cache: QueryCache, notifier: Arc<dyn Notifier>) -> Self {
    CartContext { api, cache, notifier, loading: LoadingFlag::new(), quiet_window: DEFAULT_QUIET_WINDOW }
  }

  pub fn with_quiet_window(mut self, quiet_window: Duration) -> Self {
    self.quiet_window = quiet_window;
    self
  }
}

impl std::fmt::Debug for CartContext {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("CartContext")
      .field("cache", &self.cache)
      .field("loading", &self.loading.is_loading())
      .field("quiet_window", &self.quiet_window)
      .finish_non_exhaustive()
  }
}
