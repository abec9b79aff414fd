// storefront/src/cart/controller.rs

//! Per-line cart controllers with optimistic quantity updates.
//!
//! A quantity change is shown immediately and sent after the quiet window.
//! The server's answer either confirms it (`Reconciled`) or the line falls
//! back to the last confirmed quantity (`Reverted`). Either way the cart
//! cache is invalidated so the next read refetches the authoritative cart.

use crate::cache::Mutation;
use crate::cart::CartContext;
use crate::debounce::Debouncer;
use crate::error::{Result, StorefrontError};
use crate::models::{CartItem, ItemKind, ServiceCartItem};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Whether any cart operation is in flight. Shared by every line of a cart
/// view; while set, counters ignore input.
#[derive(Debug, Clone, Default)]
pub struct LoadingFlag(Arc<AtomicUsize>);

impl LoadingFlag {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn is_loading(&self) -> bool {
    self.0.load(Ordering::SeqCst) > 0
  }

  /// Marks one operation in flight until the guard drops.
  pub fn begin(&self) -> LoadingGuard {
    self.0.fetch_add(1, Ordering::SeqCst);
    LoadingGuard(self.clone())
  }
}

#[must_use = "the loading flag clears as soon as the guard is dropped"]
#[derive(Debug)]
pub struct LoadingGuard(LoadingFlag);

impl Drop for LoadingGuard {
  fn drop(&mut self) {
    (self.0).0.fetch_sub(1, Ordering::SeqCst);
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemPhase {
  /// No change since the controller was created.
  Idle,
  /// A change is shown but not yet confirmed by the server.
  Pending,
  /// The server accepted the last change.
  Reconciled,
  /// The server rejected the last change; the confirmed quantity is shown.
  Reverted,
}

impl ItemPhase {
  pub fn is_settled(self) -> bool {
    !matches!(self, ItemPhase::Pending)
  }
}

/// Counter limits. Values outside are rejected, not clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterBounds {
  pub min: u32,
  pub max: Option<u32>,
}

impl Default for CounterBounds {
  fn default() -> Self {
    CounterBounds { min: 1, max: None }
  }
}

impl CounterBounds {
  pub fn with_max(max: u32) -> Self {
    CounterBounds { max: Some(max), ..Self::default() }
  }

  pub fn allows(&self, value: u32) -> bool {
    value >= self.min && self.max.map_or(true, |max| value <= max)
  }
}

#[derive(Debug)]
struct ItemState {
  displayed: u32,
  confirmed: u32,
  phase: ItemPhase,
  removed: bool,
}

/// Controller for a product or product-request line.
pub struct CartItemController {
  kind: ItemKind,
  id: String,
  bounds: CounterBounds,
  ctx: CartContext,
  state: Arc<Mutex<ItemState>>,
  debouncer: Debouncer<u32>,
}

impl CartItemController {
  /// Fails for service lines, which have no quantity.
  pub fn new(
    ctx: CartContext,
    kind: ItemKind,
    id: impl Into<String>,
    quantity: u32,
    bounds: CounterBounds,
  ) -> Result<Self> {
    if !kind.has_quantity() {
      return Err(StorefrontError::Internal(format!("{kind} lines have no quantity counter")));
    }
    let id = id.into();
    let state = Arc::new(Mutex::new(ItemState {
      displayed: quantity,
      confirmed: quantity,
      phase: ItemPhase::Idle,
      removed: false,
    }));

    let debouncer = {
      let ctx = ctx.clone();
      let state = Arc::clone(&state);
      let id = id.clone();
      Debouncer::new(ctx.quiet_window, move |quantity: u32| {
        send_quantity(ctx.clone(), Arc::clone(&state), kind, id.clone(), quantity)
      })
    };

    Ok(CartItemController { kind, id, bounds, ctx, state, debouncer })
  }

  pub fn for_item(ctx: CartContext, item: &CartItem) -> Result<Self> {
    let quantity = item.quantity().unwrap_or_default();
    Self::new(ctx, item.kind(), item.id(), quantity, CounterBounds::default())
  }

  pub fn id(&self) -> &str {
    &self.id
  }

  pub fn kind(&self) -> ItemKind {
    self.kind
  }

  /// The optimistic quantity to display.
  pub fn quantity(&self) -> u32 {
    self.state.lock().displayed
  }

  pub fn confirmed_quantity(&self) -> u32 {
    self.state.lock().confirmed
  }

  pub fn phase(&self) -> ItemPhase {
    self.state.lock().phase
  }

  pub fn is_removed(&self) -> bool {
    self.state.lock().removed
  }

  pub fn has_pending_update(&self) -> bool {
    self.debouncer.is_pending()
  }

  pub fn can_increment(&self) -> bool {
    !self.ctx.loading.is_loading() && self.bounds.allows(self.quantity().saturating_add(1))
  }

  pub fn can_decrement(&self) -> bool {
    !self.ctx.loading.is_loading() && self.quantity() > self.bounds.min
  }

  pub fn increment(&self) -> bool {
    let next = self.quantity().saturating_add(1);
    self.set_quantity(next)
  }

  pub fn decrement(&self) -> bool {
    match self.quantity().checked_sub(1) {
      Some(next) => self.set_quantity(next),
      None => false,
    }
  }

  /// Shows `quantity` and schedules the update. Returns false, changing
  /// nothing, while the cart is loading, after removal, or when the value is
  /// out of bounds or unchanged.
  ///
  /// Must be called from within a tokio runtime.
  pub fn set_quantity(&self, quantity: u32) -> bool {
    if self.ctx.loading.is_loading() || !self.bounds.allows(quantity) {
      return false;
    }
    {
      let mut state = self.state.lock();
      if state.removed || state.displayed == quantity {
        return false;
      }
      state.displayed = quantity;
      state.phase = ItemPhase::Pending;
    }
    tracing::debug!(kind = %self.kind, id = %self.id, quantity, "Quantity change scheduled.");
    self.debouncer.call(quantity);
    true
  }

  /// Sends a pending update now instead of after the quiet window.
  pub async fn flush(&self) -> bool {
    self.debouncer.flush().await
  }

  /// Removes the line. Not debounced: any update still waiting for its quiet
  /// window is dropped first. The cart cache is invalidated whatever the
  /// outcome.
  pub async fn remove(&self) -> Result<()> {
    if let Some(dropped) = self.debouncer.cancel() {
      tracing::debug!(kind = %self.kind, id = %self.id, dropped, "Pending quantity update dropped by removal.");
    }

    let result = {
      let _busy = self.ctx.loading.begin();
      self.ctx.api.remove_item(self.kind, &self.id).await
    };
    self.ctx.cache.apply(Mutation::CartChanged);

    match result {
      Ok(reply) => {
        let mut state = self.state.lock();
        state.removed = true;
        // Nothing is left in flight for a removed line.
        state.phase = ItemPhase::Reconciled;
        drop(state);
        self.ctx.notifier.success(reply.message_or("Item removed"));
        tracing::info!(kind = %self.kind, id = %self.id, "Cart line removed.");
        Ok(())
      }
      Err(err) => {
        let mut state = self.state.lock();
        state.displayed = state.confirmed;
        state.phase = ItemPhase::Reverted;
        drop(state);
        tracing::error!(kind = %self.kind, id = %self.id, error = %err, "Cart line removal failed.");
        self.ctx.notifier.error(&err.user_message());
        Err(err)
      }
    }
  }
}

impl std::fmt::Debug for CartItemController {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let state = self.state.lock();
    f.debug_struct("CartItemController")
      .field("kind", &self.kind)
      .field("id", &self.id)
      .field("displayed", &state.displayed)
      .field("confirmed", &state.confirmed)
      .field("phase", &state.phase)
      .finish()
  }
}

async fn send_quantity(ctx: CartContext, state: Arc<Mutex<ItemState>>, kind: ItemKind, id: String, quantity: u32) {
  if state.lock().removed {
    return;
  }

  let result = {
    let _busy = ctx.loading.begin();
    ctx.api.update_quantity(kind, &id, quantity).await
  };

  match result {
    Ok(_) => {
      let mut state = state.lock();
      state.confirmed = quantity;
      // A newer value may already be waiting for its own quiet window.
      if state.displayed == quantity {
        state.phase = ItemPhase::Reconciled;
      }
      drop(state);
      tracing::info!(%kind, %id, quantity, "Quantity update confirmed.");
    }
    Err(err) => {
      let mut state = state.lock();
      if state.displayed == quantity {
        state.displayed = state.confirmed;
        state.phase = ItemPhase::Reverted;
      }
      drop(state);
      tracing::error!(%kind, %id, quantity, error = %err, "Quantity update failed, reverting.");
      ctx.notifier.error(&err.user_message());
    }
  }
  ctx.cache.apply(Mutation::CartChanged);
}

/// Controller for a service line, whose only editable field is the
/// description.
pub struct ServiceItemController {
  id: String,
  ctx: CartContext,
  description: Mutex<String>,
  removed: Mutex<bool>,
}

impl ServiceItemController {
  pub fn new(ctx: CartContext, id: impl Into<String>, description: impl Into<String>) -> Self {
    ServiceItemController {
      id: id.into(),
      ctx,
      description: Mutex::new(description.into()),
      removed: Mutex::new(false),
    }
  }

  pub fn for_item(ctx: CartContext, item: &ServiceCartItem) -> Self {
    Self::new(ctx, item.id.clone(), item.description.clone())
  }

  pub fn id(&self) -> &str {
    &self.id
  }

  /// The last description the server accepted.
  pub fn description(&self) -> String {
    self.description.lock().clone()
  }

  pub fn is_removed(&self) -> bool {
    *self.removed.lock()
  }

  /// Sends `text` unless it equals the current description. Returns whether
  /// a request was made.
  pub async fn update_description(&self, text: &str) -> Result<bool> {
    if *self.description.lock() == text {
      return Ok(false);
    }

    let result = {
      let _busy = self.ctx.loading.begin();
      self.ctx.api.update_description(&self.id, text).await
    };

    match result {
      Ok(reply) => {
        *self.description.lock() = text.to_string();
        self.ctx.cache.apply(Mutation::CartChanged);
        self.ctx.notifier.success(reply.message_or("Service item updated"));
        tracing::info!(id = %self.id, "Service description updated.");
        Ok(true)
      }
      Err(err) => {
        tracing::error!(id = %self.id, error = %err, "Service description update failed.");
        self.ctx.notifier.error(&err.user_message());
        Err(err)
      }
    }
  }

  pub async fn remove(&self) -> Result<()> {
    let result = {
      let _busy = self.ctx.loading.begin();
      self.ctx.api.remove_item(ItemKind::Service, &self.id).await
    };
    self.ctx.cache.apply(Mutation::CartChanged);

    match result {
      Ok(reply) => {
        *self.removed.lock() = true;
        self.ctx.notifier.success(reply.message_or("Item removed"));
        tracing::info!(id = %self.id, "Service line removed.");
        Ok(())
      }
      Err(err) => {
        tracing::error!(id = %self.id, error = %err, "Service line removal failed.");
        self.ctx.notifier.error(&err.user_message());
        Err(err)
      }
    }
  }
}

impl std::fmt::Debug for ServiceItemController {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ServiceItemController")
      .field("id", &self.id)
      .field("description_len", &self.description.lock().len())
      .finish()
  }
}
