// storefront/src/checkout.rs

//! Order submission.
//!
//! Checkout runs as a named-step flow:
//!
//! 1. `validate_order_info`: field checks, nothing sent on failure.
//! 2. `submit_order`: `POST /orders`. Its `before` handler moves the form to
//!    `Submitting`.
//! 3. `invalidate_cart`: the cart is gone server-side and the order list has
//!    grown.
//! 4. `route_to_orders`: records where to navigate.
//!
//! Any failure returns the form to `Editing` with its values intact.

use crate::api::OrderApi;
use crate::cache::{Mutation, QueryCache};
use crate::cart::CartSummary;
use crate::error::{Result, StorefrontError};
use crate::flow::{ContextData, FlowOutcome, Pipeline, StepControl};
use crate::models::{Customer, OrderInfo};
use crate::notify::Notifier;
use crate::validation::ValidationErrors;
use std::sync::Arc;

pub const ORDERS_ROUTE: &str = "/orders";
pub const ORDER_SUBMITTED_MESSAGE: &str = "Order submitted";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutPhase {
  Editing,
  Submitting,
  Submitted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutOutcome {
  /// Where to navigate next.
  pub route: &'static str,
  pub message: String,
}

/// The delivery form's rules.
pub fn validate_order_info(info: &OrderInfo) -> Result<(), ValidationErrors> {
  let mut errors = ValidationErrors::new();
  errors.require_phone("phone", &info.phone);
  errors.require_min_chars("address", &info.address, 10, "Delivery Address must be at least 10 characters.");
  errors.require_min_chars("thana", &info.thana, 3, "Thana must be at least 3 characters.");
  errors.require_min_chars("district", &info.district, 3, "District must be at least 3 characters.");
  errors.into_result()
}

#[derive(Debug, Clone)]
pub struct CheckoutState {
  pub info: OrderInfo,
  pub phase: CheckoutPhase,
  route: Option<&'static str>,
}

pub struct Checkout {
  state: ContextData<CheckoutState>,
  pipeline: Pipeline<CheckoutState, StorefrontError>,
  notifier: Arc<dyn Notifier>,
}

impl std::fmt::Debug for Checkout {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Checkout")
      .field("phase", &self.phase())
      .field("steps", &self.pipeline.step_names())
      .finish()
  }
}

impl Checkout {
  /// A checkout form prefilled from `customer`.
  pub fn new(
    orders: Arc<dyn OrderApi>,
    cache: QueryCache,
    notifier: Arc<dyn Notifier>,
    customer: Option<&Customer>,
  ) -> Result<Self> {
    let mut pipeline: Pipeline<CheckoutState, StorefrontError> = Pipeline::new(
      "checkout",
      &[
        ("validate_order_info", false),
        ("submit_order", false),
        ("invalidate_cart", false),
        ("route_to_orders", false),
      ],
    )?;

    pipeline.on("validate_order_info", |ctx: ContextData<CheckoutState>| async move {
      let info = ctx.read().info.clone();
      validate_order_info(&info)?;
      Ok::<_, StorefrontError>(StepControl::Continue)
    })?;

    pipeline.before("submit_order", |ctx: ContextData<CheckoutState>| async move {
      ctx.write().phase = CheckoutPhase::Submitting;
      Ok::<_, StorefrontError>(StepControl::Continue)
    })?;

    pipeline.on("submit_order", move |ctx: ContextData<CheckoutState>| {
      let orders = Arc::clone(&orders);
      async move {
        let info = ctx.read().info.clone();
        orders.create_order(&info).await?;
        Ok::<_, StorefrontError>(StepControl::Continue)
      }
    })?;

    pipeline.on("invalidate_cart", move |_ctx: ContextData<CheckoutState>| {
      let cache = cache.clone();
      async move {
        cache.apply(Mutation::OrderPlaced);
        Ok::<_, StorefrontError>(StepControl::Continue)
      }
    })?;

    pipeline.on("route_to_orders", |ctx: ContextData<CheckoutState>| async move {
      ctx.write().route = Some(ORDERS_ROUTE);
      Ok::<_, StorefrontError>(StepControl::Continue)
    })?;

    let state = ContextData::new(CheckoutState {
      info: OrderInfo::prefilled(customer),
      phase: CheckoutPhase::Editing,
      route: None,
    });
    Ok(Checkout { state, pipeline, notifier })
  }

  pub fn phase(&self) -> CheckoutPhase {
    self.state.read().phase
  }

  pub fn form(&self) -> OrderInfo {
    self.state.read().info.clone()
  }

  /// Edits the form. Ignored unless the form is being edited.
  pub fn edit(&self, f: impl FnOnce(&mut OrderInfo)) -> bool {
    self.state.with_mut(|state| {
      if state.phase != CheckoutPhase::Editing {
        return false;
      }
      f(&mut state.info);
      true
    })
  }

  pub fn can_submit(&self, cart: &CartSummary) -> bool {
    self.phase() == CheckoutPhase::Editing && cart.can_checkout()
  }

  pub fn submit_label(&self) -> &'static str {
    match self.phase() {
      CheckoutPhase::Submitting => "Confirming...",
      CheckoutPhase::Editing | CheckoutPhase::Submitted => "Confirm Order",
    }
  }

  /// Places the order for the current cart.
  ///
  /// Validation errors come back without a notification; the form shows
  /// them per field. Other failures are notified with the server's message.
  pub async fn submit(&self, cart: &CartSummary) -> Result<CheckoutOutcome> {
    match self.phase() {
      CheckoutPhase::Editing => {}
      CheckoutPhase::Submitting => {
        return Err(StorefrontError::Internal("An order submission is already in progress".into()));
      }
      CheckoutPhase::Submitted => {
        return Err(StorefrontError::Internal("This order has already been submitted".into()));
      }
    }
    if !cart.can_checkout() {
      self.notifier.error(&StorefrontError::EmptyCart.user_message());
      return Err(StorefrontError::EmptyCart);
    }

    let result = self.pipeline.run(self.state.clone()).await;
    match result {
      Ok(FlowOutcome::Completed) => {
        let route = self.state.with_mut(|state| {
          state.phase = CheckoutPhase::Submitted;
          state.route.unwrap_or(ORDERS_ROUTE)
        });
        self.notifier.success(ORDER_SUBMITTED_MESSAGE);
        tracing::info!(route, "Order submitted.");
        Ok(CheckoutOutcome { route, message: ORDER_SUBMITTED_MESSAGE.to_string() })
      }
      Ok(FlowOutcome::Halted) => {
        self.state.write().phase = CheckoutPhase::Editing;
        Err(StorefrontError::Internal("Checkout halted before the order was placed".into()))
      }
      Err(err) => {
        self.state.write().phase = CheckoutPhase::Editing;
        if err.validation_errors().is_none() {
          tracing::error!(error = %err, "Order submission failed.");
          self.notifier.error(&err.user_message());
        }
        Err(err)
      }
    }
  }
}
