// storefront/src/cart/service.rs

use crate::api::ApiReply;
use crate::cache::{CacheKey, CacheScope};
use crate::cart::controller::{CartItemController, CounterBounds, ServiceItemController};
use crate::cart::summary::CartSummary;
use crate::cart::CartContext;
use crate::error::{Result, StorefrontError, LOGIN_REQUIRED_MESSAGE};
use crate::models::{AddToCartRequest, Cart, CartItem, ItemKind};
use crate::session::{LoginRedirect, SharedSession};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// An "add to cart" click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddToCart {
  pub kind: ItemKind,
  pub item_id: String,
  /// Catalog slug, used to come back to the item after login.
  pub slug: String,
  pub quantity: Option<u32>,
  /// Only sent for services.
  pub description: Option<String>,
}

impl AddToCart {
  pub fn new(kind: ItemKind, item_id: impl Into<String>, slug: impl Into<String>) -> Self {
    AddToCart { kind, item_id: item_id.into(), slug: slug.into(), quantity: Some(1), description: None }
  }

  pub fn quantity(mut self, quantity: u32) -> Self {
    self.quantity = Some(quantity);
    self
  }

  pub fn description(mut self, description: impl Into<String>) -> Self {
    self.description = Some(description.into());
    self
  }

  fn into_request(self) -> AddToCartRequest {
    let description = match self.kind {
      ItemKind::Service => self.description,
      ItemKind::Product | ItemKind::ProductRequest => None,
    };
    AddToCartRequest { kind: self.kind, item_id: self.item_id, quantity: self.quantity, description }
  }
}

/// Label of the add-to-cart button.
pub fn add_button_label(kind: ItemKind, adding: bool) -> &'static str {
  match (adding, kind) {
    (true, _) => "ADDING...",
    (false, ItemKind::Service) => "Book Now",
    (false, _) => "ADD TO CART",
  }
}

#[derive(Debug, Clone)]
pub struct CartService {
  ctx: CartContext,
  session: SharedSession,
}

impl CartService {
  pub fn new(ctx: CartContext, session: SharedSession) -> Self {
    CartService { ctx, session }
  }

  pub fn context(&self) -> &CartContext {
    &self.ctx
  }

  pub fn is_loading(&self) -> bool {
    self.ctx.loading.is_loading()
  }

  /// The cart, from cache when fresh.
  pub async fn cart(&self) -> Result<Cart> {
    let api = Arc::clone(&self.ctx.api);
    self.ctx.cache.get_or_fetch(CacheKey::CartInfo, || async move { api.fetch_cart().await }).await
  }

  /// Drops the cached cart and fetches it again.
  pub async fn refresh(&self) -> Result<Cart> {
    self.ctx.cache.invalidate(CacheScope::Cart);
    self.cart().await
  }

  pub async fn summary(&self, now: DateTime<Utc>) -> Result<CartSummary> {
    Ok(CartSummary::compute(&self.cart().await?, now))
  }

  /// Adds an item. Anonymous shoppers get [`StorefrontError::Unauthenticated`]
  /// carrying the login route to resume from; nothing is sent.
  ///
  /// The returned cart replaces the cached one instead of invalidating it.
  pub async fn add_to_cart(&self, item: AddToCart) -> Result<ApiReply<Cart>> {
    if !self.session.is_authenticated() {
      let redirect = LoginRedirect { item_type: item.kind, slug: item.slug.clone() };
      tracing::info!(redirect = %redirect.path(), "Add to cart requires login.");
      self.ctx.notifier.error(LOGIN_REQUIRED_MESSAGE);
      return Err(StorefrontError::Unauthenticated(redirect));
    }

    let request = item.into_request();
    let result = {
      let _busy = self.ctx.loading.begin();
      self.ctx.api.add_item(&request).await
    };

    match result {
      Ok(reply) => {
        self.ctx.cache.set(CacheKey::CartInfo, reply.data.clone());
        self.ctx.notifier.success(reply.message_or("Added to cart"));
        tracing::info!(kind = %request.kind, item_id = %request.item_id, "Item added to cart.");
        Ok(reply)
      }
      Err(err) => {
        tracing::error!(kind = %request.kind, item_id = %request.item_id, error = %err, "Add to cart failed.");
        self.ctx.notifier.error(&err.user_message());
        Err(err)
      }
    }
  }

  /// One controller per product and product-request line, in display order.
  pub fn item_controllers(&self, cart: &Cart) -> Vec<CartItemController> {
    cart
      .items()
      .filter(|item| item.kind().has_quantity())
      .filter_map(|item| CartItemController::for_item(self.ctx.clone(), &item).ok())
      .collect()
  }

  pub fn item_controller(&self, cart: &Cart, kind: ItemKind, id: &str) -> Option<CartItemController> {
    match cart.find(kind, id)? {
      CartItem::Service(_) => None,
      item => CartItemController::new(self.ctx.clone(), kind, id, item.quantity()?, CounterBounds::default()).ok(),
    }
  }

  pub fn service_controllers(&self, cart: &Cart) -> Vec<ServiceItemController> {
    cart.service_items.iter().map(|item| ServiceItemController::for_item(self.ctx.clone(), item)).collect()
  }

  pub fn service_controller(&self, cart: &Cart, id: &str) -> Option<ServiceItemController> {
    let item = cart.service_items.iter().find(|item| item.id == id)?;
    Some(ServiceItemController::for_item(self.ctx.clone(), item))
  }
}
