// storefront/examples/offline_cart.rs

//! Walks a cart through debounced quantity edits and checkout against an
//! in-memory backend. Run with `RUST_LOG=debug` to see each step.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use storefront::cart::{CartContext, CartService};
use storefront::models::{
  AddToCartRequest, Cart, ItemKind, OrderDetails, OrderInfo, OrderPage, OrderStatus, Product, ProductCartItem,
};
use storefront::{
  ApiReply, CartApi, CartSummary, Checkout, OrderApi, QueryCache, Session, SharedSession, StorefrontError,
  TracingNotifier,
};
use tracing::info;

#[derive(Default)]
struct MemoryBackend {
  cart: Mutex<Cart>,
  orders: Mutex<Vec<OrderDetails>>,
}

fn not_found(endpoint: String) -> StorefrontError {
  StorefrontError::Api { endpoint, status: 404, message: Some("Cart item not found".into()) }
}

#[async_trait]
impl CartApi for MemoryBackend {
  async fn fetch_cart(&self) -> storefront::Result<Cart> {
    Ok(self.cart.lock().clone())
  }

  async fn add_item(&self, request: &AddToCartRequest) -> storefront::Result<ApiReply<Cart>> {
    let mut cart = self.cart.lock();
    let id = format!("ci-{}", cart.item_count() + 1);
    cart.product_items.push(ProductCartItem {
      id,
      quantity: request.quantity.unwrap_or(1),
      product: Product {
        id: request.item_id.clone(),
        title: "Electric kettle".into(),
        slug: "electric-kettle".into(),
        price: Some(storefront::Money::taka(1450)),
        discount: storefront::Money::taka(150),
        expires_at: Some(Utc::now() + chrono::Duration::days(2)),
        images: vec![],
      },
    });
    Ok(ApiReply { message: Some("Product added to cart".into()), data: cart.clone() })
  }

  async fn update_quantity(&self, kind: ItemKind, id: &str, quantity: u32) -> storefront::Result<ApiReply<()>> {
    let mut cart = self.cart.lock();
    let line = cart.product_items.iter_mut().find(|i| i.id == id).ok_or_else(|| not_found(format!("PUT /cart/{kind}/{id}")))?;
    line.quantity = quantity;
    Ok(ApiReply::new(()))
  }

  async fn update_description(&self, id: &str, _description: &str) -> storefront::Result<ApiReply<()>> {
    Err(not_found(format!("PUT /cart/service/{id}")))
  }

  async fn remove_item(&self, kind: ItemKind, id: &str) -> storefront::Result<ApiReply<()>> {
    let mut cart = self.cart.lock();
    let before = cart.item_count();
    cart.product_items.retain(|i| i.id != id);
    if cart.item_count() == before {
      return Err(not_found(format!("DELETE /cart/{kind}/{id}")));
    }
    Ok(ApiReply::new(()))
  }
}

#[async_trait]
impl OrderApi for MemoryBackend {
  async fn create_order(&self, _info: &OrderInfo) -> storefront::Result<ApiReply<()>> {
    std::mem::take(&mut *self.cart.lock());
    let mut orders = self.orders.lock();
    let id = format!("ord-{}", orders.len() + 1);
    orders.push(OrderDetails {
      id,
      status: OrderStatus::Pending,
      created_at: Utc::now(),
      product_items: vec![],
      service_items: vec![],
      product_requests: vec![],
      payments: vec![],
    });
    Ok(ApiReply { message: Some("Order placed".into()), data: () })
  }

  async fn list_orders(&self, page: u32, _limit: u32) -> storefront::Result<OrderPage> {
    Ok(OrderPage { orders: vec![], current_page: page, total_pages: 1 })
  }

  async fn get_order(&self, id: &str) -> storefront::Result<OrderDetails> {
    self.orders.lock().iter().find(|o| o.id == id).cloned().ok_or_else(|| not_found(format!("GET /orders/{id}")))
  }
}

#[tokio::main]
async fn main() -> Result<(), StorefrontError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  let backend = Arc::new(MemoryBackend::default());
  let cache = QueryCache::new();
  let notifier = Arc::new(TracingNotifier);
  let ctx = CartContext::new(backend.clone(), cache.clone(), notifier.clone()).with_quiet_window(Duration::from_millis(200));
  let carts = CartService::new(ctx, SharedSession::new(Session::authenticated("offline")));

  carts.add_to_cart(storefront::AddToCart::new(ItemKind::Product, "p-kettle", "electric-kettle")).await?;

  let cart = carts.cart().await?;
  let Some(line) = carts.item_controller(&cart, ItemKind::Product, "ci-1") else {
    return Err(StorefrontError::Internal("added line missing from cart".into()));
  };

  // Three quick taps, one request.
  for _ in 0..3 {
    line.increment();
  }
  info!(displayed = line.quantity(), "Quantity changed locally.");
  tokio::time::sleep(Duration::from_millis(400)).await;
  info!(confirmed = line.confirmed_quantity(), phase = ?line.phase(), "Quantity reconciled.");

  let summary = CartSummary::compute(&carts.cart().await?, Utc::now());
  for row in summary.lines() {
    info!("{row}");
  }
  info!(total = %summary.total_label(), "Cart total.");

  let info = OrderInfo {
    phone: "01712345678".into(),
    address: "House 9, Road 2, Uttara".into(),
    thana: "Uttara".into(),
    district: "Dhaka".into(),
  };
  let checkout = Checkout::new(backend, cache, notifier, None)?;
  checkout.edit(|form| *form = info);
  let outcome = checkout.submit(&summary).await?;
  info!(route = outcome.route, "Checkout finished.");
  Ok(())
}
