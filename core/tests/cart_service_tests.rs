// tests/cart_service_tests.rs
mod common;

use chrono::Utc;
use common::*;
use storefront::cart::{add_button_label, AddToCart, CartService, Total};
use storefront::error::LOGIN_REQUIRED_MESSAGE;
use storefront::models::{AddToCartRequest, Cart, ItemKind};
use storefront::{CacheKey, Money, OrderService, Session, SharedSession, StorefrontError};

fn signed_in() -> SharedSession {
  SharedSession::new(Session::authenticated("token-1"))
}

#[tokio::test]
async fn anonymous_add_redirects_to_login_without_a_request() {
  setup_tracing();
  let h = harness(FakeApi::with_cart(Cart::default()));
  let service = CartService::new(h.ctx.clone(), SharedSession::default());

  let err = service.add_to_cart(AddToCart::new(ItemKind::Product, "p-1", "rice-cooker")).await.unwrap_err();

  match &err {
    StorefrontError::Unauthenticated(redirect) => {
      assert_eq!(redirect.path(), "/login?type=product&slug=rice-cooker");
    }
    other => panic!("expected a login redirect, got {other:?}"),
  }
  assert!(h.api.calls().is_empty());
  assert_eq!(h.notifier.errors(), vec![LOGIN_REQUIRED_MESSAGE.to_string()]);
}

#[tokio::test]
async fn added_item_replaces_the_cached_cart() {
  setup_tracing();
  let h = harness(FakeApi::with_cart(Cart::default()));
  let service = CartService::new(h.ctx.clone(), signed_in());
  assert!(service.cart().await.unwrap().is_empty());

  let reply = service.add_to_cart(AddToCart::new(ItemKind::Product, "p-7", "kettle").quantity(3)).await.unwrap();

  assert_eq!(reply.data.product_items[0].quantity, 3);
  assert!(h.cache.is_fresh(&CacheKey::CartInfo));
  let cached = service.cart().await.unwrap();
  assert_eq!(cached.item_count(), 1);
  assert_eq!(h.api.count(|c| *c == ApiCall::FetchCart), 1, "served from the seeded cache");
  assert_eq!(h.notifier.last().map(|n| n.message), Some("Added to cart".to_string()));
  assert!(!service.is_loading());
}

#[tokio::test]
async fn description_is_only_sent_for_services() {
  let h = harness(FakeApi::with_cart(Cart::default()));
  let service = CartService::new(h.ctx.clone(), signed_in());

  service
    .add_to_cart(AddToCart::new(ItemKind::Product, "p-1", "fan").description("ignored"))
    .await
    .unwrap();
  service
    .add_to_cart(AddToCart::new(ItemKind::Service, "s-1", "ac-repair").description("Saturday morning"))
    .await
    .unwrap();

  let requests: Vec<AddToCartRequest> = h
    .api
    .calls()
    .into_iter()
    .filter_map(|c| match c {
      ApiCall::AddItem(request) => Some(request),
      _ => None,
    })
    .collect();
  assert_eq!(requests[0].description, None);
  assert_eq!(requests[1].description.as_deref(), Some("Saturday morning"));
  assert_eq!(h.api.server_cart().service_items[0].description, "Saturday morning");
}

#[tokio::test]
async fn failed_add_notifies_and_keeps_the_cache() {
  let h = harness(FakeApi::with_cart(Cart::default()));
  h.cache.set(CacheKey::CartInfo, Cart::default());
  h.api.fail_next(422, Some("Out of stock"));
  let service = CartService::new(h.ctx.clone(), signed_in());

  let err = service.add_to_cart(AddToCart::new(ItemKind::Product, "p-1", "fan")).await.unwrap_err();
  assert_eq!(err.user_message(), "Out of stock");
  assert_eq!(h.notifier.errors(), vec!["Out of stock".to_string()]);
  assert_eq!(h.cache.get::<Cart>(&CacheKey::CartInfo), Some(Cart::default()));
}

#[tokio::test]
async fn summary_and_refresh_follow_the_server() {
  let h = harness(FakeApi::with_cart(cart_of(vec![product_item("ci-1", Some(100), 2)])));
  let service = CartService::new(h.ctx.clone(), signed_in());

  let summary = service.summary(Utc::now()).await.unwrap();
  assert_eq!(summary.total, Total::Amount(Money::taka(200)));

  service.refresh().await.unwrap();
  assert_eq!(h.api.count(|c| *c == ApiCall::FetchCart), 2);
}

#[test]
fn button_labels() {
  assert_eq!(add_button_label(ItemKind::Product, false), "ADD TO CART");
  assert_eq!(add_button_label(ItemKind::Service, false), "Book Now");
  assert_eq!(add_button_label(ItemKind::Service, true), "ADDING...");
}

// --- Orders ---

#[tokio::test]
async fn order_pages_and_details_are_cached() {
  let api = FakeApi::with_orders((1..=12).map(|i| order(&format!("ord-{i}"))).collect());
  let cache = storefront::QueryCache::new();
  let orders = OrderService::new(api.clone(), cache.clone());

  let first = orders.list(1, 10).await.unwrap();
  assert_eq!(first.orders.len(), 10);
  assert_eq!(first.total_pages, 2);
  assert!(first.has_more_pages());
  let second = orders.list(2, 10).await.unwrap();
  assert_eq!(second.orders.len(), 2);

  orders.list(1, 10).await.unwrap();
  assert_eq!(api.count(|c| matches!(c, ApiCall::ListOrders { .. })), 2);

  let (details, summary) = orders.summary("ord-3").await.unwrap();
  assert_eq!(details.id, "ord-3");
  assert_eq!(summary.total_due, Some(Money::ZERO));
  orders.details("ord-3").await.unwrap();
  assert_eq!(api.count(|c| matches!(c, ApiCall::GetOrder(_))), 1);

  cache.apply(storefront::Mutation::OrderPlaced);
  orders.list(1, 10).await.unwrap();
  assert_eq!(api.count(|c| matches!(c, ApiCall::ListOrders { .. })), 3);
}

#[tokio::test]
async fn page_zero_is_treated_as_the_first_page() {
  let api = FakeApi::with_orders(vec![order("ord-1")]);
  let orders = OrderService::new(api.clone(), storefront::QueryCache::new());
  orders.list(0, 10).await.unwrap();
  assert_eq!(api.calls(), vec![ApiCall::ListOrders { page: 1, limit: 10 }]);
}

#[tokio::test]
async fn unknown_order_surfaces_the_server_message() {
  let api = FakeApi::with_orders(vec![]);
  let orders = OrderService::new(api, storefront::QueryCache::new());
  let err = orders.details("missing").await.unwrap_err();
  assert_eq!(err.status(), Some(404));
  assert_eq!(err.user_message(), "Order not found");
}
