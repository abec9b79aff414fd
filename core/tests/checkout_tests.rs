// tests/checkout_tests.rs
mod common;

use chrono::Utc;
use common::*;
use std::sync::Arc;
use storefront::checkout::{ORDERS_ROUTE, ORDER_SUBMITTED_MESSAGE};
use storefront::models::Cart;
use storefront::notify::NoticeLevel;
use storefront::{CacheKey, CartSummary, Checkout, CheckoutPhase, CollectingNotifier, QueryCache, StorefrontError};

struct Setup {
  api: Arc<FakeApi>,
  cache: QueryCache,
  notifier: CollectingNotifier,
  checkout: Checkout,
}

fn setup(cart: Cart) -> Setup {
  setup_tracing();
  let api = FakeApi::with_cart(cart.clone());
  let cache = QueryCache::new();
  cache.set(CacheKey::CartInfo, cart);
  cache.set(CacheKey::Orders { page: 1, limit: 10 }, Vec::<String>::new());
  let notifier = CollectingNotifier::new();
  let checkout = Checkout::new(api.clone(), cache.clone(), Arc::new(notifier.clone()), Some(&customer())).unwrap();
  Setup { api, cache, notifier, checkout }
}

fn summary_of(cart: &Cart) -> CartSummary {
  CartSummary::compute(cart, Utc::now())
}

fn filled_cart() -> Cart {
  cart_of(vec![product_item("ci-1", Some(100), 2)])
}

#[tokio::test]
async fn form_is_prefilled_from_the_customer() {
  let s = setup(filled_cart());
  let form = s.checkout.form();
  assert_eq!(form.phone, "01812345678");
  assert_eq!(form.thana, "Gulshan");
  assert_eq!(s.checkout.phase(), CheckoutPhase::Editing);
  assert_eq!(s.checkout.submit_label(), "Confirm Order");
}

#[tokio::test]
async fn successful_submission_routes_to_orders_and_invalidates() {
  let cart = filled_cart();
  let s = setup(cart.clone());

  let outcome = s.checkout.submit(&summary_of(&cart)).await.expect("order placed");

  assert_eq!(outcome.route, ORDERS_ROUTE);
  assert_eq!(outcome.message, ORDER_SUBMITTED_MESSAGE);
  assert_eq!(s.checkout.phase(), CheckoutPhase::Submitted);
  assert_eq!(s.api.count(|c| matches!(c, ApiCall::CreateOrder(_))), 1);
  assert!(!s.cache.is_fresh(&CacheKey::CartInfo));
  assert!(!s.cache.is_fresh(&CacheKey::Orders { page: 1, limit: 10 }));
  assert!(s.api.server_cart().is_empty());

  let last = s.notifier.last().unwrap();
  assert_eq!(last.level, NoticeLevel::Success);
  assert_eq!(last.message, ORDER_SUBMITTED_MESSAGE);
}

#[tokio::test]
async fn submitted_order_cannot_be_resubmitted_or_edited() {
  let cart = filled_cart();
  let s = setup(cart.clone());
  s.checkout.submit(&summary_of(&cart)).await.unwrap();

  let err = s.checkout.submit(&summary_of(&cart)).await.unwrap_err();
  assert!(matches!(err, StorefrontError::Internal(_)));
  assert!(!s.checkout.edit(|info| info.phone = "01999999999".into()));
  assert_eq!(s.api.count(|c| matches!(c, ApiCall::CreateOrder(_))), 1);
}

#[tokio::test]
async fn invalid_form_sends_nothing_and_stays_quiet() {
  let cart = filled_cart();
  let s = setup(cart.clone());
  assert!(s.checkout.edit(|info| {
    info.phone = "555".into();
    info.address = "short".into();
  }));

  let err = s.checkout.submit(&summary_of(&cart)).await.unwrap_err();
  let errors = err.validation_errors().expect("validation failure");
  assert!(errors.get("phone").is_some());
  assert_eq!(errors.get("address"), Some("Delivery Address must be at least 10 characters."));

  assert!(s.api.calls().is_empty());
  assert!(s.notifier.notices().is_empty());
  assert_eq!(s.checkout.phase(), CheckoutPhase::Editing);
  assert!(s.cache.is_fresh(&CacheKey::CartInfo));
}

#[tokio::test]
async fn server_rejection_returns_to_editing_with_values_kept() {
  let cart = filled_cart();
  let s = setup(cart.clone());
  s.api.fail_next(400, Some("Delivery is not available in this area"));
  s.checkout.edit(|info| info.district = "Bandarban".into());

  let err = s.checkout.submit(&summary_of(&cart)).await.unwrap_err();

  assert_eq!(err.status(), Some(400));
  assert_eq!(s.checkout.phase(), CheckoutPhase::Editing);
  assert_eq!(s.checkout.form().district, "Bandarban");
  assert_eq!(s.notifier.errors(), vec!["Delivery is not available in this area".to_string()]);
  assert!(s.cache.is_fresh(&CacheKey::CartInfo), "nothing invalidated when the order was not placed");
  assert!(s.checkout.can_submit(&summary_of(&cart)));

  // A retry goes through.
  s.checkout.submit(&summary_of(&cart)).await.unwrap();
  assert_eq!(s.checkout.phase(), CheckoutPhase::Submitted);
}

#[tokio::test]
async fn empty_cart_is_refused_before_any_request() {
  let s = setup(Cart::default());
  let summary = summary_of(&Cart::default());
  assert!(!s.checkout.can_submit(&summary));

  let err = s.checkout.submit(&summary).await.unwrap_err();
  assert!(matches!(err, StorefrontError::EmptyCart));
  assert!(s.api.calls().is_empty());
  assert_eq!(s.notifier.errors(), vec!["Your cart is empty".to_string()]);
}

#[tokio::test]
async fn quote_required_carts_can_still_check_out() {
  let cart = cart_of(vec![product_item("ci-1", None, 1)]);
  let s = setup(cart.clone());
  let summary = summary_of(&cart);
  assert!(summary.needs_pricing_approval());
  assert!(s.checkout.can_submit(&summary));
  s.checkout.submit(&summary).await.unwrap();
}
