// tests/pricing_tests.rs
mod common;

use chrono::{Duration, TimeZone, Utc};
use common::*;
use proptest::prelude::*;
use storefront::cart::{CartSummary, Total, PRICING_APPROVAL_NOTICE};
use storefront::models::{Cart, OrderedProduct, OrderedProductRequest, OrderedService, Payment};
use storefront::pricing::PriceInfo;
use storefront::{effective_price, Money, OrderSummary};

// --- Effective price ---

proptest! {
  #[test]
  fn effective_price_is_none_only_without_a_fixed_price(
    price in proptest::option::of(0i64..1_000_000),
    discount in 0i64..2_000_000,
    expires_in in proptest::option::of(-86_400i64..86_400),
  ) {
    let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
    let info = PriceInfo {
      price: price.map(Money::from_minor),
      discount: Money::from_minor(discount),
      expires_at: expires_in.map(|s| now + Duration::seconds(s)),
    };
    let result = effective_price(&info, now);
    let has_fixed_price = price.is_some_and(|p| p > 0);
    prop_assert_eq!(result.is_none(), !has_fixed_price);

    if let (Some(result), Some(base)) = (result, price) {
      prop_assert!(result >= Money::ZERO);
      prop_assert!(result <= Money::from_minor(base));
    }
  }

  #[test]
  fn discount_applies_only_before_expiry(
    price in 1i64..1_000_000,
    discount in 1i64..1_000_000,
    offset in 1i64..86_400,
  ) {
    let now = Utc::now();
    let live = PriceInfo { price: Some(Money::from_minor(price)), discount: Money::from_minor(discount), expires_at: Some(now + Duration::seconds(offset)) };
    let expired = PriceInfo { expires_at: Some(now - Duration::seconds(offset)), ..live };

    prop_assert_eq!(effective_price(&live, now), Some(Money::from_minor((price - discount).max(0))));
    prop_assert_eq!(effective_price(&expired, now), Some(Money::from_minor(price)));
  }
}

#[test]
fn discount_stops_the_moment_it_expires() {
  let expires_at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
  let p = discounted_product("kettle", 1200, 200, expires_at);
  assert_eq!(effective_price(&p, expires_at - Duration::seconds(1)), Some(Money::taka(1000)));
  assert_eq!(effective_price(&p, expires_at), Some(Money::taka(1200)));
}

// --- Cart summary ---

#[test]
fn priced_products_sum_to_an_amount() {
  let cart = cart_of(vec![product_item("a", Some(100), 2), product_item("b", Some(50), 1)]);
  let summary = CartSummary::compute(&cart, Utc::now());

  assert_eq!(summary.total, Total::Amount(Money::taka(250)));
  assert!(summary.all_products_priced);
  assert!(!summary.needs_pricing_approval());
  assert_eq!(summary.total_label(), "৳250");
  assert_eq!(summary.item_count(), 2);
  assert!(summary.can_checkout());
}

#[test]
fn an_unpriced_product_requires_a_quote() {
  let cart = cart_of(vec![product_item("a", Some(100), 2), product_item("b", None, 1)]);
  let summary = CartSummary::compute(&cart, Utc::now());

  assert_eq!(summary.total, Total::QuoteRequired);
  assert_eq!(summary.product_total, Money::taka(200), "the partial total is still tracked");
  assert!(!summary.all_products_priced);
  assert!(summary.needs_pricing_approval());
  assert_eq!(summary.total_label(), "Quote Required");
  assert!(!PRICING_APPROVAL_NOTICE.is_empty());
}

#[test]
fn zero_priced_products_count_as_unpriced() {
  let cart = cart_of(vec![product_item("free", Some(0), 3)]);
  assert_eq!(CartSummary::compute(&cart, Utc::now()).total, Total::QuoteRequired);
}

#[test]
fn services_and_product_requests_always_require_a_quote() {
  let now = Utc::now();
  let with_service = Cart { service_items: vec![service_item("sv", "")], ..cart_of(vec![product_item("a", Some(10), 1)]) };
  let summary = CartSummary::compute(&with_service, now);
  assert!(summary.services_require_quote);
  assert_eq!(summary.total, Total::QuoteRequired);

  let with_request = Cart { product_requests: vec![product_request_item("pr", 1)], ..Cart::default() };
  let summary = CartSummary::compute(&with_request, now);
  assert!(summary.product_requests_require_quote);
  assert_eq!(summary.total, Total::QuoteRequired);
}

#[test]
fn live_discounts_are_reflected_in_the_total() {
  let now = Utc::now();
  let mut item = product_item("a", Some(100), 3);
  item.product = discounted_product("a", 100, 25, now + Duration::hours(1));
  let summary = CartSummary::compute(&cart_of(vec![item.clone()]), now);
  assert_eq!(summary.total.amount(), Some(Money::taka(225)));

  let later = now + Duration::hours(2);
  let summary = CartSummary::compute(&cart_of(vec![item]), later);
  assert_eq!(summary.total.amount(), Some(Money::taka(300)));
}

#[test]
fn summary_lines_hide_empty_product_requests() {
  let cart = cart_of(vec![product_item("a", Some(40), 1)]);
  let lines = CartSummary::compute(&cart, Utc::now()).lines();
  let labels: Vec<_> = lines.iter().map(|l| l.label).collect();
  assert_eq!(labels, vec!["Products", "Services"]);
  assert_eq!(lines[0].to_string(), "Products (1): ৳40");

  let cart = Cart { product_requests: vec![product_request_item("pr", 2)], ..cart };
  let lines = CartSummary::compute(&cart, Utc::now()).lines();
  assert_eq!(lines.len(), 3);
  assert_eq!(lines[2].subtotal, Total::QuoteRequired);
}

#[test]
fn empty_cart_cannot_check_out() {
  let summary = CartSummary::compute(&Cart::default(), Utc::now());
  assert!(summary.is_empty());
  assert!(!summary.can_checkout());
  assert_eq!(summary.total, Total::Amount(Money::ZERO));
}

proptest! {
  #[test]
  fn summary_does_not_depend_on_line_order(
    lines in proptest::collection::vec((proptest::option::of(0i64..10_000), 1u32..20), 0..12),
    seed in any::<u64>(),
  ) {
    let now = Utc::now();
    let items: Vec<_> = lines
      .iter()
      .enumerate()
      .map(|(i, (price, qty))| product_item(&format!("l{i}"), *price, *qty))
      .collect();

    let mut shuffled = items.clone();
    // Deterministic rotation plus reversal stands in for a shuffle.
    if !shuffled.is_empty() {
      let by = (seed as usize) % shuffled.len();
      shuffled.rotate_left(by);
    }
    if seed % 2 == 0 {
      shuffled.reverse();
    }

    let forward = CartSummary::compute(&cart_of(items), now);
    let reordered = CartSummary::compute(&cart_of(shuffled), now);
    prop_assert_eq!(forward, reordered);
  }
}

// --- Order summary ---

fn ordered_product(id: &str, price: Option<i64>, quantity: u32) -> OrderedProduct {
  OrderedProduct { id: id.into(), quantity, price: price.map(Money::taka), product: None }
}

#[test]
fn order_total_due_subtracts_payments() {
  let mut placed = order("ord-1");
  placed.product_items = vec![ordered_product("a", Some(100), 2)];
  placed.service_items = vec![OrderedService { id: "s".into(), price: Some(Money::taka(300)), description: String::new(), service: None }];
  placed.product_requests =
    vec![OrderedProductRequest { id: "r".into(), title: "Shelf".into(), quantity: 2, price: Some(Money::taka(50)) }];
  placed.payments = vec![Payment { id: "pay-1".into(), amount: Money::taka(150), created_at: None }];

  let summary = OrderSummary::compute(&placed);
  assert_eq!(summary.product_total, Money::taka(200));
  assert_eq!(summary.service_total, Money::taka(300));
  assert_eq!(summary.product_request_total, Money::taka(100));
  assert_eq!(summary.paid, Money::taka(150));
  assert_eq!(summary.total_due, Some(Money::taka(450)));
  assert!(summary.is_fully_priced());
}

#[test]
fn order_with_an_unpriced_line_has_no_total_due() {
  let mut placed = order("ord-2");
  placed.product_items = vec![ordered_product("a", Some(100), 1), ordered_product("b", Some(0), 1)];
  let summary = OrderSummary::compute(&placed);
  assert!(!summary.all_products_priced);
  assert_eq!(summary.total_due, None);
}
