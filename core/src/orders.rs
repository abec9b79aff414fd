// storefront/src/orders.rs

//! Order history: cached reads of `GET /orders` and `GET /orders/:id`, and
//! the totals shown on an order's page.

use crate::api::OrderApi;
use crate::cache::{CacheKey, QueryCache};
use crate::error::Result;
use crate::models::{OrderDetails, OrderPage};
use crate::money::Money;
use std::sync::Arc;

/// Totals of a placed order, using the prices captured on the order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSummary {
  pub product_total: Money,
  pub service_total: Money,
  pub product_request_total: Money,
  pub all_products_priced: bool,
  pub all_services_priced: bool,
  pub all_product_requests_priced: bool,
  pub paid: Money,
  /// What is left to pay. Only known once every line has a price.
  pub total_due: Option<Money>,
}

fn priced(price: Option<Money>) -> Option<Money> {
  price.filter(|p| p.is_positive())
}

impl OrderSummary {
  pub fn compute(order: &OrderDetails) -> Self {
    let mut product_total = Money::ZERO;
    let mut all_products_priced = true;
    for item in &order.product_items {
      match priced(item.price) {
        Some(price) => product_total += price.times(item.quantity),
        None => all_products_priced = false,
      }
    }

    let mut service_total = Money::ZERO;
    let mut all_services_priced = true;
    for item in &order.service_items {
      match priced(item.price) {
        Some(price) => service_total += price,
        None => all_services_priced = false,
      }
    }

    let mut product_request_total = Money::ZERO;
    let mut all_product_requests_priced = true;
    for item in &order.product_requests {
      match priced(item.price) {
        Some(price) => product_request_total += price.times(item.quantity),
        None => all_product_requests_priced = false,
      }
    }

    let paid: Money = order.payments.iter().map(|p| p.amount).sum();
    let total_due = (all_products_priced && all_services_priced && all_product_requests_priced)
      .then(|| product_total + service_total + product_request_total - paid);

    OrderSummary {
      product_total,
      service_total,
      product_request_total,
      all_products_priced,
      all_services_priced,
      all_product_requests_priced,
      paid,
      total_due,
    }
  }

  pub fn is_fully_priced(&self) -> bool {
    self.total_due.is_some()
  }
}

#[derive(Clone)]
pub struct OrderService {
  api: Arc<dyn OrderApi>,
  cache: QueryCache,
}

impl std::fmt::Debug for OrderService {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("OrderService").field("cache", &self.cache).finish_non_exhaustive()
  }
}

impl OrderService {
  pub fn new(api: Arc<dyn OrderApi>, cache: QueryCache) -> Self {
    OrderService { api, cache }
  }

  /// One page of the order history. Pages are 1-based.
  pub async fn list(&self, page: u32, limit: u32) -> Result<OrderPage> {
    let (page, limit) = (page.max(1), limit.max(1));
    let api = Arc::clone(&self.api);
    self
      .cache
      .get_or_fetch(CacheKey::Orders { page, limit }, || async move { api.list_orders(page, limit).await })
      .await
  }

  pub async fn details(&self, id: &str) -> Result<OrderDetails> {
    let api = Arc::clone(&self.api);
    let owned_id = id.to_string();
    self
      .cache
      .get_or_fetch(CacheKey::OrderDetails(owned_id.clone()), || async move { api.get_order(&owned_id).await })
      .await
  }

  pub async fn summary(&self, id: &str) -> Result<(OrderDetails, OrderSummary)> {
    let order = self.details(id).await?;
    let summary = OrderSummary::compute(&order);
    Ok((order, summary))
  }
}
