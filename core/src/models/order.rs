// storefront/src/models/order.rs

use crate::models::catalog::{Product, Service};
use crate::models::customer::Customer;
use crate::money::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
  Pending,
  InProgress,
  PartiallyDone,
  Completed,
  Cancelled,
  Rejected,
}

impl OrderStatus {
  pub fn as_str(self) -> &'static str {
    match self {
      OrderStatus::Pending => "PENDING",
      OrderStatus::InProgress => "IN_PROGRESS",
      OrderStatus::PartiallyDone => "PARTIALLY_DONE",
      OrderStatus::Completed => "COMPLETED",
      OrderStatus::Cancelled => "CANCELLED",
      OrderStatus::Rejected => "REJECTED",
    }
  }

  /// No further work happens on the order.
  pub fn is_terminal(self) -> bool {
    matches!(self, OrderStatus::Completed | OrderStatus::Cancelled | OrderStatus::Rejected)
  }
}

impl fmt::Display for OrderStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Delivery details posted to `POST /orders`. The cart contents are
/// associated server-side and are not part of the payload.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OrderInfo {
  pub phone: String,
  pub address: String,
  pub thana: String,
  pub district: String,
}

impl OrderInfo {
  /// Form defaults taken from the signed-in customer's profile.
  pub fn prefilled(customer: Option<&Customer>) -> Self {
    let field = |value: Option<&String>| value.cloned().unwrap_or_default();
    match customer {
      Some(c) => OrderInfo {
        phone: field(c.phone.as_ref()),
        address: field(c.address.as_ref()),
        thana: field(c.thana.as_ref()),
        district: field(c.district.as_ref()),
      },
      None => OrderInfo::default(),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemCounts {
  #[serde(default)]
  pub product_items: u32,
  #[serde(default)]
  pub service_items: u32,
  #[serde(default)]
  pub product_requests: u32,
}

/// A row of `GET /orders`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderListing {
  pub id: String,
  pub status: OrderStatus,
  pub created_at: DateTime<Utc>,
  #[serde(rename = "_count", default)]
  pub counts: OrderItemCounts,
}

fn first_page() -> u32 {
  1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPage {
  #[serde(default)]
  pub orders: Vec<OrderListing>,
  #[serde(default = "first_page")]
  pub current_page: u32,
  #[serde(default = "first_page")]
  pub total_pages: u32,
}

impl OrderPage {
  pub fn has_more_pages(&self) -> bool {
    self.total_pages > 1
  }
}

/// Product line of a placed order. The price is the one captured on the
/// order, not the live catalog price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderedProduct {
  pub id: String,
  pub quantity: u32,
  #[serde(default)]
  pub price: Option<Money>,
  #[serde(default)]
  pub product: Option<Product>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderedService {
  pub id: String,
  #[serde(default)]
  pub price: Option<Money>,
  #[serde(default)]
  pub description: String,
  #[serde(default)]
  pub service: Option<Service>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderedProductRequest {
  pub id: String,
  pub title: String,
  pub quantity: u32,
  #[serde(default)]
  pub price: Option<Money>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
  pub id: String,
  pub amount: Money,
  #[serde(default, alias = "updatedAt")]
  pub created_at: Option<DateTime<Utc>>,
}

/// `GET /orders/:id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetails {
  pub id: String,
  pub status: OrderStatus,
  pub created_at: DateTime<Utc>,
  #[serde(default)]
  pub product_items: Vec<OrderedProduct>,
  #[serde(default)]
  pub service_items: Vec<OrderedService>,
  #[serde(default)]
  pub product_requests: Vec<OrderedProductRequest>,
  #[serde(default)]
  pub payments: Vec<Payment>,
}
