// storefront/src/cart/summary.rs

//! Cart totals. Always derived from the cart and `now`, never stored.
//!
//! The total is a plain amount only when every line has a fixed price. Any
//! unpriced product, any service and any product request makes the whole
//! cart "Quote Required".

use crate::models::Cart;
use crate::money::{Money, TAKA_SIGN};
use crate::pricing::{effective_price, QUOTE_REQUIRED};
use chrono::{DateTime, Utc};
use std::fmt;

pub const PRICING_APPROVAL_NOTICE: &str = "Some items require pricing approval";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Total {
  Amount(Money),
  QuoteRequired,
}

impl Total {
  pub fn amount(self) -> Option<Money> {
    match self {
      Total::Amount(amount) => Some(amount),
      Total::QuoteRequired => None,
    }
  }

  pub fn is_quote_required(self) -> bool {
    matches!(self, Total::QuoteRequired)
  }
}

impl fmt::Display for Total {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Total::Amount(amount) => write!(f, "{TAKA_SIGN}{amount}"),
      Total::QuoteRequired => f.write_str(QUOTE_REQUIRED),
    }
  }
}

/// One row of the order summary box, e.g. `Products (3)  ৳1200`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryLine {
  pub label: &'static str,
  pub count: usize,
  pub subtotal: Total,
}

impl fmt::Display for CategoryLine {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} ({}): {}", self.label, self.count, self.subtotal)
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartSummary {
  /// Sum over product lines that have a price. Partial when some do not.
  pub product_total: Money,
  pub all_products_priced: bool,
  pub services_require_quote: bool,
  pub product_requests_require_quote: bool,
  pub product_count: usize,
  pub service_count: usize,
  pub product_request_count: usize,
  pub total: Total,
}

impl CartSummary {
  pub fn compute(cart: &Cart, now: DateTime<Utc>) -> Self {
    let mut product_total = Money::ZERO;
    let mut all_products_priced = true;

    for item in &cart.product_items {
      match effective_price(&item.product, now) {
        Some(price) => product_total += price.times(item.quantity),
        None => all_products_priced = false,
      }
    }

    let services_require_quote = !cart.service_items.is_empty();
    let product_requests_require_quote = !cart.product_requests.is_empty();
    let total = if all_products_priced && !services_require_quote && !product_requests_require_quote {
      Total::Amount(product_total)
    } else {
      Total::QuoteRequired
    };

    CartSummary {
      product_total,
      all_products_priced,
      services_require_quote,
      product_requests_require_quote,
      product_count: cart.product_items.len(),
      service_count: cart.service_items.len(),
      product_request_count: cart.product_requests.len(),
      total,
    }
  }

  /// Drives the "Some items require pricing approval" banner.
  pub fn needs_pricing_approval(&self) -> bool {
    self.total.is_quote_required()
  }

  /// Navbar badge count.
  pub fn item_count(&self) -> usize {
    self.product_count + self.service_count + self.product_request_count
  }

  pub fn is_empty(&self) -> bool {
    self.item_count() == 0
  }

  pub fn can_checkout(&self) -> bool {
    !self.is_empty()
  }

  pub fn total_label(&self) -> String {
    self.total.to_string()
  }

  /// Summary rows. Products and services always show; product requests only
  /// when there are some.
  pub fn lines(&self) -> Vec<CategoryLine> {
    let products = if self.all_products_priced { Total::Amount(self.product_total) } else { Total::QuoteRequired };
    let mut lines = vec![
      CategoryLine { label: "Products", count: self.product_count, subtotal: products },
      CategoryLine { label: "Services", count: self.service_count, subtotal: Total::QuoteRequired },
    ];
    if self.product_requests_require_quote {
      lines.push(CategoryLine {
        label: "Product Requests",
        count: self.product_request_count,
        subtotal: Total::QuoteRequired,
      });
    }
    lines
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_cart_is_a_zero_amount_and_cannot_check_out() {
    let summary = CartSummary::compute(&Cart::default(), Utc::now());
    assert_eq!(summary.total, Total::Amount(Money::ZERO));
    assert!(summary.is_empty());
    assert!(!summary.can_checkout());
    assert!(!summary.needs_pricing_approval());
    assert_eq!(summary.total_label(), "৳0");
  }

  #[test]
  fn quote_required_label() {
    assert_eq!(Total::QuoteRequired.to_string(), QUOTE_REQUIRED);
    assert_eq!(Total::Amount(Money::from_minor(25_050)).to_string(), "৳250.50");
  }
}
