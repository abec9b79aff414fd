// storefront/src/pricing.rs

//! Effective price computation.
//!
//! A discount only applies while `now < expires_at`. Callers pass `now`
//! explicitly and must re-evaluate on every read, since a cached result goes
//! stale the moment a discount expires.

use crate::money::{Money, TAKA_SIGN};
use chrono::{DateTime, Utc};

pub const PRICE_ON_REQUEST: &str = "Price on Request";
pub const QUOTE_REQUIRED: &str = "Quote Required";

/// Anything carrying catalog price fields.
pub trait Priced {
  /// Base price. `None` means the price must be quoted.
  fn base_price(&self) -> Option<Money>;

  fn discount(&self) -> Money {
    Money::ZERO
  }

  fn discount_expires_at(&self) -> Option<DateTime<Utc>> {
    None
  }
}

/// Plain price fields, for callers that do not hold a catalog entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PriceInfo {
  pub price: Option<Money>,
  pub discount: Money,
  pub expires_at: Option<DateTime<Utc>>,
}

impl Priced for PriceInfo {
  fn base_price(&self) -> Option<Money> {
    self.price
  }

  fn discount(&self) -> Money {
    self.discount
  }

  fn discount_expires_at(&self) -> Option<DateTime<Utc>> {
    self.expires_at
  }
}

/// Returns the base price after a live discount, or `None` when the entity
/// has no fixed price. A zero base price counts as "no fixed price".
///
/// The result never drops below zero nor exceeds the base price.
pub fn effective_price<P: Priced + ?Sized>(entity: &P, now: DateTime<Utc>) -> Option<Money> {
  let price = entity.base_price().filter(|p| p.is_positive())?;
  if discount_is_live(entity, now) {
    Some(price.saturating_sub(entity.discount()).clamp_non_negative())
  } else {
    Some(price)
  }
}

fn discount_is_live<P: Priced + ?Sized>(entity: &P, now: DateTime<Utc>) -> bool {
  entity.discount().is_positive() && entity.discount_expires_at().is_some_and(|expires_at| expires_at > now)
}

/// What a price badge shows: the struck-through original next to the
/// discounted price, or just the price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceTag {
  pub original: Money,
  pub current: Money,
}

impl PriceTag {
  pub fn is_discounted(&self) -> bool {
    self.current < self.original
  }
}

pub fn price_tag<P: Priced + ?Sized>(entity: &P, now: DateTime<Utc>) -> Option<PriceTag> {
  let current = effective_price(entity, now)?;
  let original = entity.base_price().unwrap_or(current);
  Some(PriceTag { original, current })
}

/// Label for a cart line: `৳{price} * {qty} = ৳{line}`, the bare price when
/// the quantity is zero, or [`PRICE_ON_REQUEST`].
pub fn line_label(price: Option<Money>, quantity: u32) -> String {
  match price {
    Some(price) if quantity > 0 => {
      format!("{TAKA_SIGN}{price} * {quantity} = {TAKA_SIGN}{}", price.times(quantity))
    }
    Some(price) => price.to_string(),
    None => PRICE_ON_REQUEST.to_string(),
  }
}
