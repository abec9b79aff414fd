// storefront/src/money.rs

//! Exact currency amounts.
//!
//! The backend sends prices either as JSON numbers or as decimal strings
//! (`"1250.50"`). Both are normalised into [`Money`], a [`Decimal`] held at
//! two decimal places (1/100 taka), so that cart totals are exact and
//! independent of summation order. Extra precision rounds half away from
//! zero.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};
use std::str::FromStr;

const SCALE: u32 = 2;
const ROUNDING: RoundingStrategy = RoundingStrategy::MidpointAwayFromZero;

/// Currency symbol used in rendered labels.
pub const TAKA_SIGN: &str = "৳";

/// An amount of taka with exactly two decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(Decimal);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid money amount '{0}'")]
pub struct MoneyParseError(pub String);

impl Money {
  pub const ZERO: Money = Money(Decimal::ZERO);

  pub fn from_decimal(value: Decimal) -> Self {
    Money(value.round_dp_with_strategy(SCALE, ROUNDING))
  }

  pub fn from_minor(minor: i64) -> Self {
    Money(Decimal::new(minor, SCALE))
  }

  /// Whole taka.
  pub fn taka(major: i64) -> Self {
    Money(Decimal::from(major))
  }

  pub fn as_decimal(self) -> Decimal {
    self.0
  }

  /// The amount in 1/100 taka, saturating at the `i64` range.
  pub fn minor(self) -> i64 {
    let mut scaled = self.0;
    scaled.rescale(SCALE);
    let mantissa = scaled.mantissa();
    i64::try_from(mantissa).unwrap_or(if mantissa < 0 { i64::MIN } else { i64::MAX })
  }

  pub fn is_zero(self) -> bool {
    self.0.is_zero()
  }

  pub fn is_positive(self) -> bool {
    self.0.is_sign_positive() && !self.0.is_zero()
  }

  pub fn times(self, quantity: u32) -> Money {
    Money(self.0.saturating_mul(Decimal::from(quantity)))
  }

  pub fn saturating_sub(self, other: Money) -> Money {
    Money(self.0.saturating_sub(other.0))
  }

  pub fn clamp_non_negative(self) -> Money {
    Money(self.0.max(Decimal::ZERO))
  }
}

impl From<Decimal> for Money {
  fn from(value: Decimal) -> Self {
    Money::from_decimal(value)
  }
}

impl FromStr for Money {
  type Err = MoneyParseError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Decimal::from_str(s.trim())
      .map(Money::from_decimal)
      .map_err(|_| MoneyParseError(s.to_string()))
  }
}

impl fmt::Display for Money {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.0.fract().is_zero() {
      write!(f, "{}", self.0.trunc().normalize())
    } else {
      write!(f, "{:.2}", self.0)
    }
  }
}

impl Add for Money {
  type Output = Money;
  fn add(self, rhs: Money) -> Money {
    Money(self.0.saturating_add(rhs.0))
  }
}

impl AddAssign for Money {
  fn add_assign(&mut self, rhs: Money) {
    *self = *self + rhs;
  }
}

impl Sub for Money {
  type Output = Money;
  fn sub(self, rhs: Money) -> Money {
    self.saturating_sub(rhs)
  }
}

impl Sum for Money {
  fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
    iter.fold(Money::ZERO, Add::add)
  }
}

// Whole amounts go out as integers, the rest as JSON numbers.
impl Serialize for Money {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    match self.0.fract().is_zero().then(|| self.0.to_i64()).flatten() {
      Some(whole) => serializer.serialize_i64(whole),
      None => serializer.serialize_f64(self.0.to_f64().unwrap_or_default()),
    }
  }
}

// `"discount": null` means no discount.
impl<'de> Deserialize<'de> for Money {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    Ok(Option::<Decimal>::deserialize(deserializer)?.map_or(Money::ZERO, Money::from_decimal))
  }
}
