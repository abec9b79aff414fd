// storefront/src/models/catalog.rs

use crate::money::Money;
use crate::pricing::Priced;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
  pub image: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
  pub id: String,
  pub title: String,
  #[serde(default)]
  pub slug: String,
  #[serde(default)]
  pub price: Option<Money>,
  #[serde(default)]
  pub discount: Money,
  #[serde(default)]
  pub expires_at: Option<DateTime<Utc>>,
  #[serde(default)]
  pub images: Vec<Image>,
}

impl Product {
  pub fn primary_image(&self) -> Option<&str> {
    self.images.first().map(|i| i.image.as_str())
  }
}

impl Priced for Product {
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

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
  pub id: String,
  pub title: String,
  #[serde(default)]
  pub slug: String,
  #[serde(default)]
  pub price: Option<Money>,
  #[serde(default)]
  pub images: Vec<Image>,
}

impl Service {
  pub fn primary_image(&self) -> Option<&str> {
    self.images.first().map(|i| i.image.as_str())
  }
}

// Services carry no discount fields.
impl Priced for Service {
  fn base_price(&self) -> Option<Money> {
    self.price
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
  pub id: String,
  pub name: String,
  #[serde(default)]
  pub slug: String,
}

fn first_page() -> u32 {
  1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
  #[serde(default)]
  pub products: Vec<Product>,
  #[serde(default = "first_page")]
  pub current_page: u32,
  #[serde(default = "first_page")]
  pub total_pages: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePage {
  #[serde(default)]
  pub services: Vec<Service>,
  #[serde(default = "first_page")]
  pub current_page: u32,
  #[serde(default = "first_page")]
  pub total_pages: u32,
}

/// A consultant from `GET /consultants`. Shown, not bookable through the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Consultant {
  pub id: String,
  pub full_name: String,
  #[serde(default)]
  pub title: String,
  /// Years.
  #[serde(default)]
  pub experience: u32,
  #[serde(default)]
  pub bio: String,
  #[serde(default)]
  pub specializations: Vec<String>,
  #[serde(default)]
  pub qualifications: Vec<String>,
  #[serde(default)]
  pub address: Option<String>,
  #[serde(default)]
  pub image: Option<String>,
}

impl Consultant {
  /// The bio as the listing shows it: at most 120 characters, then "...".
  pub fn bio_preview(&self) -> String {
    const PREVIEW_CHARS: usize = 120;
    if self.bio.chars().count() <= PREVIEW_CHARS {
      return self.bio.clone();
    }
    let mut preview: String = self.bio.chars().take(PREVIEW_CHARS).collect();
    preview.push_str("...");
    preview
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultantPage {
  #[serde(default)]
  pub consultants: Vec<Consultant>,
  #[serde(default = "first_page")]
  pub current_page: u32,
  #[serde(default = "first_page")]
  pub total_pages: u32,
}
