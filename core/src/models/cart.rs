// storefront/src/models/cart.rs

use crate::models::catalog::{Product, Service};
use crate::money::Money;
use crate::pricing::Priced;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The three kinds of cart line. The serialized form doubles as the `type`
/// field of `POST /cart` and the path segment of `/cart/{kind}/:id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemKind {
  Product,
  Service,
  ProductRequest,
}

impl ItemKind {
  pub fn as_str(self) -> &'static str {
    match self {
      ItemKind::Product => "product",
      ItemKind::Service => "service",
      ItemKind::ProductRequest => "product-request",
    }
  }

  /// Whether lines of this kind carry a quantity.
  pub fn has_quantity(self) -> bool {
    match self {
      ItemKind::Product | ItemKind::ProductRequest => true,
      ItemKind::Service => false,
    }
  }
}

impl fmt::Display for ItemKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCartItem {
  pub id: String,
  pub quantity: u32,
  pub product: Product,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceCartItem {
  pub id: String,
  #[serde(default)]
  pub description: String,
  pub service: Service,
}

impl ServiceCartItem {
  /// Short form of the description shown on the cart line.
  pub fn description_preview(&self) -> String {
    const PREVIEW_CHARS: usize = 15;
    if self.description.is_empty() {
      return "Add description".to_string();
    }
    let mut preview: String = self.description.chars().take(PREVIEW_CHARS).collect();
    if self.description.chars().count() > PREVIEW_CHARS {
      preview.push_str("...");
    }
    preview
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequestCartItem {
  pub id: String,
  pub title: String,
  pub quantity: u32,
  #[serde(default)]
  pub price: Option<Money>,
  #[serde(default)]
  pub file_name: String,
}

impl ProductRequestCartItem {
  /// Image attachments get a thumbnail; anything else is offered as a download.
  pub fn attachment_is_image(&self) -> bool {
    const IMAGE_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "gif", "webp", "svg"];
    self
      .file_name
      .rsplit_once('.')
      .is_some_and(|(_, ext)| IMAGE_EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known)))
  }
}

impl Priced for ProductRequestCartItem {
  fn base_price(&self) -> Option<Money> {
    self.price
  }
}

/// One cart line of any kind.
#[derive(Debug, Clone, PartialEq)]
pub enum CartItem {
  Product(ProductCartItem),
  Service(ServiceCartItem),
  ProductRequest(ProductRequestCartItem),
}

impl CartItem {
  pub fn id(&self) -> &str {
    match self {
      CartItem::Product(item) => &item.id,
      CartItem::Service(item) => &item.id,
      CartItem::ProductRequest(item) => &item.id,
    }
  }

  pub fn kind(&self) -> ItemKind {
    match self {
      CartItem::Product(_) => ItemKind::Product,
      CartItem::Service(_) => ItemKind::Service,
      CartItem::ProductRequest(_) => ItemKind::ProductRequest,
    }
  }

  pub fn quantity(&self) -> Option<u32> {
    match self {
      CartItem::Product(item) => Some(item.quantity),
      CartItem::Service(_) => None,
      CartItem::ProductRequest(item) => Some(item.quantity),
    }
  }

  pub fn title(&self) -> &str {
    match self {
      CartItem::Product(item) => &item.product.title,
      CartItem::Service(item) => &item.service.title,
      CartItem::ProductRequest(item) => &item.title,
    }
  }
}

/// The cart as served by `GET /cart`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
  #[serde(default)]
  pub product_items: Vec<ProductCartItem>,
  #[serde(default)]
  pub service_items: Vec<ServiceCartItem>,
  #[serde(default)]
  pub product_requests: Vec<ProductRequestCartItem>,
}

impl Cart {
  /// Lines in display order: products, services, then product requests.
  pub fn items(&self) -> impl Iterator<Item = CartItem> + '_ {
    self
      .product_items
      .iter()
      .cloned()
      .map(CartItem::Product)
      .chain(self.service_items.iter().cloned().map(CartItem::Service))
      .chain(self.product_requests.iter().cloned().map(CartItem::ProductRequest))
  }

  pub fn item_count(&self) -> usize {
    self.product_items.len() + self.service_items.len() + self.product_requests.len()
  }

  pub fn is_empty(&self) -> bool {
    self.item_count() == 0
  }

  pub fn find(&self, kind: ItemKind, id: &str) -> Option<CartItem> {
    match kind {
      ItemKind::Product => self.product_items.iter().find(|i| i.id == id).cloned().map(CartItem::Product),
      ItemKind::Service => self.service_items.iter().find(|i| i.id == id).cloned().map(CartItem::Service),
      ItemKind::ProductRequest => {
        self.product_requests.iter().find(|i| i.id == id).cloned().map(CartItem::ProductRequest)
      }
    }
  }

  pub fn contains(&self, kind: ItemKind, id: &str) -> bool {
    self.find(kind, id).is_some()
  }
}

/// Body of `POST /cart`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
  #[serde(rename = "type")]
  pub kind: ItemKind,
  pub item_id: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub quantity: Option<u32>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
}
