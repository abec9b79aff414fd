// storefront/src/api.rs

//! Seams between the stateful client logic and the transport.
//!
//! [`crate::client::StorefrontClient`] implements all of them over HTTP.
//! Controllers and flows only ever see `Arc<dyn CartApi>` and friends,
//! so they can run against any backend that honours the same contract.

use crate::error::Result;
use crate::models::{AddToCartRequest, Cart, Customer, ItemKind, OrderDetails, OrderInfo, OrderPage};
use crate::product_request::{ProductRequestForm, RequestAction};
use crate::profile::{AddressForm, ProfileForm};
use async_trait::async_trait;

/// A successful response: the server's message (if any) and its payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiReply<T> {
  pub message: Option<String>,
  pub data: T,
}

impl<T> ApiReply<T> {
  pub fn new(data: T) -> Self {
    ApiReply { message: None, data }
  }

  pub fn message_or<'a>(&'a self, fallback: &'a str) -> &'a str {
    self.message.as_deref().filter(|m| !m.is_empty()).unwrap_or(fallback)
  }
}

#[async_trait]
pub trait CartApi: Send + Sync {
  /// `GET /cart`
  async fn fetch_cart(&self) -> Result<Cart>;

  /// `POST /cart`; the reply carries the updated cart.
  async fn add_item(&self, request: &AddToCartRequest) -> Result<ApiReply<Cart>>;

  /// `PUT /cart/{product|product-request}/:id` with `{ quantity }`.
  /// Services have no quantity and are rejected before any request is sent.
  async fn update_quantity(&self, kind: ItemKind, id: &str, quantity: u32) -> Result<ApiReply<()>>;

  /// `PUT /cart/service/:id` with `{ description }`.
  async fn update_description(&self, id: &str, description: &str) -> Result<ApiReply<()>>;

  /// `DELETE /cart/{kind}/:id`
  async fn remove_item(&self, kind: ItemKind, id: &str) -> Result<ApiReply<()>>;
}

#[async_trait]
pub trait OrderApi: Send + Sync {
  /// `POST /orders`; the cart contents are attached server-side.
  async fn create_order(&self, info: &OrderInfo) -> Result<ApiReply<()>>;

  /// `GET /orders?page=&limit=`
  async fn list_orders(&self, page: u32, limit: u32) -> Result<OrderPage>;

  /// `GET /orders/:id`
  async fn get_order(&self, id: &str) -> Result<OrderDetails>;
}

#[async_trait]
pub trait AccountApi: Send + Sync {
  /// `GET /customer`
  async fn fetch_customer(&self) -> Result<Customer>;

  /// `PATCH /customer`; the reply carries the updated customer.
  async fn update_address(&self, form: &AddressForm) -> Result<ApiReply<Customer>>;

  /// `PATCH /customer` with `{ firstName, lastName, companyName, phone }`.
  async fn update_profile(&self, form: &ProfileForm) -> Result<ApiReply<Customer>>;

  /// Multipart `POST /product-requests` or `POST /product-requests/order-now`.
  async fn submit_product_request(&self, action: RequestAction, form: &ProductRequestForm) -> Result<ApiReply<()>>;
}
