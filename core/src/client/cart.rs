// storefront/src/client/cart.rs

use super::StorefrontClient;
use crate::api::{ApiReply, CartApi};
use crate::error::{Result, StorefrontError};
use crate::models::{AddToCartRequest, Cart, ItemKind};
use async_trait::async_trait;
use reqwest::Method;
use serde::de::IgnoredAny;
use serde_json::json;
use tracing::instrument;

#[async_trait]
impl CartApi for StorefrontClient {
  #[instrument(skip(self), err(Display))]
  async fn fetch_cart(&self) -> Result<Cart> {
    let endpoint = "GET /cart";
    let envelope = self.execute::<Cart>(endpoint, self.request(Method::GET, "/cart")).await?;
    // An empty cart may come back without a payload.
    Ok(envelope.data.unwrap_or_default())
  }

  #[instrument(skip(self, request), fields(kind = %request.kind, item_id = %request.item_id), err(Display))]
  async fn add_item(&self, request: &AddToCartRequest) -> Result<ApiReply<Cart>> {
    let endpoint = "POST /cart";
    let envelope = self.execute::<Cart>(endpoint, self.request(Method::POST, "/cart").json(request)).await?;
    envelope.into_reply(endpoint)
  }

  #[instrument(skip(self), err(Display))]
  async fn update_quantity(&self, kind: ItemKind, id: &str, quantity: u32) -> Result<ApiReply<()>> {
    if !kind.has_quantity() {
      return Err(StorefrontError::Internal(format!("{kind} items have no quantity")));
    }
    let path = format!("/cart/{kind}/{id}");
    let endpoint = format!("PUT {path}");
    let builder = self.request(Method::PUT, &path).json(&json!({ "quantity": quantity }));
    Ok(self.execute::<IgnoredAny>(&endpoint, builder).await?.into_ack())
  }

  #[instrument(skip(self, description), fields(description_len = description.len()), err(Display))]
  async fn update_description(&self, id: &str, description: &str) -> Result<ApiReply<()>> {
    let path = format!("/cart/service/{id}");
    let endpoint = format!("PUT {path}");
    let builder = self.request(Method::PUT, &path).json(&json!({ "description": description }));
    Ok(self.execute::<IgnoredAny>(&endpoint, builder).await?.into_ack())
  }

  #[instrument(skip(self), err(Display))]
  async fn remove_item(&self, kind: ItemKind, id: &str) -> Result<ApiReply<()>> {
    let path = format!("/cart/{kind}/{id}");
    let endpoint = format!("DELETE {path}");
    Ok(self.execute::<IgnoredAny>(&endpoint, self.request(Method::DELETE, &path)).await?.into_ack())
  }
}
