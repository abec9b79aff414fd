// storefront/src/client/orders.rs

use super::StorefrontClient;
use crate::api::{ApiReply, OrderApi};
use crate::error::Result;
use crate::models::{OrderDetails, OrderInfo, OrderPage};
use async_trait::async_trait;
use reqwest::Method;
use serde::de::IgnoredAny;
use tracing::instrument;

#[async_trait]
impl OrderApi for StorefrontClient {
  // The form carries the customer's phone and address; keep it out of spans.
  #[instrument(skip_all, err(Display))]
  async fn create_order(&self, info: &OrderInfo) -> Result<ApiReply<()>> {
    let endpoint = "POST /orders";
    let builder = self.request(Method::POST, "/orders").json(info);
    Ok(self.execute::<IgnoredAny>(endpoint, builder).await?.into_ack())
  }

  #[instrument(skip(self), err(Display))]
  async fn list_orders(&self, page: u32, limit: u32) -> Result<OrderPage> {
    let endpoint = "GET /orders";
    let builder = self.request(Method::GET, "/orders").query(&[("page", page), ("limit", limit)]);
    self.execute::<OrderPage>(endpoint, builder).await?.into_data(endpoint)
  }

  #[instrument(skip(self), err(Display))]
  async fn get_order(&self, id: &str) -> Result<OrderDetails> {
    let path = format!("/orders/{id}");
    let endpoint = format!("GET {path}");
    self.execute::<OrderDetails>(&endpoint, self.request(Method::GET, &path)).await?.into_data(&endpoint)
  }
}
