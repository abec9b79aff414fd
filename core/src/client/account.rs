// storefront/src/client/account.rs

use super::StorefrontClient;
use crate::api::{AccountApi, ApiReply};
use crate::error::{Result, StorefrontError};
use crate::models::Customer;
use crate::product_request::{ProductRequestForm, RequestAction};
use crate::profile::{AddressForm, ProfileForm};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde::de::IgnoredAny;
use tracing::instrument;

fn multipart_body(endpoint: &str, form: &ProductRequestForm) -> Result<Form> {
  let mut body = Form::new()
    .text("title", form.title.trim().to_string())
    .text("quantity", form.quantity.to_string())
    .text("phone", form.phone.trim().to_string())
    .text("address", form.address.trim().to_string())
    .text("district", form.district.trim().to_string())
    .text("thana", form.thana.trim().to_string());

  if let Some(description) = form.description_field() {
    body = body.text("description", description.to_string());
  }
  if let Some(attachment) = &form.attachment {
    let part = Part::bytes(attachment.bytes.clone())
      .file_name(attachment.file_name.clone())
      .mime_str(&attachment.content_type)
      .map_err(|source| StorefrontError::Http { endpoint: endpoint.to_string(), source })?;
    body = body.part("file", part);
  }
  Ok(body)
}

#[async_trait]
impl AccountApi for StorefrontClient {
  #[instrument(skip(self), err(Display))]
  async fn fetch_customer(&self) -> Result<Customer> {
    let endpoint = "GET /customer";
    self.execute::<Customer>(endpoint, self.request(Method::GET, "/customer")).await?.into_data(endpoint)
  }

  #[instrument(skip_all, err(Display))]
  async fn update_address(&self, form: &AddressForm) -> Result<ApiReply<Customer>> {
    let endpoint = "PATCH /customer";
    let builder = self.request(Method::PATCH, "/customer").json(form);
    self.execute::<Customer>(endpoint, builder).await?.into_reply(endpoint)
  }

  #[instrument(skip_all, err(Display))]
  async fn update_profile(&self, form: &ProfileForm) -> Result<ApiReply<Customer>> {
    let endpoint = "PATCH /customer";
    let builder = self.request(Method::PATCH, "/customer").json(form);
    self.execute::<Customer>(endpoint, builder).await?.into_reply(endpoint)
  }

  #[instrument(skip(self, form), fields(path = action.path()), err(Display))]
  async fn submit_product_request(&self, action: RequestAction, form: &ProductRequestForm) -> Result<ApiReply<()>> {
    let endpoint = format!("POST {}", action.path());
    let body = multipart_body(&endpoint, form)?;
    let builder = self.request(Method::POST, action.path()).multipart(body);
    Ok(self.execute::<IgnoredAny>(&endpoint, builder).await?.into_ack())
  }
}
