// storefront/src/client/mod.rs

//! Typed HTTP client for the storefront REST API.
//!
//! Every response is wrapped as `{ "message": ..., "data": ... }`; see
//! [`envelope`]. Requests carry the session's bearer token when there is one.
//! No request is retried and none is cancelled once sent.

mod account;
mod cart;
mod catalog;
pub(crate) mod envelope;
mod orders;

use crate::config::StorefrontConfig;
use crate::error::{Result, StorefrontError};
use crate::session::SharedSession;
use envelope::{extract_error_message, Envelope};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;

#[derive(Debug, Clone)]
pub struct StorefrontClient {
  http: reqwest::Client,
  base_url: String,
  session: SharedSession,
}

impl StorefrontClient {
  pub fn new(config: &StorefrontConfig, session: SharedSession) -> Result<Self> {
    let http = reqwest::Client::builder()
      .timeout(config.timeout)
      .build()
      .map_err(|source| StorefrontError::Http { endpoint: "client_init".into(), source })?;

    Ok(StorefrontClient {
      http,
      base_url: config.api_url.as_str().trim_end_matches('/').to_string(),
      session,
    })
  }

  pub fn session(&self) -> &SharedSession {
    &self.session
  }

  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  fn request(&self, method: Method, path: &str) -> RequestBuilder {
    let url = format!("{}{}", self.base_url, path);
    let builder = self.http.request(method, url);
    match self.session.access_token() {
      Some(token) if !token.is_empty() => builder.bearer_auth(token),
      _ => builder,
    }
  }

  /// Sends the request and decodes the envelope.
  ///
  /// Non-2xx statuses become [`StorefrontError::Api`] carrying the server's
  /// message when the body has one. An empty 2xx body is an empty envelope.
  async fn execute<T: DeserializeOwned>(&self, endpoint: &str, builder: RequestBuilder) -> Result<Envelope<T>> {
    let http_err = |source| StorefrontError::Http { endpoint: endpoint.to_string(), source };

    let response = builder.send().await.map_err(http_err)?;
    let status = response.status();
    let body = response.text().await.map_err(http_err)?;

    if !status.is_success() {
      let message = extract_error_message(&body);
      tracing::warn!(endpoint, status = status.as_u16(), message = ?message, "API request failed.");
      return Err(StorefrontError::Api { endpoint: endpoint.to_string(), status: status.as_u16(), message });
    }

    if body.trim().is_empty() {
      return Ok(Envelope::empty());
    }
    serde_json::from_str(&body).map_err(|source| StorefrontError::Decode { endpoint: endpoint.to_string(), source })
  }
}
