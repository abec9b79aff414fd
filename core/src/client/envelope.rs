// storefront/src/client/envelope.rs

//! The backend wraps every payload as `{ "message": ..., "data": ... }` and
//! reports failures as `{ "message": ... }` or `{ "error": ... }`.

use crate::api::ApiReply;
use crate::error::{Result, StorefrontError};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
  #[serde(default)]
  pub(crate) message: Option<String>,
  // Missing `data` deserializes as None without requiring `T: Default`.
  pub(crate) data: Option<T>,
}

impl<T> Envelope<T> {
  pub(crate) fn empty() -> Self {
    Envelope { message: None, data: None }
  }

  pub(crate) fn into_data(self, endpoint: &str) -> Result<T> {
    self.data.ok_or_else(|| StorefrontError::MissingData { endpoint: endpoint.to_string() })
  }

  pub(crate) fn into_reply(self, endpoint: &str) -> Result<ApiReply<T>> {
    let message = self.message.clone();
    self.into_data(endpoint).map(|data| ApiReply { message, data })
  }

  /// For mutations whose payload the client ignores.
  pub(crate) fn into_ack(self) -> ApiReply<()> {
    ApiReply { message: self.message, data: () }
  }
}

/// Pulls a human-readable message out of an error body. Validation errors may
/// come as a list of messages, which are joined.
pub(crate) fn extract_error_message(body: &str) -> Option<String> {
  let value: Value = serde_json::from_str(body).ok()?;
  let object = value.as_object()?;
  ["message", "error"].iter().find_map(|field| match object.get(*field)? {
    Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
    Value::Array(items) => {
      let parts: Vec<&str> = items.iter().filter_map(Value::as_str).filter(|s| !s.trim().is_empty()).collect();
      (!parts.is_empty()).then(|| parts.join(", "))
    }
    _ => None,
  })
}
