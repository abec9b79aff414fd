// storefront/src/error.rs
use crate::config::ConfigError;
use crate::flow::FlowError;
use crate::session::LoginRedirect;
use crate::validation::ValidationErrors;
use thiserror::Error;

/// Shown when the server gave no usable message.
pub const FALLBACK_MESSAGE: &str = "An unexpected error occurred";

pub const LOGIN_REQUIRED_MESSAGE: &str = "Please login to continue";

#[derive(Debug, Error)]
pub enum StorefrontError {
  /// Caught before any request was sent; shown inline per field.
  #[error("Validation Error: {0}")]
  Validation(ValidationErrors),

  /// A cart mutation was attempted without a session.
  #[error("Authentication required, redirecting to {}", .0.path())]
  Unauthenticated(LoginRedirect),

  #[error("Checkout is unavailable: the cart is empty")]
  EmptyCart,

  /// The API answered with a non-success status.
  #[error("API Error on {endpoint} (status {status}): {}", .message.as_deref().unwrap_or(FALLBACK_MESSAGE))]
  Api {
    endpoint: String,
    status: u16,
    message: Option<String>,
  },

  #[error("HTTP Error on {endpoint}: {source}")]
  Http {
    endpoint: String,
    #[source]
    source: reqwest::Error,
  },

  #[error("Malformed response from {endpoint}: {source}")]
  Decode {
    endpoint: String,
    #[source]
    source: serde_json::Error,
  },

  #[error("Response from {endpoint} carried no data")]
  MissingData { endpoint: String },

  #[error("Configuration Error: {0}")]
  Config(#[from] ConfigError),

  #[error("Flow Error: {source}")]
  Flow {
    #[from]
    source: FlowError,
  },

  #[error("Internal Error: {0}")]
  Internal(String),
}

impl StorefrontError {
  /// The message a notification should show: the server's own message when
  /// it sent one, otherwise a generic fallback.
  pub fn user_message(&self) -> String {
    match self {
      StorefrontError::Validation(errors) => errors
        .first()
        .map(|e| e.message.clone())
        .unwrap_or_else(|| FALLBACK_MESSAGE.to_string()),
      StorefrontError::Unauthenticated(_) => LOGIN_REQUIRED_MESSAGE.to_string(),
      StorefrontError::EmptyCart => "Your cart is empty".to_string(),
      StorefrontError::Api { message: Some(message), .. } => message.clone(),
      _ => FALLBACK_MESSAGE.to_string(),
    }
  }

  pub fn login_redirect(&self) -> Option<&LoginRedirect> {
    match self {
      StorefrontError::Unauthenticated(redirect) => Some(redirect),
      _ => None,
    }
  }

  pub fn validation_errors(&self) -> Option<&ValidationErrors> {
    match self {
      StorefrontError::Validation(errors) => Some(errors),
      _ => None,
    }
  }

  pub fn status(&self) -> Option<u16> {
    match self {
      StorefrontError::Api { status, .. } => Some(*status),
      StorefrontError::Http { source, .. } => source.status().map(|s| s.as_u16()),
      _ => None,
    }
  }
}

impl From<ValidationErrors> for StorefrontError {
  fn from(errors: ValidationErrors) -> Self {
    StorefrontError::Validation(errors)
  }
}

// Flow handlers may bail with anyhow; recover our own error when it is the
// one being carried.
impl From<anyhow::Error> for StorefrontError {
  fn from(err: anyhow::Error) -> Self {
    match err.downcast::<StorefrontError>() {
      Ok(inner) => inner,
      Err(other) => StorefrontError::Internal(other.to_string()),
    }
  }
}

pub type Result<T, E = StorefrontError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
  use super::*;
  use crate::models::ItemKind;

  #[test]
  fn user_message_prefers_server_message() {
    let err = StorefrontError::Api { endpoint: "PUT /cart/product/1".into(), status: 422, message: Some("Only 3 left".into()) };
    assert_eq!(err.user_message(), "Only 3 left");
    let err = StorefrontError::Api { endpoint: "PUT /cart/product/1".into(), status: 500, message: None };
    assert_eq!(err.user_message(), FALLBACK_MESSAGE);
    assert!(err.to_string().contains(FALLBACK_MESSAGE));
  }

  #[test]
  fn unauthenticated_exposes_redirect() {
    let err = StorefrontError::Unauthenticated(LoginRedirect { item_type: ItemKind::Product, slug: "kettle".into() });
    assert_eq!(err.user_message(), LOGIN_REQUIRED_MESSAGE);
    assert_eq!(err.login_redirect().map(|r| r.path()), Some("/login?type=product&slug=kettle".to_string()));
  }

  #[test]
  fn anyhow_round_trip_keeps_variant() {
    let wrapped = anyhow::Error::new(StorefrontError::EmptyCart);
    assert!(matches!(StorefrontError::from(wrapped), StorefrontError::EmptyCart));
    let other = anyhow::anyhow!("boom");
    assert!(matches!(StorefrontError::from(other), StorefrontError::Internal(m) if m == "boom"));
  }
}
