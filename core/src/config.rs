// storefront/src/config.rs

use dotenvy::dotenv;
use std::env;
use std::fmt;
use std::time::Duration;
use url::Url;

use crate::debounce::DEFAULT_QUIET_WINDOW;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_PAGE_LIMIT: u32 = 10;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  #[error("Missing environment variable '{0}'")]
  Missing(&'static str),

  #[error("Invalid URL in '{var}': {message}")]
  InvalidUrl { var: &'static str, message: String },

  #[error("Invalid value in '{var}': {message}")]
  InvalidValue { var: &'static str, message: String },
}

/// Client configuration. The `Debug` output redacts the access token.
#[derive(Clone)]
pub struct StorefrontConfig {
  /// Base URL of the storefront REST API.
  pub api_url: Url,
  /// Host serving product and service images.
  pub image_server: Option<Url>,
  /// Bearer token of an already signed-in customer.
  pub access_token: Option<String>,
  pub timeout: Duration,
  /// Quiet window before a quantity change is sent.
  pub quantity_debounce: Duration,
  pub page_limit: u32,
}

impl fmt::Debug for StorefrontConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("StorefrontConfig")
      .field("api_url", &self.api_url.as_str())
      .field("image_server", &self.image_server.as_ref().map(Url::as_str))
      .field("access_token", &self.access_token.as_ref().map(|_| "[REDACTED]"))
      .field("timeout", &self.timeout)
      .field("quantity_debounce", &self.quantity_debounce)
      .field("page_limit", &self.page_limit)
      .finish()
  }
}

impl StorefrontConfig {
  /// Configuration with defaults for everything but the API URL.
  pub fn new(api_url: Url) -> Self {
    StorefrontConfig {
      api_url,
      image_server: None,
      access_token: None,
      timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
      quantity_debounce: DEFAULT_QUIET_WINDOW,
      page_limit: DEFAULT_PAGE_LIMIT,
    }
  }

  /// Loads `.env` if present, then reads:
  ///
  /// - `STOREFRONT_API_URL` (required)
  /// - `STOREFRONT_IMAGE_SERVER`
  /// - `STOREFRONT_ACCESS_TOKEN`
  /// - `STOREFRONT_TIMEOUT_SECS` (default 30)
  /// - `STOREFRONT_QUANTITY_DEBOUNCE_MS` (default 500)
  /// - `STOREFRONT_PAGE_LIMIT` (default 10)
  pub fn from_env() -> Result<Self, ConfigError> {
    dotenv().ok();

    let get_env = |var: &'static str| env::var(var).ok().filter(|v| !v.trim().is_empty());

    let api_url = get_env("STOREFRONT_API_URL").ok_or(ConfigError::Missing("STOREFRONT_API_URL"))?;
    let api_url = parse_url("STOREFRONT_API_URL", &api_url)?;
    let image_server = get_env("STOREFRONT_IMAGE_SERVER")
      .map(|raw| parse_url("STOREFRONT_IMAGE_SERVER", &raw))
      .transpose()?;

    let timeout_secs = parse_number("STOREFRONT_TIMEOUT_SECS", get_env("STOREFRONT_TIMEOUT_SECS"), DEFAULT_TIMEOUT_SECS)?;
    let debounce_ms = parse_number(
      "STOREFRONT_QUANTITY_DEBOUNCE_MS",
      get_env("STOREFRONT_QUANTITY_DEBOUNCE_MS"),
      DEFAULT_QUIET_WINDOW.as_millis() as u64,
    )?;
    let page_limit = parse_number("STOREFRONT_PAGE_LIMIT", get_env("STOREFRONT_PAGE_LIMIT"), DEFAULT_PAGE_LIMIT)?;
    if page_limit == 0 {
      return Err(ConfigError::InvalidValue { var: "STOREFRONT_PAGE_LIMIT", message: "must be at least 1".into() });
    }

    let config = StorefrontConfig {
      api_url,
      image_server,
      access_token: get_env("STOREFRONT_ACCESS_TOKEN"),
      timeout: Duration::from_secs(timeout_secs),
      quantity_debounce: Duration::from_millis(debounce_ms),
      page_limit,
    };

    tracing::info!(config = ?config, "Storefront configuration loaded.");
    Ok(config)
  }

  /// Absolute URL of an image file name, when an image server is configured.
  pub fn image_url(&self, file_name: &str) -> Option<String> {
    let base = self.image_server.as_ref()?;
    Some(format!("{}/{}", base.as_str().trim_end_matches('/'), file_name.trim_start_matches('/')))
  }
}

fn parse_url(var: &'static str, raw: &str) -> Result<Url, ConfigError> {
  Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidUrl { var, message: e.to_string() })
}

fn parse_number<T>(var: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
  T: std::str::FromStr,
  T::Err: fmt::Display,
{
  match raw {
    Some(raw) => raw
      .trim()
      .parse()
      .map_err(|e: T::Err| ConfigError::InvalidValue { var, message: e.to_string() }),
    None => Ok(default),
  }
}
