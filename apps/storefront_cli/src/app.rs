// storefront_cli/src/app.rs

use crate::cli::ConnectionArgs;
use anyhow::Context;
use std::sync::Arc;
use storefront::cart::{CartContext, CartService};
use storefront::product_request::ProductRequestService;
use storefront::profile::ProfileService;
use storefront::{
  ConfigError, OrderService, QueryCache, Session, SharedSession, StorefrontClient, StorefrontConfig, TracingNotifier,
};
use url::Url;

/// Everything a command needs, wired once per invocation.
pub struct App {
  pub config: StorefrontConfig,
  pub session: SharedSession,
  pub client: Arc<StorefrontClient>,
  pub cache: QueryCache,
  pub notifier: Arc<TracingNotifier>,
}

impl App {
  pub fn from_env(overrides: &ConnectionArgs) -> anyhow::Result<Self> {
    let mut config = match &overrides.api_url {
      Some(raw) => {
        let api_url = raw.parse::<Url>().with_context(|| format!("invalid --api-url '{raw}'"))?;
        match StorefrontConfig::from_env() {
          Ok(config) => StorefrontConfig { api_url, ..config },
          // The flag stands in for the missing variable.
          Err(ConfigError::Missing(_)) => StorefrontConfig::new(api_url),
          Err(err) => return Err(err.into()),
        }
      }
      None => StorefrontConfig::from_env().context("loading storefront configuration")?,
    };
    if let Some(token) = &overrides.token {
      config.access_token = Some(token.clone());
    }

    let session = SharedSession::new(match config.access_token.as_deref() {
      Some(token) => Session::authenticated(token),
      None => Session::anonymous(),
    });
    let client = Arc::new(StorefrontClient::new(&config, session.clone())?);

    Ok(App { config, session, client, cache: QueryCache::new(), notifier: Arc::new(TracingNotifier) })
  }

  pub fn carts(&self) -> CartService {
    let ctx = CartContext::new(self.client.clone(), self.cache.clone(), self.notifier.clone())
      .with_quiet_window(self.config.quantity_debounce);
    CartService::new(ctx, self.session.clone())
  }

  pub fn orders(&self) -> OrderService {
    OrderService::new(self.client.clone(), self.cache.clone())
  }

  pub fn profile(&self) -> ProfileService {
    ProfileService::new(self.client.clone(), self.cache.clone(), self.session.clone(), self.notifier.clone())
  }

  pub fn product_requests(&self) -> ProductRequestService {
    ProductRequestService::new(self.client.clone(), self.cache.clone(), self.notifier.clone())
  }
}
