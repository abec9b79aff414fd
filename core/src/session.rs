// storefront/src/session.rs

//! The caller's authentication state. Obtaining and persisting tokens is the
//! embedding application's job; this module only carries an existing token
//! and answers "is anyone signed in?" before cart mutations.

use crate::models::{Customer, ItemKind};
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;
use url::form_urlencoded;

pub const LOGIN_ROUTE: &str = "/login";

#[derive(Clone, Default)]
pub struct Session {
  access_token: Option<String>,
  customer: Option<Customer>,
}

impl Session {
  pub fn anonymous() -> Self {
    Self::default()
  }

  pub fn authenticated(access_token: impl Into<String>) -> Self {
    Session { access_token: Some(access_token.into()), customer: None }
  }

  pub fn with_customer(mut self, customer: Customer) -> Self {
    self.customer = Some(customer);
    self
  }

  pub fn access_token(&self) -> Option<&str> {
    self.access_token.as_deref()
  }

  pub fn customer(&self) -> Option<&Customer> {
    self.customer.as_ref()
  }

  pub fn is_authenticated(&self) -> bool {
    self.access_token.as_deref().is_some_and(|t| !t.is_empty())
  }
}

impl fmt::Debug for Session {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Session")
      .field("access_token", &self.access_token.as_ref().map(|_| "[REDACTED]"))
      .field("customer", &self.customer.as_ref().map(|c| &c.id))
      .finish()
  }
}

/// A session shared between the HTTP client and the services using it.
#[derive(Debug, Clone, Default)]
pub struct SharedSession(Arc<RwLock<Session>>);

impl SharedSession {
  pub fn new(session: Session) -> Self {
    SharedSession(Arc::new(RwLock::new(session)))
  }

  pub fn snapshot(&self) -> Session {
    self.0.read().clone()
  }

  pub fn replace(&self, session: Session) {
    *self.0.write() = session;
  }

  pub fn set_customer(&self, customer: Customer) {
    self.0.write().customer = Some(customer);
  }

  pub fn is_authenticated(&self) -> bool {
    self.0.read().is_authenticated()
  }

  pub fn access_token(&self) -> Option<String> {
    self.0.read().access_token.clone()
  }

  pub fn customer(&self) -> Option<Customer> {
    self.0.read().customer.clone()
  }
}

/// Where to send an anonymous shopper who tried to add an item, with enough
/// context to resume the action after login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRedirect {
  pub item_type: ItemKind,
  pub slug: String,
}

impl LoginRedirect {
  pub fn path(&self) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
      .append_pair("type", self.item_type.as_str())
      .append_pair("slug", &self.slug)
      .finish();
    format!("{LOGIN_ROUTE}?{query}")
  }
}
