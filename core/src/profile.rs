// storefront/src/profile.rs

//! The signed-in customer's profile: loading it, editing the name and phone,
//! and editing the delivery address that prefills checkout.

use crate::api::{AccountApi, ApiReply};
use crate::cache::{CacheKey, Mutation, QueryCache};
use crate::error::Result;
use crate::models::Customer;
use crate::notify::Notifier;
use crate::session::SharedSession;
use crate::validation::ValidationErrors;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Body of `PATCH /customer`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AddressForm {
  pub address: String,
  pub thana: String,
  pub district: String,
}

impl AddressForm {
  pub fn prefilled(customer: Option<&Customer>) -> Self {
    let field = |value: Option<&String>| value.cloned().unwrap_or_default();
    match customer {
      Some(c) => AddressForm {
        address: field(c.address.as_ref()),
        thana: field(c.thana.as_ref()),
        district: field(c.district.as_ref()),
      },
      None => AddressForm::default(),
    }
  }

  pub fn validate(&self) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    errors.require_min_chars("address", &self.address, 10, "Address must be at least 10 characters.");
    errors.require_min_chars("thana", &self.thana, 3, "Thana must be at least 3 characters.");
    errors.require_min_chars("district", &self.district, 3, "District must be at least 3 characters.");
    errors.into_result()
  }

  /// Values as sent: surrounding whitespace dropped.
  pub fn trimmed(&self) -> Self {
    AddressForm {
      address: self.address.trim().to_string(),
      thana: self.thana.trim().to_string(),
      district: self.district.trim().to_string(),
    }
  }
}

/// Body of `PATCH /customer` from the profile editor.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileForm {
  pub first_name: String,
  pub last_name: String,
  pub company_name: String,
  pub phone: String,
}

impl ProfileForm {
  pub fn prefilled(customer: Option<&Customer>) -> Self {
    let field = |value: Option<&String>| value.cloned().unwrap_or_default();
    match customer {
      Some(c) => ProfileForm {
        first_name: field(c.first_name.as_ref()),
        last_name: field(c.last_name.as_ref()),
        company_name: field(c.company_name.as_ref()),
        phone: field(c.phone.as_ref()),
      },
      None => ProfileForm::default(),
    }
  }

  /// Company name is optional.
  pub fn validate(&self) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    errors.require_min_chars("firstName", &self.first_name, 2, "First name must be at least 2 characters.");
    errors.require_min_chars("lastName", &self.last_name, 2, "Last name must be at least 2 characters.");
    errors.require_phone("phone", &self.phone);
    errors.into_result()
  }

  pub fn trimmed(&self) -> Self {
    ProfileForm {
      first_name: self.first_name.trim().to_string(),
      last_name: self.last_name.trim().to_string(),
      company_name: self.company_name.trim().to_string(),
      phone: self.phone.trim().to_string(),
    }
  }
}

pub struct ProfileService {
  api: Arc<dyn AccountApi>,
  cache: QueryCache,
  session: SharedSession,
  notifier: Arc<dyn Notifier>,
}

impl ProfileService {
  pub fn new(api: Arc<dyn AccountApi>, cache: QueryCache, session: SharedSession, notifier: Arc<dyn Notifier>) -> Self {
    ProfileService { api, cache, session, notifier }
  }

  /// The customer, from cache when fresh. Also stored on the session so
  /// forms can prefill from it.
  pub async fn customer(&self) -> Result<Customer> {
    let api = Arc::clone(&self.api);
    let customer = self.cache.get_or_fetch(CacheKey::Customer, || async move { api.fetch_customer().await }).await?;
    self.session.set_customer(customer.clone());
    Ok(customer)
  }

  pub async fn update_address(&self, form: &AddressForm) -> Result<Customer> {
    form.validate()?;
    let form = form.trimmed();
    let result = self.api.update_address(&form).await;
    self.settle("Delivery address", result)
  }

  /// Name, company and phone. The reply replaces the cached customer.
  pub async fn update_profile(&self, form: &ProfileForm) -> Result<Customer> {
    form.validate()?;
    let form = form.trimmed();
    let result = self.api.update_profile(&form).await;
    self.settle("Profile", result)
  }

  fn settle(&self, what: &str, result: Result<ApiReply<Customer>>) -> Result<Customer> {
    match result {
      Ok(reply) => {
        self.cache.apply(Mutation::ProfileUpdated);
        self.cache.set(CacheKey::Customer, reply.data.clone());
        self.session.set_customer(reply.data.clone());
        self.notifier.success(reply.message_or("Profile updated"));
        tracing::info!(customer_id = %reply.data.id, "{what} updated.");
        Ok(reply.data)
      }
      Err(err) => {
        tracing::error!(error = %err, "{what} update failed.");
        self.notifier.error(&err.user_message());
        Err(err)
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn validation_counts_trimmed_characters() {
    let form = AddressForm { address: "   Road 7, Mirpur 10   ".into(), thana: "Mirpur".into(), district: " Dh ".into() };
    let errors = form.validate().unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.get("district"), Some("District must be at least 3 characters."));
    assert!(errors.get("address").is_none());
  }

  #[test]
  fn profile_form_requires_names_and_a_valid_phone() {
    let form = ProfileForm { first_name: " R ".into(), last_name: "Uddin".into(), company_name: String::new(), phone: "12345".into() };
    let errors = form.validate().unwrap_err();
    assert_eq!(errors.len(), 2);
    assert!(errors.get("firstName").is_some());
    assert!(errors.get("phone").is_some());
    assert!(errors.get("companyName").is_none());

    let body = serde_json::to_value(ProfileForm { first_name: "Rahim".into(), ..form }).unwrap();
    assert_eq!(body["firstName"], "Rahim");
    assert_eq!(body["companyName"], "");
  }

  #[test]
  fn prefilled_from_customer() {
    let customer = Customer { id: "c".into(), thana: Some("Gulshan".into()), ..Customer::default() };
    let form = AddressForm::prefilled(Some(&customer));
    assert_eq!(form.thana, "Gulshan");
    assert!(form.address.is_empty());
    assert_eq!(AddressForm::prefilled(None), AddressForm::default());
  }
}
