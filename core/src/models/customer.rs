// storefront/src/models/customer.rs

use serde::{Deserialize, Serialize};

/// The signed-in customer as returned by the backend. Address fields prefill
/// the checkout and product-request forms.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
  pub id: String,
  #[serde(default)]
  pub first_name: Option<String>,
  #[serde(default)]
  pub last_name: Option<String>,
  #[serde(default)]
  pub company_name: Option<String>,
  #[serde(default)]
  pub email: Option<String>,
  #[serde(default)]
  pub phone: Option<String>,
  #[serde(default)]
  pub address: Option<String>,
  #[serde(default)]
  pub thana: Option<String>,
  #[serde(default)]
  pub district: Option<String>,
}

impl Customer {
  /// "First Last", whichever parts are set.
  pub fn display_name(&self) -> Option<String> {
    let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
      .into_iter()
      .flatten()
      .map(str::trim)
      .filter(|part| !part.is_empty())
      .collect();
    (!parts.is_empty()).then(|| parts.join(" "))
  }
}
