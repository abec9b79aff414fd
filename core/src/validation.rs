// storefront/src/validation.rs

//! Field-level form validation. Errors keep field order so a UI can focus the
//! first invalid field.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
  pub field: &'static str,
  pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors {
  errors: Vec<FieldError>,
}

impl ValidationErrors {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn single(field: &'static str, message: impl Into<String>) -> Self {
    let mut errors = Self::new();
    errors.add(field, message);
    errors
  }

  /// Records an error. Only the first error per field is kept.
  pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
    if self.get(field).is_none() {
      self.errors.push(FieldError { field, message: message.into() });
    }
  }

  pub fn is_empty(&self) -> bool {
    self.errors.is_empty()
  }

  pub fn len(&self) -> usize {
    self.errors.len()
  }

  pub fn first(&self) -> Option<&FieldError> {
    self.errors.first()
  }

  pub fn get(&self, field: &str) -> Option<&str> {
    self.errors.iter().find(|e| e.field == field).map(|e| e.message.as_str())
  }

  pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
    self.errors.iter()
  }

  pub fn into_result(self) -> Result<(), ValidationErrors> {
    if self.is_empty() {
      Ok(())
    } else {
      Err(self)
    }
  }

  pub fn require_min_chars(&mut self, field: &'static str, value: &str, min: usize, message: &str) {
    if value.trim().chars().count() < min {
      self.add(field, message);
    }
  }

  pub fn require_phone(&mut self, field: &'static str, value: &str) {
    if !is_valid_phone(value) {
      self.add(field, "Enter a valid phone number (e.g. 01712345678).");
    }
  }
}

impl fmt::Display for ValidationErrors {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut first = true;
    for e in &self.errors {
      if !first {
        f.write_str("; ")?;
      }
      write!(f, "{}: {}", e.field, e.message)?;
      first = false;
    }
    Ok(())
  }
}

impl std::error::Error for ValidationErrors {}

static BD_MOBILE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^(?:\+?88)?01[3-9][0-9]{8}$").expect("phone pattern is valid"));

/// Bangladeshi mobile numbers: `01[3-9]` followed by eight digits, with an
/// optional `88`/`+88` country prefix. Spaces and dashes are ignored.
pub fn is_valid_phone(raw: &str) -> bool {
  let compact: String = raw.chars().filter(|c| !matches!(c, ' ' | '-')).collect();
  BD_MOBILE.is_match(&compact)
}
