// storefront/src/catalog.rs

//! Catalog listing queries and pagination.
//!
//! A [`CatalogQuery`] is the state of a listing page's filters. It lives in
//! the URL query string, so it round-trips through
//! [`CatalogQuery::to_query_string`] and [`CatalogQuery::from_query_string`].

use crate::config::DEFAULT_PAGE_LIMIT;
use url::form_urlencoded;

/// The "no filter" value of the category selector.
pub const ALL_CATEGORIES: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogQuery {
  pub search: Option<String>,
  pub category: Option<String>,
  /// 1-based.
  pub page: u32,
  pub limit: u32,
}

impl Default for CatalogQuery {
  fn default() -> Self {
    CatalogQuery { search: None, category: None, page: 1, limit: DEFAULT_PAGE_LIMIT }
  }
}

fn non_empty(value: &str) -> Option<String> {
  let trimmed = value.trim();
  (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl CatalogQuery {
  pub fn new() -> Self {
    Self::default()
  }

  /// Same filters, another page.
  pub fn with_page(&self, page: u32) -> Self {
    CatalogQuery { page: page.max(1), ..self.clone() }
  }

  pub fn with_limit(&self, limit: u32) -> Self {
    CatalogQuery { limit: limit.max(1), page: 1, ..self.clone() }
  }

  pub fn with_search(&self, search: &str) -> Self {
    CatalogQuery { search: non_empty(search), page: 1, ..self.clone() }
  }

  /// Selecting [`ALL_CATEGORIES`] clears the filter.
  pub fn with_category(&self, category: &str) -> Self {
    let category = non_empty(category).filter(|c| c != ALL_CATEGORIES);
    CatalogQuery { category, page: 1, ..self.clone() }
  }

  pub fn pairs(&self) -> Vec<(&'static str, String)> {
    let mut pairs = Vec::with_capacity(4);
    if let Some(search) = &self.search {
      pairs.push(("search", search.clone()));
    }
    pairs.push(("page", self.page.to_string()));
    pairs.push(("limit", self.limit.to_string()));
    if let Some(category) = &self.category {
      pairs.push(("category", category.clone()));
    }
    pairs
  }

  pub fn to_query_string(&self) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in self.pairs() {
      serializer.append_pair(key, &value);
    }
    serializer.finish()
  }

  /// Parses a query string, with or without the leading `?`. Unknown keys are
  /// ignored; a missing or unparsable page or limit falls back to the default.
  pub fn from_query_string(raw: &str) -> Self {
    let mut query = CatalogQuery::default();
    for (key, value) in form_urlencoded::parse(raw.trim_start_matches('?').as_bytes()) {
      match key.as_ref() {
        "search" => query.search = non_empty(&value),
        "category" => query.category = non_empty(&value).filter(|c| c != ALL_CATEGORIES),
        "page" => query.page = value.parse().ok().filter(|p| *p >= 1).unwrap_or(1),
        "limit" => query.limit = value.parse().ok().filter(|l| *l >= 1).unwrap_or(DEFAULT_PAGE_LIMIT),
        _ => {}
      }
    }
    query
  }
}

/// Page numbers a pager shows around `current`: up to two on either side,
/// within `1..=total`.
pub fn page_window(current: u32, total: u32) -> Vec<u32> {
  if total == 0 {
    return Vec::new();
  }
  let current = current.clamp(1, total);
  (current.saturating_sub(2).max(1)..=current.saturating_add(2).min(total)).collect()
}
