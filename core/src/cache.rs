// storefront/src/cache.rs

//! Client-side query cache.
//!
//! The cache mirrors server state; it never owns it. Entries are keyed by
//! [`CacheKey`] and grouped into [`CacheScope`]s. Mutations invalidate scopes
//! according to [`Mutation::invalidates`], which is the whole invalidation
//! contract:
//!
//! | Mutation              | Invalidated scopes          |
//! |-----------------------|-----------------------------|
//! | `CartChanged`         | `Cart`                      |
//! | `OrderPlaced`         | `Cart`, `Orders`            |
//! | `ProductRequestAdded` | `Cart`                      |
//! | `ProductRequestOrdered` | `Orders`                  |
//! | `ProfileUpdated`      | `Profile`                   |
//!
//! Every invalidation bumps the generation of the affected entries. A fetch
//! that started before an invalidation still returns its value to the
//! caller, but does not store it as fresh: the last invalidation wins.

use parking_lot::Mutex;
use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
  CartInfo,
  Orders { page: u32, limit: u32 },
  OrderDetails(String),
  Customer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheScope {
  Cart,
  Orders,
  Profile,
}

impl CacheKey {
  pub fn scope(&self) -> CacheScope {
    match self {
      CacheKey::CartInfo => CacheScope::Cart,
      CacheKey::Orders { .. } | CacheKey::OrderDetails(_) => CacheScope::Orders,
      CacheKey::Customer => CacheScope::Profile,
    }
  }
}

/// Server-side changes the client knows it caused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
  CartChanged,
  OrderPlaced,
  ProductRequestAdded,
  ProductRequestOrdered,
  ProfileUpdated,
}

impl Mutation {
  pub fn invalidates(self) -> &'static [CacheScope] {
    match self {
      Mutation::CartChanged | Mutation::ProductRequestAdded => &[CacheScope::Cart],
      Mutation::OrderPlaced => &[CacheScope::Cart, CacheScope::Orders],
      Mutation::ProductRequestOrdered => &[CacheScope::Orders],
      Mutation::ProfileUpdated => &[CacheScope::Profile],
    }
  }
}

#[derive(Default)]
struct Entry {
  value: Option<Arc<dyn Any + Send + Sync>>,
  generation: u64,
  stale: bool,
}

/// Shared query cache; clones share the same storage.
#[derive(Clone, Default)]
pub struct QueryCache {
  entries: Arc<Mutex<HashMap<CacheKey, Entry>>>,
}

impl std::fmt::Debug for QueryCache {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let entries = self.entries.lock();
    let mut keys: Vec<String> = entries
      .iter()
      .map(|(k, e)| format!("{k:?}{}", if e.stale { " (stale)" } else { "" }))
      .collect();
    keys.sort();
    f.debug_struct("QueryCache").field("entries", &keys).finish()
  }
}

impl QueryCache {
  pub fn new() -> Self {
    Self::default()
  }

  /// The cached value if present and fresh.
  pub fn get<T: Clone + Send + Sync + 'static>(&self, key: &CacheKey) -> Option<T> {
    let entries = self.entries.lock();
    let entry = entries.get(key).filter(|e| !e.stale)?;
    Self::downcast(key, entry)
  }

  /// The cached value even if stale, for showing something while refetching.
  pub fn peek<T: Clone + Send + Sync + 'static>(&self, key: &CacheKey) -> Option<T> {
    let entries = self.entries.lock();
    Self::downcast(key, entries.get(key)?)
  }

  fn downcast<T: Clone + Send + Sync + 'static>(key: &CacheKey, entry: &Entry) -> Option<T> {
    let value = entry.value.as_ref()?;
    let typed = value.downcast_ref::<T>().cloned();
    if typed.is_none() {
      tracing::warn!(?key, expected = std::any::type_name::<T>(), "Cache entry holds a different type.");
    }
    typed
  }

  pub fn is_fresh(&self, key: &CacheKey) -> bool {
    self.entries.lock().get(key).is_some_and(|e| e.value.is_some() && !e.stale)
  }

  /// Stores `value` as fresh, as after a mutation that returns the new state.
  pub fn set<T: Send + Sync + 'static>(&self, key: CacheKey, value: T) {
    let mut entries = self.entries.lock();
    let entry = entries.entry(key).or_default();
    entry.generation += 1;
    entry.value = Some(Arc::new(value));
    entry.stale = false;
  }

  /// Marks every entry in `scope` stale. Returns how many entries changed.
  pub fn invalidate(&self, scope: CacheScope) -> usize {
    let mut entries = self.entries.lock();
    let mut touched = 0;
    for (_, entry) in entries.iter_mut().filter(|(k, _)| k.scope() == scope) {
      entry.generation += 1;
      entry.stale = true;
      touched += 1;
    }
    tracing::debug!(?scope, touched, "Cache scope invalidated.");
    touched
  }

  pub fn apply(&self, mutation: Mutation) {
    tracing::debug!(?mutation, "Applying cache invalidation for mutation.");
    for scope in mutation.invalidates() {
      self.invalidate(*scope);
    }
  }

  /// Returns the fresh cached value, or runs `fetch` and caches its result
  /// unless the key was invalidated while the fetch was in flight.
  pub async fn get_or_fetch<T, E, F, Fut>(&self, key: CacheKey, fetch: F) -> Result<T, E>
  where
    T: Clone + Send + Sync + 'static,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
  {
    if let Some(value) = self.get::<T>(&key) {
      return Ok(value);
    }

    let started_at = self.begin_fetch(&key);
    let value = fetch().await?;
    self.complete_fetch(key, started_at, value.clone());
    Ok(value)
  }

  fn begin_fetch(&self, key: &CacheKey) -> u64 {
    let mut entries = self.entries.lock();
    let entry = entries.entry(key.clone()).or_insert_with(|| Entry { stale: true, ..Entry::default() });
    entry.generation
  }

  fn complete_fetch<T: Send + Sync + 'static>(&self, key: CacheKey, started_at: u64, value: T) {
    let mut entries = self.entries.lock();
    let entry = entries.entry(key.clone()).or_default();
    if entry.generation != started_at {
      tracing::debug!(?key, "Discarding fetch result superseded by a newer invalidation or write.");
      return;
    }
    entry.generation += 1;
    entry.value = Some(Arc::new(value));
    entry.stale = false;
  }
}
