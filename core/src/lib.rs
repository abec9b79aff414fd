// src/lib.rs

//! Storefront: an async, typed client core for a storefront REST API.
//!
//! The server owns every business rule; this crate mirrors its state and
//! keeps the client side consistent with it:
//!  - Effective prices with time-limited discounts.
//!  - Debounced, optimistic cart quantity updates with revert on failure.
//!  - Cart totals that fall back to "Quote Required" for unpriced lines.
//!  - A query cache with an explicit invalidation contract.
//!  - Order submission as a named-step flow.

pub mod api;
pub mod cache;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod client;
pub mod config;
pub mod debounce;
pub mod error;
pub mod flow;
pub mod models;
pub mod money;
pub mod notify;
pub mod orders;
pub mod pricing;
pub mod product_request;
pub mod profile;
pub mod session;
pub mod validation;

// --- Re-exports for the Public API ---

pub use crate::api::{AccountApi, ApiReply, CartApi, OrderApi};
pub use crate::cache::{CacheKey, CacheScope, Mutation, QueryCache};
pub use crate::cart::{
  AddToCart, CartContext, CartItemController, CartService, CartSummary, ItemPhase, LoadingFlag,
  ServiceItemController, Total,
};
pub use crate::catalog::CatalogQuery;
pub use crate::checkout::{Checkout, CheckoutOutcome, CheckoutPhase};
pub use crate::client::StorefrontClient;
pub use crate::config::{ConfigError, StorefrontConfig};
pub use crate::debounce::Debouncer;
pub use crate::error::{Result, StorefrontError};
pub use crate::money::Money;
pub use crate::notify::{CollectingNotifier, Notifier, TracingNotifier};
pub use crate::orders::{OrderService, OrderSummary};
pub use crate::pricing::{effective_price, Priced};
pub use crate::session::{LoginRedirect, Session, SharedSession};

/*
    Typical wiring:
    1. Load a `StorefrontConfig` (`from_env()` or `new(url)`).
    2. Build a `SharedSession` from the caller's access token.
    3. Create one `StorefrontClient` and wrap it in an `Arc`; it implements
       `CartApi`, `OrderApi` and `AccountApi`.
    4. Share one `QueryCache` and one `Notifier` between the services.
    5. `CartService` hands out a controller per cart line; `Checkout` places
       the order once the cart summary allows it.
*/
