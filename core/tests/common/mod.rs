// tests/common/mod.rs
#![allow(dead_code)] // Each test binary uses a different subset.

use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use storefront::cart::CartContext;
use storefront::models::{
  AddToCartRequest, Cart, Customer, Image, ItemKind, OrderDetails, OrderInfo, OrderListing, OrderPage, OrderStatus,
  Product, ProductCartItem, ProductRequestCartItem, Service, ServiceCartItem,
};
use storefront::product_request::{ProductRequestForm, RequestAction};
use storefront::profile::{AddressForm, ProfileForm};
use storefront::{
  AccountApi, ApiReply, CartApi, CollectingNotifier, Money, OrderApi, QueryCache, StorefrontConfig, StorefrontError,
};
use tracing::Level;

// --- Fixtures ---

pub fn product(id: &str, price: Option<i64>) -> Product {
  Product {
    id: id.to_string(),
    title: format!("Product {id}"),
    slug: format!("product-{id}"),
    price: price.map(Money::taka),
    discount: Money::ZERO,
    expires_at: None,
    images: vec![Image { image: format!("{id}.png") }],
  }
}

pub fn discounted_product(id: &str, price: i64, discount: i64, expires_at: DateTime<Utc>) -> Product {
  Product { discount: Money::taka(discount), expires_at: Some(expires_at), ..product(id, Some(price)) }
}

pub fn product_item(id: &str, price: Option<i64>, quantity: u32) -> ProductCartItem {
  ProductCartItem { id: id.to_string(), quantity, product: product(&format!("p-{id}"), price) }
}

pub fn service_item(id: &str, description: &str) -> ServiceCartItem {
  ServiceCartItem {
    id: id.to_string(),
    description: description.to_string(),
    service: Service {
      id: format!("s-{id}"),
      title: format!("Service {id}"),
      slug: format!("service-{id}"),
      price: None,
      images: vec![],
    },
  }
}

pub fn product_request_item(id: &str, quantity: u32) -> ProductRequestCartItem {
  ProductRequestCartItem {
    id: id.to_string(),
    title: format!("Request {id}"),
    quantity,
    price: None,
    file_name: format!("{id}.pdf"),
  }
}

pub fn cart_of(products: Vec<ProductCartItem>) -> Cart {
  Cart { product_items: products, ..Cart::default() }
}

pub fn valid_order_info() -> OrderInfo {
  OrderInfo {
    phone: "01712345678".into(),
    address: "House 9, Road 2, Uttara".into(),
    thana: "Uttara".into(),
    district: "Dhaka".into(),
  }
}

pub fn customer() -> Customer {
  Customer {
    id: "cust-1".into(),
    first_name: Some("Rahim".into()),
    last_name: Some("Uddin".into()),
    phone: Some("01812345678".into()),
    address: Some("Flat 3B, Lake Road, Gulshan".into()),
    thana: Some("Gulshan".into()),
    district: Some("Dhaka".into()),
    ..Customer::default()
  }
}

pub fn order(id: &str) -> OrderDetails {
  OrderDetails {
    id: id.to_string(),
    status: OrderStatus::Pending,
    created_at: Utc::now() - ChronoDuration::days(1),
    product_items: vec![],
    service_items: vec![],
    product_requests: vec![],
    payments: vec![],
  }
}

// --- In-memory backend ---

#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
  FetchCart,
  AddItem(AddToCartRequest),
  UpdateQuantity { kind: ItemKind, id: String, quantity: u32 },
  UpdateDescription { id: String, description: String },
  RemoveItem { kind: ItemKind, id: String },
  CreateOrder(OrderInfo),
  ListOrders { page: u32, limit: u32 },
  GetOrder(String),
  FetchCustomer,
  UpdateAddress(AddressForm),
  UpdateProfile(ProfileForm),
  SubmitProductRequest { action: RequestAction, title: String },
}

/// A backend kept in memory. Mutations can be made slow or made to fail once.
#[derive(Default)]
pub struct FakeApi {
  cart: Mutex<Cart>,
  orders: Mutex<Vec<OrderDetails>>,
  customer: Mutex<Customer>,
  calls: Mutex<Vec<ApiCall>>,
  next_failure: Mutex<Option<(u16, Option<String>)>>,
  latency: Mutex<Duration>,
}

impl FakeApi {
  pub fn with_cart(cart: Cart) -> Arc<Self> {
    let api = FakeApi { customer: Mutex::new(customer()), ..FakeApi::default() };
    *api.cart.lock() = cart;
    Arc::new(api)
  }

  pub fn with_orders(orders: Vec<OrderDetails>) -> Arc<Self> {
    let api = FakeApi { customer: Mutex::new(customer()), ..FakeApi::default() };
    *api.orders.lock() = orders;
    Arc::new(api)
  }

  /// The next mutation fails with `status` and the given server message.
  pub fn fail_next(&self, status: u16, message: Option<&str>) {
    *self.next_failure.lock() = Some((status, message.map(str::to_string)));
  }

  /// Mutations take this long to answer.
  pub fn set_latency(&self, latency: Duration) {
    *self.latency.lock() = latency;
  }

  pub fn calls(&self) -> Vec<ApiCall> {
    self.calls.lock().clone()
  }

  pub fn quantity_updates(&self) -> Vec<(ItemKind, String, u32)> {
    self
      .calls()
      .into_iter()
      .filter_map(|call| match call {
        ApiCall::UpdateQuantity { kind, id, quantity } => Some((kind, id, quantity)),
        _ => None,
      })
      .collect()
  }

  pub fn count(&self, matches: impl Fn(&ApiCall) -> bool) -> usize {
    self.calls.lock().iter().filter(|call| matches(call)).count()
  }

  pub fn server_cart(&self) -> Cart {
    self.cart.lock().clone()
  }

  fn record(&self, call: ApiCall) {
    self.calls.lock().push(call);
  }

  async fn mutation(&self, endpoint: &str) -> Result<(), StorefrontError> {
    let latency = *self.latency.lock();
    if !latency.is_zero() {
      tokio::time::sleep(latency).await;
    }
    match self.next_failure.lock().take() {
      Some((status, message)) => Err(StorefrontError::Api { endpoint: endpoint.to_string(), status, message }),
      None => Ok(()),
    }
  }

  fn ack(message: &str) -> ApiReply<()> {
    ApiReply { message: Some(message.to_string()), data: () }
  }
}

fn not_found(endpoint: &str) -> StorefrontError {
  StorefrontError::Api { endpoint: endpoint.to_string(), status: 404, message: Some("Cart item not found".into()) }
}

#[async_trait]
impl CartApi for FakeApi {
  async fn fetch_cart(&self) -> storefront::Result<Cart> {
    self.record(ApiCall::FetchCart);
    Ok(self.server_cart())
  }

  async fn add_item(&self, request: &AddToCartRequest) -> storefront::Result<ApiReply<Cart>> {
    self.record(ApiCall::AddItem(request.clone()));
    self.mutation("POST /cart").await?;
    let mut cart = self.cart.lock();
    let line_id = format!("ci-{}", cart.item_count() + 1);
    match request.kind {
      ItemKind::Product => cart.product_items.push(ProductCartItem {
        id: line_id,
        quantity: request.quantity.unwrap_or(1),
        product: product(&request.item_id, Some(100)),
      }),
      ItemKind::Service => {
        let mut item = service_item(&line_id, request.description.as_deref().unwrap_or_default());
        item.service.id = request.item_id.clone();
        cart.service_items.push(item);
      }
      ItemKind::ProductRequest => {
        cart.product_requests.push(product_request_item(&line_id, request.quantity.unwrap_or(1)))
      }
    }
    Ok(ApiReply { message: Some("Added to cart".into()), data: cart.clone() })
  }

  async fn update_quantity(&self, kind: ItemKind, id: &str, quantity: u32) -> storefront::Result<ApiReply<()>> {
    self.record(ApiCall::UpdateQuantity { kind, id: id.to_string(), quantity });
    let endpoint = format!("PUT /cart/{kind}/{id}");
    self.mutation(&endpoint).await?;
    let mut cart = self.cart.lock();
    let line = match kind {
      ItemKind::Product => cart.product_items.iter_mut().find(|i| i.id == id).map(|i| &mut i.quantity),
      ItemKind::ProductRequest => cart.product_requests.iter_mut().find(|i| i.id == id).map(|i| &mut i.quantity),
      ItemKind::Service => None,
    };
    match line {
      Some(current) => {
        *current = quantity;
        Ok(Self::ack("Cart updated"))
      }
      None => Err(not_found(&endpoint)),
    }
  }

  async fn update_description(&self, id: &str, description: &str) -> storefront::Result<ApiReply<()>> {
    self.record(ApiCall::UpdateDescription { id: id.to_string(), description: description.to_string() });
    let endpoint = format!("PUT /cart/service/{id}");
    self.mutation(&endpoint).await?;
    let mut cart = self.cart.lock();
    match cart.service_items.iter_mut().find(|i| i.id == id) {
      Some(item) => {
        item.description = description.to_string();
        Ok(Self::ack("Service item updated"))
      }
      None => Err(not_found(&endpoint)),
    }
  }

  async fn remove_item(&self, kind: ItemKind, id: &str) -> storefront::Result<ApiReply<()>> {
    self.record(ApiCall::RemoveItem { kind, id: id.to_string() });
    let endpoint = format!("DELETE /cart/{kind}/{id}");
    self.mutation(&endpoint).await?;
    let mut cart = self.cart.lock();
    let before = cart.item_count();
    match kind {
      ItemKind::Product => cart.product_items.retain(|i| i.id != id),
      ItemKind::Service => cart.service_items.retain(|i| i.id != id),
      ItemKind::ProductRequest => cart.product_requests.retain(|i| i.id != id),
    }
    if cart.item_count() == before {
      return Err(not_found(&endpoint));
    }
    Ok(Self::ack("Item removed"))
  }
}

#[async_trait]
impl OrderApi for FakeApi {
  async fn create_order(&self, info: &OrderInfo) -> storefront::Result<ApiReply<()>> {
    self.record(ApiCall::CreateOrder(info.clone()));
    self.mutation("POST /orders").await?;
    let cart = std::mem::take(&mut *self.cart.lock());
    let mut orders = self.orders.lock();
    let mut placed = order(&format!("ord-{}", orders.len() + 1));
    placed.product_items = cart
      .product_items
      .into_iter()
      .map(|item| storefront::models::OrderedProduct {
        id: item.id,
        quantity: item.quantity,
        price: item.product.price,
        product: Some(item.product),
      })
      .collect();
    orders.push(placed);
    Ok(Self::ack("Order placed successfully"))
  }

  async fn list_orders(&self, page: u32, limit: u32) -> storefront::Result<OrderPage> {
    self.record(ApiCall::ListOrders { page, limit });
    let orders = self.orders.lock();
    let total_pages = ((orders.len() as u32).saturating_sub(1) / limit.max(1)) + 1;
    let listings = orders
      .iter()
      .skip(((page.max(1) - 1) * limit) as usize)
      .take(limit as usize)
      .map(|o| OrderListing { id: o.id.clone(), status: o.status, created_at: o.created_at, counts: Default::default() })
      .collect();
    Ok(OrderPage { orders: listings, current_page: page, total_pages })
  }

  async fn get_order(&self, id: &str) -> storefront::Result<OrderDetails> {
    self.record(ApiCall::GetOrder(id.to_string()));
    self.orders.lock().iter().find(|o| o.id == id).cloned().ok_or_else(|| StorefrontError::Api {
      endpoint: format!("GET /orders/{id}"),
      status: 404,
      message: Some("Order not found".into()),
    })
  }
}

#[async_trait]
impl AccountApi for FakeApi {
  async fn fetch_customer(&self) -> storefront::Result<Customer> {
    self.record(ApiCall::FetchCustomer);
    Ok(self.customer.lock().clone())
  }

  async fn update_address(&self, form: &AddressForm) -> storefront::Result<ApiReply<Customer>> {
    self.record(ApiCall::UpdateAddress(form.clone()));
    self.mutation("PATCH /customer").await?;
    let mut customer = self.customer.lock();
    customer.address = Some(form.address.clone());
    customer.thana = Some(form.thana.clone());
    customer.district = Some(form.district.clone());
    Ok(ApiReply { message: Some("Profile updated successfully".into()), data: customer.clone() })
  }

  async fn update_profile(&self, form: &ProfileForm) -> storefront::Result<ApiReply<Customer>> {
    self.record(ApiCall::UpdateProfile(form.clone()));
    self.mutation("PATCH /customer").await?;
    let mut customer = self.customer.lock();
    customer.first_name = Some(form.first_name.clone());
    customer.last_name = Some(form.last_name.clone());
    customer.company_name = Some(form.company_name.clone()).filter(|c| !c.is_empty());
    customer.phone = Some(form.phone.clone());
    Ok(ApiReply { message: Some("Profile updated successfully".into()), data: customer.clone() })
  }

  async fn submit_product_request(
    &self,
    action: RequestAction,
    form: &ProductRequestForm,
  ) -> storefront::Result<ApiReply<()>> {
    self.record(ApiCall::SubmitProductRequest { action, title: form.title.clone() });
    self.mutation(action.path()).await?;
    if action == RequestAction::AddToCart {
      let mut cart = self.cart.lock();
      let line_id = format!("pr-{}", cart.product_requests.len() + 1);
      cart.product_requests.push(product_request_item(&line_id, form.quantity));
    }
    Ok(Self::ack("Product request submitted"))
  }
}

// --- Wiring helpers ---

pub const QUIET_WINDOW: Duration = Duration::from_millis(500);

pub struct Harness {
  pub api: Arc<FakeApi>,
  pub cache: QueryCache,
  pub notifier: CollectingNotifier,
  pub ctx: CartContext,
}

pub fn harness(api: Arc<FakeApi>) -> Harness {
  let cache = QueryCache::new();
  let notifier = CollectingNotifier::new();
  let ctx = CartContext::new(api.clone(), cache.clone(), Arc::new(notifier.clone())).with_quiet_window(QUIET_WINDOW);
  Harness { api, cache, notifier, ctx }
}

pub fn test_config(base_url: &str) -> StorefrontConfig {
  let mut config = StorefrontConfig::new(base_url.parse().expect("mock server url"));
  config.timeout = Duration::from_secs(5);
  config
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
