// storefront/src/models/mod.rs

//! Wire models for the storefront API. Field names follow the backend's
//! camelCase JSON.

pub mod cart;
pub mod catalog;
pub mod customer;
pub mod order;

pub use cart::{AddToCartRequest, Cart, CartItem, ItemKind, ProductCartItem, ProductRequestCartItem, ServiceCartItem};
pub use catalog::{Category, Consultant, ConsultantPage, Image, Product, ProductPage, Service, ServicePage};
pub use customer::Customer;
pub use order::{
  OrderDetails, OrderInfo, OrderItemCounts, OrderListing, OrderPage, OrderStatus, OrderedProduct,
  OrderedProductRequest, OrderedService, Payment,
};
