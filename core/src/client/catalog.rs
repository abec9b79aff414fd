// storefront/src/client/catalog.rs

//! Public catalog reads. These need no session but send the token anyway
//! when one is present, as every other call does.

use super::StorefrontClient;
use crate::catalog::CatalogQuery;
use crate::error::Result;
use crate::models::{Category, ConsultantPage, Product, ProductPage, Service, ServicePage};
use reqwest::Method;
use tracing::instrument;

impl StorefrontClient {
  #[instrument(skip(self), err(Display))]
  pub async fn list_products(&self, query: &CatalogQuery) -> Result<ProductPage> {
    let endpoint = "GET /products";
    let builder = self.request(Method::GET, "/products").query(&query.pairs());
    self.execute::<ProductPage>(endpoint, builder).await?.into_data(endpoint)
  }

  #[instrument(skip(self), err(Display))]
  pub async fn get_product(&self, slug: &str) -> Result<Product> {
    let path = format!("/products/{slug}");
    let endpoint = format!("GET {path}");
    self.execute::<Product>(&endpoint, self.request(Method::GET, &path)).await?.into_data(&endpoint)
  }

  #[instrument(skip(self), err(Display))]
  pub async fn list_services(&self, query: &CatalogQuery) -> Result<ServicePage> {
    let endpoint = "GET /services";
    let builder = self.request(Method::GET, "/services").query(&query.pairs());
    self.execute::<ServicePage>(endpoint, builder).await?.into_data(endpoint)
  }

  #[instrument(skip(self), err(Display))]
  pub async fn get_service(&self, slug: &str) -> Result<Service> {
    let path = format!("/services/{slug}");
    let endpoint = format!("GET {path}");
    self.execute::<Service>(&endpoint, self.request(Method::GET, &path)).await?.into_data(&endpoint)
  }

  /// `GET /consultants`, filtered like the other listings.
  #[instrument(skip(self), err(Display))]
  pub async fn list_consultants(&self, query: &CatalogQuery) -> Result<ConsultantPage> {
    let endpoint = "GET /consultants";
    let builder = self.request(Method::GET, "/consultants").query(&query.pairs());
    self.execute::<ConsultantPage>(endpoint, builder).await?.into_data(endpoint)
  }

  #[instrument(skip(self), err(Display))]
  pub async fn list_categories(&self) -> Result<Vec<Category>> {
    let endpoint = "GET /categories";
    let envelope = self.execute::<Vec<Category>>(endpoint, self.request(Method::GET, "/categories")).await?;
    Ok(envelope.data.unwrap_or_default())
  }
}
