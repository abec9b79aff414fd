// storefront_cli/src/render.rs

//! Plain-text views of API data.

use chrono::{DateTime, Utc};
use std::fmt::Write;
use storefront::cart::{CartSummary, PRICING_APPROVAL_NOTICE};
use storefront::catalog::page_window;
use storefront::models::{Cart, ConsultantPage, Customer, OrderDetails, OrderPage, ProductPage, ServicePage};
use storefront::money::TAKA_SIGN;
use storefront::pricing::{effective_price, line_label, price_tag, PRICE_ON_REQUEST};
use storefront::OrderSummary;

fn pager(current: u32, total: u32) -> String {
  let pages: Vec<String> = page_window(current, total)
    .into_iter()
    .map(|p| if p == current { format!("[{p}]") } else { p.to_string() })
    .collect();
  format!("Page {current} of {total}: {}", pages.join(" "))
}

pub fn cart(cart: &Cart, summary: &CartSummary, now: DateTime<Utc>) -> String {
  let mut out = String::new();
  if cart.is_empty() {
    return "Your cart is empty.\n".to_string();
  }

  for item in &cart.product_items {
    let price = effective_price(&item.product, now);
    let _ = writeln!(out, "  {:<14} {:<30} {}", item.id, item.product.title, line_label(price, item.quantity));
  }
  for item in &cart.service_items {
    let _ = writeln!(out, "  {:<14} {:<30} {} ({})", item.id, item.service.title, PRICE_ON_REQUEST, item.description_preview());
  }
  for item in &cart.product_requests {
    let price = effective_price(item, now);
    let _ = writeln!(out, "  {:<14} {:<30} {}", item.id, item.title, line_label(price, item.quantity));
  }

  out.push('\n');
  for line in summary.lines() {
    let _ = writeln!(out, "  {line}");
  }
  let _ = writeln!(out, "  Total: {}", summary.total);
  if summary.needs_pricing_approval() {
    let _ = writeln!(out, "  {PRICING_APPROVAL_NOTICE}");
  }
  out
}

pub fn products(page: &ProductPage, now: DateTime<Utc>) -> String {
  let mut out = String::new();
  for product in &page.products {
    let price = match price_tag(product, now) {
      Some(tag) if tag.is_discounted() => format!("{TAKA_SIGN}{} (was {TAKA_SIGN}{})", tag.current, tag.original),
      Some(tag) => format!("{TAKA_SIGN}{}", tag.current),
      None => PRICE_ON_REQUEST.to_string(),
    };
    let _ = writeln!(out, "  {:<12} {:<36} {}", product.id, product.title, price);
  }
  let _ = writeln!(out, "{}", pager(page.current_page, page.total_pages));
  out
}

pub fn services(page: &ServicePage) -> String {
  let mut out = String::new();
  for service in &page.services {
    let price = service.price.filter(|p| p.is_positive()).map_or(PRICE_ON_REQUEST.to_string(), |p| format!("{TAKA_SIGN}{p}"));
    let _ = writeln!(out, "  {:<12} {:<36} {}", service.id, service.title, price);
  }
  let _ = writeln!(out, "{}", pager(page.current_page, page.total_pages));
  out
}

pub fn consultants(page: &ConsultantPage) -> String {
  if page.consultants.is_empty() {
    return "No consultants found.\n".to_string();
  }
  let mut out = String::new();
  for consultant in &page.consultants {
    let _ = writeln!(
      out,
      "  {:<12} {:<28} {} ({} years)",
      consultant.id, consultant.full_name, consultant.title, consultant.experience
    );
    if !consultant.specializations.is_empty() {
      let _ = writeln!(out, "  {:<12} {}", "", consultant.specializations.join(", "));
    }
    let _ = writeln!(out, "  {:<12} {}", "", consultant.bio_preview());
  }
  if page.total_pages > 1 {
    let _ = writeln!(out, "{}", pager(page.current_page, page.total_pages));
  }
  out
}

pub fn orders(page: &OrderPage) -> String {
  if page.orders.is_empty() {
    return "No orders yet.\n".to_string();
  }
  let mut out = String::new();
  for order in &page.orders {
    let c = order.counts;
    let _ = writeln!(
      out,
      "  {:<14} {:<15} {}  {} products, {} services, {} requests",
      order.id,
      order.status,
      order.created_at.format("%Y-%m-%d"),
      c.product_items,
      c.service_items,
      c.product_requests
    );
  }
  if page.has_more_pages() {
    let _ = writeln!(out, "{}", pager(page.current_page, page.total_pages));
  }
  out
}

pub fn order(order: &OrderDetails, summary: &OrderSummary) -> String {
  let mut out = String::new();
  let _ = writeln!(out, "Order {} ({}), placed {}", order.id, order.status, order.created_at.format("%Y-%m-%d %H:%M"));

  for item in &order.product_items {
    let title = item.product.as_ref().map_or("Product", |p| p.title.as_str());
    let _ = writeln!(out, "  {:<30} {}", title, line_label(item.price.filter(|p| p.is_positive()), item.quantity));
  }
  for item in &order.service_items {
    let title = item.service.as_ref().map_or("Service", |s| s.title.as_str());
    let price = item.price.filter(|p| p.is_positive()).map_or(PRICE_ON_REQUEST.to_string(), |p| format!("{TAKA_SIGN}{p}"));
    let _ = writeln!(out, "  {title:<30} {price}");
  }
  for item in &order.product_requests {
    let _ = writeln!(out, "  {:<30} {}", item.title, line_label(item.price.filter(|p| p.is_positive()), item.quantity));
  }

  let _ = writeln!(out, "\n  Paid: {TAKA_SIGN}{}", summary.paid);
  match summary.total_due {
    Some(due) => {
      let _ = writeln!(out, "  Total due: {TAKA_SIGN}{due}");
    }
    None => {
      let _ = writeln!(out, "  Total due: pending pricing approval");
    }
  }
  out
}

pub fn customer(customer: &Customer) -> String {
  let field = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());
  format!(
    "{}\n  company:  {}\n  phone:    {}\n  address:  {}\n  thana:    {}\n  district: {}\n",
    customer.display_name().unwrap_or_else(|| customer.id.clone()),
    field(&customer.company_name),
    field(&customer.phone),
    field(&customer.address),
    field(&customer.thana),
    field(&customer.district),
  )
}
