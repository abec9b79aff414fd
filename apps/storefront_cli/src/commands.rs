// storefront_cli/src/commands.rs

use crate::app::App;
use crate::cli::{AddArgs, CatalogArgs, CheckoutArgs, Command, KindArg, ProfileArgs, RequestArgs, SetQuantityArgs};
use crate::render;
use anyhow::{anyhow, bail, Context};
use chrono::Utc;
use serde::Serialize;
use storefront::cart::{add_button_label, ItemPhase};
use storefront::models::{Customer, ItemKind, OrderInfo};
use storefront::product_request::{Attachment, ProductRequestForm, RequestAction};
use storefront::profile::{AddressForm, ProfileForm};
use storefront::{AddToCart, CartSummary, CatalogQuery, Checkout};
use tracing::{info, instrument, warn};

/// Prints `value` as JSON, or the text view otherwise.
fn emit<T: Serialize>(json: bool, value: &T, text: impl FnOnce() -> String) -> anyhow::Result<()> {
  if json {
    println!("{}", serde_json::to_string_pretty(value)?);
  } else {
    print!("{}", text());
  }
  Ok(())
}

fn apply_contact(info: &mut OrderInfo, args: CheckoutArgs) {
  if let Some(phone) = args.phone {
    info.phone = phone;
  }
  if let Some(address) = args.address {
    info.address = address;
  }
  if let Some(thana) = args.thana {
    info.thana = thana;
  }
  if let Some(district) = args.district {
    info.district = district;
  }
}

/// The profile is only a source of defaults; a failed fetch leaves the
/// forms blank.
async fn prefill_customer(app: &App) -> Option<Customer> {
  if !app.session.is_authenticated() {
    return None;
  }
  match app.profile().customer().await {
    Ok(customer) => Some(customer),
    Err(err) => {
      warn!(error = %err, "Could not load the profile for prefill.");
      None
    }
  }
}

pub async fn dispatch(app: &App, command: Command, json: bool) -> anyhow::Result<()> {
  match command {
    Command::Cart => show_cart(app, json).await,
    Command::Add(args) => add(app, args, json).await,
    Command::SetQuantity(args) => set_quantity(app, args).await,
    Command::Describe { line_id, description } => describe(app, &line_id, &description).await,
    Command::Remove { kind, line_id } => remove(app, kind, &line_id).await,
    Command::Checkout(args) => checkout(app, args).await,
    Command::Orders { page, limit } => {
      let page = app.orders().list(page, limit.unwrap_or(app.config.page_limit)).await?;
      emit(json, &page, || render::orders(&page))
    }
    Command::Order { id } => {
      let (details, summary) = app.orders().summary(&id).await?;
      emit(json, &details, || render::order(&details, &summary))
    }
    Command::Products(args) => {
      let products = app.client.list_products(&catalog_query(app, args)).await?;
      emit(json, &products, || render::products(&products, Utc::now()))
    }
    Command::Services(args) => {
      let services = app.client.list_services(&catalog_query(app, args)).await?;
      emit(json, &services, || render::services(&services))
    }
    Command::Consultants(args) => {
      let consultants = app.client.list_consultants(&catalog_query(app, args)).await?;
      emit(json, &consultants, || render::consultants(&consultants))
    }
    Command::Profile => {
      let customer = app.profile().customer().await?;
      emit(json, &customer, || render::customer(&customer))
    }
    Command::SetAddress(args) => {
      let form = AddressForm { address: args.address, thana: args.thana, district: args.district };
      let customer = app.profile().update_address(&form).await?;
      emit(json, &customer, || render::customer(&customer))
    }
    Command::EditProfile(args) => edit_profile(app, args, json).await,
    Command::Request(args) => request(app, args).await,
  }
}

async fn edit_profile(app: &App, args: ProfileArgs, json: bool) -> anyhow::Result<()> {
  let profile = app.profile();
  let current = profile.customer().await?;
  let mut form = ProfileForm::prefilled(Some(&current));
  if let Some(first_name) = args.first_name {
    form.first_name = first_name;
  }
  if let Some(last_name) = args.last_name {
    form.last_name = last_name;
  }
  if let Some(company_name) = args.company_name {
    form.company_name = company_name;
  }
  if let Some(phone) = args.phone {
    form.phone = phone;
  }

  let customer = profile.update_profile(&form).await?;
  emit(json, &customer, || render::customer(&customer))
}

fn catalog_query(app: &App, args: CatalogArgs) -> CatalogQuery {
  let mut query = CatalogQuery::new().with_limit(app.config.page_limit);
  if let Some(search) = &args.search {
    query = query.with_search(search);
  }
  if let Some(category) = &args.category {
    query = query.with_category(category);
  }
  // Filters reset the page, so it goes last.
  query.with_page(args.page)
}

async fn show_cart(app: &App, json: bool) -> anyhow::Result<()> {
  let cart = app.carts().cart().await?;
  let now = Utc::now();
  let summary = CartSummary::compute(&cart, now);
  emit(json, &cart, || render::cart(&cart, &summary, now))
}

#[instrument(skip(app, args), fields(kind = ?args.kind, item_id = %args.item_id))]
async fn add(app: &App, args: AddArgs, json: bool) -> anyhow::Result<()> {
  let kind = ItemKind::from(args.kind);
  let mut item = AddToCart::new(kind, args.item_id, args.slug).quantity(args.quantity);
  if let Some(description) = args.description {
    item = item.description(description);
  }

  info!("{}...", add_button_label(kind, true));
  let reply = app.carts().add_to_cart(item).await?;
  let now = Utc::now();
  let summary = CartSummary::compute(&reply.data, now);
  emit(json, &reply.data, || {
    format!("{}\n\n{}", reply.message_or("Added to cart"), render::cart(&reply.data, &summary, now))
  })
}

async fn set_quantity(app: &App, args: SetQuantityArgs) -> anyhow::Result<()> {
  let kind = ItemKind::from(args.kind);
  if !kind.has_quantity() {
    bail!("{kind} lines have no quantity");
  }

  let carts = app.carts();
  let cart = carts.cart().await?;
  let line = carts
    .item_controller(&cart, kind, &args.line_id)
    .ok_or_else(|| anyhow!("no {kind} line '{}' in the cart", args.line_id))?;

  if !line.set_quantity(args.quantity) {
    println!("Quantity unchanged at {}.", line.quantity());
    return Ok(());
  }
  // A one-shot invocation cannot wait out the quiet window.
  line.flush().await;

  match line.phase() {
    ItemPhase::Reverted => bail!("quantity change rejected; still {}", line.confirmed_quantity()),
    _ => {
      println!("Quantity set to {}.", line.confirmed_quantity());
      Ok(())
    }
  }
}

async fn describe(app: &App, line_id: &str, description: &str) -> anyhow::Result<()> {
  let carts = app.carts();
  let cart = carts.cart().await?;
  let line = carts
    .service_controller(&cart, line_id)
    .ok_or_else(|| anyhow!("no service line '{line_id}' in the cart"))?;

  if line.update_description(description).await? {
    println!("Description updated.");
  } else {
    println!("Description unchanged.");
  }
  Ok(())
}

async fn remove(app: &App, kind: KindArg, line_id: &str) -> anyhow::Result<()> {
  let kind = ItemKind::from(kind);
  let carts = app.carts();
  let cart = carts.cart().await?;

  if kind == ItemKind::Service {
    let line = carts
      .service_controller(&cart, line_id)
      .ok_or_else(|| anyhow!("no service line '{line_id}' in the cart"))?;
    line.remove().await?;
  } else {
    let line = carts
      .item_controller(&cart, kind, line_id)
      .ok_or_else(|| anyhow!("no {kind} line '{line_id}' in the cart"))?;
    line.remove().await?;
  }
  println!("Removed {kind} line {line_id}.");
  Ok(())
}

#[instrument(skip_all)]
async fn checkout(app: &App, args: CheckoutArgs) -> anyhow::Result<()> {
  let customer = prefill_customer(app).await;
  let checkout = Checkout::new(app.client.clone(), app.cache.clone(), app.notifier.clone(), customer.as_ref())?;
  checkout.edit(|form| apply_contact(form, args));

  let summary = app.carts().summary(Utc::now()).await?;
  if summary.needs_pricing_approval() {
    println!("{}", storefront::cart::PRICING_APPROVAL_NOTICE);
  }
  let outcome = checkout.submit(&summary).await?;
  println!("{} (see {})", outcome.message, outcome.route);
  Ok(())
}

#[instrument(skip_all, fields(title = %args.title, order_now = args.order_now))]
async fn request(app: &App, args: RequestArgs) -> anyhow::Result<()> {
  let bytes = tokio::fs::read(&args.file)
    .await
    .with_context(|| format!("reading {}", args.file.display()))?;
  let file_name = args
    .file
    .file_name()
    .map(|name| name.to_string_lossy().into_owned())
    .ok_or_else(|| anyhow!("{} is not a file", args.file.display()))?;

  let customer = prefill_customer(app).await;
  let mut form = ProductRequestForm::prefilled(customer.as_ref());
  form.title = args.title;
  form.quantity = args.quantity;
  form.description = args.description;
  form.attachment = Some(Attachment::from_file_name(file_name, bytes));

  let mut contact = OrderInfo {
    phone: form.phone.clone(),
    address: form.address.clone(),
    thana: form.thana.clone(),
    district: form.district.clone(),
  };
  apply_contact(&mut contact, args.contact);
  form.phone = contact.phone;
  form.address = contact.address;
  form.thana = contact.thana;
  form.district = contact.district;

  let action = if args.order_now { RequestAction::OrderNow } else { RequestAction::AddToCart };
  let reply = app.product_requests().submit(action, &form).await?;
  println!("{}", reply.message_or("Product request submitted"));
  Ok(())
}
