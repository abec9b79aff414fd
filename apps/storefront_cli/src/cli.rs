// storefront_cli/src/cli.rs

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use storefront::models::ItemKind;

/// Storefront command-line client: browse the catalog, manage the cart,
/// place orders and product requests.
#[derive(Parser, Debug)]
#[command(name = "storefront", version, about)]
pub struct Cli {
  #[command(flatten)]
  pub connection: ConnectionArgs,

  /// Print results as JSON instead of text.
  #[arg(long, global = true)]
  pub json: bool,

  /// Emit logs as JSON lines on stderr.
  #[arg(long, global = true)]
  pub log_json: bool,

  #[command(subcommand)]
  pub command: Command,
}

/// Overrides for the `STOREFRONT_*` environment.
#[derive(Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
  /// Base URL of the storefront API.
  #[arg(long, global = true)]
  pub api_url: Option<String>,

  /// Access token of a signed-in customer.
  #[arg(long, global = true)]
  pub token: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
  /// Show the cart and its totals.
  Cart,
  /// Add a product or book a service.
  Add(AddArgs),
  /// Change a cart line's quantity.
  SetQuantity(SetQuantityArgs),
  /// Change a service line's description.
  Describe {
    line_id: String,
    description: String,
  },
  /// Remove a cart line.
  Remove {
    #[arg(value_enum)]
    kind: KindArg,
    line_id: String,
  },
  /// Place an order for the whole cart.
  Checkout(CheckoutArgs),
  /// List past orders.
  Orders {
    #[arg(long, default_value_t = 1)]
    page: u32,
    #[arg(long)]
    limit: Option<u32>,
  },
  /// Show one order with its totals.
  Order { id: String },
  /// Browse the product catalog.
  Products(CatalogArgs),
  /// Browse bookable services.
  Services(CatalogArgs),
  /// Browse consultants.
  Consultants(CatalogArgs),
  /// Show the signed-in customer.
  Profile,
  /// Update name, company or phone. Omitted fields keep their current value.
  EditProfile(ProfileArgs),
  /// Update the default delivery address.
  SetAddress(AddressArgs),
  /// Request a product the catalog does not carry.
  Request(RequestArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
  Product,
  Service,
  ProductRequest,
}

impl From<KindArg> for ItemKind {
  fn from(kind: KindArg) -> Self {
    match kind {
      KindArg::Product => ItemKind::Product,
      KindArg::Service => ItemKind::Service,
      KindArg::ProductRequest => ItemKind::ProductRequest,
    }
  }
}

#[derive(Args, Debug)]
pub struct AddArgs {
  #[arg(value_enum)]
  pub kind: KindArg,
  pub item_id: String,
  /// Catalog slug, used to resume after signing in.
  #[arg(long, default_value = "")]
  pub slug: String,
  #[arg(long, default_value_t = 1)]
  pub quantity: u32,
  /// Notes for a service booking.
  #[arg(long)]
  pub description: Option<String>,
}

#[derive(Args, Debug)]
pub struct SetQuantityArgs {
  pub line_id: String,
  pub quantity: u32,
  #[arg(long, value_enum, default_value_t = KindArg::Product)]
  pub kind: KindArg,
}

#[derive(Args, Debug)]
pub struct CheckoutArgs {
  /// Defaults to the profile's phone.
  #[arg(long)]
  pub phone: Option<String>,
  #[arg(long)]
  pub address: Option<String>,
  #[arg(long)]
  pub thana: Option<String>,
  #[arg(long)]
  pub district: Option<String>,
}

#[derive(Args, Debug)]
pub struct CatalogArgs {
  #[arg(long)]
  pub search: Option<String>,
  #[arg(long)]
  pub category: Option<String>,
  #[arg(long, default_value_t = 1)]
  pub page: u32,
}

#[derive(Args, Debug)]
pub struct AddressArgs {
  #[arg(long)]
  pub address: String,
  #[arg(long)]
  pub thana: String,
  #[arg(long)]
  pub district: String,
}

#[derive(Args, Debug)]
pub struct ProfileArgs {
  #[arg(long)]
  pub first_name: Option<String>,
  #[arg(long)]
  pub last_name: Option<String>,
  #[arg(long)]
  pub company_name: Option<String>,
  #[arg(long)]
  pub phone: Option<String>,
}

#[derive(Args, Debug)]
pub struct RequestArgs {
  #[arg(long)]
  pub title: String,
  #[arg(long, default_value_t = 1)]
  pub quantity: u32,
  /// JPEG, PNG or PDF showing the product.
  #[arg(long)]
  pub file: PathBuf,
  #[arg(long)]
  pub description: Option<String>,
  /// Order immediately instead of adding to the cart.
  #[arg(long)]
  pub order_now: bool,
  #[command(flatten)]
  pub contact: CheckoutArgs,
}
