// storefront_cli/src/main.rs

mod app;
mod cli;
mod commands;
mod render;

use crate::app::App;
use crate::cli::Cli;
use clap::Parser;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

fn init_tracing(json: bool) {
  let filter = EnvFilter::builder().with_default_directive(LevelFilter::INFO.into()).from_env_lossy();
  let builder = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_span_events(FmtSpan::CLOSE) // Request spans report their duration on close.
    .with_writer(std::io::stderr);
  if json {
    builder.json().init();
  } else {
    builder.init();
  }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  let cli = Cli::parse();
  init_tracing(cli.log_json);

  let app = App::from_env(&cli.connection)?;
  tracing::debug!(api_url = %app.config.api_url, "Storefront client ready.");

  if let Err(err) = commands::dispatch(&app, cli.command, cli.json).await {
    // Surface the login route so the user knows how to continue.
    if let Some(redirect) = err.downcast_ref::<storefront::StorefrontError>().and_then(|e| e.login_redirect()) {
      eprintln!("Sign in first: {}", redirect.path());
    }
    return Err(err);
  }
  Ok(())
}
