// stepline_project/demos/checkout_app/src/main.rs

// Declare modules for the application
mod actions;
mod config;
mod errors;
mod models;
mod services;
mod state;
mod store;

use crate::config::AppConfig;
use crate::errors::Result as AppResult;
use crate::models::product::Product;
use crate::state::AppState;
use crate::store::Store;

use chrono::Utc;
use serde_json::{json, Value};
use std::sync::Arc;
use stepline::{ActionRegistry, Outcome};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

fn main() -> AppResult<()> {
  // Configuration comes first so its log filter can seed the subscriber.
  let app_config = Arc::new(AppConfig::from_env()?);

  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&app_config.log_filter)))
    .with_span_events(FmtSpan::CLOSE)
    .init();

  tracing::info!(config = ?app_config, "Application configuration loaded.");

  let app_state = AppState {
    store: Arc::new(Store::new()),
    registry: Arc::new(ActionRegistry::new()),
    config: app_config.clone(),
  };

  if app_config.seed_inventory {
    seed_inventory(&app_state);
  }

  actions::register_all_actions(&app_state);

  run_scenarios(&app_state)?;

  tracing::info!(
    orders = app_state.store.orders().len(),
    charges = ?app_state.store.charges(),
    "Demo finished."
  );
  Ok(())
}

fn seed_inventory(app_state: &AppState) {
  let quantity = app_state.config.seed_stock_quantity;
  for (sku, name, price_cents) in [
    ("mug-001", "Stoneware Mug", 1_500),
    ("lamp-002", "Desk Lamp", 4_900),
    ("sofa-003", "Three-Seat Sofa", 189_900),
  ] {
    app_state.store.upsert_product(Product {
      sku: sku.to_string(),
      name: name.to_string(),
      price_cents,
      stock_quantity: quantity,
      updated_at: Utc::now(),
    });
  }
  tracing::info!(stock_per_product = quantity, "Inventory seeded.");
}

fn run(app_state: &AppState, action: &str, args: Value) -> AppResult<Outcome> {
  let args = match args {
    Value::Object(map) => map,
    _ => serde_json::Map::new(),
  };
  let outcome = app_state.registry.run_then(action, args, |outcome| {
    tracing::debug!(%action, code = outcome.code(), "Completion callback fired.");
  })?;
  println!("{} -> {}", action, serde_json::to_string(&outcome)?);
  Ok(outcome)
}

fn run_scenarios(app_state: &AppState) -> AppResult<()> {
  let alice = json!({ "email": "alice@example.com", "_password": "correct-horse", "name": "Alice" });

  // Accounts
  run(app_state, "signup", alice.clone())?;
  run(app_state, "signup", alice)?; // email_taken
  run(app_state, "signup", json!({ "email": "bob", "_password": "short" }))?; // invalid_input
  run(app_state, "signin", json!({ "email": "alice@example.com", "_password": "correct-horse" }))?;
  run(app_state, "signin", json!({ "email": "alice@example.com", "_password": "wrong-horse" }))?;

  // Checkouts
  let checkout = |sku: &str, quantity: i64, method: &str| {
    json!({ "email": "alice@example.com", "sku": sku, "quantity": quantity, "payment_method": method })
  };
  run(app_state, "checkout", checkout("mug-001", 2, "card"))?;
  run(app_state, "checkout", checkout("lamp-002", 1, "wallet"))?;
  run(app_state, "checkout", checkout("mug-001", 1, "cash"))?; // unsupported_payment_method
  run(app_state, "checkout", checkout("sofa-003", 1, "card"))?; // payment_declined
  run(app_state, "checkout", checkout("mug-001", 50, "card"))?; // out_of_stock, charge refunded

  // A store outage mid-checkout is a fault: the run aborts and the store snapshot,
  // including the charge taken before the outage surfaced, is restored.
  app_state.store.set_available(false);
  match run(app_state, "checkout", checkout("mug-001", 1, "card")) {
    Ok(outcome) => tracing::warn!(code = outcome.code(), "Expected the outage to abort the checkout."),
    Err(e) => tracing::error!(error = %e, "Checkout aborted by a fault."),
  }
  app_state.store.set_available(true);

  Ok(())
}
