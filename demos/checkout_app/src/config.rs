// stepline_project/demos/checkout_app/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub currency: String,

  // Mock payment accounts, one per payment channel
  pub mock_payment_card_account_id: String,
  pub mock_payment_wallet_account_id: String,
  /// Charges above this amount are declined by the mock gateway.
  pub payment_decline_above_cents: i64,

  pub mock_email_sender: String,

  /// Seed the store with a small product catalog on startup.
  pub seed_inventory: bool,
  pub seed_stock_quantity: i64,

  /// Fallback filter when `RUST_LOG` is not set.
  pub log_filter: String,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present

    let get_env = |var_name: &str| {
      env::var(var_name).map_err(|e| AppError::Config(format!("Missing environment variable '{}': {}", var_name, e)))
    };

    let currency = get_env("CURRENCY").unwrap_or_else(|_| "USD".to_string());
    let mock_payment_card_account_id = get_env("MOCK_PAYMENT_CARD_ID").unwrap_or_else(|_| "mock_card_acct".to_string());
    let mock_payment_wallet_account_id =
      get_env("MOCK_PAYMENT_WALLET_ID").unwrap_or_else(|_| "mock_wallet_acct".to_string());
    let payment_decline_above_cents = get_env("PAYMENT_DECLINE_ABOVE_CENTS")
      .unwrap_or_else(|_| "100000".to_string())
      .parse::<i64>()
      .map_err(|e| AppError::Config(format!("Invalid PAYMENT_DECLINE_ABOVE_CENTS: {}", e)))?;
    let mock_email_sender = get_env("MOCK_EMAIL_SENDER").unwrap_or_else(|_| "noreply@example.com".to_string());

    let seed_inventory = get_env("SEED_INVENTORY")
      .unwrap_or_else(|_| "true".to_string())
      .parse::<bool>()
      .map_err(|e| AppError::Config(format!("Invalid SEED_INVENTORY value: {}", e)))?;
    let seed_stock_quantity = get_env("SEED_STOCK_QUANTITY")
      .unwrap_or_else(|_| "5".to_string())
      .parse::<i64>()
      .map_err(|e| AppError::Config(format!("Invalid SEED_STOCK_QUANTITY: {}", e)))?;

    let log_filter = get_env("LOG_FILTER").unwrap_or_else(|_| "info,stepline=debug".to_string());

    Ok(Self {
      currency,
      mock_payment_card_account_id,
      mock_payment_wallet_account_id,
      payment_decline_above_cents,
      mock_email_sender,
      seed_inventory,
      seed_stock_quantity,
      log_filter,
    })
  }
}
