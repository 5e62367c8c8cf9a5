// stepline_project/demos/checkout_app/src/models/product.rs

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Product {
  pub sku: String,
  pub name: String,
  pub price_cents: i64,
  pub stock_quantity: i64,
  pub updated_at: DateTime<Utc>,
}
