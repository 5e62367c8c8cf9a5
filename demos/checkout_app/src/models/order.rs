// stepline_project/demos/checkout_app/src/models/order.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
  Paid,
}

#[derive(Debug, Clone, Serialize)]
pub struct Order {
  pub id: Uuid,
  pub user_id: Uuid,
  pub sku: String,
  pub quantity: i64,
  pub total_amount_cents: i64,
  pub currency: String,
  pub status: OrderStatus,
  pub payment_id: Option<String>,
  pub created_at: DateTime<Utc>,
}
