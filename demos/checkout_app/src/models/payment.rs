// stepline_project/demos/checkout_app/src/models/payment.rs

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChargeStatus {
  Succeeded,
  Refunded,
}

#[derive(Debug, Clone, Serialize)]
pub struct MockCharge {
  pub id: String,
  pub amount_cents: i64,
  pub currency: String,
  pub channel: String,
  pub account_id: String,
  pub status: ChargeStatus,
}
