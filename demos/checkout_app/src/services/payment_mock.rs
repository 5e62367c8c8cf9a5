// stepline_project/demos/checkout_app/src/services/payment_mock.rs
use crate::errors::{AppError, Result as AppResult};
use crate::models::payment::{ChargeStatus, MockCharge};
use tracing::{info, instrument, warn};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub enum ChargeDecision {
  Approved(MockCharge),
  Declined { reason: String },
}

#[derive(Debug, Clone)]
pub struct ChargeRequest<'a> {
  pub amount_cents: i64,
  pub currency: &'a str,
  pub channel: &'a str,
  pub account_id: &'a str,
  pub decline_above_cents: i64,
}

/// Simulates a gateway charge. A decline is a regular answer; a malformed request is an error.
#[instrument(skip(request), fields(amount = request.amount_cents, channel = request.channel, account_id = request.account_id))]
pub fn charge(request: &ChargeRequest<'_>) -> AppResult<ChargeDecision> {
  if request.amount_cents <= 0 {
    return Err(AppError::Payment("Amount must be greater than zero".to_string()));
  }

  if request.amount_cents > request.decline_above_cents {
    warn!("Mock gateway declined the charge.");
    return Ok(ChargeDecision::Declined {
      reason: format!(
        "Amount {} exceeds the limit of {} {}",
        request.amount_cents, request.decline_above_cents, request.currency
      ),
    });
  }

  let charge = MockCharge {
    id: format!("mock_ch_{}", Uuid::new_v4().simple()),
    amount_cents: request.amount_cents,
    currency: request.currency.to_string(),
    channel: request.channel.to_string(),
    account_id: request.account_id.to_string(),
    status: ChargeStatus::Succeeded,
  };
  info!(charge_id = %charge.id, "Mock charge succeeded.");
  Ok(ChargeDecision::Approved(charge))
}
