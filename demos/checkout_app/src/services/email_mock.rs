// stepline_project/demos/checkout_app/src/services/email_mock.rs
use crate::errors::{AppError, Result as AppResult};
use tracing::{info, instrument};
use uuid::Uuid;

/// Pretends to deliver an email and returns the provider's message id.
#[instrument(skip(body), fields(%to, %subject))]
pub fn send_email(from: &str, to: &str, subject: &str, body: &str) -> AppResult<String> {
  if !to.contains('@') {
    return Err(AppError::Email(format!("Invalid recipient address '{}'", to)));
  }
  let message_id = format!("mock_msg_{}", Uuid::new_v4().simple());
  info!(%from, %message_id, body_len = body.len(), "Mock email sent.");
  Ok(message_id)
}
