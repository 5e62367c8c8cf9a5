// stepline_project/demos/checkout_app/src/errors.rs

use stepline::SteplineError;
use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Payment Processing Error: {0}")]
  Payment(String),

  #[error("Email Delivery Error: {0}")]
  Email(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Store Error: {0}")]
  Store(#[from] StoreError),

  #[error("Stepline Workflow Error: {source}")]
  Workflow {
    #[from]
    source: SteplineError,
  },

  #[error("Serialization Error: {0}")]
  Serialization(#[from] serde_json::Error),

  #[error("Internal Error: {0}")]
  Internal(String),
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;
