// stepline/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

/// Faults that abort a run.
///
/// Business failures are never reported through this type: they are ordinary
/// `Outcome::Failure` values.
#[derive(Debug, Error)]
pub enum SteplineError {
  #[error("Action '{action}' has no steps")]
  NoSteps { action: String },

  #[error("Action '{action}' invokes undefined operation '{operation}'")]
  OperationNotFound { action: String, operation: String },

  #[error("Step '{step}' of action '{action}' failed. Source: {source}")]
  StepFault {
    action: String,
    step: String,
    #[source]
    source: AnyhowError,
  },

  #[error("Transactional resource of action '{action}' failed. Source: {source}")]
  Transaction {
    action: String,
    #[source]
    source: AnyhowError,
  },

  #[error("No action registered under name '{name}'")]
  UnknownAction { name: String },

  #[error("Internal Stepline error: {0}")]
  Internal(String),
}

impl SteplineError {
  /// Recovers the fault raised inside a transaction body, or reports the provider's own
  /// failure.
  pub(crate) fn from_transaction(action: &str, err: AnyhowError) -> Self {
    // The body hands faults to the provider as anyhow errors; unwrap ours so callers see
    // the underlying variant instead of a wrapped one.
    match err.downcast::<SteplineError>() {
      Ok(fault) => fault,
      Err(other) => SteplineError::Transaction {
        action: action.to_string(),
        source: other,
      },
    }
  }

  /// The error returned by the failing operation or discriminant, if that is what
  /// aborted the run.
  pub fn step_source(&self) -> Option<&AnyhowError> {
    match self {
      SteplineError::StepFault { source, .. } => Some(source),
      _ => None,
    }
  }
}

pub type SteplineResult<T, E = SteplineError> = std::result::Result<T, E>;
