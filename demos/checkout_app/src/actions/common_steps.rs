// stepline_project/demos/checkout_app/src/actions/common_steps.rs

//! Small helpers and operations shared by several actions.

use stepline::{Action, ActionDefinition, Errors, Options, StepControl};
use tracing::{info, warn};

/// Reads a string field, treating a missing, non-string or blank value as absent.
pub fn optional_str(action: &Action, name: &str) -> Option<String> {
  action
    .get(name)
    .and_then(|value| value.as_str())
    .map(str::trim)
    .filter(|value| !value.is_empty())
    .map(str::to_string)
}

pub fn push_error(errors: &mut Errors, field: &str, message: impl Into<String>) {
  errors.entry(field.to_string()).or_default().push(message.into());
}

/// Registers an `audit` operation that logs how the action ended.
pub fn register_audit(definition: &mut ActionDefinition) {
  definition.operation("audit", |action: &mut Action, _: &Options| {
    match action.outcome() {
      Some(outcome) => info!(
        action = action.name(),
        success = outcome.is_success(),
        code = outcome.code(),
        detail = outcome.message().unwrap_or_default(),
        "Audit"
      ),
      None => warn!(action = action.name(), "Audit ran before the action finished."),
    }
    Ok(StepControl::Continue)
  });
}
