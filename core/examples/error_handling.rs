// stepline/examples/error_handling.rs

use stepline::{Action, ActionDefinition, Options, SteplineError, StepControl};
use tracing::{error, info};

// 1. Define a custom application error type
#[derive(Debug, thiserror::Error)]
enum ExampleAppError {
  #[error("Upstream service unavailable: {0}")]
  Unavailable(String),

  #[error("Stepline error during action execution: {0}")]
  Stepline(#[from] SteplineError),
}

fn main() {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();
  info!("--- Error Handling Example ---");

  // Scenario 1: A business failure is an outcome, not an error.
  info!("\nScenario 1: Business failure");
  if let Err(e) = run_business_failure() {
    error!("Unexpected error: {}", e);
  }

  // Scenario 2: An operation returns an error, which aborts the run.
  info!("\nScenario 2: Operation fault");
  run_operation_fault();

  // Scenario 3: Definition errors (missing operation) are caught before any step runs.
  info!("\nScenario 3: Definition error");
  run_definition_error();
}

fn run_business_failure() -> Result<(), ExampleAppError> {
  let mut definition = ActionDefinition::new("validate_email");
  definition.operation("check", |action: &mut Action, _: &Options| {
    let email = action.value::<String>("email")?;
    if !email.contains('@') {
      let mut errors = stepline::Errors::new();
      errors.insert("email".to_string(), vec!["is not a valid address".to_string()]);
      return Ok(action.fail_with("invalid_input", Some("Validation failed".to_string()), errors));
    }
    Ok(StepControl::Continue)
  });
  definition.step("check");

  let outcome = definition.run([("email", "not-an-email")])?;
  info!("Outcome: {} errors={:?}", outcome.code(), outcome.errors());
  assert!(outcome.is_failure());
  Ok(())
}

fn run_operation_fault() {
  let mut definition = ActionDefinition::new("fetch_profile");
  definition.operation("call_upstream", |_: &mut Action, _: &Options| {
    Err(ExampleAppError::Unavailable("profile-service".to_string()).into())
  });
  definition.operation("never_runs", |_: &mut Action, _: &Options| {
    error!("This step should never run.");
    Ok(StepControl::Continue)
  });
  definition.step("call_upstream").step("never_runs");

  match definition.run([("user_id", 7)]) {
    Ok(outcome) => error!("Expected a fault, got outcome {}", outcome.code()),
    Err(e) => {
      error!("Run aborted: {}", e);
      // The operation's own error is still reachable for inspection.
      if let Some(source) = e.step_source() {
        match source.downcast_ref::<ExampleAppError>() {
          Some(ExampleAppError::Unavailable(service)) => info!("Upstream '{}' was down.", service),
          _ => error!("Unknown fault source: {}", source),
        }
      }
    }
  }
}

fn run_definition_error() {
  let mut definition = ActionDefinition::new("incomplete");
  definition.step("missing_operation");

  let result: Result<_, ExampleAppError> = definition.run(stepline::Fields::new()).map_err(Into::into);
  match result {
    Err(ExampleAppError::Stepline(SteplineError::OperationNotFound { operation, .. })) => {
      info!("Caught definition error: operation '{}' is not registered", operation)
    }
    other => error!("Unexpected result: {:?}", other),
  }
}
