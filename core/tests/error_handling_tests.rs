// tests/error_handling_tests.rs
mod common;
use common::*;
use stepline::{Action, ActionDefinition, Options, StepControl, SteplineError};

#[test]
fn test_action_without_steps_fails_fatally() {
  setup_tracing();
  let definition = ActionDefinition::new("empty");
  let result = definition.run(Options::new());
  match result {
    Err(SteplineError::NoSteps { action }) => assert_eq!(action, "empty"),
    other => panic!("Expected SteplineError::NoSteps, got {:?}", other),
  }
  assert!(!definition.is_frozen());
}

#[test]
fn test_hooks_alone_do_not_make_a_pipeline() {
  setup_tracing();
  let log = ExecLog::new();
  let mut definition = ActionDefinition::new("hooks_only");
  add_marker(&mut definition, "always_hook", &log);
  definition.always("always_hook");

  assert!(matches!(definition.run(Options::new()), Err(SteplineError::NoSteps { .. })));
  assert!(log.entries().is_empty());
}

#[test]
fn test_undefined_operation_is_rejected_before_any_step_runs() {
  setup_tracing();
  let log = ExecLog::new();
  let mut definition = ActionDefinition::new("typo");
  add_marker(&mut definition, "step1", &log);
  definition.step("step1").on_failure("cleanup_typo");

  let err = definition.run(Options::new()).unwrap_err();

  match err {
    SteplineError::OperationNotFound { action, operation } => {
      assert_eq!(action, "typo");
      assert_eq!(operation, "cleanup_typo");
    }
    other => panic!("Expected SteplineError::OperationNotFound, got {:?}", other),
  }
  assert!(log.entries().is_empty());
}

#[test]
fn test_operation_error_is_fatal_and_keeps_its_source() {
  setup_tracing();
  let log = ExecLog::new();
  let mut definition = ActionDefinition::new("faulty");
  add_marker(&mut definition, "good_step", &log);
  add_faulty(&mut definition, "bad_step", "I am a bad step!", &log);
  add_marker(&mut definition, "another_step", &log);
  add_marker(&mut definition, "failure_hook", &log);
  definition
    .step("good_step")
    .step("bad_step")
    .step("another_step")
    .on_failure("failure_hook");

  let err = definition.run(Options::new()).unwrap_err();

  assert_eq!(
    err.step_source().and_then(|source| source.downcast_ref::<TestError>()),
    Some(&TestError::Operation("I am a bad step!".to_string()))
  );
  // A fault is not a business failure: no failure hooks.
  assert_eq!(log.entries(), vec!["good_step", "bad_step"]);
}

#[test]
fn test_business_failure_is_not_an_error() {
  setup_tracing();
  let mut definition = ActionDefinition::new("validate");
  definition.operation("validate", |action: &mut Action, _: &Options| {
    if action.value::<String>("email").map_or(true, |email| !email.contains('@')) {
      return Ok(action.fail("invalid_email", "A valid email is required."));
    }
    Ok(StepControl::Continue)
  });
  definition.step("validate");

  let outcome = definition.run([("email", "nope")]).unwrap();
  assert!(outcome.is_failure());
  assert_eq!(outcome.code(), "invalid_email");

  let outcome = definition.run([("email", "ada@example.com")]).unwrap();
  assert!(outcome.is_success());
}

#[test]
#[should_panic(expected = "can no longer be modified")]
fn test_registration_after_first_run_panics() {
  setup_tracing();
  let log = ExecLog::new();
  let mut definition = ActionDefinition::new("frozen");
  add_marker(&mut definition, "step1", &log);
  definition.step("step1");
  definition.run(Options::new()).unwrap();

  definition.step("step2");
}
