// tests/branch_tests.rs
mod common;

use common::*;
use serde_json::json;
use stepline::{Action, ActionDefinition, Hook, Options, Step, SteplineError};

fn payment_definition(log: &ExecLog) -> ActionDefinition {
  let mut definition = ActionDefinition::new("payment");
  add_setter(&mut definition, "charge_card", "charged", 1, log);
  add_setter(&mut definition, "capture_card", "captured", 1, log);
  add_setter(&mut definition, "send_invoice", "invoiced", 1, log);
  add_setter(&mut definition, "manual_review", "reviewed", 1, log);
  add_marker(&mut definition, "receipt", log);
  definition
}

#[test]
fn test_branch_runs_only_the_matching_arm() {
  setup_tracing();
  let log = ExecLog::new();
  let mut definition = payment_definition(&log);
  definition
    .branch("route_payment", |action: &Action| action.value::<String>("method"))
    .when("card", "charge_card")
    .when("card", "capture_card")
    .when("invoice", "send_invoice")
    .finalize();
  definition.step("receipt");

  let outcome = definition.run([("method", "card")]).unwrap();

  assert!(outcome.is_success());
  assert_eq!(log.entries(), vec!["charge_card", "capture_card", "receipt"]);
  assert_eq!(outcome.fixtures()["captured"], json!(1));
  assert!(!outcome.fixtures().contains_key("invoiced"));
}

#[test]
fn test_branch_without_match_or_fallback_is_a_noop() {
  setup_tracing();
  let log = ExecLog::new();
  let mut definition = payment_definition(&log);
  definition
    .branch("route_payment", |action: &Action| action.value::<String>("method"))
    .when("card", "charge_card")
    .finalize();
  definition.step("receipt");

  let outcome = definition.run([("method", "crypto")]).unwrap();

  assert!(outcome.is_success());
  assert_eq!(log.entries(), vec!["receipt"]);
}

#[test]
fn test_branch_runs_fallback_when_no_key_matches() {
  setup_tracing();
  let log = ExecLog::new();
  let mut definition = payment_definition(&log);
  definition
    .branch("route_payment", |action: &Action| action.value::<String>("method"))
    .when("card", "charge_card")
    .otherwise("manual_review")
    .finalize();

  let outcome = definition.run([("method", "crypto")]).unwrap();

  assert_eq!(log.entries(), vec!["manual_review"]);
  assert_eq!(outcome.fixtures()["reviewed"], json!(1));
}

#[test]
fn test_branch_arm_short_circuits_once_finished() {
  setup_tracing();
  let log = ExecLog::new();
  let mut definition = payment_definition(&log);
  add_failer(&mut definition, "decline", "declined", "card declined", &log);
  definition
    .branch("route_payment", |action: &Action| action.value::<String>("method"))
    .when("card", "decline")
    .when("card", "capture_card")
    .finalize();
  definition.step("receipt");

  let outcome = definition.run([("method", "card")]).unwrap();

  assert!(outcome.is_failure());
  assert_eq!(outcome.code(), "declined");
  assert_eq!(log.entries(), vec!["decline"]);
}

#[test]
fn test_branch_discriminant_is_evaluated_once() {
  setup_tracing();
  let log = ExecLog::new();
  let mut definition = payment_definition(&log);
  let evaluations = ExecLog::new();
  let seen = evaluations.clone();
  definition
    .branch("route_payment", move |action: &Action| {
      seen.push("evaluated");
      action.value::<String>("method")
    })
    .when("card", "charge_card")
    .when("card", "capture_card")
    .finalize();

  definition.run([("method", "card")]).unwrap();

  assert_eq!(evaluations.entries().len(), 1);
}

#[test]
fn test_branch_discriminant_error_is_fatal() {
  setup_tracing();
  let log = ExecLog::new();
  let mut definition = payment_definition(&log);
  definition
    .branch("route_payment", |action: &Action| action.value::<String>("method"))
    .when("card", "charge_card")
    .finalize();
  definition.step("receipt");

  let err = definition.run(Options::new()).unwrap_err();

  match err {
    SteplineError::StepFault { step, .. } => assert_eq!(step, "route_payment"),
    other => panic!("Expected SteplineError::StepFault, got {:?}", other),
  }
  assert!(log.entries().is_empty());
}

#[test]
fn test_branch_arms_can_hold_nested_actions_and_options() {
  setup_tracing();
  let log = ExecLog::new();
  let mut audit = ActionDefinition::new("audit");
  add_marker(&mut audit, "write_audit", &log);
  audit.step("write_audit");
  let audit = std::sync::Arc::new(audit);

  let mut definition = payment_definition(&log);
  definition.operation("tag", |action: &mut Action, opts: &Options| {
    action.set("tag", opts["tag"].clone());
    Ok(stepline::StepControl::Continue)
  });
  definition
    .branch("route_payment", |action: &Action| action.value::<String>("method"))
    .when("invoice", Step::invoke_with("tag", stepline::fields([("tag", "b2b")])))
    .when("invoice", &audit)
    .finalize();

  let outcome = definition.run([("method", "invoice")]).unwrap();

  assert_eq!(outcome.fixtures()["tag"], json!("b2b"));
  assert_eq!(log.entries(), vec!["write_audit"]);
}

#[test]
fn test_branch_can_be_registered_as_hook() {
  setup_tracing();
  let log = ExecLog::new();
  let mut definition = payment_definition(&log);
  add_marker(&mut definition, "notify_sales", &log);
  add_marker(&mut definition, "notify_support", &log);
  definition.step("receipt");
  definition
    .branch("notify", |action: &Action| action.value::<String>("tier"))
    .when("gold", "notify_sales")
    .otherwise("notify_support")
    .finalize_on(Hook::Always);

  definition.run([("tier", "gold")]).unwrap();
  assert_eq!(log.entries(), vec!["receipt", "notify_sales"]);
  assert_eq!(definition.always_steps().len(), 1);
  assert!(matches!(definition.always_steps()[0], Step::Branch(_)));
}

#[test]
fn test_branch_with_unknown_operation_is_rejected_before_running() {
  setup_tracing();
  let log = ExecLog::new();
  let mut definition = payment_definition(&log);
  definition.step("receipt");
  definition
    .branch("route_payment", |action: &Action| action.value::<String>("method"))
    .when("card", "does_not_exist")
    .finalize();

  let err = definition.run([("method", "card")]).unwrap_err();

  assert!(matches!(err, SteplineError::OperationNotFound { ref operation, .. } if operation == "does_not_exist"));
  assert!(log.entries().is_empty());
}

#[test]
fn test_branch_structure_is_inspectable_after_registration() {
  setup_tracing();
  let log = ExecLog::new();
  let mut definition = payment_definition(&log);
  definition
    .branch("route_payment", |action: &Action| action.value::<String>("method"))
    .when("card", Step::invoke_with("charge_card", stepline::fields([("gateway", "primary")])))
    .when("card", "capture_card")
    .when("invoice", "send_invoice")
    .otherwise("manual_review")
    .finalize();

  let Step::Branch(branch) = &definition.steps()[0] else {
    panic!("expected a branch step, got {:?}", definition.steps()[0]);
  };
  assert_eq!(branch.name(), "route_payment");
  assert_eq!(branch.keys().collect::<Vec<_>>(), vec!["card", "invoice"]);
  assert!(branch.arm("crypto").is_none());

  let card = branch.arm("card").unwrap();
  assert_eq!(card.iter().map(Step::label).collect::<Vec<_>>(), vec!["charge_card", "capture_card"]);
  assert_eq!(card[0].options().unwrap()["gateway"], json!("primary"));
  assert!(card[1].options().unwrap().is_empty());

  assert_eq!(branch.fallback().len(), 1);
  assert_eq!(branch.fallback()[0].label(), "manual_review");
  assert!(definition.steps()[0].options().is_none());
}
