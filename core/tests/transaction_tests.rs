// tests/transaction_tests.rs
mod common;

use common::*;
use std::sync::Arc;
use stepline::{ActionDefinition, Options, SteplineError};

fn transactional(name: &str, tx: &Arc<RecordingTransaction>, log: &ExecLog) -> ActionDefinition {
  let mut definition = ActionDefinition::new(name);
  add_marker(&mut definition, "write", log);
  add_failer(&mut definition, "reject", "rejected", "business rule", log);
  add_faulty(&mut definition, "crash", "disk full", log);
  add_marker(&mut definition, "after_commit_hook", log);
  definition.set_transaction(tx.clone());
  definition
}

#[test]
fn test_success_commits() {
  setup_tracing();
  let log = ExecLog::new();
  let tx = RecordingTransaction::new();
  let mut definition = transactional("tx_success", &tx, &log);
  definition.step("write");

  let outcome = definition.run(Options::new()).unwrap();

  assert!(outcome.is_success());
  assert_eq!(tx.events(), vec![TxEvent::Begin, TxEvent::Commit]);
}

#[test]
fn test_business_failure_still_commits() {
  setup_tracing();
  let log = ExecLog::new();
  let tx = RecordingTransaction::new();
  let mut definition = transactional("tx_failure", &tx, &log);
  definition.step("write").step("reject");

  let outcome = definition.run(Options::new()).unwrap();

  assert!(outcome.is_failure());
  assert_eq!(tx.events(), vec![TxEvent::Begin, TxEvent::Commit]);
}

#[test]
fn test_fault_rolls_back_and_surfaces_operation_error() {
  setup_tracing();
  let log = ExecLog::new();
  let tx = RecordingTransaction::new();
  let mut definition = transactional("tx_fault", &tx, &log);
  definition.step("write").step("crash").always("after_commit_hook");

  let err = definition.run(Options::new()).unwrap_err();

  assert_eq!(tx.events(), vec![TxEvent::Begin, TxEvent::Rollback]);
  match err {
    SteplineError::StepFault { step, source, .. } => {
      assert_eq!(step, "crash");
      assert_eq!(
        source.downcast_ref::<TestError>(),
        Some(&TestError::Operation("disk full".to_string()))
      );
    }
    other => panic!("Expected SteplineError::StepFault, got {:?}", other),
  }
  assert_eq!(log.entries(), vec!["write", "crash"]);
}

#[test]
fn test_hooks_run_inside_the_transaction() {
  setup_tracing();
  let log = ExecLog::new();
  let tx = RecordingTransaction::new();
  let mut definition = transactional("tx_hooks", &tx, &log);
  definition.step("write").on_success("crash");

  assert!(definition.run(Options::new()).is_err());
  assert_eq!(tx.events(), vec![TxEvent::Begin, TxEvent::Rollback]);
}

#[test]
fn test_provider_failure_is_reported_as_transaction_error() {
  setup_tracing();
  let log = ExecLog::new();
  let tx = RecordingTransaction::failing_commit();
  let mut definition = transactional("tx_commit_fails", &tx, &log);
  definition.step("write");

  let mut callback_ran = false;
  let err = definition
    .run_then(Options::new(), |_| callback_ran = true)
    .unwrap_err();

  match err {
    SteplineError::Transaction { action, source } => {
      assert_eq!(action, "tx_commit_fails");
      assert_eq!(source.downcast_ref::<TestError>(), Some(&TestError::StoreUnavailable));
    }
    other => panic!("Expected SteplineError::Transaction, got {:?}", other),
  }
  assert!(!callback_ran);
}

#[test]
fn test_nested_transactional_actions_nest_depth_first() {
  setup_tracing();
  let log = ExecLog::new();
  let outer_tx = RecordingTransaction::new();
  let inner_tx = RecordingTransaction::new();

  let mut inner = transactional("inner", &inner_tx, &log);
  inner.step("write");
  let inner = Arc::new(inner);

  let mut outer = transactional("outer", &outer_tx, &log);
  outer.step(&inner).step("reject");

  let outcome = outer.run(Options::new()).unwrap();

  assert!(outcome.is_failure());
  assert_eq!(inner_tx.events(), vec![TxEvent::Begin, TxEvent::Commit]);
  assert_eq!(outer_tx.events(), vec![TxEvent::Begin, TxEvent::Commit]);
}

#[test]
fn test_derived_definition_copies_transaction_at_derivation() {
  setup_tracing();
  let log = ExecLog::new();
  let parent_tx = RecordingTransaction::new();
  let mut parent = transactional("parent", &parent_tx, &log);

  let mut child = parent.derive("child");
  // Changing the parent afterwards does not reach the child.
  parent.clear_transaction();
  child.step("write");

  assert!(parent.transaction().is_none());
  assert_eq!(child.transaction().map(|p| p.name()), Some("recording"));

  let outcome = child.run(Options::new()).unwrap();
  assert!(outcome.is_success());
  assert_eq!(parent_tx.events(), vec![TxEvent::Begin, TxEvent::Commit]);
  assert_eq!(log.entries(), vec!["write"]);
}

#[test]
fn test_derived_definition_can_override_transaction() {
  setup_tracing();
  let log = ExecLog::new();
  let parent_tx = RecordingTransaction::new();
  let child_tx = RecordingTransaction::new();
  let parent = transactional("parent", &parent_tx, &log);

  let mut child = parent.derive("child");
  child.set_transaction(child_tx.clone()).step("write");
  assert!(child.steps().len() == 1 && parent.steps().is_empty());

  child.run(Options::new()).unwrap();

  assert!(parent_tx.events().is_empty());
  assert_eq!(child_tx.events(), vec![TxEvent::Begin, TxEvent::Commit]);
}
