// tests/registry_tests.rs
mod common;

use common::*;
use serde_json::json;
use std::sync::Arc;
use stepline::{Action, ActionDefinition, ActionRegistry, Options, StepControl, SteplineError};

fn sign_up() -> ActionDefinition {
  let mut definition = ActionDefinition::new("sign_up");
  definition.operation("create_user", |action: &mut Action, _: &Options| {
    let email = action.value::<String>("email")?;
    action.set("user", json!({ "email": email }));
    Ok(StepControl::Continue)
  });
  definition.step("create_user");
  definition
}

#[test]
fn test_registry_runs_action_by_name() {
  setup_tracing();
  let registry = ActionRegistry::new();
  registry.register(sign_up());

  let outcome = registry.run("sign_up", [("email", "ada@example.com")]).unwrap();

  assert!(outcome.is_success());
  assert_eq!(outcome.fixtures()["user"], json!({ "email": "ada@example.com" }));
}

#[test]
fn test_registry_unknown_action() {
  setup_tracing();
  let registry = ActionRegistry::new();

  let result = registry.run("missing", Options::new());

  match result {
    Err(SteplineError::UnknownAction { name }) => assert_eq!(name, "missing"),
    other => panic!("Expected SteplineError::UnknownAction, got {:?}", other),
  }
}

#[test]
fn test_registry_resolves_shared_definitions() {
  setup_tracing();
  let registry = ActionRegistry::new();
  let shared = registry.register(sign_up());
  registry.insert("register", Arc::clone(&shared));

  assert_eq!(registry.names(), vec!["register".to_string(), "sign_up".to_string()]);
  assert!(registry.contains("register"));
  let resolved = registry.resolve("register").unwrap();
  assert!(Arc::ptr_eq(&resolved, &shared));
  assert!(registry.resolve("nope").is_none());
}

#[test]
fn test_registry_run_then_invokes_callback_on_success() {
  setup_tracing();
  let registry = ActionRegistry::new();
  registry.register(sign_up());

  let mut seen = None;
  registry
    .run_then("sign_up", [("email", "ada@example.com")], |outcome| {
      seen = Some(outcome.code().to_string());
    })
    .unwrap();

  assert_eq!(seen.as_deref(), Some("success"));
}

#[test]
fn test_registered_definition_can_be_nested_in_another() {
  setup_tracing();
  let registry = ActionRegistry::new();
  let sign_up = registry.register(sign_up());

  let mut onboarding = ActionDefinition::new("onboarding");
  onboarding.operation("welcome", |action: &mut Action, _: &Options| {
    action.set("welcomed", true);
    Ok(StepControl::Continue)
  });
  onboarding.step(&sign_up).step("welcome");
  registry.register(onboarding);

  let outcome = registry.run("onboarding", [("email", "ada@example.com")]).unwrap();
  assert!(outcome.is_success());
  assert_eq!(outcome.fixtures()["welcomed"], json!(true));

  // Without an email the nested run faults, and so does the outer one.
  assert!(registry.run("onboarding", Options::new()).is_err());
}

#[test]
fn test_registry_is_shareable_across_threads() {
  setup_tracing();
  let registry = Arc::new(ActionRegistry::new());
  registry.register(sign_up());

  let handles: Vec<_> = (0..4)
    .map(|i| {
      let registry = Arc::clone(&registry);
      std::thread::spawn(move || {
        registry
          .run("sign_up", [("email", format!("user{}@example.com", i))])
          .map(|outcome| outcome.is_success())
      })
    })
    .collect();

  for handle in handles {
    assert!(handle.join().unwrap().unwrap());
  }
}
