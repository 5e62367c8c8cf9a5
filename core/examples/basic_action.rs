// stepline/examples/basic_action.rs

use stepline::{Action, ActionDefinition, Options, SteplineError, StepControl};
use tracing::info;

fn main() -> Result<(), SteplineError> {
  // Initialize tracing (optional, for demonstration)
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Basic Action Example ---");

  // 1. Create a new action definition
  let mut definition = ActionDefinition::new("counter");

  // 2. Register operations. Each one reads and writes fields on the running action.
  definition.operation("step_alpha", |action: &mut Action, _: &Options| {
    let counter = action.value::<i64>("counter")? + 1;
    info!("Alpha executed: counter = {}", counter);
    action.set("counter", counter);
    Ok(StepControl::Continue)
  });

  definition.operation("step_beta", |action: &mut Action, options: &Options| {
    let factor = options.get("factor").and_then(|v| v.as_i64()).unwrap_or(2);
    let counter = action.value::<i64>("counter")? * factor;
    info!("Beta executed: counter = {}", counter);
    action.set("counter", counter);
    // Underscored fields stay out of the outcome's fixtures.
    action.set("_scratch", "internal bookkeeping");
    Ok(StepControl::Continue)
  });

  definition.operation("step_gamma", |action: &mut Action, _: &Options| {
    let counter = action.value::<i64>("counter")? - 1;
    info!("Gamma executed: counter = {}", counter);
    action.set("counter", counter);
    Ok(StepControl::Continue)
  });

  // 3. Declare the main steps, in order
  definition
    .step("step_alpha")
    .step(stepline::Step::invoke_with("step_beta", stepline::fields([("factor", 2)])))
    .step("step_gamma");

  // 4. Run it. Nothing called `succeed`, so the action succeeds implicitly.
  info!("Starting action execution...");
  let outcome = definition.run([("counter", 5)])?;

  // 5. Inspect the outcome
  info!("Outcome: {} ({:?})", outcome.code(), outcome.message());
  info!("Fixtures: {:?}", outcome.fixtures());

  // Expected: (5+1)*2 - 1 = 11
  assert!(outcome.is_success());
  assert_eq!(outcome.fixtures()["counter"], 11);
  assert!(!outcome.fixtures().contains_key("_scratch"));

  Ok(())
}
