// stepline/examples/action_halt.rs

use stepline::{Action, ActionDefinition, Options, SteplineError, StepControl};
use tracing::info;

fn main() -> Result<(), SteplineError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();
  info!("--- Action Halt Example ---");

  let mut definition = ActionDefinition::new("lookup");

  definition.operation("check_cache", |action: &mut Action, _: &Options| {
    if let Some(hit) = action.get("cached").cloned() {
      info!("Cache hit, skipping the remaining steps.");
      action.set("value", hit);
      return Ok(StepControl::Halt);
    }
    Ok(StepControl::Continue)
  });

  definition.operation("load", |action: &mut Action, _: &Options| {
    info!("Loading value from source.");
    action.set("value", "fresh");
    Ok(StepControl::Continue)
  });

  definition.operation("validate", |action: &mut Action, _: &Options| {
    if action.value::<String>("value")?.is_empty() {
      return Ok(action.fail("empty_value", "Loaded value is empty"));
    }
    Ok(StepControl::Continue)
  });

  definition.step("check_cache").step("load").step("validate");

  // A halt with no explicit outcome still ends in success.
  let halted = definition.run([("cached", "from_cache")])?;
  info!("Halted run: {} -> {:?}", halted.code(), halted.fixtures().get("value"));
  assert!(halted.is_success());
  assert_eq!(halted.fixtures()["value"], "from_cache");

  let full = definition.run(stepline::Fields::new())?;
  info!("Full run: {} -> {:?}", full.code(), full.fixtures().get("value"));
  assert_eq!(full.fixtures()["value"], "fresh");

  Ok(())
}
