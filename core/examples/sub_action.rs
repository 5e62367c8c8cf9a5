// stepline/examples/sub_action.rs

use std::sync::Arc;

use stepline::{fields, Action, ActionDefinition, Options, Step, SteplineError, StepControl};
use tracing::info;

// A reusable action that reserves stock for a single SKU.
fn reserve_stock() -> Arc<ActionDefinition> {
  let mut definition = ActionDefinition::new("reserve_stock");
  definition.operation("reserve", |action: &mut Action, _: &Options| {
    let sku = action.value::<String>("sku")?;
    let quantity = action.value::<i64>("quantity")?;
    let available = action.value::<i64>("available")?;
    if quantity > available {
      return Ok(action.fail("out_of_stock", format!("Only {} of '{}' left", available, sku)));
    }
    info!("Reserved {} x {}", quantity, sku);
    action.set("reserved", quantity);
    Ok(StepControl::Continue)
  });
  definition.step("reserve");
  Arc::new(definition)
}

fn main() -> Result<(), SteplineError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();
  info!("--- Sub-Action Example ---");

  let reserve = reserve_stock();

  let mut order = ActionDefinition::new("place_order");
  order.operation("confirm", |action: &mut Action, _: &Options| {
    action.set("confirmed", true);
    Ok(StepControl::Continue)
  });
  // The nested run starts from the order's fields, overlaid with the step's options.
  order
    .step(Step::action_with(reserve.clone(), fields([("sku", "widget")])))
    .step("confirm");

  let placed = order.run([("quantity", 2), ("available", 10)])?;
  info!("Order placed: {} fixtures={:?}", placed.code(), placed.fixtures());
  assert!(placed.is_success());
  // Fields the nested action wrote are not merged back.
  assert!(!placed.fixtures().contains_key("reserved"));
  assert_eq!(placed.fixtures()["confirmed"], true);

  // A nested failure fails the outer action with the same code and message.
  let rejected = order.run([("quantity", 20), ("available", 3)])?;
  info!("Order rejected: {} ({:?})", rejected.code(), rejected.message());
  assert_eq!(rejected.code(), "out_of_stock");
  assert!(!rejected.fixtures().contains_key("confirmed"));

  Ok(())
}
