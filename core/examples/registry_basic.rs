// stepline/examples/registry_basic.rs

use std::sync::Arc;

use stepline::{Action, ActionDefinition, ActionRegistry, Options, SteplineError, StepControl};
use tracing::{error, info};

fn main() -> Result<(), Box<dyn std::error::Error>> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();
  info!("--- Stepline Registry Basic Example ---");

  // 1. Create a registry. It can be shared across threads behind an Arc.
  let registry = Arc::new(ActionRegistry::new());

  // 2. Define and register a user workflow
  let mut validate_user = ActionDefinition::new("validate_user");
  validate_user.operation("check_id", |action: &mut Action, _: &Options| {
    let user_id = action.value::<String>("user_id")?;
    if user_id.is_empty() {
      return Ok(action.fail("missing_user", "User ID cannot be empty"));
    }
    info!("User validated: {}", user_id);
    action.set("validated", true);
    Ok(StepControl::Continue)
  });
  validate_user.step("check_id");
  registry.register(validate_user);

  // 3. Define and register a product workflow
  let mut update_product = ActionDefinition::new("update_product");
  update_product.operation("apply_price", |action: &mut Action, _: &Options| {
    let price = action.value::<f64>("price")?;
    action.set("price_with_tax", (price * 1.2 * 100.0).round() / 100.0);
    Ok(action.succeed_with("Price updated", "price_updated", Default::default()))
  });
  update_product.step("apply_price");
  registry.register(update_product);

  info!("Registered actions: {:?}", registry.names());

  // 4. Run actions by name
  let user_outcome = registry.run_then("validate_user", [("user_id", "user_123")], |outcome| {
    info!("validate_user completed with {:?}", outcome.fixtures());
  })?;
  assert!(user_outcome.is_success());

  let empty_user = registry.run("validate_user", [("user_id", "")])?;
  info!("Empty user id: {} ({:?})", empty_user.code(), empty_user.message());
  assert_eq!(empty_user.code(), "missing_user");

  let product_outcome = registry.run("update_product", [("price", 10.0)])?;
  info!("update_product: {} -> {:?}", product_outcome.code(), product_outcome.fixtures().get("price_with_tax"));
  assert_eq!(product_outcome.code(), "price_updated");

  // 5. Unknown names are reported as errors
  match registry.run("delete_everything", stepline::Fields::new()) {
    Err(SteplineError::UnknownAction { name }) => info!("No action named '{}', as expected.", name),
    other => error!("Unexpected result: {:?}", other),
  }

  Ok(())
}
