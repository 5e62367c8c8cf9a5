// stepline/examples/branching.rs

use stepline::{Action, ActionDefinition, Options, SteplineError, StepControl};
use tracing::info;

fn build_payment_action() -> ActionDefinition {
  let mut definition = ActionDefinition::new("process_payment");

  definition.operation("charge_card", |action: &mut Action, _: &Options| {
    info!("Charging card.");
    action.set("processed_by", "card_gateway");
    Ok(StepControl::Continue)
  });
  definition.operation("charge_wallet", |action: &mut Action, options: &Options| {
    let provider = options.get("provider").and_then(|v| v.as_str()).unwrap_or("wallet");
    info!("Charging wallet via {}.", provider);
    action.set("processed_by", provider);
    Ok(StepControl::Continue)
  });
  definition.operation("reject_method", |action: &mut Action, _: &Options| {
    let method = action.value::<String>("method")?;
    Ok(action.fail("unsupported_method", format!("Payment method '{}' is not supported", method)))
  });
  definition.operation("record_receipt", |action: &mut Action, _: &Options| {
    let method = action.value::<String>("method")?;
    action.set("receipt", format!("receipt-for-{}", method));
    Ok(StepControl::Continue)
  });

  definition
    .branch("payment_method", |action: &Action| action.value::<String>("method"))
    .when("card", "charge_card")
    .when("wallet", stepline::Step::invoke_with("charge_wallet", stepline::fields([("provider", "paypal")])))
    .otherwise("reject_method")
    .finalize();
  definition.step("record_receipt");

  definition
}

fn main() -> Result<(), SteplineError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();
  info!("--- Branching Example ---");

  let definition = build_payment_action();

  for method in ["card", "wallet", "cash"] {
    let outcome = definition.run([("method", method)])?;
    info!(
      "method={} success={} code={} processed_by={:?}",
      method,
      outcome.is_success(),
      outcome.code(),
      outcome.fixtures().get("processed_by")
    );
  }

  let rejected = definition.run([("method", "cash")])?;
  assert!(rejected.is_failure());
  assert_eq!(rejected.code(), "unsupported_method");
  // The failure short-circuits `record_receipt`.
  assert!(!rejected.fixtures().contains_key("receipt"));

  Ok(())
}
