// stepline_project/demos/checkout_app/src/actions/inventory_action.rs

use std::sync::Arc;

use stepline::{Action, ActionDefinition, Options, StepControl};
use tracing::debug;

use crate::state::AppState;
use crate::store::StoreError;

/// Takes `quantity` units of `sku` out of stock, failing with `out_of_stock` when short.
pub fn build_reserve_inventory_action(app_state: &AppState) -> Arc<ActionDefinition> {
  let mut definition = ActionDefinition::new("reserve_inventory");

  let store = app_state.store.clone();
  definition.operation("reserve_stock", move |action: &mut Action, _: &Options| {
    let sku = action.value::<String>("sku")?;
    let quantity = action.value::<i64>("quantity")?;
    match store.reserve_stock(&sku, quantity) {
      Ok(remaining) => {
        debug!(%sku, quantity, remaining, "Stock reserved.");
        action.set("remaining_stock", remaining);
        Ok(StepControl::Continue)
      }
      Err(StoreError::InsufficientStock { available, .. }) => Ok(action.fail(
        "out_of_stock",
        format!("Only {} unit(s) of '{}' left", available, sku),
      )),
      Err(other) => Err(other.into()),
    }
  });
  definition.step("reserve_stock");

  Arc::new(definition)
}
