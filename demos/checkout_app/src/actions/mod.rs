// stepline_project/demos/checkout_app/src/actions/mod.rs

//! Defines and registers all actions used by the checkout application.

use crate::state::AppState;

pub mod common_steps;
pub mod inventory_action;
pub mod notification_action;

pub mod checkout_action;
pub mod signin_action;
pub mod signup_action;

/// Registers every action with the registry held in `app_state`.
///
/// Called once at startup, before any action runs.
pub fn register_all_actions(app_state: &AppState) {
  tracing::info!("Registering actions...");

  let notifications = notification_action::build_notification_actions(app_state);
  let reserve_inventory = inventory_action::build_reserve_inventory_action(app_state);

  app_state
    .registry
    .register(signup_action::build_signup_action(app_state, &notifications));
  app_state.registry.register(signin_action::build_signin_action(app_state));
  app_state.registry.register(checkout_action::build_checkout_action(
    app_state,
    &notifications,
    &reserve_inventory,
  ));
  // Also runnable on its own, e.g. for stock adjustments.
  app_state
    .registry
    .insert(reserve_inventory.name().to_string(), reserve_inventory.clone());

  tracing::info!(actions = ?app_state.registry.names(), "All application actions registered.");
}
