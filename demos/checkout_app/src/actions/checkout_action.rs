// stepline_project/demos/checkout_app/src/actions/checkout_action.rs

use std::sync::Arc;

use chrono::Utc;
use stepline::{fields, Action, ActionDefinition, Errors, Options, Step, StepControl};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::actions::common_steps::{optional_str, push_error, register_audit};
use crate::actions::notification_action::NotificationActions;
use crate::models::order::{Order, OrderStatus};
use crate::services::payment_mock::{self, ChargeDecision, ChargeRequest};
use crate::state::AppState;

/// Builds the `checkout` action.
///
/// Input fields: `email`, `sku`, `quantity` and `payment_method` (`card` or `wallet`).
/// The whole run, hooks included, happens inside a store transaction: a fault anywhere
/// restores the store, while business failures keep what was written and rely on the
/// failure hook to refund the charge.
#[instrument(name = "checkout_action::build", skip_all)]
pub fn build_checkout_action(
  app_state: &AppState,
  notifications: &NotificationActions,
  reserve_inventory: &Arc<ActionDefinition>,
) -> ActionDefinition {
  let mut checkout = ActionDefinition::new("checkout");
  checkout.set_transaction(app_state.store.clone());

  // Step 1: Validate the request
  checkout.operation("validate_checkout", |action: &mut Action, _: &Options| {
    let mut errors = Errors::new();
    if !optional_str(action, "email").map_or(false, |email| email.contains('@')) {
      push_error(&mut errors, "email", "is required");
    }
    if optional_str(action, "sku").is_none() {
      push_error(&mut errors, "sku", "is required");
    }
    match action.get("quantity").and_then(|v| v.as_i64()) {
      Some(quantity) if quantity > 0 => {}
      _ => push_error(&mut errors, "quantity", "must be a positive integer"),
    }
    if optional_str(action, "payment_method").is_none() {
      push_error(&mut errors, "payment_method", "is required");
    }

    if errors.is_empty() {
      Ok(StepControl::Continue)
    } else {
      Ok(action.fail_with("invalid_input", Some("Checkout request is invalid".to_string()), errors))
    }
  });

  // Step 2: Resolve the customer
  let store = app_state.store.clone();
  checkout.operation("load_customer", move |action: &mut Action, _: &Options| {
    let email = action.value::<String>("email")?;
    let Some(user) = store.find_user(&email) else {
      return Ok(action.fail("unknown_customer", format!("No account for '{}'", email)));
    };
    action.set("user_id", user.id.to_string());
    if let Some(name) = user.name {
      action.set("name", name);
    }
    Ok(StepControl::Continue)
  });

  // Step 3: Price the order
  let store = app_state.store.clone();
  let currency = app_state.config.currency.clone();
  checkout.operation("price_order", move |action: &mut Action, _: &Options| {
    let sku = action.value::<String>("sku")?;
    let Some(product) = store.product(&sku) else {
      return Ok(action.fail("unknown_product", format!("No product with SKU '{}'", sku)));
    };
    let total_cents = product.price_cents * action.value::<i64>("quantity")?;
    action.set("unit_price_cents", product.price_cents);
    action.set("total_cents", total_cents);
    action.set("currency", currency.as_str());
    Ok(StepControl::Continue)
  });

  // Step 4: Charge through the selected channel
  let store = app_state.store.clone();
  let config = app_state.config.clone();
  checkout.operation("charge", move |action: &mut Action, options: &Options| {
    let channel = options.get("channel").and_then(|v| v.as_str()).unwrap_or("card");
    let account_id = match channel {
      "wallet" => config.mock_payment_wallet_account_id.as_str(),
      _ => config.mock_payment_card_account_id.as_str(),
    };
    let request = ChargeRequest {
      amount_cents: action.value::<i64>("total_cents")?,
      currency: &config.currency,
      channel,
      account_id,
      decline_above_cents: config.payment_decline_above_cents,
    };

    match payment_mock::charge(&request)? {
      ChargeDecision::Approved(charge) => {
        action.set("payment_id", charge.id.as_str());
        if let Some(provider) = options.get("provider").and_then(|v| v.as_str()) {
          action.set("wallet_provider", provider);
        }
        store.record_charge(charge);
        Ok(StepControl::Continue)
      }
      ChargeDecision::Declined { reason } => Ok(action.fail_with("payment_declined", Some(reason), Errors::new())),
    }
  });

  checkout.operation("reject_payment_method", |action: &mut Action, _: &Options| {
    let method = action.value::<String>("payment_method")?;
    Ok(action.fail(
      "unsupported_payment_method",
      format!("Payment method '{}' is not supported", method),
    ))
  });

  // Step 6: Persist the order
  let store = app_state.store.clone();
  checkout.operation("create_order", move |action: &mut Action, _: &Options| {
    let order = Order {
      id: Uuid::new_v4(),
      user_id: Uuid::parse_str(&action.value::<String>("user_id")?)?,
      sku: action.value::<String>("sku")?,
      quantity: action.value::<i64>("quantity")?,
      total_amount_cents: action.value::<i64>("total_cents")?,
      currency: action.value::<String>("currency")?,
      status: OrderStatus::Paid,
      payment_id: optional_str(action, "payment_id"),
      created_at: Utc::now(),
    };
    let order_id = order.id;
    store.insert_order(order)?;
    info!(%order_id, "Order created.");

    action.set("order_id", order_id.to_string());
    Ok(action.succeed_with("Order placed", "order_placed", Errors::new()))
  });

  // Failure hook: give the money back if we already took it
  let store = app_state.store.clone();
  checkout.operation("refund_payment", move |action: &mut Action, _: &Options| {
    if let Some(payment_id) = optional_str(action, "payment_id") {
      store.refund_charge(&payment_id)?;
      warn!(%payment_id, "Charge refunded after failed checkout.");
      action.set("refunded", true);
    }
    Ok(StepControl::Continue)
  });

  register_audit(&mut checkout);

  checkout
    .step("validate_checkout")
    .step("load_customer")
    .step("price_order");
  checkout
    .branch("payment_method", |action: &Action| action.value::<String>("payment_method"))
    .when("card", Step::invoke_with("charge", fields([("channel", "card")])))
    .when(
      "wallet",
      Step::invoke_with("charge", fields([("channel", "wallet"), ("provider", "paypal")])),
    )
    .otherwise("reject_payment_method")
    .finalize();
  // Step 5: Reserve stock through the shared inventory action
  checkout.step(reserve_inventory).step("create_order");

  checkout
    .on_success(Step::action(notifications.order_confirmation.clone()))
    .on_failure("refund_payment")
    .always("audit");

  checkout
}
