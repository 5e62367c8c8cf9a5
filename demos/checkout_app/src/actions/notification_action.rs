// stepline_project/demos/checkout_app/src/actions/notification_action.rs

use std::sync::Arc;

use stepline::{fields, Action, ActionDefinition, Options, Step, StepControl};

use crate::actions::common_steps::optional_str;
use crate::services::email_mock;
use crate::state::AppState;

/// Email actions derived from one shared set of operations.
pub struct NotificationActions {
  pub welcome: Arc<ActionDefinition>,
  pub order_confirmation: Arc<ActionDefinition>,
}

pub fn build_notification_actions(app_state: &AppState) -> NotificationActions {
  let mut base = ActionDefinition::new("notification");

  base.operation("render_email", |action: &mut Action, options: &Options| {
    let template = options.get("template").and_then(|v| v.as_str()).unwrap_or("generic");
    let name = optional_str(action, "name").unwrap_or_else(|| "there".to_string());
    let (subject, body) = match template {
      "welcome" => ("Welcome aboard", format!("Hi {}, thanks for signing up.", name)),
      "order_confirmation" => {
        let order_id = optional_str(action, "order_id").unwrap_or_default();
        ("Your order is confirmed", format!("Hi {}, order {} is on its way.", name, order_id))
      }
      other => anyhow::bail!("unknown email template '{}'", other),
    };
    action.set("_subject", subject);
    action.set("_body", body);
    Ok(StepControl::Continue)
  });

  let sender = app_state.config.mock_email_sender.clone();
  base.operation("deliver_email", move |action: &mut Action, _: &Options| {
    let to = action.value::<String>("email")?;
    let subject = action.value::<String>("_subject")?;
    let body = action.value::<String>("_body")?;
    let message_id = email_mock::send_email(&sender, &to, &subject, &body)?;
    action.set("message_id", message_id);
    Ok(StepControl::Continue)
  });

  let mut welcome = base.derive("send_welcome_email");
  welcome
    .step(Step::invoke_with("render_email", fields([("template", "welcome")])))
    .step("deliver_email");

  let mut order_confirmation = base.derive("send_order_confirmation");
  order_confirmation
    .step(Step::invoke_with("render_email", fields([("template", "order_confirmation")])))
    .step("deliver_email");

  NotificationActions {
    welcome: Arc::new(welcome),
    order_confirmation: Arc::new(order_confirmation),
  }
}
