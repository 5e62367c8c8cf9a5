// stepline_project/demos/checkout_app/src/actions/signin_action.rs

use stepline::{Action, ActionDefinition, Options, StepControl};
use tracing::info;
use uuid::Uuid;

use crate::actions::common_steps::{optional_str, register_audit};
use crate::services::auth_service;
use crate::state::AppState;

const INVALID_CREDENTIALS: &str = "Email or password is incorrect";

/// Builds the `signin` action: checks `email` and `_password` and issues a mock session
/// token.
pub fn build_signin_action(app_state: &AppState) -> ActionDefinition {
  let mut signin = ActionDefinition::new("signin");

  let store = app_state.store.clone();
  signin.operation("authenticate", move |action: &mut Action, _: &Options| {
    let (Some(email), Some(password)) = (optional_str(action, "email"), optional_str(action, "_password")) else {
      return Ok(action.fail("invalid_credentials", INVALID_CREDENTIALS));
    };
    let Some(user) = store.find_user(&email) else {
      return Ok(action.fail("invalid_credentials", INVALID_CREDENTIALS));
    };
    if !auth_service::verify_password(&user.password_hash, &password)? {
      return Ok(action.fail("invalid_credentials", INVALID_CREDENTIALS));
    }

    info!(user_id = %user.id, "User signed in.");
    action.set("user_id", user.id.to_string());
    action.set("session_token", format!("mock_token_{}", Uuid::new_v4().simple()));
    Ok(StepControl::Continue)
  });

  register_audit(&mut signin);
  signin.step("authenticate").always("audit");
  signin
}
