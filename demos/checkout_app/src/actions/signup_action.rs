// stepline_project/demos/checkout_app/src/actions/signup_action.rs

use chrono::Utc;
use stepline::{Action, ActionDefinition, Errors, Options, Step, StepControl};
use tracing::{event, info, warn, Level};
use uuid::Uuid;

use crate::actions::common_steps::{optional_str, push_error, register_audit};
use crate::actions::notification_action::NotificationActions;
use crate::models::user::User;
use crate::services::auth_service;
use crate::state::AppState;

const MIN_PASSWORD_LEN: usize = 8;

/// Builds the `signup` action.
///
/// Expects `email`, `_password` and optionally `name`. The password stays private and
/// never shows up in the outcome.
pub fn build_signup_action(app_state: &AppState, notifications: &NotificationActions) -> ActionDefinition {
  let mut signup = ActionDefinition::new("signup");
  signup.set_transaction(app_state.store.clone());

  // Step 1: Validate input
  signup.operation("validate_signup_input", |action: &mut Action, _: &Options| {
    let mut errors = Errors::new();
    match optional_str(action, "email") {
      Some(email) if email.contains('@') => {}
      Some(_) => push_error(&mut errors, "email", "is not a valid address"),
      None => push_error(&mut errors, "email", "is required"),
    }
    let password_len = optional_str(action, "_password").map_or(0, |p| p.len());
    if password_len < MIN_PASSWORD_LEN {
      push_error(
        &mut errors,
        "password",
        format!("must be at least {} characters long", MIN_PASSWORD_LEN),
      );
    }

    if !errors.is_empty() {
      warn!(?errors, "Signup input rejected.");
      return Ok(action.fail_with(
        "invalid_input",
        Some("Signup request is invalid".to_string()),
        errors,
      ));
    }
    Ok(StepControl::Continue)
  });

  // Step 2: Reject duplicate emails
  let store = app_state.store.clone();
  signup.operation("check_existing_user", move |action: &mut Action, _: &Options| {
    let email = action.value::<String>("email")?;
    event!(Level::DEBUG, %email, "Checking if user email already exists.");
    if store.find_user(&email).is_some() {
      return Ok(action.fail("email_taken", "An account with this email already exists"));
    }
    Ok(StepControl::Continue)
  });

  // Step 3: Hash the password and persist the user
  let store = app_state.store.clone();
  signup.operation("create_user", move |action: &mut Action, _: &Options| {
    let password = action.value::<String>("_password")?;
    let user = User {
      id: Uuid::new_v4(),
      email: action.value::<String>("email")?,
      name: optional_str(action, "name"),
      password_hash: auth_service::hash_password(&password)?,
      created_at: Utc::now(),
    };
    let user_id = user.id;
    store.insert_user(user)?;
    info!(%user_id, "User created.");

    action.remove("_password");
    action.set("user_id", user_id.to_string());
    Ok(action.succeed_with("Account created", "user_created", Errors::new()))
  });

  register_audit(&mut signup);

  signup
    .step("validate_signup_input")
    .step("check_existing_user")
    .step("create_user");
  signup
    .on_success(Step::action(notifications.welcome.clone()))
    .always("audit");

  signup
}
