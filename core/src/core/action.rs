// stepline/src/core/action.rs

//! The per-run action instance: a mutable field set plus at most one outcome.

use crate::core::control::StepControl;
use crate::core::fields::{is_private, Errors, Fields, Value, RESULT_FIELD};
use crate::core::outcome::{Outcome, DEFAULT_SUCCESS_CODE, DEFAULT_SUCCESS_MESSAGE};
use anyhow::Context as AnyhowContext;
use indexmap::IndexSet;
use serde::de::DeserializeOwned;
use tracing::{event, Level};

/// State of one action run.
///
/// An `Action` is created by the runner for every `run` call and owned exclusively by it.
/// Operations mutate it through `&mut Action`. Once an outcome is set the action is
/// *finished*; the first outcome wins and later `succeed`/`fail` calls are ignored.
#[derive(Debug, Clone, Default)]
pub struct Action {
  name: String,
  fields: Fields,
  exposed: IndexSet<String>,
  outcome: Option<Outcome>,
}

impl Action {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      ..Default::default()
    }
  }

  /// Name of the definition this instance was created for.
  pub fn name(&self) -> &str {
    &self.name
  }

  // --- Fields ---

  /// Sets a field, returning the previous value if any.
  pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
    self.fields.insert(name.into(), value.into())
  }

  pub fn get(&self, name: &str) -> Option<&Value> {
    self.fields.get(name)
  }

  /// Reads a field and deserializes it into `T`.
  ///
  /// Fails if the field is missing or holds a value of another shape.
  pub fn value<T: DeserializeOwned>(&self, name: &str) -> anyhow::Result<T> {
    let raw = self
      .fields
      .get(name)
      .with_context(|| format!("field '{}' is not set on action '{}'", name, self.name))?;
    serde_json::from_value(raw.clone()).with_context(|| {
      format!(
        "field '{}' on action '{}' is not a {}",
        name,
        self.name,
        std::any::type_name::<T>()
      )
    })
  }

  pub fn contains(&self, name: &str) -> bool {
    self.fields.contains_key(name)
  }

  /// Removes a field, keeping the order of the remaining ones.
  pub fn remove(&mut self, name: &str) -> Option<Value> {
    self.fields.shift_remove(name)
  }

  /// Sets every given field, overwriting existing ones.
  pub fn update_fields<I, K, V>(&mut self, fields: I)
  where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
  {
    for (name, value) in fields {
      self.set(name, value);
    }
  }

  /// Marks a private-looking field (leading `_`) for inclusion in fixtures.
  pub fn expose(&mut self, name: impl Into<String>) {
    self.exposed.insert(name.into());
  }

  /// The live field set, private fields included.
  pub fn fields(&self) -> &Fields {
    &self.fields
  }

  /// Snapshot of the fields an outcome carries.
  pub fn fixtures(&self) -> Fields {
    self
      .fields
      .iter()
      .filter(|(name, _)| name.as_str() != RESULT_FIELD)
      .filter(|(name, _)| !is_private(name) || self.exposed.contains(name.as_str()))
      .map(|(name, value)| (name.clone(), value.clone()))
      .collect()
  }

  // --- Outcome ---

  /// Succeeds with the default message and code.
  pub fn succeed(&mut self) -> StepControl {
    self.succeed_with(DEFAULT_SUCCESS_MESSAGE, DEFAULT_SUCCESS_CODE, Errors::new())
  }

  pub fn succeed_with(&mut self, message: impl Into<String>, code: impl Into<String>, errors: Errors) -> StepControl {
    if self.is_finished() {
      return self.ignore_second_outcome();
    }
    let outcome = Outcome::success(code, message, errors, self.fixtures());
    self.stop_with(outcome)
  }

  /// Fails with `code` and a message.
  pub fn fail(&mut self, code: impl Into<String>, message: impl Into<String>) -> StepControl {
    self.fail_with(code, Some(message.into()), Errors::new())
  }

  pub fn fail_with(&mut self, code: impl Into<String>, message: Option<String>, errors: Errors) -> StepControl {
    if self.is_finished() {
      return self.ignore_second_outcome();
    }
    let outcome = Outcome::failure(code, message, errors, self.fixtures());
    self.stop_with(outcome)
  }

  /// Commits `outcome` unless one is already set, and asks the runner to halt.
  pub fn stop_with(&mut self, outcome: Outcome) -> StepControl {
    if self.is_finished() {
      return self.ignore_second_outcome();
    }
    event!(
      Level::DEBUG,
      action = %self.name,
      code = outcome.code(),
      success = outcome.is_success(),
      "Outcome set."
    );
    self.outcome = Some(outcome);
    StepControl::Halt
  }

  fn ignore_second_outcome(&self) -> StepControl {
    event!(Level::WARN, action = %self.name, "Action already finished; keeping the first outcome.");
    StepControl::Halt
  }

  pub fn outcome(&self) -> Option<&Outcome> {
    self.outcome.as_ref()
  }

  pub fn is_finished(&self) -> bool {
    self.outcome.is_some()
  }

  pub(crate) fn into_outcome(self) -> Option<Outcome> {
    self.outcome
  }
}
