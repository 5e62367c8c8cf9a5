// stepline/src/registry.rs

//! Defines `ActionRegistry`, a name-keyed registry for resolving and running action
//! definitions.

use crate::core::fields::Value;
use crate::core::outcome::Outcome;
use crate::error::{SteplineError, SteplineResult};
use crate::pipeline::definition::ActionDefinition;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{event, instrument, Level};

/// Resolves symbolic action names to runnable definitions.
///
/// Populated at startup; definitions are shared as `Arc`s so they can also be used as
/// nested steps of other definitions.
#[derive(Default)]
pub struct ActionRegistry {
  registry: RwLock<HashMap<String, Arc<ActionDefinition>>>,
}

impl ActionRegistry {
  /// Creates a new, empty registry.
  pub fn new() -> Self {
    Self::default()
  }

  /// Registers `definition` under its own name and returns the shared handle.
  ///
  /// A definition already registered under that name is replaced.
  pub fn register(&self, definition: ActionDefinition) -> Arc<ActionDefinition> {
    let shared = Arc::new(definition);
    self.insert(shared.name().to_string(), Arc::clone(&shared));
    shared
  }

  /// Registers an already shared definition under `name`.
  pub fn insert(&self, name: impl Into<String>, definition: Arc<ActionDefinition>) {
    let name = name.into();
    event!(Level::DEBUG, %name, action = definition.name(), "Registering action.");
    if self.registry.write().insert(name.clone(), definition).is_some() {
      event!(Level::WARN, %name, "Replaced a previously registered action.");
    }
  }

  pub fn resolve(&self, name: &str) -> Option<Arc<ActionDefinition>> {
    self.registry.read().get(name).cloned()
  }

  pub fn contains(&self, name: &str) -> bool {
    self.registry.read().contains_key(name)
  }

  /// Registered names, sorted.
  pub fn names(&self) -> Vec<String> {
    let mut names: Vec<String> = self.registry.read().keys().cloned().collect();
    names.sort();
    names
  }

  /// Runs the action registered under `name`.
  #[instrument(name = "ActionRegistry::run", skip(self, args), err(Display))]
  pub fn run<I, K, V>(&self, name: &str, args: I) -> SteplineResult<Outcome>
  where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
  {
    self.resolve_or_err(name)?.run(args)
  }

  /// Runs the action registered under `name`, then hands a successful outcome to
  /// `on_success`.
  pub fn run_then<I, K, V, F>(&self, name: &str, args: I, on_success: F) -> SteplineResult<Outcome>
  where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
    F: FnOnce(&Outcome),
  {
    self.resolve_or_err(name)?.run_then(args, on_success)
  }

  fn resolve_or_err(&self, name: &str) -> SteplineResult<Arc<ActionDefinition>> {
    // The read guard is released before the action runs.
    self.resolve(name).ok_or_else(|| {
      event!(Level::ERROR, %name, "No action registered under this name.");
      SteplineError::UnknownAction { name: name.to_string() }
    })
  }
}

impl std::fmt::Debug for ActionRegistry {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ActionRegistry").field("names", &self.names()).finish()
  }
}
