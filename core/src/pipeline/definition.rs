// stepline/src/pipeline/definition.rs

//! Contains the `ActionDefinition` struct and the methods for registering its
//! operations, main steps and branches.

use crate::branch::{Branch, BranchBuilder};
use crate::core::action::Action;
use crate::core::control::StepControl;
use crate::core::fields::Options;
use crate::core::step::{Discriminant, Operation, Step};
use crate::error::{SteplineError, SteplineResult};
use crate::pipeline::transaction::TransactionProvider;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{event, Level};

/// The declarative description of an action pipeline.
///
/// A definition owns a table of named operations, the ordered main step list, the
/// success/failure/always hook lists, and an optional transactional resource. It is
/// built once, then run any number of times. The first `run` validates and freezes it;
/// registering into a frozen definition is a setup error.
pub struct ActionDefinition {
  pub(crate) name: String,
  pub(crate) operations: HashMap<String, Operation>,

  pub(crate) steps: Vec<Step>,
  pub(crate) success_steps: Vec<Step>,
  pub(crate) failure_steps: Vec<Step>,
  pub(crate) always_steps: Vec<Step>,

  pub(crate) transaction: Option<Arc<dyn TransactionProvider>>,
  frozen: AtomicBool,
}

impl ActionDefinition {
  /// Creates an empty definition with no transactional resource.
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      operations: HashMap::new(),
      steps: Vec::new(),
      success_steps: Vec::new(),
      failure_steps: Vec::new(),
      always_steps: Vec::new(),
      transaction: None,
      frozen: AtomicBool::new(false),
    }
  }

  /// Creates a child definition.
  ///
  /// The child starts with a copy of this definition's operations and transactional
  /// resource as they are right now; later changes on either side are not shared. Step
  /// lists are not inherited.
  pub fn derive(&self, name: impl Into<String>) -> Self {
    let mut child = Self::new(name);
    child.operations = self.operations.clone();
    child.transaction = self.transaction.clone();
    event!(Level::DEBUG, parent = %self.name, child = %child.name, "Definition derived.");
    child
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  /// Ensures that the definition can still be modified. Panics if it is frozen.
  pub(crate) fn ensure_open(&self) {
    if self.is_frozen() {
      // Registration after the first run is a programming error, not a runtime one.
      panic!(
        "Stepline setup error: action '{}' has already run and can no longer be modified.",
        self.name
      );
    }
  }

  pub fn is_frozen(&self) -> bool {
    self.frozen.load(Ordering::Acquire)
  }

  // --- Operations ---

  /// Registers (or replaces) the operation called `name`.
  pub fn operation<F>(&mut self, name: impl Into<String>, operation: F) -> &mut Self
  where
    F: Fn(&mut Action, &Options) -> anyhow::Result<StepControl> + Send + Sync + 'static,
  {
    self.ensure_open();
    let name = name.into();
    event!(Level::TRACE, action = %self.name, operation = %name, "Operation registered.");
    self.operations.insert(name, Arc::new(operation));
    self
  }

  pub fn has_operation(&self, name: &str) -> bool {
    self.operations.contains_key(name)
  }

  // --- Main steps ---

  /// Appends a main step. Registering an equal step again is a no-op.
  pub fn step(&mut self, step: impl Into<Step>) -> &mut Self {
    self.ensure_open();
    push_unique(&mut self.steps, step.into());
    self
  }

  /// Alias of `step`.
  pub fn action(&mut self, step: impl Into<Step>) -> &mut Self {
    self.step(step)
  }

  /// Starts a branch step. The returned builder declares the arms and registers the
  /// branch when finalized.
  pub fn branch<F, K>(&mut self, name: impl Into<String>, discriminant: F) -> BranchBuilder<'_>
  where
    F: Fn(&Action) -> anyhow::Result<K> + Send + Sync + 'static,
    K: Into<String>,
  {
    self.ensure_open();
    let discriminant: Discriminant =
      Arc::new(move |action: &Action| -> anyhow::Result<String> { discriminant(action).map(Into::into) });
    BranchBuilder::new(self, Branch::new(name.into(), discriminant))
  }

  /// Alias of `branch`.
  pub fn case_step<F, K>(&mut self, name: impl Into<String>, discriminant: F) -> BranchBuilder<'_>
  where
    F: Fn(&Action) -> anyhow::Result<K> + Send + Sync + 'static,
    K: Into<String>,
  {
    self.branch(name, discriminant)
  }

  pub fn steps(&self) -> &[Step] {
    &self.steps
  }

  // --- Transactional resource ---

  /// Runs every future execution of this definition inside `provider`'s transaction.
  pub fn set_transaction(&mut self, provider: Arc<dyn TransactionProvider>) -> &mut Self {
    self.ensure_open();
    event!(Level::DEBUG, action = %self.name, provider = provider.name(), "Transactional resource set.");
    self.transaction = Some(provider);
    self
  }

  /// Removes the transactional resource, including one inherited through `derive`.
  pub fn clear_transaction(&mut self) -> &mut Self {
    self.ensure_open();
    self.transaction = None;
    self
  }

  pub fn transaction(&self) -> Option<&Arc<dyn TransactionProvider>> {
    self.transaction.as_ref()
  }

  // --- Validation ---

  /// Validates the definition on first use and freezes it.
  ///
  /// A definition without main steps, or invoking an operation it does not define,
  /// is rejected before any step runs.
  pub(crate) fn freeze(&self) -> SteplineResult<()> {
    if self.is_frozen() {
      return Ok(());
    }
    if self.steps.is_empty() {
      event!(Level::ERROR, action = %self.name, "Action has no steps.");
      return Err(SteplineError::NoSteps {
        action: self.name.clone(),
      });
    }
    let lists = [
      &self.steps,
      &self.success_steps,
      &self.failure_steps,
      &self.always_steps,
    ];
    for step in lists.into_iter().flatten() {
      self.check_resolvable(step)?;
    }
    self.frozen.store(true, Ordering::Release);
    event!(Level::DEBUG, action = %self.name, "Definition validated and frozen.");
    Ok(())
  }

  fn check_resolvable(&self, step: &Step) -> SteplineResult<()> {
    match step {
      Step::Invoke { operation, .. } if !self.has_operation(operation) => {
        event!(Level::ERROR, action = %self.name, %operation, "Step invokes an undefined operation.");
        Err(SteplineError::OperationNotFound {
          action: self.name.clone(),
          operation: operation.clone(),
        })
      }
      Step::Branch(branch) => branch.all_steps().try_for_each(|s| self.check_resolvable(s)),
      _ => Ok(()),
    }
  }
}

impl std::fmt::Debug for ActionDefinition {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let mut operations: Vec<&String> = self.operations.keys().collect();
    operations.sort();
    f.debug_struct("ActionDefinition")
      .field("name", &self.name)
      .field("operations", &operations)
      .field("steps", &self.steps)
      .field("success_steps", &self.success_steps)
      .field("failure_steps", &self.failure_steps)
      .field("always_steps", &self.always_steps)
      .field("transaction", &self.transaction.as_ref().map(|p| p.name()))
      .field("frozen", &self.is_frozen())
      .finish()
  }
}

/// Appends `step` unless an equal step is already present.
pub(crate) fn push_unique(steps: &mut Vec<Step>, step: Step) -> bool {
  if steps.contains(&step) {
    event!(Level::TRACE, step = step.label(), "Step already registered; ignoring.");
    false
  } else {
    steps.push(step);
    true
  }
}
