// stepline/src/core/step.rs

//! Defines the polymorphic step stored in an action definition's step lists.

use crate::branch::Branch;
use crate::core::action::Action;
use crate::core::control::StepControl;
use crate::core::fields::Options;
use crate::pipeline::ActionDefinition;
use std::sync::Arc;

/// A named operation of an action definition.
///
/// Operations receive the live action and the options the invoking step was registered
/// with. Returning `Err` is a fatal fault: the run is aborted and the error reaches the
/// caller. Business failures go through `Action::fail` instead.
pub type Operation =
  Arc<dyn Fn(&mut Action, &Options) -> anyhow::Result<StepControl> + Send + Sync + 'static>;

/// Evaluates an action and returns the key of the branch arm to run.
pub type Discriminant = Arc<dyn Fn(&Action) -> anyhow::Result<String> + Send + Sync + 'static>;

/// One unit of pipeline work.
#[derive(Clone)]
pub enum Step {
  /// Calls the definition's operation named `operation`, passing `options`.
  Invoke { operation: String, options: Options },
  /// Runs another action definition as a nested, independent run.
  SubAction {
    definition: Arc<ActionDefinition>,
    options: Options,
  },
  /// Evaluates a discriminant and runs the matching arm.
  Branch(Branch),
}

impl Step {
  pub fn invoke(operation: impl Into<String>) -> Self {
    Self::invoke_with(operation, Options::new())
  }

  pub fn invoke_with(operation: impl Into<String>, options: Options) -> Self {
    Step::Invoke {
      operation: operation.into(),
      options,
    }
  }

  pub fn action(definition: Arc<ActionDefinition>) -> Self {
    Self::action_with(definition, Options::new())
  }

  pub fn action_with(definition: Arc<ActionDefinition>, options: Options) -> Self {
    Step::SubAction { definition, options }
  }

  /// Label used in logs and error reports.
  pub fn label(&self) -> &str {
    match self {
      Step::Invoke { operation, .. } => operation,
      Step::SubAction { definition, .. } => definition.name(),
      Step::Branch(branch) => branch.name(),
    }
  }

  pub fn options(&self) -> Option<&Options> {
    match self {
      Step::Invoke { options, .. } | Step::SubAction { options, .. } => Some(options),
      Step::Branch(_) => None,
    }
  }
}

// Registration is idempotent: an equal step is never appended twice. Invocations compare
// by name and options, nested actions by definition identity and options, branches by name.
impl PartialEq for Step {
  fn eq(&self, other: &Self) -> bool {
    match (self, other) {
      (
        Step::Invoke {
          operation: a,
          options: a_opts,
        },
        Step::Invoke {
          operation: b,
          options: b_opts,
        },
      ) => a == b && a_opts == b_opts,
      (
        Step::SubAction {
          definition: a,
          options: a_opts,
        },
        Step::SubAction {
          definition: b,
          options: b_opts,
        },
      ) => Arc::ptr_eq(a, b) && a_opts == b_opts,
      (Step::Branch(a), Step::Branch(b)) => a.name() == b.name(),
      _ => false,
    }
  }
}

impl std::fmt::Debug for Step {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Step::Invoke { operation, options } => f
        .debug_struct("Invoke")
        .field("operation", operation)
        .field("options", options)
        .finish(),
      Step::SubAction { definition, options } => f
        .debug_struct("SubAction")
        .field("definition", &definition.name())
        .field("options", options)
        .finish(),
      Step::Branch(branch) => branch.fmt(f),
    }
  }
}

impl From<&str> for Step {
  fn from(operation: &str) -> Self {
    Step::invoke(operation)
  }
}

impl From<String> for Step {
  fn from(operation: String) -> Self {
    Step::invoke(operation)
  }
}

impl From<Arc<ActionDefinition>> for Step {
  fn from(definition: Arc<ActionDefinition>) -> Self {
    Step::action(definition)
  }
}

impl From<&Arc<ActionDefinition>> for Step {
  fn from(definition: &Arc<ActionDefinition>) -> Self {
    Step::action(Arc::clone(definition))
  }
}

impl From<Branch> for Step {
  fn from(branch: Branch) -> Self {
    Step::Branch(branch)
  }
}
