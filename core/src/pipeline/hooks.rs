// stepline/src/pipeline/hooks.rs

//! Contains methods for registering the hook lists of an `ActionDefinition`:
//! steps run after the main list, depending on the outcome.
//!
//! Hooks run for side effects only. By the time they run the action is finished, so
//! they never replace the outcome; a hook returning `StepControl::Halt` (for example by
//! calling `fail`) only stops the rest of its own list.

use crate::core::step::Step;
use crate::pipeline::definition::{push_unique, ActionDefinition};
use tracing::{event, Level};

/// The hook lists of a definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hook {
  /// Runs after the main list when the outcome is a success.
  Success,
  /// Runs after the main list when the outcome is a failure.
  Failure,
  /// Runs after the success or failure hooks, whatever the outcome.
  Always,
}

impl Hook {
  pub fn as_str(self) -> &'static str {
    match self {
      Hook::Success => "on_success",
      Hook::Failure => "on_failure",
      Hook::Always => "always",
    }
  }
}

impl std::fmt::Display for Hook {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

impl ActionDefinition {
  /// Registers a step run only when the action succeeds.
  pub fn on_success(&mut self, step: impl Into<Step>) -> &mut Self {
    self.hook(Hook::Success, step)
  }

  /// Registers a step run only when the action fails.
  pub fn on_failure(&mut self, step: impl Into<Step>) -> &mut Self {
    self.hook(Hook::Failure, step)
  }

  /// Registers a step run after every run, whatever the outcome.
  pub fn always(&mut self, step: impl Into<Step>) -> &mut Self {
    self.hook(Hook::Always, step)
  }

  /// Appends `step` to the given hook list. Registering an equal step again is a no-op.
  pub fn hook(&mut self, hook: Hook, step: impl Into<Step>) -> &mut Self {
    self.ensure_open();
    let step = step.into();
    let list = match hook {
      Hook::Success => &mut self.success_steps,
      Hook::Failure => &mut self.failure_steps,
      Hook::Always => &mut self.always_steps,
    };
    if push_unique(list, step) {
      event!(Level::TRACE, action = %self.name, %hook, "Hook step registered.");
    }
    self
  }

  pub fn hook_steps(&self, hook: Hook) -> &[Step] {
    match hook {
      Hook::Success => &self.success_steps,
      Hook::Failure => &self.failure_steps,
      Hook::Always => &self.always_steps,
    }
  }

  pub fn success_steps(&self) -> &[Step] {
    &self.success_steps
  }

  pub fn failure_steps(&self) -> &[Step] {
    &self.failure_steps
  }

  pub fn always_steps(&self) -> &[Step] {
    &self.always_steps
  }
}
