// stepline/src/pipeline/execution.rs

//! Contains `ActionDefinition::run` and the runner that walks a definition's step
//! lists against one action instance.
//!
//! A run moves through these phases:
//!
//! 1. validate and freeze the definition, create the `Action` seeded with the run arguments;
//! 2. inside the transactional resource, if any:
//!    walk the main steps, stopping as soon as the action is finished;
//!    resolve an unset outcome to the implicit success;
//!    walk the success or the failure hooks, then the always hooks;
//! 3. call the completion callback if the outcome is a success;
//! 4. return the outcome.
//!
//! An operation or discriminant returning `Err` aborts the run; the error is returned
//! to the caller after the transactional resource has rolled back.

use crate::core::action::Action;
use crate::core::control::StepControl;
use crate::core::fields::{Fields, Value};
use crate::core::outcome::Outcome;
use crate::core::step::Step;
use crate::error::{SteplineError, SteplineResult};
use crate::pipeline::definition::ActionDefinition;
use crate::pipeline::hooks::Hook;
use tracing::{event, instrument, span, Level};

/// The step list being walked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
  Main,
  Hook(Hook),
}

impl std::fmt::Display for Phase {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Phase::Main => f.write_str("main"),
      Phase::Hook(hook) => hook.fmt(f),
    }
  }
}

impl ActionDefinition {
  /// Runs the action with `args` as its initial fields and returns its outcome.
  ///
  /// Business failures come back as `Ok(Outcome::Failure(..))`. `Err` is reserved for
  /// faults: an invalid definition, an operation or discriminant returning an error, or
  /// a transactional resource failing.
  pub fn run<I, K, V>(&self, args: I) -> SteplineResult<Outcome>
  where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
  {
    self.execute(crate::core::fields::fields(args))
  }

  /// Like `run`, then hands a successful outcome to `on_success`.
  ///
  /// The callback runs after the transaction (if any) has committed, at most once, and
  /// never for a failure.
  pub fn run_then<I, K, V, F>(&self, args: I, on_success: F) -> SteplineResult<Outcome>
  where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
    F: FnOnce(&Outcome),
  {
    let outcome = self.run(args)?;
    if outcome.is_success() {
      event!(Level::TRACE, action = %self.name, "Invoking completion callback.");
      on_success(&outcome);
    }
    Ok(outcome)
  }

  /// Alias of `run`.
  pub fn call<I, K, V>(&self, args: I) -> SteplineResult<Outcome>
  where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
  {
    self.run(args)
  }

  #[instrument(
    name = "ActionDefinition::run",
    skip_all,
    fields(
      action = %self.name,
      num_steps = self.steps.len(),
      transactional = self.transaction.is_some(),
    ),
    err(Display)
  )]
  pub(crate) fn execute(&self, args: Fields) -> SteplineResult<Outcome> {
    self.freeze()?;
    event!(Level::DEBUG, "Action run starting.");

    let mut action = Action::new(self.name.as_str());
    action.update_fields(args);

    let runner = Runner { definition: self };
    match &self.transaction {
      None => runner.drive(&mut action)?,
      Some(provider) => {
        event!(Level::DEBUG, provider = provider.name(), "Entering transaction.");
        let mut body = || runner.drive(&mut action).map_err(anyhow::Error::from);
        if let Err(err) = provider.transaction(&mut body) {
          event!(Level::ERROR, error = %err, "Transaction rolled back.");
          return Err(SteplineError::from_transaction(&self.name, err));
        }
        event!(Level::DEBUG, "Transaction committed.");
      }
    }

    let outcome = action.into_outcome().ok_or_else(|| {
      SteplineError::Internal(format!("action '{}' finished its run without an outcome", self.name))
    })?;
    event!(
      Level::INFO,
      success = outcome.is_success(),
      code = outcome.code(),
      "Action run finished."
    );
    Ok(outcome)
  }
}

/// Walks one definition's lists against one action.
struct Runner<'def> {
  definition: &'def ActionDefinition,
}

impl<'def> Runner<'def> {
  fn drive(&self, action: &mut Action) -> SteplineResult<()> {
    self.walk(Phase::Main, &self.definition.steps, action)?;

    if !action.is_finished() {
      event!(Level::DEBUG, "No step set an outcome; resolving to implicit success.");
      action.succeed();
    }

    let hook = if action.outcome().map_or(false, Outcome::is_success) {
      Hook::Success
    } else {
      Hook::Failure
    };
    self.walk(Phase::Hook(hook), self.definition.hook_steps(hook), action)?;
    self.walk(Phase::Hook(Hook::Always), &self.definition.always_steps, action)?;
    Ok(())
  }

  /// Runs `steps` in order.
  ///
  /// When the walk starts on an unfinished action, it stops as soon as the action
  /// becomes finished. Hook walks start finished and only stop on `Halt`.
  fn walk(&self, phase: Phase, steps: &[Step], action: &mut Action) -> SteplineResult<StepControl> {
    let gated = !action.is_finished();
    for (step_idx, step) in steps.iter().enumerate() {
      if gated && action.is_finished() {
        event!(Level::DEBUG, %phase, skipped = steps.len() - step_idx, "Action finished; skipping remaining steps.");
        return Ok(StepControl::Halt);
      }

      let step_span = span!(
        Level::INFO,
        "action_step",
        %phase,
        step = step.label(),
        step_index = step_idx
      );
      let _step_span_guard = step_span.enter();
      event!(Level::DEBUG, "Running step.");

      if self.run_step(phase, step, action)?.is_halt() {
        event!(Level::DEBUG, "Step halted the walk.");
        return Ok(StepControl::Halt);
      }
    }

    if gated && action.is_finished() {
      Ok(StepControl::Halt)
    } else {
      Ok(StepControl::Continue)
    }
  }

  fn run_step(&self, phase: Phase, step: &Step, action: &mut Action) -> SteplineResult<StepControl> {
    match step {
      Step::Invoke { operation, options } => {
        let op = self.definition.operations.get(operation).ok_or_else(|| SteplineError::OperationNotFound {
          action: self.definition.name.clone(),
          operation: operation.clone(),
        })?;
        op(action, options).map_err(|source| {
          event!(Level::ERROR, error = %source, "Operation failed.");
          SteplineError::StepFault {
            action: self.definition.name.clone(),
            step: operation.clone(),
            source,
          }
        })
      }

      Step::SubAction { definition, options } => {
        let mut args = action.fixtures();
        args.extend(options.iter().map(|(k, v)| (k.clone(), v.clone())));

        // Faults of the nested run are returned unchanged.
        match definition.execute(args)? {
          Outcome::Success(_) => {
            event!(Level::DEBUG, nested = definition.name(), "Nested action succeeded.");
            Ok(StepControl::Continue)
          }
          Outcome::Failure(failure) => {
            event!(
              Level::INFO,
              nested = definition.name(),
              code = failure.code(),
              "Nested action failed; failing the enclosing action."
            );
            Ok(action.fail_with(
              failure.code(),
              failure.message().map(str::to_string),
              failure.errors().clone(),
            ))
          }
        }
      }

      Step::Branch(branch) => {
        let selected = branch.select(action).map_err(|source| {
          event!(Level::ERROR, error = %source, "Branch discriminant failed.");
          SteplineError::StepFault {
            action: self.definition.name.clone(),
            step: branch.name.clone(),
            source,
          }
        })?;
        match selected {
          Some(steps) => self.walk(phase, steps, action),
          None => Ok(StepControl::Continue),
        }
      }
    }
  }
}
