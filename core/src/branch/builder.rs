// stepline/src/branch/builder.rs

//! Implements the fluent `BranchBuilder` API for declaring branch arms.

use crate::branch::scope::Branch;
use crate::core::step::Step;
use crate::pipeline::definition::push_unique;
use crate::pipeline::hooks::Hook;
use crate::pipeline::ActionDefinition;
use tracing::{event, instrument, Level};

/// Builder for one branch step of an `ActionDefinition`.
///
/// Obtained from `ActionDefinition::branch`. Nothing is registered until `finalize`
/// (or `finalize_on`) is called.
#[must_use = "a branch is only registered once `finalize` is called"]
pub struct BranchBuilder<'def> {
  definition: &'def mut ActionDefinition,
  branch: Branch,
}

impl<'def> BranchBuilder<'def> {
  pub(crate) fn new(definition: &'def mut ActionDefinition, branch: Branch) -> Self {
    Self { definition, branch }
  }

  /// Adds `step` to the arm selected by `key`.
  ///
  /// Calling `when` repeatedly with the same key appends to that arm; the steps run in
  /// registration order and an equal step is only kept once.
  pub fn when(mut self, key: impl Into<String>, step: impl Into<Step>) -> Self {
    let arm = self.branch.arms.entry(key.into()).or_default();
    push_unique(arm, step.into());
    self
  }

  /// Adds `step` to the arm run when no key matches.
  pub fn otherwise(mut self, step: impl Into<Step>) -> Self {
    push_unique(&mut self.branch.fallback, step.into());
    self
  }

  /// Registers the branch as the next main step.
  #[instrument(
    name = "BranchBuilder::finalize",
    skip_all,
    fields(branch = %self.branch.name, num_arms = self.branch.arms.len())
  )]
  pub fn finalize(self) {
    event!(Level::DEBUG, "Branch registered as main step.");
    self.definition.step(self.branch);
  }

  /// Registers the branch on a hook list instead of the main list.
  pub fn finalize_on(self, hook: Hook) {
    event!(Level::DEBUG, branch = %self.branch.name, ?hook, "Branch registered as hook step.");
    self.definition.hook(hook, self.branch);
  }
}
