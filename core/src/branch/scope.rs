// stepline/src/branch/scope.rs

//! Defines `Branch`, the data behind a branch step.

use crate::core::action::Action;
use crate::core::step::{Discriminant, Step};
use indexmap::IndexMap;
use tracing::{event, Level};

/// A discriminant plus the arms it selects between.
///
/// Each arm is an ordered, duplicate-free list of steps. When the discriminant yields a
/// key with no arm, the fallback arm runs; an empty fallback makes the branch a no-op.
#[derive(Clone)]
pub struct Branch {
  pub(crate) name: String,
  pub(crate) discriminant: Discriminant,
  pub(crate) arms: IndexMap<String, Vec<Step>>,
  pub(crate) fallback: Vec<Step>,
}

impl Branch {
  pub(crate) fn new(name: String, discriminant: Discriminant) -> Self {
    Self {
      name,
      discriminant,
      arms: IndexMap::new(),
      fallback: Vec::new(),
    }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  /// Declared keys, in declaration order.
  pub fn keys(&self) -> impl Iterator<Item = &str> {
    self.arms.keys().map(String::as_str)
  }

  pub fn arm(&self, key: &str) -> Option<&[Step]> {
    self.arms.get(key).map(Vec::as_slice)
  }

  pub fn fallback(&self) -> &[Step] {
    &self.fallback
  }

  /// Every step reachable from this branch, fallback last.
  pub(crate) fn all_steps(&self) -> impl Iterator<Item = &Step> {
    self.arms.values().flatten().chain(self.fallback.iter())
  }

  /// Evaluates the discriminant once and returns the steps to run, if any.
  pub(crate) fn select(&self, action: &Action) -> anyhow::Result<Option<&[Step]>> {
    let key = (self.discriminant)(action)?;
    if let Some(steps) = self.arms.get(&key) {
      event!(Level::DEBUG, branch = %self.name, %key, "Branch arm matched.");
      return Ok(Some(steps.as_slice()));
    }
    if self.fallback.is_empty() {
      event!(Level::DEBUG, branch = %self.name, %key, "No branch arm matched and no fallback; skipping.");
      Ok(None)
    } else {
      event!(Level::DEBUG, branch = %self.name, %key, "No branch arm matched; running fallback.");
      Ok(Some(self.fallback.as_slice()))
    }
  }
}

impl std::fmt::Debug for Branch {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Branch")
      .field("name", &self.name)
      .field("arms", &self.arms)
      .field("fallback", &self.fallback)
      .finish()
  }
}
