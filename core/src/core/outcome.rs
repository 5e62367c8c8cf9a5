// stepline/src/core/outcome.rs

//! The terminal outcome of one action run.

use crate::core::fields::{Errors, Fields};
use serde::Serialize;

/// Message used when an action succeeds without saying anything more specific.
pub const DEFAULT_SUCCESS_MESSAGE: &str = "Completed successfully.";

/// Code used when an action succeeds without an explicit code.
pub const DEFAULT_SUCCESS_CODE: &str = "success";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Success {
  code: String,
  message: String,
  errors: Errors,
  fixtures: Fields,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Failure {
  code: String,
  message: Option<String>,
  errors: Errors,
  fixtures: Fields,
}

/// Outcome of a full action run: exactly one of success or failure.
///
/// Outcomes are values. Once built they are never mutated; the `fixtures` they carry
/// are the snapshot taken at the moment the outcome was created.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
  Success(Success),
  Failure(Failure),
}

impl Outcome {
  pub fn success(code: impl Into<String>, message: impl Into<String>, errors: Errors, fixtures: Fields) -> Self {
    Outcome::Success(Success {
      code: code.into(),
      message: message.into(),
      errors,
      fixtures,
    })
  }

  pub fn failure(code: impl Into<String>, message: Option<String>, errors: Errors, fixtures: Fields) -> Self {
    Outcome::Failure(Failure {
      code: code.into(),
      message,
      errors,
      fixtures,
    })
  }

  pub fn is_success(&self) -> bool {
    matches!(self, Outcome::Success(_))
  }

  pub fn is_failure(&self) -> bool {
    matches!(self, Outcome::Failure(_))
  }

  pub fn code(&self) -> &str {
    match self {
      Outcome::Success(s) => &s.code,
      Outcome::Failure(f) => &f.code,
    }
  }

  /// Human readable message. Always present on success.
  pub fn message(&self) -> Option<&str> {
    match self {
      Outcome::Success(s) => Some(&s.message),
      Outcome::Failure(f) => f.message.as_deref(),
    }
  }

  pub fn errors(&self) -> &Errors {
    match self {
      Outcome::Success(s) => &s.errors,
      Outcome::Failure(f) => &f.errors,
    }
  }

  pub fn fixtures(&self) -> &Fields {
    match self {
      Outcome::Success(s) => &s.fixtures,
      Outcome::Failure(f) => &f.fixtures,
    }
  }

  pub fn as_success(&self) -> Option<&Success> {
    match self {
      Outcome::Success(s) => Some(s),
      Outcome::Failure(_) => None,
    }
  }

  pub fn as_failure(&self) -> Option<&Failure> {
    match self {
      Outcome::Success(_) => None,
      Outcome::Failure(f) => Some(f),
    }
  }
}

impl Success {
  pub fn code(&self) -> &str {
    &self.code
  }

  pub fn message(&self) -> &str {
    &self.message
  }

  pub fn errors(&self) -> &Errors {
    &self.errors
  }

  pub fn fixtures(&self) -> &Fields {
    &self.fixtures
  }
}

impl Failure {
  pub fn code(&self) -> &str {
    &self.code
  }

  pub fn message(&self) -> Option<&str> {
    self.message.as_deref()
  }

  pub fn errors(&self) -> &Errors {
    &self.errors
  }

  pub fn fixtures(&self) -> &Fields {
    &self.fixtures
  }
}
