// stepline/src/core/control.rs

//! Defines the signal an operation returns to steer the step walk.

/// Signal from an operation indicating whether the enclosing step list should continue.
///
/// `Action::succeed` and `Action::fail` return `Halt`, so an operation can end with
/// `return Ok(action.fail("invalid", "bad input"));`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StepControl {
  /// Continue with the next step of the current list.
  #[default]
  Continue,
  /// Stop walking the current list (and every list enclosing it).
  Halt,
}

impl StepControl {
  pub fn is_halt(self) -> bool {
    matches!(self, StepControl::Halt)
  }
}
