pub mod action;
pub mod control;
pub mod fields;
pub mod outcome;
pub mod step;

// Re-export key types for easier access from other modules (and lib.rs)
pub use action::Action;
pub use control::StepControl;
pub use fields::{Errors, Fields, Options, Value};
pub use outcome::{Failure, Outcome, Success};
pub use step::{Discriminant, Operation, Step};
