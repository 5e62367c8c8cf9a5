// src/lib.rs

//! Stepline: a synchronous, declarative action pipeline engine for Rust.
//!
//! An action is described once as an `ActionDefinition` and run many times. A run
//! walks an ordered list of steps against a fresh `Action` instance and always ends in
//! exactly one `Outcome`:
//!  - Invocation steps call a named operation of the definition.
//!  - Sub-action steps run another definition and fail the enclosing action if it fails.
//!  - Branch steps evaluate a discriminant and run exactly one arm.
//!  - The first outcome set wins and stops the main list; no outcome means success.
//!  - Success, failure and always hooks run after the main list for side effects.
//!  - A run can be wrapped in a transactional resource.
//!  - A name-keyed registry resolves and runs definitions.

pub mod branch;
pub mod core;
pub mod error;
pub mod pipeline;
pub mod registry;

// --- Re-exports for the Public API ---

pub use crate::core::action::Action;
pub use crate::core::control::StepControl;
pub use crate::core::fields::{fields, Errors, Fields, Options, Value};
pub use crate::core::outcome::{Failure, Outcome, Success, DEFAULT_SUCCESS_CODE, DEFAULT_SUCCESS_MESSAGE};
pub use crate::core::step::{Discriminant, Operation, Step};

pub use crate::branch::{Branch, BranchBuilder};
pub use crate::pipeline::{ActionDefinition, Hook, TransactionProvider};

pub use crate::error::{SteplineError, SteplineResult};

// The registry for resolving and running definitions by name
pub use crate::registry::ActionRegistry;

/*
    Core workflow:
    1. Create an `ActionDefinition` and register its operations with `.operation()`.
    2. Register main steps with `.step()`: an operation name, an `Arc<ActionDefinition>`
       for a nested action, or a branch built with `.branch(..).when(..).finalize()`.
    3. Register hooks with `.on_success()`, `.on_failure()` and `.always()`.
    4. Optionally attach a `TransactionProvider` with `.set_transaction()`.
    5. Call `.run(args)`; inspect the returned `Outcome`.
*/
