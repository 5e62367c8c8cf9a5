// stepline/src/branch/mod.rs

//! Branch steps: evaluate a discriminant against the action and run exactly one arm.
//!
//! Branches are registered through `ActionDefinition::branch`, which returns a
//! `BranchBuilder` for declaring the arms:
//!
//! ```
//! use stepline::{ActionDefinition, StepControl};
//!
//! let mut payment = ActionDefinition::new("payment");
//! payment
//!   .operation("charge_card", |action, _| {
//!     action.set("charged", true);
//!     Ok(StepControl::Continue)
//!   })
//!   .operation("send_invoice", |action, _| {
//!     action.set("invoiced", true);
//!     Ok(StepControl::Continue)
//!   });
//! payment
//!   .branch("route_payment", |action| action.value::<String>("method"))
//!   .when("card", "charge_card")
//!   .when("invoice", "send_invoice")
//!   .finalize();
//!
//! let outcome = payment.run([("method", "card")]).unwrap();
//! assert!(outcome.is_success());
//! assert_eq!(outcome.fixtures()["charged"], true);
//! ```

pub mod builder;
pub mod scope;

pub use builder::BranchBuilder;
pub use scope::Branch;
