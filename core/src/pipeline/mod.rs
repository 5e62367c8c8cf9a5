// stepline/src/pipeline/mod.rs

//! Defines `ActionDefinition`: its registration DSL, hook lists, transactional
//! resource and the runner that executes it.

pub mod definition;
pub mod execution;
pub mod hooks;
pub mod transaction;

// Re-export the main definition struct
pub use definition::ActionDefinition;
pub use hooks::Hook;
pub use transaction::TransactionProvider;
