// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};
use stepline::{Action, ActionDefinition, Options, StepControl, TransactionProvider};
use tracing::Level;

// --- Helper for Tracing Setup (call once per test run if needed) ---
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Atomic counters for checking execution counts ---
pub static OPERATION_EXEC_COUNTER: Lazy<Arc<AtomicUsize>> = Lazy::new(|| Arc::new(AtomicUsize::new(0)));
pub static HOOK_EXEC_COUNTER: Lazy<Arc<AtomicUsize>> = Lazy::new(|| Arc::new(AtomicUsize::new(0)));

pub fn reset_counters() {
  OPERATION_EXEC_COUNTER.store(0, Ordering::SeqCst);
  HOOK_EXEC_COUNTER.store(0, Ordering::SeqCst);
}

// --- Common error type for faulting operations ---
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum TestError {
  #[error("Test operation failed: {0}")]
  Operation(String),

  #[error("Test store unavailable")]
  StoreUnavailable,
}

// --- Shared execution log ---

/// Records which operations ran, in order, across nested actions.
#[derive(Clone, Default)]
pub struct ExecLog(Arc<Mutex<Vec<String>>>);

impl ExecLog {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn push(&self, entry: impl Into<String>) {
    self.0.lock().push(entry.into());
  }

  pub fn entries(&self) -> Vec<String> {
    self.0.lock().clone()
  }
}

// --- Common operation creators ---

/// Registers an operation that records its name and continues.
pub fn add_marker(definition: &mut ActionDefinition, name: &'static str, log: &ExecLog) {
  let log = log.clone();
  definition.operation(name, move |_action: &mut Action, _opts: &Options| {
    log.push(name);
    OPERATION_EXEC_COUNTER.fetch_add(1, Ordering::SeqCst);
    Ok(StepControl::Continue)
  });
}

/// Registers an operation that records its name and sets `field` to `value`.
pub fn add_setter(
  definition: &mut ActionDefinition,
  name: &'static str,
  field: &'static str,
  value: i64,
  log: &ExecLog,
) {
  let log = log.clone();
  definition.operation(name, move |action: &mut Action, _opts: &Options| {
    log.push(name);
    action.set(field, value);
    Ok(StepControl::Continue)
  });
}

/// Registers an operation that records its name and fails the action with `code`.
pub fn add_failer(
  definition: &mut ActionDefinition,
  name: &'static str,
  code: &'static str,
  message: &'static str,
  log: &ExecLog,
) {
  let log = log.clone();
  definition.operation(name, move |action: &mut Action, _opts: &Options| {
    log.push(name);
    Ok(action.fail(code, message))
  });
}

/// Registers an operation that records its name and returns an error.
pub fn add_faulty(definition: &mut ActionDefinition, name: &'static str, message: &'static str, log: &ExecLog) {
  let log = log.clone();
  definition.operation(name, move |_action: &mut Action, _opts: &Options| {
    log.push(name);
    Err(TestError::Operation(message.to_string()).into())
  });
}

// --- Fake transactional resource ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxEvent {
  Begin,
  Commit,
  Rollback,
}

/// Records begin/commit/rollback calls. Can be told to fail on commit.
#[derive(Default)]
pub struct RecordingTransaction {
  events: Mutex<Vec<TxEvent>>,
  fail_commit: bool,
}

impl RecordingTransaction {
  pub fn new() -> Arc<Self> {
    Arc::new(Self::default())
  }

  pub fn failing_commit() -> Arc<Self> {
    Arc::new(Self {
      events: Mutex::new(Vec::new()),
      fail_commit: true,
    })
  }

  pub fn events(&self) -> Vec<TxEvent> {
    self.events.lock().clone()
  }
}

impl TransactionProvider for RecordingTransaction {
  fn transaction(&self, body: &mut dyn FnMut() -> anyhow::Result<()>) -> anyhow::Result<()> {
    self.events.lock().push(TxEvent::Begin);
    match body() {
      Ok(()) if self.fail_commit => {
        self.events.lock().push(TxEvent::Rollback);
        Err(TestError::StoreUnavailable.into())
      }
      Ok(()) => {
        self.events.lock().push(TxEvent::Commit);
        Ok(())
      }
      Err(err) => {
        self.events.lock().push(TxEvent::Rollback);
        Err(err)
      }
    }
  }

  fn name(&self) -> &str {
    "recording"
  }
}
