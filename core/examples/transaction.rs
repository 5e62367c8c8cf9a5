// stepline/examples/transaction.rs

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::json;
use stepline::{Action, ActionDefinition, Options, SteplineError, StepControl, TransactionProvider};
use tracing::info;

/// An in-memory balance table that snapshots itself for the duration of a transaction.
#[derive(Default)]
struct Ledger {
  balances: Mutex<HashMap<String, i64>>,
}

impl Ledger {
  fn balance(&self, account: &str) -> i64 {
    self.balances.lock().get(account).copied().unwrap_or(0)
  }

  fn adjust(&self, account: &str, delta: i64) {
    *self.balances.lock().entry(account.to_string()).or_insert(0) += delta;
  }
}

impl TransactionProvider for Ledger {
  fn transaction(&self, body: &mut dyn FnMut() -> anyhow::Result<()>) -> anyhow::Result<()> {
    let snapshot = self.balances.lock().clone();
    let result = body();
    if result.is_err() {
      info!("Rolling back ledger.");
      *self.balances.lock() = snapshot;
    }
    result
  }

  fn name(&self) -> &str {
    "ledger"
  }
}

fn transfer_action(ledger: &Arc<Ledger>) -> ActionDefinition {
  let mut definition = ActionDefinition::new("transfer");
  definition.set_transaction(ledger.clone());

  let debit_ledger = ledger.clone();
  definition.operation("debit", move |action: &mut Action, _: &Options| {
    let from = action.value::<String>("from")?;
    debit_ledger.adjust(&from, -action.value::<i64>("amount")?);
    Ok(StepControl::Continue)
  });

  let credit_ledger = ledger.clone();
  definition.operation("credit", move |action: &mut Action, _: &Options| {
    let to = action.value::<String>("to")?;
    if to == "closed_account" {
      anyhow::bail!("account '{}' is closed", to);
    }
    credit_ledger.adjust(&to, action.value::<i64>("amount")?);
    Ok(StepControl::Continue)
  });

  definition.step("debit").step("credit");
  definition
}

fn main() -> Result<(), SteplineError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();
  info!("--- Transaction Example ---");

  let ledger = Arc::new(Ledger::default());
  ledger.adjust("alice", 100);

  let transfer = transfer_action(&ledger);

  let outcome = transfer.run_then(
    [("from", json!("alice")), ("to", json!("bob")), ("amount", json!(30))],
    |outcome| info!("Transfer committed: {}", outcome.code()),
  )?;
  assert!(outcome.is_success());
  info!("alice={} bob={}", ledger.balance("alice"), ledger.balance("bob"));

  // The credit step faults after the debit ran; the debit is rolled back.
  let fault = transfer.run([("from", json!("alice")), ("to", json!("closed_account")), ("amount", json!(50))]);
  info!("Faulted transfer: {:?}", fault.as_ref().err().map(ToString::to_string));
  assert!(fault.is_err());
  assert_eq!(ledger.balance("alice"), 70);

  // Derived definitions share the same transactional resource.
  let audited = transfer.derive("audited_transfer");
  assert!(audited.transaction().is_some());

  Ok(())
}
