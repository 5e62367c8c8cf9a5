// stepline/src/pipeline/transaction.rs

//! Defines the `TransactionProvider` seam used to wrap a whole run in a unit of work.

/// A transactional resource an action definition can run inside.
///
/// `transaction` must call `body` exactly once, commit when it returns `Ok` and roll
/// back when it returns `Err`, handing that error back to the caller. Commit or
/// rollback happens on every exit path. A business failure (`Action::fail`) is a
/// normal return of `body` and therefore commits.
pub trait TransactionProvider: Send + Sync {
  fn transaction(&self, body: &mut dyn FnMut() -> anyhow::Result<()>) -> anyhow::Result<()>;

  /// Name used in logs.
  fn name(&self) -> &str {
    std::any::type_name::<Self>()
  }
}
