//! Wrapping transitions in caller-managed transactions.
//!
//! The engine never talks to storage. When the side effects of a
//! transition's callbacks must be undone together with the state change,
//! register a [`transactional`] around hook: it opens a transaction before
//! any callback runs and closes it once the whole transition is known to
//! have succeeded or failed.

use crate::core::{Context, State};
use crate::description::{AroundHook, CallbackError};
use std::panic::{self, AssertUnwindSafe};

/// An open unit of work that can be committed or rolled back.
pub trait Transaction {
    fn commit(self) -> Result<(), CallbackError>;

    fn rollback(self) -> Result<(), CallbackError>;
}

/// Build an around hook that runs the rest of the transition inside a
/// transaction started by `begin`.
///
/// - success: the transaction is committed; a failing commit fails the
///   transition, which rolls the state back
/// - failure: the transaction is rolled back and the original error is
///   returned
/// - panic: the transaction is rolled back and the panic resumes
///
/// Registered last, the hook is the outermost layer and so encloses every
/// other around hook as well as all before/after callbacks.
///
/// # Example
///
/// ```rust
/// use std::sync::{Arc, Mutex};
/// use transitioner::description::CallbackError;
/// use transitioner::transaction::{transactional, Transaction};
///
/// struct Tx(Arc<Mutex<Vec<&'static str>>>);
///
/// impl Transaction for Tx {
///     fn commit(self) -> Result<(), CallbackError> {
///         self.0.lock().unwrap().push("commit");
///         Ok(())
///     }
///
///     fn rollback(self) -> Result<(), CallbackError> {
///         self.0.lock().unwrap().push("rollback");
///         Ok(())
///     }
/// }
///
/// let log = Arc::new(Mutex::new(Vec::new()));
/// let shared = Arc::clone(&log);
/// let hook = transactional::<String, (), _, _>(move |_| Ok(Tx(Arc::clone(&shared))));
/// assert_eq!(hook.name(), Some("transaction"));
/// ```
pub fn transactional<S, P, T, B>(begin: B) -> AroundHook<S, P>
where
    S: State,
    T: Transaction,
    B: Fn(&mut Context<S, P>) -> Result<T, CallbackError> + Send + Sync + 'static,
{
    AroundHook::named("transaction", move |ctx, next| {
        let tx = begin(ctx)?;

        match panic::catch_unwind(AssertUnwindSafe(|| next.run(ctx))) {
            Ok(Ok(())) => tx.commit(),
            Ok(Err(err)) => {
                if let Err(rollback) = tx.rollback() {
                    tracing::warn!(error = %rollback, "transaction rollback failed");
                }
                Err(err.into())
            }
            Err(fault) => {
                if let Err(rollback) = tx.rollback() {
                    tracing::warn!(error = %rollback, "transaction rollback failed after panic");
                }
                panic::resume_unwind(fault)
            }
        }
    })
}
