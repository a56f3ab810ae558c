//! Guard predicates for controlling transition eligibility.
//!
//! Guards are boolean predicates over the machine [`Context`]. They may
//! inspect the current state, the event being fired and the payload,
//! but they cannot change anything: they only ever see `&Context`.

use super::context::Context;
use super::state::State;
use std::fmt;
use std::sync::Arc;

type Predicate<S, P> = Arc<dyn Fn(&Context<S, P>) -> bool + Send + Sync>;

/// Pure predicate that decides whether a transition may run.
///
/// A guard that needs to report *why* it refused should be written as a
/// before-callback returning an error instead; guards are infallible.
///
/// # Example
///
/// ```rust
/// use transitioner::core::Guard;
///
/// struct Job {
///     can_stop: bool,
/// }
///
/// let guard: Guard<String, Job> = Guard::new(|ctx: &transitioner::Context<String, Job>| ctx.payload().can_stop);
/// assert!(guard.name().is_none());
///
/// let named: Guard<String, Job> = Guard::named("can_stop", |ctx: &transitioner::Context<String, Job>| ctx.payload().can_stop);
/// assert_eq!(named.name(), Some("can_stop"));
/// ```
pub struct Guard<S: State, P> {
    name: Option<String>,
    predicate: Predicate<S, P>,
}

impl<S: State, P> Guard<S, P> {
    /// Create a guard from a predicate.
    ///
    /// The predicate must be deterministic and free of side effects on
    /// the machine; it is shared read-only between machines (Send + Sync).
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&Context<S, P>) -> bool + Send + Sync + 'static,
    {
        Guard {
            name: None,
            predicate: Arc::new(predicate),
        }
    }

    /// Create a guard carrying an identifier used in diagnostics.
    pub fn named<F>(name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Context<S, P>) -> bool + Send + Sync + 'static,
    {
        Guard {
            name: Some(name.into()),
            predicate: Arc::new(predicate),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Evaluate the guard against the given context.
    pub fn check(&self, ctx: &Context<S, P>) -> bool {
        (self.predicate)(ctx)
    }
}

impl<S: State, P> Clone for Guard<S, P> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<S: State, P> fmt::Debug for Guard<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard").field("name", &self.name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Job {
        another_field: String,
    }

    fn context(field: &str) -> Context<String, Job> {
        Context::new(
            "initialized".to_string(),
            Job {
                another_field: field.to_string(),
            },
        )
    }

    #[test]
    fn guard_inspects_payload() {
        let guard = Guard::new(|ctx: &Context<String, Job>| {
            ctx.payload().another_field == "pass guard"
        });

        assert!(guard.check(&context("pass guard")));
        assert!(!guard.check(&context("something else")));
    }

    #[test]
    fn guard_inspects_state() {
        let guard = Guard::new(|ctx: &Context<String, Job>| ctx.state() == "initialized");
        assert!(guard.check(&context("")));
    }

    #[test]
    fn guard_is_deterministic() {
        let ctx = context("pass guard");
        let guard = Guard::new(|ctx: &Context<String, Job>| !ctx.payload().another_field.is_empty());

        assert_eq!(guard.check(&ctx), guard.check(&ctx));
    }

    #[test]
    fn cloned_guard_shares_predicate() {
        let guard: Guard<String, Job> = Guard::named("always", |_| true);
        let cloned = guard.clone();

        assert_eq!(cloned.name(), Some("always"));
        assert!(cloned.check(&context("")));
    }
}
