//! Builder for constructing transitions.

use crate::builder::error::BuildError;
use crate::core::{Context, Guard, State};
use crate::description::{AroundHook, Callback, Callbacks, Transition};

/// Builder for constructing transitions with a fluent API.
///
/// # Example
///
/// ```rust
/// use transitioner::builder::TransitionBuilder;
/// use transitioner::description::Callback;
///
/// struct Job {
///     can_stop: bool,
/// }
///
/// let stop = TransitionBuilder::<String, Job>::new()
///     .from("running".to_string())
///     .to("sleeping".to_string())
///     .when(|ctx| ctx.payload().can_stop)
///     .after(Callback::named("notify", |_| Ok(())))
///     .build()
///     .unwrap();
///
/// assert_eq!(stop.from, vec!["running".to_string()]);
/// assert_eq!(stop.guards.len(), 1);
/// ```
pub struct TransitionBuilder<S: State, P> {
    from: Vec<S>,
    to: Option<S>,
    guards: Vec<Guard<S, P>>,
    callbacks: Callbacks<S, P>,
}

impl<S: State, P> TransitionBuilder<S, P> {
    pub fn new() -> Self {
        Self {
            from: Vec::new(),
            to: None,
            guards: Vec::new(),
            callbacks: Callbacks::new(),
        }
    }

    /// Add a source state. May be called repeatedly.
    pub fn from(mut self, state: S) -> Self {
        self.from.push(state);
        self
    }

    /// Add several source states at once.
    pub fn from_any(mut self, states: impl IntoIterator<Item = S>) -> Self {
        self.from.extend(states);
        self
    }

    /// Set the target state (required).
    pub fn to(mut self, state: S) -> Self {
        self.to = Some(state);
        self
    }

    /// Append a guard; guards are evaluated in the order added.
    pub fn guard(mut self, guard: Guard<S, P>) -> Self {
        self.guards.push(guard);
        self
    }

    /// Append a guard built from a closure.
    pub fn when<F>(self, predicate: F) -> Self
    where
        F: Fn(&Context<S, P>) -> bool + Send + Sync + 'static,
    {
        self.guard(Guard::new(predicate))
    }

    /// Replace all transition callbacks at once.
    pub fn callbacks(mut self, callbacks: Callbacks<S, P>) -> Self {
        self.callbacks = callbacks;
        self
    }

    pub fn early_before(mut self, callback: Callback<S, P>) -> Self {
        self.callbacks = self.callbacks.early_before(callback);
        self
    }

    pub fn before(mut self, callback: Callback<S, P>) -> Self {
        self.callbacks = self.callbacks.before(callback);
        self
    }

    pub fn late_before(mut self, callback: Callback<S, P>) -> Self {
        self.callbacks = self.callbacks.late_before(callback);
        self
    }

    pub fn early_after(mut self, callback: Callback<S, P>) -> Self {
        self.callbacks = self.callbacks.early_after(callback);
        self
    }

    pub fn after(mut self, callback: Callback<S, P>) -> Self {
        self.callbacks = self.callbacks.after(callback);
        self
    }

    pub fn late_after(mut self, callback: Callback<S, P>) -> Self {
        self.callbacks = self.callbacks.late_after(callback);
        self
    }

    pub fn around(mut self, hook: AroundHook<S, P>) -> Self {
        self.callbacks = self.callbacks.around(hook);
        self
    }

    /// Build the transition.
    pub fn build(self) -> Result<Transition<S, P>, BuildError> {
        if self.from.is_empty() {
            return Err(BuildError::MissingFromState);
        }
        let to = self.to.ok_or(BuildError::MissingToState)?;

        Ok(Transition {
            from: self.from,
            to,
            guards: self.guards,
            callbacks: self.callbacks,
        })
    }
}

impl<S: State, P> Default for TransitionBuilder<S, P> {
    fn default() -> Self {
        Self::new()
    }
}
