//! Guarded transitions and their eligibility check.

use super::callbacks::Callbacks;
use crate::core::{Context, Guard, State};

/// A move from any of a set of source states to a single target state.
///
/// The transition is eligible when the machine's current state is one of
/// `from` and every guard passes, evaluated in order.
pub struct Transition<S: State, P> {
    pub from: Vec<S>,
    pub to: S,
    pub guards: Vec<Guard<S, P>>,
    pub callbacks: Callbacks<S, P>,
}

impl<S: State, P> Transition<S, P> {
    /// Unguarded transition without callbacks.
    pub fn new(from: impl IntoIterator<Item = S>, to: S) -> Self {
        Self {
            from: from.into_iter().collect(),
            to,
            guards: Vec::new(),
            callbacks: Callbacks::new(),
        }
    }

    /// Check whether the transition may run from the given context.
    ///
    /// Fails fast on the source-state check, then short-circuits on the
    /// first guard returning `false`; later guards are never evaluated.
    pub fn is_eligible(&self, ctx: &Context<S, P>) -> bool {
        if !self.leaves(ctx.state()) {
            return false;
        }

        match self.guards.iter().find(|guard| !guard.check(ctx)) {
            Some(guard) => {
                tracing::trace!(
                    from = ctx.state().name(),
                    to = self.to.name(),
                    guard = guard.name().unwrap_or("<anonymous>"),
                    "guard rejected transition"
                );
                false
            }
            None => true,
        }
    }

    /// Whether `state` is one of the source states.
    pub fn leaves(&self, state: &S) -> bool {
        self.from.contains(state)
    }
}

impl<S: State, P> Clone for Transition<S, P> {
    fn clone(&self) -> Self {
        Self {
            from: self.from.clone(),
            to: self.to.clone(),
            guards: self.guards.clone(),
            callbacks: self.callbacks.clone(),
        }
    }
}

impl<S: State, P> std::fmt::Debug for Transition<S, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transition")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("guards", &self.guards)
            .finish()
    }
}
