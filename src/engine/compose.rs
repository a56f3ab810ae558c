//! Callback composition: tiered before/after layers and the around stack.

use super::error::FsmError;
use crate::core::{Context, State};
use crate::description::{AroundHook, Callback, CallbackError, Callbacks, Phase};

/// Identity of the transition being applied, used to build errors.
pub(crate) struct Attempt<'a> {
    pub(crate) event: &'a str,
    pub(crate) from: String,
    pub(crate) to: String,
}

impl<'a> Attempt<'a> {
    pub(crate) fn new<S: State>(event: &'a str, from: &S, to: &S) -> Self {
        Self {
            event,
            from: from.name().to_string(),
            to: to.name().to_string(),
        }
    }

    fn failure(&self, phase: Phase, callback: Option<&str>, source: CallbackError) -> FsmError {
        FsmError::CallbackFailed {
            event: self.event.to_string(),
            from: self.from.clone(),
            to: self.to.clone(),
            phase,
            callback: callback.map(str::to_string),
            source,
        }
    }
}

pub(crate) type Layer<'a, S, P> = (Phase, &'a [Callback<S, P>]);

/// Before tiers in execution order: global then transition, per tier.
pub(crate) fn before_layers<'a, S: State, P>(
    global: &'a Callbacks<S, P>,
    local: &'a Callbacks<S, P>,
) -> [Layer<'a, S, P>; 6] {
    [
        (Phase::EarlyBefore, global.early_before.as_slice()),
        (Phase::EarlyBefore, local.early_before.as_slice()),
        (Phase::Before, global.before.as_slice()),
        (Phase::Before, local.before.as_slice()),
        (Phase::LateBefore, global.late_before.as_slice()),
        (Phase::LateBefore, local.late_before.as_slice()),
    ]
}

/// After tiers in execution order: transition then global, per tier.
pub(crate) fn after_layers<'a, S: State, P>(
    global: &'a Callbacks<S, P>,
    local: &'a Callbacks<S, P>,
) -> [Layer<'a, S, P>; 6] {
    [
        (Phase::EarlyAfter, local.early_after.as_slice()),
        (Phase::EarlyAfter, global.early_after.as_slice()),
        (Phase::After, local.after.as_slice()),
        (Phase::After, global.after.as_slice()),
        (Phase::LateAfter, local.late_after.as_slice()),
        (Phase::LateAfter, global.late_after.as_slice()),
    ]
}

/// Run layers in order, stopping at the first failing callback.
pub(crate) fn run_layers<S: State, P>(
    layers: &[Layer<'_, S, P>],
    ctx: &mut Context<S, P>,
    attempt: &Attempt<'_>,
) -> Result<(), FsmError> {
    for (phase, callbacks) in layers {
        for callback in callbacks.iter() {
            callback
                .call(ctx)
                .map_err(|source| attempt.failure(*phase, callback.name(), source))?;
        }
    }
    Ok(())
}

/// Innermost action of a transition, with a way to undo it.
pub(crate) trait Terminal<S: State, P> {
    /// Run before tiers, mutate the state, run after tiers.
    fn apply(&mut self, ctx: &mut Context<S, P>) -> Result<(), FsmError>;

    /// Put the pre-transition state back. Must be idempotent.
    fn rollback(&mut self, ctx: &mut Context<S, P>);
}

/// The rest of a transition, as seen by an around hook.
///
/// Running it invokes every inner around hook and finally the
/// before + mutate + after sequence. `run` consumes the continuation,
/// so each hook can enter the inner stack at most once.
pub struct Next<'a, S: State, P> {
    hooks: &'a [AroundHook<S, P>],
    terminal: &'a mut dyn Terminal<S, P>,
    attempt: &'a Attempt<'a>,
}

impl<'a, S: State, P> Next<'a, S, P> {
    pub(crate) fn new(
        hooks: &'a [AroundHook<S, P>],
        terminal: &'a mut dyn Terminal<S, P>,
        attempt: &'a Attempt<'a>,
    ) -> Self {
        Self {
            hooks,
            terminal,
            attempt,
        }
    }

    /// Number of around hooks still wrapped inside this continuation.
    pub fn depth(&self) -> usize {
        self.hooks.len()
    }

    /// Run the rest of the transition.
    ///
    /// The last registered hook is the outermost one, so hooks are
    /// entered from the end of the list towards its start. A hook that
    /// fails rolls the state back before its error reaches the next
    /// layer out, so outer hooks never observe a half-applied transition.
    pub fn run(self, ctx: &mut Context<S, P>) -> Result<(), FsmError> {
        let Next {
            hooks,
            terminal,
            attempt,
        } = self;

        let Some((hook, inner)) = hooks.split_last() else {
            return terminal.apply(ctx);
        };

        let next = Next {
            hooks: inner,
            terminal: &mut *terminal,
            attempt,
        };
        match hook.call(ctx, next) {
            Ok(()) => Ok(()),
            Err(err) => {
                terminal.rollback(ctx);
                Err(lift(err, hook, attempt))
            }
        }
    }
}

/// Recover an engine error propagated through a hook, or wrap the hook's
/// own error as an around-phase callback failure.
fn lift<S: State, P>(err: CallbackError, hook: &AroundHook<S, P>, attempt: &Attempt<'_>) -> FsmError {
    match err.downcast::<FsmError>() {
        Ok(inner) => *inner,
        Err(own) => attempt.failure(Phase::Around, hook.name(), own),
    }
}
