//! Callback slots attached to descriptions and transitions.

use crate::core::{Context, State};
use crate::engine::Next;
use std::fmt;
use std::sync::Arc;

/// Error type returned by caller-supplied callbacks.
pub type CallbackError = Box<dyn std::error::Error + Send + Sync + 'static>;

type ActionFn<S, P> = Arc<dyn Fn(&mut Context<S, P>) -> Result<(), CallbackError> + Send + Sync>;

type AroundFn<S, P> = Arc<
    dyn for<'n> Fn(&mut Context<S, P>, Next<'n, S, P>) -> Result<(), CallbackError> + Send + Sync,
>;

/// Execution layer a callback belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    EarlyBefore,
    Before,
    LateBefore,
    EarlyAfter,
    After,
    LateAfter,
    Around,
}

impl Phase {
    /// Whether callbacks of this phase run after the state has changed.
    pub fn is_after(self) -> bool {
        matches!(self, Self::EarlyAfter | Self::After | Self::LateAfter)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::EarlyBefore => "early-before",
            Self::Before => "before",
            Self::LateBefore => "late-before",
            Self::EarlyAfter => "early-after",
            Self::After => "after",
            Self::LateAfter => "late-after",
            Self::Around => "around",
        };
        f.write_str(label)
    }
}

/// Fallible action run immediately before or after the state mutation.
///
/// # Example
///
/// ```rust
/// use transitioner::description::Callback;
///
/// let notify: Callback<String, Vec<String>> = Callback::named("notify", |ctx: &mut transitioner::Context<String, Vec<String>>| {
///     let message = format!("now {}", ctx.state());
///     ctx.payload_mut().push(message);
///     Ok(())
/// });
/// assert_eq!(notify.name(), Some("notify"));
/// ```
pub struct Callback<S: State, P> {
    name: Option<String>,
    action: ActionFn<S, P>,
}

impl<S: State, P> Callback<S, P> {
    pub fn new<F>(action: F) -> Self
    where
        F: Fn(&mut Context<S, P>) -> Result<(), CallbackError> + Send + Sync + 'static,
    {
        Self {
            name: None,
            action: Arc::new(action),
        }
    }

    /// Create a callback whose name is reported when it fails.
    pub fn named<F>(name: impl Into<String>, action: F) -> Self
    where
        F: Fn(&mut Context<S, P>) -> Result<(), CallbackError> + Send + Sync + 'static,
    {
        Self {
            name: Some(name.into()),
            action: Arc::new(action),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub(crate) fn call(&self, ctx: &mut Context<S, P>) -> Result<(), CallbackError> {
        (self.action)(ctx)
    }
}

impl<S: State, P> Clone for Callback<S, P> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            action: Arc::clone(&self.action),
        }
    }
}

impl<S: State, P> fmt::Debug for Callback<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback").field("name", &self.name).finish()
    }
}

/// Middleware wrapping the whole before + mutate + after sequence.
///
/// The hook receives the continuation as a [`Next`] and must call
/// [`Next::run`] to let the transition proceed. It may instead return
/// early, or inspect the continuation's error before deciding what to
/// return. Errors coming out of `next.run` can be propagated with `?`.
///
/// # Example
///
/// ```rust
/// use transitioner::description::AroundHook;
///
/// let logged: AroundHook<String, ()> = AroundHook::named("log", |ctx, next| {
///     let result = next.run(ctx);
///     println!("transition finished: {}", result.is_ok());
///     Ok(result?)
/// });
/// assert_eq!(logged.name(), Some("log"));
/// ```
pub struct AroundHook<S: State, P> {
    name: Option<String>,
    hook: AroundFn<S, P>,
}

impl<S: State, P> AroundHook<S, P> {
    pub fn new<F>(hook: F) -> Self
    where
        F: for<'n> Fn(&mut Context<S, P>, Next<'n, S, P>) -> Result<(), CallbackError>
            + Send
            + Sync
            + 'static,
    {
        Self {
            name: None,
            hook: Arc::new(hook),
        }
    }

    pub fn named<F>(name: impl Into<String>, hook: F) -> Self
    where
        F: for<'n> Fn(&mut Context<S, P>, Next<'n, S, P>) -> Result<(), CallbackError>
            + Send
            + Sync
            + 'static,
    {
        Self {
            name: Some(name.into()),
            hook: Arc::new(hook),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub(crate) fn call(
        &self,
        ctx: &mut Context<S, P>,
        next: Next<'_, S, P>,
    ) -> Result<(), CallbackError> {
        (self.hook)(ctx, next)
    }
}

impl<S: State, P> Clone for AroundHook<S, P> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            hook: Arc::clone(&self.hook),
        }
    }
}

impl<S: State, P> fmt::Debug for AroundHook<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AroundHook")
            .field("name", &self.name)
            .finish()
    }
}

/// Callback slots of a description (global) or of a single transition.
///
/// Each slot runs in registration order. How global and transition
/// slots interleave is decided by the engine:
///
/// - before: global early, transition early, global, transition,
///   global late, transition late
/// - after: transition early, global early, transition, global,
///   transition late, global late
/// - around: global hooks then transition hooks, the last one outermost
pub struct Callbacks<S: State, P> {
    pub early_before: Vec<Callback<S, P>>,
    pub before: Vec<Callback<S, P>>,
    pub late_before: Vec<Callback<S, P>>,
    pub early_after: Vec<Callback<S, P>>,
    pub after: Vec<Callback<S, P>>,
    pub late_after: Vec<Callback<S, P>>,
    pub around: Vec<AroundHook<S, P>>,
}

impl<S: State, P> Callbacks<S, P> {
    pub fn new() -> Self {
        Self {
            early_before: Vec::new(),
            before: Vec::new(),
            late_before: Vec::new(),
            early_after: Vec::new(),
            after: Vec::new(),
            late_after: Vec::new(),
            around: Vec::new(),
        }
    }

    pub fn early_before(mut self, callback: Callback<S, P>) -> Self {
        self.early_before.push(callback);
        self
    }

    pub fn before(mut self, callback: Callback<S, P>) -> Self {
        self.before.push(callback);
        self
    }

    pub fn late_before(mut self, callback: Callback<S, P>) -> Self {
        self.late_before.push(callback);
        self
    }

    pub fn early_after(mut self, callback: Callback<S, P>) -> Self {
        self.early_after.push(callback);
        self
    }

    pub fn after(mut self, callback: Callback<S, P>) -> Self {
        self.after.push(callback);
        self
    }

    pub fn late_after(mut self, callback: Callback<S, P>) -> Self {
        self.late_after.push(callback);
        self
    }

    pub fn around(mut self, hook: AroundHook<S, P>) -> Self {
        self.around.push(hook);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.early_before.is_empty()
            && self.before.is_empty()
            && self.late_before.is_empty()
            && self.early_after.is_empty()
            && self.after.is_empty()
            && self.late_after.is_empty()
            && self.around.is_empty()
    }
}

impl<S: State, P> Default for Callbacks<S, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State, P> Clone for Callbacks<S, P> {
    fn clone(&self) -> Self {
        Self {
            early_before: self.early_before.clone(),
            before: self.before.clone(),
            late_before: self.late_before.clone(),
            early_after: self.early_after.clone(),
            after: self.after.clone(),
            late_after: self.late_after.clone(),
            around: self.around.clone(),
        }
    }
}

impl<S: State, P> fmt::Debug for Callbacks<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks")
            .field("early_before", &self.early_before.len())
            .field("before", &self.before.len())
            .field("late_before", &self.late_before.len())
            .field("early_after", &self.early_after.len())
            .field("after", &self.after.len())
            .field("late_after", &self.late_after.len())
            .field("around", &self.around.len())
            .finish()
    }
}
