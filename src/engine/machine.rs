//! Machine instances: event dispatch, transition application and rollback.

use super::binding::StateField;
use super::compose::{after_layers, before_layers, run_layers, Attempt, Next, Terminal};
use super::error::FsmError;
use crate::core::{Context, State, StateHistory, StateTransition};
use crate::description::{AroundHook, Description, Transition};
use chrono::Utc;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

type BoundField<S, P> = Box<dyn StateField<S, P> + Send>;

/// A live state holder following a [`Description`].
///
/// The machine owns its payload (the object it is attached to) and
/// optionally a binding that mirrors the current state into an external
/// field. It is driven synchronously: `fire` runs guards and callbacks to
/// completion on the calling thread.
///
/// # Example
///
/// ```rust
/// use transitioner::description::{Description, Event, Transition};
/// use transitioner::engine::Machine;
///
/// let mut description = Description::new("sleeping".to_string());
/// description.events.push(Event::new(
///     "toggle",
///     vec![
///         Transition::new(["sleeping".to_string()], "running".to_string()),
///         Transition::new(["running".to_string()], "sleeping".to_string()),
///     ],
/// ));
///
/// let mut machine: Machine<String> = Machine::new(description);
/// machine.fire("toggle").unwrap();
/// assert_eq!(machine.current_state(), "running");
/// machine.fire("toggle").unwrap();
/// assert_eq!(machine.current_state(), "sleeping");
/// ```
pub struct Machine<S: State, P = ()> {
    description: Arc<Description<S, P>>,
    context: Context<S, P>,
    binding: Option<BoundField<S, P>>,
    history: StateHistory<S>,
    history_limit: Option<usize>,
}

impl<S: State, P: Default> Machine<S, P> {
    /// Create a machine in the description's initial state with a
    /// default payload.
    pub fn new(description: impl Into<Arc<Description<S, P>>>) -> Self {
        Self::with_payload(description, P::default())
    }
}

impl<S: State, P> Machine<S, P> {
    /// Create a machine in the description's initial state.
    pub fn with_payload(description: impl Into<Arc<Description<S, P>>>, payload: P) -> Self {
        let description = description.into();
        let context = Context::new(description.initial.clone(), payload);
        Self {
            description,
            context,
            binding: None,
            history: StateHistory::new(),
            history_limit: None,
        }
    }

    pub fn current_state(&self) -> &S {
        self.context.state()
    }

    /// Event being fired, only `Some` while callbacks are running.
    pub fn current_event(&self) -> Option<&str> {
        self.context.event()
    }

    pub fn description(&self) -> &Arc<Description<S, P>> {
        &self.description
    }

    pub fn history(&self) -> &StateHistory<S> {
        &self.history
    }

    pub fn payload(&self) -> &P {
        self.context.payload()
    }

    pub fn payload_mut(&mut self) -> &mut P {
        self.context.payload_mut()
    }

    pub fn into_payload(self) -> P {
        self.context.into_payload()
    }

    pub fn is_bound(&self) -> bool {
        self.binding.is_some()
    }

    /// Keep only the `limit` most recent transitions in the history.
    ///
    /// Long-lived machines otherwise grow their history with every
    /// successful fire. A limit of zero disables recording.
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = Some(limit);
        self.history.retain_last(limit);
        self
    }

    /// Keep `field` synchronized with the current state.
    ///
    /// A non-empty field is adopted as the current state, which restores a
    /// machine from persisted state. The field is then immediately written
    /// with the current state, and rewritten after every successful
    /// transition ahead of the global early-after callbacks. Binding again
    /// replaces the previous binding.
    pub fn bind<F>(&mut self, field: F)
    where
        F: StateField<S, P> + Send + 'static,
    {
        let mut field = field;
        if let Some(state) = field.load(self.context.payload()) {
            self.context.set_state(state);
        }

        if self.binding.is_some() {
            tracing::debug!(
                state = self.context.state().name(),
                "replacing existing state binding"
            );
        }

        let (state, payload) = self.context.split();
        field.store(payload, state);
        self.binding = Some(Box::new(field));
    }

    /// Drop the binding, leaving the field at its last synchronized value.
    pub fn unbind(&mut self) {
        self.binding = None;
    }

    /// Whether `event` exists and has an eligible transition right now.
    ///
    /// Evaluates guards, so guard side effects (if any) are observable.
    pub fn can_fire(&self, event: &str) -> bool {
        self.description
            .find_event(event)
            .is_some_and(|e| e.transitions.iter().any(|t| t.is_eligible(&self.context)))
    }

    /// Names of the events that could fire from the current state.
    pub fn available_events(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for name in self.description.event_names() {
            if !names.contains(&name) && self.can_fire(name) {
                names.push(name);
            }
        }
        names
    }

    /// Fire an event.
    ///
    /// Applies the first eligible transition of the event, in declaration
    /// order. A matched transition that fails is reported as is; later
    /// transitions are not tried. On any failure the state (and the bound
    /// field) is left at its value from before the call. The current
    /// event is cleared on return, even when a guard or callback panics.
    pub fn fire(&mut self, event: &str) -> Result<(), FsmError> {
        self.context.set_event(Some(event.to_string()));
        let result = panic::catch_unwind(AssertUnwindSafe(|| self.dispatch(event)));
        self.context.set_event(None);
        result.unwrap_or_else(|fault| panic::resume_unwind(fault))
    }

    fn dispatch(&mut self, event: &str) -> Result<(), FsmError> {
        let description = Arc::clone(&self.description);

        let Some(described) = description.find_event(event) else {
            return Err(FsmError::EventNotDescribed {
                event: event.to_string(),
            });
        };

        let Some(transition) = described
            .transitions
            .iter()
            .find(|t| t.is_eligible(&self.context))
        else {
            return Err(FsmError::NoEligibleTransition {
                event: event.to_string(),
                state: self.context.state().name().to_string(),
            });
        };

        self.apply(&description, transition, event)
    }

    fn apply(
        &mut self,
        description: &Description<S, P>,
        transition: &Transition<S, P>,
        event: &str,
    ) -> Result<(), FsmError> {
        let original = self.context.state().clone();
        let attempt = Attempt::new(event, &original, &transition.to);
        let hooks: Vec<AroundHook<S, P>> = description
            .callbacks
            .around
            .iter()
            .chain(&transition.callbacks.around)
            .cloned()
            .collect();

        let Self {
            context,
            binding,
            history,
            history_limit,
            ..
        } = self;
        let mut step = Step {
            description,
            transition,
            binding,
            original: &original,
            attempt: &attempt,
            completed: false,
        };

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            Next::new(&hooks, &mut step, &attempt).run(context)
        }));

        match outcome {
            Ok(Ok(())) if step.completed => {
                tracing::debug!(
                    event,
                    from = original.name(),
                    to = transition.to.name(),
                    "transition applied"
                );
                history.push(StateTransition {
                    from: original,
                    to: transition.to.clone(),
                    event: event.to_string(),
                    timestamp: Utc::now(),
                });
                if let Some(limit) = *history_limit {
                    history.retain_last(limit);
                }
                Ok(())
            }
            Ok(Ok(())) => {
                step.rollback(context);
                tracing::debug!(
                    event,
                    state = original.name(),
                    "around hook settled without completing the transition"
                );
                Ok(())
            }
            Ok(Err(err)) => {
                step.rollback(context);
                tracing::warn!(
                    event,
                    state = original.name(),
                    error = %err,
                    "transition failed, state rolled back"
                );
                Err(err)
            }
            Err(fault) => {
                step.rollback(context);
                tracing::warn!(
                    event,
                    state = original.name(),
                    "callback panicked, state rolled back"
                );
                panic::resume_unwind(fault)
            }
        }
    }
}

/// The innermost action of one transition: before tiers, state change,
/// binding sync and after tiers.
///
/// `completed` is only true while the whole sequence stands; any layer
/// failing on the way out rolls it back and clears the flag.
struct Step<'m, S: State, P> {
    description: &'m Description<S, P>,
    transition: &'m Transition<S, P>,
    binding: &'m mut Option<BoundField<S, P>>,
    original: &'m S,
    attempt: &'m Attempt<'m>,
    completed: bool,
}

impl<S: State, P> Terminal<S, P> for Step<'_, S, P> {
    fn apply(&mut self, ctx: &mut Context<S, P>) -> Result<(), FsmError> {
        let global = &self.description.callbacks;
        let local = &self.transition.callbacks;

        run_layers(&before_layers(global, local), ctx, self.attempt)?;

        ctx.set_state(self.transition.to.clone());

        let after = after_layers(global, local);
        let result = run_layers(&after[..1], ctx, self.attempt).and_then(|()| {
            sync_binding(ctx, self.binding);
            run_layers(&after[1..], ctx, self.attempt)
        });

        match result {
            Ok(()) => self.completed = true,
            Err(_) => self.rollback(ctx),
        }
        result
    }

    fn rollback(&mut self, ctx: &mut Context<S, P>) {
        self.completed = false;
        restore(ctx, self.binding, self.original);
    }
}

fn sync_binding<S: State, P>(ctx: &mut Context<S, P>, binding: &mut Option<BoundField<S, P>>) {
    if let Some(field) = binding.as_mut() {
        let (state, payload) = ctx.split();
        field.store(payload, state);
    }
}

fn restore<S: State, P>(
    ctx: &mut Context<S, P>,
    binding: &mut Option<BoundField<S, P>>,
    original: &S,
) {
    if ctx.state() != original {
        ctx.set_state(original.clone());
        sync_binding(ctx, binding);
    }
}

impl<S: State, P: std::fmt::Debug> std::fmt::Debug for Machine<S, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Machine")
            .field("state", self.context.state())
            .field("payload", self.context.payload())
            .field("bound", &self.binding.is_some())
            .field("history", &self.history.len())
            .finish()
    }
}
