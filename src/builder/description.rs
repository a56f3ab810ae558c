//! Builder for constructing descriptions.

use crate::builder::error::BuildError;
use crate::builder::event::EventBuilder;
use crate::core::State;
use crate::description::{AroundHook, Callback, Callbacks, Description, Event};

/// Builder for constructing descriptions with a fluent API.
///
/// Global callbacks registered here apply to every transition.
///
/// # Example
///
/// ```rust
/// use transitioner::builder::{DescriptionBuilder, EventBuilder, TransitionBuilder};
/// use transitioner::engine::Machine;
///
/// let toggle = EventBuilder::new("toggle")
///     .transition(
///         TransitionBuilder::new()
///             .from("sleeping".to_string())
///             .to("running".to_string()),
///     )?
///     .transition(
///         TransitionBuilder::new()
///             .from("running".to_string())
///             .to("sleeping".to_string()),
///     )?;
///
/// let description = DescriptionBuilder::<String, ()>::new()
///     .initial("sleeping".to_string())
///     .event(toggle)?
///     .build()?;
///
/// let mut machine = Machine::new(description);
/// machine.fire("toggle")?;
/// assert_eq!(machine.current_state(), "running");
/// # Ok::<(), Box<dyn std::error::Error + Send + Sync>>(())
/// ```
pub struct DescriptionBuilder<S: State, P> {
    initial: Option<S>,
    events: Vec<Event<S, P>>,
    callbacks: Callbacks<S, P>,
}

impl<S: State, P> DescriptionBuilder<S, P> {
    pub fn new() -> Self {
        Self {
            initial: None,
            events: Vec::new(),
            callbacks: Callbacks::new(),
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Add an event using a builder.
    /// Returns an error if the builder fails validation.
    pub fn event(mut self, builder: EventBuilder<S, P>) -> Result<Self, BuildError> {
        self.events.push(builder.build()?);
        Ok(self)
    }

    /// Add a pre-built event.
    pub fn add_event(mut self, event: Event<S, P>) -> Self {
        self.events.push(event);
        self
    }

    /// Replace all global callbacks at once.
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

    /// Build the description.
    ///
    /// Only the initial state is required; the event graph is accepted
    /// as is.
    pub fn build(self) -> Result<Description<S, P>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        Ok(Description {
            initial,
            events: self.events,
            callbacks: self.callbacks,
        })
    }

    /// Build the description and reject it if validation finds issues.
    pub fn build_validated(self) -> Result<Description<S, P>, BuildError> {
        let description = self.build()?;
        let issues = description.issues();
        if issues.is_empty() {
            Ok(description)
        } else {
            Err(BuildError::Invalid(issues))
        }
    }
}

impl<S: State, P> Default for DescriptionBuilder<S, P> {
    fn default() -> Self {
        Self::new()
    }
}
