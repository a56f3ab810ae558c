//! Builder for constructing events.

use crate::builder::error::BuildError;
use crate::builder::transition::TransitionBuilder;
use crate::core::State;
use crate::description::{Event, Transition};

/// Builder collecting the ordered transitions of one event.
pub struct EventBuilder<S: State, P> {
    name: String,
    transitions: Vec<Transition<S, P>>,
}

impl<S: State, P> EventBuilder<S, P> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transitions: Vec::new(),
        }
    }

    /// Add a transition using a builder.
    /// Returns an error if the builder fails validation.
    pub fn transition(mut self, builder: TransitionBuilder<S, P>) -> Result<Self, BuildError> {
        self.transitions.push(builder.build()?);
        Ok(self)
    }

    /// Add a pre-built transition.
    pub fn add_transition(mut self, transition: Transition<S, P>) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Build the event. An event without transitions is accepted.
    pub fn build(self) -> Result<Event<S, P>, BuildError> {
        if self.name.is_empty() {
            return Err(BuildError::MissingEventName);
        }
        Ok(Event::new(self.name, self.transitions))
    }
}
