//! Declarative machine descriptions.
//!
//! A [`Description`] is plain data: an initial state, a list of named
//! events each holding an ordered list of transitions, and global
//! callbacks. Machines share it read-only behind an `Arc`.
//!
//! Construction performs no validation. Duplicate event names, events
//! without transitions and unreachable states are all accepted; call
//! [`Description::validate`] to have them reported.

mod callbacks;
mod transition;

pub use callbacks::{AroundHook, Callback, CallbackError, Callbacks, Phase};
pub use transition::Transition;

use crate::core::State;

/// A named event and the transitions it may trigger.
///
/// Transition order matters: the first eligible transition wins.
pub struct Event<S: State, P> {
    pub name: String,
    pub transitions: Vec<Transition<S, P>>,
}

impl<S: State, P> Event<S, P> {
    pub fn new(name: impl Into<String>, transitions: Vec<Transition<S, P>>) -> Self {
        Self {
            name: name.into(),
            transitions,
        }
    }
}

impl<S: State, P> Clone for Event<S, P> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            transitions: self.transitions.clone(),
        }
    }
}

impl<S: State, P> std::fmt::Debug for Event<S, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Event")
            .field("name", &self.name)
            .field("transitions", &self.transitions)
            .finish()
    }
}

/// Immutable template shared by every machine built from it.
pub struct Description<S: State, P> {
    pub initial: S,
    pub events: Vec<Event<S, P>>,
    pub callbacks: Callbacks<S, P>,
}

impl<S: State, P> Description<S, P> {
    /// Description with an initial state and nothing else.
    pub fn new(initial: S) -> Self {
        Self {
            initial,
            events: Vec::new(),
            callbacks: Callbacks::new(),
        }
    }

    /// Look up an event by name.
    ///
    /// With duplicate names the first declared event is returned.
    pub fn find_event(&self, name: &str) -> Option<&Event<S, P>> {
        self.events.iter().find(|event| event.name == name)
    }

    /// Every state mentioned by the description, in order of first
    /// appearance: the initial state, then each transition's sources
    /// and target.
    pub fn states(&self) -> Vec<&S> {
        let mut states = vec![&self.initial];
        for transition in self.events.iter().flat_map(|e| &e.transitions) {
            for state in transition.from.iter().chain(std::iter::once(&transition.to)) {
                if !states.contains(&state) {
                    states.push(state);
                }
            }
        }
        states
    }

    pub fn event_names(&self) -> impl Iterator<Item = &str> {
        self.events.iter().map(|event| event.name.as_str())
    }
}

impl<S: State, P> Clone for Description<S, P> {
    fn clone(&self) -> Self {
        Self {
            initial: self.initial.clone(),
            events: self.events.clone(),
            callbacks: self.callbacks.clone(),
        }
    }
}

impl<S: State, P> std::fmt::Debug for Description<S, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Description")
            .field("initial", &self.initial)
            .field("events", &self.events)
            .field("callbacks", &self.callbacks)
            .finish()
    }
}
