//! Runtime context handed to guards and callbacks.

use super::state::State;

/// Live view of a machine while it evaluates guards and runs callbacks.
///
/// Guards see it by shared reference, callbacks by mutable reference.
/// Either way the current state can only be read: the engine is the
/// only writer. Callbacks may freely mutate the payload, which is the
/// caller-supplied object the machine is attached to.
#[derive(Debug, Clone)]
pub struct Context<S: State, P> {
    state: S,
    event: Option<String>,
    payload: P,
}

impl<S: State, P> Context<S, P> {
    pub(crate) fn new(state: S, payload: P) -> Self {
        Self {
            state,
            event: None,
            payload,
        }
    }

    /// Current state of the machine.
    ///
    /// Before-callbacks and guards observe the pre-transition state,
    /// after-callbacks observe the target state.
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Name of the event being fired, `None` outside of `fire`.
    pub fn event(&self) -> Option<&str> {
        self.event.as_deref()
    }

    pub fn payload(&self) -> &P {
        &self.payload
    }

    pub fn payload_mut(&mut self) -> &mut P {
        &mut self.payload
    }

    pub(crate) fn set_state(&mut self, state: S) {
        self.state = state;
    }

    pub(crate) fn set_event(&mut self, event: Option<String>) {
        self.event = event;
    }

    pub(crate) fn split(&mut self) -> (&S, &mut P) {
        (&self.state, &mut self.payload)
    }

    pub(crate) fn into_payload(self) -> P {
        self.payload
    }
}
