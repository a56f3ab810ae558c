//! Handles to machines that may not exist yet.

use super::error::FsmError;
use super::machine::Machine;
use crate::core::State;

/// Operations on a machine handle that may be uninitialized.
///
/// Implemented for `Option<Machine>` so a missing machine yields
/// [`FsmError::NotInitialized`] instead of a panic.
///
/// # Example
///
/// ```rust
/// use transitioner::engine::{FsmError, Machine, MachineSlot};
///
/// let mut slot: Option<Machine<String>> = None;
/// assert!(matches!(slot.fire("toggle"), Err(FsmError::NotInitialized)));
/// ```
pub trait MachineSlot<S: State> {
    fn fire(&mut self, event: &str) -> Result<(), FsmError>;

    fn current_state(&self) -> Result<&S, FsmError>;
}

impl<S: State, P> MachineSlot<S> for Option<Machine<S, P>> {
    fn fire(&mut self, event: &str) -> Result<(), FsmError> {
        self.as_mut().ok_or(FsmError::NotInitialized)?.fire(event)
    }

    fn current_state(&self) -> Result<&S, FsmError> {
        self.as_ref()
            .map(Machine::current_state)
            .ok_or(FsmError::NotInitialized)
    }
}
