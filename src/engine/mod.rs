//! The transition engine.
//!
//! - [`Machine`]: event dispatch, guard evaluation, transition application
//!   with rollback on failure
//! - [`Next`]: the continuation around hooks use to run the rest of a
//!   transition
//! - [`StateField`]: binding the current state to an external field
//! - [`FsmError`]: everything `fire` can report
//!
//! A fire resolves the event, picks the first eligible transition and
//! runs it inside the around stack. The innermost action runs the before
//! tiers, sets the new state and runs the after tiers. Any failure puts
//! the previous state back before the error is returned.

mod binding;
mod compose;
mod error;
mod machine;
mod slot;

pub use binding::{FieldAccessor, StateField};
pub use compose::Next;
pub use error::FsmError;
pub use machine::Machine;
pub use slot::MachineSlot;

use crate::core::State;
use crate::description::Description;
use std::sync::Arc;

/// Create a machine in the description's initial state.
pub fn initialize<S: State, P: Default>(
    description: impl Into<Arc<Description<S, P>>>,
) -> Machine<S, P> {
    Machine::new(description)
}
