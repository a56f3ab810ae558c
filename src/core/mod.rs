//! Core state machine types.
//!
//! This module contains the data the engine operates on:
//! - State definitions via the `State` trait
//! - The runtime `Context` seen by guards and callbacks
//! - Guard predicates for transition eligibility
//! - Immutable history of applied transitions

mod context;
mod guard;
mod history;
mod state;

pub use context::Context;
pub use guard::Guard;
pub use history::{StateHistory, StateTransition};
pub use state::State;
