//! Transitioner: a declarative finite state machine engine
//!
//! A machine is described once as plain data (states, events, guarded
//! transitions and callback slots) and then driven by firing named events.
//! Each fire picks the first eligible transition, runs it through a layered
//! callback stack and either commits the new state or puts the old one
//! back.
//!
//! # Core Concepts
//!
//! - **Description**: the read-only, shareable model of a machine
//! - **Machine**: a live instance holding the current state and a payload
//! - **Callbacks**: tiered before/after callbacks plus around hooks that
//!   wrap the whole transition
//! - **Binding**: mirroring the current state into an external field
//!
//! # Example
//!
//! ```rust
//! use transitioner::builder::{DescriptionBuilder, EventBuilder, TransitionBuilder};
//! use transitioner::{initialize, FsmError};
//!
//! #[derive(Default)]
//! struct Job {
//!     can_stop: bool,
//! }
//!
//! let description = DescriptionBuilder::<String, Job>::new()
//!     .initial("sleeping".to_string())
//!     .event(
//!         EventBuilder::new("toggle")
//!             .transition(TransitionBuilder::new().from("sleeping".to_string()).to("running".to_string()))?
//!             .transition(TransitionBuilder::new().from("running".to_string()).to("sleeping".to_string()))?,
//!     )?
//!     .event(
//!         EventBuilder::new("stop").transition(
//!             TransitionBuilder::<String, Job>::new()
//!                 .from("running".to_string())
//!                 .to("stopped".to_string())
//!                 .when(|ctx| ctx.payload().can_stop),
//!         )?,
//!     )?
//!     .build()?;
//!
//! let mut machine = initialize(description);
//! machine.fire("toggle")?;
//! assert_eq!(machine.current_state(), "running");
//!
//! let err = machine.fire("stop").unwrap_err();
//! assert!(matches!(err, FsmError::NoEligibleTransition { .. }));
//! assert_eq!(machine.current_state(), "running");
//!
//! machine.payload_mut().can_stop = true;
//! machine.fire("stop")?;
//! assert_eq!(machine.current_state(), "stopped");
//! # Ok::<(), Box<dyn std::error::Error + Send + Sync>>(())
//! ```

pub mod builder;
pub mod core;
pub mod description;
pub mod engine;
pub mod transaction;
pub mod validation;

// Re-export commonly used types
pub use builder::{BuildError, DescriptionBuilder, EventBuilder, TransitionBuilder};
pub use core::{Context, Guard, State, StateHistory, StateTransition};
pub use description::{
    AroundHook, Callback, CallbackError, Callbacks, Description, Event, Phase, Transition,
};
pub use engine::{initialize, FieldAccessor, FsmError, Machine, MachineSlot, Next, StateField};
pub use transaction::{transactional, Transaction};
pub use validation::DescriptionIssue;
