//! Core State trait for machine states.
//!
//! The engine never enumerates states. They are opaque, comparable tokens
//! discovered from the `from`/`to` fields of transitions, so the trait only
//! asks for what the engine needs: equality, cloning, a display name and
//! serializability for history records.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for machine states.
///
/// All methods are pure. States are immutable values describing the
/// current position of a machine.
///
/// `State` is implemented for `String`, so plain string states work
/// without any extra type. Fieldless enums can derive an implementation
/// through [`state_enum!`](crate::state_enum).
///
/// # Example
///
/// ```rust
/// use transitioner::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum JobState {
///     Sleeping,
///     Running,
///     Crashed,
/// }
///
/// impl State for JobState {
///     fn name(&self) -> &str {
///         match self {
///             Self::Sleeping => "Sleeping",
///             Self::Running => "Running",
///             Self::Crashed => "Crashed",
///         }
///     }
///
///     fn is_error(&self) -> bool {
///         matches!(self, Self::Crashed)
///     }
/// }
///
/// assert_eq!(JobState::Running.name(), "Running");
/// assert_eq!("running".to_string().name(), "running");
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the state's name for display, logging and error reporting.
    fn name(&self) -> &str;

    /// Check if this is a final (terminal) state.
    ///
    /// Purely informational; the engine does not stop firing events
    /// from final states. Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }

    /// Check if this is an error state.
    ///
    /// Default implementation returns `false`.
    fn is_error(&self) -> bool {
        false
    }
}

impl State for String {
    fn name(&self) -> &str {
        self.as_str()
    }
}
