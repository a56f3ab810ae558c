//! Errors surfaced by `fire` and friends.

use crate::description::{CallbackError, Phase};
use thiserror::Error;

/// Errors that can occur while firing events.
///
/// State names are carried as strings so the error type does not depend
/// on the machine's state type.
#[derive(Debug, Error)]
pub enum FsmError {
    #[error("event '{event}' not described")]
    EventNotDescribed { event: String },

    #[error("no available transitions found for event '{event}' from state '{state}'")]
    NoEligibleTransition { event: String, state: String },

    #[error(
        "{phase} callback '{}' failed during '{event}' ({from} -> {to}): {source}",
        .callback.as_deref().unwrap_or("<anonymous>")
    )]
    CallbackFailed {
        event: String,
        from: String,
        to: String,
        phase: Phase,
        callback: Option<String>,
        #[source]
        source: CallbackError,
    },

    #[error("machine is not initialized")]
    NotInitialized,
}

impl FsmError {
    /// Whether the state was left untouched because nothing could fire,
    /// as opposed to a callback failing.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::EventNotDescribed { .. } | Self::NoEligibleTransition { .. }
        )
    }

    /// Phase of the failing callback, if this is a callback failure.
    pub fn phase(&self) -> Option<Phase> {
        match self {
            Self::CallbackFailed { phase, .. } => Some(*phase),
            _ => None,
        }
    }

    /// The error returned by the failing callback, unwrapped.
    pub fn callback_error(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            Self::CallbackFailed { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}
