//! Transition history tracking.
//!
//! Every successful `fire` is recorded as an immutable [`StateTransition`].
//! Failed or rolled-back fires leave no trace in the history.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single applied transition.
///
/// # Example
///
/// ```rust
/// use transitioner::core::StateTransition;
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: "sleeping".to_string(),
///     to: "running".to_string(),
///     event: "toggle".to_string(),
///     timestamp: Utc::now(),
/// };
/// assert_eq!(transition.event, "toggle");
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: State> {
    /// The state being transitioned from
    pub from: S,
    /// The state being transitioned to
    pub to: S,
    /// The event that triggered the transition
    pub event: String,
    /// When the transition completed
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of applied transitions.
///
/// History is immutable: [`record`](Self::record) returns a new history
/// with the transition appended.
///
/// # Example
///
/// ```rust
/// use transitioner::core::{StateHistory, StateTransition};
/// use chrono::Utc;
///
/// let history = StateHistory::new();
/// let history = history.record(StateTransition {
///     from: "sleeping".to_string(),
///     to: "running".to_string(),
///     event: "toggle".to_string(),
///     timestamp: Utc::now(),
/// });
/// let history = history.record(StateTransition {
///     from: "running".to_string(),
///     to: "sleeping".to_string(),
///     event: "toggle".to_string(),
///     timestamp: Utc::now(),
/// });
///
/// let path = history.get_path();
/// assert_eq!(path.len(), 3); // sleeping -> running -> sleeping
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State> {
    transitions: Vec<StateTransition<S>>,
}

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateHistory<S> {
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    ///
    /// The existing history is left untouched.
    pub fn record(&self, transition: StateTransition<S>) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// Append in place; the engine owns its history, so no copy is needed.
    pub(crate) fn push(&mut self, transition: StateTransition<S>) {
        self.transitions.push(transition);
    }

    /// Drop the oldest transitions until at most `limit` remain.
    pub(crate) fn retain_last(&mut self, limit: usize) {
        let excess = self.transitions.len().saturating_sub(limit);
        self.transitions.drain(..excess);
    }

    /// Get the path of states traversed.
    ///
    /// Returns the `from` state of the first transition followed by the
    /// `to` state of every transition. Empty when nothing was recorded.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Time elapsed between the first and the last recorded transition.
    ///
    /// Returns `None` if there are no transitions.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.first(), self.transitions.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// Most recent transition, if any.
    pub fn last(&self) -> Option<&StateTransition<S>> {
        self.transitions.last()
    }

    pub fn transitions(&self) -> &[StateTransition<S>] {
        &self.transitions
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}
