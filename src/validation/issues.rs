//! Structural issues found in descriptions.

use thiserror::Error;

/// A problem with the shape of a description.
///
/// None of these stop a machine from running; they point at parts of
/// the description that can never take effect.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DescriptionIssue {
    #[error("event '{name}' is described {count} times, only the first is used")]
    DuplicateEvent { name: String, count: usize },

    #[error("event '{name}' has no transitions")]
    EmptyEvent { name: String },

    #[error("transition #{index} of event '{event}' has no source states")]
    NoSourceStates { event: String, index: usize },

    #[error("state '{state}' is unreachable from the initial state")]
    UnreachableState { state: String },
}
