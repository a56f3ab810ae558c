//! Build errors for description, event and transition builders.

use crate::validation::DescriptionIssue;
use thiserror::Error;

/// Errors that can occur when building descriptions.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("Event name is empty")]
    MissingEventName,

    #[error("Transition source states not specified. Call .from(state)")]
    MissingFromState,

    #[error("Transition target state not specified. Call .to(state)")]
    MissingToState,

    #[error("Description is invalid: {}", format_issues(.0))]
    Invalid(Vec<DescriptionIssue>),
}

fn format_issues(issues: &[DescriptionIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
