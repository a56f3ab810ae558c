//! Builder API for ergonomic description construction.
//!
//! Descriptions are plain data and can be written as struct literals.
//! The builders here add a fluent API, required-field checks and an
//! opt-in validated build.

pub mod description;
pub mod error;
pub mod event;
pub mod macros;
pub mod transition;

pub use description::DescriptionBuilder;
pub use error::BuildError;
pub use event::EventBuilder;
pub use transition::TransitionBuilder;

use crate::core::{Context, Guard, State};
use crate::description::Transition;

/// Create an unconditional transition without callbacks.
///
/// # Example
///
/// ```
/// use transitioner::builder::simple_transition;
/// use transitioner::state_enum;
///
/// state_enum! {
///     enum Job {
///         Sleeping,
///         Running,
///     }
/// }
///
/// let transition = simple_transition::<Job, ()>(Job::Sleeping, Job::Running);
/// assert_eq!(transition.from, vec![Job::Sleeping]);
/// ```
pub fn simple_transition<S: State, P>(from: S, to: S) -> Transition<S, P> {
    Transition::new([from], to)
}

/// Create a transition with a single guard predicate.
///
/// # Example
///
/// ```
/// use transitioner::builder::guarded_transition;
/// use transitioner::state_enum;
///
/// state_enum! {
///     enum Job {
///         Sleeping,
///         Running,
///     }
/// }
///
/// struct Flags {
///     can_stop: bool,
/// }
///
/// let stop = guarded_transition::<Job, Flags, _>(Job::Running, Job::Sleeping, |ctx| {
///     ctx.payload().can_stop
/// });
/// assert_eq!(stop.guards.len(), 1);
/// ```
pub fn guarded_transition<S, P, F>(from: S, to: S, guard: F) -> Transition<S, P>
where
    S: State,
    F: Fn(&Context<S, P>) -> bool + Send + Sync + 'static,
{
    let mut transition = Transition::new([from], to);
    transition.guards.push(Guard::new(guard));
    transition
}
