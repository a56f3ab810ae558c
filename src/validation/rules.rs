//! Validation rules for descriptions.

use super::issues::DescriptionIssue;
use crate::core::State;
use crate::description::Description;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type Check = Validation<(), NonEmptyVec<DescriptionIssue>>;

fn check(issue: Option<DescriptionIssue>) -> Check {
    match issue {
        Some(issue) => Validation::fail(issue),
        None => Validation::success(()),
    }
}

impl<S: State, P> Description<S, P> {
    /// Check the description, accumulating every issue found.
    ///
    /// Returns `Validation::Success(())` if the description is sound.
    pub fn validate(&self) -> Check {
        let mut checks: Vec<Check> = Vec::new();

        let mut seen: Vec<&str> = Vec::new();
        for name in self.event_names() {
            if seen.contains(&name) {
                continue;
            }
            seen.push(name);
            let count = self.event_names().filter(|n| *n == name).count();
            checks.push(check((count > 1).then(|| DescriptionIssue::DuplicateEvent {
                name: name.to_string(),
                count,
            })));
        }

        for event in &self.events {
            checks.push(check(event.transitions.is_empty().then(|| {
                DescriptionIssue::EmptyEvent {
                    name: event.name.clone(),
                }
            })));

            for (index, transition) in event.transitions.iter().enumerate() {
                checks.push(check(transition.from.is_empty().then(|| {
                    DescriptionIssue::NoSourceStates {
                        event: event.name.clone(),
                        index,
                    }
                })));
            }
        }

        let reachable = self.reachable_states();
        for state in self.states() {
            checks.push(check((!reachable.contains(&state)).then(|| {
                DescriptionIssue::UnreachableState {
                    state: state.name().to_string(),
                }
            })));
        }

        Validation::all_vec(checks).map(|_| ())
    }

    /// All issues as a plain list; empty when the description is sound.
    pub fn issues(&self) -> Vec<DescriptionIssue> {
        match self.validate() {
            Validation::Failure(issues) => issues.iter().cloned().collect(),
            _ => Vec::new(),
        }
    }

    /// States reachable from the initial state, ignoring guards.
    fn reachable_states(&self) -> Vec<&S> {
        let mut reachable = vec![&self.initial];
        let mut frontier = 0;

        while frontier < reachable.len() {
            let current = reachable[frontier];
            frontier += 1;

            for transition in self.events.iter().flat_map(|e| &e.transitions) {
                if transition.leaves(current) && !reachable.contains(&&transition.to) {
                    reachable.push(&transition.to);
                }
            }
        }

        reachable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::description::{Event, Transition};

    fn s(name: &str) -> String {
        name.to_string()
    }

    fn toggle() -> Description<String, ()> {
        let mut description = Description::new(s("sleeping"));
        description.events.push(Event::new(
            "toggle",
            vec![
                Transition::new([s("sleeping")], s("running")),
                Transition::new([s("running")], s("sleeping")),
            ],
        ));
        description
    }

    #[test]
    fn sound_description_passes() {
        let description = toggle();
        assert!(description.validate().is_success());
        assert!(description.issues().is_empty());
    }

    #[test]
    fn validation_accumulates_all_issues() {
        let mut description = toggle();
        description.events.push(Event::new("toggle", Vec::new()));
        description.events.push(Event::new(
            "revive",
            vec![
                Transition::new([s("crashed")], s("sleeping")),
                Transition::new(Vec::new(), s("running")),
            ],
        ));

        let issues = description.issues();

        assert!(description.validate().is_failure());
        assert!(issues.contains(&DescriptionIssue::DuplicateEvent {
            name: s("toggle"),
            count: 2,
        }));
        assert!(issues.contains(&DescriptionIssue::EmptyEvent { name: s("toggle") }));
        assert!(issues.contains(&DescriptionIssue::NoSourceStates {
            event: s("revive"),
            index: 1,
        }));
        assert!(issues.contains(&DescriptionIssue::UnreachableState { state: s("crashed") }));
        assert_eq!(issues.len(), 4);
    }

    #[test]
    fn duplicate_is_reported_once() {
        let mut description = toggle();
        description.events.push(Event::new(
            "toggle",
            vec![Transition::new([s("sleeping")], s("running"))],
        ));
        description.events.push(Event::new(
            "toggle",
            vec![Transition::new([s("sleeping")], s("running"))],
        ));

        let duplicates: Vec<_> = description
            .issues()
            .into_iter()
            .filter(|i| matches!(i, DescriptionIssue::DuplicateEvent { .. }))
            .collect();

        assert_eq!(
            duplicates,
            vec![DescriptionIssue::DuplicateEvent {
                name: s("toggle"),
                count: 3,
            }]
        );
    }

    #[test]
    fn initial_state_alone_is_sound() {
        let description: Description<String, ()> = Description::new(s("initialized"));
        assert!(description.validate().is_success());
    }
}
