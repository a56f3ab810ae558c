//! Opt-in structural validation of descriptions.
//!
//! Building a description never validates it. [`Description::validate`]
//! walks the whole description and reports every issue at once using
//! Stillwater's `Validation`, instead of stopping at the first one.
//!
//! # Example
//!
//! ```rust
//! use transitioner::description::{Description, Event};
//! use transitioner::validation::DescriptionIssue;
//!
//! let mut description: Description<String, ()> = Description::new("sleeping".to_string());
//! description.events.push(Event::new("toggle", Vec::new()));
//!
//! assert_eq!(
//!     description.issues(),
//!     vec![DescriptionIssue::EmptyEvent { name: "toggle".to_string() }]
//! );
//! ```
//!
//! [`Description::validate`]: crate::description::Description::validate

mod issues;
mod rules;

pub use issues::DescriptionIssue;
