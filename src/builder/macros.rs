//! Macros for ergonomic state machine construction.

/// Generate a `State` implementation for a fieldless enum.
///
/// Each variant's state name defaults to the variant identifier. A variant
/// may carry its own name with `Variant => "name"`, which keeps enum states
/// interchangeable with the lowercase string states used elsewhere. The
/// enum also gets a `Display` impl printing that name.
///
/// # Example
///
/// ```
/// use transitioner::state_enum;
///
/// state_enum! {
///     pub enum JobState {
///         Sleeping => "sleeping",
///         Running => "running",
///         Finished,
///         Crashed,
///     }
///     final: [Finished, Crashed]
///     error: [Crashed]
/// }
///
/// use transitioner::core::State;
/// assert_eq!(JobState::Running.name(), "running");
/// assert_eq!(JobState::Finished.to_string(), "Finished");
/// assert!(JobState::Crashed.is_error());
/// ```
///
/// The generated enum derives `serde::Serialize` and `serde::Deserialize`,
/// so the calling crate needs `serde` as a dependency.
#[macro_export]
macro_rules! state_enum {
    (@label $variant:ident $label:literal) => {
        $label
    };
    (@label $variant:ident) => {
        stringify!($variant)
    };

    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $(=> $label:literal)?
            ),* $(,)?
        }

        $(final: [$($final:ident),* $(,)?])?
        $(error: [$($error:ident),* $(,)?])?
    ) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => $crate::state_enum!(@label $variant $($label)?)),*
                }
            }

            fn is_final(&self) -> bool {
                false $($(|| matches!(self, Self::$final))*)?
            }

            fn is_error(&self) -> bool {
                false $($(|| matches!(self, Self::$error))*)?
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::core::State::name(self))
            }
        }
    };
}
