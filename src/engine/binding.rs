//! Binding a machine's state to an external field.

use crate::core::State;
use std::sync::{Arc, Mutex, PoisonError};

/// Read/write access to the field a machine keeps in sync with its state.
///
/// `load` returning `None` means the field is empty; an empty field is
/// populated from the machine instead of overriding it. Both methods get
/// the machine payload, so the field may live inside it.
pub trait StateField<S: State, P> {
    fn load(&self, payload: &P) -> Option<S>;

    fn store(&mut self, payload: &mut P, state: &S);
}

/// Binding built from a getter/setter pair.
///
/// # Example
///
/// ```rust
/// use transitioner::engine::FieldAccessor;
///
/// struct Job {
///     state: String,
/// }
///
/// let accessor = FieldAccessor::new(
///     |job: &Job| Some(job.state.clone()).filter(|s| !s.is_empty()),
///     |job: &mut Job, state: &String| job.state = state.clone(),
/// );
/// # let _ = accessor;
/// ```
pub struct FieldAccessor<G, W> {
    get: G,
    set: W,
}

impl<G, W> FieldAccessor<G, W> {
    pub fn new(get: G, set: W) -> Self {
        Self { get, set }
    }
}

impl<S, P, G, W> StateField<S, P> for FieldAccessor<G, W>
where
    S: State,
    G: Fn(&P) -> Option<S>,
    W: FnMut(&mut P, &S),
{
    fn load(&self, payload: &P) -> Option<S> {
        (self.get)(payload)
    }

    fn store(&mut self, payload: &mut P, state: &S) {
        (self.set)(payload, state)
    }
}

/// Shared string cell; the empty string counts as an empty field.
impl<P> StateField<String, P> for Arc<Mutex<String>> {
    fn load(&self, _payload: &P) -> Option<String> {
        let value = self.lock().unwrap_or_else(PoisonError::into_inner);
        (!value.is_empty()).then(|| value.clone())
    }

    fn store(&mut self, _payload: &mut P, state: &String) {
        let mut value = self.lock().unwrap_or_else(PoisonError::into_inner);
        value.clone_from(state);
    }
}

impl<S: State, P> StateField<S, P> for Arc<Mutex<Option<S>>> {
    fn load(&self, _payload: &P) -> Option<S> {
        self.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn store(&mut self, _payload: &mut P, state: &S) {
        *self.lock().unwrap_or_else(PoisonError::into_inner) = Some(state.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_cell_treats_empty_as_unset() {
        let mut cell = Arc::new(Mutex::new(String::new()));
        assert_eq!(StateField::<String, ()>::load(&cell, &()), None);

        cell.store(&mut (), &"running".to_string());
        assert_eq!(cell.load(&()), Some("running".to_string()));
        assert_eq!(*cell.lock().unwrap(), "running");
    }

    #[test]
    fn option_cell_round_trips() {
        let mut cell: Arc<Mutex<Option<String>>> = Arc::new(Mutex::new(None));
        assert_eq!(StateField::<String, ()>::load(&cell, &()), None);

        cell.store(&mut (), &"sleeping".to_string());
        assert_eq!(cell.load(&()), Some("sleeping".to_string()));
    }

    #[test]
    fn accessor_reads_and_writes_payload() {
        struct Job {
            state: String,
        }

        let mut accessor = FieldAccessor::new(
            |job: &Job| Some(job.state.clone()).filter(|s| !s.is_empty()),
            |job: &mut Job, state: &String| job.state = state.clone(),
        );
        let mut job = Job {
            state: String::new(),
        };

        assert_eq!(accessor.load(&job), None);
        accessor.store(&mut job, &"started".to_string());
        assert_eq!(job.state, "started");
        assert_eq!(accessor.load(&job), Some("started".to_string()));
    }
}
