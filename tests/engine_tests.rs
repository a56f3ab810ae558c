//! End-to-end scenarios: building descriptions, firing events, callback
//! ordering, rollback and state binding.

use std::sync::{Arc, Mutex};
use std::thread;
use transitioner::builder::{DescriptionBuilder, EventBuilder, TransitionBuilder};
use transitioner::description::{AroundHook, Callback, Description, Phase};
use transitioner::engine::{FieldAccessor, FsmError, Machine};
use transitioner::{initialize, transactional, CallbackError, Transaction};

type Log = Arc<Mutex<Vec<String>>>;

fn s(name: &str) -> String {
    name.to_string()
}

fn step(from: &str, to: &str) -> TransitionBuilder<String, Job> {
    TransitionBuilder::new().from(s(from)).to(s(to))
}

#[derive(Debug, Default)]
struct Job {
    state: String,
    can_stop: bool,
    log: Vec<String>,
}

fn job_description() -> Description<String, Job> {
    DescriptionBuilder::new()
        .initial(s("sleeping"))
        .event(
            EventBuilder::new("toggle")
                .transition(step("sleeping", "running"))
                .unwrap()
                .transition(step("running", "sleeping"))
                .unwrap(),
        )
        .unwrap()
        .event(
            EventBuilder::new("stop")
                .transition(step("running", "stopped").when(|ctx| ctx.payload().can_stop))
                .unwrap(),
        )
        .unwrap()
        .build()
        .unwrap()
}

fn state_field() -> FieldAccessor<
    impl Fn(&Job) -> Option<String>,
    impl FnMut(&mut Job, &String),
> {
    FieldAccessor::new(
        |job: &Job| Some(job.state.clone()).filter(|state| !state.is_empty()),
        |job: &mut Job, state: &String| job.state = state.clone(),
    )
}

#[test]
fn toggle_twice_returns_to_sleeping() {
    let mut machine = initialize(job_description());

    machine.fire("toggle").unwrap();
    assert_eq!(machine.current_state(), "running");

    machine.fire("toggle").unwrap();
    assert_eq!(machine.current_state(), "sleeping");
}

#[test]
fn guard_rejection_leaves_state_unchanged() {
    let mut machine = initialize(job_description());
    machine.fire("toggle").unwrap();

    let err = machine.fire("stop").unwrap_err();

    assert_eq!(
        err.to_string(),
        "no available transitions found for event 'stop' from state 'running'"
    );
    assert_eq!(machine.current_state(), "running");
}

#[test]
fn guard_reads_another_payload_field() {
    let mut machine = initialize(job_description());
    machine.fire("toggle").unwrap();
    machine.payload_mut().can_stop = true;

    machine.fire("stop").unwrap();

    assert_eq!(machine.current_state(), "stopped");
    assert!(!machine.can_fire("toggle"));
}

#[test]
fn failing_after_callback_rolls_back() {
    let description = DescriptionBuilder::<String, ()>::new()
        .initial(s("initialized"))
        .event(
            EventBuilder::new("run")
                .transition(
                    TransitionBuilder::new()
                        .from(s("initialized"))
                        .to(s("succeed"))
                        .after(Callback::new(|_| Err("example error".into()))),
                )
                .unwrap(),
        )
        .unwrap()
        .build()
        .unwrap();
    let mut machine = initialize(description);

    let err = machine.fire("run").unwrap_err();

    assert_eq!(err.phase(), Some(Phase::After));
    assert_eq!(
        err.callback_error().map(|e| e.to_string()).as_deref(),
        Some("example error")
    );
    assert_eq!(machine.current_state(), "initialized");
    assert!(machine.history().is_empty());
}

#[test]
fn undescribed_event_is_an_error() {
    let mut machine = initialize(job_description());

    let err = machine.fire("explode").unwrap_err();

    assert_eq!(err.to_string(), "event 'explode' not described");
    assert_eq!(machine.current_state(), "sleeping");
}

fn around_recorder(log: &Log, label: &'static str) -> AroundHook<String, ()> {
    let log = Arc::clone(log);
    AroundHook::named(label, move |ctx, next| {
        log.lock().unwrap().push(format!("{label} enter"));
        let result = next.run(ctx);
        log.lock().unwrap().push(format!("{label} exit"));
        Ok(result?)
    })
}

fn recorder(log: &Log, label: &'static str) -> Callback<String, ()> {
    let log = Arc::clone(log);
    Callback::named(label, move |_| {
        log.lock().unwrap().push(label.to_string());
        Ok(())
    })
}

#[test]
fn around_hooks_nest_last_registered_outermost() {
    let log: Log = Arc::default();
    let description = DescriptionBuilder::<String, ()>::new()
        .initial(s("a"))
        .around(around_recorder(&log, "A"))
        .around(around_recorder(&log, "B"))
        .before(recorder(&log, "before"))
        .after(recorder(&log, "after"))
        .event(
            EventBuilder::new("go")
                .transition(TransitionBuilder::new().from(s("a")).to(s("b")))
                .unwrap(),
        )
        .unwrap()
        .build()
        .unwrap();
    let mut machine = initialize(description);

    machine.fire("go").unwrap();

    assert_eq!(
        *log.lock().unwrap(),
        vec!["B enter", "A enter", "before", "after", "A exit", "B exit"]
    );
}

#[test]
fn around_hook_sees_inner_failure_and_can_swallow_it() {
    let seen: Log = Arc::default();
    let sink = Arc::clone(&seen);
    let description = DescriptionBuilder::<String, ()>::new()
        .initial(s("a"))
        .around(AroundHook::new(move |ctx, next| {
            if let Err(err) = next.run(ctx) {
                sink.lock().unwrap().push(err.to_string());
            }
            Ok(())
        }))
        .event(
            EventBuilder::new("go")
                .transition(
                    TransitionBuilder::new()
                        .from(s("a"))
                        .to(s("b"))
                        .late_after(Callback::new(|_| Err("late failure".into()))),
                )
                .unwrap(),
        )
        .unwrap()
        .build()
        .unwrap();
    let mut machine = initialize(description);

    machine.fire("go").unwrap();

    assert_eq!(machine.current_state(), "a");
    assert!(machine.history().is_empty());
    assert_eq!(seen.lock().unwrap().len(), 1);
    assert!(seen.lock().unwrap()[0].contains("late failure"));
}

#[test]
fn binding_populates_empty_field_with_initial_state() {
    let mut machine = initialize(job_description());

    machine.bind(state_field());

    assert_eq!(machine.payload().state, "sleeping");
    machine.fire("toggle").unwrap();
    assert_eq!(machine.payload().state, "running");
}

#[test]
fn binding_adopts_persisted_state() {
    let persisted = Job {
        state: s("running"),
        ..Job::default()
    };
    let mut machine = Machine::with_payload(job_description(), persisted);

    machine.bind(state_field());

    assert_eq!(machine.current_state(), "running");
    machine.fire("toggle").unwrap();
    assert_eq!(machine.current_state(), "sleeping");
    assert_eq!(machine.payload().state, "sleeping");
}

#[test]
fn bound_field_is_synced_before_user_after_callbacks() {
    let mut description = job_description();
    description.callbacks = description.callbacks.early_after(Callback::new(|ctx: &mut transitioner::Context<String, Job>| {
        let line = format!("field={} state={}", ctx.payload().state, ctx.state());
        ctx.payload_mut().log.push(line);
        Ok(())
    }));
    let mut machine = initialize(description);
    machine.bind(state_field());

    machine.fire("toggle").unwrap();

    assert_eq!(machine.payload().log, vec!["field=running state=running"]);
}

#[test]
fn bound_field_is_restored_on_rollback() {
    let mut description = job_description();
    description.callbacks = description
        .callbacks
        .late_after(Callback::new(|_| Err("disk full".into())));
    let mut machine = initialize(description);
    machine.bind(state_field());

    assert!(machine.fire("toggle").is_err());

    assert_eq!(machine.current_state(), "sleeping");
    assert_eq!(machine.payload().state, "sleeping");
}

#[test]
fn binding_twice_replaces_previous_binding() {
    let shared = Arc::new(Mutex::new(String::new()));
    let mut machine: Machine<String, Job> = initialize(job_description());

    machine.bind(Arc::clone(&shared));
    machine.bind(state_field());
    machine.fire("toggle").unwrap();

    assert!(machine.is_bound());
    assert_eq!(machine.payload().state, "running");
    assert_eq!(*shared.lock().unwrap(), "sleeping");
}

#[test]
fn shared_cell_binding_restores_from_persisted_value() {
    let shared = Arc::new(Mutex::new(s("running")));
    let mut machine = initialize(job_description());

    machine.bind(Arc::clone(&shared));
    machine.fire("toggle").unwrap();

    assert_eq!(*shared.lock().unwrap(), "sleeping");
}

struct Tx(Log);

impl Transaction for Tx {
    fn commit(self) -> Result<(), CallbackError> {
        self.0.lock().unwrap().push(s("commit"));
        Ok(())
    }

    fn rollback(self) -> Result<(), CallbackError> {
        self.0.lock().unwrap().push(s("rollback"));
        Ok(())
    }
}

#[test]
fn transaction_encloses_all_callbacks() {
    let log: Log = Arc::default();
    let tx_log = Arc::clone(&log);
    let description = DescriptionBuilder::<String, ()>::new()
        .initial(s("a"))
        .before(recorder(&log, "before"))
        .after(recorder(&log, "after"))
        .around(transactional(move |_| {
            tx_log.lock().unwrap().push(s("begin"));
            Ok(Tx(Arc::clone(&tx_log)))
        }))
        .event(
            EventBuilder::new("go")
                .transition(TransitionBuilder::new().from(s("a")).to(s("b")))
                .unwrap(),
        )
        .unwrap()
        .build()
        .unwrap();
    let mut machine = initialize(description);

    machine.fire("go").unwrap();

    assert_eq!(
        *log.lock().unwrap(),
        vec!["begin", "before", "after", "commit"]
    );
}

#[test]
fn description_is_shared_across_threads() {
    let description = Arc::new(job_description());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let description = Arc::clone(&description);
            thread::spawn(move || {
                let mut machine: Machine<String, Job> = Machine::new(description);
                for _ in 0..=i {
                    machine.fire("toggle").unwrap();
                }
                machine.current_state().clone()
            })
        })
        .collect();

    let states: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(states, vec!["running", "sleeping", "running", "sleeping"]);
}

#[test]
fn rejection_errors_are_distinguishable_from_failures() {
    let mut machine = initialize(job_description());

    let err = machine.fire("stop").unwrap_err();

    assert!(err.is_rejection());
    assert!(matches!(err, FsmError::NoEligibleTransition { .. }));
}

#[test]
fn swallowed_failure_while_unwinding_rolls_back() {
    let seen: Log = Arc::default();
    let sink = Arc::clone(&seen);
    let description = DescriptionBuilder::<String, ()>::new()
        .initial(s("a"))
        .around(AroundHook::named("A", |ctx, next| {
            next.run(ctx)?;
            Err("A unwind failure".into())
        }))
        .around(AroundHook::named("B", move |ctx, next| {
            let result = next.run(ctx);
            sink.lock()
                .unwrap()
                .push(format!("{} in {}", result.is_err(), ctx.state()));
            Ok(())
        }))
        .event(
            EventBuilder::new("go")
                .transition(TransitionBuilder::new().from(s("a")).to(s("b")))
                .unwrap(),
        )
        .unwrap()
        .build()
        .unwrap();
    let mut machine = initialize(description);

    machine.fire("go").unwrap();

    assert_eq!(*seen.lock().unwrap(), vec!["true in a"]);
    assert_eq!(machine.current_state(), "a");
    assert!(machine.history().is_empty());
}
