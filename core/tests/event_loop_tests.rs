use std::cell::RefCell;
use std::rc::Rc;

use pledge::{
    Deferred, Engine, EventLoop, Function, Job, Object, Pledge, PledgeError, SchedulerHandle,
    TokioScheduler, Value,
};

/// A thenable that never settles: each `then` schedules a resolve with a
/// fresh thenable of the same kind.
fn endless(scheduler: SchedulerHandle) -> Value {
    let then_scheduler = scheduler.clone();
    let then = Function::new("then", move |args| {
        let resolve = args.arg(0);
        let next_scheduler = then_scheduler.clone();
        then_scheduler.enqueue(Box::new(move || {
            let _ = resolve.call(Value::Undefined, vec![endless(next_scheduler)]);
        }));
        Ok(Value::Undefined)
    });
    Value::Object(Object::new().with_property("then", then))
}

#[test]
fn step_limit_stops_endless_thenable_chains() {
    let mut ctx = Engine::new().with_max_steps(50).new_context();
    let pledge = ctx.resolved(endless(ctx.scheduler()));

    match ctx.block_on(&pledge) {
        Err(PledgeError::StepLimitExceeded { limit }) => assert_eq!(limit, 50),
        other => panic!("expected the step limit, got {other:?}"),
    }
    assert!(pledge.is_pending());
}

#[test]
fn block_on_reports_pledges_that_never_settle() {
    let mut ctx = Engine::new().new_context();
    let pledge = ctx.pending().then(Value::Undefined, Value::Undefined);

    assert!(matches!(ctx.block_on(&pledge), Err(PledgeError::Pending)));
}

#[test]
fn event_loop_counts_jobs_it_runs() {
    let mut event_loop = EventLoop::new();
    let pledge = Pledge::new(event_loop.scheduler());
    pledge.done(Function::new("noop", |_| Ok(Value::Undefined)), Value::Undefined);
    pledge.then(Value::Undefined, Value::Undefined);
    pledge.fulfill(Value::from(1));

    assert!(event_loop.has_microtasks());
    assert_eq!(event_loop.run_until_idle().expect("drain should succeed"), 1);
    assert!(!event_loop.has_microtasks());
}

#[test]
fn run_until_settled_leaves_unrelated_work_queued() {
    let mut event_loop = EventLoop::new();
    let scheduler = event_loop.scheduler();
    let target = Deferred::new(scheduler.clone());
    let chained = target.pledge.then(Value::Undefined, Value::Undefined);
    target.resolve(2);

    let other = Pledge::new(scheduler);
    other.then(Value::Undefined, Value::Undefined);
    other.fulfill(Value::from(3));

    event_loop
        .run_until_settled(&chained)
        .expect("drain should succeed");
    assert_eq!(chained.outcome(), Some(Value::from(2)));
    assert!(event_loop.has_microtasks());
}

#[test]
fn any_closure_can_schedule() {
    let jobs: Rc<RefCell<Vec<Job>>> = Rc::default();
    let sink = jobs.clone();
    let scheduler: SchedulerHandle = Rc::new(move |job: Job| sink.borrow_mut().push(job));

    let deferred = Deferred::new(scheduler);
    let doubled = deferred.pledge.then(
        Function::new("double", |args| Ok(Value::Number(args.arg(0).to_number() * 2.0))),
        Value::Undefined,
    );
    deferred.resolve(21);

    loop {
        let batch: Vec<Job> = jobs.borrow_mut().drain(..).collect();
        if batch.is_empty() {
            break;
        }
        for job in batch {
            job();
        }
    }
    assert_eq!(doubled.outcome(), Some(Value::from(42)));
}

#[test]
fn tokio_scheduler_drives_chains_on_a_local_set() {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime should build");
    let local = tokio::task::LocalSet::new();

    let outcome = local.block_on(&runtime, async {
        let scheduler: SchedulerHandle = Rc::new(TokioScheduler);
        let deferred = Deferred::new(scheduler);
        let chained = deferred.pledge.then(
            Function::new("double", |args| {
                Ok(Value::Number(args.arg(0).to_number() * 2.0))
            }),
            Value::Undefined,
        );
        deferred.resolve(21);
        chained.await
    });

    assert_eq!(outcome, Ok(Value::from(42)));
}

#[tokio::test(flavor = "current_thread")]
async fn settled_future_reports_rejections() {
    let local = tokio::task::LocalSet::new();
    let outcome = local
        .run_until(async {
            let scheduler: SchedulerHandle = Rc::new(TokioScheduler);
            let deferred = Deferred::new(scheduler);
            let settled = deferred.pledge.settled();
            deferred.reject("denied");
            settled.await
        })
        .await;

    assert_eq!(outcome, Err(Value::from("denied")));
}
