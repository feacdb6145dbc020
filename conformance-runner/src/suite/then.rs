use std::cell::RefCell;
use std::rc::Rc;

use pledge::{Context, ErrorObject, PledgeError, Value};

use super::{Outcome, Scenario, ensure, expect_fulfilled, expect_rejected};

pub const SCENARIOS: &[Scenario] = &[
    Scenario {
        section: "2.2 then",
        name: "onFulfilled receives the value",
        run: on_fulfilled_receives_value,
    },
    Scenario {
        section: "2.2 then",
        name: "onRejected receives the reason",
        run: on_rejected_receives_reason,
    },
    Scenario {
        section: "2.2 then",
        name: "handlers never run before then returns",
        run: handlers_are_asynchronous,
    },
    Scenario {
        section: "2.2 then",
        name: "handlers run once in registration order",
        run: handlers_run_in_order,
    },
    Scenario {
        section: "2.2 then",
        name: "non-function handlers pass fulfillment through",
        run: fulfillment_passes_through,
    },
    Scenario {
        section: "2.2 then",
        name: "non-function handlers pass rejection through",
        run: rejection_passes_through,
    },
    Scenario {
        section: "2.2 then",
        name: "thrown errors reject the returned pledge",
        run: thrown_error_rejects,
    },
    Scenario {
        section: "2.2 then",
        name: "catch recovers into the returned pledge",
        run: catch_recovers,
    },
];

fn on_fulfilled_receives_value(ctx: &mut Context) -> Outcome {
    let add_one = ctx.function("addOne", |args| {
        Ok(Value::Number(args.arg(0).to_number() + 1.0))
    });
    let pledge = ctx.resolved(5).then(add_one, Value::Undefined);
    expect_fulfilled(ctx, &pledge, 6)
}

fn on_rejected_receives_reason(ctx: &mut Context) -> Outcome {
    let length = ctx.function("length", |args| args.arg(0).get("length"));
    let pledge = ctx.rejected("boom").then(Value::Null, length);
    expect_fulfilled(ctx, &pledge, 4)
}

fn handlers_are_asynchronous(ctx: &mut Context) -> Outcome {
    let ran = Rc::new(RefCell::new(false));
    let flag = ran.clone();
    let deferred = ctx.deferred();
    deferred.pledge.then(
        ctx.function("mark", move |_| {
            *flag.borrow_mut() = true;
            Ok(Value::Undefined)
        }),
        Value::Undefined,
    );
    deferred.resolve("now");
    ensure(!*ran.borrow(), "handler ran inside resolve")?;
    ctx.run_microtasks().map_err(|err| err.to_string())?;
    ensure(*ran.borrow(), "handler never ran")
}

fn handlers_run_in_order(ctx: &mut Context) -> Outcome {
    let log = Rc::new(RefCell::new(Vec::new()));
    let deferred = ctx.deferred();
    for label in ["r1", "r2", "r3"] {
        let log = log.clone();
        deferred.pledge.then(
            ctx.function(label, move |_| {
                log.borrow_mut().push(label);
                Ok(Value::Undefined)
            }),
            Value::Undefined,
        );
    }
    deferred.resolve(Value::Undefined);
    deferred.resolve(Value::Undefined);
    ctx.run_microtasks().map_err(|err| err.to_string())?;
    let log = log.borrow();
    ensure(
        *log == ["r1", "r2", "r3"],
        format!("handlers ran as {log:?}"),
    )
}

fn fulfillment_passes_through(ctx: &mut Context) -> Outcome {
    let pledge = ctx
        .resolved("same")
        .then(Value::Undefined, Value::Undefined)
        .then(Value::from(3), Value::Null);
    expect_fulfilled(ctx, &pledge, "same")
}

fn rejection_passes_through(ctx: &mut Context) -> Outcome {
    let pledge = ctx
        .rejected("reason")
        .then(Value::Undefined, Value::Undefined)
        .then(Value::Null, Value::from(false));
    expect_rejected(ctx, &pledge, "reason")
}

fn thrown_error_rejects(ctx: &mut Context) -> Outcome {
    let error = ErrorObject::new("x");
    let thrown = error.clone();
    let pledge = ctx.resolved(1).then(
        ctx.function("fail", move |_| Err(PledgeError::thrown(thrown.clone()))),
        Value::Undefined,
    );
    expect_rejected(ctx, &pledge, error)
}

fn catch_recovers(ctx: &mut Context) -> Outcome {
    let recover = ctx.function("recover", |_| Ok(Value::from("recovered")));
    let pledge = ctx
        .rejected("oops")
        .catch(recover)
        .then(Value::Undefined, Value::Undefined);
    expect_fulfilled(ctx, &pledge, "recovered")
}
