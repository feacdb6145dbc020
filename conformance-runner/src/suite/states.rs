use pledge::{Context, Value};

use super::{Outcome, Scenario, ensure, expect_fulfilled, expect_rejected};

pub const SCENARIOS: &[Scenario] = &[
    Scenario {
        section: "2.1 states",
        name: "fulfilled pledge ignores a later reject",
        run: fulfilled_ignores_reject,
    },
    Scenario {
        section: "2.1 states",
        name: "rejected pledge ignores a later fulfill",
        run: rejected_ignores_fulfill,
    },
    Scenario {
        section: "2.1 states",
        name: "deferred resolve and reject race",
        run: deferred_race,
    },
    Scenario {
        section: "2.1 states",
        name: "pending pledge stays pending",
        run: pending_stays_pending,
    },
];

fn fulfilled_ignores_reject(ctx: &mut Context) -> Outcome {
    let deferred = ctx.deferred();
    deferred.resolve(1);
    deferred.reject("late");
    expect_fulfilled(ctx, &deferred.pledge, 1)
}

fn rejected_ignores_fulfill(ctx: &mut Context) -> Outcome {
    let deferred = ctx.deferred();
    deferred.reject("first");
    deferred.resolve(1);
    deferred.reject("second");
    expect_rejected(ctx, &deferred.pledge, "first")
}

fn deferred_race(ctx: &mut Context) -> Outcome {
    let deferred = ctx.deferred();
    let resolve = deferred.resolve.clone();
    let reject = deferred.reject.clone();
    ctx.resolved(Value::Undefined).then(
        ctx.function("resolveLater", move |_| {
            reject.call(Value::Undefined, vec![Value::from("lost")])?;
            resolve.call(Value::Undefined, vec![Value::from("won")])
        }),
        Value::Undefined,
    );
    expect_rejected(ctx, &deferred.pledge, "lost")
}

fn pending_stays_pending(ctx: &mut Context) -> Outcome {
    let pledge = ctx.pending();
    ctx.run_microtasks().map_err(|err| err.to_string())?;
    ensure(pledge.is_pending(), "a pledge nobody settles must stay pending")
}
