use std::cell::RefCell;
use std::rc::Rc;

use pledge::{
    Context, ErrorKind, Function, Object, Pledge, PledgeError, PledgeState, Value,
};

use super::{Outcome, Scenario, expect_fulfilled, expect_rejected, settle};

pub const SCENARIOS: &[Scenario] = &[
    Scenario {
        section: "2.3 resolution",
        name: "resolving with itself rejects with a type error",
        run: self_resolution,
    },
    Scenario {
        section: "2.3 resolution",
        name: "adopts a pledge that later fulfills",
        run: adopts_fulfillment,
    },
    Scenario {
        section: "2.3 resolution",
        name: "adopts a pending pledge that later rejects",
        run: adopts_rejection,
    },
    Scenario {
        section: "2.3 resolution",
        name: "first of both callbacks wins",
        run: both_callbacks,
    },
    Scenario {
        section: "2.3 resolution",
        name: "repeated resolve calls are ignored",
        run: resolve_twice,
    },
    Scenario {
        section: "2.3 resolution",
        name: "throw after resolving is ignored",
        run: throw_after_resolve,
    },
    Scenario {
        section: "2.3 resolution",
        name: "throwing then getter rejects",
        run: throwing_getter,
    },
    Scenario {
        section: "2.3 resolution",
        name: "non-function then fulfills with the object",
        run: non_function_then,
    },
    Scenario {
        section: "2.3 resolution",
        name: "nested thenables flatten",
        run: nested_thenables,
    },
];

fn thenable(then: Function) -> Value {
    Value::Object(Object::new().with_property("then", then))
}

fn self_resolution(ctx: &mut Context) -> Outcome {
    let slot: Rc<RefCell<Option<Pledge>>> = Rc::default();
    let reader = slot.clone();
    let next = ctx.resolved(1).then(
        ctx.function("cycle", move |_| {
            reader
                .borrow()
                .clone()
                .map(Value::Pledge)
                .ok_or_else(|| PledgeError::thrown("slot was never filled"))
        }),
        Value::Undefined,
    );
    *slot.borrow_mut() = Some(next.clone());

    match settle(ctx, &next)? {
        PledgeState::Rejected(Value::Error(error)) if error.kind() == ErrorKind::TypeError => {
            Ok(())
        }
        other => Err(format!("expected a type error rejection, got {other:?}")),
    }
}

fn adopts_fulfillment(ctx: &mut Context) -> Outcome {
    let inner = ctx.deferred();
    let outer = ctx.resolved(inner.pledge.clone());
    ctx.run_microtasks().map_err(|err| err.to_string())?;
    inner.resolve("V");
    expect_fulfilled(ctx, &outer, "V")
}

fn adopts_rejection(ctx: &mut Context) -> Outcome {
    let outer = ctx.deferred();
    let inner = ctx.deferred();
    outer.resolve(inner.pledge.clone());
    inner.reject("err");
    expect_rejected(ctx, &outer.pledge, "err")
}

fn both_callbacks(ctx: &mut Context) -> Outcome {
    let pledge = ctx.resolved(thenable(Function::new("then", |args| {
        args.arg(0).call(Value::Undefined, vec![Value::from("first")])?;
        args.arg(1).call(Value::Undefined, vec![Value::from("second")])
    })));
    expect_fulfilled(ctx, &pledge, "first")
}

fn resolve_twice(ctx: &mut Context) -> Outcome {
    let pledge = ctx.resolved(thenable(Function::new("then", |args| {
        let resolve = args.arg(0);
        resolve.call(Value::Undefined, vec![Value::from(1)])?;
        resolve.call(Value::Undefined, vec![Value::from(2)])
    })));
    expect_fulfilled(ctx, &pledge, 1)
}

fn throw_after_resolve(ctx: &mut Context) -> Outcome {
    let pledge = ctx.resolved(thenable(Function::new("then", |args| {
        args.arg(0).call(Value::Undefined, vec![Value::from("kept")])?;
        Err(PledgeError::thrown("ignored"))
    })));
    expect_fulfilled(ctx, &pledge, "kept")
}

fn throwing_getter(ctx: &mut Context) -> Outcome {
    let object = Object::new().with_getter(
        "then",
        Function::new("get then", |_| Err(PledgeError::thrown("getter"))),
    );
    let pledge = ctx.resolved(object);
    expect_rejected(ctx, &pledge, "getter")
}

fn non_function_then(ctx: &mut Context) -> Outcome {
    let object = Object::new().with_property("then", "not callable");
    let pledge = ctx.resolved(object.clone());
    expect_fulfilled(ctx, &pledge, object)
}

fn nested_thenables(ctx: &mut Context) -> Outcome {
    let inner = thenable(Function::new("then", |args| {
        args.arg(0).call(Value::Undefined, vec![Value::from("deep")])
    }));
    let outer = thenable(Function::new("then", move |args| {
        args.arg(0).call(Value::Undefined, vec![inner.clone()])
    }));
    let pledge = ctx.resolved(outer);
    expect_fulfilled(ctx, &pledge, "deep")
}
