use std::cell::{Cell, RefCell};
use std::rc::Rc;

use pledge::{
    Context, ErrorKind, ErrorObject, Function, Object, PledgeError, PledgeState,
    SELF_RESOLUTION_MESSAGE, Value, resolve,
};

fn settle(ctx: &mut Context, pledge: &pledge::Pledge) -> PledgeState {
    ctx.run_microtasks().expect("drain should succeed");
    pledge.state()
}

fn thenable(then: Function) -> Value {
    Value::Object(Object::new().with_property("then", then))
}

#[test]
fn resolving_with_itself_rejects_with_type_error() {
    let mut ctx = Context::new();
    let pledge = ctx.pending();

    resolve(&pledge, Value::Pledge(pledge.clone()));

    match settle(&mut ctx, &pledge) {
        PledgeState::Rejected(Value::Error(error)) => {
            assert_eq!(error.kind(), ErrorKind::TypeError);
            assert_eq!(error.message(), SELF_RESOLUTION_MESSAGE);
        }
        other => panic!("expected a type error rejection, got {other:?}"),
    }
}

#[test]
fn handler_returning_its_own_pledge_rejects() {
    let mut ctx = Context::new();
    let slot: Rc<RefCell<Option<pledge::Pledge>>> = Rc::default();

    let reader = slot.clone();
    let next = ctx.resolved(1).then(
        Function::new("cycle", move |_| {
            Ok(Value::Pledge(reader.borrow().clone().expect("slot is filled")))
        }),
        Value::Undefined,
    );
    *slot.borrow_mut() = Some(next.clone());

    match settle(&mut ctx, &next) {
        PledgeState::Rejected(Value::Error(error)) => assert_eq!(error.kind(), ErrorKind::TypeError),
        other => panic!("expected a type error rejection, got {other:?}"),
    }
}

#[test]
fn pledge_chains_flatten_to_the_innermost_value() {
    let mut ctx = Context::new();
    let innermost = ctx.pending();
    let middle = ctx.resolved(innermost.clone());
    let outer = ctx.resolved(middle.clone());

    ctx.run_microtasks().expect("drain should succeed");
    assert!(outer.is_pending());

    innermost.fulfill(Value::from("V"));
    assert_eq!(ctx.block_on(&outer).expect("outer fulfills"), Value::from("V"));
    assert_eq!(middle.outcome(), Some(Value::from("V")));
}

#[test]
fn adopted_rejection_propagates() {
    let mut ctx = Context::new();
    let inner = ctx.pending();
    let outer = ctx.resolved(inner.clone());

    inner.reject(Value::from("err"));
    match settle(&mut ctx, &outer) {
        PledgeState::Rejected(reason) => assert_eq!(reason, Value::from("err")),
        other => panic!("expected rejection, got {other:?}"),
    }
}

#[test]
fn thenable_calling_both_callbacks_keeps_the_first() {
    let mut ctx = Context::new();
    let then = Function::new("then", |args| {
        args.arg(0).call(Value::Undefined, vec![Value::from("first")])?;
        args.arg(1).call(Value::Undefined, vec![Value::from("second")])?;
        Ok(Value::Undefined)
    });

    let pledge = ctx.resolved(thenable(then));
    assert_eq!(ctx.block_on(&pledge).expect("fulfilled"), Value::from("first"));
}

#[test]
fn thenable_calling_resolve_twice_keeps_the_first() {
    let mut ctx = Context::new();
    let then = Function::new("then", |args| {
        let resolve = args.arg(0);
        resolve.call(Value::Undefined, vec![Value::from(1)])?;
        resolve.call(Value::Undefined, vec![Value::from(2)])?;
        Ok(Value::Undefined)
    });

    let pledge = ctx.resolved(thenable(then));
    assert_eq!(ctx.block_on(&pledge).expect("fulfilled"), Value::from(1));
}

#[test]
fn thenable_rejecting_then_resolving_stays_rejected() {
    let mut ctx = Context::new();
    let then = Function::new("then", |args| {
        args.arg(1).call(Value::Undefined, vec![Value::from("no")])?;
        args.arg(0).call(Value::Undefined, vec![Value::from("yes")])?;
        Ok(Value::Undefined)
    });

    let pledge = ctx.resolved(thenable(then));
    match settle(&mut ctx, &pledge) {
        PledgeState::Rejected(reason) => assert_eq!(reason, Value::from("no")),
        other => panic!("expected rejection, got {other:?}"),
    }
}

#[test]
fn thenable_throwing_after_resolving_is_ignored() {
    let mut ctx = Context::new();
    let then = Function::new("then", |args| {
        args.arg(0).call(Value::Undefined, vec![Value::from("kept")])?;
        Err(PledgeError::thrown("too late"))
    });

    let pledge = ctx.resolved(thenable(then));
    assert_eq!(ctx.block_on(&pledge).expect("fulfilled"), Value::from("kept"));
}

#[test]
fn thenable_throwing_before_calling_back_rejects() {
    let mut ctx = Context::new();
    let error = ErrorObject::new("then failed");
    let thrown = error.clone();
    let then = Function::new("then", move |_| Err(PledgeError::thrown(thrown.clone())));

    let pledge = ctx.resolved(thenable(then));
    match settle(&mut ctx, &pledge) {
        PledgeState::Rejected(reason) => assert_eq!(reason, Value::Error(error)),
        other => panic!("expected rejection, got {other:?}"),
    }
}

#[test]
fn throwing_then_getter_rejects_with_the_thrown_value() {
    let mut ctx = Context::new();
    let getter_calls = Rc::new(Cell::new(0));
    let counter = getter_calls.clone();
    let object = Object::new().with_getter(
        "then",
        Function::new("get then", move |_| {
            counter.set(counter.get() + 1);
            Err(PledgeError::thrown("getter"))
        }),
    );

    let pledge = ctx.resolved(object);
    match settle(&mut ctx, &pledge) {
        PledgeState::Rejected(reason) => assert_eq!(reason, Value::from("getter")),
        other => panic!("expected rejection, got {other:?}"),
    }
    assert_eq!(getter_calls.get(), 1);
}

#[test]
fn non_callable_then_fulfills_with_the_object() {
    let mut ctx = Context::new();
    let object = Object::new().with_property("then", 5);

    let pledge = ctx.resolved(object.clone());
    assert_eq!(
        ctx.block_on(&pledge).expect("fulfilled"),
        Value::Object(object)
    );
}

#[test]
fn plain_objects_and_primitives_fulfill_directly() {
    let mut ctx = Context::new();
    let object = Object::new().with_property("value", 1);
    let error = ErrorObject::new("as a value");

    for value in [
        Value::Undefined,
        Value::Null,
        Value::from(true),
        Value::from("text"),
        Value::Object(object),
        Value::Error(error),
    ] {
        let pledge = ctx.resolved(value.clone());
        assert_eq!(ctx.block_on(&pledge).expect("fulfilled"), value);
    }
}

#[test]
fn then_is_called_with_the_thenable_as_this() {
    let mut ctx = Context::new();
    let seen_this = Rc::new(RefCell::new(Value::Undefined));
    let recorder = seen_this.clone();
    let then = Function::new("then", move |args| {
        *recorder.borrow_mut() = args.this().clone();
        args.arg(0).call(Value::Undefined, vec![Value::from(0)])
    });
    let value = thenable(then);

    let pledge = ctx.resolved(value.clone());
    ctx.block_on(&pledge).expect("fulfilled");
    assert_eq!(*seen_this.borrow(), value);
}

#[test]
fn functions_with_then_are_thenables() {
    let mut ctx = Context::new();
    let function = Function::new("target", |_| Ok(Value::Undefined));
    function.properties().set(
        "then",
        Function::new("then", |args| {
            args.arg(0).call(Value::Undefined, vec![Value::from("from function")])
        }),
    );

    let pledge = ctx.resolved(function);
    assert_eq!(
        ctx.block_on(&pledge).expect("fulfilled"),
        Value::from("from function")
    );
}

#[test]
fn thenables_resolving_to_thenables_are_unwrapped() {
    let mut ctx = Context::new();
    let inner = thenable(Function::new("then", |args| {
        args.arg(0).call(Value::Undefined, vec![Value::from("deep")])
    }));
    let outer = thenable(Function::new("then", move |args| {
        args.arg(0).call(Value::Undefined, vec![inner.clone()])
    }));

    let pledge = ctx.resolved(outer);
    assert_eq!(ctx.block_on(&pledge).expect("fulfilled"), Value::from("deep"));
}

#[test]
fn thenable_may_call_back_later() {
    let mut ctx = Context::new();
    let stored: Rc<RefCell<Option<Value>>> = Rc::default();
    let store = stored.clone();
    let then = Function::new("then", move |args| {
        *store.borrow_mut() = Some(args.arg(0));
        Ok(Value::Undefined)
    });

    let pledge = ctx.resolved(thenable(then));
    ctx.run_microtasks().expect("drain should succeed");
    assert!(pledge.is_pending());

    let resolve_later = stored.borrow().clone().expect("then stored its callback");
    resolve_later
        .call(Value::Undefined, vec![Value::from("later")])
        .expect("callbacks never fail");
    resolve_later
        .call(Value::Undefined, vec![Value::from("ignored")])
        .expect("callbacks never fail");
    assert_eq!(ctx.block_on(&pledge).expect("fulfilled"), Value::from("later"));
}
