use std::cell::Cell;
use std::rc::Rc;

use tracing::{debug, trace};

use super::Pledge;
use crate::value::{ErrorObject, Function, Value};

pub const SELF_RESOLUTION_MESSAGE: &str = "a pledge cannot resolve to itself";

/// Settles `pledge` with `x`, adopting the state of `x` when it is a
/// thenable.
///
/// Only the first of the resolve callback, the reject callback, or an error
/// from the `then` call has any effect for a given `x`.
pub fn resolve(pledge: &Pledge, x: Value) {
    if let Value::Pledge(candidate) = &x
        && candidate.ptr_eq(pledge)
    {
        debug!("rejecting pledge resolved with itself");
        pledge.reject(Value::Error(ErrorObject::type_error(SELF_RESOLUTION_MESSAGE)));
        return;
    }

    if !x.is_object_like() {
        pledge.fulfill(x);
        return;
    }

    let then = match x.get("then") {
        Ok(then) => then,
        Err(err) => {
            trace!(error = %err, "reading `then` failed");
            pledge.reject(err.into_value());
            return;
        }
    };

    let Value::Function(then) = then else {
        pledge.fulfill(x);
        return;
    };

    trace!(then = then.name(), "adopting thenable");
    let called = Rc::new(Cell::new(false));

    let resolve_pledge = {
        let pledge = pledge.clone();
        let called = called.clone();
        Function::new("resolvePledge", move |args| {
            if !called.replace(true) {
                resolve(&pledge, args.arg(0));
            }
            Ok(Value::Undefined)
        })
    };

    let reject_pledge = {
        let pledge = pledge.clone();
        let called = called.clone();
        Function::new("rejectPledge", move |args| {
            if !called.replace(true) {
                pledge.reject(args.arg(0));
            }
            Ok(Value::Undefined)
        })
    };

    if let Err(err) = then.call(x, vec![resolve_pledge.into(), reject_pledge.into()])
        && !called.replace(true)
    {
        pledge.reject(err.into_value());
    }
}
