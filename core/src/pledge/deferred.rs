use super::{Pledge, resolve};
use crate::event_loop::SchedulerHandle;
use crate::value::{Function, Value};

/// A pending pledge together with the functions that settle it.
///
/// `resolve` runs the resolution procedure, so it adopts thenables;
/// `reject` rejects with its argument as-is.
#[derive(Debug, Clone)]
pub struct Deferred {
    pub pledge: Pledge,
    pub resolve: Function,
    pub reject: Function,
}

impl Deferred {
    pub fn new(scheduler: SchedulerHandle) -> Self {
        let pledge = Pledge::new(scheduler);

        let target = pledge.clone();
        let resolve_fn = Function::new("resolve", move |args| {
            resolve(&target, args.arg(0));
            Ok(Value::Undefined)
        });

        let target = pledge.clone();
        let reject_fn = Function::new("reject", move |args| {
            target.reject(args.arg(0));
            Ok(Value::Undefined)
        });

        Self {
            pledge,
            resolve: resolve_fn,
            reject: reject_fn,
        }
    }

    pub fn resolve(&self, value: impl Into<Value>) {
        resolve(&self.pledge, value.into());
    }

    pub fn reject(&self, reason: impl Into<Value>) {
        self.pledge.reject(reason.into());
    }
}
