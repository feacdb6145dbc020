mod deferred;
mod future;
mod resolve;
mod state;

pub use deferred::Deferred;
pub use future::Settled;
pub use resolve::{SELF_RESOLUTION_MESSAGE, resolve};
pub use state::PledgeState;

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tracing::{debug, trace};

use crate::event_loop::SchedulerHandle;
use crate::value::{Function, Value};

/// A callback pair registered through [`Pledge::done`] while pending.
#[derive(Debug, Clone)]
pub struct PledgeReaction {
    pub on_fulfilled: Value,
    pub on_rejected: Value,
}

struct PledgeCell {
    state: PledgeState,
    reactions: Vec<PledgeReaction>,
}

/// A value that becomes available later, settling exactly once.
///
/// Clones are handles to the same pledge. Reactions never run inside the
/// call that registers them or settles the pledge; they are handed to the
/// pledge's scheduler instead.
#[derive(Clone)]
pub struct Pledge {
    cell: Rc<RefCell<PledgeCell>>,
    scheduler: SchedulerHandle,
}

impl Pledge {
    pub fn new(scheduler: SchedulerHandle) -> Self {
        Self {
            cell: Rc::new(RefCell::new(PledgeCell {
                state: PledgeState::Pending,
                reactions: Vec::new(),
            })),
            scheduler,
        }
    }

    pub fn state(&self) -> PledgeState {
        self.cell.borrow().state.clone()
    }

    pub fn is_pending(&self) -> bool {
        self.cell.borrow().state.is_pending()
    }

    pub fn outcome(&self) -> Option<Value> {
        self.cell.borrow().state.outcome().cloned()
    }

    pub fn scheduler(&self) -> &SchedulerHandle {
        &self.scheduler
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.cell, &other.cell)
    }

    pub fn fulfill(&self, value: Value) {
        self.settle(false, value);
    }

    pub fn reject(&self, reason: Value) {
        self.settle(true, reason);
    }

    fn settle(&self, is_reject: bool, value: Value) {
        let reactions = {
            let mut cell = self.cell.borrow_mut();
            if !cell.state.is_pending() {
                trace!(is_reject, "ignoring settlement of a settled pledge");
                return;
            }
            cell.state = if is_reject {
                PledgeState::Rejected(value.clone())
            } else {
                PledgeState::Fulfilled(value.clone())
            };
            std::mem::take(&mut cell.reactions)
        };

        trace!(is_reject, reactions = reactions.len(), "pledge settled");
        if reactions.is_empty() {
            return;
        }

        self.scheduler.enqueue(Box::new(move || {
            for reaction in reactions {
                let callback = if is_reject {
                    reaction.on_rejected
                } else {
                    reaction.on_fulfilled
                };
                invoke_callback(&callback, value.clone());
            }
        }));
    }

    /// Registers a callback pair without creating a downstream pledge.
    ///
    /// On a settled pledge the matching callback is scheduled, never run
    /// inline. Non-function callbacks are accepted and ignored.
    pub fn done(&self, on_fulfilled: impl Into<Value>, on_rejected: impl Into<Value>) {
        let on_fulfilled = on_fulfilled.into();
        let on_rejected = on_rejected.into();

        let (callback, value) = {
            let mut cell = self.cell.borrow_mut();
            match cell.state.clone() {
                PledgeState::Pending => {
                    cell.reactions.push(PledgeReaction {
                        on_fulfilled,
                        on_rejected,
                    });
                    return;
                }
                PledgeState::Fulfilled(value) => (on_fulfilled, value),
                PledgeState::Rejected(reason) => (on_rejected, reason),
            }
        };

        if callback.is_callable() {
            self.scheduler
                .enqueue(Box::new(move || invoke_callback(&callback, value)));
        }
    }

    /// Chains handlers and returns the pledge they resolve.
    pub fn then(&self, on_fulfilled: impl Into<Value>, on_rejected: impl Into<Value>) -> Pledge {
        let next = Pledge::new(self.scheduler.clone());
        let on_fulfilled = on_fulfilled.into();
        let on_rejected = on_rejected.into();

        let fulfilled_next = next.clone();
        let fulfilled = Function::new("onFulfilled", move |args| {
            run_handler(&on_fulfilled, &fulfilled_next, false, args.arg(0));
            Ok(Value::Undefined)
        });

        let rejected_next = next.clone();
        let rejected = Function::new("onRejected", move |args| {
            run_handler(&on_rejected, &rejected_next, true, args.arg(0));
            Ok(Value::Undefined)
        });

        self.done(fulfilled, rejected);
        next
    }

    pub fn catch(&self, on_rejected: impl Into<Value>) -> Pledge {
        self.then(Value::Undefined, on_rejected)
    }

    /// The `then` capability as seen by the resolution procedure.
    pub(crate) fn then_function(&self) -> Function {
        let pledge = self.clone();
        Function::new("then", move |args| {
            Ok(Value::Pledge(pledge.then(args.arg(0), args.arg(1))))
        })
    }
}

fn invoke_callback(callback: &Value, argument: Value) {
    if let Value::Function(function) = callback
        && let Err(err) = function.call(Value::Undefined, vec![argument])
    {
        debug!(error = %err, "discarding error raised by a settlement callback");
    }
}

fn run_handler(handler: &Value, next: &Pledge, is_reject: bool, value: Value) {
    match handler {
        Value::Function(function) => match function.call(Value::Undefined, vec![value]) {
            Ok(result) => resolve(next, result),
            Err(err) => next.reject(err.into_value()),
        },
        _ if is_reject => next.reject(value),
        _ => next.fulfill(value),
    }
}

impl fmt::Debug for Pledge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.cell.try_borrow() {
            Ok(cell) => write!(f, "Pledge(<{}>)", cell.state.label()),
            Err(_) => write!(f, "Pledge(<borrowed>)"),
        }
    }
}

impl fmt::Display for Pledge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.cell.try_borrow() {
            Ok(cell) => write!(f, "Pledge {{ <{}> }}", cell.state.label()),
            Err(_) => write!(f, "Pledge {{ <borrowed> }}"),
        }
    }
}
