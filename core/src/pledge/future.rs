use std::cell::RefCell;
use std::future::{Future, IntoFuture};
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context as TaskContext, Poll, Waker};

use super::Pledge;
use crate::value::{Function, Value};

/// Resolves to `Ok(value)` or `Err(reason)` once the pledge settles.
///
/// The future only makes progress while the pledge's scheduler is being
/// driven.
pub struct Settled {
    slot: Rc<RefCell<SettledSlot>>,
}

#[derive(Default)]
struct SettledSlot {
    outcome: Option<Result<Value, Value>>,
    waker: Option<Waker>,
}

impl Pledge {
    pub fn settled(&self) -> Settled {
        let slot = Rc::new(RefCell::new(SettledSlot::default()));
        self.done(
            completion(slot.clone(), Ok),
            completion(slot.clone(), Err),
        );
        Settled { slot }
    }
}

impl IntoFuture for Pledge {
    type Output = Result<Value, Value>;
    type IntoFuture = Settled;

    fn into_future(self) -> Settled {
        self.settled()
    }
}

fn completion(slot: Rc<RefCell<SettledSlot>>, wrap: fn(Value) -> Result<Value, Value>) -> Function {
    Function::new("settled", move |args| {
        let waker = {
            let mut slot = slot.borrow_mut();
            slot.outcome = Some(wrap(args.arg(0)));
            slot.waker.take()
        };
        if let Some(waker) = waker {
            waker.wake();
        }
        Ok(Value::Undefined)
    })
}

impl Future for Settled {
    type Output = Result<Value, Value>;

    fn poll(self: Pin<&mut Self>, cx: &mut TaskContext<'_>) -> Poll<Self::Output> {
        let mut slot = self.slot.borrow_mut();
        match slot.outcome.take() {
            Some(outcome) => Poll::Ready(outcome),
            None => {
                slot.waker = Some(cx.waker().clone());
                Poll::Pending
            }
        }
    }
}
