use crate::errors::PledgeError;
use crate::event_loop::{EventLoop, SchedulerHandle};
use crate::pledge::{Deferred, Pledge, PledgeState, resolve};
use crate::value::{Function, FunctionArgs, Value};

/// Owns an event loop and creates pledges scheduled on it.
pub struct Context {
    event_loop: EventLoop,
    scheduler: SchedulerHandle,
}

impl Context {
    pub fn new() -> Self {
        Self::with_max_steps(None)
    }

    pub(crate) fn with_max_steps(max_steps: Option<usize>) -> Self {
        let event_loop = EventLoop::with_max_steps(max_steps);
        let scheduler = event_loop.scheduler();
        Self {
            event_loop,
            scheduler,
        }
    }

    pub fn scheduler(&self) -> SchedulerHandle {
        self.scheduler.clone()
    }

    pub fn pending(&self) -> Pledge {
        Pledge::new(self.scheduler())
    }

    /// A pledge resolved with `value`; thenables are adopted.
    pub fn resolved(&self, value: impl Into<Value>) -> Pledge {
        let pledge = self.pending();
        resolve(&pledge, value.into());
        pledge
    }

    pub fn rejected(&self, reason: impl Into<Value>) -> Pledge {
        let pledge = self.pending();
        pledge.reject(reason.into());
        pledge
    }

    pub fn deferred(&self) -> Deferred {
        Deferred::new(self.scheduler())
    }

    pub fn function<F>(&self, name: impl Into<String>, callback: F) -> Value
    where
        F: Fn(FunctionArgs) -> Result<Value, PledgeError> + 'static,
    {
        Value::Function(Function::new(name, callback))
    }

    pub fn has_microtasks(&self) -> bool {
        self.event_loop.has_microtasks()
    }

    pub fn run_microtasks(&mut self) -> Result<usize, PledgeError> {
        self.event_loop.run_until_idle()
    }

    /// Drives the loop until `pledge` settles; a rejection comes back as
    /// [`PledgeError::Thrown`].
    pub fn block_on(&mut self, pledge: &Pledge) -> Result<Value, PledgeError> {
        self.event_loop.run_until_settled(pledge)?;
        match pledge.state() {
            PledgeState::Fulfilled(value) => Ok(value),
            PledgeState::Rejected(reason) => Err(PledgeError::Thrown { value: reason }),
            PledgeState::Pending => Err(PledgeError::Pending),
        }
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}
