mod microtask_queue;
mod tokio_scheduler;

use std::rc::Rc;

use tracing::trace;

use crate::errors::PledgeError;
use crate::pledge::Pledge;

pub use microtask_queue::MicrotaskQueue;
pub use tokio_scheduler::TokioScheduler;

pub type Job = Box<dyn FnOnce()>;

/// The "run this on a later turn" capability pledges depend on.
pub trait Scheduler {
    fn enqueue(&self, job: Job);
}

impl<F> Scheduler for F
where
    F: Fn(Job),
{
    fn enqueue(&self, job: Job) {
        self(job)
    }
}

pub type SchedulerHandle = Rc<dyn Scheduler>;

/// A manually driven microtask loop.
pub struct EventLoop {
    microtasks: MicrotaskQueue,
    max_steps: Option<usize>,
}

impl EventLoop {
    pub fn new() -> Self {
        Self::with_max_steps(None)
    }

    pub fn with_max_steps(max_steps: Option<usize>) -> Self {
        Self {
            microtasks: MicrotaskQueue::new(),
            max_steps,
        }
    }

    pub fn scheduler(&self) -> SchedulerHandle {
        Rc::new(self.microtasks.clone())
    }

    pub fn has_microtasks(&self) -> bool {
        !self.microtasks.is_empty()
    }

    /// Runs jobs until the queue is empty and returns how many ran.
    pub fn run_until_idle(&mut self) -> Result<usize, PledgeError> {
        self.drain(|| false)
    }

    /// Runs jobs until `pledge` settles or the queue empties.
    pub fn run_until_settled(&mut self, pledge: &Pledge) -> Result<usize, PledgeError> {
        self.drain(|| !pledge.is_pending())
    }

    fn drain(&mut self, mut done: impl FnMut() -> bool) -> Result<usize, PledgeError> {
        let mut steps = 0;
        while !done() && self.has_microtasks() {
            if let Some(limit) = self.max_steps
                && steps >= limit
            {
                return Err(PledgeError::StepLimitExceeded { limit });
            }
            if let Some(job) = self.microtasks.pop() {
                job();
                steps += 1;
            }
        }
        trace!(steps, "microtasks drained");
        Ok(steps)
    }
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}
