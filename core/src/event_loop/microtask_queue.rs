use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use super::{Job, Scheduler};

/// FIFO job queue drained manually by its owner.
///
/// Clones share the same queue, so a clone can be handed to pledges as
/// their scheduler while the owner keeps draining it.
#[derive(Clone, Default)]
pub struct MicrotaskQueue {
    queue: Rc<RefCell<VecDeque<Job>>>,
}

impl MicrotaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&self, job: Job) {
        self.queue.borrow_mut().push_back(job);
    }

    pub fn pop(&self) -> Option<Job> {
        self.queue.borrow_mut().pop_front()
    }

    pub fn len(&self) -> usize {
        self.queue.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }
}

impl Scheduler for MicrotaskQueue {
    fn enqueue(&self, job: Job) {
        MicrotaskQueue::enqueue(self, job);
    }
}
