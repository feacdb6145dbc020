use super::{Job, Scheduler};

/// Runs jobs as tasks on the current tokio `LocalSet`.
///
/// Enqueueing outside a `LocalSet` context panics, as `spawn_local` does.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioScheduler;

impl Scheduler for TokioScheduler {
    fn enqueue(&self, job: Job) {
        tokio::task::spawn_local(async move { job() });
    }
}
