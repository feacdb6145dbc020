//! Deferred values that settle exactly once and chain asynchronously.
//!
//! A [`Pledge`] starts pending and is settled by `fulfill` or `reject`.
//! Handlers attached with [`Pledge::then`] run on a later turn of the
//! pledge's [`Scheduler`], in registration order, and their results are fed
//! through [`resolve`], which flattens thenables.

pub mod context;
pub mod engine;
pub mod errors;
pub mod event_loop;
pub mod pledge;
pub mod value;

pub use context::Context;
pub use engine::Engine;
pub use errors::PledgeError;
pub use event_loop::{EventLoop, Job, MicrotaskQueue, Scheduler, SchedulerHandle, TokioScheduler};
pub use pledge::{Deferred, Pledge, PledgeState, SELF_RESOLUTION_MESSAGE, Settled, resolve};
pub use value::{ErrorKind, ErrorObject, Function, FunctionArgs, Object, Property, Value};
