use miette::Diagnostic;
use thiserror::Error;

use crate::value::{ErrorObject, Value};

#[derive(Debug, Clone, Error, Diagnostic)]
pub enum PledgeError {
    /// A value raised by a handler, accessor or `then` capability.
    #[error("uncaught {value}")]
    Thrown { value: Value },

    #[error("type error: {message}")]
    TypeError { message: String },

    #[error("event loop exceeded {limit} steps")]
    #[diagnostic(help("a thenable chain may never settle; raise `max_steps` if this is expected"))]
    StepLimitExceeded { limit: usize },

    #[error("pledge is still pending after the event loop went idle")]
    Pending,

    #[error("invalid engine configuration: {message}")]
    Config { message: String },
}

impl PledgeError {
    pub fn thrown(value: impl Into<Value>) -> Self {
        Self::Thrown {
            value: value.into(),
        }
    }

    /// Converts the error into the reason a pledge is rejected with.
    pub fn into_value(self) -> Value {
        match self {
            PledgeError::Thrown { value } => value,
            PledgeError::TypeError { message } => Value::Error(ErrorObject::type_error(message)),
            other => Value::Error(ErrorObject::new(other.to_string())),
        }
    }
}
