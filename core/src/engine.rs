use serde::{Deserialize, Serialize};

use crate::context::Context;
use crate::errors::PledgeError;

/// Builder-style configuration for new contexts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Engine {
    max_steps: Option<usize>,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Caps how many microtasks a single drain may run.
    pub fn with_max_steps(mut self, max: usize) -> Self {
        self.max_steps = Some(max);
        self
    }

    pub fn max_steps(&self) -> Option<usize> {
        self.max_steps
    }

    pub fn from_json(source: &str) -> Result<Self, PledgeError> {
        serde_json::from_str(source).map_err(|err| PledgeError::Config {
            message: err.to_string(),
        })
    }

    pub fn new_context(&self) -> Context {
        Context::with_max_steps(self.max_steps)
    }
}
