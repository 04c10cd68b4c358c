//! Orchestration
//!
//! Executes a [`Crew`] and returns one combined text. The pipeline runner
//! only sees the [`Orchestrator`] trait, so the engine can be swapped (or
//! stubbed in tests) without touching the rest of the application.

pub mod sequential;

pub use sequential::SequentialOrchestrator;

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::agents::Crew;
use crate::credentials::Credentials;
use crate::types::AppResult;

/// Per-call options
#[derive(Debug, Clone, Default)]
pub struct ExecuteOptions {
    /// Log every step at info level instead of debug
    pub verbose: bool,
    /// Named inputs for the run, e.g. `topic`
    pub inputs: BTreeMap<String, String>,
}

impl ExecuteOptions {
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            inputs: BTreeMap::new(),
        }
    }

    pub fn with_input(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.inputs.insert(key.into(), value.into());
        self
    }
}

#[async_trait]
pub trait Orchestrator: Send + Sync {
    /// Run every task in order and return the combined output. One call, no
    /// retries; any upstream failure ends the run.
    async fn execute(
        &self,
        crew: &Crew,
        options: &ExecuteOptions,
        credentials: &Credentials,
    ) -> AppResult<String>;
}
