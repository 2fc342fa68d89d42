//! Deterministic mock implementation of the shared `shell_provider` contract.
//!
//! This crate contains no transport logic. It answers a handful of common
//! commands locally, can be scripted with exact responses, and records every
//! request it receives so tests can assert on replayed history.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use shell_provider::{GenerateRequest, ProviderProfile, ShellProvider};
use tracing::debug;

/// Stable provider identifier used for explicit startup selection.
pub const MOCK_PROVIDER_ID: &str = "mock";

const DEFAULT_MODEL_ID: &str = "mock-shell";
const MOCK_HOME: &str = "/home/user";
const MOCK_USER: &str = "user";

/// Deterministic mock provider used by driver tests and offline runs.
#[derive(Debug)]
pub struct MockProvider {
    model_id: String,
    script: Mutex<VecDeque<Result<String, String>>>,
    requests: Mutex<Vec<GenerateRequest>>,
}

impl MockProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::scripted(Vec::new())
    }

    /// Creates a provider that answers with `responses` in order, then falls
    /// back to the built-in command simulation once the script runs out.
    #[must_use]
    pub fn scripted(responses: Vec<Result<String, String>>) -> Self {
        Self {
            model_id: DEFAULT_MODEL_ID.to_string(),
            script: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn with_model_id(mut self, model_id: impl Into<String>) -> Self {
        let model_id = model_id.into();
        if !model_id.trim().is_empty() {
            self.model_id = model_id.trim().to_string();
        }
        self
    }

    /// Returns every request received so far, in arrival order.
    #[must_use]
    pub fn requests(&self) -> Vec<GenerateRequest> {
        lock_unpoisoned(&self.requests).clone()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ShellProvider for MockProvider {
    fn profile(&self) -> ProviderProfile {
        ProviderProfile {
            provider_id: MOCK_PROVIDER_ID.to_string(),
            model_id: self.model_id.clone(),
        }
    }

    fn generate(&self, req: GenerateRequest) -> Result<String, String> {
        debug!(
            history = req.history.len(),
            input_len = req.input.len(),
            "mock provider received request"
        );
        let scripted = lock_unpoisoned(&self.script).pop_front();
        let response = match scripted {
            Some(response) => response,
            None => Ok(simulate(&req.input)),
        };
        lock_unpoisoned(&self.requests).push(req);
        response
    }
}

fn simulate(input: &str) -> String {
    let line = input.lines().next().unwrap_or_default().trim();
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    match command {
        "" => String::new(),
        "echo" => format!("{rest}\n"),
        "pwd" => format!("{MOCK_HOME}\n"),
        "whoami" => format!("{MOCK_USER}\n"),
        "true" | "cd" | "export" => String::new(),
        unknown => format!("bash: {unknown}: command not found\n"),
    }
}

fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
