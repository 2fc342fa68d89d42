//! Minimal provider-agnostic contract for generating simulated shell output.
//!
//! This crate defines only the request/response shape shared between the
//! interaction driver, the session store replay, and concrete providers. It
//! excludes transport details and any notion of persistence.

use std::fmt;

/// Built-in system instructions sent with every generation request.
pub const DEFAULT_SHELL_INSTRUCTIONS: &str = "You are a bash shell simulator. You reply with standard output and standard error of the command provided. Do not use markdown blocks unless the command output itself contains them. Be concise and accurate. Do not explain your actions.";

/// Error returned while constructing/configuring a provider before any request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderInitError {
    message: String,
}

impl ProviderInitError {
    /// Creates a new provider initialization error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the underlying error message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ProviderInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ProviderInitError {}

impl From<String> for ProviderInitError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for ProviderInitError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

/// Provider-neutral transcript item replayed to the model, oldest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptMessage {
    /// A command the user typed into the simulated shell.
    Command { text: String },
    /// Simulated output previously produced for the preceding command.
    Output { text: String },
}

impl TranscriptMessage {
    /// Returns the message text regardless of role.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Command { text } | Self::Output { text } => text,
        }
    }

    #[must_use]
    pub fn is_command(&self) -> bool {
        matches!(self, Self::Command { .. })
    }
}

/// Input required for one generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    pub history: Vec<TranscriptMessage>,
    pub input: String,
    pub instructions: String,
}

impl GenerateRequest {
    /// Builds a request carrying the default shell-simulator instructions.
    #[must_use]
    pub fn new(history: Vec<TranscriptMessage>, input: impl Into<String>) -> Self {
        Self {
            history,
            input: input.into(),
            instructions: DEFAULT_SHELL_INSTRUCTIONS.to_string(),
        }
    }
}

/// Immutable metadata describing a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderProfile {
    pub provider_id: String,
    pub model_id: String,
}

/// Provider interface for turning a transcript plus a new command into output.
pub trait ShellProvider: Send + Sync + 'static {
    /// Returns provider/model identity metadata.
    fn profile(&self) -> ProviderProfile;

    /// Generates simulated shell output for `req.input`.
    ///
    /// Blocks until the provider has a complete answer. Errors are returned as
    /// display-ready text; the caller decides whether they are fatal.
    fn generate(&self, req: GenerateRequest) -> Result<String, String>;
}
