use serde::{Deserialize, Serialize};

/// One simulated shell turn: the command as sent and the output as received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Entry {
    pub input: String,
    pub output: String,
}

impl Entry {
    #[must_use]
    pub fn new(input: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
        }
    }

    /// True when both fields are empty after trimming surrounding whitespace.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.input.trim().is_empty() && self.output.trim().is_empty()
    }
}
