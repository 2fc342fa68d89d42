use shell_provider::TranscriptMessage;

use crate::store::SessionStore;

impl SessionStore {
    /// Flattens the history, oldest first, into alternating command/output messages.
    #[must_use]
    pub fn replay(&self) -> Vec<TranscriptMessage> {
        self.history
            .iter()
            .flat_map(|entry| {
                [
                    TranscriptMessage::Command {
                        text: entry.input.clone(),
                    },
                    TranscriptMessage::Output {
                        text: entry.output.clone(),
                    },
                ]
            })
            .collect()
    }
}
