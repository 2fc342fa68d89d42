//! Line classification for the interactive loop, including heredoc accumulation.
//!
//! This is delimiter detection only. The accumulated text goes to the model
//! verbatim; nothing here interprets the command.

pub const PROMPT: &str = "bashsim$ ";
pub const CONTINUATION_PROMPT: &str = "> ";

const EXIT_COMMAND: &str = "exit";

/// Returns the heredoc delimiter introduced by `line`, if any.
///
/// Recognizes `<< WORD`, `<<-WORD`, `<< "WORD"` and `<< 'WORD'`. A here-string
/// (`<<<`), a bare `<<`, or an empty quoted delimiter start nothing.
pub fn parse_heredoc_delimiter(line: &str) -> Option<&str> {
    let start = line.find("<<")?;
    let rest = &line[start + 2..];
    if rest.starts_with('<') {
        return None;
    }
    let rest = rest.strip_prefix('-').unwrap_or(rest).trim();

    for quote in ['"', '\''] {
        if let Some(quoted) = rest.strip_prefix(quote) {
            if let Some(end) = quoted.find(quote) {
                return Some(&quoted[..end]).filter(|delimiter| !delimiter.is_empty());
            }
        }
    }

    rest.split_whitespace().next()
}

/// What the loop should do with one line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineAction {
    /// Blank line outside a heredoc.
    Skip,
    /// `exit` outside a heredoc.
    Exit,
    /// The line was buffered into an open heredoc.
    Pending,
    /// A complete input ready for one turn.
    Submit(String),
}

/// Buffers heredoc bodies until the closing delimiter arrives.
#[derive(Debug, Default)]
pub struct InputAccumulator {
    delimiter: Option<String>,
    buffer: String,
}

impl InputAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prompt(&self) -> &'static str {
        if self.is_pending() {
            CONTINUATION_PROMPT
        } else {
            PROMPT
        }
    }

    pub fn is_pending(&self) -> bool {
        self.delimiter.is_some()
    }

    /// Classifies `line`, which must not carry its line terminator.
    pub fn push_line(&mut self, line: &str) -> LineAction {
        if let Some(delimiter) = &self.delimiter {
            let closes = line.trim() == delimiter;
            self.buffer.push_str(line);
            self.buffer.push('\n');
            if !closes {
                return LineAction::Pending;
            }
            self.delimiter = None;
            return LineAction::Submit(std::mem::take(&mut self.buffer));
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            return LineAction::Skip;
        }
        if trimmed == EXIT_COMMAND {
            return LineAction::Exit;
        }

        match parse_heredoc_delimiter(line) {
            Some(delimiter) => {
                self.delimiter = Some(delimiter.to_string());
                self.buffer.push_str(line);
                self.buffer.push('\n');
                LineAction::Pending
            }
            None => LineAction::Submit(line.to_string()),
        }
    }

    /// Drops an unterminated heredoc, returning what had been buffered.
    pub fn abandon(&mut self) -> Option<String> {
        self.delimiter.take()?;
        Some(std::mem::take(&mut self.buffer))
    }
}
