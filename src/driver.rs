//! Turn execution and the interactive loop.
//!
//! A turn replays the whole session to the provider, prints the answer, then
//! appends `(input, output)` to the session. Generation failures leave the
//! session untouched; persistence failures only warn.

use std::fmt::Write as _;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

use session_store::{AppendOutcome, SessionStore};
use shell_provider::{GenerateRequest, ShellProvider};
use tracing::{debug, warn};

use crate::heredoc::{InputAccumulator, LineAction};

/// One unit of work. The model may see more context than what gets recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub model_input: String,
    pub stored_input: String,
}

impl Turn {
    pub fn new(input: impl Into<String>) -> Self {
        let input = input.into();
        Self {
            model_input: input.clone(),
            stored_input: input,
        }
    }

    /// Prefixes `command` with a listing of `$0`, `$1`, ... for the model only.
    pub fn with_positional_args(command: &str, args: &[String]) -> Self {
        if args.is_empty() {
            return Self::new(command);
        }

        let mut model_input =
            String::from("Context: The following positional parameters are set:\n");
        for (index, arg) in args.iter().enumerate() {
            let _ = writeln!(model_input, "${index}={arg}");
        }
        model_input.push_str("Command to execute:\n");
        model_input.push_str(command);

        Self {
            model_input,
            stored_input: command.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnStatus {
    Completed,
    GenerationFailed,
}

pub struct Shell {
    session: SessionStore,
    provider: Arc<dyn ShellProvider>,
}

impl Shell {
    pub fn new(session: SessionStore, provider: Arc<dyn ShellProvider>) -> Self {
        Self { session, provider }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Runs one turn. `Err` is reserved for failures writing to `out` or `err`.
    ///
    /// A generated answer is recorded even when printing it fails.
    pub fn run_turn<W: Write, E: Write>(
        &mut self,
        turn: &Turn,
        out: &mut W,
        err: &mut E,
    ) -> io::Result<TurnStatus> {
        let request = GenerateRequest::new(self.session.replay(), turn.model_input.clone());
        debug!(
            history = self.session.len(),
            provider = %self.provider.profile().provider_id,
            "generating response"
        );

        let output = match self.provider.generate(request) {
            Ok(output) => output,
            Err(error) => {
                debug!(%error, "generation failed");
                writeln!(err, "Error generating response: {error}")?;
                err.flush()?;
                return Ok(TurnStatus::GenerationFailed);
            }
        };

        let printed = print_output(out, &output);
        if let Err(error) = &printed {
            debug!(%error, "failed to print response");
        }

        match self.session.append(turn.stored_input.as_str(), output) {
            Ok(AppendOutcome::Persisted { record }) => {
                debug!(record, "session updated");
            }
            Ok(AppendOutcome::Skipped) => {
                debug!("blank turn not recorded");
            }
            Err(error) => {
                debug!(kind = ?error.kind(), %error, "session append failed");
                writeln!(err, "Warning: failed to save session: {error}")?;
                err.flush()?;
            }
        }

        printed.map(|()| TurnStatus::Completed)
    }

    /// Runs `command` once with optional positional parameters.
    pub fn run_command<W: Write, E: Write>(
        &mut self,
        command: &str,
        args: &[String],
        out: &mut W,
        err: &mut E,
    ) -> io::Result<TurnStatus> {
        self.run_turn(&Turn::with_positional_args(command, args), out, err)
    }

    /// Reads commands from `input` until `exit` or end of input.
    pub fn run_repl<R: BufRead, W: Write, E: Write>(
        &mut self,
        mut input: R,
        out: &mut W,
        err: &mut E,
    ) -> io::Result<()> {
        let mut accumulator = InputAccumulator::new();
        let mut raw = Vec::new();

        loop {
            out.write_all(accumulator.prompt().as_bytes())?;
            out.flush()?;

            raw.clear();
            if input.read_until(b'\n', &mut raw)? == 0 {
                if let Some(partial) = accumulator.abandon() {
                    warn!(bytes = partial.len(), "discarding unterminated heredoc");
                }
                out.write_all(b"exit\n")?;
                out.flush()?;
                return Ok(());
            }

            let line = String::from_utf8_lossy(&raw);
            let line = line.strip_suffix('\n').unwrap_or(&line);
            let line = line.strip_suffix('\r').unwrap_or(line);

            match accumulator.push_line(line) {
                LineAction::Skip | LineAction::Pending => {}
                LineAction::Exit => return Ok(()),
                LineAction::Submit(text) => {
                    self.run_turn(&Turn::new(text), out, err)?;
                }
            }
        }
    }
}

fn print_output<W: Write>(out: &mut W, output: &str) -> io::Result<()> {
    out.write_all(output.as_bytes())?;
    if !output.is_empty() && !output.ends_with('\n') {
        out.write_all(b"\n")?;
    }
    out.flush()
}
