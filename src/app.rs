//! Startup wiring: session, provider, then one-shot or interactive mode.

use std::io::{BufRead, Write};
use std::process::ExitCode;

use anyhow::{anyhow, Context};
use session_store::SessionStore;
use tracing::debug;

use crate::cli::Cli;
use crate::config::EnvConfig;
use crate::driver::{Shell, TurnStatus};
use crate::providers::provider_from_config;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Success,
    CommandFailed,
}

impl RunOutcome {
    pub fn exit_code(self) -> ExitCode {
        match self {
            Self::Success => ExitCode::SUCCESS,
            Self::CommandFailed => ExitCode::FAILURE,
        }
    }
}

/// Runs the simulator against the given streams.
///
/// Startup failures come back as `Err`. A failed one-shot generation has
/// already been reported on `stderr` and yields [`RunOutcome::CommandFailed`].
pub fn run<R: BufRead, W: Write, E: Write>(
    cli: &Cli,
    config: &EnvConfig,
    stdin: R,
    stdout: &mut W,
    stderr: &mut E,
) -> anyhow::Result<RunOutcome> {
    let session_path = config.session_path();
    let session = SessionStore::open(&session_path).context("Error initializing session")?;
    debug!(
        path = %session_path.display(),
        entries = session.len(),
        "session loaded"
    );

    let provider = provider_from_config(config).map_err(|error| {
        anyhow!("Error initializing LLM client: {error}\nPlease ensure GEMINI_API_KEY is set.")
    })?;
    let profile = provider.profile();
    debug!(provider = %profile.provider_id, model = %profile.model_id, "provider ready");

    let mut shell = Shell::new(session, provider);

    let outcome = match cli.one_shot() {
        Some(command) => match shell.run_command(command, &cli.args, stdout, stderr)? {
            TurnStatus::Completed => RunOutcome::Success,
            TurnStatus::GenerationFailed => RunOutcome::CommandFailed,
        },
        None => {
            if !cli.args.is_empty() {
                debug!(ignored = cli.args.len(), "positional arguments without -c are ignored");
            }
            shell.run_repl(stdin, stdout, stderr)?;
            RunOutcome::Success
        }
    };

    debug!(
        path = %shell.session().path().display(),
        entries = shell.session().len(),
        "session closed"
    );
    Ok(outcome)
}
