//! Command-line surface.

use clap::Parser;

/// A bash shell simulated by a language model.
///
/// Without `-c` the simulator reads commands interactively. Session history
/// lives in `$BASHSIM_SESSION` and is replayed to the model on every command.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "bashsim", version, about)]
pub struct Cli {
    /// Run COMMAND once and exit instead of starting the interactive shell.
    #[arg(short = 'c', value_name = "COMMAND")]
    pub command: Option<String>,

    /// Positional parameters for COMMAND; the first one becomes `$0`.
    /// Ignored in interactive mode.
    #[arg(value_name = "ARGS", trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

impl Cli {
    /// The one-shot command, if `-c` was given a non-empty value.
    pub fn one_shot(&self) -> Option<&str> {
        self.command.as_deref().filter(|command| !command.is_empty())
    }
}
