use std::io;
use std::process::ExitCode;

use bashsim::cli::Cli;
use bashsim::config::EnvConfig;
use bashsim::{app, logging};
use clap::Parser;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = EnvConfig::from_env();
    logging::init(config.log_filter.as_deref());

    let stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr();

    match app::run(&cli, &config, stdin, &mut stdout, &mut stderr) {
        Ok(outcome) => outcome.exit_code(),
        Err(error) => {
            eprintln!("{error:#}");
            ExitCode::FAILURE
        }
    }
}
