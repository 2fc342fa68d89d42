//! bashsim: a bash shell simulated by a language model.
//!
//! Every command is answered by a [`shell_provider::ShellProvider`] that sees
//! the whole session transcript, so files "created" by earlier commands stay
//! visible to later ones. The transcript lives in a
//! [`session_store::SessionStore`] and survives across invocations.
//!
//! # Modules
//! - [`cli`] and [`config`]: flags and environment.
//! - [`driver`]: turn execution and the interactive loop.
//! - [`heredoc`]: line classification and heredoc accumulation.
//! - [`providers`]: provider selection.
//! - [`app`]: startup wiring used by the binary.

pub mod app;
pub mod cli;
pub mod config;
pub mod driver;
pub mod heredoc;
pub mod logging;
pub mod providers;

pub use crate::app::{run, RunOutcome};
pub use crate::driver::{Shell, Turn, TurnStatus};
