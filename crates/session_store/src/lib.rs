//! File-backed, append-only history of simulated shell turns.
//!
//! A session file is a concatenation of JSON objects, one per [`Entry`], with
//! no enclosing array. The writer terminates every record with a newline, so
//! files are also valid JSON Lines, but the reader accepts any whitespace (or
//! none) between records.

mod error;
mod paths;
mod replay;
mod schema;
mod store;

pub use error::{ErrorKind, SessionStoreError};
pub use paths::{default_session_path, resolve_session_path, DEFAULT_SESSION_PATH};
pub use schema::Entry;
pub use store::{AppendOutcome, SessionStore};
