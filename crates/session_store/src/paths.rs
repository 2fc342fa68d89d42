use std::path::PathBuf;

/// Backing file used when no session path is configured.
pub const DEFAULT_SESSION_PATH: &str = "/tmp/bashsim.session.default";

#[must_use]
pub fn default_session_path() -> PathBuf {
    PathBuf::from(DEFAULT_SESSION_PATH)
}

/// Returns `configured` when it holds a non-blank path, else the default.
#[must_use]
pub fn resolve_session_path(configured: Option<&str>) -> PathBuf {
    match configured {
        Some(value) if !value.trim().is_empty() => PathBuf::from(value),
        _ => default_session_path(),
    }
}
