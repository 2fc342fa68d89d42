//! Diagnostic logging to stderr.
//!
//! Simulated output owns stdout, so diagnostics never go there. The filter
//! comes from `BASHSIM_LOG` and defaults to warnings only.

use tracing_subscriber::EnvFilter;

pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Returns the filter directive to install, falling back to [`DEFAULT_LOG_FILTER`].
pub fn filter_directive(configured: Option<&str>) -> &str {
    configured
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(DEFAULT_LOG_FILTER)
}

/// Installs the global subscriber. An unparsable directive falls back to the default.
///
/// Calling this more than once is harmless; later calls leave the first
/// subscriber in place.
pub fn init(configured: Option<&str>) {
    let directive = filter_directive(configured);
    let (filter, rejected) = match EnvFilter::try_new(directive) {
        Ok(filter) => (filter, None),
        Err(error) => (EnvFilter::new(DEFAULT_LOG_FILTER), Some(error)),
    };

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .is_ok();

    if installed {
        if let Some(error) = rejected {
            tracing::warn!(directive, %error, "ignoring invalid log filter");
        }
    }
}
