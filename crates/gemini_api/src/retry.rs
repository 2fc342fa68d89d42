//! Retry classification and backoff for `generateContent` calls.

use std::sync::OnceLock;
use std::time::Duration;

use regex::Regex;

/// Retries after the first attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 3;
/// Wait before the first retry.
pub const DEFAULT_RETRY_BASE_DELAY: Duration = Duration::from_secs(1);
/// Upper bound on a single backoff wait.
pub const MAX_RETRY_DELAY: Duration = Duration::from_secs(30);

/// Google RPC codes and phrases that mark a failure as temporary.
fn transient_body_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)\b(resource_exhausted|unavailable|deadline_exceeded|internal)\b|overloaded|try again later")
            .expect("transient body pattern is valid")
    })
}

/// Rate limiting and temporary server-side statuses.
pub fn is_transient_status(status: u16) -> bool {
    matches!(status, 429 | 500 | 502 | 503 | 504)
}

/// Whether a non-success response is worth retrying.
pub fn is_transient_failure(status: u16, body: &str) -> bool {
    is_transient_status(status) || transient_body_pattern().is_match(body)
}

/// Exponential backoff: `base * 2^attempt`, capped at [`MAX_RETRY_DELAY`].
pub fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    base.saturating_mul(1u32 << attempt.min(16))
        .min(MAX_RETRY_DELAY)
}
