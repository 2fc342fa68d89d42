use std::collections::BTreeMap;

use crate::config::GeminiApiConfig;
use crate::error::GeminiApiError;

pub const HEADER_API_KEY: &str = "x-goog-api-key";
pub const HEADER_ACCEPT: &str = "accept";
pub const HEADER_CONTENT_TYPE: &str = "content-type";
pub const HEADER_USER_AGENT: &str = "user-agent";

/// Build a deterministic header map for Gemini requests.
pub fn build_headers(config: &GeminiApiConfig) -> Result<BTreeMap<String, String>, GeminiApiError> {
    let api_key = config.api_key.trim();
    if api_key.is_empty() {
        return Err(GeminiApiError::MissingApiKey);
    }

    let mut headers = BTreeMap::new();
    headers.insert(HEADER_API_KEY.to_owned(), api_key.to_owned());
    headers.insert(HEADER_ACCEPT.to_owned(), "application/json".to_owned());
    headers.insert(
        HEADER_CONTENT_TYPE.to_owned(),
        "application/json".to_owned(),
    );

    headers.insert(HEADER_USER_AGENT.to_owned(), user_agent());

    Ok(headers)
}

fn user_agent() -> String {
    format!(
        "bashsim/{} ({} {})",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}
