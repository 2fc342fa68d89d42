use std::fmt;

use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Error as JsonError;

#[derive(Debug)]
pub enum GeminiApiError {
    MissingApiKey,
    MissingModel,
    InvalidBaseUrl(String),
    InvalidHeader(String),
    Request(reqwest::Error),
    Status(StatusCode, String),
    Serde(JsonError),
    NoCandidates,
    Blocked(String),
    RetryExhausted {
        status: Option<StatusCode>,
        last_error: Option<String>,
    },
    Runtime(String),
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorPayload {
    pub error: Option<ErrorPayloadFields>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorPayloadFields {
    pub message: Option<String>,
    pub status: Option<String>,
}

impl fmt::Display for GeminiApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingApiKey => write!(f, "API key is required"),
            Self::MissingModel => write!(f, "model id is required"),
            Self::InvalidBaseUrl(value) => write!(f, "invalid base URL: {value}"),
            Self::InvalidHeader(message) => write!(f, "invalid header: {message}"),
            Self::Request(error) => write!(f, "request error: {error}"),
            Self::Status(status, message) => write!(f, "HTTP {status} {message}"),
            Self::Serde(error) => write!(f, "serialization error: {error}"),
            Self::NoCandidates => write!(f, "no response candidates"),
            Self::Blocked(reason) => write!(f, "prompt blocked: {reason}"),
            Self::RetryExhausted { status, last_error } => {
                let status = status
                    .map(|status| status.as_u16().to_string())
                    .unwrap_or_else(|| "n/a".to_owned());
                write!(f, "retry exhausted after max attempts (status: {status}, last_error: {last_error:?})")
            }
            Self::Runtime(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for GeminiApiError {}

impl From<reqwest::Error> for GeminiApiError {
    fn from(error: reqwest::Error) -> Self {
        Self::Request(error)
    }
}

impl From<JsonError> for GeminiApiError {
    fn from(error: JsonError) -> Self {
        Self::Serde(error)
    }
}

/// Extracts a human-readable message from a Gemini error body.
///
/// Falls back to the raw body, then to the status reason phrase.
pub fn parse_error_message(status: StatusCode, body: &str) -> String {
    let fields = serde_json::from_str::<ErrorPayload>(body)
        .ok()
        .and_then(|payload| payload.error);

    if let Some(fields) = fields {
        let message = fields
            .message
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty());
        let code = fields
            .status
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty());
        match (code, message) {
            (Some(code), Some(message)) => return format!("{code}: {message}"),
            (None, Some(message)) => return message.to_string(),
            (Some(code), None) => return code.to_string(),
            (None, None) => {}
        }
    }

    if body.trim().is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        body.to_string()
    }
}
