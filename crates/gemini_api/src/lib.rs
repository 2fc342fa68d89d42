//! Transport-only client primitives for the Gemini `generateContent` endpoint.
//!
//! This crate owns request building, response parsing, and retry behavior for
//! a single non-streaming text generation call. It has no knowledge of shell
//! simulation or session history; callers hand it fully-formed contents.

pub mod client;
pub mod config;
pub mod error;
pub mod headers;
pub mod payload;
pub mod retry;
pub mod url;

pub use client::GeminiApiClient;
pub use config::GeminiApiConfig;
pub use error::GeminiApiError;
pub use payload::{Content, GenerateContentRequest, GenerateContentResponse, Part};
pub use url::generate_content_url;
