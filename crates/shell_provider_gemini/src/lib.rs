//! Gemini API-backed implementation of the shared `shell_provider` contract.
//!
//! This adapter maps a replayed shell transcript onto Gemini `user`/`model`
//! contents and blocks on one `generateContent` call per request.

use std::sync::Arc;
use std::time::Duration;

use gemini_api::{Content, GeminiApiClient, GeminiApiConfig, GeminiApiError, GenerateContentRequest};
use shell_provider::{GenerateRequest, ProviderInitError, ProviderProfile, ShellProvider};
use tracing::debug;

/// Stable provider identifier used by startup selection.
pub const GEMINI_PROVIDER_ID: &str = "gemini";

/// Model used when none is configured.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-3-pro-preview";

/// Runtime configuration for the Gemini provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeminiProviderConfig {
    pub api_key: String,
    pub model_id: String,
    pub base_url: Option<String>,
    pub timeout: Option<Duration>,
}

impl GeminiProviderConfig {
    #[must_use]
    pub fn new(api_key: impl Into<String>, model_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model_id: model_id.into(),
            base_url: None,
            timeout: None,
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn into_gemini_api_config(self) -> GeminiApiConfig {
        let mut config = GeminiApiConfig::new(self.api_key);

        if let Some(base_url) = self.base_url {
            config = config.with_base_url(base_url);
        }

        if let Some(timeout) = self.timeout {
            config = config.with_timeout(timeout);
        }

        config
    }
}

trait GenerateClient: Send + Sync {
    fn generate(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<String, GeminiApiError>;
}

#[derive(Debug)]
struct DefaultGenerateClient {
    client: GeminiApiClient,
}

impl GenerateClient for DefaultGenerateClient {
    fn generate(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<String, GeminiApiError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|error| {
                GeminiApiError::Runtime(format!("failed to initialize tokio runtime: {error}"))
            })?;

        runtime.block_on(self.client.generate_text(model, request))
    }
}

/// `ShellProvider` adapter backed by `gemini_api` transport primitives.
pub struct GeminiProvider {
    model_id: String,
    client: Arc<dyn GenerateClient>,
}

impl GeminiProvider {
    /// Creates a provider using real Gemini API transport.
    pub fn new(config: GeminiProviderConfig) -> Result<Self, ProviderInitError> {
        if config.api_key.trim().is_empty() {
            return Err(ProviderInitError::new(
                "GEMINI_API_KEY or GOOG_API_KEY environment variable not set",
            ));
        }
        let model_id = sanitize_model_id(&config.model_id);
        let client = Arc::new(DefaultGenerateClient {
            client: GeminiApiClient::new(config.into_gemini_api_config())
                .map_err(map_init_error)?,
        });

        Ok(Self { model_id, client })
    }

    #[cfg(test)]
    fn with_client_for_tests(model_id: &str, client: Arc<dyn GenerateClient>) -> Self {
        Self {
            model_id: sanitize_model_id(model_id),
            client,
        }
    }
}

impl ShellProvider for GeminiProvider {
    fn profile(&self) -> ProviderProfile {
        ProviderProfile {
            provider_id: GEMINI_PROVIDER_ID.to_string(),
            model_id: self.model_id.clone(),
        }
    }

    fn generate(&self, req: GenerateRequest) -> Result<String, String> {
        let request = build_generate_request(&req);
        debug!(
            model = %self.model_id,
            contents = request.contents.len(),
            "dispatching Gemini generation"
        );

        self.client
            .generate(&self.model_id, &request)
            .map_err(|error| format!("Gemini API request failed: {error}"))
    }
}

/// Maps a transcript plus the new command onto Gemini contents.
///
/// Empty transcript texts are sent as a single space because the API rejects
/// empty parts.
#[must_use]
pub fn build_generate_request(req: &GenerateRequest) -> GenerateContentRequest {
    let mut contents = req
        .history
        .iter()
        .map(|message| {
            let text = non_empty_part(message.text());
            if message.is_command() {
                Content::user(text)
            } else {
                Content::model(text)
            }
        })
        .collect::<Vec<_>>();
    contents.push(Content::user(req.input.clone()));

    GenerateContentRequest::new(contents).with_system_instruction(req.instructions.clone())
}

fn non_empty_part(text: &str) -> String {
    if text.is_empty() {
        " ".to_string()
    } else {
        text.to_string()
    }
}

fn sanitize_model_id(model_id: &str) -> String {
    let trimmed = model_id.trim();
    if trimmed.is_empty() {
        DEFAULT_GEMINI_MODEL.to_string()
    } else {
        trimmed.to_string()
    }
}

fn map_init_error(error: GeminiApiError) -> ProviderInitError {
    ProviderInitError::new(format!("Failed to initialize gemini provider: {error}"))
}
