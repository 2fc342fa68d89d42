use std::sync::Arc;

use shell_provider::{ProviderInitError, ShellProvider};
use shell_provider_gemini::{GeminiProvider, GeminiProviderConfig, GEMINI_PROVIDER_ID};
use shell_provider_mock::{MockProvider, MOCK_PROVIDER_ID};
use tracing::warn;

use crate::config::{EnvConfig, TIMEOUT_ENV_VAR};

pub const DEFAULT_PROVIDER_ID: &str = GEMINI_PROVIDER_ID;

/// Builds the provider named by `BASHSIM_PROVIDER`, defaulting to Gemini.
pub fn provider_from_config(config: &EnvConfig) -> Result<Arc<dyn ShellProvider>, ProviderInitError> {
    let provider_id = config
        .provider
        .as_deref()
        .map(str::trim)
        .unwrap_or(DEFAULT_PROVIDER_ID);
    provider_for_id(provider_id, config)
}

pub fn provider_for_id(
    provider_id: &str,
    config: &EnvConfig,
) -> Result<Arc<dyn ShellProvider>, ProviderInitError> {
    match provider_id {
        GEMINI_PROVIDER_ID => Ok(Arc::new(GeminiProvider::new(gemini_config(config))?)),
        MOCK_PROVIDER_ID => Ok(Arc::new(mock_provider(config))),
        unknown => Err(ProviderInitError::new(format!(
            "Unsupported provider '{unknown}'. Available providers: {GEMINI_PROVIDER_ID}, {MOCK_PROVIDER_ID}"
        ))),
    }
}

fn mock_provider(config: &EnvConfig) -> MockProvider {
    match config.model.as_deref() {
        Some(model) => MockProvider::new().with_model_id(model),
        None => MockProvider::new(),
    }
}

fn gemini_config(config: &EnvConfig) -> GeminiProviderConfig {
    let mut gemini = GeminiProviderConfig::new(
        config.api_key.clone().unwrap_or_default(),
        config.model_id(),
    );

    if let Some(base_url) = &config.gemini_base_url {
        gemini = gemini.with_base_url(base_url.trim());
    }

    match config.timeout() {
        Ok(Some(timeout)) => gemini = gemini.with_timeout(timeout),
        Ok(None) => {}
        Err(raw) => warn!(variable = TIMEOUT_ENV_VAR, value = %raw, "ignoring invalid timeout"),
    }

    gemini
}
