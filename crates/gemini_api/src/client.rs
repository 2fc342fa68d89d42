use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Response, StatusCode};
use tracing::{debug, warn};

use crate::config::GeminiApiConfig;
use crate::error::{parse_error_message, GeminiApiError};
use crate::headers::build_headers;
use crate::payload::{GenerateContentRequest, GenerateContentResponse};
use crate::retry::{backoff_delay, is_transient_failure};
use crate::url::generate_content_url;

#[derive(Debug)]
pub struct GeminiApiClient {
    http: Client,
    config: GeminiApiConfig,
}

impl GeminiApiClient {
    pub fn new(config: GeminiApiConfig) -> Result<Self, GeminiApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(GeminiApiError::from)?;
        Ok(Self { http, config })
    }

    pub fn endpoint(&self, model: &str) -> String {
        generate_content_url(&self.config.base_url, model)
    }

    pub fn build_headers(&self) -> Result<HeaderMap, GeminiApiError> {
        let headers = build_headers(&self.config)?;
        let mut out = HeaderMap::new();
        for (key, value) in headers {
            out.insert(
                HeaderName::from_bytes(key.as_bytes())
                    .map_err(|_| GeminiApiError::InvalidHeader(format!("invalid header key: {key}")))?,
                HeaderValue::from_str(&value).map_err(|_| {
                    GeminiApiError::InvalidHeader(format!("invalid header value for {key}"))
                })?,
            );
        }
        Ok(out)
    }

    pub fn build_request(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<reqwest::RequestBuilder, GeminiApiError> {
        if model.trim().is_empty() {
            return Err(GeminiApiError::MissingModel);
        }
        let endpoint = self.endpoint(model);
        reqwest::Url::parse(&endpoint)
            .map_err(|error| GeminiApiError::InvalidBaseUrl(format!("{endpoint}: {error}")))?;

        let headers = self.build_headers()?;
        Ok(self.http.post(endpoint).headers(headers).json(request))
    }

    pub async fn send_with_retry(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<Response, GeminiApiError> {
        let max_retries = self.config.max_retries;
        let mut last_status: Option<StatusCode> = None;
        let mut last_error = None;

        for attempt in 0..=max_retries {
            let response = self.build_request(model, request)?.send().await;

            match response {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return Ok(response);
                    }

                    last_status = Some(status);
                    let body = response.text().await.unwrap_or_else(|_| {
                        status
                            .canonical_reason()
                            .unwrap_or("request failed")
                            .to_string()
                    });
                    let message = parse_error_message(status, &body);
                    last_error = Some(message.clone());

                    if attempt < max_retries && is_transient_failure(status.as_u16(), &body) {
                        warn!(%status, attempt, "retrying Gemini request after HTTP error");
                        tokio::time::sleep(backoff_delay(self.config.retry_base_delay, attempt))
                            .await;
                        continue;
                    }

                    return Err(GeminiApiError::Status(status, message));
                }
                Err(error) => {
                    let message = error.to_string();
                    last_error = Some(message);
                    if attempt < max_retries {
                        warn!(attempt, error = %error, "retrying Gemini request after transport error");
                        tokio::time::sleep(backoff_delay(self.config.retry_base_delay, attempt))
                            .await;
                        continue;
                    }
                    return Err(GeminiApiError::RetryExhausted {
                        status: last_status,
                        last_error,
                    });
                }
            }
        }

        Err(GeminiApiError::RetryExhausted {
            status: last_status,
            last_error,
        })
    }

    /// Sends one `generateContent` call and decodes the response body.
    pub async fn generate(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiApiError> {
        debug!(model, contents = request.contents.len(), "sending generateContent request");
        let response = self.send_with_retry(model, request).await?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice::<GenerateContentResponse>(&body)?)
    }

    /// Sends one `generateContent` call and returns the first candidate's text.
    pub async fn generate_text(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<String, GeminiApiError> {
        self.generate(model, request).await?.text()
    }
}
