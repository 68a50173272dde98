//! CompletionsClient -- [`LlmProvider`] for OpenAI-compatible
//! `/chat/completions` endpoints (OpenRouter, OpenAI, local proxies).
//!
//! The response body is parsed as untyped JSON so that a body without
//! `choices[0].message.content` is reported as a missing reply rather
//! than a decode failure. The HTTP status code is not consulted: error
//! bodies from the endpoint are JSON without `choices` and fall through
//! to the same path.
//!
//! The API key is wrapped in [`secrecy::SecretString`] and is never logged
//! or included in `Debug` output.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::{Instrument, debug, info_span};

use confab_core::llm::provider::LlmProvider;
use confab_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Hosted chat completions client.
///
/// # API Key Security
///
/// The API key is stored as a [`SecretString`] and is only exposed when
/// constructing the `Authorization` header.
pub struct CompletionsClient {
    client: reqwest::Client,
    api_key: SecretString,
    endpoint: String,
    provider_name: String,
    timeout_secs: Option<u64>,
}

impl CompletionsClient {
    /// Create a client posting to `endpoint` with a bearer credential.
    ///
    /// Without `timeout_secs` a request may wait indefinitely. A zero
    /// timeout counts as unset.
    pub fn new(
        api_key: SecretString,
        endpoint: impl Into<String>,
        timeout_secs: Option<u64>,
    ) -> Result<Self, LlmError> {
        let timeout_secs = timeout_secs.filter(|secs| *secs > 0);
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| LlmError::Transport(format!("failed to create HTTP client: {e}")))?;

        let endpoint = endpoint.into();
        let provider_name = provider_name_for(&endpoint);

        Ok(Self {
            client,
            api_key,
            endpoint,
            provider_name,
            timeout_secs,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn map_send_error(&self, err: reqwest::Error) -> LlmError {
        match self.timeout_secs {
            Some(secs) if err.is_timeout() => LlmError::Timeout(secs),
            _ => LlmError::Transport(err.to_string()),
        }
    }
}

// CompletionsClient intentionally does NOT derive Debug; the SecretString
// already redacts the key, but the whole client stays out of Debug output.

impl LlmProvider for CompletionsClient {
    fn name(&self) -> &str {
        &self.provider_name
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let span = info_span!(
            "chat",
            gen_ai.operation.name = "chat",
            gen_ai.provider.name = %self.provider_name,
            gen_ai.request.model = %request.model,
        );
        self.post(request).instrument(span).await
    }
}

impl CompletionsClient {
    async fn post(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        debug!(
            endpoint = %self.endpoint,
            model = %request.model,
            messages = request.messages.len(),
            "sending completion request"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(self.api_key.expose_secret())
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.map_send_error(e))?;
        if !status.is_success() {
            debug!(%status, "completion endpoint returned an error status");
        }

        let value: Value = serde_json::from_str(&body)
            .map_err(|e| LlmError::Deserialization(format!("failed to parse response: {e}")))?;

        Ok(extract_response(&value))
    }
}

/// Pull the first choice's content (and ids) out of a parsed body.
///
/// Missing keys and non-string content become `None`.
pub fn extract_response(value: &Value) -> CompletionResponse {
    let text_at = |pointer: &str| value.pointer(pointer).and_then(Value::as_str).map(str::to_string);

    CompletionResponse {
        content: text_at("/choices/0/message/content"),
        id: text_at("/id"),
        model: text_at("/model"),
    }
}

/// Short provider label from the endpoint host (`openrouter.ai` -> `openrouter`).
fn provider_name_for(endpoint: &str) -> String {
    reqwest::Url::parse(endpoint)
        .ok()
        .and_then(|url| url.host_str().map(str::to_string))
        .map(|host| {
            let host = host.strip_prefix("api.").unwrap_or(&host);
            host.split('.').next().unwrap_or(host).to_string()
        })
        .unwrap_or_else(|| "completions".to_string())
}
