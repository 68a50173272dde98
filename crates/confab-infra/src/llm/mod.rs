//! Completion provider implementations.
//!
//! Contains the concrete [`LlmProvider`](confab_core::llm::provider::LlmProvider)
//! for OpenAI-compatible endpoints and a factory ([`create_provider`]) that
//! builds it from a [`ChatConfig`].

pub mod completions;

use secrecy::SecretString;

use confab_core::llm::box_provider::BoxLlmProvider;
use confab_types::config::ChatConfig;
use confab_types::llm::LlmError;

use self::completions::CompletionsClient;

/// Create a [`BoxLlmProvider`] for the configured endpoint.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be constructed.
pub fn create_provider(config: &ChatConfig, api_key: SecretString) -> Result<BoxLlmProvider, LlmError> {
    let client = CompletionsClient::new(api_key, config.endpoint.clone(), config.timeout_secs)?;
    tracing::debug!(
        provider = %confab_core::llm::provider::LlmProvider::name(&client),
        endpoint = %client.endpoint(),
        "completion provider ready"
    );
    Ok(BoxLlmProvider::new(client))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_provider_uses_endpoint_host() {
        let config = ChatConfig::default();
        let provider = create_provider(&config, SecretString::from("sk-test")).unwrap();
        assert_eq!(provider.name(), "openrouter");
    }

    #[test]
    fn test_create_provider_custom_endpoint() {
        let config = ChatConfig {
            endpoint: "https://api.mistral.ai/v1/chat/completions".to_string(),
            timeout_secs: Some(10),
            ..ChatConfig::default()
        };
        let provider = create_provider(&config, SecretString::from("key")).unwrap();
        assert_eq!(provider.name(), "mistral");
    }
}
