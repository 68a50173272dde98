//! Client configuration types for Confab.
//!
//! `ChatConfig` represents `config.toml`: which endpoint to call, which
//! model to request, and where to find the credential. All fields have
//! defaults, so an empty file is a valid configuration.

use serde::{Deserialize, Serialize};

pub const DEFAULT_ENDPOINT: &str = "https://openrouter.ai/api/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "openai/gpt-3.5-turbo";
pub const DEFAULT_API_KEY_ENV: &str = "OPENROUTER_API_KEY";

/// Top-level configuration for the chat client.
///
/// Loaded from `~/.confab/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Full URL of the chat completions endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model identifier sent with every request.
    #[serde(default = "default_model")]
    pub model: String,

    /// Name of the environment variable holding the bearer credential.
    ///
    /// The credential itself is never stored in the config file.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Optional request timeout. Unset means wait indefinitely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Label shown next to bot messages.
    #[serde(default = "default_bot_name")]
    pub bot_name: String,

    /// Title printed in the session header.
    #[serde(default = "default_title")]
    pub title: String,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_api_key_env() -> String {
    DEFAULT_API_KEY_ENV.to_string()
}

fn default_bot_name() -> String {
    "Assistant".to_string()
}

fn default_title() -> String {
    "Confab".to_string()
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            timeout_secs: None,
            bot_name: default_bot_name(),
            title: default_title(),
        }
    }
}
