//! Environment variable credential source.
//!
//! Key resolution (first match wins):
//! 1. `CONFAB_API_KEY`
//! 2. the variable named by `api_key_env` in the config
//!    (default `OPENROUTER_API_KEY`)
//!
//! Empty values count as unset.

use secrecy::SecretString;

use confab_types::config::ChatConfig;
use confab_types::error::ConfigError;

/// Variable that overrides whatever `api_key_env` names.
pub const OVERRIDE_VAR: &str = "CONFAB_API_KEY";

/// Resolve the bearer credential from the process environment.
pub fn resolve_api_key(config: &ChatConfig) -> Result<SecretString, ConfigError> {
    resolve_api_key_with(config, |name| std::env::var(name).ok())
}

/// Resolve the bearer credential through `lookup` (an env-var reader).
pub fn resolve_api_key_with<F>(config: &ChatConfig, lookup: F) -> Result<SecretString, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    [OVERRIDE_VAR, config.api_key_env.as_str()]
        .into_iter()
        .find_map(|name| lookup(name).filter(|v| !v.trim().is_empty()))
        .map(SecretString::from)
        .ok_or_else(|| ConfigError::MissingCredential(config.api_key_env.clone()))
}
