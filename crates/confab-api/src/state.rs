//! Application state shared by the CLI commands.
//!
//! AppState holds the effective configuration (file values plus
//! command-line overrides) and builds the completion provider on demand.

use std::path::{Path, PathBuf};

use anyhow::Context;

use confab_core::llm::box_provider::BoxLlmProvider;
use confab_infra::config::{default_data_dir, load_config, load_config_file};
use confab_infra::llm::create_provider;
use confab_infra::secret::resolve_api_key;
use confab_types::config::ChatConfig;

use crate::cli::ConfigOverrides;

#[derive(Debug, Clone)]
pub struct AppState {
    pub config: ChatConfig,
    pub data_dir: PathBuf,
    /// File the configuration was read from, when one was given explicitly.
    pub config_path: Option<PathBuf>,
}

impl AppState {
    /// Load configuration and apply overrides.
    ///
    /// An explicit `config_path` must exist and parse; the default
    /// `~/.confab/config.toml` silently falls back to defaults.
    pub async fn init(config_path: Option<&Path>, overrides: &ConfigOverrides) -> anyhow::Result<Self> {
        let data_dir = default_data_dir();

        let config = match config_path {
            Some(path) => load_config_file(path)
                .await
                .with_context(|| format!("failed to load configuration from {}", path.display()))?,
            None => load_config(&data_dir).await,
        };

        Ok(Self {
            config: apply_overrides(config, overrides),
            data_dir,
            config_path: config_path.map(Path::to_path_buf),
        })
    }

    /// Resolve the credential and build the completion provider.
    pub fn provider(&self) -> anyhow::Result<BoxLlmProvider> {
        let api_key = resolve_api_key(&self.config)?;
        let provider = create_provider(&self.config, api_key)
            .context("failed to create completion provider")?;
        Ok(provider)
    }

    /// Whether a credential is available, without exposing it.
    pub fn has_credential(&self) -> bool {
        resolve_api_key(&self.config).is_ok()
    }
}

fn apply_overrides(mut config: ChatConfig, overrides: &ConfigOverrides) -> ChatConfig {
    if let Some(model) = &overrides.model {
        config.model = model.clone();
    }
    if let Some(endpoint) = &overrides.endpoint {
        config.endpoint = endpoint.clone();
    }
    if let Some(name) = &overrides.name {
        config.bot_name = name.clone();
    }
    if overrides.timeout.is_some() {
        config.timeout_secs = overrides.timeout;
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_overrides_replace_only_given_fields() {
        let overrides = ConfigOverrides {
            model: Some("mistralai/mistral-7b-instruct".to_string()),
            name: Some("Om".to_string()),
            ..ConfigOverrides::default()
        };
        let config = apply_overrides(ChatConfig::default(), &overrides);
        assert_eq!(config.model, "mistralai/mistral-7b-instruct");
        assert_eq!(config.bot_name, "Om");
        assert_eq!(config.endpoint, ChatConfig::default().endpoint);
        assert_eq!(config.timeout_secs, None);
    }

    #[test]
    fn test_no_overrides_is_identity() {
        let config = apply_overrides(ChatConfig::default(), &ConfigOverrides::default());
        assert_eq!(config, ChatConfig::default());
    }

    #[tokio::test]
    async fn test_init_with_explicit_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("confab.toml");
        tokio::fs::write(&path, "model = \"from-file\"\ntimeout_secs = 30\n")
            .await
            .unwrap();

        let overrides = ConfigOverrides {
            timeout: Some(5),
            ..ConfigOverrides::default()
        };
        let state = AppState::init(Some(&path), &overrides).await.unwrap();
        assert_eq!(state.config.model, "from-file");
        assert_eq!(state.config.timeout_secs, Some(5));
        assert_eq!(state.config_path.as_deref(), Some(path.as_path()));
    }

    #[tokio::test]
    async fn test_init_with_missing_explicit_file_fails() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("missing.toml");
        assert!(AppState::init(Some(&missing), &ConfigOverrides::default()).await.is_err());
    }
}
