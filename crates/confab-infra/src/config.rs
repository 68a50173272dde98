//! Configuration loader for Confab.
//!
//! Reads `config.toml` from the data directory (`~/.confab/` in production)
//! and deserializes it into [`ChatConfig`]. Falls back to defaults when the
//! file is missing or malformed. An explicitly requested file is stricter:
//! see [`load_config_file`].

use std::path::{Path, PathBuf};

use confab_types::config::ChatConfig;
use confab_types::error::ConfigError;

const CONFIG_FILE: &str = "config.toml";

/// Default data directory: `~/.confab`, or `./.confab` without a home dir.
pub fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".confab")
}

/// Load configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`ChatConfig::default()`].
/// - If the file exists but fails to read or parse, logs a warning and
///   returns the default.
pub async fn load_config(data_dir: &Path) -> ChatConfig {
    let config_path = data_dir.join(CONFIG_FILE);

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return ChatConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return ChatConfig::default();
        }
    };

    match toml::from_str::<ChatConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            ChatConfig::default()
        }
    }
}

/// Load configuration from an explicit path (`--config`).
///
/// Unlike [`load_config`], a missing or malformed file is an error: the
/// user asked for that file by name.
pub async fn load_config_file(path: &Path) -> Result<ChatConfig, ConfigError> {
    let display = path.display().to_string();
    let content = tokio::fs::read_to_string(path).await.map_err(|err| {
        if err.kind() == std::io::ErrorKind::NotFound {
            ConfigError::NotFound(display.clone())
        } else {
            ConfigError::Read {
                path: display.clone(),
                message: err.to_string(),
            }
        }
    })?;

    toml::from_str(&content).map_err(|err| ConfigError::Parse {
        path: display,
        message: err.to_string(),
    })
}
