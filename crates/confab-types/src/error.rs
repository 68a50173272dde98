use thiserror::Error;

/// Errors related to loading configuration and credentials.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(String),

    #[error("failed to read config file {path}: {message}")]
    Read { path: String, message: String },

    #[error("invalid config file {path}: {message}")]
    Parse { path: String, message: String },

    #[error("credential not found: set the {0} environment variable")]
    MissingCredential(String),
}
