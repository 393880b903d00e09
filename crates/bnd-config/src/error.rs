use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or did not match the config shape.
    #[error("Configuration error: {0}")]
    Figment(#[from] figment::Error),

    #[error("'{key}' is not set (config file or {env})")]
    NotConfigured { key: String, env: String },

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Storage root {path} is not usable: {reason}")]
    BadRoot { path: PathBuf, reason: String },
}
