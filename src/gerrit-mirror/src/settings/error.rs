//! Settings error types.

use thiserror::Error;

/// Errors that can occur while loading settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Failed to read the settings file.
    #[error("Failed to read file '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML content.
    #[error("Failed to parse settings in '{path}': {source}")]
    TomlError {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// A setting has an unusable value.
    #[error("Validation error in '{path}': {message}")]
    ValidationError { path: String, message: String },
}
