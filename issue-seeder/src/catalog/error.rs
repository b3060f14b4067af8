//! Catalog error types.

use thiserror::Error;

/// Errors that can occur while loading an issue catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Failed to read the catalog file.
    #[error("Failed to read catalog '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML content.
    #[error("Failed to parse catalog '{path}': {source}")]
    TomlError {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// The catalog parsed but contains invalid entries.
    #[error("Validation error in '{path}': {message}")]
    ValidationError { path: String, message: String },
}
