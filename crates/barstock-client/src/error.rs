//! Error types for the inventory client.

use std::path::PathBuf;

use thiserror::Error;

/// Problems reading or validating the client configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The configuration file exists but could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for [`crate::ClientConfig`].
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The base URL is not an absolute http(s) URL.
    #[error("invalid base URL '{0}': expected http:// or https://")]
    InvalidUrl(String),

    #[error("timeout must be at least one second")]
    ZeroTimeout,
}

/// Errors constructing the HTTP transport.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClientError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The underlying HTTP client could not be built.
    #[error("http client error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, ClientError>;
