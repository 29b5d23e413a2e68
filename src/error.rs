use std::path::PathBuf;

use thiserror::Error;

/// Reasons a page of records could not be taken from the remote source.
///
/// These never leave the fetcher: every variant is recovered by substituting
/// the fallback records.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request could not be sent, timed out, or the body could not be read
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("Request failed with status {0}")]
    Status(u16),

    /// The body was not the expected shape
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// The `data` list was present but empty
    #[error("Response contained no records")]
    Empty,
}

impl FetchError {
    /// Create a new Malformed error
    pub fn malformed<S: Into<String>>(reason: S) -> Self {
        Self::Malformed(reason.into())
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(error: serde_json::Error) -> Self {
        Self::Malformed(error.to_string())
    }
}

/// Failures that escape a record source and reach the dashboard.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The loading task panicked before producing a result
    #[error("Loading task panicked: {0}")]
    Panicked(String),

    /// The source reported an error it could not recover from
    #[error("Record source error: {0}")]
    Source(String),
}

/// Errors raised while reading the settings file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}
