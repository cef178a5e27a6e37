//! Error types for Kaithari

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Kaithari errors
#[derive(Error, Debug)]
pub enum Error {
    #[error("Rate table parse error: {0}")]
    TableParse(String),

    #[error("Rate table invalid: {0}")]
    TableInvalid(String),

    #[error("Unknown service code: {0}")]
    UnknownService(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_norway::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}
