use std::io;
use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Authentication failed (HTTP {status}): {body}")]
    Auth { status: StatusCode, body: String },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Template '{name}' not found")]
    NotFound { name: String },

    #[error("{action} failed (HTTP {status}): {body}")]
    Upstream {
        action: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("Request to Zenoti failed: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read template store {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("Template store {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Template store {path} must contain a JSON object")]
    Layout { path: PathBuf },

    #[error("Failed to write template store {path}: {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error("Template name must be a non-empty string")]
    InvalidName,
}

impl Error {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
