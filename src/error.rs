// ABOUTME: Application-wide error types for vercel-deploy.
// ABOUTME: Uses thiserror for ergonomic error handling.

use std::path::PathBuf;
use thiserror::Error;

use crate::deploy::DeployError;
use crate::github::GitHubError;
use crate::vercel::VercelError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("missing required input: {0}")]
    MissingInput(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    GitHub(#[from] GitHubError),

    #[error(transparent)]
    Vercel(#[from] VercelError),

    #[error(transparent)]
    Deploy(#[from] DeployError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Broad error category, matching how the run reports failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or missing run context; raised before any external mutation.
    Configuration,
    /// GitHub or Vercel call failed.
    ExternalService,
    /// Local I/O, serialization, or invariant failure.
    Internal,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::ConfigNotFound(_)
            | Error::MissingInput(_)
            | Error::InvalidConfig(_)
            | Error::Yaml(_) => ErrorKind::Configuration,
            Error::Deploy(DeployError::EmptyPreviewUrl) => ErrorKind::Internal,
            Error::GitHub(_) | Error::Vercel(_) | Error::Deploy(_) => ErrorKind::ExternalService,
            Error::Io(_) | Error::Json(_) => ErrorKind::Internal,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
