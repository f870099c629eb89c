// ABOUTME: Vercel error types with SNAFU pattern.
// ABOUTME: Unifies CLI invocation and REST API failures for programmatic handling.

use snafu::Snafu;

/// Errors from the Vercel CLI or API.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum VercelError {
    #[snafu(display("failed to run vercel CLI: {source}"))]
    Spawn { source: std::io::Error },

    #[snafu(display("vercel {command} exited with code {code:?}: {stderr}"))]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[snafu(display("vercel deploy did not print a deployment URL"))]
    EmptyOutput,

    #[snafu(display("Vercel API request failed: {source}"))]
    Api { source: reqwest::Error },

    #[snafu(display("Vercel API returned {status}: {message}"))]
    ApiStatus { status: u16, message: String },

    #[snafu(display("Vercel operation failed: {message}"))]
    Other { message: String },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VercelErrorKind {
    /// The CLI could not be started or exited unsuccessfully.
    Cli,
    /// The REST API could not be reached or rejected the request.
    Api,
    /// Failure reported by a non-CLI implementation.
    Other,
}

impl VercelError {
    /// Returns the error kind for programmatic handling.
    pub fn kind(&self) -> VercelErrorKind {
        match self {
            VercelError::Spawn { .. }
            | VercelError::CommandFailed { .. }
            | VercelError::EmptyOutput => VercelErrorKind::Cli,
            VercelError::Api { .. } | VercelError::ApiStatus { .. } => VercelErrorKind::Api,
            VercelError::Other { .. } => VercelErrorKind::Other,
        }
    }

    /// Convenience constructor for adapters and fakes.
    pub fn other(message: impl Into<String>) -> Self {
        VercelError::Other {
            message: message.into(),
        }
    }
}
