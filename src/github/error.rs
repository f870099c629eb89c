// ABOUTME: Error types for GitHub API calls.
// ABOUTME: Separates transport failures from non-success HTTP statuses.

/// Errors from the GitHub REST API.
#[derive(Debug, thiserror::Error)]
pub enum GitHubError {
    /// Network, TLS, or response decoding failure.
    #[error("GitHub request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("GitHub API returned {status} for {endpoint}: {message}")]
    Status {
        status: u16,
        endpoint: String,
        message: String,
    },

    /// Failure reported by a non-HTTP implementation (fakes, adapters).
    #[error("GitHub operation failed: {0}")]
    Other(String),
}

impl GitHubError {
    /// HTTP status, when the API produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            GitHubError::Status { status, .. } => Some(*status),
            GitHubError::Request(e) => e.status().map(|s| s.as_u16()),
            GitHubError::Other(_) => None,
        }
    }
}
