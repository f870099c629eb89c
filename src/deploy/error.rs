// ABOUTME: Error types for deployment record transitions.
// ABOUTME: Wraps the GitHub failure together with the attempted state.

use crate::github::{DeploymentState, GitHubError};

/// Errors that can occur during deployment record state transitions.
#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    /// Creating the record failed.
    #[error("failed to create GitHub deployment: {0}")]
    CreateFailed(#[source] GitHubError),

    /// Posting a status to the record failed.
    #[error("failed to set GitHub deployment status to \"{state}\": {source}")]
    StatusUpdateFailed {
        state: DeploymentState,
        #[source]
        source: GitHubError,
    },

    /// Success requires the URL users should visit.
    #[error("cannot mark deployment successful without a preview URL")]
    EmptyPreviewUrl,
}

impl DeployError {
    pub(crate) fn status_update(state: DeploymentState, source: GitHubError) -> Self {
        DeployError::StatusUpdateFailed { state, source }
    }
}
