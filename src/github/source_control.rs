// ABOUTME: SourceControl capability trait consumed by the deploy pipeline.
// ABOUTME: Implemented by GitHubClient; test fakes implement it in memory.

use async_trait::async_trait;

use super::error::GitHubError;
use super::models::{
    Comment, CommitInfo, DeploymentRecord, NewDeployment, NewDeploymentStatus, PullRequest,
};
use crate::types::{CommentId, DeploymentRecordId, PullNumber, Revision};

/// Operations against the source-control platform, scoped to one repository.
#[async_trait]
pub trait SourceControl: Send + Sync {
    /// Pull requests associated with a commit, in any state.
    async fn pull_requests_for_commit(
        &self,
        revision: &Revision,
    ) -> Result<Vec<PullRequest>, GitHubError>;

    /// Author and message of a commit.
    async fn commit(&self, revision: &Revision) -> Result<CommitInfo, GitHubError>;

    /// Create a deployment record.
    async fn create_deployment(
        &self,
        deployment: &NewDeployment,
    ) -> Result<DeploymentRecord, GitHubError>;

    /// Append a status to a deployment record.
    async fn create_deployment_status(
        &self,
        id: &DeploymentRecordId,
        status: &NewDeploymentStatus,
    ) -> Result<(), GitHubError>;

    /// All comments on a pull request, oldest first.
    async fn list_comments(&self, pull: PullNumber) -> Result<Vec<Comment>, GitHubError>;

    /// Delete a comment.
    async fn delete_comment(&self, id: &CommentId) -> Result<(), GitHubError>;

    /// Post a comment on a pull request.
    async fn create_comment(&self, pull: PullNumber, body: &str) -> Result<Comment, GitHubError>;

    /// Add labels to a pull request.
    async fn add_labels(&self, pull: PullNumber, labels: &[String]) -> Result<(), GitHubError>;
}
