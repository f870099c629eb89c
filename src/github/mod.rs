// ABOUTME: GitHub collaborator: the SourceControl capability trait and its REST client.
// ABOUTME: Pull request lookup, deployment records, and pull request comments.

mod client;
mod error;
mod models;
mod source_control;

pub use client::{DEFAULT_API_URL, GitHubClient};
pub use error::GitHubError;
pub use models::{
    Comment, CommitInfo, DeploymentRecord, DeploymentState, HeadRepository, NewDeployment,
    NewDeploymentStatus, PullHead, PullRequest, PullState,
};
pub use source_control::SourceControl;
