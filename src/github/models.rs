// ABOUTME: Subset of GitHub REST payloads used by the deploy pipeline.
// ABOUTME: Request bodies serialize, responses deserialize; unknown fields are ignored.

use serde::{Deserialize, Serialize};

use crate::types::{CommentId, DeploymentRecordId, PullNumber};

/// A pull request associated with a commit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequest {
    pub number: PullNumber,
    pub state: PullState,
    pub head: PullHead,
}

impl PullRequest {
    pub fn is_open(&self) -> bool {
        self.state == PullState::Open
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PullState {
    Open,
    Closed,
    #[serde(other)]
    Unknown,
}

/// Head side of a pull request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullHead {
    #[serde(rename = "ref")]
    pub ref_name: String,
    /// `None` when the head repository (usually a fork) has been deleted.
    #[serde(default)]
    pub repo: Option<HeadRepository>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeadRepository {
    pub full_name: String,
}

/// An issue comment on a pull request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    #[serde(default)]
    pub body: Option<String>,
    pub html_url: String,
}

impl Comment {
    pub fn body(&self) -> &str {
        self.body.as_deref().unwrap_or_default()
    }
}

/// Commit details attached to the Vercel deployment as metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
    pub sha: String,
    pub author_name: String,
    pub author_login: Option<String>,
    pub message: String,
}

/// A GitHub deployment record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeploymentRecord {
    pub id: DeploymentRecordId,
    #[serde(default)]
    pub environment: Option<String>,
}

/// Body of `POST /repos/{owner}/{repo}/deployments`.
#[derive(Debug, Clone, Serialize)]
pub struct NewDeployment {
    #[serde(rename = "ref")]
    pub git_ref: String,
    pub environment: String,
    pub description: String,
    pub required_contexts: Vec<String>,
    pub auto_merge: bool,
    pub production_environment: bool,
}

/// Lifecycle states GitHub accepts for a deployment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeploymentState {
    Pending,
    InProgress,
    Success,
    Failure,
    Error,
    Inactive,
}

impl DeploymentState {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeploymentState::Pending => "pending",
            DeploymentState::InProgress => "in_progress",
            DeploymentState::Success => "success",
            DeploymentState::Failure => "failure",
            DeploymentState::Error => "error",
            DeploymentState::Inactive => "inactive",
        }
    }
}

impl std::fmt::Display for DeploymentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `POST /repos/{owner}/{repo}/deployments/{id}/statuses`.
#[derive(Debug, Clone, Serialize)]
pub struct NewDeploymentStatus {
    pub state: DeploymentState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
