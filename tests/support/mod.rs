// ABOUTME: Test support utilities.
// ABOUTME: Provides tracing setup and in-memory GitHub and Vercel fakes that record every call.

// Each test binary only uses some of these helpers, so allow dead_code.
#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Once;

use async_trait::async_trait;
use parking_lot::Mutex;
use vercel_deploy::context::{AssociatedPull, RunContext};
use vercel_deploy::github::{
    Comment, CommitInfo, DeploymentRecord, DeploymentState, GitHubError, HeadRepository,
    NewDeployment, NewDeploymentStatus, PullHead, PullRequest, PullState, SourceControl,
};
use vercel_deploy::types::{
    CommentId, DeploymentRecordId, PullNumber, RepoSlug, Revision, VercelDeploymentId,
};
use vercel_deploy::vercel::{DeployRequest, DeploymentInfo, HostingProvider, VercelError};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for tests. Safe to call multiple times.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;
        let filter = EnvFilter::from_default_env()
            .add_directive("vercel_deploy=debug".parse().unwrap());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

pub const REPO: &str = "acme/site";
pub const SHA: &str = "abcdef1234567";

pub fn repo() -> RepoSlug {
    RepoSlug::parse(REPO).unwrap()
}

pub fn context(branch: &str, pull: Option<(u64, bool)>) -> RunContext {
    RunContext::new(
        Revision::new(SHA).unwrap(),
        repo(),
        "octocat",
        branch,
        pull.map(|(number, from_fork)| AssociatedPull {
            number: PullNumber::new(number),
            from_fork,
        }),
        Some(format!("https://github.com/{REPO}/actions/runs/42")),
    )
}

pub fn pull_request(number: u64, head_repo: Option<&str>, open: bool) -> PullRequest {
    PullRequest {
        number: PullNumber::new(number),
        state: if open {
            PullState::Open
        } else {
            PullState::Closed
        },
        head: PullHead {
            ref_name: format!("feature-{number}"),
            repo: head_repo.map(|full_name| HeadRepository {
                full_name: full_name.to_string(),
            }),
        },
    }
}

pub fn comment(id: u64, body: &str) -> Comment {
    Comment {
        id: CommentId::from(id),
        body: Some(body.to_string()),
        html_url: format!("https://github.com/{REPO}/pull/1#issuecomment-{id}"),
    }
}

// =============================================================================
// GitHub fake
// =============================================================================

/// Every GitHub call the fake received, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitHubCall {
    PullRequests,
    Commit,
    CreateDeployment { environment: String, git_ref: String },
    Status { state: DeploymentState, environment_url: Option<String> },
    ListComments(u64),
    DeleteComment(String),
    CreateComment { pull: u64, body: String },
    AddLabels { pull: u64, labels: Vec<String> },
}

/// Operations that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GitHubOp {
    PullRequests,
    Commit,
    CreateDeployment,
    Status(DeploymentState),
    ListComments,
    DeleteComment,
    CreateComment,
    AddLabels,
}

#[derive(Default)]
pub struct FakeGitHub {
    pulls: Mutex<Vec<PullRequest>>,
    comments: Mutex<Vec<Comment>>,
    calls: Mutex<Vec<GitHubCall>>,
    failures: Mutex<HashSet<GitHubOp>>,
    next_comment_id: Mutex<u64>,
}

impl FakeGitHub {
    pub fn new() -> Self {
        Self {
            next_comment_id: Mutex::new(1000),
            ..Default::default()
        }
    }

    pub fn with_pulls(self, pulls: Vec<PullRequest>) -> Self {
        *self.pulls.lock() = pulls;
        self
    }

    pub fn with_comments(self, comments: Vec<Comment>) -> Self {
        *self.comments.lock() = comments;
        self
    }

    pub fn fail_on(self, op: GitHubOp) -> Self {
        self.failures.lock().insert(op);
        self
    }

    pub fn calls(&self) -> Vec<GitHubCall> {
        self.calls.lock().clone()
    }

    pub fn comments(&self) -> Vec<Comment> {
        self.comments.lock().clone()
    }

    /// States posted to the deployment record, in order.
    pub fn statuses(&self) -> Vec<DeploymentState> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                GitHubCall::Status { state, .. } => Some(*state),
                _ => None,
            })
            .collect()
    }

    pub fn deployments_created(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| matches!(call, GitHubCall::CreateDeployment { .. }))
            .count()
    }

    fn record(&self, call: GitHubCall) {
        self.calls.lock().push(call);
    }

    fn check(&self, op: GitHubOp) -> Result<(), GitHubError> {
        if self.failures.lock().contains(&op) {
            return Err(GitHubError::Status {
                status: 500,
                endpoint: format!("{op:?}"),
                message: "injected failure".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl SourceControl for FakeGitHub {
    async fn pull_requests_for_commit(
        &self,
        _revision: &Revision,
    ) -> Result<Vec<PullRequest>, GitHubError> {
        self.record(GitHubCall::PullRequests);
        self.check(GitHubOp::PullRequests)?;
        Ok(self.pulls.lock().clone())
    }

    async fn commit(&self, revision: &Revision) -> Result<CommitInfo, GitHubError> {
        self.record(GitHubCall::Commit);
        self.check(GitHubOp::Commit)?;
        Ok(CommitInfo {
            sha: revision.to_string(),
            author_name: "Mona Octocat".to_string(),
            author_login: Some("octocat".to_string()),
            message: "Add login page\n\nLonger body".to_string(),
        })
    }

    async fn create_deployment(
        &self,
        deployment: &NewDeployment,
    ) -> Result<DeploymentRecord, GitHubError> {
        self.record(GitHubCall::CreateDeployment {
            environment: deployment.environment.clone(),
            git_ref: deployment.git_ref.clone(),
        });
        self.check(GitHubOp::CreateDeployment)?;
        Ok(DeploymentRecord {
            id: DeploymentRecordId::from(7u64),
            environment: Some(deployment.environment.clone()),
        })
    }

    async fn create_deployment_status(
        &self,
        _id: &DeploymentRecordId,
        status: &NewDeploymentStatus,
    ) -> Result<(), GitHubError> {
        self.record(GitHubCall::Status {
            state: status.state,
            environment_url: status.environment_url.clone(),
        });
        self.check(GitHubOp::Status(status.state))
    }

    async fn list_comments(&self, pull: PullNumber) -> Result<Vec<Comment>, GitHubError> {
        self.record(GitHubCall::ListComments(pull.get()));
        self.check(GitHubOp::ListComments)?;
        Ok(self.comments.lock().clone())
    }

    async fn delete_comment(&self, id: &CommentId) -> Result<(), GitHubError> {
        self.record(GitHubCall::DeleteComment(id.to_string()));
        self.check(GitHubOp::DeleteComment)?;
        self.comments.lock().retain(|c| &c.id != id);
        Ok(())
    }

    async fn create_comment(&self, pull: PullNumber, body: &str) -> Result<Comment, GitHubError> {
        self.record(GitHubCall::CreateComment {
            pull: pull.get(),
            body: body.to_string(),
        });
        self.check(GitHubOp::CreateComment)?;

        let id = {
            let mut next = self.next_comment_id.lock();
            *next += 1;
            *next
        };
        let created = comment(id, body);
        self.comments.lock().push(created.clone());
        Ok(created)
    }

    async fn add_labels(&self, pull: PullNumber, labels: &[String]) -> Result<(), GitHubError> {
        self.record(GitHubCall::AddLabels {
            pull: pull.get(),
            labels: labels.to_vec(),
        });
        self.check(GitHubOp::AddLabels)
    }
}

// =============================================================================
// Vercel fake
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VercelCall {
    Deploy(DeployRequest),
    Alias { deployment_url: String, domain: String },
    Inspect(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VercelOp {
    Deploy,
    Alias,
    Inspect,
}

pub struct FakeVercel {
    url: String,
    calls: Mutex<Vec<VercelCall>>,
    failures: Mutex<HashSet<VercelOp>>,
}

impl FakeVercel {
    /// A provider whose deploys land at `url` (printed without a scheme).
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            calls: Mutex::new(Vec::new()),
            failures: Mutex::new(HashSet::new()),
        }
    }

    pub fn fail_on(self, op: VercelOp) -> Self {
        self.failures.lock().insert(op);
        self
    }

    pub fn calls(&self) -> Vec<VercelCall> {
        self.calls.lock().clone()
    }

    pub fn aliases(&self) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                VercelCall::Alias { domain, .. } => Some(domain.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn deploy_requests(&self) -> Vec<DeployRequest> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                VercelCall::Deploy(request) => Some(request.clone()),
                _ => None,
            })
            .collect()
    }

    fn check(&self, op: VercelOp) -> Result<(), VercelError> {
        if self.failures.lock().contains(&op) {
            return Err(VercelError::other(format!("injected {op:?} failure")));
        }
        Ok(())
    }
}

#[async_trait]
impl HostingProvider for FakeVercel {
    async fn deploy(&self, request: &DeployRequest) -> Result<String, VercelError> {
        self.calls.lock().push(VercelCall::Deploy(request.clone()));
        self.check(VercelOp::Deploy)?;
        Ok(self.url.clone())
    }

    async fn assign_alias(&self, deployment_url: &str, domain: &str) -> Result<(), VercelError> {
        self.calls.lock().push(VercelCall::Alias {
            deployment_url: deployment_url.to_string(),
            domain: domain.to_string(),
        });
        self.check(VercelOp::Alias)
    }

    async fn deployment(&self, deployment_url: &str) -> Result<DeploymentInfo, VercelError> {
        self.calls
            .lock()
            .push(VercelCall::Inspect(deployment_url.to_string()));
        self.check(VercelOp::Inspect)?;
        Ok(DeploymentInfo {
            id: VercelDeploymentId::new("dpl_123"),
            inspector_url: Some("https://vercel.com/acme/site/dpl_123".to_string()),
        })
    }
}
