// ABOUTME: GitHub REST v3 client implementing SourceControl over reqwest.
// ABOUTME: Bound to a single repository; paginates list endpoints.

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::error::GitHubError;
use super::models::{
    Comment, CommitInfo, DeploymentRecord, NewDeployment, NewDeploymentStatus, PullRequest,
};
use super::source_control::SourceControl;
use crate::types::{CommentId, DeploymentRecordId, PullNumber, RepoSlug, Revision};

pub const DEFAULT_API_URL: &str = "https://api.github.com";

const USER_AGENT: &str = concat!("vercel-deploy/", env!("CARGO_PKG_VERSION"));
const PER_PAGE: usize = 100;

/// GitHub API client scoped to one repository.
pub struct GitHubClient {
    http: reqwest::Client,
    api_url: String,
    token: String,
    repo: RepoSlug,
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("api_url", &self.api_url)
            .field("repo", &self.repo)
            .finish()
    }
}

impl GitHubClient {
    pub fn new(
        api_url: impl Into<String>,
        token: impl Into<String>,
        repo: RepoSlug,
    ) -> Result<Self, GitHubError> {
        let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            http,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            repo,
        })
    }

    pub fn repo(&self) -> &RepoSlug {
        &self.repo
    }

    /// Absolute URL for a path below `/repos/{owner}/{repo}`.
    fn repo_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/{}",
            self.api_url,
            urlencoding::encode(self.repo.owner()),
            urlencoding::encode(self.repo.name()),
            path
        )
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.http
            .request(method, url)
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
    }

    /// Send a request and turn non-success statuses into `GitHubError::Status`.
    async fn send(&self, request: RequestBuilder, endpoint: &str) -> Result<Response, GitHubError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&body)
            .map(|b| b.message)
            .unwrap_or(body);

        Err(GitHubError::Status {
            status: status.as_u16(),
            endpoint: endpoint.to_string(),
            message,
        })
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        endpoint: &str,
    ) -> Result<T, GitHubError> {
        Ok(self.send(request, endpoint).await?.json().await?)
    }

    /// Fetch every page of a list endpoint.
    async fn paginate<T: DeserializeOwned>(
        &self,
        path: &str,
        endpoint: &str,
    ) -> Result<Vec<T>, GitHubError> {
        let url = self.repo_url(path);
        let mut items = Vec::new();
        let mut page = 1u32;

        loop {
            let request = self.request(Method::GET, &url).query(&[
                ("per_page", PER_PAGE.to_string()),
                ("page", page.to_string()),
            ]);
            let batch: Vec<T> = self.send_json(request, endpoint).await?;
            let count = batch.len();
            items.extend(batch);

            if count < PER_PAGE {
                break;
            }
            page += 1;
        }

        Ok(items)
    }
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: String,
}

#[derive(Deserialize)]
struct CommitResponse {
    sha: String,
    commit: CommitDetail,
    #[serde(default)]
    author: Option<CommitUser>,
}

#[derive(Deserialize)]
struct CommitDetail {
    message: String,
    #[serde(default)]
    author: Option<CommitAuthor>,
}

#[derive(Deserialize)]
struct CommitAuthor {
    name: String,
}

#[derive(Deserialize)]
struct CommitUser {
    login: String,
}

impl From<CommitResponse> for CommitInfo {
    fn from(response: CommitResponse) -> Self {
        CommitInfo {
            sha: response.sha,
            author_name: response
                .commit
                .author
                .map(|a| a.name)
                .unwrap_or_default(),
            author_login: response.author.map(|a| a.login),
            message: response.commit.message,
        }
    }
}

#[async_trait]
impl SourceControl for GitHubClient {
    async fn pull_requests_for_commit(
        &self,
        revision: &Revision,
    ) -> Result<Vec<PullRequest>, GitHubError> {
        let path = format!("commits/{}/pulls", revision);
        self.paginate(&path, "list pull requests for commit").await
    }

    async fn commit(&self, revision: &Revision) -> Result<CommitInfo, GitHubError> {
        let url = self.repo_url(&format!("commits/{}", revision));
        let response: CommitResponse = self
            .send_json(self.request(Method::GET, &url), "get commit")
            .await?;
        Ok(response.into())
    }

    async fn create_deployment(
        &self,
        deployment: &NewDeployment,
    ) -> Result<DeploymentRecord, GitHubError> {
        let url = self.repo_url("deployments");
        let request = self.request(Method::POST, &url).json(deployment);
        self.send_json(request, "create deployment").await
    }

    async fn create_deployment_status(
        &self,
        id: &DeploymentRecordId,
        status: &NewDeploymentStatus,
    ) -> Result<(), GitHubError> {
        let url = self.repo_url(&format!("deployments/{}/statuses", id));
        let request = self.request(Method::POST, &url).json(status);
        self.send(request, "create deployment status").await?;
        Ok(())
    }

    async fn list_comments(&self, pull: PullNumber) -> Result<Vec<Comment>, GitHubError> {
        let path = format!("issues/{}/comments", pull);
        self.paginate(&path, "list comments").await
    }

    async fn delete_comment(&self, id: &CommentId) -> Result<(), GitHubError> {
        let url = self.repo_url(&format!("issues/comments/{}", id));
        self.send(self.request(Method::DELETE, &url), "delete comment")
            .await?;
        Ok(())
    }

    async fn create_comment(&self, pull: PullNumber, body: &str) -> Result<Comment, GitHubError> {
        let url = self.repo_url(&format!("issues/{}/comments", pull));
        let request = self
            .request(Method::POST, &url)
            .json(&serde_json::json!({ "body": body }));
        self.send_json(request, "create comment").await
    }

    async fn add_labels(&self, pull: PullNumber, labels: &[String]) -> Result<(), GitHubError> {
        let url = self.repo_url(&format!("issues/{}/labels", pull));
        let request = self
            .request(Method::POST, &url)
            .json(&serde_json::json!({ "labels": labels }));
        self.send(request, "add labels").await?;
        Ok(())
    }
}
