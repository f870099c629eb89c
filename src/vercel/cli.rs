// ABOUTME: HostingProvider backed by the `vercel` CLI and the Vercel REST API.
// ABOUTME: Spawns the CLI with tokio::process and reads deployment metadata over HTTP.

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use serde::Deserialize;
use snafu::ResultExt;
use tokio::process::Command;

use super::error::{ApiSnafu, SpawnSnafu, VercelError};
use super::hosting::{DeploymentInfo, HostingProvider};
use super::request::DeployRequest;

pub const DEFAULT_API_URL: &str = "https://api.vercel.com";

/// Static settings for the CLI, fixed for the whole run.
#[derive(Clone)]
pub struct VercelCliConfig {
    pub binary: PathBuf,
    pub token: String,
    pub org_id: String,
    pub project_id: String,
    pub scope: Option<String>,
    pub working_directory: Option<PathBuf>,
    pub api_url: String,
}

impl std::fmt::Debug for VercelCliConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VercelCliConfig")
            .field("binary", &self.binary)
            .field("org_id", &self.org_id)
            .field("project_id", &self.project_id)
            .field("scope", &self.scope)
            .field("working_directory", &self.working_directory)
            .field("api_url", &self.api_url)
            .finish_non_exhaustive()
    }
}

/// Runs `vercel` subcommands and queries the Vercel API.
#[derive(Debug)]
pub struct VercelCli {
    config: VercelCliConfig,
    http: reqwest::Client,
}

impl VercelCli {
    pub fn new(config: VercelCliConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// Arguments for `vercel deploy`, without the binary.
    pub fn deploy_args(&self, request: &DeployRequest) -> Vec<String> {
        let mut args = self.common_args();
        args.push("deploy".to_string());
        args.push("--yes".to_string());

        if request.production {
            args.push("--prod".to_string());
        }
        if request.prebuilt {
            args.push("--prebuilt".to_string());
        }
        for entry in &request.build_env {
            args.push("--build-env".to_string());
            args.push(entry.clone());
        }
        if let Some(ref metadata) = request.metadata {
            for (key, value) in metadata.to_pairs() {
                args.push("--meta".to_string());
                args.push(format!("{key}={value}"));
            }
        }

        args
    }

    /// Arguments for `vercel alias set`, without the binary.
    pub fn alias_args(&self, deployment_url: &str, domain: &str) -> Vec<String> {
        let mut args = self.common_args();
        args.extend([
            "alias".to_string(),
            "set".to_string(),
            deployment_url.to_string(),
            domain.to_string(),
        ]);
        args
    }

    fn common_args(&self) -> Vec<String> {
        let mut args = vec!["--token".to_string(), self.config.token.clone()];
        if let Some(ref scope) = self.config.scope {
            args.push("--scope".to_string());
            args.push(scope.clone());
        }
        if let Some(ref dir) = self.config.working_directory {
            args.push("--cwd".to_string());
            args.push(dir.display().to_string());
        }
        args
    }

    /// Run the CLI and return its stdout, failing on a non-zero exit.
    async fn run(&self, command: &str, args: &[String]) -> Result<String, VercelError> {
        tracing::debug!("Running vercel {}", command);

        let output = Command::new(&self.config.binary)
            .args(args)
            .env("VERCEL_ORG_ID", &self.config.org_id)
            .env("VERCEL_PROJECT_ID", &self.config.project_id)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .context(SpawnSnafu)?;

        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        if !stderr.trim().is_empty() {
            tracing::debug!("vercel {} stderr: {}", command, stderr.trim());
        }

        if !output.status.success() {
            return Err(VercelError::CommandFailed {
                command: command.to_string(),
                code: output.status.code(),
                stderr: stderr.trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

/// The CLI prints the deployment URL as the last line of stdout.
pub(crate) fn parse_deployment_url(stdout: &str) -> Option<String> {
    stdout
        .lines()
        .map(str::trim)
        .rfind(|line| !line.is_empty())
        .map(str::to_string)
}

/// `https://host/path` → `host`.
fn deployment_host(url: &str) -> &str {
    let without_scheme = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    without_scheme
        .split('/')
        .next()
        .unwrap_or(without_scheme)
}

#[derive(Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

#[async_trait]
impl HostingProvider for VercelCli {
    async fn deploy(&self, request: &DeployRequest) -> Result<String, VercelError> {
        let stdout = self.run("deploy", &self.deploy_args(request)).await?;
        parse_deployment_url(&stdout).ok_or(VercelError::EmptyOutput)
    }

    async fn assign_alias(&self, deployment_url: &str, domain: &str) -> Result<(), VercelError> {
        self.run("alias", &self.alias_args(deployment_url, domain))
            .await
            .map(|_| ())
    }

    async fn deployment(&self, deployment_url: &str) -> Result<DeploymentInfo, VercelError> {
        let url = format!(
            "{}/v13/deployments/{}",
            self.config.api_url.trim_end_matches('/'),
            urlencoding::encode(deployment_host(deployment_url))
        );

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.config.token)
            .query(&[("teamId", self.config.org_id.as_str())])
            .send()
            .await
            .context(ApiSnafu)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(VercelError::ApiStatus {
                status: status.as_u16(),
                message,
            });
        }

        response.json().await.context(ApiSnafu)
    }
}
