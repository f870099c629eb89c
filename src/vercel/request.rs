// ABOUTME: Per-run deploy request handed to the hosting provider.
// ABOUTME: Carries production/prebuilt flags, build env, and commit metadata.

use crate::config::Settings;
use crate::context::RunContext;
use crate::github::CommitInfo;

/// Commit metadata Vercel shows next to the deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitMetadata {
    pub sha: String,
    pub author_name: String,
    pub author_login: Option<String>,
    pub message: String,
    pub org: String,
    pub repo: String,
    pub git_ref: String,
}

impl CommitMetadata {
    /// Build metadata from a fetched commit, optionally keeping only the subject line.
    pub fn new(context: &RunContext, commit: CommitInfo, trim_message: bool) -> Self {
        let message = if trim_message {
            commit.message.lines().next().unwrap_or_default().to_string()
        } else {
            commit.message
        };

        Self {
            sha: commit.sha,
            author_name: commit.author_name,
            author_login: commit.author_login,
            message,
            org: context.repo().owner().to_string(),
            repo: context.repo().name().to_string(),
            git_ref: context.branch().to_string(),
        }
    }

    /// `key=value` pairs passed as `--meta`.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("githubCommitSha".to_string(), self.sha.clone()),
            ("githubCommitAuthorName".to_string(), self.author_name.clone()),
            ("githubCommitMessage".to_string(), self.message.clone()),
            ("githubCommitOrg".to_string(), self.org.clone()),
            ("githubCommitRepo".to_string(), self.repo.clone()),
            ("githubCommitRef".to_string(), self.git_ref.clone()),
            ("githubDeployment".to_string(), "1".to_string()),
        ];
        if let Some(ref login) = self.author_login {
            pairs.push(("githubCommitAuthorLogin".to_string(), login.clone()));
        }
        pairs
    }
}

/// Everything about a single `vercel deploy` invocation that varies per run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeployRequest {
    pub production: bool,
    pub prebuilt: bool,
    pub build_env: Vec<String>,
    pub metadata: Option<CommitMetadata>,
}

impl DeployRequest {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            production: settings.production,
            prebuilt: settings.prebuilt,
            build_env: settings.build_env.clone(),
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, metadata: CommitMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}
