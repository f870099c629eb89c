// ABOUTME: Runner-provided environment describing the triggering event.
// ABOUTME: Commit, ref, actor, run id, and GitHub endpoints.

use std::path::PathBuf;

use super::inputs::Inputs;
use crate::error::{Error, Result};
use crate::github::DEFAULT_API_URL;
use crate::types::{RepoSlug, Revision};

pub const DEFAULT_SERVER_URL: &str = "https://github.com";

/// Facts about the current workflow run, read once at startup.
#[derive(Debug, Clone)]
pub struct ActionEnv {
    pub sha: Revision,
    pub git_ref: Option<String>,
    pub ref_name: Option<String>,
    pub actor: String,
    pub run_id: Option<String>,
    pub server_url: String,
    pub api_url: String,
    pub output_file: Option<PathBuf>,
}

impl ActionEnv {
    pub fn from_inputs<F>(inputs: &Inputs<F>) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let sha = inputs.required(&["GITHUB_SHA"])?;
        let sha = Revision::new(&sha)
            .map_err(|e| Error::InvalidConfig(format!("GITHUB_SHA: {e}")))?;

        Ok(Self {
            sha,
            git_ref: inputs.get("GITHUB_REF"),
            ref_name: inputs.get("GITHUB_REF_NAME"),
            actor: inputs.required(&["GITHUB_ACTOR"])?,
            run_id: inputs.get("GITHUB_RUN_ID"),
            server_url: inputs
                .get("GITHUB_SERVER_URL")
                .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string()),
            api_url: inputs
                .get("GITHUB_API_URL")
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            output_file: inputs.get("GITHUB_OUTPUT").map(PathBuf::from),
        })
    }

    /// Branch or tag name of the pushed ref.
    pub fn branch(&self) -> Option<String> {
        if let Some(ref name) = self.ref_name {
            return Some(name.clone());
        }

        self.git_ref.as_deref().map(|r| {
            r.strip_prefix("refs/heads/")
                .or_else(|| r.strip_prefix("refs/tags/"))
                .unwrap_or(r)
                .to_string()
        })
    }

    /// Link to the workflow run logs, when the run id is known.
    pub fn log_url(&self, repo: &RepoSlug) -> Option<String> {
        self.run_id.as_ref().map(|id| {
            format!(
                "{}/{}/{}/actions/runs/{}",
                self.server_url.trim_end_matches('/'),
                repo.owner(),
                repo.name(),
                id
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> Result<ActionEnv> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ActionEnv::from_inputs(&Inputs::new(move |k: &str| map.get(k).cloned()))
    }

    #[test]
    fn branch_falls_back_to_stripped_ref() {
        let env = env(&[
            ("GITHUB_SHA", "abcdef1234567"),
            ("GITHUB_ACTOR", "octocat"),
            ("GITHUB_REF", "refs/heads/main"),
        ])
        .unwrap();
        assert_eq!(env.branch(), Some("main".to_string()));
    }

    #[test]
    fn log_url_uses_server_and_run_id() {
        let env = env(&[
            ("GITHUB_SHA", "abcdef1234567"),
            ("GITHUB_ACTOR", "octocat"),
            ("GITHUB_RUN_ID", "42"),
        ])
        .unwrap();
        let repo = RepoSlug::parse("acme/site").unwrap();
        assert_eq!(
            env.log_url(&repo),
            Some("https://github.com/acme/site/actions/runs/42".to_string())
        );
    }

    #[test]
    fn missing_sha_is_configuration_error() {
        let err = env(&[("GITHUB_ACTOR", "octocat")]).unwrap_err();
        assert!(matches!(err, Error::MissingInput(_)));
    }
}
