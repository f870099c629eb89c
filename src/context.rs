// ABOUTME: Immutable per-run context shared by every pipeline stage.
// ABOUTME: Resolves the associated pull request, fork status, and effective branch.

use crate::config::ActionEnv;
use crate::error::{Error, Result};
use crate::github::PullRequest;
use crate::types::{PullNumber, RepoSlug, Revision};

/// Whether the associated pull request comes from another repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForkStatus {
    Fork,
    SameRepository,
    /// No pull request is associated, so there is nothing to compare.
    Undetermined,
}

/// The open pull request a run is attached to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssociatedPull {
    pub number: PullNumber,
    pub from_fork: bool,
}

#[derive(Debug, Clone)]
pub struct RunContext {
    revision: Revision,
    repo: RepoSlug,
    actor: String,
    branch: String,
    pull: Option<AssociatedPull>,
    log_url: Option<String>,
}

impl RunContext {
    /// Build the context from the runner environment and the pull requests
    /// GitHub associates with the revision. The newest open one wins.
    pub fn resolve(env: &ActionEnv, repo: &RepoSlug, pulls: Vec<PullRequest>) -> Result<Self> {
        let newest = pulls
            .into_iter()
            .filter(PullRequest::is_open)
            .max_by_key(|p| p.number);

        let branch = match newest {
            Some(ref pull) => pull.head.ref_name.clone(),
            None => env.branch().ok_or_else(|| {
                Error::InvalidConfig("cannot determine branch: GITHUB_REF is not set".to_string())
            })?,
        };

        let pull = newest.map(|p| AssociatedPull {
            number: p.number,
            // A deleted head repository can only have been a fork
            from_fork: p
                .head
                .repo
                .as_ref()
                .is_none_or(|head| !repo.matches(&head.full_name)),
        });

        Ok(Self {
            revision: env.sha.clone(),
            repo: repo.clone(),
            actor: env.actor.clone(),
            branch,
            pull,
            log_url: env.log_url(repo),
        })
    }

    /// Direct constructor for callers that already know every field.
    pub fn new(
        revision: Revision,
        repo: RepoSlug,
        actor: impl Into<String>,
        branch: impl Into<String>,
        pull: Option<AssociatedPull>,
        log_url: Option<String>,
    ) -> Self {
        Self {
            revision,
            repo,
            actor: actor.into(),
            branch: branch.into(),
            pull,
            log_url,
        }
    }

    pub fn revision(&self) -> &Revision {
        &self.revision
    }

    pub fn repo(&self) -> &RepoSlug {
        &self.repo
    }

    pub fn actor(&self) -> &str {
        &self.actor
    }

    pub fn branch(&self) -> &str {
        &self.branch
    }

    pub fn pull_number(&self) -> Option<PullNumber> {
        self.pull.as_ref().map(|p| p.number)
    }

    pub fn log_url(&self) -> Option<&str> {
        self.log_url.as_deref()
    }

    pub fn fork_status(&self) -> ForkStatus {
        match self.pull {
            Some(AssociatedPull { from_fork: true, .. }) => ForkStatus::Fork,
            Some(AssociatedPull {
                from_fork: false, ..
            }) => ForkStatus::SameRepository,
            None => ForkStatus::Undetermined,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::{HeadRepository, PullHead, PullState};

    fn action_env() -> ActionEnv {
        ActionEnv {
            sha: Revision::new("abcdef1234567").unwrap(),
            git_ref: Some("refs/heads/main".to_string()),
            ref_name: None,
            actor: "octocat".to_string(),
            run_id: Some("9".to_string()),
            server_url: "https://github.com".to_string(),
            api_url: "https://api.github.com".to_string(),
            output_file: None,
        }
    }

    fn pull(number: u64, state: PullState, head_repo: Option<&str>, head_ref: &str) -> PullRequest {
        PullRequest {
            number: PullNumber::new(number),
            state,
            head: PullHead {
                ref_name: head_ref.to_string(),
                repo: head_repo.map(|r| HeadRepository {
                    full_name: r.to_string(),
                }),
            },
        }
    }

    fn repo() -> RepoSlug {
        RepoSlug::parse("acme/site").unwrap()
    }

    #[test]
    fn no_pull_request_leaves_fork_status_undetermined() {
        let ctx = RunContext::resolve(&action_env(), &repo(), vec![]).unwrap();
        assert_eq!(ctx.fork_status(), ForkStatus::Undetermined);
        assert_eq!(ctx.branch(), "main");
        assert!(ctx.pull_number().is_none());
    }

    #[test]
    fn newest_open_pull_request_wins() {
        let pulls = vec![
            pull(3, PullState::Open, Some("acme/site"), "older"),
            pull(9, PullState::Closed, Some("acme/site"), "closed"),
            pull(5, PullState::Open, Some("acme/site"), "newer"),
        ];
        let ctx = RunContext::resolve(&action_env(), &repo(), pulls).unwrap();
        assert_eq!(ctx.pull_number(), Some(PullNumber::new(5)));
        assert_eq!(ctx.branch(), "newer");
        assert_eq!(ctx.fork_status(), ForkStatus::SameRepository);
    }

    #[test]
    fn foreign_or_deleted_head_repo_is_a_fork() {
        let ctx = RunContext::resolve(
            &action_env(),
            &repo(),
            vec![pull(1, PullState::Open, Some("mallory/site"), "x")],
        )
        .unwrap();
        assert_eq!(ctx.fork_status(), ForkStatus::Fork);

        let ctx = RunContext::resolve(
            &action_env(),
            &repo(),
            vec![pull(1, PullState::Open, None, "x")],
        )
        .unwrap();
        assert_eq!(ctx.fork_status(), ForkStatus::Fork);
    }

    #[test]
    fn missing_ref_without_pull_request_is_configuration_error() {
        let mut env = action_env();
        env.git_ref = None;
        let err = RunContext::resolve(&env, &repo(), vec![]).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }
}
