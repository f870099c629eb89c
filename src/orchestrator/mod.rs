// ABOUTME: Top-level deploy pipeline tying GitHub and Vercel together.
// ABOUTME: Gate, track, deploy, alias, report; a pending record always reaches a terminal state.

mod gate;
mod result;

pub use gate::{GateDecision, evaluate};
pub use result::RunResult;

use crate::alias::{resolve_all, with_scheme};
use crate::comment::{CommentManager, CommentPolicy, DeploymentLinks, deployed_body, refusal_body};
use crate::config::{ActionEnv, Settings};
use crate::context::RunContext;
use crate::deploy::{DeploymentTracker, Pending};
use crate::diagnostics::{Diagnostics, Warning};
use crate::error::Result;
use crate::github::SourceControl;
use crate::types::{PullNumber, RepoSlug};
use crate::vercel::{CommitMetadata, DeployRequest, DeploymentInfo, HostingProvider};

/// Alias domains a run would assign, in assignment order.
///
/// The pull request preview domain only applies when a pull request is associated.
pub fn planned_aliases(settings: &Settings, context: &RunContext) -> Vec<String> {
    let preview = settings
        .pr_preview_domain
        .as_ref()
        .filter(|_| context.pull_number().is_some());
    resolve_all(preview.into_iter().chain(&settings.alias_domains), context)
}

/// What the hosting provider produced for a successful deploy.
#[derive(Debug)]
struct Published {
    urls: Vec<String>,
    info: DeploymentInfo,
}

impl Published {
    fn preview_url(&self) -> &str {
        self.urls.first().map(String::as_str).unwrap_or_default()
    }

    fn unique_url(&self) -> &str {
        self.urls.last().map(String::as_str).unwrap_or_default()
    }

    fn inspector_url(&self) -> Option<&str> {
        self.info
            .inspector_url
            .as_deref()
            .filter(|u| !u.trim().is_empty())
    }
}

/// Drives one run against a source control platform and a hosting provider.
pub struct Orchestrator<'a, G: ?Sized, H: ?Sized> {
    settings: &'a Settings,
    github: &'a G,
    hosting: &'a H,
    diagnostics: Diagnostics,
}

impl<'a, G, H> Orchestrator<'a, G, H>
where
    G: SourceControl + ?Sized,
    H: HostingProvider + ?Sized,
{
    pub fn new(settings: &'a Settings, github: &'a G, hosting: &'a H) -> Self {
        Self {
            settings,
            github,
            hosting,
            diagnostics: Diagnostics::default(),
        }
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Look up the pull requests for the revision and build the run context.
    pub async fn resolve_context(&self, env: &ActionEnv, repo: &RepoSlug) -> Result<RunContext> {
        let pulls = self.github.pull_requests_for_commit(&env.sha).await?;
        let context = RunContext::resolve(env, repo, pulls)?;

        match context.pull_number() {
            Some(pull) => tracing::info!("Found pull request #{} for {}", pull, env.sha),
            None => tracing::info!("No open pull request found for {}", env.sha),
        }
        Ok(context)
    }

    /// Run the full pipeline for the revision in `env`.
    pub async fn run(&mut self, env: &ActionEnv, repo: &RepoSlug) -> Result<RunResult> {
        let context = self.resolve_context(env, repo).await?;
        self.run_with_context(&context).await
    }

    /// Run the pipeline for an already resolved context.
    pub async fn run_with_context(&mut self, context: &RunContext) -> Result<RunResult> {
        if let GateDecision::Refuse { pull } =
            gate::evaluate(context, self.settings.deploy_pr_from_fork)
        {
            return self.refuse(context, pull).await;
        }

        let tracker = if self.settings.github_deployment {
            Some(self.open_record(context).await?)
        } else {
            None
        };

        let published = match self.publish(context).await {
            Ok(published) => published,
            Err(e) => {
                if let Some(tracker) = tracker {
                    self.fail_record(tracker).await;
                }
                return Err(e);
            }
        };

        let deployment_created = match tracker {
            Some(tracker) => match tracker
                .mark_success(self.github, published.preview_url())
                .await
            {
                Ok(succeeded) => {
                    tracing::debug!("Deployment record {} finalized", succeeded.record_id());
                    true
                }
                Err((tracker, e)) => {
                    self.fail_record(tracker).await;
                    return Err(e.into());
                }
            },
            None => false,
        };

        let comment_created = match context.pull_number() {
            Some(pull) => self.report(context, pull, &published).await?,
            None => false,
        };

        let inspector_url = published.inspector_url().map(str::to_string);
        Ok(RunResult {
            deployment_created,
            comment_created,
            preview_url: Some(published.preview_url().to_string()),
            unique_url: Some(published.unique_url().to_string()),
            deployment_id: Some(published.info.id.clone()),
            inspector_url,
            deployment_urls: published.urls,
        })
    }

    /// Explain the refusal on the pull request instead of deploying.
    async fn refuse(&mut self, context: &RunContext, pull: PullNumber) -> Result<RunResult> {
        self.diagnostics.warn(Warning::fork_refused(format!(
            "Refusing to deploy pull request #{pull} from @{}'s fork",
            context.actor()
        )));

        let policy = CommentPolicy {
            delete_existing: self.settings.delete_existing_comment,
            create: true,
        };
        CommentManager::new(self.github)
            .replace(pull, &refusal_body(context), policy, &mut self.diagnostics)
            .await?;

        Ok(RunResult::refused())
    }

    /// Create the deployment record and move it to pending.
    async fn open_record(&self, context: &RunContext) -> Result<DeploymentTracker<Pending>> {
        tracing::info!("Creating GitHub deployment");
        let tracker = DeploymentTracker::new(
            self.settings.environment(),
            context.log_url().map(str::to_string),
        );
        let created = tracker
            .create(self.github, context.revision(), self.settings.production)
            .await?;
        Ok(created.mark_pending(self.github).await?)
    }

    /// Best-effort failure transition; the caller still surfaces its own error.
    async fn fail_record(&mut self, tracker: DeploymentTracker<Pending>) {
        let id = tracker.record_id().clone();
        if let Err(e) = tracker.mark_failure(self.github).await {
            self.diagnostics.warn(Warning::deployment_status(format!(
                "Could not mark deployment #{id} as failed: {e}"
            )));
        }
    }

    /// Deploy, assign aliases in order, and fetch the deployment's metadata.
    async fn publish(&self, context: &RunContext) -> Result<Published> {
        let mut request = DeployRequest::from_settings(self.settings);
        if self.settings.attach_commit_metadata {
            let commit = self.github.commit(context.revision()).await?;
            request = request.with_metadata(CommitMetadata::new(
                context,
                commit,
                self.settings.trim_commit_message,
            ));
        }

        tracing::info!("Starting deploy with Vercel CLI");
        let deployment_url = with_scheme(&self.hosting.deploy(&request).await?);
        tracing::info!("Deployment URL: {}", deployment_url);

        let mut urls = Vec::new();
        for domain in planned_aliases(self.settings, context) {
            tracing::info!("Assigning alias {} to deployment", domain);
            self.hosting.assign_alias(&deployment_url, &domain).await?;
            urls.push(with_scheme(&domain));
        }
        urls.push(deployment_url.clone());

        let info = self.hosting.deployment(&deployment_url).await?;
        tracing::debug!("Vercel deployment id: {}", info.id);

        Ok(Published { urls, info })
    }

    /// Refresh the status comment and label the pull request.
    ///
    /// Returns whether a comment was created.
    async fn report(
        &mut self,
        context: &RunContext,
        pull: PullNumber,
        published: &Published,
    ) -> Result<bool> {
        let links = DeploymentLinks {
            preview_url: published.preview_url(),
            inspector_url: published.inspector_url(),
        };
        let policy = CommentPolicy {
            delete_existing: self.settings.delete_existing_comment,
            create: self.settings.create_comment,
        };

        let comment = CommentManager::new(self.github)
            .replace(pull, &deployed_body(context, links), policy, &mut self.diagnostics)
            .await?;

        if !self.settings.pr_labels.is_empty() {
            tracing::info!("Adding labels to #{}", pull);
            if let Err(e) = self.github.add_labels(pull, &self.settings.pr_labels).await {
                self.diagnostics.warn(Warning::labels(format!(
                    "Could not add labels to #{pull}: {e}"
                )));
            }
        }

        Ok(comment.is_some())
    }
}
