// ABOUTME: Status comment management on the associated pull request.
// ABOUTME: Finds, deletes, and recreates the single comment this tool owns.

use crate::context::RunContext;
use crate::diagnostics::{Diagnostics, Warning};
use crate::github::{Comment, GitHubError, SourceControl};
use crate::types::{CommentId, PullNumber};

/// Hidden marker identifying comments written by this tool.
pub const COMMENT_MARKER: &str = "<!-- vercel-deploy -->";

/// Which comment operations a run performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentPolicy {
    pub delete_existing: bool,
    pub create: bool,
}

/// Maintains at most one live status comment per pull request.
pub struct CommentManager<'a, C: ?Sized> {
    client: &'a C,
}

impl<'a, C> CommentManager<'a, C>
where
    C: SourceControl + ?Sized,
{
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    /// The newest comment carrying the marker.
    pub async fn find_existing(&self, pull: PullNumber) -> Result<Option<Comment>, GitHubError> {
        let comments = self.client.list_comments(pull).await?;
        Ok(comments.into_iter().rfind(is_ours))
    }

    /// Delete stale status comments, returning the id of the newest one removed.
    ///
    /// Best-effort: failures are recorded in `diag` and never abort the run.
    pub async fn delete_existing(
        &self,
        pull: PullNumber,
        diag: &mut Diagnostics,
    ) -> Option<CommentId> {
        let comments = match self.client.list_comments(pull).await {
            Ok(comments) => comments,
            Err(e) => {
                diag.warn(Warning::comment_cleanup(format!(
                    "Could not list comments on #{pull}: {e}"
                )));
                return None;
            }
        };

        let mut deleted = None;
        for comment in comments.into_iter().filter(is_ours) {
            match self.client.delete_comment(&comment.id).await {
                Ok(()) => {
                    tracing::info!("Deleted existing comment: {}", comment.id);
                    deleted = Some(comment.id);
                }
                Err(e) => diag.warn(Warning::comment_cleanup(format!(
                    "Could not delete comment {}: {e}",
                    comment.id
                ))),
            }
        }
        deleted
    }

    /// Post a new status comment.
    pub async fn create(&self, pull: PullNumber, body: &str) -> Result<Comment, GitHubError> {
        let comment = self.client.create_comment(pull, body).await?;
        tracing::info!("Comment created: {}", comment.html_url);
        Ok(comment)
    }

    /// Apply `policy`: deletion always finishes before creation starts.
    pub async fn replace(
        &self,
        pull: PullNumber,
        body: &str,
        policy: CommentPolicy,
        diag: &mut Diagnostics,
    ) -> Result<Option<Comment>, GitHubError> {
        if policy.delete_existing {
            tracing::info!("Checking for existing comment on #{}", pull);
            self.delete_existing(pull, diag).await;
        }

        if !policy.create {
            return Ok(None);
        }

        tracing::info!("Creating new comment on #{}", pull);
        self.create(pull, body).await.map(Some)
    }
}

fn is_ours(comment: &Comment) -> bool {
    comment.body().contains(COMMENT_MARKER)
}

/// Links shown in the status comment.
#[derive(Debug, Clone, Copy)]
pub struct DeploymentLinks<'a> {
    pub preview_url: &'a str,
    pub inspector_url: Option<&'a str>,
}

/// Status comment for a successful deployment.
pub fn deployed_body(context: &RunContext, links: DeploymentLinks<'_>) -> String {
    let mut body = format!(
        "{COMMENT_MARKER}\nThis pull request has been deployed to Vercel.\n\n\
         <table>\n\
         <tr><td><strong>Latest commit:</strong></td><td><code>{}</code></td></tr>\n\
         <tr><td><strong>✅ Preview:</strong></td><td><a href='{url}'>{url}</a></td></tr>\n",
        context.revision().short(),
        url = links.preview_url,
    );

    if let Some(inspector) = links.inspector_url {
        body.push_str(&format!(
            "<tr><td><strong>🔍 Inspect:</strong></td><td><a href='{inspector}'>{inspector}</a></td></tr>\n"
        ));
    }
    body.push_str("</table>\n");

    if let Some(log_url) = context.log_url() {
        body.push_str(&format!("\n[View Workflow Logs]({log_url})\n"));
    }

    body
}

/// Comment explaining why a fork pull request was not deployed.
pub fn refusal_body(context: &RunContext) -> String {
    format!(
        "{COMMENT_MARKER}\nRefusing to deploy this Pull Request to Vercel because it originates from @{}'s fork.\n",
        context.actor()
    )
}
