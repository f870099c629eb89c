// ABOUTME: State transition methods for the deployment record.
// ABOUTME: Each method consumes self and returns the next state on success.

use crate::github::{DeploymentState, NewDeployment, NewDeploymentStatus, SourceControl};
use crate::types::{DeploymentRecordId, Revision};

use super::DeploymentTracker;
use super::error::DeployError;
use super::state::{Absent, Created, Failed, Pending, Succeeded};

/// Result type for transitions that hand the tracker back on failure.
pub type TransitionResult<T, S> =
    Result<DeploymentTracker<T>, (DeploymentTracker<S>, DeployError)>;

const DESCRIPTION: &str = "Deploy to Vercel";

// =============================================================================
// Internal Helpers
// =============================================================================

impl<S> DeploymentTracker<S> {
    /// Internal helper to move into a new state.
    fn transition<T>(self, state: T) -> DeploymentTracker<T> {
        DeploymentTracker {
            environment: self.environment,
            log_url: self.log_url,
            state,
        }
    }

    /// Post a status for the record.
    async fn post_status<C: SourceControl + ?Sized>(
        &self,
        client: &C,
        id: &DeploymentRecordId,
        state: DeploymentState,
        environment_url: Option<&str>,
    ) -> Result<(), DeployError> {
        let status = NewDeploymentStatus {
            state,
            environment_url: environment_url.map(str::to_string),
            log_url: self.log_url.clone(),
            description: Some(status_description(state).to_string()),
        };

        client
            .create_deployment_status(id, &status)
            .await
            .map_err(|e| DeployError::status_update(state, e))
    }
}

fn status_description(state: DeploymentState) -> &'static str {
    match state {
        DeploymentState::Pending => "Deploying to Vercel",
        DeploymentState::Success => "Deployed to Vercel",
        DeploymentState::Failure => "Deployment to Vercel failed",
        _ => DESCRIPTION,
    }
}

// =============================================================================
// Absent -> Created
// =============================================================================

impl DeploymentTracker<Absent> {
    /// Create the deployment record for `revision`.
    ///
    /// # Errors
    ///
    /// Returns `DeployError::CreateFailed` if GitHub rejects the request.
    #[must_use = "deployment state must be used"]
    pub async fn create<C: SourceControl + ?Sized>(
        self,
        client: &C,
        revision: &Revision,
        production: bool,
    ) -> Result<DeploymentTracker<Created>, DeployError> {
        let request = NewDeployment {
            git_ref: revision.to_string(),
            environment: self.environment.clone(),
            description: DESCRIPTION.to_string(),
            required_contexts: Vec::new(),
            auto_merge: false,
            production_environment: production,
        };

        let record = client
            .create_deployment(&request)
            .await
            .map_err(DeployError::CreateFailed)?;

        tracing::info!("Deployment #{} created", record.id);
        Ok(self.transition(Created { id: record.id }))
    }

    /// Nothing exists to mark; record the failure locally.
    pub fn mark_failure(self) -> DeploymentTracker<Failed> {
        self.transition(Failed { id: None })
    }
}

// =============================================================================
// Created -> Pending
// =============================================================================

impl DeploymentTracker<Created> {
    /// Mark the new record as pending.
    ///
    /// # Errors
    ///
    /// Returns `DeployError::StatusUpdateFailed` if the status cannot be posted.
    #[must_use = "deployment state must be used"]
    pub async fn mark_pending<C: SourceControl + ?Sized>(
        self,
        client: &C,
    ) -> Result<DeploymentTracker<Pending>, DeployError> {
        let id = self.state.id.clone();
        self.post_status(client, &id, DeploymentState::Pending, None)
            .await?;

        tracing::info!("Deployment #{} status changed to \"pending\"", id);
        Ok(self.transition(Pending { id }))
    }
}

// =============================================================================
// Pending -> Succeeded | Failed
// =============================================================================

impl DeploymentTracker<Pending> {
    /// Mark the record successful, pointing its environment at `preview_url`.
    ///
    /// # Errors
    ///
    /// Returns `(self, error)` on failure so the caller can still mark the
    /// record failed.
    #[must_use = "deployment state must be used"]
    pub async fn mark_success<C: SourceControl + ?Sized>(
        self,
        client: &C,
        preview_url: &str,
    ) -> TransitionResult<Succeeded, Pending> {
        let preview_url = preview_url.trim();
        if preview_url.is_empty() {
            return Err((self, DeployError::EmptyPreviewUrl));
        }

        let id = self.state.id.clone();
        let posted = self
            .post_status(client, &id, DeploymentState::Success, Some(preview_url))
            .await;
        if let Err(e) = posted {
            return Err((self, e));
        }

        tracing::info!("Deployment #{} status changed to \"success\"", id);
        Ok(self.transition(Succeeded {
            id,
            environment_url: preview_url.to_string(),
        }))
    }

    /// Mark the record failed.
    ///
    /// # Errors
    ///
    /// Returns `DeployError::StatusUpdateFailed` if the status cannot be
    /// posted. The record is then left as GitHub last saw it.
    #[must_use = "deployment state must be used"]
    pub async fn mark_failure<C: SourceControl + ?Sized>(
        self,
        client: &C,
    ) -> Result<DeploymentTracker<Failed>, DeployError> {
        let id = self.state.id.clone();
        self.post_status(client, &id, DeploymentState::Failure, None)
            .await?;

        tracing::info!("Deployment #{} status changed to \"failure\"", id);
        Ok(self.transition(Failed { id: Some(id) }))
    }
}
