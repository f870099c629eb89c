// ABOUTME: Generic deployment record tracker parameterized by state.
// ABOUTME: State types carry their own data for compile-time guarantees.

use super::state::{Absent, Created, Failed, Pending, Succeeded};
use crate::types::DeploymentRecordId;

/// Lifecycle of the GitHub deployment record for one run.
///
/// The state type parameter `S` carries state-specific data (like the record
/// ID) directly in the state type, so a record ID is only reachable in states
/// where the record is known to exist.
#[derive(Debug)]
#[must_use = "a pending deployment must be marked success or failure"]
pub struct DeploymentTracker<S> {
    pub(crate) environment: String,
    pub(crate) log_url: Option<String>,
    pub(crate) state: S,
}

impl DeploymentTracker<Absent> {
    /// Start tracking a deployment to `environment`.
    pub fn new(environment: impl Into<String>, log_url: Option<String>) -> Self {
        DeploymentTracker {
            environment: environment.into(),
            log_url,
            state: Absent,
        }
    }
}

impl<S> DeploymentTracker<S> {
    /// Environment label of the record.
    pub fn environment(&self) -> &str {
        &self.environment
    }

    /// Workflow log URL attached to every status.
    pub fn log_url(&self) -> Option<&str> {
        self.log_url.as_deref()
    }
}

impl DeploymentTracker<Created> {
    pub fn record_id(&self) -> &DeploymentRecordId {
        self.state.id()
    }
}

impl DeploymentTracker<Pending> {
    pub fn record_id(&self) -> &DeploymentRecordId {
        self.state.id()
    }
}

impl DeploymentTracker<Succeeded> {
    pub fn record_id(&self) -> &DeploymentRecordId {
        self.state.id()
    }

    pub fn environment_url(&self) -> &str {
        self.state.environment_url()
    }
}

impl DeploymentTracker<Failed> {
    /// `None` when creation itself failed and no record exists.
    pub fn record_id(&self) -> Option<&DeploymentRecordId> {
        self.state.id()
    }
}
