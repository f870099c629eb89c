// ABOUTME: Deployment record state types for the type state pattern.
// ABOUTME: Each state carries the data that exists at that point of the lifecycle.

use crate::types::DeploymentRecordId;

/// Initial state: no record exists on GitHub yet.
/// Available actions: `create()`, `mark_failure()` (no-op)
#[derive(Debug, Clone, Copy, Default)]
pub struct Absent;

/// Record created but not yet marked.
/// Available actions: `mark_pending()`
#[derive(Debug, Clone)]
pub struct Created {
    pub(crate) id: DeploymentRecordId,
}

/// Record marked pending while the deploy runs.
/// Available actions: `mark_success()`, `mark_failure()`
#[derive(Debug, Clone)]
pub struct Pending {
    pub(crate) id: DeploymentRecordId,
}

/// Terminal: record marked success with the preview URL.
#[derive(Debug, Clone)]
pub struct Succeeded {
    pub(crate) id: DeploymentRecordId,
    pub(crate) environment_url: String,
}

/// Terminal: record marked failure, or nothing was ever created.
#[derive(Debug, Clone)]
pub struct Failed {
    pub(crate) id: Option<DeploymentRecordId>,
}

impl Created {
    pub fn id(&self) -> &DeploymentRecordId {
        &self.id
    }
}

impl Pending {
    pub fn id(&self) -> &DeploymentRecordId {
        &self.id
    }
}

impl Succeeded {
    pub fn id(&self) -> &DeploymentRecordId {
        &self.id
    }

    pub fn environment_url(&self) -> &str {
        &self.environment_url
    }
}

impl Failed {
    pub fn id(&self) -> Option<&DeploymentRecordId> {
        self.id.as_ref()
    }
}
