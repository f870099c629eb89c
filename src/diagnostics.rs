// ABOUTME: Diagnostics accumulator for non-fatal warnings during a run.
// ABOUTME: Collects warnings that shouldn't fail the run but should be shown to users.

/// Collects non-fatal warnings during pipeline operations.
#[derive(Debug, Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    /// Record a warning, auto-logging it via tracing.
    pub fn warn(&mut self, warning: Warning) {
        tracing::warn!("{}", warning.message);
        self.warnings.push(warning);
    }

    /// Get all collected warnings.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Check if any warnings were collected.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// A non-fatal warning collected during a run.
#[derive(Debug, Clone)]
pub struct Warning {
    pub kind: WarningKind,
    pub message: String,
}

impl Warning {
    /// Create a comment cleanup warning.
    pub fn comment_cleanup(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::CommentCleanup,
            message: message.into(),
        }
    }

    /// Create a deployment status warning.
    pub fn deployment_status(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::DeploymentStatus,
            message: message.into(),
        }
    }

    /// Create a pull request label warning.
    pub fn labels(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::Labels,
            message: message.into(),
        }
    }

    /// Create a fork refusal warning.
    pub fn fork_refused(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::ForkRefused,
            message: message.into(),
        }
    }
}

/// Categories of warnings that can occur during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// Failed to list or delete a stale status comment.
    CommentCleanup,
    /// Failed to mark the deployment record failed (it may stay pending).
    DeploymentStatus,
    /// Failed to add labels to the pull request.
    Labels,
    /// Deployment refused because the pull request comes from a fork.
    ForkRefused,
}
